pub mod availability;
pub mod booking;
pub mod clock;
pub mod filter;
pub mod ledger;
pub mod log;
pub mod notify;
pub mod promotion;
pub mod resource;
pub mod rewards;
pub mod vehicle;
