pub mod booking;
pub mod promotion;
pub mod resource;
pub mod status;
pub mod transaction;
pub mod vehicle;
pub mod working_hours;
