pub mod colors;
pub mod date;
pub mod formatting;
pub mod ids;
pub mod path;
pub mod table;
pub mod time;

pub use formatting::{money, signed_points};
