pub mod calculator;
pub mod resolver;
pub mod time_of_day;

pub use calculator::AutoFetch;
