// HTTP routes
pub mod catalog;
pub mod clients;
pub mod health;
pub mod providers;

pub use health::*;
