// Business domains
pub mod catalog;
pub mod clients;
pub mod providers;
pub mod schema;
