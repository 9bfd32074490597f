//! Clients domain - customer fiscal records

pub mod data;
pub mod models;

pub use data::{ClientData, SaveClientInput, SavedClient};
pub use models::{Client, SaveClient};
