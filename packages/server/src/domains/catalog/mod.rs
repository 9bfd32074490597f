//! Service catalog - seeded reference data

pub mod data;
pub mod models;

pub use data::CatalogEntryData;
pub use models::CatalogEntry;
