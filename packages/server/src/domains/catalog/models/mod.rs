pub mod catalog_entry;

pub use catalog_entry::CatalogEntry;
