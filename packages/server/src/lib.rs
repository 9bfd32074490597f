// Supplier Catalog - API Core
//
// Provider, client and service-catalog records served over HTTP from either
// an embedded or an enterprise relational engine. All data access goes
// through kernel::database, which renders each statement for the engine
// chosen at startup.

pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
