//! Providers domain - fiscal records plus their services, branches and contacts

pub mod data;
pub mod models;

// Re-export commonly used types
pub use data::{
    BranchData, ContactData, CreateServiceInput, CreatedService, ProviderData, SaveProviderInput,
    SavedProvider, ServiceData,
};
pub use models::{
    CreateService, Provider, ProviderBranch, ProviderContact, ProviderService, SaveProvider,
    PROVIDER_IDS,
};
