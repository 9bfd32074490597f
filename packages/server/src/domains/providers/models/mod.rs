pub mod branch;
pub mod contact;
pub mod provider;
pub mod service;

pub use branch::ProviderBranch;
pub use contact::ProviderContact;
pub use provider::{Provider, SaveProvider, PROVIDER_IDS};
pub use service::{CreateService, ProviderService};
