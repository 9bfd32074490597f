pub mod branch;
pub mod contact;
pub mod provider;
pub mod service;

pub use branch::BranchData;
pub use contact::ContactData;
pub use provider::{ProviderData, SaveProviderInput, SavedProvider};
pub use service::{CreateServiceInput, CreatedService, ServiceData};
