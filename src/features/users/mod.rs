pub mod models;
pub mod services;

pub use models::{UserAccount, UserRole};
pub use services::UserDirectory;
