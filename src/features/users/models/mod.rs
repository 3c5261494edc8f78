mod user;

pub use user::{UserAccount, UserRole};
