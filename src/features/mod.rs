pub mod assistant;
pub mod notifications;
pub mod reports;
pub mod users;
pub mod views;
pub mod workers;
