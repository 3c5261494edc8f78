pub mod models;
pub mod services;

pub use models::{Worker, WorkerStatus};
pub use services::{team_overview, worker_statistics, WorkerProfile, WorkerStats};
