mod team_service;

pub use team_service::{team_overview, worker_statistics, WorkerProfile, WorkerStats};
