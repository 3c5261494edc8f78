mod worker;

pub use worker::{Worker, WorkerStatus};
