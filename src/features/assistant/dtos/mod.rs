mod analysis_dto;
mod chat_dto;

pub use analysis_dto::{ImageAnalysis, RepairBrief};
pub use chat_dto::{ChatMessage, ChatRole};
