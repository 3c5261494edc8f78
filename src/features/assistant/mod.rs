pub mod dtos;
pub mod services;

pub use dtos::{ChatMessage, ChatRole, ImageAnalysis, RepairBrief};
pub use services::{
    AssistantChat, BriefService, GenerateRequest, HttpModelGateway, InlineImage, ModelGateway,
    VisionService,
};
