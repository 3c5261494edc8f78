mod brief_service;
mod chat_service;
mod model_gateway;
mod vision_service;

pub use brief_service::BriefService;
pub use chat_service::AssistantChat;
pub use model_gateway::{GenerateRequest, HttpModelGateway, InlineImage, ModelGateway};
pub use vision_service::VisionService;
