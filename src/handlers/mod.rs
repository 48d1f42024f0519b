// Handlers module

pub mod ask;
pub mod chat;
pub mod health;
pub mod reply;

pub use ask::ask_handler;
pub use chat::chat_handler;
pub use health::{health_handler, service_info_handler};
