pub mod alumni;
pub mod chat;
pub mod upload;
