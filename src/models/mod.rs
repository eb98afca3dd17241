pub mod chat_log;
pub mod community;
pub mod mood;
pub mod user;
