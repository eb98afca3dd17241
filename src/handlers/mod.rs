pub mod auth;
pub mod chat;
pub mod community;
pub mod emotion;
pub mod health;
pub mod image;
pub mod stress;
