pub mod app;
pub mod characters;
pub mod config;
pub mod constants;
pub mod controller;
pub mod conversation;
pub mod message;
pub mod selection;
