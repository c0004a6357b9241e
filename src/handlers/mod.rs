// src/handlers/mod.rs

pub mod admin;
pub mod auth;
pub mod chat;
pub mod quiz;
pub mod student;
