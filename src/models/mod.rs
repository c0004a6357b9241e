// src/models/mod.rs

pub mod attempt;
pub mod question;
pub mod quiz;
pub mod student;
pub mod topic;
pub mod user;
