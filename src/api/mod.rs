//! HTTP API handlers for madang-rating

pub mod export;
pub mod games;
pub mod health;
pub mod import;
pub mod input;
pub mod teams;
pub mod ui;
