pub mod add;
pub mod browse;
pub mod clear;
pub mod config;
pub mod delete;
pub mod export;
pub mod import;
pub mod list;
pub mod show;
