pub mod access;
pub mod catalog;
pub mod config;
pub mod export;
pub mod history;
pub mod output;
pub mod scoring;
pub mod store;
pub mod text;
