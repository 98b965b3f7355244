pub mod audience;
pub mod config;
pub mod event;
pub mod scoring;
