pub mod auth;
pub mod config;
pub mod errors;
pub mod models;
pub mod services;

pub use errors::SubmissionError;
