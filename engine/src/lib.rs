// Portfolio dashboard engine: snapshot parsing, caching and metrics.

pub mod config;
pub mod data;
pub mod error;
pub mod metrics;
pub mod services;
