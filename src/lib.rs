pub mod app_state;
pub mod config;
pub mod extractor;
pub mod fetcher;
pub mod health;
pub mod normalizer;
pub mod pipeline;
pub mod rating;
pub mod resolver;
pub mod retry;
pub mod router;
pub mod scoring;
pub mod taxonomy;
pub mod telemetry;
