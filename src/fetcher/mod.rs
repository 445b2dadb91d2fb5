pub mod client;
pub mod errors;
pub mod signature;
pub mod types;

pub use client::DocumentFetcher;
pub use errors::FetchError;
pub use types::FetchedDocument;
