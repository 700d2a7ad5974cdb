mod client;
mod error;
mod http;
mod types;

pub use client::IngestClient;
pub use error::Error;
pub use http::ReqwestHttpClient;
pub use types::*;
