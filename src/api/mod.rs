mod client;
pub mod http;
pub mod types;

pub use client::ClipHubClient;
pub use http::{ApiRequest, HttpClient, HttpResponse, ReqwestClient, RequestBody, UploadFile};
pub use types::*;
