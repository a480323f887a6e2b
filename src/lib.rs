//! Client library for the ClipHub stock-media marketplace backend.
//!
//! Everything goes through [`ClipHubClient`], the single choke point for
//! outbound API calls. The client owns the backend session token lifecycle:
//! it exchanges an identity token for a session token lazily on the first
//! protected call, attaches the right bearer token to every request, and
//! drops the session token whenever the backend answers 401 so the next
//! call re-exchanges. Failures of any kind surface as one normalized
//! [`ApiError`].
//!
//! The identity service stays behind the [`IdentityProvider`] trait; plug in
//! whichever identity SDK the application uses.
//!
//! ```no_run
//! use cliphub_client::{ClipHubClient, Config, IdentityProvider};
//!
//! async fn fetch_profile<I: IdentityProvider>(identity: I) -> anyhow::Result<()> {
//!     let client = ClipHubClient::new(Config::from_env()?, identity);
//!     let user = client.get_user().await?;
//!     println!("signed in as {}", user.email);
//!     Ok(())
//! }
//! ```

mod api;
mod config;
mod error;
mod identity;
mod session;

pub use api::{
    Analytics, AnalyticsCreate, ApiRequest, AuthResponse, ClipHubClient, Collection,
    CollectionCreate, HttpClient, HttpResponse, LeaderboardEntry, LoginResponse, Media,
    MediaCreate, MediaStatus, MediaType, ReqwestClient, RequestBody, SignupRequest, UploadFile,
    UploadResult, User, UserUpdate,
};
pub use config::{Config, API_URL_ENV};
pub use error::ApiError;
pub use identity::IdentityProvider;
pub use session::Session;
