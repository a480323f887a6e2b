use reqwest::header::{HeaderMap, AUTHORIZATION};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::json;

use super::http::{ApiRequest, HttpClient, HttpResponse, ReqwestClient, RequestBody, UploadFile};
use super::types::*;
use crate::config::Config;
use crate::error::{ApiError, ErrorBody};
use crate::identity::IdentityProvider;
use crate::session::Session;

const LOGIN_PATH: &str = "/api/auth/login";
const SIGNUP_PATH: &str = "/api/auth/signup";
const UPLOAD_PATH: &str = "/api/upload/media";

/// ClipHub API client
///
/// The single choke point for all outbound calls to the ClipHub backend.
/// Every request picks up the right bearer token automatically: the login
/// exchange carries a fresh identity token, everything else carries the
/// cached session token when one is held. Every failure comes back as a
/// normalized [`ApiError`]; a 401 drops the session token so the next
/// protected call re-exchanges.
///
/// Generic over the identity provider and the HTTP transport for
/// testability.
pub struct ClipHubClient<I: IdentityProvider, H: HttpClient = ReqwestClient> {
    http: H,
    identity: I,
    session: Session,
    config: Config,
}

impl<I: IdentityProvider> ClipHubClient<I, ReqwestClient> {
    /// Creates a client with the default HTTP implementation.
    pub fn new(config: Config, identity: I) -> Self {
        Self {
            http: ReqwestClient::new(),
            identity,
            session: Session::new(),
            config,
        }
    }
}

impl<I: IdentityProvider, H: HttpClient> ClipHubClient<I, H> {
    /// Returns the session state.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Builds the Authorization header for a request to `path`.
    ///
    /// The login exchange always carries a freshly fetched identity token.
    /// Everything else prefers the cached session token and falls back to a
    /// fresh identity token. Signed-out requests go out bare.
    async fn request_headers(&self, path: &str) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();

        if !self.identity.is_signed_in().await {
            return Ok(headers);
        }

        let token = if path == LOGIN_PATH {
            self.fresh_id_token().await?
        } else if let Some(token) = self.session.token().await {
            token
        } else {
            self.fresh_id_token().await?
        };

        headers.insert(AUTHORIZATION, format!("Bearer {}", token).parse().unwrap());
        Ok(headers)
    }

    async fn fresh_id_token(&self) -> Result<String, ApiError> {
        self.identity.id_token().await.map_err(|e| {
            tracing::warn!("Identity token fetch failed: {}", e);
            ApiError::transport(e)
        })
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> Result<HttpResponse, ApiError> {
        self.dispatch(method, path, body, self.config.request_timeout)
            .await
    }

    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
        timeout: std::time::Duration,
    ) -> Result<HttpResponse, ApiError> {
        let headers = self.request_headers(path).await?;
        let url = format!("{}{}", self.config.base_url, path);

        let response = self
            .http
            .execute(ApiRequest {
                method,
                url,
                headers,
                body,
                timeout,
            })
            .await
            .map_err(|e| {
                tracing::warn!("Transport failure for {}: {}", path, e);
                ApiError::transport(e)
            })?;

        if response.is_success() {
            return Ok(response);
        }

        Err(self.normalize_error(response).await)
    }

    /// Converts a non-2xx response into an [`ApiError`], dropping the
    /// session token when the backend says the credential is no longer good.
    async fn normalize_error(&self, response: HttpResponse) -> ApiError {
        let body = ErrorBody::parse(&response.body);

        match response.status {
            401 => {
                tracing::info!("Session token rejected (401), clearing it");
                self.session.clear().await;
                ApiError::Unauthorized {
                    details: body.details,
                }
            }
            403 => ApiError::Forbidden {
                details: body.details,
            },
            status => ApiError::Api {
                status,
                message: body.message(),
                details: body.details,
            },
        }
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> Result<T, ApiError> {
        let response = self.send(method, path, body).await?;
        response.json().map_err(|e| ApiError::transport(e))
    }

    fn json_body(data: &impl serde::Serialize) -> RequestBody {
        RequestBody::Json(serde_json::to_value(data).expect("Failed to serialize request body"))
    }
}

// Auth operations
impl<I: IdentityProvider, H: HttpClient> ClipHubClient<I, H> {
    /// Registers a new account.
    ///
    /// The backend issues a session token alongside the created user, so a
    /// fresh signup needs no separate login exchange.
    pub async fn signup(&self, profile: &SignupRequest) -> Result<AuthResponse, ApiError> {
        let response: AuthResponse = self
            .send_json(Method::POST, SIGNUP_PATH, Self::json_body(profile))
            .await?;
        self.session.set_token(response.access_token.clone()).await;
        Ok(response)
    }

    /// Exchanges a fresh identity token for a backend session token.
    ///
    /// Requires an active identity session; the new session token replaces
    /// any previously held one.
    pub async fn login(&self) -> Result<LoginResponse, ApiError> {
        if !self.identity.is_signed_in().await {
            return Err(ApiError::NotAuthenticated);
        }

        let id_token = self.fresh_id_token().await?;
        let response: LoginResponse = self
            .send_json(
                Method::POST,
                LOGIN_PATH,
                RequestBody::Json(json!({ "token": id_token })),
            )
            .await?;

        self.session.set_token(response.access_token.clone()).await;
        tracing::info!("Session token exchanged");
        Ok(response)
    }

    /// Guard used by every protected wrapper.
    ///
    /// Fails fast when no identity session exists, before any network call.
    /// Exchanges lazily: only when no session token is held. A held token is
    /// trusted even if stale; staleness surfaces as a 401 on the wrapped
    /// call, which clears it. Concurrent callers that all find the token
    /// absent serialize on the exchange lock and re-check once they hold it,
    /// so one invalidation triggers exactly one exchange.
    pub async fn ensure_authenticated(&self) -> Result<(), ApiError> {
        if !self.identity.is_signed_in().await {
            return Err(ApiError::NotAuthenticated);
        }

        if self.session.is_active().await {
            return Ok(());
        }

        let _guard = self.session.exchange_guard().await;
        if self.session.is_active().await {
            // Another caller completed the exchange while we waited.
            return Ok(());
        }

        self.login().await?;
        Ok(())
    }

    /// Drops the session token and terminates the identity session.
    /// Idempotent.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.session.clear().await;
        self.identity
            .sign_out()
            .await
            .map_err(|e| ApiError::transport(e))?;
        Ok(())
    }
}

// User endpoints
impl<I: IdentityProvider, H: HttpClient> ClipHubClient<I, H> {
    /// Gets the signed-in user's profile.
    pub async fn get_user(&self) -> Result<User, ApiError> {
        self.ensure_authenticated().await?;
        self.send_json(Method::GET, "/api/users/me", RequestBody::Empty)
            .await
    }

    /// Updates the signed-in user's profile.
    pub async fn update_user(&self, update: &UserUpdate) -> Result<User, ApiError> {
        self.ensure_authenticated().await?;
        self.send_json(Method::PUT, "/api/users/me", Self::json_body(update))
            .await
    }

    /// Gets the user's onboarding interest preferences.
    pub async fn get_preferences(&self) -> Result<Vec<String>, ApiError> {
        self.ensure_authenticated().await?;
        self.send_json(Method::GET, "/api/user/preferences", RequestBody::Empty)
            .await
    }

    /// Replaces the user's onboarding interest preferences.
    pub async fn update_preferences(&self, preferences: &[String]) -> Result<Vec<String>, ApiError> {
        self.ensure_authenticated().await?;
        self.send_json(
            Method::POST,
            "/api/user/preferences",
            RequestBody::Json(json!({ "preferences": preferences })),
        )
        .await
    }
}

// Media endpoints
impl<I: IdentityProvider, H: HttpClient> ClipHubClient<I, H> {
    /// Fetches a single media item. Public: works without a sign-in.
    pub async fn get_media(&self, media_id: &str) -> Result<Media, ApiError> {
        let path = format!("/api/media/{}", urlencoding::encode(media_id));
        self.send_json(Method::GET, &path, RequestBody::Empty).await
    }

    /// Lists the signed-in user's media.
    pub async fn list_media(&self) -> Result<Vec<Media>, ApiError> {
        self.ensure_authenticated().await?;
        self.send_json(Method::GET, "/api/media/", RequestBody::Empty)
            .await
    }

    /// Registers a media item after its file has been uploaded.
    pub async fn create_media(&self, media: &MediaCreate) -> Result<Media, ApiError> {
        self.ensure_authenticated().await?;
        self.send_json(Method::POST, "/api/media/", Self::json_body(media))
            .await
    }

    /// Uploads a media file as multipart form data.
    ///
    /// Uses the extended upload timeout. The transport sets the multipart
    /// content type so the boundary is correct.
    pub async fn upload_media(&self, file: UploadFile) -> Result<UploadResult, ApiError> {
        self.ensure_authenticated().await?;
        let response = self
            .dispatch(
                Method::POST,
                UPLOAD_PATH,
                RequestBody::Multipart(file),
                self.config.upload_timeout,
            )
            .await?;
        response.json().map_err(|e| ApiError::transport(e))
    }
}

// Collection endpoints
impl<I: IdentityProvider, H: HttpClient> ClipHubClient<I, H> {
    /// Fetches a collection. Public: works without a sign-in.
    pub async fn get_collection(&self, collection_id: &str) -> Result<Collection, ApiError> {
        let path = format!("/api/collections/{}", urlencoding::encode(collection_id));
        self.send_json(Method::GET, &path, RequestBody::Empty).await
    }

    /// Creates a collection owned by the signed-in user.
    pub async fn create_collection(
        &self,
        collection: &CollectionCreate,
    ) -> Result<Collection, ApiError> {
        self.ensure_authenticated().await?;
        self.send_json(Method::POST, "/api/collections/", Self::json_body(collection))
            .await
    }
}

// Analytics and stats endpoints
impl<I: IdentityProvider, H: HttpClient> ClipHubClient<I, H> {
    /// Records engagement counters for the signed-in user.
    pub async fn record_analytics(&self, analytics: &AnalyticsCreate) -> Result<Analytics, ApiError> {
        self.ensure_authenticated().await?;
        self.send_json(Method::POST, "/api/analytics/", Self::json_body(analytics))
            .await
    }

    /// Fetches the creator leaderboard. Public.
    pub async fn get_leaderboard(&self) -> Result<Vec<LeaderboardEntry>, ApiError> {
        self.send_json(Method::GET, "/api/stats/leaderboard", RequestBody::Empty)
            .await
    }
}

impl<I: IdentityProvider + Clone, H: HttpClient + Clone> Clone for ClipHubClient<I, H> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            identity: self.identity.clone(),
            // Clones share the session, so one 401 invalidates all of them.
            session: self.session.clone(),
            config: self.config.clone(),
        }
    }
}

/// Test-only constructor for dependency injection
#[cfg(test)]
impl<I: IdentityProvider, H: HttpClient> ClipHubClient<I, H> {
    /// Creates a client with a custom HTTP implementation.
    pub fn with_http_client(config: Config, identity: I, http: H) -> Self {
        Self {
            http,
            identity,
            session: Session::new(),
            config,
        }
    }
}
