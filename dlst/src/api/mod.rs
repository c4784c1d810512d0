//! HTTP client for the tournament API.
//!
//! Every path is `<base>/<endpoint>/`. Requests are never retried or cached;
//! each call is a fresh round-trip through the configured [`Transport`].

pub mod errors;
#[cfg(any(test, feature = "test-support"))]
pub mod mock;
pub mod transport;

pub use errors::{ApiError, ApiResult};
pub use transport::{HttpRequest, HttpResponse, Method, ReqwestTransport, Transport};

use crate::entities::{
    Announcement, AuthResponse, Fixture, JoinTournamentRequest, LoginRequest, MessageResponse,
    NewTeam, RegisterRequest, Report, Standing, Team, Tournament, TournamentId,
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::sync::Arc;

/// Origin used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "https://dls-production-37a3.up.railway.app/";

/// Endpoint names, relative to the API origin.
pub mod endpoints {
    use crate::entities::TournamentId;

    pub const ANNOUNCEMENTS: &str = "announcements";
    pub const TOURNAMENTS: &str = "tournaments";
    pub const STANDINGS: &str = "standings";
    pub const TEAMS: &str = "teams";
    pub const JOIN_TOURNAMENT: &str = "join-tournament";
    pub const LOGIN: &str = "login";
    pub const REGISTER: &str = "register";
    pub const REPORT: &str = "report";

    pub fn fixtures(tournament_id: TournamentId) -> String {
        format!("{TOURNAMENTS}/{tournament_id}/fixtures")
    }

    pub fn tournament_standings(tournament_id: TournamentId) -> String {
        format!("{STANDINGS}/{tournament_id}")
    }
}

/// API client for communicating with the tournament server
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    /// Create a client that talks to `base_url` over HTTP
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_transport(base_url, Arc::new(ReqwestTransport::new()))
    }

    /// Create a client with a custom transport
    pub fn with_transport(base_url: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute address for `endpoint`, always ending in a slash.
    pub fn url_for(&self, endpoint: &str) -> String {
        format!("{}/{}/", self.base_url, endpoint.trim_matches('/'))
    }

    /// Send one request and return the decoded body of a 2xx response.
    ///
    /// `body` is only sent for POST and PUT.
    pub async fn request(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<Value>,
    ) -> ApiResult<Value> {
        let request = HttpRequest {
            method,
            url: self.url_for(endpoint),
            body: body.filter(|_| method.has_body()),
        };
        log::debug!("{} {}", request.method, request.url);

        let response = self.transport.send(request).await?;
        if response.is_success() {
            return Ok(response.body);
        }

        let message = response
            .body
            .get("error")
            .and_then(Value::as_str)
            .map(str::to_string);
        log::warn!(
            "{method} {endpoint} failed with status {}: {:?}",
            response.status,
            message
        );
        Err(ApiError::Server {
            status: response.status,
            message,
        })
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        let body = self.request(endpoint, Method::Get, None).await?;
        Ok(serde_json::from_value(body)?)
    }

    async fn post<B, T>(&self, endpoint: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        let body = self.request(endpoint, Method::Post, Some(body)).await?;
        Ok(serde_json::from_value(body)?)
    }

    pub async fn announcements(&self) -> ApiResult<Vec<Announcement>> {
        self.get(endpoints::ANNOUNCEMENTS).await
    }

    pub async fn tournaments(&self) -> ApiResult<Vec<Tournament>> {
        self.get(endpoints::TOURNAMENTS).await
    }

    pub async fn fixtures(&self, tournament_id: TournamentId) -> ApiResult<Vec<Fixture>> {
        self.get(&endpoints::fixtures(tournament_id)).await
    }

    /// Standings across all teams
    pub async fn standings(&self) -> ApiResult<Vec<Standing>> {
        self.get(endpoints::STANDINGS).await
    }

    pub async fn tournament_standings(
        &self,
        tournament_id: TournamentId,
    ) -> ApiResult<Vec<Standing>> {
        self.get(&endpoints::tournament_standings(tournament_id))
            .await
    }

    pub async fn teams(&self) -> ApiResult<Vec<Team>> {
        self.get(endpoints::TEAMS).await
    }

    pub async fn create_team(&self, team: &NewTeam) -> ApiResult<Team> {
        self.post(endpoints::TEAMS, team).await
    }

    pub async fn join_tournament(
        &self,
        request: &JoinTournamentRequest,
    ) -> ApiResult<MessageResponse> {
        self.post(endpoints::JOIN_TOURNAMENT, request).await
    }

    pub async fn login(&self, request: &LoginRequest) -> ApiResult<AuthResponse> {
        self.post(endpoints::LOGIN, request).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthResponse> {
        self.post(endpoints::REGISTER, request).await
    }

    pub async fn report(&self, report: &Report) -> ApiResult<MessageResponse> {
        self.post(endpoints::REPORT, report).await
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
