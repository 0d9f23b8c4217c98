//! ESPN fantasy football league provider.
//!
//! Fetches a league with its teams, rosters and settings from the v3 API.
//! Leagues are looked up season by season (newest first) because a league id
//! carries no season and off-season leagues only answer for the last year.

use async_trait::async_trait;
use reqwest::header::COOKIE;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{info, warn};

use super::cookies::{cookie_header, decode_credentials};
use super::models::LeagueResponse;
use super::parse::parse_league;
use crate::config::EspnConfig;
use crate::league::{ConnectRequest, Credentials, LeagueError, LeagueSnapshot, LeagueSource};

const LEAGUE_VIEWS: [&str; 3] = ["mTeam", "mRoster", "mSettings"];

pub struct EspnClient {
    client: reqwest::Client,
    base_url: String,
    seasons: Vec<i32>,
}

impl EspnClient {
    pub fn new(config: &EspnConfig) -> Result<Self, LeagueError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| LeagueError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            seasons: config.seasons.clone(),
        })
    }

    pub fn league_url(&self, season: i32, league_id: u64) -> String {
        format!("{}/seasons/{}/segments/0/leagues/{}", self.base_url, season, league_id)
    }

    async fn fetch_season(
        &self,
        league_id: u64,
        season: i32,
        credentials: Option<&Credentials>,
    ) -> Result<LeagueResponse, LeagueError> {
        let query: Vec<(&str, &str)> = LEAGUE_VIEWS.iter().map(|v| ("view", *v)).collect();
        let mut request = self.client.get(self.league_url(season, league_id)).query(&query);
        if let Some(creds) = credentials {
            request = request.header(COOKIE, cookie_header(creds));
        }

        let response = request
            .send()
            .await
            .map_err(|e| LeagueError::Network(e.to_string()))?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(LeagueError::AuthenticationRequired)
            }
            StatusCode::NOT_FOUND => {
                return Err(LeagueError::NotFound {
                    league_id: league_id.to_string(),
                    season,
                })
            }
            status => {
                return Err(LeagueError::Status {
                    status: status.as_u16(),
                    season,
                })
            }
        }

        response
            .json::<LeagueResponse>()
            .await
            .map_err(|e| LeagueError::Decode(e.to_string()))
    }
}

#[async_trait]
impl LeagueSource for EspnClient {
    fn name(&self) -> &'static str {
        "espn"
    }

    async fn fetch_league(&self, request: &ConnectRequest) -> Result<LeagueSnapshot, LeagueError> {
        let league_id: u64 = request
            .league_id
            .trim()
            .parse()
            .map_err(|_| LeagueError::InvalidLeagueId(request.league_id.clone()))?;
        let credentials = request.credentials().map(|c| decode_credentials(&c));

        if credentials.is_some() {
            info!(league_id, "Connecting to ESPN league with cookies");
        } else {
            info!(league_id, "Connecting to public ESPN league");
        }

        let mut last_error = None;
        for &season in &self.seasons {
            match self.fetch_season(league_id, season, credentials.as_ref()).await {
                Ok(response) => {
                    info!(league_id, season, "Connected to ESPN league");
                    return Ok(parse_league(&response, credentials.as_ref().map(|c| c.swid.as_str())));
                }
                Err(e) => {
                    warn!(league_id, season, error = %e, "Season lookup failed");
                    last_error = Some(e);
                }
            }
        }

        let seasons = self
            .seasons
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Err(LeagueError::AllSeasonsFailed {
            league_id: league_id.to_string(),
            seasons,
            last: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "no seasons configured".to_string()),
        })
    }
}
