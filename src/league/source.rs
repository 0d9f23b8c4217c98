//! League source trait and structured error types.
//!
//! The LeagueSource trait abstracts over where league data comes from (the ESPN
//! API, a seeded sample league) so the web layer and CLI can swap
//! implementations and tests can run offline.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use super::team::LeagueSnapshot;

/// ESPN authentication cookies for private leagues
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub espn_s2: String,
    pub swid: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConnectRequest {
    pub league_id: String,
    #[serde(default)]
    pub espn_s2: Option<String>,
    #[serde(default)]
    pub swid: Option<String>,
}

impl ConnectRequest {
    pub fn new(league_id: impl Into<String>) -> Self {
        Self {
            league_id: league_id.into(),
            espn_s2: None,
            swid: None,
        }
    }

    #[must_use]
    pub fn with_cookies(mut self, espn_s2: impl Into<String>, swid: impl Into<String>) -> Self {
        self.espn_s2 = Some(espn_s2.into());
        self.swid = Some(swid.into());
        self
    }

    /// Both cookies, when both are present and non-empty. A league is
    /// fetched as public otherwise.
    pub fn credentials(&self) -> Option<Credentials> {
        let espn_s2 = self.espn_s2.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let swid = self.swid.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        Some(Credentials {
            espn_s2: espn_s2.to_string(),
            swid: swid.to_string(),
        })
    }
}

#[derive(Debug, Error)]
pub enum LeagueError {
    #[error("invalid league id '{0}': must be numeric")]
    InvalidLeagueId(String),

    #[error("network unreachable: {0}")]
    Network(String),

    #[error("league is private: valid ESPN_S2 and SWID cookies are required")]
    AuthenticationRequired,

    #[error("league {league_id} not found for season {season}")]
    NotFound { league_id: String, season: i32 },

    #[error("unexpected response status {status} for season {season}")]
    Status { status: u16, season: i32 },

    #[error("response format changed: {0}")]
    Decode(String),

    #[error("could not connect to league {league_id} in any season ({seasons}): {last}")]
    AllSeasonsFailed {
        league_id: String,
        seasons: String,
        last: String,
    },
}

#[async_trait]
pub trait LeagueSource: Send + Sync {
    /// Short name for logs and the health endpoint
    fn name(&self) -> &'static str;

    async fn fetch_league(&self, request: &ConnectRequest) -> Result<LeagueSnapshot, LeagueError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_need_both_cookies() {
        assert!(ConnectRequest::new("1").credentials().is_none());

        let mut req = ConnectRequest::new("1").with_cookies("abc", "  ");
        assert!(req.credentials().is_none());

        req.swid = Some("{X}".to_string());
        let creds = req.credentials().unwrap();
        assert_eq!(creds.espn_s2, "abc");
        assert_eq!(creds.swid, "{X}");
    }
}
