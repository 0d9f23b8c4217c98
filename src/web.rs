use actix_cors::Cors;
use actix_files::Files;
use actix_session::config::CookieContentSecurity;
use actix_session::storage::CookieSessionStore;
use actix_session::{Session, SessionMiddleware};
use actix_web::cookie::Key;
use actix_web::{error, middleware, web, App, HttpResponse, HttpServer};
use chrono::Duration;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::{AppConfig, ServerConfig};
use crate::error::ApiError;
use crate::espn::extract_cookies;
use crate::evaluator::{segment_breakdown, side_total, Side, TradeEvaluator};
use crate::league::{ConnectRequest, LeagueSource, Player, PlayerId};
use crate::roster::{RosterView, TeamStats, TeamSummary};
use crate::session::{SessionContext, SessionStore};
use crate::valuation::{recommendation, round_to, side_value};

/// Cookie carrying the signed session key
pub const SESSION_COOKIE: &str = "session_id";
const SESSION_KEY: &str = "key";

pub struct AppState {
    pub sessions: SessionStore,
    pub source: Arc<dyn LeagueSource>,
    pub evaluator: TradeEvaluator,
    /// Applied to every snapshot right after it is fetched
    pub value_overrides: HashMap<PlayerId, f64>,
    pub bar_length: f64,
}

impl AppState {
    pub fn new(source: Arc<dyn LeagueSource>, evaluator: TradeEvaluator, session_ttl: Duration) -> Self {
        Self {
            sessions: SessionStore::new(session_ttl),
            source,
            evaluator,
            value_overrides: HashMap::new(),
            bar_length: 100.0,
        }
    }

    #[must_use]
    pub fn with_value_overrides(mut self, overrides: HashMap<PlayerId, f64>) -> Self {
        self.value_overrides = overrides;
        self
    }

    #[must_use]
    pub fn with_bar_length(mut self, bar_length: f64) -> Self {
        self.bar_length = bar_length;
        self
    }
}

#[derive(Deserialize)]
pub struct CookieExtraction {
    cookies: String,
}

#[derive(Deserialize)]
pub struct TeamSelection {
    team_id: Option<u32>,
}

#[derive(Deserialize)]
pub struct TradeAnalysis {
    #[serde(default)]
    team1_players: Vec<Player>,
    #[serde(default)]
    team2_players: Vec<Player>,
}

#[derive(Deserialize)]
pub struct ToggleRequest {
    side: Side,
    player_id: PlayerId,
}

#[derive(Deserialize)]
pub struct SegmentQuery {
    side: Side,
    length: Option<f64>,
}

fn session_key(session: &Session) -> Result<Option<String>, ApiError> {
    session
        .get::<String>(SESSION_KEY)
        .map_err(|e| ApiError::Internal(e.to_string()))
}

/// Runs `f` against the caller's session context
fn with_context<R>(
    state: &AppState,
    session: &Session,
    f: impl FnOnce(&mut SessionContext) -> Result<R, ApiError>,
) -> Result<R, ApiError> {
    let key = session_key(session)?.ok_or(ApiError::NoLeague)?;
    state.sessions.with(&key, f).ok_or(ApiError::NoLeague)?
}

async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "source": state.source.name(),
        "active_sessions": state.sessions.len(),
    }))
}

async fn extract_cookies_handler(req: web::Json<CookieExtraction>) -> Result<HttpResponse, ApiError> {
    info!("Extracting ESPN cookies from browser string");
    match extract_cookies(&req.cookies) {
        (Some(espn_s2), Some(swid)) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "espn_s2": espn_s2,
            "swid": swid,
            "message": "Successfully extracted ESPN cookies",
        }))),
        _ => Err(ApiError::BadRequest(
            "Could not find ESPN_S2 and SWID cookies in the provided string".to_string(),
        )),
    }
}

async fn connect_league(
    req: web::Json<ConnectRequest>,
    session: Session,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    info!(league_id = %req.league_id, source = state.source.name(), "Connecting to league");
    let mut snapshot = state.source.fetch_league(&req).await?;

    if !state.value_overrides.is_empty() {
        let updated = snapshot.apply_value_overrides(&state.value_overrides);
        info!(updated, "Applied trade value overrides");
    }

    let body = serde_json::json!({
        "success": true,
        "league": snapshot.league,
        "teams": snapshot.teams,
        "user_team": snapshot.user_team(),
        "uncertain_ownership": snapshot.uncertain_ownership,
    });
    info!(league = %snapshot.league.name, teams = snapshot.teams.len(), "Connected to league");

    if let Some(old) = session_key(&session)? {
        state.sessions.remove(&old);
    }
    state.sessions.prune();
    let key = state.sessions.create(SessionContext::new(snapshot));
    session
        .insert(SESSION_KEY, key)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok().json(body))
}

async fn disconnect(session: Session, state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    if let Some(key) = session_key(&session)? {
        state.sessions.remove(&key);
        info!("League session closed");
    }
    session.purge();
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Disconnected from league",
    })))
}

async fn select_team(
    req: web::Json<TeamSelection>,
    session: Session,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let team_id = req
        .team_id
        .ok_or_else(|| ApiError::BadRequest("Team ID is required".to_string()))?;

    with_context(&state, &session, |ctx| {
        let team = ctx.snapshot.team(team_id).ok_or(ApiError::TeamNotFound(team_id))?;
        info!(team = %team.name, "User selected team");
        let body = serde_json::json!({ "success": true, "selected_team": team });
        ctx.selected_team_id = Some(team_id);
        Ok(HttpResponse::Ok().json(body))
    })
}

async fn get_roster(
    team_id: web::Path<u32>,
    session: Session,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let team_id = team_id.into_inner();
    with_context(&state, &session, |ctx| {
        let team = ctx.snapshot.team(team_id).ok_or(ApiError::TeamNotFound(team_id))?;
        let roster = RosterView::from_team(team);
        let team_stats = TeamStats::from_roster(&roster);
        Ok(HttpResponse::Ok().json(serde_json::json!({
            "team": TeamSummary::from(team),
            "roster": roster,
            "team_stats": team_stats,
        })))
    })
}

async fn analyze_trade(
    req: web::Json<TradeAnalysis>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    info!(
        team1 = req.team1_players.len(),
        team2 = req.team2_players.len(),
        "Analyzing trade proposal"
    );
    let evaluation = state.evaluator.evaluate(&req.team1_players, &req.team2_players);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "team1_value": side_value(&req.team1_players),
        "team2_value": side_value(&req.team2_players),
        "is_fair": evaluation.is_fair,
        "winner": evaluation.winning_side.label(),
        "advantage": round_to(evaluation.advantage.abs(), 2),
        "recommendation": recommendation(&evaluation),
        "evaluation": evaluation,
    })))
}

fn proposal_body(ctx: &SessionContext, evaluator: &TradeEvaluator) -> serde_json::Value {
    let evaluation = ctx.proposal.evaluate(evaluator);
    serde_json::json!({
        "selected_team": ctx.selected_team().map(TeamSummary::from),
        "proposal": ctx.proposal,
        "evaluation": evaluation,
        "recommendation": recommendation(&evaluation),
    })
}

async fn get_proposal(session: Session, state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    with_context(&state, &session, |ctx| {
        Ok(HttpResponse::Ok().json(proposal_body(ctx, &state.evaluator)))
    })
}

async fn toggle_player(
    req: web::Json<ToggleRequest>,
    session: Session,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    with_context(&state, &session, |ctx| {
        let (_, player) = ctx
            .snapshot
            .find_player(req.player_id)
            .ok_or(ApiError::PlayerNotFound(req.player_id))?;
        let added = ctx.proposal.toggle(req.side, player.clone())?;
        info!(player_id = %req.player_id, side = ?req.side, added, "Toggled trade selection");

        let mut body = proposal_body(ctx, &state.evaluator);
        body["added"] = serde_json::Value::Bool(added);
        Ok(HttpResponse::Ok().json(body))
    })
}

async fn clear_proposal(session: Session, state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    with_context(&state, &session, |ctx| {
        ctx.proposal.clear();
        Ok(HttpResponse::Ok().json(proposal_body(ctx, &state.evaluator)))
    })
}

async fn get_segments(
    query: web::Query<SegmentQuery>,
    session: Session,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let length = query.length.unwrap_or(state.bar_length);
    if !length.is_finite() || length < 0.0 {
        return Err(ApiError::BadRequest("length must be a non-negative number".to_string()));
    }

    with_context(&state, &session, |ctx| {
        let players = ctx.proposal.side(query.side);
        Ok(HttpResponse::Ok().json(serde_json::json!({
            "side": query.side,
            "total": side_total(players),
            "bar_length": length,
            "segments": segment_breakdown(players, length),
        })))
    })
}

fn json_error(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "success": false, "error": message }))
}

/// Registers every API endpoint
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        let response = json_error(err.to_string());
        error::InternalError::from_response(err, response).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        let response = json_error(err.to_string());
        error::InternalError::from_response(err, response).into()
    }))
    .service(
        web::scope("/api")
            .route("/health", web::get().to(health))
            .route("/extract-cookies", web::post().to(extract_cookies_handler))
            .route("/connect-league", web::post().to(connect_league))
            .route("/disconnect", web::post().to(disconnect))
            .route("/select-team", web::post().to(select_team))
            .route("/roster/{team_id}", web::get().to(get_roster))
            .route("/analyze-trade", web::post().to(analyze_trade))
            .service(
                web::resource("/trade/proposal")
                    .route(web::get().to(get_proposal))
                    .route(web::delete().to(clear_proposal)),
            )
            .route("/trade/proposal/toggle", web::post().to(toggle_player))
            .route("/trade/segments", web::get().to(get_segments)),
    );
}

/// Signing key for the session cookie. Without a configured secret a random
/// key is used and sessions do not survive a restart.
pub fn session_signing_key(config: &ServerConfig) -> Key {
    match config.session_secret.as_deref().map(|s| Key::try_from(s.as_bytes())) {
        Some(Ok(key)) => key,
        Some(Err(e)) => {
            warn!(error = %e, "Invalid session secret, generating a random key");
            Key::generate()
        }
        None => {
            warn!("No session secret configured, generating a random key");
            Key::generate()
        }
    }
}

pub fn session_middleware(key: Key, secure: bool) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name(SESSION_COOKIE.to_string())
        .cookie_secure(secure)
        .cookie_content_security(CookieContentSecurity::Signed)
        .build()
}

pub async fn start_server(config: AppConfig, state: web::Data<AppState>) -> std::io::Result<()> {
    let server = config.server;
    let key = session_signing_key(&server);
    let secure = server.secure_cookies;
    let origin = server.allowed_origin.clone();
    let static_dir = server.static_dir.clone();

    info!(host = %server.host, port = server.port, origin = %origin, "Starting web server");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&origin)
            .allow_any_method()
            .allow_any_header()
            .supports_credentials()
            .max_age(3600);

        let mut app = App::new()
            .app_data(state.clone())
            .wrap(session_middleware(key.clone(), secure))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .configure(routes);

        if let Some(dir) = &static_dir {
            app = app.service(Files::new("/", dir).index_file("index.html"));
        }
        app
    })
    .bind((server.host.as_str(), server.port))?
    .run()
    .await
}
