//! trade-analyzer: fantasy football trade analysis service and CLI.
//!
//! Commands:
//! - `serve` - run the JSON API for the dashboard
//! - `connect` - fetch a league and print its standings
//! - `roster` - print (or export as CSV) one team's roster
//! - `trade` - evaluate a trade between rostered players

use actix_web::web;
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::collections::HashMap;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use trade_analyzer::config::AppConfig;
use trade_analyzer::display::{print_league_summary, print_roster, print_trade, write_roster_csv};
use trade_analyzer::espn::EspnClient;
use trade_analyzer::evaluator::{segment_breakdown, Side, TradeEvaluator};
use trade_analyzer::league::{ConnectRequest, LeagueSnapshot, LeagueSource, PlayerId};
use trade_analyzer::proposal::TradeProposal;
use trade_analyzer::sample::SampleLeague;
use trade_analyzer::valuation::load_value_overrides;
use trade_analyzer::web::{start_server, AppState};

#[derive(Parser)]
#[command(name = "trade-analyzer", version, about = "Fantasy football trade analyzer")]
struct Cli {
    /// Path to a TOML config file. Defaults to ./trade-analyzer.toml when present.
    #[arg(long, global = true, env = "TRADE_ANALYZER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SourceArgs {
    /// Serve a generated sample league instead of ESPN.
    #[arg(long, default_value_t = false)]
    demo: bool,

    /// Seed for the sample league.
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

#[derive(Args)]
struct LeagueArgs {
    /// ESPN league id.
    #[arg(long, env = "LEAGUE_ID")]
    league_id: Option<String>,

    /// espn_s2 cookie, for private leagues.
    #[arg(long, env = "ESPN_S2", hide_env_values = true)]
    espn_s2: Option<String>,

    /// SWID cookie, for private leagues and team detection.
    #[arg(long, env = "ESPN_SWID", hide_env_values = true)]
    swid: Option<String>,

    #[command(flatten)]
    source: SourceArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API.
    Serve {
        /// Overrides server.host.
        #[arg(long)]
        host: Option<String>,

        /// Overrides server.port.
        #[arg(long, env = "PORT")]
        port: Option<u16>,

        #[command(flatten)]
        source: SourceArgs,
    },
    /// Connect to a league and print its teams.
    Connect {
        #[command(flatten)]
        league: LeagueArgs,
    },
    /// Print a team's roster.
    Roster {
        #[command(flatten)]
        league: LeagueArgs,

        /// Team id. Defaults to your team.
        #[arg(long)]
        team: Option<u32>,

        /// Also write the roster to this CSV file.
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Evaluate a trade by player ids.
    Trade {
        #[command(flatten)]
        league: LeagueArgs,

        /// Player ids you give, comma separated.
        #[arg(long, value_delimiter = ',')]
        give: Vec<PlayerId>,

        /// Player ids you receive, comma separated.
        #[arg(long, value_delimiter = ',')]
        receive: Vec<PlayerId>,

        /// Width of the printed bars in characters.
        #[arg(long, default_value_t = 40)]
        width: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;

    let overrides = match &config.trade.value_overrides {
        Some(path) => {
            let overrides = load_value_overrides(path)
                .with_context(|| format!("failed to load value overrides from {}", path.display()))?;
            info!(count = overrides.len(), "Loaded trade value overrides");
            overrides
        }
        None => HashMap::new(),
    };

    match cli.command {
        Commands::Serve { host, port, source } => run_serve(config, overrides, host, port, &source).await,
        Commands::Connect { league } => {
            let snapshot = fetch_snapshot(&config, &overrides, &league).await?;
            print_league_summary(&snapshot);
            Ok(())
        }
        Commands::Roster { league, team, csv } => {
            let snapshot = fetch_snapshot(&config, &overrides, &league).await?;
            run_roster(&snapshot, team, csv)
        }
        Commands::Trade {
            league,
            give,
            receive,
            width,
        } => {
            let snapshot = fetch_snapshot(&config, &overrides, &league).await?;
            run_trade(&config, &snapshot, &give, &receive, width)
        }
    }
}

fn league_source(config: &AppConfig, source: &SourceArgs) -> Result<Arc<dyn LeagueSource>> {
    if source.demo {
        info!(seed = source.seed, "Using sample league");
        return Ok(Arc::new(SampleLeague::new(source.seed)));
    }
    Ok(Arc::new(EspnClient::new(&config.espn)?))
}

async fn fetch_snapshot(
    config: &AppConfig,
    overrides: &HashMap<PlayerId, f64>,
    args: &LeagueArgs,
) -> Result<LeagueSnapshot> {
    let league_id = match (&args.league_id, args.source.demo) {
        (Some(id), _) => id.clone(),
        (None, true) => "sample".to_string(),
        (None, false) => bail!("a league id is required (--league-id or LEAGUE_ID)"),
    };

    let mut request = ConnectRequest::new(league_id);
    request.espn_s2 = args.espn_s2.clone();
    request.swid = args.swid.clone();

    let source = league_source(config, &args.source)?;
    let mut snapshot = source.fetch_league(&request).await?;
    if !overrides.is_empty() {
        snapshot.apply_value_overrides(overrides);
    }
    Ok(snapshot)
}

async fn run_serve(
    mut config: AppConfig,
    overrides: HashMap<PlayerId, f64>,
    host: Option<String>,
    port: Option<u16>,
    source: &SourceArgs,
) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let state = AppState::new(
        league_source(&config, source)?,
        TradeEvaluator::new(config.trade.fairness),
        config.server.session_ttl()?,
    )
    .with_value_overrides(overrides)
    .with_bar_length(config.trade.bar_length);

    println!("Starting web server on {}:{}...", config.server.host, config.server.port);
    println!("Dashboard origin allowed: {}", config.server.allowed_origin);

    start_server(config, web::Data::new(state)).await?;
    Ok(())
}

fn run_roster(snapshot: &LeagueSnapshot, team_id: Option<u32>, csv: Option<PathBuf>) -> Result<()> {
    let team = match team_id {
        Some(id) => snapshot.team(id).with_context(|| format!("team {} not found", id))?,
        None => snapshot.user_team().context("league has no teams")?,
    };
    print_roster(team);

    if let Some(path) = csv {
        let file = File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;
        write_roster_csv(team, file)?;
        println!("\nRoster saved to {}", path.display());
    }
    Ok(())
}

fn run_trade(
    config: &AppConfig,
    snapshot: &LeagueSnapshot,
    give: &[PlayerId],
    receive: &[PlayerId],
    width: usize,
) -> Result<()> {
    if give.is_empty() && receive.is_empty() {
        bail!("nothing to evaluate: pass --give and/or --receive player ids");
    }

    let mut proposal = TradeProposal::new();
    for (side, ids) in [(Side::A, give), (Side::B, receive)] {
        for id in ids {
            let (_, player) = snapshot
                .find_player(*id)
                .with_context(|| format!("player {} is not on any roster", id))?;
            proposal.add(side, player.clone())?;
        }
    }

    let evaluation = proposal.evaluate(&TradeEvaluator::new(config.trade.fairness));
    let bar = width as f64;
    print_trade(
        proposal.side(Side::A),
        proposal.side(Side::B),
        &evaluation,
        &segment_breakdown(proposal.side(Side::A), bar),
        &segment_breakdown(proposal.side(Side::B), bar),
    );
    Ok(())
}
