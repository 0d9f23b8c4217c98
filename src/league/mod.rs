pub mod player;
pub mod team;
pub mod source;

pub use player::{InjuryStatus, LineupSlot, Player, PlayerId, Position};
pub use team::{normalize_swid, League, LeagueSnapshot, Team};
pub use source::{ConnectRequest, Credentials, LeagueError, LeagueSource};
