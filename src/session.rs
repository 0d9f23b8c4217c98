//! Per-browser session state.
//!
//! Each connected browser gets its own `SessionContext` holding the league it
//! connected to, the team it is looking at and the trade it is building.
//! Only the random session key travels in the (signed) cookie; the contexts
//! live in memory and are dropped on disconnect, idle expiry or restart.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::league::{LeagueSnapshot, Team};
use crate::proposal::TradeProposal;

#[derive(Debug, Clone)]
pub struct SessionContext {
    pub snapshot: LeagueSnapshot,
    pub selected_team_id: Option<u32>,
    pub proposal: TradeProposal,
    pub last_seen: DateTime<Utc>,
}

impl SessionContext {
    /// Starts a session on the user's own team, as detected at connect time
    pub fn new(snapshot: LeagueSnapshot) -> Self {
        Self {
            selected_team_id: snapshot.user_team_id,
            snapshot,
            proposal: TradeProposal::new(),
            last_seen: Utc::now(),
        }
    }

    pub fn selected_team(&self) -> Option<&Team> {
        self.selected_team_id.and_then(|id| self.snapshot.team(id))
    }
}

pub struct SessionStore {
    sessions: Mutex<HashMap<String, SessionContext>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    // A panic while holding the lock leaves the map itself intact.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, SessionContext>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores a new context and returns its key
    pub fn create(&self, context: SessionContext) -> String {
        let key = format!("{:032x}", rand::thread_rng().gen::<u128>());
        self.lock().insert(key.clone(), context);
        key
    }

    /// Runs `f` on the live context for `key`, refreshing its idle timer.
    /// Returns `None` when there is no such session or it has expired.
    pub fn with<R>(&self, key: &str, f: impl FnOnce(&mut SessionContext) -> R) -> Option<R> {
        let now = Utc::now();
        let mut sessions = self.lock();

        let expired = match sessions.get(key) {
            None => return None,
            Some(ctx) => now - ctx.last_seen > self.ttl,
        };
        if expired {
            sessions.remove(key);
            tracing::debug!("Session expired");
            return None;
        }

        let ctx = sessions.get_mut(key)?;
        ctx.last_seen = now;
        Some(f(ctx))
    }

    pub fn remove(&self, key: &str) -> bool {
        self.lock().remove(key).is_some()
    }

    /// Drops every session idle for longer than the TTL
    pub fn prune(&self) -> usize {
        self.prune_at(Utc::now())
    }

    fn prune_at(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.lock();
        let before = sessions.len();
        sessions.retain(|_, ctx| now - ctx.last_seen <= self.ttl);
        let removed = before - sessions.len();
        if removed > 0 {
            tracing::info!(removed, remaining = sessions.len(), "Pruned idle sessions");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::SampleLeague;

    fn store() -> SessionStore {
        SessionStore::new(Duration::minutes(30))
    }

    fn context() -> SessionContext {
        SessionContext::new(SampleLeague::new(1).build("100", None))
    }

    #[test]
    fn new_context_selects_user_team() {
        let ctx = context();
        assert_eq!(ctx.selected_team_id, ctx.snapshot.user_team_id);
        assert!(ctx.selected_team().is_some());
        assert!(ctx.proposal.is_empty());
    }

    #[test]
    fn keys_are_unique_and_isolated() {
        let store = store();
        let a = store.create(context());
        let b = store.create(context());
        assert_ne!(a, b);
        assert_eq!(a.len(), 32);

        store.with(&a, |ctx| ctx.selected_team_id = Some(5)).unwrap();
        assert_eq!(store.with(&b, |ctx| ctx.selected_team_id), Some(Some(1)));
        assert_eq!(store.with(&a, |ctx| ctx.selected_team_id), Some(Some(5)));
    }

    #[test]
    fn remove_ends_session() {
        let store = store();
        let key = store.create(context());
        assert!(store.remove(&key));
        assert!(!store.remove(&key));
        assert!(store.with(&key, |_| ()).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn idle_sessions_expire() {
        let store = store();
        let stale = store.create(context());
        let fresh = store.create(context());
        store.lock().get_mut(&stale).unwrap().last_seen = Utc::now() - Duration::minutes(31);

        assert!(store.with(&stale, |_| ()).is_none());
        assert_eq!(store.len(), 1);
        assert!(store.with(&fresh, |_| ()).is_some());

        assert_eq!(store.prune_at(Utc::now() + Duration::minutes(31)), 1);
        assert!(store.is_empty());
    }
}
