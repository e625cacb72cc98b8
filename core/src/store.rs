use crate::error::ValidationError;
use crate::persist::Persister;
use crate::{League, Match, Snapshot, Standing, Team, seed, standings};
use chrono::{DateTime, Utc};
use log::{debug, warn};
use std::fmt;
use uuid::Uuid;

/// Handle returned by [`StateStore::on_change`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&StoreView<'_>) + Send>;

/// Payload for [`StateStore::add_match`]. The store assigns id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMatch {
    pub home_team_id: String,
    pub away_team_id: String,
    pub home_score: u32,
    pub away_score: u32,
    pub league: League,
}

/// Owner of every team and match across the three leagues.
///
/// Mutations are applied in place and each successful one is followed by a
/// synchronous call to every registered listener. The store performs no I/O;
/// hosts that persist do so from a listener or after each call.
pub struct StateStore {
    teams: Vec<Team>,
    matches: Vec<Match>,
    current_league: League,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StateStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateStore")
            .field("teams", &self.teams.len())
            .field("matches", &self.matches.len())
            .field("current_league", &self.current_league)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl StateStore {
    /// A store holding the demo dataset.
    pub fn new() -> Self {
        Self::from_snapshot(seed::default_snapshot())
    }

    pub fn empty() -> Self {
        Self::from_snapshot(Snapshot::default())
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            teams: snapshot.teams,
            matches: snapshot.matches,
            current_league: snapshot.current_league,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Build a store from whatever `persister` holds, or the demo dataset
    /// when nothing usable was saved. Never fails.
    pub fn restore(persister: &dyn Persister) -> Self {
        match persister.load() {
            Ok(Some(snapshot)) => {
                debug!(
                    "restored {} teams and {} matches",
                    snapshot.teams.len(),
                    snapshot.matches.len()
                );
                Self::from_snapshot(snapshot)
            }
            Ok(None) => {
                debug!("no saved state, starting from demo data");
                Self::new()
            }
            Err(e) => {
                warn!("saved state unreadable, starting from demo data: {e}");
                Self::new()
            }
        }
    }

    pub fn read(&self) -> StoreView<'_> {
        StoreView {
            teams: &self.teams,
            matches: &self.matches,
            current_league: self.current_league,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.read().to_snapshot()
    }

    pub fn current_league(&self) -> League {
        self.current_league
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Append a team with a fresh id. The name is stored trimmed.
    pub fn add_team(&mut self, name: &str, league: League) -> Result<Team, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let team = Team {
            id: fresh_id(),
            name: name.to_string(),
            league,
        };
        debug!("adding {} {:?} to {league}", league.participant(), team.name);
        self.teams.push(team.clone());
        self.notify();
        Ok(team)
    }

    /// Append a match stamped with the current time. Accepts whatever it is
    /// given; see [`crate::guard::check_match`] for the entry rules.
    pub fn add_match(&mut self, new: NewMatch) -> Match {
        self.add_match_at(new, Utc::now())
    }

    pub fn add_match_at(&mut self, new: NewMatch, timestamp: DateTime<Utc>) -> Match {
        let m = Match {
            id: fresh_id(),
            home_team_id: new.home_team_id,
            away_team_id: new.away_team_id,
            home_score: new.home_score,
            away_score: new.away_score,
            league: new.league,
            timestamp,
        };
        debug!(
            "recording {} {}-{} {} in {}",
            m.home_team_id, m.home_score, m.away_score, m.away_team_id, m.league
        );
        self.matches.push(m.clone());
        self.notify();
        m
    }

    pub fn set_league(&mut self, league: League) {
        self.current_league = league;
        self.notify();
    }

    /// Drop every team and match and go back to the default league.
    pub fn reset_all(&mut self) {
        debug!("clearing all leagues");
        self.teams.clear();
        self.matches.clear();
        self.current_league = League::default();
        self.notify();
    }

    /// Replace all state with a fresh copy of the demo dataset.
    pub fn reset_to_defaults(&mut self) {
        debug!("restoring demo data");
        self.replace(seed::default_snapshot());
        self.notify();
    }

    /// Wholesale replace with `snapshot`, e.g. one restored from storage.
    pub fn hydrate(&mut self, snapshot: Snapshot) {
        debug!(
            "hydrating {} teams and {} matches",
            snapshot.teams.len(),
            snapshot.matches.len()
        );
        self.replace(snapshot);
        self.notify();
    }

    fn replace(&mut self, snapshot: Snapshot) {
        self.teams = snapshot.teams;
        self.matches = snapshot.matches;
        self.current_league = snapshot.current_league;
    }

    // -----------------------------------------------------------------------
    // Change notification
    // -----------------------------------------------------------------------

    /// Register `listener` to run after every successful mutation.
    pub fn on_change<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&StoreView<'_>) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    fn notify(&mut self) {
        let Self {
            teams,
            matches,
            current_league,
            listeners,
            ..
        } = self;
        let view = StoreView {
            teams: teams.as_slice(),
            matches: matches.as_slice(),
            current_league: *current_league,
        };
        for (_, listener) in listeners.iter_mut() {
            listener(&view);
        }
    }
}

fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}

// ---------------------------------------------------------------------------
// Read view
// ---------------------------------------------------------------------------

/// Borrowed, read-only view of the store's collections.
#[derive(Debug, Clone, Copy)]
pub struct StoreView<'a> {
    pub teams: &'a [Team],
    pub matches: &'a [Match],
    pub current_league: League,
}

impl<'a> StoreView<'a> {
    pub fn teams_in(&self, league: League) -> Vec<&'a Team> {
        self.teams.iter().filter(|t| t.league == league).collect()
    }

    pub fn matches_in(&self, league: League) -> Vec<&'a Match> {
        self.matches.iter().filter(|m| m.league == league).collect()
    }

    /// Ranked table for `league`.
    pub fn standings(&self, league: League) -> Vec<Standing> {
        let teams: Vec<Team> = self.teams_in(league).into_iter().cloned().collect();
        let matches: Vec<Match> = self.matches_in(league).into_iter().cloned().collect();
        standings::calculate_standings(&teams, &matches)
    }

    /// The last `limit` matches recorded in `league`, newest first.
    pub fn recent_matches(&self, league: League, limit: usize) -> Vec<&'a Match> {
        let mut recent = self.matches_in(league);
        let skip = recent.len().saturating_sub(limit);
        recent.drain(..skip);
        recent.reverse();
        recent
    }

    pub fn team_name(&self, id: &str) -> &'a str {
        standings::team_name(self.teams, id)
    }

    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            teams: self.teams.to_vec(),
            matches: self.matches.to_vec(),
            current_league: self.current_league,
        }
    }
}
