// Per-player draft status and the transitions between statuses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::PlayerId;

/// Draft status of a single player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DraftStatus {
    #[default]
    Available,
    Mine,
    Taken,
}

impl DraftStatus {
    pub fn display_str(&self) -> &'static str {
        match self {
            DraftStatus::Available => "available",
            DraftStatus::Mine => "mine",
            DraftStatus::Taken => "taken",
        }
    }
}

/// Sparse mapping from player id to draft status.
///
/// Only `Mine` and `Taken` are ever stored; a missing id is `Available`.
/// Moving between `Mine` and `Taken` always goes through `Available`.
///
/// Serializes as a JSON object keyed by the id as a string, e.g.
/// `{"7":"mine","12":"taken"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<PlayerId, DraftStatus>",
    into = "BTreeMap<PlayerId, DraftStatus>"
)]
pub struct DraftMap {
    entries: BTreeMap<PlayerId, DraftStatus>,
}

impl From<BTreeMap<PlayerId, DraftStatus>> for DraftMap {
    fn from(mut entries: BTreeMap<PlayerId, DraftStatus>) -> Self {
        entries.retain(|_, s| *s != DraftStatus::Available);
        DraftMap { entries }
    }
}

impl From<DraftMap> for BTreeMap<PlayerId, DraftStatus> {
    fn from(map: DraftMap) -> Self {
        map.entries
    }
}

impl DraftMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current status of `id`; unknown ids are available.
    pub fn status_of(&self, id: PlayerId) -> DraftStatus {
        self.entries.get(&id).copied().unwrap_or_default()
    }

    /// Claim an available player for the user's team. Returns `false` (and
    /// leaves the map untouched) if the player is already mine or taken.
    pub fn mark_mine(&mut self, id: PlayerId) -> bool {
        self.claim(id, DraftStatus::Mine)
    }

    /// Mark an available player as drafted by another team. Returns `false`
    /// if the player is already mine or taken.
    pub fn mark_taken(&mut self, id: PlayerId) -> bool {
        self.claim(id, DraftStatus::Taken)
    }

    fn claim(&mut self, id: PlayerId, status: DraftStatus) -> bool {
        let current = self.status_of(id);
        if current != DraftStatus::Available {
            debug!(
                "ignoring {} for player {}: already {}",
                status.display_str(),
                id,
                current.display_str()
            );
            return false;
        }
        self.entries.insert(id, status);
        true
    }

    /// Return `id` to available. Returns `true` if an entry was removed.
    pub fn reset_pick(&mut self, id: PlayerId) -> bool {
        self.entries.remove(&id).is_some()
    }

    /// Return every player to available. Returns `true` if anything changed.
    pub fn clear(&mut self) -> bool {
        let changed = !self.entries.is_empty();
        self.entries.clear();
        changed
    }

    /// Number of non-available players.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of players carrying `status`. `Available` is not countable
    /// without a catalog and always yields 0.
    pub fn count(&self, status: DraftStatus) -> usize {
        self.entries.values().filter(|s| **s == status).count()
    }

    /// Stored (non-available) entries in id order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, DraftStatus)> + '_ {
        self.entries.iter().map(|(id, s)| (*id, *s))
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse a persisted blob. Explicit `"available"` entries are dropped.
    pub fn from_json(blob: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(blob)
    }
}
