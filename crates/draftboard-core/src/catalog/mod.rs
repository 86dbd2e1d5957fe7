// Roster catalog: the immutable, ordered list of player records.

pub mod loader;
pub mod player;

use std::collections::HashMap;

use thiserror::Error;

pub use loader::{load_catalog, load_catalog_from_reader};
pub use player::{PlayerId, PlayerRecord, PlayerTags, Position, Rating};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("catalog {path} contains no usable player rows")]
    Empty { path: String },

    #[error("player id {id} is used by both '{first}' and '{second}'")]
    DuplicateId {
        id: PlayerId,
        first: String,
        second: String,
    },
}

/// The ground truth for display. Built once, never mutated; all per-session
/// state lives in [`crate::session::DraftSession`].
#[derive(Debug, Clone)]
pub struct Catalog {
    players: Vec<PlayerRecord>,
    index: HashMap<PlayerId, usize>,
}

impl Catalog {
    /// Build a catalog, enforcing that every player id is unique.
    pub fn new(players: Vec<PlayerRecord>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(players.len());
        for (i, p) in players.iter().enumerate() {
            if let Some(prev) = index.insert(p.id, i) {
                return Err(CatalogError::DuplicateId {
                    id: p.id,
                    first: players[prev].name.clone(),
                    second: p.name.clone(),
                });
            }
        }
        Ok(Catalog { players, index })
    }

    /// Players in catalog order.
    pub fn players(&self) -> &[PlayerRecord] {
        &self.players
    }

    pub fn get(&self, id: PlayerId) -> Option<&PlayerRecord> {
        self.index.get(&id).map(|&i| &self.players[i])
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
