// Static draft guidance: canned advice text keyed by league size and overall
// pick number, plus one overview per draft slot.
//
// The built-in table covers every pick of rounds 1..=GUIDANCE_ROUNDS and
// every slot for both supported league sizes. An optional TOML file
// replaces individual entries:
//
//   [[advice]]
//   teams = 12
//   pick = 1
//   text = """Ja'Marr Chase. On to round 2."""
//
//   [[advice]]
//   teams = 10
//   round = 2
//   slot = 4
//   text = "..."
//
//   [[overview]]
//   teams = 12
//   slot = 3
//   text = "..."

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::draft::snake::checked_overall_pick;

/// Number of rounds the guidance table covers.
pub const GUIDANCE_ROUNDS: u32 = 7;

/// Shown when the table has no entry for a pick.
pub const MISSING_ADVICE: &str = "No guidance written for this pick yet.";

/// Shown when the table has no overview for a draft slot.
pub const MISSING_OVERVIEW: &str = "No overview written for this draft slot yet.";

/// Supported league sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TeamCount {
    Ten,
    #[default]
    Twelve,
}

impl TeamCount {
    pub const ALL: [TeamCount; 2] = [TeamCount::Ten, TeamCount::Twelve];

    pub fn size(self) -> u32 {
        match self {
            TeamCount::Ten => 10,
            TeamCount::Twelve => 12,
        }
    }

    pub fn from_size(n: u32) -> Option<Self> {
        match n {
            10 => Some(TeamCount::Ten),
            12 => Some(TeamCount::Twelve),
            _ => None,
        }
    }

    /// The other supported size.
    pub fn toggled(self) -> Self {
        match self {
            TeamCount::Ten => TeamCount::Twelve,
            TeamCount::Twelve => TeamCount::Ten,
        }
    }
}

impl fmt::Display for TeamCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-team", self.size())
    }
}

#[derive(Debug, Error)]
pub enum GuidanceError {
    #[error("failed to read guidance file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse guidance file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid guidance entry #{index}: {message}")]
    InvalidEntry { index: usize, message: String },
}

#[derive(Debug, Deserialize)]
struct GuidanceFile {
    #[serde(default)]
    advice: Vec<RawAdvice>,
    #[serde(default)]
    overview: Vec<RawOverview>,
}

#[derive(Debug, Deserialize)]
struct RawOverview {
    teams: u32,
    slot: u32,
    text: String,
}

#[derive(Debug, Deserialize)]
struct RawAdvice {
    teams: u32,
    pick: Option<u32>,
    round: Option<u32>,
    slot: Option<u32>,
    text: String,
}

/// Lookup table of advice strings.
#[derive(Debug, Clone, Default)]
pub struct GuidanceTable {
    entries: HashMap<(TeamCount, u32), String>,
    /// Whole-draft overview keyed by `(teams, slot)`.
    overviews: HashMap<(TeamCount, u32), String>,
}

impl GuidanceTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The default table shipped with the board: placeholder text for every
    /// pick of the first seven rounds and for every draft slot, plus written
    /// advice where it exists.
    pub fn builtin() -> Self {
        let mut table = GuidanceTable::new();
        for teams in TeamCount::ALL {
            for pick in 1..=GUIDANCE_ROUNDS * teams.size() {
                table.insert(
                    teams,
                    pick,
                    format!(
                        "Placeholder advice for {}-team leagues, overall pick {}. Replace with your own guidance.",
                        teams.size(),
                        pick
                    ),
                );
            }
        }
        for teams in TeamCount::ALL {
            for slot in 1..=teams.size() {
                table.insert_overview(
                    teams,
                    slot,
                    format!(
                        "Placeholder advice for {}-team leagues, slot {}. Replace with your own guidance.",
                        teams.size(),
                        slot
                    ),
                );
            }
        }
        const TWELVE_SLOT_ONE: &str = "Ja'Marr Chase. On to round 2.\nIf you really want to take Bijan Robinson, you can, but Ja'Marr Chase is the guy.";
        table.insert(TeamCount::Twelve, 1, TWELVE_SLOT_ONE);
        table.insert_overview(TeamCount::Twelve, 1, TWELVE_SLOT_ONE);
        table
    }

    pub fn insert_overview(&mut self, teams: TeamCount, slot: u32, text: impl Into<String>) {
        self.overviews.insert((teams, slot), text.into());
    }

    /// Overview for drafting from `slot`, or [`MISSING_OVERVIEW`] with a
    /// logged warning.
    pub fn slot_overview(&self, teams: TeamCount, slot: u32) -> &str {
        match self.overviews.get(&(teams, slot)) {
            Some(text) => text,
            None => {
                warn!("no overview for {} slot {}", teams, slot);
                MISSING_OVERVIEW
            }
        }
    }

    pub fn insert(&mut self, teams: TeamCount, pick: u32, text: impl Into<String>) {
        self.entries.insert((teams, pick), text.into());
    }

    /// Advice for `(teams, pick)`, verbatim.
    pub fn get(&self, teams: TeamCount, pick: u32) -> Option<&str> {
        self.entries.get(&(teams, pick)).map(String::as_str)
    }

    /// Advice for `(teams, pick)`, or [`MISSING_ADVICE`] when the table has
    /// a gap. Gaps are logged, never raised.
    pub fn advice(&self, teams: TeamCount, pick: u32) -> &str {
        match self.get(teams, pick) {
            Some(text) => text,
            None => {
                warn!("no guidance for {} pick {}", teams, pick);
                MISSING_ADVICE
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries for one league size.
    pub fn entries_for(&self, teams: TeamCount) -> usize {
        self.entries.keys().filter(|(t, _)| *t == teams).count()
    }

    /// Apply overrides from TOML text. Returns the number of entries applied,
    /// per-pick and overview entries together. Nothing is applied when any
    /// entry is invalid.
    pub fn apply_overrides_str(&mut self, text: &str, path: &Path) -> Result<usize, GuidanceError> {
        let file: GuidanceFile = toml::from_str(text).map_err(|e| GuidanceError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut resolved = Vec::with_capacity(file.advice.len());
        for (index, raw) in file.advice.into_iter().enumerate() {
            let teams = TeamCount::from_size(raw.teams).ok_or_else(|| GuidanceError::InvalidEntry {
                index,
                message: format!("teams must be 10 or 12, got {}", raw.teams),
            })?;
            let pick = match (raw.pick, raw.round, raw.slot) {
                (Some(pick), _, _) if pick >= 1 => pick,
                (Some(pick), _, _) => {
                    return Err(GuidanceError::InvalidEntry {
                        index,
                        message: format!("pick must be at least 1, got {pick}"),
                    })
                }
                (None, Some(round), Some(slot)) => checked_overall_pick(round, teams.size(), slot)
                    .map_err(|e| GuidanceError::InvalidEntry {
                        index,
                        message: e.to_string(),
                    })?,
                _ => {
                    return Err(GuidanceError::InvalidEntry {
                        index,
                        message: "needs either `pick` or both `round` and `slot`".into(),
                    })
                }
            };
            resolved.push((teams, pick, raw.text));
        }

        let mut overviews = Vec::with_capacity(file.overview.len());
        for (index, raw) in file.overview.into_iter().enumerate() {
            let teams = TeamCount::from_size(raw.teams).ok_or_else(|| GuidanceError::InvalidEntry {
                index,
                message: format!("overview teams must be 10 or 12, got {}", raw.teams),
            })?;
            if !(1..=teams.size()).contains(&raw.slot) {
                return Err(GuidanceError::InvalidEntry {
                    index,
                    message: format!(
                        "overview slot must be between 1 and {}, got {}",
                        teams.size(),
                        raw.slot
                    ),
                });
            }
            overviews.push((teams, raw.slot, raw.text));
        }

        let applied = resolved.len() + overviews.len();
        for (teams, pick, text) in resolved {
            self.insert(teams, pick, text);
        }
        for (teams, slot, text) in overviews {
            self.insert_overview(teams, slot, text);
        }
        Ok(applied)
    }

    /// Apply overrides from a TOML file.
    pub fn apply_overrides_file(&mut self, path: &Path) -> Result<usize, GuidanceError> {
        let text = std::fs::read_to_string(path).map_err(|e| GuidanceError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.apply_overrides_str(&text, path)
    }
}

/// Build the guidance table: the built-in entries, with overrides from
/// `overrides` applied when given.
pub fn load_guidance(overrides: Option<&Path>) -> Result<GuidanceTable, GuidanceError> {
    let mut table = GuidanceTable::builtin();
    if let Some(path) = overrides {
        let applied = table.apply_overrides_file(path)?;
        info!("Applied {} guidance overrides from {}", applied, path.display());
    }
    Ok(table)
}
