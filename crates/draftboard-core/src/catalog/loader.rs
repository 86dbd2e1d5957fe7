// Catalog CSV loading.
//
// One header row, one row per player. Columns:
//   id (optional), name, team, position, overall_rank, position_rank, adp,
//   tier, must_draft, avoid, overrated, underrated, floor, ceiling,
//   projection (optional)
// Tag columns accept "true"/"yes"/"1"/"x"/"✓"; anything else is false.

use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info, warn};

use super::player::{PlayerId, PlayerRecord, PlayerTags, Position, Rating};
use super::{Catalog, CatalogError};

/// Raw CSV row. Text columns are parsed into enums after deserialization so a
/// single bad cell skips one row instead of failing the whole file.
#[derive(Debug, Deserialize)]
struct RawPlayerRow {
    #[serde(default)]
    id: Option<PlayerId>,
    name: String,
    #[serde(default)]
    team: String,
    position: String,
    overall_rank: u32,
    #[serde(default)]
    position_rank: u32,
    #[serde(default)]
    adp: String,
    #[serde(default)]
    tier: u8,
    #[serde(default)]
    must_draft: Option<String>,
    #[serde(default)]
    avoid: Option<String>,
    #[serde(default)]
    overrated: Option<String>,
    #[serde(default)]
    underrated: Option<String>,
    floor: String,
    ceiling: String,
    #[serde(default)]
    projection: Option<String>,
}

fn parse_flag(cell: &Option<String>) -> bool {
    cell.as_deref().is_some_and(|v| {
        matches!(
            v.trim().to_lowercase().as_str(),
            "true" | "yes" | "y" | "1" | "x" | "✓"
        )
    })
}

/// A parsed row whose final id is not settled yet.
struct LoadedRow {
    explicit_id: Option<PlayerId>,
    row_number: PlayerId,
    record: PlayerRecord,
}

fn row_to_record(raw: RawPlayerRow, row_number: PlayerId) -> Option<LoadedRow> {
    let name = raw.name.trim().to_string();
    if name.is_empty() {
        warn!("skipping row {}: empty player name", row_number);
        return None;
    }
    let Some(position) = Position::from_str_pos(&raw.position) else {
        warn!("skipping '{}': unknown position '{}'", name, raw.position);
        return None;
    };
    let (Some(floor), Some(ceiling)) = (
        Rating::from_str_rating(&raw.floor),
        Rating::from_str_rating(&raw.ceiling),
    ) else {
        warn!(
            "skipping '{}': unknown floor/ceiling '{}'/'{}'",
            name, raw.floor, raw.ceiling
        );
        return None;
    };

    let tags = PlayerTags {
        must_draft: parse_flag(&raw.must_draft),
        avoid: parse_flag(&raw.avoid),
        overrated: parse_flag(&raw.overrated),
        underrated: parse_flag(&raw.underrated),
    };

    let record = PlayerRecord {
        id: row_number,
        name,
        team: raw.team.trim().to_string(),
        position,
        overall_rank: raw.overall_rank,
        position_rank: raw.position_rank,
        adp: raw.adp.trim().to_string(),
        tier: raw.tier.max(1),
        tags,
        floor,
        ceiling,
        projection: raw
            .projection
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty()),
    };
    Some(LoadedRow {
        explicit_id: raw.id,
        row_number,
        record,
    })
}

/// Settle ids. Explicit ids are kept as written. A row without one takes its
/// row number unless an explicit id already claims it, in which case it gets
/// a fresh id above every explicit id and row number.
fn assign_ids(rows: Vec<LoadedRow>, last_row: PlayerId) -> Vec<PlayerRecord> {
    let mut used: HashSet<PlayerId> = rows.iter().filter_map(|r| r.explicit_id).collect();
    let mut next_fresh = used.iter().copied().max().unwrap_or(0).max(last_row);

    let mut players = Vec::with_capacity(rows.len());
    for LoadedRow {
        explicit_id,
        row_number,
        mut record,
    } in rows
    {
        record.id = match explicit_id {
            Some(id) => id,
            None if used.insert(row_number) => row_number,
            None => {
                let Some(fresh) = next_fresh.checked_add(1) else {
                    warn!("skipping '{}': no free player id left", record.name);
                    continue;
                };
                next_fresh = fresh;
                used.insert(fresh);
                warn!(
                    "row {} ('{}'): id {} is taken by an explicit id, using {}",
                    row_number, record.name, row_number, fresh
                );
                fresh
            }
        };
        players.push(record);
    }
    players
}

/// Read player rows from any CSV source.
///
/// Rows without an `id` cell get their 1-based data row number, so ids stay
/// stable as long as the file's row order does. Malformed rows are skipped
/// with a warning but still consume a row number. An unreadable header row
/// fails the whole load.
pub(crate) fn load_players_from_reader<R: Read>(rdr: R) -> Result<Vec<PlayerRecord>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr);
    reader.headers()?;

    let mut rows = Vec::new();
    let mut last_row: PlayerId = 0;
    for (idx, result) in reader.deserialize::<RawPlayerRow>().enumerate() {
        let row_number = idx as PlayerId + 1;
        last_row = row_number;
        match result {
            Ok(raw) => {
                if let Some(row) = row_to_record(raw, row_number) {
                    rows.push(row);
                }
            }
            Err(e) => {
                warn!("skipping malformed player row {}: {}", row_number, e);
            }
        }
    }
    Ok(assign_ids(rows, last_row))
}

/// Build a catalog from any CSV source. Fails on duplicate ids or when no
/// usable rows remain.
pub fn load_catalog_from_reader<R: Read>(rdr: R, source: &str) -> Result<Catalog, CatalogError> {
    let players = load_players_from_reader(rdr).map_err(|e| CatalogError::Csv {
        path: source.to_string(),
        source: e,
    })?;
    if players.is_empty() {
        return Err(CatalogError::Empty {
            path: source.to_string(),
        });
    }
    log_shared_ranks(&players);
    let catalog = Catalog::new(players)?;
    info!("Loaded {} players from {}", catalog.len(), source);
    Ok(catalog)
}

/// Load the catalog CSV at `path`.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let file = std::fs::File::open(path).map_err(|e| CatalogError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    load_catalog_from_reader(file, &path.display().to_string())
}

fn log_shared_ranks(players: &[PlayerRecord]) {
    let mut by_rank: HashMap<u32, Vec<&str>> = HashMap::new();
    for p in players {
        by_rank.entry(p.overall_rank).or_default().push(&p.name);
    }
    for (rank, names) in by_rank.into_iter().filter(|(_, n)| n.len() > 1) {
        debug!("overall rank {} shared by {}", rank, names.join(", "));
    }
}
