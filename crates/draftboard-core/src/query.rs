// Query engine: derive the displayed player sequence from the catalog and the
// current session state.

use std::cmp::Ordering;

use crate::catalog::{Catalog, PlayerRecord};
use crate::draft::DraftStatus;
use crate::session::{Mode, SessionState, SortKey, ViewFilter};

/// The players to display, in display order.
///
/// Pure function of `(catalog, state)`: filters by position, then by
/// case-insensitive name search, then (in draft mode) by draft status, and
/// finally stable-sorts by the session's sort key. Players whose ADP does
/// not parse sort after every player whose ADP does, keeping catalog order
/// among themselves.
pub fn compute_display_list<'a>(catalog: &'a Catalog, state: &SessionState) -> Vec<&'a PlayerRecord> {
    let search = state.search_text.to_lowercase();
    let status_filter = match (state.mode, state.view_filter) {
        (Mode::DraftMode, ViewFilter::Available) => Some(DraftStatus::Available),
        (Mode::DraftMode, ViewFilter::Mine) => Some(DraftStatus::Mine),
        _ => None,
    };

    let mut players: Vec<&PlayerRecord> = catalog
        .players()
        .iter()
        .filter(|p| state.position_filter.matches(p.position))
        .filter(|p| search.is_empty() || p.name.to_lowercase().contains(&search))
        .filter(|p| status_filter.map_or(true, |s| state.draft_map.status_of(p.id) == s))
        .collect();

    match state.sort_key {
        SortKey::OverallRank => players.sort_by_key(|p| p.overall_rank),
        SortKey::Adp => players.sort_by(|a, b| compare_adp(a, b)),
    }

    players
}

fn compare_adp(a: &PlayerRecord, b: &PlayerRecord) -> Ordering {
    match (a.adp_value(), b.adp_value()) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
