// Draft session: per-user view and draft state layered over the catalog.

use std::fmt;

use tracing::{debug, info};

use crate::catalog::{Catalog, PlayerId, PlayerRecord, Position};
use crate::draft::{overall_pick, DraftMap, DraftStatus};
use crate::guidance::{GuidanceTable, TeamCount, GUIDANCE_ROUNDS};
use crate::query::compute_display_list;
use crate::store::DraftPersistence;

// ---------------------------------------------------------------------------
// View enums
// ---------------------------------------------------------------------------

/// Position tab of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PositionFilter {
    #[default]
    All,
    Only(Position),
}

impl PositionFilter {
    /// Tab order: ALL, QB, RB, WR, TE, DST, K.
    pub const TABS: [PositionFilter; 7] = [
        PositionFilter::All,
        PositionFilter::Only(Position::Quarterback),
        PositionFilter::Only(Position::RunningBack),
        PositionFilter::Only(Position::WideReceiver),
        PositionFilter::Only(Position::TightEnd),
        PositionFilter::Only(Position::Defense),
        PositionFilter::Only(Position::Kicker),
    ];

    /// Parse a tab label. Anything that is not a known position, including
    /// "ALL", selects every position.
    pub fn parse(s: &str) -> Self {
        match Position::from_str_pos(s) {
            Some(pos) => PositionFilter::Only(pos),
            None => {
                if !s.trim().eq_ignore_ascii_case("all") {
                    debug!("unknown position filter '{}', showing all positions", s);
                }
                PositionFilter::All
            }
        }
    }

    pub fn matches(&self, position: Position) -> bool {
        match self {
            PositionFilter::All => true,
            PositionFilter::Only(p) => *p == position,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PositionFilter::All => "ALL",
            PositionFilter::Only(p) => p.display_str(),
        }
    }

    /// The next tab, wrapping K -> ALL.
    pub fn next(self) -> Self {
        let idx = Self::TABS.iter().position(|t| *t == self).unwrap_or(0);
        Self::TABS[(idx + 1) % Self::TABS.len()]
    }

    /// The previous tab, wrapping ALL -> K.
    pub fn prev(self) -> Self {
        let idx = Self::TABS.iter().position(|t| *t == self).unwrap_or(0);
        Self::TABS[(idx + Self::TABS.len() - 1) % Self::TABS.len()]
    }
}

impl fmt::Display for PositionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    #[default]
    OverallRank,
    Adp,
}

impl SortKey {
    pub fn toggled(self) -> Self {
        match self {
            SortKey::OverallRank => SortKey::Adp,
            SortKey::Adp => SortKey::OverallRank,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::OverallRank => "Rank",
            SortKey::Adp => "ADP",
        }
    }
}

/// Interaction mode of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    BigBoard,
    DraftMode,
    Guidance,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::BigBoard, Mode::DraftMode, Mode::Guidance];

    pub fn label(&self) -> &'static str {
        match self {
            Mode::BigBoard => "Big Board",
            Mode::DraftMode => "Draft Mode",
            Mode::Guidance => "Guidance",
        }
    }
}

/// Draft-mode status filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewFilter {
    Available,
    #[default]
    All,
    Mine,
}

impl ViewFilter {
    /// Available -> All -> Mine -> Available.
    pub fn next(self) -> Self {
        match self {
            ViewFilter::Available => ViewFilter::All,
            ViewFilter::All => ViewFilter::Mine,
            ViewFilter::Mine => ViewFilter::Available,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ViewFilter::Available => "Available",
            ViewFilter::All => "All",
            ViewFilter::Mine => "My Team",
        }
    }
}

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// Everything the query engine needs to know about one user's board.
///
/// A plain value; [`DraftSession`] owns one and enforces the lifecycle rules
/// (mode switches resetting filters, persistence of the draft map).
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub position_filter: PositionFilter,
    pub search_text: String,
    pub sort_key: SortKey,
    pub mode: Mode,
    pub view_filter: ViewFilter,
    pub draft_map: DraftMap,
    pub team_count: TeamCount,
    /// 1-based; always within `1..=team_count`.
    pub draft_slot: u32,
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState {
            position_filter: PositionFilter::All,
            search_text: String::new(),
            sort_key: SortKey::OverallRank,
            mode: Mode::BigBoard,
            view_filter: ViewFilter::All,
            draft_map: DraftMap::new(),
            team_count: TeamCount::Twelve,
            draft_slot: 1,
        }
    }
}

impl SessionState {
    /// Defaults with the given league settings. An out-of-range slot falls
    /// back to 1.
    pub fn new(team_count: TeamCount, draft_slot: u32) -> Self {
        let draft_slot = if (1..=team_count.size()).contains(&draft_slot) {
            draft_slot
        } else {
            1
        };
        SessionState {
            team_count,
            draft_slot,
            ..SessionState::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Derived views
// ---------------------------------------------------------------------------

/// One row of the guidance panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuidanceRow<'t> {
    pub round: u32,
    pub overall_pick: u32,
    pub advice: &'t str,
}

/// Draft progress over the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DraftSummary {
    pub mine: usize,
    pub taken: usize,
    pub available: usize,
}

// ---------------------------------------------------------------------------
// DraftSession
// ---------------------------------------------------------------------------

/// Mutable per-user state over the catalog.
///
/// The host UI feeds intents in through the setters and draft operations and
/// reads the board back with [`DraftSession::display_list`]. Every change to
/// the draft map is written through the injected [`DraftPersistence`]; no
/// other field is persisted.
pub struct DraftSession {
    state: SessionState,
    persistence: Box<dyn DraftPersistence>,
}

impl fmt::Debug for DraftSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DraftSession")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl DraftSession {
    /// Start a session with default settings, restoring the draft map from
    /// `persistence`.
    pub fn new(persistence: Box<dyn DraftPersistence>) -> Self {
        Self::with_league(persistence, TeamCount::default(), 1)
    }

    /// Start a session for a league size and draft slot.
    pub fn with_league(
        persistence: Box<dyn DraftPersistence>,
        team_count: TeamCount,
        draft_slot: u32,
    ) -> Self {
        let mut state = SessionState::new(team_count, draft_slot);
        state.draft_map = persistence.load();
        info!(
            "Draft session started ({}, slot {}, {} players already drafted)",
            state.team_count,
            state.draft_slot,
            state.draft_map.len()
        );
        DraftSession { state, persistence }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn position_filter(&self) -> PositionFilter {
        self.state.position_filter
    }

    pub fn search_text(&self) -> &str {
        &self.state.search_text
    }

    pub fn sort_key(&self) -> SortKey {
        self.state.sort_key
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn view_filter(&self) -> ViewFilter {
        self.state.view_filter
    }

    pub fn team_count(&self) -> TeamCount {
        self.state.team_count
    }

    pub fn draft_slot(&self) -> u32 {
        self.state.draft_slot
    }

    pub fn draft_map(&self) -> &DraftMap {
        &self.state.draft_map
    }

    // -- view intents --

    pub fn set_position_filter(&mut self, filter: PositionFilter) {
        self.state.position_filter = filter;
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.state.search_text = text.into();
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        self.state.sort_key = key;
    }

    /// Switch mode. A real switch resets the position filter to ALL; entering
    /// draft mode also resets the view filter to All. Re-selecting the
    /// current mode changes nothing.
    pub fn set_mode(&mut self, mode: Mode) {
        if mode == self.state.mode {
            return;
        }
        debug!("mode {:?} -> {:?}", self.state.mode, mode);
        self.state.mode = mode;
        self.state.position_filter = PositionFilter::All;
        if mode == Mode::DraftMode {
            self.state.view_filter = ViewFilter::All;
        }
    }

    pub fn set_view_filter(&mut self, filter: ViewFilter) {
        self.state.view_filter = filter;
    }

    /// Change league size. A real change resets the draft slot to 1.
    pub fn set_team_count(&mut self, team_count: TeamCount) {
        if team_count == self.state.team_count {
            return;
        }
        self.state.team_count = team_count;
        self.state.draft_slot = 1;
    }

    /// Set the user's draft slot. Slots outside `1..=team_count` are ignored;
    /// returns whether the slot was accepted.
    pub fn set_draft_slot(&mut self, slot: u32) -> bool {
        if !(1..=self.state.team_count.size()).contains(&slot) {
            debug!(
                "ignoring draft slot {} for a {} league",
                slot, self.state.team_count
            );
            return false;
        }
        self.state.draft_slot = slot;
        true
    }

    // -- draft operations --

    pub fn status_of(&self, id: PlayerId) -> DraftStatus {
        self.state.draft_map.status_of(id)
    }

    /// Mark an available player as drafted by the user. No-op for players
    /// that are already mine or taken.
    pub fn mark_mine(&mut self, id: PlayerId) -> bool {
        let changed = self.state.draft_map.mark_mine(id);
        self.persist_if(changed);
        changed
    }

    /// Mark an available player as drafted by someone else. No-op for players
    /// that are already mine or taken.
    pub fn mark_taken(&mut self, id: PlayerId) -> bool {
        let changed = self.state.draft_map.mark_taken(id);
        self.persist_if(changed);
        changed
    }

    /// Return a player to available. Idempotent.
    pub fn reset_pick(&mut self, id: PlayerId) -> bool {
        let changed = self.state.draft_map.reset_pick(id);
        self.persist_if(changed);
        changed
    }

    /// Return every player to available.
    pub fn clear_draft(&mut self) -> bool {
        let changed = self.state.draft_map.clear();
        if changed {
            info!("Draft cleared");
        }
        self.persist_if(changed);
        changed
    }

    fn persist_if(&self, changed: bool) {
        if changed {
            self.persistence.save(&self.state.draft_map);
        }
    }

    // -- derived views --

    /// The players to show for the current state.
    pub fn display_list<'a>(&self, catalog: &'a Catalog) -> Vec<&'a PlayerRecord> {
        compute_display_list(catalog, &self.state)
    }

    /// Overall pick number of the user's selection in `round`.
    pub fn overall_pick(&self, round: u32) -> u32 {
        overall_pick(round, self.state.team_count.size(), self.state.draft_slot)
    }

    /// Guidance for each of the user's picks in the covered rounds.
    pub fn guidance_plan<'t>(&self, table: &'t GuidanceTable) -> Vec<GuidanceRow<'t>> {
        (1..=GUIDANCE_ROUNDS)
            .map(|round| {
                let pick = self.overall_pick(round);
                GuidanceRow {
                    round,
                    overall_pick: pick,
                    advice: table.advice(self.state.team_count, pick),
                }
            })
            .collect()
    }

    /// Overview text for the session's league size and draft slot.
    pub fn slot_overview<'t>(&self, table: &'t GuidanceTable) -> &'t str {
        table.slot_overview(self.state.team_count, self.state.draft_slot)
    }

    /// Count catalog players by draft status.
    pub fn draft_summary(&self, catalog: &Catalog) -> DraftSummary {
        catalog
            .players()
            .iter()
            .fold(DraftSummary::default(), |mut acc, p| {
                match self.status_of(p.id) {
                    DraftStatus::Available => acc.available += 1,
                    DraftStatus::Mine => acc.mine += 1,
                    DraftStatus::Taken => acc.taken += 1,
                }
                acc
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::player::sample_player;
    use crate::store::{BlobPersistence, BlobStore, FailingStore, MemoryStore, NoPersistence, DEFAULT_STORAGE_KEY};
    use std::sync::Arc;

    fn session() -> DraftSession {
        DraftSession::new(Box::new(NoPersistence))
    }

    #[test]
    fn defaults() {
        let s = session();
        assert_eq!(s.position_filter(), PositionFilter::All);
        assert_eq!(s.search_text(), "");
        assert_eq!(s.sort_key(), SortKey::OverallRank);
        assert_eq!(s.mode(), Mode::BigBoard);
        assert_eq!(s.view_filter(), ViewFilter::All);
        assert_eq!(s.team_count(), TeamCount::Twelve);
        assert_eq!(s.draft_slot(), 1);
        assert!(s.draft_map().is_empty());
    }

    #[test]
    fn position_filter_parse_defaults_to_all() {
        assert_eq!(PositionFilter::parse("ALL"), PositionFilter::All);
        assert_eq!(PositionFilter::parse("LB"), PositionFilter::All);
        assert_eq!(PositionFilter::parse(""), PositionFilter::All);
        assert_eq!(
            PositionFilter::parse("te"),
            PositionFilter::Only(Position::TightEnd)
        );
    }

    #[test]
    fn position_filter_cycles_through_tabs() {
        let mut f = PositionFilter::All;
        let mut seen = vec![f.label()];
        for _ in 0..6 {
            f = f.next();
            seen.push(f.label());
        }
        assert_eq!(seen, vec!["ALL", "QB", "RB", "WR", "TE", "DST", "K"]);
        assert_eq!(f.next(), PositionFilter::All);
        assert_eq!(PositionFilter::All.prev(), PositionFilter::Only(Position::Kicker));
    }

    #[test]
    fn switching_mode_resets_position_filter() {
        let mut s = session();
        s.set_position_filter(PositionFilter::Only(Position::RunningBack));
        s.set_mode(Mode::Guidance);
        assert_eq!(s.position_filter(), PositionFilter::All);
    }

    #[test]
    fn entering_draft_mode_resets_view_filter() {
        let mut s = session();
        s.set_mode(Mode::DraftMode);
        s.set_view_filter(ViewFilter::Mine);
        s.set_mode(Mode::BigBoard);
        assert_eq!(s.view_filter(), ViewFilter::Mine);
        s.set_mode(Mode::DraftMode);
        assert_eq!(s.view_filter(), ViewFilter::All);
    }

    #[test]
    fn reselecting_current_mode_keeps_filters() {
        let mut s = session();
        s.set_mode(Mode::DraftMode);
        s.set_position_filter(PositionFilter::Only(Position::Quarterback));
        s.set_view_filter(ViewFilter::Available);
        s.set_mode(Mode::DraftMode);
        assert_eq!(s.position_filter(), PositionFilter::Only(Position::Quarterback));
        assert_eq!(s.view_filter(), ViewFilter::Available);
    }

    #[test]
    fn team_count_change_resets_slot() {
        let mut s = session();
        assert!(s.set_draft_slot(9));
        s.set_team_count(TeamCount::Ten);
        assert_eq!(s.draft_slot(), 1);
        assert!(s.set_draft_slot(10));
        s.set_team_count(TeamCount::Ten);
        assert_eq!(s.draft_slot(), 10);
    }

    #[test]
    fn out_of_range_slot_is_ignored() {
        let mut s = session();
        s.set_team_count(TeamCount::Ten);
        assert!(!s.set_draft_slot(11));
        assert!(!s.set_draft_slot(0));
        assert_eq!(s.draft_slot(), 1);
    }

    #[test]
    fn with_league_clamps_bad_slot() {
        let s = DraftSession::with_league(Box::new(NoPersistence), TeamCount::Ten, 12);
        assert_eq!(s.draft_slot(), 1);
        let s = DraftSession::with_league(Box::new(NoPersistence), TeamCount::Ten, 4);
        assert_eq!(s.draft_slot(), 4);
    }

    #[test]
    fn overall_pick_uses_league_settings() {
        let s = session();
        assert_eq!(s.overall_pick(1), 1);
        assert_eq!(s.overall_pick(2), 24);
        assert_eq!(s.overall_pick(3), 25);
    }

    #[test]
    fn mark_mine_twice_is_noop_and_persists_once() {
        let store = Arc::new(MemoryStore::new());
        let mut s = DraftSession::new(Box::new(BlobPersistence::with_default_key(Arc::clone(&store))));
        assert!(s.mark_mine(7));
        store.write(DEFAULT_STORAGE_KEY, "sentinel").unwrap();
        assert!(!s.mark_mine(7));
        assert_eq!(s.status_of(7), DraftStatus::Mine);
        // The ignored call must not rewrite storage.
        assert_eq!(store.read(DEFAULT_STORAGE_KEY).unwrap().as_deref(), Some("sentinel"));
    }

    #[test]
    fn every_mutation_is_written_through() {
        let store = Arc::new(MemoryStore::new());
        let mut s = DraftSession::new(Box::new(BlobPersistence::with_default_key(Arc::clone(&store))));
        s.mark_mine(1);
        assert_eq!(store.read(DEFAULT_STORAGE_KEY).unwrap().as_deref(), Some(r#"{"1":"mine"}"#));
        s.mark_taken(2);
        assert_eq!(
            store.read(DEFAULT_STORAGE_KEY).unwrap().as_deref(),
            Some(r#"{"1":"mine","2":"taken"}"#)
        );
        s.reset_pick(1);
        assert_eq!(store.read(DEFAULT_STORAGE_KEY).unwrap().as_deref(), Some(r#"{"2":"taken"}"#));
        s.clear_draft();
        assert_eq!(store.read(DEFAULT_STORAGE_KEY).unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn session_rehydrates_from_store() {
        let store = Arc::new(MemoryStore::with_blob(DEFAULT_STORAGE_KEY, r#"{"5":"taken"}"#));
        let s = DraftSession::new(Box::new(BlobPersistence::with_default_key(store)));
        assert_eq!(s.status_of(5), DraftStatus::Taken);
    }

    #[test]
    fn failing_storage_keeps_in_memory_state() {
        let mut s = DraftSession::new(Box::new(BlobPersistence::with_default_key(FailingStore)));
        assert!(s.mark_mine(3));
        assert!(s.mark_taken(4));
        assert_eq!(s.status_of(3), DraftStatus::Mine);
        assert_eq!(s.status_of(4), DraftStatus::Taken);
        assert!(s.reset_pick(3));
        assert_eq!(s.status_of(3), DraftStatus::Available);
    }

    #[test]
    fn guidance_plan_lists_seven_rounds() {
        let mut s = session();
        s.set_team_count(TeamCount::Ten);
        s.set_draft_slot(3);
        let table = GuidanceTable::builtin();
        let plan = s.guidance_plan(&table);
        let picks: Vec<u32> = plan.iter().map(|r| r.overall_pick).collect();
        assert_eq!(picks, vec![3, 18, 23, 38, 43, 58, 63]);
        assert_eq!(plan[0].round, 1);
        assert!(plan[1].advice.contains("overall pick 18"));
    }

    #[test]
    fn slot_overview_follows_league_settings() {
        let mut s = session();
        let table = GuidanceTable::builtin();
        assert!(s.slot_overview(&table).starts_with("Ja'Marr Chase."));
        s.set_team_count(TeamCount::Ten);
        s.set_draft_slot(4);
        assert!(s.slot_overview(&table).contains("10-team leagues, slot 4"));
    }

    #[test]
    fn draft_summary_counts_catalog_players_only() {
        let catalog = Catalog::new(vec![
            sample_player(1, "A", Position::Quarterback, 1),
            sample_player(2, "B", Position::RunningBack, 2),
            sample_player(3, "C", Position::WideReceiver, 3),
        ])
        .unwrap();
        let mut s = session();
        s.mark_mine(1);
        s.mark_taken(2);
        s.mark_taken(99);
        assert_eq!(
            s.draft_summary(&catalog),
            DraftSummary {
                mine: 1,
                taken: 1,
                available: 1
            }
        );
    }

    #[test]
    fn display_list_reflects_draft_view() {
        let catalog = Catalog::new(vec![
            sample_player(1, "A", Position::Quarterback, 1),
            sample_player(2, "B", Position::RunningBack, 2),
        ])
        .unwrap();
        let mut s = session();
        s.set_mode(Mode::DraftMode);
        s.set_view_filter(ViewFilter::Available);
        s.mark_taken(1);
        let ids: Vec<u32> = s.display_list(&catalog).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2]);
    }
}
