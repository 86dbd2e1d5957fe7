// TUI board: layout, input handling, and widget rendering.
//
// `App` owns the catalog, the guidance table and the draft session. Key
// presses become `UserCommand`s (or local `ViewState` changes such as moving
// the highlighted row); `App::apply` feeds commands to the session and the
// next render tick redraws from the session's derived views.

pub mod input;
pub mod layout;
pub mod widgets;

use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tracing::{debug, info, warn};

use draftboard_core::catalog::{Catalog, PlayerId, PlayerRecord};
use draftboard_core::draft::DraftStatus;
use draftboard_core::guidance::GuidanceTable;
use draftboard_core::session::{DraftSession, Mode, PositionFilter};

use layout::{build_layout, AppLayout};

// ---------------------------------------------------------------------------
// Commands and view state
// ---------------------------------------------------------------------------

/// An intent produced by the input handler and applied to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    Quit,
    SetPosition(PositionFilter),
    NextPosition,
    PrevPosition,
    SetSearch(String),
    /// Clear the search text and the position tab.
    ClearFilters,
    ToggleSort,
    SetMode(Mode),
    NextViewFilter,
    /// Draft operations on the highlighted player.
    MarkMine,
    MarkTaken,
    ResetPick,
    ClearDraft,
    ToggleTeamCount,
    NextSlot,
    PrevSlot,
}

/// A pending yes/no prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirm {
    Quit,
    ClearDraft,
}

/// TUI-local state that never reaches the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Index of the highlighted row in the current display list.
    pub selected: usize,
    /// Whether key presses are being typed into the search box.
    pub search_mode: bool,
    /// Open confirmation prompt, if any.
    pub confirm: Option<Confirm>,
    /// Scroll offset of the guidance panel.
    pub guidance_scroll: usize,
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    pub catalog: Catalog,
    pub guidance: GuidanceTable,
    pub session: DraftSession,
    pub view: ViewState,
}

impl App {
    pub fn new(catalog: Catalog, guidance: GuidanceTable, session: DraftSession) -> Self {
        App {
            catalog,
            guidance,
            session,
            view: ViewState::default(),
        }
    }

    /// The players currently on the board.
    pub fn display_list(&self) -> Vec<&PlayerRecord> {
        self.session.display_list(&self.catalog)
    }

    /// The highlighted player, if the board is not empty.
    pub fn selected_player(&self) -> Option<&PlayerRecord> {
        self.display_list().get(self.view.selected).copied()
    }

    /// Players marked as mine, in rank order.
    pub fn my_team(&self) -> Vec<&PlayerRecord> {
        let mut mine: Vec<&PlayerRecord> = self
            .catalog
            .players()
            .iter()
            .filter(|p| self.session.status_of(p.id) == DraftStatus::Mine)
            .collect();
        mine.sort_by_key(|p| p.overall_rank);
        mine
    }

    /// Apply a command to the session. `Quit` is handled by the event loop
    /// and ignored here.
    pub fn apply(&mut self, command: UserCommand) {
        debug!("applying {:?}", command);
        match command {
            UserCommand::Quit => {}
            UserCommand::SetPosition(filter) => {
                self.session.set_position_filter(filter);
                self.view.selected = 0;
            }
            UserCommand::NextPosition => {
                self.session
                    .set_position_filter(self.session.position_filter().next());
                self.view.selected = 0;
            }
            UserCommand::PrevPosition => {
                self.session
                    .set_position_filter(self.session.position_filter().prev());
                self.view.selected = 0;
            }
            UserCommand::SetSearch(text) => {
                self.session.set_search_text(text);
                self.view.selected = 0;
            }
            UserCommand::ClearFilters => {
                self.session.set_search_text(String::new());
                self.session.set_position_filter(PositionFilter::All);
                self.view.selected = 0;
            }
            UserCommand::ToggleSort => {
                self.session.set_sort_key(self.session.sort_key().toggled());
                self.view.selected = 0;
            }
            UserCommand::SetMode(mode) => {
                if mode != self.session.mode() {
                    self.session.set_mode(mode);
                    self.view.selected = 0;
                    self.view.guidance_scroll = 0;
                }
            }
            UserCommand::NextViewFilter => {
                self.session
                    .set_view_filter(self.session.view_filter().next());
                self.view.selected = 0;
            }
            UserCommand::MarkMine => {
                self.with_selected(|session, id| session.mark_mine(id));
            }
            UserCommand::MarkTaken => {
                self.with_selected(|session, id| session.mark_taken(id));
            }
            UserCommand::ResetPick => {
                self.with_selected(|session, id| session.reset_pick(id));
            }
            UserCommand::ClearDraft => {
                self.session.clear_draft();
                self.view.selected = 0;
            }
            UserCommand::ToggleTeamCount => {
                self.session
                    .set_team_count(self.session.team_count().toggled());
                info!(
                    "League set to {}, slot {}",
                    self.session.team_count(),
                    self.session.draft_slot()
                );
            }
            UserCommand::NextSlot => {
                let teams = self.session.team_count().size();
                let slot = self.session.draft_slot() % teams + 1;
                self.session.set_draft_slot(slot);
            }
            UserCommand::PrevSlot => {
                let teams = self.session.team_count().size();
                let slot = match self.session.draft_slot() {
                    1 => teams,
                    s => s - 1,
                };
                self.session.set_draft_slot(slot);
            }
        }
        self.clamp_selection();
    }

    fn with_selected(&mut self, op: impl FnOnce(&mut DraftSession, PlayerId) -> bool) {
        let Some(id) = self.selected_player().map(|p| p.id) else {
            debug!("draft operation with an empty board");
            return;
        };
        if op(&mut self.session, id) {
            info!("Player {} is now {}", id, self.session.status_of(id).display_str());
        }
    }

    /// Keep the highlighted row inside the display list.
    pub fn clamp_selection(&mut self) {
        let len = self.display_list().len();
        self.view.selected = self.view.selected.min(len.saturating_sub(1));
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete board frame.
pub fn render_frame(frame: &mut Frame, app: &App) {
    let layout = build_layout(frame.area());
    let players = app.display_list();
    let summary = app.session.draft_summary(&app.catalog);

    widgets::status_bar::render(frame, layout.status_bar, &app.session, summary);
    widgets::filter_bar::render(frame, layout.filter_bar, &app.session, &app.view);

    match app.session.mode() {
        Mode::Guidance => {
            let plan = app.session.guidance_plan(&app.guidance);
            let overview = app.session.slot_overview(&app.guidance);
            widgets::guidance::render(
                frame,
                layout.main_panel,
                overview,
                &plan,
                &app.session,
                app.view.guidance_scroll,
            );
        }
        Mode::BigBoard | Mode::DraftMode => {
            widgets::board::render(
                frame,
                layout.main_panel,
                &players,
                &app.session,
                app.view.selected,
            );
        }
    }

    let highlighted = players.get(app.view.selected).copied();
    widgets::player_detail::render(frame, layout.player_detail, highlighted, &app.session);
    widgets::my_team::render(frame, layout.my_team, &app.my_team());
    render_help_bar(frame, &layout, app);

    if let Some(confirm) = app.view.confirm {
        widgets::confirm::render(frame, frame.area(), confirm);
    }
}

/// Key hints for the current mode.
pub fn help_text(app: &App) -> &'static str {
    if app.view.search_mode {
        return " type to search | Enter:Done | Esc:Clear";
    }
    match app.session.mode() {
        Mode::BigBoard => {
            " q:Quit | b/d/g:Mode | 0-6,Tab:Position | /:Search | s:Sort | Esc:Clear filters"
        }
        Mode::DraftMode => {
            " q:Quit | m:Mine | t:Taken | u:Undo | v:View | C:Clear draft | /:Search | s:Sort"
        }
        Mode::Guidance => " q:Quit | b/d:Board | T:League size | Left/Right:Draft slot | j/k:Scroll",
    }
}

fn render_help_bar(frame: &mut Frame, layout: &AppLayout, app: &App) {
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        help_text(app),
        Style::default().fg(Color::White).add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.help_bar);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop until the user quits.
///
/// Initializes the terminal, installs a panic hook that restores it, then
/// selects over keyboard input and a ~30fps render tick.
pub async fn run(mut app: App) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut event_stream = EventStream::new();
    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let result: anyhow::Result<()> = loop {
        tokio::select! {
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        let search = app.session.search_text().to_string();
                        let mode = app.session.mode();
                        match input::handle_key(key_event, &mut app.view, mode, &search) {
                            Some(UserCommand::Quit) => break Ok(()),
                            Some(command) => app.apply(command),
                            None => app.clamp_selection(),
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        warn!("terminal input error: {}", e);
                        break Err(e.into());
                    }
                    None => break Ok(()),
                }
            }

            _ = render_tick.tick() => {
                if let Err(e) = terminal.draw(|frame| render_frame(frame, &app)) {
                    break Err(e.into());
                }
            }
        }
    };

    ratatui::restore();
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use draftboard_core::catalog::load_catalog_from_reader;
    use draftboard_core::guidance::TeamCount;
    use draftboard_core::session::{SortKey, ViewFilter};
    use draftboard_core::store::NoPersistence;

    const CSV: &str = "\
name,team,position,overall_rank,position_rank,adp,tier,floor,ceiling
Ja'Marr Chase,CIN,WR,1,1,1.0,1,Great,Excellent
Bijan Robinson,ATL,RB,2,1,2.6,1,Great,Excellent
Saquon Barkley,PHI,RB,3,2,2.8,1,Great,Excellent
Josh Allen,BUF,QB,21,1,23.2,3,Great,Excellent
";

    fn test_app() -> App {
        let catalog = load_catalog_from_reader(CSV.as_bytes(), "inline").unwrap();
        App::new(
            catalog,
            GuidanceTable::builtin(),
            DraftSession::new(Box::new(NoPersistence)),
        )
    }

    fn selected_name(app: &App) -> String {
        app.selected_player().unwrap().name.clone()
    }

    #[test]
    fn view_state_default_is_sensible() {
        let state = ViewState::default();
        assert_eq!(state.selected, 0);
        assert!(!state.search_mode);
        assert!(state.confirm.is_none());
        assert_eq!(state.guidance_scroll, 0);
    }

    #[test]
    fn mark_mine_applies_to_highlighted_row() {
        let mut app = test_app();
        app.apply(UserCommand::SetMode(Mode::DraftMode));
        app.view.selected = 1;
        app.apply(UserCommand::MarkMine);
        assert_eq!(app.session.status_of(2), DraftStatus::Mine);
        assert_eq!(app.my_team().len(), 1);
        assert_eq!(app.my_team()[0].name, "Bijan Robinson");
    }

    #[test]
    fn selection_clamps_when_list_shrinks() {
        let mut app = test_app();
        app.apply(UserCommand::SetMode(Mode::DraftMode));
        app.apply(UserCommand::NextViewFilter); // All -> Mine
        app.apply(UserCommand::NextViewFilter); // Mine -> Available
        assert_eq!(app.session.view_filter(), ViewFilter::Available);
        app.view.selected = 3;
        app.apply(UserCommand::MarkTaken);
        assert_eq!(app.display_list().len(), 3);
        assert_eq!(app.view.selected, 2);
        assert_eq!(selected_name(&app), "Saquon Barkley");
    }

    #[test]
    fn marks_on_empty_board_are_ignored() {
        let mut app = test_app();
        app.apply(UserCommand::SetSearch("nobody".into()));
        assert!(app.selected_player().is_none());
        app.apply(UserCommand::MarkMine);
        assert!(app.session.draft_map().is_empty());
    }

    #[test]
    fn position_commands_reset_selection() {
        let mut app = test_app();
        app.view.selected = 2;
        app.apply(UserCommand::NextPosition);
        assert_eq!(app.session.position_filter().label(), "QB");
        assert_eq!(app.view.selected, 0);
        assert_eq!(selected_name(&app), "Josh Allen");
        app.apply(UserCommand::PrevPosition);
        assert_eq!(app.session.position_filter(), PositionFilter::All);
    }

    #[test]
    fn clear_filters_resets_search_and_position() {
        let mut app = test_app();
        app.apply(UserCommand::SetSearch("ba".into()));
        app.apply(UserCommand::NextPosition);
        app.apply(UserCommand::ClearFilters);
        assert_eq!(app.session.search_text(), "");
        assert_eq!(app.session.position_filter(), PositionFilter::All);
        assert_eq!(app.display_list().len(), 4);
    }

    #[test]
    fn toggle_sort_switches_key() {
        let mut app = test_app();
        app.apply(UserCommand::ToggleSort);
        assert_eq!(app.session.sort_key(), SortKey::Adp);
        app.apply(UserCommand::ToggleSort);
        assert_eq!(app.session.sort_key(), SortKey::OverallRank);
    }

    #[test]
    fn slot_commands_wrap() {
        let mut app = test_app();
        app.apply(UserCommand::PrevSlot);
        assert_eq!(app.session.draft_slot(), 12);
        app.apply(UserCommand::NextSlot);
        assert_eq!(app.session.draft_slot(), 1);
        app.apply(UserCommand::ToggleTeamCount);
        assert_eq!(app.session.team_count(), TeamCount::Ten);
        app.apply(UserCommand::PrevSlot);
        assert_eq!(app.session.draft_slot(), 10);
    }

    #[test]
    fn team_count_toggle_resets_slot() {
        let mut app = test_app();
        app.apply(UserCommand::NextSlot);
        app.apply(UserCommand::NextSlot);
        assert_eq!(app.session.draft_slot(), 3);
        app.apply(UserCommand::ToggleTeamCount);
        assert_eq!(app.session.draft_slot(), 1);
    }

    #[test]
    fn clear_draft_command_empties_map() {
        let mut app = test_app();
        app.apply(UserCommand::MarkMine);
        app.view.selected = 1;
        app.apply(UserCommand::MarkTaken);
        app.apply(UserCommand::ClearDraft);
        assert!(app.session.draft_map().is_empty());
    }

    #[test]
    fn help_text_follows_mode() {
        let mut app = test_app();
        assert!(help_text(&app).contains("/:Search"));
        app.apply(UserCommand::SetMode(Mode::DraftMode));
        assert!(help_text(&app).contains("m:Mine"));
        app.apply(UserCommand::SetMode(Mode::Guidance));
        assert!(help_text(&app).contains("Draft slot"));
        app.view.search_mode = true;
        assert!(help_text(&app).contains("type to search"));
    }

    #[test]
    fn render_frame_does_not_panic_in_every_mode() {
        let backend = ratatui::backend::TestBackend::new(140, 40);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut app = test_app();
        for mode in Mode::ALL {
            app.apply(UserCommand::SetMode(mode));
            terminal.draw(|frame| render_frame(frame, &app)).unwrap();
        }
        app.view.confirm = Some(Confirm::ClearDraft);
        terminal.draw(|frame| render_frame(frame, &app)).unwrap();
    }
}
