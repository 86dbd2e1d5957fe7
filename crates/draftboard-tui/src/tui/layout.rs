// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +--------------------------------------------------+
// | Filter Bar (1 row)                                |
// +-------------------------+------------------------+
// | Main Panel (68%)         | Sidebar (32%)          |
// |                          | +- Player (55%) ------+|
// |                          | +- My Team (45%) -----+|
// +-------------------------+------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each board zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Mode tabs, league settings, draft progress.
    pub status_bar: Rect,
    /// Position tabs, sort key, search box, view filter.
    pub filter_bar: Rect,
    /// Player board or guidance plan.
    pub main_panel: Rect,
    /// Details of the highlighted player.
    pub player_detail: Rect,
    /// Players marked as mine.
    pub my_team: Rect,
    /// Keyboard shortcut hints.
    pub help_bar: Rect,
}

/// Build the board layout from the available terminal area.
pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Length(1), // filter bar
            Constraint::Min(8),    // main + sidebar
            Constraint::Length(1), // help bar
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(68), Constraint::Percentage(32)])
        .split(vertical[2]);

    let sidebar = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(horizontal[1]);

    AppLayout {
        status_bar: vertical[0],
        filter_bar: vertical[1],
        main_panel: horizontal[0],
        player_detail: sidebar[0],
        my_team: sidebar[1],
        help_bar: vertical[3],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
