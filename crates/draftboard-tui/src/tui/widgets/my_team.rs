// My Team widget: players marked as the user's own picks.
//
// "WR1: Ja'Marr Chase (CIN)" in rank order, with per-position counts in the
// title.

use ratatui::layout::{Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, List, ListItem, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
};
use ratatui::Frame;

use draftboard_core::catalog::{PlayerRecord, Position};

/// Render the user's team into the given area.
pub fn render(frame: &mut Frame, area: Rect, players: &[&PlayerRecord]) {
    if players.is_empty() {
        let paragraph = Paragraph::new("  No picks yet.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title("My Team"));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_rows = (area.height as usize).saturating_sub(2);
    let total = players.len();

    let items: Vec<ListItem> = players
        .iter()
        .take(visible_rows.max(1))
        .map(|p| format_pick(p))
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(team_title(players)),
    );
    frame.render_widget(list, area);

    if total > visible_rows {
        let mut scrollbar_state = ScrollbarState::new(total.saturating_sub(visible_rows));
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area.inner(Margin { vertical: 1, horizontal: 0 }),
            &mut scrollbar_state,
        );
    }
}

/// Title with the pick total and a per-position breakdown, e.g.
/// "My Team (3) QB 1 RB 2".
pub fn team_title(players: &[&PlayerRecord]) -> String {
    let mut title = format!("My Team ({})", players.len());
    for pos in Position::ALL {
        let n = players.iter().filter(|p| p.position == pos).count();
        if n > 0 {
            title.push_str(&format!(" {} {}", pos.display_str(), n));
        }
    }
    title
}

fn format_pick<'a>(player: &PlayerRecord) -> ListItem<'a> {
    ListItem::new(Line::from(vec![
        Span::styled(
            format!(" {}: ", player.position_label()),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(player.name.clone(), Style::default().fg(Color::White)),
        Span::styled(
            format!(" ({})", player.team),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
}

/// Plain-text form of a pick line (for testing).
pub fn format_pick_text(player: &PlayerRecord) -> String {
    format!("{}: {} ({})", player.position_label(), player.name, player.team)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
