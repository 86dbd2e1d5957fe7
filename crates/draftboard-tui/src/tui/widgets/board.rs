// Player board widget: the filtered, sorted player table.
//
// Columns: Rank, Player, Team, Pos, ADP, Tier, Must/Avoid/Over/Under tags,
// Floor, Ceiling, plus Status in draft mode. Drafted rows are styled by
// status; the highlighted row is the target of draft operations.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use ratatui::Frame;

use draftboard_core::catalog::PlayerRecord;
use draftboard_core::draft::DraftStatus;
use draftboard_core::session::{DraftSession, Mode, PositionFilter};

use super::rating_color;

/// Render the player table into the given area.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    players: &[&PlayerRecord],
    session: &DraftSession,
    selected: usize,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(build_title(session, players.len()));

    if players.is_empty() {
        let paragraph = Paragraph::new("No players match the current filters.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let draft_mode = session.mode() == Mode::DraftMode;

    let mut header_cells = vec![
        "Rk", "Player", "Team", "Pos", "ADP", "Tier", "Must", "Avoid", "Over", "Under", "Floor",
        "Ceiling",
    ];
    if draft_mode {
        header_cells.push("Status");
    }
    let header = Row::new(header_cells).style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = players
        .iter()
        .map(|p| {
            let status = session.status_of(p.id);
            let mut cells = vec![
                Cell::from(p.overall_rank.to_string()),
                Cell::from(p.name.clone()),
                Cell::from(p.team.clone()),
                Cell::from(p.position_label()),
                Cell::from(p.adp.clone()),
                Cell::from(p.tier.to_string()),
                Cell::from(tag_icon(p.tags.must_draft)).style(Style::default().fg(Color::Green)),
                Cell::from(tag_icon(p.tags.avoid)).style(Style::default().fg(Color::Red)),
                Cell::from(tag_icon(p.tags.overrated)).style(Style::default().fg(Color::LightRed)),
                Cell::from(tag_icon(p.tags.underrated)).style(Style::default().fg(Color::LightGreen)),
                Cell::from(p.floor.display_str()).style(Style::default().fg(rating_color(p.floor))),
                Cell::from(p.ceiling.display_str())
                    .style(Style::default().fg(rating_color(p.ceiling))),
            ];
            if draft_mode {
                cells.push(Cell::from(status_label(status)));
            }
            Row::new(cells).style(status_style(status))
        })
        .collect();

    let mut widths = vec![
        Constraint::Length(4),
        Constraint::Min(18),
        Constraint::Length(4),
        Constraint::Length(5),
        Constraint::Length(6),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(5),
        Constraint::Length(4),
        Constraint::Length(5),
        Constraint::Length(9),
        Constraint::Length(9),
    ];
    if draft_mode {
        widths.push(Constraint::Length(7));
    }

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol(">> ");

    let mut state = TableState::default().with_selected(Some(selected.min(players.len() - 1)));
    frame.render_stateful_widget(table, area, &mut state);
}

/// Check mark for a set tag, blank otherwise.
pub fn tag_icon(flag: bool) -> &'static str {
    if flag {
        "✓"
    } else {
        ""
    }
}

pub fn status_label(status: DraftStatus) -> &'static str {
    match status {
        DraftStatus::Available => "",
        DraftStatus::Mine => "MINE",
        DraftStatus::Taken => "taken",
    }
}

/// Row style for a draft status.
pub fn status_style(status: DraftStatus) -> Style {
    match status {
        DraftStatus::Available => Style::default(),
        DraftStatus::Mine => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        DraftStatus::Taken => Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT),
    }
}

/// Title with mode, position tab, search text and row count.
fn build_title(session: &DraftSession, count: usize) -> Line<'static> {
    let mut title = String::from(session.mode().label());
    if let PositionFilter::Only(pos) = session.position_filter() {
        title.push_str(&format!(" [{}]", pos.display_str()));
    }
    if !session.search_text().is_empty() {
        title.push_str(&format!(" \"{}\"", session.search_text()));
    }
    title.push_str(&format!(" ({})", count));
    Line::from(title)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
