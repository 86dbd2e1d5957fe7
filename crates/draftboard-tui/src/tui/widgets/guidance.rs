// Guidance widget: the overview for the user's draft slot, then advice for
// each of the user's picks in the covered rounds.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use draftboard_core::session::{DraftSession, GuidanceRow};

/// Render the guidance plan into the given area.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    overview: &str,
    plan: &[GuidanceRow<'_>],
    session: &DraftSession,
    scroll: usize,
) {
    let title = format!(
        "Guidance -- {}, slot {}",
        session.team_count(),
        session.draft_slot()
    );
    let mut lines = overview_lines(overview);
    lines.extend(plan_lines(plan));
    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false })
        .scroll((scroll.min(u16::MAX as usize) as u16, 0));
    frame.render_widget(paragraph, area);
}

/// "Overview" heading, the overview text one line per line, and a blank
/// separator line.
pub fn overview_lines(overview: &str) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        "Overview",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))];
    lines.extend(overview.lines().map(|text| Line::raw(format!("  {text}"))));
    lines.push(Line::raw(""));
    lines
}

/// One heading line per round followed by its advice, one line per line of
/// advice text, with a blank line between rounds.
pub fn plan_lines(plan: &[GuidanceRow<'_>]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (i, row) in plan.iter().enumerate() {
        if i > 0 {
            lines.push(Line::raw(""));
        }
        lines.push(Line::from(vec![
            Span::styled(
                format!("Round {}", row.round),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" -- ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("pick {}", row.overall_pick),
                Style::default().fg(Color::White),
            ),
        ]));
        for text in row.advice.lines() {
            lines.push(Line::raw(format!("  {text}")));
        }
    }
    lines
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
