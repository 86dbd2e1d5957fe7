// Player detail widget: the highlighted player's full record.
//
// Line 1: "{name}" in bold
// Line 2: "{team} | {WR1} | Tier {n}"
// Line 3: "Rank {n} | ADP {adp}"
// Line 4: "Floor: {rating}  Ceiling: {rating}" colored by rating
// Then tags, projection and draft status when present.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use draftboard_core::catalog::{PlayerRecord, PlayerTags};
use draftboard_core::draft::DraftStatus;
use draftboard_core::session::DraftSession;

use super::rating_color;

/// Render the detail panel for `player`, or a placeholder when the board is
/// empty.
pub fn render(frame: &mut Frame, area: Rect, player: Option<&PlayerRecord>, session: &DraftSession) {
    let block = Block::default().borders(Borders::ALL).title("Player");
    let Some(player) = player else {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            "  No player selected.",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM),
        )))
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    };

    let lines = detail_lines(player, session.status_of(player.id));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Build the content lines for one player.
pub fn detail_lines(player: &PlayerRecord, status: DraftStatus) -> Vec<Line<'static>> {
    let label = Style::default().fg(Color::Gray);
    let value = Style::default().fg(Color::White);

    let mut lines = vec![
        Line::from(Span::styled(
            format!(" {}", player.name),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(format!(" {}", player.team), value),
            Span::styled(" | ", label),
            Span::styled(player.position_label(), Style::default().fg(Color::Cyan)),
            Span::styled(" | Tier ", label),
            Span::styled(player.tier.to_string(), value),
        ]),
        Line::from(vec![
            Span::styled(" Rank ", label),
            Span::styled(player.overall_rank.to_string(), value),
            Span::styled(" | ADP ", label),
            Span::styled(player.adp.clone(), value),
        ]),
        Line::from(vec![
            Span::styled(" Floor: ", label),
            Span::styled(
                player.floor.display_str(),
                Style::default().fg(rating_color(player.floor)),
            ),
            Span::styled("  Ceiling: ", label),
            Span::styled(
                player.ceiling.display_str(),
                Style::default().fg(rating_color(player.ceiling)),
            ),
        ]),
    ];

    let tags = tag_names(player.tags);
    if !tags.is_empty() {
        lines.push(Line::from(vec![
            Span::styled(" Tags: ", label),
            Span::styled(tags.join(", "), Style::default().fg(Color::Yellow)),
        ]));
    }

    if let Some(projection) = player.projection.as_deref() {
        lines.push(Line::from(vec![
            Span::styled(" Proj: ", label),
            Span::styled(projection.to_string(), value),
        ]));
    }

    if status != DraftStatus::Available {
        let style = match status {
            DraftStatus::Mine => Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            _ => Style::default().fg(Color::DarkGray),
        };
        lines.push(Line::from(vec![
            Span::styled(" Status: ", label),
            Span::styled(status.display_str(), style),
        ]));
    }

    lines
}

/// Names of the tags set on a player, in column order.
pub fn tag_names(tags: PlayerTags) -> Vec<&'static str> {
    [
        (tags.must_draft, "Must Draft"),
        (tags.avoid, "Avoid"),
        (tags.overrated, "Overrated"),
        (tags.underrated, "Underrated"),
    ]
    .into_iter()
    .filter_map(|(set, name)| set.then_some(name))
    .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
