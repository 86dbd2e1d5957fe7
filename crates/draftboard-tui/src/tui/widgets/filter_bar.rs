// Filter bar widget: position tabs, sort key, search box, draft view filter.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use draftboard_core::session::{DraftSession, Mode, PositionFilter};

use crate::tui::ViewState;

/// Render the filter bar into the given area.
pub fn render(frame: &mut Frame, area: Rect, session: &DraftSession, view: &ViewState) {
    let spans = if session.mode() == Mode::Guidance {
        vec![Span::styled(
            format!(
                " Your first {} picks from slot {} of {}",
                draftboard_core::guidance::GUIDANCE_ROUNDS,
                session.draft_slot(),
                session.team_count().size()
            ),
            Style::default().fg(Color::Gray),
        )]
    } else {
        let mut spans = position_spans(session.position_filter());
        spans.push(separator());
        spans.push(Span::styled(
            format!("Sort: {}", session.sort_key().label()),
            Style::default().fg(Color::White),
        ));
        spans.push(separator());
        spans.push(search_span(session.search_text(), view.search_mode));
        if session.mode() == Mode::DraftMode {
            spans.push(separator());
            spans.push(Span::styled(
                format!("View: {}", session.view_filter().label()),
                Style::default().fg(Color::Magenta),
            ));
        }
        spans
    };

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Position tab spans with the active tab highlighted.
pub fn position_spans(active: PositionFilter) -> Vec<Span<'static>> {
    let mut spans = vec![Span::raw(" ")];
    for tab in PositionFilter::TABS {
        let style = if tab == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        spans.push(Span::styled(format!(" {} ", tab.label()), style));
    }
    spans
}

/// The search box. Shows a cursor while typing, a hint when empty.
pub fn search_span(text: &str, editing: bool) -> Span<'static> {
    if editing {
        Span::styled(
            format!("Search: {text}_"),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )
    } else if text.is_empty() {
        Span::styled("Search: (/)", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(format!("Search: \"{text}\""), Style::default().fg(Color::Yellow))
    }
}

fn separator() -> Span<'static> {
    Span::styled(" | ", Style::default().fg(Color::Gray))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
