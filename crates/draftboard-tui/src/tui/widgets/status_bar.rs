// Status bar widget: mode tabs, league settings, draft progress, and in draft
// mode the pick currently on the clock.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use draftboard_core::draft::round_and_slot;
use draftboard_core::session::{DraftSession, DraftSummary, Mode};

/// Render the status bar into the given area.
///
/// Layout: [mode tabs] | [league] | [draft progress] | [on the clock]
pub fn render(frame: &mut Frame, area: Rect, session: &DraftSession, summary: DraftSummary) {
    let mut spans = mode_spans(session.mode());

    spans.push(Span::styled("| ", Style::default().fg(Color::Gray)));
    spans.push(Span::styled(
        format!("{}, slot {}", session.team_count(), session.draft_slot()),
        Style::default().fg(Color::White),
    ));
    spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
    spans.push(Span::styled(
        progress_text(summary),
        Style::default().fg(Color::Cyan),
    ));

    if session.mode() == Mode::DraftMode {
        if let Some((text, yours)) = on_the_clock(summary, session) {
            let style = if yours {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
            spans.push(Span::styled(text, style));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Mode indicator spans with the active mode highlighted.
/// E.g. "[b:Big Board] [d:Draft Mode] [g:Guidance] "
pub fn mode_spans(active: Mode) -> Vec<Span<'static>> {
    let mut spans = vec![Span::raw(" ")];
    for mode in Mode::ALL {
        let style = if mode == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(
            format!("[{}:{}]", mode_key(mode), mode.label()),
            style,
        ));
        spans.push(Span::raw(" "));
    }
    spans
}

fn mode_key(mode: Mode) -> char {
    match mode {
        Mode::BigBoard => 'b',
        Mode::DraftMode => 'd',
        Mode::Guidance => 'g',
    }
}

pub fn progress_text(summary: DraftSummary) -> String {
    format!(
        "Mine {} · Taken {} · Available {}",
        summary.mine, summary.taken, summary.available
    )
}

/// The next overall pick, counting every marked player as one pick made.
/// Returns the label and whether the user's slot owns that pick.
pub fn on_the_clock(summary: DraftSummary, session: &DraftSession) -> Option<(String, bool)> {
    let pick = u32::try_from(summary.mine + summary.taken).ok()?.checked_add(1)?;
    let (round, slot) = round_and_slot(pick, session.team_count().size())?;
    let yours = slot == session.draft_slot();
    let label = if yours {
        format!("Pick {pick}: R{round} slot {slot} (you)")
    } else {
        format!("Pick {pick}: R{round} slot {slot}")
    };
    Some((label, yours))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
