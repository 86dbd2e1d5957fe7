// Confirmation overlay widget.
//
// Renders a centered modal asking the user to confirm a destructive action
// (quitting, or wiping every draft mark). Drawn on top of the main layout
// while `ViewState::confirm` is set.

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::tui::Confirm;

const DIALOG_WIDTH: u16 = 36;
const DIALOG_HEIGHT: u16 = 5;

fn title(confirm: Confirm) -> &'static str {
    match confirm {
        Confirm::Quit => " Quit? ",
        Confirm::ClearDraft => " Clear draft? ",
    }
}

fn prompt(confirm: Confirm) -> &'static str {
    match confirm {
        Confirm::Quit => "  Really quit? (",
        Confirm::ClearDraft => "  Reset every pick? (",
    }
}

/// Render the confirmation overlay centered on `area`.
pub fn render(frame: &mut Frame, area: Rect, confirm: Confirm) {
    let dialog_area = centered_rect(DIALOG_WIDTH, DIALOG_HEIGHT, area);

    frame.render_widget(Clear, dialog_area);

    let accent = match confirm {
        Confirm::Quit => Color::Yellow,
        Confirm::ClearDraft => Color::Red,
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent))
        .title(Span::styled(
            title(confirm),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ));

    let text = Line::from(vec![
        Span::raw(prompt(confirm)),
        Span::styled("y", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        Span::raw("/"),
        Span::styled("n", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        Span::raw(")"),
    ]);

    let paragraph = Paragraph::new(text)
        .block(block)
        .style(Style::default().bg(Color::Black));

    frame.render_widget(paragraph, dialog_area);
}

/// Centered rectangle of the given size within `area`, clamped to fit.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let clamped_width = width.min(area.width);
    let clamped_height = height.min(area.height);

    let vertical = Layout::vertical([Constraint::Length(clamped_height)])
        .flex(Flex::Center)
        .split(area);

    let horizontal = Layout::horizontal([Constraint::Length(clamped_width)])
        .flex(Flex::Center)
        .split(vertical[0]);

    horizontal[0]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
