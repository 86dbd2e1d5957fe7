// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into `UserCommand`s applied to the draft
// session, or into local `ViewState` changes (highlight movement, search
// entry, confirmation prompts).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use draftboard_core::session::{Mode, PositionFilter};

use super::{Confirm, UserCommand, ViewState};

/// Rows moved by PageUp/PageDown.
const PAGE_SIZE: usize = 20;

/// Handle a keyboard event.
///
/// `mode` and `search` are the session's current mode and search text; keys
/// that edit the search box produce the full new text.
pub fn handle_key(
    key_event: KeyEvent,
    view_state: &mut ViewState,
    mode: Mode,
    search: &str,
) -> Option<UserCommand> {
    // Windows reports both Press and Release for each key.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    if let Some(confirm) = view_state.confirm {
        return handle_confirm(key_event, view_state, confirm);
    }

    if view_state.search_mode {
        return handle_search_mode(key_event, view_state, search);
    }

    match key_event.code {
        KeyCode::Char('q') => {
            view_state.confirm = Some(Confirm::Quit);
            None
        }
        KeyCode::Char('b') => Some(UserCommand::SetMode(Mode::BigBoard)),
        KeyCode::Char('d') => Some(UserCommand::SetMode(Mode::DraftMode)),
        KeyCode::Char('g') => Some(UserCommand::SetMode(Mode::Guidance)),
        _ => match mode {
            Mode::Guidance => handle_guidance_key(key_event, view_state),
            Mode::BigBoard | Mode::DraftMode => handle_board_key(key_event, view_state, mode),
        },
    }
}

/// Keys for the player board (big board and draft mode).
fn handle_board_key(
    key_event: KeyEvent,
    view_state: &mut ViewState,
    mode: Mode,
) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char(c @ '0'..='6') => {
            let idx = c as usize - '0' as usize;
            Some(UserCommand::SetPosition(PositionFilter::TABS[idx]))
        }
        KeyCode::Tab => Some(UserCommand::NextPosition),
        KeyCode::BackTab => Some(UserCommand::PrevPosition),
        KeyCode::Char('s') => Some(UserCommand::ToggleSort),
        KeyCode::Char('/') => {
            view_state.search_mode = true;
            None
        }
        KeyCode::Esc => Some(UserCommand::ClearFilters),

        KeyCode::Up | KeyCode::Char('k') => {
            view_state.selected = view_state.selected.saturating_sub(1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            view_state.selected = view_state.selected.saturating_add(1);
            None
        }
        KeyCode::PageUp => {
            view_state.selected = view_state.selected.saturating_sub(PAGE_SIZE);
            None
        }
        KeyCode::PageDown => {
            view_state.selected = view_state.selected.saturating_add(PAGE_SIZE);
            None
        }
        KeyCode::Home => {
            view_state.selected = 0;
            None
        }
        // Clamped to the last row by the caller.
        KeyCode::End => {
            view_state.selected = usize::MAX;
            None
        }

        KeyCode::Char('m') if mode == Mode::DraftMode => Some(UserCommand::MarkMine),
        KeyCode::Char('t') if mode == Mode::DraftMode => Some(UserCommand::MarkTaken),
        KeyCode::Char('u') if mode == Mode::DraftMode => Some(UserCommand::ResetPick),
        KeyCode::Char('v') if mode == Mode::DraftMode => Some(UserCommand::NextViewFilter),
        KeyCode::Char('C') if mode == Mode::DraftMode => {
            view_state.confirm = Some(Confirm::ClearDraft);
            None
        }

        _ => None,
    }
}

/// Keys for the guidance panel.
fn handle_guidance_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('T') => Some(UserCommand::ToggleTeamCount),
        KeyCode::Left | KeyCode::Char('h') => Some(UserCommand::PrevSlot),
        KeyCode::Right | KeyCode::Char('l') => Some(UserCommand::NextSlot),
        KeyCode::Up | KeyCode::Char('k') => {
            view_state.guidance_scroll = view_state.guidance_scroll.saturating_sub(1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            view_state.guidance_scroll = view_state.guidance_scroll.saturating_add(1);
            None
        }
        _ => None,
    }
}

/// Handle key events while a confirmation prompt is open.
///
/// `y` confirms (as does `q` for the quit prompt), `n` or Esc cancels, and
/// every other key is swallowed.
fn handle_confirm(
    key_event: KeyEvent,
    view_state: &mut ViewState,
    confirm: Confirm,
) -> Option<UserCommand> {
    match (key_event.code, confirm) {
        (KeyCode::Char('y') | KeyCode::Char('Y'), Confirm::Quit)
        | (KeyCode::Char('q') | KeyCode::Char('Q'), Confirm::Quit) => Some(UserCommand::Quit),
        (KeyCode::Char('y') | KeyCode::Char('Y'), Confirm::ClearDraft) => {
            view_state.confirm = None;
            Some(UserCommand::ClearDraft)
        }
        (KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc, _) => {
            view_state.confirm = None;
            None
        }
        _ => None,
    }
}

/// Handle key events while typing into the search box.
///
/// Printable characters and Backspace edit the text live; Enter keeps it and
/// Esc clears it. Both leave search mode.
fn handle_search_mode(
    key_event: KeyEvent,
    view_state: &mut ViewState,
    search: &str,
) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Esc => {
            view_state.search_mode = false;
            Some(UserCommand::SetSearch(String::new()))
        }
        KeyCode::Enter => {
            view_state.search_mode = false;
            None
        }
        KeyCode::Backspace => {
            let mut chars = search.chars();
            chars.next_back()?;
            Some(UserCommand::SetSearch(chars.as_str().to_string()))
        }
        KeyCode::Char(c) => Some(UserCommand::SetSearch(format!("{search}{c}"))),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, KeyModifiers};
    use draftboard_core::catalog::Position;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn ctrl_key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn board(code: KeyCode, state: &mut ViewState) -> Option<UserCommand> {
        handle_key(key(code), state, Mode::BigBoard, "")
    }

    fn draft(code: KeyCode, state: &mut ViewState) -> Option<UserCommand> {
        handle_key(key(code), state, Mode::DraftMode, "")
    }

    // -- Modes --

    #[test]
    fn mode_keys() {
        let mut state = ViewState::default();
        assert_eq!(
            board(KeyCode::Char('d'), &mut state),
            Some(UserCommand::SetMode(Mode::DraftMode))
        );
        assert_eq!(
            draft(KeyCode::Char('g'), &mut state),
            Some(UserCommand::SetMode(Mode::Guidance))
        );
        assert_eq!(
            handle_key(key(KeyCode::Char('b')), &mut state, Mode::Guidance, ""),
            Some(UserCommand::SetMode(Mode::BigBoard))
        );
    }

    #[test]
    fn release_events_are_ignored() {
        let mut state = ViewState::default();
        let mut event = key(KeyCode::Char('d'));
        event.kind = KeyEventKind::Release;
        assert_eq!(handle_key(event, &mut state, Mode::BigBoard, ""), None);
    }

    // -- Position tabs --

    #[test]
    fn digit_keys_select_position_tabs() {
        let mut state = ViewState::default();
        assert_eq!(
            board(KeyCode::Char('0'), &mut state),
            Some(UserCommand::SetPosition(PositionFilter::All))
        );
        assert_eq!(
            board(KeyCode::Char('2'), &mut state),
            Some(UserCommand::SetPosition(PositionFilter::Only(Position::RunningBack)))
        );
        assert_eq!(
            board(KeyCode::Char('6'), &mut state),
            Some(UserCommand::SetPosition(PositionFilter::Only(Position::Kicker)))
        );
        assert_eq!(board(KeyCode::Char('7'), &mut state), None);
    }

    #[test]
    fn tab_cycles_positions() {
        let mut state = ViewState::default();
        assert_eq!(board(KeyCode::Tab, &mut state), Some(UserCommand::NextPosition));
        assert_eq!(board(KeyCode::BackTab, &mut state), Some(UserCommand::PrevPosition));
    }

    #[test]
    fn esc_clears_filters() {
        let mut state = ViewState::default();
        assert_eq!(board(KeyCode::Esc, &mut state), Some(UserCommand::ClearFilters));
    }

    // -- Highlight movement --

    #[test]
    fn arrows_move_selection() {
        let mut state = ViewState::default();
        assert!(board(KeyCode::Down, &mut state).is_none());
        assert!(board(KeyCode::Char('j'), &mut state).is_none());
        assert_eq!(state.selected, 2);
        board(KeyCode::Up, &mut state);
        assert_eq!(state.selected, 1);
        board(KeyCode::Char('k'), &mut state);
        board(KeyCode::Char('k'), &mut state);
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn page_keys_move_by_page() {
        let mut state = ViewState::default();
        board(KeyCode::PageDown, &mut state);
        assert_eq!(state.selected, PAGE_SIZE);
        state.selected = 25;
        board(KeyCode::PageUp, &mut state);
        assert_eq!(state.selected, 5);
        board(KeyCode::End, &mut state);
        assert_eq!(state.selected, usize::MAX);
        board(KeyCode::Home, &mut state);
        assert_eq!(state.selected, 0);
    }

    // -- Draft operations --

    #[test]
    fn draft_keys_only_in_draft_mode() {
        for code in ['m', 't', 'u', 'v'] {
            let mut state = ViewState::default();
            assert_eq!(board(KeyCode::Char(code), &mut state), None, "{code} on big board");
        }
        let mut state = ViewState::default();
        assert_eq!(draft(KeyCode::Char('m'), &mut state), Some(UserCommand::MarkMine));
        assert_eq!(draft(KeyCode::Char('t'), &mut state), Some(UserCommand::MarkTaken));
        assert_eq!(draft(KeyCode::Char('u'), &mut state), Some(UserCommand::ResetPick));
        assert_eq!(draft(KeyCode::Char('v'), &mut state), Some(UserCommand::NextViewFilter));
    }

    #[test]
    fn clear_draft_needs_confirmation() {
        let mut state = ViewState::default();
        assert_eq!(draft(KeyCode::Char('C'), &mut state), None);
        assert_eq!(state.confirm, Some(Confirm::ClearDraft));
        // Other keys are swallowed while the prompt is open.
        assert_eq!(draft(KeyCode::Char('m'), &mut state), None);
        assert_eq!(draft(KeyCode::Char('y'), &mut state), Some(UserCommand::ClearDraft));
        assert!(state.confirm.is_none());
    }

    #[test]
    fn clear_draft_can_be_cancelled() {
        let mut state = ViewState::default();
        draft(KeyCode::Char('C'), &mut state);
        assert_eq!(draft(KeyCode::Char('n'), &mut state), None);
        assert!(state.confirm.is_none());
        draft(KeyCode::Char('C'), &mut state);
        // q does not confirm a clear.
        assert_eq!(draft(KeyCode::Char('q'), &mut state), None);
        assert_eq!(state.confirm, Some(Confirm::ClearDraft));
    }

    // -- Quit --

    #[test]
    fn q_asks_before_quitting() {
        let mut state = ViewState::default();
        assert_eq!(board(KeyCode::Char('q'), &mut state), None);
        assert_eq!(state.confirm, Some(Confirm::Quit));
        assert_eq!(board(KeyCode::Char('q'), &mut state), Some(UserCommand::Quit));
    }

    #[test]
    fn quit_prompt_esc_cancels() {
        let mut state = ViewState::default();
        board(KeyCode::Char('q'), &mut state);
        assert_eq!(board(KeyCode::Esc, &mut state), None);
        assert!(state.confirm.is_none());
    }

    #[test]
    fn ctrl_c_always_quits() {
        let mut state = ViewState {
            search_mode: true,
            ..ViewState::default()
        };
        assert_eq!(
            handle_key(ctrl_key(KeyCode::Char('c')), &mut state, Mode::BigBoard, "abc"),
            Some(UserCommand::Quit)
        );
        state.search_mode = false;
        state.confirm = Some(Confirm::ClearDraft);
        assert_eq!(
            handle_key(ctrl_key(KeyCode::Char('c')), &mut state, Mode::DraftMode, ""),
            Some(UserCommand::Quit)
        );
    }

    // -- Search --

    #[test]
    fn slash_enters_search_mode() {
        let mut state = ViewState::default();
        assert_eq!(board(KeyCode::Char('/'), &mut state), None);
        assert!(state.search_mode);
    }

    #[test]
    fn search_mode_types_into_search_text() {
        let mut state = ViewState {
            search_mode: true,
            ..ViewState::default()
        };
        assert_eq!(
            handle_key(key(KeyCode::Char('a')), &mut state, Mode::BigBoard, "ch"),
            Some(UserCommand::SetSearch("cha".into()))
        );
        // Mode keys are text while searching.
        assert_eq!(
            handle_key(key(KeyCode::Char('d')), &mut state, Mode::BigBoard, ""),
            Some(UserCommand::SetSearch("d".into()))
        );
    }

    #[test]
    fn search_mode_backspace() {
        let mut state = ViewState {
            search_mode: true,
            ..ViewState::default()
        };
        assert_eq!(
            handle_key(key(KeyCode::Backspace), &mut state, Mode::BigBoard, "Ja'"),
            Some(UserCommand::SetSearch("Ja".into()))
        );
        assert_eq!(
            handle_key(key(KeyCode::Backspace), &mut state, Mode::BigBoard, ""),
            None
        );
    }

    #[test]
    fn search_mode_enter_keeps_text_esc_clears() {
        let mut state = ViewState {
            search_mode: true,
            ..ViewState::default()
        };
        assert_eq!(
            handle_key(key(KeyCode::Enter), &mut state, Mode::BigBoard, "chase"),
            None
        );
        assert!(!state.search_mode);

        state.search_mode = true;
        assert_eq!(
            handle_key(key(KeyCode::Esc), &mut state, Mode::BigBoard, "chase"),
            Some(UserCommand::SetSearch(String::new()))
        );
        assert!(!state.search_mode);
    }

    // -- Guidance --

    #[test]
    fn guidance_keys_adjust_league() {
        let mut state = ViewState::default();
        let g = |code, state: &mut ViewState| handle_key(key(code), state, Mode::Guidance, "");
        assert_eq!(g(KeyCode::Char('T'), &mut state), Some(UserCommand::ToggleTeamCount));
        assert_eq!(g(KeyCode::Right, &mut state), Some(UserCommand::NextSlot));
        assert_eq!(g(KeyCode::Char('h'), &mut state), Some(UserCommand::PrevSlot));
        assert_eq!(g(KeyCode::Down, &mut state), None);
        assert_eq!(state.guidance_scroll, 1);
        // Board keys do nothing on the guidance panel.
        assert_eq!(g(KeyCode::Char('s'), &mut state), None);
        assert_eq!(g(KeyCode::Char('/'), &mut state), None);
        assert!(!state.search_mode);
    }
}
