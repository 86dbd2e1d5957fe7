// Library root: the terminal front end for the draft board.

pub mod tui;
