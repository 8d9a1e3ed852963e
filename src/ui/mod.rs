//! UI module - text front-end
//!
//! - **terminal**: board rendering, move parsing and the stdin/stdout game loop

pub mod terminal;

pub use terminal::{format_clock, parse_move, render_board, run_terminal};
