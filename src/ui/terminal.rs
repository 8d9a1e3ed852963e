//! Text front-end
//!
//! Draws the board from the local player's side and reads moves typed as
//! `row,col row,col` (e.g. `5,0 4,1`). Coordinates are board coordinates:
//! row 0 is Light's back row, Dark starts on rows 5 to 7.
//!
//! Input is read on a plain thread and handed to the turn loop through the
//! [`MoveSelector`]; events are printed from a second thread as the turn
//! loop reports them.

use std::io::{self, BufRead};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use checkers_engine::constants::BOARD_SIZE;
use checkers_engine::{Board, Move, Position, Side};
use thiserror::Error;
use tracing::debug;

use crate::game::error::GameResult;
use crate::game::resources::{GameClocks, GameOutcome, SharedBoard, TurnPhase};
use crate::game::systems::GameSession;
use crate::game::{GameEvent, MoveSelector};

/// Why a typed move could not be read
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseMoveError {
    #[error("expected two squares like `5,0 4,1`")]
    WrongShape,

    #[error("`{0}` is not a square like `5,0`")]
    BadSquare(String),
}

/// Parse `row,col row,col`
pub fn parse_move(line: &str) -> Result<Move, ParseMoveError> {
    let mut parts = line.split_whitespace();
    let (Some(from), Some(to), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(ParseMoveError::WrongShape);
    };
    Ok(Move::new(parse_square(from)?, parse_square(to)?))
}

fn parse_square(text: &str) -> Result<Position, ParseMoveError> {
    let bad = || ParseMoveError::BadSquare(text.to_string());
    let (row, col) = text.split_once(',').ok_or_else(bad)?;
    let row: i8 = row.trim().parse().map_err(|_| bad())?;
    let col: i8 = col.trim().parse().map_err(|_| bad())?;
    Position::try_new(row, col).map_err(|_| bad())
}

/// Format time as MM:SS
pub fn format_clock(time: Duration) -> String {
    let total_seconds = time.as_secs();
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Board as text, local player's pieces at the bottom
///
/// Dark pieces are `d`/`D`, Light pieces `l`/`L`, kings upper case.
pub fn render_board(board: &Board) -> String {
    let flipped = board.local_side() == Side::Light;
    let square = |row: i8, col: i8| {
        let pos = Position::new(row, col);
        if flipped {
            pos.reflected()
        } else {
            pos
        }
    };

    let mut out = String::from("   ");
    for col in 0..BOARD_SIZE {
        out.push_str(&format!(" {}", square(0, col).col));
    }
    out.push('\n');

    for row in 0..BOARD_SIZE {
        out.push_str(&format!(" {} ", square(row, 0).row));
        for col in 0..BOARD_SIZE {
            let pos = square(row, col);
            let cell = match board.piece_at(pos) {
                Some(piece) => piece.symbol(),
                None if pos.is_playable() => '.',
                None => ' ',
            };
            out.push(' ');
            out.push(cell);
        }
        out.push('\n');
    }
    out
}

fn print_status(board: &Board, clocks: &GameClocks) {
    println!("{}", render_board(board));
    println!(
        "Dark {}  Light {}",
        format_clock(clocks.get(Side::Dark).remaining()),
        format_clock(clocks.get(Side::Light).remaining())
    );
    let phase = TurnPhase::for_board(board);
    if phase.accepts_local_input() {
        match board.continuation() {
            Some(pos) => println!("Continue capturing with {}:", pos),
            None => println!("Your move ({}):", board.local_side()),
        }
    } else if !phase.is_terminal() {
        println!("Waiting for opponent...");
    }
}

/// Play a session from the terminal until it ends
pub async fn run_terminal(session: GameSession) -> GameResult<GameOutcome> {
    let GameSession {
        runner,
        selector,
        events,
        opponent,
    } = session;
    let board = runner.board();
    let clocks = runner.clocks();

    println!("Playing against {} ({})", opponent.username, opponent.rating);
    print_status(&board.snapshot(), &clocks);

    spawn_input_thread(selector);
    spawn_event_thread(events, board, clocks);

    runner.run().await
}

fn spawn_input_thread(selector: MoveSelector) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if line.trim().is_empty() {
                continue;
            }
            match parse_move(&line) {
                Ok(mv) => {
                    if selector.blocking_select(mv).is_err() {
                        break;
                    }
                }
                Err(e) => println!("{}", e),
            }
        }
        debug!("[UI] Input thread finished");
    });
}

fn spawn_event_thread(
    events: crossbeam_channel::Receiver<GameEvent>,
    board: SharedBoard,
    clocks: Arc<GameClocks>,
) {
    thread::spawn(move || {
        for event in events.iter() {
            match event {
                GameEvent::MoveApplied { side, mv, .. } => {
                    println!("{} plays {}", side, mv);
                    print_status(&board.snapshot(), &clocks);
                }
                GameEvent::GameOver(outcome) => {
                    println!("Game over: {}", outcome);
                    break;
                }
                GameEvent::Aborted { reason } => {
                    println!("Game aborted: {}", reason);
                    break;
                }
            }
        }
    });
}
