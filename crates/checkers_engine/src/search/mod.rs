//! Adversarial search for the computer opponent
//!
//! Depth-bounded minimax with alpha-beta pruning over cloned boards.
//!
//! ## Module Organization
//!
//! - `alphabeta` - Recursive minimax with alpha-beta pruning
//! - `root` - Root move selection and search statistics

mod alphabeta;
mod root;

pub use alphabeta::minimax;
pub use root::{choose_move, search, SearchResult, SearchStats};
