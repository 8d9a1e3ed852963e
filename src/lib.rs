pub mod core;
pub mod game;
pub mod networking;
pub mod ui;

pub use checkers_engine as engine;
