//! Core game logic for Snake
//!
//! Everything in here is a pure simulation over a bounded integer grid: no
//! terminal I/O, no rendering, no clocks other than the instants the caller
//! hands in. The app module wires it to the real world.

pub mod clock;
pub mod config;
pub mod direction;
pub mod engine;
pub mod food;
pub mod grid;
pub mod snake;

// Re-export commonly used types
pub use clock::FrameClock;
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{CollisionType, GameEngine, GamePhase, GameState, TickOutcome};
pub use grid::{Cell, Grid};
pub use snake::Snake;
