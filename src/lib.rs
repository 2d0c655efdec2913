//! Terminal Snake
//!
//! A single-player Snake game split into:
//! - Pure simulation core (game module): grid, snake, food, tick engine
//! - Thin adapters: crossterm input (input), ratatui drawing (render),
//!   best-score storage (persistence)
//! - The frame-driven async loop wiring them together (app)

pub mod app;
pub mod game;
pub mod input;
pub mod persistence;
pub mod render;
pub mod stats;
