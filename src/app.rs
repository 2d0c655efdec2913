use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::{Duration, Instant};
use tokio::time::interval;

use crate::game::{FrameClock, GameConfig, GameEngine, GamePhase};
use crate::input::{InputHandler, KeyAction};
use crate::persistence::BestScoreStore;
use crate::render::Renderer;
use crate::stats::SessionStats;

/// Render cadence; simulation ticks are decided per frame by [`FrameClock`]
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

pub struct App {
    engine: GameEngine,
    clock: FrameClock,
    stats: SessionStats,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl App {
    pub fn new(config: GameConfig, store: Box<dyn BestScoreStore>) -> Self {
        Self {
            engine: GameEngine::new(config, store),
            clock: FrameClock::new(),
            stats: SessionStats::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Restore the terminal on every exit path
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut frame_timer = interval(FRAME_INTERVAL);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // One display frame: maybe tick, then draw
                _ = frame_timer.tick() => {
                    self.on_frame(Instant::now());
                    terminal.draw(|frame| {
                        self.renderer.render(frame, self.engine.state(), &self.stats);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Advance the simulation for one display frame. At most one tick fires
    /// per frame no matter how late the frame is.
    fn on_frame(&mut self, now: Instant) {
        if self.engine.state().phase != GamePhase::Running {
            return;
        }

        self.stats.update();

        if self.clock.should_tick(now, self.engine.interval()) {
            self.engine.tick();
            if self.engine.state().phase == GamePhase::GameOver {
                self.stats.on_game_over();
            }
        }
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Direction(direction) => {
                    self.engine.set_pending_direction(direction);
                }
                KeyAction::TogglePause => {
                    self.engine.toggle_pause();
                    // Resuming restarts the interval instead of firing a
                    // tick for the time spent paused.
                    self.clock.reset();
                }
                KeyAction::Restart => {
                    self.reset_game();
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }
    }

    fn reset_game(&mut self) {
        self.engine.reset();
        self.clock.reset();
        self.stats.on_game_start();
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
