use std::time::Duration;

use log::{error, info};
use rand::rngs::ThreadRng;

use crate::persistence::BestScoreStore;

use super::{
    config::GameConfig,
    direction::Direction,
    food::spawn_food,
    grid::{Cell, Grid},
    snake::Snake,
};

/// What the snake ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Lifecycle of a single game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Running,
    Paused,
    GameOver,
}

/// Complete simulation state, read-only outside the engine
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub grid: Grid,
    pub snake: Snake,
    /// `None` only in the board-full terminal state
    pub food: Option<Cell>,
    pub score: u32,
    /// Highest score seen this session or loaded from the store
    pub best: u32,
    /// Current milliseconds between ticks
    pub interval_ms: u64,
    pub ticks: u32,
    pub phase: GamePhase,
}

/// What happened on one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// Whether the snake ate food this tick
    pub ate: bool,
    /// Collision that ended the game, if any
    pub collision: Option<CollisionType>,
}

/// The game engine: owns the state and is its only mutation path.
///
/// Input handlers call [`set_pending_direction`](Self::set_pending_direction),
/// [`toggle_pause`](Self::toggle_pause) and [`reset`](Self::reset); the frame
/// loop calls [`tick`](Self::tick). The renderer only ever sees
/// [`state`](Self::state).
pub struct GameEngine {
    config: GameConfig,
    grid: Grid,
    state: GameState,
    /// Most recent valid direction request, committed at the next tick
    pending: Option<Direction>,
    store: Box<dyn BestScoreStore>,
    rng: ThreadRng,
}

impl GameEngine {
    /// Create an engine with a fresh game. Reads the best score from the
    /// store once, here and never again.
    pub fn new(config: GameConfig, store: Box<dyn BestScoreStore>) -> Self {
        let grid = Grid::new(config.grid_width, config.grid_height);
        let best = store.load();
        let mut rng = rand::thread_rng();

        let snake = Self::initial_snake(&config);
        let food = spawn_food(grid, &snake, &mut rng);

        let state = GameState {
            grid,
            snake,
            food,
            score: 0,
            best,
            interval_ms: config.initial_interval_ms,
            ticks: 0,
            phase: GamePhase::Running,
        };

        Self {
            config,
            grid,
            state,
            pending: None,
            store,
            rng,
        }
    }

    fn initial_snake(config: &GameConfig) -> Snake {
        Snake::new(config.spawn, Direction::Right, config.initial_snake_length)
    }

    /// Read-only snapshot for the renderer
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Test hook for staging specific board positions
    #[cfg(test)]
    pub(crate) fn state_mut_for_tests(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Current time between ticks
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.state.interval_ms)
    }

    /// Buffer a direction change for the next tick.
    ///
    /// One-deep: the most recent valid request wins. A request opposite to
    /// the committed direction is ignored and leaves the pending value
    /// unchanged; requests after game over are ignored entirely. Requests
    /// while paused are buffered but do not resume the game.
    pub fn set_pending_direction(&mut self, direction: Direction) {
        if self.state.phase == GamePhase::GameOver {
            return;
        }
        if self.state.snake.direction.is_opposite(direction) {
            return;
        }
        self.pending = Some(direction);
    }

    /// Suspend the game. Idempotent; no effect after game over.
    pub fn pause(&mut self) {
        if self.state.phase == GamePhase::Running {
            self.state.phase = GamePhase::Paused;
        }
    }

    /// Resume a paused game. Idempotent; no effect after game over.
    pub fn resume(&mut self) {
        if self.state.phase == GamePhase::Paused {
            self.state.phase = GamePhase::Running;
        }
    }

    /// Flip Running <-> Paused. No effect after game over.
    pub fn toggle_pause(&mut self) {
        match self.state.phase {
            GamePhase::Running => self.pause(),
            GamePhase::Paused => self.resume(),
            GamePhase::GameOver => {}
        }
    }

    /// Start a fresh game: initial snake, new food, zero score, initial
    /// interval. The best score survives.
    pub fn reset(&mut self) {
        let snake = Self::initial_snake(&self.config);
        let food = spawn_food(self.grid, &snake, &mut self.rng);

        self.state = GameState {
            grid: self.grid,
            snake,
            food,
            score: 0,
            best: self.state.best,
            interval_ms: self.config.initial_interval_ms,
            ticks: 0,
            phase: GamePhase::Running,
        };
        self.pending = None;
    }

    /// Advance the simulation by one step. No-op unless Running.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state.phase != GamePhase::Running {
            return TickOutcome::default();
        }

        // Commit the buffered direction. The reversal guard also ran at
        // request time; it repeats here so a stale buffer can never turn
        // the snake back on itself.
        if let Some(direction) = self.pending.take() {
            if !self.state.snake.direction.is_opposite(direction) {
                self.state.snake.direction = direction;
            }
        }

        let new_head = self
            .state
            .snake
            .head()
            .moved_in_direction(self.state.snake.direction);

        // Collision is checked against the full current body, before the
        // tail drops. Moving into the cell the tail is vacating this tick
        // therefore counts as a collision.
        if let Some(collision) = self.check_collision(new_head) {
            self.game_over();
            self.state.ticks += 1;
            return TickOutcome {
                ate: false,
                collision: Some(collision),
            };
        }

        let ate = self.state.food == Some(new_head);
        self.state.snake.advance(ate);

        if ate {
            self.state.score += 1;
            self.state.interval_ms = self
                .config
                .min_interval_ms
                .max(self.state.interval_ms.saturating_sub(self.config.interval_step_ms));

            self.state.food = spawn_food(self.grid, &self.state.snake, &mut self.rng);
            if self.state.food.is_none() {
                // The snake covers the board. Nothing left to eat.
                info!("board full at score {}", self.state.score);
                self.game_over();
            }
        }

        self.state.ticks += 1;

        TickOutcome {
            ate,
            collision: None,
        }
    }

    fn check_collision(&self, cell: Cell) -> Option<CollisionType> {
        if !self.grid.contains(cell) {
            return Some(CollisionType::Wall);
        }
        if self.state.snake.occupies(cell) {
            return Some(CollisionType::SelfCollision);
        }
        None
    }

    /// One-way transition to GameOver. This is the only place the best
    /// score is written back to the store.
    fn game_over(&mut self) {
        self.state.phase = GamePhase::GameOver;
        self.state.best = self.state.best.max(self.state.score);

        info!(
            "game over: score {}, best {}",
            self.state.score, self.state.best
        );
        if let Err(e) = self.store.save(self.state.best) {
            error!("failed to save best score: {e:#}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    fn engine_with_store(config: GameConfig) -> (GameEngine, MemoryStore) {
        let store = MemoryStore::default();
        let engine = GameEngine::new(config, Box::new(store.clone()));
        (engine, store)
    }

    fn engine(config: GameConfig) -> GameEngine {
        engine_with_store(config).0
    }

    fn assert_no_duplicate_cells(state: &GameState) {
        let body = &state.snake.body;
        for (i, a) in body.iter().enumerate() {
            for b in body.iter().skip(i + 1) {
                assert_ne!(a, b, "duplicate snake cell {a:?}");
            }
        }
    }

    #[test]
    fn test_initial_state() {
        let eng = engine(GameConfig::default());
        let state = eng.state();

        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.ticks, 0);
        assert_eq!(state.interval_ms, 160);
        assert_eq!(
            state.snake.body,
            vec![Cell::new(5, 10), Cell::new(4, 10), Cell::new(3, 10)]
        );
        let food = state.food.expect("fresh game has food");
        assert!(!state.snake.occupies(food));
    }

    #[test]
    fn test_plain_move_conserves_length() {
        let mut eng = engine(GameConfig::default());
        // Park the food out of the snake's path.
        eng.state.food = Some(Cell::new(0, 0));

        let outcome = eng.tick();

        assert!(!outcome.ate);
        assert_eq!(outcome.collision, None);
        assert_eq!(eng.state.snake.len(), 3);
        assert_eq!(eng.state.snake.head(), Cell::new(6, 10));
        assert_eq!(eng.state.score, 0);
        assert_eq!(eng.state.ticks, 1);
        assert_no_duplicate_cells(eng.state());
    }

    #[test]
    fn test_eating_grows_scores_and_speeds_up() {
        // Default layout [(5,10),(4,10),(3,10)] heading right, food at (6,10).
        let mut eng = engine(GameConfig::default());
        eng.state.food = Some(Cell::new(6, 10));

        let outcome = eng.tick();

        assert!(outcome.ate);
        assert_eq!(
            eng.state.snake.body,
            vec![Cell::new(6, 10), Cell::new(5, 10), Cell::new(4, 10)]
        );
        assert_eq!(eng.state.score, 1);
        assert_eq!(eng.state.interval_ms, 154);

        let food = eng.state.food.expect("food respawned");
        assert!(!eng.state.snake.occupies(food));
        assert_no_duplicate_cells(eng.state());
    }

    #[test]
    fn test_interval_floor() {
        let mut eng = engine(GameConfig::default());
        eng.state.interval_ms = 73;
        eng.state.food = Some(Cell::new(6, 10));

        eng.tick();

        // 73 - 6 would undershoot the 70 ms floor.
        assert_eq!(eng.state.interval_ms, 70);
    }

    #[test]
    fn test_wall_collision_ends_game_and_persists_best() {
        let (mut eng, store) = engine_with_store(GameConfig::default());
        eng.state.snake = Snake::new(Cell::new(0, 10), Direction::Left, 3);
        eng.state.score = 4;
        eng.state.food = Some(Cell::new(9, 9));

        let outcome = eng.tick();

        assert_eq!(outcome.collision, Some(CollisionType::Wall));
        assert_eq!(eng.state.phase, GamePhase::GameOver);
        assert_eq!(eng.state.best, 4);
        assert_eq!(store.best(), 4);
        assert_eq!(store.saves(), 1);
        // Snake is untouched by the losing move.
        assert_eq!(eng.state.snake.head(), Cell::new(0, 10));
    }

    #[test]
    fn test_best_never_decreases() {
        let store = MemoryStore::new(10);
        let mut eng = GameEngine::new(GameConfig::default(), Box::new(store.clone()));
        assert_eq!(eng.state.best, 10);

        eng.state.snake = Snake::new(Cell::new(0, 10), Direction::Left, 3);
        eng.state.score = 3;
        eng.tick();

        assert_eq!(eng.state.best, 10);
        assert_eq!(store.best(), 10);
    }

    #[test]
    fn test_self_collision() {
        let mut eng = engine(GameConfig::small());
        eng.state.snake = Snake::new(Cell::new(5, 5), Direction::Right, 5);
        eng.state.food = Some(Cell::new(9, 9));

        // Loop back into the body: right, down, left, up.
        eng.tick();
        eng.set_pending_direction(Direction::Down);
        eng.tick();
        eng.set_pending_direction(Direction::Left);
        eng.tick();
        eng.set_pending_direction(Direction::Up);
        let outcome = eng.tick();

        assert_eq!(outcome.collision, Some(CollisionType::SelfCollision));
        assert_eq!(eng.state.phase, GamePhase::GameOver);
    }

    #[test]
    fn tail_vacate_move_is_a_collision() {
        // Head circles back onto the tail cell. Even though the tail would
        // vacate it this tick, the rule here is that it still collides.
        let mut eng = engine(GameConfig::small());
        eng.state.snake = Snake {
            body: vec![
                Cell::new(5, 6),
                Cell::new(6, 6),
                Cell::new(6, 5),
                Cell::new(5, 5),
            ],
            direction: Direction::Left,
        };
        eng.state.food = Some(Cell::new(9, 9));

        eng.set_pending_direction(Direction::Up);
        let outcome = eng.tick();

        assert_eq!(outcome.collision, Some(CollisionType::SelfCollision));
        assert_eq!(eng.state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_reversal_request_is_ignored() {
        let mut eng = engine(GameConfig::default());
        eng.state.food = Some(Cell::new(0, 0));

        // Committed direction is Right; Left must not stick.
        eng.set_pending_direction(Direction::Left);
        assert_eq!(eng.pending, None);

        eng.tick();
        assert_eq!(eng.state.snake.head(), Cell::new(6, 10));
        assert_eq!(eng.state.snake.direction, Direction::Right);
    }

    #[test]
    fn test_reversal_does_not_clobber_pending() {
        let mut eng = engine(GameConfig::default());
        eng.state.food = Some(Cell::new(0, 0));

        eng.set_pending_direction(Direction::Up);
        eng.set_pending_direction(Direction::Left); // ignored
        assert_eq!(eng.pending, Some(Direction::Up));

        eng.tick();
        assert_eq!(eng.state.snake.direction, Direction::Up);
        assert_eq!(eng.state.snake.head(), Cell::new(5, 9));
    }

    #[test]
    fn test_latest_pending_direction_wins() {
        let mut eng = engine(GameConfig::default());
        eng.state.food = Some(Cell::new(0, 0));

        eng.set_pending_direction(Direction::Up);
        eng.set_pending_direction(Direction::Down);
        eng.tick();

        assert_eq!(eng.state.snake.direction, Direction::Down);
    }

    #[test]
    fn test_pause_is_idempotent_and_freezes_ticks() {
        let mut eng = engine(GameConfig::default());

        eng.pause();
        eng.pause();
        assert_eq!(eng.state.phase, GamePhase::Paused);

        let before = eng.state.clone();
        let outcome = eng.tick();
        assert_eq!(outcome, TickOutcome::default());
        assert_eq!(*eng.state(), before);

        // Direction input while paused buffers but does not resume.
        eng.set_pending_direction(Direction::Up);
        assert_eq!(eng.state.phase, GamePhase::Paused);
        assert_eq!(eng.pending, Some(Direction::Up));

        eng.toggle_pause();
        assert_eq!(eng.state.phase, GamePhase::Running);
    }

    #[test]
    fn test_pause_has_no_effect_after_game_over() {
        let mut eng = engine(GameConfig::default());
        eng.state.snake = Snake::new(Cell::new(0, 10), Direction::Left, 3);
        eng.state.food = Some(Cell::new(9, 9));
        eng.tick();

        assert_eq!(eng.state.phase, GamePhase::GameOver);
        eng.toggle_pause();
        assert_eq!(eng.state.phase, GamePhase::GameOver);
        eng.set_pending_direction(Direction::Up);
        assert_eq!(eng.pending, None);
    }

    #[test]
    fn test_game_over_freezes_state() {
        let mut eng = engine(GameConfig::default());
        eng.state.snake = Snake::new(Cell::new(0, 10), Direction::Left, 3);
        eng.state.food = Some(Cell::new(9, 9));
        eng.tick();

        let frozen = eng.state.clone();
        eng.tick();
        assert_eq!(*eng.state(), frozen);
    }

    #[test]
    fn test_reset_restores_fresh_game() {
        let mut eng = engine(GameConfig::default());
        eng.state.snake = Snake::new(Cell::new(0, 10), Direction::Left, 3);
        eng.state.score = 7;
        eng.state.interval_ms = 100;
        eng.state.food = Some(Cell::new(9, 9));
        eng.tick();
        assert_eq!(eng.state.phase, GamePhase::GameOver);

        eng.reset();

        let state = eng.state();
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.ticks, 0);
        assert_eq!(state.interval_ms, 160);
        assert_eq!(
            state.snake.body,
            vec![Cell::new(5, 10), Cell::new(4, 10), Cell::new(3, 10)]
        );
        assert_eq!(state.best, 7, "best survives reset");
        let food = state.food.expect("reset regenerates food");
        assert!(!state.snake.occupies(food));
    }

    #[test]
    fn test_no_duplicate_cells_over_a_long_run() {
        let mut eng = engine(GameConfig::default());
        let turns = [
            Direction::Down,
            Direction::Left,
            Direction::Up,
            Direction::Right,
        ];

        for i in 0..200 {
            if eng.state.phase == GamePhase::GameOver {
                break;
            }
            if i % 3 == 0 {
                eng.set_pending_direction(turns[(i / 3) % turns.len()]);
            }
            let len_before = eng.state.snake.len();
            let outcome = eng.tick();

            if eng.state.phase != GamePhase::GameOver {
                assert_no_duplicate_cells(eng.state());
                let expected = if outcome.ate { len_before + 1 } else { len_before };
                assert_eq!(eng.state.snake.len(), expected);
                let food = eng.state.food.expect("food present while live");
                assert!(!eng.state.snake.occupies(food));
            }
        }
    }
}
