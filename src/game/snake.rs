use super::direction::Direction;
use super::grid::Cell;

/// The snake: an ordered chain of cells with the head at index 0
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, head first
    pub body: Vec<Cell>,
    /// Direction the snake moved with on the last tick
    pub direction: Direction,
}

impl Snake {
    /// Create a new snake with the given head position and direction.
    /// The body extends behind the head, opposite the direction of travel.
    pub fn new(head: Cell, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        let (dx, dy) = direction.delta();
        let (back_dx, back_dy) = (-dx, -dy);

        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_by(back_dx, back_dy));
        }

        Self { body, direction }
    }

    /// Get the head cell
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Get the tail cell (last segment)
    pub fn tail(&self) -> Cell {
        *self.body.last().expect("snake body is never empty")
    }

    /// Check if a cell is occupied by any segment, head included
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Advance one cell in the current direction, growing if `grow` is true.
    /// The caller has already validated the new head cell.
    pub fn advance(&mut self, grow: bool) {
        let new_head = self.head().moved_in_direction(self.direction);
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Cell::new(5, 10), Direction::Right, 3);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Cell::new(5, 10));
        assert_eq!(snake.body[1], Cell::new(4, 10));
        assert_eq!(snake.body[2], Cell::new(3, 10));
        assert_eq!(snake.tail(), Cell::new(3, 10));
    }

    #[test]
    fn test_advance_conserves_length() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Right, 3);

        snake.advance(false);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Cell::new(6, 5));
        assert_eq!(snake.tail(), Cell::new(4, 5));
    }

    #[test]
    fn test_advance_with_growth() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Right, 3);

        snake.advance(true);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Cell::new(6, 5));
        assert_eq!(snake.tail(), Cell::new(3, 5));
    }

    #[test]
    fn test_occupancy() {
        let snake = Snake::new(Cell::new(5, 5), Direction::Right, 3);
        assert!(snake.occupies(Cell::new(5, 5)));
        assert!(snake.occupies(Cell::new(4, 5)));
        assert!(snake.occupies(Cell::new(3, 5)));
        assert!(!snake.occupies(Cell::new(6, 5)));
        assert!(!snake.occupies(Cell::new(10, 10)));
    }
}
