use std::collections::VecDeque;

use crate::Cell;
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn offset(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }
}

/// The snake body, head first.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Cell>,
    direction: Direction,
}

impl Snake {
    /// Lays out `size` segments starting at `head` and trailing away from `direction`.
    pub fn new(head: Cell, size: usize, direction: Direction) -> Self {
        let diff = direction.offset();

        let body = (0..size as i32)
            .map(|i| (head.0 - diff.0 * i, head.1 - diff.1 * i))
            .collect();
        Snake { body, direction }
    }

    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    pub fn next_head(&self) -> Cell {
        let head = self.head();
        let (dx, dy) = self.direction.offset();
        (head.0 + dx, head.1 + dy)
    }

    /// Prepends `new_head`. The tail is dropped and returned unless `grow` is set.
    pub fn advance(&mut self, new_head: Cell, grow: bool) -> Option<Cell> {
        self.body.push_front(new_head);

        if grow {
            None
        } else {
            self.body.pop_back()
        }
    }

    /// Returns false when the change was rejected as a 180° turn.
    pub fn set_direction(&mut self, new_direction: Direction) -> bool {
        if new_direction == self.direction.opposite() {
            return false;
        }

        self.direction = new_direction;
        true
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(snake: &Snake) -> Vec<Cell> {
        snake.body().iter().copied().collect()
    }

    #[test]
    fn new_snake_trails_behind_head() {
        let snake = Snake::new((5, 5), 3, Right);
        assert_eq!(cells(&snake), vec![(5, 5), (4, 5), (3, 5)]);

        let snake = Snake::new((2, 2), 2, Up);
        assert_eq!(cells(&snake), vec![(2, 2), (2, 3)]);
    }

    #[test]
    fn next_head_follows_direction() {
        let mut snake = Snake::new((5, 5), 3, Right);
        assert_eq!(snake.next_head(), (6, 5));

        snake.set_direction(Up);
        assert_eq!(snake.next_head(), (5, 4));
        snake.set_direction(Left);
        assert_eq!(snake.next_head(), (4, 5));
        snake.set_direction(Down);
        assert_eq!(snake.next_head(), (5, 6));
    }

    #[test]
    fn advance_drops_tail_unless_growing() {
        let mut snake = Snake::new((5, 5), 3, Right);

        let tail = snake.advance((6, 5), false);
        assert_eq!(tail, Some((3, 5)));
        assert_eq!(cells(&snake), vec![(6, 5), (5, 5), (4, 5)]);

        let tail = snake.advance((7, 5), true);
        assert_eq!(tail, None);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), (7, 5));
    }

    #[test]
    fn reversal_is_rejected() {
        let mut snake = Snake::new((5, 5), 3, Right);
        assert!(!snake.set_direction(Left));
        assert_eq!(snake.direction(), Right);

        assert!(snake.set_direction(Up));
        assert!(!snake.set_direction(Down));
        assert_eq!(snake.direction(), Up);
    }

    #[test]
    fn last_write_wins_between_ticks() {
        let mut snake = Snake::new((5, 5), 3, Right);
        snake.set_direction(Up);
        snake.set_direction(Left);
        assert_eq!(snake.direction(), Left);
    }
}
