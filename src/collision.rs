use crate::snake::Snake;

/// Why a run ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Collision {
    /// The head left the board.
    Wall,
    /// The head landed on one of the snake's own segments.
    Body,
}

/// Inspects the head after a move. `Some` means the run is over.
#[must_use]
pub fn check(snake: &Snake, tile_count: u16) -> Option<Collision> {
    if !snake.head().is_within_bounds(tile_count) {
        return Some(Collision::Wall);
    }

    if snake.head_overlaps_body() {
        return Some(Collision::Body);
    }

    None
}

#[cfg(test)]
mod tests {
    use crate::input::Direction;
    use crate::snake::{Cell, Snake};

    use super::{Collision, check};

    #[test]
    fn head_past_each_edge_hits_the_wall() {
        for head in [
            Cell::new(20, 4),
            Cell::new(-1, 4),
            Cell::new(4, 20),
            Cell::new(4, -1),
        ] {
            let snake = Snake::new(head, Direction::Right);
            assert_eq!(check(&snake, 20), Some(Collision::Wall), "head at {head:?}");
        }
    }

    #[test]
    fn head_on_body_is_a_collision() {
        let snake = Snake::from_segments(
            vec![
                Cell::new(2, 2),
                Cell::new(2, 3),
                Cell::new(3, 3),
                Cell::new(3, 2),
                Cell::new(2, 2),
            ],
            Direction::Up,
        );

        assert_eq!(check(&snake, 10), Some(Collision::Body));
    }

    #[test]
    fn free_head_is_not_a_collision() {
        let snake = Snake::from_segments(
            vec![Cell::new(0, 0), Cell::new(1, 0), Cell::new(2, 0)],
            Direction::Left,
        );

        assert_eq!(check(&snake, 10), None);
    }
}
