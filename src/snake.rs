use crate::input::{Direction, direction_change_is_valid};

/// Grid position in logical cell coordinates.
///
/// Coordinates are signed so a head that has just left the board is still
/// representable until the collision check sees it.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the cell lies on a `tile_count` × `tile_count` board.
    #[must_use]
    pub fn is_within_bounds(self, tile_count: u16) -> bool {
        let side = i32::from(tile_count);
        self.x >= 0 && self.y >= 0 && self.x < side && self.y < side
    }

    /// Returns the neighbouring cell one step along `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.vector();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Snake body plus its current and pending heading.
///
/// Segments after the head are stored as `Option<Cell>`: a segment added by
/// [`Snake::grow`] has no position until the next [`Snake::move_forward`]
/// shifts its predecessor's cell into it.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    head: Cell,
    body: Vec<Option<Cell>>,
    direction: Direction,
    pending_direction: Direction,
}

impl Snake {
    /// Creates a one-cell snake at `start` heading in `direction`.
    #[must_use]
    pub fn new(start: Cell, direction: Direction) -> Self {
        Self {
            head: start,
            body: Vec::new(),
            direction,
            pending_direction: direction,
        }
    }

    /// Creates a snake from explicit cells, head first.
    ///
    /// # Panics
    ///
    /// Panics when `segments` is empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Cell>, direction: Direction) -> Self {
        let mut cells = segments.into_iter();
        let head = cells
            .next()
            .expect("snake body must always contain at least one segment");

        Self {
            head,
            body: cells.map(Some).collect(),
            direction,
            pending_direction: direction,
        }
    }

    /// Queues a heading change for the next tick.
    ///
    /// A request that reverses the *current* heading is dropped. Otherwise the
    /// latest request replaces any earlier one made during the same tick.
    pub fn buffer_direction(&mut self, direction: Direction) {
        if !direction_change_is_valid(self.direction, direction) {
            return;
        }
        self.pending_direction = direction;
    }

    /// Commits the pending heading and moves every segment one step.
    pub fn move_forward(&mut self) {
        self.direction = self.pending_direction;

        for index in (1..self.body.len()).rev() {
            self.body[index] = self.body[index - 1];
        }
        if let Some(first) = self.body.first_mut() {
            *first = Some(self.head);
        }

        self.head = self.head.step(self.direction);
    }

    /// Appends an unpositioned tail segment.
    pub fn grow(&mut self) {
        self.body.push(None);
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Cell {
        self.head
    }

    /// Returns true if any positioned segment, head included, is on `cell`.
    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.cells().any(|segment| segment == cell)
    }

    /// Returns true if the head overlaps any positioned non-head segment.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        self.body.iter().flatten().any(|&segment| segment == self.head)
    }

    /// Returns the segment count, placeholders included.
    #[must_use]
    pub fn len(&self) -> usize {
        1 + self.body.len()
    }

    /// Always false: a snake has at least its head.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Heading applied on the last tick.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Heading that the next tick will commit.
    #[must_use]
    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    /// Iterates over segments from head to tail; placeholders yield `None`.
    pub fn segments(&self) -> impl Iterator<Item = Option<Cell>> + '_ {
        std::iter::once(Some(self.head)).chain(self.body.iter().copied())
    }

    /// Iterates over positioned segments from head to tail.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.segments().flatten()
    }
}

#[cfg(test)]
mod tests {
    use crate::input::Direction;

    use super::{Cell, Snake};

    #[test]
    fn bounds_check_covers_every_edge() {
        assert!(Cell::new(0, 0).is_within_bounds(20));
        assert!(Cell::new(19, 19).is_within_bounds(20));
        assert!(!Cell::new(-1, 5).is_within_bounds(20));
        assert!(!Cell::new(5, -1).is_within_bounds(20));
        assert!(!Cell::new(20, 5).is_within_bounds(20));
        assert!(!Cell::new(5, 20).is_within_bounds(20));
    }

    #[test]
    fn snake_moves_one_cell_per_tick() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Right);

        snake.move_forward();

        assert_eq!(snake.head(), Cell::new(6, 5));
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn body_follows_the_segment_ahead() {
        let mut snake = Snake::from_segments(
            vec![Cell::new(5, 5), Cell::new(4, 5), Cell::new(3, 5)],
            Direction::Right,
        );

        snake.buffer_direction(Direction::Down);
        snake.move_forward();

        let cells: Vec<Cell> = snake.cells().collect();
        assert_eq!(cells, vec![Cell::new(5, 6), Cell::new(5, 5), Cell::new(4, 5)]);
    }

    #[test]
    fn grown_segment_is_positioned_one_tick_later() {
        let mut snake = Snake::from_segments(
            vec![Cell::new(5, 5), Cell::new(4, 5)],
            Direction::Right,
        );

        snake.grow();
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.segments().last(), Some(None));
        assert_eq!(snake.cells().count(), 2);

        snake.move_forward();
        let segments: Vec<Option<Cell>> = snake.segments().collect();
        assert_eq!(
            segments,
            vec![
                Some(Cell::new(6, 5)),
                Some(Cell::new(5, 5)),
                Some(Cell::new(4, 5)),
            ]
        );
    }

    #[test]
    fn single_segment_growth_fills_from_the_old_head() {
        let mut snake = Snake::new(Cell::new(12, 10), Direction::Right);

        snake.grow();
        snake.move_forward();

        let segments: Vec<Option<Cell>> = snake.segments().collect();
        assert_eq!(segments, vec![Some(Cell::new(13, 10)), Some(Cell::new(12, 10))]);
    }

    #[test]
    fn direction_buffer_rejects_reverse() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Right);

        snake.buffer_direction(Direction::Left);
        assert_eq!(snake.pending_direction(), Direction::Right);

        snake.move_forward();
        assert_eq!(snake.head(), Cell::new(6, 5));
    }

    #[test]
    fn direction_buffer_uses_last_input() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Right);

        snake.buffer_direction(Direction::Up);
        snake.buffer_direction(Direction::Down);
        snake.move_forward();

        assert_eq!(snake.head(), Cell::new(5, 6));
        assert_eq!(snake.direction(), Direction::Down);
    }

    #[test]
    fn reversal_is_judged_against_committed_heading() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Right);

        // Up is pending, but Left still reverses the committed Right heading.
        snake.buffer_direction(Direction::Up);
        snake.buffer_direction(Direction::Left);

        assert_eq!(snake.pending_direction(), Direction::Up);
    }

    #[test]
    fn head_overlap_ignores_placeholders() {
        let mut snake = Snake::new(Cell::new(1, 1), Direction::Right);
        snake.grow();
        assert!(!snake.head_overlaps_body());

        let looped = Snake::from_segments(
            vec![Cell::new(2, 2), Cell::new(3, 2), Cell::new(2, 2)],
            Direction::Left,
        );
        assert!(looped.head_overlaps_body());
    }
}
