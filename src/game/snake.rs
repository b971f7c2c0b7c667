use super::direction::Direction;
use super::field::Bounds;
use ratatui::layout::Position;
use std::collections::VecDeque;

/// The snake: a head and the body trailing behind it.
///
/// All positions are tiles relative to the top-left corner of the playing
/// field.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct Snake {
    /// The position of the snake's head
    pub(super) head: Position,

    /// The positions of the segments of the snake's body, starting with the
    /// one right behind the head
    pub(super) body: VecDeque<Position>,

    /// The direction in which the snake will move on the next tick
    pub(super) direction: Direction,

    /// The position given up by the tail on the last move, where a new
    /// segment goes when the snake grows
    pub(super) vacated: Option<Position>,
}

impl Snake {
    /// Create a new snake with its head at `head`, facing in `direction`, and
    /// with `body_len` segments trailing straight behind it.  Segments that
    /// would fall outside `bounds` are left off.
    pub(super) fn new(
        head: Position,
        direction: Direction,
        body_len: usize,
        bounds: Bounds,
    ) -> Snake {
        let behind = direction.reverse();
        let body = std::iter::successors(behind.advance(head, bounds), |&p| {
            behind.advance(p, bounds)
        })
        .take(body_len)
        .collect();
        Snake {
            head,
            body,
            direction,
            vacated: None,
        }
    }

    /// Return the position of the snake's head
    pub(super) fn head(&self) -> Position {
        self.head
    }

    /// Return the positions of the cells in the snake's body
    pub(super) fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    pub(super) fn direction(&self) -> Direction {
        self.direction
    }

    /// Number of tiles covered by the head and body together
    pub(super) fn len(&self) -> usize {
        self.body.len() + 1
    }

    /// Is `pos` covered by the head or any body segment?
    pub(super) fn occupies(&self, pos: Position) -> bool {
        self.head == pos || self.body.contains(&pos)
    }

    /// Does the head share a tile with a body segment?
    pub(super) fn bit_itself(&self) -> bool {
        self.body.contains(&self.head)
    }

    /// Change the direction of the next move to `direction`.  Turning back
    /// onto the neck is allowed.
    pub(super) fn turn(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Move the snake forwards one tile in the current direction within
    /// `bounds`: every body segment takes the place of the one in front of it,
    /// and the head moves on.  If the head would leave `bounds`, the body still
    /// shifts but the head stays put, and `false` is returned.
    pub(super) fn advance(&mut self, bounds: Bounds) -> bool {
        self.body.push_front(self.head);
        self.vacated = self.body.pop_back();
        match self.direction.advance(self.head, bounds) {
            Some(pos) => {
                self.head = pos;
                true
            }
            None => false,
        }
    }

    /// Add one segment to the end of the body, on the tile the tail just left.
    /// `capacity` is the number of tiles in the field; the snake can never be
    /// longer than that.
    pub(super) fn grow(&mut self, capacity: usize) {
        if let Some(pos) = self.vacated.take() {
            self.body.push_back(pos);
        }
        assert!(
            self.len() <= capacity,
            "snake of length {} does not fit in {capacity} tiles",
            self.len()
        );
    }
}
