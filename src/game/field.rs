use rand::Rng;
use ratatui::layout::{Position, Size};
#[cfg(test)]
use ratatui::layout::{Positions, Rect};

/// The playable area of the screen, measured in tiles from its top-left
/// corner
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Bounds {
    pub(crate) width: u16,
    pub(crate) height: u16,
}

impl Bounds {
    /// Number of tiles inside the bounds
    pub(crate) fn area(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    pub(crate) fn contains(self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Pick a tile uniformly at random
    pub(crate) fn random_position<R: Rng>(self, rng: &mut R) -> Position {
        Position {
            x: rng.random_range(0..self.width),
            y: rng.random_range(0..self.height),
        }
    }
}

#[cfg(test)]
impl Bounds {
    /// Every tile inside the bounds, row by row
    pub(crate) fn positions(self) -> Positions {
        let size = Size {
            width: self.width,
            height: self.height,
        };
        Rect::from((Position::ORIGIN, size)).positions()
    }
}

impl From<Size> for Bounds {
    fn from(size: Size) -> Bounds {
        Bounds {
            width: size.width,
            height: size.height,
        }
    }
}
