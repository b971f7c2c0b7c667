//! Assorted constants & hard-coded configuration
use ratatui::layout::{Position, Size};
use std::time::Duration;

/// Default time between movements of the snake
pub(crate) const TICK_PERIOD: Duration = Duration::from_millis(250);

/// Everything is drawn inside a rectangle of this size in the center of the
/// terminal window.  The background sprite sheet must be at least this large.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const SCREEN_SIZE: Size = Size {
    width: 52,
    height: 22,
};

/// Size of one tile of the playing field, in terminal cells
pub(crate) const TILE_SIZE: Size = Size {
    width: 2,
    height: 1,
};

/// Size of the playing field, in tiles
pub(crate) const FIELD_SIZE: Size = Size {
    width: 24,
    height: 16,
};

/// Screen position of the top-left corner of the playing field
pub(crate) const FIELD_ORIGIN: Position = Position { x: 2, y: 1 };

/// Tile on which the snake's head starts
pub(crate) const SNAKE_START: Position = Position { x: 11, y: 8 };

/// Number of body segments trailing the head at the start of a game
pub(crate) const INITIAL_BODY_LENGTH: usize = 2;

/// Size of one digit glyph in the number sprite sheet
pub(crate) const DIGIT_SIZE: Size = Size {
    width: 3,
    height: 3,
};

/// Horizontal distance between the left edges of consecutive score digits
pub(crate) const DIGIT_ADVANCE: u16 = DIGIT_SIZE.width + 1;

/// Screen position of the leftmost score digit
pub(crate) const SCORE_ORIGIN: Position = Position { x: 10, y: 18 };

/// File names of the sprite sheets, relative to the sprites directory
pub(crate) const BACKGROUND_SHEET: &str = "background.toml";
pub(crate) const NUMBER_SHEET: &str = "number.toml";
pub(crate) const FOOD_SHEET: &str = "food.toml";
pub(crate) const SNAKE_SHEET: &str = "snake.toml";

/// Directory holding the sprite sheets when none is configured
pub(crate) const SPRITES_DIR: &str = "sprites";
