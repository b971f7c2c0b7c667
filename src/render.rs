use crate::assets::SpriteSheet;
use crate::consts;
use crate::game::Direction;
use crate::util::get_display_area;
use enum_map::{enum_map, EnumMap};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Position, Rect},
    Terminal,
};
use std::io;

/// Something the game can draw frames on
pub(crate) trait Renderer {
    /// Blank the frame being drawn
    fn clear(&mut self);

    /// Draw `sheet` over the whole screen
    fn draw_background(&mut self, sheet: &SpriteSheet);

    /// Copy the `clip` region of `sheet` to the `dest` region of the screen.
    /// Cells outside either region are skipped.
    fn draw_clip(&mut self, sheet: &SpriteSheet, clip: Rect, dest: Rect);

    /// Show the finished frame
    fn present(&mut self) -> io::Result<()>;
}

/// Where each sprite lives on its sprite sheet
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct SpriteLayout {
    heads: EnumMap<Direction, Rect>,
    body: Rect,
    digits: [Rect; 10],
}

impl SpriteLayout {
    pub(crate) fn new() -> SpriteLayout {
        SpriteLayout {
            heads: enum_map! {
                Direction::Up => tile_clip(0, 0),
                Direction::Right => tile_clip(1, 0),
                Direction::Down => tile_clip(0, 1),
                Direction::Left => tile_clip(1, 1),
            },
            body: tile_clip(0, 2),
            digits: [0, 1, 2, 3, 4, 5, 6, 7, 8, 9].map(digit_clip),
        }
    }

    /// Clip on the snake sheet for the head facing `direction`
    pub(crate) fn head(&self, direction: Direction) -> Rect {
        self.heads[direction]
    }

    /// Clip on the snake sheet for a body segment
    pub(crate) fn body(&self) -> Rect {
        self.body
    }

    /// Clip on the number sheet for the decimal digit `digit`
    pub(crate) fn digit(&self, digit: u8) -> Rect {
        self.digits[usize::from(digit % 10)]
    }

    /// The smallest rectangle containing every clip taken from the snake sheet
    pub(crate) fn snake_extent(&self) -> Rect {
        self.heads
            .values()
            .fold(self.body, |acc, &clip| acc.union(clip))
    }

    /// The smallest rectangle containing every clip taken from the number
    /// sheet
    pub(crate) fn digits_extent(&self) -> Rect {
        self.digits
            .iter()
            .fold(self.digits[0], |acc, &clip| acc.union(clip))
    }
}

impl Default for SpriteLayout {
    fn default() -> SpriteLayout {
        SpriteLayout::new()
    }
}

/// The tile-sized clip in column `col` and row `row` of a sheet laid out in
/// tiles
fn tile_clip(col: u16, row: u16) -> Rect {
    Rect {
        x: col * consts::TILE_SIZE.width,
        y: row * consts::TILE_SIZE.height,
        width: consts::TILE_SIZE.width,
        height: consts::TILE_SIZE.height,
    }
}

/// Digits are laid out three to a row
fn digit_clip(digit: u16) -> Rect {
    Rect {
        x: (digit % 3) * consts::DIGIT_SIZE.width,
        y: (digit / 3) * consts::DIGIT_SIZE.height,
        width: consts::DIGIT_SIZE.width,
        height: consts::DIGIT_SIZE.height,
    }
}

/// The decimal digits of `score`, most significant first, without leading
/// zeroes
pub(crate) fn score_digits(score: u32) -> Vec<u8> {
    score.to_string().bytes().map(|b| b - b'0').collect()
}

/// Draw `score` left-to-right starting at
/// [`SCORE_ORIGIN`][consts::SCORE_ORIGIN]
pub(crate) fn draw_score<T: Renderer>(
    renderer: &mut T,
    sheet: &SpriteSheet,
    layout: &SpriteLayout,
    score: u32,
) {
    let mut dest = Rect::from((consts::SCORE_ORIGIN, consts::DIGIT_SIZE));
    for digit in score_digits(score) {
        renderer.draw_clip(sheet, layout.digit(digit), dest);
        dest.x = dest.x.saturating_add(consts::DIGIT_ADVANCE);
    }
}

/// A [`Renderer`] that composes each frame off-screen and then shows it in
/// the middle of a terminal
#[derive(Debug)]
pub(crate) struct TerminalRenderer<B: Backend> {
    terminal: Terminal<B>,
    canvas: Buffer,
}

impl<B: Backend> TerminalRenderer<B> {
    pub(crate) fn new(terminal: Terminal<B>) -> Self {
        TerminalRenderer {
            terminal,
            canvas: Buffer::empty(Rect::from((Position::ORIGIN, consts::SCREEN_SIZE))),
        }
    }
}

impl<B: Backend> Renderer for TerminalRenderer<B> {
    fn clear(&mut self) {
        self.canvas.reset();
    }

    fn draw_background(&mut self, sheet: &SpriteSheet) {
        let screen = self.canvas.area;
        blit(&mut self.canvas, sheet, sheet.area(), screen);
    }

    fn draw_clip(&mut self, sheet: &SpriteSheet, clip: Rect, dest: Rect) {
        blit(&mut self.canvas, sheet, clip, dest);
    }

    fn present(&mut self) -> io::Result<()> {
        let canvas = &self.canvas;
        self.terminal.draw(|frame| {
            let area = get_display_area(frame.area());
            let buf = frame.buffer_mut();
            for pos in area.positions() {
                let src = Position {
                    x: pos.x - area.x,
                    y: pos.y - area.y,
                };
                if let (Some(cell), Some(target)) = (canvas.cell(src), buf.cell_mut(pos)) {
                    *target = cell.clone();
                }
            }
        })?;
        Ok(())
    }
}

fn blit(canvas: &mut Buffer, sheet: &SpriteSheet, clip: Rect, dest: Rect) {
    let width = clip.width.min(dest.width);
    let height = clip.height.min(dest.height);
    for dy in 0..height {
        for dx in 0..width {
            let (Some(sx), Some(sy)) = (clip.x.checked_add(dx), clip.y.checked_add(dy)) else {
                continue;
            };
            let (Some(x), Some(y)) = (dest.x.checked_add(dx), dest.y.checked_add(dy)) else {
                continue;
            };
            if let (Some(cell), Some(target)) =
                (sheet.cell(Position::new(sx, sy)), canvas.cell_mut((x, y)))
            {
                *target = cell.clone();
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{Call, Recorder};
    use super::*;
    use crate::assets::Sprites;
    use ratatui::backend::TestBackend;
    use rstest::rstest;

    #[rstest]
    #[case(0, vec![0])]
    #[case(7, vec![7])]
    #[case(10, vec![1, 0])]
    #[case(42, vec![4, 2])]
    #[case(105, vec![1, 0, 5])]
    #[case(381, vec![3, 8, 1])]
    #[case(1000, vec![1, 0, 0, 0])]
    fn test_score_digits(#[case] score: u32, #[case] digits: Vec<u8>) {
        assert_eq!(score_digits(score), digits);
    }

    fn score_draws(score: u32) -> Vec<(Rect, u16)> {
        let sprites = Sprites::bundled();
        let mut recorder = Recorder::default();
        draw_score(&mut recorder, &sprites.numbers, &sprites.layout, score);
        recorder
            .calls
            .into_iter()
            .map(|call| match call {
                Call::Clip { clip, dest, .. } => {
                    assert_eq!(dest.y, consts::SCORE_ORIGIN.y);
                    assert_eq!(dest.as_size(), consts::DIGIT_SIZE);
                    (clip, dest.x)
                }
                other => panic!("unexpected call {other:?}"),
            })
            .collect()
    }

    #[test]
    fn draw_score_zero() {
        let layout = SpriteLayout::new();
        assert_eq!(score_draws(0), vec![(layout.digit(0), 10)]);
    }

    #[test]
    fn draw_score_one_digit() {
        let layout = SpriteLayout::new();
        assert_eq!(score_draws(7), vec![(layout.digit(7), 10)]);
    }

    #[test]
    fn draw_score_two_digits() {
        let layout = SpriteLayout::new();
        assert_eq!(
            score_draws(42),
            vec![(layout.digit(4), 10), (layout.digit(2), 14)]
        );
    }

    #[test]
    fn draw_score_inner_zero() {
        let layout = SpriteLayout::new();
        assert_eq!(
            score_draws(105),
            vec![
                (layout.digit(1), 10),
                (layout.digit(0), 14),
                (layout.digit(5), 18)
            ]
        );
    }

    #[rstest]
    #[case(Direction::Up, Rect::new(0, 0, 2, 1))]
    #[case(Direction::Right, Rect::new(2, 0, 2, 1))]
    #[case(Direction::Down, Rect::new(0, 1, 2, 1))]
    #[case(Direction::Left, Rect::new(2, 1, 2, 1))]
    fn test_head_clips(#[case] direction: Direction, #[case] clip: Rect) {
        assert_eq!(SpriteLayout::new().head(direction), clip);
    }

    #[rstest]
    #[case(0, Rect::new(0, 0, 3, 3))]
    #[case(2, Rect::new(6, 0, 3, 3))]
    #[case(5, Rect::new(6, 3, 3, 3))]
    #[case(9, Rect::new(0, 9, 3, 3))]
    fn test_digit_clips(#[case] digit: u8, #[case] clip: Rect) {
        assert_eq!(SpriteLayout::new().digit(digit), clip);
    }

    #[test]
    fn extents() {
        let layout = SpriteLayout::new();
        assert_eq!(layout.body(), Rect::new(0, 2, 2, 1));
        assert_eq!(layout.snake_extent(), Rect::new(0, 0, 4, 3));
        assert_eq!(layout.digits_extent(), Rect::new(0, 0, 9, 12));
    }

    fn symbol_at(renderer: &TerminalRenderer<TestBackend>, x: u16, y: u16) -> String {
        renderer
            .screen()
            .cell((x, y))
            .unwrap()
            .symbol()
            .to_owned()
    }

    #[test]
    fn present_full_size_terminal() {
        let sprites = Sprites::bundled();
        let terminal = Terminal::new(TestBackend::new(52, 22)).unwrap();
        let mut renderer = TerminalRenderer::new(terminal);
        renderer.clear();
        renderer.draw_background(&sprites.background);
        renderer.draw_clip(
            &sprites.snake,
            sprites.layout.head(Direction::Left),
            Rect::new(24, 9, 2, 1),
        );
        renderer.present().unwrap();
        assert_eq!(symbol_at(&renderer, 0, 0), "╔");
        assert_eq!(symbol_at(&renderer, 51, 21), "╝");
        assert_eq!(symbol_at(&renderer, 24, 9), "<");
        assert_eq!(symbol_at(&renderer, 25, 9), ":");
        assert_eq!(symbol_at(&renderer, 26, 9), " ");
    }

    #[test]
    fn present_centered() {
        let sprites = Sprites::bundled();
        let terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut renderer = TerminalRenderer::new(terminal);
        renderer.clear();
        renderer.draw_background(&sprites.background);
        renderer.present().unwrap();
        assert_eq!(symbol_at(&renderer, 13, 0), " ");
        assert_eq!(symbol_at(&renderer, 14, 1), "╔");
        assert_eq!(symbol_at(&renderer, 65, 22), "╝");
    }

    #[test]
    fn clip_is_cut_at_screen_edge() {
        let sprites = Sprites::bundled();
        let terminal = Terminal::new(TestBackend::new(52, 22)).unwrap();
        let mut renderer = TerminalRenderer::new(terminal);
        renderer.clear();
        renderer.draw_clip(
            &sprites.numbers,
            sprites.layout.digit(8),
            Rect::new(50, 20, 3, 3),
        );
        renderer.present().unwrap();
        assert_eq!(symbol_at(&renderer, 50, 20), "┌");
        assert_eq!(symbol_at(&renderer, 51, 20), "─");
        assert_eq!(symbol_at(&renderer, 51, 21), "─");
    }

    #[test]
    fn clear_blanks_canvas() {
        let sprites = Sprites::bundled();
        let terminal = Terminal::new(TestBackend::new(52, 22)).unwrap();
        let mut renderer = TerminalRenderer::new(terminal);
        renderer.draw_background(&sprites.background);
        renderer.clear();
        renderer.present().unwrap();
        assert_eq!(symbol_at(&renderer, 0, 0), " ");
    }
}
