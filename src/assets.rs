use crate::consts;
use crate::render::SpriteLayout;
use log::{debug, info};
use ratatui::{
    buffer::{Buffer, Cell},
    layout::{Position, Rect, Size},
    style::{Color, Modifier, Style},
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use unicode_width::UnicodeWidthStr;

/// A rectangular grid of styled glyphs from which the game's graphics are
/// clipped
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct SpriteSheet {
    cells: Buffer,
}

impl SpriteSheet {
    /// Read a sprite sheet from a TOML file
    pub(crate) fn load(path: &Path) -> Result<SpriteSheet, AssetError> {
        let src = fs_err::read_to_string(path).map_err(|e| AssetError::read(path, e))?;
        let sheet = SpriteSheet::parse(&src).map_err(|e| AssetError::new(path, e))?;
        debug!(
            "Loaded sprite sheet {} ({}x{})",
            path.display(),
            sheet.size().width,
            sheet.size().height
        );
        Ok(sheet)
    }

    /// Parse the TOML source of a sprite sheet
    pub(crate) fn parse(src: &str) -> Result<SpriteSheet, SheetError> {
        let raw = toml::from_str::<RawSheet>(src)?;
        let style = raw.style();
        SpriteSheet::from_rows(&raw.rows, style)
    }

    fn from_rows(rows: &[String], style: Style) -> Result<SpriteSheet, SheetError> {
        let Some(first) = rows.first() else {
            return Err(SheetError::NoRows);
        };
        let width = first.width();
        if width == 0 {
            return Err(SheetError::ZeroWidth);
        }
        if let Some((row, found)) = rows
            .iter()
            .map(|r| r.width())
            .enumerate()
            .find(|&(_, w)| w != width)
        {
            return Err(SheetError::Ragged {
                row,
                found,
                expected: width,
            });
        }
        if u16::try_from(width).is_err() || u16::try_from(rows.len()).is_err() {
            return Err(SheetError::TooLarge);
        }
        let mut cells = Buffer::with_lines(rows.iter().map(String::as_str));
        cells.set_style(cells.area, style);
        Ok(SpriteSheet { cells })
    }

    /// The sheet's native dimensions
    pub(crate) fn size(&self) -> Size {
        self.cells.area.as_size()
    }

    /// The whole sheet as a clip rectangle
    pub(crate) fn area(&self) -> Rect {
        self.cells.area
    }

    pub(crate) fn cell(&self, pos: Position) -> Option<&Cell> {
        self.cells.cell(pos)
    }

    /// Can every cell of `clip` be read from this sheet?
    fn covers(&self, clip: Rect) -> bool {
        self.cells.area.union(clip) == self.cells.area
    }
}

/// On-disk form of a sprite sheet
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
struct RawSheet {
    #[serde(default)]
    fg: Option<Color>,
    #[serde(default)]
    bg: Option<Color>,
    #[serde(default)]
    bold: bool,
    rows: Vec<String>,
}

impl RawSheet {
    fn style(&self) -> Style {
        let mut style = Style::new();
        if let Some(fg) = self.fg {
            style = style.fg(fg);
        }
        if let Some(bg) = self.bg {
            style = style.bg(bg);
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        style
    }
}

/// All of the sprite sheets the game draws from, together with the table of
/// where each sprite lives on its sheet
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Sprites {
    pub(crate) background: SpriteSheet,
    pub(crate) numbers: SpriteSheet,
    pub(crate) food: SpriteSheet,
    pub(crate) snake: SpriteSheet,
    pub(crate) layout: SpriteLayout,
}

impl Sprites {
    /// Load the sprite sheets from files in `dir`
    pub(crate) fn load(dir: &Path) -> Result<Sprites, AssetError> {
        let layout = SpriteLayout::new();
        let screen = Rect::from((Position::ORIGIN, consts::SCREEN_SIZE));
        let background = load_sheet(dir, consts::BACKGROUND_SHEET, screen)?;
        let numbers = load_sheet(dir, consts::NUMBER_SHEET, layout.digits_extent())?;
        let food = load_sheet(dir, consts::FOOD_SHEET, Rect::new(0, 0, 1, 1))?;
        let snake = load_sheet(dir, consts::SNAKE_SHEET, layout.snake_extent())?;
        info!("Loaded sprites from {}", dir.display());
        Ok(Sprites {
            background,
            numbers,
            food,
            snake,
            layout,
        })
    }
}

/// Load the sheet `name` from `dir` and check that it contains the rectangle
/// `required`
fn load_sheet(dir: &Path, name: &str, required: Rect) -> Result<SpriteSheet, AssetError> {
    let path = dir.join(name);
    let sheet = SpriteSheet::load(&path)?;
    if sheet.covers(required) {
        Ok(sheet)
    } else {
        Err(AssetError::new(
            &path,
            SheetError::TooSmall {
                found: sheet.size(),
                required: Size {
                    width: required.right(),
                    height: required.bottom(),
                },
            },
        ))
    }
}

#[derive(Debug, Error)]
#[error("failed to load sprite sheet {}", .path.display())]
pub(crate) struct AssetError {
    path: PathBuf,
    #[source]
    source: AssetErrorSource,
}

impl AssetError {
    fn new(path: &Path, e: SheetError) -> AssetError {
        AssetError {
            path: path.to_owned(),
            source: AssetErrorSource::Sheet(e),
        }
    }

    fn read(path: &Path, e: std::io::Error) -> AssetError {
        AssetError {
            path: path.to_owned(),
            source: AssetErrorSource::Read(e),
        }
    }
}

#[derive(Debug, Error)]
enum AssetErrorSource {
    #[error("failed to read file")]
    Read(#[source] std::io::Error),
    #[error("invalid sprite sheet")]
    Sheet(#[source] SheetError),
}

#[derive(Debug, Error)]
pub(crate) enum SheetError {
    #[error("failed to parse sprite sheet")]
    Parse(#[from] toml::de::Error),
    #[error("sprite sheet has no rows")]
    NoRows,
    #[error("sprite sheet has zero width")]
    ZeroWidth,
    #[error("row {row} is {found} cells wide, expected {expected}")]
    Ragged {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("sprite sheet is too large")]
    TooLarge,
    #[error(
        "sprite sheet is {}x{} but must be at least {}x{}",
        .found.width,
        .found.height,
        .required.width,
        .required.height
    )]
    TooSmall { found: Size, required: Size },
}

#[cfg(test)]
impl Sprites {
    /// The sprite sheets shipped in the `sprites/` directory
    pub(crate) fn bundled() -> Sprites {
        let parse =
            |src: &str| SpriteSheet::parse(src).expect("bundled sprite sheet should parse");
        Sprites {
            background: parse(include_str!("../sprites/background.toml")),
            numbers: parse(include_str!("../sprites/number.toml")),
            food: parse(include_str!("../sprites/food.toml")),
            snake: parse(include_str!("../sprites/snake.toml")),
            layout: SpriteLayout::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const SNAKE_SRC: &str = concat!(
        "fg = \"green\"\n",
        "bold = true\n",
        "rows = ['/\\:>', '\\/<:', '[]  ']\n",
    );

    #[test]
    fn parse_sheet() {
        let sheet = SpriteSheet::parse(SNAKE_SRC).unwrap();
        assert_eq!(sheet.size(), Size::new(4, 3));
        let cell = sheet.cell(Position::new(2, 0)).unwrap();
        assert_eq!(cell.symbol(), ":");
        assert_eq!(cell.fg, Color::Green);
        assert!(cell.modifier.contains(Modifier::BOLD));
        assert_eq!(sheet.cell(Position::new(1, 1)).unwrap().symbol(), "/");
        assert!(sheet.cell(Position::new(4, 0)).is_none());
    }

    #[test]
    fn parse_unstyled_sheet() {
        let sheet = SpriteSheet::parse("rows = ['()']").unwrap();
        assert_eq!(sheet.size(), Size::new(2, 1));
        assert_eq!(sheet.cell(Position::new(0, 0)).unwrap().fg, Color::Reset);
    }

    #[test]
    fn parse_ragged() {
        let r = SpriteSheet::parse("rows = ['abc', 'ab']");
        assert!(matches!(
            r,
            Err(SheetError::Ragged {
                row: 1,
                found: 2,
                expected: 3
            })
        ));
    }

    #[test]
    fn parse_empty() {
        assert!(matches!(
            SpriteSheet::parse("rows = []"),
            Err(SheetError::NoRows)
        ));
        assert!(matches!(
            SpriteSheet::parse("rows = ['', '']"),
            Err(SheetError::ZeroWidth)
        ));
    }

    #[test]
    fn parse_bad_color() {
        assert!(matches!(
            SpriteSheet::parse("fg = \"not-a-color\"\nrows = ['x']"),
            Err(SheetError::Parse(_))
        ));
    }

    #[test]
    fn parse_unknown_field() {
        assert!(matches!(
            SpriteSheet::parse("colour = \"red\"\nrows = ['x']"),
            Err(SheetError::Parse(_))
        ));
    }

    #[test]
    fn bundled_sprites_fit_layout() {
        let sprites = Sprites::bundled();
        assert_eq!(sprites.background.size(), consts::SCREEN_SIZE);
        assert!(sprites.numbers.covers(sprites.layout.digits_extent()));
        assert!(sprites.snake.covers(sprites.layout.snake_extent()));
    }

    fn write_sprites(dir: &Path) {
        for (name, src) in [
            (
                consts::BACKGROUND_SHEET,
                include_str!("../sprites/background.toml"),
            ),
            (consts::NUMBER_SHEET, include_str!("../sprites/number.toml")),
            (consts::FOOD_SHEET, include_str!("../sprites/food.toml")),
            (consts::SNAKE_SHEET, include_str!("../sprites/snake.toml")),
        ] {
            fs::write(dir.join(name), src).unwrap();
        }
    }

    #[test]
    fn load_directory() {
        let tmpdir = TempDir::new().unwrap();
        write_sprites(tmpdir.path());
        let sprites = Sprites::load(tmpdir.path()).unwrap();
        assert_eq!(sprites, Sprites::bundled());
    }

    #[test]
    fn load_missing_file() {
        let tmpdir = TempDir::new().unwrap();
        write_sprites(tmpdir.path());
        fs::remove_file(tmpdir.path().join(consts::FOOD_SHEET)).unwrap();
        let e = Sprites::load(tmpdir.path()).unwrap_err();
        assert_eq!(e.path, tmpdir.path().join(consts::FOOD_SHEET));
        assert!(matches!(e.source, AssetErrorSource::Read(_)));
        assert!(e.to_string().starts_with("failed to load sprite sheet "));
    }

    #[test]
    fn load_too_small() {
        let tmpdir = TempDir::new().unwrap();
        write_sprites(tmpdir.path());
        fs::write(tmpdir.path().join(consts::SNAKE_SHEET), "rows = ['/\\:>']").unwrap();
        let e = Sprites::load(tmpdir.path()).unwrap_err();
        assert_eq!(e.path, tmpdir.path().join(consts::SNAKE_SHEET));
        assert!(matches!(
            e.source,
            AssetErrorSource::Sheet(SheetError::TooSmall { .. })
        ));
    }
}
