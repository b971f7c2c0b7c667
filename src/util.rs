use crate::consts;
use ratatui::layout::{Flex, Layout, Position, Rect};
use std::error::Error;
use std::fmt::Write;

/// Return the area of `buffer_area` in which the screen is drawn: a rectangle
/// of [`SCREEN_SIZE`][consts::SCREEN_SIZE] in the middle, truncated if the
/// terminal is smaller than that.
pub(crate) fn get_display_area(buffer_area: Rect) -> Rect {
    let [display] = Layout::horizontal([consts::SCREEN_SIZE.width])
        .flex(Flex::Center)
        .areas(buffer_area);
    let [display] = Layout::vertical([consts::SCREEN_SIZE.height])
        .flex(Flex::Center)
        .areas(display);
    display
}

/// Return the screen rectangle covered by the field tile at `pos`
pub(crate) fn tile_rect(pos: Position) -> Rect {
    let width = consts::TILE_SIZE.width;
    let height = consts::TILE_SIZE.height;
    Rect {
        x: consts::FIELD_ORIGIN
            .x
            .saturating_add(pos.x.saturating_mul(width)),
        y: consts::FIELD_ORIGIN
            .y
            .saturating_add(pos.y.saturating_mul(height)),
        width,
        height,
    }
}

/// Format `e` and its chain of sources for display on stderr, one message per
/// line
pub(crate) fn error_report(e: &dyn Error) -> String {
    let mut report = format!("Error: {e}\n");
    let causes = std::iter::successors(e.source(), |&c| c.source()).collect::<Vec<_>>();
    match causes.as_slice() {
        [] => (),
        [cause] => {
            let _ = write!(report, "\nCaused by:\n    {cause}\n");
        }
        _ => {
            report.push_str("\nCaused by:\n");
            for (i, c) in causes.iter().enumerate() {
                let _ = writeln!(report, "{i:>5}: {c}");
            }
        }
    }
    report
}
