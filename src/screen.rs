use crate::animation::{lerp, OFF};
use crate::calendar::{GRID_HEIGHT, GRID_WIDTH};
use crate::toggle::TOGGLE_WIDTH;
use ratatui::layout::Rect;

/// Lines above the grid: the title row, a blank line, and the weekday names
const PREAMBLE_LINES: u16 = 3;

/// Line on which the weekday names are written
const WEEKDAY_LINE: u16 = 2;

const CALENDAR_HEIGHT: u16 = PREAMBLE_LINES + GRID_HEIGHT;

/// Columns between the calendar and the bookings panel when they are side by
/// side
const PANEL_GAP: u16 = 3;

const PANEL_MIN_WIDTH: u16 = 36;

const PANEL_MAX_WIDTH: u16 = 56;

/// Lines between the calendar and the bookings panel when the panel is
/// stacked underneath
const STACK_GAP: u16 = 1;

/// Where each part of the screen goes for a given terminal size.
///
/// The calendar is centered horizontally.  When the bookings panel is shown,
/// it goes to the right of the calendar if the terminal is wide enough
/// (with the pair centered as a whole) and underneath it otherwise.  All
/// areas are clipped to the terminal.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct ScreenLayout {
    pub(crate) title: Rect,
    pub(crate) toggle: Rect,
    pub(crate) weekdays: Rect,
    pub(crate) grid: Rect,
    pub(crate) panel: Option<Rect>,
}

impl ScreenLayout {
    /// `panel_level` is how far the bookings panel is through its entrance;
    /// while it is sliding in or out of a side-by-side layout, the calendar
    /// glides between its centered and shifted positions.
    pub(crate) fn new(area: Rect, panel_level: u16) -> ScreenLayout {
        let centered = area.width.saturating_sub(GRID_WIDTH) / 2;
        let side_by_side = area.width >= GRID_WIDTH + PANEL_GAP + PANEL_MIN_WIDTH;
        let (left, panel) = if panel_level == OFF {
            (centered, None)
        } else if side_by_side {
            let panel_width = (area.width - GRID_WIDTH - PANEL_GAP).min(PANEL_MAX_WIDTH);
            let shifted = (area.width - GRID_WIDTH - PANEL_GAP - panel_width) / 2;
            let left = lerp(centered, shifted, panel_level);
            let panel = Rect {
                x: area.x + left + GRID_WIDTH + PANEL_GAP,
                y: area.y,
                width: panel_width,
                height: area.height,
            };
            (left, Some(panel))
        } else {
            let top = CALENDAR_HEIGHT + STACK_GAP;
            let panel = Rect {
                x: area.x + centered,
                y: area.y.saturating_add(top),
                width: GRID_WIDTH.min(area.width),
                height: area.height.saturating_sub(top),
            };
            (centered, Some(panel))
        };
        let x = area.x + left;
        let row = |dy: u16, x: u16, width: u16, height: u16| {
            Rect {
                x,
                y: area.y.saturating_add(dy),
                width,
                height,
            }
            .intersection(area)
        };
        ScreenLayout {
            title: row(0, x, GRID_WIDTH - TOGGLE_WIDTH, 1),
            toggle: row(0, x + GRID_WIDTH - TOGGLE_WIDTH, TOGGLE_WIDTH, 1),
            weekdays: row(WEEKDAY_LINE, x, GRID_WIDTH, 1),
            grid: row(PREAMBLE_LINES, x, GRID_WIDTH, GRID_HEIGHT),
            panel: panel.map(|r| r.intersection(area)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::ON;

    #[test]
    fn test_compact_is_centered() {
        let layout = ScreenLayout::new(Rect::new(0, 0, 80, 24), OFF);
        assert_eq!(layout.title, Rect::new(12, 0, 46, 1));
        assert_eq!(layout.toggle, Rect::new(58, 0, 9, 1));
        assert_eq!(layout.weekdays, Rect::new(12, 2, 55, 1));
        assert_eq!(layout.grid, Rect::new(12, 3, 55, 19));
        assert_eq!(layout.panel, None);
    }

    #[test]
    fn test_side_by_side() {
        let layout = ScreenLayout::new(Rect::new(0, 0, 120, 40), ON);
        assert_eq!(layout.grid, Rect::new(3, 3, 55, 19));
        assert_eq!(layout.panel, Some(Rect::new(61, 0, 56, 40)));
    }

    #[test]
    fn test_side_by_side_glides() {
        let area = Rect::new(0, 0, 120, 40);
        let halfway = ScreenLayout::new(area, ON / 2);
        assert!(3 < halfway.grid.x && halfway.grid.x < 32);
        let panel = halfway.panel.expect("panel should be laid out");
        assert_eq!(panel.x, halfway.grid.x + GRID_WIDTH + PANEL_GAP);
    }

    #[test]
    fn test_stacked() {
        let layout = ScreenLayout::new(Rect::new(0, 0, 80, 50), ON);
        assert_eq!(layout.grid, Rect::new(12, 3, 55, 19));
        assert_eq!(layout.panel, Some(Rect::new(12, 23, 55, 27)));
    }

    #[test]
    fn test_clipped_to_small_terminal() {
        let area = Rect::new(0, 0, 40, 10);
        let layout = ScreenLayout::new(area, ON);
        assert_eq!(layout.grid, Rect::new(0, 3, 40, 7));
        assert!(layout.panel.is_none_or(|r| r.is_empty()));
    }
}
