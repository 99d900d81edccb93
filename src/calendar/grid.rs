use super::canvas::BufferCanvas;
use super::cell::{DayCell, HoverEvent, CELL_HEIGHT, CELL_WIDTH};
use crate::data::{weekday_names, DayRecord, DAYS_IN_WEEK, GRID_DAYS};
use crate::theme::WEEKDAY_STYLE;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    widgets::{StatefulWidget, Widget},
};
use std::time::Instant;

/// Columns between horizontally adjacent cells
const COLUMN_GAP: u16 = 1;

/// Lines between vertically adjacent cells
const ROW_GAP: u16 = 1;

const WEEKS: u16 = 5;

const COLUMNS: u16 = 7;

/// Width of the grid (and of the weekday header) in columns
pub(crate) const GRID_WIDTH: u16 = COLUMNS * CELL_WIDTH + (COLUMNS - 1) * COLUMN_GAP;

/// Height of the grid in lines
pub(crate) const GRID_HEIGHT: u16 = WEEKS * CELL_HEIGHT + (WEEKS - 1) * ROW_GAP;

/// Direction in which the keyboard moves the pointer from cell to cell
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Step {
    Left,
    Right,
    Up,
    Down,
}

/// Returns the area of the `index`-th cell of a grid whose top-left corner is
/// at `origin`
pub(crate) fn cell_rect(origin: Position, index: usize) -> Rect {
    let (row, col) = grid_coords(index);
    Rect {
        x: origin.x.saturating_add(col * (CELL_WIDTH + COLUMN_GAP)),
        y: origin.y.saturating_add(row * (CELL_HEIGHT + ROW_GAP)),
        width: CELL_WIDTH,
        height: CELL_HEIGHT,
    }
}

fn grid_coords(index: usize) -> (u16, u16) {
    let row = u16::try_from(index / DAYS_IN_WEEK).unwrap_or(u16::MAX);
    let col = u16::try_from(index % DAYS_IN_WEEK).unwrap_or(u16::MAX);
    (row, col)
}

/// Returns the index of the cell under `pos`, or `None` if `pos` is outside
/// the grid or in a gap between cells
pub(crate) fn hit_test(area: Rect, pos: Position) -> Option<usize> {
    if !area.contains(pos) {
        return None;
    }
    let dx = pos.x - area.x;
    let dy = pos.y - area.y;
    if dx % (CELL_WIDTH + COLUMN_GAP) >= CELL_WIDTH || dy % (CELL_HEIGHT + ROW_GAP) >= CELL_HEIGHT
    {
        return None;
    }
    let col = usize::from(dx / (CELL_WIDTH + COLUMN_GAP));
    let row = usize::from(dy / (CELL_HEIGHT + ROW_GAP));
    let index = row * DAYS_IN_WEEK + col;
    (col < DAYS_IN_WEEK && index < GRID_DAYS).then_some(index)
}

/// The hover state of every cell in the month grid.
///
/// At most one cell is hovered at a time.  Every change of the hovered cell
/// is reported to the caller-supplied handler as the cells themselves report
/// it: the old cell's [`HoverEvent::Left`] always comes before the new cell's
/// [`HoverEvent::Entered`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct GridState {
    cells: Vec<DayCell>,
    hovered: Option<usize>,
}

impl GridState {
    pub(crate) fn new(days: &'static [DayRecord; GRID_DAYS], now: Instant) -> GridState {
        GridState {
            cells: days.iter().map(|d| DayCell::new(d, now)).collect(),
            hovered: None,
        }
    }

    /// Moves the pointer to `pos`.  `area` is where the grid was last drawn.
    pub(crate) fn pointer_moved<F: FnMut(HoverEvent)>(
        &mut self,
        area: Rect,
        pos: Position,
        now: Instant,
        mut on_hover: F,
    ) {
        self.hover(hit_test(area, pos), now, &mut on_hover);
    }

    /// The pointer has left the grid altogether
    pub(crate) fn pointer_left<F: FnMut(HoverEvent)>(&mut self, now: Instant, mut on_hover: F) {
        self.hover(None, now, &mut on_hover);
    }

    /// Moves the pointer one cell in the given direction, stopping at the
    /// edges of the grid.  If no cell is hovered, the first cell is.
    pub(crate) fn step_pointer<F: FnMut(HoverEvent)>(
        &mut self,
        step: Step,
        now: Instant,
        mut on_hover: F,
    ) {
        let target = match self.hovered {
            None => 0,
            Some(i) => {
                let col = i % DAYS_IN_WEEK;
                match step {
                    Step::Left if col > 0 => i - 1,
                    Step::Right if col + 1 < DAYS_IN_WEEK && i + 1 < GRID_DAYS => i + 1,
                    Step::Up if i >= DAYS_IN_WEEK => i - DAYS_IN_WEEK,
                    Step::Down if i + DAYS_IN_WEEK < GRID_DAYS => i + DAYS_IN_WEEK,
                    _ => i,
                }
            }
        };
        self.hover(Some(target), now, &mut on_hover);
    }

    fn hover<F: FnMut(HoverEvent)>(
        &mut self,
        target: Option<usize>,
        now: Instant,
        on_hover: &mut F,
    ) {
        if self.hovered == target {
            return;
        }
        if let Some(cell) = self.hovered.and_then(|i| self.cells.get_mut(i)) {
            cell.pointer_leave(now, on_hover);
        }
        self.hovered = None;
        if let Some(i) = target {
            if let Some(cell) = self.cells.get_mut(i) {
                cell.pointer_enter(now, on_hover);
                self.hovered = Some(i);
            }
        }
    }

    pub(crate) fn is_animating(&self, now: Instant) -> bool {
        self.cells.iter().any(|c| c.is_animating(now))
    }
}

/// Draws the month grid; the cells are drawn in source order, seven to a row
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct CalendarGrid {
    now: Instant,
}

impl CalendarGrid {
    pub(crate) fn new(now: Instant) -> CalendarGrid {
        CalendarGrid { now }
    }
}

impl StatefulWidget for CalendarGrid {
    type State = GridState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut GridState) {
        let origin = area.as_position();
        for (i, cell) in state.cells.iter().enumerate() {
            let rect = cell_rect(origin, i).intersection(area);
            if !rect.is_empty() {
                cell.render(rect, buf, self.now);
            }
        }
    }
}

/// The row of weekday names shown above the grid
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct WeekdayHeader;

impl Widget for WeekdayHeader {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut canvas = BufferCanvas::new(area, buf);
        for (col, name) in std::iter::zip(0u16.., weekday_names()) {
            let x = col * (CELL_WIDTH + COLUMN_GAP);
            let text = format!("{name:^width$}", width = usize::from(CELL_WIDTH));
            canvas.mvprint(0, x, text, WEEKDAY_STYLE);
        }
    }
}
