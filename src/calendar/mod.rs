mod canvas;
mod cell;
mod grid;
pub(crate) use self::canvas::BufferCanvas;
pub(crate) use self::cell::HoverEvent;
pub(crate) use self::grid::{CalendarGrid, GridState, Step, WeekdayHeader, GRID_HEIGHT, GRID_WIDTH};
