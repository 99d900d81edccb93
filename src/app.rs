use crate::bookings::{BookingsPanel, BookingsView, PAGE_LINES};
use crate::calendar::{BufferCanvas, CalendarGrid, GridState, HoverEvent, Step, WeekdayHeader};
use crate::data::{DayRecord, GRID_DAYS, SHEET_TITLE, SHEET_YEAR};
use crate::help::Help;
use crate::screen::ScreenLayout;
use crate::theme::{BASE_STYLE, TITLE_STYLE, YEAR_STYLE};
use crate::toggle::{ToggleButton, ViewToggle};
use crossterm::event::{
    poll, read, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Position, Rect},
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// How long to wait for input before drawing the next frame of a running
/// animation
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Lines scrolled per mouse wheel notch
const WHEEL_LINES: i32 = 3;

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App {
    expanded: bool,
    hovered_day: Option<&'static str>,
    grid: GridState,
    toggle: ViewToggle,
    bookings: BookingsPanel,
    // Where everything was drawn last, for mapping mouse positions
    layout: Option<ScreenLayout>,
    // Last reported mouse position, while the mouse is driving the hover
    pointer: Option<Position>,
    now: Instant,
    state: AppState,
}

impl App {
    pub(crate) fn new(days: &'static [DayRecord; GRID_DAYS], expanded: bool, now: Instant) -> App {
        App {
            expanded,
            hovered_day: None,
            grid: GridState::new(days, now),
            toggle: ViewToggle::new(expanded, now),
            bookings: BookingsPanel::new(days, expanded, now),
            layout: None,
            pointer: None,
            now,
            state: AppState::Browsing,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()>
    where
        io::Error: From<B::Error>,
    {
        while !self.quitting() {
            self.now = Instant::now();
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        log::info!("event=quit");
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        io::Error: From<B::Error>,
    {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        // While something is moving, wake up in time for the next frame even
        // if there's no input
        if self.is_animating() && !poll(FRAME_INTERVAL)? {
            return Ok(());
        }
        let event = read()?;
        self.now = Instant::now();
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = event.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        } else {
            match event {
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                Event::FocusLost => self.pointer_left(),
                // else: Redraw on resize, and we might as well redraw on
                // other stuff too
                _ => (),
            }
        }
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.state {
            AppState::Browsing => match key {
                KeyCode::Left => self.step_pointer(Step::Left),
                KeyCode::Right => self.step_pointer(Step::Right),
                KeyCode::Up => self.step_pointer(Step::Up),
                KeyCode::Down => self.step_pointer(Step::Down),
                KeyCode::Char('0') | KeyCode::Home => {
                    self.pointer_left();
                    true
                }
                KeyCode::Char('v' | ' ') | KeyCode::Enter => {
                    self.toggle_view();
                    true
                }
                KeyCode::Char('j') => self.scroll_bookings(1),
                KeyCode::Char('k') => self.scroll_bookings(-1),
                KeyCode::Char('z') | KeyCode::PageDown => self.scroll_bookings(PAGE_LINES),
                KeyCode::Char('w') | KeyCode::PageUp => self.scroll_bookings(-PAGE_LINES),
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Browsing;
                true
            }
            AppState::Quitting => false,
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.state != AppState::Browsing {
            return;
        }
        let Some(layout) = self.layout else {
            return;
        };
        let pos = Position::new(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                self.pointer = Some(pos);
                self.hover_at(layout.grid, pos);
            }
            MouseEventKind::Down(MouseButton::Left) if layout.toggle.contains(pos) => {
                self.toggle_view();
            }
            MouseEventKind::ScrollDown if over(layout.panel, pos) => {
                self.scroll_bookings(WHEEL_LINES);
            }
            MouseEventKind::ScrollUp if over(layout.panel, pos) => {
                self.scroll_bookings(-WHEEL_LINES);
            }
            _ => (),
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn is_animating(&self) -> bool {
        self.grid.is_animating(self.now)
            || self.toggle.is_animating(self.now)
            || self.bookings.is_animating(self.now)
    }

    fn toggle_view(&mut self) {
        self.expanded = !self.expanded;
        log::info!("event=toggle_view expanded={}", self.expanded);
        self.toggle.set(self.expanded, self.now);
        self.bookings.set_open(self.expanded, self.now);
    }

    fn hover_at(&mut self, grid_area: Rect, pos: Position) {
        let now = self.now;
        let (hovered_day, bookings) = (&mut self.hovered_day, &mut self.bookings);
        self.grid.pointer_moved(grid_area, pos, now, |ev| {
            on_hover(hovered_day, bookings, ev, now);
        });
    }

    fn step_pointer(&mut self, step: Step) -> bool {
        // The keyboard takes over the hover until the mouse moves again
        self.pointer = None;
        let now = self.now;
        let (hovered_day, bookings) = (&mut self.hovered_day, &mut self.bookings);
        self.grid.step_pointer(step, now, |ev| {
            on_hover(hovered_day, bookings, ev, now);
        });
        true
    }

    fn pointer_left(&mut self) {
        self.pointer = None;
        let now = self.now;
        let (hovered_day, bookings) = (&mut self.hovered_day, &mut self.bookings);
        self.grid.pointer_left(now, |ev| on_hover(hovered_day, bookings, ev, now));
    }

    // Returns `false` if there's no bookings list to scroll
    fn scroll_bookings(&mut self, lines: i32) -> bool {
        if self.expanded {
            self.bookings.scroll_by(lines);
            true
        } else {
            false
        }
    }
}

/// Receives hover notifications bubbling up from the grid's cells
fn on_hover(
    hovered_day: &mut Option<&'static str>,
    bookings: &mut BookingsPanel,
    ev: HoverEvent,
    now: Instant,
) {
    let day = ev.day();
    if *hovered_day != day {
        log::debug!("event=hover day={day:?}");
        *hovered_day = day;
        bookings.set_hovered(day, now);
    }
}

fn over(area: Option<Rect>, pos: Position) -> bool {
    area.is_some_and(|r| r.contains(pos))
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let now = self.now;
        let layout = ScreenLayout::new(area, self.bookings.presence_level(now));
        // The grid can glide out from under a resting mouse
        if let Some(pos) = self.pointer {
            if self.layout.is_some_and(|old| old.grid != layout.grid) {
                self.hover_at(layout.grid, pos);
            }
        }
        let mut title = BufferCanvas::new(layout.title, buf);
        title.mvprint(0, 0, SHEET_TITLE, TITLE_STYLE);
        let year_x = u16::try_from(SHEET_TITLE.len() + 1).unwrap_or(u16::MAX);
        title.mvprint(0, year_x, SHEET_YEAR.to_string(), YEAR_STYLE);
        ToggleButton::new(now).render(layout.toggle, buf, &mut self.toggle);
        WeekdayHeader.render(layout.weekdays, buf);
        CalendarGrid::new(now).render(layout.grid, buf, &mut self.grid);
        if let Some(panel) = layout.panel {
            BookingsView::new(now).render(panel, buf, &mut self.bookings);
        }
        self.layout = Some(layout);
        if self.state == AppState::Helping {
            Help(BASE_STYLE).render(area, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Browsing,
    Helping,
    Quitting,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DAYS;

    fn render(app: &mut App, width: u16, height: u16) -> Vec<String> {
        let area = Rect::new(0, 0, width, height);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        (0..height)
            .map(|y| (0..width).map(|x| buffer[(x, y)].symbol()).collect())
            .collect()
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn later(app: &mut App, ms: u64) {
        app.now += Duration::from_millis(ms);
    }

    fn grid_origin(app: &App) -> (u16, u16) {
        let layout = app.layout.expect("app should have been drawn");
        (layout.grid.x, layout.grid.y)
    }

    fn first_listed_title(rows: &[String]) -> Option<&'static str> {
        let titles = DAYS
            .iter()
            .flat_map(|d| d.meetings)
            .map(|m| m.title)
            .collect::<Vec<_>>();
        rows.iter()
            .find_map(|r| titles.iter().copied().find(|&t| r.contains(t)))
    }

    #[test]
    fn test_compact() {
        let mut app = App::new(&DAYS, false, Instant::now());
        let rows = render(&mut app, 80, 24);
        assert_eq!(&rows[0][..19], "            LN 2024");
        assert!(rows[0].contains("[ ▥   ▦ ]"));
        assert_eq!(rows[1].trim(), "");
        assert_eq!(
            rows[2].trim(),
            "SUN     MON     TUE     WED     THU     FRI     SAT"
        );
        assert!(rows[4].contains("01      02      03      04"));
        assert!(rows.iter().all(|r| !r.contains("Bookings")));
    }

    #[test]
    fn test_toggle_twice_restores_compact() {
        let mut app = App::new(&DAYS, false, Instant::now());
        let compact = render(&mut app, 120, 40);
        assert!(app.handle_key(KeyCode::Char('v')));
        assert!(app.expanded);
        assert!(app.is_animating());
        later(&mut app, 1000);
        let expanded = render(&mut app, 120, 40);
        assert!(expanded.iter().any(|r| r.contains("Bookings")));
        assert!(app.handle_key(KeyCode::Char('v')));
        assert!(!app.expanded);
        later(&mut app, 100);
        assert!(render(&mut app, 120, 40)
            .iter()
            .any(|r| r.contains("Bookings")));
        later(&mut app, 1000);
        assert!(!app.is_animating());
        assert_eq!(render(&mut app, 120, 40), compact);
    }

    #[test]
    fn test_click_toggle_button() {
        let mut app = App::new(&DAYS, false, Instant::now());
        render(&mut app, 80, 24);
        let toggle = app.layout.expect("app should have been drawn").toggle;
        // Clicking elsewhere does nothing
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 0, 0));
        assert!(!app.expanded);
        app.handle_mouse(mouse(
            MouseEventKind::Down(MouseButton::Left),
            toggle.x + 4,
            toggle.y,
        ));
        assert!(app.expanded);
        app.handle_mouse(mouse(
            MouseEventKind::Down(MouseButton::Left),
            toggle.x,
            toggle.y,
        ));
        assert!(!app.expanded);
    }

    #[test]
    fn test_hover_floats_day_to_top() {
        let mut app = App::new(&DAYS, true, Instant::now());
        later(&mut app, 1000);
        let rows = render(&mut app, 120, 40);
        assert_eq!(first_listed_title(&rows), Some("Design Review Meeting"));
        let (x, y) = grid_origin(&app);
        // "08" is the fourth day of the second week
        app.handle_mouse(mouse(MouseEventKind::Moved, x + 3 * 8 + 1, y + 4 + 1));
        assert_eq!(app.hovered_day, Some("08"));
        later(&mut app, 1000);
        let rows = render(&mut app, 120, 40);
        assert_eq!(first_listed_title(&rows), Some("Strategy Meeting"));
        assert!(rows[usize::from(y) + 5].contains("( 3 )"));
        // Into the gap between weeks, which belongs to no day
        app.handle_mouse(mouse(MouseEventKind::Moved, x + 3 * 8 + 1, y + 3));
        assert_eq!(app.hovered_day, None);
        later(&mut app, 1000);
        let rows = render(&mut app, 120, 40);
        assert_eq!(first_listed_title(&rows), Some("Design Review Meeting"));
        assert!(!rows[usize::from(y) + 5].contains("( 3 )"));
    }

    #[test]
    fn test_hover_without_meetings_keeps_order() {
        let mut app = App::new(&DAYS, true, Instant::now());
        later(&mut app, 1000);
        render(&mut app, 120, 40);
        let (x, y) = grid_origin(&app);
        // "01"
        app.handle_mouse(mouse(MouseEventKind::Moved, x + 3 * 8, y));
        assert_eq!(app.hovered_day, Some("01"));
        let rows = render(&mut app, 120, 40);
        assert_eq!(first_listed_title(&rows), Some("Design Review Meeting"));
    }

    #[test]
    fn test_hover_follows_gliding_grid() {
        let mut app = App::new(&DAYS, true, Instant::now());
        later(&mut app, 1000);
        render(&mut app, 120, 40);
        let (x, y) = grid_origin(&app);
        // Last day of the second week
        app.handle_mouse(mouse(MouseEventKind::Moved, x + 6 * 8 + 1, y + 5));
        assert_eq!(app.hovered_day, Some("11"));
        // Closing the panel recenters the grid under the resting mouse
        assert!(app.handle_key(KeyCode::Char('v')));
        later(&mut app, 150);
        render(&mut app, 120, 40);
        later(&mut app, 1000);
        render(&mut app, 120, 40);
        assert_eq!(grid_origin(&app), (x + 29, y));
        assert_eq!(app.hovered_day, Some("07"));
    }

    #[test]
    fn test_keyboard_hover_ignores_glide() {
        let mut app = App::new(&DAYS, true, Instant::now());
        later(&mut app, 1000);
        render(&mut app, 120, 40);
        let (x, y) = grid_origin(&app);
        app.handle_mouse(mouse(MouseEventKind::Moved, x + 6 * 8 + 1, y + 5));
        assert!(app.handle_key(KeyCode::Left));
        assert_eq!(app.hovered_day, Some("10"));
        assert!(app.handle_key(KeyCode::Char('v')));
        later(&mut app, 1000);
        render(&mut app, 120, 40);
        assert_eq!(app.hovered_day, Some("10"));
    }

    #[test]
    fn test_keyboard_pointer() {
        let mut app = App::new(&DAYS, false, Instant::now());
        assert!(app.handle_key(KeyCode::Right));
        assert_eq!(app.hovered_day, Some("-3"));
        assert!(app.handle_key(KeyCode::Down));
        assert_eq!(app.hovered_day, Some("05"));
        assert!(app.handle_key(KeyCode::Home));
        assert_eq!(app.hovered_day, None);
    }

    #[test]
    fn test_scrolling_needs_panel() {
        let mut app = App::new(&DAYS, false, Instant::now());
        assert!(!app.handle_key(KeyCode::PageDown));
        app.handle_key(KeyCode::Enter);
        assert!(app.handle_key(KeyCode::PageDown));
        assert_eq!(app.bookings.scroll(), 10);
        assert!(app.handle_key(KeyCode::Char('k')));
        assert_eq!(app.bookings.scroll(), 9);
    }

    #[test]
    fn test_wheel_scrolls_only_over_panel() {
        let mut app = App::new(&DAYS, true, Instant::now());
        later(&mut app, 1000);
        render(&mut app, 120, 40);
        let panel = app
            .layout
            .and_then(|l| l.panel)
            .expect("panel should be laid out");
        app.handle_mouse(mouse(MouseEventKind::ScrollDown, 0, 0));
        assert_eq!(app.bookings.scroll(), 0);
        app.handle_mouse(mouse(MouseEventKind::ScrollDown, panel.x + 2, panel.y + 6));
        assert_eq!(app.bookings.scroll(), 3);
    }

    #[test]
    fn test_help() {
        let mut app = App::new(&DAYS, false, Instant::now());
        assert!(app.handle_key(KeyCode::Char('?')));
        let rows = render(&mut app, 80, 24);
        assert!(rows.iter().any(|r| r.contains(" Commands ")));
        // Mouse input is ignored while the help is up
        let toggle = app.layout.expect("app should have been drawn").toggle;
        app.handle_mouse(mouse(
            MouseEventKind::Down(MouseButton::Left),
            toggle.x,
            toggle.y,
        ));
        assert!(!app.expanded);
        assert!(app.handle_key(KeyCode::Char('x')));
        assert!(render(&mut app, 80, 24)
            .iter()
            .all(|r| !r.contains(" Commands ")));
    }

    #[test]
    fn test_quit() {
        let mut app = App::new(&DAYS, false, Instant::now());
        assert!(!app.handle_key(KeyCode::Char('x')));
        assert!(app.handle_key(KeyCode::Char('q')));
        assert!(app.quitting());
        assert!(!app.handle_key(KeyCode::Char('q')));
    }
}
