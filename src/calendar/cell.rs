use super::canvas::BufferCanvas;
use crate::animation::{lerp, Transition};
use crate::data::{DayRecord, StyleVariant};
use crate::theme::{BADGE_STYLE, DIM_DAY_STYLE, NORMAL_DAY_STYLE};
use ratatui::{buffer::Buffer, layout::Rect, style::Style};
use std::time::{Duration, Instant};

/// Width of a day cell in columns
pub(crate) const CELL_WIDTH: u16 = 7;

/// Height of a day cell in lines
pub(crate) const CELL_HEIGHT: u16 = 3;

/// How long the badge takes to grow into the circle (and back)
const MORPH_DURATION: Duration = Duration::from_millis(200);

/// Resting geometry of the meeting indicator: a small badge in the
/// bottom-right corner of the cell
const BADGE: IndicatorShape = IndicatorShape {
    x: 4,
    y: 2,
    width: 3,
};

/// Hovered geometry of the meeting indicator: a larger circle covering the
/// middle of the cell
const CIRCLE: IndicatorShape = IndicatorShape {
    x: 1,
    y: 1,
    width: 5,
};

/// Line of the cell on which the day's label is written
const LABEL_LINE: u16 = 1;

/// Notification sent from a day cell up to whoever owns the hovered-day key
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum HoverEvent {
    Entered(&'static str),
    Left,
}

impl HoverEvent {
    pub(crate) fn day(self) -> Option<&'static str> {
        match self {
            HoverEvent::Entered(label) => Some(label),
            HoverEvent::Left => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct IndicatorShape {
    x: u16,
    y: u16,
    width: u16,
}

impl IndicatorShape {
    fn between(from: IndicatorShape, to: IndicatorShape, level: u16) -> IndicatorShape {
        IndicatorShape {
            x: lerp(from.x, to.x, level),
            y: lerp(from.y, to.y, level),
            width: lerp(from.width, to.width, level),
        }
    }

    fn text(self, count: usize) -> String {
        if self.width >= CIRCLE.width {
            let inner = usize::from(self.width - 2);
            format!("({count:^inner$})")
        } else {
            let width = usize::from(self.width);
            format!("{count:^width$}")
        }
    }
}

/// One cell of the month grid and the animation state of its indicator
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct DayCell {
    day: &'static DayRecord,
    // The badge and the circle are two looks of the same indicator; this
    // tracks how far it has morphed from one into the other.
    indicator: Transition,
}

impl DayCell {
    pub(crate) fn new(day: &'static DayRecord, now: Instant) -> DayCell {
        DayCell {
            day,
            indicator: Transition::settled(false, MORPH_DURATION, now),
        }
    }

    pub(crate) fn pointer_enter<F: FnMut(HoverEvent)>(&mut self, now: Instant, on_hover: &mut F) {
        if self.day.has_meetings() {
            self.indicator.set(true, now);
        }
        on_hover(HoverEvent::Entered(self.day.label));
    }

    pub(crate) fn pointer_leave<F: FnMut(HoverEvent)>(&mut self, now: Instant, on_hover: &mut F) {
        if self.day.has_meetings() {
            self.indicator.set(false, now);
        }
        on_hover(HoverEvent::Left);
    }

    pub(crate) fn is_animating(&self, now: Instant) -> bool {
        self.indicator.is_running(now)
    }

    fn base_style(&self) -> Style {
        match self.day.style {
            StyleVariant::Normal => NORMAL_DAY_STYLE,
            StyleVariant::Dim => DIM_DAY_STYLE,
        }
    }

    /// Draws the cell into `area`, which is normally `CELL_WIDTH` by
    /// `CELL_HEIGHT`; anything not fitting is clipped
    pub(crate) fn render(&self, area: Rect, buf: &mut Buffer, now: Instant) {
        let style = self.base_style();
        let mut canvas = BufferCanvas::new(area, buf);
        canvas.fill(0, 0, CELL_WIDTH, CELL_HEIGHT, style);
        if !self.day.is_out_of_month() {
            let width = u16::try_from(self.day.label.len()).unwrap_or(CELL_WIDTH);
            let x = CELL_WIDTH.saturating_sub(width) / 2;
            canvas.mvprint(LABEL_LINE, x, self.day.label, style);
        }
        if self.day.has_meetings() {
            let level = self.indicator.level(now);
            let shape = IndicatorShape::between(BADGE, CIRCLE, level);
            let text = shape.text(self.day.meeting_count());
            canvas.mvprint(shape.y, shape.x, text, BADGE_STYLE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{MeetingRecord, DAYS};

    static SPILLOVER_MEETINGS: [MeetingRecord; 2] = [
        MeetingRecord {
            date: "Sat, 3 Dec",
            time_range: "9:00 AM - 10:00 AM",
            title: "Quarterly Planning",
            participants: &["Alice Johnson", "Mark Lee"],
            location: "Zoom",
        },
        MeetingRecord {
            date: "Sat, 3 Dec",
            time_range: "1:00 PM - 2:00 PM",
            title: "Retrospective",
            participants: &["Tom Hanks"],
            location: "In-person",
        },
    ];

    static BOOKED_SPILLOVER: DayRecord = DayRecord {
        label: "+3",
        style: StyleVariant::Dim,
        meetings: &SPILLOVER_MEETINGS,
    };

    fn day(label: &str) -> &'static DayRecord {
        DAYS.iter()
            .find(|d| d.label == label)
            .expect("label should be in the table")
    }

    fn lines(cell: &DayCell, now: Instant) -> Vec<String> {
        let area = Rect::new(0, 0, CELL_WIDTH, CELL_HEIGHT);
        let mut buf = Buffer::empty(area);
        cell.render(area, &mut buf, now);
        (0..CELL_HEIGHT)
            .map(|y| (0..CELL_WIDTH).map(|x| buf[(x, y)].symbol()).collect())
            .collect()
    }

    #[test]
    fn test_plain_day() {
        let cell = DayCell::new(day("01"), Instant::now());
        assert_eq!(lines(&cell, Instant::now()), ["       ", "  01   ", "       "]);
    }

    #[test]
    fn test_badge() {
        let cell = DayCell::new(day("08"), Instant::now());
        assert_eq!(lines(&cell, Instant::now()), ["       ", "  08   ", "     3 "]);
    }

    #[test]
    fn test_out_of_month_label_hidden() {
        let t0 = Instant::now();
        for label in ["-3", "-2", "-1", "+1", "+2"] {
            let cell = DayCell::new(day(label), t0);
            assert_eq!(lines(&cell, t0), ["       ", "       ", "       "]);
        }
    }

    #[test]
    fn test_out_of_month_badge_shown() {
        let t0 = Instant::now();
        let mut cell = DayCell::new(&BOOKED_SPILLOVER, t0);
        assert_eq!(lines(&cell, t0), ["       ", "       ", "     2 "]);
        cell.pointer_enter(t0, &mut |_| ());
        let done = t0 + MORPH_DURATION;
        assert_eq!(lines(&cell, done), ["       ", " ( 2 ) ", "       "]);
    }

    #[test]
    fn test_hover_morphs_into_circle() {
        let t0 = Instant::now();
        let mut cell = DayCell::new(day("21"), t0);
        let mut events = Vec::new();
        cell.pointer_enter(t0, &mut |ev| events.push(ev));
        assert!(cell.is_animating(t0));
        assert_eq!(events, [HoverEvent::Entered("21")]);
        let done = t0 + MORPH_DURATION;
        assert!(!cell.is_animating(done));
        assert_eq!(lines(&cell, done), ["       ", " ( 5 ) ", "       "]);
        cell.pointer_leave(done, &mut |ev| events.push(ev));
        assert_eq!(events, [HoverEvent::Entered("21"), HoverEvent::Left]);
        let back = done + MORPH_DURATION;
        assert_eq!(lines(&cell, back), ["       ", "  21   ", "     5 "]);
    }

    #[test]
    fn test_hover_without_meetings_changes_nothing() {
        let t0 = Instant::now();
        let mut cell = DayCell::new(day("13"), t0);
        let before = lines(&cell, t0);
        let mut events = Vec::new();
        cell.pointer_enter(t0, &mut |ev| events.push(ev));
        assert!(!cell.is_animating(t0));
        assert_eq!(lines(&cell, t0 + MORPH_DURATION), before);
        assert_eq!(events, [HoverEvent::Entered("13")]);
    }

    #[test]
    fn test_styles() {
        let area = Rect::new(0, 0, CELL_WIDTH, CELL_HEIGHT);
        let mut buf = Buffer::empty(area);
        DayCell::new(day("04"), Instant::now()).render(area, &mut buf, Instant::now());
        assert_eq!(buf[(0, 0)].bg, DIM_DAY_STYLE.bg.unwrap_or_default());
        let mut buf = Buffer::empty(area);
        DayCell::new(day("02"), Instant::now()).render(area, &mut buf, Instant::now());
        assert_eq!(buf[(0, 0)].bg, NORMAL_DAY_STYLE.bg.unwrap_or_default());
        assert_eq!(buf[(5, 2)].bg, BADGE_STYLE.bg.unwrap_or_default());
    }
}
