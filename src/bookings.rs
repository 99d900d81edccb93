use crate::animation::{lerp, Transition, ON};
use crate::calendar::BufferCanvas;
use crate::data::{DayRecord, MeetingRecord};
use crate::theme::bookings::{
    BLURB_STYLE, BORDER_STYLE, FADED_STYLE, HEADING_STYLE, LOCATION_STYLE, MEETING_TITLE_STYLE,
    PARTICIPANTS_STYLE, WHEN_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{Margin, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, StatefulWidget, Widget},
};
use std::time::{Duration, Instant};

static HEADING: &str = "Bookings";

static BLURB: &str = "See upcoming and past events booked through your event type links.";

const LOCATION_ICON: &str = "▶ ";

/// How long the panel takes to fade and slide in or out
const PRESENCE_DURATION: Duration = Duration::from_millis(300);

/// How long each meeting entry takes to fade in once the panel opens
const ENTRY_DURATION: Duration = Duration::from_millis(200);

/// Delay between the reveals of consecutive meetings on the same day
const ENTRY_STAGGER: Duration = Duration::from_millis(50);

/// How long the listed days take to slide into a new order
const REORDER_DURATION: Duration = Duration::from_millis(300);

/// Number of lines the panel is shifted down by when fully hidden
const SLIDE_LINES: u16 = 2;

/// Below this level, the panel (or an entry) is drawn faded
const OPAQUE_LEVEL: u16 = ON / 2;

/// Lines above the bordered list: the heading, the blurb, and a blank line
const PREAMBLE_LINES: u16 = 3;

/// Number of lines scrolled by a page up/down
pub(crate) const PAGE_LINES: i32 = 10;

/// Returns the days that have meetings in the order they are listed in the
/// bookings panel: the order of `days`, except that the hovered day (if it
/// has meetings) comes first
pub(crate) fn sorted_days(
    days: &'static [DayRecord],
    hovered: Option<&str>,
) -> Vec<&'static DayRecord> {
    let mut listed = days.iter().filter(|d| d.has_meetings()).collect::<Vec<_>>();
    if let Some(label) = hovered {
        // Stable, so all other days keep their relative order
        listed.sort_by_key(|d| d.label != label);
    }
    listed
}

/// Number of lines taken up by a day's meetings and the rules between them
fn day_height(day: &DayRecord) -> u16 {
    let meetings = u16::try_from(day.meeting_count()).unwrap_or(u16::MAX);
    meetings.saturating_mul(5).saturating_sub(1)
}

/// A listed day and the line offsets it slides between when the list is
/// reordered
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct ListedDay {
    day: &'static DayRecord,
    from: u16,
    to: u16,
}

/// Returns the listed days in order, each at rest at its line offset within
/// the list.  Consecutive days are separated by a one-line rule.
fn arrange(days: &'static [DayRecord], hovered: Option<&str>) -> Vec<ListedDay> {
    let mut offset = 0u16;
    sorted_days(days, hovered)
        .into_iter()
        .map(|day| {
            let listed = ListedDay {
                day,
                from: offset,
                to: offset,
            };
            offset = offset.saturating_add(day_height(day)).saturating_add(1);
            listed
        })
        .collect()
}

/// State of the bookings panel: whether it is shown (and how far through
/// its entrance or exit it is), the order its days are listed in, and how
/// far the list is scrolled
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct BookingsPanel {
    days: &'static [DayRecord],
    presence: Transition,
    opened_at: Instant,
    hovered: Option<&'static str>,
    listed: Vec<ListedDay>,
    reorder: Transition,
    scroll: u16,
}

impl BookingsPanel {
    pub(crate) fn new(days: &'static [DayRecord], open: bool, now: Instant) -> BookingsPanel {
        BookingsPanel {
            days,
            presence: Transition::settled(open, PRESENCE_DURATION, now),
            opened_at: now,
            hovered: None,
            listed: arrange(days, None),
            reorder: Transition::settled(true, REORDER_DURATION, now),
            scroll: 0,
        }
    }

    pub(crate) fn set_open(&mut self, open: bool, now: Instant) {
        if open && !self.presence.target() {
            if self.presence.is_off(now) {
                self.opened_at = now;
                // A freshly opened list starts out in its final order
                for listed in &mut self.listed {
                    listed.from = listed.to;
                }
            }
            self.scroll = 0;
        }
        self.presence.set(open, now);
    }

    /// Floats the hovered day's meetings to the top of the list.  Every day
    /// whose position changes slides there from wherever it is drawn at
    /// `now`, and hovering a new day scrolls back to the top.
    pub(crate) fn set_hovered(&mut self, hovered: Option<&'static str>, now: Instant) {
        if self.hovered == hovered {
            return;
        }
        self.hovered = hovered;
        if hovered.is_some() {
            self.scroll = 0;
        }
        let level = self.reorder.level(now);
        let mut listed = arrange(self.days, hovered);
        for entry in &mut listed {
            if let Some(old) = self.listed.iter().find(|o| o.day.label == entry.day.label) {
                entry.from = lerp(old.from, old.to, level);
            }
        }
        if listed.iter().any(|l| l.from != l.to) {
            self.reorder = Transition::settled(false, REORDER_DURATION, now);
            self.reorder.set(true, now);
        }
        self.listed = listed;
    }

    /// Returns `true` if the panel should be drawn at all.  A closed panel
    /// stays mounted until its exit animation has finished.
    pub(crate) fn is_mounted(&self, now: Instant) -> bool {
        !self.presence.is_off(now)
    }

    /// How far the panel is through its entrance, from `OFF` (hidden) to `ON`
    pub(crate) fn presence_level(&self, now: Instant) -> u16 {
        self.presence.level(now)
    }

    pub(crate) fn is_animating(&self, now: Instant) -> bool {
        self.presence.is_running(now)
            || self.reorder.is_running(now)
            || (self.presence.target() && now < self.revealed_at())
    }

    pub(crate) fn scroll(&self) -> u16 {
        self.scroll
    }

    pub(crate) fn scroll_by(&mut self, delta: i32) {
        let scroll = i32::from(self.scroll).saturating_add(delta).max(0);
        self.scroll = u16::try_from(scroll).unwrap_or(u16::MAX);
    }

    // When the last meeting entry will have finished fading in
    fn revealed_at(&self) -> Instant {
        let most = self
            .days
            .iter()
            .map(DayRecord::meeting_count)
            .max()
            .unwrap_or(0)
            .saturating_sub(1);
        self.opened_at + ENTRY_DURATION + ENTRY_STAGGER * u32::try_from(most).unwrap_or(u32::MAX)
    }

    fn entry_level(&self, index: usize, now: Instant) -> u16 {
        let delay = ENTRY_STAGGER * u32::try_from(index).unwrap_or(u32::MAX);
        let mut reveal =
            Transition::settled(false, ENTRY_DURATION, self.opened_at).with_delay(delay);
        reveal.set(true, self.opened_at);
        reveal.level(now)
    }
}

/// Draws the bookings panel: a heading and the list of every meeting, with
/// the hovered day's meetings floated to the top
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct BookingsView {
    now: Instant,
}

impl BookingsView {
    pub(crate) fn new(now: Instant) -> BookingsView {
        BookingsView { now }
    }
}

impl StatefulWidget for BookingsView {
    type State = BookingsPanel;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut BookingsPanel) {
        if !state.is_mounted(self.now) {
            return;
        }
        let level = state.presence_level(self.now);
        let shift = lerp(SLIDE_LINES, 0, level).min(area.height);
        let area = Rect {
            y: area.y + shift,
            height: area.height - shift,
            ..area
        };
        let mut canvas = BufferCanvas::new(area, buf);
        canvas.mvprint(0, 0, HEADING, HEADING_STYLE);
        canvas.mvprint(1, 0, BLURB, BLURB_STYLE);
        let list_area = Rect {
            y: area.y.saturating_add(PREAMBLE_LINES),
            height: area.height.saturating_sub(PREAMBLE_LINES),
            ..area
        };
        if !list_area.is_empty() {
            let block = Block::bordered().border_style(BORDER_STYLE);
            let inner = block.inner(list_area).inner(Margin::new(1, 0));
            block.render(list_area, buf);
            let total = state
                .listed
                .last()
                .map_or(0, |l| l.to.saturating_add(day_height(l.day)));
            state.scroll = state.scroll.min(total.saturating_sub(inner.height));
            let slide = state.reorder.level(self.now);
            let last = state.listed.len().saturating_sub(1);
            // Drawn bottom-up so that a day floating to the top passes over
            // the ones it overtakes
            for (i, listed) in state.listed.iter().enumerate().rev() {
                let mut lines = Vec::new();
                for (j, meeting) in listed.day.meetings.iter().enumerate() {
                    if j > 0 {
                        lines.push(rule('─', inner.width));
                    }
                    let faded = state.entry_level(j, self.now) < OPAQUE_LEVEL;
                    lines.extend(meeting_lines(meeting, inner.width, faded));
                }
                if i < last {
                    lines.push(rule('═', inner.width));
                }
                let top = lerp(listed.from, listed.to, slide);
                for (line_no, line) in (top..).zip(lines) {
                    let Some(y) = line_no.checked_sub(state.scroll) else {
                        continue;
                    };
                    if y >= inner.height {
                        break;
                    }
                    let row = Rect {
                        y: inner.y + y,
                        height: 1,
                        ..inner
                    };
                    line.render(row, buf);
                }
            }
        }
        if level < OPAQUE_LEVEL {
            buf.set_style(area, FADED_STYLE);
        }
    }
}

fn rule(ch: char, width: u16) -> Line<'static> {
    Line::styled(String::from(ch).repeat(width.into()), BORDER_STYLE)
}

/// Lays out one meeting as four lines: when, what, who, and where
fn meeting_lines(meeting: &MeetingRecord, width: u16, faded: bool) -> [Line<'static>; 4] {
    let style = |s: Style| if faded { s.patch(FADED_STYLE) } else { s };
    let used = meeting.date.chars().count() + meeting.time_range.chars().count();
    let gap = usize::from(width).saturating_sub(used).max(1);
    [
        Line::from_iter([
            Span::styled(meeting.date, style(WHEN_STYLE)),
            Span::raw(" ".repeat(gap)),
            Span::styled(meeting.time_range, style(WHEN_STYLE)),
        ]),
        Line::styled(meeting.title, style(MEETING_TITLE_STYLE)),
        Line::styled(meeting.participants.join(", "), style(PARTICIPANTS_STYLE)),
        Line::from_iter([
            Span::styled(LOCATION_ICON, style(LOCATION_STYLE)),
            Span::styled(meeting.location, style(LOCATION_STYLE)),
        ]),
    ]
}
