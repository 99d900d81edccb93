use crate::animation::{lerp, Transition};
use crate::calendar::BufferCanvas;
use crate::theme::toggle::{FRAME_STYLE, ICON_STYLE, PILL_STYLE};
use ratatui::{buffer::Buffer, layout::Rect, widgets::StatefulWidget};
use std::time::{Duration, Instant};

/*
 * [ ▥   ▦ ]
 *  ^^^ ^^^
 *  pill position when compact / when expanded
 */

pub(crate) const TOGGLE_WIDTH: u16 = 9;

const SLIDE_DURATION: Duration = Duration::from_millis(300);

const COMPACT_ICON: &str = "▥";

const EXPANDED_ICON: &str = "▦";

const PILL_WIDTH: u16 = 3;

/// Column of the pill's left edge when the view is compact
const PILL_COMPACT_X: u16 = 1;

/// Column of the pill's left edge when the view is expanded
const PILL_EXPANDED_X: u16 = 5;

/// Animation state of the compact/expanded view button
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct ViewToggle {
    slide: Transition,
}

impl ViewToggle {
    pub(crate) fn new(expanded: bool, now: Instant) -> ViewToggle {
        ViewToggle {
            slide: Transition::settled(expanded, SLIDE_DURATION, now),
        }
    }

    pub(crate) fn set(&mut self, expanded: bool, now: Instant) {
        self.slide.set(expanded, now);
    }

    pub(crate) fn is_animating(&self, now: Instant) -> bool {
        self.slide.is_running(now)
    }

    fn pill_x(&self, now: Instant) -> u16 {
        lerp(PILL_COMPACT_X, PILL_EXPANDED_X, self.slide.level(now))
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct ToggleButton {
    now: Instant,
}

impl ToggleButton {
    pub(crate) fn new(now: Instant) -> ToggleButton {
        ToggleButton { now }
    }
}

impl StatefulWidget for ToggleButton {
    type State = ViewToggle;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut ViewToggle) {
        let mut canvas = BufferCanvas::new(area, buf);
        canvas.mvprint(0, 0, "[", FRAME_STYLE);
        canvas.mvprint(0, PILL_COMPACT_X + 1, COMPACT_ICON, ICON_STYLE);
        canvas.mvprint(0, PILL_EXPANDED_X + 1, EXPANDED_ICON, ICON_STYLE);
        canvas.mvprint(0, TOGGLE_WIDTH - 1, "]", FRAME_STYLE);
        canvas.fill(0, state.pill_x(self.now), PILL_WIDTH, 1, PILL_STYLE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw(state: &mut ViewToggle, now: Instant) -> Buffer {
        let area = Rect::new(0, 0, TOGGLE_WIDTH, 1);
        let mut buf = Buffer::empty(area);
        ToggleButton::new(now).render(area, &mut buf, state);
        buf
    }

    fn pill_columns(buf: &Buffer) -> Vec<u16> {
        (0..TOGGLE_WIDTH)
            .filter(|&x| Some(buf[(x, 0)].bg) == PILL_STYLE.bg)
            .collect()
    }

    #[test]
    fn test_compact() {
        let now = Instant::now();
        let buf = draw(&mut ViewToggle::new(false, now), now);
        let text: String = (0..TOGGLE_WIDTH).map(|x| buf[(x, 0)].symbol()).collect();
        assert_eq!(text, "[ ▥   ▦ ]");
        assert_eq!(pill_columns(&buf), [1, 2, 3]);
    }

    #[test]
    fn test_slides_to_expanded() {
        let t0 = Instant::now();
        let mut state = ViewToggle::new(false, t0);
        state.set(true, t0);
        assert!(state.is_animating(t0));
        let mid = pill_columns(&draw(&mut state, t0 + Duration::from_millis(100)));
        assert_eq!(mid.len(), 3);
        assert!(mid[0] > 1 && mid[0] < 5, "pill at {mid:?}");
        let end = t0 + SLIDE_DURATION;
        assert!(!state.is_animating(end));
        assert_eq!(pill_columns(&draw(&mut state, end)), [5, 6, 7]);
    }
}
