use std::time::{Duration, Instant};

/// Fully-off level of a [`Transition`]
pub(crate) const OFF: u16 = 0;

/// Fully-on level of a [`Transition`]
pub(crate) const ON: u16 = 1000;

/// A two-state visual property that eases between "off" and "on" over time.
///
/// The level is measured in thousandths: `OFF` (0) is the resting state and
/// `ON` (1000) is the active state.  Retargeting a transition while it is in
/// flight starts the new transition from wherever the old one currently is,
/// so an interrupted hover reverses smoothly instead of jumping.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Transition {
    from: u16,
    to: u16,
    start: Instant,
    delay: Duration,
    duration: Duration,
}

impl Transition {
    /// Creates a transition resting at the given state
    pub(crate) fn settled(on: bool, duration: Duration, now: Instant) -> Transition {
        let level = if on { ON } else { OFF };
        Transition {
            from: level,
            to: level,
            start: now,
            delay: Duration::ZERO,
            duration,
        }
    }

    /// Returns a copy of the transition whose future retargetings wait
    /// `delay` before starting to move
    pub(crate) fn with_delay(mut self, delay: Duration) -> Transition {
        self.delay = delay;
        self
    }

    /// Starts moving towards the given state.  Does nothing if the
    /// transition is already headed there.
    pub(crate) fn set(&mut self, on: bool, now: Instant) {
        let target = if on { ON } else { OFF };
        if self.to != target {
            self.from = self.level(now);
            self.to = target;
            self.start = now;
        }
    }

    pub(crate) fn target(&self) -> bool {
        self.to == ON
    }

    /// Returns the eased level at `now`, from `OFF` to `ON`
    pub(crate) fn level(&self, now: Instant) -> u16 {
        let p = ease_out(self.progress(now));
        let from = i64::from(self.from);
        let to = i64::from(self.to);
        let level = from + (to - from) * i64::from(p) / i64::from(ON);
        u16::try_from(level.clamp(i64::from(OFF), i64::from(ON))).unwrap_or(ON)
    }

    pub(crate) fn is_running(&self, now: Instant) -> bool {
        self.from != self.to && self.progress(now) < ON
    }

    /// Returns `true` if the transition is at rest in the "off" state
    pub(crate) fn is_off(&self, now: Instant) -> bool {
        !self.target() && !self.is_running(now)
    }

    // Linear progress through the transition in thousandths
    fn progress(&self, now: Instant) -> u16 {
        if self.from == self.to {
            return ON;
        }
        let Some(begin) = self.start.checked_add(self.delay) else {
            return ON;
        };
        let elapsed = now.saturating_duration_since(begin).as_millis();
        let total = self.duration.as_millis();
        if total == 0 || elapsed >= total {
            return ON;
        }
        u16::try_from(elapsed * u128::from(ON) / total).unwrap_or(ON)
    }
}

/// Cubic ease-out on a level in thousandths
fn ease_out(p: u16) -> u16 {
    let rest = u64::from(ON - p.min(ON));
    let eased = u64::from(ON) - rest * rest * rest / 1_000_000;
    u16::try_from(eased).unwrap_or(ON)
}

/// Linearly interpolates between two coordinates by a level in thousandths
pub(crate) fn lerp(from: u16, to: u16, level: u16) -> u16 {
    let from = i32::from(from);
    let to = i32::from(to);
    let value = from + (to - from) * i32::from(level.min(ON)) / i32::from(ON);
    u16::try_from(value).unwrap_or(0)
}
