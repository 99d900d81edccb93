use ratatui::{buffer::Buffer, layout::Rect, style::Style, text::Span, widgets::Widget};

/// A drawing surface addressed relative to the top-left corner of `area`.
/// Anything drawn outside of `area` (or outside of the buffer) is clipped.
#[derive(Debug, Eq, PartialEq)]
pub(crate) struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    pub(crate) fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        let area = area.intersection(*buf.area());
        Self { area, buf }
    }

    pub(crate) fn fill(&mut self, y: u16, x: u16, width: u16, height: u16, style: Style) {
        if y < self.area.height && x < self.area.width {
            let rect = Rect {
                x: x + self.area.x,
                y: y + self.area.y,
                width: width.min(self.area.width - x),
                height: height.min(self.area.height - y),
            };
            self.buf.set_style(rect, style);
        }
    }

    pub(crate) fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Style) {
        if y < self.area.height && x < self.area.width {
            // Rendering a Span truncates text that extends beyond the
            // canvas, as long as the Rect it's given is inside the buffer.
            Span::styled(s.as_ref(), style).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: self.area.width - x,
                    height: 1,
                },
                self.buf,
            );
        }
    }
}
