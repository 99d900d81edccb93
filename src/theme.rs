use ratatui::style::{Color, Modifier, Style};

const NEAR_BLACK: Color = Color::Rgb(0x1e, 0x1e, 0x1e);
const FAINT_ZINC: Color = Color::Rgb(0x0d, 0x0d, 0x0e);
const ZINC_300: Color = Color::Rgb(0xd4, 0xd4, 0xd8);
const ZINC_600: Color = Color::Rgb(0x52, 0x52, 0x5b);
const ZINC_700: Color = Color::Rgb(0x3f, 0x3f, 0x46);
const RULE_GRAY: Color = Color::Rgb(0x32, 0x32, 0x32);
const LINK_BLUE: Color = Color::Rgb(0x3b, 0x82, 0xf6);

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const TITLE_STYLE: Style = Style::new().fg(ZINC_300).add_modifier(Modifier::BOLD);

pub(crate) const YEAR_STYLE: Style = TITLE_STYLE.fg(ZINC_700);

pub(crate) const WEEKDAY_STYLE: Style = Style::new().fg(Color::White).bg(RULE_GRAY);

pub(crate) const NORMAL_DAY_STYLE: Style = Style::new().fg(Color::White).bg(NEAR_BLACK);

pub(crate) const DIM_DAY_STYLE: Style = Style::new().fg(Color::White).bg(FAINT_ZINC);

pub(crate) const BADGE_STYLE: Style = Style::new()
    .fg(Color::White)
    .bg(ZINC_700)
    .add_modifier(Modifier::BOLD);

pub(crate) mod toggle {
    use super::*;

    pub(crate) const FRAME_STYLE: Style = Style::new().fg(RULE_GRAY);

    pub(crate) const ICON_STYLE: Style = Style::new().fg(RULE_GRAY);

    pub(crate) const PILL_STYLE: Style = Style::new().fg(Color::Black).bg(Color::White);
}

pub(crate) mod bookings {
    use super::*;

    pub(crate) const HEADING_STYLE: Style = TITLE_STYLE;

    pub(crate) const BLURB_STYLE: Style = Style::new().fg(ZINC_600);

    pub(crate) const BORDER_STYLE: Style = Style::new().fg(RULE_GRAY);

    pub(crate) const WHEN_STYLE: Style = Style::new().fg(Color::White);

    pub(crate) const MEETING_TITLE_STYLE: Style =
        Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

    pub(crate) const PARTICIPANTS_STYLE: Style = Style::new().fg(ZINC_600);

    pub(crate) const LOCATION_STYLE: Style = Style::new().fg(LINK_BLUE);

    /// Applied on top of everything in the panel while it is still mostly
    /// transparent
    pub(crate) const FADED_STYLE: Style = Style::new()
        .fg(ZINC_700)
        .remove_modifier(Modifier::BOLD);
}
