use std::iter::successors;
use time::Weekday;
use StyleVariant::{Dim, Normal};

/// Number of days shown in the month grid: five weeks of seven days,
/// including the out-of-month filler days on either side
pub(crate) const GRID_DAYS: usize = 35;

pub(crate) const DAYS_IN_WEEK: usize = 7;

pub(crate) const SHEET_TITLE: &str = "LN";

pub(crate) const SHEET_YEAR: i32 = 2024;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum StyleVariant {
    Dim,
    Normal,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct MeetingRecord {
    pub(crate) date: &'static str,
    pub(crate) time_range: &'static str,
    pub(crate) title: &'static str,
    pub(crate) participants: &'static [&'static str],
    pub(crate) location: &'static str,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct DayRecord {
    pub(crate) label: &'static str,
    pub(crate) style: StyleVariant,
    pub(crate) meetings: &'static [MeetingRecord],
}

impl DayRecord {
    const fn plain(label: &'static str, style: StyleVariant) -> DayRecord {
        DayRecord {
            label,
            style,
            meetings: &[],
        }
    }

    const fn booked(label: &'static str, meetings: &'static [MeetingRecord]) -> DayRecord {
        DayRecord {
            label,
            style: Normal,
            meetings,
        }
    }

    /// Filler days belonging to the previous or next month are labelled with
    /// a leading `-` or `+`
    pub(crate) fn is_out_of_month(&self) -> bool {
        self.label.starts_with(['+', '-'])
    }

    pub(crate) fn has_meetings(&self) -> bool {
        !self.meetings.is_empty()
    }

    pub(crate) fn meeting_count(&self) -> usize {
        self.meetings.len()
    }
}

const fn meeting(
    date: &'static str,
    time_range: &'static str,
    title: &'static str,
    participants: &'static [&'static str],
    location: &'static str,
) -> MeetingRecord {
    MeetingRecord {
        date,
        time_range,
        title,
        participants,
        location,
    }
}

pub(crate) static DAYS: [DayRecord; GRID_DAYS] = [
    DayRecord::plain("-3", Dim),
    DayRecord::plain("-2", Dim),
    DayRecord::plain("-1", Dim),
    DayRecord::plain("01", Normal),
    DayRecord::booked(
        "02",
        &[
            meeting(
                "Wed, 2 Nov",
                "10:00 AM - 11:00 AM",
                "Design Review Meeting",
                &["Alice Johnson", "Mark Lee"],
                "Zoom",
            ),
            meeting(
                "Wed, 2 Nov",
                "1:00 PM - 2:00 PM",
                "Sprint Planning",
                &["Tom Hanks", "Jessica White"],
                "Google Meet",
            ),
        ],
    ),
    DayRecord::plain("03", Normal),
    DayRecord::plain("04", Dim),
    DayRecord::plain("05", Dim),
    DayRecord::booked(
        "06",
        &[meeting(
            "Mon, 6 Nov",
            "10:00 AM - 11:00 AM",
            "Brainstorming Session",
            &["Sara Parker", "Kumail Nanji"],
            "Zoom",
        )],
    ),
    DayRecord::plain("07", Normal),
    DayRecord::booked(
        "08",
        &[
            meeting(
                "Wed, 8 Nov",
                "2:00 PM - 3:00 PM",
                "Strategy Meeting",
                &["Robert Green", "David Lee"],
                "Google Meet",
            ),
            meeting(
                "Wed, 8 Nov",
                "4:00 PM - 5:00 PM",
                "Budget Review",
                &["Jessica White", "Tom Hanks"],
                "Microsoft Teams",
            ),
            meeting(
                "Wed, 8 Nov",
                "5:30 PM - 6:30 PM",
                "Q&A Session",
                &["Bob Smith", "Emma Stone"],
                "In-person",
            ),
        ],
    ),
    DayRecord::plain("09", Normal),
    DayRecord::plain("10", Normal),
    DayRecord::plain("11", Dim),
    DayRecord::plain("12", Dim),
    DayRecord::plain("13", Normal),
    DayRecord::plain("14", Normal),
    DayRecord::booked(
        "15",
        &[meeting(
            "Wed, 15 Nov",
            "9:00 AM - 10:00 AM",
            "Client Feedback Session",
            &["Sarah Parker", "Kumail Nanji"],
            "In-person at Office",
        )],
    ),
    DayRecord::plain("16", Normal),
    DayRecord::booked(
        "17",
        &[
            meeting(
                "Fri, 17 Nov",
                "9:00 AM - 10:00 AM",
                "Weekly Standup",
                &["David Lee", "Sophia Young"],
                "Microsoft Teams",
            ),
            meeting(
                "Fri, 17 Nov",
                "11:00 AM - 12:00 PM",
                "Client Update",
                &["Sara Parker", "Kumail Nanji"],
                "In-person",
            ),
            meeting(
                "Fri, 17 Nov",
                "2:00 PM - 3:00 PM",
                "Feature Demo",
                &["Bob Smith", "Emma Stone"],
                "Zoom",
            ),
            meeting(
                "Fri, 17 Nov",
                "4:00 PM - 5:00 PM",
                "Feedback Session",
                &["Mark Lee", "Alice Johnson"],
                "Google Meet",
            ),
        ],
    ),
    DayRecord::plain("18", Dim),
    DayRecord::plain("19", Dim),
    DayRecord::plain("20", Normal),
    DayRecord::booked(
        "21",
        &[
            meeting(
                "Tue, 21 Nov",
                "11:00 AM - 12:00 PM",
                "Product Launch",
                &["Alice Johnson", "Mark Lee"],
                "Zoom",
            ),
            meeting(
                "Tue, 21 Nov",
                "1:00 PM - 2:00 PM",
                "Customer Feedback",
                &["Sara Parker", "Kumail Nanji"],
                "Google Meet",
            ),
            meeting(
                "Tue, 21 Nov",
                "3:00 PM - 4:00 PM",
                "Design Iteration",
                &["David Lee", "Sophia Young"],
                "In-person",
            ),
            meeting(
                "Tue, 21 Nov",
                "5:00 PM - 6:00 PM",
                "Team Celebration",
                &["Bob Smith", "Jessica White"],
                "Office Rooftop",
            ),
            meeting(
                "Tue, 21 Nov",
                "7:00 PM - 8:00 PM",
                "Happy Hour",
                &["Tom Hanks", "Emma Stone"],
                "Local Bar",
            ),
        ],
    ),
    DayRecord::plain("22", Normal),
    DayRecord::plain("23", Normal),
    DayRecord::plain("24", Normal),
    DayRecord::plain("25", Dim),
    DayRecord::plain("26", Dim),
    DayRecord::plain("27", Normal),
    DayRecord::plain("28", Normal),
    DayRecord::plain("29", Normal),
    DayRecord::booked(
        "30",
        &[meeting(
            "Thu, 30 Nov",
            "11:00 AM - 12:00 PM",
            "Brainstorming Session",
            &["David Lee", "Sophia Young"],
            "Zoom",
        )],
    ),
    DayRecord::plain("+1", Dim),
    DayRecord::plain("+2", Dim),
];

/// Returns the weekday names for the header row, in grid column order
pub(crate) fn weekday_names() -> impl Iterator<Item = String> {
    successors(Some(Weekday::Sunday), |wd| match wd.next() {
        Weekday::Sunday => None,
        next => Some(next),
    })
    .map(|wd| wd.to_string().chars().take(3).collect::<String>().to_uppercase())
}
