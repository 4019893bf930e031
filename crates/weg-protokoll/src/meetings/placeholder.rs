use super::domain::Meeting;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

const MONTH_NAMES: [&str; 12] = [
    "Januar",
    "Februar",
    "März",
    "April",
    "Mai",
    "Juni",
    "Juli",
    "August",
    "September",
    "Oktober",
    "November",
    "Dezember",
];

// Indexed by days-from-Sunday, matching the calendar widget ordering.
const WEEKDAY_NAMES: [&str; 7] = [
    "Sonntag",
    "Montag",
    "Dienstag",
    "Mittwoch",
    "Donnerstag",
    "Freitag",
    "Samstag",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenCategory {
    General,
    Date,
    Time,
    Location,
    Status,
}

impl TokenCategory {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::General,
            Self::Date,
            Self::Time,
            Self::Location,
            Self::Status,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::General => "Allgemein",
            Self::Date => "Datum",
            Self::Time => "Uhrzeit",
            Self::Location => "Ort",
            Self::Status => "Status",
        }
    }
}

/// Closed catalog of placeholder tokens recognized in agenda item
/// descriptions. Tokens are literal strings; none is a prefix of another
/// once the closing braces are included, so replacement order is
/// immaterial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderToken {
    Title,
    Date,
    DateYear,
    DateMonth,
    DateMonthName,
    DateDay,
    DateWeekday,
    StartTime,
    EndTime,
    LocationName,
    LocationAddress,
    InvitationDeadline,
    Status,
}

impl PlaceholderToken {
    pub const fn ordered() -> [Self; 13] {
        [
            Self::Title,
            Self::Date,
            Self::DateYear,
            Self::DateMonth,
            Self::DateMonthName,
            Self::DateDay,
            Self::DateWeekday,
            Self::StartTime,
            Self::EndTime,
            Self::LocationName,
            Self::LocationAddress,
            Self::InvitationDeadline,
            Self::Status,
        ]
    }

    /// The literal text matched in agenda descriptions.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Title => "{{meeting.title}}",
            Self::Date => "{{meeting.date}}",
            Self::DateYear => "{{meeting.date.year}}",
            Self::DateMonth => "{{meeting.date.month}}",
            Self::DateMonthName => "{{meeting.date.monthName}}",
            Self::DateDay => "{{meeting.date.day}}",
            Self::DateWeekday => "{{meeting.date.weekday}}",
            Self::StartTime => "{{meeting.startTime}}",
            Self::EndTime => "{{meeting.endTime}}",
            Self::LocationName => "{{meeting.locationName}}",
            Self::LocationAddress => "{{meeting.locationAddress}}",
            Self::InvitationDeadline => "{{meeting.invitationDeadline}}",
            Self::Status => "{{meeting.status}}",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "Titel",
            Self::Date => "Datum",
            Self::DateYear => "Jahr",
            Self::DateMonth => "Monat (Zahl)",
            Self::DateMonthName => "Monat (Name)",
            Self::DateDay => "Tag",
            Self::DateWeekday => "Wochentag",
            Self::StartTime => "Beginn",
            Self::EndTime => "Ende",
            Self::LocationName => "Versammlungsort",
            Self::LocationAddress => "Adresse des Versammlungsorts",
            Self::InvitationDeadline => "Einladungsfrist",
            Self::Status => "Status",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Title => "Titel der Versammlung, z. B. \"Ordentliche Eigentümerversammlung 2025\"",
            Self::Date => "Versammlungsdatum im Format TT.MM.JJJJ",
            Self::DateYear => "Vierstelliges Jahr des Versammlungsdatums",
            Self::DateMonth => "Zweistelliger Monat des Versammlungsdatums (01-12)",
            Self::DateMonthName => "Ausgeschriebener Monatsname, z. B. \"Dezember\"",
            Self::DateDay => "Zweistelliger Tag des Versammlungsdatums (01-31)",
            Self::DateWeekday => "Ausgeschriebener Wochentag, z. B. \"Dienstag\"",
            Self::StartTime => "Beginn der Versammlung im Format HH:MM",
            Self::EndTime => "Ende der Versammlung im Format HH:MM, leer wenn offen",
            Self::LocationName => "Name des Versammlungsorts",
            Self::LocationAddress => "Anschrift des Versammlungsorts",
            Self::InvitationDeadline => "Frist für die Einladung im Format TT.MM.JJJJ",
            Self::Status => "Status der Versammlung (geplant, laufend, abgeschlossen)",
        }
    }

    pub const fn category(self) -> TokenCategory {
        match self {
            Self::Title => TokenCategory::General,
            Self::Date
            | Self::DateYear
            | Self::DateMonth
            | Self::DateMonthName
            | Self::DateDay
            | Self::DateWeekday
            | Self::InvitationDeadline => TokenCategory::Date,
            Self::StartTime | Self::EndTime => TokenCategory::Time,
            Self::LocationName | Self::LocationAddress => TokenCategory::Location,
            Self::Status => TokenCategory::Status,
        }
    }

    /// Computes the replacement value for this token from a meeting record.
    pub fn resolve(self, meeting: &Meeting) -> String {
        match self {
            Self::Title => meeting.title.clone(),
            Self::Date => format_date(meeting.date),
            Self::DateYear => meeting.date.format("%Y").to_string(),
            Self::DateMonth => meeting.date.format("%m").to_string(),
            Self::DateMonthName => MONTH_NAMES[meeting.date.month0() as usize].to_string(),
            Self::DateDay => meeting.date.format("%d").to_string(),
            Self::DateWeekday => {
                WEEKDAY_NAMES[meeting.date.weekday().num_days_from_sunday() as usize].to_string()
            }
            Self::StartTime => meeting.start_time.format("%H:%M").to_string(),
            Self::EndTime => meeting
                .end_time
                .map(|time| time.format("%H:%M").to_string())
                .unwrap_or_default(),
            Self::LocationName => meeting.location_name.clone(),
            Self::LocationAddress => meeting.location_address.clone(),
            Self::InvitationDeadline => format_date(meeting.invitation_deadline),
            Self::Status => meeting.status.label().to_string(),
        }
    }
}

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Replaces every occurrence of every catalog token in `text` with its value
/// derived from `meeting`. Unknown `{{...}}` sequences are left verbatim.
/// Pure over its inputs and the static name tables.
pub fn substitute(text: &str, meeting: &Meeting) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut output = text.to_string();
    for token in PlaceholderToken::ordered() {
        let literal = token.token();
        if output.contains(literal) {
            output = output.replace(literal, &token.resolve(meeting));
        }
    }
    output
}

/// One catalog row as presented to template editors.
#[derive(Debug, Clone, Serialize)]
pub struct PlaceholderEntry {
    pub token: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub category: TokenCategory,
    pub category_label: &'static str,
}

/// The full token catalog in presentation order.
pub fn catalog() -> Vec<PlaceholderEntry> {
    PlaceholderToken::ordered()
        .into_iter()
        .map(|token| PlaceholderEntry {
            token: token.token(),
            label: token.label(),
            description: token.description(),
            category: token.category(),
            category_label: token.category().label(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meetings::domain::{MeetingId, MeetingStatus, PropertyId};
    use chrono::NaiveTime;

    fn sample_meeting() -> Meeting {
        Meeting {
            id: MeetingId("meeting-1".to_string()),
            property_id: PropertyId("property-1".to_string()),
            title: "Ordentliche Eigentümerversammlung 2025".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 12, 30).expect("valid meeting date"),
            start_time: NaiveTime::from_hms_opt(18, 30, 0).expect("valid start time"),
            end_time: None,
            location_name: "Gemeindesaal St. Anna".to_string(),
            location_address: "Kirchplatz 2, 80331 München".to_string(),
            invitation_deadline: NaiveDate::from_ymd_opt(2025, 12, 9).expect("valid deadline"),
            status: MeetingStatus::Planned,
        }
    }

    #[test]
    fn empty_text_passes_through() {
        let meeting = sample_meeting();
        assert_eq!(substitute("", &meeting), "");
    }

    #[test]
    fn substitutes_date_derivatives_from_fixed_tables() {
        let meeting = sample_meeting();
        assert_eq!(substitute("{{meeting.date.weekday}}", &meeting), "Dienstag");
        assert_eq!(substitute("{{meeting.date.monthName}}", &meeting), "Dezember");
        assert_eq!(substitute("{{meeting.date.day}}", &meeting), "30");
        assert_eq!(substitute("{{meeting.date.month}}", &meeting), "12");
        assert_eq!(substitute("{{meeting.date.year}}", &meeting), "2025");
        assert_eq!(substitute("{{meeting.date}}", &meeting), "30.12.2025");
    }

    #[test]
    fn month_is_zero_padded_and_matches_month_name_position() {
        let mut meeting = sample_meeting();
        for month in 1..=12u32 {
            meeting.date = NaiveDate::from_ymd_opt(2025, month, 15).expect("valid date");
            let numeric = substitute("{{meeting.date.month}}", &meeting);
            let name = substitute("{{meeting.date.monthName}}", &meeting);
            assert_eq!(numeric.len(), 2);
            let position: usize = numeric.parse().expect("month parses");
            assert_eq!(MONTH_NAMES[position - 1], name);
        }
    }

    #[test]
    fn absent_end_time_substitutes_empty_string() {
        let meeting = sample_meeting();
        assert_eq!(substitute("Ende: {{meeting.endTime}}", &meeting), "Ende: ");
    }

    #[test]
    fn present_end_time_substitutes_wall_clock() {
        let mut meeting = sample_meeting();
        meeting.end_time = NaiveTime::from_hms_opt(20, 15, 0);
        assert_eq!(
            substitute("{{meeting.startTime}} bis {{meeting.endTime}}", &meeting),
            "18:30 bis 20:15"
        );
    }

    #[test]
    fn status_maps_to_german_display_strings() {
        let mut meeting = sample_meeting();
        meeting.status = MeetingStatus::InProgress;
        assert_eq!(substitute("{{meeting.status}}", &meeting), "laufend");
        meeting.status = MeetingStatus::Planned;
        assert_eq!(substitute("{{meeting.status}}", &meeting), "geplant");
        meeting.status = MeetingStatus::Completed;
        assert_eq!(substitute("{{meeting.status}}", &meeting), "abgeschlossen");
    }

    #[test]
    fn unknown_tokens_are_left_verbatim() {
        let meeting = sample_meeting();
        let text = "Hallo {{meeting.chairperson}}, die Versammlung {{meeting.title}}.";
        assert_eq!(
            substitute(text, &meeting),
            "Hallo {{meeting.chairperson}}, die Versammlung Ordentliche Eigentümerversammlung 2025."
        );
    }

    #[test]
    fn substitution_is_idempotent_without_brace_sequences() {
        let meeting = sample_meeting();
        let text = "Am {{meeting.date.weekday}}, den {{meeting.date}}, um {{meeting.startTime}} Uhr in {{meeting.locationName}}.";
        let once = substitute(text, &meeting);
        let twice = substitute(&once, &meeting);
        assert_eq!(once, twice);
    }

    #[test]
    fn replaces_every_occurrence_of_a_token() {
        let meeting = sample_meeting();
        let text = "{{meeting.date.year}}/{{meeting.date.year}}";
        assert_eq!(substitute(text, &meeting), "2025/2025");
    }

    #[test]
    fn catalog_covers_every_token_with_category_labels() {
        let entries = catalog();
        assert_eq!(entries.len(), PlaceholderToken::ordered().len());
        assert!(entries
            .iter()
            .any(|entry| entry.token == "{{meeting.invitationDeadline}}"
                && entry.category_label == "Datum"));
        assert!(entries
            .iter()
            .all(|entry| entry.token.starts_with("{{meeting.") && entry.token.ends_with("}}")));
    }
}
