use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeetingId(pub String);

impl fmt::Display for MeetingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertyId(pub String);

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgendaItemId(pub String);

impl fmt::Display for AgendaItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle of an owners' meeting. Stored in its original wire form,
/// displayed with the German labels used throughout generated documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MeetingStatus {
    Planned,
    InProgress,
    Completed,
}

impl MeetingStatus {
    /// Lenient mapping for status arriving as free text. Anything that is
    /// not a known pending state counts as completed.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "planned" => Self::Planned,
            "in-progress" => Self::InProgress,
            _ => Self::Completed,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Planned => "geplant",
            Self::InProgress => "laufend",
            Self::Completed => "abgeschlossen",
        }
    }
}

// Deserialization goes through the lenient parser so records stored with a
// retired status string still load as completed meetings.
impl<'de> Deserialize<'de> for MeetingStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// An owners' meeting ("Eigentümerversammlung") as loaded from the
/// persistence layer. Snapshots generated from a meeting never mutate it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meeting {
    pub id: MeetingId,
    pub property_id: PropertyId,
    pub title: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: Option<NaiveTime>,
    pub location_name: String,
    pub location_address: String,
    pub invitation_deadline: NaiveDate,
    pub status: MeetingStatus,
}

/// A discrete topic within a meeting. The description is free text and may
/// carry `{{meeting.*}}` placeholder tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgendaItem {
    pub id: AgendaItemId,
    pub meeting_id: MeetingId,
    pub position: u32,
    pub description: String,
    pub requires_resolution: bool,
}

/// Recorded outcome for an agenda item that requires a formal decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resolution {
    pub id: String,
    pub agenda_item_id: AgendaItemId,
    pub outcome: String,
}

/// The managed real-estate asset a meeting belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    pub id: PropertyId,
    pub name: String,
    pub address: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parse_maps_known_states() {
        assert_eq!(MeetingStatus::parse("planned"), MeetingStatus::Planned);
        assert_eq!(MeetingStatus::parse("in-progress"), MeetingStatus::InProgress);
        assert_eq!(MeetingStatus::parse("completed"), MeetingStatus::Completed);
    }

    #[test]
    fn status_parse_treats_unknown_values_as_completed() {
        assert_eq!(MeetingStatus::parse("archived"), MeetingStatus::Completed);
        assert_eq!(MeetingStatus::parse(""), MeetingStatus::Completed);
    }

    #[test]
    fn status_deserializes_through_the_lenient_parser() {
        let status: MeetingStatus =
            serde_json::from_str("\"in-progress\"").expect("known status deserializes");
        assert_eq!(status, MeetingStatus::InProgress);

        let status: MeetingStatus =
            serde_json::from_str("\"archived\"").expect("unknown status deserializes");
        assert_eq!(status, MeetingStatus::Completed);

        assert_eq!(
            serde_json::to_string(&MeetingStatus::InProgress).expect("status serializes"),
            "\"in-progress\""
        );
    }

    #[test]
    fn status_labels_are_german_display_strings() {
        assert_eq!(MeetingStatus::Planned.label(), "geplant");
        assert_eq!(MeetingStatus::InProgress.label(), "laufend");
        assert_eq!(MeetingStatus::Completed.label(), "abgeschlossen");
    }
}
