use super::domain::{AgendaItem, AgendaItemId, Meeting, Property, Resolution};
use super::placeholder::{self, format_date};
use askama::Template;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

/// Fixed header section of a generated protocol.
#[derive(Debug, Clone, Serialize)]
pub struct ProtocolHeader {
    pub meeting_title: String,
    pub property_name: String,
    pub property_address: String,
    pub date: String,
    pub time_range: String,
    pub location_name: String,
    pub location_address: String,
    pub status_label: &'static str,
}

/// One agenda entry in document order, description already substituted.
#[derive(Debug, Clone, Serialize)]
pub struct ProtocolItem {
    pub position: u32,
    pub description: String,
    pub requires_resolution: bool,
    pub resolution: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProtocolFooter {
    pub generated_on: String,
}

/// Flat document model handed to the markup template. Assembly is a pure,
/// single-pass transform; pagination is left entirely to the PDF engine.
#[derive(Debug, Clone, Serialize)]
pub struct ProtocolDocument {
    pub header: ProtocolHeader,
    pub items: Vec<ProtocolItem>,
    pub footer: ProtocolFooter,
}

impl ProtocolDocument {
    /// Composes meeting, property, and agenda data into the document model.
    /// Each description is run through the placeholder engine against the
    /// parent meeting. An item flagged `requires_resolution` without an
    /// entry in `resolutions` is kept without a resolution section.
    pub fn assemble(
        meeting: &Meeting,
        property: &Property,
        agenda_items: &[AgendaItem],
        resolutions: &HashMap<AgendaItemId, Resolution>,
        generated_on: NaiveDate,
    ) -> Self {
        let items = agenda_items
            .iter()
            .map(|item| ProtocolItem {
                position: item.position,
                description: placeholder::substitute(&item.description, meeting),
                requires_resolution: item.requires_resolution,
                resolution: resolutions
                    .get(&item.id)
                    .map(|resolution| resolution.outcome.clone()),
            })
            .collect();

        Self {
            header: ProtocolHeader {
                meeting_title: meeting.title.clone(),
                property_name: property.name.clone(),
                property_address: property.address.clone(),
                date: format_date(meeting.date),
                time_range: time_range(meeting),
                location_name: meeting.location_name.clone(),
                location_address: meeting.location_address.clone(),
                status_label: meeting.status.label(),
            },
            items,
            footer: ProtocolFooter {
                generated_on: format_date(generated_on),
            },
        }
    }

    /// Renders the fixed-section markup the PDF engine paginates. Page
    /// format and margins are carried in the embedded print stylesheet.
    pub fn to_html(&self) -> Result<String, askama::Error> {
        ProtocolTemplate { doc: self }.render()
    }
}

fn time_range(meeting: &Meeting) -> String {
    let start = meeting.start_time.format("%H:%M");
    match meeting.end_time {
        Some(end) => format!("{start} bis {} Uhr", end.format("%H:%M")),
        None => format!("ab {start} Uhr"),
    }
}

#[derive(Template)]
#[template(path = "protocol.html")]
struct ProtocolTemplate<'a> {
    doc: &'a ProtocolDocument,
}

/// Builds the download filename `Protokoll_<PropertyName>_<YYYY-MM-DD>.pdf`.
/// Every character of the property name outside ASCII alphanumerics,
/// diacritics included, becomes an underscore.
pub fn protocol_filename(property_name: &str, date: NaiveDate) -> String {
    let sanitized: String = property_name
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() { ch } else { '_' })
        .collect();
    format!("Protokoll_{sanitized}_{}.pdf", date.format("%Y-%m-%d"))
}
