use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use weg_protokoll::meetings::{
    AgendaItem, AgendaItemId, Meeting, MeetingId, MeetingRepository, Property, PropertyId,
    RepositoryError, Resolution,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Mutex-guarded stand-in for the persistence collaborator. Agenda items
/// are kept sorted by position on insert.
#[derive(Default, Clone)]
pub(crate) struct InMemoryMeetingRepository {
    meetings: Arc<Mutex<HashMap<MeetingId, Meeting>>>,
    properties: Arc<Mutex<HashMap<PropertyId, Property>>>,
    agenda: Arc<Mutex<HashMap<MeetingId, Vec<AgendaItem>>>>,
    resolutions: Arc<Mutex<HashMap<MeetingId, HashMap<AgendaItemId, Resolution>>>>,
}

impl InMemoryMeetingRepository {
    pub(crate) fn insert_property(&self, property: Property) {
        let mut guard = self.properties.lock().expect("property mutex poisoned");
        guard.insert(property.id.clone(), property);
    }

    pub(crate) fn insert_meeting(&self, meeting: Meeting) {
        let mut guard = self.meetings.lock().expect("meeting mutex poisoned");
        guard.insert(meeting.id.clone(), meeting);
    }

    pub(crate) fn insert_agenda_item(&self, item: AgendaItem) {
        let mut guard = self.agenda.lock().expect("agenda mutex poisoned");
        let items = guard.entry(item.meeting_id.clone()).or_default();
        items.push(item);
        items.sort_by_key(|entry| entry.position);
    }

    pub(crate) fn insert_resolution(&self, meeting_id: MeetingId, resolution: Resolution) {
        let mut guard = self.resolutions.lock().expect("resolution mutex poisoned");
        guard
            .entry(meeting_id)
            .or_default()
            .insert(resolution.agenda_item_id.clone(), resolution);
    }
}

impl MeetingRepository for InMemoryMeetingRepository {
    fn meeting(&self, id: &MeetingId) -> Result<Option<Meeting>, RepositoryError> {
        let guard = self.meetings.lock().expect("meeting mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn property(&self, id: &PropertyId) -> Result<Option<Property>, RepositoryError> {
        let guard = self.properties.lock().expect("property mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn agenda_items(&self, meeting_id: &MeetingId) -> Result<Vec<AgendaItem>, RepositoryError> {
        let guard = self.agenda.lock().expect("agenda mutex poisoned");
        Ok(guard.get(meeting_id).cloned().unwrap_or_default())
    }

    fn resolutions(
        &self,
        meeting_id: &MeetingId,
    ) -> Result<HashMap<AgendaItemId, Resolution>, RepositoryError> {
        let guard = self.resolutions.lock().expect("resolution mutex poisoned");
        Ok(guard.get(meeting_id).cloned().unwrap_or_default())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
