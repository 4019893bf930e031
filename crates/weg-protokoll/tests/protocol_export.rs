use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use std::collections::HashMap;
use std::sync::Arc;
use weg_protokoll::meetings::{
    AgendaItem, AgendaItemId, Meeting, MeetingId, MeetingRepository, MeetingStatus, PdfEngine,
    PdfError, Property, PropertyId, ProtocolError, ProtocolService, RepositoryError, Resolution,
};

#[derive(Default)]
struct FixtureRepository {
    meetings: HashMap<MeetingId, Meeting>,
    properties: HashMap<PropertyId, Property>,
    agenda: HashMap<MeetingId, Vec<AgendaItem>>,
    resolutions: HashMap<MeetingId, HashMap<AgendaItemId, Resolution>>,
}

impl MeetingRepository for FixtureRepository {
    fn meeting(&self, id: &MeetingId) -> Result<Option<Meeting>, RepositoryError> {
        Ok(self.meetings.get(id).cloned())
    }

    fn property(&self, id: &PropertyId) -> Result<Option<Property>, RepositoryError> {
        Ok(self.properties.get(id).cloned())
    }

    fn agenda_items(&self, meeting_id: &MeetingId) -> Result<Vec<AgendaItem>, RepositoryError> {
        Ok(self.agenda.get(meeting_id).cloned().unwrap_or_default())
    }

    fn resolutions(
        &self,
        meeting_id: &MeetingId,
    ) -> Result<HashMap<AgendaItemId, Resolution>, RepositoryError> {
        Ok(self.resolutions.get(meeting_id).cloned().unwrap_or_default())
    }
}

struct RecordingEngine;

#[async_trait]
impl PdfEngine for RecordingEngine {
    async fn render(&self, html: &str) -> Result<Vec<u8>, PdfError> {
        let mut bytes = b"%PDF-1.7\n".to_vec();
        bytes.extend_from_slice(&(html.len() as u32).to_be_bytes());
        Ok(bytes)
    }
}

struct FailingEngine;

#[async_trait]
impl PdfEngine for FailingEngine {
    async fn render(&self, _html: &str) -> Result<Vec<u8>, PdfError> {
        Err(PdfError::Timeout(30))
    }
}

fn fixture_repository() -> FixtureRepository {
    let meeting_id = MeetingId("meeting-1".to_string());
    let property_id = PropertyId("property-1".to_string());

    let mut repository = FixtureRepository::default();
    repository.meetings.insert(
        meeting_id.clone(),
        Meeting {
            id: meeting_id.clone(),
            property_id: property_id.clone(),
            title: "Ordentliche Eigentümerversammlung 2025".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 1, 3).expect("valid meeting date"),
            start_time: NaiveTime::from_hms_opt(18, 0, 0).expect("valid start time"),
            end_time: None,
            location_name: "Gemeindesaal".to_string(),
            location_address: "Kirchplatz 2, 12345 Berlin".to_string(),
            invitation_deadline: NaiveDate::from_ymd_opt(2024, 12, 13).expect("valid deadline"),
            status: MeetingStatus::Planned,
        },
    );
    repository.properties.insert(
        property_id.clone(),
        Property {
            id: property_id,
            name: "Musterstraße 5".to_string(),
            address: "Musterstraße 5, 12345 Berlin".to_string(),
        },
    );
    repository.agenda.insert(
        meeting_id.clone(),
        vec![
            AgendaItem {
                id: AgendaItemId("top-1".to_string()),
                meeting_id: meeting_id.clone(),
                position: 1,
                description: "Begrüßung und Feststellung der Beschlussfähigkeit am {{meeting.date}}"
                    .to_string(),
                requires_resolution: false,
            },
            AgendaItem {
                id: AgendaItemId("top-2".to_string()),
                meeting_id: meeting_id.clone(),
                position: 2,
                description: "Genehmigung der Jahresabrechnung {{meeting.date.year}}".to_string(),
                requires_resolution: true,
            },
        ],
    );
    let mut by_item = HashMap::new();
    by_item.insert(
        AgendaItemId("top-2".to_string()),
        Resolution {
            id: "res-1".to_string(),
            agenda_item_id: AgendaItemId("top-2".to_string()),
            outcome: "Mehrheitlich angenommen".to_string(),
        },
    );
    repository.resolutions.insert(meeting_id, by_item);
    repository
}

fn generated_on() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 4).expect("valid generation date")
}

#[tokio::test]
async fn export_produces_pdf_with_sanitized_filename() {
    let service = ProtocolService::new(Arc::new(fixture_repository()), Arc::new(RecordingEngine));

    let protocol = service
        .export(&MeetingId("meeting-1".to_string()), generated_on())
        .await
        .expect("export succeeds");

    assert_eq!(protocol.filename, "Protokoll_Musterstra_e_5_2025-01-03.pdf");
    assert!(protocol.pdf.starts_with(b"%PDF-1.7"));
}

#[tokio::test]
async fn markup_substitutes_placeholders_and_attaches_resolutions() {
    let service = ProtocolService::new(Arc::new(fixture_repository()), Arc::new(RecordingEngine));

    let html = service
        .markup(&MeetingId("meeting-1".to_string()), generated_on())
        .expect("markup assembles");

    assert!(html.contains("Feststellung der Beschlussfähigkeit am 03.01.2025"));
    assert!(html.contains("Genehmigung der Jahresabrechnung 2025"));
    assert!(html.contains("Mehrheitlich angenommen"));
    assert!(html.contains("Erstellt am 04.01.2025"));
}

#[tokio::test]
async fn export_of_unknown_meeting_is_not_found() {
    let service = ProtocolService::new(Arc::new(fixture_repository()), Arc::new(RecordingEngine));

    let error = service
        .export(&MeetingId("missing".to_string()), generated_on())
        .await
        .expect_err("unknown meeting fails");

    assert!(matches!(error, ProtocolError::MeetingNotFound(_)));
    assert!(error.is_not_found());
}

#[tokio::test]
async fn export_with_orphaned_property_is_not_found() {
    let mut repository = fixture_repository();
    repository.properties.clear();
    let service = ProtocolService::new(Arc::new(repository), Arc::new(RecordingEngine));

    let error = service
        .export(&MeetingId("meeting-1".to_string()), generated_on())
        .await
        .expect_err("orphaned meeting fails");

    assert!(matches!(error, ProtocolError::PropertyNotFound(_)));
    assert!(error.is_not_found());
}

#[tokio::test]
async fn renderer_failure_is_terminal_and_yields_no_output() {
    let service = ProtocolService::new(Arc::new(fixture_repository()), Arc::new(FailingEngine));

    let error = service
        .export(&MeetingId("meeting-1".to_string()), generated_on())
        .await
        .expect_err("renderer failure surfaces");

    assert!(matches!(error, ProtocolError::Render(PdfError::Timeout(30))));
    assert!(!error.is_not_found());
}
