use crate::infra::InMemoryMeetingRepository;
use chrono::{Local, NaiveDate, NaiveTime};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use weg_protokoll::config::AppConfig;
use weg_protokoll::error::AppError;
use weg_protokoll::meetings::{
    AgendaItem, AgendaItemId, ChromiumPdfEngine, Meeting, MeetingId, MeetingStatus, Property,
    PropertyId, ProtocolService, Resolution,
};

#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    /// Meeting identifier to export (defaults to the seeded demo meeting)
    #[arg(long, default_value = "demo-meeting")]
    pub(crate) meeting: String,
    /// Output path. Defaults to the generated protocol filename in the
    /// current directory (or `protokoll.html` with --html-only).
    #[arg(long)]
    pub(crate) out: Option<PathBuf>,
    /// Write the assembled markup instead of invoking the PDF renderer
    #[arg(long)]
    pub(crate) html_only: bool,
    /// Override the generation date stamped into the footer (YYYY-MM-DD)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

/// Seeds the repository with a demo portfolio: one property, one meeting
/// with placeholder-bearing agenda items, and one recorded resolution.
/// Returns the seeded meeting id.
pub(crate) fn seed_demo_portfolio(repository: &InMemoryMeetingRepository) -> MeetingId {
    let meeting_id = MeetingId("demo-meeting".to_string());
    let property_id = PropertyId("demo-property".to_string());

    repository.insert_property(Property {
        id: property_id.clone(),
        name: "Musterstraße 5".to_string(),
        address: "Musterstraße 5, 12345 Berlin".to_string(),
    });

    repository.insert_meeting(Meeting {
        id: meeting_id.clone(),
        property_id,
        title: "Ordentliche Eigentümerversammlung 2025".to_string(),
        date: NaiveDate::from_ymd_opt(2025, 12, 30).expect("valid demo meeting date"),
        start_time: NaiveTime::from_hms_opt(18, 30, 0).expect("valid demo start time"),
        end_time: None,
        location_name: "Gemeindesaal St. Anna".to_string(),
        location_address: "Kirchplatz 2, 12345 Berlin".to_string(),
        invitation_deadline: NaiveDate::from_ymd_opt(2025, 12, 9).expect("valid demo deadline"),
        status: MeetingStatus::Planned,
    });

    repository.insert_agenda_item(AgendaItem {
        id: AgendaItemId("demo-top-1".to_string()),
        meeting_id: meeting_id.clone(),
        position: 1,
        description: "Begrüßung durch die Verwaltung und Feststellung der Beschlussfähigkeit \
                      der Versammlung \"{{meeting.title}}\" am {{meeting.date.weekday}}, den \
                      {{meeting.date}}, um {{meeting.startTime}} Uhr in {{meeting.locationName}}."
            .to_string(),
        requires_resolution: false,
    });
    repository.insert_agenda_item(AgendaItem {
        id: AgendaItemId("demo-top-2".to_string()),
        meeting_id: meeting_id.clone(),
        position: 2,
        description: "Beschlussfassung über die Jahresabrechnung {{meeting.date.year}}."
            .to_string(),
        requires_resolution: true,
    });
    repository.insert_agenda_item(AgendaItem {
        id: AgendaItemId("demo-top-3".to_string()),
        meeting_id: meeting_id.clone(),
        position: 3,
        description: "Verschiedenes.".to_string(),
        requires_resolution: false,
    });

    repository.insert_resolution(
        meeting_id.clone(),
        Resolution {
            id: "demo-res-1".to_string(),
            agenda_item_id: AgendaItemId("demo-top-2".to_string()),
            outcome: "Die Jahresabrechnung wird mehrheitlich genehmigt.".to_string(),
        },
    );

    meeting_id
}

pub(crate) async fn run_protocol_export(args: ExportArgs) -> Result<(), AppError> {
    let ExportArgs {
        meeting,
        out,
        html_only,
        today,
    } = args;

    let config = AppConfig::load()?;
    let repository = InMemoryMeetingRepository::default();
    seed_demo_portfolio(&repository);

    let engine = Arc::new(ChromiumPdfEngine::new(&config.renderer));
    let service = ProtocolService::new(Arc::new(repository), engine);

    let meeting_id = MeetingId(meeting);
    let generated_on = today.unwrap_or_else(|| Local::now().date_naive());

    if html_only {
        let html = service.markup(&meeting_id, generated_on).map_err(AppError::Protocol)?;
        let path = out.unwrap_or_else(|| PathBuf::from("protokoll.html"));
        std::fs::write(&path, html)?;
        println!("markup written to {}", path.display());
        return Ok(());
    }

    let protocol = service
        .export(&meeting_id, generated_on)
        .await
        .map_err(AppError::Protocol)?;
    let path = out.unwrap_or_else(|| PathBuf::from(&protocol.filename));
    std::fs::write(&path, &protocol.pdf)?;
    println!(
        "protocol exported: {} ({} bytes) -> {}",
        protocol.filename,
        protocol.pdf.len(),
        path.display()
    );

    Ok(())
}
