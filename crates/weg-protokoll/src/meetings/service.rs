use super::domain::{MeetingId, PropertyId};
use super::pdf::{PdfEngine, PdfError};
use super::protocol::{protocol_filename, ProtocolDocument};
use super::repository::{MeetingRepository, RepositoryError};
use chrono::NaiveDate;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("meeting '{0}' not found")]
    MeetingNotFound(MeetingId),
    #[error("property '{0}' not found")]
    PropertyNotFound(PropertyId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("protocol markup rendering failed: {0}")]
    Markup(#[from] askama::Error),
    #[error(transparent)]
    Render(#[from] PdfError),
}

impl ProtocolError {
    /// Whether the failure is a missing-entity condition rather than an
    /// infrastructure fault.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ProtocolError::MeetingNotFound(_) | ProtocolError::PropertyNotFound(_)
        )
    }
}

/// A complete export: either the whole document was produced or an error
/// was surfaced, never partial output.
#[derive(Debug, Clone)]
pub struct GeneratedProtocol {
    pub filename: String,
    pub pdf: Vec<u8>,
}

/// Composes the repository, the document assembly, and the PDF engine into
/// the request-scoped export flow. Each invocation owns its input data and
/// produces a self-contained output buffer.
pub struct ProtocolService<R, E> {
    repository: Arc<R>,
    engine: Arc<E>,
}

impl<R, E> ProtocolService<R, E>
where
    R: MeetingRepository + 'static,
    E: PdfEngine + 'static,
{
    pub fn new(repository: Arc<R>, engine: Arc<E>) -> Self {
        Self { repository, engine }
    }

    /// Assembles the protocol document for a meeting without rasterizing it.
    pub fn markup(
        &self,
        meeting_id: &MeetingId,
        generated_on: NaiveDate,
    ) -> Result<String, ProtocolError> {
        let (document, _) = self.assemble(meeting_id, generated_on)?;
        Ok(document.to_html()?)
    }

    /// Exports the meeting protocol as a finished PDF together with its
    /// download filename.
    pub async fn export(
        &self,
        meeting_id: &MeetingId,
        generated_on: NaiveDate,
    ) -> Result<GeneratedProtocol, ProtocolError> {
        let (document, filename) = self.assemble(meeting_id, generated_on)?;
        let html = document.to_html()?;
        let pdf = self.engine.render(&html).await?;

        info!(
            meeting = %meeting_id,
            bytes = pdf.len(),
            %filename,
            "protocol exported"
        );

        Ok(GeneratedProtocol { filename, pdf })
    }

    fn assemble(
        &self,
        meeting_id: &MeetingId,
        generated_on: NaiveDate,
    ) -> Result<(ProtocolDocument, String), ProtocolError> {
        let meeting = self
            .repository
            .meeting(meeting_id)?
            .ok_or_else(|| ProtocolError::MeetingNotFound(meeting_id.clone()))?;
        let property = self
            .repository
            .property(&meeting.property_id)?
            .ok_or_else(|| ProtocolError::PropertyNotFound(meeting.property_id.clone()))?;
        let agenda_items = self.repository.agenda_items(meeting_id)?;
        let resolutions = self.repository.resolutions(meeting_id)?;

        let document = ProtocolDocument::assemble(
            &meeting,
            &property,
            &agenda_items,
            &resolutions,
            generated_on,
        );
        let filename = protocol_filename(&property.name, meeting.date);
        Ok((document, filename))
    }
}
