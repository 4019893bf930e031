use super::domain::{AgendaItem, AgendaItemId, Meeting, MeetingId, Property, PropertyId, Resolution};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("repository backend unavailable: {0}")]
    Backend(String),
}

/// Read access to meeting data as supplied by the persistence collaborator.
/// Implementations must return agenda items ordered by their position.
pub trait MeetingRepository: Send + Sync {
    fn meeting(&self, id: &MeetingId) -> Result<Option<Meeting>, RepositoryError>;

    fn property(&self, id: &PropertyId) -> Result<Option<Property>, RepositoryError>;

    fn agenda_items(&self, meeting_id: &MeetingId) -> Result<Vec<AgendaItem>, RepositoryError>;

    /// Resolutions keyed by their agenda item, present only for items whose
    /// `requires_resolution` flag is set and whose outcome was recorded.
    fn resolutions(
        &self,
        meeting_id: &MeetingId,
    ) -> Result<HashMap<AgendaItemId, Resolution>, RepositoryError>;
}
