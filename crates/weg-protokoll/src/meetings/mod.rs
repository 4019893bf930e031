pub mod domain;
pub mod pdf;
pub mod placeholder;
pub mod protocol;
pub mod repository;
pub mod service;

pub use domain::{
    AgendaItem, AgendaItemId, Meeting, MeetingId, MeetingStatus, Property, PropertyId, Resolution,
};
pub use pdf::{ChromiumPdfEngine, PdfEngine, PdfError};
pub use placeholder::{catalog, substitute, PlaceholderEntry, PlaceholderToken, TokenCategory};
pub use protocol::{protocol_filename, ProtocolDocument};
pub use repository::{MeetingRepository, RepositoryError};
pub use service::{GeneratedProtocol, ProtocolError, ProtocolService};
