//! Protocol ingestion.
//!
//! A [`ProtocolParser`] turns a protocol document into a
//! [`ProtocolInfo`](ctdoc_model::ProtocolInfo). Structured JSON protocols
//! are read as-is; PDF and plain-text protocols go through labelled-field
//! heuristics. Field catalogues for the validation plan are loaded here as
//! well.

pub mod catalogue;
pub mod error;
pub mod json;
pub mod parser;
pub mod text;

pub use catalogue::{FieldCatalogue, load_field_catalogue};
pub use error::{IngestError, Result};
pub use json::JsonProtocolParser;
pub use parser::{AutoProtocolParser, ProtocolParser, save_protocol_json};
pub use text::{TextProtocolParser, extract_protocol_info};
