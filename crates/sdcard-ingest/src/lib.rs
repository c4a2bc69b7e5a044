//! Parsing of sequence transcripts exported by the calling program.

pub mod date;
pub mod error;
pub mod formation;
pub mod reader;
pub mod transcript;

pub use date::parse_transcript_date;
pub use error::{IngestError, Result};
pub use formation::decode_formation;
pub use reader::read_transcript;
pub use transcript::{FORM_FEED, Header, parse_header, parse_sequence, parse_transcript};
