pub mod dance;
pub mod error;
pub mod ids;
pub mod metadata;
pub mod score;
pub mod sequence;

pub use dance::{Call, Dancer, Facing, Formation, Level, Position};
pub use error::{ModelError, Result};
pub use ids::{CategoryId, SequenceId, StackId, TagId};
pub use metadata::{Category, Metadata, MetadataCatalog, Tag};
pub use score::score;
pub use sequence::Sequence;
