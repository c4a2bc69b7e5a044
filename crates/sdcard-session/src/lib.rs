//! Review sessions: stacks of sequences selected by queries, walked with a
//! bidirectional cursor.

pub mod distribute;
pub mod session;
pub mod stack;

pub use distribute::{distribute, interleave};
pub use session::{Distribution, Session};
pub use stack::Stack;
