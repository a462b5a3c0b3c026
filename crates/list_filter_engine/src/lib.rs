//! List filter engine: document capability, heuristic extraction and effect execution.
mod classify;
mod decode;
mod extract;
mod filter;
mod fixture;
mod html_tree;
mod realtime;
mod runner;
mod scroll;
mod timers;
mod tree;

pub use classify::ViewClassifier;
pub use decode::{decode_snapshot, DecodeError, DecodedSnapshot};
pub use extract::RecordExtractor;
pub use filter::{apply_filter, FilterOutcome};
pub use fixture::{read_snapshot, FixtureError};
pub use html_tree::{HtmlTree, PagingOptions, DEFAULT_CONTAINER_SELECTOR};
pub use realtime::{drive, drive_for, DriveOutcome};
pub use runner::{RunStats, SessionRunner};
pub use scroll::locate_scrollable;
pub use timers::{DueTimer, TimerQueue};
pub use tree::{
    children, contains, descendants, has_class, text_content, ChildNode, DocumentTree,
    MutationBatch, ScrollMetrics,
};
