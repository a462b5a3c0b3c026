//! List filter core: query engine, loader state machine and the pure session update.
mod config;
mod effect;
mod fingerprint;
mod loader;
mod matcher;
mod msg;
mod normalize;
mod query;
mod record;
mod state;
mod update;
mod view_model;

pub use config::SessionConfig;
pub use effect::{Effect, FingerprintPurpose, Timer};
pub use fingerprint::ListFingerprint;
pub use loader::{LoadMode, LoadState, Loader, LoaderStep};
pub use matcher::matches;
pub use msg::Msg;
pub use normalize::{collapse_whitespace, fold_for_matching, normalize};
pub use query::{parse, ParsedQuery};
pub use record::Record;
pub use state::{Lifecycle, SessionState, ViewKind};
pub use update::update;
pub use view_model::SessionView;
