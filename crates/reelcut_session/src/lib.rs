//! Host adapter around the `reelcut_core` engine: snapshot-based undo/redo
//! (bounded at 50 entries), dirty-flag tracking for auto-save, and project
//! persistence as JSON.
//!
//! The engine itself is a pure value-in/value-out library; everything
//! stateful lives here.

pub mod error;
pub mod history;
pub mod project;
pub mod session;

pub use error::{Result, SessionError};
pub use history::{History, DEFAULT_HISTORY_CAP};
pub use project::{preset_1080p, preset_4k, preset_720p, preset_vertical, Project, ProjectSettings};
pub use session::EditorSession;
