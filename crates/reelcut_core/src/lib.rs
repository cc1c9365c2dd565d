//! Non-destructive multi-track timeline editing engine.
//!
//! Every mutating operation is a pure function over a [`Timeline`] value:
//! it takes `&self`, returns a brand-new value inside an [`Edit`], and
//! never touches the input. Inapplicable edits (missing ids, locked
//! tracks) come back as no-ops rather than errors; the only explicit
//! feedback channels are [`EditStatus`] and [`Timeline::validate`].
//!
//! Undo/redo, persistence, and auto-save belong to the host; see the
//! `reelcut_session` crate.

pub mod clips;
pub mod edit;
pub mod fx;
pub mod markers;
pub mod query;
pub mod ripple;
pub mod snapping;
pub mod splice;
pub mod tracks;
pub mod types;
pub mod validate;

pub use clips::{ClipDraft, ClipPatch};
pub use edit::{Edit, EditStatus};
pub use fx::{EffectDraft, EffectPatch, TransitionPatch, TransitionSlot};
pub use markers::MarkerPatch;
pub use snapping::{snap_points, snap_to_nearest, Snap};
pub use tracks::TrackPatch;
pub use types::*;
pub use validate::ValidationReport;
