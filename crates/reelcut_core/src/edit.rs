use crate::types::Timeline;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What a mutating operation did. Operations are total: they never error,
/// they report.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EditStatus {
    /// The edit was applied cleanly.
    Applied,
    /// Inapplicable input (missing id, locked track, out-of-range point);
    /// the timeline came back unchanged.
    Noop,
    /// The edit was applied, but it left the affected track with
    /// overlapping clips. Hosts that care should warn or revert.
    Overlapping,
}

impl EditStatus {
    pub fn changed(&self) -> bool {
        !matches!(self, EditStatus::Noop)
    }
}

/// A new timeline value plus the status of the operation that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Edit {
    pub timeline: Timeline,
    pub status: EditStatus,
}

impl Edit {
    pub(crate) fn applied(timeline: Timeline) -> Self {
        Self {
            timeline,
            status: EditStatus::Applied,
        }
    }

    pub(crate) fn noop(timeline: Timeline) -> Self {
        Self {
            timeline,
            status: EditStatus::Noop,
        }
    }

    /// Applied, unless the affected track now holds overlapping clips.
    pub(crate) fn checked(timeline: Timeline, track_id: Uuid) -> Self {
        let status = if timeline.has_overlap(track_id, None) {
            EditStatus::Overlapping
        } else {
            EditStatus::Applied
        };
        Self { timeline, status }
    }

    pub fn changed(&self) -> bool {
        self.status.changed()
    }
}
