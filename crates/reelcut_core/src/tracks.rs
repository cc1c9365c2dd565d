use crate::edit::Edit;
use crate::types::*;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// Partial track update. Fields left `None` keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TrackPatch {
    pub name: Option<String>,
    pub muted: Option<bool>,
    pub locked: Option<bool>,
    pub visible: Option<bool>,
    pub volume: Option<f64>,
    pub height: Option<f64>,
}

impl Timeline {
    /// Append a new track. When no name is given the track is auto-numbered
    /// per kind: "Audio 2" counts only audio tracks. Never a no-op.
    pub fn add_track(&self, kind: TrackKind, name: Option<&str>) -> Edit {
        let mut next = self.clone();
        let name = match name {
            Some(n) => n.to_string(),
            None => {
                let nth = next.tracks.iter().filter(|t| t.kind == kind).count() + 1;
                format!("{} {}", kind.label(), nth)
            }
        };
        next.tracks.push(Track::new(kind, name));
        Edit::applied(next)
    }

    /// Remove a track and all its clips. Unknown id is a no-op.
    pub fn remove_track(&self, track_id: Uuid) -> Edit {
        let mut next = self.clone();
        let Some(pos) = next.tracks.iter().position(|t| t.id == track_id) else {
            debug!(%track_id, "remove_track ignored: track not found");
            return Edit::noop(next);
        };
        next.tracks.remove(pos);
        next.refresh_duration();
        Edit::applied(next)
    }

    /// Stable index-based reorder. An out-of-range `from` is a no-op;
    /// `to` is clamped to the valid range.
    pub fn reorder_tracks(&self, from: usize, to: usize) -> Edit {
        let mut next = self.clone();
        if from >= next.tracks.len() {
            debug!(from, to, "reorder_tracks ignored: index out of range");
            return Edit::noop(next);
        }
        let track = next.tracks.remove(from);
        let to = to.min(next.tracks.len());
        next.tracks.insert(to, track);
        Edit::applied(next)
    }

    /// Shallow-merge track properties. Unknown id is a no-op. Applies to
    /// locked tracks too: the lock guards structure, not properties.
    pub fn update_track(&self, track_id: Uuid, patch: TrackPatch) -> Edit {
        let Some(ti) = self.tracks.iter().position(|t| t.id == track_id) else {
            debug!(%track_id, "update_track ignored: track not found");
            return Edit::noop(self.clone());
        };
        let mut next = self.clone();
        let track = &mut next.tracks[ti];
        if let Some(name) = patch.name {
            track.name = name;
        }
        if let Some(muted) = patch.muted {
            track.muted = muted;
        }
        if let Some(locked) = patch.locked {
            track.locked = locked;
        }
        if let Some(visible) = patch.visible {
            track.visible = visible;
        }
        if let Some(volume) = patch.volume {
            track.volume = Some(volume.clamp(0.0, 1.0));
        }
        if let Some(height) = patch.height {
            track.height = Some(height);
        }
        Edit::applied(next)
    }
}
