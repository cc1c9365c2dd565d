use crate::edit::Edit;
use crate::types::*;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// Everything needed to place a new clip; unset fields take defaults
/// (kind Video, start 0, duration 5 s, zero trims, unit volume/opacity).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClipDraft {
    pub kind: Option<ClipKind>,
    pub start_us: Option<TimeUs>,
    pub duration_us: Option<TimeUs>,
    pub trim_start_us: Option<TimeUs>,
    pub trim_end_us: Option<TimeUs>,
    pub source_url: Option<String>,
    pub asset_id: Option<Uuid>,
    pub content: Option<String>,
    pub volume: Option<f64>,
    pub opacity: Option<f64>,
}

impl ClipDraft {
    /// Build the concrete clip, synthesizing a fresh id and clamping every
    /// numeric field into its valid range.
    pub(crate) fn materialize(self, track_id: Uuid) -> Clip {
        let mut clip = Clip::new(
            track_id,
            self.kind.unwrap_or(ClipKind::Video),
            self.start_us.unwrap_or(TimeUs::ZERO).max(TimeUs::ZERO),
            self.duration_us
                .unwrap_or(DEFAULT_CLIP_DURATION_US)
                .max(MIN_CLIP_DURATION_US),
        );
        clip.trim_start_us = self.trim_start_us.unwrap_or(TimeUs::ZERO).max(TimeUs::ZERO);
        clip.trim_end_us = self.trim_end_us.unwrap_or(TimeUs::ZERO).max(TimeUs::ZERO);
        clip.source_url = self.source_url;
        clip.asset_id = self.asset_id;
        clip.content = self.content;
        clip.volume = self.volume.unwrap_or(1.0).clamp(0.0, 1.0);
        clip.opacity = self.opacity.unwrap_or(1.0).clamp(0.0, 1.0);
        clip
    }
}

/// Partial clip update. Fields left `None` keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClipPatch {
    pub kind: Option<ClipKind>,
    pub start_us: Option<TimeUs>,
    pub duration_us: Option<TimeUs>,
    pub trim_start_us: Option<TimeUs>,
    pub trim_end_us: Option<TimeUs>,
    pub source_url: Option<String>,
    pub asset_id: Option<Uuid>,
    pub content: Option<String>,
    pub volume: Option<f64>,
    pub opacity: Option<f64>,
}

impl Timeline {
    /// Place a drafted clip on a track, keeping the clip list sorted by
    /// start time. Missing or locked track is a no-op.
    pub fn add_clip(&self, track_id: Uuid, draft: ClipDraft) -> Edit {
        let Some(ti) = self.tracks.iter().position(|t| t.id == track_id) else {
            debug!(%track_id, "add_clip ignored: track not found");
            return Edit::noop(self.clone());
        };
        if self.tracks[ti].locked {
            debug!(%track_id, "add_clip ignored: track locked");
            return Edit::noop(self.clone());
        }
        let mut next = self.clone();
        let track = &mut next.tracks[ti];
        track.clips.push(draft.materialize(track_id));
        track.sort_clips();
        next.refresh_duration();
        Edit::checked(next, track_id)
    }

    /// Remove a clip from whichever track holds it. Missing clip or locked
    /// track is a no-op.
    pub fn remove_clip(&self, clip_id: Uuid) -> Edit {
        let mut next = self.clone();
        let Some((ti, ci)) = next.locate_clip(clip_id) else {
            debug!(%clip_id, "remove_clip ignored: clip not found");
            return Edit::noop(next);
        };
        if next.tracks[ti].locked {
            debug!(%clip_id, "remove_clip ignored: track locked");
            return Edit::noop(next);
        }
        next.tracks[ti].clips.remove(ci);
        next.refresh_duration();
        Edit::applied(next)
    }

    /// Field-level merge onto a clip; the primitive under trim and resize.
    /// Numeric fields are clamped (start/trims >= 0, duration >= 0.1 s).
    pub fn update_clip(&self, clip_id: Uuid, patch: ClipPatch) -> Edit {
        let mut next = self.clone();
        let Some((ti, ci)) = next.locate_clip(clip_id) else {
            debug!(%clip_id, "update_clip ignored: clip not found");
            return Edit::noop(next);
        };
        let track_id = next.tracks[ti].id;
        let clip = &mut next.tracks[ti].clips[ci];

        if let Some(kind) = patch.kind {
            clip.kind = kind;
        }
        if let Some(start) = patch.start_us {
            clip.start_us = start.max(TimeUs::ZERO);
        }
        if let Some(duration) = patch.duration_us {
            clip.duration_us = duration.max(MIN_CLIP_DURATION_US);
        }
        if let Some(trim_start) = patch.trim_start_us {
            clip.trim_start_us = trim_start.max(TimeUs::ZERO);
        }
        if let Some(trim_end) = patch.trim_end_us {
            clip.trim_end_us = trim_end.max(TimeUs::ZERO);
        }
        if let Some(source_url) = patch.source_url {
            clip.source_url = Some(source_url);
        }
        if let Some(asset_id) = patch.asset_id {
            clip.asset_id = Some(asset_id);
        }
        if let Some(content) = patch.content {
            clip.content = Some(content);
        }
        if let Some(volume) = patch.volume {
            clip.volume = volume.clamp(0.0, 1.0);
        }
        if let Some(opacity) = patch.opacity {
            clip.opacity = opacity.clamp(0.0, 1.0);
        }

        next.tracks[ti].sort_clips();
        next.refresh_duration();
        Edit::checked(next, track_id)
    }

    /// Move a clip to a (possibly different) track at a new start time.
    /// If either track is locked, or the clip or destination is missing,
    /// nothing changes: the clip keeps its original position, it is never
    /// dropped.
    pub fn move_clip(&self, clip_id: Uuid, new_track_id: Uuid, new_start_us: TimeUs) -> Edit {
        let mut next = self.clone();
        let Some((ti, ci)) = next.locate_clip(clip_id) else {
            debug!(%clip_id, "move_clip ignored: clip not found");
            return Edit::noop(next);
        };
        if next.tracks[ti].locked {
            debug!(%clip_id, "move_clip ignored: source track locked");
            return Edit::noop(next);
        }
        let Some(di) = next.tracks.iter().position(|t| t.id == new_track_id) else {
            debug!(%new_track_id, "move_clip ignored: destination not found");
            return Edit::noop(next);
        };
        if next.tracks[di].locked {
            debug!(%new_track_id, "move_clip ignored: destination locked");
            return Edit::noop(next);
        }

        let mut clip = next.tracks[ti].clips.remove(ci);
        clip.track_id = new_track_id;
        clip.start_us = new_start_us.max(TimeUs::ZERO);
        next.tracks[di].clips.push(clip);
        next.tracks[di].sort_clips();
        next.refresh_duration();
        Edit::checked(next, new_track_id)
    }

    /// Set the clip's source in-point offset, clamped >= 0.
    pub fn trim_clip_start(&self, clip_id: Uuid, trim_start_us: TimeUs) -> Edit {
        self.update_clip(
            clip_id,
            ClipPatch {
                trim_start_us: Some(trim_start_us),
                ..Default::default()
            },
        )
    }

    /// Set the clip's source out-point offset, clamped >= 0.
    pub fn trim_clip_end(&self, clip_id: Uuid, trim_end_us: TimeUs) -> Edit {
        self.update_clip(
            clip_id,
            ClipPatch {
                trim_end_us: Some(trim_end_us),
                ..Default::default()
            },
        )
    }

    /// Set the clip's timeline duration, clamped to the 0.1 s minimum.
    pub fn resize_clip(&self, clip_id: Uuid, duration_us: TimeUs) -> Edit {
        self.update_clip(
            clip_id,
            ClipPatch {
                duration_us: Some(duration_us),
                ..Default::default()
            },
        )
    }
}
