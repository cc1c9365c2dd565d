use crate::clips::ClipDraft;
use crate::edit::Edit;
use crate::types::*;
use tracing::debug;
use uuid::Uuid;

impl Timeline {
    /// Remove a clip and close the gap: every clip on the same track
    /// starting at or after the removed clip shifts earlier by its
    /// duration. Other tracks are untouched.
    pub fn ripple_delete(&self, clip_id: Uuid) -> Edit {
        let mut next = self.clone();
        let Some((ti, ci)) = next.locate_clip(clip_id) else {
            debug!(%clip_id, "ripple_delete ignored: clip not found");
            return Edit::noop(next);
        };
        if next.tracks[ti].locked {
            debug!(%clip_id, "ripple_delete ignored: track locked");
            return Edit::noop(next);
        }
        let track_id = next.tracks[ti].id;
        let removed = next.tracks[ti].clips.remove(ci);
        let gap = removed.duration_us;

        for clip in &mut next.tracks[ti].clips {
            if clip.start_us >= removed.start_us {
                clip.start_us = (clip.start_us - gap).max(TimeUs::ZERO);
            }
        }
        next.tracks[ti].sort_clips();
        next.refresh_duration();
        Edit::checked(next, track_id)
    }

    /// Open a gap and place a drafted clip into it: every clip on the track
    /// starting at or after `insert_us` shifts later by the new clip's
    /// duration. Missing or locked track is a no-op.
    pub fn ripple_insert(&self, track_id: Uuid, draft: ClipDraft, insert_us: TimeUs) -> Edit {
        let Some(ti) = self.tracks.iter().position(|t| t.id == track_id) else {
            debug!(%track_id, "ripple_insert ignored: track not found");
            return Edit::noop(self.clone());
        };
        if self.tracks[ti].locked {
            debug!(%track_id, "ripple_insert ignored: track locked");
            return Edit::noop(self.clone());
        }

        let insert_us = insert_us.max(TimeUs::ZERO);
        let mut clip = draft.materialize(track_id);
        clip.start_us = insert_us;
        let gap = clip.duration_us;

        let mut next = self.clone();
        let track = &mut next.tracks[ti];
        for existing in &mut track.clips {
            if existing.start_us >= insert_us {
                existing.start_us = existing.start_us + gap;
            }
        }
        track.clips.push(clip);
        track.sort_clips();
        next.refresh_duration();
        Edit::checked(next, track_id)
    }
}
