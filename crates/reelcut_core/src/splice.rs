use crate::edit::Edit;
use crate::types::*;
use tracing::debug;
use uuid::Uuid;

impl Timeline {
    /// Cut one clip into two at a timeline position strictly inside it.
    ///
    /// The left half keeps the original id; its `trim_end` grows by the
    /// trimmed-off tail so the total source material referenced is
    /// conserved, and its outgoing transition is cleared. The right half
    /// gets a fresh id, its `trim_start` advances by the left's new
    /// duration, and its incoming transition is cleared. Effects and
    /// keyframes are duplicated onto both halves.
    pub fn split_clip(&self, clip_id: Uuid, split_us: TimeUs) -> Edit {
        let mut next = self.clone();
        let Some((ti, ci)) = next.locate_clip(clip_id) else {
            debug!(%clip_id, "split_clip ignored: clip not found");
            return Edit::noop(next);
        };
        if next.tracks[ti].locked {
            debug!(%clip_id, "split_clip ignored: track locked");
            return Edit::noop(next);
        }
        let track_id = next.tracks[ti].id;
        let original = next.tracks[ti].clips[ci].clone();
        if split_us <= original.start_us || split_us >= original.end_us() {
            debug!(%clip_id, %split_us, "split_clip ignored: point outside clip");
            return Edit::noop(next);
        }

        let left_duration = split_us - original.start_us;
        let tail = original.duration_us - left_duration;

        let mut left = original.clone();
        left.duration_us = left_duration;
        left.trim_end_us = left.trim_end_us + tail;
        left.transitions.outgoing = None;

        let mut right = original;
        right.id = Uuid::new_v4();
        right.start_us = split_us;
        right.duration_us = tail;
        right.trim_start_us = right.trim_start_us + left_duration;
        right.transitions.incoming = None;

        next.tracks[ti].clips[ci] = left;
        next.tracks[ti].clips.insert(ci + 1, right);
        next.refresh_duration();
        Edit::checked(next, track_id)
    }

    /// Combine two or more clips on one track into the earliest of them.
    ///
    /// Ids that resolve to a different track than the first resolved clip
    /// are skipped; fewer than two surviving entries is a no-op. The
    /// survivor keeps its id and properties, stretches to span the merged
    /// extent, and takes its outgoing transition from the last clip.
    pub fn merge_clips(&self, clip_ids: &[Uuid]) -> Edit {
        let mut next = self.clone();

        let mut anchor: Option<usize> = None;
        let mut selected: Vec<Uuid> = Vec::new();
        for &id in clip_ids {
            let Some((ti, _)) = next.locate_clip(id) else {
                debug!(%id, "merge_clips: skipping unknown clip");
                continue;
            };
            match anchor {
                None => {
                    anchor = Some(ti);
                    selected.push(id);
                }
                Some(a) if a == ti => {
                    if !selected.contains(&id) {
                        selected.push(id);
                    }
                }
                Some(_) => {
                    debug!(%id, "merge_clips: skipping clip on another track");
                }
            }
        }

        let Some(ti) = anchor else {
            debug!("merge_clips ignored: no clips resolved");
            return Edit::noop(next);
        };
        if selected.len() < 2 {
            debug!("merge_clips ignored: fewer than two clips on one track");
            return Edit::noop(next);
        }
        if next.tracks[ti].locked {
            debug!("merge_clips ignored: track locked");
            return Edit::noop(next);
        }
        let track_id = next.tracks[ti].id;

        let mut merged: Vec<Clip> = next.tracks[ti]
            .clips
            .iter()
            .filter(|c| selected.contains(&c.id))
            .cloned()
            .collect();
        merged.sort_by_key(|c| c.start_us);

        let survivor_id = merged[0].id;
        let outgoing = merged[merged.len() - 1].transitions.outgoing;
        let span_end = merged
            .iter()
            .map(|c| c.end_us())
            .fold(TimeUs::ZERO, |a, b| a.max(b));

        let track = &mut next.tracks[ti];
        if let Some(survivor) = track.clips.iter_mut().find(|c| c.id == survivor_id) {
            survivor.duration_us = span_end - survivor.start_us;
            survivor.transitions.outgoing = outgoing;
        }
        track
            .clips
            .retain(|c| c.id == survivor_id || !selected.contains(&c.id));
        track.sort_clips();
        next.refresh_duration();
        Edit::checked(next, track_id)
    }
}
