use crate::types::*;
use uuid::Uuid;

impl Timeline {
    /// The clip on a track containing a point in time, by the half-open
    /// convention `[start, start + duration)`.
    pub fn clip_at(&self, track_id: Uuid, time_us: TimeUs) -> Option<&Clip> {
        self.track(track_id)?
            .clips
            .iter()
            .find(|c| c.contains(time_us))
    }

    /// Every clip, on any track, whose interval overlaps `[start, end)`.
    /// Ordered track-by-track, then by start time within a track.
    pub fn clips_in_range(&self, start_us: TimeUs, end_us: TimeUs) -> Vec<&Clip> {
        self.tracks
            .iter()
            .flat_map(|t| t.clips.iter())
            .filter(|c| c.start_us < end_us && start_us < c.end_us())
            .collect()
    }

    /// Reverse lookup: the track holding a clip.
    pub fn track_of_clip(&self, clip_id: Uuid) -> Option<&Track> {
        self.tracks
            .iter()
            .find(|t| t.clips.iter().any(|c| c.id == clip_id))
    }
}
