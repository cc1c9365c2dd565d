use crate::types::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Advisory validation result: human-readable findings, nothing fatal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl Timeline {
    /// Pairwise half-open overlap check among one track's clips, optionally
    /// ignoring a clip mid-drag. Unknown track reports no overlap.
    pub fn has_overlap(&self, track_id: Uuid, exclude_clip: Option<Uuid>) -> bool {
        let Some(track) = self.track(track_id) else {
            return false;
        };
        let clips: Vec<&Clip> = track
            .clips
            .iter()
            .filter(|c| Some(c.id) != exclude_clip)
            .collect();
        for (i, a) in clips.iter().enumerate() {
            for b in &clips[i + 1..] {
                if a.overlaps(b) {
                    return true;
                }
            }
        }
        false
    }

    /// Sweep the whole timeline for rule violations: per-track overlaps,
    /// negative start times, non-positive durations, negative trims. The
    /// engine never blocks these states from existing; hosts run this
    /// before export or persistence.
    pub fn validate(&self) -> ValidationReport {
        let mut errors = Vec::new();

        for track in &self.tracks {
            if self.has_overlap(track.id, None) {
                errors.push(format!("track '{}' has overlapping clips", track.name));
            }
            for clip in &track.clips {
                if clip.start_us < TimeUs::ZERO {
                    errors.push(format!(
                        "clip {} on track '{}' has a negative start time ({})",
                        clip.id, track.name, clip.start_us
                    ));
                }
                if clip.duration_us <= TimeUs::ZERO {
                    errors.push(format!(
                        "clip {} on track '{}' has a non-positive duration ({})",
                        clip.id, track.name, clip.duration_us
                    ));
                }
                if clip.trim_start_us < TimeUs::ZERO || clip.trim_end_us < TimeUs::ZERO {
                    errors.push(format!(
                        "clip {} on track '{}' has a negative trim offset",
                        clip.id, track.name
                    ));
                }
            }
        }

        ValidationReport {
            valid: errors.is_empty(),
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clips::ClipDraft;

    fn draft_at(start_us: i64, duration_us: i64) -> ClipDraft {
        ClipDraft {
            start_us: Some(TimeUs(start_us)),
            duration_us: Some(TimeUs(duration_us)),
            ..Default::default()
        }
    }

    #[test]
    fn overlapping_intervals_detected() {
        let tl = Timeline::new().add_track(TrackKind::Video, None).timeline;
        let track_id = tl.tracks[0].id;
        // [0,5s) and [3s,8s) overlap
        let tl = tl.add_clip(track_id, draft_at(0, 5_000_000)).timeline;
        let tl = tl.add_clip(track_id, draft_at(3_000_000, 5_000_000)).timeline;
        assert!(tl.has_overlap(track_id, None));
    }

    #[test]
    fn adjacent_intervals_do_not_overlap() {
        let tl = Timeline::new().add_track(TrackKind::Video, None).timeline;
        let track_id = tl.tracks[0].id;
        // [0,5s) and [5s,8s) are adjacent, not overlapping
        let tl = tl.add_clip(track_id, draft_at(0, 5_000_000)).timeline;
        let tl = tl.add_clip(track_id, draft_at(5_000_000, 3_000_000)).timeline;
        assert!(!tl.has_overlap(track_id, None));
    }

    #[test]
    fn excluding_the_offender_clears_the_overlap() {
        let tl = Timeline::new().add_track(TrackKind::Video, None).timeline;
        let track_id = tl.tracks[0].id;
        let tl = tl.add_clip(track_id, draft_at(0, 5_000_000)).timeline;
        let tl = tl.add_clip(track_id, draft_at(3_000_000, 5_000_000)).timeline;
        let second = tl.tracks[0].clips[1].id;
        assert!(!tl.has_overlap(track_id, Some(second)));
    }

    #[test]
    fn unknown_track_has_no_overlap() {
        let tl = Timeline::new();
        assert!(!tl.has_overlap(Uuid::new_v4(), None));
    }

    #[test]
    fn validate_passes_a_clean_timeline() {
        let tl = Timeline::new().add_track(TrackKind::Video, None).timeline;
        let track_id = tl.tracks[0].id;
        let tl = tl.add_clip(track_id, draft_at(0, 5_000_000)).timeline;
        let tl = tl.add_clip(track_id, draft_at(5_000_000, 5_000_000)).timeline;

        let report = tl.validate();
        assert!(report.valid);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn validate_reports_overlap_per_track() {
        let tl = Timeline::new().add_track(TrackKind::Video, None).timeline;
        let track_id = tl.tracks[0].id;
        let tl = tl.add_clip(track_id, draft_at(0, 5_000_000)).timeline;
        let tl = tl.add_clip(track_id, draft_at(2_000_000, 5_000_000)).timeline;

        let report = tl.validate();
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("overlapping"));
    }

    #[test]
    fn validate_reports_bad_values_built_by_hand() {
        // engine operations clamp these away; hosts can still deserialize
        // or construct them
        let mut tl = Timeline::new();
        let mut track = Track::new(TrackKind::Video, "Video 1");
        let mut clip = Clip::new(track.id, ClipKind::Video, TimeUs(-1_000_000), TimeUs::ZERO);
        clip.trim_start_us = TimeUs(-5);
        track.clips.push(clip);
        tl.tracks.push(track);

        let report = tl.validate();
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 3);
        assert!(report.errors.iter().any(|e| e.contains("negative start")));
        assert!(report.errors.iter().any(|e| e.contains("non-positive duration")));
        assert!(report.errors.iter().any(|e| e.contains("negative trim")));
    }
}
