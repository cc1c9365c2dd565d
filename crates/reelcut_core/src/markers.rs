use crate::edit::Edit;
use crate::types::*;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// Color a marker gets when none is given.
pub const DEFAULT_MARKER_COLOR: &str = "#f5c518";

/// Partial marker update. Fields left `None` keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MarkerPatch {
    pub time_us: Option<TimeUs>,
    pub label: Option<String>,
    pub color: Option<String>,
}

impl Timeline {
    /// Drop a marker at a time (clamped >= 0). Markers stay sorted by time.
    pub fn add_marker(&self, time_us: TimeUs, label: &str, color: Option<&str>) -> Edit {
        let mut next = self.clone();
        next.markers.push(Marker {
            id: Uuid::new_v4(),
            time_us: time_us.max(TimeUs::ZERO),
            label: label.to_string(),
            color: color.unwrap_or(DEFAULT_MARKER_COLOR).to_string(),
        });
        next.markers.sort_by_key(|m| m.time_us);
        Edit::applied(next)
    }

    /// Shallow-merge marker fields. Unknown id is a no-op.
    pub fn update_marker(&self, marker_id: Uuid, patch: MarkerPatch) -> Edit {
        let Some(mi) = self.markers.iter().position(|m| m.id == marker_id) else {
            debug!(%marker_id, "update_marker ignored: marker not found");
            return Edit::noop(self.clone());
        };
        let mut next = self.clone();
        let marker = &mut next.markers[mi];
        if let Some(time_us) = patch.time_us {
            marker.time_us = time_us.max(TimeUs::ZERO);
        }
        if let Some(label) = patch.label {
            marker.label = label;
        }
        if let Some(color) = patch.color {
            marker.color = color;
        }
        next.markers.sort_by_key(|m| m.time_us);
        Edit::applied(next)
    }

    /// Remove a marker. Unknown id is a no-op.
    pub fn remove_marker(&self, marker_id: Uuid) -> Edit {
        let Some(mi) = self.markers.iter().position(|m| m.id == marker_id) else {
            debug!(%marker_id, "remove_marker ignored: marker not found");
            return Edit::noop(self.clone());
        };
        let mut next = self.clone();
        next.markers.remove(mi);
        Edit::applied(next)
    }

    /// Move the playhead, clamped into `[0, duration]`. Setting it to where
    /// it already is is a no-op, so hosts never snapshot pure scrubbing.
    pub fn set_playhead(&self, time_us: TimeUs) -> Edit {
        let clamped = time_us.max(TimeUs::ZERO).min(self.duration_us);
        if clamped == self.playhead_us {
            return Edit::noop(self.clone());
        }
        let mut next = self.clone();
        next.playhead_us = clamped;
        Edit::applied(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clips::ClipDraft;
    use crate::edit::EditStatus;

    #[test]
    fn add_marker_defaults_and_sorting() {
        let tl = Timeline::new();
        let tl = tl.add_marker(TimeUs(5_000_000), "outro", None).timeline;
        let tl = tl.add_marker(TimeUs(1_000_000), "hook", Some("#ff4242")).timeline;

        assert_eq!(tl.markers.len(), 2);
        assert_eq!(tl.markers[0].label, "hook");
        assert_eq!(tl.markers[0].color, "#ff4242");
        assert_eq!(tl.markers[1].label, "outro");
        assert_eq!(tl.markers[1].color, DEFAULT_MARKER_COLOR);
    }

    #[test]
    fn add_marker_clamps_negative_time() {
        let tl = Timeline::new().add_marker(TimeUs(-1), "pre-roll", None).timeline;
        assert_eq!(tl.markers[0].time_us, TimeUs::ZERO);
    }

    #[test]
    fn update_marker_merges_and_resorts() {
        let tl = Timeline::new()
            .add_marker(TimeUs(1_000_000), "a", None)
            .timeline
            .add_marker(TimeUs(2_000_000), "b", None)
            .timeline;
        let first = tl.markers[0].id;

        let edit = tl.update_marker(
            first,
            MarkerPatch {
                time_us: Some(TimeUs(3_000_000)),
                label: Some("a-moved".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(edit.timeline.markers[1].id, first);
        assert_eq!(edit.timeline.markers[1].label, "a-moved");
    }

    #[test]
    fn marker_ops_with_unknown_id_are_noops() {
        let tl = Timeline::new().add_marker(TimeUs(0), "a", None).timeline;
        let ghost = Uuid::new_v4();
        let edit = tl.update_marker(ghost, MarkerPatch::default());
        assert_eq!(edit.status, EditStatus::Noop);
        assert_eq!(edit.timeline, tl);
        let edit = tl.remove_marker(ghost);
        assert_eq!(edit.status, EditStatus::Noop);
        assert_eq!(edit.timeline, tl);
    }

    #[test]
    fn remove_marker_works() {
        let tl = Timeline::new().add_marker(TimeUs(0), "a", None).timeline;
        let id = tl.markers[0].id;
        let edit = tl.remove_marker(id);
        assert!(edit.timeline.markers.is_empty());
    }

    #[test]
    fn set_playhead_clamps_into_timeline() {
        let tl = Timeline::new().add_track(TrackKind::Video, None).timeline;
        let track_id = tl.tracks[0].id;
        let tl = tl.add_clip(track_id, ClipDraft::default()).timeline;

        let edit = tl.set_playhead(TimeUs(2_000_000));
        assert_eq!(edit.timeline.playhead_us, TimeUs(2_000_000));

        let edit = tl.set_playhead(TimeUs(99_000_000));
        assert_eq!(edit.timeline.playhead_us, tl.duration_us);

        let edit = tl.set_playhead(TimeUs(-5));
        assert_eq!(edit.timeline.playhead_us, TimeUs::ZERO);
    }

    #[test]
    fn set_playhead_to_current_position_is_noop() {
        let tl = Timeline::new();
        let edit = tl.set_playhead(TimeUs::ZERO);
        assert_eq!(edit.status, EditStatus::Noop);
    }
}
