use crate::types::*;
use uuid::Uuid;

/// Result of a snap attempt: the resolved time, and whether it moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snap {
    pub snapped: bool,
    pub time_us: TimeUs,
}

/// Collect every snap candidate from a timeline: zero, each clip's edges
/// (minus one clip being dragged), each marker, and the timeline end.
/// Sorted and deduplicated.
pub fn snap_points(timeline: &Timeline, exclude_clip: Option<Uuid>) -> Vec<TimeUs> {
    let mut points = vec![TimeUs::ZERO];

    for track in &timeline.tracks {
        for clip in &track.clips {
            if Some(clip.id) == exclude_clip {
                continue;
            }
            points.push(clip.start_us);
            points.push(clip.end_us());
        }
    }

    for marker in &timeline.markers {
        points.push(marker.time_us);
    }

    points.push(timeline.duration_us);
    points.sort();
    points.dedup();
    points
}

/// Resolve a position against snap candidates: the closest point within the
/// threshold wins (ties go to the earlier point); otherwise the position
/// comes back unmoved with `snapped = false`.
pub fn snap_to_nearest(position_us: TimeUs, points: &[TimeUs], threshold_us: TimeUs) -> Snap {
    let mut best = position_us;
    let mut best_dist = threshold_us.0 + 1;

    for &point in points {
        let dist = (position_us.0 - point.0).abs();
        if dist < best_dist {
            best = point;
            best_dist = dist;
        }
    }

    if best_dist <= threshold_us.0 {
        Snap {
            snapped: true,
            time_us: best,
        }
    } else {
        Snap {
            snapped: false,
            time_us: position_us,
        }
    }
}
