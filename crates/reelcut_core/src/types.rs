use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};
use uuid::Uuid;

/// Shortest clip the editor will produce (0.1 s).
pub const MIN_CLIP_DURATION_US: TimeUs = TimeUs(100_000);

/// Duration a drafted clip gets when none is given (5 s).
pub const DEFAULT_CLIP_DURATION_US: TimeUs = TimeUs(5_000_000);

/// Default snap capture distance (0.1 s).
pub const DEFAULT_SNAP_THRESHOLD_US: TimeUs = TimeUs(100_000);

// ---------------------------------------------------------------------------
// TimeUs
// ---------------------------------------------------------------------------

/// A point or span on the timeline, in integer microseconds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeUs(pub i64);

impl TimeUs {
    pub const ZERO: Self = Self(0);

    pub fn from_seconds(s: f64) -> Self {
        Self((s * 1_000_000.0) as i64)
    }

    pub fn as_seconds(&self) -> f64 {
        self.0 as f64 / 1_000_000.0
    }
}

impl Add for TimeUs {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for TimeUs {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Mul<i64> for TimeUs {
    type Output = Self;
    fn mul(self, rhs: i64) -> Self {
        Self(self.0 * rhs)
    }
}

impl Div<i64> for TimeUs {
    type Output = Self;
    fn div(self, rhs: i64) -> Self {
        Self(self.0 / rhs)
    }
}

impl fmt::Display for TimeUs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_us = self.0.unsigned_abs();
        let total_ms = total_us / 1_000;
        let ms = total_ms % 1_000;
        let total_secs = total_ms / 1_000;
        let secs = total_secs % 60;
        let total_mins = total_secs / 60;
        let mins = total_mins % 60;
        let hours = total_mins / 60;
        if self.0 < 0 {
            write!(f, "-{:02}:{:02}:{:02}.{:03}", hours, mins, secs, ms)
        } else {
            write!(f, "{:02}:{:02}:{:02}.{:03}", hours, mins, secs, ms)
        }
    }
}

// ---------------------------------------------------------------------------
// TrackKind / ClipKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TrackKind {
    Video,
    Audio,
    Text,
}

impl TrackKind {
    /// Display prefix used when auto-numbering new tracks.
    pub fn label(&self) -> &'static str {
        match self {
            TrackKind::Video => "Video",
            TrackKind::Audio => "Audio",
            TrackKind::Text => "Text",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ClipKind {
    Video,
    Audio,
    Text,
    Image,
}

// ---------------------------------------------------------------------------
// Transition
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransitionKind {
    Fade,
    CrossDissolve,
    SlideLeft,
    SlideRight,
    SlideUp,
    SlideDown,
    Zoom,
    Wipe,
    Iris,
    None,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Transition {
    pub kind: TransitionKind,
    pub duration_us: TimeUs,
}

/// A clip's incoming/outgoing transition slots. Empty slots stay `None`;
/// removal clears a slot rather than deleting a collection entry.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Transitions {
    pub incoming: Option<Transition>,
    pub outgoing: Option<Transition>,
}

// ---------------------------------------------------------------------------
// Effect
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EffectKind {
    Brightness,
    Contrast,
    Saturation,
    Blur,
    Sharpen,
    Grayscale,
    Sepia,
    Vignette,
    ChromaKey,
    ColorCorrection,
    Speed,
    Reverse,
    Mirror,
}

/// A parametrized, independently toggleable clip transformation. Parameters
/// are kind-specific and opaque to the engine; list order on the clip is
/// application order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Effect {
    pub id: Uuid,
    pub kind: EffectKind,
    pub params: serde_json::Map<String, serde_json::Value>,
    pub enabled: bool,
}

// ---------------------------------------------------------------------------
// Keyframe
// ---------------------------------------------------------------------------

/// An animated property sample. Carried through edits unchanged; the engine
/// never interpolates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Keyframe {
    pub time_us: TimeUs,
    pub property: String,
    pub value: f64,
}

// ---------------------------------------------------------------------------
// Clip
// ---------------------------------------------------------------------------

/// A placed, trimmed reference to source media (or inline content) on a track.
///
/// `trim_start_us`/`trim_end_us` are offsets into the source media, so
/// splitting a clip conserves the total source material referenced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Clip {
    pub id: Uuid,
    pub track_id: Uuid,
    pub kind: ClipKind,
    pub start_us: TimeUs,
    pub duration_us: TimeUs,
    pub trim_start_us: TimeUs,
    pub trim_end_us: TimeUs,
    pub source_url: Option<String>,
    pub asset_id: Option<Uuid>,
    pub content: Option<String>,
    pub transitions: Transitions,
    pub effects: Vec<Effect>,
    pub keyframes: Vec<Keyframe>,
    pub volume: f64,
    pub opacity: f64,
}

impl Clip {
    /// A clip with defaults: zero trims, unit volume/opacity, no transitions,
    /// effects, or keyframes.
    pub fn new(track_id: Uuid, kind: ClipKind, start_us: TimeUs, duration_us: TimeUs) -> Self {
        Self {
            id: Uuid::new_v4(),
            track_id,
            kind,
            start_us,
            duration_us,
            trim_start_us: TimeUs::ZERO,
            trim_end_us: TimeUs::ZERO,
            source_url: None,
            asset_id: None,
            content: None,
            transitions: Transitions::default(),
            effects: vec![],
            keyframes: vec![],
            volume: 1.0,
            opacity: 1.0,
        }
    }

    pub fn end_us(&self) -> TimeUs {
        self.start_us + self.duration_us
    }

    /// Half-open containment test: `[start, start + duration)`.
    pub fn contains(&self, time_us: TimeUs) -> bool {
        self.start_us <= time_us && time_us < self.end_us()
    }

    /// Two clips overlap if their half-open timeline ranges intersect.
    pub fn overlaps(&self, other: &Clip) -> bool {
        self.start_us < other.end_us() && other.start_us < self.end_us()
    }
}

// ---------------------------------------------------------------------------
// Track
// ---------------------------------------------------------------------------

/// A lane of clips of one medium kind. Clips are kept sorted by start time.
///
/// A locked track accepts no structural clip mutation; such edits are
/// no-ops, not errors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Track {
    pub id: Uuid,
    pub kind: TrackKind,
    pub name: String,
    pub clips: Vec<Clip>,
    pub muted: bool,
    pub locked: bool,
    pub visible: bool,
    pub volume: Option<f64>,
    pub height: Option<f64>,
}

impl Track {
    pub fn new(kind: TrackKind, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            name: name.into(),
            clips: vec![],
            muted: false,
            locked: false,
            visible: true,
            volume: match kind {
                TrackKind::Audio => Some(1.0),
                _ => None,
            },
            height: None,
        }
    }

    pub fn clip(&self, clip_id: Uuid) -> Option<&Clip> {
        self.clips.iter().find(|c| c.id == clip_id)
    }

    pub(crate) fn sort_clips(&mut self) {
        self.clips.sort_by_key(|c| c.start_us);
    }
}

// ---------------------------------------------------------------------------
// Marker
// ---------------------------------------------------------------------------

/// Timeline-level annotation, unrelated to any clip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Marker {
    pub id: Uuid,
    pub time_us: TimeUs,
    pub label: String,
    pub color: String,
}

// ---------------------------------------------------------------------------
// Timeline
// ---------------------------------------------------------------------------

/// Root aggregate: tracks + markers + derived duration + playhead.
///
/// `duration_us` is recomputed from clip extents after every structural
/// mutation; it is never an independent source of truth.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Timeline {
    pub id: Uuid,
    pub tracks: Vec<Track>,
    pub markers: Vec<Marker>,
    pub playhead_us: TimeUs,
    pub duration_us: TimeUs,
}

impl Timeline {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            tracks: vec![],
            markers: vec![],
            playhead_us: TimeUs::ZERO,
            duration_us: TimeUs::ZERO,
        }
    }

    /// Pure reduction: max clip end over all tracks, zero when empty.
    pub fn calculate_duration(&self) -> TimeUs {
        self.tracks
            .iter()
            .flat_map(|t| t.clips.iter())
            .map(|c| c.end_us())
            .max()
            .unwrap_or(TimeUs::ZERO)
    }

    pub(crate) fn refresh_duration(&mut self) {
        self.duration_us = self.calculate_duration();
    }

    pub fn track(&self, track_id: Uuid) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == track_id)
    }

    pub fn clip(&self, clip_id: Uuid) -> Option<&Clip> {
        self.tracks.iter().flat_map(|t| t.clips.iter()).find(|c| c.id == clip_id)
    }

    pub(crate) fn clip_mut(&mut self, clip_id: Uuid) -> Option<&mut Clip> {
        self.tracks
            .iter_mut()
            .flat_map(|t| t.clips.iter_mut())
            .find(|c| c.id == clip_id)
    }

    /// (track_index, clip_index) for a clip id.
    pub(crate) fn locate_clip(&self, clip_id: Uuid) -> Option<(usize, usize)> {
        for (ti, track) in self.tracks.iter().enumerate() {
            for (ci, clip) in track.clips.iter().enumerate() {
                if clip.id == clip_id {
                    return Some((ti, ci));
                }
            }
        }
        None
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
