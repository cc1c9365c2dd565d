use crate::error::Result;
use reelcut_core::types::Timeline;
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

/// Output format the project targets. Opaque to the engine; the export
/// collaborator consumes it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectSettings {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    pub sample_rate: u32,
}

/// A timeline plus the metadata a host persists around it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub settings: ProjectSettings,
    pub timeline: Timeline,
}

impl Project {
    pub fn new(name: impl Into<String>, settings: ProjectSettings) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            settings,
            timeline: Timeline::new(),
        }
    }

    /// Save as pretty-printed JSON, appending a `.reelcut` extension when
    /// missing.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = ensure_extension(path.as_ref());
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        let project: Project = serde_json::from_str(&data)?;
        Ok(project)
    }
}

/// 1920x1080 30fps preset.
pub fn preset_1080p() -> ProjectSettings {
    ProjectSettings {
        width: 1920,
        height: 1080,
        fps: 30.0,
        sample_rate: 48000,
    }
}

/// 1280x720 30fps preset.
pub fn preset_720p() -> ProjectSettings {
    ProjectSettings {
        width: 1280,
        height: 720,
        fps: 30.0,
        sample_rate: 48000,
    }
}

/// 1080x1920 30fps (vertical/social) preset.
pub fn preset_vertical() -> ProjectSettings {
    ProjectSettings {
        width: 1080,
        height: 1920,
        fps: 30.0,
        sample_rate: 48000,
    }
}

/// 3840x2160 30fps (4K) preset.
pub fn preset_4k() -> ProjectSettings {
    ProjectSettings {
        width: 3840,
        height: 2160,
        fps: 30.0,
        sample_rate: 48000,
    }
}

fn ensure_extension(path: &Path) -> std::path::PathBuf {
    if path.extension().and_then(|e| e.to_str()) == Some("reelcut") {
        path.to_path_buf()
    } else {
        let mut p = path.to_path_buf();
        let mut name = p.file_name().unwrap_or_default().to_os_string();
        name.push(".reelcut");
        p.set_file_name(name);
        p
    }
}
