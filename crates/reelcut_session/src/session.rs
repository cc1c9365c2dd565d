use crate::error::Result;
use crate::history::History;
use crate::project::Project;
use reelcut_core::edit::{Edit, EditStatus};
use reelcut_core::types::Timeline;
use std::path::Path;
use tracing::{debug, warn};

/// The host-side editing loop around a project: current timeline value,
/// snapshot history, and a dirty flag for the auto-save cadence.
///
/// The discipline is strictly: read the current value, compute a new value
/// through one engine call, swap the reference. Snapshots are taken only
/// when an edit actually changed something, so no-op edits can never
/// pollute the undo stack.
#[derive(Debug)]
pub struct EditorSession {
    project: Project,
    history: History,
    dirty: bool,
}

impl EditorSession {
    pub fn new(project: Project) -> Self {
        Self {
            project,
            history: History::default(),
            dirty: false,
        }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn timeline(&self) -> &Timeline {
        &self.project.timeline
    }

    /// Run one engine operation against the current timeline. The previous
    /// value is snapshotted under `label` when the edit applied; an edit
    /// that applied but left a track overlapping is kept and logged.
    pub fn edit<F>(&mut self, label: &str, op: F) -> EditStatus
    where
        F: FnOnce(&Timeline) -> Edit,
    {
        let edit = op(&self.project.timeline);
        match edit.status {
            EditStatus::Noop => {
                debug!(label, "edit was a no-op, nothing recorded");
            }
            EditStatus::Applied | EditStatus::Overlapping => {
                if edit.status == EditStatus::Overlapping {
                    warn!(label, "edit left overlapping clips on a track");
                }
                let before = std::mem::replace(&mut self.project.timeline, edit.timeline);
                self.history.push(before, label);
                self.dirty = true;
            }
        }
        edit.status
    }

    /// Roll the timeline back one snapshot.
    pub fn undo(&mut self) -> Result<()> {
        let restored = self.history.undo(self.project.timeline.clone())?;
        self.project.timeline = restored;
        self.dirty = true;
        Ok(())
    }

    /// Replay the most recently undone edit.
    pub fn redo(&mut self) -> Result<()> {
        let replayed = self.history.redo(self.project.timeline.clone())?;
        self.project.timeline = replayed;
        self.dirty = true;
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.history.undo_description()
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.history.redo_description()
    }

    /// Whether there are edits the host has not persisted yet.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Persist the project and clear the dirty flag.
    pub fn save_to_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.project.save_to_file(path)?;
        self.dirty = false;
        Ok(())
    }

    /// Load a project into a fresh session: empty history, clean flag.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let project = Project::load_from_file(path)?;
        Ok(Self::new(project))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::preset_1080p;
    use reelcut_core::clips::ClipDraft;
    use reelcut_core::types::{TimeUs, TrackKind};
    use tempfile::TempDir;
    use uuid::Uuid;

    fn session_with_video_track() -> (EditorSession, Uuid) {
        let mut session = EditorSession::new(Project::new("Test", preset_1080p()));
        session.edit("Add track", |tl| tl.add_track(TrackKind::Video, None));
        let track_id = session.timeline().tracks[0].id;
        (session, track_id)
    }

    #[test]
    fn applied_edit_snapshots_and_dirties() {
        let (mut session, track_id) = session_with_video_track();
        assert!(session.is_dirty());
        session.mark_clean();

        let status = session.edit("Add clip", |tl| tl.add_clip(track_id, ClipDraft::default()));
        assert_eq!(status, EditStatus::Applied);
        assert!(session.is_dirty());
        assert!(session.can_undo());
        assert_eq!(session.undo_description(), Some("Add clip"));
        assert_eq!(session.timeline().tracks[0].clips.len(), 1);
    }

    #[test]
    fn noop_edit_is_not_snapshotted() {
        let (mut session, _) = session_with_video_track();
        session.mark_clean();
        let undo_count_before = session.can_undo();

        let status = session.edit("Remove ghost clip", |tl| tl.remove_clip(Uuid::new_v4()));
        assert_eq!(status, EditStatus::Noop);
        assert!(!session.is_dirty());
        assert_eq!(session.can_undo(), undo_count_before);
        assert_ne!(session.undo_description(), Some("Remove ghost clip"));
    }

    #[test]
    fn undo_then_redo_round_trips() {
        let (mut session, track_id) = session_with_video_track();
        session.edit("Add clip", |tl| tl.add_clip(track_id, ClipDraft::default()));
        let with_clip = session.timeline().clone();

        session.undo().unwrap();
        assert!(session.timeline().tracks[0].clips.is_empty());
        assert!(session.can_redo());

        session.redo().unwrap();
        assert_eq!(session.timeline(), &with_clip);
    }

    #[test]
    fn new_edit_clears_redo() {
        let (mut session, track_id) = session_with_video_track();
        session.edit("Add clip", |tl| tl.add_clip(track_id, ClipDraft::default()));
        session.undo().unwrap();
        assert!(session.can_redo());

        session.edit("Add marker", |tl| tl.add_marker(TimeUs(0), "hook", None));
        assert!(!session.can_redo());
    }

    #[test]
    fn undo_with_empty_history_errors() {
        let mut session = EditorSession::new(Project::new("Empty", preset_1080p()));
        assert!(session.undo().is_err());
        assert!(session.redo().is_err());
    }

    #[test]
    fn overlapping_edit_is_kept_and_undoable() {
        let (mut session, track_id) = session_with_video_track();
        session.edit("Add clip", |tl| tl.add_clip(track_id, ClipDraft::default()));

        let status = session.edit("Add overlapping clip", |tl| {
            tl.add_clip(
                track_id,
                ClipDraft {
                    start_us: Some(TimeUs(2_000_000)),
                    ..Default::default()
                },
            )
        });
        assert_eq!(status, EditStatus::Overlapping);
        assert_eq!(session.timeline().tracks[0].clips.len(), 2);
        assert!(!session.timeline().validate().valid);

        session.undo().unwrap();
        assert_eq!(session.timeline().tracks[0].clips.len(), 1);
        assert!(session.timeline().validate().valid);
    }

    #[test]
    fn save_clears_dirty_and_load_starts_clean() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.reelcut");

        let (mut session, track_id) = session_with_video_track();
        session.edit("Add clip", |tl| tl.add_clip(track_id, ClipDraft::default()));
        assert!(session.is_dirty());

        session.save_to_file(&path).unwrap();
        assert!(!session.is_dirty());

        let loaded = EditorSession::load_from_file(&path).unwrap();
        assert_eq!(loaded.project(), session.project());
        assert!(!loaded.is_dirty());
        assert!(!loaded.can_undo());
    }
}
