use crate::edit::Edit;
use crate::types::*;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// Which transition slot of a clip an operation targets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransitionSlot {
    In,
    Out,
}

/// Partial transition update for an occupied slot.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct TransitionPatch {
    pub kind: Option<TransitionKind>,
    pub duration_us: Option<TimeUs>,
}

/// A new effect before the engine assigns its id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EffectDraft {
    pub kind: EffectKind,
    pub params: serde_json::Map<String, serde_json::Value>,
    pub enabled: bool,
}

impl EffectDraft {
    pub fn new(kind: EffectKind) -> Self {
        Self {
            kind,
            params: serde_json::Map::new(),
            enabled: true,
        }
    }
}

/// Partial effect update; `params` replaces the whole map when given.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EffectPatch {
    pub params: Option<serde_json::Map<String, serde_json::Value>>,
    pub enabled: Option<bool>,
}

impl Timeline {
    /// Attach or replace the transition in a clip's slot.
    pub fn set_transition(&self, clip_id: Uuid, slot: TransitionSlot, transition: Transition) -> Edit {
        if self.clip(clip_id).is_none() {
            debug!(%clip_id, "set_transition ignored: clip not found");
            return Edit::noop(self.clone());
        }
        let mut next = self.clone();
        if let Some(clip) = next.clip_mut(clip_id) {
            match slot {
                TransitionSlot::In => clip.transitions.incoming = Some(transition),
                TransitionSlot::Out => clip.transitions.outgoing = Some(transition),
            }
        }
        Edit::applied(next)
    }

    /// Clear a clip's transition slot. Clearing an already-empty slot is a
    /// no-op.
    pub fn remove_transition(&self, clip_id: Uuid, slot: TransitionSlot) -> Edit {
        let Some(clip) = self.clip(clip_id) else {
            debug!(%clip_id, "remove_transition ignored: clip not found");
            return Edit::noop(self.clone());
        };
        let occupied = match slot {
            TransitionSlot::In => clip.transitions.incoming.is_some(),
            TransitionSlot::Out => clip.transitions.outgoing.is_some(),
        };
        if !occupied {
            debug!(%clip_id, "remove_transition ignored: slot already empty");
            return Edit::noop(self.clone());
        }
        let mut next = self.clone();
        if let Some(clip) = next.clip_mut(clip_id) {
            match slot {
                TransitionSlot::In => clip.transitions.incoming = None,
                TransitionSlot::Out => clip.transitions.outgoing = None,
            }
        }
        Edit::applied(next)
    }

    /// Merge kind/duration into an occupied transition slot.
    pub fn update_transition(
        &self,
        clip_id: Uuid,
        slot: TransitionSlot,
        patch: TransitionPatch,
    ) -> Edit {
        let Some(clip) = self.clip(clip_id) else {
            debug!(%clip_id, "update_transition ignored: clip not found");
            return Edit::noop(self.clone());
        };
        let occupied = match slot {
            TransitionSlot::In => clip.transitions.incoming.is_some(),
            TransitionSlot::Out => clip.transitions.outgoing.is_some(),
        };
        if !occupied {
            debug!(%clip_id, "update_transition ignored: slot empty");
            return Edit::noop(self.clone());
        }
        let mut next = self.clone();
        if let Some(clip) = next.clip_mut(clip_id) {
            let target = match slot {
                TransitionSlot::In => &mut clip.transitions.incoming,
                TransitionSlot::Out => &mut clip.transitions.outgoing,
            };
            if let Some(transition) = target {
                if let Some(kind) = patch.kind {
                    transition.kind = kind;
                }
                if let Some(duration_us) = patch.duration_us {
                    transition.duration_us = duration_us.max(TimeUs::ZERO);
                }
            }
        }
        Edit::applied(next)
    }

    /// Append an effect to the clip's stack; list order is application
    /// order, so new effects always land at the end.
    pub fn add_effect(&self, clip_id: Uuid, draft: EffectDraft) -> Edit {
        if self.clip(clip_id).is_none() {
            debug!(%clip_id, "add_effect ignored: clip not found");
            return Edit::noop(self.clone());
        }
        let mut next = self.clone();
        if let Some(clip) = next.clip_mut(clip_id) {
            clip.effects.push(Effect {
                id: Uuid::new_v4(),
                kind: draft.kind,
                params: draft.params,
                enabled: draft.enabled,
            });
        }
        Edit::applied(next)
    }

    /// Remove an effect from a clip's stack by id.
    pub fn remove_effect(&self, clip_id: Uuid, effect_id: Uuid) -> Edit {
        let Some(clip) = self.clip(clip_id) else {
            debug!(%clip_id, "remove_effect ignored: clip not found");
            return Edit::noop(self.clone());
        };
        if !clip.effects.iter().any(|e| e.id == effect_id) {
            debug!(%effect_id, "remove_effect ignored: effect not found");
            return Edit::noop(self.clone());
        }
        let mut next = self.clone();
        if let Some(clip) = next.clip_mut(clip_id) {
            clip.effects.retain(|e| e.id != effect_id);
        }
        Edit::applied(next)
    }

    /// Merge parameters/enabled into an effect, leaving its kind and its
    /// position in the stack alone.
    pub fn update_effect(&self, clip_id: Uuid, effect_id: Uuid, patch: EffectPatch) -> Edit {
        let Some(clip) = self.clip(clip_id) else {
            debug!(%clip_id, "update_effect ignored: clip not found");
            return Edit::noop(self.clone());
        };
        if !clip.effects.iter().any(|e| e.id == effect_id) {
            debug!(%effect_id, "update_effect ignored: effect not found");
            return Edit::noop(self.clone());
        }
        let mut next = self.clone();
        if let Some(clip) = next.clip_mut(clip_id) {
            if let Some(effect) = clip.effects.iter_mut().find(|e| e.id == effect_id) {
                if let Some(params) = patch.params {
                    effect.params = params;
                }
                if let Some(enabled) = patch.enabled {
                    effect.enabled = enabled;
                }
            }
        }
        Edit::applied(next)
    }

    /// Flip an effect's `enabled` flag without touching its parameters.
    pub fn toggle_effect(&self, clip_id: Uuid, effect_id: Uuid) -> Edit {
        let Some(clip) = self.clip(clip_id) else {
            debug!(%clip_id, "toggle_effect ignored: clip not found");
            return Edit::noop(self.clone());
        };
        if !clip.effects.iter().any(|e| e.id == effect_id) {
            debug!(%effect_id, "toggle_effect ignored: effect not found");
            return Edit::noop(self.clone());
        }
        let mut next = self.clone();
        if let Some(clip) = next.clip_mut(clip_id) {
            if let Some(effect) = clip.effects.iter_mut().find(|e| e.id == effect_id) {
                effect.enabled = !effect.enabled;
            }
        }
        Edit::applied(next)
    }
}
