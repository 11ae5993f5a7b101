use std::collections::BTreeMap;

use crate::foundation::core::Size;
use crate::foundation::error::{SpriteError, SpriteResult};
use crate::frames::{BaseBox, Frames};
use crate::sprite::SpriteImage;

/// Identity of an animation within one project.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct AnimationId(pub u64);

impl std::fmt::Display for AnimationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Construction stages an animation goes through before it can be edited.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub enum AnimationStage {
    Created,
    Named,
    Sized,
    Editing,
}

impl AnimationStage {
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Created => Some(Self::Named),
            Self::Named => Some(Self::Sized),
            Self::Sized => Some(Self::Editing),
            Self::Editing => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Animation {
    id: AnimationId,
    stage: AnimationStage,
    pub frames: Frames,
}

impl Animation {
    /// A fresh animation with one frame on `base_box`, waiting for a name.
    pub fn new(id: AnimationId, base_box: BaseBox) -> Self {
        Self {
            id,
            stage: AnimationStage::Created,
            frames: Frames::new("", base_box),
        }
    }

    /// Wrap frames that already went through construction, e.g. read from disk.
    pub fn loaded(id: AnimationId, frames: Frames) -> Self {
        Self {
            id,
            stage: AnimationStage::Editing,
            frames,
        }
    }

    pub fn id(&self) -> AnimationId {
        self.id
    }

    pub fn stage(&self) -> AnimationStage {
        self.stage
    }

    pub fn name(&self) -> &str {
        &self.frames.animation_name
    }

    pub fn is_editable(&self) -> bool {
        self.stage == AnimationStage::Editing
    }

    fn advance(&mut self, from: AnimationStage) -> SpriteResult<()> {
        if self.stage != from {
            return Err(SpriteError::transition(format!(
                "animation {} is {:?}, expected {:?}",
                self.id, self.stage, from
            )));
        }
        // `from` is never `Editing` here, every caller passes an earlier stage.
        let Some(to) = from.next() else {
            return Err(SpriteError::transition(format!(
                "animation {} has no stage after {:?}",
                self.id, from
            )));
        };
        tracing::debug!(id = %self.id, ?from, ?to, "animation stage");
        self.stage = to;
        Ok(())
    }

    /// `Created -> Named`. Blank input falls back to `default_name`.
    pub fn commit_name(&mut self, text: &str, default_name: &str) -> SpriteResult<()> {
        self.advance(AnimationStage::Created)?;
        let text = text.trim();
        self.frames.animation_name = if text.is_empty() {
            default_name.to_string()
        } else {
            text.to_string()
        };
        Ok(())
    }

    /// `Named -> Sized`. Snaps the base box to whole pixels.
    pub fn commit_size(&mut self) -> SpriteResult<()> {
        self.advance(AnimationStage::Named)?;
        self.frames.base_box.round();
        Ok(())
    }

    /// `Sized -> Editing`.
    pub fn begin_editing(&mut self) -> SpriteResult<()> {
        self.advance(AnimationStage::Sized)
    }
}

/// Everything edited against one opened sprite.
#[derive(Clone, Debug)]
pub struct Project {
    sprite: SpriteImage,
    animations: BTreeMap<AnimationId, Animation>,
    selected: Option<AnimationId>,
    next_id: u64,
}

impl Project {
    pub fn new(sprite: SpriteImage) -> Self {
        Self {
            sprite,
            animations: BTreeMap::new(),
            selected: None,
            next_id: 1,
        }
    }

    /// Project with already-built animations; the first one is selected.
    pub fn from_frames(sprite: SpriteImage, frames: impl IntoIterator<Item = Frames>) -> Self {
        let mut p = Self::new(sprite);
        for f in frames {
            let id = p.allocate_id();
            p.animations.insert(id, Animation::loaded(id, f));
        }
        p.selected = p.animations.keys().next().copied();
        p
    }

    fn allocate_id(&mut self) -> AnimationId {
        let id = AnimationId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn sprite(&self) -> &SpriteImage {
        &self.sprite
    }

    pub fn sprite_size(&self) -> Size {
        self.sprite.size()
    }

    /// Register a new animation in the `Created` stage.
    pub fn add_animation(&mut self, base_box: BaseBox) -> AnimationId {
        let id = self.allocate_id();
        self.animations.insert(id, Animation::new(id, base_box));
        id
    }

    pub fn get(&self, id: AnimationId) -> Option<&Animation> {
        self.animations.get(&id)
    }

    pub fn get_mut(&mut self, id: AnimationId) -> Option<&mut Animation> {
        self.animations.get_mut(&id)
    }

    pub fn animations(&self) -> impl Iterator<Item = &Animation> {
        self.animations.values()
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    pub fn selected(&self) -> Option<AnimationId> {
        self.selected
    }

    pub fn selected_animation(&self) -> Option<&Animation> {
        self.selected.and_then(|id| self.animations.get(&id))
    }

    /// Make `id` the current animation; only animations in the editing stage qualify.
    pub fn select(&mut self, id: AnimationId) -> SpriteResult<()> {
        match self.animations.get(&id) {
            Some(a) if a.is_editable() => {
                self.selected = Some(id);
                Ok(())
            }
            Some(a) => Err(SpriteError::transition(format!(
                "animation {id} cannot be selected while {:?}",
                a.stage()
            ))),
            None => Err(SpriteError::validation(format!("unknown animation {id}"))),
        }
    }

    /// Remove an animation. If it was selected, another editable one takes over.
    pub fn remove(&mut self, id: AnimationId) -> Option<Animation> {
        let removed = self.animations.remove(&id)?;
        if self.selected == Some(id) {
            self.selected = self
                .animations
                .values()
                .find(|a| a.is_editable())
                .map(Animation::id);
        }
        Some(removed)
    }

    /// Animations that take part in export: fully built and non-empty.
    pub fn exportable(&self) -> impl Iterator<Item = &Animation> {
        self.animations
            .values()
            .filter(|a| a.is_editable() && !a.frames.is_empty())
    }
}

#[cfg(test)]
#[path = "../tests/unit/project/project.rs"]
mod tests;
