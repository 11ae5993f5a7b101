use crate::foundation::core::{Point, Vec2};
use crate::frames::{InProgressBatch, Sides};
use crate::project::AnimationId;

/// What the editor is doing right now. Exactly one state is active at a time.
#[derive(Clone, Debug, PartialEq)]
pub enum EditorState {
    /// No animation is being edited.
    Idle,
    /// A new animation waits for its name.
    NamingAnimation { id: AnimationId, text: String },
    /// The new animation's base box is being placed.
    SizingBaseBox { id: AnimationId, drag: BoxDrag },
    /// Steady state: frames of `id` are added and edited.
    FrameEditing { id: AnimationId, mode: FrameMode },
}

/// Pointer drag on the base box during sizing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BoxDrag {
    None,
    Moving { last: Point },
    Resizing { sides: Sides, last: Point },
}

#[derive(Clone, Debug, PartialEq)]
pub enum FrameMode {
    Idle,
    MassAdding(InProgressBatch),
    Selected { index: usize, sub: SelectedMode },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SelectedMode {
    Idle,
    /// Dragging crop edges. `residual` holds movement smaller than a pixel.
    CropDragging {
        sides: Sides,
        last: Point,
        residual: Vec2,
    },
    /// The next click sets the middle point.
    AnchorPicking,
}

/// Flat tag of an [`EditorState`], used to pick event bindings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StateKind {
    Idle,
    Naming,
    Sizing,
    SizingDrag,
    Frames,
    MassAdding,
    Selected,
    CropDragging,
    AnchorPicking,
}

impl EditorState {
    pub fn kind(&self) -> StateKind {
        match self {
            Self::Idle => StateKind::Idle,
            Self::NamingAnimation { .. } => StateKind::Naming,
            Self::SizingBaseBox {
                drag: BoxDrag::None,
                ..
            } => StateKind::Sizing,
            Self::SizingBaseBox { .. } => StateKind::SizingDrag,
            Self::FrameEditing { mode, .. } => match mode {
                FrameMode::Idle => StateKind::Frames,
                FrameMode::MassAdding(_) => StateKind::MassAdding,
                FrameMode::Selected { sub, .. } => match sub {
                    SelectedMode::Idle => StateKind::Selected,
                    SelectedMode::CropDragging { .. } => StateKind::CropDragging,
                    SelectedMode::AnchorPicking => StateKind::AnchorPicking,
                },
            },
        }
    }

    /// Animation the state operates on, if any.
    pub fn animation(&self) -> Option<AnimationId> {
        match self {
            Self::Idle => None,
            Self::NamingAnimation { id, .. }
            | Self::SizingBaseBox { id, .. }
            | Self::FrameEditing { id, .. } => Some(*id),
        }
    }

    /// Index of the selected frame while frame editing.
    pub fn selected_frame(&self) -> Option<usize> {
        match self {
            Self::FrameEditing {
                mode: FrameMode::Selected { index, .. },
                ..
            } => Some(*index),
            _ => None,
        }
    }
}
