use std::time::Duration;

use crate::editor::bindings::BindingChange;
use crate::export::SheetLayout;
use crate::foundation::core::{Point, Vec2};
use crate::frames::{Dimension, Sides};
use crate::project::AnimationId;
use crate::render::projection::DrawList;
use crate::sprite::SpriteImage;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// One-pixel step in sprite space.
    pub fn delta(self) -> Vec2 {
        match self {
            Self::Up => Vec2::new(0.0, -1.0),
            Self::Down => Vec2::new(0.0, 1.0),
            Self::Left => Vec2::new(-1.0, 0.0),
            Self::Right => Vec2::new(1.0, 0.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Digit(u8),
    Enter,
    Escape,
    Delete,
    Arrow(Direction),
}

/// Input delivered by the host. Pointer positions are in client coordinates.
#[derive(Clone, Debug)]
pub enum Event {
    PointerDown(Point),
    PointerMove(Point),
    PointerUp(Point),
    Key(Key),
    /// Canvas placement on screen and the scroll offset of its container.
    Layout { canvas_origin: Point, scroll: Vec2 },
    AddAnimation,
    SelectAnimation(AnimationId),
    RemoveAnimation(AnimationId),
    NameInput(String),
    BoxInput { dim: Dimension, value: f64 },
    ConfirmBoxSize,
    SetZoom(f64),
    SetAxisLock(bool),
    SetPlayUntilSelected(bool),
    ShowLast(usize),
    ShowAll,
    IntervalUp,
    IntervalDown,
    OpenSprite(SpriteImage),
    Export,
}

/// Event categories a state can listen to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    PointerDown,
    PointerMove,
    PointerUp,
    Key,
    Layout,
    AddAnimation,
    SelectAnimation,
    RemoveAnimation,
    NameInput,
    BoxInput,
    ConfirmBoxSize,
    Zoom,
    AxisLock,
    Playback,
    OpenSprite,
    Export,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::PointerDown(_) => EventKind::PointerDown,
            Self::PointerMove(_) => EventKind::PointerMove,
            Self::PointerUp(_) => EventKind::PointerUp,
            Self::Key(_) => EventKind::Key,
            Self::Layout { .. } => EventKind::Layout,
            Self::AddAnimation => EventKind::AddAnimation,
            Self::SelectAnimation(_) => EventKind::SelectAnimation,
            Self::RemoveAnimation(_) => EventKind::RemoveAnimation,
            Self::NameInput(_) => EventKind::NameInput,
            Self::BoxInput { .. } => EventKind::BoxInput,
            Self::ConfirmBoxSize => EventKind::ConfirmBoxSize,
            Self::SetZoom(_) => EventKind::Zoom,
            Self::SetAxisLock(_) => EventKind::AxisLock,
            Self::SetPlayUntilSelected(_)
            | Self::ShowLast(_)
            | Self::ShowAll
            | Self::IntervalUp
            | Self::IntervalDown => EventKind::Playback,
            Self::OpenSprite(_) => EventKind::OpenSprite,
            Self::Export => EventKind::Export,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cursor {
    Default,
    Move,
    Resize(Sides),
    Crosshair,
}

/// Output for the host to apply, in order.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Replace the main canvas contents.
    Redraw(DrawList),
    /// Replace the preview surface contents.
    Preview(DrawList),
    SetCanvasScale { scale: f64, percent: f64 },
    SetCursor(Cursor),
    Listen(BindingChange),
    /// Add a list entry with a focused name input.
    AnimationListed(AnimationId),
    AnimationNamed { id: AnimationId, name: String },
    AnimationUnlisted(AnimationId),
    ClearAnimationList,
    ShowSizingDialog { width: f64, height: f64 },
    WriteBoxInputs { width: f64, height: f64 },
    HideSizingDialog,
    ShowFrameEditor,
    HideFrameEditor,
    BatchCount(usize),
    PlaybackRestarted,
    PlaybackStopped,
    IntervalChanged(Duration),
    ShowExport {
        layout: SheetLayout,
        image: image::RgbaImage,
    },
    Notify(String),
}
