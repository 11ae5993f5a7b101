use std::collections::BTreeSet;

use crate::editor::events::EventKind;
use crate::editor::state::StateKind;

/// Always listened to, whatever the state.
const GLOBAL: &[EventKind] = &[
    EventKind::Layout,
    EventKind::Zoom,
    EventKind::AxisLock,
    EventKind::Playback,
];

/// Project-level actions, only while nothing holds the editor.
const PROJECT: &[EventKind] = &[
    EventKind::AddAnimation,
    EventKind::SelectAnimation,
    EventKind::RemoveAnimation,
    EventKind::OpenSprite,
    EventKind::Export,
];

fn state_events(state: StateKind) -> &'static [EventKind] {
    use EventKind::*;
    match state {
        StateKind::Idle => &[],
        StateKind::Naming => &[NameInput, Key, PointerDown],
        StateKind::Sizing => &[PointerDown, PointerMove, BoxInput, ConfirmBoxSize, Key],
        StateKind::SizingDrag => &[PointerMove, PointerUp, BoxInput],
        StateKind::Frames => &[Key, PointerDown],
        StateKind::MassAdding => &[Key, PointerMove, PointerDown],
        StateKind::Selected => &[Key, PointerDown, PointerMove],
        StateKind::CropDragging => &[PointerMove, PointerUp],
        StateKind::AnchorPicking => &[Key, PointerDown],
    }
}

/// Every event kind `state` reacts to.
pub fn events_for(state: StateKind) -> BTreeSet<EventKind> {
    let mut set: BTreeSet<EventKind> = GLOBAL.iter().copied().collect();
    set.extend(state_events(state));
    if matches!(
        state,
        StateKind::Idle | StateKind::Frames | StateKind::Selected
    ) {
        set.extend(PROJECT);
    }
    set
}

/// Handlers attached and detached by a state change.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BindingChange {
    pub attach: Vec<EventKind>,
    pub detach: Vec<EventKind>,
}

impl BindingChange {
    pub fn is_empty(&self) -> bool {
        self.attach.is_empty() && self.detach.is_empty()
    }
}

/// The event set of the current state.
///
/// Switching states replaces the whole set at once, so leaving a state always
/// drops exactly what entering it added.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bindings {
    state: StateKind,
    active: BTreeSet<EventKind>,
}

impl Bindings {
    pub fn new(state: StateKind) -> Self {
        Self {
            state,
            active: events_for(state),
        }
    }

    pub fn state(&self) -> StateKind {
        self.state
    }

    pub fn listens(&self, kind: EventKind) -> bool {
        self.active.contains(&kind)
    }

    pub fn rebind(&mut self, state: StateKind) -> BindingChange {
        let next = events_for(state);
        let change = BindingChange {
            attach: next.difference(&self.active).copied().collect(),
            detach: self.active.difference(&next).copied().collect(),
        };
        if !change.is_empty() {
            tracing::debug!(from = ?self.state, to = ?state, ?change, "rebinding");
        }
        self.state = state;
        self.active = next;
        change
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/bindings.rs"]
mod tests;
