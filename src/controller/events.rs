use crate::{
    controller::registry::BindingKind,
    trigger::observer::IntersectionChange,
    foundation::core::Millis,
    foundation::ids::{BindingHandle, ElementId, InstanceId},
};

/// Observable controller activity, in the order it happened.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum ControllerEvent {
    /// A section mounted.
    Mounted {
        /// New instance.
        instance: InstanceId,
        /// Section name.
        name: String,
        /// Section root element.
        root: ElementId,
    },
    /// A section unmounted and released everything it held.
    Unmounted {
        /// Released instance.
        instance: InstanceId,
        /// Number of bindings released.
        released: usize,
    },
    /// A binding was registered.
    Bound {
        /// New binding.
        handle: BindingHandle,
        /// What was bound.
        kind: BindingKind,
    },
    /// A bind call was a no-op.
    Skipped {
        /// Instance the bind was for.
        instance: InstanceId,
        /// Why nothing was bound.
        reason: String,
    },
    /// An entrance started playing forward.
    EntranceStarted {
        /// Entrance binding.
        handle: BindingHandle,
    },
    /// An entrance reached its end.
    EntranceCompleted {
        /// Entrance binding.
        handle: BindingHandle,
    },
    /// An entrance started playing backward.
    ExitStarted {
        /// Entrance binding.
        handle: BindingHandle,
    },
    /// An entrance finished playing backward.
    ExitCompleted {
        /// Entrance binding.
        handle: BindingHandle,
    },
    /// An entrance jumped back to its start and stopped.
    EntranceReset {
        /// Entrance binding.
        handle: BindingHandle,
    },
    /// A scroll batch animated the elements that crossed together.
    BatchPlayed {
        /// Batch binding.
        handle: BindingHandle,
        /// Crossing direction.
        change: IntersectionChange,
        /// Number of elements in the group.
        targets: usize,
    },
    /// A timer fired.
    TimerFired {
        /// Timer binding.
        handle: BindingHandle,
    },
    /// A loop paused.
    LoopPaused {
        /// Loop binding.
        handle: BindingHandle,
    },
    /// A loop resumed.
    LoopResumed {
        /// Loop binding.
        handle: BindingHandle,
    },
    /// A binding was released.
    Released {
        /// Released binding.
        handle: BindingHandle,
    },
    /// The viewport scrolled.
    Scrolled {
        /// New scroll offset.
        y: f64,
        /// `true` when driven by a smooth-scroll tween.
        smooth: bool,
    },
}

/// An event plus the stage time it happened at.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LoggedEvent {
    /// Stage time.
    pub at: Millis,
    /// What happened.
    #[serde(flatten)]
    pub event: ControllerEvent,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct EventLog {
    events: Vec<LoggedEvent>,
}

impl EventLog {
    pub(crate) fn push(&mut self, at: Millis, event: ControllerEvent) {
        self.events.push(LoggedEvent { at, event });
    }

    pub(crate) fn as_slice(&self) -> &[LoggedEvent] {
        &self.events
    }

    pub(crate) fn drain(&mut self) -> Vec<LoggedEvent> {
        std::mem::take(&mut self.events)
    }
}
