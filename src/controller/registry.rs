use std::collections::BTreeMap;

use crate::{
    controller::batch::BatchBinding,
    controller::interaction::InteractionRuntime,
    controller::playback::TimelinePlayer,
    controller::state::EntranceState,
    foundation::core::Millis,
    foundation::ids::{BindingHandle, ElementId},
    trigger::condition::ReplayPolicy,
};

/// Host callback run by timers and entrance completion.
pub type Callback = Box<dyn FnMut()>;

/// Kind of a registration, as reported in the event log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BindingKind {
    /// Scroll-triggered entrance timeline.
    Entrance,
    /// Pointer-driven animation.
    Interaction,
    /// Endless animation.
    Loop,
    /// Repeating timer.
    Timer,
    /// Per-element scroll tweens.
    Batch,
}

pub(crate) struct EntranceBinding {
    pub(crate) policy: ReplayPolicy,
    pub(crate) state: EntranceState,
    pub(crate) player: TimelinePlayer,
    pub(crate) on_complete: Vec<Callback>,
}

pub(crate) struct IntervalTimer {
    pub(crate) period: Millis,
    // `None` once the next due time is past the end of representable time.
    pub(crate) next_due: Option<Millis>,
    pub(crate) callback: Callback,
}

pub(crate) enum Registration {
    Entrance(EntranceBinding),
    Interaction(InteractionRuntime),
    Loop(TimelinePlayer),
    Timer(IntervalTimer),
    Batch(BatchBinding),
}

impl Registration {
    pub(crate) fn kind(&self) -> BindingKind {
        match self {
            Self::Entrance(_) => BindingKind::Entrance,
            Self::Interaction(_) => BindingKind::Interaction,
            Self::Loop(_) => BindingKind::Loop,
            Self::Timer(_) => BindingKind::Timer,
            Self::Batch(_) => BindingKind::Batch,
        }
    }
}

/// Scoped effect registry for one mounted section.
///
/// Every binding the section makes is recorded here, so unmounting walks one map and
/// releases all of them.
pub(crate) struct ControllerInstance {
    pub(crate) name: String,
    pub(crate) root: ElementId,
    pub(crate) registrations: BTreeMap<BindingHandle, Registration>,
}

impl ControllerInstance {
    pub(crate) fn new(name: String, root: ElementId) -> Self {
        Self {
            name,
            root,
            registrations: BTreeMap::new(),
        }
    }
}

/// Live resources held by bindings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct ResourceCounts {
    /// Intersection observer registrations.
    pub observations: usize,
    /// Pointer listeners across interaction targets.
    pub listeners: usize,
    /// Interval timers.
    pub timers: usize,
    /// Playing timelines and loops plus in-flight interaction tweens.
    pub running_tweens: usize,
    /// Pending completion callbacks.
    pub callbacks: usize,
}

impl ResourceCounts {
    /// Return `true` when nothing is held.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub(crate) fn add(&mut self, other: Self) {
        self.observations += other.observations;
        self.listeners += other.listeners;
        self.timers += other.timers;
        self.running_tweens += other.running_tweens;
        self.callbacks += other.callbacks;
    }
}
