//! Scrollweave sequences scroll- and pointer-driven animations for sectioned landing pages.
//!
//! The model is headless and deterministic: an arena [`Document`] stands in for the page,
//! a [`Viewport`] scrolls over it, and the host advances time explicitly. The public API is
//! controller-oriented:
//!
//! - Create one [`ViewportAnimationController`] per page
//! - [`mount`](ViewportAnimationController::mount) an instance per section and bind entrance
//!   timelines, pointer interactions, loops and timers through it
//! - Drive it with [`scroll_to`](ViewportAnimationController::scroll_to),
//!   [`pointer`](ViewportAnimationController::pointer) and
//!   [`tick`](ViewportAnimationController::tick)
//! - [`unmount`](ViewportAnimationController::unmount) to release everything synchronously
//!
//! [`LandingPage`] wires the smart-home landing page on top of that, and [`simulate`] replays
//! a scripted session against it.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

use std::sync::OnceLock;

pub(crate) mod animation;
pub(crate) mod config;
pub(crate) mod controller;
pub(crate) mod dom;
mod foundation;
pub(crate) mod page;
pub(crate) mod trigger;

pub use crate::foundation::core::{Millis, Point, Rect, Size, TimeSpan, Vec2};
pub use crate::foundation::error::{ScrollweaveError, ScrollweaveResult};
pub use crate::foundation::ids::{BindingHandle, ElementId, InstanceId};

pub use crate::animation::ease::Ease;
pub use crate::animation::props::{Lerp, Prop, PropMap, VisualState};
pub use crate::animation::spec::{AnimationSpec, Endpoints, Repeat, TweenMode};
pub use crate::animation::stagger::{Stagger, StaggerFrom, stagger_order};
pub use crate::animation::timeline::{Position, Timeline, TimelineEntry};

pub use crate::dom::document::{Document, Element, Viewport};
pub use crate::dom::layout::{Align, BoxLayout, Edges, LayoutMode, resolve_child_rects};

pub use crate::trigger::condition::{
    Edge, ReplayPolicy, ToggleAction, ToggleActions, TriggerCondition, TriggerPoint,
    TriggerStart,
};
pub use crate::trigger::observer::IntersectionChange;

pub use crate::controller::batch::ScrollBatch;
pub use crate::controller::events::{ControllerEvent, LoggedEvent};
pub use crate::controller::interaction::{
    DragSpec, FollowSpec, InteractionKind, PointerEvent, TiltSpec,
};
pub use crate::controller::registry::{BindingKind, Callback, ResourceCounts};
pub use crate::controller::state::EntranceState;
pub use crate::controller::viewport::ViewportAnimationController;

pub use crate::config::{ScriptStep, SimulationScript, StageConfig};

pub use crate::page::contact::{
    ContactForm, ContactPayload, Field, FormError, LoggingSubmitHandler, RecordingSubmitHandler,
    SubmitHandler,
};
pub use crate::page::content::{
    ContactInfo, FaqEntry, HeroContent, NavLink, NewsItem, PageContent, Product, Slide,
    Testimonial,
};
pub use crate::page::faq::{Accordion, Cycle};
pub use crate::page::landing::{LandingPage, SimulationReport, simulate};
pub use crate::page::map::{
    EmbedMapProvider, MapLoadError, MapProvider, MapView, MapWidget, OfflineMapProvider,
};
pub use crate::page::nav::{AnchorNavigator, NavOutcome};
pub use crate::page::sections::MountedSection;

/// Register the built-in scroll-trigger and draggable plugins.
///
/// Registration happens once per process; later calls return the same list. Every
/// controller calls this on construction.
pub fn init() -> &'static [&'static str] {
    static PLUGINS: OnceLock<[&'static str; 2]> = OnceLock::new();
    PLUGINS.get_or_init(|| {
        tracing::debug!("registering animation plugins");
        ["scroll-trigger", "draggable"]
    })
}
