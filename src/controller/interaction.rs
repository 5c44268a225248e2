use smallvec::SmallVec;

use crate::{
    animation::ease::Ease,
    animation::props::{Prop, PropMap},
    animation::spec::AnimationSpec,
    controller::tweens::TweenSet,
    dom::document::Document,
    foundation::core::{Millis, Point, Vec2},
    foundation::error::{ScrollweaveError, ScrollweaveResult},
    foundation::ids::{BindingHandle, ElementId},
    foundation::math::resist,
};

/// Pointer input in document coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PointerEvent {
    /// Pointer entered an element.
    Enter {
        /// Element entered.
        target: ElementId,
    },
    /// Pointer left an element.
    Leave {
        /// Element left.
        target: ElementId,
    },
    /// Pointer moved.
    Move {
        /// New pointer position.
        at: Point,
    },
    /// Button pressed on a draggable element.
    DragStart {
        /// Element grabbed.
        target: ElementId,
        /// Pointer position.
        at: Point,
    },
    /// Pointer moved while dragging.
    DragMove {
        /// New pointer position.
        at: Point,
    },
    /// Button released.
    DragEnd,
}

/// Pointer-tilt reaction.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TiltSpec {
    /// Rotation at the element edge, in degrees.
    pub max_deg: f64,
    /// Follow duration per move.
    pub duration: Millis,
    /// Follow easing.
    pub ease: Ease,
    /// Tween played when the pointer leaves.
    pub settle: AnimationSpec,
}

/// Horizontal drag with edge resistance.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DragSpec {
    /// Leftmost resting `x`.
    pub min_x: f64,
    /// Rightmost resting `x`.
    pub max_x: f64,
    /// Share of the overshoot swallowed past a bound, `[0, 1]`.
    pub edge_resistance: f64,
    /// Glide on release in the drag direction.
    pub inertia: bool,
    /// Elements tilted by drag velocity.
    #[serde(default)]
    pub followers: Vec<ElementId>,
    /// Follower `rotationY` per px/s of drag velocity.
    pub follower_tilt: f64,
    /// Duration of each follower tilt tween.
    pub follower_duration: Millis,
    /// Tween applied to followers on release.
    pub release: AnimationSpec,
    /// Loop paused while dragging.
    #[serde(default)]
    pub pauses: Option<BindingHandle>,
}

/// Element chasing the pointer (custom cursor).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FollowSpec {
    /// Catch-up duration.
    pub duration: Millis,
    /// Catch-up easing.
    pub ease: Ease,
    /// Offset from the pointer to the element origin.
    #[serde(default)]
    pub offset: Vec2,
}

/// What an interaction binding reacts to and how.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum InteractionKind {
    /// Play `enter` on pointer enter and `leave` on pointer leave.
    Hover {
        /// Tween played on enter.
        enter: AnimationSpec,
        /// Tween played on leave.
        leave: AnimationSpec,
    },
    /// Play `enter`/`leave` on the element paired with the hovered target.
    HoverCompanion {
        /// `(hovered, animated)` pairs.
        pairs: Vec<(ElementId, ElementId)>,
        /// Tween played on enter.
        enter: AnimationSpec,
        /// Tween played on leave.
        leave: AnimationSpec,
    },
    /// Rotate toward the pointer while it moves over the element.
    Tilt(TiltSpec),
    /// Drag along `x`.
    Drag(DragSpec),
    /// Track the pointer anywhere on the page.
    Follow(FollowSpec),
    /// Pause a loop while the pointer is over the element.
    PauseLoop {
        /// Loop to pause.
        target: BindingHandle,
    },
}

impl InteractionKind {
    pub(crate) fn validate(&self) -> ScrollweaveResult<()> {
        match self {
            Self::Hover { enter, leave } | Self::HoverCompanion { enter, leave, .. } => {
                enter.validate()?;
                leave.validate()
            }
            Self::Tilt(t) => {
                if !t.max_deg.is_finite() {
                    return Err(ScrollweaveError::validation("tilt max_deg must be finite"));
                }
                t.settle.validate()
            }
            Self::Drag(d) => {
                if d.min_x > d.max_x {
                    return Err(ScrollweaveError::validation(format!(
                        "drag bounds are inverted: min_x {} > max_x {}",
                        d.min_x, d.max_x
                    )));
                }
                if !(0.0..=1.0).contains(&d.edge_resistance) {
                    return Err(ScrollweaveError::validation(
                        "edge_resistance must be within [0, 1]",
                    ));
                }
                d.release.validate()
            }
            Self::Follow(_) | Self::PauseLoop { .. } => Ok(()),
        }
    }

    /// Pointer listeners this kind holds per target.
    pub(crate) fn listeners_per_target(&self) -> usize {
        match self {
            Self::Hover { .. }
            | Self::HoverCompanion { .. }
            | Self::Tilt(_)
            | Self::PauseLoop { .. } => 2,
            Self::Drag(_) => 3,
            Self::Follow(_) => 1,
        }
    }
}

/// Loop playback change requested by an interaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Pause(BindingHandle),
    Resume(BindingHandle),
}

#[derive(Clone, Copy, Debug)]
struct DragSession {
    target: ElementId,
    grab_x: f64,
    origin_x: f64,
    x: f64,
    at: Millis,
    // px per second
    velocity: f64,
}

const INERTIA_GLIDE: Millis = Millis(300);
const INERTIA_SETTLE: Millis = Millis(800);

/// Shared mutable context handed to interactions.
pub(crate) struct Stage<'a> {
    pub(crate) doc: &'a mut Document,
    pub(crate) tweens: &'a mut TweenSet,
    pub(crate) now: Millis,
}

/// A bound interaction plus its in-flight drag state.
#[derive(Clone, Debug)]
pub(crate) struct InteractionRuntime {
    pub(crate) kind: InteractionKind,
    pub(crate) targets: Vec<ElementId>,
    drag: Option<DragSession>,
}

impl InteractionRuntime {
    pub(crate) fn new(kind: InteractionKind, targets: Vec<ElementId>) -> Self {
        Self {
            kind,
            targets,
            drag: None,
        }
    }

    pub(crate) fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// React to `event`; returns loop changes for the owning controller to apply.
    pub(crate) fn handle(
        &mut self,
        handle: BindingHandle,
        event: PointerEvent,
        stage: &mut Stage<'_>,
    ) -> SmallVec<[LoopControl; 2]> {
        let mut controls = SmallVec::new();
        match (&self.kind, event) {
            (InteractionKind::Hover { enter, .. }, PointerEvent::Enter { target })
                if self.targets.contains(&target) =>
            {
                stage.tweens.spawn(handle, &[target], enter, stage.now);
            }
            (InteractionKind::Hover { leave, .. }, PointerEvent::Leave { target })
                if self.targets.contains(&target) =>
            {
                stage.tweens.spawn(handle, &[target], leave, stage.now);
            }
            (
                InteractionKind::HoverCompanion { pairs, enter, .. },
                PointerEvent::Enter { target },
            ) if self.targets.contains(&target) => {
                let companions = companions_of(pairs, target);
                stage.tweens.spawn(handle, &companions, enter, stage.now);
            }
            (
                InteractionKind::HoverCompanion { pairs, leave, .. },
                PointerEvent::Leave { target },
            ) if self.targets.contains(&target) => {
                let companions = companions_of(pairs, target);
                stage.tweens.spawn(handle, &companions, leave, stage.now);
            }
            (InteractionKind::Tilt(tilt), PointerEvent::Move { at }) => {
                for &target in &self.targets {
                    let Some(rect) = stage.doc.rect(target) else {
                        continue;
                    };
                    if !rect.contains(at) || rect.width() <= 0.0 || rect.height() <= 0.0 {
                        continue;
                    }
                    let center = rect.center();
                    let dx = (at.x - center.x) / (rect.width() / 2.0);
                    let dy = (at.y - center.y) / (rect.height() / 2.0);
                    let spec = AnimationSpec::to("tilt", tilt.duration)
                        .set(Prop::RotationY, dx * tilt.max_deg)
                        .set(Prop::RotationX, -dy * tilt.max_deg)
                        .ease(tilt.ease);
                    stage.tweens.spawn(handle, &[target], &spec, stage.now);
                }
            }
            (InteractionKind::Tilt(tilt), PointerEvent::Leave { target })
                if self.targets.contains(&target) =>
            {
                stage.tweens.spawn(handle, &[target], &tilt.settle, stage.now);
            }
            (InteractionKind::Follow(follow), PointerEvent::Move { at }) => {
                let spec = AnimationSpec::to("follow", follow.duration)
                    .set(Prop::X, at.x + follow.offset.x)
                    .set(Prop::Y, at.y + follow.offset.y)
                    .ease(follow.ease);
                stage.tweens.spawn(handle, &self.targets, &spec, stage.now);
            }
            (InteractionKind::PauseLoop { target: looped }, PointerEvent::Enter { target })
                if self.targets.contains(&target) =>
            {
                controls.push(LoopControl::Pause(*looped));
            }
            (InteractionKind::PauseLoop { target: looped }, PointerEvent::Leave { target })
                if self.targets.contains(&target) =>
            {
                controls.push(LoopControl::Resume(*looped));
            }
            (InteractionKind::Drag(drag), PointerEvent::DragStart { target, at })
                if self.targets.contains(&target) =>
            {
                let Some(el) = stage.doc.attached(target) else {
                    return controls;
                };
                let origin_x = el.visual.get(Prop::X);
                stage.tweens.cancel_props(target, &[Prop::X]);
                self.drag = Some(DragSession {
                    target,
                    grab_x: at.x,
                    origin_x,
                    x: origin_x,
                    at: stage.now,
                    velocity: 0.0,
                });
                controls.extend(drag.pauses.map(LoopControl::Pause));
            }
            (InteractionKind::Drag(drag), PointerEvent::DragMove { at }) => {
                let Some(session) = self.drag.as_mut() else {
                    return controls;
                };
                let raw = session.origin_x + (at.x - session.grab_x);
                let x = resist(raw, drag.min_x, drag.max_x, drag.edge_resistance);
                let elapsed = stage.now.saturating_sub(session.at);
                if elapsed > Millis::ZERO {
                    session.velocity = (x - session.x) / elapsed.as_secs_f64();
                }
                session.x = x;
                session.at = stage.now;
                stage
                    .doc
                    .commit(session.target, &PropMap::from([(Prop::X, x)]));
                let tilt = AnimationSpec::to("drag-tilt", drag.follower_duration)
                    .set(Prop::RotationY, session.velocity * drag.follower_tilt);
                stage
                    .tweens
                    .spawn(handle, &drag.followers, &tilt, stage.now);
            }
            (InteractionKind::Drag(drag), PointerEvent::DragEnd) => {
                let Some(session) = self.drag.take() else {
                    return controls;
                };
                let rest = if drag.inertia {
                    session.x + session.velocity * INERTIA_GLIDE.as_secs_f64()
                } else {
                    session.x
                };
                let rest = rest.clamp(drag.min_x, drag.max_x);
                if rest != session.x {
                    let settle = AnimationSpec::to("drag-settle", INERTIA_SETTLE)
                        .set(Prop::X, rest)
                        .ease(Ease::OutCubic);
                    stage
                        .tweens
                        .spawn(handle, &[session.target], &settle, stage.now);
                }
                stage
                    .tweens
                    .spawn(handle, &drag.followers, &drag.release, stage.now);
                controls.extend(drag.pauses.map(LoopControl::Resume));
            }
            _ => {}
        }
        controls
    }
}

fn companions_of(
    pairs: &[(ElementId, ElementId)],
    hovered: ElementId,
) -> SmallVec<[ElementId; 2]> {
    pairs
        .iter()
        .filter(|&&(h, _)| h == hovered)
        .map(|&(_, animated)| animated)
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/controller/interaction.rs"]
mod tests;
