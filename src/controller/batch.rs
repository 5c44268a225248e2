use crate::{
    animation::spec::AnimationSpec,
    foundation::error::{ScrollweaveError, ScrollweaveResult},
    foundation::ids::ElementId,
    trigger::condition::{Edge, ReplayPolicy, TriggerCondition, TriggerPoint, TriggerStart},
    trigger::observer::IntersectionChange,
};

fn default_start() -> TriggerPoint {
    TriggerPoint::new(Edge::Top, Edge::Bottom)
}

fn default_end() -> TriggerPoint {
    TriggerPoint::new(Edge::Bottom, Edge::Top)
}

/// One scroll trigger per element, with the elements that cross in the same tick animated
/// together.
///
/// Each crossing direction has its own tween; the group's stagger follows the order the
/// elements were bound in.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollBatch {
    /// Entry point of every element.
    #[serde(default = "default_start")]
    pub start: TriggerPoint,
    /// Exit point of every element.
    #[serde(default = "default_end")]
    pub end: TriggerPoint,
    /// Played when elements scroll in from below.
    #[serde(default)]
    pub on_enter: Option<AnimationSpec>,
    /// Played when elements scroll out through the top.
    #[serde(default)]
    pub on_leave: Option<AnimationSpec>,
    /// Played when elements scroll back in from the top.
    #[serde(default)]
    pub on_enter_back: Option<AnimationSpec>,
    /// Played when elements scroll back out through the bottom.
    #[serde(default)]
    pub on_leave_back: Option<AnimationSpec>,
}

impl Default for ScrollBatch {
    fn default() -> Self {
        Self {
            start: default_start(),
            end: default_end(),
            on_enter: None,
            on_leave: None,
            on_enter_back: None,
            on_leave_back: None,
        }
    }
}

impl ScrollBatch {
    /// Batch with `"top bottom"` / `"bottom top"` points and no tweens.
    pub fn new() -> Self {
        Self::default()
    }

    /// Play `spec` on every `change` crossing.
    pub fn on(mut self, change: IntersectionChange, spec: AnimationSpec) -> Self {
        let slot = match change {
            IntersectionChange::Enter => &mut self.on_enter,
            IntersectionChange::Leave => &mut self.on_leave,
            IntersectionChange::EnterBack => &mut self.on_enter_back,
            IntersectionChange::LeaveBack => &mut self.on_leave_back,
        };
        *slot = Some(spec);
        self
    }

    /// Tween for `change`, if any.
    pub fn spec(&self, change: IntersectionChange) -> Option<&AnimationSpec> {
        match change {
            IntersectionChange::Enter => self.on_enter.as_ref(),
            IntersectionChange::Leave => self.on_leave.as_ref(),
            IntersectionChange::EnterBack => self.on_enter_back.as_ref(),
            IntersectionChange::LeaveBack => self.on_leave_back.as_ref(),
        }
    }

    pub(crate) fn validate(&self) -> ScrollweaveResult<()> {
        let specs = [
            &self.on_enter,
            &self.on_leave,
            &self.on_enter_back,
            &self.on_leave_back,
        ];
        for spec in specs.into_iter().flatten() {
            spec.validate()?;
            if spec.active_len().is_none() {
                return Err(ScrollweaveError::animation(format!(
                    "batch tween '{}' repeats forever",
                    spec.name
                )));
            }
        }
        Ok(())
    }

    pub(crate) fn condition(&self) -> TriggerCondition {
        TriggerCondition {
            start: TriggerStart::Point(self.start),
            end: self.end,
            policy: ReplayPolicy::PlayOnce,
        }
    }
}

/// A bound batch and the elements it observes.
#[derive(Clone, Debug)]
pub(crate) struct BatchBinding {
    pub(crate) batch: ScrollBatch,
    pub(crate) targets: Vec<ElementId>,
}

#[cfg(test)]
#[path = "../../tests/unit/controller/batch.rs"]
mod tests;
