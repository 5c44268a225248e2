use std::collections::BTreeMap;

use smallvec::SmallVec;

use crate::{
    dom::document::{Document, Viewport},
    foundation::ids::{BindingHandle, ElementId},
    trigger::condition::{TriggerCondition, Zone},
};

/// A region crossing one of its trigger points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IntersectionChange {
    /// Start point crossed scrolling down.
    Enter,
    /// End point crossed scrolling down.
    Leave,
    /// End point crossed scrolling up.
    EnterBack,
    /// Start point crossed scrolling up.
    LeaveBack,
}

/// Crossings between two zones, in scroll order. A jump over the whole region reports
/// both of its crossings.
fn crossings(prev: Option<Zone>, now: Zone) -> &'static [IntersectionChange] {
    use IntersectionChange::*;

    match (prev, now) {
        (None | Some(Zone::Before), Zone::Active) => &[Enter],
        (None | Some(Zone::Before), Zone::After) => &[Enter, Leave],
        (Some(Zone::Active), Zone::After) => &[Leave],
        (Some(Zone::Active), Zone::Before) => &[LeaveBack],
        (Some(Zone::After), Zone::Active) => &[EnterBack],
        (Some(Zone::After), Zone::Before) => &[EnterBack, LeaveBack],
        _ => &[],
    }
}

#[derive(Clone, Debug)]
struct Observation {
    condition: TriggerCondition,
    // `None` until the first evaluation with an attached target.
    zone: Option<Zone>,
}

/// The process-wide intersection observer shared by every controller instance.
///
/// Registration is an insert into an ordered map keyed by binding handle and target, so
/// evaluation order is deterministic and no cross-instance coordination is needed.
#[derive(Debug, Default)]
pub(crate) struct IntersectionObserver {
    observations: BTreeMap<(BindingHandle, ElementId), Observation>,
}

impl IntersectionObserver {
    pub(crate) fn observe(
        &mut self,
        handle: BindingHandle,
        target: ElementId,
        condition: TriggerCondition,
    ) {
        self.observations.insert(
            (handle, target),
            Observation {
                condition,
                zone: None,
            },
        );
    }

    /// Drop every observation made under `handle`.
    pub(crate) fn unobserve(&mut self, handle: BindingHandle) -> bool {
        let before = self.observations.len();
        self.observations.retain(|&(h, _), _| h != handle);
        self.observations.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.observations.len()
    }

    /// Recompute every observation's zone and report the crossings since last time.
    ///
    /// A target that is detached keeps its previous zone and reports nothing. The first
    /// evaluation reports `Enter` only if the start point is already reached.
    pub(crate) fn evaluate(
        &mut self,
        doc: &Document,
        viewport: &Viewport,
    ) -> SmallVec<[(BindingHandle, ElementId, IntersectionChange); 8]> {
        let mut changes = SmallVec::new();
        for (&(handle, target), obs) in self.observations.iter_mut() {
            let Some(rect) = doc.rect(target) else {
                continue;
            };
            let now = obs.condition.zone(rect, viewport);
            for &change in crossings(obs.zone, now) {
                changes.push((handle, target, change));
            }
            obs.zone = Some(now);
        }
        changes
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trigger/observer.rs"]
mod tests;
