use crate::{
    animation::ease::Ease,
    animation::props::Prop,
    animation::spec::{AnimationSpec, Endpoints},
    dom::document::Document,
    foundation::core::Millis,
    foundation::ids::{BindingHandle, ElementId},
};

#[derive(Clone, Debug)]
struct Tween {
    owner: BindingHandle,
    target: ElementId,
    start: Millis,
    spec: AnimationSpec,
    ends: Option<Endpoints>,
}

impl Tween {
    fn drop_props(&mut self, props: &[Prop]) {
        for p in props {
            self.spec.props.remove(p);
            self.spec.from_props.remove(p);
            if let Some(ends) = self.ends.as_mut() {
                ends.from.remove(p);
                ends.to.remove(p);
            }
        }
    }
}

/// Free-running tweens spawned by interactions and smooth scrolling.
///
/// A new tween on a target takes over the properties it animates from any older tween on
/// the same target, so hover-in and hover-out never fight.
#[derive(Clone, Debug, Default)]
pub(crate) struct TweenSet {
    tweens: Vec<Tween>,
}

impl TweenSet {
    /// Start `spec` on every target at `now`, honoring its delay and stagger.
    pub(crate) fn spawn(
        &mut self,
        owner: BindingHandle,
        targets: &[ElementId],
        spec: &AnimationSpec,
        now: Millis,
    ) {
        let props: Vec<Prop> = spec.props.keys().copied().collect();
        for (&target, offset) in targets.iter().zip(spec.start_offsets(targets.len())) {
            self.cancel_props(target, &props);
            self.tweens.push(Tween {
                owner,
                target,
                start: now.saturating_add(offset),
                spec: spec.clone(),
                ends: None,
            });
        }
    }

    /// Stop animating `props` on `target`, keeping the values already written.
    pub(crate) fn cancel_props(&mut self, target: ElementId, props: &[Prop]) {
        for t in self.tweens.iter_mut().filter(|t| t.target == target) {
            t.drop_props(props);
        }
        self.tweens.retain(|t| !t.spec.props.is_empty());
    }

    /// Drop every tween spawned by `owner`; returns how many were dropped.
    pub(crate) fn cancel_owner(&mut self, owner: BindingHandle) -> usize {
        let before = self.tweens.len();
        self.tweens.retain(|t| t.owner != owner);
        before - self.tweens.len()
    }

    pub(crate) fn len(&self) -> usize {
        self.tweens.len()
    }

    pub(crate) fn count_owned_by(&self, owner: BindingHandle) -> usize {
        self.tweens.iter().filter(|t| t.owner == owner).count()
    }

    /// Render every started tween at `now` and retire finished ones.
    ///
    /// Tweens whose target is detached are retired without writing.
    pub(crate) fn advance(&mut self, now: Millis, doc: &mut Document, fallback: Ease) {
        self.tweens.retain_mut(|t| {
            if now < t.start {
                return true;
            }
            if t.ends.is_none() {
                let Some(el) = doc.attached(t.target) else {
                    return false;
                };
                t.ends = Some(t.spec.resolve(&el.visual));
            }
            let Some(ends) = t.ends.as_ref() else {
                return false;
            };
            let local = now.saturating_sub(t.start);
            let values = t.spec.sample(ends, local, fallback);
            if !doc.commit(t.target, &values) {
                return false;
            }
            !t.spec.active_len().is_some_and(|len| local >= len)
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/controller/tweens.rs"]
mod tests;
