use crate::{
    animation::ease::Ease,
    animation::props::{Lerp, Prop, PropMap, VisualState},
    animation::stagger::Stagger,
    foundation::core::Millis,
    foundation::error::{ScrollweaveError, ScrollweaveResult},
};

/// Which end of the tween the declared values describe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TweenMode {
    /// Animate from the current values to the declared values.
    #[default]
    To,
    /// Render the declared values immediately, then animate back to the values held at bind
    /// time.
    From,
    /// Animate from `from_props` to the declared values.
    FromTo,
}

/// How many extra cycles a tween plays after the first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Repeat {
    /// Play `n` additional cycles.
    Count(u32),
    /// Repeat forever. Only valid for loops.
    Infinite,
}

impl Default for Repeat {
    fn default() -> Self {
        Self::Count(0)
    }
}

/// Resolved start/end values for one element.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Endpoints {
    /// Values at progress 0.
    pub from: PropMap,
    /// Values at progress 1.
    pub to: PropMap,
}

/// Declarative transform over one or more elements.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationSpec {
    /// Name used in logs and event traces.
    #[serde(default)]
    pub name: String,
    /// Which end `props` describes.
    #[serde(default)]
    pub mode: TweenMode,
    /// Target (or starting, for [`TweenMode::From`]) values.
    pub props: PropMap,
    /// Starting values for [`TweenMode::FromTo`].
    #[serde(default, skip_serializing_if = "PropMap::is_empty")]
    pub from_props: PropMap,
    /// Length of one cycle.
    pub duration: Millis,
    /// Easing; `None` inherits the timeline default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ease: Option<Ease>,
    /// Delay before the first element starts.
    #[serde(default)]
    pub delay: Millis,
    /// Per-element start distribution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stagger: Option<Stagger>,
    /// Extra cycles.
    #[serde(default)]
    pub repeat: Repeat,
    /// Alternate direction on every other cycle.
    #[serde(default)]
    pub yoyo: bool,
}

impl AnimationSpec {
    fn new(name: impl Into<String>, mode: TweenMode, duration: Millis) -> Self {
        Self {
            name: name.into(),
            mode,
            props: PropMap::new(),
            from_props: PropMap::new(),
            duration,
            ease: None,
            delay: Millis::ZERO,
            stagger: None,
            repeat: Repeat::default(),
            yoyo: false,
        }
    }

    /// Tween from current values to the values set with [`AnimationSpec::set`].
    pub fn to(name: impl Into<String>, duration: Millis) -> Self {
        Self::new(name, TweenMode::To, duration)
    }

    /// Tween from the values set with [`AnimationSpec::set`] back to current values.
    pub fn from(name: impl Into<String>, duration: Millis) -> Self {
        Self::new(name, TweenMode::From, duration)
    }

    /// Tween between explicit start values and the values set with [`AnimationSpec::set`].
    pub fn from_to(name: impl Into<String>, duration: Millis, from: PropMap) -> Self {
        let mut spec = Self::new(name, TweenMode::FromTo, duration);
        spec.from_props = from;
        spec
    }

    /// Declare a property value.
    pub fn set(mut self, prop: Prop, value: f64) -> Self {
        self.props.insert(prop, value);
        self
    }

    /// Set the easing.
    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = Some(ease);
        self
    }

    /// Set the start delay.
    pub fn delay(mut self, delay: Millis) -> Self {
        self.delay = delay;
        self
    }

    /// Distribute starts across targets.
    pub fn stagger(mut self, stagger: Stagger) -> Self {
        self.stagger = Some(stagger);
        self
    }

    /// Set repeat count.
    pub fn repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    /// Alternate direction on odd cycles.
    pub fn yoyo(mut self, yoyo: bool) -> Self {
        self.yoyo = yoyo;
        self
    }

    /// Check value and timing invariants.
    pub fn validate(&self) -> ScrollweaveResult<()> {
        if self.props.is_empty() {
            return Err(ScrollweaveError::animation(format!(
                "spec '{}' animates no properties",
                self.name
            )));
        }
        if self.mode == TweenMode::FromTo && self.from_props.is_empty() {
            return Err(ScrollweaveError::animation(format!(
                "fromTo spec '{}' has no start values",
                self.name
            )));
        }
        if self
            .props
            .values()
            .chain(self.from_props.values())
            .any(|v| !v.is_finite())
        {
            return Err(ScrollweaveError::animation(format!(
                "spec '{}' has a non-finite property value",
                self.name
            )));
        }
        if self.duration == Millis::ZERO && self.repeat == Repeat::Infinite {
            return Err(ScrollweaveError::animation(format!(
                "spec '{}' repeats forever with zero duration",
                self.name
            )));
        }
        Ok(())
    }

    /// Number of cycles, `None` when infinite.
    pub fn cycles(&self) -> Option<u64> {
        match self.repeat {
            Repeat::Count(n) => Some(u64::from(n) + 1),
            Repeat::Infinite => None,
        }
    }

    /// Time one element spends animating, `None` when infinite.
    pub fn active_len(&self) -> Option<Millis> {
        self.cycles()
            .map(|c| Millis(self.duration.0.saturating_mul(c)))
    }

    /// Time from the first element's delay to the last element finishing, for `count` targets.
    pub fn total_len(&self, count: usize) -> Option<Millis> {
        let spread = self
            .stagger
            .map(|s| s.spread(count))
            .unwrap_or(Millis::ZERO);
        self.active_len()
            .map(|active| self.delay.saturating_add(spread).saturating_add(active))
    }

    /// Per-target start offsets (delay + stagger), indexed like the targets.
    pub fn start_offsets(&self, count: usize) -> Vec<Millis> {
        match self.stagger {
            Some(s) => s
                .offsets(count)
                .into_iter()
                .map(|o| o.saturating_add(self.delay))
                .collect(),
            None => vec![self.delay; count],
        }
    }

    /// Resolve start and end values against an element's current state.
    pub fn resolve(&self, current: &VisualState) -> Endpoints {
        match self.mode {
            TweenMode::To => Endpoints {
                from: current.snapshot(self.props.keys()),
                to: self.props.clone(),
            },
            TweenMode::From => Endpoints {
                from: self.props.clone(),
                to: current.snapshot(self.props.keys()),
            },
            TweenMode::FromTo => Endpoints {
                from: self.from_props.clone(),
                to: self.props.clone(),
            },
        }
    }

    /// Eased progress `[0, 1]` (may overshoot for back/elastic) at element-local time `local`.
    pub fn progress_at(&self, local: Millis, fallback: Ease) -> f64 {
        let ease = self.ease.unwrap_or(fallback);
        let d = self.duration.0;
        let last_cycle_reversed = |cycles: u64| self.yoyo && (cycles - 1) % 2 == 1;

        if d == 0 {
            return 1.0;
        }
        if let Some(cycles) = self.cycles() {
            if local.0 >= d.saturating_mul(cycles) {
                return if last_cycle_reversed(cycles) { 0.0 } else { 1.0 };
            }
        }
        let cycle = local.0 / d;
        let mut p = (local.0 % d) as f64 / d as f64;
        if self.yoyo && cycle % 2 == 1 {
            p = 1.0 - p;
        }
        ease.apply(p)
    }

    /// Values at element-local time `local`.
    pub fn sample(&self, ends: &Endpoints, local: Millis, fallback: Ease) -> PropMap {
        PropMap::lerp(&ends.from, &ends.to, self.progress_at(local, fallback))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spec.rs"]
mod tests;
