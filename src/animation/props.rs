use std::collections::BTreeMap;

/// Animatable visual property of an element.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Prop {
    /// Opacity in `[0, 1]`.
    Opacity,
    /// Horizontal translation in pixels.
    X,
    /// Vertical translation in pixels.
    Y,
    /// Uniform scale factor.
    Scale,
    /// Horizontal-only scale factor.
    ScaleX,
    /// 2D rotation in degrees.
    Rotation,
    /// Rotation around the horizontal axis in degrees.
    RotationX,
    /// Rotation around the vertical axis in degrees.
    RotationY,
    /// SVG stroke dash offset.
    #[serde(rename = "strokeDashoffset")]
    StrokeDashOffset,
}

impl Prop {
    /// Value an element holds before anything animated it.
    pub fn neutral(self) -> f64 {
        match self {
            Self::Opacity | Self::Scale | Self::ScaleX => 1.0,
            _ => 0.0,
        }
    }
}

/// Sparse property -> value map used by specs and tweens.
pub type PropMap = BTreeMap<Prop, f64>;

/// Interpolation contract for animatable values.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for PropMap {
    /// Interpolates keys present in both maps; keys only in `b` snap to `b`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        b.iter()
            .map(|(&prop, bv)| {
                let v = match a.get(&prop) {
                    Some(av) => f64::lerp(av, bv, t),
                    None => *bv,
                };
                (prop, v)
            })
            .collect()
    }
}

/// Last committed visual state of an element.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VisualState {
    values: PropMap,
}

impl VisualState {
    /// Current value of `prop`, falling back to its neutral value.
    pub fn get(&self, prop: Prop) -> f64 {
        self.values.get(&prop).copied().unwrap_or_else(|| prop.neutral())
    }

    /// Commit a single value.
    pub fn set(&mut self, prop: Prop, value: f64) {
        self.values.insert(prop, value);
    }

    /// Commit every value of `values`.
    pub fn apply(&mut self, values: &PropMap) {
        for (&prop, &v) in values {
            self.values.insert(prop, v);
        }
    }

    /// Snapshot the current values for the props named in `keys`.
    pub fn snapshot<'a>(&self, keys: impl IntoIterator<Item = &'a Prop>) -> PropMap {
        keys.into_iter().map(|&p| (p, self.get(p))).collect()
    }

    /// Return `true` when every property still holds its neutral value.
    pub fn is_neutral(&self) -> bool {
        self.values.iter().all(|(p, v)| (*v - p.neutral()).abs() < 1e-9)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/props.rs"]
mod tests;
