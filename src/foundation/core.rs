use crate::foundation::error::{ScrollweaveError, ScrollweaveResult};

pub use kurbo::{Point, Rect, Size, Vec2};

/// Absolute or relative time in whole milliseconds.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct Millis(pub u64);

impl Millis {
    /// Zero duration.
    pub const ZERO: Self = Self(0);

    /// Convert fractional seconds to milliseconds (rounded, negative clamps to zero).
    pub fn from_secs_f64(secs: f64) -> Self {
        Self((secs * 1000.0).round().max(0.0) as u64)
    }

    /// Value as fractional seconds.
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1000.0
    }

    /// Saturating addition of two durations.
    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Saturating subtraction of two durations.
    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Shift by a signed millisecond delta, clamping at zero.
    pub fn offset(self, delta: i64) -> Self {
        if delta >= 0 {
            Self(self.0.saturating_add(delta as u64))
        } else {
            Self(self.0.saturating_sub(delta.unsigned_abs()))
        }
    }
}

/// Half-open time span `[start, end)` in timeline space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TimeSpan {
    /// Inclusive span start.
    pub start: Millis,
    /// Exclusive span end.
    pub end: Millis,
}

impl TimeSpan {
    /// Create a validated span with `start <= end`.
    pub fn new(start: Millis, end: Millis) -> ScrollweaveResult<Self> {
        if start > end {
            return Err(ScrollweaveError::validation("TimeSpan start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Span starting at `start` lasting `len`.
    pub fn starting_at(start: Millis, len: Millis) -> Self {
        Self {
            start,
            end: start.saturating_add(len),
        }
    }

    /// Span length.
    pub fn len(self) -> Millis {
        self.end.saturating_sub(self.start)
    }

    /// Return `true` when the span covers no time.
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }
}

/// Parse a GSAP-style seconds literal (`"0.5"`, `"1"`) into milliseconds.
pub(crate) fn parse_secs(s: &str) -> ScrollweaveResult<Millis> {
    let v: f64 = s
        .trim()
        .parse()
        .map_err(|_| ScrollweaveError::validation(format!("invalid seconds literal '{s}'")))?;
    if !v.is_finite() || v < 0.0 {
        return Err(ScrollweaveError::validation(format!(
            "seconds literal must be finite and >= 0, got '{s}'"
        )));
    }
    Ok(Millis::from_secs_f64(v))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
