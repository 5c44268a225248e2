use std::fmt;
use std::str::FromStr;

use crate::{
    animation::ease::Ease,
    animation::spec::AnimationSpec,
    foundation::core::{Millis, TimeSpan, parse_secs},
    foundation::error::{ScrollweaveError, ScrollweaveResult},
    foundation::ids::ElementId,
};

/// Where an entry starts relative to the entries before it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Position {
    /// Right after the previous entry ends.
    #[default]
    After,
    /// Signed millisecond offset from the previous entry's end (`"-=0.5"`, `"+=0.2"`).
    Relative(i64),
    /// Same start as the previous entry (`"<"`).
    WithPrevious,
    /// Absolute timeline time (`"0"`, `"1.2"`).
    At(Millis),
}

impl FromStr for Position {
    type Err = ScrollweaveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s == ">" {
            return Ok(Self::After);
        }
        if s == "<" {
            return Ok(Self::WithPrevious);
        }
        if let Some(rest) = s.strip_prefix("-=") {
            return Ok(Self::Relative(-(parse_secs(rest)?.0 as i64)));
        }
        if let Some(rest) = s.strip_prefix("+=") {
            return Ok(Self::Relative(parse_secs(rest)?.0 as i64));
        }
        Ok(Self::At(parse_secs(s)?))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::After => f.write_str(">"),
            Self::WithPrevious => f.write_str("<"),
            Self::Relative(ms) if ms < 0 => {
                write!(f, "-={}", Millis(ms.unsigned_abs()).as_secs_f64())
            }
            Self::Relative(ms) => write!(f, "+={}", Millis(ms as u64).as_secs_f64()),
            Self::At(t) => write!(f, "{}", t.as_secs_f64()),
        }
    }
}

impl TryFrom<String> for Position {
    type Error = ScrollweaveError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Position> for String {
    fn from(value: Position) -> Self {
        value.to_string()
    }
}

/// One animation applied to a set of elements at a timeline position.
#[derive(Clone, Debug, PartialEq)]
pub struct TimelineEntry {
    /// What to animate.
    pub spec: AnimationSpec,
    /// Elements animated by `spec`, in stagger index order.
    pub targets: Vec<ElementId>,
    /// Start position.
    pub position: Position,
}

/// Ordered composition of animation specs with relative start offsets.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Timeline {
    entries: Vec<TimelineEntry>,
    default_ease: Option<Ease>,
}

impl Timeline {
    /// Empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ease applied to entries that do not set their own.
    pub fn with_default_ease(mut self, ease: Ease) -> Self {
        self.default_ease = Some(ease);
        self
    }

    /// Append an entry at `position`.
    pub fn add(mut self, spec: AnimationSpec, targets: Vec<ElementId>, position: Position) -> Self {
        self.entries.push(TimelineEntry {
            spec,
            targets,
            position,
        });
        self
    }

    /// Append an entry right after the previous one.
    pub fn then(self, spec: AnimationSpec, targets: Vec<ElementId>) -> Self {
        self.add(spec, targets, Position::After)
    }

    /// Declared entries.
    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    /// Ease inherited by entries without one, if the timeline sets it.
    pub fn default_ease(&self) -> Option<Ease> {
        self.default_ease
    }

    /// Validate every entry. Entrance timelines must be finite so they can complete.
    pub fn validate(&self) -> ScrollweaveResult<()> {
        for entry in &self.entries {
            entry.spec.validate()?;
            if entry.spec.active_len().is_none() {
                return Err(ScrollweaveError::animation(format!(
                    "timeline entry '{}' repeats forever; use a loop binding instead",
                    entry.spec.name
                )));
            }
        }
        Ok(())
    }

    /// Start/end of every entry in declaration order.
    ///
    /// Relative offsets are measured from the previous entry's end and clamp at zero, so an
    /// overlap never moves an entry before the timeline start.
    pub fn schedule(&self) -> Vec<TimeSpan> {
        let mut spans = Vec::with_capacity(self.entries.len());
        let mut prev = TimeSpan::starting_at(Millis::ZERO, Millis::ZERO);
        for entry in &self.entries {
            let start = match entry.position {
                Position::After => prev.end,
                Position::Relative(delta) => prev.end.offset(delta),
                Position::WithPrevious => prev.start,
                Position::At(t) => t,
            };
            let len = entry
                .spec
                .total_len(entry.targets.len())
                .unwrap_or(Millis(u64::MAX));
            let span = TimeSpan::starting_at(start, len);
            spans.push(span);
            prev = span;
        }
        spans
    }

    /// End of the latest-ending entry.
    pub fn duration(&self) -> Millis {
        self.schedule()
            .into_iter()
            .map(|s| s.end)
            .max()
            .unwrap_or(Millis::ZERO)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
