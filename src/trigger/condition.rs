use std::fmt;
use std::str::FromStr;

use crate::{
    dom::document::Viewport,
    foundation::core::Rect,
    foundation::error::{ScrollweaveError, ScrollweaveResult},
    trigger::observer::IntersectionChange,
};

/// Vertical reference line on an element or on the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Edge {
    /// Top edge.
    Top,
    /// Vertical middle.
    Center,
    /// Bottom edge.
    Bottom,
}

impl Edge {
    fn fraction(self) -> f64 {
        match self {
            Self::Top => 0.0,
            Self::Center => 0.5,
            Self::Bottom => 1.0,
        }
    }

    fn parse(token: &str) -> ScrollweaveResult<Self> {
        match token {
            "top" => Ok(Self::Top),
            "center" => Ok(Self::Center),
            "bottom" => Ok(Self::Bottom),
            other => Err(ScrollweaveError::trigger(format!("unknown edge '{other}'"))),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Center => "center",
            Self::Bottom => "bottom",
        }
    }
}

/// "When `element` edge meets `viewport` edge (+ offset)", e.g. `"top center+=200"`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TriggerPoint {
    /// Reference line on the element.
    pub element: Edge,
    /// Reference line on the viewport.
    pub viewport: Edge,
    /// Pixels added to the viewport line (positive = further down).
    pub offset_px: f64,
}

impl TriggerPoint {
    /// Point without offset.
    pub fn new(element: Edge, viewport: Edge) -> Self {
        Self {
            element,
            viewport,
            offset_px: 0.0,
        }
    }

    /// Shift the viewport line.
    pub fn offset(mut self, px: f64) -> Self {
        self.offset_px = px;
        self
    }

    /// Return `true` once scrolling has moved the viewport line to or past the element line.
    pub fn reached(&self, rect: Rect, viewport: &Viewport) -> bool {
        let element_y = rect.y0 + rect.height() * self.element.fraction();
        let viewport_y =
            viewport.scroll_y + viewport.height * self.viewport.fraction() + self.offset_px;
        viewport_y >= element_y
    }
}

impl FromStr for TriggerPoint {
    type Err = ScrollweaveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        let (Some(el), Some(vp), None) = (tokens.next(), tokens.next(), tokens.next()) else {
            return Err(ScrollweaveError::trigger(format!(
                "trigger point must be '<element edge> <viewport edge>', got '{s}'"
            )));
        };
        let element = Edge::parse(el)?;
        let (vp_edge, offset_px) = match vp.find(['+', '-']) {
            Some(i) => {
                let (edge, rest) = vp.split_at(i);
                let sign = if rest.starts_with('+') { 1.0 } else { -1.0 };
                let Some(num) = rest.get(1..).and_then(|r| r.strip_prefix('=')) else {
                    return Err(ScrollweaveError::trigger(format!(
                        "offset must be '+=px' or '-=px', got '{rest}'"
                    )));
                };
                let px: f64 = num.parse().map_err(|_| {
                    ScrollweaveError::trigger(format!("invalid pixel offset '{num}'"))
                })?;
                (edge, sign * px)
            }
            None => (vp, 0.0),
        };
        Ok(Self {
            element,
            viewport: Edge::parse(vp_edge)?,
            offset_px,
        })
    }
}

impl fmt::Display for TriggerPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.element.name(), self.viewport.name())?;
        if self.offset_px > 0.0 {
            write!(f, "+={}", self.offset_px)?;
        } else if self.offset_px < 0.0 {
            write!(f, "-={}", -self.offset_px)?;
        }
        Ok(())
    }
}

impl TryFrom<String> for TriggerPoint {
    type Error = ScrollweaveError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TriggerPoint> for String {
    fn from(value: TriggerPoint) -> Self {
        value.to_string()
    }
}

/// Playback action taken on one scroll crossing, as in GSAP `toggleActions`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ToggleAction {
    /// Play forward from the current position.
    Play,
    /// Play backward from the current position.
    Reverse,
    /// Jump to the start and play forward.
    Restart,
    /// Jump to the start and stop.
    Reset,
    /// Do nothing.
    #[default]
    None,
}

impl ToggleAction {
    fn parse(token: &str) -> ScrollweaveResult<Self> {
        match token {
            "play" => Ok(Self::Play),
            "reverse" => Ok(Self::Reverse),
            "restart" => Ok(Self::Restart),
            "reset" => Ok(Self::Reset),
            "none" => Ok(Self::None),
            "pause" | "resume" | "complete" => Err(ScrollweaveError::trigger(format!(
                "toggle action '{token}' is not supported"
            ))),
            other => Err(ScrollweaveError::trigger(format!(
                "unknown toggle action '{other}'"
            ))),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Play => "play",
            Self::Reverse => "reverse",
            Self::Restart => "restart",
            Self::Reset => "reset",
            Self::None => "none",
        }
    }
}

/// Actions for the four crossings: `"onEnter onLeave onEnterBack onLeaveBack"`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ToggleActions {
    /// Start point crossed scrolling down.
    pub on_enter: ToggleAction,
    /// End point crossed scrolling down.
    pub on_leave: ToggleAction,
    /// End point crossed scrolling up.
    pub on_enter_back: ToggleAction,
    /// Start point crossed scrolling up.
    pub on_leave_back: ToggleAction,
}

impl ToggleActions {
    /// Action for `change`.
    pub fn action(&self, change: IntersectionChange) -> ToggleAction {
        match change {
            IntersectionChange::Enter => self.on_enter,
            IntersectionChange::Leave => self.on_leave,
            IntersectionChange::EnterBack => self.on_enter_back,
            IntersectionChange::LeaveBack => self.on_leave_back,
        }
    }
}

impl FromStr for ToggleActions {
    type Err = ScrollweaveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        let (Some(a), Some(b), Some(c), Some(d), None) = (
            tokens.next(),
            tokens.next(),
            tokens.next(),
            tokens.next(),
            tokens.next(),
        ) else {
            return Err(ScrollweaveError::trigger(format!(
                "toggleActions needs four actions, got '{s}'"
            )));
        };
        Ok(Self {
            on_enter: ToggleAction::parse(a)?,
            on_leave: ToggleAction::parse(b)?,
            on_enter_back: ToggleAction::parse(c)?,
            on_leave_back: ToggleAction::parse(d)?,
        })
    }
}

impl fmt::Display for ToggleActions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.on_enter.name(),
            self.on_leave.name(),
            self.on_enter_back.name(),
            self.on_leave_back.name()
        )
    }
}

impl TryFrom<String> for ToggleActions {
    type Error = ScrollweaveError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ToggleActions> for String {
    fn from(value: ToggleActions) -> Self {
        value.to_string()
    }
}

/// What happens when a bound region enters and leaves the viewport again.
///
/// The named policies treat both scroll directions alike; [`ReplayPolicy::Toggle`] sets
/// each crossing separately.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReplayPolicy {
    /// Play on first entry; never reverse or replay.
    #[default]
    PlayOnce,
    /// Play on entry, reverse once on exit, then stay hidden.
    PlayAndReverseOnExit,
    /// Play on every entry, reverse on every exit.
    ReplayEveryEntry,
    /// Per-crossing actions.
    Toggle(ToggleActions),
}

impl ReplayPolicy {
    /// Parse GSAP `toggleActions` (`"play none none reverse"`).
    pub fn from_toggle_actions(s: &str) -> ScrollweaveResult<Self> {
        Ok(Self::Toggle(s.parse()?))
    }

    /// Action taken when the region crosses a trigger point.
    pub fn action(self, change: IntersectionChange) -> ToggleAction {
        use IntersectionChange::*;

        match (self, change) {
            (Self::Toggle(actions), change) => actions.action(change),
            (_, Enter) => ToggleAction::Play,
            (Self::PlayOnce, _) => ToggleAction::None,
            (Self::PlayAndReverseOnExit, EnterBack) => ToggleAction::None,
            (Self::ReplayEveryEntry, EnterBack) => ToggleAction::Play,
            (_, Leave | LeaveBack) => ToggleAction::Reverse,
        }
    }

    /// Return `true` when a finished or reversed entrance may play forward again.
    pub fn replays(self) -> bool {
        matches!(self, Self::ReplayEveryEntry | Self::Toggle(_))
    }
}

/// When a trigger region starts being "in view".
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TriggerStart {
    /// In view from the moment it is bound (mount-time animations).
    Immediate,
    /// In view once the point is reached.
    Point(TriggerPoint),
}

/// Intersection rule plus replay policy for an entrance binding.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TriggerCondition {
    /// Entry condition.
    pub start: TriggerStart,
    /// Exit point; defaults to `"bottom top"` (element scrolled fully above the viewport).
    #[serde(default = "default_end")]
    pub end: TriggerPoint,
    /// Replay behaviour.
    #[serde(default)]
    pub policy: ReplayPolicy,
}

fn default_end() -> TriggerPoint {
    TriggerPoint::new(Edge::Bottom, Edge::Top)
}

impl TriggerCondition {
    /// Scroll trigger starting at `start` (GSAP syntax).
    pub fn scroll(start: &str, policy: ReplayPolicy) -> ScrollweaveResult<Self> {
        Ok(Self {
            start: TriggerStart::Point(start.parse()?),
            end: default_end(),
            policy,
        })
    }

    /// Mount-time trigger: plays once as soon as it is bound.
    pub fn immediate() -> Self {
        Self {
            start: TriggerStart::Immediate,
            end: default_end(),
            policy: ReplayPolicy::PlayOnce,
        }
    }

    /// Return `true` when a region with `rect` counts as in view.
    pub fn intersects(&self, rect: Rect, viewport: &Viewport) -> bool {
        self.zone(rect, viewport) == Zone::Active
    }

    pub(crate) fn zone(&self, rect: Rect, viewport: &Viewport) -> Zone {
        match self.start {
            TriggerStart::Immediate => Zone::Active,
            TriggerStart::Point(start) if !start.reached(rect, viewport) => Zone::Before,
            TriggerStart::Point(_) if self.end.reached(rect, viewport) => Zone::After,
            TriggerStart::Point(_) => Zone::Active,
        }
    }
}

/// Scroll position relative to a region's start and end points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Zone {
    /// Start point not reached yet.
    Before,
    /// Between start and end.
    Active,
    /// End point passed.
    After,
}

#[cfg(test)]
#[path = "../../tests/unit/trigger/condition.rs"]
mod tests;
