use crate::{controller::viewport::ViewportAnimationController, foundation::ids::ElementId};

/// Result of clicking a link.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum NavOutcome {
    /// Smooth scroll started toward the anchored section.
    Scrolling {
        /// Section scrolled to.
        target: ElementId,
        /// Scroll offset being approached.
        y: f64,
    },
    /// No attached element carries the anchor; nothing happens.
    UnknownAnchor {
        /// Anchor looked up.
        anchor: String,
    },
    /// The link leaves the page and is not intercepted.
    External,
}

/// Intercepts in-page links and smooth-scrolls instead of jumping.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnchorNavigator {
    /// Pixels kept free above the target (fixed navigation bar).
    pub top_offset: f64,
}

impl AnchorNavigator {
    /// Navigator leaving `top_offset` pixels above the target.
    pub fn new(top_offset: f64) -> Self {
        Self { top_offset }
    }

    /// Handle a click on a link to `href`.
    pub fn click(&self, ctl: &mut ViewportAnimationController, href: &str) -> NavOutcome {
        let Some(anchor) = href.strip_prefix('#') else {
            return NavOutcome::External;
        };
        let found = ctl
            .document()
            .find_anchor(anchor)
            .and_then(|id| ctl.document().rect(id).map(|r| (id, r)));
        let Some((target, rect)) = found else {
            tracing::debug!(anchor, "anchor not found");
            return NavOutcome::UnknownAnchor {
                anchor: anchor.to_owned(),
            };
        };
        let y = ctl.smooth_scroll_to(rect.y0 - self.top_offset);
        NavOutcome::Scrolling { target, y }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/nav.rs"]
mod tests;
