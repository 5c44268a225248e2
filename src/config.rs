use std::path::Path;

use crate::{
    animation::ease::Ease,
    controller::interaction::PointerEvent,
    foundation::core::Millis,
    foundation::error::{ScrollweaveError, ScrollweaveResult},
};

/// Stage-wide settings shared by every section.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StageConfig {
    /// Viewport width in pixels.
    pub viewport_width: f64,
    /// Viewport height in pixels.
    pub viewport_height: f64,
    /// Ease for tweens and timelines that declare none.
    pub default_ease: Ease,
    /// Seed for random stagger order.
    pub seed: u64,
    /// Key handed to the map provider; `None` means the map always falls back.
    pub map_api_key: Option<String>,
    /// Duration of anchor smooth scrolling.
    pub smooth_scroll: Millis,
    /// Ease of anchor smooth scrolling.
    pub smooth_scroll_ease: Ease,
    /// Hero slideshow period.
    pub slideshow_interval: Millis,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            viewport_width: 1280.0,
            viewport_height: 800.0,
            default_ease: Ease::OutQuad,
            seed: 0x5eed,
            map_api_key: None,
            smooth_scroll: Millis(1000),
            smooth_scroll_ease: Ease::InOutCubic,
            slideshow_interval: Millis(5000),
        }
    }
}

impl StageConfig {
    /// Check ranges.
    pub fn validate(&self) -> ScrollweaveResult<()> {
        for (name, v) in [
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(ScrollweaveError::config(format!(
                    "{name} must be finite and > 0, got {v}"
                )));
            }
        }
        if self.slideshow_interval == Millis::ZERO {
            return Err(ScrollweaveError::config("slideshow_interval must be > 0"));
        }
        Ok(())
    }

    /// Parse and validate JSON.
    pub fn from_json_str(s: &str) -> ScrollweaveResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON file.
    pub fn load(path: &Path) -> ScrollweaveResult<Self> {
        let s = std::fs::read_to_string(path).map_err(|e| {
            ScrollweaveError::config(format!("read config '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&s)
    }
}

/// One scripted input against the landing page.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum ScriptStep {
    /// Jump the viewport to `y`.
    Scroll {
        /// Target offset.
        y: f64,
    },
    /// Advance stage time.
    Tick {
        /// Elapsed time.
        ms: Millis,
    },
    /// Raw pointer input.
    Pointer {
        /// Event to deliver.
        event: PointerEvent,
    },
    /// Pointer enters or leaves a section's root, or one of its named parts.
    Hover {
        /// Section name.
        section: String,
        /// Part role such as `"carousel"`; the section root when absent.
        #[serde(default)]
        part: Option<String>,
        /// `true` to leave instead of enter.
        #[serde(default)]
        leave: bool,
    },
    /// Click an in-page link.
    Click {
        /// Link target, e.g. `"#contact"`.
        href: String,
    },
    /// Toggle an FAQ item.
    Faq {
        /// Item index.
        index: usize,
    },
    /// Fill and submit the contact form.
    Submit {
        /// Sender name.
        name: String,
        /// Sender email.
        email: String,
        /// Subject line.
        subject: String,
        /// Message body.
        message: String,
    },
    /// Unmount a section.
    Unmount {
        /// Section name.
        section: String,
    },
}

/// Ordered list of inputs replayed by `scrollweave simulate`.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SimulationScript {
    /// Inputs in order.
    pub steps: Vec<ScriptStep>,
}

impl SimulationScript {
    /// Reject steps that can never be valid.
    pub fn validate(&self) -> ScrollweaveResult<()> {
        for (i, step) in self.steps.iter().enumerate() {
            match step {
                ScriptStep::Scroll { y } if !y.is_finite() => {
                    return Err(ScrollweaveError::config(format!(
                        "step {i}: scroll offset must be finite"
                    )));
                }
                ScriptStep::Click { href } if !href.starts_with('#') => {
                    return Err(ScrollweaveError::config(format!(
                        "step {i}: only in-page links ('#id') can be clicked, got '{href}'"
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Parse and validate JSON.
    pub fn from_json_str(s: &str) -> ScrollweaveResult<Self> {
        let script: Self = serde_json::from_str(s)?;
        script.validate()?;
        Ok(script)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
