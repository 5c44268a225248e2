use std::fmt;
use std::str::FromStr;

use crate::foundation::error::ScrollweaveError;

/// Easing functions used to map normalized tween progress.
///
/// Serialized as GSAP-style identifiers (`"power3.out"`, `"back.out(1.7)"`,
/// `"elastic.out(1, 0.8)"`, `"none"`).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Ease {
    /// Linear interpolation (`none`).
    Linear,
    /// Quadratic ease-in (`power1.in`).
    InQuad,
    /// Quadratic ease-out (`power1.out`).
    OutQuad,
    /// Quadratic ease-in/out (`power1.inOut`).
    InOutQuad,
    /// Cubic ease-in (`power2.in`).
    InCubic,
    /// Cubic ease-out (`power2.out`).
    OutCubic,
    /// Cubic ease-in/out (`power2.inOut`).
    InOutCubic,
    /// Quartic ease-in (`power3.in`).
    InQuart,
    /// Quartic ease-out (`power3.out`).
    OutQuart,
    /// Quartic ease-in/out (`power3.inOut`).
    InOutQuart,
    /// Quintic ease-in (`power4.in`).
    InQuint,
    /// Quintic ease-out (`power4.out`).
    OutQuint,
    /// Quintic ease-in/out (`power4.inOut`).
    InOutQuint,
    /// Sine ease-in.
    InSine,
    /// Sine ease-out.
    OutSine,
    /// Sine ease-in/out.
    InOutSine,
    /// Overshooting ease-out.
    OutBack {
        /// Overshoot amount (GSAP default 1.7).
        overshoot: f64,
    },
    /// Oscillating ease-out.
    OutElastic {
        /// Amplitude, clamped to `>= 1`.
        amplitude: f64,
        /// Oscillation period in normalized time.
        period: f64,
    },
}

impl Default for Ease {
    fn default() -> Self {
        Self::OutQuad
    }
}

impl Ease {
    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 || t == 1.0 {
            return t;
        }
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::InQuart => t.powi(4),
            Self::OutQuart => 1.0 - (1.0 - t).powi(4),
            Self::InOutQuart => {
                if t < 0.5 {
                    8.0 * t.powi(4)
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(4) / 2.0)
                }
            }
            Self::InQuint => t.powi(5),
            Self::OutQuint => 1.0 - (1.0 - t).powi(5),
            Self::InOutQuint => {
                if t < 0.5 {
                    16.0 * t.powi(5)
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(5) / 2.0)
                }
            }
            Self::InSine => 1.0 - (t * std::f64::consts::FRAC_PI_2).cos(),
            Self::OutSine => (t * std::f64::consts::FRAC_PI_2).sin(),
            Self::InOutSine => -((std::f64::consts::PI * t).cos() - 1.0) / 2.0,
            Self::OutBack { overshoot } => {
                let u = t - 1.0;
                1.0 + (overshoot + 1.0) * u.powi(3) + overshoot * u.powi(2)
            }
            Self::OutElastic { amplitude, period } => {
                let a = amplitude.max(1.0);
                let p = if period > 0.0 { period } else { 0.3 };
                let tau = std::f64::consts::TAU;
                let shift = p / tau * (1.0 / a).asin();
                a * 2f64.powf(-10.0 * t) * ((t - shift) * tau / p).sin() + 1.0
            }
        }
    }

    fn power(level: u8, dir: Dir) -> Option<Self> {
        use Dir::*;
        Some(match (level, dir) {
            (1, In) => Self::InQuad,
            (1, Out) => Self::OutQuad,
            (1, InOut) => Self::InOutQuad,
            (2, In) => Self::InCubic,
            (2, Out) => Self::OutCubic,
            (2, InOut) => Self::InOutCubic,
            (3, In) => Self::InQuart,
            (3, Out) => Self::OutQuart,
            (3, InOut) => Self::InOutQuart,
            (4, In) => Self::InQuint,
            (4, Out) => Self::OutQuint,
            (4, InOut) => Self::InOutQuint,
            _ => return None,
        })
    }
}

#[derive(Clone, Copy)]
enum Dir {
    In,
    Out,
    InOut,
}

fn parse_params(raw: &str) -> Result<Vec<f64>, ScrollweaveError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    raw.split(',')
        .map(|p| {
            p.trim()
                .parse::<f64>()
                .map_err(|_| ScrollweaveError::animation(format!("invalid ease parameter '{p}'")))
        })
        .collect()
}

impl FromStr for Ease {
    type Err = ScrollweaveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (head, params) = match s.find('(') {
            Some(open) => {
                let Some(inner) = s[open + 1..].strip_suffix(')') else {
                    return Err(ScrollweaveError::animation(format!(
                        "unterminated ease parameters in '{s}'"
                    )));
                };
                (&s[..open], parse_params(inner)?)
            }
            None => (s, Vec::new()),
        };

        let (family, dir) = match head.split_once('.') {
            Some((f, d)) => (f, d),
            None => (head, "out"),
        };
        let dir = match dir {
            "in" => Dir::In,
            "out" => Dir::Out,
            "inOut" => Dir::InOut,
            other => {
                return Err(ScrollweaveError::animation(format!(
                    "unknown ease direction '{other}' in '{s}'"
                )));
            }
        };

        let ease = match family {
            "none" | "linear" => Some(Self::Linear),
            "power0" => Some(Self::Linear),
            "power1" | "quad" => Self::power(1, dir),
            "power2" | "cubic" => Self::power(2, dir),
            "power3" | "quart" => Self::power(3, dir),
            "power4" | "quint" | "strong" => Self::power(4, dir),
            "sine" => Some(match dir {
                Dir::In => Self::InSine,
                Dir::Out => Self::OutSine,
                Dir::InOut => Self::InOutSine,
            }),
            "back" if matches!(dir, Dir::Out) => Some(Self::OutBack {
                overshoot: params.first().copied().unwrap_or(1.7),
            }),
            "elastic" if matches!(dir, Dir::Out) => Some(Self::OutElastic {
                amplitude: params.first().copied().unwrap_or(1.0),
                period: params.get(1).copied().unwrap_or(0.3),
            }),
            _ => None,
        };
        ease.ok_or_else(|| ScrollweaveError::animation(format!("unsupported ease '{s}'")))
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Linear => f.write_str("none"),
            Self::InQuad => f.write_str("power1.in"),
            Self::OutQuad => f.write_str("power1.out"),
            Self::InOutQuad => f.write_str("power1.inOut"),
            Self::InCubic => f.write_str("power2.in"),
            Self::OutCubic => f.write_str("power2.out"),
            Self::InOutCubic => f.write_str("power2.inOut"),
            Self::InQuart => f.write_str("power3.in"),
            Self::OutQuart => f.write_str("power3.out"),
            Self::InOutQuart => f.write_str("power3.inOut"),
            Self::InQuint => f.write_str("power4.in"),
            Self::OutQuint => f.write_str("power4.out"),
            Self::InOutQuint => f.write_str("power4.inOut"),
            Self::InSine => f.write_str("sine.in"),
            Self::OutSine => f.write_str("sine.out"),
            Self::InOutSine => f.write_str("sine.inOut"),
            Self::OutBack { overshoot } => write!(f, "back.out({overshoot})"),
            Self::OutElastic { amplitude, period } => {
                write!(f, "elastic.out({amplitude}, {period})")
            }
        }
    }
}

impl TryFrom<String> for Ease {
    type Error = ScrollweaveError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Ease> for String {
    fn from(value: Ease) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
