//! Easing functions used for camera animations.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GlobeError;

/// Maps linear animation progress to eased progress.
///
/// Names follow the common kebab-case notation (`in-out-cubic` etc.), which is also the
/// serialized form.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Starts slow, accelerates.
    InCubic,
    /// Starts fast, decelerates.
    OutCubic,
    /// Accelerates until the middle, then decelerates.
    #[default]
    InOutCubic,
    /// Exponential acceleration.
    InExpo,
    /// Exponential deceleration.
    OutExpo,
    /// Exponential acceleration and deceleration.
    InOutExpo,
}

impl Easing {
    const ALL: [Easing; 7] = [
        Easing::Linear,
        Easing::InCubic,
        Easing::OutCubic,
        Easing::InOutCubic,
        Easing::InExpo,
        Easing::OutExpo,
        Easing::InOutExpo,
    ];

    /// Returns eased progress for the linear progress `t`. Values of `t` outside of `0.0..=1.0`
    /// are clamped.
    pub fn apply(&self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Easing::Linear => t,
            Easing::InCubic => t * t * t,
            Easing::OutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::InExpo => {
                if t == 0.0 {
                    0.0
                } else {
                    2f64.powf(10.0 * t - 10.0)
                }
            }
            Easing::OutExpo => {
                if t == 1.0 {
                    1.0
                } else {
                    1.0 - 2f64.powf(-10.0 * t)
                }
            }
            Easing::InOutExpo => {
                if t == 0.0 || t == 1.0 {
                    t
                } else if t < 0.5 {
                    2f64.powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - 2f64.powf(-20.0 * t + 10.0)) / 2.0
                }
            }
        }
    }

    /// Kebab-case name of the function.
    pub fn name(&self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::InCubic => "in-cubic",
            Easing::OutCubic => "out-cubic",
            Easing::InOutCubic => "in-out-cubic",
            Easing::InExpo => "in-expo",
            Easing::OutExpo => "out-expo",
            Easing::InOutExpo => "in-out-expo",
        }
    }
}

impl FromStr for Easing {
    type Err = GlobeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|easing| easing.name() == s)
            .ok_or_else(|| GlobeError::Config(format!("unknown easing function: {s}")))
    }
}

impl Display for Easing {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn endpoints_are_fixed() {
        for easing in Easing::ALL {
            assert_abs_diff_eq!(easing.apply(0.0), 0.0, epsilon = 0.001);
            assert_abs_diff_eq!(easing.apply(1.0), 1.0, epsilon = 0.001);
        }
    }

    #[test]
    fn monotonic() {
        for easing in Easing::ALL {
            let mut prev = easing.apply(0.0);
            for i in 1..=100 {
                let value = easing.apply(i as f64 / 100.0);
                assert!(value >= prev, "{easing} is not monotonic at {i}");
                prev = value;
            }
        }
    }

    #[test]
    fn in_out_cubic_is_symmetric() {
        let easing = Easing::InOutCubic;
        assert_abs_diff_eq!(easing.apply(0.5), 0.5);
        assert_abs_diff_eq!(easing.apply(0.25), 0.0625);
        assert_abs_diff_eq!(easing.apply(0.75), 0.9375);
    }

    #[test]
    fn out_of_range_progress_is_clamped() {
        assert_eq!(Easing::Linear.apply(-1.0), 0.0);
        assert_eq!(Easing::OutCubic.apply(2.0), 1.0);
        assert_eq!(Easing::InCubic.apply(f64::NAN), 0.0);
    }

    #[test]
    fn parse_names() {
        assert_eq!("in-out-cubic".parse::<Easing>().unwrap(), Easing::InOutCubic);
        for easing in Easing::ALL {
            assert_eq!(easing.name().parse::<Easing>().unwrap(), easing);
        }
        assert_matches!("bounce".parse::<Easing>(), Err(GlobeError::Config(_)));
    }

    #[test]
    fn serde_names() {
        let json = serde_json::to_string(&Easing::InOutCubic).unwrap();
        assert_eq!(json, r#""in-out-cubic""#);
        let easing: Easing = serde_json::from_str(r#""out-expo""#).unwrap();
        assert_eq!(easing, Easing::OutExpo);
    }
}
