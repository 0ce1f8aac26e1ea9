//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.
//! Ratios are kept as integer fractions rather than floats, so a width
//! bounded to 1000px comes out as exactly 1000px.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Width/height pair, either read from a source image or computed as a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("either a scale percentage or a max width/height must be provided")]
    Missing,
    #[error("a scale percentage cannot be combined with a max width/height")]
    Conflicting,
    #[error("{0} must be a positive integer")]
    Zero(&'static str),
    #[error("target size for a {0} image does not fit in 32-bit dimensions")]
    TooLarge(Dimensions),
}

/// How target dimensions are derived from the original ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizingPolicy {
    /// Uniform scale by a percentage. Values above 100 upscale.
    Scale(u32),
    /// Fit within the given limits, preserving aspect ratio. Never upscales.
    Bound {
        max_width: Option<u32>,
        max_height: Option<u32>,
    },
}

impl SizingPolicy {
    pub fn max_width(width: u32) -> Self {
        Self::Bound {
            max_width: Some(width),
            max_height: None,
        }
    }

    pub fn max_height(height: u32) -> Self {
        Self::Bound {
            max_width: None,
            max_height: Some(height),
        }
    }

    /// Build a policy from the three optional sizing flags.
    ///
    /// Exactly one of "scale" or "bound" must be chosen; the bound may carry
    /// a width limit, a height limit, or both.
    pub fn from_options(
        scale: Option<u32>,
        max_width: Option<u32>,
        max_height: Option<u32>,
    ) -> Result<Self, PolicyError> {
        let policy = match (scale, max_width, max_height) {
            (None, None, None) => return Err(PolicyError::Missing),
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => return Err(PolicyError::Conflicting),
            (Some(p), None, None) => Self::Scale(p),
            (None, max_width, max_height) => Self::Bound {
                max_width,
                max_height,
            },
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Check that the policy can produce dimensions at all.
    pub fn validate(&self) -> Result<(), PolicyError> {
        match *self {
            Self::Scale(0) => Err(PolicyError::Zero("scale")),
            Self::Scale(_) => Ok(()),
            Self::Bound {
                max_width: None,
                max_height: None,
            } => Err(PolicyError::Missing),
            Self::Bound {
                max_width: Some(0), ..
            } => Err(PolicyError::Zero("max width")),
            Self::Bound {
                max_height: Some(0),
                ..
            } => Err(PolicyError::Zero("max height")),
            Self::Bound { .. } => Ok(()),
        }
    }
}

/// A scale factor as `num / den`.
#[derive(Debug, Clone, Copy)]
struct Ratio {
    num: u64,
    den: u64,
}

impl Ratio {
    const ONE: Ratio = Ratio { num: 1, den: 1 };

    fn less_than(self, other: Ratio) -> bool {
        self.num * other.den < other.num * self.den
    }

    /// Apply to a pixel count, truncating toward zero. `None` on overflow.
    fn apply(self, value: u32) -> Option<u32> {
        let scaled = u64::from(value).checked_mul(self.num)? / self.den;
        u32::try_from(scaled).ok()
    }
}

/// Calculate output dimensions for an image under a sizing policy.
///
/// # Arguments
/// * `original` - Source image dimensions
/// * `policy` - Scale percentage or bounding box
///
/// # Returns
/// * Target dimensions, each at least 1px
/// * `PolicyError::TooLarge` when a side would overflow `u32`
///
/// # Examples
/// ```
/// # use batch_scale::imaging::{Dimensions, SizingPolicy, calculate_target_dimensions};
/// // 50% of 1024x768 → 512x384
/// let target = calculate_target_dimensions(Dimensions::new(1024, 768), &SizingPolicy::Scale(50));
/// assert_eq!(target, Ok(Dimensions::new(512, 384)));
///
/// // Both limits exceeded: the tighter one wins
/// let policy = SizingPolicy::Bound { max_width: Some(400), max_height: Some(100) };
/// let target = calculate_target_dimensions(Dimensions::new(1000, 500), &policy);
/// assert_eq!(target, Ok(Dimensions::new(200, 100)));
/// ```
pub fn calculate_target_dimensions(
    original: Dimensions,
    policy: &SizingPolicy,
) -> Result<Dimensions, PolicyError> {
    policy.validate()?;

    let ratio = match *policy {
        SizingPolicy::Scale(percentage) => Ratio {
            num: u64::from(percentage),
            den: 100,
        },
        SizingPolicy::Bound {
            max_width,
            max_height,
        } => bounding_ratio(original, max_width, max_height),
    };

    let scale = |side| {
        ratio
            .apply(side)
            .map(|scaled| scaled.max(1))
            .ok_or(PolicyError::TooLarge(original))
    };

    Ok(Dimensions {
        width: scale(original.width)?,
        height: scale(original.height)?,
    })
}

/// Smallest ratio that fits `original` inside every given limit, capped at 1.
fn bounding_ratio(original: Dimensions, max_width: Option<u32>, max_height: Option<u32>) -> Ratio {
    let mut ratio = Ratio::ONE;

    let limits = [(max_width, original.width), (max_height, original.height)];
    for (limit, actual) in limits {
        if let Some(limit) = limit.filter(|&limit| actual > limit) {
            let candidate = Ratio {
                num: u64::from(limit),
                den: u64::from(actual),
            };
            if candidate.less_than(ratio) {
                ratio = candidate;
            }
        }
    }

    ratio
}
