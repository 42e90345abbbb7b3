#![forbid(unsafe_code)]

//! Anchors, axes, and viewport dimensions.

/// The screen edge a sliding panel is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Anchor {
    #[default]
    Left,
    Right,
    Top,
    Bottom,
}

impl Anchor {
    /// The axis along which the panel slides in and out.
    ///
    /// Left/Right panels slide horizontally, Top/Bottom vertically.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Left | Self::Right => Axis::Horizontal,
            Self::Top | Self::Bottom => Axis::Vertical,
        }
    }

    /// Sign of motion along [`Anchor::axis`] that moves toward this edge.
    ///
    /// Left and Top edges sit at coordinate zero, so moving toward them is
    /// negative; Right and Bottom are positive.
    #[must_use]
    pub const fn toward_edge_sign(self) -> i8 {
        match self {
            Self::Left | Self::Top => -1,
            Self::Right | Self::Bottom => 1,
        }
    }

    /// Distance from `(x, y)` to this edge of the viewport.
    ///
    /// Points outside the viewport report zero on the near side. Non-finite
    /// coordinates are infinitely far from every edge.
    #[must_use]
    pub fn distance_from_edge(self, x: f64, y: f64, viewport: ViewportSize) -> f64 {
        let d = match self {
            Self::Left => x,
            Self::Top => y,
            Self::Right => f64::from(viewport.width) - x,
            Self::Bottom => f64::from(viewport.height) - y,
        };
        if d.is_finite() {
            d.max(0.0)
        } else {
            f64::INFINITY
        }
    }
}

/// A layout axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// The perpendicular axis.
    #[must_use]
    pub const fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// Viewport dimensions in CSS-like pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl ViewportSize {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}
