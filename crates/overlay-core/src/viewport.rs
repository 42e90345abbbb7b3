#![forbid(unsafe_code)]

//! Viewport classification against a breakpoint table.
//!
//! [`classify`] maps a viewport width to the largest [`Breakpoint`] whose
//! minimum width it meets. The function is pure; debouncing the underlying
//! resize source is the caller's job (see `overlay-runtime`'s
//! `ResizeDebouncer`).
//!
//! # Invariants
//!
//! 1. `Xs` always has a minimum width of 0, so every width classifies.
//! 2. Classification is monotonic for monotonic tables: a wider viewport
//!    never classifies below a narrower one.

/// Discrete viewport size class, ordered from narrowest to widest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Breakpoint {
    Xs,
    Sm,
    #[default]
    Md,
    Lg,
    Xl,
}

impl Breakpoint {
    pub const ALL: [Self; 5] = [Self::Xs, Self::Sm, Self::Md, Self::Lg, Self::Xl];

    const fn index(self) -> usize {
        match self {
            Self::Xs => 0,
            Self::Sm => 1,
            Self::Md => 2,
            Self::Lg => 3,
            Self::Xl => 4,
        }
    }

    /// True when `self` is strictly narrower than `other`.
    #[must_use]
    pub fn is_below(self, other: Self) -> bool {
        self < other
    }
}

/// Minimum viewport widths (px) for each breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BreakpointTable {
    min_widths: [u32; 5],
}

impl Default for BreakpointTable {
    fn default() -> Self {
        Self {
            min_widths: [0, 600, 900, 1200, 1536],
        }
    }
}

impl BreakpointTable {
    /// Build a table from the minimum widths of `Sm`, `Md`, `Lg`, `Xl`.
    #[must_use]
    pub const fn new(sm: u32, md: u32, lg: u32, xl: u32) -> Self {
        Self {
            min_widths: [0, sm, md, lg, xl],
        }
    }

    /// Override one breakpoint's minimum width. `Xs` stays pinned at 0.
    #[must_use]
    pub fn with(mut self, breakpoint: Breakpoint, min_width: u32) -> Self {
        if breakpoint != Breakpoint::Xs {
            self.min_widths[breakpoint.index()] = min_width;
        }
        self
    }

    /// Minimum width for `breakpoint`.
    #[must_use]
    pub const fn min_width(&self, breakpoint: Breakpoint) -> u32 {
        self.min_widths[breakpoint.index()]
    }
}

/// Classify a viewport width against `table`.
#[must_use]
pub fn classify(width_px: u32, table: &BreakpointTable) -> Breakpoint {
    Breakpoint::ALL
        .iter()
        .rev()
        .copied()
        .find(|&bp| width_px >= table.min_width(bp))
        .unwrap_or(Breakpoint::Xs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn default_table_boundaries() {
        let table = BreakpointTable::default();
        assert_eq!(classify(0, &table), Breakpoint::Xs);
        assert_eq!(classify(599, &table), Breakpoint::Xs);
        assert_eq!(classify(600, &table), Breakpoint::Sm);
        assert_eq!(classify(899, &table), Breakpoint::Sm);
        assert_eq!(classify(900, &table), Breakpoint::Md);
        assert_eq!(classify(1200, &table), Breakpoint::Lg);
        assert_eq!(classify(1536, &table), Breakpoint::Xl);
        assert_eq!(classify(u32::MAX, &table), Breakpoint::Xl);
    }

    #[test]
    fn custom_table_and_xs_pinned() {
        let table = BreakpointTable::new(320, 768, 1024, 1440).with(Breakpoint::Xs, 50);
        assert_eq!(table.min_width(Breakpoint::Xs), 0);
        assert_eq!(classify(10, &table), Breakpoint::Xs);
        assert_eq!(classify(800, &table), Breakpoint::Md);
    }

    #[test]
    fn ordering() {
        assert!(Breakpoint::Xs.is_below(Breakpoint::Sm));
        assert!(!Breakpoint::Md.is_below(Breakpoint::Md));
        assert!(!Breakpoint::Xl.is_below(Breakpoint::Lg));
    }

    proptest! {
        #[test]
        fn classification_is_monotonic(a in 0u32..4000, b in 0u32..4000) {
            let table = BreakpointTable::default();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(classify(lo, &table) <= classify(hi, &table));
        }
    }
}
