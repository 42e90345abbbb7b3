#![forbid(unsafe_code)]

//! Overlay configuration.
//!
//! [`OverlayConfig`] is a plain value supplied by the owner. It is never
//! mutated by the engine; the owner replaces it wholesale through
//! [`OverlayController::set_config`](crate::OverlayController::set_config).
//!
//! Responsive substitution is read-time only:
//! [`effective_variant`](OverlayConfig::effective_variant) derives the
//! variant in force for a viewport class without touching `variant`.
//!
//! # Policy files
//!
//! With the `policy-config` feature, configs load from TOML or JSON. Every
//! field is optional and falls back to [`OverlayConfig::default`]:
//!
//! ```toml
//! kind = "drawer"
//! variant = "temporary"
//! anchor = "right"
//! size = "wide"
//! responsive = true
//! responsive_breakpoint = "md"
//! mobile_variant = "temporary"
//! close_on_escape = false
//!
//! [swipe]
//! distance_px = 64.0
//! ```

use overlay_core::{Anchor, Axis, Breakpoint, BreakpointTable};

use crate::focus_trap::FocusTrapOptions;
use crate::swipe::SwipeThresholds;

/// Width of a collapsed Mini rail.
pub const DEFAULT_RAIL_SIZE_PX: u32 = 72;
/// Enter/leave transition length.
pub const DEFAULT_ANIMATION_DURATION_MS: u64 = 225;

/// Overlay behavior mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "policy-config",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Variant {
    /// Dismissible modal overlay with backdrop.
    #[default]
    Temporary,
    /// Toggleable, non-modal, pushes content aside.
    Persistent,
    /// Always rendered; ignores open/close requests.
    Permanent,
    /// Persistent panel that collapses to a rail.
    Mini,
}

impl Variant {
    /// Whether the focus trap engages and Escape/backdrop apply.
    #[must_use]
    pub const fn is_modal(self) -> bool {
        matches!(self, Self::Temporary)
    }
}

/// Which overlay component is being driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "policy-config",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum OverlayKind {
    /// Sliding side panel.
    #[default]
    Drawer,
    /// Centered modal dialog. Always modal, never swipeable.
    Dialog,
}

/// Named panel size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "policy-config",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum SizePreset {
    Compact,
    #[default]
    Standard,
    Wide,
    /// Size to content.
    Auto,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[cfg(feature = "policy-config")]
    #[error("invalid TOML policy: {0}")]
    Toml(#[from] toml::de::Error),

    #[cfg(feature = "policy-config")]
    #[error("failed to serialize policy: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[cfg(feature = "policy-config")]
    #[error("invalid JSON policy: {0}")]
    Json(#[from] serde_json::Error),

    #[error("swipe threshold `{name}` must be finite and positive, got {value}")]
    InvalidThreshold { name: &'static str, value: f64 },

    #[error("explicit {axis:?} size must be non-zero")]
    ZeroDimension { axis: Axis },

    #[error("rail size must be non-zero")]
    ZeroRailSize,
}

/// Owner-supplied overlay configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "policy-config",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct OverlayConfig {
    pub kind: OverlayKind,
    pub variant: Variant,
    pub anchor: Anchor,
    pub size: SizePreset,
    /// Explicit width in px. Drawers use it only for Left/Right anchors.
    pub width: Option<u32>,
    /// Explicit height in px. Drawers use it only for Top/Bottom anchors.
    pub height: Option<u32>,
    /// Anchor-axis size of a collapsed Mini panel.
    pub rail_size_px: u32,
    /// Substitute `mobile_variant` below `responsive_breakpoint`.
    pub responsive: bool,
    pub responsive_breakpoint: Breakpoint,
    pub mobile_variant: Variant,
    pub breakpoints: BreakpointTable,
    pub swipe_enabled: bool,
    pub swipe: SwipeThresholds,
    pub close_on_backdrop: bool,
    pub close_on_escape: bool,
    pub animation_duration_ms: u64,
    pub focus: FocusTrapOptions,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            kind: OverlayKind::Drawer,
            variant: Variant::Temporary,
            anchor: Anchor::Left,
            size: SizePreset::Standard,
            width: None,
            height: None,
            rail_size_px: DEFAULT_RAIL_SIZE_PX,
            responsive: false,
            responsive_breakpoint: Breakpoint::Md,
            mobile_variant: Variant::Temporary,
            breakpoints: BreakpointTable::default(),
            swipe_enabled: true,
            swipe: SwipeThresholds::default(),
            close_on_backdrop: true,
            close_on_escape: true,
            animation_duration_ms: DEFAULT_ANIMATION_DURATION_MS,
            focus: FocusTrapOptions::default(),
        }
    }
}

impl OverlayConfig {
    /// A Temporary drawer on `anchor`.
    #[must_use]
    pub fn drawer(anchor: Anchor) -> Self {
        Self {
            anchor,
            ..Self::default()
        }
    }

    /// A centered modal dialog.
    #[must_use]
    pub fn dialog() -> Self {
        Self {
            kind: OverlayKind::Dialog,
            swipe_enabled: false,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    #[must_use]
    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    #[must_use]
    pub fn size(mut self, size: SizePreset) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    #[must_use]
    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    #[must_use]
    pub fn rail_size(mut self, px: u32) -> Self {
        self.rail_size_px = px;
        self
    }

    /// Substitute `mobile_variant` when the viewport is below `breakpoint`.
    #[must_use]
    pub fn responsive(mut self, breakpoint: Breakpoint, mobile_variant: Variant) -> Self {
        self.responsive = true;
        self.responsive_breakpoint = breakpoint;
        self.mobile_variant = mobile_variant;
        self
    }

    #[must_use]
    pub fn breakpoints(mut self, table: BreakpointTable) -> Self {
        self.breakpoints = table;
        self
    }

    #[must_use]
    pub fn swipe_enabled(mut self, enabled: bool) -> Self {
        self.swipe_enabled = enabled;
        self
    }

    #[must_use]
    pub fn swipe_thresholds(mut self, thresholds: SwipeThresholds) -> Self {
        self.swipe = thresholds;
        self
    }

    #[must_use]
    pub fn close_on_backdrop(mut self, close: bool) -> Self {
        self.close_on_backdrop = close;
        self
    }

    #[must_use]
    pub fn close_on_escape(mut self, close: bool) -> Self {
        self.close_on_escape = close;
        self
    }

    #[must_use]
    pub fn animation_duration_ms(mut self, ms: u64) -> Self {
        self.animation_duration_ms = ms;
        self
    }

    #[must_use]
    pub fn focus(mut self, options: FocusTrapOptions) -> Self {
        self.focus = options;
        self
    }

    /// Whether the responsive substitution applies for `class`.
    #[must_use]
    pub fn is_mobile(&self, class: Option<Breakpoint>) -> bool {
        self.responsive && class.is_some_and(|c| c.is_below(self.responsive_breakpoint))
    }

    /// The variant in force for viewport `class`.
    ///
    /// Dialogs are always Temporary. With no known class the configured
    /// variant applies.
    #[must_use]
    pub fn effective_variant(&self, class: Option<Breakpoint>) -> Variant {
        match self.kind {
            OverlayKind::Dialog => Variant::Temporary,
            OverlayKind::Drawer if self.is_mobile(class) => self.mobile_variant,
            OverlayKind::Drawer => self.variant,
        }
    }

    /// Whether the overlay is modal for viewport `class`.
    #[must_use]
    pub fn is_modal(&self, class: Option<Breakpoint>) -> bool {
        self.effective_variant(class).is_modal()
    }

    /// Whether swipe recognition applies for viewport `class`.
    #[must_use]
    pub fn swipe_active(&self, class: Option<Breakpoint>) -> bool {
        self.swipe_enabled
            && self.kind == OverlayKind::Drawer
            && self.effective_variant(class) == Variant::Temporary
    }

    /// Check thresholds and explicit sizes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("distance_px", self.swipe.distance_px),
            ("velocity_px_per_ms", self.swipe.velocity_px_per_ms),
            ("edge_px", self.swipe.edge_px),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidThreshold { name, value });
            }
        }
        if self.swipe.timeout_ms == 0 {
            return Err(ConfigError::InvalidThreshold {
                name: "timeout_ms",
                value: 0.0,
            });
        }
        if self.width == Some(0) {
            return Err(ConfigError::ZeroDimension {
                axis: Axis::Horizontal,
            });
        }
        if self.height == Some(0) {
            return Err(ConfigError::ZeroDimension {
                axis: Axis::Vertical,
            });
        }
        if self.rail_size_px == 0 {
            return Err(ConfigError::ZeroRailSize);
        }
        Ok(())
    }
}

#[cfg(feature = "policy-config")]
impl OverlayConfig {
    /// Parse and validate a TOML policy.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON policy.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = OverlayConfig::default();
        assert_eq!(c.kind, OverlayKind::Drawer);
        assert_eq!(c.variant, Variant::Temporary);
        assert_eq!(c.anchor, Anchor::Left);
        assert_eq!(c.rail_size_px, 72);
        assert!(c.close_on_backdrop && c.close_on_escape && c.swipe_enabled);
        assert!(!c.responsive);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn dialog_preset_is_modal_and_unswipeable() {
        let c = OverlayConfig::dialog().variant(Variant::Persistent);
        assert_eq!(c.effective_variant(Some(Breakpoint::Xl)), Variant::Temporary);
        assert!(c.is_modal(None));
        assert!(!c.swipe_active(None));
    }

    #[test]
    fn responsive_substitution_is_read_time() {
        let c = OverlayConfig::drawer(Anchor::Left)
            .variant(Variant::Persistent)
            .responsive(Breakpoint::Md, Variant::Temporary);

        assert_eq!(c.effective_variant(Some(Breakpoint::Sm)), Variant::Temporary);
        assert_eq!(c.effective_variant(Some(Breakpoint::Md)), Variant::Persistent);
        assert_eq!(c.effective_variant(None), Variant::Persistent);
        assert_eq!(c.variant, Variant::Persistent);
        assert!(c.swipe_active(Some(Breakpoint::Xs)));
        assert!(!c.swipe_active(Some(Breakpoint::Lg)));
    }

    #[test]
    fn non_responsive_ignores_class() {
        let c = OverlayConfig::drawer(Anchor::Right).variant(Variant::Mini);
        assert_eq!(c.effective_variant(Some(Breakpoint::Xs)), Variant::Mini);
        assert!(!c.is_modal(Some(Breakpoint::Xs)));
    }

    #[test]
    fn validate_rejects_bad_values() {
        let bad_distance = OverlayConfig::default().swipe_thresholds(SwipeThresholds {
            distance_px: f64::NAN,
            ..SwipeThresholds::default()
        });
        assert!(matches!(
            bad_distance.validate(),
            Err(ConfigError::InvalidThreshold { name: "distance_px", .. })
        ));

        let bad_timeout = OverlayConfig::default().swipe_thresholds(SwipeThresholds {
            timeout_ms: 0,
            ..SwipeThresholds::default()
        });
        assert!(matches!(
            bad_timeout.validate(),
            Err(ConfigError::InvalidThreshold { name: "timeout_ms", .. })
        ));

        assert!(matches!(
            OverlayConfig::default().height(0).validate(),
            Err(ConfigError::ZeroDimension { axis: Axis::Vertical })
        ));
        assert!(matches!(
            OverlayConfig::default().rail_size(0).validate(),
            Err(ConfigError::ZeroRailSize)
        ));
    }

    #[test]
    fn error_messages() {
        let err = ConfigError::InvalidThreshold {
            name: "edge_px",
            value: -1.0,
        };
        assert_eq!(
            err.to_string(),
            "swipe threshold `edge_px` must be finite and positive, got -1"
        );
        assert_eq!(ConfigError::ZeroRailSize.to_string(), "rail size must be non-zero");
    }
}
