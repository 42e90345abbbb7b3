#![forbid(unsafe_code)]

//! Panel size and position resolution.
//!
//! [`resolve`] is a pure function of the config, the collapsed flag, and
//! the viewport class. It never fails: missing fields fall back to preset
//! tables.
//!
//! # Drawer resolution
//!
//! ```text
//! Mini && collapsed          → anchor axis = rail_size_px
//! explicit size on the axis  → anchor axis = explicit (verbatim)
//! otherwise                  → anchor axis = preset table[anchor axis]
//! cross axis                 → Fill
//! ```
//!
//! | Preset   | Left/Right width | Top/Bottom height |
//! |----------|------------------|-------------------|
//! | Compact  | 240              | 160               |
//! | Standard | 280              | 240               |
//! | Wide     | 360              | 320               |
//! | Auto     | content          | content           |
//!
//! # Dialog resolution
//!
//! Centered; width is the explicit width or the preset's max width
//! (Compact 444, Standard 600, Wide 900, Auto content), height is the
//! explicit height or content. Responsive dialogs below the breakpoint go
//! full screen.

use overlay_core::{Anchor, Axis, Breakpoint};

use crate::config::{OverlayConfig, OverlayKind, SizePreset, Variant};

/// One resolved panel dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// Fixed size in px.
    Px(u32),
    /// 100% of the available space.
    Fill,
    /// Sized by content.
    Auto,
}

/// Where the panel sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelPosition {
    /// Attached to a viewport edge.
    Edge(Anchor),
    /// Centered in the viewport.
    Centered,
}

/// Concrete panel geometry handed to the view layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PanelGeometry {
    pub width: Dimension,
    pub height: Dimension,
    pub position: PanelPosition,
}

impl SizePreset {
    /// Drawer extent along `axis` for this preset.
    #[must_use]
    pub const fn drawer_extent(self, axis: Axis) -> Dimension {
        match (self, axis) {
            (Self::Compact, Axis::Horizontal) => Dimension::Px(240),
            (Self::Standard, Axis::Horizontal) => Dimension::Px(280),
            (Self::Wide, Axis::Horizontal) => Dimension::Px(360),
            (Self::Compact, Axis::Vertical) => Dimension::Px(160),
            (Self::Standard, Axis::Vertical) => Dimension::Px(240),
            (Self::Wide, Axis::Vertical) => Dimension::Px(320),
            (Self::Auto, _) => Dimension::Auto,
        }
    }

    /// Dialog max width for this preset.
    #[must_use]
    pub const fn dialog_width(self) -> Dimension {
        match self {
            Self::Compact => Dimension::Px(444),
            Self::Standard => Dimension::Px(600),
            Self::Wide => Dimension::Px(900),
            Self::Auto => Dimension::Auto,
        }
    }
}

/// Resolve panel geometry.
///
/// `collapsed` only matters when the effective variant is Mini.
#[must_use]
pub fn resolve(
    config: &OverlayConfig,
    collapsed: bool,
    viewport: Option<Breakpoint>,
) -> PanelGeometry {
    match config.kind {
        OverlayKind::Drawer => resolve_drawer(config, collapsed, viewport),
        OverlayKind::Dialog => resolve_dialog(config, viewport),
    }
}

fn resolve_drawer(
    config: &OverlayConfig,
    collapsed: bool,
    viewport: Option<Breakpoint>,
) -> PanelGeometry {
    let axis = config.anchor.axis();
    let explicit = match axis {
        Axis::Horizontal => config.width,
        Axis::Vertical => config.height,
    };

    let variant = config.effective_variant(viewport);
    let extent = if variant == Variant::Mini && collapsed {
        Dimension::Px(config.rail_size_px)
    } else if let Some(px) = explicit {
        Dimension::Px(px)
    } else {
        config.size.drawer_extent(axis)
    };

    let (width, height) = match axis {
        Axis::Horizontal => (extent, Dimension::Fill),
        Axis::Vertical => (Dimension::Fill, extent),
    };
    PanelGeometry {
        width,
        height,
        position: PanelPosition::Edge(config.anchor),
    }
}

fn resolve_dialog(config: &OverlayConfig, viewport: Option<Breakpoint>) -> PanelGeometry {
    if config.is_mobile(viewport) {
        return PanelGeometry {
            width: Dimension::Fill,
            height: Dimension::Fill,
            position: PanelPosition::Centered,
        };
    }
    PanelGeometry {
        width: config
            .width
            .map_or_else(|| config.size.dialog_width(), Dimension::Px),
        height: config.height.map_or(Dimension::Auto, Dimension::Px),
        position: PanelPosition::Centered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn drawer_presets_per_anchor() {
        let left = resolve(&OverlayConfig::drawer(Anchor::Left), false, None);
        assert_eq!(left.width, Dimension::Px(280));
        assert_eq!(left.height, Dimension::Fill);
        assert_eq!(left.position, PanelPosition::Edge(Anchor::Left));

        let bottom = resolve(
            &OverlayConfig::drawer(Anchor::Bottom).size(SizePreset::Wide),
            false,
            None,
        );
        assert_eq!(bottom.width, Dimension::Fill);
        assert_eq!(bottom.height, Dimension::Px(320));

        let auto = resolve(
            &OverlayConfig::drawer(Anchor::Right).size(SizePreset::Auto),
            false,
            None,
        );
        assert_eq!(auto.width, Dimension::Auto);
    }

    #[test]
    fn explicit_size_only_on_anchor_axis() {
        let c = OverlayConfig::drawer(Anchor::Right).width(333).height(99);
        let g = resolve(&c, false, None);
        assert_eq!(g.width, Dimension::Px(333));
        assert_eq!(g.height, Dimension::Fill);

        let c = OverlayConfig::drawer(Anchor::Top).width(333);
        let g = resolve(&c, false, None);
        assert_eq!(g.width, Dimension::Fill);
        assert_eq!(g.height, Dimension::Px(240));
    }

    #[test]
    fn collapsed_mini_uses_rail() {
        let c = OverlayConfig::drawer(Anchor::Left)
            .variant(Variant::Mini)
            .width(400);
        assert_eq!(resolve(&c, true, None).width, Dimension::Px(72));
        assert_eq!(resolve(&c, false, None).width, Dimension::Px(400));
        assert_eq!(resolve(&c, true, None).height, Dimension::Fill);
    }

    #[test]
    fn collapsed_ignored_outside_mini() {
        let c = OverlayConfig::drawer(Anchor::Left).variant(Variant::Persistent);
        assert_eq!(resolve(&c, true, None), resolve(&c, false, None));
    }

    #[test]
    fn responsive_mini_becomes_temporary_below_breakpoint() {
        let c = OverlayConfig::drawer(Anchor::Left)
            .variant(Variant::Mini)
            .responsive(Breakpoint::Md, Variant::Temporary);
        assert_eq!(resolve(&c, true, Some(Breakpoint::Lg)).width, Dimension::Px(72));
        assert_eq!(resolve(&c, true, Some(Breakpoint::Xs)).width, Dimension::Px(280));
    }

    #[test]
    fn dialog_sizes() {
        let g = resolve(&OverlayConfig::dialog(), false, None);
        assert_eq!(g.width, Dimension::Px(600));
        assert_eq!(g.height, Dimension::Auto);
        assert_eq!(g.position, PanelPosition::Centered);

        let g = resolve(
            &OverlayConfig::dialog().size(SizePreset::Compact).height(300),
            false,
            None,
        );
        assert_eq!(g.width, Dimension::Px(444));
        assert_eq!(g.height, Dimension::Px(300));

        let g = resolve(&OverlayConfig::dialog().width(512), false, None);
        assert_eq!(g.width, Dimension::Px(512));
    }

    #[test]
    fn responsive_dialog_goes_full_screen() {
        let c = OverlayConfig::dialog().responsive(Breakpoint::Sm, Variant::Temporary);
        let g = resolve(&c, false, Some(Breakpoint::Xs));
        assert_eq!((g.width, g.height), (Dimension::Fill, Dimension::Fill));
        assert_eq!(resolve(&c, false, Some(Breakpoint::Sm)).width, Dimension::Px(600));
    }

    fn anchor_strategy() -> impl Strategy<Value = Anchor> {
        prop_oneof![
            Just(Anchor::Left),
            Just(Anchor::Right),
            Just(Anchor::Top),
            Just(Anchor::Bottom),
        ]
    }

    fn preset_strategy() -> impl Strategy<Value = SizePreset> {
        prop_oneof![
            Just(SizePreset::Compact),
            Just(SizePreset::Standard),
            Just(SizePreset::Wide),
            Just(SizePreset::Auto),
        ]
    }

    proptest! {
        #[test]
        fn resolve_is_deterministic(
            anchor in anchor_strategy(),
            preset in preset_strategy(),
            width in proptest::option::of(1u32..2000),
            height in proptest::option::of(1u32..2000),
            collapsed in any::<bool>(),
            class in proptest::option::of(proptest::sample::select(Breakpoint::ALL.to_vec())),
        ) {
            let mut c = OverlayConfig::drawer(anchor).size(preset);
            c.width = width;
            c.height = height;
            prop_assert_eq!(resolve(&c, collapsed, class), resolve(&c, collapsed, class));
        }

        #[test]
        fn collapsed_mini_ignores_preset(
            anchor in anchor_strategy(),
            a in preset_strategy(),
            b in preset_strategy(),
            rail in 1u32..200,
        ) {
            let base = OverlayConfig::drawer(anchor).variant(Variant::Mini).rail_size(rail);
            let ga = resolve(&base.clone().size(a), true, None);
            let gb = resolve(&base.size(b), true, None);
            prop_assert_eq!(ga, gb);
            let extent = match anchor.axis() {
                Axis::Horizontal => ga.width,
                Axis::Vertical => ga.height,
            };
            prop_assert_eq!(extent, Dimension::Px(rail));
        }
    }
}
