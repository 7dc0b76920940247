#![allow(missing_docs)] // Derive macros generate undocumented methods.

use enum_assoc::Assoc;
use gpui::App;

use crate::theme::ThemeExt;

/// Text size variants that resolve to theme-defined values.
///
/// Use `resolve()` to get the actual `AbsoluteLength` from the current theme.
#[derive(Assoc, Clone, Copy, Debug, PartialEq, Eq)]
#[func(pub fn resolve(&self, cx: &App) -> gpui::AbsoluteLength)]
#[func(pub fn weight(&self, cx: &App) -> f32)]
pub enum ThemeTextSizeKind {
    /// Extra large heading text.
    #[assoc(resolve = cx.get_theme().layout.text.default_font.sizes.heading_xl)]
    #[assoc(weight = cx.get_theme().layout.text.default_font.weights.heading_xl)]
    Xl,
    /// Large heading text.
    #[assoc(resolve = cx.get_theme().layout.text.default_font.sizes.heading_lg)]
    #[assoc(weight = cx.get_theme().layout.text.default_font.weights.heading_lg)]
    Lg,
    /// Medium heading text.
    #[assoc(resolve = cx.get_theme().layout.text.default_font.sizes.heading_md)]
    #[assoc(weight = cx.get_theme().layout.text.default_font.weights.heading_md)]
    Md,
    /// Small heading text.
    #[assoc(resolve = cx.get_theme().layout.text.default_font.sizes.heading_sm)]
    #[assoc(weight = cx.get_theme().layout.text.default_font.weights.heading_sm)]
    Sm,
    /// Standard body text.
    #[assoc(resolve = cx.get_theme().layout.text.default_font.sizes.body)]
    #[assoc(weight = cx.get_theme().layout.text.default_font.weights.body)]
    Body,
    /// Small caption or label text.
    #[assoc(resolve = cx.get_theme().layout.text.default_font.sizes.caption)]
    #[assoc(weight = cx.get_theme().layout.text.default_font.weights.caption)]
    Caption,
}

/// Component size variants that resolve to theme-defined pixel values.
///
/// Each size has a corresponding corner radius for consistent styling.
#[derive(Assoc, Clone, Copy, Debug, PartialEq, Eq)]
#[func(pub fn resolve(&self, cx: &App) -> gpui::Pixels)]
#[func(pub fn corner_radii(&self) -> ThemeLayoutCornerRadiiKind)]
pub enum ThemeLayoutSizeKind {
    /// Extra large component size.
    #[assoc(resolve = cx.get_theme().layout.size.xl)]
    #[assoc(corner_radii = ThemeLayoutCornerRadiiKind::Xl)]
    Xl,
    /// Large component size.
    #[assoc(resolve = cx.get_theme().layout.size.lg)]
    #[assoc(corner_radii = ThemeLayoutCornerRadiiKind::Lg)]
    Lg,
    /// Medium component size.
    #[assoc(resolve = cx.get_theme().layout.size.md)]
    #[assoc(corner_radii = ThemeLayoutCornerRadiiKind::Md)]
    Md,
    /// Small component size.
    #[assoc(resolve = cx.get_theme().layout.size.sm)]
    #[assoc(corner_radii = ThemeLayoutCornerRadiiKind::Sm)]
    Sm,
}

/// Padding variants that resolve to theme-defined spacing values.
#[derive(Assoc, Clone, Copy, Debug, PartialEq, Eq)]
#[func(pub fn resolve(&self, cx: &App) -> gpui::Pixels)]
pub enum ThemeLayoutPaddingKind {
    #[assoc(resolve = cx.get_theme().layout.padding.xl)]
    Xl,
    #[assoc(resolve = cx.get_theme().layout.padding.lg)]
    Lg,
    #[assoc(resolve = cx.get_theme().layout.padding.md)]
    Md,
    #[assoc(resolve = cx.get_theme().layout.padding.sm)]
    Sm,
}

/// Corner radius variants that resolve to theme-defined values.
#[derive(Assoc, Clone, Copy, Debug, PartialEq, Eq)]
#[func(pub fn resolve(&self, cx: &App) -> gpui::Pixels)]
pub enum ThemeLayoutCornerRadiiKind {
    #[assoc(resolve = cx.get_theme().layout.corner_radii.xl)]
    Xl,
    #[assoc(resolve = cx.get_theme().layout.corner_radii.lg)]
    Lg,
    #[assoc(resolve = cx.get_theme().layout.corner_radii.md)]
    Md,
    #[assoc(resolve = cx.get_theme().layout.corner_radii.sm)]
    Sm,
}

/// Background color variants from the active theme variant.
#[derive(Assoc, Clone, Copy, Debug, PartialEq, Eq)]
#[func(pub fn resolve(&self, cx: &App) -> gpui::Rgba)]
pub enum ThemeBackgroundKind {
    /// Base background for main surfaces.
    #[assoc(resolve = cx.get_theme().variants.active(cx).colors.background.primary)]
    Primary,
    /// Slightly elevated or grouped content.
    #[assoc(resolve = cx.get_theme().variants.active(cx).colors.background.secondary)]
    Secondary,
    /// Further elevated elements.
    #[assoc(resolve = cx.get_theme().variants.active(cx).colors.background.tertiary)]
    Tertiary,
    /// High emphasis backgrounds.
    #[assoc(resolve = cx.get_theme().variants.active(cx).colors.background.quaternary)]
    Quaternary,
    /// Highest emphasis backgrounds.
    #[assoc(resolve = cx.get_theme().variants.active(cx).colors.background.quinary)]
    Quinary,
}

/// Background layers for stacking surfaces with visual hierarchy.
///
/// Similar to `ThemeBackgroundKind` but supports `next()` to get the
/// elevated layer color for nested elements.
#[derive(Assoc, Clone, Copy, Debug, PartialEq, Eq)]
#[func(pub fn resolve(&self, cx: &App) -> gpui::Rgba)]
#[func(pub fn next(&self) -> ThemeBackgroundKind)]
pub enum ThemeLayerKind {
    /// Base layer for main surfaces.
    #[assoc(resolve = cx.get_theme().variants.active(cx).colors.background.primary)]
    #[assoc(next = ThemeBackgroundKind::Secondary)]
    Primary,
    /// Second layer for grouped content.
    #[assoc(resolve = cx.get_theme().variants.active(cx).colors.background.secondary)]
    #[assoc(next = ThemeBackgroundKind::Tertiary)]
    Secondary,
    /// Third layer for elevated elements.
    #[assoc(resolve = cx.get_theme().variants.active(cx).colors.background.tertiary)]
    #[assoc(next = ThemeBackgroundKind::Quaternary)]
    Tertiary,
    /// Fourth layer for high emphasis.
    #[assoc(resolve = cx.get_theme().variants.active(cx).colors.background.quaternary)]
    #[assoc(next = ThemeBackgroundKind::Quinary)]
    Quaternary,
}

impl From<ThemeLayerKind> for ThemeBackgroundKind {
    fn from(layer: ThemeLayerKind) -> Self {
        match layer {
            ThemeLayerKind::Primary => ThemeBackgroundKind::Primary,
            ThemeLayerKind::Secondary => ThemeBackgroundKind::Secondary,
            ThemeLayerKind::Tertiary => ThemeBackgroundKind::Tertiary,
            ThemeLayerKind::Quaternary => ThemeBackgroundKind::Quaternary,
        }
    }
}

/// Semantic accent colors shared by chips, spinners, toggles and alerts.
#[derive(Assoc, Clone, Copy, Debug, PartialEq, Eq)]
#[func(pub fn resolve(&self, cx: &App) -> gpui::Rgba)]
pub enum ThemeAccentKind {
    #[assoc(resolve = cx.get_theme().variants.active(cx).colors.accent.primary)]
    Primary,
    #[assoc(resolve = cx.get_theme().variants.active(cx).colors.accent.secondary)]
    Secondary,
    /// Success and confirmation.
    #[assoc(resolve = cx.get_theme().variants.active(cx).colors.accent.constructive)]
    Constructive,
    /// Errors and destructive actions.
    #[assoc(resolve = cx.get_theme().variants.active(cx).colors.accent.destructive)]
    Destructive,
    #[assoc(resolve = cx.get_theme().variants.active(cx).colors.accent.warning)]
    Warning,
    #[assoc(resolve = cx.get_theme().variants.active(cx).colors.accent.info)]
    Info,
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use crate::theme::{Theme, ThemeExt};
    use gpui::TestAppContext;

    #[gpui::test]
    fn test_theme_layout_size_kind_corner_radii(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            assert_eq!(
                ThemeLayoutSizeKind::Xl.corner_radii(),
                ThemeLayoutCornerRadiiKind::Xl
            );
            assert_eq!(
                ThemeLayoutSizeKind::Lg.corner_radii(),
                ThemeLayoutCornerRadiiKind::Lg
            );
            assert_eq!(
                ThemeLayoutSizeKind::Md.corner_radii(),
                ThemeLayoutCornerRadiiKind::Md
            );
            assert_eq!(
                ThemeLayoutSizeKind::Sm.corner_radii(),
                ThemeLayoutCornerRadiiKind::Sm
            );
        });
    }

    #[gpui::test]
    fn test_theme_layer_kind_next(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            assert_eq!(
                ThemeLayerKind::Primary.next(),
                ThemeBackgroundKind::Secondary
            );
            assert_eq!(
                ThemeLayerKind::Secondary.next(),
                ThemeBackgroundKind::Tertiary
            );
            assert_eq!(
                ThemeLayerKind::Tertiary.next(),
                ThemeBackgroundKind::Quaternary
            );
            assert_eq!(
                ThemeLayerKind::Quaternary.next(),
                ThemeBackgroundKind::Quinary
            );
        });
    }

    #[gpui::test]
    fn test_theme_layer_kind_into_background_kind(cx: &mut TestAppContext) {
        cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);

            for layer in [
                ThemeLayerKind::Primary,
                ThemeLayerKind::Secondary,
                ThemeLayerKind::Tertiary,
                ThemeLayerKind::Quaternary,
            ] {
                let background: ThemeBackgroundKind = layer.into();
                assert_eq!(layer.resolve(cx), background.resolve(cx));
            }
        });
    }

    #[gpui::test]
    fn test_accent_kinds_resolve_to_theme_accents(cx: &mut TestAppContext) {
        cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);
            let accent = cx.get_theme().variants.active(cx).colors.accent.clone();

            assert_eq!(ThemeAccentKind::Primary.resolve(cx), accent.primary);
            assert_eq!(ThemeAccentKind::Destructive.resolve(cx), accent.destructive);
            assert_eq!(ThemeAccentKind::Warning.resolve(cx), accent.warning);
            assert_eq!(ThemeAccentKind::Info.resolve(cx), accent.info);
        });
    }

    #[gpui::test]
    fn test_size_padding_and_radii_ordering(cx: &mut TestAppContext) {
        cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);

            let sizes = [
                ThemeLayoutSizeKind::Sm,
                ThemeLayoutSizeKind::Md,
                ThemeLayoutSizeKind::Lg,
                ThemeLayoutSizeKind::Xl,
            ]
            .map(|kind| kind.resolve(cx));
            assert!(sizes.windows(2).all(|pair| pair[0] <= pair[1]));

            let padding = [
                ThemeLayoutPaddingKind::Sm,
                ThemeLayoutPaddingKind::Md,
                ThemeLayoutPaddingKind::Lg,
                ThemeLayoutPaddingKind::Xl,
            ]
            .map(|kind| kind.resolve(cx));
            assert!(padding.windows(2).all(|pair| pair[0] <= pair[1]));

            let radii = [
                ThemeLayoutCornerRadiiKind::Sm,
                ThemeLayoutCornerRadiiKind::Md,
                ThemeLayoutCornerRadiiKind::Lg,
                ThemeLayoutCornerRadiiKind::Xl,
            ]
            .map(|kind| kind.resolve(cx));
            assert!(radii.windows(2).all(|pair| pair[0] <= pair[1]));
        });
    }

    #[gpui::test]
    fn test_text_size_kinds_have_weights(cx: &mut TestAppContext) {
        cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);

            assert!(ThemeTextSizeKind::Xl.weight(cx) >= ThemeTextSizeKind::Body.weight(cx));
            let _ = ThemeTextSizeKind::Caption.resolve(cx);
        });
    }
}
