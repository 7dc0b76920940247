use gpui::App;

use crate::theme::{ActiveVariantId, Theme, ThemeVariantKind};

/// Extension trait for accessing and modifying the global theme.
pub trait ThemeExt {
    /// Changes the theme.
    ///
    /// The active variant is kept when the new theme has it, otherwise the
    /// first variant becomes active.
    fn set_theme<T: AsRef<Theme>>(&mut self, theme: T);

    /// Gets an immutable reference to the theme.
    fn get_theme(&self) -> &Theme;

    /// Switches the active variant to the first one of the given kind.
    /// Returns false when the theme has no variant of that kind.
    fn set_theme_variant(&mut self, kind: ThemeVariantKind) -> bool;
}

impl ThemeExt for App {
    fn set_theme<T: AsRef<Theme>>(&mut self, theme: T) {
        let theme = theme.as_ref().clone();
        let variant_count = theme.variants.variants.len();

        tracing::debug!(theme = %theme.name, variant_count, "setting theme");

        self.set_global::<Theme>(theme);

        let active = self.default_global::<ActiveVariantId>();
        if active.0 >= variant_count {
            active.0 = 0;
        }
    }

    fn get_theme(&self) -> &Theme {
        self.global()
    }

    fn set_theme_variant(&mut self, kind: ThemeVariantKind) -> bool {
        let Some(index) = self.get_theme().variants.position(kind) else {
            tracing::warn!(?kind, "theme has no variant of this kind");
            return false;
        };

        self.set_global(ActiveVariantId(index));
        self.refresh_windows();
        true
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use gpui::TestAppContext;

    #[gpui::test]
    fn test_set_and_get_theme(cx: &mut TestAppContext) {
        cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);
            let theme = cx.get_theme();
            assert!(!theme.name.is_empty(), "Theme should have a name");
        });
    }

    #[gpui::test]
    fn test_set_theme_installs_active_variant(cx: &mut TestAppContext) {
        cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);
            assert_eq!(cx.global::<ActiveVariantId>().0, 0);
        });
    }

    #[gpui::test]
    fn test_set_theme_variant_switches_kind(cx: &mut TestAppContext) {
        cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);

            assert!(cx.set_theme_variant(ThemeVariantKind::Light));
            let active = cx.get_theme().variants.active(cx);
            assert_eq!(active.kind, ThemeVariantKind::Light);

            assert!(cx.set_theme_variant(ThemeVariantKind::Dark));
            let active = cx.get_theme().variants.active(cx);
            assert_eq!(active.kind, ThemeVariantKind::Dark);
        });
    }

    #[gpui::test]
    fn test_set_theme_resets_out_of_range_variant(cx: &mut TestAppContext) {
        cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);
            cx.set_global(ActiveVariantId(7));

            cx.set_theme(Theme::DEFAULT);
            assert_eq!(cx.global::<ActiveVariantId>().0, 0);
        });
    }

    #[gpui::test]
    fn test_theme_has_ordered_layout(cx: &mut TestAppContext) {
        cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);
            let layout = &cx.get_theme().layout;

            assert!(layout.size.sm > gpui::px(0.), "Size sm should be positive");
            assert!(layout.size.sm <= layout.size.md);
            assert!(layout.size.md <= layout.size.lg);
            assert!(layout.size.lg <= layout.size.xl);

            assert!(layout.padding.sm >= gpui::px(0.));
            assert!(layout.corner_radii.sm >= gpui::px(0.));
        });
    }

    #[gpui::test]
    fn test_theme_variant_has_visible_colors(cx: &mut TestAppContext) {
        cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);
            let active = cx.get_theme().variants.active(cx);

            let (primary, secondary) = active.colors.text.all();
            assert!(primary.a > 0.0, "Primary text color should be visible");
            assert!(secondary.a > 0.0, "Secondary text color should be visible");
            assert!(active.colors.accent.primary.a > 0.0);
            assert!(active.colors.accent.destructive.a > 0.0);
            assert!(active.colors.presence.online.a > 0.0);
        });
    }

    #[gpui::test]
    fn test_theme_from_json_reports_errors(_cx: &mut TestAppContext) {
        let result = Theme::from_json("{ \"name\": \"broken\" }");
        assert!(result.is_err(), "Incomplete theme should fail to parse");
    }
}
