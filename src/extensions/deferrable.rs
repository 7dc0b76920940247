use gpui::{
    Anchored, AnchoredPositionMode, AnyElement, IntoElement, ParentElement, anchored, deferred,
    point, px,
};

/// Paint order of the built-in overlays. Higher values are painted later,
/// so a select menu opened inside a modal stays above it.
pub mod priority {
    pub const MODAL: usize = 1;
    pub const POPOVER: usize = 2;
    pub const SELECT_MENU: usize = 3;
    pub const SNACKBAR: usize = 4;
}

/// Configuration for deferred rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeferredConfig {
    pub enabled: bool,
    /// Overrides the component's default priority.
    pub priority: Option<usize>,
}

impl Default for DeferredConfig {
    fn default() -> Self {
        Self::enabled()
    }
}

impl DeferredConfig {
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            priority: None,
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            priority: None,
        }
    }

    pub fn priority(priority: usize) -> Self {
        Self {
            enabled: true,
            priority: Some(priority),
        }
    }
}

/// A component that draws itself after its siblings.
///
/// Overlays wrap their outermost element with [`Deferrable::apply_deferred`]
/// instead of relying on a dedicated root view.
pub trait Deferrable: Sized {
    const DEFAULT_PRIORITY: usize = 0;

    fn deferred_config(&self) -> &DeferredConfig;

    fn deferred_config_mut(&mut self) -> &mut DeferredConfig;

    fn deferred(mut self, enabled: bool) -> Self {
        self.deferred_config_mut().enabled = enabled;
        self
    }

    fn deferred_priority(mut self, priority: usize) -> Self {
        self.deferred_config_mut().priority = Some(priority);
        self
    }

    fn resolved_priority(&self) -> usize {
        self.deferred_config()
            .priority
            .unwrap_or(Self::DEFAULT_PRIORITY)
    }

    fn apply_deferred(&self, element: impl IntoElement) -> AnyElement {
        if self.deferred_config().enabled {
            deferred(element)
                .priority(self.resolved_priority())
                .into_any_element()
        } else {
            element.into_any_element()
        }
    }
}

/// Pins `element` to the window's top-left corner, outside of its parent's layout.
///
/// Overlays size the pinned element to `window.viewport_size()` and place
/// their content inside it.
pub fn pin_to_window(element: impl IntoElement) -> Anchored {
    anchored()
        .position_mode(AnchoredPositionMode::Window)
        .position(point(px(0.), px(0.)))
        .child(element)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Overlay(DeferredConfig);

    impl Deferrable for Overlay {
        const DEFAULT_PRIORITY: usize = priority::MODAL;

        fn deferred_config(&self) -> &DeferredConfig {
            &self.0
        }

        fn deferred_config_mut(&mut self) -> &mut DeferredConfig {
            &mut self.0
        }
    }

    #[test]
    fn test_default_priority_is_used_without_override() {
        let overlay = Overlay(DeferredConfig::default());
        assert_eq!(overlay.resolved_priority(), priority::MODAL);

        let overlay = overlay.deferred_priority(9);
        assert_eq!(overlay.resolved_priority(), 9);
    }

    #[test]
    fn test_deferred_toggle() {
        let overlay = Overlay(DeferredConfig::priority(2)).deferred(false);
        assert!(!overlay.0.enabled);
        assert_eq!(
            overlay.0,
            DeferredConfig {
                enabled: false,
                priority: Some(2)
            }
        );
        assert_eq!(DeferredConfig::disabled().priority, None);
    }

    #[test]
    fn test_overlay_priorities_are_ordered() {
        assert!(priority::MODAL < priority::POPOVER);
        assert!(priority::POPOVER < priority::SELECT_MENU);
        assert!(priority::SELECT_MENU < priority::SNACKBAR);
    }
}
