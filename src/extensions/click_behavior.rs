use gpui::{App, Window};

/// Settings that control what happens to a click after a component handled it.
///
/// By default handlers call `cx.stop_propagation()` and `window.prevent_default()`
/// so a chip inside a clickable card does not also click the card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClickBehavior {
    /// If true, `cx.stop_propagation()` will NOT be called.
    pub allow_propagation: bool,
    /// If true, `window.prevent_default()` will NOT be called.
    pub allow_default: bool,
}

impl ClickBehavior {
    /// Applies the settings to the current event.
    pub fn apply(&self, window: &mut Window, cx: &mut App) {
        if !self.allow_default {
            window.prevent_default();
        }
        if !self.allow_propagation {
            cx.stop_propagation();
        }
    }
}

/// Components whose click handling can opt out of the defaults of [`ClickBehavior`].
pub trait ClickBehaviorExt: Sized {
    fn click_behavior_mut(&mut self) -> &mut ClickBehavior;

    /// Lets the click bubble up to parent handlers.
    fn allow_click_propagation(mut self) -> Self {
        self.click_behavior_mut().allow_propagation = true;
        self
    }

    /// Keeps the platform default behavior for the click.
    fn allow_default_click_behaviour(mut self) -> Self {
        self.click_behavior_mut().allow_default = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Clickable(ClickBehavior);

    impl ClickBehaviorExt for Clickable {
        fn click_behavior_mut(&mut self) -> &mut ClickBehavior {
            &mut self.0
        }
    }

    #[test]
    fn test_click_behavior_defaults_stop_everything() {
        let behavior = ClickBehavior::default();
        assert!(!behavior.allow_propagation);
        assert!(!behavior.allow_default);
    }

    #[test]
    fn test_click_behavior_builders() {
        let clickable = Clickable(ClickBehavior::default())
            .allow_click_propagation()
            .allow_default_click_behaviour();

        assert_eq!(
            clickable.0,
            ClickBehavior {
                allow_propagation: true,
                allow_default: true
            }
        );
    }
}
