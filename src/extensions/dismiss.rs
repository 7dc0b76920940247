use gpui::{App, KeyBinding, actions};

actions!(overlay, [Dismiss]);

/// Key contexts whose `escape` closes the overlay.
pub const DISMISS_CONTEXTS: [&str; 3] = ["Modal", "Popover", "Snackbar"];

pub(crate) fn init(cx: &mut App) {
    cx.bind_keys(
        DISMISS_CONTEXTS
            .into_iter()
            .map(|context| KeyBinding::new("escape", Dismiss, Some(context))),
    );
}
