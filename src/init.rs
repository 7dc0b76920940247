use gpui::{App, Window};

use crate::{components, extensions::dismiss, theme::ThemeExt};

/// Registers the key bindings every component relies on.
pub fn init(cx: &mut App) {
    gpui_primitives::input::init(cx);
    dismiss::init(cx);
    components::init(cx);
}

pub fn init_for_window(window: &mut Window, cx: &mut App) {
    window.set_rem_size(cx.get_theme().layout.text.base_size);
}
