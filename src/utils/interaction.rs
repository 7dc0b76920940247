use gpui::{App, ElementId, Entity, FocusHandle, Window};

use crate::ElementIdExt;

/// Per-element pointer and focus state shared by the interactive components.
///
/// Every entity is keyed off the component id, so the state survives
/// re-renders as long as the id is stable.
#[derive(Clone)]
pub struct InteractionStates {
    pub hover: Entity<bool>,
    pub click_down: Entity<bool>,
    pub focus_handle: FocusHandle,
}

impl InteractionStates {
    pub fn use_keyed(id: &ElementId, window: &mut Window, cx: &mut App) -> Self {
        let hover = window.use_keyed_state(id.with_suffix("state:hover"), cx, |_window, _cx| false);

        let click_down =
            window.use_keyed_state(id.with_suffix("state:click_down"), cx, |_window, _cx| false);

        let focus_handle = window
            .use_keyed_state(id.with_suffix("state:focus_handle"), cx, |_window, cx| {
                cx.focus_handle().tab_stop(true)
            })
            .read(cx)
            .clone();

        Self {
            hover,
            click_down,
            focus_handle,
        }
    }

    pub fn is_hover(&self, cx: &App) -> bool {
        *self.hover.read(cx)
    }

    pub fn is_click_down(&self, cx: &App) -> bool {
        *self.click_down.read(cx)
    }

    pub fn is_focus(&self, window: &Window) -> bool {
        self.focus_handle.is_focused(window)
    }

    pub fn set_hover(&self, cx: &mut App, hover: bool) {
        self.hover.update(cx, |this, cx| {
            if *this != hover {
                *this = hover;
                cx.notify();
            }
        });
    }

    pub fn set_click_down(&self, cx: &mut App, click_down: bool) {
        self.click_down.update(cx, |this, cx| {
            if *this != click_down {
                *this = click_down;
                cx.notify();
            }
        });
    }

    /// Clears pointer state, e.g. after the mouse is released outside the element.
    pub fn reset_pointer(&self, cx: &mut App) {
        self.set_hover(cx, false);
        self.set_click_down(cx, false);
    }

    /// Disabled elements must not keep focus.
    pub fn blur_if_disabled(&self, window: &mut Window, disabled: bool) {
        if disabled && self.is_focus(window) {
            window.blur();
        }
    }
}
