use gpui::{App, ElementId, Entity, FocusHandle, Window};

use crate::utils::ElementIdExt;

/// Keyed bookkeeping for handing focus to an overlay and back.
#[derive(Default)]
pub(crate) struct FocusMemory {
    is_open: bool,
    previous: Option<FocusHandle>,
}

impl FocusMemory {
    pub(crate) fn use_keyed(id: &ElementId, window: &mut Window, cx: &mut App) -> Entity<Self> {
        window.use_keyed_state(id.with_suffix("state:focus_memory"), cx, |_window, _cx| {
            FocusMemory::default()
        })
    }
}

/// How an overlay treats focus while it opens and closes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct FocusHandoff {
    pub auto_focus: bool,
    pub restore_focus: bool,
}

impl Default for FocusHandoff {
    fn default() -> Self {
        Self {
            auto_focus: true,
            restore_focus: true,
        }
    }
}

/// Focuses `focus_handle` when `open` becomes true and gives focus back to
/// whatever held it before once `open` becomes false.
pub(crate) fn sync_overlay_focus(
    memory: &Entity<FocusMemory>,
    open: bool,
    focus_handle: &FocusHandle,
    handoff: FocusHandoff,
    window: &mut Window,
    cx: &mut App,
) {
    let was_open = memory.read(cx).is_open;

    if open && !was_open {
        let previous = window.focused(cx).filter(|previous| previous != focus_handle);

        if handoff.auto_focus {
            focus_handle.focus(window, cx);
        }

        memory.update(cx, |memory, _cx| {
            memory.is_open = true;
            memory.previous = previous;
        });
    } else if !open && was_open {
        let previous = memory.update(cx, |memory, _cx| {
            memory.is_open = false;
            memory.previous.take()
        });

        if handoff.restore_focus
            && let Some(previous) = previous
        {
            previous.focus(window, cx);
        }
    }
}
