use gpui::{App, ElementId, IntoElement, RenderOnce, SharedString, Window};

use super::text_input::{RowRange, forward_text_input_setters};
use crate::components::input_field::{TextInput, TextInputKind};

pub const DEFAULT_RICH_EDITOR_MIN_ROWS: usize = 4;
pub const DEFAULT_RICH_EDITOR_MAX_ROWS: usize = 10;
pub const DEFAULT_RICH_EDITOR_PLACEHOLDER: &str = "Start typing...";

/// A monospace, multi-line editor for longer free-form text.
#[derive(IntoElement)]
pub struct RichEditor {
    input: TextInput,
    min_rows: usize,
    max_rows: usize,
}

impl RichEditor {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self::from_input(
            TextInput::new(id, TextInputKind::Text),
            DEFAULT_RICH_EDITOR_MIN_ROWS,
            DEFAULT_RICH_EDITOR_MAX_ROWS,
        )
    }

    pub(crate) fn from_input(input: TextInput, min_rows: usize, max_rows: usize) -> Self {
        Self {
            input,
            min_rows,
            max_rows,
        }
    }

    pub fn min_rows(mut self, min_rows: usize) -> Self {
        self.min_rows = min_rows;
        self
    }

    pub fn max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = max_rows;
        self
    }

    pub fn on_change(
        mut self,
        on_change: impl Fn(&SharedString, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.input = self.input.on_change(on_change);
        self
    }

    fn row_range(&self) -> RowRange {
        let min = self.min_rows.max(1);
        RowRange {
            min,
            max: Some(self.max_rows.max(min)),
        }
    }
}

forward_text_input_setters!(RichEditor);

impl RenderOnce for RichEditor {
    fn render(self, _window: &mut Window, _cx: &mut App) -> impl IntoElement {
        let rows = self.row_range();

        self.input
            .monospace(true)
            .placeholder_or(DEFAULT_RICH_EDITOR_PLACEHOLDER)
            .rows(rows)
    }
}
