use gpui::{App, ElementId, IntoElement, RenderOnce, SharedString, Window};

use super::text_input::{RowRange, forward_text_input_setters};
use crate::components::input_field::{TextInput, TextInputKind};

pub const DEFAULT_TEXTAREA_MIN_ROWS: usize = 3;

/// Resolves the visible line range. A fixed `rows` wins over the
/// `min_rows..=max_rows` clamp; a missing `max_rows` lets the field grow.
pub(crate) fn visible_rows(
    rows: Option<usize>,
    min_rows: usize,
    max_rows: Option<usize>,
) -> RowRange {
    match rows {
        Some(rows) => {
            let rows = rows.max(1);
            RowRange {
                min: rows,
                max: Some(rows),
            }
        }
        None => {
            let min = min_rows.max(1);
            RowRange {
                min,
                max: max_rows.map(|max| max.max(min)),
            }
        }
    }
}

/// A multi-line [`TextInput`].
#[derive(IntoElement)]
pub struct Textarea {
    input: TextInput,
    rows: Option<usize>,
    min_rows: usize,
    max_rows: Option<usize>,
}

impl Textarea {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self::from_input(
            TextInput::new(id, TextInputKind::Text),
            None,
            DEFAULT_TEXTAREA_MIN_ROWS,
            None,
        )
    }

    pub(crate) fn from_input(
        input: TextInput,
        rows: Option<usize>,
        min_rows: usize,
        max_rows: Option<usize>,
    ) -> Self {
        Self {
            input,
            rows,
            min_rows,
            max_rows,
        }
    }

    /// Fixes the height to exactly this many lines.
    pub fn rows(mut self, rows: usize) -> Self {
        self.rows = Some(rows);
        self
    }

    pub fn min_rows(mut self, min_rows: usize) -> Self {
        self.min_rows = min_rows;
        self
    }

    pub fn max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = Some(max_rows);
        self
    }

    pub fn on_change(
        mut self,
        on_change: impl Fn(&SharedString, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.input = self.input.on_change(on_change);
        self
    }
}

forward_text_input_setters!(Textarea);

impl RenderOnce for Textarea {
    fn render(self, _window: &mut Window, _cx: &mut App) -> impl IntoElement {
        self.input
            .rows(visible_rows(self.rows, self.min_rows, self.max_rows))
    }
}

#[cfg(test)]
mod pure_tests {
    use super::*;

    #[test]
    fn test_fixed_rows_win() {
        assert_eq!(
            visible_rows(Some(5), 3, Some(8)),
            RowRange {
                min: 5,
                max: Some(5)
            }
        );
    }

    #[test]
    fn test_min_and_max_rows_clamp() {
        assert_eq!(
            visible_rows(None, DEFAULT_TEXTAREA_MIN_ROWS, None),
            RowRange { min: 3, max: None }
        );
        assert_eq!(
            visible_rows(None, 2, Some(6)),
            RowRange {
                min: 2,
                max: Some(6)
            }
        );
        // A max below the min is raised to it.
        assert_eq!(
            visible_rows(None, 4, Some(2)),
            RowRange {
                min: 4,
                max: Some(4)
            }
        );
        assert_eq!(visible_rows(Some(0), 3, None).min, 1);
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use crate::{components::input_field::FieldChromeExt, theme::Theme, theme::ThemeExt};
    use gpui::{
        AppContext, Context, ParentElement, Render, Styled, TestAppContext, VisualTestContext, div,
    };

    struct TextareaView;

    impl Render for TextareaView {
        fn render(&mut self, _window: &mut Window, _cx: &mut Context<Self>) -> impl IntoElement {
            div().size_full().child(
                Textarea::new("notes")
                    .label("Notes")
                    .placeholder("Write something")
                    .default_value("line one\nline two")
                    .max_rows(6),
            )
        }
    }

    #[gpui::test]
    fn test_textarea_renders(cx: &mut TestAppContext) {
        let window = cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);
            crate::init(cx);
            cx.open_window(Default::default(), |_window, cx| cx.new(|_cx| TextareaView))
                .unwrap()
        });

        let mut vcx = VisualTestContext::from_window(window.into(), cx);
        vcx.run_until_parked();
    }

    #[gpui::test]
    fn test_textarea_builder(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            let textarea = Textarea::new("notes").rows(4).min_rows(1).max_rows(9);
            assert_eq!(textarea.rows, Some(4));
            assert_eq!(textarea.min_rows, 1);
            assert_eq!(textarea.max_rows, Some(9));
        });
    }
}
