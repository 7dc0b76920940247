use gpui::{AnyElement, StyleRefinement, div, prelude::*};
use smallvec::SmallVec;

use crate::theme::{ThemeExt, ThemeTextSizeKind};

/// A `min-width: 0` text container so labels inside flex rows truncate
/// instead of pushing their parent wider.
///
/// Font family, size and color fall back to the theme body text when unset.
#[derive(IntoElement)]
pub struct MinW0Wrapper {
    children: SmallVec<[AnyElement; 2]>,
    style: StyleRefinement,
    text_kind: ThemeTextSizeKind,
}

impl MinW0Wrapper {
    pub fn new() -> Self {
        Self {
            children: SmallVec::new(),
            style: StyleRefinement::default().w_auto().h_auto().min_w_0(),
            text_kind: ThemeTextSizeKind::Body,
        }
    }

    /// Picks the theme text size and weight used when none is set explicitly.
    pub fn text_kind(mut self, kind: ThemeTextSizeKind) -> Self {
        self.text_kind = kind;
        self
    }
}

impl Default for MinW0Wrapper {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderOnce for MinW0Wrapper {
    fn render(self, _window: &mut gpui::Window, cx: &mut gpui::App) -> impl IntoElement {
        let mut style = self.style;
        let font = &cx.get_theme().layout.text.default_font;

        style
            .text
            .font_family
            .get_or_insert_with(|| font.family[0].clone());

        if style.text.font_size.is_none() {
            style.text.font_size = Some(self.text_kind.resolve(cx).into());
        }

        if style.text.font_weight.is_none() {
            style.text.font_weight = Some(gpui::FontWeight(self.text_kind.weight(cx)));
        }

        style.text.color.get_or_insert_with(|| {
            cx.get_theme()
                .variants
                .active(cx)
                .colors
                .text
                .secondary
                .into()
        });

        div()
            .map(|mut this| {
                this.style().refine(&style);
                this
            })
            .children(self.children)
    }
}

impl ParentElement for MinW0Wrapper {
    fn extend(&mut self, elements: impl IntoIterator<Item = AnyElement>) {
        self.children.extend(elements);
    }
}

impl Styled for MinW0Wrapper {
    fn style(&mut self) -> &mut StyleRefinement {
        &mut self.style
    }
}

pub fn min_w0_wrapper() -> MinW0Wrapper {
    MinW0Wrapper::new()
}
