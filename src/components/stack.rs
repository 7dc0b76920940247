use gpui::{
    AnyElement, App, IntoElement, ParentElement, Pixels, RenderOnce, StyleRefinement, Styled,
    Window, div, prelude::FluentBuilder, px,
};
use smallvec::SmallVec;

const SPACING_UNIT: Pixels = px(8.);
const ALLOWED_SPACING: [u8; 5] = [2, 4, 6, 8, 10];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StackDirection {
    Row,
    #[default]
    Column,
}

/// Snaps a spacing value to the closest allowed step. Ties go to the smaller step.
pub fn clamp_spacing(spacing: u8) -> u8 {
    ALLOWED_SPACING
        .iter()
        .copied()
        .min_by_key(|allowed| allowed.abs_diff(spacing))
        .unwrap_or(ALLOWED_SPACING[0])
}

/// Lays out its children in a row or column with a fixed gap. The card
/// size, when set, fixes the size of the stack itself.
#[derive(IntoElement)]
pub struct Stack {
    direction: StackDirection,
    spacing: u8,
    card_width: Option<Pixels>,
    card_height: Option<Pixels>,
    style: StyleRefinement,
    children: SmallVec<[AnyElement; 4]>,
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}

impl Stack {
    pub fn new() -> Self {
        Self {
            direction: StackDirection::default(),
            spacing: ALLOWED_SPACING[0],
            card_width: None,
            card_height: None,
            style: StyleRefinement::default(),
            children: SmallVec::new(),
        }
    }

    pub fn direction(mut self, direction: StackDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Gap between children in units of 8px, one of 2, 4, 6, 8 or 10.
    pub fn spacing(mut self, spacing: u8) -> Self {
        self.spacing = clamp_spacing(spacing);
        self
    }

    pub fn card_width(mut self, width: impl Into<Pixels>) -> Self {
        self.card_width = Some(width.into());
        self
    }

    pub fn card_height(mut self, height: impl Into<Pixels>) -> Self {
        self.card_height = Some(height.into());
        self
    }

    pub fn gap_pixels(&self) -> Pixels {
        SPACING_UNIT * self.spacing as f32
    }
}

impl ParentElement for Stack {
    fn extend(&mut self, elements: impl IntoIterator<Item = AnyElement>) {
        self.children.extend(elements);
    }
}

impl Styled for Stack {
    fn style(&mut self) -> &mut StyleRefinement {
        &mut self.style
    }
}

impl RenderOnce for Stack {
    fn render(self, _window: &mut Window, _cx: &mut App) -> impl IntoElement {
        div()
            .flex()
            .map(|this| match self.direction {
                StackDirection::Row => this.flex_row(),
                StackDirection::Column => this.flex_col(),
            })
            .gap(self.gap_pixels())
            .when_some(self.card_width, |this, width| this.w(width))
            .when_some(self.card_height, |this, height| this.h(height))
            .map(|mut this| {
                this.style().refine(&self.style);
                this
            })
            .children(self.children)
    }
}

#[cfg(test)]
mod pure_tests {
    use super::*;

    #[test]
    fn test_spacing_snaps_to_allowed_values() {
        assert_eq!(clamp_spacing(0), 2);
        assert_eq!(clamp_spacing(2), 2);
        assert_eq!(clamp_spacing(3), 2);
        assert_eq!(clamp_spacing(5), 4);
        assert_eq!(clamp_spacing(7), 6);
        assert_eq!(clamp_spacing(9), 8);
        assert_eq!(clamp_spacing(10), 10);
        assert_eq!(clamp_spacing(200), 10);
    }

    #[test]
    fn test_gap_is_multiple_of_eight() {
        assert_eq!(Stack::new().gap_pixels(), px(16.));
        assert_eq!(Stack::new().spacing(6).gap_pixels(), px(48.));
        assert_eq!(Stack::new().spacing(11).gap_pixels(), px(80.));
        assert_eq!(Stack::new().direction, StackDirection::Column);
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use crate::theme::Theme;
    use gpui::{AppContext, InteractiveElement, TestAppContext, VisualTestContext, size};

    fn sized_child(selector: &'static str) -> gpui::Div {
        div()
            .debug_selector(move || selector.into())
            .flex_none()
            .w(px(100.))
            .h(px(20.))
    }

    struct StackTestView;

    impl gpui::Render for StackTestView {
        fn render(
            &mut self,
            _window: &mut Window,
            _cx: &mut gpui::Context<Self>,
        ) -> impl IntoElement {
            div()
                .size_full()
                .flex()
                .flex_col()
                .child(
                    Stack::new()
                        .direction(StackDirection::Row)
                        .spacing(4)
                        .card_width(px(300.))
                        .card_height(px(80.))
                        .child(sized_child("first"))
                        .child(sized_child("second"))
                        .child(sized_child("third")),
                )
                .child(div().debug_selector(|| "after".into()).h(px(10.)))
        }
    }

    #[gpui::test]
    fn test_card_size_applies_to_the_stack(cx: &mut TestAppContext) {
        let window = cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);
            cx.open_window(Default::default(), |_window, cx| cx.new(|_cx| StackTestView))
                .unwrap()
        });

        let mut vcx = VisualTestContext::from_window(window.into(), cx);
        vcx.run_until_parked();

        let first = vcx.debug_bounds("first").expect("first child is painted");
        let second = vcx.debug_bounds("second").expect("second child is painted");
        let third = vcx.debug_bounds("third").expect("third child is painted");

        let after = vcx.debug_bounds("after").expect("sibling is painted");
        assert_eq!(after.origin.y - first.origin.y, px(80.));

        // Children keep their own size rather than being boxed into cards.
        assert_eq!(first.size, size(px(100.), px(20.)));

        // A row never wraps, so the third child stays on the first line even
        // though it overflows the 300px stack.
        assert_eq!(first.origin.y, third.origin.y);
        assert_eq!(second.origin.x - first.origin.x, px(100.) + px(32.));
        assert_eq!(third.origin.x - second.origin.x, px(100.) + px(32.));
    }
}
