use gpui::{
    Edges, Hsla, IntoElement, Length, Radians, RenderOnce, SharedString, SizeRefinement, Styled,
    Transformation, prelude::FluentBuilder, px, relative, svg,
};

use crate::theme::ThemeExt;

/// Flex settings applied to an [`Icon`].
#[derive(Clone, Default)]
pub struct IconStyle {
    pub flex_grow: Option<f32>,
    pub flex_shrink: Option<f32>,
    pub flex_basis: Option<Length>,
}

/// A themed SVG icon. Accepts any asset path or a [`MosaicIconKind`](crate::MosaicIconKind).
#[derive(IntoElement)]
pub struct Icon {
    path: SharedString,
    pub(crate) size: SizeRefinement<Length>,
    rotate: Radians,
    color: Option<Hsla>,
    style: IconStyle,
    margin: Edges<Option<Length>>,
}

impl Icon {
    pub fn new(path: impl Into<SharedString>) -> Self {
        Self {
            path: path.into(),
            size: SizeRefinement::default(),
            rotate: Radians(0.),
            color: None,
            style: IconStyle::default(),
            margin: Edges::default(),
        }
    }

    pub fn m(mut self, margin: impl Into<Length>) -> Self {
        self.margin = Edges::all(Some(margin.into()));
        self
    }

    pub fn mt(mut self, margin: impl Into<Length>) -> Self {
        self.margin.top = Some(margin.into());
        self
    }

    pub fn mb(mut self, margin: impl Into<Length>) -> Self {
        self.margin.bottom = Some(margin.into());
        self
    }

    pub fn ml(mut self, margin: impl Into<Length>) -> Self {
        self.margin.left = Some(margin.into());
        self
    }

    pub fn mr(mut self, margin: impl Into<Length>) -> Self {
        self.margin.right = Some(margin.into());
        self
    }

    /// Sets the same width and height.
    pub fn size(mut self, size: impl Into<Length>) -> Self {
        let size = size.into();
        self.size = SizeRefinement {
            width: Some(size),
            height: Some(size),
        };
        self
    }

    /// Overrides the theme's primary text color.
    pub fn color(mut self, color: impl Into<Hsla>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn rotate(mut self, rotate: impl Into<Radians>) -> Self {
        self.rotate = rotate.into();
        self
    }

    /// [Docs](https://tailwindcss.com/docs/flex#none)
    pub fn flex_none(mut self) -> Self {
        self.style.flex_grow = Some(0.);
        self.style.flex_shrink = Some(0.);
        self
    }

    /// [Docs](https://tailwindcss.com/docs/flex#flex-1)
    pub fn flex_1(mut self) -> Self {
        self.style.flex_grow = Some(1.);
        self.style.flex_shrink = Some(1.);
        self.style.flex_basis = Some(relative(0.).into());
        self
    }

    /// [Docs](https://tailwindcss.com/docs/flex-shrink#dont-shrink)
    pub fn flex_shrink_0(mut self) -> Self {
        self.style.flex_shrink = Some(0.);
        self
    }

    pub fn style(mut self, style: IconStyle) -> Self {
        self.style = style;
        self
    }
}

impl RenderOnce for Icon {
    fn render(self, _window: &mut gpui::Window, cx: &mut gpui::App) -> impl IntoElement {
        let primary_text_color = cx.get_theme().variants.active(cx).colors.text.primary;
        let width = self.size.width.unwrap_or(px(14.).into());
        let height = self.size.height.unwrap_or(px(14.).into());

        svg()
            .path(self.path)
            .text_color(self.color.unwrap_or(primary_text_color.into()))
            .w(width)
            .min_w(width)
            .h(height)
            .min_h(height)
            .when_some(self.margin.top, |this, v| this.mt(v))
            .when_some(self.margin.bottom, |this, v| this.mb(v))
            .when_some(self.margin.left, |this, v| this.ml(v))
            .when_some(self.margin.right, |this, v| this.mr(v))
            .with_transformation(Transformation::rotate(self.rotate))
            .when_some(self.style.flex_grow, |mut this, value| {
                this.style().flex_grow = Some(value);
                this
            })
            .when_some(self.style.flex_shrink, |mut this, value| {
                this.style().flex_shrink = Some(value);
                this
            })
            .when_some(self.style.flex_basis, |this, value| this.flex_basis(value))
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use crate::MosaicIconKind;
    use gpui::{AppContext, ParentElement, TestAppContext, VisualTestContext, hsla};

    #[gpui::test]
    fn test_icon_from_kind(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            let icon = Icon::new(MosaicIconKind::Close);
            assert_eq!(icon.path, SharedString::from("icons/close.svg"));
            assert!(icon.color.is_none());
            assert_eq!(icon.rotate.0, 0.0);
        });
    }

    #[gpui::test]
    fn test_icon_builder_chain(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            let icon = Icon::new("icons/custom.svg")
                .size(px(32.))
                .color(hsla(0.5, 0.5, 0.5, 1.0))
                .rotate(Radians(1.5))
                .ml(px(6.))
                .flex_none();

            assert_eq!(icon.size.width, Some(px(32.).into()));
            assert_eq!(icon.size.height, Some(px(32.).into()));
            assert!(icon.color.is_some());
            assert_eq!(icon.rotate.0, 1.5);
            assert_eq!(icon.margin.left, Some(px(6.).into()));
            assert_eq!(icon.style.flex_shrink, Some(0.));
        });
    }

    #[gpui::test]
    fn test_icon_renders_in_window(cx: &mut TestAppContext) {
        use crate::theme::{Theme, ThemeExt};

        let window = cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);

            cx.open_window(Default::default(), |_window, cx| cx.new(|_cx| IconTestView))
                .unwrap()
        });

        let _cx = VisualTestContext::from_window(window.into(), cx);
    }

    struct IconTestView;

    impl gpui::Render for IconTestView {
        fn render(
            &mut self,
            _window: &mut gpui::Window,
            _cx: &mut gpui::Context<Self>,
        ) -> impl IntoElement {
            gpui::div()
                .size_full()
                .child(Icon::new(MosaicIconKind::Search).size(px(24.)))
        }
    }
}
