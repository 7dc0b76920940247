use std::{cell::RefCell, rc::Rc};

use enum_assoc::Assoc;
use gpui::{
    App, ClickEvent, CursorStyle, ElementId, FontWeight, InteractiveElement, IntoElement,
    ObjectFit, ParentElement, Pixels, RenderOnce, Rgba, SharedString, StatefulInteractiveElement,
    Styled, StyledImage, Window, div, img, prelude::FluentBuilder, px,
};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    extensions::click_behavior::{ClickBehavior, ClickBehaviorExt},
    theme::{ThemeExt, ThemeLayerKind},
    utils::ElementIdExt,
};

const ROUNDED_CORNERS_RADIUS: Pixels = px(8.);
const STATUS_RING_WIDTH: Pixels = px(2.);
const FALLBACK_INITIAL: &str = "A";
const FALLBACK_ALT: &str = "Avatar";

#[derive(Assoc, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[func(pub fn pixels(&self) -> Pixels)]
#[func(pub fn badge_size(&self) -> Pixels)]
pub enum AvatarSize {
    #[assoc(pixels = px(32.))]
    #[assoc(badge_size = px(10.))]
    Sm,
    #[default]
    #[assoc(pixels = px(48.))]
    #[assoc(badge_size = px(14.))]
    Md,
    #[assoc(pixels = px(64.))]
    #[assoc(badge_size = px(16.))]
    Lg,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AvatarShape {
    /// A full circle.
    #[default]
    Rounded,
    Square,
    RoundedCorners,
}

impl AvatarShape {
    /// Corner radius for an avatar of the given edge length.
    pub fn radius(&self, size: Pixels) -> Pixels {
        match self {
            AvatarShape::Rounded => size / 2.,
            AvatarShape::Square => px(0.),
            AvatarShape::RoundedCorners => ROUNDED_CORNERS_RADIUS,
        }
    }
}

#[derive(Assoc, Clone, Copy, Debug, PartialEq, Eq)]
#[func(pub fn color(&self, cx: &App) -> Rgba)]
pub enum AvatarStatus {
    #[assoc(color = cx.get_theme().variants.active(cx).colors.presence.online)]
    Online,
    #[assoc(color = cx.get_theme().variants.active(cx).colors.presence.offline)]
    Offline,
    #[assoc(color = cx.get_theme().variants.active(cx).colors.presence.away)]
    Away,
    #[assoc(color = cx.get_theme().variants.active(cx).colors.presence.inactive)]
    Inactive,
}

/// The uppercased first grapheme of `name`, or `"A"` when there is none.
/// Leading whitespace is kept, so `" ada"` yields a blank initial.
pub fn fallback_initial(name: Option<&str>) -> SharedString {
    name.and_then(|name| name.graphemes(true).next())
        .map(|grapheme| grapheme.to_uppercase().into())
        .unwrap_or_else(|| FALLBACK_INITIAL.into())
}

/// A user picture with an initial fallback and an optional presence badge.
#[derive(IntoElement)]
pub struct Avatar {
    id: ElementId,
    src: Option<SharedString>,
    alt: Option<SharedString>,
    img_name: Option<SharedString>,
    size: AvatarSize,
    custom_size: Option<Pixels>,
    shape: AvatarShape,
    status: Option<AvatarStatus>,
    show_status: Option<bool>,
    layer: ThemeLayerKind,
    on_click: Option<Box<dyn Fn(&ClickEvent, &mut Window, &mut App) + 'static>>,
    click_behavior: ClickBehavior,
}

impl Avatar {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            src: None,
            alt: None,
            img_name: None,
            size: AvatarSize::default(),
            custom_size: None,
            shape: AvatarShape::default(),
            status: None,
            show_status: None,
            layer: ThemeLayerKind::Quaternary,
            on_click: None,
            click_behavior: ClickBehavior::default(),
        }
    }

    pub fn src(mut self, src: impl Into<SharedString>) -> Self {
        self.src = Some(src.into());
        self
    }

    pub fn alt(mut self, alt: impl Into<SharedString>) -> Self {
        self.alt = Some(alt.into());
        self
    }

    /// The name the fallback initial is taken from.
    pub fn img_name(mut self, img_name: impl Into<SharedString>) -> Self {
        self.img_name = Some(img_name.into());
        self
    }

    pub fn size(mut self, size: AvatarSize) -> Self {
        self.size = size;
        self
    }

    /// Overrides the edge length, used by components embedding small avatars.
    pub fn custom_size(mut self, size: impl Into<Pixels>) -> Self {
        self.custom_size = Some(size.into());
        self
    }

    pub fn shape(mut self, shape: AvatarShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn status(mut self, status: AvatarStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn show_status(mut self, show_status: bool) -> Self {
        self.show_status = Some(show_status);
        self
    }

    pub fn layer(mut self, layer: ThemeLayerKind) -> Self {
        self.layer = layer;
        self
    }

    pub fn on_click(
        mut self,
        on_click: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_click = Some(Box::new(on_click));
        self
    }

    /// `alt`, else `img_name`, else `"Avatar"`.
    pub fn alt_text(&self) -> SharedString {
        self.alt
            .clone()
            .or_else(|| self.img_name.clone())
            .unwrap_or_else(|| FALLBACK_ALT.into())
    }

    pub fn initial(&self) -> SharedString {
        fallback_initial(self.img_name.as_deref())
    }

    fn edge(&self) -> Pixels {
        self.custom_size.unwrap_or(self.size.pixels())
    }

    fn visible_status(&self) -> Option<AvatarStatus> {
        self.status.filter(|_| self.show_status.unwrap_or(true))
    }
}

impl ClickBehaviorExt for Avatar {
    fn click_behavior_mut(&mut self) -> &mut ClickBehavior {
        &mut self.click_behavior
    }
}

impl RenderOnce for Avatar {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let edge = self.edge();
        let radius = self.shape.radius(edge);
        let initial = self.initial();
        let alt_text = self.alt_text();
        let status = self.visible_status();
        let background_color = self.layer.resolve(cx);
        let primary_text_color = cx.get_theme().variants.active(cx).colors.text.primary;
        let ring_color = cx.get_theme().variants.active(cx).colors.presence.ring;
        let font_family = cx.get_theme().layout.text.default_font.family[0].clone();
        #[cfg(feature = "test-support")]
        let fallback_selector = format!("{}:fallback", self.id);

        // Remembers which source already failed so the warning is logged once per src.
        let failed_src = window
            .use_keyed_state(self.id.with_suffix("state:failed_src"), cx, |_window, _cx| {
                Rc::new(RefCell::new(None::<SharedString>))
            })
            .read(cx)
            .clone();

        let fallback = move || {
            div()
                .size_full()
                .flex()
                .items_center()
                .justify_center()
                .font_family(font_family.clone())
                .text_size(edge * 0.4)
                .font_weight(FontWeight::MEDIUM)
                .text_color(primary_text_color)
                .map(|this| {
                    #[cfg(feature = "test-support")]
                    let this = {
                        let fallback_selector = fallback_selector.clone();
                        this.debug_selector(move || fallback_selector)
                    };
                    this
                })
                .child(initial.clone())
        };

        div()
            .id(self.id.clone())
            .relative()
            .flex_none()
            .size(edge)
            .child(
                div()
                    .size_full()
                    .rounded(radius)
                    .overflow_hidden()
                    .bg(background_color)
                    .map(|this| match self.src.clone() {
                        Some(src) => {
                            if failed_src.borrow().as_ref() != Some(&src) {
                                failed_src.replace(None);
                            }

                            let fallback = fallback.clone();
                            this.child(
                                img(src.clone())
                                    .size_full()
                                    .object_fit(ObjectFit::Cover)
                                    .with_fallback(move || {
                                        let mut failed = failed_src.borrow_mut();
                                        if failed.as_ref() != Some(&src) {
                                            tracing::warn!(
                                                src = %src,
                                                alt = %alt_text,
                                                "avatar image failed to load, showing initial"
                                            );
                                            *failed = Some(src.clone());
                                        }

                                        fallback().into_any_element()
                                    }),
                            )
                        }
                        None => this.child(fallback()),
                    }),
            )
            .when_some(status, |this, status| {
                let badge = self.size.badge_size();

                this.child(
                    div()
                        .absolute()
                        .right_0()
                        .bottom_0()
                        .size(badge)
                        .rounded_full()
                        .border(STATUS_RING_WIDTH)
                        .border_color(ring_color)
                        .bg(status.color(cx)),
                )
            })
            .when_some(self.on_click, |this, on_click| {
                let behavior = self.click_behavior;

                this.cursor(CursorStyle::PointingHand)
                    .on_click(move |event, window, cx| {
                        behavior.apply(window, cx);
                        (on_click)(event, window, cx);
                    })
            })
    }
}

#[cfg(test)]
mod pure_tests {
    use super::*;

    #[test]
    fn test_fallback_initial() {
        assert_eq!(fallback_initial(Some("jane doe")), SharedString::from("J"));
        assert_eq!(fallback_initial(Some("émile")), SharedString::from("É"));
        assert_eq!(fallback_initial(Some(" ada")), SharedString::from(" "));
        assert_eq!(fallback_initial(Some("")), SharedString::from("A"));
        assert_eq!(fallback_initial(None), SharedString::from("A"));
    }

    #[test]
    fn test_shape_radius() {
        assert_eq!(AvatarShape::Rounded.radius(px(48.)), px(24.));
        assert_eq!(AvatarShape::Square.radius(px(48.)), px(0.));
        assert_eq!(AvatarShape::RoundedCorners.radius(px(64.)), px(8.));
    }

    #[test]
    fn test_sizes_and_badges() {
        assert_eq!(AvatarSize::default(), AvatarSize::Md);
        assert_eq!(AvatarSize::Sm.pixels(), px(32.));
        assert_eq!(AvatarSize::Md.pixels(), px(48.));
        assert_eq!(AvatarSize::Lg.pixels(), px(64.));
        assert_eq!(AvatarSize::Sm.badge_size(), px(10.));
        assert_eq!(AvatarSize::Md.badge_size(), px(14.));
        assert_eq!(AvatarSize::Lg.badge_size(), px(16.));
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use crate::{
        theme::{Theme, ThemeExt},
        utils::rgb_a,
    };
    use gpui::{AppContext, TestAppContext, VisualTestContext};

    fn assert_color_eq(actual: Rgba, expected: Rgba) {
        let close = |a: f32, b: f32| (a - b).abs() < 1e-3;
        assert!(
            close(actual.r, expected.r)
                && close(actual.g, expected.g)
                && close(actual.b, expected.b)
                && close(actual.a, expected.a),
            "{actual:?} != {expected:?}"
        );
    }

    #[gpui::test]
    fn test_status_colors(cx: &mut TestAppContext) {
        cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);

            assert_color_eq(AvatarStatus::Online.color(cx), rgb_a(0x4caf50, 1.));
            assert_color_eq(AvatarStatus::Offline.color(cx), rgb_a(0x9e9e9e, 1.));
            assert_color_eq(AvatarStatus::Away.color(cx), rgb_a(0xff9800, 1.));
            assert_color_eq(AvatarStatus::Inactive.color(cx), rgb_a(0xf44336, 1.));
        });
    }

    #[gpui::test]
    fn test_alt_text_fallbacks(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            let avatar = Avatar::new("avatar");
            assert_eq!(avatar.alt_text(), SharedString::from("Avatar"));

            let avatar = Avatar::new("avatar").img_name("Remy Sharp");
            assert_eq!(avatar.alt_text(), SharedString::from("Remy Sharp"));
            assert_eq!(avatar.initial(), SharedString::from("R"));

            let avatar = avatar.alt("Profile picture");
            assert_eq!(avatar.alt_text(), SharedString::from("Profile picture"));
        });
    }

    #[gpui::test]
    fn test_status_visibility(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            assert_eq!(Avatar::new("a").visible_status(), None);

            let avatar = Avatar::new("a").status(AvatarStatus::Online);
            assert_eq!(avatar.visible_status(), Some(AvatarStatus::Online));

            let avatar = avatar.show_status(false);
            assert_eq!(avatar.visible_status(), None);
        });
    }

    #[gpui::test]
    fn test_custom_size_overrides_size(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            let avatar = Avatar::new("a").size(AvatarSize::Lg);
            assert_eq!(avatar.edge(), px(64.));

            let avatar = avatar.custom_size(px(20.));
            assert_eq!(avatar.edge(), px(20.));
        });
    }

    #[gpui::test]
    fn test_failed_image_shows_initial(cx: &mut TestAppContext) {
        let window = cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);

            cx.open_window(Default::default(), |_window, cx| cx.new(|_cx| AvatarTestView))
                .unwrap()
        });

        let mut vcx = VisualTestContext::from_window(window.into(), cx);
        vcx.run_until_parked();

        assert!(
            vcx.debug_bounds("broken:fallback").is_some(),
            "A missing image falls back to the initial"
        );
        assert!(
            vcx.debug_bounds("with-status:fallback").is_some(),
            "No src renders the initial straight away"
        );
    }

    struct AvatarTestView;

    impl gpui::Render for AvatarTestView {
        fn render(
            &mut self,
            _window: &mut gpui::Window,
            _cx: &mut gpui::Context<Self>,
        ) -> impl IntoElement {
            div()
                .size_full()
                .child(
                    Avatar::new("with-status")
                        .img_name("Ada")
                        .status(AvatarStatus::Away),
                )
                .child(
                    Avatar::new("broken")
                        .src("missing/avatar.png")
                        .img_name("Jane")
                        .shape(AvatarShape::Square),
                )
        }
    }
}
