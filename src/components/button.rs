use std::time::Duration;

use enum_assoc::Assoc;
use gpui::{
    App, ClickEvent, CursorStyle, DefiniteLength, Edges, ElementId, InteractiveElement,
    IntoElement, JustifyContent, Length, MouseButton, ParentElement, Pixels, RenderOnce, Rgba,
    SharedString, StatefulInteractiveElement, Styled, Window, div, prelude::FluentBuilder, px,
    relative,
};
use gpui_squircle::{SquircleStyled, squircle};
use gpui_transitions::Lerp;

use crate::{
    components::Icon,
    conditional_transition,
    extensions::click_behavior::{ClickBehavior, ClickBehaviorExt},
    primitives::{FocusRing, min_w0_wrapper},
    theme::ThemeExt,
    utils::{
        ElementIdExt, InteractionStates, PositionalChildren, PositionalParentElement, RgbaExt,
        SquircleExt, disabled_transition,
    },
};

const CORNER_RADIUS: Pixels = px(2.);
const OUTER_MARGIN: Pixels = px(5.);
const ICON_GAP: Pixels = px(6.);

/// Padding and font size of a [`Button`].
#[derive(Assoc, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[func(pub fn vertical_padding(&self) -> Pixels)]
#[func(pub fn horizontal_padding(&self) -> Pixels)]
#[func(pub fn text_size(&self) -> Pixels)]
pub enum ButtonSize {
    #[assoc(vertical_padding = px(5.))]
    #[assoc(horizontal_padding = px(10.))]
    #[assoc(text_size = px(12.))]
    Sm,
    #[default]
    #[assoc(vertical_padding = px(10.))]
    #[assoc(horizontal_padding = px(15.))]
    #[assoc(text_size = px(14.))]
    Md,
    #[assoc(vertical_padding = px(15.))]
    #[assoc(horizontal_padding = px(20.))]
    #[assoc(text_size = px(16.))]
    Lg,
}

struct ButtonStyles {
    justify_content: JustifyContent,
    padding: Edges<Option<DefiniteLength>>,
    width: Length,
}

impl Default for ButtonStyles {
    fn default() -> Self {
        Self {
            justify_content: JustifyContent::Center,
            padding: Edges::default(),
            width: Length::Auto,
        }
    }
}

#[derive(IntoElement)]
pub struct Button {
    id: ElementId,
    text: Option<SharedString>,
    icon: Option<SharedString>,
    size: ButtonSize,
    variant: ButtonVariantEither,
    disabled: bool,
    on_hover: Option<Box<dyn Fn(&bool, &mut Window, &mut App) + 'static>>,
    on_click: Option<Box<dyn Fn(&ClickEvent, &mut Window, &mut App) + 'static>>,
    click_behavior: ClickBehavior,
    children: PositionalChildren,
    style: ButtonStyles,
}

impl Button {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            text: None,
            icon: None,
            size: ButtonSize::default(),
            variant: ButtonVariantEither::Left(ButtonVariant::Primary),
            disabled: false,
            on_hover: None,
            on_click: None,
            click_behavior: ClickBehavior::default(),
            children: PositionalChildren::default(),
            style: ButtonStyles::default(),
        }
    }

    pub fn text(mut self, text: impl Into<SharedString>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// An SVG path rendered before the text.
    pub fn icon(mut self, icon: impl Into<SharedString>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn size(mut self, size: ButtonSize) -> Self {
        self.size = size;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn on_hover(mut self, on_hover: impl Fn(&bool, &mut Window, &mut App) + 'static) -> Self {
        self.on_hover = Some(Box::new(on_hover));
        self
    }

    pub fn on_click(
        mut self,
        on_click: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_click = Some(Box::new(on_click));
        self
    }

    // ButtonVariantEither only exists so both variant types are accepted.
    #[allow(private_bounds)]
    pub fn variant(mut self, variant: impl Into<ButtonVariantEither>) -> Self {
        self.variant = variant.into();
        self
    }

    /// [Docs](https://tailwindcss.com/docs/justify-content#start)
    pub fn justify_start(mut self) -> Self {
        self.style.justify_content = JustifyContent::Start;
        self
    }

    /// [Docs](https://tailwindcss.com/docs/justify-content#center)
    pub fn justify_center(mut self) -> Self {
        self.style.justify_content = JustifyContent::Center;
        self
    }

    /// [Docs](https://tailwindcss.com/docs/justify-content#end)
    pub fn justify_end(mut self) -> Self {
        self.style.justify_content = JustifyContent::End;
        self
    }

    /// [Docs](https://tailwindcss.com/docs/justify-content#space-between)
    pub fn justify_between(mut self) -> Self {
        self.style.justify_content = JustifyContent::SpaceBetween;
        self
    }

    pub fn p(mut self, padding: impl Into<DefiniteLength>) -> Self {
        self.style.padding = Edges::all(Some(padding.into()));
        self
    }

    pub fn pt(mut self, padding: impl Into<DefiniteLength>) -> Self {
        self.style.padding.top = Some(padding.into());
        self
    }

    pub fn pb(mut self, padding: impl Into<DefiniteLength>) -> Self {
        self.style.padding.bottom = Some(padding.into());
        self
    }

    pub fn pl(mut self, padding: impl Into<DefiniteLength>) -> Self {
        self.style.padding.left = Some(padding.into());
        self
    }

    pub fn pr(mut self, padding: impl Into<DefiniteLength>) -> Self {
        self.style.padding.right = Some(padding.into());
        self
    }

    pub fn w(mut self, width: impl Into<Length>) -> Self {
        self.style.width = width.into();
        self
    }

    pub fn w_auto(mut self) -> Self {
        self.style.width = Length::Auto;
        self
    }

    pub fn w_full(mut self) -> Self {
        self.style.width = relative(100.).into();
        self
    }
}

macro_rules! apply_padding {
    (
        $this:expr,
        $padding_override:expr,
        $vertical_padding:expr,
        $horizontal_padding:expr
    ) => {
        $this
            .pt($padding_override.top.unwrap_or($vertical_padding.into()))
            .pb($padding_override.bottom.unwrap_or($vertical_padding.into()))
            .pl($padding_override.left.unwrap_or($horizontal_padding.into()))
            .pr($padding_override
                .right
                .unwrap_or($horizontal_padding.into()))
    };
}

impl RenderOnce for Button {
    fn render(self, window: &mut gpui::Window, cx: &mut gpui::App) -> impl IntoElement {
        let variant = self.variant.into_granular(cx);
        let font_family = cx.get_theme().layout.text.default_font.family[0].clone();
        let text_size = self.size.text_size();
        let padding_override = self.style.padding;

        let states = InteractionStates::use_keyed(&self.id, window, cx);
        let is_hover = states.is_hover(cx);
        let is_click_down = states.is_click_down(cx);
        let is_focus = states.is_focus(window);

        let is_disabled = self.disabled;
        let disabled_transition = disabled_transition(self.id.clone(), window, cx, is_disabled);
        states.blur_if_disabled(window, is_disabled);

        let bg_color_transition = conditional_transition!(
            self.id.with_suffix("state:transition:bg_color"),
            window,
            cx,
            Duration::from_millis(250),
            {
                is_focus || is_click_down => variant.bg_focus_color,
                is_hover => variant.bg_hover_color,
                _ => variant.bg_color
            }
        );

        let highlight_alpha_transition = conditional_transition!(
            self.id.with_suffix("state:transition:highlight_alpha"),
            window,
            cx,
            Duration::from_millis(250),
            {
                is_focus || is_click_down || is_hover => variant.highlight_active_alpha,
                _ => variant.highlight_alpha
            }
        );

        let text_color = variant.text_color;
        let focus_handle = states.focus_handle.clone();

        div()
            .id(self.id.clone())
            .cursor(if is_disabled {
                CursorStyle::OperationNotAllowed
            } else {
                CursorStyle::PointingHand
            })
            .m(OUTER_MARGIN)
            .w(self.style.width)
            .h_auto()
            .map(|this| {
                apply_padding!(
                    this,
                    padding_override,
                    self.size.vertical_padding(),
                    self.size.horizontal_padding()
                )
            })
            .flex()
            .flex_col()
            .opacity(*disabled_transition.evaluate(window, cx))
            .child(
                FocusRing::new(self.id.with_suffix("focus_ring"), focus_handle.clone())
                    .rounded(CORNER_RADIUS),
            )
            .child(
                squircle()
                    .absolute_expand()
                    .rounded(CORNER_RADIUS)
                    .border(px(1.))
                    .border_inside()
                    .bg(*bg_color_transition.evaluate(window, cx))
                    .border_highlight_color(*highlight_alpha_transition.evaluate(window, cx)),
            )
            .children(self.children.top)
            .child(
                div()
                    .w_full()
                    .flex()
                    .gap(ICON_GAP)
                    .items_center()
                    .map(|mut this| {
                        this.style().justify_content = Some(self.style.justify_content);
                        this
                    })
                    .text_color(text_color)
                    .children(self.children.left)
                    .when_some(self.icon, |this, icon| {
                        this.child(
                            Icon::new(icon)
                                .size(text_size)
                                .color(text_color)
                                .flex_none(),
                        )
                    })
                    .when_some(self.text, |this, text| {
                        this.child(
                            min_w0_wrapper()
                                .font_family(font_family)
                                .text_size(text_size)
                                .font_weight(gpui::FontWeight::MEDIUM)
                                .text_color(text_color)
                                .text_ellipsis()
                                .child(text),
                        )
                    })
                    .children(self.children.right),
            )
            .children(self.children.bottom)
            .when(!is_disabled, |this| {
                let behavior = self.click_behavior;
                let states_on_hover = states.clone();
                let states_on_mouse_down = states.clone();
                let states_on_click = states.clone();
                let on_hover = self.on_hover;
                let on_click = self.on_click;

                this.on_hover(move |hover, window, cx| {
                    states_on_hover.set_hover(cx, *hover);

                    if let Some(on_hover) = on_hover.as_ref() {
                        (on_hover)(hover, window, cx);
                    }
                })
                .on_mouse_down(MouseButton::Left, move |_event, window, cx| {
                    // Keeps the focus ring hidden for pointer clicks.
                    window.prevent_default();
                    states_on_mouse_down.set_click_down(cx, true);
                })
                .on_click(move |event, window, cx| {
                    behavior.apply(window, cx);

                    if !is_focus {
                        window.blur();
                    }

                    states_on_click.set_click_down(cx, false);

                    if let Some(on_click) = on_click.as_ref() {
                        (on_click)(event, window, cx);
                    }
                })
                .on_mouse_up_out(MouseButton::Left, move |_event, _window, cx| {
                    states.reset_pointer(cx);
                })
                .track_focus(&focus_handle)
            })
    }
}

impl PositionalParentElement for Button {
    fn children_mut(&mut self) -> &mut PositionalChildren {
        &mut self.children
    }
}

impl ClickBehaviorExt for Button {
    fn click_behavior_mut(&mut self) -> &mut ClickBehavior {
        &mut self.click_behavior
    }
}

/// Explicit colors for a button that none of the [`ButtonVariant`]s cover.
#[derive(Clone, Debug, PartialEq)]
pub struct GranularButtonVariant {
    pub bg_color: Rgba,
    pub bg_hover_color: Rgba,
    pub bg_focus_color: Rgba,
    pub text_color: Rgba,
    pub highlight_alpha: f32,
    pub highlight_active_alpha: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ButtonVariant {
    /// Filled with the primary accent (blue).
    #[default]
    Primary,
    /// Filled with the constructive accent (green).
    Secondary,
    /// Filled with the secondary text color (gray).
    Tertiary,
}

impl ButtonVariant {
    pub fn as_granular(&self, cx: &App) -> GranularButtonVariant {
        const HOVER_STRENGTH: f32 = 0.15;
        const FOCUS_STRENGTH: f32 = 0.3;

        let colors = &cx.get_theme().variants.active(cx).colors;
        let background = colors.background.primary;

        let fill = match self {
            ButtonVariant::Primary => colors.accent.primary,
            ButtonVariant::Secondary => colors.accent.constructive,
            ButtonVariant::Tertiary => colors.text.secondary.alpha(1.),
        };

        GranularButtonVariant {
            bg_color: fill,
            bg_hover_color: fill.lerp(&background, HOVER_STRENGTH),
            bg_focus_color: fill.lerp(&background, FOCUS_STRENGTH),
            text_color: colors.accent.contrast,
            highlight_alpha: 0.15,
            highlight_active_alpha: 0.2,
        }
    }
}

enum ButtonVariantEither {
    Left(ButtonVariant),
    Right(GranularButtonVariant),
}

impl ButtonVariantEither {
    fn into_granular(self, cx: &App) -> GranularButtonVariant {
        match self {
            ButtonVariantEither::Left(left) => left.as_granular(cx),
            ButtonVariantEither::Right(right) => right,
        }
    }
}

impl From<ButtonVariant> for ButtonVariantEither {
    fn from(value: ButtonVariant) -> Self {
        ButtonVariantEither::Left(value)
    }
}

impl From<GranularButtonVariant> for ButtonVariantEither {
    fn from(value: GranularButtonVariant) -> Self {
        ButtonVariantEither::Right(value)
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use crate::theme::{Theme, ThemeExt};
    use gpui::{AppContext, TestAppContext, VisualTestContext};

    #[test]
    fn test_button_size_table() {
        assert_eq!(ButtonSize::default(), ButtonSize::Md);

        assert_eq!(ButtonSize::Sm.vertical_padding(), px(5.));
        assert_eq!(ButtonSize::Sm.horizontal_padding(), px(10.));
        assert_eq!(ButtonSize::Sm.text_size(), px(12.));

        assert_eq!(ButtonSize::Md.vertical_padding(), px(10.));
        assert_eq!(ButtonSize::Md.horizontal_padding(), px(15.));
        assert_eq!(ButtonSize::Md.text_size(), px(14.));

        assert_eq!(ButtonSize::Lg.vertical_padding(), px(15.));
        assert_eq!(ButtonSize::Lg.horizontal_padding(), px(20.));
        assert_eq!(ButtonSize::Lg.text_size(), px(16.));
    }

    #[gpui::test]
    fn test_button_defaults(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            let button = Button::new("button");
            assert!(button.text.is_none());
            assert!(!button.disabled);
            assert_eq!(button.size, ButtonSize::Md);
            assert!(matches!(
                button.variant,
                ButtonVariantEither::Left(ButtonVariant::Primary)
            ));
        });
    }

    #[gpui::test]
    fn test_button_variants_map_to_accents(cx: &mut TestAppContext) {
        cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);
            let colors = cx.get_theme().variants.active(cx).colors.clone();

            let primary = ButtonVariant::Primary.as_granular(cx);
            assert_eq!(primary.bg_color, colors.accent.primary);
            assert_eq!(primary.text_color, colors.accent.contrast);

            let secondary = ButtonVariant::Secondary.as_granular(cx);
            assert_eq!(secondary.bg_color, colors.accent.constructive);

            let tertiary = ButtonVariant::Tertiary.as_granular(cx);
            assert_eq!(tertiary.bg_color, colors.text.secondary.alpha(1.));
            assert_ne!(tertiary.bg_hover_color, tertiary.bg_color);
        });
    }

    #[gpui::test]
    fn test_granular_variant_passes_through(cx: &mut TestAppContext) {
        cx.update(|cx| {
            let granular = GranularButtonVariant {
                bg_color: gpui::rgba(0x112233ff),
                bg_hover_color: gpui::rgba(0x223344ff),
                bg_focus_color: gpui::rgba(0x334455ff),
                text_color: gpui::rgba(0xffffffff),
                highlight_alpha: 0.,
                highlight_active_alpha: 0.,
            };

            let button = Button::new("button").variant(granular.clone());
            assert_eq!(button.variant.into_granular(cx), granular);
        });
    }

    #[gpui::test]
    fn test_button_builder_chain(cx: &mut TestAppContext) {
        cx.update(|_cx| {
            let button = Button::new("button")
                .text("Save")
                .icon(crate::MosaicIconKind::Checkmark)
                .size(ButtonSize::Lg)
                .variant(ButtonVariant::Secondary)
                .disabled(true)
                .pl(px(2.))
                .w_full()
                .allow_click_propagation();

            assert_eq!(button.text, Some("Save".into()));
            assert_eq!(button.icon, Some("icons/checkmark.svg".into()));
            assert_eq!(button.size, ButtonSize::Lg);
            assert!(button.disabled);
            assert!(button.style.padding.left.is_some());
            assert!(button.style.padding.top.is_none());
            assert!(button.click_behavior.allow_propagation);
        });
    }

    #[gpui::test]
    fn test_button_renders_in_window(cx: &mut TestAppContext) {
        let window = cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);

            cx.open_window(Default::default(), |_window, cx| cx.new(|_cx| ButtonTestView))
                .unwrap()
        });

        let _cx = VisualTestContext::from_window(window.into(), cx);
    }

    struct ButtonTestView;

    impl gpui::Render for ButtonTestView {
        fn render(
            &mut self,
            _window: &mut gpui::Window,
            _cx: &mut gpui::Context<Self>,
        ) -> impl IntoElement {
            div()
                .size_full()
                .child(Button::new("primary").text("Primary"))
                .child(
                    Button::new("disabled")
                        .text("Disabled")
                        .variant(ButtonVariant::Tertiary)
                        .disabled(true),
                )
        }
    }
}
