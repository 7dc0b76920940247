use std::time::Duration;

use gpui::{
    App, ClickEvent, CursorStyle, ElementId, InteractiveElement, IntoElement, MouseButton,
    ParentElement, Pixels, RenderOnce, Rgba, SharedString, StatefulInteractiveElement, Styled,
    Window, div, prelude::FluentBuilder, px, transparent_black,
};
use gpui_transitions::Lerp;

use crate::{
    MosaicIconKind,
    components::{Avatar, Icon},
    conditional_transition,
    extensions::click_behavior::{ClickBehavior, ClickBehaviorExt},
    primitives::{FocusRing, min_w0_wrapper},
    theme::{ThemeAccentKind, ThemeExt, ThemeLayerKind, ThemeTextSizeKind},
    utils::{ElementIdExt, InteractionStates, RgbaExt, disabled_transition},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChipColor {
    #[default]
    Default,
    Primary,
    Secondary,
    Error,
    Info,
    Success,
    Warning,
}

impl ChipColor {
    /// The accent behind this color, `None` for the neutral default.
    pub fn accent(&self) -> Option<ThemeAccentKind> {
        match self {
            ChipColor::Default => None,
            ChipColor::Primary => Some(ThemeAccentKind::Primary),
            ChipColor::Secondary => Some(ThemeAccentKind::Secondary),
            ChipColor::Error => Some(ThemeAccentKind::Destructive),
            ChipColor::Info => Some(ThemeAccentKind::Info),
            ChipColor::Success => Some(ThemeAccentKind::Constructive),
            ChipColor::Warning => Some(ThemeAccentKind::Warning),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChipSize {
    Small,
    #[default]
    Medium,
}

impl ChipSize {
    pub fn height(&self) -> Pixels {
        match self {
            ChipSize::Small => px(24.),
            ChipSize::Medium => px(32.),
        }
    }

    pub fn avatar_size(&self) -> Pixels {
        match self {
            ChipSize::Small => px(20.),
            ChipSize::Medium => px(24.),
        }
    }

    fn horizontal_padding(&self) -> Pixels {
        match self {
            ChipSize::Small => px(8.),
            ChipSize::Medium => px(12.),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChipVariant {
    #[default]
    Filled,
    Outlined,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChipShape {
    #[default]
    Rounded,
    Square,
    RoundedCorners,
}

impl ChipShape {
    pub fn radius(&self) -> Pixels {
        match self {
            ChipShape::Rounded => px(16.),
            ChipShape::Square => px(0.),
            ChipShape::RoundedCorners => px(4.),
        }
    }
}

/// A small avatar shown at the start of a chip.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChipAvatar {
    pub src: Option<SharedString>,
    pub alt: Option<SharedString>,
    /// Shown when there is no `src`. Defaults to the chip label's first letter.
    pub initial: Option<SharedString>,
}

/// Resolved colors of a chip.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChipPalette {
    pub background: Rgba,
    pub border: Rgba,
    pub text: Rgba,
}

impl ChipPalette {
    /// `base` is the chip color, `on_base` the text drawn on top of a filled `base`.
    pub fn new(
        variant: ChipVariant,
        base: Rgba,
        on_base: Rgba,
        background_override: Option<Rgba>,
    ) -> Self {
        match (variant, background_override) {
            (ChipVariant::Filled, Some(fill)) => ChipPalette {
                background: fill,
                border: fill,
                text: on_base,
            },
            (ChipVariant::Filled, None) => ChipPalette {
                background: base,
                border: base,
                text: on_base,
            },
            (ChipVariant::Outlined, override_color) => {
                let color = override_color.unwrap_or(base);
                ChipPalette {
                    background: transparent_black().into(),
                    border: color,
                    text: color,
                }
            }
        }
    }
}

/// A compact label with optional avatar, icon, click and delete affordances.
#[derive(IntoElement)]
pub struct Chip {
    id: ElementId,
    label: SharedString,
    color: ChipColor,
    background_color: Option<Rgba>,
    size: ChipSize,
    variant: ChipVariant,
    shape: ChipShape,
    custom_icon: Option<SharedString>,
    delete_icon: Option<SharedString>,
    avatar: Option<ChipAvatar>,
    disabled: bool,
    on_click: Option<Box<dyn Fn(&ClickEvent, &mut Window, &mut App) + 'static>>,
    on_delete: Option<Box<dyn Fn(&ClickEvent, &mut Window, &mut App) + 'static>>,
    click_behavior: ClickBehavior,
}

impl Chip {
    pub fn new(id: impl Into<ElementId>, label: impl Into<SharedString>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            color: ChipColor::default(),
            background_color: None,
            size: ChipSize::default(),
            variant: ChipVariant::default(),
            shape: ChipShape::default(),
            custom_icon: None,
            delete_icon: None,
            avatar: None,
            disabled: false,
            on_click: None,
            on_delete: None,
            click_behavior: ClickBehavior::default(),
        }
    }

    pub fn color(mut self, color: ChipColor) -> Self {
        self.color = color;
        self
    }

    pub fn background_color(mut self, color: impl Into<Rgba>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn size(mut self, size: ChipSize) -> Self {
        self.size = size;
        self
    }

    pub fn variant(mut self, variant: ChipVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn shape(mut self, shape: ChipShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn custom_icon(mut self, icon: impl Into<SharedString>) -> Self {
        self.custom_icon = Some(icon.into());
        self
    }

    pub fn delete_icon(mut self, icon: impl Into<SharedString>) -> Self {
        self.delete_icon = Some(icon.into());
        self
    }

    pub fn avatar(mut self, avatar: ChipAvatar) -> Self {
        self.avatar = Some(avatar);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn on_click(
        mut self,
        on_click: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_click = Some(Box::new(on_click));
        self
    }

    pub fn on_delete(
        mut self,
        on_delete: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_delete = Some(Box::new(on_delete));
        self
    }

    pub fn is_clickable(&self) -> bool {
        self.on_click.is_some() && !self.disabled
    }

    pub fn is_deletable(&self) -> bool {
        self.on_delete.is_some()
    }

    fn palette(&self, cx: &App) -> ChipPalette {
        let colors = &cx.get_theme().variants.active(cx).colors;

        let (base, on_base) = match self.color.accent() {
            Some(accent) => (accent.resolve(cx), colors.accent.contrast),
            None => (ThemeLayerKind::Tertiary.next().resolve(cx), colors.text.primary),
        };

        ChipPalette::new(self.variant, base, on_base, self.background_color)
    }
}

impl ClickBehaviorExt for Chip {
    fn click_behavior_mut(&mut self) -> &mut ClickBehavior {
        &mut self.click_behavior
    }
}

impl RenderOnce for Chip {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let palette = self.palette(cx);
        let is_clickable = self.is_clickable();
        let is_disabled = self.disabled;
        let height = self.size.height();
        let radius = self.shape.radius();
        let icon_size = self.size.avatar_size() * 0.75;

        let states = InteractionStates::use_keyed(&self.id, window, cx);
        let is_hover = is_clickable && states.is_hover(cx);
        let is_click_down = is_clickable && states.is_click_down(cx);
        states.blur_if_disabled(window, is_disabled);

        let disabled_transition = disabled_transition(self.id.clone(), window, cx, is_disabled);

        let hover_mix = match self.variant {
            ChipVariant::Filled => palette.text,
            ChipVariant::Outlined => palette.border.alpha(0.12),
        };

        let bg_transition = conditional_transition!(
            self.id.with_suffix("state:transition:bg_color"),
            window,
            cx,
            Duration::from_millis(200),
            {
                is_click_down => palette.background.lerp(&hover_mix, 0.2),
                is_hover => palette.background.lerp(&hover_mix, 0.1),
                _ => palette.background
            }
        );

        let label = self.label.clone();
        let avatar = self.avatar.clone().map(|avatar| {
            let initial = avatar
                .initial
                .clone()
                .unwrap_or_else(|| crate::components::fallback_initial(Some(&label)));

            Avatar::new(self.id.with_suffix("avatar"))
                .custom_size(self.size.avatar_size())
                .img_name(initial)
                .alt(avatar.alt.clone().unwrap_or_else(|| label.clone()))
                .when_some(avatar.src.clone(), |this, src| this.src(src))
        });

        let delete_icon = self
            .delete_icon
            .clone()
            .unwrap_or_else(|| MosaicIconKind::Close.into());

        div()
            .id(self.id.clone())
            .relative()
            .flex()
            .flex_none()
            .items_center()
            .gap(px(6.))
            .h(height)
            .pl(if avatar.is_some() {
                px(4.)
            } else {
                self.size.horizontal_padding()
            })
            .pr(if self.is_deletable() {
                px(4.)
            } else {
                self.size.horizontal_padding()
            })
            .rounded(radius)
            .border_1()
            .border_color(palette.border)
            .bg(*bg_transition.evaluate(window, cx))
            .opacity(*disabled_transition.evaluate(window, cx))
            .cursor(if is_disabled {
                CursorStyle::OperationNotAllowed
            } else if is_clickable {
                CursorStyle::PointingHand
            } else {
                CursorStyle::Arrow
            })
            .when(is_clickable, |this| {
                this.child(
                    FocusRing::new(self.id.with_suffix("focus_ring"), states.focus_handle.clone())
                        .rounded(radius),
                )
            })
            .children(avatar)
            .when_some(self.custom_icon, |this, icon| {
                this.child(Icon::new(icon).size(icon_size).color(palette.text).flex_none())
            })
            .child(
                min_w0_wrapper()
                    .text_kind(ThemeTextSizeKind::Caption)
                    .text_color(palette.text)
                    .text_ellipsis()
                    .child(self.label),
            )
            .when_some(
                self.on_delete.filter(|_| !is_disabled),
                |this, on_delete| {
                    let behavior = self.click_behavior;

                    this.child(
                        div()
                            .id(self.id.with_suffix("delete"))
                            .flex_none()
                            .cursor(CursorStyle::PointingHand)
                            .opacity(0.7)
                            .hover(|this| this.opacity(1.))
                            .child(Icon::new(delete_icon).size(icon_size).color(palette.text))
                            .map(|this| {
                                #[cfg(feature = "test-support")]
                                let this = {
                                    let selector = format!("{}:delete", self.id);
                                    this.debug_selector(move || selector)
                                };
                                this
                            })
                            .on_mouse_down(MouseButton::Left, |_event, window, cx| {
                                window.prevent_default();
                                cx.stop_propagation();
                            })
                            .on_click(move |event, window, cx| {
                                // Never reaches the chip's own click handler.
                                cx.stop_propagation();
                                behavior.apply(window, cx);
                                (on_delete)(event, window, cx);
                            }),
                    )
                },
            )
            .when(is_clickable, |this| {
                let behavior = self.click_behavior;
                let states_on_hover = states.clone();
                let states_on_mouse_down = states.clone();
                let focus_handle = states.focus_handle.clone();
                let on_click = self.on_click;

                this.on_hover(move |hover, _window, cx| {
                    states_on_hover.set_hover(cx, *hover);
                })
                .on_mouse_down(MouseButton::Left, move |_event, window, cx| {
                    window.prevent_default();
                    states_on_mouse_down.set_click_down(cx, true);
                })
                .on_click(move |event, window, cx| {
                    behavior.apply(window, cx);
                    states.set_click_down(cx, false);

                    if let Some(on_click) = on_click.as_ref() {
                        (on_click)(event, window, cx);
                    }
                })
                .track_focus(&focus_handle)
            })
    }
}
