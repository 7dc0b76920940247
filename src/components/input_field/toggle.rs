use std::{rc::Rc, time::Duration};

use enum_assoc::Assoc;
use gpui::{
    App, CursorStyle, ElementId, InteractiveElement, IntoElement, MouseButton, ParentElement,
    Pixels, RenderOnce, StatefulInteractiveElement, Styled, Window, div, prelude::FluentBuilder,
    px,
};
use gpui_squircle::{SquircleStyled, squircle};
use gpui_transitions::Lerp;

use crate::{
    components::input_field::{
        FieldChrome, FieldChromeExt, FormControl, InputFieldSize, label_text,
    },
    conditional_transition,
    primitives::{FocusRing, min_w0_wrapper},
    theme::{ThemeAccentKind, ThemeExt, ThemeLayerKind, ThemeTextSizeKind},
    utils::{
        ElementIdExt, InteractionStates, PixelsExt, RgbaExt, SquircleExt, checked_transition,
        disabled_transition,
    },
};

const THUMB_GROW_ON_FOCUS: f32 = 1.25;

/// Where a [`Toggle`]'s label sits relative to the switch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LabelPlacement {
    Start,
    #[default]
    End,
    Top,
    Bottom,
}

impl LabelPlacement {
    pub fn is_vertical(&self) -> bool {
        matches!(self, LabelPlacement::Top | LabelPlacement::Bottom)
    }

    /// Whether the label is laid out before the switch.
    pub fn is_leading(&self) -> bool {
        matches!(self, LabelPlacement::Start | LabelPlacement::Top)
    }
}

/// Track color of a checked [`Toggle`].
#[derive(Assoc, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[func(pub fn accent(&self) -> ThemeAccentKind)]
pub enum ToggleColor {
    #[default]
    #[assoc(accent = ThemeAccentKind::Primary)]
    Primary,
    #[assoc(accent = ThemeAccentKind::Secondary)]
    Secondary,
    #[assoc(accent = ThemeAccentKind::Destructive)]
    Error,
    #[assoc(accent = ThemeAccentKind::Warning)]
    Warning,
    #[assoc(accent = ThemeAccentKind::Info)]
    Info,
    #[assoc(accent = ThemeAccentKind::Constructive)]
    Success,
}

pub fn remap(value: f32, from_min: f32, from_max: f32, to_min: f32, to_max: f32) -> f32 {
    (value - from_min) / (from_max - from_min) * (to_max - to_min) + to_min
}

type CheckedCallback = Rc<dyn Fn(&bool, &mut Window, &mut App)>;

/// An on/off switch.
#[derive(IntoElement)]
pub struct Toggle {
    id: ElementId,
    layer: ThemeLayerKind,
    size: InputFieldSize,
    color: ToggleColor,
    label_placement: LabelPlacement,
    checked: Option<bool>,
    default_checked: bool,
    disabled: bool,
    chrome: FieldChrome,
    on_change: Option<CheckedCallback>,
}

impl Toggle {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            layer: ThemeLayerKind::Tertiary,
            size: InputFieldSize::default(),
            color: ToggleColor::default(),
            label_placement: LabelPlacement::default(),
            checked: None,
            default_checked: false,
            disabled: false,
            chrome: FieldChrome::default(),
            on_change: None,
        }
    }

    pub fn layer(mut self, layer: ThemeLayerKind) -> Self {
        self.layer = layer;
        self
    }

    pub fn size(mut self, size: InputFieldSize) -> Self {
        self.size = size;
        self
    }

    pub fn color(mut self, color: ToggleColor) -> Self {
        self.color = color;
        self
    }

    pub fn label_placement(mut self, label_placement: LabelPlacement) -> Self {
        self.label_placement = label_placement;
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = Some(checked);
        self
    }

    pub fn default_checked(mut self, default_checked: bool) -> Self {
        self.default_checked = default_checked;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn on_change(mut self, on_change: impl Fn(&bool, &mut Window, &mut App) + 'static) -> Self {
        self.on_change = Some(Rc::new(on_change));
        self
    }

    /// Thumb size and the gap around it.
    fn thumb_metrics(&self, cx: &App) -> (Pixels, Pixels) {
        let layout = &cx.get_theme().layout;
        match self.size {
            InputFieldSize::Small => (layout.size.sm, layout.padding.sm),
            InputFieldSize::Medium => (layout.size.md, layout.padding.sm + px(2.)),
            InputFieldSize::Large => (layout.size.md, layout.padding.md),
        }
    }
}

impl FieldChromeExt for Toggle {
    fn chrome_mut(&mut self) -> &mut FieldChrome {
        &mut self.chrome
    }
}

impl RenderOnce for Toggle {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let (thumb_size, padding) = self.thumb_metrics(cx);
        let width = (thumb_size * 2.) + (padding * 2.);
        let height = thumb_size + (padding * 2.);
        let (start_offset, end_offset) = (padding.as_f32(), (width - thumb_size - padding).as_f32());
        let gap = cx.get_theme().layout.padding.md;

        let colors = &cx.get_theme().variants.active(cx).colors;
        let (primary_text_color, secondary_text_color) = colors.text.all();
        let destructive_accent_color = colors.accent.destructive;
        let focus_color = colors.accent.primary;
        let track_color = self.color.accent().resolve(cx);
        let background_color = self.layer.resolve(cx);
        let border_color = self.layer.next().resolve(cx);
        let border_hover_color = border_color.lerp(&primary_text_color, 0.07);
        let border_click_down_color = border_color.lerp(&primary_text_color, 0.16);

        let default_checked = self.default_checked;
        let internal_checked = window.use_keyed_state(
            self.id.with_suffix("state:checked"),
            cx,
            move |_window, _cx| default_checked,
        );
        let is_controlled = self.checked.is_some();
        let checked = self
            .checked
            .unwrap_or_else(|| *internal_checked.read(cx));

        let checked_transition = checked_transition(
            self.id.clone(),
            window,
            cx,
            Duration::from_millis(200),
            checked,
        );

        let is_disabled = self.disabled;
        let interaction = InteractionStates::use_keyed(&self.id, window, cx);
        let is_hover = interaction.is_hover(cx);
        let is_click_down = interaction.is_click_down(cx);
        let is_focus = interaction.is_focus(window);
        interaction.blur_if_disabled(window, is_disabled);

        let disabled_transition = disabled_transition(self.id.clone(), window, cx, is_disabled);

        let border_color_transition = conditional_transition!(
            self.id.with_suffix("state:transition:border_color"),
            window,
            cx,
            Duration::from_millis(365),
            {
                is_focus => focus_color,
                is_click_down => border_click_down_color,
                is_hover => border_hover_color,
                _ => border_color
            }
        );

        let thumb_width_transition = conditional_transition!(
            self.id.with_suffix("state:transition:thumb_width"),
            window,
            cx,
            Duration::from_millis(185),
            {
                is_focus || is_click_down => px((thumb_size.as_f32() * THUMB_GROW_ON_FOCUS).floor()),
                _ => thumb_size
            }
        );

        let checked_delta = *checked_transition.evaluate(window, cx);
        let thumb_width = *thumb_width_transition.evaluate(window, cx);
        let offset = remap(checked_delta, 0., 1., start_offset, end_offset);
        let width_diff = (thumb_width - thumb_size) * checked_delta;

        let focus_handle = interaction.focus_handle.clone();
        let on_change = self.on_change.clone();

        let switch = div()
            .id(self.id.with_suffix("switch"))
            .relative()
            .flex_none()
            .w(width)
            .h(height)
            .child(
                FocusRing::new(self.id.with_suffix("focus_ring"), focus_handle.clone())
                    .rounded(px(100.)),
            )
            .child(
                squircle()
                    .absolute_expand()
                    .rounded(px(100.))
                    .bg(background_color)
                    .border(px(1.))
                    .border_inside()
                    .border_color(*border_color_transition.evaluate(window, cx)),
            )
            .child(
                squircle()
                    .absolute_expand()
                    .bg(track_color.alpha(checked_delta))
                    .rounded(px(100.))
                    .border_inside()
                    .border(px(1.))
                    .border_highlight(0.15 * checked_delta),
            )
            .child(
                div()
                    .absolute()
                    .w(thumb_width)
                    .h(thumb_size)
                    .top(padding)
                    .bg(primary_text_color)
                    .rounded(px(100.))
                    .left(px(offset) - width_diff),
            );

        let label_color = match (self.chrome.error, is_disabled) {
            (true, _) => destructive_accent_color,
            (false, true) => secondary_text_color,
            (false, false) => primary_text_color,
        };
        let label = self.chrome.label.as_ref().map(|label| {
            min_w0_wrapper()
                .text_kind(ThemeTextSizeKind::Body)
                .text_color(label_color)
                .child(label_text(label, self.chrome.required))
        });
        let placement = self.label_placement;
        let (leading_label, trailing_label) = if placement.is_leading() {
            (label, None)
        } else {
            (None, label)
        };

        let control = div()
            .id(self.id.clone())
            .flex()
            .map(|this| {
                if placement.is_vertical() {
                    this.flex_col().items_start()
                } else {
                    this.flex_row().items_center()
                }
            })
            .gap(gap)
            .cursor(if is_disabled {
                CursorStyle::OperationNotAllowed
            } else {
                CursorStyle::PointingHand
            })
            .opacity(*disabled_transition.evaluate(window, cx))
            .children(leading_label)
            .child(switch)
            .children(trailing_label)
            .when(!is_disabled, |this| {
                let hover_interaction = interaction.clone();
                let mouse_down_interaction = interaction.clone();
                let click_interaction = interaction.clone();

                this.on_hover(move |hover, _window, cx| {
                    hover_interaction.set_hover(cx, *hover);
                })
                .on_mouse_down(MouseButton::Left, move |_event, window, cx| {
                    window.prevent_default();
                    mouse_down_interaction.set_click_down(cx, true);
                })
                .on_click(move |_event, window, cx| {
                    if !is_focus {
                        window.blur();
                    }

                    click_interaction.set_click_down(cx, false);

                    if !is_controlled {
                        internal_checked.update(cx, |this, cx| {
                            *this = !checked;
                            cx.notify();
                        });
                    }

                    if let Some(on_change) = on_change.as_ref() {
                        on_change(&!checked, window, cx);
                    }
                })
                .on_mouse_up_out(MouseButton::Left, move |_event, _window, cx| {
                    interaction.reset_pointer(cx);
                })
                .track_focus(&focus_handle)
            });

        let chrome = FieldChrome {
            label: None,
            ..self.chrome
        };

        FormControl::new(chrome, control).disabled(is_disabled)
    }
}
