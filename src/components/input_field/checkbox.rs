use std::{rc::Rc, time::Duration};

use gpui::{
    App, CursorStyle, ElementId, InteractiveElement, IntoElement, MouseButton, ParentElement,
    RenderOnce, SharedString, StatefulInteractiveElement, Styled, Window, div,
    prelude::FluentBuilder, px, relative, svg,
};
use gpui_squircle::{SquircleStyled, squircle};
use gpui_transitions::Lerp;

use crate::{
    MosaicIconKind,
    components::input_field::{FieldChrome, FieldChromeExt, FormControl, label_text},
    conditional_transition,
    primitives::{FocusRing, min_w0_wrapper},
    theme::{ThemeExt, ThemeLayerKind, ThemeTextSizeKind},
    utils::{
        ElementIdExt, InteractionStates, RgbaExt, SquircleExt, checked_transition,
        disabled_transition,
    },
};

type CheckedCallback = Rc<dyn Fn(&bool, &mut Window, &mut App)>;

/// The value a click reports. An indeterminate box always becomes checked.
pub fn next_checked(checked: bool, indeterminate: bool) -> bool {
    indeterminate || !checked
}

#[derive(IntoElement)]
pub struct Checkbox {
    id: ElementId,
    layer: ThemeLayerKind,
    checked: Option<bool>,
    default_checked: bool,
    indeterminate: bool,
    disabled: bool,
    chrome: FieldChrome,
    on_change: Option<CheckedCallback>,
}

impl Checkbox {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            layer: ThemeLayerKind::Tertiary,
            checked: None,
            default_checked: false,
            indeterminate: false,
            disabled: false,
            chrome: FieldChrome::default(),
            on_change: None,
        }
    }

    pub fn layer(mut self, layer: ThemeLayerKind) -> Self {
        self.layer = layer;
        self
    }

    /// Controls the checked state.
    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = Some(checked);
        self
    }

    pub fn default_checked(mut self, default_checked: bool) -> Self {
        self.default_checked = default_checked;
        self
    }

    /// Shows a dash whatever the checked state is.
    pub fn indeterminate(mut self, indeterminate: bool) -> Self {
        self.indeterminate = indeterminate;
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
}

impl FieldChromeExt for Checkbox {
    fn chrome_mut(&mut self) -> &mut FieldChrome {
        &mut self.chrome
    }
}

impl RenderOnce for Checkbox {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let size = cx.get_theme().layout.size.md;
        let corner_radius = cx.get_theme().layout.corner_radii.sm;
        let gap = cx.get_theme().layout.padding.md;
        let colors = &cx.get_theme().variants.active(cx).colors;
        let primary_accent_color = colors.accent.primary;
        let destructive_accent_color = colors.accent.destructive;
        let contrast_color = colors.accent.contrast;
        let (primary_text_color, secondary_text_color) = colors.text.all();
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
        let indeterminate = self.indeterminate;

        let checked_transition = checked_transition(
            self.id.clone(),
            window,
            cx,
            Duration::from_millis(285),
            checked || indeterminate,
        );

        let is_disabled = self.disabled;
        let is_invalid = self.chrome.error;

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
                is_invalid => destructive_accent_color,
                is_focus => primary_accent_color,
                is_click_down => border_click_down_color,
                is_hover => border_hover_color,
                _ => border_color
            }
        );

        let checked_delta = *checked_transition.evaluate(window, cx);
        let icon = if indeterminate {
            MosaicIconKind::Dash
        } else {
            MosaicIconKind::Checkmark
        };

        let label_color = match (is_invalid, is_disabled) {
            (true, _) => destructive_accent_color,
            (false, true) => secondary_text_color,
            (false, false) => primary_text_color,
        };
        let label = self
            .chrome
            .label
            .as_ref()
            .map(|label| label_text(label, self.chrome.required));

        let focus_handle = interaction.focus_handle.clone();
        let on_change = self.on_change.clone();

        let control = div()
            .id(self.id.clone())
            .flex()
            .items_center()
            .gap(gap)
            .cursor(if is_disabled {
                CursorStyle::OperationNotAllowed
            } else {
                CursorStyle::PointingHand
            })
            .opacity(*disabled_transition.evaluate(window, cx))
            .child(
                div()
                    .relative()
                    .flex_none()
                    .size(size)
                    .flex()
                    .items_center()
                    .justify_center()
                    .child(
                        FocusRing::new(self.id.with_suffix("focus_ring"), focus_handle.clone())
                            .rounded(corner_radius),
                    )
                    .child(
                        squircle()
                            .absolute_expand()
                            .rounded(corner_radius)
                            .bg(background_color)
                            .border(px(1.))
                            .border_inside()
                            .border_color(*border_color_transition.evaluate(window, cx)),
                    )
                    .child(
                        squircle()
                            .absolute_expand()
                            .rounded(corner_radius)
                            .border(px(1.))
                            .border_inside()
                            .bg(primary_accent_color.alpha(checked_delta))
                            .border_highlight(checked_delta * 0.15),
                    )
                    .child(
                        svg()
                            .map(|mut this| {
                                this.style().aspect_ratio = Some(1.);
                                this
                            })
                            .size(relative(0.6))
                            .text_color(contrast_color.alpha(checked_delta))
                            .path(SharedString::from(icon)),
                    ),
            )
            .when_some(label, |this, label| {
                this.child(
                    min_w0_wrapper()
                        .text_kind(ThemeTextSizeKind::Body)
                        .text_color(label_color)
                        .child(label),
                )
            })
            .when(!is_disabled, |this| {
                let hover_interaction = interaction.clone();
                let mouse_down_interaction = interaction.clone();
                let click_interaction = interaction.clone();

                this.on_hover(move |hover, _window, cx| {
                    hover_interaction.set_hover(cx, *hover);
                })
                .on_mouse_down(MouseButton::Left, move |_event, window, cx| {
                    // Keeps the focus ring hidden for pointer clicks.
                    window.prevent_default();
                    mouse_down_interaction.set_click_down(cx, true);
                })
                .on_click(move |_event, window, cx| {
                    if !is_focus {
                        window.blur();
                    }

                    click_interaction.set_click_down(cx, false);

                    let next = next_checked(checked, indeterminate);
                    if !is_controlled {
                        internal_checked.update(cx, |this, cx| {
                            *this = next;
                            cx.notify();
                        });
                    }

                    if let Some(on_change) = on_change.as_ref() {
                        on_change(&next, window, cx);
                    }
                })
                .on_mouse_up_out(MouseButton::Left, move |_event, _window, cx| {
                    interaction.reset_pointer(cx);
                })
                .track_focus(&focus_handle)
            });

        // The label sits beside the box, so the form control only adds helper text.
        let chrome = FieldChrome {
            label: None,
            ..self.chrome
        };

        FormControl::new(chrome, control).disabled(is_disabled)
    }
}
