use gpui::{
    App, CursorStyle, ElementId, Entity, InteractiveElement, IntoElement, MouseButton,
    ParentElement, RenderOnce, StatefulInteractiveElement, Styled, Window, div,
    prelude::FluentBuilder, px,
};
use gpui_squircle::{SquircleStyled, squircle};

use crate::{
    MosaicIconKind,
    components::{Icon, input_field::InputFieldSize},
    extensions::deferrable::{Deferrable, DeferredConfig, priority},
    primitives::min_w0_wrapper,
    theme::{ThemeExt, ThemeLayerKind, ThemeTextSizeKind},
    utils::{DISABLED_OPACITY, ElementIdExt, RgbaExt},
};

use super::SelectController;

/// The option list of an open [`Select`](super::Select).
#[derive(IntoElement)]
pub(super) struct SelectMenu {
    id: ElementId,
    controller: SelectController,
    layer: ThemeLayerKind,
    size: InputFieldSize,
    opacity: f32,
    trigger_hover: Option<Entity<bool>>,
    deferred_config: DeferredConfig,
}

impl SelectMenu {
    pub(super) fn new(id: impl Into<ElementId>, controller: SelectController) -> Self {
        Self {
            id: id.into(),
            controller,
            layer: ThemeLayerKind::Tertiary,
            size: InputFieldSize::default(),
            opacity: 1.,
            trigger_hover: None,
            deferred_config: DeferredConfig::default(),
        }
    }

    pub(super) fn layer(mut self, layer: ThemeLayerKind) -> Self {
        self.layer = layer;
        self
    }

    pub(super) fn size(mut self, size: InputFieldSize) -> Self {
        self.size = size;
        self
    }

    pub(super) fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Clicks on the trigger toggle the menu themselves, so they don't count
    /// as clicks outside.
    pub(super) fn trigger_hover(mut self, hover: Entity<bool>) -> Self {
        self.trigger_hover = Some(hover);
        self
    }
}

impl Deferrable for SelectMenu {
    const DEFAULT_PRIORITY: usize = priority::SELECT_MENU;

    fn deferred_config(&self) -> &DeferredConfig {
        &self.deferred_config
    }

    fn deferred_config_mut(&mut self) -> &mut DeferredConfig {
        &mut self.deferred_config
    }
}

impl RenderOnce for SelectMenu {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let colors = &cx.get_theme().variants.active(cx).colors;
        let (primary_text_color, secondary_text_color) = colors.text.all();
        let primary_accent_color = colors.accent.primary;
        let background_color = self.layer.resolve(cx);
        let border_color = self.layer.next().resolve(cx);
        let corner_radius = cx.get_theme().layout.corner_radii.md;
        let padding = cx.get_theme().layout.padding.sm;
        let metrics = self.size.metrics(false, window, cx);
        let text_kind = match self.size {
            InputFieldSize::Small => ThemeTextSizeKind::Caption,
            InputFieldSize::Medium | InputFieldSize::Large => ThemeTextSizeKind::Body,
        };

        let highlighted = self.controller.menu.read(cx).highlighted;
        let controller = self.controller.clone();
        let trigger_hover = self.trigger_hover.clone();

        let menu = div()
            .id(self.id.clone())
            .occlude()
            .relative()
            .w_full()
            .flex()
            .flex_col()
            .p(padding)
            .opacity(self.opacity)
            .shadow_md()
            .on_mouse_down_out(move |_event, _window, cx| {
                let on_trigger = trigger_hover
                    .as_ref()
                    .is_some_and(|hover| *hover.read(cx));

                if !on_trigger {
                    tracing::debug!("select menu closed by outside click");
                    controller.close(cx);
                }
            })
            .child(
                squircle()
                    .absolute_expand()
                    .rounded(corner_radius)
                    .bg(background_color)
                    .border_color(border_color)
                    .border(px(1.))
                    .border_inside(),
            )
            .children(
                self.controller
                    .options
                    .iter()
                    .enumerate()
                    .map(|(ix, option)| {
                        let is_selected = self.controller.is_selected(&option.value);
                        let is_highlighted = highlighted == Some(ix);
                        let is_disabled = option.disabled;

                        let text_color = if is_selected && !self.controller.multiple {
                            primary_accent_color
                        } else {
                            primary_text_color
                        };

                        div()
                            .id(self.id.with_suffix("option").with_suffix(option.value.clone()))
                            .w_full()
                            .flex()
                            .items_center()
                            .gap(padding * 2.)
                            .pl(metrics.horizontal_padding - padding)
                            .pr(metrics.horizontal_padding - padding)
                            .py(padding * 2.)
                            .rounded(corner_radius - padding)
                            .when(is_highlighted, |this| {
                                this.bg(primary_accent_color.alpha(0.08))
                            })
                            .when(is_selected && !self.controller.multiple, |this| {
                                this.bg(primary_accent_color.alpha(0.14))
                            })
                            .when(self.controller.multiple, |this| {
                                this.child(
                                    div()
                                        .flex_none()
                                        .size(px(16.))
                                        .flex()
                                        .items_center()
                                        .justify_center()
                                        .when(is_selected, |this| {
                                            this.child(
                                                Icon::new(MosaicIconKind::Checkmark)
                                                    .size(px(12.))
                                                    .color(primary_accent_color),
                                            )
                                        }),
                                )
                            })
                            .child(
                                min_w0_wrapper()
                                    .text_kind(text_kind)
                                    .text_color(text_color)
                                    .whitespace_nowrap()
                                    .child(option.label.clone()),
                            )
                            .map(|this| {
                                if is_disabled {
                                    return this
                                        .opacity(DISABLED_OPACITY)
                                        .text_color(secondary_text_color)
                                        .cursor(CursorStyle::OperationNotAllowed);
                                }

                                let controller_hover = self.controller.clone();
                                let controller_click = self.controller.clone();

                                this.cursor(CursorStyle::PointingHand)
                                    .on_mouse_down(MouseButton::Left, |_event, window, _cx| {
                                        // Keeps focus on the trigger.
                                        window.prevent_default();
                                    })
                                    .on_hover(move |hovered, _window, cx| {
                                        if *hovered {
                                            controller_hover.highlight(ix, cx);
                                        }
                                    })
                                    .on_click(move |_event, window, cx| {
                                        controller_click.choose(ix, window, cx);
                                    })
                            })
                    }),
            );

        self.apply_deferred(menu)
    }
}
