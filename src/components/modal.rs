use std::rc::Rc;

use enum_assoc::Assoc;
use gpui::{
    AnyElement, App, CursorStyle, ElementId, FocusHandle, InteractiveElement, IntoElement,
    MouseButton, ParentElement, Pixels, RenderOnce, SharedString, Size,
    StatefulInteractiveElement, Styled, Window, div, prelude::FluentBuilder, px, size,
};
use smallvec::SmallVec;

use crate::{
    MosaicIconKind,
    components::{Icon, Typography, TypographyVariant},
    extensions::{
        deferrable::{Deferrable, DeferredConfig, pin_to_window, priority},
        dismiss::Dismiss,
    },
    theme::{ThemeExt, ThemeLayerKind},
    utils::{
        ElementIdExt, FocusHandoff, FocusMemory, RgbaExt, rgb_a, sync_overlay_focus,
        visibility_transition,
    },
};

const SECTION_MIN_HEIGHT: Pixels = px(64.);
const BODY_PADDING: Pixels = px(16.);
/// Share of the viewport a centered modal may cover.
const VIEWPORT_FRACTION: f32 = 0.9;
const BACKDROP_ALPHA: f32 = 0.5;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModalType {
    #[default]
    Center,
    /// A full height panel on the right edge of the window.
    Side,
}

#[derive(Assoc, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[func(pub fn center_width(&self) -> Pixels)]
#[func(pub fn side_width(&self) -> Pixels)]
pub enum ModalSize {
    #[assoc(center_width = px(400.))]
    #[assoc(side_width = px(320.))]
    Sm,
    #[default]
    #[assoc(center_width = px(600.))]
    #[assoc(side_width = px(480.))]
    Md,
    #[assoc(center_width = px(800.))]
    #[assoc(side_width = px(640.))]
    Lg,
    #[assoc(center_width = px(1000.))]
    #[assoc(side_width = px(800.))]
    Xl,
    #[assoc(center_width = px(1200.))]
    #[assoc(side_width = px(960.))]
    Xxl,
}

fn min_pixels(a: Pixels, b: Pixels) -> Pixels {
    if a < b { a } else { b }
}

/// Width and maximum height of the dialog for a viewport.
pub fn dialog_bounds(
    kind: ModalType,
    modal_size: ModalSize,
    viewport: Size<Pixels>,
) -> Size<Pixels> {
    match kind {
        ModalType::Center => size(
            min_pixels(modal_size.center_width(), viewport.width * VIEWPORT_FRACTION),
            viewport.height * VIEWPORT_FRACTION,
        ),
        ModalType::Side => size(
            min_pixels(modal_size.side_width(), viewport.width),
            viewport.height,
        ),
    }
}

/// Why a modal asked to be closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalCloseReason {
    Escape,
    Backdrop,
    CloseButton,
}

type OnClose = Rc<dyn Fn(&ModalCloseReason, &mut Window, &mut App)>;

fn emit_close(
    on_close: Option<&OnClose>,
    reason: ModalCloseReason,
    window: &mut Window,
    cx: &mut App,
) {
    tracing::debug!(?reason, "closing modal");

    if let Some(on_close) = on_close {
        on_close(&reason, window, cx);
    }
}

/// A dialog drawn above the rest of the window on a dimmed backdrop.
#[derive(IntoElement)]
pub struct Modal {
    id: ElementId,
    open: bool,
    kind: ModalType,
    size: ModalSize,
    title: Option<SharedString>,
    header: Option<AnyElement>,
    footer: Option<AnyElement>,
    show_close_button: bool,
    close_on_backdrop_click: bool,
    on_close: Option<OnClose>,
    layer: ThemeLayerKind,
    focus_handle: Option<FocusHandle>,
    deferred_config: DeferredConfig,
    children: SmallVec<[AnyElement; 2]>,
}

impl Modal {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            open: false,
            kind: ModalType::default(),
            size: ModalSize::default(),
            title: None,
            header: None,
            footer: None,
            show_close_button: true,
            close_on_backdrop_click: true,
            on_close: None,
            layer: ThemeLayerKind::Secondary,
            focus_handle: None,
            deferred_config: DeferredConfig::default(),
            children: SmallVec::new(),
        }
    }

    pub fn open(mut self, open: bool) -> Self {
        self.open = open;
        self
    }

    pub fn kind(mut self, kind: ModalType) -> Self {
        self.kind = kind;
        self
    }

    pub fn size(mut self, size: ModalSize) -> Self {
        self.size = size;
        self
    }

    pub fn title(mut self, title: impl Into<SharedString>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the title row and its close button.
    pub fn header(mut self, header: impl IntoElement) -> Self {
        self.header = Some(header.into_any_element());
        self
    }

    pub fn footer(mut self, footer: impl IntoElement) -> Self {
        self.footer = Some(footer.into_any_element());
        self
    }

    pub fn show_close_button(mut self, show_close_button: bool) -> Self {
        self.show_close_button = show_close_button;
        self
    }

    pub fn close_on_backdrop_click(mut self, close_on_backdrop_click: bool) -> Self {
        self.close_on_backdrop_click = close_on_backdrop_click;
        self
    }

    pub fn on_close(
        mut self,
        on_close: impl Fn(&ModalCloseReason, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_close = Some(Rc::new(on_close));
        self
    }

    pub fn layer(mut self, layer: ThemeLayerKind) -> Self {
        self.layer = layer;
        self
    }

    pub fn focus_handle(mut self, focus_handle: FocusHandle) -> Self {
        self.focus_handle = Some(focus_handle);
        self
    }

    fn render_header(&mut self, cx: &App) -> Option<AnyElement> {
        if let Some(header) = self.header.take() {
            return Some(header);
        }

        if self.title.is_none() && !self.show_close_button {
            return None;
        }

        let text_color = cx.get_theme().variants.active(cx).colors.text.secondary;
        let on_close = self.on_close.clone();

        let header = div()
            .flex()
            .items_center()
            .justify_between()
            .gap(px(12.))
            .w_full()
            .children(self.title.clone().map(|title| {
                Typography::new(title)
                    .variant(TypographyVariant::ComponentName)
                    .no_wrap(true)
            }))
            .when(self.show_close_button, |this| {
                this.child(
                    div()
                        .id(self.id.with_suffix("close"))
                        .flex_none()
                        .p(px(6.))
                        .rounded(px(4.))
                        .cursor(CursorStyle::PointingHand)
                        .hover(|style| style.bg(text_color.alpha(0.1)))
                        .child(Icon::new(MosaicIconKind::Close).size(px(18.)).color(text_color))
                        .on_click(move |_event, window, cx| {
                            cx.stop_propagation();
                            emit_close(
                                on_close.as_ref(),
                                ModalCloseReason::CloseButton,
                                window,
                                cx,
                            );
                        }),
                )
            });

        Some(header.into_any_element())
    }
}

impl Deferrable for Modal {
    const DEFAULT_PRIORITY: usize = priority::MODAL;

    fn deferred_config(&self) -> &DeferredConfig {
        &self.deferred_config
    }

    fn deferred_config_mut(&mut self) -> &mut DeferredConfig {
        &mut self.deferred_config
    }
}

impl ParentElement for Modal {
    fn extend(&mut self, elements: impl IntoIterator<Item = AnyElement>) {
        self.children.extend(elements);
    }
}

impl RenderOnce for Modal {
    fn render(mut self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let visible_delta =
            *visibility_transition(self.id.clone(), window, cx, self.open).evaluate(window, cx);

        let focus_handle = match self.focus_handle.take() {
            Some(focus_handle) => focus_handle,
            None => window
                .use_keyed_state(self.id.with_suffix("state:focus_handle"), cx, |_window, cx| {
                    cx.focus_handle()
                })
                .read(cx)
                .clone(),
        };

        let focus_memory = FocusMemory::use_keyed(&self.id, window, cx);
        sync_overlay_focus(
            &focus_memory,
            self.open,
            &focus_handle,
            FocusHandoff::default(),
            window,
            cx,
        );

        if !self.open && visible_delta == 0. {
            return div().into_any_element();
        }

        let viewport = window.viewport_size();
        let bounds = dialog_bounds(self.kind, self.size, viewport);
        let background = self.layer.resolve(cx);
        let border_color = self.layer.next().resolve(cx);
        let corner_radius = cx.get_theme().layout.corner_radii.lg;
        let is_side = self.kind == ModalType::Side;

        let header = self.render_header(cx);
        let footer = self.footer.take();

        let on_close_escape = self.on_close.clone();
        let on_close_backdrop = self.on_close.clone();
        let close_on_backdrop_click = self.close_on_backdrop_click;

        let dialog = div()
            .id(self.id.clone())
            .key_context("Modal")
            .track_focus(&focus_handle)
            .on_action(move |_: &Dismiss, window, cx| {
                emit_close(on_close_escape.as_ref(), ModalCloseReason::Escape, window, cx);
            })
            .on_mouse_down(MouseButton::Left, |_event, _window, cx| {
                cx.stop_propagation();
            })
            .flex()
            .flex_col()
            .w(bounds.width)
            .max_h(bounds.height)
            .when(is_side, |this| this.h(bounds.height).border_l_1())
            .when(!is_side, |this| this.rounded(corner_radius).border_1())
            .border_color(border_color)
            .bg(background)
            .shadow_lg()
            .overflow_hidden()
            .children(header.map(|header| {
                div()
                    .flex()
                    .flex_none()
                    .items_center()
                    .min_h(SECTION_MIN_HEIGHT)
                    .px(BODY_PADDING)
                    .border_b_1()
                    .border_color(border_color)
                    .child(header)
            }))
            .child(
                div()
                    .id(self.id.with_suffix("body"))
                    .flex_1()
                    .min_h_0()
                    .overflow_y_scroll()
                    .p(BODY_PADDING)
                    .children(self.children.drain(..)),
            )
            .children(footer.map(|footer| {
                div()
                    .flex()
                    .flex_none()
                    .items_center()
                    .justify_end()
                    .gap(px(8.))
                    .min_h(SECTION_MIN_HEIGHT)
                    .px(BODY_PADDING)
                    .border_t_1()
                    .border_color(border_color)
                    .child(footer)
            }));

        let backdrop = div()
            .id(self.id.with_suffix("backdrop"))
            .occlude()
            .w(viewport.width)
            .h(viewport.height)
            .flex()
            .bg(rgb_a(0x000000, BACKDROP_ALPHA))
            .opacity(visible_delta)
            .map(|this| {
                if is_side {
                    this.justify_end()
                } else {
                    this.items_center().justify_center()
                }
            })
            .on_mouse_down(MouseButton::Left, move |_event, window, cx| {
                if close_on_backdrop_click {
                    emit_close(
                        on_close_backdrop.as_ref(),
                        ModalCloseReason::Backdrop,
                        window,
                        cx,
                    );
                }
            })
            .child(dialog);

        self.apply_deferred(pin_to_window(backdrop))
    }
}

#[cfg(test)]
mod pure_tests {
    use super::*;

    #[test]
    fn test_widths() {
        let center = [400., 600., 800., 1000., 1200.];
        let side = [320., 480., 640., 800., 960.];
        let sizes = [
            ModalSize::Sm,
            ModalSize::Md,
            ModalSize::Lg,
            ModalSize::Xl,
            ModalSize::Xxl,
        ];

        for ((modal_size, center), side) in sizes.into_iter().zip(center).zip(side) {
            assert_eq!(modal_size.center_width(), px(center));
            assert_eq!(modal_size.side_width(), px(side));
        }

        assert_eq!(ModalSize::default(), ModalSize::Md);
    }

    #[test]
    fn test_center_dialog_is_limited_by_viewport() {
        let viewport = size(px(1000.), px(800.));

        let bounds = dialog_bounds(ModalType::Center, ModalSize::Md, viewport);
        assert_eq!(bounds.width, px(600.));
        assert_eq!(bounds.height, px(720.));

        let bounds = dialog_bounds(ModalType::Center, ModalSize::Xxl, viewport);
        assert_eq!(bounds.width, px(900.));
    }

    #[test]
    fn test_side_dialog_is_full_height() {
        let viewport = size(px(1000.), px(800.));

        let bounds = dialog_bounds(ModalType::Side, ModalSize::Lg, viewport);
        assert_eq!(bounds.width, px(640.));
        assert_eq!(bounds.height, px(800.));

        let narrow = size(px(300.), px(800.));
        let bounds = dialog_bounds(ModalType::Side, ModalSize::Sm, narrow);
        assert_eq!(bounds.width, px(300.));
    }

    #[test]
    fn test_defaults() {
        let modal = Modal::new("modal");
        assert!(modal.show_close_button);
        assert!(modal.close_on_backdrop_click);
        assert_eq!(modal.kind, ModalType::Center);
        assert_eq!(modal.resolved_priority(), priority::MODAL);
    }
}
