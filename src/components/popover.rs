use std::rc::Rc;

use gpui::{
    AnyElement, App, Bounds, ElementId, Entity, InteractiveElement, IntoElement,
    ParentElement, PathBuilder, Pixels, Point, RenderOnce, Rgba, Size, StatefulInteractiveElement,
    Styled, Window, anchored, canvas, div, point, prelude::FluentBuilder, px,
};
use smallvec::SmallVec;

use crate::{
    extensions::{
        deferrable::{Deferrable, DeferredConfig, priority},
        dismiss::Dismiss,
    },
    theme::{ThemeExt, ThemeLayerKind},
    utils::{ElementIdExt, FocusHandoff, FocusMemory, sync_overlay_focus, visibility_transition},
};

const ARROW_SIZE: Pixels = px(8.);
const ARROW_INSET: Pixels = px(16.);
const CONTENT_PADDING: Pixels = px(16.);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PopoverVertical {
    Top,
    Center,
    #[default]
    Bottom,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PopoverHorizontal {
    #[default]
    Left,
    Center,
    Right,
}

/// A point on a rectangle, named by its vertical and horizontal position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PopoverOrigin {
    pub vertical: PopoverVertical,
    pub horizontal: PopoverHorizontal,
}

impl PopoverOrigin {
    pub const fn new(vertical: PopoverVertical, horizontal: PopoverHorizontal) -> Self {
        Self {
            vertical,
            horizontal,
        }
    }

    pub const BOTTOM_LEFT: Self = Self::new(PopoverVertical::Bottom, PopoverHorizontal::Left);
    pub const TOP_LEFT: Self = Self::new(PopoverVertical::Top, PopoverHorizontal::Left);

    /// The point this origin names on `bounds`.
    pub fn point_on(&self, bounds: Bounds<Pixels>) -> Point<Pixels> {
        let x = match self.horizontal {
            PopoverHorizontal::Left => bounds.left(),
            PopoverHorizontal::Center => bounds.left() + bounds.size.width / 2.,
            PopoverHorizontal::Right => bounds.right(),
        };
        let y = match self.vertical {
            PopoverVertical::Top => bounds.top(),
            PopoverVertical::Center => bounds.top() + bounds.size.height / 2.,
            PopoverVertical::Bottom => bounds.bottom(),
        };

        point(x, y)
    }
}

/// Top-left corner of the popover so that its `transform_origin` point lands
/// on the `anchor_origin` point of the trigger.
pub fn popover_position(
    trigger: Bounds<Pixels>,
    content: Size<Pixels>,
    anchor_origin: PopoverOrigin,
    transform_origin: PopoverOrigin,
) -> Point<Pixels> {
    let anchor = anchor_origin.point_on(trigger);
    let offset = transform_origin.point_on(Bounds::new(point(px(0.), px(0.)), content));

    point(anchor.x - offset.x, anchor.y - offset.y)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArrowAlign {
    /// Inset from the leading edge.
    Start,
    Center,
    /// Inset from the trailing edge.
    End,
}

/// Edge of the popover the arrow sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArrowPlacement {
    Top(ArrowAlign),
    Bottom(ArrowAlign),
    Left,
    Right,
}

/// The arrow points back at the anchor: below a top anchor, above a bottom one,
/// and beside it for vertically centered anchors.
pub fn arrow_placement(anchor_origin: PopoverOrigin) -> Option<ArrowPlacement> {
    let align = match anchor_origin.horizontal {
        PopoverHorizontal::Left => ArrowAlign::Start,
        PopoverHorizontal::Center => ArrowAlign::Center,
        PopoverHorizontal::Right => ArrowAlign::End,
    };

    match (anchor_origin.vertical, anchor_origin.horizontal) {
        (PopoverVertical::Top, _) => Some(ArrowPlacement::Bottom(align)),
        (PopoverVertical::Bottom, _) => Some(ArrowPlacement::Top(align)),
        (PopoverVertical::Center, PopoverHorizontal::Left) => Some(ArrowPlacement::Right),
        (PopoverVertical::Center, PopoverHorizontal::Right) => Some(ArrowPlacement::Left),
        (PopoverVertical::Center, PopoverHorizontal::Center) => None,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shadow {
    None,
    Small,
    Medium,
    Large,
    ExtraLarge,
}

pub fn elevation_shadow(elevation: u8) -> Shadow {
    match elevation {
        0 => Shadow::None,
        1..=4 => Shadow::Small,
        5..=12 => Shadow::Medium,
        13..=20 => Shadow::Large,
        _ => Shadow::ExtraLarge,
    }
}

/// Floating content attached to a trigger element.
#[derive(IntoElement)]
pub struct Popover {
    id: ElementId,
    anchor: Option<AnyElement>,
    open: bool,
    on_close: Option<Rc<dyn Fn(&mut Window, &mut App)>>,
    anchor_origin: PopoverOrigin,
    transform_origin: PopoverOrigin,
    show_arrow: bool,
    elevation: u8,
    max_width: Option<Pixels>,
    min_width: Option<Pixels>,
    max_height: Option<Pixels>,
    disable_auto_focus: bool,
    disable_restore_focus: bool,
    layer: ThemeLayerKind,
    deferred_config: DeferredConfig,
    children: SmallVec<[AnyElement; 2]>,
}

impl Popover {
    pub fn new(id: impl Into<ElementId>, anchor: impl IntoElement) -> Self {
        Self {
            id: id.into(),
            anchor: Some(anchor.into_any_element()),
            open: false,
            on_close: None,
            anchor_origin: PopoverOrigin::BOTTOM_LEFT,
            transform_origin: PopoverOrigin::TOP_LEFT,
            show_arrow: false,
            elevation: 8,
            max_width: None,
            min_width: None,
            max_height: None,
            disable_auto_focus: false,
            disable_restore_focus: false,
            layer: ThemeLayerKind::Secondary,
            deferred_config: DeferredConfig::default(),
            children: SmallVec::new(),
        }
    }

    pub fn open(mut self, open: bool) -> Self {
        self.open = open;
        self
    }

    pub fn on_close(mut self, on_close: impl Fn(&mut Window, &mut App) + 'static) -> Self {
        self.on_close = Some(Rc::new(on_close));
        self
    }

    pub fn anchor_origin(mut self, anchor_origin: PopoverOrigin) -> Self {
        self.anchor_origin = anchor_origin;
        self
    }

    pub fn transform_origin(mut self, transform_origin: PopoverOrigin) -> Self {
        self.transform_origin = transform_origin;
        self
    }

    pub fn show_arrow(mut self, show_arrow: bool) -> Self {
        self.show_arrow = show_arrow;
        self
    }

    pub fn elevation(mut self, elevation: u8) -> Self {
        self.elevation = elevation;
        self
    }

    pub fn max_width(mut self, max_width: impl Into<Pixels>) -> Self {
        self.max_width = Some(max_width.into());
        self
    }

    pub fn min_width(mut self, min_width: impl Into<Pixels>) -> Self {
        self.min_width = Some(min_width.into());
        self
    }

    /// Content scrolls once it grows taller than this.
    pub fn max_height(mut self, max_height: impl Into<Pixels>) -> Self {
        self.max_height = Some(max_height.into());
        self
    }

    pub fn disable_auto_focus(mut self, disable_auto_focus: bool) -> Self {
        self.disable_auto_focus = disable_auto_focus;
        self
    }

    pub fn disable_restore_focus(mut self, disable_restore_focus: bool) -> Self {
        self.disable_restore_focus = disable_restore_focus;
        self
    }

    pub fn layer(mut self, layer: ThemeLayerKind) -> Self {
        self.layer = layer;
        self
    }
}

impl Deferrable for Popover {
    const DEFAULT_PRIORITY: usize = priority::POPOVER;

    fn deferred_config(&self) -> &DeferredConfig {
        &self.deferred_config
    }

    fn deferred_config_mut(&mut self) -> &mut DeferredConfig {
        &mut self.deferred_config
    }
}

impl ParentElement for Popover {
    fn extend(&mut self, elements: impl IntoIterator<Item = AnyElement>) {
        self.children.extend(elements);
    }
}

/// Records the bounds an element was laid out at, refreshing the window when they change.
fn track_bounds(state: Entity<Option<Bounds<Pixels>>>) -> impl IntoElement {
    canvas(
        move |bounds, window, cx| {
            if state.read(cx) != &Some(bounds) {
                state.update(cx, |this, _cx| *this = Some(bounds));
                window.refresh();
            }
        },
        |_bounds, _, _window, _cx| {},
    )
    .absolute()
    .size_full()
}

fn arrow(placement: ArrowPlacement, color: Rgba) -> impl IntoElement {
    let is_vertical_edge = matches!(placement, ArrowPlacement::Left | ArrowPlacement::Right);

    let shape = canvas(
        |_bounds, _window, _cx| {},
        move |bounds, _, window, _cx| {
            let (left, top, right, bottom) =
                (bounds.left(), bounds.top(), bounds.right(), bounds.bottom());
            let mid_x = left + bounds.size.width / 2.;
            let mid_y = top + bounds.size.height / 2.;

            let (tip, base_a, base_b) = match placement {
                ArrowPlacement::Top(_) => {
                    (point(mid_x, top), point(left, bottom), point(right, bottom))
                }
                ArrowPlacement::Bottom(_) => {
                    (point(mid_x, bottom), point(left, top), point(right, top))
                }
                ArrowPlacement::Left => {
                    (point(left, mid_y), point(right, top), point(right, bottom))
                }
                ArrowPlacement::Right => {
                    (point(right, mid_y), point(left, top), point(left, bottom))
                }
            };

            let mut builder = PathBuilder::fill();
            builder.move_to(tip);
            builder.line_to(base_a);
            builder.line_to(base_b);
            builder.close();

            if let Ok(path) = builder.build() {
                window.paint_path(path, gpui::Hsla::from(color));
            }
        },
    )
    .absolute()
    .map(|this| {
        if is_vertical_edge {
            this.w(ARROW_SIZE).h(ARROW_SIZE * 2.)
        } else {
            this.w(ARROW_SIZE * 2.).h(ARROW_SIZE)
        }
    });

    let align = |this: gpui::Canvas<()>, align: ArrowAlign| match align {
        ArrowAlign::Start => this.left(ARROW_INSET),
        ArrowAlign::End => this.right(ARROW_INSET),
        ArrowAlign::Center => this.left(gpui::relative(0.5)).ml(-ARROW_SIZE),
    };

    match placement {
        ArrowPlacement::Top(alignment) => align(shape.top(-ARROW_SIZE), alignment),
        ArrowPlacement::Bottom(alignment) => align(shape.bottom(-ARROW_SIZE), alignment),
        ArrowPlacement::Left => shape
            .left(-ARROW_SIZE)
            .top(gpui::relative(0.5))
            .mt(-ARROW_SIZE),
        ArrowPlacement::Right => shape
            .right(-ARROW_SIZE)
            .top(gpui::relative(0.5))
            .mt(-ARROW_SIZE),
    }
}

impl RenderOnce for Popover {
    fn render(mut self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let trigger_bounds = window.use_keyed_state(
            self.id.with_suffix("state:trigger_bounds"),
            cx,
            |_window, _cx| None,
        );
        let content_bounds = window.use_keyed_state(
            self.id.with_suffix("state:content_bounds"),
            cx,
            |_window, _cx| None,
        );
        let focus_memory = FocusMemory::use_keyed(&self.id, window, cx);
        let focus_handle = window
            .use_keyed_state(self.id.with_suffix("state:focus_handle"), cx, |_window, cx| {
                cx.focus_handle()
            })
            .read(cx)
            .clone();

        sync_overlay_focus(
            &focus_memory,
            self.open,
            &focus_handle,
            FocusHandoff {
                auto_focus: !self.disable_auto_focus,
                restore_focus: !self.disable_restore_focus,
            },
            window,
            cx,
        );

        let visible_delta =
            *visibility_transition(self.id.clone(), window, cx, self.open).evaluate(window, cx);

        let trigger = div()
            .relative()
            .children(self.anchor.take())
            .child(track_bounds(trigger_bounds.clone()));

        let is_visible = self.open || visible_delta > 0.;
        let measured = (*trigger_bounds.read(cx)).zip(*content_bounds.read(cx));

        if !is_visible {
            return trigger.into_any_element();
        }

        let position = match measured {
            Some((trigger, content)) => popover_position(
                trigger,
                content.size,
                self.anchor_origin,
                self.transform_origin,
            ),
            None => point(px(0.), px(0.)),
        };

        let background = self.layer.resolve(cx);
        let border_color = self.layer.next().resolve(cx);
        let corner_radius = cx.get_theme().layout.corner_radii.md;
        let shadow = elevation_shadow(self.elevation);
        let arrow_placement = arrow_placement(self.anchor_origin).filter(|_| self.show_arrow);

        let on_close_escape = self.on_close.clone();
        let on_close_outside = self.on_close.clone();

        let content = div()
            .id(self.id.clone())
            .key_context("Popover")
            .track_focus(&focus_handle)
            .occlude()
            .relative()
            .rounded(corner_radius)
            .border_1()
            .border_color(border_color)
            .bg(background)
            .opacity(if measured.is_some() { visible_delta } else { 0. })
            .map(|this| match shadow {
                Shadow::None => this,
                Shadow::Small => this.shadow_sm(),
                Shadow::Medium => this.shadow_md(),
                Shadow::Large => this.shadow_lg(),
                Shadow::ExtraLarge => this.shadow_xl(),
            })
            .when_some(self.max_width, |this, width| this.max_w(width))
            .when_some(self.min_width, |this, width| this.min_w(width))
            .on_action(move |_: &Dismiss, window, cx| {
                tracing::debug!("popover dismissed with escape");
                if let Some(on_close) = on_close_escape.as_ref() {
                    on_close(window, cx);
                }
            })
            .on_mouse_down_out(move |_event, window, cx| {
                tracing::debug!("popover dismissed by outside click");
                if let Some(on_close) = on_close_outside.as_ref() {
                    on_close(window, cx);
                }
            })
            .child(track_bounds(content_bounds))
            .children(arrow_placement.map(|placement| arrow(placement, background)))
            .child(
                div()
                    .id(self.id.with_suffix("content"))
                    .p(CONTENT_PADDING)
                    .when_some(self.max_height, |this, height| {
                        this.max_h(height).overflow_y_scroll()
                    })
                    .children(self.children.drain(..)),
            );

        let overlay = anchored()
            .position_mode(gpui::AnchoredPositionMode::Window)
            .position(position)
            .snap_to_window()
            .child(content);

        trigger
            .child(self.apply_deferred(overlay))
            .into_any_element()
    }
}


#[cfg(all(test, feature = "test-support"))]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;
    use crate::theme::Theme;
    use gpui::{AppContext, Context, FocusHandle, Render, TestAppContext, VisualTestContext};

    struct PopoverTestView {
        open: bool,
        closed: Rc<Cell<usize>>,
        trigger_focus: FocusHandle,
    }

    impl Render for PopoverTestView {
        fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
            let closed = self.closed.clone();
            let view = cx.entity().downgrade();

            div().size_full().child(
                Popover::new(
                    "popover",
                    div().track_focus(&self.trigger_focus).child("Trigger"),
                )
                .open(self.open)
                .show_arrow(true)
                .on_close(move |_window, cx| {
                    closed.set(closed.get() + 1);
                    let _ = view.update(cx, |view, cx| {
                        view.open = false;
                        cx.notify();
                    });
                })
                .child("Content"),
            )
        }
    }

    #[gpui::test]
    fn test_escape_closes_and_restores_focus(cx: &mut TestAppContext) {
        let window = cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);
            crate::init(cx);

            cx.open_window(Default::default(), |_window, cx| {
                cx.new(|cx| PopoverTestView {
                    open: false,
                    closed: Rc::default(),
                    trigger_focus: cx.focus_handle(),
                })
            })
            .unwrap()
        });

        let view = window.root(cx).unwrap();
        let mut vcx = VisualTestContext::from_window(window.into(), cx);
        vcx.run_until_parked();

        vcx.update(|window, cx| {
            let trigger_focus = view.read(cx).trigger_focus.clone();
            trigger_focus.focus(window, cx);
            view.update(cx, |view, cx| {
                view.open = true;
                cx.notify();
            });
        });
        vcx.run_until_parked();

        vcx.update(|window, cx| {
            let trigger_focus = view.read(cx).trigger_focus.clone();
            assert!(!trigger_focus.is_focused(window), "Popover takes focus");
            window.dispatch_action(Box::new(Dismiss), cx);
        });
        vcx.run_until_parked();

        vcx.update(|window, cx| {
            let view = view.read(cx);
            assert_eq!(view.closed.get(), 1);
            assert!(!view.open);
            assert!(view.trigger_focus.is_focused(window), "Focus is restored");
        });
    }
}
