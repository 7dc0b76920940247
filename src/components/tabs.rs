use std::rc::Rc;

use gpui::{
    App, CursorStyle, ElementId, Entity, FocusHandle, InteractiveElement, IntoElement, KeyBinding,
    MouseButton, ParentElement, RenderOnce, Rgba, SharedString, StatefulInteractiveElement,
    Styled, Window, actions, div, prelude::FluentBuilder, px,
};

use crate::{
    components::Icon,
    primitives::{FocusRing, min_w0_wrapper},
    theme::{ThemeColors, ThemeExt, ThemeTextSizeKind},
    utils::{ElementIdExt, RgbaExt, Step, step_enabled},
};

actions!(tabs, [SelectPreviousTab, SelectNextTab]);

const INDICATOR_THICKNESS: gpui::Pixels = px(2.);
const FULL_COLOR_RADIUS: gpui::Pixels = px(4.);
const FULL_COLOR_MIN_HEIGHT: gpui::Pixels = px(48.);
const TAB_MIN_HEIGHT: gpui::Pixels = px(40.);

pub(crate) fn init(cx: &mut App) {
    cx.bind_keys([
        KeyBinding::new("left", SelectPreviousTab, Some("Tabs")),
        KeyBinding::new("up", SelectPreviousTab, Some("Tabs")),
        KeyBinding::new("right", SelectNextTab, Some("Tabs")),
        KeyBinding::new("down", SelectNextTab, Some("Tabs")),
    ]);
}

/// One entry of a [`Tabs`] strip.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TabData {
    pub id: SharedString,
    pub tab_name: SharedString,
    pub display_name: Option<SharedString>,
    pub icon: Option<SharedString>,
    pub disabled: bool,
    pub tab_count: usize,
}

impl TabData {
    pub fn new(id: impl Into<SharedString>, tab_name: impl Into<SharedString>) -> Self {
        Self {
            id: id.into(),
            tab_name: tab_name.into(),
            ..Default::default()
        }
    }

    pub fn display_name(mut self, display_name: impl Into<SharedString>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<SharedString>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn tab_count(mut self, tab_count: usize) -> Self {
        self.tab_count = tab_count;
        self
    }

    /// `display_name` when it isn't empty, otherwise `tab_name`.
    pub fn label(&self) -> SharedString {
        self.display_name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| self.tab_name.clone())
    }

    pub fn badge(&self) -> Option<usize> {
        (self.tab_count > 0).then_some(self.tab_count)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TabsVariant {
    #[default]
    Standard,
    FullColor,
    FullWidth,
    Scrollable,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TabsOrientation {
    #[default]
    Horizontal,
    Vertical,
}

type OnTabChange = Rc<dyn Fn(&SharedString, &TabData, &mut Window, &mut App)>;

/// The value a tab strip starts with when it isn't controlled.
pub fn initial_tab_value(
    default_value: Option<&SharedString>,
    tabs: &[TabData],
) -> Option<SharedString> {
    default_value
        .cloned()
        .or_else(|| tabs.first().map(|tab| tab.id.clone()))
}

/// A row (or column) of selectable tabs.
///
/// Pass `value` to control the selection; otherwise it is kept in keyed state
/// starting at `default_value` or the first tab.
#[derive(IntoElement)]
pub struct Tabs {
    id: ElementId,
    tabs: Vec<TabData>,
    variant: TabsVariant,
    orientation: TabsOrientation,
    value: Option<SharedString>,
    default_value: Option<SharedString>,
    centered: bool,
    on_change: Option<OnTabChange>,
    focus_handle: Option<FocusHandle>,
}

impl Tabs {
    pub fn new(id: impl Into<ElementId>, tabs: impl IntoIterator<Item = TabData>) -> Self {
        Self {
            id: id.into(),
            tabs: tabs.into_iter().collect(),
            variant: TabsVariant::default(),
            orientation: TabsOrientation::default(),
            value: None,
            default_value: None,
            centered: false,
            on_change: None,
            focus_handle: None,
        }
    }

    /// Uses an existing focus handle for keyboard navigation instead of a keyed one.
    pub fn focus_handle(mut self, focus_handle: FocusHandle) -> Self {
        self.focus_handle = Some(focus_handle);
        self
    }

    pub fn variant(mut self, variant: TabsVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn orientation(mut self, orientation: TabsOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn value(mut self, value: impl Into<SharedString>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn default_value(mut self, default_value: impl Into<SharedString>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    /// Centers the tabs of a [`TabsVariant::Standard`] strip.
    pub fn centered(mut self, centered: bool) -> Self {
        self.centered = centered;
        self
    }

    pub fn on_change(
        mut self,
        on_change: impl Fn(&SharedString, &TabData, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_change = Some(Rc::new(on_change));
        self
    }

    fn is_vertical(&self) -> bool {
        self.orientation == TabsOrientation::Vertical
    }
}

/// Shared by click and keyboard selection.
#[derive(Clone)]
struct TabSelector {
    tabs: Rc<Vec<TabData>>,
    internal_value: Entity<Option<SharedString>>,
    is_controlled: bool,
    on_change: Option<OnTabChange>,
}

impl TabSelector {
    fn select(&self, index: usize, window: &mut Window, cx: &mut App) {
        let Some(tab) = self.tabs.get(index) else {
            return;
        };

        if tab.disabled {
            return;
        }

        if !self.is_controlled {
            self.internal_value.update(cx, |this, cx| {
                if this.as_ref() != Some(&tab.id) {
                    *this = Some(tab.id.clone());
                    cx.notify();
                }
            });
        }

        if let Some(on_change) = self.on_change.as_ref() {
            on_change(&tab.id, tab, window, cx);
        }
    }

    fn step(&self, current: Option<usize>, step: Step, window: &mut Window, cx: &mut App) {
        let tabs = self.tabs.clone();
        if let Some(index) = step_enabled(tabs.len(), current, step, |index| !tabs[index].disabled)
        {
            self.select(index, window, cx);
        }
    }
}

impl RenderOnce for Tabs {
    fn render(mut self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let is_vertical = self.is_vertical();
        let variant = self.variant;

        let initial = initial_tab_value(self.default_value.as_ref(), &self.tabs);
        let internal_value = window.use_keyed_state(
            self.id.with_suffix("state:value"),
            cx,
            move |_window, _cx| initial,
        );

        let current_value = self
            .value
            .clone()
            .or_else(|| internal_value.read(cx).clone());
        let current_index = current_value
            .as_ref()
            .and_then(|value| self.tabs.iter().position(|tab| &tab.id == value));

        let focus_handle = match self.focus_handle.take() {
            Some(focus_handle) => focus_handle,
            None => window
                .use_keyed_state(self.id.with_suffix("state:focus_handle"), cx, |_window, cx| {
                    cx.focus_handle().tab_stop(true)
                })
                .read(cx)
                .clone(),
        };

        let colors = cx.get_theme().variants.active(cx).colors.clone();
        let accent = colors.accent.primary;
        let border_color = colors.background.tertiary;

        let selector = TabSelector {
            tabs: Rc::new(self.tabs),
            internal_value,
            is_controlled: self.value.is_some(),
            on_change: self.on_change,
        };

        let selector_prev = selector.clone();
        let selector_next = selector.clone();

        div()
            .id(self.id.clone())
            .key_context("Tabs")
            .track_focus(&focus_handle)
            .relative()
            .flex()
            .map(|this| if is_vertical { this.flex_col() } else { this.flex_row() })
            .when(variant != TabsVariant::FullColor, |this| {
                if is_vertical {
                    this.border_r_1().border_color(border_color)
                } else {
                    this.border_b_1().border_color(border_color)
                }
            })
            .when(variant == TabsVariant::FullWidth, |this| this.w_full())
            .when(variant == TabsVariant::Scrollable, |this| {
                if is_vertical {
                    this.overflow_y_scroll()
                } else {
                    this.overflow_x_scroll()
                }
            })
            .when(
                variant == TabsVariant::Standard && self.centered,
                |this| this.justify_center(),
            )
            .child(
                FocusRing::new(self.id.with_suffix("focus_ring"), focus_handle.clone())
                    .rounded(FULL_COLOR_RADIUS),
            )
            .on_action(move |_: &SelectPreviousTab, window, cx| {
                selector_prev.step(current_index, Step::Previous, window, cx);
            })
            .on_action(move |_: &SelectNextTab, window, cx| {
                selector_next.step(current_index, Step::Next, window, cx);
            })
            .children(selector.tabs.iter().enumerate().map(|(index, tab)| {
                let is_selected = current_index == Some(index);
                let is_full_color = variant == TabsVariant::FullColor;

                let text_color = tab_text_color(&colors, variant, is_selected, tab.disabled);

                let selector = selector.clone();

                div()
                    .id(self.id.with_suffix("tab").with_suffix(tab.id.clone()))
                    .relative()
                    .flex()
                    .items_center()
                    .justify_center()
                    .gap(px(8.))
                    .px(px(16.))
                    .py(px(10.))
                    .min_h(if is_full_color {
                        FULL_COLOR_MIN_HEIGHT
                    } else {
                        TAB_MIN_HEIGHT
                    })
                    .when(variant == TabsVariant::FullWidth, |this| this.flex_1())
                    .when(variant == TabsVariant::Scrollable, |this| this.flex_none())
                    .when(is_full_color, |this| {
                        this.rounded_tl(FULL_COLOR_RADIUS)
                            .rounded_tr(FULL_COLOR_RADIUS)
                            .when(is_selected, |this| this.bg(accent))
                    })
                    .when(!is_full_color && is_selected, |this| {
                        this.child(indicator(is_vertical, accent))
                    })
                    .when_some(tab.icon.clone(), |this, icon| {
                        this.child(Icon::new(icon).size(px(16.)).color(text_color))
                    })
                    .child(
                        min_w0_wrapper()
                            .text_kind(ThemeTextSizeKind::Body)
                            .text_color(text_color)
                            .whitespace_nowrap()
                            .child(tab.label()),
                    )
                    .when_some(tab.badge(), |this, count| {
                        this.child(
                            div()
                                .flex_none()
                                .min_w(px(20.))
                                .h(px(20.))
                                .px(px(6.))
                                .flex()
                                .items_center()
                                .justify_center()
                                .rounded_full()
                                .bg(colors.accent.destructive)
                                .child(
                                    min_w0_wrapper()
                                        .text_kind(ThemeTextSizeKind::Caption)
                                        .text_color(colors.accent.contrast)
                                        .child(SharedString::from(count.to_string())),
                                ),
                        )
                    })
                    .map(|this| {
                        if tab.disabled {
                            this.cursor(CursorStyle::OperationNotAllowed)
                        } else {
                            this.cursor(CursorStyle::PointingHand)
                                .hover(|style| style.bg(accent.alpha(0.06)))
                                .on_mouse_down(MouseButton::Left, |_event, window, _cx| {
                                    window.prevent_default();
                                })
                                .on_click(move |_event, window, cx| {
                                    selector.select(index, window, cx);
                                })
                        }
                    })
            }))
    }
}

/// Label color of a tab.
fn tab_text_color(
    colors: &ThemeColors,
    variant: TabsVariant,
    is_selected: bool,
    is_disabled: bool,
) -> Rgba {
    match (is_disabled, is_selected, variant) {
        (true, _, _) => colors.text.secondary.fade(0.5),
        (false, true, TabsVariant::FullColor) => colors.accent.contrast,
        (false, true, _) => colors.accent.primary,
        (false, false, TabsVariant::FullColor) => colors.text.primary,
        (false, false, _) => colors.text.secondary,
    }
}

fn indicator(is_vertical: bool, color: gpui::Rgba) -> impl IntoElement {
    div()
        .absolute()
        .bg(color)
        .map(|this| {
            if is_vertical {
                this.top_0().bottom_0().right_0().w(INDICATOR_THICKNESS)
            } else {
                this.left_0().right_0().bottom_0().h(INDICATOR_THICKNESS)
            }
        })
}
