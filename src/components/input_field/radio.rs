use std::{rc::Rc, time::Duration};

use gpui::{
    App, CursorStyle, ElementId, Entity, FocusHandle, InteractiveElement, IntoElement,
    KeyBinding, MouseButton, ParentElement, RenderOnce, SharedString, StatefulInteractiveElement,
    Styled, Window, actions, div, prelude::FluentBuilder, px,
};

use crate::{
    components::input_field::{FieldChrome, FieldChromeExt, FormControl},
    conditional_transition,
    primitives::{FocusRing, min_w0_wrapper},
    theme::{ThemeExt, ThemeLayerKind, ThemeTextSizeKind},
    utils::{DISABLED_OPACITY, ElementIdExt, Step, checked_transition, step_enabled},
};

actions!(radio_group, [SelectPreviousOption, SelectNextOption]);

pub(crate) fn init(cx: &mut App) {
    cx.bind_keys([
        KeyBinding::new("left", SelectPreviousOption, Some("RadioGroup")),
        KeyBinding::new("up", SelectPreviousOption, Some("RadioGroup")),
        KeyBinding::new("right", SelectNextOption, Some("RadioGroup")),
        KeyBinding::new("down", SelectNextOption, Some("RadioGroup")),
    ]);
}

/// One choice of a [`RadioGroup`].
#[derive(Clone, Debug, PartialEq)]
pub struct RadioOption {
    pub value: SharedString,
    pub label: SharedString,
    pub disabled: bool,
}

impl RadioOption {
    pub fn new(value: impl Into<SharedString>, label: impl Into<SharedString>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            disabled: false,
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

type OnRadioChange = Rc<dyn Fn(&SharedString, &mut Window, &mut App)>;

/// Shared by clicks and keyboard navigation.
#[derive(Clone)]
struct RadioSelector {
    options: Rc<[RadioOption]>,
    group_disabled: bool,
    internal_value: Entity<Option<SharedString>>,
    is_controlled: bool,
    on_change: Option<OnRadioChange>,
}

impl RadioSelector {
    fn is_enabled(&self, ix: usize) -> bool {
        !self.group_disabled && self.options.get(ix).is_some_and(|option| !option.disabled)
    }

    fn select(&self, ix: usize, window: &mut Window, cx: &mut App) {
        if !self.is_enabled(ix) {
            return;
        }
        let Some(option) = self.options.get(ix) else {
            return;
        };

        if !self.is_controlled {
            self.internal_value.update(cx, |this, cx| {
                if this.as_ref() != Some(&option.value) {
                    *this = Some(option.value.clone());
                    cx.notify();
                }
            });
        }

        if let Some(on_change) = self.on_change.as_ref() {
            on_change(&option.value, window, cx);
        }
    }

    fn step(&self, current: Option<usize>, step: Step, window: &mut Window, cx: &mut App) {
        if let Some(ix) = step_enabled(self.options.len(), current, step, |ix| self.is_enabled(ix))
        {
            self.select(ix, window, cx);
        }
    }
}

/// A set of mutually exclusive options.
///
/// Pass `value` to control the selection; otherwise it is kept in keyed state
/// starting at `default_value`.
#[derive(IntoElement)]
pub struct RadioGroup {
    id: ElementId,
    options: Vec<RadioOption>,
    row: bool,
    layer: ThemeLayerKind,
    value: Option<SharedString>,
    default_value: Option<SharedString>,
    disabled: bool,
    chrome: FieldChrome,
    focus_handle: Option<FocusHandle>,
    on_change: Option<OnRadioChange>,
}

impl RadioGroup {
    pub fn new(id: impl Into<ElementId>, options: impl IntoIterator<Item = RadioOption>) -> Self {
        Self {
            id: id.into(),
            options: options.into_iter().collect(),
            row: false,
            layer: ThemeLayerKind::Tertiary,
            value: None,
            default_value: None,
            disabled: false,
            chrome: FieldChrome::default(),
            focus_handle: None,
            on_change: None,
        }
    }

    /// Lays the options out horizontally.
    pub fn row(mut self, row: bool) -> Self {
        self.row = row;
        self
    }

    pub fn layer(mut self, layer: ThemeLayerKind) -> Self {
        self.layer = layer;
        self
    }

    pub fn value(mut self, value: impl Into<SharedString>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn default_value(mut self, value: impl Into<SharedString>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Disables every option.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Uses an existing focus handle for keyboard navigation instead of a keyed one.
    pub fn focus_handle(mut self, focus_handle: FocusHandle) -> Self {
        self.focus_handle = Some(focus_handle);
        self
    }

    pub fn on_change(
        mut self,
        on_change: impl Fn(&SharedString, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_change = Some(Rc::new(on_change));
        self
    }
}

impl FieldChromeExt for RadioGroup {
    fn chrome_mut(&mut self) -> &mut FieldChrome {
        &mut self.chrome
    }
}

impl RenderOnce for RadioGroup {
    fn render(mut self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let size = cx.get_theme().layout.size.md;
        let gap = cx.get_theme().layout.padding.md;
        let colors = &cx.get_theme().variants.active(cx).colors;
        let (primary_text_color, secondary_text_color) = colors.text.all();
        let primary_accent_color = colors.accent.primary;
        let destructive_accent_color = colors.accent.destructive;
        let background_color = self.layer.resolve(cx);
        let border_color = self.layer.next().resolve(cx);

        let initial = self.default_value.clone();
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
            .and_then(|value| self.options.iter().position(|option| &option.value == value));

        let focus_handle = match self.focus_handle.take() {
            Some(focus_handle) => focus_handle,
            None => window
                .use_keyed_state(self.id.with_suffix("state:focus_handle"), cx, |_window, cx| {
                    cx.focus_handle().tab_stop(true)
                })
                .read(cx)
                .clone(),
        };

        let is_disabled = self.disabled;
        let is_invalid = self.chrome.error;
        if is_disabled && focus_handle.is_focused(window) {
            window.blur();
        }

        let selector = RadioSelector {
            options: self.options.into(),
            group_disabled: is_disabled,
            internal_value,
            is_controlled: self.value.is_some(),
            on_change: self.on_change,
        };

        let radios = selector
            .options
            .iter()
            .enumerate()
            .map(|(ix, option)| {
                let option_id = self.id.with_suffix("option").with_suffix(option.value.clone());
                let is_checked = current_index == Some(ix);
                let is_enabled = selector.is_enabled(ix);

                let checked_delta = *checked_transition(
                    option_id.clone(),
                    window,
                    cx,
                    Duration::from_millis(225),
                    is_checked,
                )
                .evaluate(window, cx);

                let ring_color = conditional_transition!(
                    option_id.with_suffix("state:transition:ring_color"),
                    window,
                    cx,
                    Duration::from_millis(225),
                    {
                        is_invalid => destructive_accent_color,
                        is_checked => primary_accent_color,
                        _ => border_color
                    }
                );
                let ring_color = *ring_color.evaluate(window, cx);

                let selector = selector.clone();

                div()
                    .id(option_id)
                    .flex()
                    .items_center()
                    .gap(gap)
                    .child(
                        div()
                            .flex_none()
                            .size(size)
                            .flex()
                            .items_center()
                            .justify_center()
                            .rounded_full()
                            .bg(background_color)
                            .border(px(1.5))
                            .border_color(ring_color)
                            .child(
                                div()
                                    .size(size * 0.5 * checked_delta)
                                    .rounded_full()
                                    .bg(primary_accent_color),
                            ),
                    )
                    .child(
                        min_w0_wrapper()
                            .text_kind(ThemeTextSizeKind::Body)
                            .text_color(if is_enabled {
                                primary_text_color
                            } else {
                                secondary_text_color
                            })
                            .child(option.label.clone()),
                    )
                    .map(|this| {
                        if !is_enabled {
                            return this
                                .opacity(DISABLED_OPACITY)
                                .cursor(CursorStyle::OperationNotAllowed);
                        }

                        this.cursor(CursorStyle::PointingHand)
                            .on_mouse_down(MouseButton::Left, |_event, window, _cx| {
                                window.prevent_default();
                            })
                            .on_click(move |_event, window, cx| {
                                selector.select(ix, window, cx);
                            })
                    })
            })
            .collect::<Vec<_>>();

        let selector_prev = selector.clone();
        let selector_next = selector;

        let group = div()
            .id(self.id.clone())
            .key_context("RadioGroup")
            .track_focus(&focus_handle)
            .relative()
            .flex()
            .map(|this| {
                if self.row {
                    this.flex_row().flex_wrap().gap(gap * 2.)
                } else {
                    this.flex_col().gap(gap)
                }
            })
            .child(FocusRing::new(self.id.with_suffix("focus_ring"), focus_handle.clone()))
            .on_action(move |_: &SelectPreviousOption, window, cx| {
                selector_prev.step(current_index, Step::Previous, window, cx);
            })
            .on_action(move |_: &SelectNextOption, window, cx| {
                selector_next.step(current_index, Step::Next, window, cx);
            })
            .children(radios);

        // The group label is rendered by the form control as a legend.
        FormControl::new(self.chrome, group).disabled(is_disabled)
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::theme::Theme;
    use gpui::{AppContext, Context, Render, TestAppContext, VisualTestContext};

    struct RadioTestView {
        group_disabled: bool,
        changes: Rc<RefCell<Vec<SharedString>>>,
        focus_handle: FocusHandle,
    }

    impl Render for RadioTestView {
        fn render(&mut self, _window: &mut Window, _cx: &mut Context<Self>) -> impl IntoElement {
            let changes = self.changes.clone();

            RadioGroup::new(
                "plan",
                [
                    RadioOption::new("free", "Free"),
                    RadioOption::new("team", "Team").disabled(true),
                    RadioOption::new("enterprise", "Enterprise"),
                ],
            )
            .label("Plan")
            .default_value("free")
            .disabled(self.group_disabled)
            .focus_handle(self.focus_handle.clone())
            .on_change(move |value, _window, _cx| changes.borrow_mut().push(value.clone()))
        }
    }

    fn open(cx: &mut TestAppContext, group_disabled: bool) -> (Entity<RadioTestView>, VisualTestContext) {
        let window = cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);
            crate::init(cx);

            cx.open_window(Default::default(), |_window, cx| {
                cx.new(|cx| RadioTestView {
                    group_disabled,
                    changes: Rc::default(),
                    focus_handle: cx.focus_handle(),
                })
            })
            .unwrap()
        });

        let view = window.root(cx).unwrap();
        let mut vcx = VisualTestContext::from_window(window.into(), cx);
        vcx.run_until_parked();

        vcx.update(|window, cx| {
            let focus_handle = view.read(cx).focus_handle.clone();
            focus_handle.focus(window, cx);
        });
        vcx.run_until_parked();

        (view, vcx)
    }

    #[gpui::test]
    fn test_arrow_keys_skip_disabled_options(cx: &mut TestAppContext) {
        let (view, mut vcx) = open(cx, false);

        vcx.update(|window, cx| window.dispatch_action(Box::new(SelectNextOption), cx));
        vcx.run_until_parked();
        vcx.update(|window, cx| window.dispatch_action(Box::new(SelectNextOption), cx));
        vcx.run_until_parked();

        let changes = vcx.update(|_window, cx| view.read(cx).changes.borrow().clone());
        assert_eq!(
            changes,
            vec![SharedString::from("enterprise"), SharedString::from("free")]
        );
    }

    #[gpui::test]
    fn test_disabled_group_ignores_keys(cx: &mut TestAppContext) {
        let (view, mut vcx) = open(cx, true);

        vcx.update(|window, cx| window.dispatch_action(Box::new(SelectPreviousOption), cx));
        vcx.run_until_parked();

        let changes = vcx.update(|_window, cx| view.read(cx).changes.borrow().clone());
        assert!(changes.is_empty());
    }
}
