use std::{rc::Rc, time::Duration};

use enum_assoc::Assoc;
use gpui::{
    App, ElementId, Entity, FocusHandle, Focusable, InteractiveElement, IntoElement,
    ParentElement, RenderOnce, SharedString, StatefulInteractiveElement, Styled, Subscription,
    Window, div, prelude::FluentBuilder, px,
};
use gpui_primitives::input::{Input as PrimitiveInput, InputState};
use gpui_squircle::{SquircleStyled, squircle};
use gpui_transitions::Lerp;

use crate::{
    components::input_field::{FieldChrome, FieldChromeExt, FormControl, InputFieldSize},
    conditional_transition,
    primitives::FocusRing,
    theme::{ThemeExt, ThemeLayerKind},
    utils::{
        ElementIdExt, PositionalChildren, PositionalParentElement, RgbaExt, disabled_transition,
        line_height_px,
    },
};

pub const PASSWORD_MASK: char = '•';

/// What a [`TextInput`] accepts and how it is displayed.
#[derive(Assoc, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[func(pub fn type_tag(&self) -> &'static str)]
pub enum TextInputKind {
    #[default]
    #[assoc(type_tag = "text")]
    Text,
    /// Every character is displayed as [`PASSWORD_MASK`].
    #[assoc(type_tag = "password")]
    Password,
    /// Digits, one leading `-` and one `.`.
    #[assoc(type_tag = "number")]
    Number,
    #[assoc(type_tag = "email")]
    Email,
    /// Digits, spaces and `+ - ( )`.
    #[assoc(type_tag = "tel")]
    Tel,
    #[assoc(type_tag = "url")]
    Url,
    #[assoc(type_tag = "search")]
    Search,
}

impl TextInputKind {
    /// Strips characters the kind does not accept. Kinds without a filter
    /// return `None`.
    pub fn filter(&self, text: &str) -> Option<String> {
        match self {
            TextInputKind::Number => Some(sanitize_number(text)),
            TextInputKind::Tel => Some(sanitize_tel(text)),
            _ => None,
        }
    }
}

pub fn sanitize_number(text: &str) -> String {
    let mut sanitized = String::with_capacity(text.len());
    let mut has_decimal_point = false;

    for (ix, ch) in text.chars().enumerate() {
        match ch {
            '0'..='9' => sanitized.push(ch),
            '-' if ix == 0 => sanitized.push(ch),
            '.' if !has_decimal_point => {
                has_decimal_point = true;
                sanitized.push(ch);
            }
            _ => {}
        }
    }

    sanitized
}

pub fn sanitize_tel(text: &str) -> String {
    text.chars()
        .filter(|ch| ch.is_ascii_digit() || matches!(ch, ' ' | '+' | '-' | '(' | ')'))
        .collect()
}

/// Visible line range of a multi-line input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct RowRange {
    pub min: usize,
    pub max: Option<usize>,
}

type TextCallback = Rc<dyn Fn(&SharedString, &mut Window, &mut App)>;
type FocusCallback = Rc<dyn Fn(&mut Window, &mut App)>;

/// The text state behind the input with the given id.
///
/// Components that wrap a [`TextInput`] use this to read its value.
pub(crate) fn use_input_state(
    id: &ElementId,
    default_value: Option<SharedString>,
    window: &mut Window,
    cx: &mut App,
) -> Entity<InputState> {
    window.use_keyed_state(id.with_suffix("state:input"), cx, |_window, cx| {
        let state = InputState::new(cx);
        match default_value {
            Some(value) => state.initial_value(value),
            None => state,
        }
    })
}

/// Overwrites the stored text, keeping the state's focus handle.
pub(crate) fn replace_input_value(state: &Entity<InputState>, value: SharedString, cx: &mut App) {
    state.update(cx, |state, cx| {
        state.clear();
        let current = std::mem::replace(state, InputState::new(cx));
        *state = current.initial_value(value);
    });
}

/// Forwards text and focus changes of an [`InputState`] to the builder
/// callbacks. Subscriptions are made once per id; the callbacks are
/// replaced on every render.
struct TextListeners {
    last_value: SharedString,
    on_change: Option<TextCallback>,
    on_focus: Option<FocusCallback>,
    on_blur: Option<FocusCallback>,
    _subscriptions: Vec<Subscription>,
}

impl TextListeners {
    fn use_keyed(
        id: &ElementId,
        state: &Entity<InputState>,
        window: &mut Window,
        cx: &mut App,
    ) -> Entity<Self> {
        window.use_keyed_state(id.with_suffix("state:listeners"), cx, |window, cx| {
            let this = cx.weak_entity();
            let focus_handle = state.read(cx).focus_handle(cx);

            let on_notify = {
                let this = this.clone();
                window.observe(state, cx, move |state, window, cx| {
                    let value = state.read(cx).value();
                    let callback = this
                        .update(cx, |this, _cx| this.take_change(&value))
                        .ok()
                        .flatten();

                    if let Some(callback) = callback {
                        callback(&value, window, cx);
                    }
                })
            };

            let on_focus = {
                let this = this.clone();
                window.on_focus(&focus_handle, cx, move |window, cx| {
                    let callback = this.read_with(cx, |this, _| this.on_focus.clone());
                    if let Ok(Some(callback)) = callback {
                        callback(window, cx);
                    }
                })
            };

            let on_blur = window.on_blur(&focus_handle, cx, move |window, cx| {
                let callback = this.read_with(cx, |this, _| this.on_blur.clone());
                if let Ok(Some(callback)) = callback {
                    callback(window, cx);
                }
            });

            TextListeners {
                last_value: state.read(cx).value(),
                on_change: None,
                on_focus: None,
                on_blur: None,
                _subscriptions: vec![on_notify, on_focus, on_blur],
            }
        })
    }

    fn take_change(&mut self, value: &SharedString) -> Option<TextCallback> {
        if &self.last_value == value {
            return None;
        }

        self.last_value = value.clone();
        self.on_change.clone()
    }
}

/// Gives a component that wraps a [`TextInput`] in its `input` field the
/// input's shared setters and chrome.
macro_rules! forward_text_input_setters {
    ($ty:ty) => {
        impl $ty {
            pub fn size(mut self, size: $crate::components::input_field::InputFieldSize) -> Self {
                self.input = self.input.size(size);
                self
            }

            pub fn layer(mut self, layer: $crate::theme::ThemeLayerKind) -> Self {
                self.input = self.input.layer(layer);
                self
            }

            /// See [`TextInput::state`].
            pub fn state(
                mut self,
                state: gpui::Entity<gpui_primitives::input::InputState>,
            ) -> Self {
                self.input = self.input.state(state);
                self
            }

            pub fn value(mut self, value: impl Into<gpui::SharedString>) -> Self {
                self.input = self.input.value(value);
                self
            }

            pub fn default_value(mut self, value: impl Into<gpui::SharedString>) -> Self {
                self.input = self.input.default_value(value);
                self
            }

            pub fn placeholder(mut self, placeholder: impl Into<gpui::SharedString>) -> Self {
                self.input = self.input.placeholder(placeholder);
                self
            }

            pub fn disabled(mut self, disabled: bool) -> Self {
                self.input = self.input.disabled(disabled);
                self
            }

            pub fn on_focus(
                mut self,
                on_focus: impl Fn(&mut gpui::Window, &mut gpui::App) + 'static,
            ) -> Self {
                self.input = self.input.on_focus(on_focus);
                self
            }

            pub fn on_blur(
                mut self,
                on_blur: impl Fn(&mut gpui::Window, &mut gpui::App) + 'static,
            ) -> Self {
                self.input = self.input.on_blur(on_blur);
                self
            }
        }

        impl $crate::components::input_field::FieldChromeExt for $ty {
            fn chrome_mut(&mut self) -> &mut $crate::components::input_field::FieldChrome {
                $crate::components::input_field::FieldChromeExt::chrome_mut(&mut self.input)
            }
        }
    };
}

pub(crate) use forward_text_input_setters;

/// A themed single or multi-line text field.
#[derive(IntoElement)]
pub struct TextInput {
    id: ElementId,
    kind: TextInputKind,
    size: InputFieldSize,
    layer: ThemeLayerKind,
    state: Option<Entity<InputState>>,
    value: Option<SharedString>,
    default_value: Option<SharedString>,
    placeholder: Option<SharedString>,
    disabled: bool,
    rows: Option<RowRange>,
    monospace: bool,
    chrome: FieldChrome,
    on_change: Option<TextCallback>,
    on_focus: Option<FocusCallback>,
    on_blur: Option<FocusCallback>,
    children: PositionalChildren,
}

impl TextInput {
    pub fn new(id: impl Into<ElementId>, kind: TextInputKind) -> Self {
        Self {
            id: id.into(),
            kind,
            size: InputFieldSize::default(),
            layer: ThemeLayerKind::Tertiary,
            state: None,
            value: None,
            default_value: None,
            placeholder: None,
            disabled: false,
            rows: None,
            monospace: false,
            chrome: FieldChrome::default(),
            on_change: None,
            on_focus: None,
            on_blur: None,
            children: PositionalChildren::default(),
        }
    }

    pub fn kind(&self) -> TextInputKind {
        self.kind
    }

    pub fn size(mut self, size: InputFieldSize) -> Self {
        self.size = size;
        self
    }

    pub fn layer(mut self, layer: ThemeLayerKind) -> Self {
        self.layer = layer;
        self
    }

    /// Uses an existing text state instead of one keyed off the id.
    /// `default_value` is ignored in that case.
    pub fn state(mut self, state: Entity<InputState>) -> Self {
        self.state = Some(state);
        self
    }

    /// Makes the input controlled: the stored text is replaced whenever it
    /// differs from `value`.
    pub fn value(mut self, value: impl Into<SharedString>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Initial text of an uncontrolled input.
    pub fn default_value(mut self, value: impl Into<SharedString>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<SharedString>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn on_change(
        mut self,
        on_change: impl Fn(&SharedString, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_change = Some(Rc::new(on_change));
        self
    }

    pub fn on_focus(mut self, on_focus: impl Fn(&mut Window, &mut App) + 'static) -> Self {
        self.on_focus = Some(Rc::new(on_focus));
        self
    }

    pub fn on_blur(mut self, on_blur: impl Fn(&mut Window, &mut App) + 'static) -> Self {
        self.on_blur = Some(Rc::new(on_blur));
        self
    }

    pub(crate) fn id(&self) -> &ElementId {
        &self.id
    }

    pub(crate) fn external_state(&self) -> Option<&Entity<InputState>> {
        self.state.as_ref()
    }

    pub(crate) fn default_value_ref(&self) -> Option<&SharedString> {
        self.default_value.as_ref()
    }

    pub(crate) fn controlled_value(&self) -> Option<&SharedString> {
        self.value.as_ref()
    }

    pub(crate) fn is_error(&self) -> bool {
        self.chrome.error
    }

    pub(crate) fn rows(mut self, rows: RowRange) -> Self {
        self.rows = Some(rows);
        self
    }

    pub(crate) fn monospace(mut self, monospace: bool) -> Self {
        self.monospace = monospace;
        self
    }

    pub(crate) fn placeholder_or(mut self, placeholder: impl Into<SharedString>) -> Self {
        if self.placeholder.is_none() {
            self.placeholder = Some(placeholder.into());
        }
        self
    }

    /// Replaces the change handler with one built around the current handler.
    pub(crate) fn map_on_change(
        mut self,
        map: impl FnOnce(Option<TextCallback>) -> TextCallback,
    ) -> Self {
        self.on_change = Some(map(self.on_change.take()));
        self
    }
}

impl FieldChromeExt for TextInput {
    fn chrome_mut(&mut self) -> &mut FieldChrome {
        &mut self.chrome
    }
}

impl PositionalParentElement for TextInput {
    fn children_mut(&mut self) -> &mut PositionalChildren {
        &mut self.children
    }
}

impl RenderOnce for TextInput {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let colors = &cx.get_theme().variants.active(cx).colors;
        let (primary_text_color, secondary_text_color) = colors.text.all();
        let primary_accent_color = colors.accent.primary;
        let destructive_accent_color = colors.accent.destructive;
        let background_color = self.layer.resolve(cx);
        let border_color = self.layer.next().resolve(cx);
        let border_hover_color = border_color.lerp(&primary_text_color, 0.07);
        let corner_radius = cx.get_theme().layout.corner_radii.md;
        let gap = cx.get_theme().layout.padding.md;

        let metrics = self.size.metrics(self.monospace, window, cx);
        let vertical_padding = match (self.rows, self.size) {
            (Some(_), InputFieldSize::Small | InputFieldSize::Medium) => gap,
            _ => metrics.vertical_padding,
        };

        let state = match self.state.clone() {
            Some(state) => state,
            None => use_input_state(&self.id, self.default_value.clone(), window, cx),
        };
        let listeners = TextListeners::use_keyed(&self.id, &state, window, cx);

        if let Some(value) = self.value.clone() {
            if state.read(cx).value() != value {
                replace_input_value(&state, value, cx);
            }
        }

        let synced_value = self.value.as_ref().map(|_| state.read(cx).value());
        let (on_change, on_focus, on_blur) = (
            self.on_change.clone(),
            self.on_focus.clone(),
            self.on_blur.clone(),
        );

        listeners.update(cx, |this, _cx| {
            if let Some(value) = synced_value {
                this.last_value = value;
            }
            this.on_change = on_change;
            this.on_focus = on_focus;
            this.on_blur = on_blur;
        });

        let is_invalid = self.chrome.error;
        let is_disabled = self.disabled;

        let is_hover_state =
            window.use_keyed_state(self.id.with_suffix("state:hover"), cx, |_window, _cx| false);
        let is_hover = *is_hover_state.read(cx);

        let focus_handle: FocusHandle = state.read(cx).focus_handle(cx);
        let is_focus = focus_handle.is_focused(window);

        let disabled_transition = disabled_transition(self.id.clone(), window, cx, is_disabled);

        if is_focus && is_disabled {
            window.blur();
        }

        let border_color_transition = conditional_transition!(
            self.id.with_suffix("state:transition:border_color"),
            window,
            cx,
            Duration::from_millis(400),
            {
                is_invalid => destructive_accent_color,
                is_focus => primary_accent_color,
                is_hover => border_hover_color,
                _ => border_color
            }
        );

        let focus_ring_color_transition = conditional_transition!(
            self.id.with_suffix("state:transition:focus_ring_color"),
            window,
            cx,
            Duration::from_millis(400),
            {
                is_invalid => destructive_accent_color,
                _ => primary_accent_color
            }
        );

        let mut base = PrimitiveInput::new(self.id.with_suffix("input"), state)
            .w_full()
            .text_size(metrics.text_size)
            .font_family(metrics.font_family.clone())
            .text_color(primary_text_color)
            .line_height(metrics.line_height)
            .placeholder_text_color(secondary_text_color)
            .selection_color(primary_accent_color.alpha(0.3))
            .disabled(is_disabled);

        if let Some(placeholder) = self.placeholder.clone() {
            base = base.placeholder(placeholder);
        }

        if self.kind == TextInputKind::Password {
            base = base.transform_text(|_| PASSWORD_MASK);
        }

        if matches!(self.kind, TextInputKind::Number | TextInputKind::Tel) {
            let kind = self.kind;
            base = base.map_text(move |text| match kind.filter(&text) {
                Some(filtered) if filtered != text.as_ref() => filtered.into(),
                _ => text,
            });
        }

        let line_height = line_height_px(window, metrics.text_size, metrics.line_height);

        let body = match self.rows {
            Some(rows) => div()
                .id(self.id.with_suffix("scroll"))
                .w_full()
                .min_h(line_height * rows.min as f32)
                .when_some(rows.max, |this, max| {
                    this.max_h(line_height * max as f32).overflow_y_scroll()
                })
                .child(base.multiline())
                .into_any_element(),
            None => base.into_any_element(),
        };

        let control = div()
            .id(self.id.clone())
            .when(self.chrome.full_width, |this| this.w_full())
            .min_w(px(180.))
            .min_h_auto()
            .pt(vertical_padding)
            .pb(vertical_padding)
            .pl(metrics.horizontal_padding)
            .pr(metrics.horizontal_padding)
            .gap(gap)
            .flex()
            .flex_col()
            .opacity(*disabled_transition.evaluate(window, cx))
            .child(
                FocusRing::new(self.id.with_suffix("focus_ring"), focus_handle.clone())
                    .rounded(corner_radius)
                    .border_color(*focus_ring_color_transition.evaluate(window, cx)),
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
            .children(self.children.top)
            .child(
                div()
                    .w_full()
                    .flex()
                    .min_h_auto()
                    .gap(gap)
                    .items_center()
                    .children(self.children.left)
                    .child(body)
                    .children(self.children.right),
            )
            .children(self.children.bottom)
            .when(!is_disabled, |this| {
                this.on_hover(move |hover, _window, cx| {
                    is_hover_state.update(cx, |this, cx| {
                        *this = *hover;
                        cx.notify();
                    });
                })
            });

        FormControl::new(self.chrome, control).disabled(is_disabled)
    }
}


#[cfg(all(test, feature = "test-support"))]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::theme::Theme;
    use gpui::{AppContext, Context, Render, TestAppContext, VisualTestContext};

    struct TextInputView {
        kind: TextInputKind,
        state: Entity<InputState>,
        value: Option<SharedString>,
        changes: Rc<RefCell<Vec<SharedString>>>,
    }

    impl Render for TextInputView {
        fn render(&mut self, _window: &mut Window, _cx: &mut Context<Self>) -> impl IntoElement {
            let changes = self.changes.clone();

            div().size_full().child(
                TextInput::new("text-input", self.kind)
                    .label("Name")
                    .state(self.state.clone())
                    .when_some(self.value.clone(), |this, value| this.value(value))
                    .on_change(move |text, _window, _cx| changes.borrow_mut().push(text.clone())),
            )
        }
    }

    struct Harness {
        state: Entity<InputState>,
        changes: Rc<RefCell<Vec<SharedString>>>,
        vcx: VisualTestContext,
    }

    fn open(cx: &mut TestAppContext, kind: TextInputKind, value: Option<SharedString>) -> Harness {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let view_changes = changes.clone();
        let state = cx.new(|cx| InputState::new(cx).initial_value("Ada"));
        let view_state = state.clone();

        let window = cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);
            crate::init(cx);

            cx.open_window(Default::default(), |_window, cx| {
                cx.new(|_cx| TextInputView {
                    kind,
                    state: view_state,
                    value,
                    changes: view_changes,
                })
            })
            .unwrap()
        });

        let mut vcx = VisualTestContext::from_window(window.into(), cx);
        vcx.run_until_parked();

        Harness {
            state,
            changes,
            vcx,
        }
    }

    #[gpui::test]
    fn test_rendering_does_not_report_a_change(cx: &mut TestAppContext) {
        let harness = open(cx, TextInputKind::Text, None);

        let value = harness.state.read_with(&harness.vcx, |state, _| state.value());
        assert_eq!(value, SharedString::from("Ada"));
        assert!(harness.changes.borrow().is_empty());
    }

    #[gpui::test]
    fn test_state_change_reports_new_text(cx: &mut TestAppContext) {
        let mut harness = open(cx, TextInputKind::Text, None);
        let state = harness.state.clone();

        harness.vcx.update(|_window, cx| {
            replace_input_value(&state, "Grace".into(), cx);
            state.update(cx, |_state, cx| cx.notify());
        });
        harness.vcx.run_until_parked();

        assert_eq!(
            harness.changes.borrow().as_slice(),
            &[SharedString::from("Grace")]
        );
    }

    #[gpui::test]
    fn test_controlled_value_overrides_state(cx: &mut TestAppContext) {
        let harness = open(cx, TextInputKind::Text, Some("Linus".into()));

        let value = harness.state.read_with(&harness.vcx, |state, _| state.value());
        assert_eq!(value, SharedString::from("Linus"));
        assert!(
            harness.changes.borrow().is_empty(),
            "Syncing a controlled value is not a user change"
        );
    }

    #[gpui::test]
    fn test_replace_keeps_focus_handle(cx: &mut TestAppContext) {
        let state = cx.new(|cx| InputState::new(cx));
        let before = state.read_with(cx, |state, cx| state.focus_handle(cx));

        cx.update(|cx| replace_input_value(&state, "new".into(), cx));

        let (after, value) = state.read_with(cx, |state, cx| (state.focus_handle(cx), state.value()));
        assert_eq!(before, after);
        assert_eq!(value, SharedString::from("new"));
    }
}
