//! Form inputs and the [`InputField`] dispatcher.
//!
//! Every leaf (text, textarea, select, date, time, checkbox, radio, toggle,
//! rich editor) is usable directly through its own builder. [`InputField`]
//! picks one of them from an [`InputFieldKind`] and forwards the shared
//! props, converting values through [`InputFieldValue`].

use std::rc::Rc;

use chrono::{NaiveDate, NaiveTime};
use gpui::{
    AbsoluteLength, AnyElement, App, DefiniteLength, ElementId, IntoElement, Pixels, RenderOnce,
    SharedString, Window, px, rems,
};

use crate::{theme::ThemeExt, utils::PixelsExt};

mod form_control;
pub use form_control::*;

mod text_input;
pub use text_input::*;

mod textarea;
pub use textarea::*;

mod select;
pub use select::*;

mod date_time;
pub use date_time::*;

mod checkbox;
pub use checkbox::*;

mod radio;
pub use radio::*;

mod toggle;
pub use toggle::*;

mod rich_editor;
pub use rich_editor::*;

/// Key bindings for the select menu and radio groups.
pub(crate) fn init(cx: &mut App) {
    select::init(cx);
    radio::init(cx);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputFieldSize {
    Small,
    #[default]
    Medium,
    Large,
}

/// Resolved spacing and font for a text-like field.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct FieldMetrics {
    pub vertical_padding: Pixels,
    pub horizontal_padding: Pixels,
    pub text_size: AbsoluteLength,
    pub line_height: DefiniteLength,
    pub font_family: SharedString,
}

impl InputFieldSize {
    pub(crate) fn metrics(&self, monospace: bool, window: &Window, cx: &App) -> FieldMetrics {
        let layout = &cx.get_theme().layout;
        let font = if monospace {
            &layout.text.mono_font
        } else {
            &layout.text.default_font
        };

        let text_size = match self {
            InputFieldSize::Small => font.sizes.caption,
            InputFieldSize::Medium => font.sizes.body,
            InputFieldSize::Large => rems(1.).into(),
        };

        let (vertical_padding, horizontal_padding) = match self {
            InputFieldSize::Small => (layout.padding.sm, layout.padding.md),
            InputFieldSize::Medium => (
                layout
                    .size
                    .lg
                    .padding_needed_for_height(window, text_size, font.line_height),
                layout.padding.lg,
            ),
            InputFieldSize::Large => (px(16.5), px(14.)),
        };

        FieldMetrics {
            vertical_padding,
            horizontal_padding,
            text_size,
            line_height: font.line_height,
            font_family: font.family[0].clone(),
        }
    }
}

/// A value that can be handed to any leaf through [`InputField`].
#[derive(Clone, Debug, PartialEq)]
pub enum InputFieldValue {
    Text(SharedString),
    Bool(bool),
    List(Vec<SharedString>),
}

impl InputFieldValue {
    pub fn as_text(&self) -> Option<SharedString> {
        match self {
            InputFieldValue::Text(text) => Some(text.clone()),
            InputFieldValue::List(values) => values.first().cloned(),
            InputFieldValue::Bool(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            InputFieldValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Text values become a one-item list, empty text an empty one.
    pub fn to_list(&self) -> Vec<SharedString> {
        match self {
            InputFieldValue::List(values) => values.clone(),
            InputFieldValue::Text(text) if text.is_empty() => Vec::new(),
            InputFieldValue::Text(text) => vec![text.clone()],
            InputFieldValue::Bool(_) => Vec::new(),
        }
    }
}

impl From<&'static str> for InputFieldValue {
    fn from(text: &'static str) -> Self {
        InputFieldValue::Text(text.into())
    }
}

impl From<SharedString> for InputFieldValue {
    fn from(text: SharedString) -> Self {
        InputFieldValue::Text(text)
    }
}

impl From<String> for InputFieldValue {
    fn from(text: String) -> Self {
        InputFieldValue::Text(text.into())
    }
}

impl From<bool> for InputFieldValue {
    fn from(value: bool) -> Self {
        InputFieldValue::Bool(value)
    }
}

impl From<Vec<SharedString>> for InputFieldValue {
    fn from(values: Vec<SharedString>) -> Self {
        InputFieldValue::List(values)
    }
}

/// Which leaf an [`InputField`] renders, with the props only that leaf takes.
#[derive(Clone, Debug, PartialEq)]
pub enum InputFieldKind {
    Text(TextInputKind),
    Textarea {
        rows: Option<usize>,
        min_rows: usize,
        max_rows: Option<usize>,
    },
    Select {
        options: Vec<SelectOption>,
        multiple: bool,
    },
    Date {
        min_date: Option<NaiveDate>,
        max_date: Option<NaiveDate>,
    },
    Time {
        min_time: Option<NaiveTime>,
        max_time: Option<NaiveTime>,
    },
    Checkbox {
        indeterminate: bool,
    },
    Radio {
        options: Vec<RadioOption>,
        row: bool,
    },
    Toggle {
        label_placement: LabelPlacement,
        color: ToggleColor,
    },
    RichEditor {
        min_rows: usize,
        max_rows: usize,
    },
}

impl InputFieldKind {
    pub fn textarea() -> Self {
        InputFieldKind::Textarea {
            rows: None,
            min_rows: DEFAULT_TEXTAREA_MIN_ROWS,
            max_rows: None,
        }
    }

    pub fn rich_editor() -> Self {
        InputFieldKind::RichEditor {
            min_rows: DEFAULT_RICH_EDITOR_MIN_ROWS,
            max_rows: DEFAULT_RICH_EDITOR_MAX_ROWS,
        }
    }

    pub fn type_tag(&self) -> &'static str {
        match self {
            InputFieldKind::Text(kind) => kind.type_tag(),
            InputFieldKind::Textarea { .. } => "textarea",
            InputFieldKind::Select { .. } => "select",
            InputFieldKind::Date { .. } => "date",
            InputFieldKind::Time { .. } => "time",
            InputFieldKind::Checkbox { .. } => "checkbox",
            InputFieldKind::Radio { .. } => "radio",
            InputFieldKind::Toggle { .. } => "toggle",
            InputFieldKind::RichEditor { .. } => "rich-editor",
        }
    }
}

impl From<TextInputKind> for InputFieldKind {
    fn from(kind: TextInputKind) -> Self {
        InputFieldKind::Text(kind)
    }
}

type ValueCallback = Rc<dyn Fn(&InputFieldValue, &mut Window, &mut App)>;
type FocusCallback = Rc<dyn Fn(&mut Window, &mut App)>;

/// Renders one of the leaf inputs, chosen by its [`InputFieldKind`].
///
/// ```ignore
/// InputField::new("email", TextInputKind::Email)
///     .label("Email")
///     .required(true)
///     .on_change(|value, _window, _cx| println!("{value:?}"))
/// ```
#[derive(IntoElement)]
pub struct InputField {
    id: ElementId,
    kind: InputFieldKind,
    size: InputFieldSize,
    chrome: FieldChrome,
    placeholder: Option<SharedString>,
    disabled: bool,
    value: Option<InputFieldValue>,
    default_value: Option<InputFieldValue>,
    on_change: Option<ValueCallback>,
    on_focus: Option<FocusCallback>,
    on_blur: Option<FocusCallback>,
}

impl InputField {
    pub fn new(id: impl Into<ElementId>, kind: impl Into<InputFieldKind>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            size: InputFieldSize::default(),
            chrome: FieldChrome::default(),
            placeholder: None,
            disabled: false,
            value: None,
            default_value: None,
            on_change: None,
            on_focus: None,
            on_blur: None,
        }
    }

    pub fn type_tag(&self) -> &'static str {
        self.kind.type_tag()
    }

    pub fn size(mut self, size: InputFieldSize) -> Self {
        self.size = size;
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

    pub fn value(mut self, value: impl Into<InputFieldValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn default_value(mut self, value: impl Into<InputFieldValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Called with the new value. Text leaves report [`InputFieldValue::Text`].
    /// Dates and times report their ISO form while the text parses and lies in
    /// range, and an empty `Text` for blank, malformed or out of range input.
    /// Checkbox and toggle report [`InputFieldValue::Bool`], select reports
    /// [`InputFieldValue::List`] and radio reports the chosen option's text.
    pub fn on_change(
        mut self,
        on_change: impl Fn(&InputFieldValue, &mut Window, &mut App) + 'static,
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

    fn text_value(value: &Option<InputFieldValue>) -> Option<SharedString> {
        value.as_ref().and_then(InputFieldValue::as_text)
    }

    fn bool_value(value: &Option<InputFieldValue>) -> Option<bool> {
        value.as_ref().and_then(InputFieldValue::as_bool)
    }

    fn list_value(value: &Option<InputFieldValue>) -> Option<Vec<SharedString>> {
        value.as_ref().map(InputFieldValue::to_list)
    }

    fn forward_text(&self) -> Option<impl Fn(&SharedString, &mut Window, &mut App) + 'static> {
        self.on_change.clone().map(|on_change| {
            move |text: &SharedString, window: &mut Window, cx: &mut App| {
                on_change(&InputFieldValue::Text(text.clone()), window, cx)
            }
        })
    }

    fn forward_bool(&self) -> Option<impl Fn(&bool, &mut Window, &mut App) + 'static> {
        self.on_change.clone().map(|on_change| {
            move |value: &bool, window: &mut Window, cx: &mut App| {
                on_change(&InputFieldValue::Bool(*value), window, cx)
            }
        })
    }

    fn text_input(self, kind: TextInputKind) -> TextInput {
        let on_change = self.forward_text();

        let mut input = TextInput::new(self.id, kind)
            .size(self.size)
            .disabled(self.disabled)
            .with_chrome(self.chrome);

        if let Some(placeholder) = self.placeholder {
            input = input.placeholder(placeholder);
        }
        if let Some(value) = Self::text_value(&self.value) {
            input = input.value(value);
        }
        if let Some(value) = Self::text_value(&self.default_value) {
            input = input.default_value(value);
        }
        if let Some(on_change) = on_change {
            input = input.on_change(on_change);
        }
        if let Some(on_focus) = self.on_focus {
            input = input.on_focus(move |window, cx| on_focus(window, cx));
        }
        if let Some(on_blur) = self.on_blur {
            input = input.on_blur(move |window, cx| on_blur(window, cx));
        }

        input
    }

    fn into_leaf(mut self) -> AnyElement {
        tracing::trace!(id = ?self.id, kind = self.type_tag(), "rendering input field");

        match self.kind.clone() {
            InputFieldKind::Text(kind) => self.text_input(kind).into_any_element(),

            InputFieldKind::Textarea {
                rows,
                min_rows,
                max_rows,
            } => {
                let input = self.text_input(TextInputKind::Text);
                Textarea::from_input(input, rows, min_rows, max_rows).into_any_element()
            }

            InputFieldKind::RichEditor { min_rows, max_rows } => {
                let input = self.text_input(TextInputKind::Text);
                RichEditor::from_input(input, min_rows, max_rows).into_any_element()
            }

            InputFieldKind::Select { options, multiple } => {
                let mut select = Select::new(self.id, options)
                    .multiple(multiple)
                    .size(self.size)
                    .disabled(self.disabled)
                    .with_chrome(self.chrome);

                if let Some(placeholder) = self.placeholder {
                    select = select.placeholder(placeholder);
                }
                if let Some(value) = Self::list_value(&self.value) {
                    select = select.value(value);
                }
                if let Some(value) = Self::list_value(&self.default_value) {
                    select = select.default_value(value);
                }
                if let Some(on_change) = self.on_change {
                    select = select.on_change(move |values, window, cx| {
                        on_change(&InputFieldValue::List(values.to_vec()), window, cx)
                    });
                }
                if let Some(on_focus) = self.on_focus {
                    select = select.on_focus(move |window, cx| on_focus(window, cx));
                }
                if let Some(on_blur) = self.on_blur {
                    select = select.on_blur(move |window, cx| on_blur(window, cx));
                }

                select.into_any_element()
            }

            InputFieldKind::Date { min_date, max_date } => {
                // The picker reports parsed dates, not the raw text.
                let on_change = self.on_change.take();
                let mut picker = DatePicker::from_input(self.text_input(TextInputKind::Text))
                    .min_date(min_date)
                    .max_date(max_date);

                if let Some(on_change) = on_change {
                    picker = picker.on_change(move |date, window, cx| {
                        on_change(&InputFieldValue::Text(picker_text(date)), window, cx)
                    });
                }

                picker.into_any_element()
            }

            InputFieldKind::Time { min_time, max_time } => {
                let on_change = self.on_change.take();
                let mut picker = TimePicker::from_input(self.text_input(TextInputKind::Text))
                    .min_time(min_time)
                    .max_time(max_time);

                if let Some(on_change) = on_change {
                    picker = picker.on_change(move |time, window, cx| {
                        on_change(&InputFieldValue::Text(picker_text(time)), window, cx)
                    });
                }

                picker.into_any_element()
            }

            InputFieldKind::Checkbox { indeterminate } => {
                let on_change = self.forward_bool();

                let mut checkbox = Checkbox::new(self.id)
                    .indeterminate(indeterminate)
                    .disabled(self.disabled)
                    .with_chrome(self.chrome);

                if let Some(checked) = Self::bool_value(&self.value) {
                    checkbox = checkbox.checked(checked);
                }
                if let Some(checked) = Self::bool_value(&self.default_value) {
                    checkbox = checkbox.default_checked(checked);
                }
                if let Some(on_change) = on_change {
                    checkbox = checkbox.on_change(on_change);
                }

                checkbox.into_any_element()
            }

            InputFieldKind::Radio { options, row } => {
                let on_change = self.forward_text();

                let mut radio = RadioGroup::new(self.id, options)
                    .row(row)
                    .disabled(self.disabled)
                    .with_chrome(self.chrome);

                if let Some(value) = Self::text_value(&self.value) {
                    radio = radio.value(value);
                }
                if let Some(value) = Self::text_value(&self.default_value) {
                    radio = radio.default_value(value);
                }
                if let Some(on_change) = on_change {
                    radio = radio.on_change(on_change);
                }

                radio.into_any_element()
            }

            InputFieldKind::Toggle {
                label_placement,
                color,
            } => {
                let on_change = self.forward_bool();

                let mut toggle = Toggle::new(self.id)
                    .label_placement(label_placement)
                    .color(color)
                    .size(self.size)
                    .disabled(self.disabled)
                    .with_chrome(self.chrome);

                if let Some(checked) = Self::bool_value(&self.value) {
                    toggle = toggle.checked(checked);
                }
                if let Some(checked) = Self::bool_value(&self.default_value) {
                    toggle = toggle.default_checked(checked);
                }
                if let Some(on_change) = on_change {
                    toggle = toggle.on_change(on_change);
                }

                toggle.into_any_element()
            }
        }
    }
}

impl FieldChromeExt for InputField {
    fn chrome_mut(&mut self) -> &mut FieldChrome {
        &mut self.chrome
    }
}

impl RenderOnce for InputField {
    fn render(self, _window: &mut Window, _cx: &mut App) -> impl IntoElement {
        self.into_leaf()
    }
}

#[cfg(test)]
mod pure_tests {
    use super::*;

    #[test]
    fn test_type_tags() {
        assert_eq!(InputFieldKind::Text(TextInputKind::Text).type_tag(), "text");
        assert_eq!(
            InputFieldKind::Text(TextInputKind::Password).type_tag(),
            "password"
        );
        assert_eq!(InputFieldKind::Text(TextInputKind::Tel).type_tag(), "tel");
        assert_eq!(InputFieldKind::textarea().type_tag(), "textarea");
        assert_eq!(InputFieldKind::rich_editor().type_tag(), "rich-editor");
        assert_eq!(
            InputFieldKind::Select {
                options: Vec::new(),
                multiple: true
            }
            .type_tag(),
            "select"
        );
        assert_eq!(
            InputFieldKind::Toggle {
                label_placement: LabelPlacement::End,
                color: ToggleColor::Primary
            }
            .type_tag(),
            "toggle"
        );
    }

    #[test]
    fn test_kind_defaults() {
        assert_eq!(
            InputFieldKind::textarea(),
            InputFieldKind::Textarea {
                rows: None,
                min_rows: 3,
                max_rows: None
            }
        );
        assert_eq!(
            InputFieldKind::rich_editor(),
            InputFieldKind::RichEditor {
                min_rows: 4,
                max_rows: 10
            }
        );
    }

    #[test]
    fn test_value_conversions() {
        let text = InputFieldValue::from("apple");
        assert_eq!(text.as_text(), Some("apple".into()));
        assert_eq!(text.as_bool(), None);
        assert_eq!(text.to_list(), vec![SharedString::from("apple")]);

        assert!(InputFieldValue::from("").to_list().is_empty());

        let flag = InputFieldValue::from(true);
        assert_eq!(flag.as_bool(), Some(true));
        assert_eq!(flag.as_text(), None);

        let list = InputFieldValue::from(vec![SharedString::from("a"), SharedString::from("b")]);
        assert_eq!(list.to_list().len(), 2);
        assert_eq!(list.as_text(), Some("a".into()));
    }
}
