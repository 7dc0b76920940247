use std::rc::Rc;

use chrono::{NaiveDate, NaiveTime};
use gpui::{App, ElementId, Focusable, IntoElement, RenderOnce, SharedString, Window, px};
use thiserror::Error;

use super::text_input::{forward_text_input_setters, use_input_state};
use crate::{
    MosaicIconKind,
    components::{
        Icon,
        input_field::{FieldChromeExt, TextInput, TextInputKind},
    },
    theme::ThemeExt,
    utils::PositionalParentElement,
};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DateTimeError {
    #[error("\"{input}\" is not a valid {expected}")]
    Invalid {
        input: String,
        expected: &'static str,
    },
    #[error("Must be {min} or later")]
    BeforeMin { min: String },
    #[error("Must be {max} or earlier")]
    AfterMax { max: String },
}

/// A value a date or time picker can parse, bound and print.
pub trait PickerValue: Copy + PartialOrd + 'static {
    const FORMAT: &'static str;
    /// Human readable format, used in error messages.
    const EXPECTED: &'static str;
    const PLACEHOLDER: &'static str;
    const ICON: MosaicIconKind;

    fn parse(text: &str) -> chrono::ParseResult<Self>;

    fn to_text(&self) -> String;
}

impl PickerValue for NaiveDate {
    const FORMAT: &'static str = DATE_FORMAT;
    const EXPECTED: &'static str = "date (YYYY-MM-DD)";
    const PLACEHOLDER: &'static str = "Select date";
    const ICON: MosaicIconKind = MosaicIconKind::Calendar;

    fn parse(text: &str) -> chrono::ParseResult<Self> {
        NaiveDate::parse_from_str(text, Self::FORMAT)
    }

    fn to_text(&self) -> String {
        self.format(Self::FORMAT).to_string()
    }
}

impl PickerValue for NaiveTime {
    const FORMAT: &'static str = TIME_FORMAT;
    const EXPECTED: &'static str = "time (HH:MM)";
    const PLACEHOLDER: &'static str = "Select time";
    const ICON: MosaicIconKind = MosaicIconKind::Clock;

    fn parse(text: &str) -> chrono::ParseResult<Self> {
        NaiveTime::parse_from_str(text, Self::FORMAT)
    }

    fn to_text(&self) -> String {
        self.format(Self::FORMAT).to_string()
    }
}

/// Parses `text` and checks it against the inclusive bounds.
/// Blank text is a valid, empty value.
pub fn parse_in_range<T: PickerValue>(
    text: &str,
    min: Option<T>,
    max: Option<T>,
) -> Result<Option<T>, DateTimeError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }

    let value = T::parse(text).map_err(|_| DateTimeError::Invalid {
        input: text.to_string(),
        expected: T::EXPECTED,
    })?;

    if let Some(min) = min.filter(|min| value < *min) {
        return Err(DateTimeError::BeforeMin { min: min.to_text() });
    }

    if let Some(max) = max.filter(|max| value > *max) {
        return Err(DateTimeError::AfterMax { max: max.to_text() });
    }

    Ok(Some(value))
}

pub fn parse_date(
    text: &str,
    min: Option<NaiveDate>,
    max: Option<NaiveDate>,
) -> Result<Option<NaiveDate>, DateTimeError> {
    parse_in_range(text, min, max)
}

pub fn parse_time(
    text: &str,
    min: Option<NaiveTime>,
    max: Option<NaiveTime>,
) -> Result<Option<NaiveTime>, DateTimeError> {
    parse_in_range(text, min, max)
}

/// The ISO text a picker value is reported as, empty for no value.
pub fn picker_text<T: PickerValue>(value: &Option<T>) -> SharedString {
    value
        .as_ref()
        .map(|value| SharedString::from(value.to_text()))
        .unwrap_or_default()
}

type PickerCallback<T> = Rc<dyn Fn(&Option<T>, &mut Window, &mut App)>;

/// A text field that accepts a date or time and validates it against a range.
///
/// Every edit is reported through `on_change`: `Some` while the text parses
/// and lies inside the range, `None` for blank, malformed or out of range
/// text. The field shows the error once it loses focus.
#[derive(IntoElement)]
pub struct TemporalPicker<T: PickerValue> {
    input: TextInput,
    min: Option<T>,
    max: Option<T>,
    on_change: Option<PickerCallback<T>>,
}

pub type DatePicker = TemporalPicker<NaiveDate>;
pub type TimePicker = TemporalPicker<NaiveTime>;

impl<T: PickerValue> TemporalPicker<T> {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self::from_input(TextInput::new(id, TextInputKind::Text))
    }

    pub(crate) fn from_input(input: TextInput) -> Self {
        Self {
            input,
            min: None,
            max: None,
            on_change: None,
        }
    }

    pub fn on_change(
        mut self,
        on_change: impl Fn(&Option<T>, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_change = Some(Rc::new(on_change));
        self
    }
}

impl DatePicker {
    pub fn min_date(mut self, min_date: impl Into<Option<NaiveDate>>) -> Self {
        self.min = min_date.into();
        self
    }

    pub fn max_date(mut self, max_date: impl Into<Option<NaiveDate>>) -> Self {
        self.max = max_date.into();
        self
    }
}

impl TimePicker {
    pub fn min_time(mut self, min_time: impl Into<Option<NaiveTime>>) -> Self {
        self.min = min_time.into();
        self
    }

    pub fn max_time(mut self, max_time: impl Into<Option<NaiveTime>>) -> Self {
        self.max = max_time.into();
        self
    }
}

forward_text_input_setters!(DatePicker);
forward_text_input_setters!(TimePicker);

impl<T: PickerValue> RenderOnce for TemporalPicker<T> {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let secondary_text_color = cx.get_theme().variants.active(cx).colors.text.secondary;
        let (min, max) = (self.min, self.max);

        let state = match self.input.external_state() {
            Some(state) => state.clone(),
            None => use_input_state(
                self.input.id(),
                self.input.default_value_ref().cloned(),
                window,
                cx,
            ),
        };
        let text = match self.input.controlled_value() {
            Some(value) => value.clone(),
            None => state.read(cx).value(),
        };
        let is_focus = state.read(cx).focus_handle(cx).is_focused(window);

        let mut input = self
            .input
            .state(state)
            .placeholder_or(T::PLACEHOLDER)
            .child_right(
                Icon::new(T::ICON)
                    .size(px(16.))
                    .color(secondary_text_color)
                    .flex_none(),
            );

        if let Some(on_change) = self.on_change {
            input = input.map_on_change(move |forward| {
                Rc::new(move |text: &SharedString, window: &mut Window, cx: &mut App| {
                    if let Some(forward) = forward.as_ref() {
                        forward(text, window, cx);
                    }

                    match parse_in_range(text, min, max) {
                        Ok(value) => on_change(&value, window, cx),
                        Err(err) => {
                            tracing::debug!(%err, "rejected picker input");
                            on_change(&None, window, cx);
                        }
                    }
                })
            });
        }

        match parse_in_range(&text, min, max) {
            Err(err) if !is_focus => input.error(true).helper_text(err.to_string()),
            _ => input,
        }
    }
}

#[cfg(test)]
mod pure_tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-02-29", None, None),
            Ok(Some(date(2024, 2, 29)))
        );
        assert_eq!(parse_date("  ", None, None), Ok(None));
        assert!(matches!(
            parse_date("2023-02-29", None, None),
            Err(DateTimeError::Invalid { .. })
        ));
        assert!(matches!(
            parse_date("29/02/2024", None, None),
            Err(DateTimeError::Invalid { .. })
        ));
    }

    #[test]
    fn test_date_bounds_are_inclusive() {
        let min = Some(date(2024, 1, 1));
        let max = Some(date(2024, 12, 31));

        assert_eq!(
            parse_date("2024-01-01", min, max),
            Ok(Some(date(2024, 1, 1)))
        );
        assert_eq!(
            parse_date("2024-12-31", min, max),
            Ok(Some(date(2024, 12, 31)))
        );
        assert_eq!(
            parse_date("2023-12-31", min, max),
            Err(DateTimeError::BeforeMin {
                min: "2024-01-01".into()
            })
        );
        assert_eq!(
            parse_date("2025-01-01", min, max),
            Err(DateTimeError::AfterMax {
                max: "2024-12-31".into()
            })
        );
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_time("09:30", None, None), Ok(Some(time(9, 30))));
        assert!(matches!(
            parse_time("25:00", None, None),
            Err(DateTimeError::Invalid { .. })
        ));
        assert_eq!(
            parse_time("08:59", Some(time(9, 0)), Some(time(17, 0))),
            Err(DateTimeError::BeforeMin {
                min: "09:00".into()
            })
        );
        assert_eq!(
            parse_time("17:00", Some(time(9, 0)), Some(time(17, 0))),
            Ok(Some(time(17, 0)))
        );
    }

    #[test]
    fn test_picker_text() {
        assert_eq!(picker_text(&Some(date(2024, 3, 5))).as_ref(), "2024-03-05");
        assert_eq!(picker_text(&Some(time(7, 5))).as_ref(), "07:05");
        assert_eq!(picker_text::<NaiveDate>(&None).as_ref(), "");
        assert_eq!(
            picker_text(&parse_date("2024-13-40", None, None).unwrap_or(None)).as_ref(),
            ""
        );
    }

    #[test]
    fn test_error_messages() {
        let err = parse_date("soon", None, None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "\"soon\" is not a valid date (YYYY-MM-DD)"
        );

        let err = parse_time("07:00", Some(time(8, 0)), None).unwrap_err();
        assert_eq!(err.to_string(), "Must be 08:00 or later");
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::{components::input_field::replace_input_value, theme::Theme};
    use gpui::{
        AppContext, Context, Entity, ParentElement, Render, Styled, TestAppContext,
        VisualTestContext, div,
    };
    use gpui_primitives::input::InputState;

    struct PickerView {
        date_state: Entity<InputState>,
        time_state: Entity<InputState>,
        dates: Rc<RefCell<Vec<Option<NaiveDate>>>>,
        times: Rc<RefCell<Vec<Option<NaiveTime>>>>,
    }

    impl Render for PickerView {
        fn render(&mut self, _window: &mut Window, _cx: &mut Context<Self>) -> impl IntoElement {
            let dates = self.dates.clone();
            let times = self.times.clone();

            div()
                .size_full()
                .child(
                    DatePicker::new("date")
                        .label("Start")
                        .state(self.date_state.clone())
                        .min_date(NaiveDate::from_ymd_opt(2024, 1, 1))
                        .on_change(move |date, _window, _cx| dates.borrow_mut().push(*date)),
                )
                .child(
                    TimePicker::new("time")
                        .state(self.time_state.clone())
                        .max_time(NaiveTime::from_hms_opt(18, 0, 0))
                        .on_change(move |time, _window, _cx| times.borrow_mut().push(*time)),
                )
        }
    }

    struct Harness {
        view: Entity<PickerView>,
        vcx: VisualTestContext,
    }

    impl Harness {
        fn open(cx: &mut TestAppContext) -> Self {
            let window = cx.update(|cx| {
                cx.set_theme(Theme::DEFAULT);
                crate::init(cx);

                cx.open_window(Default::default(), |_window, cx| {
                    cx.new(|cx| PickerView {
                        date_state: cx.new(|cx| InputState::new(cx)),
                        time_state: cx.new(|cx| InputState::new(cx)),
                        dates: Rc::default(),
                        times: Rc::default(),
                    })
                })
                .unwrap()
            });

            let view = window.root(cx).unwrap();
            let mut vcx = VisualTestContext::from_window(window.into(), cx);
            vcx.run_until_parked();

            Self { view, vcx }
        }

        fn type_into(&mut self, state: Entity<InputState>, text: &'static str) {
            self.vcx.update(|_window, cx| {
                replace_input_value(&state, text.into(), cx);
                state.update(cx, |_state, cx| cx.notify());
            });
            self.vcx.run_until_parked();
        }
    }

    #[gpui::test]
    fn test_invalid_dates_clear_the_value(cx: &mut TestAppContext) {
        let mut harness = Harness::open(cx);
        let (state, dates) = harness
            .view
            .read_with(&harness.vcx, |view, _| (view.date_state.clone(), view.dates.clone()));

        harness.type_into(state.clone(), "2024-03-05");
        harness.type_into(state.clone(), "2024-13-40");
        harness.type_into(state.clone(), "2024-04-01");
        harness.type_into(state.clone(), "2023-12-31");
        harness.type_into(state, "");

        assert_eq!(
            dates.borrow().as_slice(),
            &[
                NaiveDate::from_ymd_opt(2024, 3, 5),
                None,
                NaiveDate::from_ymd_opt(2024, 4, 1),
                None,
                None,
            ]
        );
    }

    #[gpui::test]
    fn test_time_after_max_reports_none(cx: &mut TestAppContext) {
        let mut harness = Harness::open(cx);
        let (state, times) = harness
            .view
            .read_with(&harness.vcx, |view, _| (view.time_state.clone(), view.times.clone()));

        harness.type_into(state.clone(), "07:45");
        harness.type_into(state, "18:30");

        assert_eq!(
            times.borrow().as_slice(),
            &[NaiveTime::from_hms_opt(7, 45, 0), None]
        );
    }
}
