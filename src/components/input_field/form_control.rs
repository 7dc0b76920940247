use gpui::{
    AnyElement, App, IntoElement, ParentElement, RenderOnce, SharedString, Styled, Window, div,
    prelude::FluentBuilder, px,
};

use crate::{
    primitives::min_w0_wrapper,
    theme::{ThemeExt, ThemeTextSizeKind},
};

const CHROME_GAP: f32 = 6.;

/// Label, helper text and validation flags shared by every form field.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldChrome {
    pub label: Option<SharedString>,
    pub helper_text: Option<SharedString>,
    pub required: bool,
    pub error: bool,
    pub full_width: bool,
}

/// Builder methods for components that carry a [`FieldChrome`].
pub trait FieldChromeExt: Sized {
    fn chrome_mut(&mut self) -> &mut FieldChrome;

    fn label(mut self, label: impl Into<SharedString>) -> Self {
        self.chrome_mut().label = Some(label.into());
        self
    }

    fn helper_text(mut self, helper_text: impl Into<SharedString>) -> Self {
        self.chrome_mut().helper_text = Some(helper_text.into());
        self
    }

    /// Marks the label with an asterisk.
    fn required(mut self, required: bool) -> Self {
        self.chrome_mut().required = required;
        self
    }

    /// Paints the label and helper text with the destructive accent.
    fn error(mut self, error: bool) -> Self {
        self.chrome_mut().error = error;
        self
    }

    fn full_width(mut self, full_width: bool) -> Self {
        self.chrome_mut().full_width = full_width;
        self
    }

    fn with_chrome(mut self, chrome: FieldChrome) -> Self {
        *self.chrome_mut() = chrome;
        self
    }
}

pub fn label_text(label: &str, required: bool) -> SharedString {
    if required {
        format!("{label} *").into()
    } else {
        SharedString::from(label.to_string())
    }
}

/// Stacks a label row, a control and helper text.
#[derive(IntoElement)]
pub struct FormControl {
    chrome: FieldChrome,
    disabled: bool,
    control: AnyElement,
}

impl FormControl {
    pub fn new(chrome: FieldChrome, control: impl IntoElement) -> Self {
        Self {
            chrome,
            disabled: false,
            control: control.into_any_element(),
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

impl RenderOnce for FormControl {
    fn render(self, _window: &mut Window, cx: &mut App) -> impl IntoElement {
        let colors = &cx.get_theme().variants.active(cx).colors;
        let destructive_color = colors.accent.destructive;
        let (primary_text_color, secondary_text_color) = colors.text.all();

        let label_color = match (self.chrome.error, self.disabled) {
            (true, _) => destructive_color,
            (false, true) => secondary_text_color,
            (false, false) => primary_text_color,
        };
        let helper_color = if self.chrome.error {
            destructive_color
        } else {
            secondary_text_color
        };

        let FieldChrome {
            label,
            helper_text,
            required,
            full_width,
            ..
        } = self.chrome;

        div()
            .flex()
            .flex_col()
            .gap(px(CHROME_GAP))
            .when(full_width, |this| this.w_full())
            .when_some(label, |this, label| {
                this.child(
                    min_w0_wrapper()
                        .text_kind(ThemeTextSizeKind::Caption)
                        .text_color(label_color)
                        .child(label_text(&label, required)),
                )
            })
            .child(
                div()
                    .flex()
                    .when(full_width, |this| this.w_full())
                    .child(self.control),
            )
            .when_some(helper_text, |this, helper_text| {
                this.child(
                    min_w0_wrapper()
                        .text_kind(ThemeTextSizeKind::Caption)
                        .text_color(helper_color)
                        .child(helper_text),
                )
            })
    }
}

#[cfg(test)]
mod pure_tests {
    use super::*;

    struct Field(FieldChrome);

    impl FieldChromeExt for Field {
        fn chrome_mut(&mut self) -> &mut FieldChrome {
            &mut self.0
        }
    }

    #[test]
    fn test_required_label_gets_asterisk() {
        assert_eq!(label_text("Name", true), SharedString::from("Name *"));
        assert_eq!(label_text("Name", false), SharedString::from("Name"));
    }

    #[test]
    fn test_chrome_builder() {
        let field = Field(FieldChrome::default())
            .label("Email")
            .helper_text("We never share it")
            .required(true)
            .error(true)
            .full_width(true);

        assert_eq!(field.0.label, Some("Email".into()));
        assert_eq!(field.0.helper_text, Some("We never share it".into()));
        assert!(field.0.required && field.0.error && field.0.full_width);

        let field = field.with_chrome(FieldChrome::default());
        assert_eq!(field.0, FieldChrome::default());
    }
}
