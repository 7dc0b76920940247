use std::{f32::consts::TAU, time::Duration};

use enum_assoc::Assoc;
use gpui::{
    Animation, AnimationExt, App, ElementId, Hsla, IntoElement, ParentElement, PathBuilder, Pixels,
    RenderOnce, Rgba, SharedString, Styled, Window, canvas, div, point, prelude::FluentBuilder, px,
    relative,
};

use crate::{
    primitives::min_w0_wrapper,
    theme::{ThemeAccentKind, ThemeExt, ThemeTextSizeKind},
    utils::{ElementIdExt, PixelsExt, RgbaExt},
};

const CIRCLE_PERIOD: Duration = Duration::from_millis(1400);
const LINEAR_PERIOD: Duration = Duration::from_millis(2000);
/// Fraction of the ring covered while spinning.
const INDETERMINATE_SWEEP: f32 = 0.75;
/// Width of the sliding segment of an indeterminate bar.
const INDETERMINATE_SEGMENT: f32 = 0.4;
const ARC_SEGMENTS: usize = 64;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SpinnerType {
    #[default]
    Circle,
    Linear,
}

#[derive(Assoc, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[func(pub fn diameter(&self) -> Pixels)]
#[func(pub fn thickness(&self) -> f32)]
#[func(pub fn bar_height(&self) -> Pixels)]
#[func(pub fn label_text(&self) -> ThemeTextSizeKind)]
pub enum SpinnerSize {
    #[assoc(diameter = px(24.))]
    #[assoc(thickness = 3.6)]
    #[assoc(bar_height = px(4.))]
    #[assoc(label_text = ThemeTextSizeKind::Caption)]
    Sm,
    #[default]
    #[assoc(diameter = px(40.))]
    #[assoc(thickness = 4.)]
    #[assoc(bar_height = px(6.))]
    #[assoc(label_text = ThemeTextSizeKind::Caption)]
    Md,
    #[assoc(diameter = px(64.))]
    #[assoc(thickness = 4.4)]
    #[assoc(bar_height = px(8.))]
    #[assoc(label_text = ThemeTextSizeKind::Body)]
    Xl,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SpinnerColor {
    #[default]
    Primary,
    Secondary,
    Error,
    Info,
    Success,
    Warning,
    /// Uses the current text color.
    Inherit,
}

impl SpinnerColor {
    pub fn resolve(&self, cx: &App) -> Rgba {
        let accent = match self {
            SpinnerColor::Primary => ThemeAccentKind::Primary,
            SpinnerColor::Secondary => ThemeAccentKind::Secondary,
            SpinnerColor::Error => ThemeAccentKind::Destructive,
            SpinnerColor::Info => ThemeAccentKind::Info,
            SpinnerColor::Success => ThemeAccentKind::Constructive,
            SpinnerColor::Warning => ThemeAccentKind::Warning,
            SpinnerColor::Inherit => {
                return cx.get_theme().variants.active(cx).colors.text.primary;
            }
        };

        accent.resolve(cx)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SpinnerVariant {
    Determinate,
    #[default]
    Indeterminate,
    /// Linear only: a second, lighter bar shows `value_buffer`.
    Buffer,
}

/// Variant actually drawn for a spinner type. Circles can't show a buffer.
pub fn effective_variant(kind: SpinnerType, variant: SpinnerVariant) -> SpinnerVariant {
    match (kind, variant) {
        (SpinnerType::Circle, SpinnerVariant::Buffer) => SpinnerVariant::Indeterminate,
        (_, variant) => variant,
    }
}

pub fn clamp_progress(value: f32) -> f32 {
    if value.is_nan() {
        return 0.;
    }
    value.clamp(0., 100.)
}

pub fn format_percentage(value: f32) -> SharedString {
    format!("{}%", clamp_progress(value).round() as i32).into()
}

/// Progress indicator drawn as a ring or a horizontal bar.
#[derive(IntoElement)]
pub struct Spinner {
    id: ElementId,
    kind: SpinnerType,
    size: SpinnerSize,
    color: SpinnerColor,
    variant: SpinnerVariant,
    value: f32,
    value_buffer: f32,
    label: Option<SharedString>,
    show_percentage: bool,
    thickness: Option<f32>,
}

impl Spinner {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            kind: SpinnerType::default(),
            size: SpinnerSize::default(),
            color: SpinnerColor::default(),
            variant: SpinnerVariant::default(),
            value: 0.,
            value_buffer: 0.,
            label: None,
            show_percentage: true,
            thickness: None,
        }
    }

    pub fn circle(id: impl Into<ElementId>) -> Self {
        Self::new(id).kind(SpinnerType::Circle)
    }

    pub fn linear(id: impl Into<ElementId>) -> Self {
        Self::new(id).kind(SpinnerType::Linear)
    }

    pub fn kind(mut self, kind: SpinnerType) -> Self {
        self.kind = kind;
        self
    }

    pub fn size(mut self, size: SpinnerSize) -> Self {
        self.size = size;
        self
    }

    pub fn color(mut self, color: SpinnerColor) -> Self {
        self.color = color;
        self
    }

    pub fn variant(mut self, variant: SpinnerVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Progress between 0 and 100.
    pub fn value(mut self, value: f32) -> Self {
        self.value = clamp_progress(value);
        self
    }

    pub fn value_buffer(mut self, value_buffer: f32) -> Self {
        self.value_buffer = clamp_progress(value_buffer);
        self
    }

    pub fn label(mut self, label: impl Into<SharedString>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn show_percentage(mut self, show_percentage: bool) -> Self {
        self.show_percentage = show_percentage;
        self
    }

    pub fn thickness(mut self, thickness: f32) -> Self {
        self.thickness = Some(thickness);
        self
    }

    pub fn resolved_variant(&self) -> SpinnerVariant {
        effective_variant(self.kind, self.variant)
    }

    pub fn resolved_thickness(&self) -> f32 {
        self.thickness.unwrap_or(self.size.thickness())
    }

    /// The percentage text shown next to a linear bar, if any.
    pub fn percentage_text(&self) -> Option<SharedString> {
        let visible = self.kind == SpinnerType::Linear
            && self.show_percentage
            && self.resolved_variant() == SpinnerVariant::Determinate;

        visible.then(|| format_percentage(self.value))
    }

    fn render_circle(&self, color: Rgba, track: Rgba) -> impl IntoElement {
        let diameter = self.size.diameter();
        let thickness = self.resolved_thickness();
        let id = self.id.with_suffix("circle");

        let ring = div().size(diameter).relative().child(arc(0., 1., thickness, track));

        match self.resolved_variant() {
            SpinnerVariant::Determinate => ring
                .child(arc(0., self.value / 100., thickness, color))
                .into_any_element(),
            _ => ring
                .with_animation(
                    id,
                    Animation::new(CIRCLE_PERIOD).repeat(),
                    move |this, delta| this.child(arc(delta, INDETERMINATE_SWEEP, thickness, color)),
                )
                .into_any_element(),
        }
    }

    fn render_bar(&self, color: Rgba, track: Rgba) -> impl IntoElement {
        let height = self.size.bar_height();
        let id = self.id.with_suffix("bar");

        let bar = div()
            .relative()
            .w_full()
            .h(height)
            .overflow_hidden()
            .rounded(height / 2.)
            .bg(track);

        match self.resolved_variant() {
            SpinnerVariant::Determinate => bar
                .child(fill(0., self.value / 100., color))
                .into_any_element(),
            SpinnerVariant::Buffer => bar
                .child(fill(0., self.value_buffer / 100., color.fade(0.4)))
                .child(fill(0., self.value / 100., color))
                .into_any_element(),
            SpinnerVariant::Indeterminate => bar
                .with_animation(
                    id,
                    Animation::new(LINEAR_PERIOD).repeat(),
                    move |this, delta| {
                        let start = delta * (1. + INDETERMINATE_SEGMENT) - INDETERMINATE_SEGMENT;
                        this.child(fill(start, INDETERMINATE_SEGMENT, color))
                    },
                )
                .into_any_element(),
        }
    }
}

/// A segment of the bar starting at `start` covering `length`, both fractions of the width.
fn fill(start: f32, length: f32, color: Rgba) -> impl IntoElement {
    div()
        .absolute()
        .top_0()
        .bottom_0()
        .left(relative(start))
        .w(relative(length.max(0.)))
        .bg(color)
}

/// Strokes part of a ring inscribed in the parent. `start` and `sweep` are
/// fractions of a full turn, starting at twelve o'clock.
fn arc(start: f32, sweep: f32, thickness: f32, color: Rgba) -> impl IntoElement {
    canvas(
        |_bounds, _window, _cx| {},
        move |bounds, _, window, _cx| {
            if sweep <= 0. {
                return;
            }

            let center = bounds.center();
            let edge = bounds.size.width.as_f32().min(bounds.size.height.as_f32());
            let radius = (edge - thickness) / 2.;
            if radius <= 0. {
                return;
            }

            let steps = ((ARC_SEGMENTS as f32 * sweep.min(1.)).ceil() as usize).max(1);
            let mut builder = PathBuilder::stroke(px(thickness));

            for step in 0..=steps {
                let turn = start + sweep.min(1.) * (step as f32 / steps as f32);
                let angle = turn * TAU - TAU / 4.;
                let vertex = point(
                    center.x + px(radius * angle.cos()),
                    center.y + px(radius * angle.sin()),
                );

                if step == 0 {
                    builder.move_to(vertex);
                } else {
                    builder.line_to(vertex);
                }
            }

            if let Ok(path) = builder.build() {
                window.paint_path(path, Hsla::from(color));
            }
        },
    )
    .absolute()
    .size_full()
}

impl RenderOnce for Spinner {
    fn render(self, _window: &mut Window, cx: &mut App) -> impl IntoElement {
        let color = self.color.resolve(cx);
        let track = color.fade(0.2);
        let label_text = self.size.label_text();
        let secondary_text = cx.get_theme().variants.active(cx).colors.text.secondary;

        let label = self.label.clone().map(|label| {
            min_w0_wrapper()
                .text_kind(label_text)
                .text_color(secondary_text)
                .child(label)
        });

        match self.kind {
            SpinnerType::Circle => div()
                .flex()
                .flex_col()
                .items_center()
                .gap(px(8.))
                .child(self.render_circle(color, track))
                .children(label)
                .into_any_element(),

            SpinnerType::Linear => {
                let percentage = self.percentage_text().map(|text| {
                    min_w0_wrapper()
                        .text_kind(label_text)
                        .text_color(secondary_text)
                        .flex_none()
                        .child(text)
                });

                div()
                    .flex()
                    .flex_col()
                    .w_full()
                    .gap(px(4.))
                    .when(label.is_some() || percentage.is_some(), |this| {
                        this.child(
                            div()
                                .flex()
                                .justify_between()
                                .items_center()
                                .gap(px(8.))
                                .children(label)
                                .children(percentage),
                        )
                    })
                    .child(self.render_bar(color, track))
                    .into_any_element()
            }
        }
    }
}


#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use crate::theme::Theme;
    use gpui::{AppContext, TestAppContext, VisualTestContext};

    #[gpui::test]
    fn test_spinner_colors(cx: &mut TestAppContext) {
        cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);
            let colors = cx.get_theme().variants.active(cx).colors.clone();

            assert_eq!(SpinnerColor::Primary.resolve(cx), colors.accent.primary);
            assert_eq!(SpinnerColor::Error.resolve(cx), colors.accent.destructive);
            assert_eq!(SpinnerColor::Inherit.resolve(cx), colors.text.primary);
        });
    }

    #[gpui::test]
    fn test_spinners_render(cx: &mut TestAppContext) {
        let window = cx.update(|cx| {
            cx.set_theme(Theme::DEFAULT);
            cx.open_window(Default::default(), |_window, cx| cx.new(|_cx| SpinnerTestView))
                .unwrap()
        });

        let _cx = VisualTestContext::from_window(window.into(), cx);
    }

    struct SpinnerTestView;

    impl gpui::Render for SpinnerTestView {
        fn render(
            &mut self,
            _window: &mut Window,
            _cx: &mut gpui::Context<Self>,
        ) -> impl IntoElement {
            div()
                .w(px(300.))
                .child(Spinner::circle("circle").label("Loading"))
                .child(
                    Spinner::circle("determinate")
                        .variant(SpinnerVariant::Determinate)
                        .value(60.),
                )
                .child(
                    Spinner::linear("buffer")
                        .variant(SpinnerVariant::Buffer)
                        .value(30.)
                        .value_buffer(60.),
                )
                .child(
                    Spinner::linear("linear")
                        .variant(SpinnerVariant::Determinate)
                        .value(50.)
                        .label("Uploading"),
                )
        }
    }
}
