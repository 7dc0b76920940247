use enum_assoc::Assoc;
use gpui::{
    AnyElement, App, FontWeight, Hsla, IntoElement, ParentElement, RenderOnce, Rems,
    SharedString, StyleRefinement, Styled, Window, div, prelude::FluentBuilder, px, relative, rems,
};
use smallvec::SmallVec;

use crate::theme::ThemeExt;

/// Bottom margin of a paragraph.
const PARAGRAPH_MARGIN: gpui::Pixels = px(16.);
/// Bottom margin added by `gutter_bottom`, relative to the font size.
const GUTTER_EM: f32 = 0.35;
const SOFT_TEXT_OPACITY: f32 = 0.7;

#[derive(Assoc, Clone, Copy, Debug, Default, PartialEq)]
#[func(pub fn font_size(&self) -> Rems)]
#[func(pub fn font_weight(&self) -> FontWeight)]
#[func(pub fn line_height(&self) -> f32)]
#[func(pub fn letter_spacing_em(&self) -> f32)]
#[func(pub fn heading_level(&self) -> Option<u8>)]
pub enum TypographyVariant {
    #[assoc(font_size = rems(2.))]
    #[assoc(font_weight = FontWeight::BOLD)]
    #[assoc(line_height = 1.2)]
    #[assoc(letter_spacing_em = -0.02)]
    #[assoc(heading_level = Some(1))]
    PageName,
    #[assoc(font_size = rems(1.5))]
    #[assoc(font_weight = FontWeight::SEMIBOLD)]
    #[assoc(line_height = 1.3)]
    #[assoc(letter_spacing_em = 0.)]
    #[assoc(heading_level = Some(2))]
    ComponentName,
    #[default]
    #[assoc(font_size = rems(1.))]
    #[assoc(font_weight = FontWeight::NORMAL)]
    #[assoc(line_height = 1.5)]
    #[assoc(letter_spacing_em = 0.)]
    #[assoc(heading_level = None)]
    BodyText,
    #[assoc(font_size = rems(1.))]
    #[assoc(font_weight = FontWeight::NORMAL)]
    #[assoc(line_height = 1.5)]
    #[assoc(letter_spacing_em = 0.)]
    #[assoc(heading_level = None)]
    BodySoftText,
}

impl TypographyVariant {
    pub fn is_soft(&self) -> bool {
        matches!(self, TypographyVariant::BodySoftText)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    /// Lines are laid out flush left; gpui has no inter-word justification.
    Justify,
}

/// Themed text in one of the [`TypographyVariant`] presets.
#[derive(IntoElement)]
pub struct Typography {
    variant: TypographyVariant,
    align: TextAlign,
    gutter_bottom: bool,
    no_wrap: bool,
    paragraph: bool,
    color: Option<Hsla>,
    weight: Option<FontWeight>,
    style: StyleRefinement,
    children: SmallVec<[AnyElement; 1]>,
}

impl Typography {
    pub fn new(text: impl Into<SharedString>) -> Self {
        Self::empty().child(text.into())
    }

    /// A typography block whose content is supplied through `child`/`children`.
    pub fn empty() -> Self {
        Self {
            variant: TypographyVariant::default(),
            align: TextAlign::default(),
            gutter_bottom: false,
            no_wrap: false,
            paragraph: false,
            color: None,
            weight: None,
            style: StyleRefinement::default(),
            children: SmallVec::new(),
        }
    }

    pub fn variant(mut self, variant: TypographyVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn gutter_bottom(mut self, gutter_bottom: bool) -> Self {
        self.gutter_bottom = gutter_bottom;
        self
    }

    /// Keeps the text on a single line, truncated with an ellipsis.
    pub fn no_wrap(mut self, no_wrap: bool) -> Self {
        self.no_wrap = no_wrap;
        self
    }

    pub fn paragraph(mut self, paragraph: bool) -> Self {
        self.paragraph = paragraph;
        self
    }

    pub fn color(mut self, color: impl Into<Hsla>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn weight(mut self, weight: FontWeight) -> Self {
        self.weight = Some(weight);
        self
    }

    /// `paragraph` wins over `gutter_bottom`.
    fn bottom_margin(&self, rem_size: gpui::Pixels) -> Option<gpui::Pixels> {
        if self.paragraph {
            Some(PARAGRAPH_MARGIN)
        } else if self.gutter_bottom {
            Some(self.variant.font_size().to_pixels(rem_size) * GUTTER_EM)
        } else {
            None
        }
    }

    fn text_color(&self, cx: &App) -> Hsla {
        if let Some(color) = self.color {
            return color;
        }

        let text = &cx.get_theme().variants.active(cx).colors.text;
        if self.variant.is_soft() {
            let mut color: Hsla = text.secondary.into();
            color.a *= SOFT_TEXT_OPACITY;
            color
        } else {
            text.primary.into()
        }
    }
}

impl ParentElement for Typography {
    fn extend(&mut self, elements: impl IntoIterator<Item = AnyElement>) {
        self.children.extend(elements);
    }
}

impl Styled for Typography {
    fn style(&mut self) -> &mut StyleRefinement {
        &mut self.style
    }
}

impl RenderOnce for Typography {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let font_family = cx.get_theme().layout.text.default_font.family[0].clone();
        let text_color = self.text_color(cx);
        let bottom_margin = self.bottom_margin(window.rem_size());
        let variant = self.variant;

        div()
            .font_family(font_family)
            .text_size(variant.font_size())
            .line_height(relative(variant.line_height()))
            .font_weight(self.weight.unwrap_or(variant.font_weight()))
            .text_color(text_color)
            .map(|this| match self.align {
                TextAlign::Left | TextAlign::Justify => this.text_left(),
                TextAlign::Center => this.text_center(),
                TextAlign::Right => this.text_right(),
            })
            .when(self.no_wrap, |this| {
                this.min_w_0()
                    .overflow_hidden()
                    .whitespace_nowrap()
                    .text_ellipsis()
            })
            .when_some(bottom_margin, |this, margin| this.mb(margin))
            .map(|mut this| {
                this.style().refine(&self.style);
                this
            })
            .children(self.children)
    }
}
