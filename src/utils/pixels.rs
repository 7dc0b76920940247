use gpui::{AbsoluteLength, DefiniteLength, Pixels, Window, px};

/// Converts an absolute length into pixels using the window's rem size.
pub fn abs_length_to_px(length: AbsoluteLength, window: &Window) -> Pixels {
    match length {
        AbsoluteLength::Pixels(pixels) => pixels,
        AbsoluteLength::Rems(rems) => rems.to_pixels(window.rem_size()),
    }
}

/// Resolves a line height against the text size it applies to.
pub fn line_height_px(
    window: &Window,
    text_size: AbsoluteLength,
    line_height: DefiniteLength,
) -> Pixels {
    let text_size = abs_length_to_px(text_size, window);

    match line_height {
        DefiniteLength::Absolute(line_height) => line_height.to_pixels(window.rem_size()),
        DefiniteLength::Fraction(frac) => text_size * frac,
    }
}

pub trait PixelsExt {
    /// Calculates the top and bottom padding needed in order for
    /// the height of an element to reach this px value.
    fn padding_needed_for_height(
        &self,
        window: &Window,
        text_size: AbsoluteLength,
        line_height: DefiniteLength,
    ) -> Pixels;

    fn as_f32(&self) -> f32;
}

impl PixelsExt for Pixels {
    fn padding_needed_for_height(
        &self,
        window: &Window,
        text_size: AbsoluteLength,
        line_height: DefiniteLength,
    ) -> Pixels {
        let line_height = line_height_px(window, text_size, line_height).as_f32();

        px(((self.as_f32() - line_height) / 2.).max(0.))
    }

    fn as_f32(&self) -> f32 {
        self.to_f64() as f32
    }
}
