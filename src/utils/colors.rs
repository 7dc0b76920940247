use gpui::Rgba;

/// Creates an RGBA color from a hex value and alpha component.
pub fn rgb_a(hex: u32, a: f32) -> Rgba {
    let [_, r, g, b] = hex.to_be_bytes().map(|b| (b as f32) / 255.0);
    Rgba { r, g, b, a }
}

/// Extension trait for modifying RGBA colors.
pub trait RgbaExt {
    /// Returns a new color with the specified alpha value.
    fn alpha(self, alpha: f32) -> Self;

    /// Returns a new color with its alpha multiplied by `factor`.
    fn fade(self, factor: f32) -> Self;
}

impl RgbaExt for Rgba {
    fn alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }

    fn fade(mut self, factor: f32) -> Self {
        self.a *= factor.clamp(0., 1.);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_a_splits_channels() {
        let color = rgb_a(0x4caf50, 0.5);
        assert_eq!((color.r * 255.).round() as u8, 0x4c);
        assert_eq!((color.g * 255.).round() as u8, 0xaf);
        assert_eq!((color.b * 255.).round() as u8, 0x50);
        assert_eq!(color.a, 0.5);
    }

    #[test]
    fn test_alpha_and_fade() {
        let color = rgb_a(0xffffff, 1.).alpha(0.4);
        assert_eq!(color.a, 0.4);

        let faded = color.fade(0.5);
        assert!((faded.a - 0.2).abs() < f32::EPSILON);

        assert_eq!(color.fade(3.).a, 0.4, "Fade factor should clamp to 1");
    }
}
