//! Colours used by the table view.

use palette::{IntoColor, Oklch, Srgb};

use crate::canvas::Rgb;

/// Converts an OKLCH colour to terminal RGB.
pub fn oklch(l: f32, c: f32, h: f32) -> Rgb {
    let color = Oklch::new(l, c, h);
    let srgb: Srgb = color.into_color();
    let (r, g, b) = srgb.into_format::<u8>().into_components();
    Rgb::new(r, g, b)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: Rgb,
    pub surface: Rgb,
    pub stripe: Rgb,
    pub text: Rgb,
    pub muted: Rgb,
    pub primary: Rgb,
    pub accent: Rgb,
    pub border: Rgb,
    pub cursor: Rgb,
    pub drop_target: Rgb,
    pub selected: Rgb,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: oklch(0.18, 0.01, 260.0),
            surface: oklch(0.24, 0.015, 260.0),
            stripe: oklch(0.21, 0.012, 260.0),
            text: oklch(0.92, 0.01, 260.0),
            muted: oklch(0.62, 0.02, 260.0),
            primary: oklch(0.72, 0.14, 250.0),
            accent: oklch(0.78, 0.15, 75.0),
            border: oklch(0.38, 0.02, 260.0),
            cursor: oklch(0.32, 0.05, 250.0),
            drop_target: oklch(0.40, 0.09, 145.0),
            selected: oklch(0.75, 0.15, 145.0),
        }
    }
}
