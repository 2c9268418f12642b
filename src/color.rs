use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Bar colours
// ---------------------------------------------------------------------------

/// Hue of the first (smallest clusters) bar, in degrees.
const HUE_START: f32 = 210.0;
/// Hue of the last (largest clusters) bar.
const HUE_END: f32 = 350.0;

/// `n` colours sweeping from blue to red, one per histogram bin.
pub fn bin_gradient(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    let step = if n > 1 {
        (HUE_END - HUE_START) / (n - 1) as f32
    } else {
        0.0
    };
    (0..n)
        .map(|i| hsl_to_color32(HUE_START + step * i as f32, 0.65, 0.55))
        .collect()
}

fn hsl_to_color32(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}
