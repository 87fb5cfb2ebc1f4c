/// RGBA colour with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl AppColor {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// `#rrggbb`, alpha dropped (SVG takes opacity separately).
    pub fn to_hex(self) -> String {
        let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", c(self.r), c(self.g), c(self.b))
    }

    /// Create a darker version (band outlines).
    pub fn darken(self, amount: f32) -> Self {
        Self {
            r: (self.r - amount).max(0.0),
            g: (self.g - amount).max(0.0),
            b: (self.b - amount).max(0.0),
            a: self.a,
        }
    }
}

/// Outline stroke for the parcel itself.
pub const OUTLINE: AppColor = AppColor::new(0.20, 0.53, 1.0);

/// Golden-angle step keeps neighbouring bands far apart in hue.
const GOLDEN_HUE_STEP: f32 = 0.381_966;

/// Fill for the band at `index` in a preview.
pub fn band_color(index: usize) -> AppColor {
    let h = (0.58 + index as f32 * GOLDEN_HUE_STEP).rem_euclid(1.0);
    // Alternate value a little so adjacent bands with close hues still separate.
    let v = if index % 2 == 0 { 0.90 } else { 0.78 };
    hsv_to_rgb(h, 0.62, v)
}

fn hsv_to_rgb(h: f32, s: f32, v: f32) -> AppColor {
    let h6 = (h * 6.0).rem_euclid(6.0);
    let i = h6.floor() as i32;
    let f = h6 - i as f32;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);
    let (r, g, b) = match i {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    AppColor { r, g, b, a: 1.0 }
}
