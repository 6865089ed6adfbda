//! Color space conversions among RGB, XYZ, LAB, and HSB.
//!
//! All functions are pure and deterministic. RGB channels live in [0, 255],
//! HSB is hue [0, 360) / saturation [0, 100] / brightness [0, 100], LAB is
//! L [0, 100] with a/b roughly [-128, 127]. RGB outputs are rounded to whole
//! channel values but never clamped; out-of-gamut results are the caller's
//! problem.

/// A 3-component color vector. Which space it lives in depends on context.
pub type Color = [f64; 3];

/// CIE 10° observer, D65 daylight reference white (XYZ, Y = 100).
const D65_WHITE: Color = [94.811, 100.0, 107.304];

// CIE LAB piecewise function parameters.
const LAB_EPSILON: f64 = 0.008856;
const LAB_SLOPE: f64 = 7.787;
const LAB_OFFSET: f64 = 16.0 / 116.0;

// p5-style HSB component scales.
const HUE_SCALE: f64 = 360.0;
const SAT_SCALE: f64 = 100.0;
const BRI_SCALE: f64 = 100.0;

/// sRGB gamma expansion for one channel, scaled to [0, 100].
fn expand_gamma(channel: f64) -> f64 {
    let v = channel / 255.0;
    if v > 0.04045 {
        ((v + 0.055) / 1.055).powf(2.4) * 100.0
    } else {
        v / 12.92 * 100.0
    }
}

/// Inverse sRGB gamma for one linear channel, rounded to a whole [0, 255] value.
fn compress_gamma(v: f64) -> f64 {
    let c = if v > 0.0031308 {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    } else {
        v * 12.92
    };

    (c * 255.0).round()
}

pub fn rgb_to_xyz(rgb: Color) -> Color {
    let [r, g, b] = rgb.map(expand_gamma);

    [
        r * 0.4124 + g * 0.3576 + b * 0.1805,
        r * 0.2126 + g * 0.7152 + b * 0.0722,
        r * 0.0193 + g * 0.1192 + b * 0.9505,
    ]
}

pub fn xyz_to_lab(xyz: Color) -> Color {
    let f = |v: f64| {
        if v > LAB_EPSILON {
            v.cbrt()
        } else {
            LAB_SLOPE * v + LAB_OFFSET
        }
    };

    let fx = f(xyz[0] / D65_WHITE[0]);
    let fy = f(xyz[1] / D65_WHITE[1]);
    let fz = f(xyz[2] / D65_WHITE[2]);

    [116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz)]
}

pub fn lab_to_xyz(lab: Color) -> Color {
    let fy = (lab[0] + 16.0) / 116.0;
    let fx = lab[1] / 500.0 + fy;
    let fz = fy - lab[2] / 200.0;

    let f_inv = |v: f64| {
        let cubed = v * v * v;
        if cubed > LAB_EPSILON {
            cubed
        } else {
            (v - LAB_OFFSET) / LAB_SLOPE
        }
    };

    [
        f_inv(fx) * D65_WHITE[0],
        f_inv(fy) * D65_WHITE[1],
        f_inv(fz) * D65_WHITE[2],
    ]
}

pub fn xyz_to_rgb(xyz: Color) -> Color {
    let [x, y, z] = xyz.map(|v| v / 100.0);

    let r = x * 3.2406 + y * -1.5372 + z * -0.4986;
    let g = x * -0.9689 + y * 1.8758 + z * 0.0415;
    let b = x * 0.0557 + y * -0.2040 + z * 1.0570;

    [r, g, b].map(compress_gamma)
}

pub fn rgb_to_lab(rgb: Color) -> Color {
    xyz_to_lab(rgb_to_xyz(rgb))
}

pub fn lab_to_rgb(lab: Color) -> Color {
    xyz_to_rgb(lab_to_xyz(lab))
}

// HSB and HSV name the same color space; p5 calls it HSB.

pub fn rgb_to_hsb(rgb: Color) -> Color {
    let [r, g, b] = rgb.map(|v| v / 255.0);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let diff = max - min;

    // Achromatic input has no hue or saturation
    if diff == 0.0 {
        return [0.0, 0.0, max * BRI_SCALE];
    }

    let s = diff / max;

    // Hue comes from whichever channel is maximal
    let sector = if max == r {
        (g - b) / diff + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / diff + 2.0
    } else {
        (r - g) / diff + 4.0
    };

    [sector / 6.0 * HUE_SCALE, s * SAT_SCALE, max * BRI_SCALE]
}

pub fn hsb_to_rgb(hsb: Color) -> Color {
    let h = hsb[0] / HUE_SCALE;
    let s = hsb[1] / SAT_SCALE;
    let v = hsb[2] / BRI_SCALE;

    let i = (h * 6.0).floor();
    let f = h * 6.0 - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    let (r, g, b) = match (i as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    [r, g, b].map(|c| (c * 255.0).round())
}

pub fn hsb_to_lab(hsb: Color) -> Color {
    rgb_to_lab(hsb_to_rgb(hsb))
}

pub fn lab_to_hsb(lab: Color) -> Color {
    rgb_to_hsb(lab_to_rgb(lab))
}
