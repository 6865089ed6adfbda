//! Color difference metrics.
//!
//! Euclidean distance works in any space; CIEDE2000 expects LAB triples and
//! accounts for the lightness, chroma, and hue non-uniformities of CIELAB.

use std::f64::consts::PI;

use crate::space::Color;

const POW7_25: f64 = 6103515625.0; // 25^7

/// Which distance function to measure colors with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceMetric {
    /// Plain Euclidean distance over the color components.
    Euclidean,
    /// CIEDE2000 over LAB triples.
    DeltaE2000,
}

impl Default for DistanceMetric {
    fn default() -> Self {
        Self::DeltaE2000
    }
}

impl DistanceMetric {
    pub fn measure(self, a: Color, b: Color) -> f64 {
        match self {
            Self::Euclidean => euclidean_distance(a, b),
            Self::DeltaE2000 => delta_e_2000(a, b),
        }
    }
}

pub fn euclidean_distance(a: Color, b: Color) -> f64 {
    a.iter()
        .zip(&b)
        .map(|(x, y)| (y - x) * (y - x))
        .sum::<f64>()
        .sqrt()
}

/// Hue angle of an a'/b pair, normalized into [0, 2π). Zero for the neutral axis.
fn hue_angle(ap: f64, b: f64) -> f64 {
    if ap == 0.0 && b == 0.0 {
        return 0.0;
    }

    let h = b.atan2(ap);
    if h < 0.0 { h + 2.0 * PI } else { h }
}

/// CIEDE2000 color difference between two LAB triples.
///
/// Follows the standard formulation: chroma-corrected a' via the G factor,
/// hue differences reduced across the ±π wraparound, and the SL/SC/SH
/// weights plus the RT rotation term for the blue region.
pub fn delta_e_2000(lab1: Color, lab2: Color) -> f64 {
    let [l1, a1, b1] = lab1;
    let [l2, a2, b2] = lab2;

    let c1 = (a1 * a1 + b1 * b1).sqrt();
    let c2 = (a2 * a2 + b2 * b2).sqrt();
    let c_mean = (c1 + c2) / 2.0;

    let c_mean7 = c_mean.powi(7);
    let g = 0.5 * (1.0 - (c_mean7 / (c_mean7 + POW7_25)).sqrt());

    let a1p = (1.0 + g) * a1;
    let a2p = (1.0 + g) * a2;

    let c1p = (a1p * a1p + b1 * b1).sqrt();
    let c2p = (a2p * a2p + b2 * b2).sqrt();

    let h1p = hue_angle(a1p, b1);
    let h2p = hue_angle(a2p, b2);

    let delta_l = l2 - l1;
    let delta_c = c2p - c1p;

    let delta_hp = if c1p * c2p == 0.0 {
        0.0
    } else {
        let mut d = h2p - h1p;
        if d > PI {
            d -= 2.0 * PI;
        } else if d < -PI {
            d += 2.0 * PI;
        }
        d
    };
    let delta_h = 2.0 * (c1p * c2p).sqrt() * (delta_hp / 2.0).sin();

    let l_mean = (l1 + l2) / 2.0;
    let cp_mean = (c1p + c2p) / 2.0;

    let hp_mean = if c1p * c2p == 0.0 {
        h1p + h2p
    } else if (h1p - h2p).abs() <= PI {
        (h1p + h2p) / 2.0
    } else if h1p + h2p < 2.0 * PI {
        (h1p + h2p + 2.0 * PI) / 2.0
    } else {
        (h1p + h2p - 2.0 * PI) / 2.0
    };

    let t = 1.0 - 0.17 * (hp_mean - 30.0_f64.to_radians()).cos()
        + 0.24 * (2.0 * hp_mean).cos()
        + 0.32 * (3.0 * hp_mean + 6.0_f64.to_radians()).cos()
        - 0.20 * (4.0 * hp_mean - 63.0_f64.to_radians()).cos();

    let hue_offset = (hp_mean - 275.0_f64.to_radians()) / 25.0_f64.to_radians();
    let delta_theta = 30.0_f64.to_radians() * (-(hue_offset * hue_offset)).exp();

    let cp_mean7 = cp_mean.powi(7);
    let rc = 2.0 * (cp_mean7 / (cp_mean7 + POW7_25)).sqrt();
    let rt = -(2.0 * delta_theta).sin() * rc;

    let l_dev = (l_mean - 50.0) * (l_mean - 50.0);
    let sl = 1.0 + 0.015 * l_dev / (20.0 + l_dev).sqrt();
    let sc = 1.0 + 0.045 * cp_mean;
    let sh = 1.0 + 0.015 * cp_mean * t;

    let dl = delta_l / sl;
    let dc = delta_c / sc;
    let dh = delta_h / sh;

    (dl * dl + dc * dc + dh * dh + rt * dc * dh).sqrt()
}
