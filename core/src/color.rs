//! Color-space conversion.
//!
//! sRGB gamma conversions using the piecewise standard curve, not the
//! 2.2 power approximation. Inputs are per-channel values in [0, 1].

/// Convert an sRGB-encoded channel value to linear.
pub fn gamma_to_linear(x: f32) -> f32 {
    if x <= 0.04045 {
        x / 12.92
    } else {
        ((x + 0.055) / 1.055).powf(2.4)
    }
}

/// Convert a linear channel value to sRGB encoding.
pub fn linear_to_gamma(x: f32) -> f32 {
    if x <= 0.0031308 {
        x * 12.92
    } else {
        1.055 * x.powf(1.0 / 2.4) - 0.055
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_fixed() {
        assert_eq!(gamma_to_linear(0.0), 0.0);
        assert!((gamma_to_linear(1.0) - 1.0).abs() < 1e-6);
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert!((linear_to_gamma(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn mid_gray() {
        // sRGB 0.5 is roughly 21.4% linear luminance.
        assert!((gamma_to_linear(0.5) - 0.2140).abs() < 1e-3);
    }

    #[test]
    fn linear_segment() {
        assert!((gamma_to_linear(0.003) - 0.003 / 12.92).abs() < 1e-9);
        assert!((linear_to_gamma(0.002) - 0.002 * 12.92).abs() < 1e-9);
    }

    #[test]
    fn roundtrip() {
        for i in 0..=20 {
            let x = i as f32 / 20.0;
            let rt = linear_to_gamma(gamma_to_linear(x));
            assert!((rt - x).abs() < 1e-5, "roundtrip drift at {x}: {rt}");
        }
    }
}
