pub trait FloatExt {
    /// `|self - other| <= tolerance`. NaN on either side is never within.
    fn within(self, other: Self, tolerance: Self) -> bool;

    /// Rounds half away from zero to the given number of decimal places.
    fn round_to_decimals(self, decimals: u32) -> Self;
}

impl FloatExt for f64 {
    fn within(self, other: Self, tolerance: Self) -> bool {
        (self - other).abs() <= tolerance
    }

    fn round_to_decimals(self, decimals: u32) -> Self {
        let scale = 10f64.powi(decimals as i32);
        (self * scale).round() / scale
    }
}
