//! Price conversion between major and minor currency units
//!
//! `properties.cost_per_night` is stored in minor units (cents). Callers work
//! in major units (dollars).

/// Minor units per major unit.
pub const MINOR_UNITS_PER_MAJOR: i32 = 100;

/// Convert a major-unit price to minor units, rounding to the nearest unit.
///
/// Returns `None` for NaN, infinities, and amounts whose minor-unit value
/// does not fit the `INTEGER` column.
///
/// # Example
/// ```
/// use lightbnb_db::models::to_minor_units;
///
/// assert_eq!(to_minor_units(150.0), Some(15_000));
/// assert_eq!(to_minor_units(85.5), Some(8_550));
/// assert_eq!(to_minor_units(f64::NAN), None);
/// ```
pub fn to_minor_units(major: f64) -> Option<i32> {
    let minor = (major * f64::from(MINOR_UNITS_PER_MAJOR)).round();
    let in_range = minor >= f64::from(i32::MIN) && minor <= f64::from(i32::MAX);
    // NaN fails both comparisons
    in_range.then_some(minor as i32)
}

/// Convert a stored minor-unit price back to major units.
pub fn to_major_units(minor: i32) -> f64 {
    f64::from(minor) / f64::from(MINOR_UNITS_PER_MAJOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_amounts() {
        assert_eq!(to_minor_units(50.0), Some(5_000));
        assert_eq!(to_minor_units(0.0), Some(0));
    }

    #[test]
    fn rounds_fractional_cents() {
        // 19.99 * 100 is 1998.9999... in binary floating point
        assert_eq!(to_minor_units(19.99), Some(1_999));
        assert_eq!(to_minor_units(0.004), Some(0));
        assert_eq!(to_minor_units(0.005), Some(1));
    }

    #[test]
    fn non_finite_amounts_have_no_minor_value() {
        assert_eq!(to_minor_units(f64::NAN), None);
        assert_eq!(to_minor_units(f64::INFINITY), None);
        assert_eq!(to_minor_units(f64::NEG_INFINITY), None);
    }

    #[test]
    fn amounts_outside_integer_column_are_rejected() {
        assert_eq!(to_minor_units(3e7), None);
        assert_eq!(to_minor_units(-1e12), None);
        assert_eq!(to_minor_units(21_474_836.47), Some(i32::MAX));
        assert_eq!(to_minor_units(-21_474_836.48), Some(i32::MIN));
    }

    #[test]
    fn back_to_major() {
        assert_eq!(to_major_units(12_345), 123.45);
        assert_eq!(to_minor_units(85.5).map(to_major_units), Some(85.5));
    }
}
