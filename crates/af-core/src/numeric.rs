use crate::AfError;

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, AfError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(AfError::NonFinite { what, value: v })
    }
}

/// True when `v` has no fractional part (2.0 is whole, 2.5 is not).
pub fn is_whole(v: Real) -> bool {
    v.is_finite() && v.fract() == 0.0
}

/// Smallest whole multiple of `step` that is >= `x`.
///
/// Ratios within float noise of a whole multiple snap to it, so an input that
/// is already a multiple never rounds up a step.
pub fn ceil_step(x: Real, step: Real) -> Real {
    let ratio = x / step;
    let nearest = ratio.round();
    let whole = if (ratio - nearest).abs() <= 1e-9 * ratio.abs().max(1.0) {
        nearest
    } else {
        ratio.ceil()
    };
    whole * step
}

/// Round `x` to `figs` significant figures.
pub fn round_sig_figs(x: Real, figs: u32) -> Real {
    if x == 0.0 || !x.is_finite() {
        return x;
    }
    let magnitude = x.abs().log10().floor() as i32;
    let factor = 10f64.powi(figs as i32 - 1 - magnitude);
    (x * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn is_whole_basic() {
        assert!(is_whole(1.0));
        assert!(is_whole(47.0));
        assert!(is_whole(-3.0));
        assert!(!is_whole(0.1));
        assert!(!is_whole(2.5));
        assert!(!is_whole(Real::NAN));
    }

    #[test]
    fn ceil_step_rounds_up_to_centimeters() {
        assert!((ceil_step(0.333_56, 0.01) - 0.34).abs() < 1e-12);
        assert!((ceil_step(0.301, 0.01) - 0.31).abs() < 1e-12);
    }

    #[test]
    fn ceil_step_keeps_exact_multiples() {
        assert!((ceil_step(0.30, 0.01) - 0.30).abs() < 1e-12);
        assert!((ceil_step(0.57, 0.01) - 0.57).abs() < 1e-12);
    }

    #[test]
    fn round_sig_figs_basic() {
        assert!((round_sig_figs(8.596_944, 5) - 8.5969).abs() < 1e-12);
        assert!((round_sig_figs(0.001_234_5, 2) - 0.0012).abs() < 1e-15);
        assert_eq!(round_sig_figs(0.0, 5), 0.0);
    }
}
