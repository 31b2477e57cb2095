use crate::HnError;

/// Floating point type used throughout the engine.
pub type Real = f64;

/// One tolerance pair for everything.
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-6,
            rel: 1e-6,
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

/// Per-entry convergence predicate: is `delta` small against `value`?
pub fn within_tolerance(delta: Real, value: Real, tol: Tolerances) -> bool {
    delta.abs() <= tol.abs + tol.rel * value.abs()
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, HnError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(HnError::NonFinite { what, value: v })
    }
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
    fn within_tolerance_scales_with_value() {
        let tol = Tolerances {
            abs: 1e-6,
            rel: 1e-6,
        };
        assert!(within_tolerance(5e-7, 0.0, tol));
        assert!(within_tolerance(0.05, 1e5, tol));
        assert!(!within_tolerance(1.0, 1e5, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    proptest::proptest! {
        #[test]
        fn prop_zero_step_always_within_tolerance(v in -1.0e9f64..1.0e9) {
            proptest::prop_assert!(within_tolerance(0.0, v, Tolerances::default()));
        }
    }
}
