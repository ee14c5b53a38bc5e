//! Default elision and numeric canonicalisation.

use aex_data::model::{AexEase, Vec2};

/// Fractional digits kept on every emitted number.
pub const PRECISION: i32 = 11;

/// Rounds to `PRECISION` fractional digits so host float noise does not
/// churn documents.
pub trait Rounded {
    fn rounded(&self) -> Self;
}

impl Rounded for f64 {
    fn rounded(&self) -> Self {
        let factor = 10f64.powi(PRECISION);
        let scaled = self * factor;
        // Past 2^52 there are no fractional bits left to round.
        if !scaled.is_finite() || scaled.abs() >= 4_503_599_627_370_496.0 {
            return *self;
        }
        let r = scaled.round() / factor;
        if r == 0.0 {
            0.0
        } else {
            r
        }
    }
}

impl Rounded for Vec<f64> {
    fn rounded(&self) -> Self {
        self.iter().map(Rounded::rounded).collect()
    }
}

impl Rounded for Vec2 {
    fn rounded(&self) -> Self {
        [self[0].rounded(), self[1].rounded()]
    }
}

impl Rounded for Vec<Vec2> {
    fn rounded(&self) -> Self {
        self.iter().map(Rounded::rounded).collect()
    }
}

impl Rounded for AexEase {
    fn rounded(&self) -> Self {
        AexEase {
            influence: self.influence.rounded(),
            speed: self.speed.rounded(),
        }
    }
}

/// `Some(value)` when it differs from `default`, `None` otherwise.
pub fn modified<T: PartialEq>(value: T, default: T) -> Option<T> {
    if value == default {
        None
    } else {
        Some(value)
    }
}

/// Rounds, then elides against `default`.
pub fn modified_num<T: Rounded + PartialEq>(value: T, default: T) -> Option<T> {
    modified(value.rounded(), default)
}

/// Guarded read: `read` is only called when `flag` is on, because the host
/// raises an access error otherwise. The result is then elided against
/// `default`.
pub fn read_if<T, E, F>(flag: bool, read: F, default: T) -> Result<Option<T>, E>
where
    T: PartialEq,
    F: FnOnce() -> Result<T, E>,
{
    if !flag {
        return Ok(None);
    }
    Ok(modified(read()?, default))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_host_noise() {
        assert_eq!(0.1f64 + 0.2, 0.30000000000000004);
        assert_eq!((0.1f64 + 0.2).rounded(), 0.3);
        assert_eq!(16.666666666666668f64.rounded(), 16.66666666667);
        assert_eq!((-0.0000000000001f64).rounded(), 0.0);
        assert_eq!(1e300f64.rounded(), 1e300);
    }

    #[test]
    fn deep_equality_on_vectors() {
        assert_eq!(modified_num(vec![0.0, 0.0, 0.0], vec![0.0, 0.0, 0.0]), None);
        assert_eq!(
            modified_num(vec![0.0, 0.0, 0.0001], vec![0.0, 0.0, 0.0]),
            Some(vec![0.0, 0.0, 0.0001])
        );
        assert_eq!(
            modified(vec![0.0, 0.0], vec![0.0, 0.0, 0.0]),
            Some(vec![0.0, 0.0])
        );
    }

    #[test]
    fn read_if_skips_the_accessor_when_guard_is_off() {
        let mut called = false;
        let out: Result<Option<u32>, ()> = read_if(
            false,
            || {
                called = true;
                Err(())
            },
            0,
        );
        assert_eq!(out, Ok(None));
        assert!(!called);

        let out: Result<Option<u32>, ()> = read_if(true, || Ok(5), 0);
        assert_eq!(out, Ok(Some(5)));
        let out: Result<Option<u32>, ()> = read_if(true, || Ok(0), 0);
        assert_eq!(out, Ok(None));
        let out: Result<Option<u32>, &str> = read_if(true, || Err("denied"), 0);
        assert_eq!(out, Err("denied"));
    }
}
