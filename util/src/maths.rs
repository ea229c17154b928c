//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Get the signed angular distance between two angles.
///
/// This function will return the shortest signed distance from a to b
/// accounting for wrapping, so that the result lies in [-pi, pi].
pub fn get_ang_dist_2pi<T>(a: T, b: T) -> T
where
    T: Float
{
    let tau_t: T = T::from(std::f64::consts::TAU).unwrap();

    let c = rem_euclid(a - b, tau_t);
    let d = rem_euclid(b - a, tau_t);

    if c < d {
        -c
    }
    else {
        d
    }
}

/// Calculates the least nonnegative remainder of `lhs (mod rhs)`.
///
/// This function is taken from the std library as num is missing it.
///
/// In particular, the return value `r` satisfies `0.0 <= r < rhs.abs()` in
/// most cases. However, due to a floating point round-off error it can
/// result in `r == rhs.abs()` if `lhs` is much smaller than `rhs.abs()` in
/// magnitude and `lhs < 0.0`.
pub fn rem_euclid<T>(lhs: T, rhs: T) -> T
where
    T: Float
{
    let r = lhs % rhs;
    if r < T::zero() { r + rhs.abs() } else { r }
}

/// Root mean square of a sequence of values, or `None` if it is empty.
pub fn rms<T>(values: &[T]) -> Option<T>
where
    T: Float
{
    if values.is_empty() {
        return None;
    }

    let sum = values.iter().fold(T::zero(), |acc, v| acc + v.powi(2));

    Some((sum / T::from(values.len())?).sqrt())
}

/// Largest absolute value in a sequence of values, or `None` if it is empty.
pub fn max_abs<T>(values: &[T]) -> Option<T>
where
    T: Float
{
    values.iter().map(|v| v.abs()).fold(None, |acc, v| match acc {
        Some(m) if m >= v => Some(m),
        _ => Some(v)
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_get_ang_dist_2pi() {
        const TAU: f64 = std::f64::consts::TAU;

        assert_eq!(get_ang_dist_2pi(1f64, 2f64), 1f64);
        assert_eq!(get_ang_dist_2pi(2f64, 1f64), -1f64);
        assert_eq!(get_ang_dist_2pi(0f64, TAU), 0f64);
        assert_eq!(get_ang_dist_2pi(TAU, 0f64), 0f64);
        assert_eq!(get_ang_dist_2pi(1f64, TAU), -1f64);
        assert_eq!(get_ang_dist_2pi(0f64, TAU - 1f64), -1f64);
        assert_eq!(get_ang_dist_2pi(TAU - 1f64, 1f64), 2f64);
    }

    #[test]
    fn test_rem_euclid() {
        assert_eq!(rem_euclid(5.5f64, 2.0), 1.5);
        assert_eq!(rem_euclid(-0.5f64, 2.0), 1.5);
        assert_eq!(rem_euclid(4.0f64, 2.0), 0.0);
    }

    #[test]
    fn test_rms_and_max_abs() {
        assert_eq!(rms::<f64>(&[]), None);
        assert_eq!(rms(&[3f64, -3.0, 3.0, -3.0]), Some(3.0));
        assert_eq!(max_abs(&[1f64, -4.0, 2.0]), Some(4.0));
        assert_eq!(max_abs::<f64>(&[]), None);
    }
}
