//! Small numeric helpers shared by scoring and training code.

/// Scores how close `actual` is to `target` within the range `[lowest, highest]`.
///
/// The score is measured from whichever boundary lies nearer to `target`:
/// values on the far side of the range earn nothing and values at the near
/// boundary earn `maximum_reward`. The result is never negative.
///
/// A degenerate range (`lowest == highest`) awards `maximum_reward` only on an
/// exact match and `0.0` otherwise.
///
/// # Examples
///
/// ```
/// use flapnet_network::math::similarity_score;
///
/// assert_eq!(similarity_score(1.0, 1.0, 10.0, 0.0, 1.0), 10.0);
/// assert_eq!(similarity_score(1.0, 0.0, 10.0, 0.0, 1.0), 0.0);
/// assert_eq!(similarity_score(2.0, 2.0, 5.0, 2.0, 2.0), 5.0);
/// ```
#[must_use]
#[allow(clippy::float_cmp)]
pub fn similarity_score(
    target: f64,
    actual: f64,
    maximum_reward: f64,
    lowest: f64,
    highest: f64,
) -> f64 {
    if lowest == highest {
        return if actual == target { maximum_reward } else { 0.0 };
    }

    let range = highest - lowest;
    let normalized_diff = if (target - lowest).abs() < (target - highest).abs() {
        (actual - lowest) / range
    } else {
        (highest - actual) / range
    };
    f64::max(0.0, maximum_reward - normalized_diff * maximum_reward)
}

/// Rounds `value` to the given number of decimal places.
///
/// # Examples
///
/// ```
/// use flapnet_network::math::round_to_decimal;
///
/// assert_eq!(round_to_decimal(1.23456, 4), 1.2346);
/// assert_eq!(round_to_decimal(-0.5, 0), -1.0);
/// ```
#[must_use]
pub fn round_to_decimal(value: f64, places: i32) -> f64 {
    let shift = 10f64.powi(places);
    (value * shift).round() / shift
}

/// Converts a flag into `1.0` or `0.0`.
#[must_use]
pub fn bool_to_f64(b: bool) -> f64 {
    if b { 1.0 } else { 0.0 }
}

/// Maps a value in `[-1, 1]` onto a byte in `[0, 255]`.
///
/// Values outside the range saturate.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn quantize(value: f64) -> u8 {
    ((value + 1.0) * 127.5).clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_similarity_score_near_lower_bound() {
        // target sits at the low end, so reward shrinks as actual grows
        assert_eq!(similarity_score(0.0, 0.0, 4.0, 0.0, 10.0), 4.0);
        assert_eq!(similarity_score(0.0, 5.0, 4.0, 0.0, 10.0), 2.0);
        assert_eq!(similarity_score(0.0, 10.0, 4.0, 0.0, 10.0), 0.0);
    }

    #[test]
    fn test_similarity_score_near_upper_bound() {
        assert_eq!(similarity_score(9.0, 10.0, 4.0, 0.0, 10.0), 4.0);
        assert_eq!(similarity_score(9.0, 5.0, 4.0, 0.0, 10.0), 2.0);
    }

    #[test]
    fn test_similarity_score_never_negative() {
        assert_eq!(similarity_score(0.0, 20.0, 4.0, 0.0, 10.0), 0.0);
    }

    #[test]
    fn test_similarity_score_degenerate_range() {
        assert_eq!(similarity_score(3.0, 3.0, 7.0, 1.0, 1.0), 7.0);
        assert_eq!(similarity_score(3.0, 2.9, 7.0, 1.0, 1.0), 0.0);
    }

    #[test]
    fn test_round_to_decimal() {
        assert_eq!(round_to_decimal(12.345_649, 4), 12.3456);
        assert_eq!(round_to_decimal(12.345_65, 2), 12.35);
        assert_eq!(round_to_decimal(7.0, 4), 7.0);
    }

    #[test]
    fn test_bool_to_f64() {
        assert_eq!(bool_to_f64(true), 1.0);
        assert_eq!(bool_to_f64(false), 0.0);
    }

    #[test]
    fn test_quantize() {
        assert_eq!(quantize(-1.0), 0);
        assert_eq!(quantize(0.0), 127);
        assert_eq!(quantize(1.0), 255);
        assert_eq!(quantize(3.0), 255);
        assert_eq!(quantize(-3.0), 0);
    }
}
