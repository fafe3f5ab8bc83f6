//! Weighted random selection
//!
//! A draw is a pure function of the weight list and one uniform sample from
//! the injected RNG, so a seeded `Pcg32` reproduces any sequence of spins.

use rand::Rng;

use super::segment::Segment;
use crate::consts::MIN_SPIN_SEGMENTS;
use crate::error::{Result, WheelError};

fn checked_total(weights: &[f64]) -> Result<f64> {
    if let Some(w) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
        return Err(WheelError::invalid_input(format!(
            "weight {} is not a finite non-negative number",
            w
        )));
    }
    let total: f64 = weights.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return Err(WheelError::invalid_input(format!(
            "total weight must be positive, got {}",
            total
        )));
    }
    Ok(total)
}

/// Draw an index with probability proportional to its weight.
///
/// Zero weights are never chosen, even when the sample lands exactly on a
/// cumulative boundary. If float drift walks past the end, the result is the
/// last index with a positive weight rather than the last index. Fails with
/// `InvalidInput` when the list is empty, a weight is negative or
/// non-finite, or the total is not positive.
pub fn draw<R: Rng + ?Sized>(weights: &[f64], rng: &mut R) -> Result<usize> {
    let total = checked_total(weights)?;
    let mut remaining = rng.random::<f64>() * total;

    for (i, &w) in weights.iter().enumerate() {
        remaining -= w;
        if remaining <= 0.0 && w > 0.0 {
            return Ok(i);
        }
    }

    // Float drift: fall back to the last index that can win
    Ok(weights.iter().rposition(|&w| w > 0.0).unwrap_or(weights.len() - 1))
}

/// Draw a winning segment index from a spinnable wheel
pub fn draw_segment<R: Rng + ?Sized>(segments: &[Segment], rng: &mut R) -> Result<usize> {
    if segments.len() < MIN_SPIN_SEGMENTS {
        return Err(WheelError::invalid_state(format!(
            "a wheel needs at least {} segments to spin, has {}",
            MIN_SPIN_SEGMENTS,
            segments.len()
        )));
    }
    let weights: Vec<f64> = segments.iter().map(|s| s.weight).collect();
    let index = draw(&weights, rng)?;
    log::debug!("Drew segment {} ({}) of {}", index, segments[index].label, segments.len());
    Ok(index)
}

/// Probability that `index` wins, or `None` if the weights cannot be drawn from
pub fn probability(weights: &[f64], index: usize) -> Option<f64> {
    let total = checked_total(weights).ok()?;
    weights.get(index).map(|w| w / total)
}

/// Weight as a percentage of the total, one decimal place
pub fn format_probability(weight: f64, total_weight: f64) -> String {
    format!("{:.1}%", weight / total_weight * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const TRIALS: usize = 100_000;

    fn frequencies(weights: &[f64], seed: u64) -> Vec<f64> {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut counts = vec![0usize; weights.len()];
        for _ in 0..TRIALS {
            counts[draw(weights, &mut rng).unwrap()] += 1;
        }
        counts.iter().map(|&c| c as f64 / TRIALS as f64).collect()
    }

    #[test]
    fn test_uniform_weights_are_fair() {
        for f in frequencies(&[1.0, 1.0, 1.0, 1.0], 11) {
            assert!((f - 0.25).abs() < 0.02, "frequency {f}");
        }
    }

    #[test]
    fn test_heavier_weight_wins_proportionally() {
        let f = frequencies(&[1.0, 3.0], 12);
        let ratio = f[1] / f[0];
        assert!((ratio - 3.0).abs() < 0.15, "ratio {ratio}");
    }

    #[test]
    fn test_zero_weight_never_wins() {
        let f = frequencies(&[5.0, 0.0, 5.0], 13);
        assert_eq!(f[1], 0.0);
        assert!((f[0] - 0.5).abs() < 0.02);
    }

    /// Always samples 0.0, the edge where a zero weight could be hit
    struct ZeroRng;

    impl rand::RngCore for ZeroRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0);
        }
    }

    #[test]
    fn test_zero_weight_skipped_on_boundary() {
        assert_eq!(draw(&[0.0, 1.0, 0.0], &mut ZeroRng), Ok(1));
        assert_eq!(draw(&[0.0, 0.0, 2.0, 1.0], &mut ZeroRng), Ok(2));
    }

    #[test]
    fn test_single_weight_always_index_zero() {
        let mut rng = Pcg32::seed_from_u64(14);
        for _ in 0..1000 {
            assert_eq!(draw(&[0.3], &mut rng), Ok(0));
        }
    }

    #[test]
    fn test_invalid_weights_fail_fast() {
        let mut rng = Pcg32::seed_from_u64(15);
        assert!(matches!(draw(&[], &mut rng), Err(WheelError::InvalidInput(_))));
        assert!(matches!(draw(&[0.0, 0.0], &mut rng), Err(WheelError::InvalidInput(_))));
        assert!(matches!(draw(&[1.0, -1.0], &mut rng), Err(WheelError::InvalidInput(_))));
        assert!(matches!(draw(&[1.0, f64::NAN], &mut rng), Err(WheelError::InvalidInput(_))));
    }

    #[test]
    fn test_draw_segment_needs_two_segments() {
        let mut rng = Pcg32::seed_from_u64(16);
        let one = vec![Segment::new("a", "A", "#fff", 1.0)];
        assert!(matches!(draw_segment(&one, &mut rng), Err(WheelError::InvalidState(_))));

        let two = vec![Segment::new("a", "A", "#fff", 1.0), Segment::new("b", "B", "#000", 1.0)];
        assert!(draw_segment(&two, &mut rng).unwrap() < 2);
    }

    #[test]
    fn test_same_seed_same_draws() {
        let weights = [2.0, 1.0, 4.0, 0.5];
        let mut a = Pcg32::seed_from_u64(99);
        let mut b = Pcg32::seed_from_u64(99);
        for _ in 0..100 {
            assert_eq!(draw(&weights, &mut a), draw(&weights, &mut b));
        }
    }

    #[test]
    fn test_probability_and_format() {
        assert_eq!(probability(&[1.0, 3.0], 1), Some(0.75));
        assert_eq!(probability(&[1.0, 3.0], 2), None);
        assert_eq!(probability(&[0.0], 0), None);
        assert_eq!(format_probability(1.0, 3.0), "33.3%");
        assert_eq!(format_probability(1.0, 4.0), "25.0%");
    }

    proptest! {
        #[test]
        fn prop_draw_index_in_range(
            weights in prop::collection::vec(0.001f64..1000.0, 1..40),
            seed in any::<u64>(),
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            for _ in 0..20 {
                let i = draw(&weights, &mut rng).unwrap();
                prop_assert!(i < weights.len());
            }
        }
    }
}
