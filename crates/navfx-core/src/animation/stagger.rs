#![forbid(unsafe_code)]

//! Stagger utilities: coordinated delay offsets for multi-element tweens.
//!
//! When a tween target resolves to several elements, each successive element
//! starts a little later than the previous one. [`Stagger`] describes the
//! increment; [`stagger_offsets`] turns it into per-element offsets that the
//! [`Tweener`](crate::tweener::Tweener) adds to the tween's base delay.
//!
//! # Invariants
//!
//! 1. `stagger_offsets(0, ..)` returns an empty vec.
//! 2. First offset is always `Duration::ZERO`.
//! 3. Offsets are monotonically non-decreasing for every mode.
//! 4. For `Linear`, offset[i] = i * each.
//! 5. For `Eased`, offsets follow the easing curve scaled to
//!    `(count - 1) * each`.
//!
//! # Failure Modes
//!
//! - Zero count: returns empty vec.
//! - Count of 1: returns `[Duration::ZERO]`.
//! - Zero increment: all offsets are `Duration::ZERO`.

use std::time::Duration;

use super::EasingFn;

/// How to distribute delay offsets across elements.
#[derive(Debug, Clone, Copy)]
pub enum StaggerMode {
    /// Equal spacing: offset[i] = i * each.
    Linear,
    /// Offsets follow an easing curve over the total span.
    Eased(EasingFn),
}

/// Inter-element delay increment for a multi-element tween.
#[derive(Debug, Clone, Copy)]
pub struct Stagger {
    /// Delay added per successive element.
    pub each: Duration,
    /// Distribution of the offsets.
    pub mode: StaggerMode,
}

impl Stagger {
    /// Equal spacing of `each` between successive elements.
    #[must_use]
    pub const fn linear(each: Duration) -> Self {
        Self {
            each,
            mode: StaggerMode::Linear,
        }
    }

    /// Offsets for `count` elements.
    #[must_use]
    pub fn offsets(&self, count: usize) -> Vec<Duration> {
        stagger_offsets(count, self.each, self.mode)
    }
}

/// Compute stagger delay offsets for `count` items.
///
/// The first item always starts at `Duration::ZERO`, and the last item
/// starts at `(count - 1) * each`.
#[must_use]
pub fn stagger_offsets(count: usize, each: Duration, mode: StaggerMode) -> Vec<Duration> {
    if count == 0 {
        return Vec::new();
    }
    if count == 1 {
        return vec![Duration::ZERO];
    }

    let easing = match mode {
        // Exact integer arithmetic avoids float drift.
        StaggerMode::Linear => {
            return (0..count)
                .map(|i| each.saturating_mul(i as u32))
                .collect();
        }
        StaggerMode::Eased(f) => f,
    };

    let total_nanos = each.as_nanos() as f64 * (count - 1) as f64;
    (0..count)
        .map(|i| {
            let t = i as f32 / (count - 1) as f32;
            let nanos = (total_nanos * easing(t) as f64) as u64;
            Duration::from_nanos(nanos)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{ease_in, ease_out};

    const MS_50: Duration = Duration::from_millis(50);
    const MS_100: Duration = Duration::from_millis(100);

    #[test]
    fn zero_count_returns_empty() {
        assert!(stagger_offsets(0, MS_100, StaggerMode::Linear).is_empty());
    }

    #[test]
    fn single_item_returns_zero() {
        assert_eq!(
            stagger_offsets(1, MS_100, StaggerMode::Linear),
            vec![Duration::ZERO]
        );
    }

    #[test]
    fn linear_equal_spacing() {
        let offsets = Stagger::linear(Duration::from_millis(75)).offsets(4);
        assert_eq!(
            offsets,
            vec![
                Duration::ZERO,
                Duration::from_millis(75),
                Duration::from_millis(150),
                Duration::from_millis(225),
            ]
        );
    }

    #[test]
    fn eased_gaps_increase_for_ease_in() {
        let offsets = stagger_offsets(5, MS_100, StaggerMode::Eased(ease_in));
        let gaps: Vec<Duration> = offsets.windows(2).map(|w| w[1] - w[0]).collect();
        for i in 1..gaps.len() {
            assert!(gaps[i] >= gaps[i - 1], "gaps should grow: {gaps:?}");
        }
    }

    #[test]
    fn eased_spans_full_range() {
        let offsets = stagger_offsets(3, MS_50, StaggerMode::Eased(ease_out));
        assert_eq!(offsets[0], Duration::ZERO);
        assert_eq!(offsets[2], MS_100);
    }

    #[test]
    fn zero_increment_all_zero() {
        let offsets = Stagger::linear(Duration::ZERO).offsets(5);
        assert!(offsets.iter().all(|d| *d == Duration::ZERO));
    }
}
