/// Linear progress of an animation, clamped to `[0, 1]`.
pub fn progress(elapsed_ms: f64, duration_ms: f64) -> f64 {
    if duration_ms <= 0.0 {
        return 1.0;
    }
    (elapsed_ms / duration_ms).clamp(0.0, 1.0)
}

/// `1 - (1 - t)^4`
pub fn ease_out_quart(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(4)
}

/// Value shown for `target` at linear progress `t`. Exactly `target` at `t == 1`.
pub fn eased_value(target: u64, t: f64) -> u64 {
    if t >= 1.0 {
        return target;
    }
    let value = (target as f64 * ease_out_quart(t)).floor() as u64;
    value.min(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_clamped() {
        assert_eq!(progress(-5.0, 2000.0), 0.0);
        assert_eq!(progress(500.0, 2000.0), 0.25);
        assert_eq!(progress(4000.0, 2000.0), 1.0);
        assert_eq!(progress(10.0, 0.0), 1.0);
    }

    #[test]
    fn quartic_endpoints_and_midpoint() {
        assert_eq!(ease_out_quart(0.0), 0.0);
        assert_eq!(ease_out_quart(1.0), 1.0);
        assert!((ease_out_quart(0.5) - 0.9375).abs() < 1e-12);
    }

    #[test]
    fn eased_value_lands_exactly_on_target() {
        for target in [1u64, 7, 99, 1200, 15_000, 987_654_321] {
            assert_eq!(eased_value(target, 1.0), target);
        }
    }

    #[test]
    fn eased_value_never_decreases() {
        let target = 2500;
        let mut last = 0;
        for step in 0..=120 {
            let v = eased_value(target, step as f64 / 120.0);
            assert!(v >= last);
            assert!(v <= target);
            last = v;
        }
        assert_eq!(last, target);
    }
}
