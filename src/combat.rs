//! Binomial combat model.
//!
//! Each attacking unit independently destroys one defender with probability
//! [`UNIT_WIN_PROBABILITY`]. The number of kills from `n` attackers is then
//! binomially distributed, and a capture needs at least as many kills as
//! there are defenders.

/// Chance that a single attacking unit destroys a defender.
pub const UNIT_WIN_PROBABILITY: f64 = 0.6;

/// Probability that `attackers` fail to wipe out `defenders`.
///
/// Sums the binomial mass of `k` kills for `k` in `defenders..attackers`,
/// using [`UNIT_WIN_PROBABILITY`]. Zero when `defenders >= attackers` (empty
/// sum). With no defenders the sum runs from 0, giving `1 - p^attackers`.
#[must_use]
pub fn capture_chance(attackers: u32, defenders: u32) -> f64 {
    capture_chance_with(attackers, defenders, UNIT_WIN_PROBABILITY)
}

/// Probability that `attackers` destroy all `defenders` outright.
#[must_use]
pub fn elimination_chance(attackers: u32, defenders: u32) -> f64 {
    1.0 - capture_chance(attackers, defenders)
}

/// [`capture_chance`] with an explicit per-unit win probability `p`.
///
/// Terms are evaluated in log space with an incremental log-binomial, so
/// troop counts in the thousands neither overflow nor underflow to NaN.
#[must_use]
pub fn capture_chance_with(attackers: u32, defenders: u32, p: f64) -> f64 {
    if defenders >= attackers {
        return 0.0;
    }
    if p <= 0.0 {
        // Every attacker misses: zero kills, counted only if the sum starts at 0.
        return if defenders == 0 { 1.0 } else { 0.0 };
    }
    if p >= 1.0 {
        // Every attacker kills: all mass sits on k = n, outside the sum.
        return 0.0;
    }

    let n = attackers;
    let ln_p = p.ln();
    let ln_q = (1.0 - p).ln();
    let mut ln_choose = ln_binomial(n, defenders);
    let mut sum = 0.0;

    for k in defenders..n {
        sum += (ln_choose + f64::from(k) * ln_p + f64::from(n - k) * ln_q).exp();
        ln_choose += (f64::from(n - k) / f64::from(k + 1)).ln();
    }

    sum.clamp(0.0, 1.0)
}

/// Natural log of C(n, k).
fn ln_binomial(n: u32, k: u32) -> f64 {
    let k = k.min(n - k);
    (0..k)
        .map(|i| (f64::from(n - i) / f64::from(i + 1)).ln())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn test_empty_sums() {
        assert!(close(capture_chance(0, 0), 0.0));
        assert!(close(capture_chance(3, 3), 0.0));
        assert!(close(capture_chance(3, 10), 0.0));
    }

    #[test]
    fn test_no_defenders() {
        // Everything except all five attackers succeeding.
        assert!(close(capture_chance(5, 0), 1.0 - 0.6f64.powi(5)));
    }

    #[test]
    fn test_small_case_by_hand() {
        // n = 3, k in {1, 2}: 3*0.6*0.16 + 3*0.36*0.4
        let expected = 3.0 * 0.6 * 0.16 + 3.0 * 0.36 * 0.4;
        assert!(close(capture_chance(3, 1), expected));
        assert!(close(elimination_chance(3, 1), 1.0 - expected));
    }

    #[test]
    fn test_matches_exact_binomial() {
        fn exact(n: u32, d: u32) -> f64 {
            let mut total = 0.0;
            for k in d..n {
                let mut choose = 1.0;
                for i in 0..k {
                    choose = choose * f64::from(n - i) / f64::from(i + 1);
                }
                total += choose * 0.6f64.powi(k as i32) * 0.4f64.powi((n - k) as i32);
            }
            total
        }
        for n in 0..30 {
            for d in 0..=n {
                assert!((capture_chance(n, d) - exact(n, d)).abs() < 1e-9, "n={n} d={d}");
            }
        }
    }

    #[test]
    fn test_large_counts_stay_finite() {
        let value = capture_chance(5000, 2000);
        assert!(value.is_finite());
        assert!((0.0..=1.0).contains(&value));
    }

    #[test]
    fn test_degenerate_probabilities() {
        assert!(close(capture_chance_with(4, 0, 0.0), 1.0));
        assert!(close(capture_chance_with(4, 1, 0.0), 0.0));
        assert!(close(capture_chance_with(4, 0, 1.0), 0.0));
    }
}
