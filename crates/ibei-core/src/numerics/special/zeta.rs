//! Riemann zeta function at integer arguments.

use crate::common::constants::PI2;

const EULER_MACLAURIN_CUTOFF: i32 = 10;
// B_2, B_4, ..., B_14
const EVEN_BERNOULLI: [f64; 7] = [
    1.0 / 6.0,
    -1.0 / 30.0,
    1.0 / 42.0,
    -1.0 / 30.0,
    5.0 / 66.0,
    -691.0 / 2730.0,
    7.0 / 6.0,
];

/// `zeta(n)` for integer `n`.
///
/// * `n >= 2`: direct sum to `N = 10` plus the Euler-Maclaurin tail.
/// * `n == 1`: the pole, reported as `+inf`.
/// * `n == 0`: `-1/2`.
/// * `n < 0`: trivial zeros at negative even integers, otherwise the
///   functional equation `zeta(1 - 2j) = (-1)^j 2 (2j-1)! zeta(2j) / (2 pi)^(2j)`.
pub fn zeta(n: i32) -> f64 {
    match n {
        1 => f64::INFINITY,
        0 => -0.5,
        n if n >= 2 => zeta_above_one(n),
        n => zeta_negative(n.unsigned_abs()),
    }
}

fn zeta_above_one(n: i32) -> f64 {
    let s = f64::from(n);
    let cutoff = f64::from(EULER_MACLAURIN_CUTOFF);

    let mut sum: f64 = (1..EULER_MACLAURIN_CUTOFF)
        .map(|k| f64::from(k).powi(-n))
        .sum();
    sum += cutoff.powf(1.0 - s) / (s - 1.0) + 0.5 * cutoff.powi(-n);

    let mut rising = s;
    let mut even_factorial = 2.0;
    let mut cutoff_power = cutoff.powf(-s - 1.0);
    for (index, bernoulli) in EVEN_BERNOULLI.iter().enumerate() {
        sum += bernoulli / even_factorial * rising * cutoff_power;

        let k = (index + 1) as f64;
        rising *= (s + 2.0 * k - 1.0) * (s + 2.0 * k);
        even_factorial *= (2.0 * k + 1.0) * (2.0 * k + 2.0);
        cutoff_power /= cutoff * cutoff;
    }

    sum
}

fn zeta_negative(m: u32) -> f64 {
    if m % 2 == 0 {
        return 0.0;
    }

    let half_index = (m + 1) / 2;
    let even_argument = 2 * half_index;
    // 2 (2j-1)! / (2 pi)^(2j), accumulated factor by factor
    let magnitude = (1..even_argument).fold(2.0 / PI2, |acc, k| acc * f64::from(k) / PI2);
    let sign = if half_index % 2 == 0 { 1.0 } else { -1.0 };
    let even_zeta = i32::try_from(even_argument).map_or(1.0, zeta_above_one);

    sign * magnitude * even_zeta
}
