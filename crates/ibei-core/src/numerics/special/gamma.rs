use crate::common::constants::{PI, PI2};

/// Largest `n` for which `n!` is finite in double precision.
pub const MAX_FACTORIAL_ARGUMENT: u32 = 170;

const LANCZOS_G: f64 = 7.0;
const LANCZOS_COEFFICIENTS: [f64; 9] = [
    0.999_999_999_999_809_9,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_1,
    -176.615_029_162_140_6,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_572e-6,
    1.505_632_735_149_311_6e-7,
];
const GAMMA_OVERFLOW_ARGUMENT: f64 = 171.624_376_956_302_7;

/// `n!` as a float, `+inf` once it overflows.
pub fn factorial(n: u32) -> f64 {
    if n > MAX_FACTORIAL_ARGUMENT {
        return f64::INFINITY;
    }
    (2..=n).fold(1.0, |product, k| product * f64::from(k))
}

/// Gamma function of a real argument.
///
/// Positive integers are evaluated as exact factorial products so that
/// `gamma(m + 1) == factorial(m)` holds bit for bit. Other arguments use the
/// Lanczos approximation (g = 7, 9 terms) with the reflection formula below
/// one half. Poles (zero and negative integers) return NaN.
pub fn gamma(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }

    if x == x.floor() {
        if x <= 0.0 {
            return f64::NAN;
        }
        if x <= f64::from(MAX_FACTORIAL_ARGUMENT + 1) {
            return factorial(x as u32 - 1);
        }
        return f64::INFINITY;
    }

    if x < 0.5 {
        return PI / ((PI * x).sin() * gamma(1.0 - x));
    }
    if x > GAMMA_OVERFLOW_ARGUMENT {
        return f64::INFINITY;
    }

    let shifted = x - 1.0;
    let series = LANCZOS_COEFFICIENTS
        .iter()
        .enumerate()
        .skip(1)
        .fold(LANCZOS_COEFFICIENTS[0], |acc, (index, coefficient)| {
            acc + coefficient / (shifted + index as f64)
        });
    let t = shifted + LANCZOS_G + 0.5;
    // split the power so t^(z + 1/2) does not overflow before exp(-t) is applied
    let half_power = t.powf(0.5 * (shifted + 0.5));
    PI2.sqrt() * half_power * ((-t).exp() * half_power) * series
}
