//! Polylogarithm `Li_n(x) = sum_{k>=1} x^k / k^n` for integer order and
//! real `x` in `[0, 1]`.

use super::gamma::factorial;
use super::zeta::zeta;

/// Below this argument the defining series converges geometrically fast.
const DIRECT_SERIES_CUTOFF: f64 = 0.5;
/// From this order on `k^-n` decays fast enough for the defining series
/// at any `x <= 1`.
const DIRECT_SERIES_MIN_ORDER: u32 = 20;
const SERIES_MAX_TERMS: usize = 256;
const SERIES_REL_TOL: f64 = 1.0e-17;

/// `Li_order(x)` for `x` in `[0, 1]`.
///
/// Returns NaN outside that interval and `+inf` where the function diverges
/// (`x == 1` for orders 0 and 1). At `x == 1` and order >= 2 the value is
/// `zeta(order)`.
///
/// Near one (`x > 1/2`) the defining series converges too slowly and the
/// expansion in `mu = ln x` is used instead:
///
/// `Li_n(e^mu) = mu^(n-1)/(n-1)! [H_(n-1) - ln(-mu)] + sum_{k != n-1} zeta(n-k) mu^k / k!`
pub fn polylog(order: u32, x: f64) -> f64 {
    if x.is_nan() || !(0.0..=1.0).contains(&x) {
        return f64::NAN;
    }
    if x == 0.0 {
        return 0.0;
    }

    match order {
        0 if x == 1.0 => f64::INFINITY,
        0 => x / (1.0 - x),
        1 if x == 1.0 => f64::INFINITY,
        1 => -(-x).ln_1p(),
        _ if x == 1.0 => zeta(i32::try_from(order).unwrap_or(i32::MAX)),
        _ if x <= DIRECT_SERIES_CUTOFF || order >= DIRECT_SERIES_MIN_ORDER => {
            direct_series(order, x)
        }
        _ => logarithmic_series(order, x),
    }
}

fn direct_series(order: u32, x: f64) -> f64 {
    let exponent = i32::try_from(order).unwrap_or(i32::MAX);
    let mut sum = 0.0;
    let mut power = x;

    for k in 1..=SERIES_MAX_TERMS {
        let term = power / (k as f64).powi(exponent);
        sum += term;
        if term <= SERIES_REL_TOL * sum {
            break;
        }
        power *= x;
    }

    sum
}

fn logarithmic_series(order: u32, x: f64) -> f64 {
    let mu = x.ln();
    let singular_index = (order - 1) as usize;
    let order = order as i32;

    let mut sum = mu.powi(order - 1) / factorial(order as u32 - 1)
        * (harmonic_number(order as u32 - 1) - (-mu).ln());

    // mu^k / k!
    let mut power = 1.0;
    for k in 0..SERIES_MAX_TERMS {
        if k > 0 {
            power *= mu / k as f64;
        }
        if k == singular_index {
            continue;
        }

        let coefficient = zeta(order - k as i32);
        if coefficient == 0.0 {
            continue;
        }

        let term = coefficient * power;
        sum += term;
        if k > singular_index && term.abs() <= SERIES_REL_TOL * sum.abs() {
            break;
        }
    }

    sum
}

fn harmonic_number(n: u32) -> f64 {
    (1..=n).map(|k| 1.0 / f64::from(k)).sum()
}
