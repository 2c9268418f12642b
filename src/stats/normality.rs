use serde::Serialize;
use statrs::distribution::{ChiSquared, ContinuousCDF, Normal};
use statrs::function::gamma::ln_gamma;

// ---------------------------------------------------------------------------
// Test outcome
// ---------------------------------------------------------------------------

/// Statistic and p-value of a single hypothesis test.
///
/// Both are NaN when the test is undefined for the sample (zero variance).
/// NaN serializes as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TestOutcome {
    pub statistic: f64,
    pub p_value: f64,
}

impl TestOutcome {
    fn undefined() -> Self {
        Self {
            statistic: f64::NAN,
            p_value: f64::NAN,
        }
    }

    /// Whether the null hypothesis (normality) survives at level `alpha`.
    /// A NaN p-value never does.
    pub fn looks_normal(&self, alpha: f64) -> bool {
        self.p_value > alpha
    }
}

/// Smallest sample accepted by the skewness test, and so by the omnibus test.
pub const OMNIBUS_MIN_SAMPLES: usize = 8;

/// Above this sample size the KS p-value switches from the exact two-sided
/// distribution to twice the one-sided Smirnov tail.
const KS_EXACT_MAX_SAMPLES: usize = 10_000;

// ---------------------------------------------------------------------------
// Kolmogorov–Smirnov
// ---------------------------------------------------------------------------

/// Two-sided one-sample KS test of `sorted` (ascending) against
/// Normal(`mean`, `std_dev`).
pub fn ks_normal(sorted: &[f64], mean: f64, std_dev: f64) -> TestOutcome {
    let n = sorted.len();
    let Ok(normal) = Normal::new(mean, std_dev) else {
        return TestOutcome::undefined();
    };
    if n == 0 {
        return TestOutcome::undefined();
    }

    let nf = n as f64;
    let mut d_plus = f64::NEG_INFINITY;
    let mut d_minus = f64::NEG_INFINITY;
    for (i, &x) in sorted.iter().enumerate() {
        let cdf = normal.cdf(x);
        d_plus = d_plus.max((i + 1) as f64 / nf - cdf);
        d_minus = d_minus.max(cdf - i as f64 / nf);
    }
    let d = d_plus.max(d_minus);

    let p_value = if n <= KS_EXACT_MAX_SAMPLES {
        1.0 - kolmogorov_cdf(n, d)
    } else {
        // Two one-sided tails; slightly conservative, as scipy's `approx`.
        2.0 * smirnov_sf(n, d)
    };

    TestOutcome {
        statistic: d,
        p_value: p_value.clamp(0.0, 1.0),
    }
}

/// `P(D_n < d)` for the two-sided one-sample KS statistic.
///
/// Marsaglia, Tsang & Wang (2003), "Evaluating Kolmogorov's distribution",
/// including their closed-form shortcut for large `n·d²`.
pub fn kolmogorov_cdf(n: usize, d: f64) -> f64 {
    if n == 0 || d <= 0.0 {
        return 0.0;
    }
    if d >= 1.0 {
        return 1.0;
    }

    let nf = n as f64;
    let s = d * d * nf;
    if s > 7.24 || (s > 3.76 && n > 99) {
        return 1.0 - 2.0 * (-(2.000071 + 0.331 / nf.sqrt() + 1.409 / nf) * s).exp();
    }

    let k = (nf * d) as usize + 1;
    let m = 2 * k - 1;
    let h = k as f64 - nf * d;

    let mut hm = Matrix::zeros(m);
    for i in 0..m {
        for j in 0..m {
            if i + 1 >= j {
                hm.set(i, j, 1.0);
            }
        }
    }
    for i in 0..m {
        hm.set(i, 0, hm.get(i, 0) - h.powi(i as i32 + 1));
        hm.set(m - 1, i, hm.get(m - 1, i) - h.powi((m - i) as i32));
    }
    if 2.0 * h - 1.0 > 0.0 {
        hm.set(m - 1, 0, hm.get(m - 1, 0) + (2.0 * h - 1.0).powi(m as i32));
    }
    for i in 0..m {
        for j in 0..m {
            if i + 1 > j {
                let mut v = hm.get(i, j);
                for g in 1..=(i + 1 - j) {
                    v /= g as f64;
                }
                hm.set(i, j, v);
            }
        }
    }

    let (q, mut exponent) = hm.scaled_power(n);
    let mut s = q.get(k - 1, k - 1);
    for i in 1..=n {
        s = s * i as f64 / nf;
        if s < 1e-140 {
            s *= 1e140;
            exponent -= 140;
        }
    }
    s * 10f64.powi(exponent)
}

/// `P(D_n^+ >= d)` for the one-sided KS statistic.
///
/// Birnbaum & Tingey (1951) finite-`n` sum, evaluated in log space.
pub fn smirnov_sf(n: usize, d: f64) -> f64 {
    if n == 0 || d >= 1.0 {
        return 0.0;
    }
    if d <= 0.0 {
        return 1.0;
    }

    let nf = n as f64;
    let ln_n_fact = ln_gamma(nf + 1.0);
    let j_max = (nf * (1.0 - d)).floor() as usize;
    let log_terms: Vec<f64> = (0..=j_max.min(n))
        .filter_map(|j| {
            let jf = j as f64;
            let rest = 1.0 - d - jf / nf;
            if rest <= 0.0 {
                return None;
            }
            let ln_binom = ln_n_fact - ln_gamma(jf + 1.0) - ln_gamma(nf - jf + 1.0);
            Some(ln_binom + (nf - jf) * rest.ln() + (jf - 1.0) * (d + jf / nf).ln())
        })
        .collect();

    let Some(max) = log_terms.iter().copied().reduce(f64::max) else {
        return 0.0;
    };
    let scaled: f64 = log_terms.iter().map(|l| (l - max).exp()).sum();
    (d * max.exp() * scaled).clamp(0.0, 1.0)
}

/// Dense square matrix with a decimal exponent kept alongside, so that
/// repeated squaring does not overflow.
struct Matrix {
    m: usize,
    data: Vec<f64>,
}

impl Matrix {
    fn zeros(m: usize) -> Self {
        Self {
            m,
            data: vec![0.0; m * m],
        }
    }

    fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.m + j]
    }

    fn set(&mut self, i: usize, j: usize, v: f64) {
        self.data[i * self.m + j] = v;
    }

    fn multiply(&self, other: &Matrix) -> Matrix {
        let m = self.m;
        let mut out = Matrix::zeros(m);
        for i in 0..m {
            for k in 0..m {
                let a = self.get(i, k);
                if a == 0.0 {
                    continue;
                }
                for j in 0..m {
                    out.data[i * m + j] += a * other.data[k * m + j];
                }
            }
        }
        out
    }

    /// `self^n` as (mantissa matrix, base-10 exponent).
    fn scaled_power(&self, n: usize) -> (Matrix, i32) {
        if n == 1 {
            return (
                Matrix {
                    m: self.m,
                    data: self.data.clone(),
                },
                0,
            );
        }
        let (half, half_exp) = self.scaled_power(n / 2);
        let squared = half.multiply(&half);
        let (mut v, mut exponent) = if n % 2 == 0 {
            (squared, 2 * half_exp)
        } else {
            (self.multiply(&squared), 2 * half_exp)
        };
        let mid = self.m / 2;
        if v.get(mid, mid) > 1e140 {
            for x in &mut v.data {
                *x *= 1e-140;
            }
            exponent += 140;
        }
        (v, exponent)
    }
}

// ---------------------------------------------------------------------------
// D'Agostino–Pearson omnibus
// ---------------------------------------------------------------------------

/// D'Agostino–Pearson K² test. `None` for fewer than
/// [`OMNIBUS_MIN_SAMPLES`] values.
pub fn dagostino_pearson(values: &[f64]) -> Option<TestOutcome> {
    let n = values.len();
    if n < OMNIBUS_MIN_SAMPLES {
        return None;
    }
    let moments = CentralMoments::of(values);
    if moments.m2 == 0.0 {
        return Some(TestOutcome::undefined());
    }

    let zs = skewness_z(moments.skewness(), n);
    let zk = kurtosis_z(moments.kurtosis(), n);
    let k2 = zs * zs + zk * zk;
    log::debug!("omnibus: z_skew={zs:.6} z_kurt={zk:.6} k2={k2:.6}");

    let p_value = if k2.is_nan() {
        f64::NAN
    } else {
        ChiSquared::new(2.0).map(|chi| chi.sf(k2)).unwrap_or(f64::NAN)
    };
    Some(TestOutcome {
        statistic: k2,
        p_value,
    })
}

/// Biased (population) central moments.
#[derive(Debug, Clone, Copy)]
struct CentralMoments {
    m2: f64,
    m3: f64,
    m4: f64,
}

impl CentralMoments {
    fn of(values: &[f64]) -> Self {
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let (mut m2, mut m3, mut m4) = (0.0, 0.0, 0.0);
        for &x in values {
            let d = x - mean;
            let d2 = d * d;
            m2 += d2;
            m3 += d2 * d;
            m4 += d2 * d2;
        }
        Self {
            m2: m2 / n,
            m3: m3 / n,
            m4: m4 / n,
        }
    }

    fn skewness(&self) -> f64 {
        self.m3 / self.m2.powf(1.5)
    }

    /// Pearson (non-excess) kurtosis.
    fn kurtosis(&self) -> f64 {
        self.m4 / (self.m2 * self.m2)
    }
}

/// D'Agostino (1970) transform of sample skewness to a standard normal.
fn skewness_z(b2: f64, n: usize) -> f64 {
    let n = n as f64;
    let mut y = b2 * ((n + 1.0) * (n + 3.0) / (6.0 * (n - 2.0))).sqrt();
    let beta2 = 3.0 * (n * n + 27.0 * n - 70.0) * (n + 1.0) * (n + 3.0)
        / ((n - 2.0) * (n + 5.0) * (n + 7.0) * (n + 9.0));
    let w2 = -1.0 + (2.0 * (beta2 - 1.0)).sqrt();
    let delta = 1.0 / (0.5 * w2.ln()).sqrt();
    let alpha = (2.0 / (w2 - 1.0)).sqrt();
    if y == 0.0 {
        y = 1.0;
    }
    let ya = y / alpha;
    delta * (ya + (ya * ya + 1.0).sqrt()).ln()
}

/// Anscombe & Glynn (1983) transform of sample kurtosis to a standard normal.
fn kurtosis_z(b2: f64, n: usize) -> f64 {
    let n = n as f64;
    let expected = 3.0 * (n - 1.0) / (n + 1.0);
    let var_b2 =
        24.0 * n * (n - 2.0) * (n - 3.0) / ((n + 1.0).powi(2) * (n + 3.0) * (n + 5.0));
    let x = (b2 - expected) / var_b2.sqrt();
    let sqrt_beta1 = 6.0 * (n * n - 5.0 * n + 2.0) / ((n + 7.0) * (n + 9.0))
        * (6.0 * (n + 3.0) * (n + 5.0) / (n * (n - 2.0) * (n - 3.0))).sqrt();
    let a = 6.0 + 8.0 / sqrt_beta1 * (2.0 / sqrt_beta1 + (1.0 + 4.0 / (sqrt_beta1 * sqrt_beta1)).sqrt());
    let term1 = 1.0 - 2.0 / (9.0 * a);
    let denom = 1.0 + x * (2.0 / (a - 4.0)).sqrt();
    if denom == 0.0 {
        return f64::NAN;
    }
    let term2 = denom.signum() * ((1.0 - 2.0 / a) / denom.abs()).cbrt();
    (term1 - term2) / (2.0 / (9.0 * a)).sqrt()
}
