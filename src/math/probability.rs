/// Error function approximation using Abramowitz and Stegun method
///
/// Accurate to about 1.5e-7, which is plenty for judging whether observed
/// outcome frequencies agree with learned probabilities.
pub fn erf(x: f64) -> f64 {
    let a1 = 0.254_829_592_f64;
    let a2 = -0.284_496_736_f64;
    let a3 = 1.421_413_741_f64;
    let a4 = -1.453_152_027_f64;
    let a5 = 1.061_405_429_f64;
    let p = 0.327_591_1_f64;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();

    let t = 1.0 / p.mul_add(x, 1.0);
    let y = (((((a5.mul_add(t, a4)).mul_add(t, a3)).mul_add(t, a2)).mul_add(t, a1)) * t)
        .mul_add(-(-x * x).exp(), 1.0);

    sign * y
}

/// Cumulative distribution function of the standard normal distribution
pub fn standard_normal_cdf(z: f64) -> f64 {
    0.5 * (1.0 + erf(z / std::f64::consts::SQRT_2))
}

/// Two-sided p-value of a standard normal test statistic
pub fn two_sided_p_value(z: f64) -> f64 {
    2.0 * (1.0 - standard_normal_cdf(z.abs()))
}

/// Standardized deviation of `successes` out of `trials` from probability `p`
///
/// Uses the normal approximation to the binomial. Degenerate probabilities
/// give zero when the observation matches exactly and infinity otherwise.
pub fn binomial_z_score(successes: usize, trials: usize, p: f64) -> f64 {
    if trials == 0 {
        return 0.0;
    }
    let n = trials as f64;
    let expected = n * p;
    let deviation = successes as f64 - expected;
    let variance = n * p * (1.0 - p);

    if variance <= 0.0 {
        return if deviation.abs() < 0.5 {
            0.0
        } else {
            deviation.signum() * f64::INFINITY
        };
    }

    deviation / variance.sqrt()
}

/// Half-width of the normal confidence interval for a proportion
///
/// `z` selects the confidence level, e.g. 1.96 for 95%.
pub fn proportion_half_width(p: f64, trials: usize, z: f64) -> f64 {
    if trials == 0 {
        return f64::INFINITY;
    }
    z * (p * (1.0 - p) / trials as f64).sqrt()
}
