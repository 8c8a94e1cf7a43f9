// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Mathematical Constants Module** - *Lookup Tables and Series Constants*
//!
//! Hard-coded constants for the Kolmogorov-Smirnov kernels. The factorial tables
//! are immutable process-wide data, read concurrently without synchronisation.

/// Largest `n` covered by the [`FACTORIAL`] and [`LN_FACTORIAL`] tables.
pub(crate) const MFACT: usize = 30;

/// Exact factorials n! for n ∈ [0, 30].
///
/// Sourced via python's math lib `float(math.factorial(n))`.
pub(crate) static FACTORIAL: [f64; MFACT + 1] = [
    1.0,
    1.0,
    2.0,
    6.0,
    24.0,
    120.0,
    720.0,
    5040.0,
    40320.0,
    362880.0,
    3628800.0,
    39916800.0,
    479001600.0,
    6227020800.0,
    87178291200.0,
    1307674368000.0,
    20922789888000.0,
    355687428096000.0,
    6402373705728000.0,
    1.21645100408832e17,
    2.43290200817664e18,
    5.109094217170944e19,
    1.1240007277776077e21,
    2.585201673888498e22,
    6.204484017332394e23,
    1.5511210043330986e25,
    4.0329146112660565e26,
    1.0888869450418352e28,
    3.0488834461171387e29,
    8.841761993739702e30,
    2.6525285981219107e32,
];

/// Natural log of n! for n ∈ [0, 30].
///
/// Beyond the table [`ln_factorial`](super::scalar::ln_factorial) switches to a
/// Stirling series with a rational correction.
pub(crate) static LN_FACTORIAL: [f64; MFACT + 1] = [
    0.0,
    0.0,
    0.6931471805599453,
    1.791759469228055,
    3.1780538303479458,
    4.787491742782046,
    6.579251212010101,
    8.525161361065415,
    10.60460290274525,
    12.801827480081469,
    15.104412573075516,
    17.502307845873887,
    19.987214495661885,
    22.552163853123425,
    25.19122118273868,
    27.89927138384089,
    30.671860106080672,
    33.50507345013689,
    36.39544520803305,
    39.339884187199495,
    42.335616460753485,
    45.38013889847691,
    48.47118135183523,
    51.60667556776438,
    54.78472939811232,
    58.00360522298052,
    61.261701761002,
    64.55753862700634,
    67.88974313718154,
    71.25703896716801,
    74.65823634883016,
];

/// Stirling series correction coefficients `1/1680`, `1/1260`, `1/360`, `1/12`,
/// evaluated in the nested form `((-c0·y + c1)·y - c2)·y + c3` with `y = 1/x²`.
pub(crate) const STIRLING: [f64; 4] = [
    5.95238095238e-4,
    7.936500793651e-4,
    2.7777777777778e-3,
    8.3333333333333e-2,
];

/// Half of the natural logarithm of 2π, at the precision of the Stirling correction.
pub(crate) const HALF_LOG_TWO_PI_STIRLING: f64 = 9.1893853320467e-1;

/// The square root of 2π: √(2π) ≈ 2.506628274631001.
///
/// Leading constant of the Pelz-Good series.
pub(crate) const SQRT_2PI: f64 = 2.506628274631001_f64;

/// The square root of π/2: √(π/2) ≈ 1.2533141373155001.
///
/// Shared factor of the Pelz-Good correction terms.
pub(crate) const SQRT_HALF_PI: f64 = 1.2533141373155001_f64;

/// π².
pub(crate) const PI2: f64 = std::f64::consts::PI * std::f64::consts::PI;

/// π⁴.
pub(crate) const PI4: f64 = PI2 * PI2;

/// Natural log of 10, for converting decimal renormalisation exponents.
pub(crate) const LN_10: f64 = std::f64::consts::LN_10;
