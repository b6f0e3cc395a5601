//! Transform-length factorization for the mixed-radix engine.
//!
//! A length `n` is decomposed into an ordered list of radices together with
//! the per-stage stride bookkeeping the butterfly engine runs on. Radices
//! with closed-form kernels are preferred; whatever cannot be expressed with
//! them is trial-divided and handled by the generic kernel.

use alloc::vec::Vec;

use crate::fft::FftError;

/// Radices with dedicated closed-form kernels, tried largest first.
const PREFERRED: [usize; 6] = [10, 8, 5, 4, 3, 2];

/// Ordered radix decomposition of a transform length plus derived stride
/// products.
///
/// For each stage `s`, `strides[s]` is the product of all radices applied
/// before it (`strides[0] == 1`) and `groups[s]` the product of all radices
/// still to come, so `strides[s] * radices[s] * groups[s] == n` holds for
/// every stage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Factorization {
    n: usize,
    radices: Vec<usize>,
    strides: Vec<usize>,
    groups: Vec<usize>,
}

impl Factorization {
    /// Factor `n` into the stage list the engine executes.
    ///
    /// `n == 1` yields an empty stage list (the transform is the identity).
    pub fn new(n: usize) -> Result<Self, FftError> {
        if n == 0 {
            return Err(FftError::EmptyInput);
        }
        let radices = factorize(n);
        let stages = radices.len();
        let mut strides = Vec::with_capacity(stages);
        let mut groups = Vec::with_capacity(stages);
        let mut sofar = 1usize;
        for &r in &radices {
            strides.push(sofar);
            sofar *= r;
            groups.push(n / sofar);
        }
        let fact = Self {
            n,
            radices,
            strides,
            groups,
        };
        fact.verify()?;
        Ok(fact)
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.radices.is_empty()
    }

    /// Radices in the order the butterfly stages apply them.
    pub fn radices(&self) -> &[usize] {
        &self.radices
    }

    /// Per-stage stride: product of radices applied before each stage.
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Per-stage group count: product of radices still to be applied.
    pub fn groups(&self) -> &[usize] {
        &self.groups
    }

    /// Largest radix in the decomposition; sizes the engine's gather and
    /// twiddle-harmonic scratch. `1` for the degenerate `n == 1`.
    pub fn max_radix(&self) -> usize {
        self.radices.iter().copied().max().unwrap_or(1)
    }

    /// Whether any stage falls outside the closed-form kernel set.
    pub fn has_generic_radix(&self) -> bool {
        self.radices.iter().any(|r| !PREFERRED.contains(r))
    }

    /// Re-check the stride identity. A violation means the factorization
    /// itself is broken, which is an engine bug rather than a caller error.
    pub fn verify(&self) -> Result<(), FftError> {
        let mut product = 1usize;
        for s in 0..self.radices.len() {
            if self.strides[s] != product {
                return Err(FftError::InternalFault);
            }
            product = product
                .checked_mul(self.radices[s])
                .ok_or(FftError::InternalFault)?;
            if self.strides[s] * self.radices[s] * self.groups[s] != self.n {
                return Err(FftError::InternalFault);
            }
        }
        if product != self.n && !(self.radices.is_empty() && self.n == 1) {
            return Err(FftError::InternalFault);
        }
        Ok(())
    }
}

/// Greedy decomposition over [`PREFERRED`], then trial division.
///
/// A trailing factor of 2 left next to an earlier 8 is rewritten as two
/// factors of 4: the 4x4 stage pair evaluates with fewer operations than
/// the 8x2 pair it replaces.
fn factorize(mut n: usize) -> Vec<usize> {
    let mut radices = Vec::new();
    if n == 1 {
        return radices;
    }
    for &r in &PREFERRED {
        while n % r == 0 {
            n /= r;
            radices.push(r);
        }
    }
    if radices.last() == Some(&2) {
        if let Some(eight) = radices.iter().rposition(|&r| r == 8) {
            radices[eight] = 4;
            let last = radices.len() - 1;
            radices[last] = 4;
        }
    }
    let mut k = 2usize;
    while k * k <= n {
        if n % k == 0 {
            n /= k;
            radices.push(k);
        } else {
            k += 1;
        }
    }
    if n > 1 {
        radices.push(n);
    }
    radices
}
