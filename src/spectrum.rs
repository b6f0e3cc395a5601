//! Spectrum containers with the bin ordering encoded in the type.
//!
//! [`Spectrum`] is the engine's native output: natural order, DC in bin 0,
//! the remaining bins alternating positive/negative frequency depending on
//! the parity of the length. [`CenteredSpectrum`] is the display ordering
//! with DC moved to bin `n/2`. Keeping them as separate types means a
//! centered spectrum cannot be handed back to the inverse transform by
//! accident.

use alloc::vec::Vec;

use crate::num::{Complex, Float, SplitVec};

/// Frequency-domain coefficients in natural order (DC at index 0).
#[derive(Clone, Debug, PartialEq)]
pub struct Spectrum<T: Float> {
    bins: SplitVec<T>,
}

impl<T: Float> Spectrum<T> {
    pub fn new(bins: SplitVec<T>) -> Self {
        Self { bins }
    }

    pub fn from_parts(re: Vec<T>, im: Vec<T>) -> Self {
        Self {
            bins: SplitVec::new(re, im),
        }
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn re(&self) -> &[T] {
        &self.bins.re
    }

    pub fn im(&self) -> &[T] {
        &self.bins.im
    }

    pub fn as_slices(&self) -> (&[T], &[T]) {
        self.bins.as_slices()
    }

    pub fn bin(&self, k: usize) -> Complex<T> {
        Complex::new(self.bins.re[k], self.bins.im[k])
    }

    /// The DC coefficient, i.e. the sum of the input samples.
    pub fn dc(&self) -> Complex<T> {
        self.bin(0)
    }

    pub fn into_split(self) -> SplitVec<T> {
        self.bins
    }

    /// Reorder for display with DC moved to bin `n/2`.
    ///
    /// Centering twice restores the original ordering only for even
    /// lengths; for odd lengths the two shifts do not cancel. Use
    /// [`CenteredSpectrum::into_natural`] to undo a centering exactly for
    /// any length.
    pub fn centered(&self) -> CenteredSpectrum<T> {
        let n = self.len();
        let half = n / 2;
        let mut out = SplitVec::zeroed(n);
        for k in 0..n {
            let j = (k + half) % n.max(1);
            out.re[j] = self.bins.re[k];
            out.im[j] = self.bins.im[k];
        }
        CenteredSpectrum { bins: out }
    }
}

/// Display-only reordering of a [`Spectrum`] with DC at bin `n/2`.
///
/// This type deliberately offers no route into the inverse transform;
/// convert back with [`CenteredSpectrum::into_natural`] first.
#[derive(Clone, Debug, PartialEq)]
pub struct CenteredSpectrum<T: Float> {
    bins: SplitVec<T>,
}

impl<T: Float> CenteredSpectrum<T> {
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn re(&self) -> &[T] {
        &self.bins.re
    }

    pub fn im(&self) -> &[T] {
        &self.bins.im
    }

    pub fn bin(&self, k: usize) -> Complex<T> {
        Complex::new(self.bins.re[k], self.bins.im[k])
    }

    pub fn into_split(self) -> SplitVec<T> {
        self.bins
    }

    /// Undo the centering shift exactly, for any length.
    pub fn into_natural(self) -> Spectrum<T> {
        let n = self.len();
        let half = n / 2;
        let mut out = SplitVec::zeroed(n);
        for k in 0..n {
            let j = (k + half) % n.max(1);
            out.re[k] = self.bins.re[j];
            out.im[k] = self.bins.im[j];
        }
        Spectrum { bins: out }
    }
}
