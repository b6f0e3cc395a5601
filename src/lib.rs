//! # mixfft - generic mixed-radix FFT engine
//!
//! Forward and inverse discrete Fourier transforms for real and complex
//! sequences of arbitrary length, built on a generalized Cooley–Tukey
//! mixed-radix decomposition with closed-form kernels for radices
//! 2, 3, 4, 5, 8 and 10, a generic fallback for prime radices, and a
//! dedicated radix-2 fast path for power-of-two lengths.
//!
//! ## Usage
//!
//! ```
//! use mixfft::FftEngine;
//!
//! let mut engine = FftEngine::<f32>::new(4).unwrap();
//! let spectrum = engine.fft_real(&[1.0, 0.0, 0.0, 0.0]).unwrap();
//! assert!(spectrum.re().iter().all(|&r| (r - 1.0).abs() < 1e-6));
//! let signal = engine.ifft_real(&spectrum).unwrap();
//! assert!((signal[0] - 1.0).abs() < 1e-6);
//! ```
//!
//! An engine is planned once per transform length and reuses its scratch
//! buffers on every call, so calls after the first are allocation-free.
//! That reuse is also why the engine takes `&mut self`: one instance must
//! not be driven from two threads at once. Share an [`FftPlan`] through an
//! [`FftPlanner`] when several threads transform at the same length.
//!
//! ## Cargo Features
//!
//! - `std` (default): standard-library trigonometry and `std::error::Error`
//!   for [`fft::FftError`]; without it, math routes through `libm`.
//! - `internal-tests`: property tests against a naive DFT (`proptest`).
//! - `verbose-logging`: `log` trace output from planning and path
//!   selection.
//!
//! ## License
//!
//! Licensed under either of
//! - Apache License, Version 2.0
//! - MIT license
//!
//! at your option.

#![no_std]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

/// Transform-length factorization and per-stage stride bookkeeping.
pub mod factor;

/// The staged transform engine, plans, workspaces and the planner pool.
pub mod fft;

/// Closed-form small-radix DFT kernels and the generic prime-radix
/// fallback.
pub mod fft_kernels;

/// Float abstraction, complex arithmetic and split real/imaginary
/// buffers.
pub mod num;

/// Natural-order and centered spectrum containers.
pub mod spectrum;

pub use fft::{FftEngine, FftError, FftPlan, FftPlanner, FftStrategy};
pub use num::{Complex, Complex32, Complex64, Float, SplitVec};
pub use spectrum::{CenteredSpectrum, Spectrum};

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::f32::consts;

    #[test]
    fn impulse_has_flat_spectrum() {
        // FFT of [1, 0, 0, 0] is [1, 1, 1, 1].
        let mut engine = FftEngine::<f32>::new(4).unwrap();
        let spec = engine.fft_real(&[1.0, 0.0, 0.0, 0.0]).unwrap();
        for k in 0..4 {
            assert!((spec.re()[k] - 1.0).abs() < 1e-6, "re = {}", spec.re()[k]);
            assert!(spec.im()[k].abs() < 1e-6, "im = {}", spec.im()[k]);
        }
    }

    #[test]
    fn forward_inverse_recovers_impulse() {
        let mut engine = FftEngine::<f32>::new(4).unwrap();
        let spec = engine.fft_real(&[1.0, 0.0, 0.0, 0.0]).unwrap();
        let back = engine.ifft_split(&spec).unwrap();
        assert!((back.re[0] - 1.0).abs() < 1e-6);
        for i in 1..4 {
            assert!(back.re[i].abs() < 1e-6);
            assert!(back.im[i].abs() < 1e-6);
        }
    }

    #[test]
    fn cosine_wave_peaks_at_its_frequency() {
        let n = 8;
        let signal: Vec<f32> = (0..n)
            .map(|i| (2.0 * consts::PI * (i as f32) / n as f32).cos())
            .collect();
        let mut engine = FftEngine::<f32>::new(n).unwrap();
        let spec = engine.fft_real(&signal).unwrap();
        let mags: Vec<f32> = (0..n)
            .map(|k| {
                let b = spec.bin(k);
                (b.re * b.re + b.im * b.im).sqrt()
            })
            .collect();
        let max_idx = mags
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .unwrap()
            .0;
        assert!(max_idx == 1 || max_idx == n - 1);
    }

    #[test]
    fn all_zeros_stays_zero() {
        let mut engine = FftEngine::<f32>::new(8).unwrap();
        let spec = engine.fft_real(&[0.0; 8]).unwrap();
        for k in 0..8 {
            assert!(spec.re()[k].abs() < 1e-6);
            assert!(spec.im()[k].abs() < 1e-6);
        }
    }

    #[test]
    fn constant_signal_is_pure_dc() {
        let mut engine = FftEngine::<f32>::new(8).unwrap();
        let spec = engine.fft_real(&[1.0; 8]).unwrap();
        assert!((spec.dc().re - 8.0).abs() < 1e-6);
        for k in 1..8 {
            assert!(spec.re()[k].abs() < 1e-6);
            assert!(spec.im()[k].abs() < 1e-6);
        }
    }

    #[test]
    fn non_power_of_two_roundtrip() {
        let re = vec![1.0f32, 2.0, 3.0];
        let im = vec![0.0f32; 3];
        let mut engine = FftEngine::<f32>::new(3).unwrap();
        let spec = engine.fft_split(&re, &im).unwrap();
        let back = engine.ifft_split(&spec).unwrap();
        for i in 0..3 {
            assert!((back.re[i] - re[i]).abs() < 1e-5, "{} vs {}", back.re[i], re[i]);
            assert!(back.im[i].abs() < 1e-5);
        }
    }

    #[test]
    fn real_input_spectrum_is_hermitian() {
        let mut engine = FftEngine::<f32>::new(4).unwrap();
        let spec = engine.fft_real(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert!((spec.re()[1] - spec.re()[3]).abs() < 1e-6);
        assert!((spec.im()[1] + spec.im()[3]).abs() < 1e-6);
    }

    #[test]
    fn repeated_reuse_of_one_engine_stays_accurate() {
        let re = vec![1.0f32, 2.0, 3.0, 4.0];
        let im = vec![0.5f32, -0.5, 0.25, -0.25];
        let mut engine = FftEngine::<f32>::new(4).unwrap();
        let mut cur_re = re.clone();
        let mut cur_im = im.clone();
        for _ in 0..10 {
            let spec = engine.fft_split(&cur_re, &cur_im).unwrap();
            let back = engine.ifft_split(&spec).unwrap();
            cur_re = back.re;
            cur_im = back.im;
        }
        for i in 0..4 {
            assert!((cur_re[i] - re[i]).abs() < 1e-4, "{} vs {}", cur_re[i], re[i]);
            assert!((cur_im[i] - im[i]).abs() < 1e-4, "{} vs {}", cur_im[i], im[i]);
        }
    }

    #[test]
    fn large_values_survive_roundtrip() {
        let re = vec![1000.0f32, 2000.0, 3000.0, 4000.0];
        let im = vec![0.0f32; 4];
        let mut engine = FftEngine::<f32>::new(4).unwrap();
        let spec = engine.fft_split(&re, &im).unwrap();
        let back = engine.ifft_split(&spec).unwrap();
        for i in 0..4 {
            assert!((back.re[i] - re[i]).abs() < 1e-3);
            assert!(back.im[i].abs() < 1e-3);
        }
    }
}
