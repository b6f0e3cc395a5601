//! Mixed-radix Fast Fourier Transform engine.
//!
//! The engine is built once per transform length: [`FftPlan`] holds the
//! radix decomposition, the digit-reversal permutation and the radix-2
//! trigonometric table, and a [`Workspace`] of scratch buffers is reused on
//! every call. Forward transforms run either through the staged
//! mixed-radix path (any length) or a dedicated radix-2 path (powers of
//! two); both emit the same output convention. The inverse transform uses
//! the conjugate identity `ifft(X) = conj(fft(conj(X))) / n`.
//!
//! Scratch reuse is what makes a single engine cheap to call repeatedly
//! and also what makes it single-threaded: methods take `&mut self`, and
//! concurrent callers should either build one engine per thread or share
//! an [`FftPlan`] through an [`FftPlanner`] and attach per-thread
//! workspaces.

use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::factor::Factorization;
use crate::fft_kernels::{fft10, fft2, fft3, fft4, fft5, fft8, fft_generic};
use crate::num::{copy_to_split, Complex, Float, SplitVec};
use crate::spectrum::Spectrum;

pub use crate::num::{Complex32, Complex64};

/// Errors surfaced by engine construction and transform calls.
///
/// `EmptyInput` and `MismatchedLengths` are caller mistakes, detected
/// before any computation touches the workspace. `InternalFault` marks a
/// violated engine invariant (factorization, stride bookkeeping or
/// permutation); it is fatal to the call and never worth retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FftError {
    EmptyInput,
    MismatchedLengths,
    InternalFault,
}

impl core::fmt::Display for FftError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FftError::EmptyInput => write!(f, "transform length must be at least 1"),
            FftError::MismatchedLengths => {
                write!(f, "input length does not match the planned transform length")
            }
            FftError::InternalFault => {
                write!(f, "internal invariant violated during transform")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FftError {}

/// Which forward path to run.
///
/// `Auto` picks the radix-2 path whenever the planned length is a power of
/// two. Requesting `Radix2` for other lengths falls back to the general
/// path; both paths produce identical spectra, so the choice is purely an
/// execution detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FftStrategy {
    Radix2,
    MixedRadix,
    #[default]
    Auto,
}

/// Trigonometric cache for the radix-2 fast path.
///
/// `trig[j] = e^{+2πi·j/n}` for `j < n/2`. The table is stored in the
/// conjugated (+sin) convention the fast-path passes run in; the engine
/// reconciles the resulting index reversal right after the passes.
#[derive(Clone, Debug)]
struct Radix2Plan<T: Float> {
    levels: u32,
    trig: Vec<Complex<T>>,
}

impl<T: Float> Radix2Plan<T> {
    fn new(n: usize) -> Option<Self> {
        let levels = n.trailing_zeros();
        if n != 1usize << levels {
            return None;
        }
        let half = n / 2;
        let mut trig = Vec::with_capacity(half);
        let step = Complex::expi((T::from_f32(2.0) * T::pi()) / usize_to_float::<T>(n));
        let mut w = Complex::new(T::one(), T::zero());
        for _ in 0..half {
            trig.push(w);
            w = w.mul(step);
        }
        Some(Self { levels, trig })
    }
}

/// Immutable per-length state: factorization, permutation and twiddle
/// seeds. Plans are cheap to share (`Arc`) between engines and threads.
#[derive(Clone, Debug)]
pub struct FftPlan<T: Float> {
    n: usize,
    factors: Factorization,
    permutation: Vec<usize>,
    radix2: Option<Radix2Plan<T>>,
}

impl<T: Float> FftPlan<T> {
    /// Plan a transform of length `n`. Fails with [`FftError::EmptyInput`]
    /// for `n == 0`.
    pub fn new(n: usize) -> Result<Self, FftError> {
        let factors = Factorization::new(n)?;
        let permutation = build_permutation(&factors);
        verify_permutation(&permutation, n)?;
        let radix2 = Radix2Plan::new(n);
        #[cfg(feature = "verbose-logging")]
        log::debug!(
            "planned fft of length {} with radices {:?} (radix-2 path: {})",
            n,
            factors.radices(),
            radix2.is_some()
        );
        Ok(Self {
            n,
            factors,
            permutation,
            radix2,
        })
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Radices in stage order.
    pub fn radices(&self) -> &[usize] {
        self.factors.radices()
    }

    /// Whether the dedicated radix-2 path applies to this length.
    pub fn has_radix2_path(&self) -> bool {
        self.radix2.is_some()
    }

    fn resolve(&self, strategy: FftStrategy) -> FftStrategy {
        match strategy {
            FftStrategy::Auto | FftStrategy::Radix2 if self.radix2.is_some() => {
                FftStrategy::Radix2
            }
            _ => FftStrategy::MixedRadix,
        }
    }
}

/// Scratch buffers reused across calls: the main work buffer, the
/// permutation staging buffer, and the small per-butterfly buffers sized
/// by the largest radix in the plan.
#[derive(Clone, Debug)]
struct Workspace<T: Float> {
    buf: Vec<Complex<T>>,
    stage: Vec<Complex<T>>,
    gather: Vec<Complex<T>>,
    spread: Vec<Complex<T>>,
    harmonics: Vec<Complex<T>>,
    roots: Vec<Complex<T>>,
}

impl<T: Float> Workspace<T> {
    fn for_plan(plan: &FftPlan<T>) -> Self {
        let n = plan.n;
        let r = plan.factors.max_radix();
        Self {
            buf: vec![Complex::zero(); n],
            stage: vec![Complex::zero(); n],
            gather: vec![Complex::zero(); r],
            spread: vec![Complex::zero(); r],
            harmonics: vec![Complex::zero(); r],
            roots: vec![Complex::zero(); r],
        }
    }
}

/// FFT engine for one fixed transform length.
///
/// Construction factors the length, derives the digit-reversal
/// permutation and allocates all scratch once; every call after that is
/// allocation-free apart from the returned output buffers.
#[derive(Debug)]
pub struct FftEngine<T: Float> {
    plan: Arc<FftPlan<T>>,
    ws: Workspace<T>,
}

impl<T: Float> FftEngine<T> {
    /// Build an engine for length `n`. `Err(EmptyInput)` when `n == 0`.
    pub fn new(n: usize) -> Result<Self, FftError> {
        Ok(Self::with_plan(Arc::new(FftPlan::new(n)?)))
    }

    /// Attach a fresh workspace to an existing (possibly shared) plan.
    pub fn with_plan(plan: Arc<FftPlan<T>>) -> Self {
        let ws = Workspace::for_plan(&plan);
        Self { plan, ws }
    }

    pub fn len(&self) -> usize {
        self.plan.n
    }

    pub fn is_empty(&self) -> bool {
        self.plan.n == 0
    }

    pub fn plan(&self) -> &Arc<FftPlan<T>> {
        &self.plan
    }

    /// Forward transform of a real signal.
    pub fn fft_real(&mut self, signal: &[T]) -> Result<Spectrum<T>, FftError> {
        self.check_len(signal.len())?;
        for (slot, &x) in self.ws.buf.iter_mut().zip(signal.iter()) {
            *slot = Complex::new(x, T::zero());
        }
        self.forward_in_buf(FftStrategy::Auto)?;
        Ok(self.emit_spectrum())
    }

    /// Forward transform of a complex signal given as paired real and
    /// imaginary slices.
    pub fn fft_split(&mut self, re: &[T], im: &[T]) -> Result<Spectrum<T>, FftError> {
        self.fft_split_with_strategy(re, im, FftStrategy::Auto)
    }

    /// Forward transform with an explicit path choice. Output is identical
    /// for every strategy; this exists for benchmarking and path-parity
    /// testing.
    pub fn fft_split_with_strategy(
        &mut self,
        re: &[T],
        im: &[T],
        strategy: FftStrategy,
    ) -> Result<Spectrum<T>, FftError> {
        self.check_len(re.len())?;
        self.check_len(im.len())?;
        for i in 0..self.plan.n {
            self.ws.buf[i] = Complex::new(re[i], im[i]);
        }
        self.forward_in_buf(strategy)?;
        Ok(self.emit_spectrum())
    }

    /// Inverse transform returning both components of the reconstructed
    /// signal.
    pub fn ifft_split(&mut self, spectrum: &Spectrum<T>) -> Result<SplitVec<T>, FftError> {
        self.check_len(spectrum.len())?;
        let (re, im) = spectrum.as_slices();
        for i in 0..self.plan.n {
            self.ws.buf[i] = Complex::new(re[i], -im[i]);
        }
        self.forward_in_buf(FftStrategy::Auto)?;
        let scale = T::one() / usize_to_float::<T>(self.plan.n);
        let mut out = SplitVec::zeroed(self.plan.n);
        for i in 0..self.plan.n {
            out.re[i] = self.ws.buf[i].re * scale;
            out.im[i] = -self.ws.buf[i].im * scale;
        }
        Ok(out)
    }

    /// Inverse transform of a spectrum known to describe a real signal;
    /// only the real component is returned.
    pub fn ifft_real(&mut self, spectrum: &Spectrum<T>) -> Result<Vec<T>, FftError> {
        Ok(self.ifft_split(spectrum)?.re)
    }

    fn check_len(&self, len: usize) -> Result<(), FftError> {
        if len != self.plan.n {
            return Err(FftError::MismatchedLengths);
        }
        Ok(())
    }

    fn forward_in_buf(&mut self, strategy: FftStrategy) -> Result<(), FftError> {
        match self.plan.resolve(strategy) {
            FftStrategy::Radix2 => {
                #[cfg(feature = "verbose-logging")]
                log::trace!("length {}: radix-2 fast path", self.plan.n);
                let tables = self
                    .plan
                    .radix2
                    .as_ref()
                    .ok_or(FftError::InternalFault)?;
                radix2_forward(tables, &mut self.ws.buf);
                Ok(())
            }
            _ => {
                #[cfg(feature = "verbose-logging")]
                log::trace!(
                    "length {}: mixed-radix path, radices {:?}",
                    self.plan.n,
                    self.plan.factors.radices()
                );
                mixed_radix_forward(&self.plan, &mut self.ws)
            }
        }
    }

    fn emit_spectrum(&self) -> Spectrum<T> {
        let mut bins = SplitVec::zeroed(self.plan.n);
        copy_to_split(&self.ws.buf, &mut bins.re, &mut bins.im);
        Spectrum::new(bins)
    }
}

/// Pool of shared plans keyed by transform length.
///
/// Threads that each own an [`FftEngine`] can draw plans from one planner
/// so the factorization and tables are computed once per length.
pub struct FftPlanner<T: Float> {
    cache: HashMap<usize, Arc<FftPlan<T>>>,
}

impl<T: Float> Default for FftPlanner<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> FftPlanner<T> {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    /// Fetch or build the plan for length `n`.
    pub fn plan(&mut self, n: usize) -> Result<Arc<FftPlan<T>>, FftError> {
        if let Some(plan) = self.cache.get(&n) {
            return Ok(Arc::clone(plan));
        }
        let plan = Arc::new(FftPlan::new(n)?);
        self.cache.insert(n, Arc::clone(&plan));
        Ok(plan)
    }

    /// Build an engine (plan plus private workspace) for length `n`.
    pub fn engine(&mut self, n: usize) -> Result<FftEngine<T>, FftError> {
        Ok(FftEngine::with_plan(self.plan(n)?))
    }
}

#[inline]
fn usize_to_float<T: Float>(x: usize) -> T {
    T::from_usize(x).unwrap_or_else(|| T::from_f32(x as f32))
}

/// Digit-reversal permutation for the staged mixed-radix pass.
///
/// Built factor by factor: appending a stage of radix `r` turns a
/// permutation of length `m` into one of length `m·r` where block `t`
/// holds the sub-permutation over samples congruent to `t` modulo `r`.
/// With all-2 factors this collapses to classical bit reversal.
fn build_permutation(factors: &Factorization) -> Vec<usize> {
    let mut perm = vec![0usize];
    for &r in factors.radices() {
        let m = perm.len();
        let mut next = Vec::with_capacity(m * r);
        for t in 0..r {
            for &p in perm.iter().take(m) {
                next.push(p * r + t);
            }
        }
        perm = next;
    }
    perm
}

fn verify_permutation(perm: &[usize], n: usize) -> Result<(), FftError> {
    if perm.len() != n {
        return Err(FftError::InternalFault);
    }
    let mut seen = vec![false; n];
    for &p in perm {
        if p >= n || seen[p] {
            return Err(FftError::InternalFault);
        }
        seen[p] = true;
    }
    Ok(())
}

/// Staged mixed-radix forward transform over the workspace buffer.
///
/// Stage `s` combines `radix` samples strided `stride` apart inside each
/// group. The twiddle for column `data_no` is seeded from one `sin_cos`
/// per stage and advanced by a single complex multiplication per column;
/// its radix harmonics are derived by repeated multiplication instead of
/// fresh trigonometric calls.
fn mixed_radix_forward<T: Float>(
    plan: &FftPlan<T>,
    ws: &mut Workspace<T>,
) -> Result<(), FftError> {
    let n = plan.n;
    if n == 1 {
        return Ok(());
    }

    // Redistribute into processing order.
    for (slot, &src) in ws.stage.iter_mut().zip(plan.permutation.iter()) {
        *slot = ws.buf[src];
    }
    core::mem::swap(&mut ws.buf, &mut ws.stage);

    let radices = plan.factors.radices();
    let strides = plan.factors.strides();
    let groups = plan.factors.groups();

    for s in 0..radices.len() {
        let radix = radices[s];
        let stride = strides[s];
        let remain = groups[s];
        let span = stride * radix;
        if span * remain != n {
            return Err(FftError::InternalFault);
        }

        let step = Complex::expi(-(T::from_f32(2.0) * T::pi()) / usize_to_float::<T>(span));
        let mut running = Complex::new(T::one(), T::zero());

        for data_no in 0..stride {
            // The first stage (and column zero of any stage) carries unit
            // twiddles; skip the multiplications outright.
            let twiddled = stride > 1 && data_no > 0;
            if twiddled {
                ws.harmonics[0] = running;
                for q in 1..radix - 1 {
                    ws.harmonics[q] = ws.harmonics[q - 1].mul(running);
                }
            }
            for group_no in 0..remain {
                let base = group_no * span + data_no;
                ws.gather[0] = ws.buf[base];
                if twiddled {
                    for q in 1..radix {
                        ws.gather[q] = ws.buf[base + q * stride].mul(ws.harmonics[q - 1]);
                    }
                } else {
                    for q in 1..radix {
                        ws.gather[q] = ws.buf[base + q * stride];
                    }
                }
                apply_kernel(radix, ws);
                for q in 0..radix {
                    ws.buf[base + q * stride] = ws.gather[q];
                }
            }
            running = running.mul(step);
        }
    }
    Ok(())
}

fn apply_kernel<T: Float>(radix: usize, ws: &mut Workspace<T>) {
    let z = &mut ws.gather[..radix];
    match radix {
        2 => fft2(z),
        3 => fft3(z),
        4 => fft4(z),
        5 => fft5(z),
        8 => fft8(z),
        10 => fft10(z),
        _ => fft_generic(z, &mut ws.spread[..radix], &mut ws.roots[..radix]),
    }
}

/// Decimation-in-time radix-2 transform over the cached trig table.
///
/// Runs the classical in-place bit reversal followed by `levels` butterfly
/// passes. The passes use the +sin table convention, which produces the
/// spectrum with its tail index-reversed relative to the mixed-radix
/// path; the final reversal restores the shared convention so callers see
/// one consistent ordering no matter which path executed.
fn radix2_forward<T: Float>(tables: &Radix2Plan<T>, buf: &mut [Complex<T>]) {
    let n = buf.len();
    if n <= 1 {
        return;
    }

    let mut j = 0usize;
    for i in 1..n {
        let mut bit = n >> 1;
        while j & bit != 0 {
            j ^= bit;
            bit >>= 1;
        }
        j ^= bit;
        if i < j {
            buf.swap(i, j);
        }
    }

    let mut len = 2usize;
    let mut passes = 0u32;
    while len <= n {
        let half = len >> 1;
        let table_step = n / len;
        let mut base = 0usize;
        while base < n {
            for k in 0..half {
                let w = tables.trig[k * table_step];
                let a = buf[base + k];
                let t = buf[base + k + half].mul(w);
                buf[base + k] = a.add(t);
                buf[base + k + half] = a.sub(t);
            }
            base += len;
        }
        len <<= 1;
        passes += 1;
    }
    debug_assert_eq!(passes, tables.levels);

    // Equivalent to reversing the whole spectrum and rotating it by one
    // bin: bin k picks up the +sin result for bin n-k.
    buf[1..].reverse();
}


#[cfg(all(feature = "internal-tests", test))]
mod proptests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;
    use proptest::prelude::*;

    fn naive_dft(re: &[f64], im: &[f64]) -> (Vec<f64>, Vec<f64>) {
        let n = re.len();
        let mut out_re = vec![0.0; n];
        let mut out_im = vec![0.0; n];
        for k in 0..n {
            for q in 0..n {
                let angle = -2.0 * core::f64::consts::PI * (k * q) as f64 / n as f64;
                let (s, c) = angle.sin_cos();
                out_re[k] += re[q] * c - im[q] * s;
                out_im[k] += re[q] * s + im[q] * c;
            }
        }
        (out_re, out_im)
    }

    proptest! {
        #[test]
        fn forward_matches_naive_dft(
            n in 1usize..48,
            seed in any::<u64>(),
        ) {
            use rand::{Rng, SeedableRng};
            let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
            let re: Vec<f64> = (0..n).map(|_| rng.gen_range(-1.0..1.0)).collect();
            let im: Vec<f64> = (0..n).map(|_| rng.gen_range(-1.0..1.0)).collect();
            let mut engine = FftEngine::<f64>::new(n).unwrap();
            let spec = engine.fft_split(&re, &im).unwrap();
            let (exp_re, exp_im) = naive_dft(&re, &im);
            for k in 0..n {
                prop_assert!((spec.re()[k] - exp_re[k]).abs() < 1e-9);
                prop_assert!((spec.im()[k] - exp_im[k]).abs() < 1e-9);
            }
        }

        #[test]
        fn roundtrip_recovers_signal(
            n in 1usize..200,
            seed in any::<u64>(),
        ) {
            use rand::{Rng, SeedableRng};
            let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
            let re: Vec<f64> = (0..n).map(|_| rng.gen_range(-10.0..10.0)).collect();
            let im: Vec<f64> = (0..n).map(|_| rng.gen_range(-10.0..10.0)).collect();
            let mut engine = FftEngine::<f64>::new(n).unwrap();
            let spec = engine.fft_split(&re, &im).unwrap();
            let back = engine.ifft_split(&spec).unwrap();
            for i in 0..n {
                prop_assert!((back.re[i] - re[i]).abs() < 1e-8);
                prop_assert!((back.im[i] - im[i]).abs() < 1e-8);
            }
        }
    }
}
