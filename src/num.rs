use alloc::vec;
use alloc::vec::Vec;
use core::f32::consts::PI as PI32;

/// Minimal float abstraction so the engine works for `f32` and `f64` alike.
///
/// Trigonometric calls route through the standard library when the `std`
/// feature is enabled and through `libm` otherwise.
pub trait Float:
    Copy
    + Clone
    + PartialEq
    + PartialOrd
    + core::fmt::Debug
    + core::ops::Add<Output = Self>
    + core::ops::Sub<Output = Self>
    + core::ops::Mul<Output = Self>
    + core::ops::Div<Output = Self>
    + core::ops::Neg<Output = Self>
    + 'static
{
    fn zero() -> Self;
    fn one() -> Self;
    fn from_f32(x: f32) -> Self;
    /// Narrowing conversion for shared kernel constants; `f64` keeps the
    /// full literal precision, `f32` rounds once.
    fn from_f64(x: f64) -> Self;
    /// Attempt to convert a `usize` into the floating-point type.
    /// Returns `None` if the value cannot be represented exactly.
    fn from_usize(x: usize) -> Option<Self>;
    fn cos(self) -> Self;
    fn sin(self) -> Self;
    fn sin_cos(self) -> (Self, Self);
    fn pi() -> Self;
    #[inline(always)]
    fn mul_add(self, a: Self, b: Self) -> Self {
        self * a + b
    }
}

// The lint misfires on `f32::cos(self)` style calls into the inherent
// methods; they resolve to the standard library, not back into the trait.
#[allow(unconditional_recursion)]
impl Float for f32 {
    fn zero() -> Self {
        0.0
    }
    fn one() -> Self {
        1.0
    }
    fn from_f32(x: f32) -> Self {
        x
    }
    fn from_f64(x: f64) -> Self {
        x as f32
    }
    fn from_usize(x: usize) -> Option<Self> {
        const MAX_EXACT: usize = 1usize << 24;
        if x < MAX_EXACT {
            Some(x as f32)
        } else {
            None
        }
    }
    fn cos(self) -> Self {
        #[cfg(feature = "std")]
        {
            f32::cos(self)
        }
        #[cfg(not(feature = "std"))]
        {
            libm::cosf(self)
        }
    }
    fn sin(self) -> Self {
        #[cfg(feature = "std")]
        {
            f32::sin(self)
        }
        #[cfg(not(feature = "std"))]
        {
            libm::sinf(self)
        }
    }
    fn sin_cos(self) -> (Self, Self) {
        (Float::sin(self), Float::cos(self))
    }
    fn pi() -> Self {
        PI32
    }
    #[inline(always)]
    fn mul_add(self, a: Self, b: Self) -> Self {
        #[cfg(feature = "std")]
        {
            f32::mul_add(self, a, b)
        }
        #[cfg(not(feature = "std"))]
        {
            libm::fmaf(self, a, b)
        }
    }
}

#[allow(unconditional_recursion)]
impl Float for f64 {
    fn zero() -> Self {
        0.0
    }
    fn one() -> Self {
        1.0
    }
    fn from_f32(x: f32) -> Self {
        x as f64
    }
    fn from_f64(x: f64) -> Self {
        x
    }
    fn from_usize(x: usize) -> Option<Self> {
        const MAX_EXACT: usize = 1usize << 53;
        if x < MAX_EXACT {
            Some(x as f64)
        } else {
            None
        }
    }
    fn cos(self) -> Self {
        #[cfg(feature = "std")]
        {
            f64::cos(self)
        }
        #[cfg(not(feature = "std"))]
        {
            libm::cos(self)
        }
    }
    fn sin(self) -> Self {
        #[cfg(feature = "std")]
        {
            f64::sin(self)
        }
        #[cfg(not(feature = "std"))]
        {
            libm::sin(self)
        }
    }
    fn sin_cos(self) -> (Self, Self) {
        (Float::sin(self), Float::cos(self))
    }
    fn pi() -> Self {
        core::f64::consts::PI
    }
    #[inline(always)]
    fn mul_add(self, a: Self, b: Self) -> Self {
        #[cfg(feature = "std")]
        {
            f64::mul_add(self, a, b)
        }
        #[cfg(not(feature = "std"))]
        {
            libm::fma(self, a, b)
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Complex<T: Float> {
    pub re: T,
    pub im: T,
}

impl<T: Float> Complex<T> {
    pub fn new(re: T, im: T) -> Self {
        Self { re, im }
    }
    pub fn zero() -> Self {
        Self {
            re: T::zero(),
            im: T::zero(),
        }
    }
    /// `e^{i·theta}` as a unit-magnitude complex value.
    #[inline(always)]
    pub fn expi(theta: T) -> Self {
        let (sin, cos) = theta.sin_cos();
        Self { re: cos, im: sin }
    }
    #[allow(clippy::should_implement_trait)]
    #[inline(always)]
    pub fn add(self, other: Self) -> Self {
        Self {
            re: self.re + other.re,
            im: self.im + other.im,
        }
    }
    #[allow(clippy::should_implement_trait)]
    #[inline(always)]
    pub fn sub(self, other: Self) -> Self {
        Self {
            re: self.re - other.re,
            im: self.im - other.im,
        }
    }
    #[allow(clippy::should_implement_trait)]
    #[inline(always)]
    pub fn mul(self, other: Self) -> Self {
        Self {
            re: self.re * other.re - self.im * other.im,
            im: self.re * other.im + self.im * other.re,
        }
    }
    #[inline(always)]
    pub fn conj(self) -> Self {
        Self {
            re: self.re,
            im: -self.im,
        }
    }
    #[inline(always)]
    pub fn scale(self, k: T) -> Self {
        Self {
            re: self.re * k,
            im: self.im * k,
        }
    }
    /// Rotation by -90°: `self · (-i)`.
    #[inline(always)]
    pub fn mul_neg_i(self) -> Self {
        Self {
            re: self.im,
            im: -self.re,
        }
    }
    /// Rotation by +90°: `self · i`.
    #[inline(always)]
    pub fn mul_i(self) -> Self {
        Self {
            re: -self.im,
            im: self.re,
        }
    }
}

impl<T: Float> core::ops::Neg for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn neg(self) -> Self {
        Self {
            re: -self.re,
            im: -self.im,
        }
    }
}

impl<T: Float> core::ops::Add for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn add(self, other: Self) -> Self {
        Complex::<T>::add(self, other)
    }
}

impl<T: Float> core::ops::Sub for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn sub(self, other: Self) -> Self {
        Complex::<T>::sub(self, other)
    }
}

impl<T: Float> core::ops::Mul for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn mul(self, other: Self) -> Self {
        Complex::<T>::mul(self, other)
    }
}

pub type Complex32 = Complex<f32>;
pub type Complex64 = Complex<f64>;

/// Owned split-complex buffer: one vector of real parts, one of imaginary
/// parts, always the same length. This is the exchange format for callers
/// that keep real and imaginary samples in separate sequences.
#[derive(Clone, Debug, PartialEq)]
pub struct SplitVec<T: Float> {
    pub re: Vec<T>,
    pub im: Vec<T>,
}

impl<T: Float> SplitVec<T> {
    pub fn new(re: Vec<T>, im: Vec<T>) -> Self {
        assert_eq!(re.len(), im.len());
        Self { re, im }
    }

    pub fn zeroed(len: usize) -> Self {
        Self {
            re: vec![T::zero(); len],
            im: vec![T::zero(); len],
        }
    }

    pub fn len(&self) -> usize {
        self.re.len()
    }
    pub fn is_empty(&self) -> bool {
        self.re.is_empty()
    }

    pub fn from_interleaved(v: &[Complex<T>]) -> Self {
        let mut re = Vec::with_capacity(v.len());
        let mut im = Vec::with_capacity(v.len());
        for c in v {
            re.push(c.re);
            im.push(c.im);
        }
        Self { re, im }
    }

    pub fn to_interleaved(&self) -> Vec<Complex<T>> {
        let mut out = Vec::with_capacity(self.re.len());
        for i in 0..self.re.len() {
            out.push(Complex::new(self.re[i], self.im[i]));
        }
        out
    }

    pub fn as_slices(&self) -> (&[T], &[T]) {
        (&self.re, &self.im)
    }

    pub fn as_mut_slices(&mut self) -> (&mut [T], &mut [T]) {
        (&mut self.re, &mut self.im)
    }
}

/// Copy paired real/imaginary slices into an interleaved complex buffer.
pub fn copy_from_split<T: Float>(re: &[T], im: &[T], out: &mut [Complex<T>]) {
    assert_eq!(re.len(), im.len());
    assert_eq!(re.len(), out.len());
    for i in 0..re.len() {
        out[i].re = re[i];
        out[i].im = im[i];
    }
}

/// Copy an interleaved complex buffer back out into paired slices.
pub fn copy_to_split<T: Float>(input: &[Complex<T>], re: &mut [T], im: &mut [T]) {
    assert_eq!(input.len(), re.len());
    assert_eq!(input.len(), im.len());
    for i in 0..input.len() {
        re[i] = input[i].re;
        im[i] = input[i].im;
    }
}
