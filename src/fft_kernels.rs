//! Closed-form DFT kernels for the small radices the factorizer prefers,
//! plus a generic O(r²) fallback for prime radices.
//!
//! Each kernel computes a full DFT of its size in place over a gathered
//! group of samples. Twiddling between stages happens in the engine before
//! the kernel runs; the kernels themselves only use the fixed roots of
//! unity of their own size.

use crate::num::{Complex, Float};

#[inline(always)]
pub fn fft2<T: Float>(z: &mut [Complex<T>]) {
    debug_assert_eq!(z.len(), 2);
    let a = z[0];
    let b = z[1];
    z[0] = a.add(b);
    z[1] = a.sub(b);
}

#[inline(always)]
pub fn fft3<T: Float>(z: &mut [Complex<T>]) {
    debug_assert_eq!(z.len(), 3);
    // cos(2*pi/3), sin(2*pi/3)
    let c = T::from_f64(-0.5);
    let s = T::from_f64(0.866_025_403_784_438_6);
    let z0 = z[0];
    let t1 = z[1].add(z[2]);
    let t3 = z[1].sub(z[2]);
    let m = z0.add(t1.scale(c));
    let rot = t3.scale(s).mul_neg_i();
    z[0] = z0.add(t1);
    z[1] = m.add(rot);
    z[2] = m.sub(rot);
}

#[inline(always)]
pub fn fft4<T: Float>(z: &mut [Complex<T>]) {
    debug_assert_eq!(z.len(), 4);
    let even0 = z[0].add(z[2]);
    let even1 = z[0].sub(z[2]);
    let odd0 = z[1].add(z[3]);
    let odd1 = z[1].sub(z[3]);
    let t = odd1.mul_neg_i();
    z[0] = even0.add(odd0);
    z[2] = even0.sub(odd0);
    z[1] = even1.add(t);
    z[3] = even1.sub(t);
}

#[inline(always)]
pub fn fft5<T: Float>(z: &mut [Complex<T>]) {
    debug_assert_eq!(z.len(), 5);
    // cos/sin of 2*pi/5 and 4*pi/5
    let c1 = T::from_f64(0.309_016_994_374_947_45);
    let s1 = T::from_f64(0.951_056_516_295_153_5);
    let c2 = T::from_f64(-0.809_016_994_374_947_5);
    let s2 = T::from_f64(0.587_785_252_292_473_1);
    let z0 = z[0];
    let t1 = z[1].add(z[4]);
    let t2 = z[2].add(z[3]);
    let t3 = z[1].sub(z[4]);
    let t4 = z[2].sub(z[3]);
    let a = z0.add(t1.scale(c1)).add(t2.scale(c2));
    let b = t3.scale(s1).add(t4.scale(s2)).mul_neg_i();
    let c = z0.add(t1.scale(c2)).add(t2.scale(c1));
    let d = t3.scale(s2).sub(t4.scale(s1)).mul_neg_i();
    z[0] = z0.add(t1).add(t2);
    z[1] = a.add(b);
    z[4] = a.sub(b);
    z[2] = c.add(d);
    z[3] = c.sub(d);
}

/// Radix 8 as two interleaved radix-4 transforms. The cross terms only
/// need the one irrational constant sqrt(2)/2.
#[inline(always)]
pub fn fft8<T: Float>(z: &mut [Complex<T>]) {
    debug_assert_eq!(z.len(), 8);
    let s = T::from_f64(core::f64::consts::FRAC_1_SQRT_2);
    let mut even = [z[0], z[2], z[4], z[6]];
    let mut odd = [z[1], z[3], z[5], z[7]];
    fft4(&mut even);
    fft4(&mut odd);
    let t0 = odd[0];
    let t1 = odd[1].mul(Complex::new(s, -s));
    let t2 = odd[2].mul_neg_i();
    let t3 = odd[3].mul(Complex::new(-s, -s));
    z[0] = even[0].add(t0);
    z[4] = even[0].sub(t0);
    z[1] = even[1].add(t1);
    z[5] = even[1].sub(t1);
    z[2] = even[2].add(t2);
    z[6] = even[2].sub(t2);
    z[3] = even[3].add(t3);
    z[7] = even[3].sub(t3);
}

/// Radix 10 as two interleaved radix-5 transforms, mirroring [`fft8`].
#[inline(always)]
pub fn fft10<T: Float>(z: &mut [Complex<T>]) {
    debug_assert_eq!(z.len(), 10);
    // Tenth roots of unity reuse the fifth-root cos/sin values.
    let c1 = T::from_f64(0.809_016_994_374_947_5);
    let s1 = T::from_f64(0.587_785_252_292_473_1);
    let c2 = T::from_f64(0.309_016_994_374_947_45);
    let s2 = T::from_f64(0.951_056_516_295_153_5);
    let mut even = [z[0], z[2], z[4], z[6], z[8]];
    let mut odd = [z[1], z[3], z[5], z[7], z[9]];
    fft5(&mut even);
    fft5(&mut odd);
    let t0 = odd[0];
    let t1 = odd[1].mul(Complex::new(c1, -s1));
    let t2 = odd[2].mul(Complex::new(c2, -s2));
    let t3 = odd[3].mul(Complex::new(-c2, -s2));
    let t4 = odd[4].mul(Complex::new(-c1, -s1));
    z[0] = even[0].add(t0);
    z[5] = even[0].sub(t0);
    z[1] = even[1].add(t1);
    z[6] = even[1].sub(t1);
    z[2] = even[2].add(t2);
    z[7] = even[2].sub(t2);
    z[3] = even[3].add(t3);
    z[8] = even[3].sub(t3);
    z[4] = even[4].add(t4);
    z[9] = even[4].sub(t4);
}

/// Direct O(r²) DFT for radices without a closed-form kernel.
///
/// The unit-root table is rebuilt on every call into caller-provided
/// scratch, seeded from a single `sin_cos` evaluation and advanced by
/// complex multiplication. Only the leftover prime radix of a
/// factorization reaches this path, so the quadratic cost stays confined
/// to one stage.
pub fn fft_generic<T: Float>(
    z: &mut [Complex<T>],
    scratch: &mut [Complex<T>],
    roots: &mut [Complex<T>],
) {
    let r = z.len();
    debug_assert!(scratch.len() >= r);
    debug_assert!(roots.len() >= r);
    let w = Complex::expi(-(T::from_f32(2.0) * T::pi()) / T::from_usize(r).unwrap_or_else(|| T::from_f32(r as f32)));
    roots[0] = Complex::new(T::one(), T::zero());
    for j in 1..r {
        roots[j] = roots[j - 1].mul(w);
    }
    for (m, out) in scratch.iter_mut().enumerate().take(r) {
        let mut acc = z[0];
        let mut idx = 0usize;
        for &zq in z.iter().take(r).skip(1) {
            idx += m;
            if idx >= r {
                idx -= r;
            }
            acc = acc.add(zq.mul(roots[idx]));
        }
        *out = acc;
    }
    z.copy_from_slice(&scratch[..r]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::num::Complex64;
    use alloc::vec;
    use alloc::vec::Vec;

    fn naive_dft(input: &[Complex64]) -> Vec<Complex64> {
        let n = input.len();
        (0..n)
            .map(|k| {
                let mut acc = Complex64::zero();
                for (q, &x) in input.iter().enumerate() {
                    let angle = -2.0 * core::f64::consts::PI * (k * q) as f64 / n as f64;
                    acc = acc.add(x.mul(Complex64::expi(angle)));
                }
                acc
            })
            .collect()
    }

    fn sample(n: usize) -> Vec<Complex64> {
        (0..n)
            .map(|i| Complex64::new(i as f64 + 0.5, (n - i) as f64 - 2.0))
            .collect()
    }

    fn assert_close(a: &[Complex64], b: &[Complex64]) {
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x.re - y.re).abs() < 1e-5, "{:?} vs {:?}", x, y);
            assert!((x.im - y.im).abs() < 1e-5, "{:?} vs {:?}", x, y);
        }
    }

    #[test]
    fn closed_forms_match_naive_dft() {
        for n in [2usize, 3, 4, 5, 8, 10] {
            let mut z = sample(n);
            let expected = naive_dft(&z);
            match n {
                2 => fft2(&mut z),
                3 => fft3(&mut z),
                4 => fft4(&mut z),
                5 => fft5(&mut z),
                8 => fft8(&mut z),
                10 => fft10(&mut z),
                _ => unreachable!(),
            }
            assert_close(&z, &expected);
        }
    }

    #[test]
    fn generic_kernel_matches_naive_dft() {
        for n in [7usize, 11, 13] {
            let mut z = sample(n);
            let expected = naive_dft(&z);
            let mut scratch = vec![Complex64::zero(); n];
            let mut roots = vec![Complex64::zero(); n];
            fft_generic(&mut z, &mut scratch, &mut roots);
            assert_close(&z, &expected);
        }
    }
}
