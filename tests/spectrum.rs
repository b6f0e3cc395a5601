//! Natural vs. centered spectrum ordering.

use mixfft::{FftEngine, Spectrum};

#[test]
fn centering_puts_dc_in_the_middle_bin() {
    let n = 8;
    let mut engine = FftEngine::<f64>::new(n).unwrap();
    // Constant signal: all energy in DC.
    let spec = engine.fft_real(&[1.0; 8]).unwrap();
    let centered = spec.centered();
    assert!((centered.re()[n / 2] - 8.0).abs() < 1e-9);
    for k in (0..n).filter(|&k| k != n / 2) {
        assert!(centered.re()[k].abs() < 1e-9);
    }
}

#[test]
fn centering_twice_is_identity_for_even_lengths() {
    for n in [2usize, 6, 8, 16] {
        let re: Vec<f64> = (0..n).map(|i| i as f64 + 0.5).collect();
        let im: Vec<f64> = (0..n).map(|i| -(i as f64)).collect();
        let spec = Spectrum::from_parts(re.clone(), im.clone());
        let twice = Spectrum::new(spec.centered().into_split()).centered();
        assert_eq!(twice.re(), re.as_slice());
        assert_eq!(twice.im(), im.as_slice());
    }
}

#[test]
fn centering_twice_is_not_identity_for_odd_lengths() {
    // The two floor(n/2) shifts only add up to n-1, so the ordering
    // comes back rotated by one bin.
    let n = 7;
    let re: Vec<f64> = (0..n).map(|i| i as f64).collect();
    let im = vec![0.0f64; n];
    let spec = Spectrum::from_parts(re.clone(), im);
    let twice = Spectrum::new(spec.centered().into_split()).centered();
    assert_ne!(twice.re(), re.as_slice());
    // into_natural is the exact undo for any parity.
    let back = spec.centered().into_natural();
    assert_eq!(back.re(), re.as_slice());
}

#[test]
fn into_natural_roundtrips_for_every_length() {
    for n in 1usize..=9 {
        let re: Vec<f64> = (0..n).map(|i| (i * i) as f64).collect();
        let im: Vec<f64> = (0..n).map(|i| i as f64 - 1.0).collect();
        let spec = Spectrum::from_parts(re, im);
        assert_eq!(spec.centered().into_natural(), spec);
    }
}

#[test]
fn inverse_consumes_only_natural_order_spectra() {
    // A centered spectrum offers no route into ifft_split; rebuilding a
    // natural-order spectrum first is the only path and must roundtrip.
    let n = 10;
    let signal: Vec<f64> = (0..n).map(|i| (i as f64 * 0.9).sin()).collect();
    let mut engine = FftEngine::<f64>::new(n).unwrap();
    let spec = engine.fft_real(&signal).unwrap();
    let natural_again = spec.centered().into_natural();
    let back = engine.ifft_real(&natural_again).unwrap();
    for i in 0..n {
        assert!((back[i] - signal[i]).abs() < 1e-10);
    }
}
