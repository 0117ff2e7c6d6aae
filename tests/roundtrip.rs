use voxlet::{Cdf97, num_of_xforms};

fn assert_close(original: &[f64], restored: &[f64], tol_scale: f64) {
    assert_eq!(original.len(), restored.len());
    original
        .iter()
        .zip(restored.iter())
        .enumerate()
        .for_each(|(idx, (o, re))| {
            let tol = tol_scale * o.abs().max(1.0);
            assert!(
                (o - re).abs() < tol,
                "reconstruction error above {tol} at idx {idx}: original {o}, restored {re}"
            );
        });
}

#[test]
fn constant_signal_roundtrips_1d() {
    let o_signal = vec![1.0f64; 16];
    let mut engine = Cdf97::new();
    engine.take_data(o_signal.clone(), [16, 1, 1]).unwrap();
    engine.dwt1d();
    engine.idwt1d();
    assert_close(&o_signal, engine.view_data(), 1e-12);
}

#[test]
fn ramp_roundtrips_1d_odd_length() {
    let o_signal = (0..17).map(|i| i as f64).collect::<Vec<_>>();
    let mut engine = Cdf97::new();
    engine.take_data(o_signal.clone(), [17, 1, 1]).unwrap();
    engine.dwt1d();
    engine.idwt1d();
    assert_close(&o_signal, engine.view_data(), 1e-10);
}

#[test]
fn plane_8x8_subband_structure() {
    let plane = (0..8)
        .flat_map(|j| (0..8).map(move |i| (i + j) as f64))
        .collect::<Vec<_>>();
    let mut engine = Cdf97::new();
    engine.take_data(plane.clone(), [8, 8, 1]).unwrap();
    engine.dwt2d();

    // One level on an 8x8 plane: 4x4 low-pass corner plus three detail corners.
    let coeffs = engine.view_data();
    let corner_sum = |x0: usize, y0: usize| -> f64 {
        (0..4)
            .flat_map(|j| (0..4).map(move |i| (i, j)))
            .map(|(i, j)| coeffs[(y0 + j) * 8 + x0 + i])
            .sum()
    };
    let ll = corner_sum(0, 0);
    let hl = corner_sum(4, 0);
    let lh = corner_sum(0, 4);
    let hh = corner_sum(4, 4);
    assert!(
        ll / 16.0 > 1.0,
        "low-pass corner should keep the signal mass, mean was {}",
        ll / 16.0
    );
    for (name, sum) in [("hl", hl), ("lh", lh), ("hh", hh)] {
        assert!(
            sum.abs() < 0.05 * ll.abs(),
            "{name} detail corner sum {sum} should be small next to the low-pass mass {ll}"
        );
    }

    engine.idwt2d();
    assert_close(&plane, engine.view_data(), 1e-10);
}

#[test]
fn gaussian_bump_roundtrips_3d_dyadic() {
    let mut vol = Vec::with_capacity(16 * 16 * 16);
    for z in 0..16 {
        for y in 0..16 {
            for x in 0..16 {
                let r2 = (x as f64 - 7.5).powi(2)
                    + (y as f64 - 7.5).powi(2)
                    + (z as f64 - 7.5).powi(2);
                vol.push((-r2 / 20.0).exp() * 100.0);
            }
        }
    }
    assert_eq!(num_of_xforms(16), 2);
    let mut engine = Cdf97::new();
    engine.take_data(vol.clone(), [16, 16, 16]).unwrap();
    engine.dwt3d_dyadic();
    engine.idwt3d_dyadic();
    assert_close(&vol, engine.view_data(), 1e-10);
}

#[test]
fn arbitrary_volume_roundtrips_3d_packet() {
    // 5x3x2: odd lengths and a two-sample axis all hit distinct kernel paths.
    let vol = vec![
        17.25, -93.5, 4.75, 88.0, -12.125, 3.5, -77.25, 60.5, -5.0, 41.75, 9.125, -28.5, 73.0,
        -66.25, 19.5, 2.25, -48.75, 84.5, -31.0, 55.125, -8.25, 26.75, -91.5, 13.0, 70.25, -3.75,
        38.5, -59.0, 22.625, 96.25,
    ];
    let mut engine = Cdf97::new();
    engine.take_data(vol.clone(), [5, 3, 2]).unwrap();
    engine.dwt3d_wavelet_packet();
    engine.idwt3d_wavelet_packet();
    assert_close(&vol, engine.view_data(), 1e-10);
}

#[test]
fn length_3_axis_uses_odd_kernel_in_packet_mode() {
    let o_signal = vec![4.0, -9.0, 2.5];
    let mut engine = Cdf97::new();
    engine.take_data(o_signal.clone(), [3, 1, 1]).unwrap();

    // Below the 8-sample dyadic floor the 1D driver must not touch the data.
    engine.dwt1d();
    assert_eq!(engine.view_data(), o_signal.as_slice());

    // The packet schedule still decomposes it through the odd-length kernel.
    engine.dwt3d_wavelet_packet();
    assert!(
        engine
            .view_data()
            .iter()
            .zip(o_signal.iter())
            .any(|(a, b)| (a - b).abs() > 1e-6),
        "packet transform should have produced coefficients"
    );
    engine.idwt3d_wavelet_packet();
    assert_close(&o_signal, engine.view_data(), 1e-10);
}

#[test]
fn shape_and_length_survive_repeated_transforms() {
    let vol = (0..12 * 9 * 8)
        .map(|i| ((i * 37) % 113) as f64 - 56.0)
        .collect::<Vec<_>>();
    let mut engine = Cdf97::new();
    engine.take_data(vol.clone(), [12, 9, 8]).unwrap();
    for _ in 0..3 {
        engine.dwt3d_dyadic();
        assert_eq!(engine.get_dims(), [12, 9, 8]);
        assert_eq!(engine.view_data().len(), 12 * 9 * 8);
        engine.idwt3d_dyadic();
    }
    assert_close(&vol, engine.view_data(), 1e-10);
}

#[test]
fn short_axis_contributes_no_dyadic_levels() {
    // A 7-sample axis keeps a 20x7 plane completely inert under dwt2d.
    let plane = (0..20 * 7).map(|i| i as f64 * 0.5).collect::<Vec<_>>();
    let mut engine = Cdf97::new();
    engine.take_data(plane.clone(), [20, 7, 1]).unwrap();
    engine.dwt2d();
    assert_eq!(engine.view_data(), plane.as_slice());
}

#[test]
fn transform_is_linear() {
    let first = (0..16 * 16)
        .map(|i| (i as f64 * 0.13).sin() * 10.0)
        .collect::<Vec<_>>();
    let second = (0..16 * 16)
        .map(|i| (i as f64 * 0.29).cos() * 5.0)
        .collect::<Vec<_>>();
    let (a, b) = (2.0f64, -3.0f64);
    let mixed = first
        .iter()
        .zip(second.iter())
        .map(|(u, v)| a * u + b * v)
        .collect::<Vec<_>>();

    let transform = |signal: Vec<f64>| -> Vec<f64> {
        let mut engine = Cdf97::new();
        engine.take_data(signal, [16, 16, 1]).unwrap();
        engine.dwt2d();
        engine.release_data()
    };
    let first_coeffs = transform(first);
    let second_coeffs = transform(second);
    let mixed_coeffs = transform(mixed);
    let combined = first_coeffs
        .iter()
        .zip(second_coeffs.iter())
        .map(|(u, v)| a * u + b * v)
        .collect::<Vec<_>>();
    assert_close(&mixed_coeffs, &combined, 1e-10);
}

#[test]
fn constant_low_pass_gain_is_sqrt2_per_level() {
    let mut engine = Cdf97::new();
    engine.take_data(vec![3.0; 16], [16, 1, 1]).unwrap();
    engine.dwt1d();
    // Two levels on 16 samples: the 4-sample low-pass corner carries c * 2.
    let coeffs = engine.view_data();
    for (idx, v) in coeffs[..4].iter().enumerate() {
        assert!(
            (v - 6.0).abs() < 1e-10,
            "low-pass sample {idx} expected 6.0, got {v}"
        );
    }
    for (idx, v) in coeffs[4..].iter().enumerate() {
        assert!(
            v.abs() < 1e-10,
            "detail sample {idx} expected 0, got {v}"
        );
    }
}
