#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use voxlet::Cdf97;

#[derive(Arbitrary, Debug)]
struct Data {
    dx: u8,
    dy: u8,
    dz: u8,
}

fuzz_target!(|data: Data| {
    let dims = [data.dx as usize, data.dy as usize, data.dz as usize];
    if dims.iter().any(|&d| d == 0) {
        return;
    }
    if dims.iter().product::<usize>() > 1 << 16 {
        return;
    }
    let total = dims[0] * dims[1] * dims[2];
    let mut volume = vec![0.; total];
    for (i, dst) in volume.iter_mut().enumerate() {
        *dst = ((i * 2654435761) % 1031) as f64 - 515.0;
    }
    let mut engine = Cdf97::new();
    engine.take_data(volume.clone(), dims).unwrap();
    engine.dwt3d_wavelet_packet();
    engine.idwt3d_wavelet_packet();
    for (original, restored) in volume.iter().zip(engine.view_data()) {
        assert!(
            (original - restored).abs() < 1e-10 * original.abs().max(1.0),
            "roundtrip mismatch: {original} vs {restored}"
        );
    }
});
