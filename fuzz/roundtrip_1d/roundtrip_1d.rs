#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use voxlet::Cdf97;

#[derive(Arbitrary, Debug)]
struct Data {
    length: u16,
}

fuzz_target!(|data: Data| {
    let length = data.length as usize;
    if length == 0 {
        return;
    }
    let mut signal = vec![0.; length];
    for (i, dst) in signal.iter_mut().enumerate() {
        *dst = i as f64 / length as f64;
    }
    let mut engine = Cdf97::new();
    engine.take_data(signal.clone(), [length, 1, 1]).unwrap();
    engine.dwt1d();
    engine.idwt1d();
    for (original, restored) in signal.iter().zip(engine.view_data()) {
        assert!(
            (original - restored).abs() < 1e-10 * original.abs().max(1.0),
            "roundtrip mismatch: {original} vs {restored}"
        );
    }
});
