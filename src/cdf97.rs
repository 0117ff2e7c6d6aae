/*
 * // Copyright (c) Radzivon Bartoshyk 11/2025. All rights reserved.
 * //
 * // Redistribution and use in source and binary forms, with or without modification,
 * // are permitted provided that the following conditions are met:
 * //
 * // 1.  Redistributions of source code must retain the above copyright notice, this
 * // list of conditions and the following disclaimer.
 * //
 * // 2.  Redistributions in binary form must reproduce the above copyright notice,
 * // this list of conditions and the following disclaimer in the documentation
 * // and/or other materials provided with the distribution.
 * //
 * // 3.  Neither the name of the copyright holder nor the names of its
 * // contributors may be used to endorse or promote products derived from
 * // this software without specific prior written permission.
 * //
 * // THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * // AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * // IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * // DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * // FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * // DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * // SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * // CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * // OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * // OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
use crate::err::{VoxletError, try_vec};
use crate::levels::{approx_detail_len, num_of_partitions, num_of_xforms};
use crate::lifting::LiftWeights;
use crate::polyphase::{gather, scatter};
use log::{debug, trace};
use num_traits::AsPrimitive;

/// One analysis level on a contiguous run: lift a working copy in `scratch`,
/// then gather the interleaved result back into `[low | high]` order.
///
/// Runs shorter than 2 samples pass through untouched.
fn dwt1d_one_level(weights: &LiftWeights, run: &mut [f64], scratch: &mut [f64]) {
    let n = run.len();
    if n < 2 {
        return;
    }
    let scratch = &mut scratch[..n];
    scratch.copy_from_slice(run);
    if n.is_multiple_of(2) {
        weights.analyze_even(scratch);
    } else {
        weights.analyze_odd(scratch);
    }
    gather(scratch, run);
}

/// One synthesis level on a contiguous run: scatter `[low | high]` back into
/// interleaved order in `scratch`, lift it there, copy into the run.
fn idwt1d_one_level(weights: &LiftWeights, run: &mut [f64], scratch: &mut [f64]) {
    let n = run.len();
    if n < 2 {
        return;
    }
    let scratch = &mut scratch[..n];
    scatter(run, scratch);
    if n.is_multiple_of(2) {
        weights.synthesize_even(scratch);
    } else {
        weights.synthesize_odd(scratch);
    }
    run.copy_from_slice(scratch);
}

/// In-place multi-resolution CDF 9/7 transform engine for 1D, 2D and 3D
/// volumes of `f64` samples.
///
/// The engine owns one flat buffer laid out x-fastest (then y, then z) plus
/// the scratch space every pass needs, so repeated transforms allocate
/// nothing. A freshly constructed engine is empty; load it with
/// [`Cdf97::copy_data`] or [`Cdf97::take_data`], run any number of
/// forward/inverse passes, then read the coefficients through
/// [`Cdf97::view_data`] or reclaim the buffer with [`Cdf97::release_data`].
///
/// Forward and inverse calls of the same mode over the same shape
/// reconstruct the input to within `1e-10 · max(|x|, 1)` per sample.
///
/// An engine instance is single-threaded; distinct instances are
/// independent and may live on distinct threads.
pub struct Cdf97 {
    data: Vec<f64>,
    dims: [usize; 3],
    // Big enough for a gathered pencil plus one lifting working copy.
    lift_buf: Vec<f64>,
    // Transposed sub-planes for the wavelet-packet y/z passes; allocated on
    // first packet call.
    plane_buf: Vec<f64>,
    weights: LiftWeights,
}

impl Default for Cdf97 {
    fn default() -> Self {
        Self::new()
    }
}

impl Cdf97 {
    /// Creates an empty engine with no buffer loaded.
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            dims: [0; 3],
            lift_buf: Vec::new(),
            plane_buf: Vec::new(),
            weights: LiftWeights::new(),
        }
    }

    /// Loads a volume by copying and value-converting `src` into the owned
    /// `f64` buffer. Any previous buffer and transform state is discarded.
    ///
    /// Express 2D data as `[dx, dy, 1]` and 1D data as `[dx, 1, 1]`.
    ///
    /// # Errors
    /// [`VoxletError::WrongDims`] if `src.len() != dx·dy·dz`.
    pub fn copy_data<T>(&mut self, src: &[T], dims: [usize; 3]) -> Result<(), VoxletError>
    where
        T: AsPrimitive<f64>,
    {
        let expected = dims[0] * dims[1] * dims[2];
        if src.len() != expected {
            return Err(VoxletError::WrongDims(expected, src.len()));
        }
        trace!("ingest by copy: dims {dims:?}, {expected} samples");
        let mut data = try_vec![0f64; expected];
        for (dst, src) in data.iter_mut().zip(src.iter()) {
            *dst = src.as_();
        }
        self.data = data;
        self.dims = dims;
        self.reset_scratch()
    }

    /// Adopts a ready-made `f64` buffer without copying. Any previous buffer
    /// and transform state is discarded.
    ///
    /// # Errors
    /// [`VoxletError::WrongDims`] if `buf.len() != dx·dy·dz`.
    pub fn take_data(&mut self, buf: Vec<f64>, dims: [usize; 3]) -> Result<(), VoxletError> {
        let expected = dims[0] * dims[1] * dims[2];
        if buf.len() != expected {
            return Err(VoxletError::WrongDims(expected, buf.len()));
        }
        trace!("ingest by move: dims {dims:?}, {expected} samples");
        self.data = buf;
        self.dims = dims;
        self.reset_scratch()
    }

    /// Returns the current sample buffer (input data or coefficients,
    /// depending on which transforms ran).
    pub fn view_data(&self) -> &[f64] {
        &self.data
    }

    /// Hands the sample buffer back to the caller and clears the engine.
    pub fn release_data(&mut self) -> Vec<f64> {
        trace!("release: dims {:?}", self.dims);
        self.dims = [0; 3];
        self.lift_buf = Vec::new();
        self.plane_buf = Vec::new();
        std::mem::take(&mut self.data)
    }

    /// Returns the declared `[dx, dy, dz]`. In the 2D case the third value
    /// equals 1.
    pub fn get_dims(&self) -> [usize; 3] {
        self.dims
    }

    /// Forward multi-level 1D transform along x, in place.
    pub fn dwt1d(&mut self) {
        let num = num_of_xforms(self.dims[0]);
        debug!("forward 1d: dims {:?}, {num} levels", self.dims);
        for lev in 0..num {
            let [apx, _] = approx_detail_len(self.dims[0], lev);
            dwt1d_one_level(&self.weights, &mut self.data[..apx], &mut self.lift_buf);
        }
    }

    /// Inverse of [`Cdf97::dwt1d`].
    pub fn idwt1d(&mut self) {
        let num = num_of_xforms(self.dims[0]);
        debug!("inverse 1d: dims {:?}, {num} levels", self.dims);
        for lev in (0..num).rev() {
            let [apx, _] = approx_detail_len(self.dims[0], lev);
            idwt1d_one_level(&self.weights, &mut self.data[..apx], &mut self.lift_buf);
        }
    }

    /// Forward multi-level 2D transform on the `[dx, dy]` plane, in place.
    /// Every level transforms the shared low-pass corner along x then y.
    pub fn dwt2d(&mut self) {
        let num = num_of_xforms(self.dims[0]).min(num_of_xforms(self.dims[1]));
        debug!("forward 2d: dims {:?}, {num} levels", self.dims);
        for lev in 0..num {
            let lx = approx_detail_len(self.dims[0], lev)[0];
            let ly = approx_detail_len(self.dims[1], lev)[0];
            self.dwt2d_one_level([lx, ly]);
        }
    }

    /// Inverse of [`Cdf97::dwt2d`].
    pub fn idwt2d(&mut self) {
        let num = num_of_xforms(self.dims[0]).min(num_of_xforms(self.dims[1]));
        debug!("inverse 2d: dims {:?}, {num} levels", self.dims);
        for lev in (0..num).rev() {
            let lx = approx_detail_len(self.dims[0], lev)[0];
            let ly = approx_detail_len(self.dims[1], lev)[0];
            self.idwt2d_one_level([lx, ly]);
        }
    }

    /// Forward multi-level dyadic 3D transform, in place. Each level
    /// transforms the common low-pass corner along x, y and z; the schedule
    /// stops as soon as the shortest axis runs out of levels.
    pub fn dwt3d_dyadic(&mut self) {
        let num = num_of_xforms(self.dims[0])
            .min(num_of_xforms(self.dims[1]))
            .min(num_of_xforms(self.dims[2]));
        debug!("forward dyadic 3d: dims {:?}, {num} levels", self.dims);
        for lev in 0..num {
            self.dwt3d_one_level(self.corner_at(lev));
        }
    }

    /// Inverse of [`Cdf97::dwt3d_dyadic`].
    pub fn idwt3d_dyadic(&mut self) {
        let num = num_of_xforms(self.dims[0])
            .min(num_of_xforms(self.dims[1]))
            .min(num_of_xforms(self.dims[2]));
        debug!("inverse dyadic 3d: dims {:?}, {num} levels", self.dims);
        for lev in (0..num).rev() {
            self.idwt3d_one_level(self.corner_at(lev));
        }
    }

    /// Forward wavelet-packet 3D transform, in place. Levels run until
    /// every axis is down to a single sample; at each level only axes still
    /// longer than 1 participate.
    pub fn dwt3d_wavelet_packet(&mut self) {
        self.ensure_plane_buf();
        let num = self.packet_levels();
        debug!("forward packet 3d: dims {:?}, {num} levels", self.dims);
        let mut len = self.dims;
        for _ in 0..num {
            self.packet_forward_one_level(len);
            len = len.map(|l| l - l / 2);
        }
    }

    /// Inverse of [`Cdf97::dwt3d_wavelet_packet`].
    pub fn idwt3d_wavelet_packet(&mut self) {
        self.ensure_plane_buf();
        let num = self.packet_levels();
        debug!("inverse packet 3d: dims {:?}, {num} levels", self.dims);
        let mut schedule = Vec::with_capacity(num);
        let mut len = self.dims;
        for _ in 0..num {
            schedule.push(len);
            len = len.map(|l| l - l / 2);
        }
        for len in schedule.into_iter().rev() {
            self.packet_inverse_one_level(len);
        }
    }

    /// Low-pass corner lengths after `lev` dyadic levels.
    fn corner_at(&self, lev: usize) -> [usize; 3] {
        [
            approx_detail_len(self.dims[0], lev)[0],
            approx_detail_len(self.dims[1], lev)[0],
            approx_detail_len(self.dims[2], lev)[0],
        ]
    }

    fn packet_levels(&self) -> usize {
        num_of_partitions(self.dims[0])
            .max(num_of_partitions(self.dims[1]))
            .max(num_of_partitions(self.dims[2]))
    }

    fn reset_scratch(&mut self) -> Result<(), VoxletError> {
        let max_dim = self.dims.iter().copied().max().unwrap_or(0);
        self.lift_buf = try_vec![0f64; 2 * max_dim];
        self.plane_buf = Vec::new();
        Ok(())
    }

    fn ensure_plane_buf(&mut self) {
        let [dx, dy, dz] = self.dims;
        // Covers both transposed XY and XZ sub-planes.
        let need = dx * dy.max(dz);
        if self.plane_buf.len() < need {
            self.plane_buf.resize(need, 0.0);
        }
    }

    /// One 2D analysis level on the `[lx, ly]` corner of the leading plane:
    /// rows along x first, then columns along y.
    fn dwt2d_one_level(&mut self, len_xy: [usize; 2]) {
        let stride = self.dims[0];
        let [lx, ly] = len_xy;
        for y in 0..ly {
            let base = y * stride;
            dwt1d_one_level(&self.weights, &mut self.data[base..base + lx], &mut self.lift_buf);
        }
        for x in 0..lx {
            self.pencil_pass(x, stride, ly, true);
        }
    }

    /// One 2D synthesis level; columns along y first, then rows along x,
    /// the exact reverse of the analysis order.
    fn idwt2d_one_level(&mut self, len_xy: [usize; 2]) {
        let stride = self.dims[0];
        let [lx, ly] = len_xy;
        for x in 0..lx {
            self.pencil_pass(x, stride, ly, false);
        }
        for y in 0..ly {
            let base = y * stride;
            idwt1d_one_level(&self.weights, &mut self.data[base..base + lx], &mut self.lift_buf);
        }
    }

    /// One 3D analysis level on the `[lx, ly, lz]` corner: x rows in place,
    /// then y pencils, then z pencils.
    fn dwt3d_one_level(&mut self, len_xyz: [usize; 3]) {
        let [lx, ly, lz] = len_xyz;
        let [dx, dy, _] = self.dims;
        let plane = dx * dy;
        for z in 0..lz {
            for y in 0..ly {
                let base = z * plane + y * dx;
                dwt1d_one_level(&self.weights, &mut self.data[base..base + lx], &mut self.lift_buf);
            }
        }
        for z in 0..lz {
            for x in 0..lx {
                self.pencil_pass(z * plane + x, dx, ly, true);
            }
        }
        for y in 0..ly {
            for x in 0..lx {
                self.pencil_pass(y * dx + x, plane, lz, true);
            }
        }
    }

    /// One 3D synthesis level; axes run z, y, x, the exact reverse of the
    /// analysis order.
    fn idwt3d_one_level(&mut self, len_xyz: [usize; 3]) {
        let [lx, ly, lz] = len_xyz;
        let [dx, dy, _] = self.dims;
        let plane = dx * dy;
        for y in 0..ly {
            for x in 0..lx {
                self.pencil_pass(y * dx + x, plane, lz, false);
            }
        }
        for z in 0..lz {
            for x in 0..lx {
                self.pencil_pass(z * plane + x, dx, ly, false);
            }
        }
        for z in 0..lz {
            for y in 0..ly {
                let base = z * plane + y * dx;
                idwt1d_one_level(&self.weights, &mut self.data[base..base + lx], &mut self.lift_buf);
            }
        }
    }

    fn packet_forward_one_level(&mut self, len_xyz: [usize; 3]) {
        let [lx, ly, lz] = len_xyz;
        let [dx, dy, _] = self.dims;
        let plane = dx * dy;
        if lx > 1 {
            for z in 0..lz {
                for y in 0..ly {
                    let base = z * plane + y * dx;
                    dwt1d_one_level(
                        &self.weights,
                        &mut self.data[base..base + lx],
                        &mut self.lift_buf,
                    );
                }
            }
        }
        if ly > 1 {
            for z in 0..lz {
                self.plane_pass(z * plane, [lx, ly], dx, true);
            }
        }
        if lz > 1 {
            for y in 0..ly {
                self.plane_pass(y * dx, [lx, lz], plane, true);
            }
        }
    }

    fn packet_inverse_one_level(&mut self, len_xyz: [usize; 3]) {
        let [lx, ly, lz] = len_xyz;
        let [dx, dy, _] = self.dims;
        let plane = dx * dy;
        if lz > 1 {
            for y in 0..ly {
                self.plane_pass(y * dx, [lx, lz], plane, false);
            }
        }
        if ly > 1 {
            for z in 0..lz {
                self.plane_pass(z * plane, [lx, ly], dx, false);
            }
        }
        if lx > 1 {
            for z in 0..lz {
                for y in 0..ly {
                    let base = z * plane + y * dx;
                    idwt1d_one_level(
                        &self.weights,
                        &mut self.data[base..base + lx],
                        &mut self.lift_buf,
                    );
                }
            }
        }
    }

    /// Copies the pencil starting at `start` with element stride `stride`
    /// into contiguous scratch, runs one transform level on it, and writes
    /// it back.
    fn pencil_pass(&mut self, start: usize, stride: usize, count: usize, forward: bool) {
        if count < 2 {
            return;
        }
        let half = self.lift_buf.len() / 2;
        let (pencil, kernel_buf) = self.lift_buf.split_at_mut(half);
        let pencil = &mut pencil[..count];
        for (dst, idx) in pencil.iter_mut().zip((start..).step_by(stride)) {
            *dst = self.data[idx];
        }
        if forward {
            dwt1d_one_level(&self.weights, pencil, kernel_buf);
        } else {
            idwt1d_one_level(&self.weights, pencil, kernel_buf);
        }
        for (src, idx) in pencil.iter().zip((start..).step_by(stride)) {
            self.data[idx] = *src;
        }
    }

    /// Transposes the `len[0] × len[1]` sub-plane whose second axis has
    /// element stride `stride` into plane scratch so that axis becomes
    /// contiguous, transforms every run, and writes the plane back.
    fn plane_pass(&mut self, base: usize, len: [usize; 2], stride: usize, forward: bool) {
        let [lx, lp] = len;
        {
            let data = &self.data;
            let plane_buf = &mut self.plane_buf;
            for x in 0..lx {
                let run = &mut plane_buf[x * lp..(x + 1) * lp];
                for (dst, idx) in run.iter_mut().zip((base + x..).step_by(stride)) {
                    *dst = data[idx];
                }
            }
        }
        for x in 0..lx {
            let run = &mut self.plane_buf[x * lp..(x + 1) * lp];
            if forward {
                dwt1d_one_level(&self.weights, run, &mut self.lift_buf);
            } else {
                idwt1d_one_level(&self.weights, run, &mut self.lift_buf);
            }
        }
        for x in 0..lx {
            let run = &self.plane_buf[x * lp..(x + 1) * lp];
            for (src, idx) in run.iter().zip((base + x..).step_by(stride)) {
                self.data[idx] = *src;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(original: &[f64], restored: &[f64]) {
        original.iter().zip(restored.iter()).enumerate().for_each(|(idx, (o, re))| {
            let tol = 1e-10 * o.abs().max(1.0);
            assert!((o - re).abs() < tol, "Reconstruction difference should be less than {tol}, but it's not for original o {o}, restored {re} at idx {idx}");
        });
    }

    #[test]
    fn test_wrong_dims_on_copy() {
        let mut engine = Cdf97::new();
        let samples = vec![0f32; 12];
        assert_eq!(
            engine.copy_data(&samples, [4, 4, 1]),
            Err(VoxletError::WrongDims(16, 12))
        );
    }

    #[test]
    fn test_wrong_dims_on_take() {
        let mut engine = Cdf97::new();
        assert_eq!(
            engine.take_data(vec![0f64; 9], [2, 2, 2]),
            Err(VoxletError::WrongDims(8, 9))
        );
    }

    #[test]
    fn test_copy_data_converts_narrow_types() {
        let mut engine = Cdf97::new();
        engine.copy_data(&[1u8, 2, 3, 4], [4, 1, 1]).unwrap();
        assert_eq!(engine.view_data(), &[1.0, 2.0, 3.0, 4.0]);
        engine.copy_data(&[-1i32, 5, -7, 9], [2, 2, 1]).unwrap();
        assert_eq!(engine.view_data(), &[-1.0, 5.0, -7.0, 9.0]);
    }

    #[test]
    fn test_release_then_reuse() {
        let mut engine = Cdf97::new();
        engine.take_data(vec![3.5; 16], [16, 1, 1]).unwrap();
        engine.dwt1d();
        let coeffs = engine.release_data();
        assert_eq!(coeffs.len(), 16);
        assert_eq!(engine.get_dims(), [0, 0, 0]);
        assert!(engine.view_data().is_empty());

        engine.take_data(coeffs, [16, 1, 1]).unwrap();
        engine.idwt1d();
        assert_close(&vec![3.5; 16], engine.view_data());
    }

    #[test]
    fn test_1d_roundtrip_even() {
        let o_signal = (0..64).map(|i| (i as f64 * 0.31).cos() * 90.0).collect::<Vec<_>>();
        let mut engine = Cdf97::new();
        engine.take_data(o_signal.clone(), [64, 1, 1]).unwrap();
        engine.dwt1d();
        engine.idwt1d();
        assert_close(&o_signal, engine.view_data());
    }

    #[test]
    fn test_2d_roundtrip_odd_by_even() {
        let o_signal = (0..13 * 20)
            .map(|i| (i as f64 * 1.7).sin() * 40.0 + i as f64 * 0.1)
            .collect::<Vec<_>>();
        let mut engine = Cdf97::new();
        engine.take_data(o_signal.clone(), [13, 20, 1]).unwrap();
        engine.dwt2d();
        engine.idwt2d();
        assert_close(&o_signal, engine.view_data());
    }

    #[test]
    fn test_3d_dyadic_roundtrip() {
        let o_signal = (0..9 * 10 * 11)
            .map(|i| ((i * 31 % 97) as f64) - 48.0)
            .collect::<Vec<_>>();
        let mut engine = Cdf97::new();
        engine.take_data(o_signal.clone(), [9, 10, 11]).unwrap();
        engine.dwt3d_dyadic();
        engine.idwt3d_dyadic();
        assert_close(&o_signal, engine.view_data());
    }

    #[test]
    fn test_3d_packet_roundtrip() {
        let o_signal = (0..6 * 7 * 5)
            .map(|i| ((i * 53 % 101) as f64) * 0.7 - 30.0)
            .collect::<Vec<_>>();
        let mut engine = Cdf97::new();
        engine.take_data(o_signal.clone(), [6, 7, 5]).unwrap();
        engine.dwt3d_wavelet_packet();
        engine.idwt3d_wavelet_packet();
        assert_close(&o_signal, engine.view_data());
    }

    #[test]
    fn test_short_axes_are_inert() {
        // Below the 8-sample floor nothing is transformed at all.
        let o_signal = (0..7).map(|i| i as f64).collect::<Vec<_>>();
        let mut engine = Cdf97::new();
        engine.take_data(o_signal.clone(), [7, 1, 1]).unwrap();
        engine.dwt1d();
        assert_eq!(engine.view_data(), o_signal.as_slice());
    }
}
