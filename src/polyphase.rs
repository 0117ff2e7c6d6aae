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

/// Deinterleaves `src` into `dst`: even-indexed samples keep their relative
/// order in `dst[..⌈n/2⌉]`, odd-indexed samples follow in `dst[⌈n/2⌉..]`.
///
/// The split point adapts to the source parity, so this covers even- and
/// odd-length runs alike. Not in place; `dst` must be the same length.
pub(crate) fn gather(src: &[f64], dst: &mut [f64]) {
    debug_assert_eq!(src.len(), dst.len());
    let low_count = src.len().div_ceil(2);
    let (low, high) = dst.split_at_mut(low_count);
    for (dst, src) in low.iter_mut().zip(src.iter().step_by(2)) {
        *dst = *src;
    }
    for (dst, src) in high.iter_mut().zip(src.iter().skip(1).step_by(2)) {
        *dst = *src;
    }
}

/// Exact inverse of [`gather`]: `src[..⌈n/2⌉]` returns to even positions of
/// `dst`, `src[⌈n/2⌉..]` to odd positions.
pub(crate) fn scatter(src: &[f64], dst: &mut [f64]) {
    debug_assert_eq!(src.len(), dst.len());
    let low_count = src.len().div_ceil(2);
    let (low, high) = src.split_at(low_count);
    for (dst, src) in dst.iter_mut().step_by(2).zip(low.iter()) {
        *dst = *src;
    }
    for (dst, src) in dst.iter_mut().skip(1).step_by(2).zip(high.iter()) {
        *dst = *src;
    }
}
