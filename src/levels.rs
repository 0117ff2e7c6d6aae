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

/// Computes the number of dyadic decomposition levels performed on an axis
/// of length `len`.
///
/// An axis shorter than 8 samples is not transformed at all, and no axis is
/// ever transformed more than 6 times regardless of its length.
///
/// # Parameters
/// - `len`: Length of the axis.
///
/// # Returns
/// The number of one-level transforms applied along that axis.
#[inline]
pub fn num_of_xforms(len: usize) -> usize {
    if len < 8 {
        return 0;
    }
    let f = (len as f64 / 8.0).log2();
    (f as usize + 1).min(6)
}

/// Computes the number of wavelet-packet partitions an axis of length `len`
/// admits, i.e. how many times the low-pass prefix can be halved before a
/// single sample remains.
#[inline]
pub fn num_of_partitions(len: usize) -> usize {
    let mut len = len;
    let mut num_of_parts = 0usize;
    while len > 1 {
        num_of_parts += 1;
        len -= len / 2;
    }
    num_of_parts
}

/// Computes the low-pass and high-pass sub-band lengths along an axis of
/// original length `orig_len` after `lev` one-level transforms.
///
/// At each step the high-pass suffix takes `⌊a/2⌋` samples and the low-pass
/// prefix keeps the remaining `⌈a/2⌉`.
///
/// # Returns
/// `[low_len, high_len]` where `high_len` is the detail length produced by
/// the last of the `lev` steps (0 when `lev` is 0).
#[inline]
pub fn approx_detail_len(orig_len: usize, lev: usize) -> [usize; 2] {
    let mut low_len = orig_len;
    let mut high_len = 0usize;
    for _ in 0..lev {
        high_len = low_len / 2;
        low_len -= high_len;
    }
    [low_len, high_len]
}
