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

/// CDF 9/7 filter bank taps from "Biorthogonal Bases of Compactly Supported
/// Wavelets", Cohen, Daubechies and Feauveau, p. 551.
const H: [f64; 5] = [
    0.602949018236,
    0.266864118443,
    -0.078223266529,
    -0.016864118443,
    0.026748757411,
];

/// Lifting factorization of the CDF 9/7 filter bank.
///
/// The four lifting coefficients and the scaling pair are derived once from
/// the `H` taps so every decomposition level runs with bit-identical
/// constants.
#[derive(Clone, Copy, Debug)]
pub(crate) struct LiftWeights {
    alpha: f64,
    beta: f64,
    gamma: f64,
    delta: f64,
    epsilon: f64,
    inv_epsilon: f64,
}

impl Default for LiftWeights {
    fn default() -> Self {
        Self::new()
    }
}

impl LiftWeights {
    pub(crate) fn new() -> Self {
        let r0 = H[0] - 2.0 * H[4] * H[1] / H[3];
        let r1 = H[2] - H[4] - H[4] * H[1] / H[3];
        let s0 = H[1] - H[3] - H[3] * r0 / r1;
        let t0 = H[0] - 2.0 * (H[2] - H[4]);
        let epsilon = std::f64::consts::SQRT_2 * t0;
        Self {
            alpha: H[4] / H[3],
            beta: H[3] / r1,
            gamma: r1 / s0,
            delta: s0 / t0,
            epsilon,
            inv_epsilon: 1.0 / epsilon,
        }
    }

    /// One level of forward lifting on an even-length signal.
    ///
    /// Low-pass output lands on even positions, high-pass on odd positions.
    /// Boundary terms reflect the signal about its first and last sample.
    pub(crate) fn analyze_even(&self, signal: &mut [f64]) {
        let n = signal.len();
        debug_assert!(n >= 2 && n.is_multiple_of(2));

        // Predict 1: odd += alpha * (even_left + even_right)
        for i in (1..n - 2).step_by(2) {
            signal[i] += self.alpha * (signal[i - 1] + signal[i + 1]);
        }
        signal[n - 1] += 2.0 * self.alpha * signal[n - 2];

        // Update 1: even += beta * (odd_left + odd_right)
        signal[0] += 2.0 * self.beta * signal[1];
        for i in (2..n).step_by(2) {
            signal[i] += self.beta * (signal[i - 1] + signal[i + 1]);
        }

        // Predict 2: odd += gamma * (even_left + even_right)
        for i in (1..n - 2).step_by(2) {
            signal[i] += self.gamma * (signal[i - 1] + signal[i + 1]);
        }
        signal[n - 1] += 2.0 * self.gamma * signal[n - 2];

        // Update 2 fused with the low-pass scale
        signal[0] = self.epsilon * (signal[0] + 2.0 * self.delta * signal[1]);
        for i in (2..n).step_by(2) {
            signal[i] = self.epsilon * (signal[i] + self.delta * (signal[i - 1] + signal[i + 1]));
        }

        // High-pass scale
        for i in (1..n).step_by(2) {
            signal[i] *= -self.inv_epsilon;
        }
    }

    /// One level of forward lifting on an odd-length signal; both ends of the
    /// stencil land on even positions, so the mirrored correction applies to
    /// the last even sample instead of the last odd one.
    pub(crate) fn analyze_odd(&self, signal: &mut [f64]) {
        let n = signal.len();
        debug_assert!(n >= 3 && !n.is_multiple_of(2));

        // Predict 1
        for i in (1..n - 1).step_by(2) {
            signal[i] += self.alpha * (signal[i - 1] + signal[i + 1]);
        }

        // Update 1
        signal[0] += 2.0 * self.beta * signal[1];
        for i in (2..n - 2).step_by(2) {
            signal[i] += self.beta * (signal[i - 1] + signal[i + 1]);
        }
        signal[n - 1] += 2.0 * self.beta * signal[n - 2];

        // Predict 2
        for i in (1..n - 1).step_by(2) {
            signal[i] += self.gamma * (signal[i - 1] + signal[i + 1]);
        }

        // Update 2 fused with the low-pass scale
        signal[0] = self.epsilon * (signal[0] + 2.0 * self.delta * signal[1]);
        for i in (2..n - 2).step_by(2) {
            signal[i] = self.epsilon * (signal[i] + self.delta * (signal[i - 1] + signal[i + 1]));
        }
        signal[n - 1] = self.epsilon * (signal[n - 1] + 2.0 * self.delta * signal[n - 2]);

        // High-pass scale
        for i in (1..n - 1).step_by(2) {
            signal[i] *= -self.inv_epsilon;
        }
    }

    /// Inverse of [`Self::analyze_even`]: unscale, then undo the lifting
    /// steps in reverse order with negated coefficients.
    pub(crate) fn synthesize_even(&self, signal: &mut [f64]) {
        let n = signal.len();
        debug_assert!(n >= 2 && n.is_multiple_of(2));

        for i in (1..n).step_by(2) {
            signal[i] *= -self.epsilon;
        }

        signal[0] = signal[0] * self.inv_epsilon - 2.0 * self.delta * signal[1];
        for i in (2..n).step_by(2) {
            signal[i] = signal[i] * self.inv_epsilon - self.delta * (signal[i - 1] + signal[i + 1]);
        }

        for i in (1..n - 2).step_by(2) {
            signal[i] -= self.gamma * (signal[i - 1] + signal[i + 1]);
        }
        signal[n - 1] -= 2.0 * self.gamma * signal[n - 2];

        signal[0] -= 2.0 * self.beta * signal[1];
        for i in (2..n).step_by(2) {
            signal[i] -= self.beta * (signal[i - 1] + signal[i + 1]);
        }

        for i in (1..n - 2).step_by(2) {
            signal[i] -= self.alpha * (signal[i - 1] + signal[i + 1]);
        }
        signal[n - 1] -= 2.0 * self.alpha * signal[n - 2];
    }

    /// Inverse of [`Self::analyze_odd`].
    pub(crate) fn synthesize_odd(&self, signal: &mut [f64]) {
        let n = signal.len();
        debug_assert!(n >= 3 && !n.is_multiple_of(2));

        for i in (1..n - 1).step_by(2) {
            signal[i] *= -self.epsilon;
        }

        signal[0] = signal[0] * self.inv_epsilon - 2.0 * self.delta * signal[1];
        for i in (2..n - 2).step_by(2) {
            signal[i] = signal[i] * self.inv_epsilon - self.delta * (signal[i - 1] + signal[i + 1]);
        }
        signal[n - 1] = signal[n - 1] * self.inv_epsilon - 2.0 * self.delta * signal[n - 2];

        for i in (1..n - 1).step_by(2) {
            signal[i] -= self.gamma * (signal[i - 1] + signal[i + 1]);
        }

        signal[0] -= 2.0 * self.beta * signal[1];
        for i in (2..n - 2).step_by(2) {
            signal[i] -= self.beta * (signal[i - 1] + signal[i + 1]);
        }
        signal[n - 1] -= 2.0 * self.beta * signal[n - 2];

        for i in (1..n - 1).step_by(2) {
            signal[i] -= self.alpha * (signal[i - 1] + signal[i + 1]);
        }
    }
}
