/*
 * Copyright (c) Radzivon Bartoshyk, 10/2024. All rights reserved.
 *
 * Redistribution and use in source and binary forms, with or without modification,
 * are permitted provided that the following conditions are met:
 *
 * 1.  Redistributions of source code must retain the above copyright notice, this
 * list of conditions and the following disclaimer.
 *
 * 2.  Redistributions in binary form must reproduce the above copyright notice,
 * this list of conditions and the following disclaimer in the documentation
 * and/or other materials provided with the distribution.
 *
 * 3.  Neither the name of the copyright holder nor the names of its
 * contributors may be used to endorse or promote products derived from
 * this software without specific prior written permission.
 *
 * THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
use std::f32::consts::PI;

/// A separable reconstruction kernel.
///
/// Implementations must be pure, symmetric around zero, and return `0.0` for
/// any `x` outside `[-sampling_radius(), sampling_radius()]`. A `Filter` is
/// shared read-only across every worker thread of a resample, so it must be
/// `Sync`.
pub trait Filter: Sync {
    /// Support half-width. Samples farther than this from the destination
    /// center contribute nothing.
    fn sampling_radius(&self) -> f32;

    /// Kernel value at offset `x`.
    fn apply(&self, x: f32) -> f32;
}

#[inline(always)]
fn sinc(x: f32) -> f32 {
    if x == 0.0 {
        1.0
    } else {
        let px = PI * x;
        px.sin() / px
    }
}

/// Lanczos windowed sinc, support radius 3. The default reconstruction
/// filter for [`crate::Resampler`].
#[derive(Debug, Copy, Clone, Default)]
pub struct Lanczos3;

impl Filter for Lanczos3 {
    #[inline(always)]
    fn sampling_radius(&self) -> f32 {
        3.0
    }

    #[inline(always)]
    fn apply(&self, x: f32) -> f32 {
        if x.abs() >= 3.0 {
            0.0
        } else {
            sinc(x) * sinc(x / 3.0)
        }
    }
}

/// Bilinear tent filter, support radius 1.
#[derive(Debug, Copy, Clone, Default)]
pub struct Triangle;

impl Filter for Triangle {
    #[inline(always)]
    fn sampling_radius(&self) -> f32 {
        1.0
    }

    #[inline(always)]
    fn apply(&self, x: f32) -> f32 {
        (1.0 - x.abs()).max(0.0)
    }
}

/// Nearest-style box filter, support radius 0.5.
#[derive(Debug, Copy, Clone, Default)]
pub struct BoxFilter;

impl Filter for BoxFilter {
    #[inline(always)]
    fn sampling_radius(&self) -> f32 {
        0.5
    }

    #[inline(always)]
    fn apply(&self, x: f32) -> f32 {
        if x.abs() <= 0.5 {
            1.0
        } else {
            0.0
        }
    }
}

/// Cubic convolution filter with free parameters `b`/`c`, support radius 2.
/// See Mitchell & Netravali, "Reconstruction Filters in Computer Graphics".
#[inline(always)]
fn cubic_bc(x: f32, b: f32, c: f32) -> f32 {
    let x = x.abs();
    let x2 = x * x;
    let x3 = x2 * x;
    if x < 1.0 {
        ((12.0 - 9.0 * b - 6.0 * c) * x3
            + (-18.0 + 12.0 * b + 6.0 * c) * x2
            + (6.0 - 2.0 * b))
            / 6.0
    } else if x < 2.0 {
        ((-b - 6.0 * c) * x3
            + (6.0 * b + 30.0 * c) * x2
            + (-12.0 * b - 48.0 * c) * x
            + (8.0 * b + 24.0 * c))
            / 6.0
    } else {
        0.0
    }
}

/// Mitchell-Netravali cubic, `B = C = 1/3`.
#[derive(Debug, Copy, Clone, Default)]
pub struct Mitchell;

impl Filter for Mitchell {
    #[inline(always)]
    fn sampling_radius(&self) -> f32 {
        2.0
    }

    #[inline(always)]
    fn apply(&self, x: f32) -> f32 {
        cubic_bc(x, 1.0 / 3.0, 1.0 / 3.0)
    }
}

/// Catmull-Rom cubic spline, `B = 0, C = 1/2`.
#[derive(Debug, Copy, Clone, Default)]
pub struct CatmullRom;

impl Filter for CatmullRom {
    #[inline(always)]
    fn sampling_radius(&self) -> f32 {
        2.0
    }

    #[inline(always)]
    fn apply(&self, x: f32) -> f32 {
        cubic_bc(x, 0.0, 0.5)
    }
}

/// Catalog of the canonical filters this crate ships out of the box.
/// Custom kernels are equally supported by implementing [`Filter`] directly;
/// this enum exists purely for the common case of picking one by name.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum ResamplingFilter {
    #[default]
    Lanczos3,
    Triangle,
    Mitchell,
    CatmullRom,
    BoxFilter,
}

impl Filter for ResamplingFilter {
    fn sampling_radius(&self) -> f32 {
        match self {
            ResamplingFilter::Lanczos3 => Lanczos3.sampling_radius(),
            ResamplingFilter::Triangle => Triangle.sampling_radius(),
            ResamplingFilter::Mitchell => Mitchell.sampling_radius(),
            ResamplingFilter::CatmullRom => CatmullRom.sampling_radius(),
            ResamplingFilter::BoxFilter => BoxFilter.sampling_radius(),
        }
    }

    fn apply(&self, x: f32) -> f32 {
        match self {
            ResamplingFilter::Lanczos3 => Lanczos3.apply(x),
            ResamplingFilter::Triangle => Triangle.apply(x),
            ResamplingFilter::Mitchell => Mitchell.apply(x),
            ResamplingFilter::CatmullRom => CatmullRom.apply(x),
            ResamplingFilter::BoxFilter => BoxFilter.apply(x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lanczos3_is_symmetric_and_bounded() {
        let f = Lanczos3;
        assert_eq!(f.apply(0.0), 1.0);
        for i in 0..300 {
            let x = i as f32 * 0.02;
            assert!((f.apply(x) - f.apply(-x)).abs() < 1e-6);
        }
        assert_eq!(f.apply(3.0), 0.0);
        assert_eq!(f.apply(4.0), 0.0);
    }

    #[test]
    fn triangle_is_a_tent() {
        let f = Triangle;
        assert_eq!(f.apply(0.0), 1.0);
        assert_eq!(f.apply(1.0), 0.0);
        assert!((f.apply(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn cubic_filters_are_unity_at_origin() {
        assert!((Mitchell.apply(0.0) - 1.0).abs() < 1e-5);
        assert!((CatmullRom.apply(0.0) - 1.0).abs() < 1e-5);
        assert_eq!(Mitchell.apply(2.0), 0.0);
        assert_eq!(CatmullRom.apply(2.0), 0.0);
    }

    #[test]
    fn resampling_filter_enum_matches_struct_impls() {
        let x = 0.37;
        assert_eq!(
            ResamplingFilter::Lanczos3.apply(x),
            Lanczos3.apply(x)
        );
        assert_eq!(ResamplingFilter::default(), ResamplingFilter::Lanczos3);
    }
}
