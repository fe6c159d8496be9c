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
use crate::error::ResampleError;
use crate::filter::Filter;

/// Per-axis contribution table: for every destination sample, which source
/// samples feed it and with what normalized weight.
///
/// Immutable once built and shared by reference across every worker of a
/// pass, mirroring how the teacher crate's filter-weight tables are built
/// once and then read concurrently by every row/column handler.
#[derive(Debug, Clone)]
pub struct SubsamplingTable {
    /// Upper bound on the number of contributors for any destination sample
    /// on this axis; also the row stride of `pick_pixels`/`weights`.
    pub num_contributors: usize,
    /// Actual contributor count used by each destination sample, `<= num_contributors`.
    pub contributions_per_pixel: Vec<u32>,
    /// Flattened source indices, row-major by destination sample.
    pub pick_pixels: Vec<u32>,
    /// Flattened weights, parallel to `pick_pixels`.
    pub weights: Vec<f32>,
}

impl SubsamplingTable {
    /// Valid `(pick_pixels, weights)` slice for destination sample `p`.
    #[inline]
    pub fn contributors(&self, p: usize) -> (&[u32], &[f32]) {
        let base = p * self.num_contributors;
        let n = self.contributions_per_pixel[p] as usize;
        (&self.pick_pixels[base..base + n], &self.weights[base..base + n])
    }

    /// Builds the subsampling table for resampling one axis from `src_size`
    /// to `dst_size` samples under `filter`.
    ///
    /// Downsampling stretches the filter's support so that every destination
    /// sample still integrates enough source energy to avoid aliasing;
    /// upsampling uses the filter at its native width. See `SPEC_FULL.md`
    /// §4.1 for the derivation of `filter_size`/`num_contributors`.
    pub fn build(
        filter: &dyn Filter,
        src_size: usize,
        dst_size: usize,
    ) -> Result<SubsamplingTable, ResampleError> {
        if src_size == 0 {
            return Err(ResampleError::InvalidArgument(
                "source size must be nonzero".to_string(),
            ));
        }
        if dst_size == 0 {
            return Err(ResampleError::InvalidArgument(
                "destination size must be nonzero".to_string(),
            ));
        }

        let scale = dst_size as f64 / src_size as f64;
        let raw_radius = filter.sampling_radius() as f64;

        let (filter_size, filter_normalization, excess_contributors) = if scale < 1.0 {
            let filter_size = raw_radius / scale;
            let filter_normalization = raw_radius / filter_size.ceil();
            (filter_size, filter_normalization, 2usize)
        } else {
            (raw_radius, 1.0, 1usize)
        };

        let num_contributors = (filter_size * 2.0 + excess_contributors as f64).floor() as usize;
        let num_contributors = num_contributors.max(1);

        let mut pick_pixels = vec![0u32; dst_size * num_contributors];
        let mut weights = vec![0f32; dst_size * num_contributors];
        let mut contributions_per_pixel = vec![0u32; dst_size];

        for p in 0..dst_size {
            let center = (p as f64 + 0.5) / scale;
            let lo = (center - filter_size).floor() as i64;
            let hi = (center + filter_size + 1.0).floor() as i64;

            let base = p * num_contributors;
            let mut count = 0usize;
            let mut raw_sum = 0f64;

            let mut s = lo;
            while s <= hi {
                let w = filter.apply(((center - s as f64) * filter_normalization) as f32) as f64;
                if w != 0.0 {
                    let idx = if s < 0 {
                        -s
                    } else if s >= src_size as i64 {
                        2 * src_size as i64 - s - 1
                    } else {
                        s
                    };
                    debug_assert!(
                        idx >= 0 && (idx as usize) < src_size,
                        "mirror-reflected index out of range"
                    );
                    let idx = idx.clamp(0, src_size as i64 - 1) as u32;

                    if count >= num_contributors {
                        break;
                    }
                    pick_pixels[base + count] = idx;
                    weights[base + count] = w as f32;
                    count += 1;
                    raw_sum += w;
                }
                s += 1;
            }

            if raw_sum != 0.0 {
                let recip = (1.0 / raw_sum) as f32;
                for w in &mut weights[base..base + count] {
                    *w *= recip;
                }
            }

            contributions_per_pixel[p] = count as u32;
        }

        Ok(SubsamplingTable {
            num_contributors,
            contributions_per_pixel,
            pick_pixels,
            weights,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Lanczos3;

    fn check_normalized(table: &SubsamplingTable, src_size: usize) {
        let dst_size = table.contributions_per_pixel.len();
        for p in 0..dst_size {
            let (idx, w) = table.contributors(p);
            assert!(idx.len() <= table.num_contributors);
            let sum: f32 = w.iter().sum();
            if !w.is_empty() {
                assert!(
                    (sum - 1.0).abs() < 1e-5,
                    "row {p} weight sum {sum} not normalized"
                );
            }
            for &i in idx {
                assert!((i as usize) < src_size, "index {i} out of range for src {src_size}");
            }
        }
    }

    #[test]
    fn rejects_zero_sized_axes() {
        assert!(SubsamplingTable::build(&Lanczos3, 0, 10).is_err());
        assert!(SubsamplingTable::build(&Lanczos3, 10, 0).is_err());
    }

    #[test]
    fn identity_resize_is_one_to_one() {
        let table = SubsamplingTable::build(&Lanczos3, 16, 16).unwrap();
        for p in 0..16 {
            let (idx, w) = table.contributors(p);
            let sum: f32 = w.iter().sum();
            assert!((sum - 1.0).abs() < 1e-5);
            // The dominant contributor for an identity map is the pixel itself.
            let (best, _) = idx
                .iter()
                .zip(w.iter())
                .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
                .unwrap();
            assert_eq!(*best as usize, p);
        }
    }

    #[test]
    fn upscale_and_downscale_tables_are_normalized() {
        check_normalized(&SubsamplingTable::build(&Lanczos3, 8, 16).unwrap(), 8);
        check_normalized(&SubsamplingTable::build(&Lanczos3, 400, 200).unwrap(), 400);
        check_normalized(&SubsamplingTable::build(&Lanczos3, 64, 128).unwrap(), 64);
    }

    #[test]
    fn contributions_never_exceed_num_contributors() {
        let table = SubsamplingTable::build(&Lanczos3, 400, 37).unwrap();
        for &n in &table.contributions_per_pixel {
            assert!((n as usize) <= table.num_contributors);
        }
    }
}
