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
use crate::progress::ProgressCounter;
use crate::saturate::SaturateToByte;
use crate::weights::SubsamplingTable;
use crate::workers::run_parallel;
use std::sync::atomic::{AtomicBool, Ordering};

const MAX_CHANNELS: usize = 4;

/// Every destination pixel belonging to one destination column, in
/// ascending row order, plus the column index itself (needed to look up the
/// matching slice of the intermediate buffer).
struct ColumnJob<'a> {
    x: usize,
    pixels: Vec<(usize, &'a mut [u8])>,
}

/// Column-striped vertical pass (C5): converts the intermediate buffer
/// (destination width, source height) into the final destination raster by
/// convolving each destination column against `table` along Y.
///
/// Workers partition destination columns by `x % worker_count`. The output
/// buffer is decomposed once into disjoint per-pixel slices and regrouped by
/// column before any thread is spawned, so each worker's columns never
/// alias another worker's and progress can be counted once per completed
/// column, as the contract requires.
pub(crate) fn run(
    intermediate: &[u8],
    table: &SubsamplingTable,
    output: &mut [u8],
    dst_width: usize,
    dst_height: usize,
    channels: usize,
    worker_count: usize,
    counter: &ProgressCounter,
    cancel: &AtomicBool,
) -> Result<(), ResampleError> {
    assert!(channels >= 1 && channels <= MAX_CHANNELS);
    assert_eq!(output.len(), dst_width * dst_height * channels);
    let intermediate_stride = dst_width * channels;
    assert_eq!(intermediate.len() % intermediate_stride, 0);

    let mut per_column: Vec<Vec<(usize, &mut [u8])>> =
        (0..dst_width).map(|_| Vec::with_capacity(dst_height)).collect();
    for (index, dst_px) in output.chunks_mut(channels).enumerate() {
        let x = index % dst_width;
        let y = index / dst_width;
        per_column[x].push((y, dst_px));
    }

    let mut jobs: Vec<Vec<ColumnJob>> = (0..worker_count).map(|_| Vec::new()).collect();
    for (x, pixels) in per_column.into_iter().enumerate() {
        jobs[x % worker_count].push(ColumnJob { x, pixels });
    }

    run_parallel(jobs, move |worker_columns| {
        for column in worker_columns {
            if cancel.load(Ordering::Relaxed) {
                return Err(ResampleError::Cancelled);
            }
            for (y, dst_px) in column.pixels {
                let (indices, weights) = table.contributors(y);
                let mut sum = [0f32; MAX_CHANNELS];
                for (&idx, &w) in indices.iter().zip(weights.iter()) {
                    let base = idx as usize * intermediate_stride + column.x * channels;
                    for c in 0..channels {
                        sum[c] += intermediate[base + c] as f32 * w;
                    }
                }
                for (c, out) in dst_px.iter_mut().enumerate() {
                    *out = sum[c].saturate_to_byte();
                }
            }
            counter.increment();
        }
        Ok(())
    })
}
