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
use crate::raster::PixelAccessor;
use crate::saturate::SaturateToByte;
use crate::weights::SubsamplingTable;
use crate::workers::run_parallel;
use std::sync::atomic::{AtomicBool, Ordering};

const MAX_CHANNELS: usize = 4;

/// One source row's worth of work, owned by a single worker: the row index
/// and the disjoint destination-width slice of the intermediate buffer it
/// is responsible for filling.
struct RowJob<'a> {
    row: usize,
    dst_row: &'a mut [u8],
}

/// Row-striped horizontal pass (C4): converts the source raster into an
/// intermediate buffer at destination width by convolving each source row
/// against `table` along X.
///
/// Workers partition source rows by `row_index % worker_count`, so each
/// worker owns a disjoint set of rows of `intermediate` and no
/// synchronization beyond the final join is required.
pub(crate) fn run(
    source: &dyn PixelAccessor,
    table: &SubsamplingTable,
    intermediate: &mut [u8],
    dst_width: usize,
    channels: usize,
    worker_count: usize,
    counter: &ProgressCounter,
    cancel: &AtomicBool,
) -> Result<(), ResampleError> {
    assert!(channels >= 1 && channels <= MAX_CHANNELS);
    let src_height = source.height();
    let dst_stride = dst_width * channels;
    assert_eq!(intermediate.len(), src_height * dst_stride);

    let mut jobs: Vec<Vec<RowJob>> = (0..worker_count).map(|_| Vec::new()).collect();
    for (row, dst_row) in intermediate.chunks_mut(dst_stride).enumerate() {
        jobs[row % worker_count].push(RowJob { row, dst_row });
    }

    let src_width = source.width();
    let src_stride = src_width * channels;

    run_parallel(jobs, move |worker_jobs| {
        let mut scratch = vec![0u8; src_stride];
        for job in worker_jobs {
            if cancel.load(Ordering::Relaxed) {
                return Err(ResampleError::Cancelled);
            }
            source.read_row_interleaved(job.row, &mut scratch);
            convolve_row(&scratch, job.dst_row, table, channels);
            counter.increment();
        }
        Ok(())
    })
}

fn convolve_row(src_row: &[u8], dst_row: &mut [u8], table: &SubsamplingTable, channels: usize) {
    for (i, dst_px) in dst_row.chunks_mut(channels).enumerate() {
        let (indices, weights) = table.contributors(i);
        let mut sums = [0f32; MAX_CHANNELS];
        for (&idx, &w) in indices.iter().zip(weights.iter()) {
            let base = idx as usize * channels;
            for c in 0..channels {
                sums[c] += src_row[base + c] as f32 * w;
            }
        }
        for (c, out) in dst_px.iter_mut().enumerate() {
            *out = sums[c].saturate_to_byte();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Lanczos3;
    use crate::raster::{ByteSliceAccessor, ChannelLayout};

    #[test]
    fn identity_width_reproduces_source_rows() {
        let src_width = 8;
        let src_height = 4;
        let data: Vec<u8> = (0..(src_width * src_height * 3) as u32)
            .map(|v| (v % 256) as u8)
            .collect();
        let accessor = ByteSliceAccessor::new(&data, src_width, src_height, ChannelLayout::Bgr);
        let table = SubsamplingTable::build(&Lanczos3, src_width, src_width).unwrap();
        let mut intermediate = vec![0u8; src_width * src_height * 3];
        let counter = ProgressCounter::new((src_height + src_width) as u64);
        let cancel = AtomicBool::new(false);

        run(
            &accessor,
            &table,
            &mut intermediate,
            src_width,
            3,
            2,
            &counter,
            &cancel,
        )
        .unwrap();

        for (a, b) in data.iter().zip(intermediate.iter()) {
            assert!((*a as i32 - *b as i32).abs() <= 1);
        }
    }

    #[test]
    fn cancellation_is_surfaced() {
        let src_width = 32;
        let src_height = 32;
        let data = vec![10u8; src_width * src_height];
        let accessor = ByteSliceAccessor::new(&data, src_width, src_height, ChannelLayout::Gray);
        let table = SubsamplingTable::build(&Lanczos3, src_width, 16).unwrap();
        let mut intermediate = vec![0u8; 16 * src_height];
        let counter = ProgressCounter::new((src_height + 16) as u64);
        let cancel = AtomicBool::new(true);

        let result = run(
            &accessor,
            &table,
            &mut intermediate,
            16,
            1,
            4,
            &counter,
            &cancel,
        );
        assert!(matches!(result, Err(ResampleError::Cancelled)));
    }
}
