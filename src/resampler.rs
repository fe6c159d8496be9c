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
use crate::filter::{Filter, Lanczos3};
use crate::horizontal;
use crate::image_size::ImageSize;
use crate::progress::{run_sampler, ProgressCounter, StopSignal};
use crate::raster::{PixelAccessor, PixelWriter};
use crate::vertical;
use crate::workers::default_worker_count;
use std::sync::atomic::{AtomicBool, Ordering};

const MIN_DST_DIMENSION: usize = 3;

/// Configuration for a [`Resampler`]: the reconstruction filter and the
/// degree of parallelism to use.
pub struct ResamplerOptions {
    /// Separable kernel applied independently on each axis. Defaults to
    /// [`Lanczos3`].
    pub filter: Box<dyn Filter>,
    /// Number of scoped worker threads per pass. `None` uses
    /// [`default_worker_count`], the host's reported parallelism.
    pub worker_count: Option<usize>,
}

impl Default for ResamplerOptions {
    fn default() -> ResamplerOptions {
        ResamplerOptions {
            filter: Box::new(Lanczos3),
            worker_count: None,
        }
    }
}

impl ResamplerOptions {
    fn resolved_worker_count(&self) -> usize {
        self.worker_count.unwrap_or_else(default_worker_count).max(1)
    }
}

/// Drives a two-pass separable resample: a horizontal pass into an
/// intermediate buffer at destination width, then a vertical pass into the
/// final destination raster.
///
/// A single `Resampler` is not reentrant: calling `resample*` while another
/// call on the same instance is in flight returns
/// [`ResampleError::ConcurrentInvocation`] rather than corrupting shared
/// state. Independent `Resampler`s (or calls from different threads against
/// different instances) run fully in parallel.
pub struct Resampler {
    options: ResamplerOptions,
    busy: AtomicBool,
    cancel: AtomicBool,
}

/// Releases the reentrancy guard on every exit path, including early
/// `?`-propagated errors and panics unwinding through `resample`.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Resampler {
    pub fn new(options: ResamplerOptions) -> Resampler {
        Resampler {
            options,
            busy: AtomicBool::new(false),
            cancel: AtomicBool::new(false),
        }
    }

    /// Requests cancellation of a resample currently in flight on this
    /// instance. Has no effect if none is running. The in-flight call
    /// observes this at row/column granularity and returns
    /// [`ResampleError::Cancelled`].
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    /// Resamples `source` to `dst_size`, returning a freshly allocated
    /// interleaved byte buffer in `source`'s channel layout.
    pub fn resample(
        &self,
        source: &dyn PixelAccessor,
        dst_size: ImageSize,
        progress_listener: Option<&(dyn Fn(f32) + Sync)>,
    ) -> Result<Vec<u8>, ResampleError> {
        let channels = source.layout().channels();
        let mut output = vec![0u8; dst_size.width * dst_size.height * channels];
        self.resample_into_slice(source, &mut output, dst_size, progress_listener)?;
        Ok(output)
    }

    /// Resamples `source` directly into `destination`, whose reported
    /// width/height become the destination size. `destination`'s layout
    /// must match `source`'s.
    pub fn resample_into(
        &self,
        source: &dyn PixelAccessor,
        destination: &mut dyn PixelWriter,
        progress_listener: Option<&(dyn Fn(f32) + Sync)>,
    ) -> Result<(), ResampleError> {
        if destination.layout() != source.layout() {
            return Err(ResampleError::InvalidArgument(
                "destination channel layout must match source".to_string(),
            ));
        }
        let dst_size = ImageSize::new(destination.width(), destination.height());
        let channels = source.layout().channels();
        let mut output = vec![0u8; dst_size.width * dst_size.height * channels];
        self.resample_into_slice(source, &mut output, dst_size, progress_listener)?;
        let stride = dst_size.width * channels;
        for row in 0..dst_size.height {
            destination.write_row_interleaved(row, &output[row * stride..(row + 1) * stride]);
        }
        Ok(())
    }

    /// Resamples `source` by a uniform-or-nonuniform scale factor, rounding
    /// the resulting dimensions half-up. Returns the buffer alongside the
    /// size actually produced.
    pub fn resample_by_scale(
        &self,
        source: &dyn PixelAccessor,
        scale_x: f64,
        scale_y: f64,
        progress_listener: Option<&(dyn Fn(f32) + Sync)>,
    ) -> Result<(Vec<u8>, ImageSize), ResampleError> {
        if !(scale_x > 0.0 && scale_y > 0.0 && scale_x.is_finite() && scale_y.is_finite()) {
            return Err(ResampleError::InvalidArgument(
                "scale factors must be finite and positive".to_string(),
            ));
        }
        let src_size = ImageSize::new(source.width(), source.height());
        let dst_size = src_size.scaled(scale_x, scale_y);
        let output = self.resample(source, dst_size, progress_listener)?;
        Ok((output, dst_size))
    }

    fn resample_into_slice(
        &self,
        source: &dyn PixelAccessor,
        output: &mut [u8],
        dst_size: ImageSize,
        progress_listener: Option<&(dyn Fn(f32) + Sync)>,
    ) -> Result<(), ResampleError> {
        let src_width = source.width();
        let src_height = source.height();
        if src_width == 0 || src_height == 0 {
            return Err(ResampleError::InvalidArgument(
                "source dimensions must be nonzero".to_string(),
            ));
        }
        if dst_size.width < MIN_DST_DIMENSION || dst_size.height < MIN_DST_DIMENSION {
            return Err(ResampleError::InvalidArgument(format!(
                "destination must be at least {MIN_DST_DIMENSION}x{MIN_DST_DIMENSION}"
            )));
        }
        let channels = source.layout().channels();
        if output.len() != dst_size.width * dst_size.height * channels {
            return Err(ResampleError::InvalidArgument(
                "destination buffer length does not match width * height * channels".to_string(),
            ));
        }

        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(ResampleError::ConcurrentInvocation);
        }
        let _guard = BusyGuard(&self.busy);
        self.cancel.store(false, Ordering::Relaxed);

        let worker_count = self.options.resolved_worker_count();
        log::debug!(
            "resampling {src_width}x{src_height} -> {}x{} ({channels} channels, {worker_count} workers)",
            dst_size.width,
            dst_size.height
        );

        let horizontal_table =
            crate::weights::SubsamplingTable::build(self.options.filter.as_ref(), src_width, dst_size.width)?;
        let vertical_table =
            crate::weights::SubsamplingTable::build(self.options.filter.as_ref(), src_height, dst_size.height)?;

        let mut intermediate = vec![0u8; dst_size.width * src_height * channels];
        let counter = ProgressCounter::new((src_height + dst_size.width) as u64);
        let stop = StopSignal::new();

        let pass_result: Result<(), ResampleError> = std::thread::scope(|scope| {
            let sampler_handle = progress_listener.map(|listener| {
                scope.spawn(move || {
                    run_sampler(&counter, &stop, listener);
                })
            });

            let result = horizontal::run(
                source,
                &horizontal_table,
                &mut intermediate,
                dst_size.width,
                channels,
                worker_count,
                &counter,
                &self.cancel,
            )
            .and_then(|_| {
                log::debug!("horizontal pass complete");
                vertical::run(
                    &intermediate,
                    &vertical_table,
                    output,
                    dst_size.width,
                    dst_size.height,
                    channels,
                    worker_count,
                    &counter,
                    &self.cancel,
                )
            });

            stop.signal();
            if let Some(handle) = sampler_handle {
                handle.join().unwrap_or_else(|_| {
                    log::warn!("progress sampler thread panicked");
                });
            }
            result
        });

        match &pass_result {
            Ok(()) => {
                if let Some(listener) = progress_listener {
                    crate::progress::notify_safely(listener, 1.0);
                }
                log::debug!("resample complete");
            }
            Err(ResampleError::Cancelled) => log::debug!("resample cancelled"),
            Err(err) => log::error!("resample failed: {err}"),
        }
        pass_result
    }
}
