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

//! Parallel separable image resampling with a configurable reconstruction
//! filter (Lanczos-3 by default).
//!
//! [`Resampler`] drives a two-pass horizontal-then-vertical convolution of a
//! source raster into a destination raster of arbitrary size, striping work
//! across scoped worker threads. Decoding and encoding pixel formats (PNG,
//! JPEG, ...) is out of scope; callers bridge their own buffers through the
//! [`PixelAccessor`]/[`PixelWriter`] traits, or the [`ByteSliceAccessor`]/
//! [`ByteSliceWriter`] convenience wrappers when a flat interleaved byte
//! slice already matches a [`ChannelLayout`].

#![forbid(unsafe_code)]

mod error;
mod filter;
mod horizontal;
mod image_size;
mod progress;
mod raster;
mod resampler;
mod saturate;
mod vertical;
mod weights;
mod workers;

pub use error::ResampleError;
pub use filter::{BoxFilter, CatmullRom, Filter, Lanczos3, Mitchell, ResamplingFilter, Triangle};
pub use image_size::ImageSize;
pub use raster::{ByteSliceAccessor, ByteSliceWriter, ChannelLayout, PixelAccessor, PixelWriter};
pub use resampler::{Resampler, ResamplerOptions};
pub use workers::default_worker_count;
