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

/// Interleaved channel order used throughout the core. Decoding/encoding
/// into these layouts from e.g. PNG/JPEG pixel formats is the caller's job
/// (out of scope for this crate); the core only ever reads and writes bytes
/// in one of these three fixed orders.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ChannelLayout {
    /// Single luminance channel.
    Gray,
    /// Blue, Green, Red, low to high address.
    Bgr,
    /// Alpha, Blue, Green, Red, low to high address.
    ///
    /// Alpha is filtered exactly like any other channel (not
    /// premultiplied-alpha-aware). Premultiply before resampling if that
    /// matters for your content.
    Abgr,
}

impl ChannelLayout {
    #[inline]
    pub fn channels(&self) -> usize {
        match self {
            ChannelLayout::Gray => 1,
            ChannelLayout::Bgr => 3,
            ChannelLayout::Abgr => 4,
        }
    }
}

/// Read side of the pixel abstraction the core resamples through.
///
/// `read_row_interleaved` must fill `out` (length `width() * channels()`)
/// with one scanline's worth of interleaved channel bytes in `layout()`
/// order.
pub trait PixelAccessor: Sync {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn layout(&self) -> ChannelLayout;
    fn read_row_interleaved(&self, row: usize, out: &mut [u8]);
}

/// Write side of the pixel abstraction the core writes the final raster
/// through.
pub trait PixelWriter: Send {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn layout(&self) -> ChannelLayout;
    fn write_row_interleaved(&mut self, row: usize, data: &[u8]);
}

/// [`PixelAccessor`] over a flat, already-interleaved byte slice. Covers the
/// common case of resampling a buffer that is already laid out the way the
/// core expects, without requiring callers to implement the trait.
#[derive(Debug, Clone, Copy)]
pub struct ByteSliceAccessor<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    layout: ChannelLayout,
}

impl<'a> ByteSliceAccessor<'a> {
    pub fn new(
        data: &'a [u8],
        width: usize,
        height: usize,
        layout: ChannelLayout,
    ) -> ByteSliceAccessor<'a> {
        assert_eq!(
            data.len(),
            width * height * layout.channels(),
            "byte slice length must match width * height * channels"
        );
        ByteSliceAccessor {
            data,
            width,
            height,
            layout,
        }
    }
}

impl PixelAccessor for ByteSliceAccessor<'_> {
    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn layout(&self) -> ChannelLayout {
        self.layout
    }

    fn read_row_interleaved(&self, row: usize, out: &mut [u8]) {
        let stride = self.width * self.layout.channels();
        let start = row * stride;
        out[..stride].copy_from_slice(&self.data[start..start + stride]);
    }
}

/// [`PixelWriter`] over a flat, caller-owned mutable byte slice.
pub struct ByteSliceWriter<'a> {
    data: &'a mut [u8],
    width: usize,
    height: usize,
    layout: ChannelLayout,
}

impl<'a> ByteSliceWriter<'a> {
    pub fn new(
        data: &'a mut [u8],
        width: usize,
        height: usize,
        layout: ChannelLayout,
    ) -> ByteSliceWriter<'a> {
        assert_eq!(
            data.len(),
            width * height * layout.channels(),
            "byte slice length must match width * height * channels"
        );
        ByteSliceWriter {
            data,
            width,
            height,
            layout,
        }
    }
}

impl PixelWriter for ByteSliceWriter<'_> {
    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn layout(&self) -> ChannelLayout {
        self.layout
    }

    fn write_row_interleaved(&mut self, row: usize, data: &[u8]) {
        let stride = self.width * self.layout.channels();
        let start = row * stride;
        self.data[start..start + stride].copy_from_slice(data);
    }
}
