//! Minimal CLI that exercises [`raster_resample::Resampler`] end to end:
//! decode an image with the `image` crate, resample it with Lanczos-3, and
//! write the result back out. Not part of the published library crate —
//! argument parsing, color-space handling, and file I/O all belong to a
//! caller, not the core.
//!
//! ```text
//! demos <input> <output> <width> <height>
//! ```

use image::{DynamicImage, GenericImageView};
use raster_resample::{
    ByteSliceAccessor, ChannelLayout, ImageSize, Resampler, ResamplerOptions,
};
use std::time::Instant;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 5 {
        eprintln!("usage: {} <input> <output> <width> <height>", args[0]);
        std::process::exit(1);
    }
    let input_path = &args[1];
    let output_path = &args[2];
    let dst_width: usize = args[3].parse().expect("width must be a positive integer");
    let dst_height: usize = args[4].parse().expect("height must be a positive integer");

    let decoded = image::open(input_path).unwrap_or_else(|err| {
        eprintln!("failed to decode {input_path}: {err}");
        std::process::exit(1);
    });
    let has_alpha = decoded.color().has_alpha();
    let (src_width, src_height) = decoded.dimensions();

    log::info!(
        "resampling {input_path} ({src_width}x{src_height}, alpha={has_alpha}) -> {dst_width}x{dst_height}"
    );

    let resampler = Resampler::new(ResamplerOptions::default());
    let progress = |fraction: f32| {
        log::debug!("progress: {:.1}%", fraction * 100.0);
    };

    let start = Instant::now();
    let dst_size = ImageSize::new(dst_width, dst_height);
    let output = if has_alpha {
        let rgba = decoded.to_rgba8();
        let abgr = interleave_to_abgr(rgba.as_raw());
        let source = ByteSliceAccessor::new(&abgr, src_width as usize, src_height as usize, ChannelLayout::Abgr);
        let resampled = resampler
            .resample(&source, dst_size, Some(&progress))
            .expect("resample failed");
        abgr_to_rgba_image(&resampled, dst_width, dst_height)
    } else {
        let rgb = decoded.to_rgb8();
        let bgr = interleave_to_bgr(rgb.as_raw());
        let source = ByteSliceAccessor::new(&bgr, src_width as usize, src_height as usize, ChannelLayout::Bgr);
        let resampled = resampler
            .resample(&source, dst_size, Some(&progress))
            .expect("resample failed");
        bgr_to_rgb_image(&resampled, dst_width, dst_height)
    };
    log::info!("done in {:?}", start.elapsed());

    output.save(output_path).unwrap_or_else(|err| {
        eprintln!("failed to write {output_path}: {err}");
        std::process::exit(1);
    });
}

/// `image`'s in-memory order is R, G, B (low to high address); the core's
/// [`ChannelLayout::Bgr`] wants B, G, R.
fn interleave_to_bgr(rgb: &[u8]) -> Vec<u8> {
    rgb.chunks_exact(3).flat_map(|p| [p[2], p[1], p[0]]).collect()
}

fn bgr_to_rgb_image(bgr: &[u8], width: usize, height: usize) -> DynamicImage {
    let rgb: Vec<u8> = bgr.chunks_exact(3).flat_map(|p| [p[2], p[1], p[0]]).collect();
    DynamicImage::ImageRgb8(
        image::RgbImage::from_vec(width as u32, height as u32, rgb)
            .expect("buffer length matches width * height * 3"),
    )
}

/// `image`'s in-memory order is R, G, B, A; the core's
/// [`ChannelLayout::Abgr`] wants A, B, G, R.
fn interleave_to_abgr(rgba: &[u8]) -> Vec<u8> {
    rgba.chunks_exact(4).flat_map(|p| [p[3], p[2], p[1], p[0]]).collect()
}

fn abgr_to_rgba_image(abgr: &[u8], width: usize, height: usize) -> DynamicImage {
    let rgba: Vec<u8> = abgr.chunks_exact(4).flat_map(|p| [p[3], p[2], p[1], p[0]]).collect();
    DynamicImage::ImageRgba8(
        image::RgbaImage::from_vec(width as u32, height as u32, rgba)
            .expect("buffer length matches width * height * 4"),
    )
}
