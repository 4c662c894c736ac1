//! Turn an in-memory image into the base64 PNG payload the annotate
//! endpoint accepts inline.

use crate::error::{Result, VisionError};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageOutputFormat};
use std::io::Cursor;
use tracing::{debug, warn};

/// Largest PNG, in bytes, sent without downscaling first.
pub const MAX_PAYLOAD_BYTES: usize = 2_097_152;
/// Width an oversized image is redrawn at.
pub const TARGET_WIDTH: u32 = 800;
/// Largest canvas the downscale step will allocate.
pub const MAX_REDRAW_PIXELS: u64 = 100_000_000;

/// Line breaking applied to the base64 text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineBreaks {
    /// One unbroken line.
    #[default]
    None,
    /// A `\r` between every `width` characters.
    CarriageReturn { width: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PrepareOptions {
    pub max_bytes: usize,
    pub target_width: u32,
    pub line_breaks: LineBreaks,
}

impl Default for PrepareOptions {
    fn default() -> Self {
        Self {
            max_bytes: MAX_PAYLOAD_BYTES,
            target_width: TARGET_WIDTH,
            line_breaks: LineBreaks::None,
        }
    }
}

/// Base64 PNG ready to be placed in a request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedPayload {
    pub base64: String,
    /// Dimensions of the image that was actually encoded.
    pub width: u32,
    pub height: u32,
    /// Length of the PNG before base64 encoding.
    pub png_len: usize,
    pub downscaled: bool,
}

/// Prepare `image` with the default 2 MiB limit and 800 pixel target width.
pub fn prepare(image: &DynamicImage) -> Result<EncodedPayload> {
    prepare_with(image, &PrepareOptions::default())
}

/// Encode `image` as PNG, downscaling once if the PNG exceeds
/// `opts.max_bytes`.
///
/// The downscaled image is used even when it is still over the limit; there
/// is no second attempt. Fails with [`VisionError::TooLarge`] when the
/// proportional height would need a canvas over [`MAX_REDRAW_PIXELS`].
pub fn prepare_with(image: &DynamicImage, opts: &PrepareOptions) -> Result<EncodedPayload> {
    let (width, height) = image.dimensions();
    let png = encode_png(image)?;
    debug!(width, height, bytes = png.len(), "encoded image as png");
    if png.len() <= opts.max_bytes {
        return Ok(finish(png, width, height, false, opts.line_breaks));
    }

    let (new_width, new_height) = clamp_size(width, height, opts.target_width);
    debug!(
        bytes = png.len(),
        limit = opts.max_bytes,
        new_width,
        new_height,
        "png over limit, downscaling"
    );
    if u64::from(new_width) * u64::from(new_height) > MAX_REDRAW_PIXELS {
        return Err(VisionError::TooLarge {
            width: new_width,
            height: new_height,
            max_pixels: MAX_REDRAW_PIXELS,
        });
    }
    let resized = image.resize_exact(new_width, new_height, FilterType::Triangle);
    let png = encode_png(&resized)?;
    if png.len() > opts.max_bytes {
        warn!(bytes = png.len(), limit = opts.max_bytes, "downscaled png still over limit");
    }
    Ok(finish(png, new_width, new_height, true, opts.line_breaks))
}

/// Size an image is redrawn at: `target_width` wide, height scaled to keep
/// the aspect ratio (never below one pixel).
pub fn clamp_size(width: u32, height: u32, target_width: u32) -> (u32, u32) {
    let scaled = f64::from(height) / f64::from(width.max(1)) * f64::from(target_width);
    (target_width, scaled.round().max(1.0) as u32)
}

fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    image.write_to(&mut buf, ImageOutputFormat::Png)?;
    Ok(buf.into_inner())
}

fn finish(
    png: Vec<u8>,
    width: u32,
    height: u32,
    downscaled: bool,
    line_breaks: LineBreaks,
) -> EncodedPayload {
    EncodedPayload {
        base64: break_lines(BASE64.encode(&png), line_breaks),
        width,
        height,
        png_len: png.len(),
        downscaled,
    }
}

fn break_lines(encoded: String, line_breaks: LineBreaks) -> String {
    let width = match line_breaks {
        LineBreaks::CarriageReturn { width } if width > 0 && encoded.len() > width => width,
        _ => return encoded,
    };
    let mut out = String::with_capacity(encoded.len() + encoded.len() / width);
    for (i, c) in encoded.chars().enumerate() {
        if i > 0 && i % width == 0 {
            out.push('\r');
        }
        out.push(c);
    }
    out
}
