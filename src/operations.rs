//! Image operations used by the editor.
//!
//! Every transform is a pure function from one image value to a new one;
//! the input is never modified.

use std::fmt;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::str::FromStr;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, Rgb, Rgba, RgbaImage};

use crate::error::{EditorError, EditorResult};

/// Opens an image from disk
pub fn open(path: impl AsRef<Path>) -> EditorResult<DynamicImage> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(EditorError::NotFound(path.to_path_buf()));
    }

    let image = image::open(path).map_err(|err| match err {
        image::ImageError::IoError(io) if io.kind() == std::io::ErrorKind::NotFound => {
            EditorError::NotFound(path.to_path_buf())
        }
        other => EditorError::Decode(other),
    })?;
    log::info!(
        "Opened {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(image)
}

/// Saves an image; the format follows the file extension.
///
/// JPEG targets are written at `jpeg_quality` without alpha.
pub fn save(image: &DynamicImage, path: impl AsRef<Path>, jpeg_quality: u8) -> EditorResult<()> {
    let path = path.as_ref();
    let is_jpeg = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| ext == "jpg" || ext == "jpeg");

    let encode_err = |source| EditorError::Encode {
        path: path.to_path_buf(),
        source,
    };

    let mut encoded = Vec::new();
    if is_jpeg {
        let encoder = JpegEncoder::new_with_quality(&mut encoded, jpeg_quality.clamp(1, 100));
        DynamicImage::ImageRgb8(image.to_rgb8())
            .write_with_encoder(encoder)
            .map_err(encode_err)?;
    } else {
        let format = ImageFormat::from_path(path).map_err(encode_err)?;
        image
            .write_to(&mut Cursor::new(&mut encoded), format)
            .map_err(encode_err)?;
    }

    // The target is only touched once encoding succeeded
    fs::write(path, &encoded)?;

    log::info!("Saved image to {}", path.display());
    Ok(())
}

/// Quarter turn counter-clockwise. The canvas grows to fit the turned
/// image instead of keeping its size and cropping.
pub fn rotate90(image: &DynamicImage) -> DynamicImage {
    image.rotate270()
}

pub fn resize(image: &DynamicImage, width: u32, height: u32) -> EditorResult<DynamicImage> {
    if width == 0 || height == 0 {
        return Err(EditorError::InvalidDimensions { width, height });
    }
    Ok(image.resize_exact(width, height, FilterType::Lanczos3))
}

/// Flips top to bottom
pub fn flip_vertical(image: &DynamicImage) -> DynamicImage {
    image.flipv()
}

/// Mirrors left to right
pub fn flip_horizontal(image: &DynamicImage) -> DynamicImage {
    image.fliph()
}

pub fn grayscale(image: &DynamicImage) -> DynamicImage {
    image.grayscale()
}

/// Inverts the colour channels, alpha is left alone
pub fn invert(image: &DynamicImage) -> DynamicImage {
    let mut inverted = image.clone();
    inverted.invert();
    inverted
}

pub fn sepia(image: &DynamicImage) -> DynamicImage {
    map_rgb(image, |r, g, b| {
        [
            0.393 * r + 0.769 * g + 0.189 * b,
            0.349 * r + 0.686 * g + 0.168 * b,
            0.272 * r + 0.534 * g + 0.131 * b,
        ]
    })
}

/// Blends every pixel towards `color`; `strength` is clamped to `0.0..=1.0`.
pub fn tint(image: &DynamicImage, color: Rgb<u8>, strength: f32) -> DynamicImage {
    let strength = strength.clamp(0.0, 1.0);
    let [tr, tg, tb] = color.0.map(f32::from);
    map_rgb(image, |r, g, b| {
        [
            r + (tr - r) * strength,
            g + (tg - g) * strength,
            b + (tb - b) * strength,
        ]
    })
}

fn map_rgb(image: &DynamicImage, f: impl Fn(f32, f32, f32) -> [f32; 3]) -> DynamicImage {
    let mut rgba = image.to_rgba8();
    for pixel in rgba.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        let [r, g, b] = f(f32::from(r), f32::from(g), f32::from(b)).map(to_channel);
        *pixel = Rgba([r, g, b, a]);
    }
    DynamicImage::ImageRgba8(rgba)
}

fn to_channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Convolution filters offered in the Effects menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Blur,
    Contour,
    Detail,
    EdgeEnhance,
    Emboss,
    FindEdges,
    Sharpen,
    Smooth,
}

impl FilterKind {
    pub const ALL: [FilterKind; 8] = [
        FilterKind::Blur,
        FilterKind::Contour,
        FilterKind::Detail,
        FilterKind::EdgeEnhance,
        FilterKind::Emboss,
        FilterKind::FindEdges,
        FilterKind::Sharpen,
        FilterKind::Smooth,
    ];

    /// Machine name, as accepted by `FromStr`
    pub fn name(self) -> &'static str {
        match self {
            FilterKind::Blur => "blur",
            FilterKind::Contour => "contour",
            FilterKind::Detail => "detail",
            FilterKind::EdgeEnhance => "edge-enhance",
            FilterKind::Emboss => "emboss",
            FilterKind::FindEdges => "find-edges",
            FilterKind::Sharpen => "sharpen",
            FilterKind::Smooth => "smooth",
        }
    }

    /// Menu and history label
    pub fn title(self) -> &'static str {
        match self {
            FilterKind::Blur => "Blur",
            FilterKind::Contour => "Contour",
            FilterKind::Detail => "Detail",
            FilterKind::EdgeEnhance => "Edge Enhance",
            FilterKind::Emboss => "Emboss",
            FilterKind::FindEdges => "Find Edges",
            FilterKind::Sharpen => "Sharpen",
            FilterKind::Smooth => "Smooth",
        }
    }

    fn kernel(self) -> Kernel {
        match self {
            FilterKind::Blur => Kernel {
                size: 5,
                weights: &[
                    1.0, 1.0, 1.0, 1.0, 1.0, //
                    1.0, 0.0, 0.0, 0.0, 1.0, //
                    1.0, 0.0, 0.0, 0.0, 1.0, //
                    1.0, 0.0, 0.0, 0.0, 1.0, //
                    1.0, 1.0, 1.0, 1.0, 1.0,
                ],
                scale: 16.0,
                offset: 0.0,
            },
            FilterKind::Contour => Kernel::three(&[-1.0, -1.0, -1.0, -1.0, 8.0, -1.0, -1.0, -1.0, -1.0], 1.0, 255.0),
            FilterKind::Detail => Kernel::three(&[0.0, -1.0, 0.0, -1.0, 10.0, -1.0, 0.0, -1.0, 0.0], 6.0, 0.0),
            FilterKind::EdgeEnhance => Kernel::three(&[-1.0, -1.0, -1.0, -1.0, 10.0, -1.0, -1.0, -1.0, -1.0], 2.0, 0.0),
            FilterKind::Emboss => Kernel::three(&[-1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0], 1.0, 128.0),
            FilterKind::FindEdges => Kernel::three(&[-1.0, -1.0, -1.0, -1.0, 8.0, -1.0, -1.0, -1.0, -1.0], 1.0, 0.0),
            FilterKind::Sharpen => Kernel::three(&[-2.0, -2.0, -2.0, -2.0, 32.0, -2.0, -2.0, -2.0, -2.0], 16.0, 0.0),
            FilterKind::Smooth => Kernel::three(&[1.0, 1.0, 1.0, 1.0, 5.0, 1.0, 1.0, 1.0, 1.0], 13.0, 0.0),
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterKind {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '_'], "-");
        FilterKind::ALL
            .into_iter()
            .find(|kind| kind.name() == normalized)
            .ok_or_else(|| EditorError::UnsupportedFilter(s.to_owned()))
    }
}

/// Square convolution kernel: `value = sum / scale + offset`
struct Kernel {
    size: usize,
    weights: &'static [f32],
    scale: f32,
    offset: f32,
}

impl Kernel {
    fn three(weights: &'static [f32; 9], scale: f32, offset: f32) -> Self {
        Self {
            size: 3,
            weights,
            scale,
            offset,
        }
    }
}

/// Applies one of the built-in convolution filters
pub fn filter(image: &DynamicImage, kind: FilterKind) -> DynamicImage {
    log::debug!("Applying {} filter", kind);
    let source = image.to_rgba8();
    DynamicImage::ImageRgba8(convolve(&source, &kind.kernel()))
}

fn convolve(source: &RgbaImage, kernel: &Kernel) -> RgbaImage {
    let (width, height) = source.dimensions();
    let radius = (kernel.size / 2) as i64;
    let max_x = i64::from(width) - 1;
    let max_y = i64::from(height) - 1;

    RgbaImage::from_fn(width, height, |x, y| {
        let mut acc = [0.0f32; 3];
        for ky in 0..kernel.size {
            for kx in 0..kernel.size {
                let weight = kernel.weights[ky * kernel.size + kx];
                if weight == 0.0 {
                    continue;
                }
                // Edges are extended by clamping coordinates
                let sx = (i64::from(x) + kx as i64 - radius).clamp(0, max_x) as u32;
                let sy = (i64::from(y) + ky as i64 - radius).clamp(0, max_y) as u32;
                let pixel = source.get_pixel(sx, sy);
                for (channel, value) in acc.iter_mut().enumerate() {
                    *value += weight * f32::from(pixel[channel]);
                }
            }
        }

        let alpha = source.get_pixel(x, y)[3];
        let [r, g, b] = acc.map(|sum| to_channel(sum / kernel.scale + kernel.offset));
        Rgba([r, g, b, alpha])
    })
}

/// Parses a tint colour: a few colour names or `#rrggbb`
pub fn parse_color(text: &str) -> EditorResult<Rgb<u8>> {
    let name = text.trim().to_lowercase();
    let rgb = match name.as_str() {
        "red" => [255, 0, 0],
        "green" => [0, 128, 0],
        "blue" => [0, 0, 255],
        "yellow" => [255, 255, 0],
        "cyan" => [0, 255, 255],
        "magenta" => [255, 0, 255],
        "orange" => [255, 165, 0],
        "purple" => [128, 0, 128],
        "white" => [255, 255, 255],
        "black" => [0, 0, 0],
        hex => parse_hex(hex).ok_or_else(|| EditorError::UnsupportedColor(text.to_owned()))?,
    };
    Ok(Rgb(rgb))
}

fn parse_hex(text: &str) -> Option<[u8; 3]> {
    let digits = text.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}
