//! Texture loading: decode an image file and upload it as a mipmapped,
//! repeating 2D texture.
//!
//! Only 8-bit RGB and RGBA images are accepted. GL expects the first
//! uploaded row at the lower-left corner, so the decoded image is flipped
//! vertically before upload.

use std::io;
use std::path::{Path, PathBuf};

use glow::HasContext;
use image::DynamicImage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("cannot open texture {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot decode texture {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("texture {path} has unsupported pixel format {format}")]
    Unsupported { path: PathBuf, format: &'static str },
    #[error("GL object creation failed: {0}")]
    Create(String),
}

pub fn load_texture(gl: &glow::Context, path: &Path) -> Result<glow::Texture, TextureError> {
    let bytes = std::fs::read(path).map_err(|source| TextureError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let decoded = image::load_from_memory(&bytes).map_err(|source| TextureError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let (format, flipped) = match decoded {
        DynamicImage::ImageRgb8(_) => (glow::RGB, decoded.flipv()),
        DynamicImage::ImageRgba8(_) => (glow::RGBA, decoded.flipv()),
        other => {
            return Err(TextureError::Unsupported {
                path: path.to_path_buf(),
                format: format_name(&other),
            })
        }
    };
    let width = flipped.width() as i32;
    let height = flipped.height() as i32;
    let pixels = flipped.into_bytes();

    unsafe {
        let texture = gl.create_texture().map_err(TextureError::Create)?;
        gl.bind_texture(glow::TEXTURE_2D, Some(texture));
        // RGB rows are not 4-byte aligned for odd widths.
        gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
        gl.tex_image_2d(
            glow::TEXTURE_2D,
            0,
            format as i32,
            width,
            height,
            0,
            format,
            glow::UNSIGNED_BYTE,
            glow::PixelUnpackData::Slice(Some(&pixels)),
        );
        gl.generate_mipmap(glow::TEXTURE_2D);
        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_MIN_FILTER,
            glow::LINEAR_MIPMAP_LINEAR as i32,
        );
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
        gl.bind_texture(glow::TEXTURE_2D, None);
        Ok(texture)
    }
}

fn format_name(image: &DynamicImage) -> &'static str {
    match image {
        DynamicImage::ImageLuma8(_) => "8-bit grayscale",
        DynamicImage::ImageLumaA8(_) => "8-bit grayscale + alpha",
        DynamicImage::ImageLuma16(_) => "16-bit grayscale",
        DynamicImage::ImageLumaA16(_) => "16-bit grayscale + alpha",
        DynamicImage::ImageRgb16(_) | DynamicImage::ImageRgba16(_) => "16-bit color",
        DynamicImage::ImageRgb32F(_) | DynamicImage::ImageRgba32F(_) => "floating point",
        _ => "unknown",
    }
}
