//! Textures attached to meshes.
//!
//! A [`TextureBuffer`] is a cheap shared handle: meshes reference it but do not
//! own the GPU texture behind it. Textures come from a solid color or from an
//! image file. File textures are decoded off the frame loop by a
//! [`TextureLoader`] and show a placeholder until [`TextureLoader::poll`] swaps
//! the pixels in.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use crate::error::{PlaygroundError, Result};
use crate::gfx::context::{
    GraphicsContext, TextureFilter, TextureId, TextureImage, TextureSampling, TextureWrap,
};

pub const WHITE: [u8; 4] = [255, 255, 255, 255];
/// Shown while a file texture is still loading.
pub const PLACEHOLDER: [u8; 4] = [0, 0, 0, 255];

/// UV corners cycled across every vertex of a mesh.
const CORNER_COORDINATES: [f32; 8] = [0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0];

#[derive(Debug, Clone, PartialEq)]
pub enum TextureSource {
    Solid([u8; 4]),
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextureBuffer {
    pub texture: TextureId,
    pub source: Option<TextureSource>,
}

impl TextureBuffer {
    pub fn source(&self) -> Option<&TextureSource> {
        self.source.as_ref()
    }
}

/// One-pixel texture filled with `rgba`, sampled nearest.
pub fn create_solid_texture(ctx: &mut dyn GraphicsContext, rgba: [u8; 4]) -> TextureBuffer {
    let texture = ctx.create_texture(
        &TextureImage::solid(rgba),
        TextureSampling {
            wrap: TextureWrap::ClampToEdge,
            filter: TextureFilter::Nearest,
        },
    );
    TextureBuffer {
        texture,
        source: Some(TextureSource::Solid(rgba)),
    }
}

/// Texture coordinates for `vertex_count` vertices, two floats each.
pub fn texture_coordinates(vertex_count: usize) -> Vec<f32> {
    CORNER_COORDINATES
        .chunks_exact(2)
        .cycle()
        .take(vertex_count)
        .flatten()
        .copied()
        .collect()
}

/// Reads and decodes an image file into RGBA8 pixels.
pub fn decode_texture_file(path: &Path) -> Result<TextureImage> {
    decode_image(path).map_err(|source| image_error(path, source))
}

fn decode_image(path: &Path) -> std::result::Result<TextureImage, image::ImageError> {
    let rgba = image::open(path)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(TextureImage {
        width,
        height,
        pixels: rgba.into_raw(),
    })
}

fn image_error(path: &Path, source: image::ImageError) -> PlaygroundError {
    match source {
        image::ImageError::IoError(err) if err.kind() == std::io::ErrorKind::NotFound => {
            PlaygroundError::FileNotFound(path.to_path_buf())
        }
        source => PlaygroundError::TextureDecode {
            path: path.to_path_buf(),
            source,
        },
    }
}

struct DecodedTexture {
    texture: TextureId,
    path: PathBuf,
    image: std::result::Result<TextureImage, image::ImageError>,
}

/// Decodes image files on worker threads and swaps them into placeholder
/// textures from the frame loop.
pub struct TextureLoader {
    sender: Sender<DecodedTexture>,
    receiver: Receiver<DecodedTexture>,
    pending: usize,
}

impl Default for TextureLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl TextureLoader {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            pending: 0,
        }
    }

    /// Returns a placeholder texture immediately and starts decoding `path`.
    pub fn load(&mut self, ctx: &mut dyn GraphicsContext, path: impl AsRef<Path>) -> TextureBuffer {
        let path = path.as_ref().to_path_buf();
        let placeholder = TextureImage::solid(PLACEHOLDER);
        let texture = ctx.create_texture(&placeholder, placeholder.default_sampling());

        let sender = self.sender.clone();
        let worker_path = path.clone();
        thread::spawn(move || {
            let image = decode_image(&worker_path);
            // Receiver gone means the loader was dropped; nothing to deliver to.
            let _ = sender.send(DecodedTexture {
                texture,
                path: worker_path,
                image,
            });
        });
        self.pending += 1;
        log::debug!("Loading texture {}", path.display());

        TextureBuffer {
            texture,
            source: Some(TextureSource::File(path)),
        }
    }

    /// Uploads every texture decoded since the last poll.
    ///
    /// Failures are logged once and returned; their placeholder stays bound.
    pub fn poll(&mut self, ctx: &mut dyn GraphicsContext) -> Vec<PlaygroundError> {
        let mut failures = Vec::new();
        while let Ok(decoded) = self.receiver.try_recv() {
            self.pending = self.pending.saturating_sub(1);
            match decoded.image {
                Ok(image) => {
                    ctx.update_texture(decoded.texture, &image, image.default_sampling());
                    log::info!(
                        "Loaded texture {} ({}x{})",
                        decoded.path.display(),
                        image.width,
                        image.height
                    );
                }
                Err(source) => {
                    let error = image_error(&decoded.path, source);
                    log::error!("{error}");
                    failures.push(error);
                }
            }
        }
        failures
    }

    /// Textures requested but not yet delivered.
    pub fn pending(&self) -> usize {
        self.pending
    }
}
