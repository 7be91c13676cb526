//! wgpu textures backing the windowed context.
//!
//! Bundles texture, view and sampler the way the render pass binds them.

use crate::gfx::context::{TextureFilter, TextureImage, TextureSampling, TextureWrap};

/// GPU texture resource containing texture, view, and sampler
pub struct TextureResource {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl TextureResource {
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
    pub const COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

    /// Creates a depth buffer matching the surface dimensions.
    pub fn create_depth_texture(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        label: &str,
    ) -> Self {
        let size = wgpu::Extent3d {
            width: config.width.max(1),
            height: config.height.max(1),
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            compare: Some(wgpu::CompareFunction::LessEqual),
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
        }
    }

    /// Creates an RGBA8 texture and uploads `image` into it.
    pub fn create_from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &TextureImage,
        sampling: TextureSampling,
        label: &str,
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: extent(image),
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::COLOR_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        write_pixels(queue, &texture, image);

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = create_sampler(device, sampling, label);

        Self {
            texture,
            view,
            sampler,
        }
    }

    /// Replaces the pixels in place when the size matches, otherwise
    /// reallocates the texture.
    pub fn update(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &TextureImage,
        sampling: TextureSampling,
    ) {
        if self.texture.size() == extent(image) {
            write_pixels(queue, &self.texture, image);
            self.sampler = create_sampler(device, sampling, "Texture Sampler");
        } else {
            *self = Self::create_from_image(device, queue, image, sampling, "Texture");
        }
    }
}

fn extent(image: &TextureImage) -> wgpu::Extent3d {
    wgpu::Extent3d {
        width: image.width.max(1),
        height: image.height.max(1),
        depth_or_array_layers: 1,
    }
}

fn write_pixels(queue: &wgpu::Queue, texture: &wgpu::Texture, image: &TextureImage) {
    let size = extent(image);
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &image.pixels,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * size.width),
            rows_per_image: Some(size.height),
        },
        size,
    );
}

fn create_sampler(device: &wgpu::Device, sampling: TextureSampling, label: &str) -> wgpu::Sampler {
    let address_mode = address_mode(sampling.wrap);
    let filter = filter_mode(sampling.filter);

    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some(label),
        address_mode_u: address_mode,
        address_mode_v: address_mode,
        address_mode_w: address_mode,
        mag_filter: filter,
        min_filter: filter,
        mipmap_filter: wgpu::FilterMode::Nearest,
        ..Default::default()
    })
}

pub fn address_mode(wrap: TextureWrap) -> wgpu::AddressMode {
    match wrap {
        TextureWrap::Repeat => wgpu::AddressMode::Repeat,
        TextureWrap::ClampToEdge => wgpu::AddressMode::ClampToEdge,
    }
}

pub fn filter_mode(filter: TextureFilter) -> wgpu::FilterMode {
    match filter {
        TextureFilter::Nearest => wgpu::FilterMode::Nearest,
        TextureFilter::Linear => wgpu::FilterMode::Linear,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sampling_maps_to_wgpu() {
        assert_eq!(address_mode(TextureWrap::Repeat), wgpu::AddressMode::Repeat);
        assert_eq!(address_mode(TextureWrap::ClampToEdge), wgpu::AddressMode::ClampToEdge);
        assert_eq!(filter_mode(TextureFilter::Nearest), wgpu::FilterMode::Nearest);
    }

    #[test]
    fn test_extent_never_zero() {
        let image = TextureImage {
            width: 0,
            height: 0,
            pixels: Vec::new(),
        };
        let size = extent(&image);
        assert_eq!((size.width, size.height), (1, 1));
    }
}
