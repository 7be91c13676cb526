//! GPU-resident buffers for one mesh.

use crate::error::{PlaygroundError, Result};
use crate::gfx::context::{BufferData, BufferId, BufferTarget, GraphicsContext, TextureId};
use crate::gfx::geometry::{flatten_faces, flatten_indices, Face};
use crate::gfx::resources::texture::{create_solid_texture, texture_coordinates, WHITE};
use crate::math::map_range;

/// Buffers backing one mesh draw.
///
/// `vertex_count` is the number of indices when an index buffer is present,
/// otherwise the number of vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpuBuffers {
    pub position: BufferId,
    pub indices: Option<BufferId>,
    pub texture_coord: Option<BufferId>,
    pub texture: Option<TextureId>,
    pub normal: Option<BufferId>,
    pub vertex_count: u32,
    /// Set when `texture` was created for these buffers and dies with them.
    pub owned_texture: bool,
}

impl GpuBuffers {
    /// Uploads positions, indices, texture coordinates and normals.
    ///
    /// Without a texture a white one is created. Without normals a fallback
    /// set is generated from the positions (see [`fallback_normals`]).
    pub fn upload(
        ctx: &mut dyn GraphicsContext,
        faces: &[Face],
        indices: &[Vec<u32>],
        texture: Option<TextureId>,
        normals: Option<&[f32]>,
    ) -> Result<Self> {
        let positions = flatten_faces(faces);
        let indices = flatten_indices(indices)
            .into_iter()
            .map(|i| u16::try_from(i).map_err(|_| PlaygroundError::IndexOverflow(i)))
            .collect::<Result<Vec<u16>>>()?;

        let (texture, owned_texture) = match texture {
            Some(texture) => (texture, false),
            None => (create_solid_texture(ctx, WHITE).texture, true),
        };

        let coords = texture_coordinates(positions.len() / 3);
        let texture_coord = ctx.create_buffer(BufferTarget::Array, BufferData::F32(&coords));
        let position = ctx.create_buffer(BufferTarget::Array, BufferData::F32(&positions));
        let index_buffer = ctx.create_buffer(BufferTarget::ElementArray, BufferData::U16(&indices));

        let generated;
        let normals = match normals {
            Some(normals) => normals,
            None => {
                generated = fallback_normals(&positions);
                &generated
            }
        };
        let normal = ctx.create_buffer(BufferTarget::Array, BufferData::F32(normals));

        Ok(Self {
            position,
            indices: Some(index_buffer),
            texture_coord: Some(texture_coord),
            texture: Some(texture),
            normal: Some(normal),
            vertex_count: indices.len() as u32,
            owned_texture,
        })
    }

    pub fn is_indexed(&self) -> bool {
        self.indices.is_some()
    }

    /// Deletes every buffer, and the texture when it is owned.
    pub fn release(self, ctx: &mut dyn GraphicsContext) {
        ctx.delete_buffer(self.position);
        for buffer in [self.indices, self.texture_coord, self.normal].into_iter().flatten() {
            ctx.delete_buffer(buffer);
        }
        if let (true, Some(texture)) = (self.owned_texture, self.texture) {
            ctx.delete_texture(texture);
        }
    }
}

/// Positions min-max normalised into `[0, 1]`, used when a mesh has no normals.
///
/// A mesh whose coordinates are all equal maps to zeros.
pub fn fallback_normals(positions: &[f32]) -> Vec<f32> {
    let (smallest, largest) = positions
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));

    if !(largest > smallest) {
        return vec![0.0; positions.len()];
    }
    positions
        .iter()
        .map(|&v| map_range(v, smallest, largest, 0.0, 1.0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::context::{RecordedData, RecordingContext};
    use crate::gfx::geometry::{cube_vertices, generate_indices};

    #[test]
    fn test_upload_cube() {
        let mut ctx = RecordingContext::new();
        let faces = cube_vertices(1.0);
        let indices = generate_indices(&faces);
        let buffers = GpuBuffers::upload(&mut ctx, &faces, &indices, None, None).unwrap();

        assert_eq!(buffers.vertex_count, 36);
        assert!(buffers.is_indexed());
        assert!(buffers.owned_texture);

        match ctx.buffer_data(buffers.position) {
            Some(RecordedData::F32(data)) => assert_eq!(data.len(), 72),
            other => panic!("unexpected position data {other:?}"),
        }
        match ctx.buffer_data(buffers.texture_coord.unwrap()) {
            Some(RecordedData::F32(data)) => assert_eq!(data.len(), 48),
            other => panic!("unexpected texcoord data {other:?}"),
        }
        match ctx.buffer_data(buffers.indices.unwrap()) {
            Some(RecordedData::U16(data)) => assert_eq!(data.len(), 36),
            other => panic!("unexpected index data {other:?}"),
        }
        match ctx.buffer_data(buffers.normal.unwrap()) {
            Some(RecordedData::F32(data)) => {
                assert!(data.iter().all(|n| *n == 0.0 || *n == 1.0))
            }
            other => panic!("unexpected normal data {other:?}"),
        }
    }

    #[test]
    fn test_given_texture_is_not_owned() {
        let mut ctx = RecordingContext::new();
        let texture = create_solid_texture(&mut ctx, [1, 2, 3, 4]);
        let faces = cube_vertices(1.0);
        let buffers = GpuBuffers::upload(
            &mut ctx,
            &faces,
            &generate_indices(&faces),
            Some(texture.texture),
            None,
        )
        .unwrap();

        buffers.release(&mut ctx);
        assert!(ctx.is_live_texture(texture.texture));
        assert_eq!(ctx.live_buffer_count(), 0);
    }

    #[test]
    fn test_index_overflow() {
        let mut ctx = RecordingContext::new();
        let faces = vec![vec![0.0; 9]];
        let indices = vec![vec![0, 1, 70_000]];

        assert!(matches!(
            GpuBuffers::upload(&mut ctx, &faces, &indices, None, None),
            Err(PlaygroundError::IndexOverflow(70_000))
        ));
    }

    #[test]
    fn test_fallback_normals() {
        assert_eq!(fallback_normals(&[-2.0, 0.0, 2.0]), vec![0.0, 0.5, 1.0]);
        assert_eq!(fallback_normals(&[3.0, 3.0]), vec![0.0, 0.0]);
        assert!(fallback_normals(&[]).is_empty());
    }
}
