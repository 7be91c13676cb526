//! # Mesh Entity
//!
//! A [`Mesh`] owns the raw faces of a shape, the fan indices derived from
//! them, optional normals, an optional shared texture and the GPU buffers
//! built from all of that.
//!
//! ## Translation is cumulative
//!
//! [`Mesh::translate`] adds the given position to the *current* vertex data
//! on every call. Translating by `v1` and then `v2` leaves the vertices at
//! `original + v1 + v2`, which lets callers chain relative moves.
//!
//! ## Buffer regeneration
//!
//! Every mutation rebuilds the GPU buffers at once, releases the old ones and
//! raises the `buffer_updated` flag. The owning
//! [`ShapeBuffer`](super::ShapeBuffer) picks up the new buffers in
//! `update_buffers` and clears the flag explicitly.

use crate::error::Result;
use crate::gfx::context::GraphicsContext;
use crate::gfx::geometry::{
    box_vertices, circle_faces, cube_vertices, generate_indices, resolve_radius, validate_faces,
    validate_indices, vertex_count, CircleDescriptor, FaceList, IndexList, Normals,
};
use crate::gfx::rendering::{GpuBuffers, RenderSettings};
use crate::gfx::resources::texture::{TextureBuffer, TextureSource};
use crate::math::Vector3;

/// Depth of the thin box used for flat squares.
const SQUARE_DEPTH: f32 = 0.001;

/// Optional inputs for [`Mesh::new`].
#[derive(Debug, Clone, Default)]
pub struct MeshDescriptor {
    pub position: Option<Vector3>,
    pub texture: Option<TextureBuffer>,
    pub normals: Option<Normals>,
    /// Explicit indices; derived from the faces when absent.
    pub indices: Option<IndexList>,
}

impl MeshDescriptor {
    pub fn with_position(mut self, position: impl Into<Vector3>) -> Self {
        self.position = Some(position.into());
        self
    }

    pub fn with_texture(mut self, texture: Option<TextureBuffer>) -> Self {
        self.texture = texture;
        self
    }

    pub fn with_normals(mut self, normals: impl Into<Normals>) -> Self {
        self.normals = Some(normals.into());
        self
    }

    pub fn with_indices(mut self, indices: IndexList) -> Self {
        self.indices = Some(indices);
        self
    }
}

#[derive(Debug)]
pub struct Mesh {
    position: Vector3,
    faces: FaceList,
    indices: IndexList,
    normals: Option<Vec<f32>>,
    texture: Option<TextureBuffer>,
    dimensions: Option<(f32, f32)>,
    render_settings: RenderSettings,
    buffers: GpuBuffers,
    buffer_updated: bool,
}

impl Mesh {
    /// Builds a mesh from raw faces, moved to `descriptor.position`.
    ///
    /// Fails when a face does not hold whole `x, y, z` triples, or when an
    /// explicit index points past the last vertex.
    pub fn new(ctx: &mut dyn GraphicsContext, faces: FaceList, descriptor: MeshDescriptor) -> Result<Self> {
        validate_faces(&faces)?;

        let position = descriptor.position.unwrap_or_default();
        let indices = match descriptor.indices {
            Some(indices) => {
                validate_indices(&indices, vertex_count(&faces))
                    .inspect_err(|err| log::error!("Mesh creation: {err}"))?;
                indices
            }
            None => generate_indices(&faces),
        };
        let normals = descriptor.normals.map(Normals::flatten);

        let mut faces = faces;
        offset_vertices(&mut faces, &position);
        let buffers = GpuBuffers::upload(
            ctx,
            &faces,
            &indices,
            descriptor.texture.as_ref().map(|t| t.texture),
            normals.as_deref(),
        )?;

        Ok(Self {
            position,
            faces,
            indices,
            normals,
            texture: descriptor.texture,
            dimensions: None,
            render_settings: RenderSettings::default(),
            buffers,
            buffer_updated: false,
        })
    }

    /// Cube with half-extent `size` centred on `position`.
    pub fn cube(
        ctx: &mut dyn GraphicsContext,
        position: impl Into<Vector3>,
        size: f32,
        texture: Option<TextureBuffer>,
    ) -> Result<Self> {
        let descriptor = MeshDescriptor::default()
            .with_position(position)
            .with_texture(texture);
        let mut mesh = Self::new(ctx, cube_vertices(size), descriptor)?;
        mesh.dimensions = Some((size, size));
        Ok(mesh)
    }

    /// Box with independent half-extents centred on `position`.
    pub fn cuboid(
        ctx: &mut dyn GraphicsContext,
        position: impl Into<Vector3>,
        width: f32,
        height: f32,
        depth: f32,
        texture: Option<TextureBuffer>,
    ) -> Result<Self> {
        let descriptor = MeshDescriptor::default()
            .with_position(position)
            .with_texture(texture);
        let mut mesh = Self::new(ctx, box_vertices(width, height, depth), descriptor)?;
        mesh.dimensions = Some((width, height));
        Ok(mesh)
    }

    /// Flat square as a very thin box, centred on `position`.
    ///
    /// The vertices are offset but the mesh position stays at the origin.
    pub fn square(
        ctx: &mut dyn GraphicsContext,
        position: impl Into<Vector3>,
        size: f32,
        texture: Option<TextureBuffer>,
    ) -> Result<Self> {
        let mut faces = box_vertices(size, size, SQUARE_DEPTH);
        offset_vertices(&mut faces, &position.into());

        let mut mesh = Self::new(ctx, faces, MeshDescriptor::default().with_texture(texture))?;
        mesh.dimensions = Some((size, size));
        Ok(mesh)
    }

    /// Circle, or capped cylinder when the descriptor has a depth.
    ///
    /// Built at the origin, then translated to the centre, so the returned
    /// mesh reports `buffer_updated`.
    pub fn circle(ctx: &mut dyn GraphicsContext, descriptor: CircleDescriptor) -> Result<Self> {
        let faces = circle_faces(descriptor.quality, descriptor.radius, descriptor.depth)?;

        let mut mesh_descriptor = MeshDescriptor::default().with_texture(descriptor.texture);
        mesh_descriptor.normals = descriptor.normals;

        let mut mesh = Self::new(ctx, faces, mesh_descriptor)?;
        let radius = resolve_radius(descriptor.radius);
        mesh.dimensions = Some((radius, radius));
        mesh.translate(ctx, descriptor.center)?;
        Ok(mesh)
    }

    /// Sets the position to `position` and adds it to every vertex.
    ///
    /// Repeated calls accumulate, see the module docs.
    pub fn translate(&mut self, ctx: &mut dyn GraphicsContext, position: impl Into<Vector3>) -> Result<()> {
        let position: Vector3 = position.into();
        self.position = position.copy();
        offset_vertices(&mut self.faces, &self.position);
        self.regenerate(ctx)
    }

    /// Replaces the texture and rebuilds the buffers.
    pub fn apply_texture(&mut self, ctx: &mut dyn GraphicsContext, texture: Option<TextureBuffer>) -> Result<()> {
        self.texture = texture;
        self.regenerate(ctx)
    }

    /// Replaces the normals and rebuilds the buffers.
    pub fn set_normals(&mut self, ctx: &mut dyn GraphicsContext, normals: Option<Normals>) -> Result<()> {
        self.normals = normals.map(Normals::flatten);
        self.regenerate(ctx)
    }

    fn regenerate(&mut self, ctx: &mut dyn GraphicsContext) -> Result<()> {
        let buffers = GpuBuffers::upload(
            ctx,
            &self.faces,
            &self.indices,
            self.texture.as_ref().map(|t| t.texture),
            self.normals.as_deref(),
        )?;
        let old = std::mem::replace(&mut self.buffers, buffers);
        old.release(ctx);
        self.buffer_updated = true;
        Ok(())
    }

    /// Frees the GPU buffers. The mesh is consumed.
    pub fn release(self, ctx: &mut dyn GraphicsContext) {
        self.buffers.release(ctx);
    }

    pub fn is_buffer_updated(&self) -> bool {
        self.buffer_updated
    }

    pub fn reset_buffer_update_state(&mut self) {
        self.buffer_updated = false;
    }

    pub fn position(&self) -> Vector3 {
        self.position
    }

    pub fn faces(&self) -> &FaceList {
        &self.faces
    }

    pub fn indices(&self) -> &IndexList {
        &self.indices
    }

    pub fn normals(&self) -> Option<&[f32]> {
        self.normals.as_deref()
    }

    pub fn texture(&self) -> Option<&TextureBuffer> {
        self.texture.as_ref()
    }

    pub fn texture_source(&self) -> Option<&TextureSource> {
        self.texture.as_ref().and_then(TextureBuffer::source)
    }

    /// Width and height for the built-in shapes, `None` for custom meshes.
    pub fn dimensions(&self) -> Option<(f32, f32)> {
        self.dimensions
    }

    pub fn buffers(&self) -> &GpuBuffers {
        &self.buffers
    }

    pub fn render_settings(&self) -> &RenderSettings {
        &self.render_settings
    }

    pub fn render_settings_mut(&mut self) -> &mut RenderSettings {
        &mut self.render_settings
    }
}

fn offset_vertices(faces: &mut FaceList, position: &Vector3) {
    let offset = position.to_array();
    for face in faces.iter_mut() {
        for vertex in face.chunks_exact_mut(3) {
            for (component, delta) in vertex.iter_mut().zip(offset) {
                *component += delta;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlaygroundError;
    use crate::gfx::context::RecordingContext;
    use crate::gfx::resources::texture::create_solid_texture;
    use crate::math::{Vector2, TWO_PI};

    #[test]
    fn test_cube_mesh() {
        let mut ctx = RecordingContext::new();
        let mesh = Mesh::cube(&mut ctx, Vector3::zero(), 1.0, None).unwrap();

        assert_eq!(mesh.faces().len(), 6);
        assert_eq!(mesh.indices().iter().map(Vec::len).sum::<usize>(), 36);
        assert_eq!(mesh.buffers().vertex_count, 36);
        assert!(!mesh.is_buffer_updated());
        assert_eq!(mesh.dimensions(), Some((1.0, 1.0)));
    }

    #[test]
    fn test_constructor_position_offsets_vertices() {
        let mut ctx = RecordingContext::new();
        let mesh = Mesh::cube(&mut ctx, Vector3::new(5.0, 0.0, 0.0), 1.0, None).unwrap();

        assert_eq!(mesh.position(), Vector3::new(5.0, 0.0, 0.0));
        assert!(mesh.faces()[0].chunks_exact(3).all(|v| v[0] == 4.0 || v[0] == 6.0));
    }

    #[test]
    fn test_translate_is_cumulative() {
        let mut ctx = RecordingContext::new();
        let mut mesh = Mesh::cube(&mut ctx, Vector3::zero(), 1.0, None).unwrap();
        let original = mesh.faces().clone();

        let v1 = Vector3::new(1.0, 2.0, 3.0);
        let v2 = Vector3::new(-4.0, 0.5, 1.0);
        mesh.translate(&mut ctx, v1).unwrap();
        mesh.translate(&mut ctx, v2).unwrap();

        for (face, before) in mesh.faces().iter().zip(&original) {
            for (vertex, start) in face.chunks_exact(3).zip(before.chunks_exact(3)) {
                for axis in 0..3 {
                    assert!((vertex[axis] - (start[axis] + v1[axis] + v2[axis])).abs() < 1e-6);
                }
            }
        }
        assert_eq!(mesh.position(), v2);
    }

    #[test]
    fn test_translate_regenerates_buffers() {
        let mut ctx = RecordingContext::new();
        let mut mesh = Mesh::cube(&mut ctx, Vector3::zero(), 1.0, None).unwrap();
        let before = *mesh.buffers();

        mesh.translate(&mut ctx, Vector3::new(1.0, 0.0, 0.0)).unwrap();

        assert!(mesh.is_buffer_updated());
        assert_ne!(mesh.buffers().position, before.position);
        assert!(!ctx.is_live_buffer(before.position));
        assert!(ctx.is_live_buffer(mesh.buffers().position));

        mesh.reset_buffer_update_state();
        assert!(!mesh.is_buffer_updated());
    }

    #[test]
    fn test_apply_texture() {
        let mut ctx = RecordingContext::new();
        let mut mesh = Mesh::cube(&mut ctx, Vector3::zero(), 1.0, None).unwrap();
        let texture = create_solid_texture(&mut ctx, [255, 0, 0, 255]);

        mesh.apply_texture(&mut ctx, Some(texture.clone())).unwrap();

        assert!(mesh.is_buffer_updated());
        assert_eq!(mesh.buffers().texture, Some(texture.texture));
        assert!(!mesh.buffers().owned_texture);
        assert_eq!(
            mesh.texture_source(),
            Some(&TextureSource::Solid([255, 0, 0, 255]))
        );
    }

    #[test]
    fn test_invalid_faces_rejected() {
        let mut ctx = RecordingContext::new();
        let result = Mesh::new(&mut ctx, vec![vec![0.0; 10]], MeshDescriptor::default());
        assert!(matches!(result, Err(PlaygroundError::InvalidFace { face: 0, len: 10 })));
    }

    #[test]
    fn test_explicit_indices_must_address_vertices() {
        let mut ctx = RecordingContext::new();
        let triangle = vec![vec![0.0; 9]];

        let result = Mesh::new(
            &mut ctx,
            triangle.clone(),
            MeshDescriptor::default().with_indices(vec![vec![0, 1, 500]]),
        );
        assert!(matches!(
            result,
            Err(PlaygroundError::IndexOutOfRange { index: 500, vertex_count: 3 })
        ));
        assert_eq!(ctx.live_buffer_count(), 0);

        let mesh = Mesh::new(
            &mut ctx,
            triangle,
            MeshDescriptor::default().with_indices(vec![vec![2, 1, 0]]),
        )
        .unwrap();
        assert_eq!(mesh.indices(), &vec![vec![2, 1, 0]]);
    }

    #[test]
    fn test_per_face_normals_are_flattened() {
        let mut ctx = RecordingContext::new();
        let faces = vec![vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]];
        let normals = vec![vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0]];
        let mesh = Mesh::new(&mut ctx, faces, MeshDescriptor::default().with_normals(normals)).unwrap();

        assert_eq!(mesh.normals().map(<[f32]>::len), Some(9));
    }

    #[test]
    fn test_square_from_2d_position() {
        let mut ctx = RecordingContext::new();
        let mesh = Mesh::square(&mut ctx, Vector2::new(2.0, 3.0), 1.0, None).unwrap();

        assert_eq!(mesh.position(), Vector3::zero());
        for v in mesh.faces()[0].chunks_exact(3) {
            assert!(v[0] == 1.0 || v[0] == 3.0);
            assert!(v[1] == 2.0 || v[1] == 4.0);
        }
    }

    #[test]
    fn test_circle_mesh_at_center() {
        let mut ctx = RecordingContext::new();
        let center = Vector2::new(3.0, -1.0);
        let quality = 0.4;
        let mesh = Mesh::circle(
            &mut ctx,
            CircleDescriptor::new(center).with_quality(quality).with_radius(2.0),
        )
        .unwrap();

        assert!(mesh.is_buffer_updated());
        assert_eq!(mesh.position(), Vector3::new(3.0, -1.0, 0.0));
        let ring = &mesh.faces()[0];
        assert_eq!(ring.len() / 3, (TWO_PI / quality).ceil() as usize + 1);
        for p in ring.chunks_exact(3) {
            let d = Vector2::new(p[0], p[1]).distance(&center);
            assert!((d - 2.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_circle_rejects_bad_quality() {
        let mut ctx = RecordingContext::new();
        let result = Mesh::circle(&mut ctx, CircleDescriptor::new(Vector3::zero()).with_quality(0.9));
        assert!(matches!(result, Err(PlaygroundError::InvalidQuality(_))));
        assert_eq!(ctx.live_buffer_count(), 0);
    }
}
