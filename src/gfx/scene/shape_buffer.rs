//! Ordered collection of meshes and a snapshot of their GPU buffers.

use super::Mesh;
use crate::error::{PlaygroundError, Result};
use crate::gfx::context::{GraphicsContext, TextureId};
use crate::gfx::rendering::{GpuBuffers, RenderSettings};

/// Meshes in draw order, with the buffers the renderer will bind for each.
///
/// The buffer list is a snapshot. After a mesh regenerates its buffers the
/// snapshot is stale until [`ShapeBuffer::update_buffers`] runs, which the
/// frame loop does once per frame before drawing.
#[derive(Debug, Default)]
pub struct ShapeBuffer {
    shapes: Vec<Mesh>,
    buffers: Vec<GpuBuffers>,
}

impl ShapeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, mesh: Mesh) {
        self.buffers.push(*mesh.buffers());
        self.shapes.push(mesh);
    }

    pub fn add_all(&mut self, meshes: impl IntoIterator<Item = Mesh>) {
        for mesh in meshes {
            self.add(mesh);
        }
    }

    /// Removes the mesh at `index`, shifting later meshes down.
    ///
    /// `index == len()` is accepted and removes nothing. Larger indices are
    /// rejected with [`PlaygroundError::InvalidIndex`].
    ///
    /// The returned mesh still owns its GPU buffers. Pass it to
    /// [`Mesh::release`], or use [`ShapeBuffer::remove_and_release`].
    pub fn remove(&mut self, index: usize) -> Result<Option<Mesh>> {
        let len = self.shapes.len();
        if index > len {
            let err = PlaygroundError::InvalidIndex { index, len };
            log::error!("{err}");
            return Err(err);
        }
        if index == len {
            return Ok(None);
        }

        self.buffers.remove(index);
        Ok(Some(self.shapes.remove(index)))
    }

    /// Removes the mesh at `index` and frees its GPU buffers.
    ///
    /// Returns whether a mesh was removed, with the bounds of [`ShapeBuffer::remove`].
    pub fn remove_and_release(&mut self, ctx: &mut dyn GraphicsContext, index: usize) -> Result<bool> {
        let removed = self.remove(index)?;
        let found = removed.is_some();
        if let Some(mesh) = removed {
            mesh.release(ctx);
        }
        Ok(found)
    }

    /// Frees every mesh's GPU buffers and empties the buffer.
    pub fn clear(&mut self, ctx: &mut dyn GraphicsContext) {
        self.buffers.clear();
        for mesh in self.shapes.drain(..) {
            mesh.release(ctx);
        }
    }

    /// Frees every mesh's GPU buffers.
    ///
    /// Dropping a `ShapeBuffer` leaves its buffers alive in the context.
    pub fn release(mut self, ctx: &mut dyn GraphicsContext) {
        self.clear(ctx);
    }

    /// Copies fresh buffers from every mesh that regenerated. Flags are left set.
    pub fn update_buffers(&mut self) {
        for (mesh, buffers) in self.shapes.iter().zip(self.buffers.iter_mut()) {
            if mesh.is_buffer_updated() {
                *buffers = *mesh.buffers();
            }
        }
    }

    /// Clears the update flag of every mesh after a resync.
    pub fn reset_update_states(&mut self) {
        self.shapes
            .iter_mut()
            .for_each(Mesh::reset_buffer_update_state);
    }

    pub fn texture(&self, index: usize) -> Option<TextureId> {
        self.buffers.get(index).and_then(|b| b.texture)
    }

    pub fn shape(&self, index: usize) -> Option<&Mesh> {
        self.shapes.get(index)
    }

    pub fn shape_mut(&mut self, index: usize) -> Option<&mut Mesh> {
        self.shapes.get_mut(index)
    }

    pub fn render_settings(&self, index: usize) -> Option<&RenderSettings> {
        self.shapes.get(index).map(Mesh::render_settings)
    }

    pub fn buffers(&self) -> &[GpuBuffers] {
        &self.buffers
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mesh> {
        self.shapes.iter()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl Extend<Mesh> for ShapeBuffer {
    fn extend<T: IntoIterator<Item = Mesh>>(&mut self, iter: T) {
        self.add_all(iter);
    }
}
