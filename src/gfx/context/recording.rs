// src/gfx/context/recording.rs
//! Headless [`GraphicsContext`] that records every call.
//!
//! Programs expose the standard attribute and uniform names unless told
//! otherwise, buffer contents are kept for inspection, and program creation
//! can be made to fail once to exercise error paths.

use std::collections::HashMap;

use super::{
    AttributeLayout, BufferData, BufferId, BufferTarget, ClearState, DataType, DrawMode,
    GraphicsContext, ProgramId, TextureId, TextureImage, TextureSampling, UniformLocation,
};
use crate::error::{PlaygroundError, Result, ShaderStage};
use crate::gfx::resources::lighting::LIGHTING_UNIFORM_NAMES;
use crate::gfx::resources::program::{ATTRIBUTE_NAMES, UNIFORM_NAMES};

#[derive(Debug, Clone, PartialEq)]
pub enum GlCall {
    CreateBuffer {
        buffer: BufferId,
        target: BufferTarget,
        len: usize,
    },
    DeleteBuffer(BufferId),
    BindBuffer {
        target: BufferTarget,
        buffer: Option<BufferId>,
    },
    CreateTexture {
        texture: TextureId,
        width: u32,
        height: u32,
    },
    UpdateTexture {
        texture: TextureId,
        width: u32,
        height: u32,
    },
    DeleteTexture(TextureId),
    BindTexture {
        unit: u32,
        texture: Option<TextureId>,
    },
    CreateProgram(ProgramId),
    UseProgram(ProgramId),
    VertexAttribPointer {
        location: u32,
        layout: AttributeLayout,
    },
    EnableVertexAttribArray(u32),
    UniformMatrix4 {
        location: UniformLocation,
        matrix: [f32; 16],
    },
    Uniform1i {
        location: UniformLocation,
        value: i32,
    },
    Uniform1f {
        location: UniformLocation,
        value: f32,
    },
    Clear(ClearState),
    DrawElements {
        mode: DrawMode,
        count: u32,
        index_type: DataType,
        offset: u32,
    },
    DrawArrays {
        mode: DrawMode,
        first: u32,
        count: u32,
    },
}

impl GlCall {
    pub fn is_draw(&self) -> bool {
        matches!(self, GlCall::DrawElements { .. } | GlCall::DrawArrays { .. })
    }
}

/// Owned copy of uploaded buffer contents.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedData {
    F32(Vec<f32>),
    U16(Vec<u16>),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Int(i32),
    Float(f32),
    Matrix4([f32; 16]),
}

/// Failure injected into the next [`GraphicsContext::create_program`] call.
#[derive(Debug, Clone)]
pub enum ProgramFailure {
    Compile(ShaderStage, String),
    Link(String),
}

#[derive(Debug, Clone)]
struct RecordedProgram {
    attributes: Vec<String>,
    uniforms: HashMap<String, UniformLocation>,
}

#[derive(Debug, Default)]
pub struct RecordingContext {
    calls: Vec<GlCall>,
    buffers: HashMap<BufferId, RecordedData>,
    textures: HashMap<TextureId, TextureImage>,
    programs: HashMap<ProgramId, RecordedProgram>,
    uniform_names: HashMap<UniformLocation, String>,
    uniform_values: HashMap<UniformLocation, UniformValue>,
    attribute_names: Vec<String>,
    program_uniforms: Vec<String>,
    pending_failure: Option<ProgramFailure>,
    next_id: u32,
}

impl RecordingContext {
    /// Context whose programs expose every standard attribute and uniform.
    pub fn new() -> Self {
        let uniforms = UNIFORM_NAMES
            .iter()
            .chain(LIGHTING_UNIFORM_NAMES.iter())
            .map(|name| name.to_string())
            .collect();

        Self {
            attribute_names: ATTRIBUTE_NAMES.iter().map(|n| n.to_string()).collect(),
            program_uniforms: uniforms,
            next_id: 1,
            ..Default::default()
        }
    }

    /// Restricts the attributes later programs report as active.
    pub fn with_attributes(mut self, names: &[&str]) -> Self {
        self.attribute_names = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn with_uniforms(mut self, names: &[&str]) -> Self {
        self.program_uniforms = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn fail_next_program(&mut self, failure: ProgramFailure) {
        self.pending_failure = Some(failure);
    }

    pub fn calls(&self) -> &[GlCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn draw_calls(&self) -> Vec<&GlCall> {
        self.calls.iter().filter(|call| call.is_draw()).collect()
    }

    pub fn buffer_data(&self, buffer: BufferId) -> Option<&RecordedData> {
        self.buffers.get(&buffer)
    }

    pub fn is_live_buffer(&self, buffer: BufferId) -> bool {
        self.buffers.contains_key(&buffer)
    }

    pub fn live_buffer_count(&self) -> usize {
        self.buffers.len()
    }

    pub fn texture_image(&self, texture: TextureId) -> Option<&TextureImage> {
        self.textures.get(&texture)
    }

    pub fn is_live_texture(&self, texture: TextureId) -> bool {
        self.textures.contains_key(&texture)
    }

    /// Last value written to the named uniform of the newest program that set it.
    pub fn uniform_value(&self, name: &str) -> Option<UniformValue> {
        self.uniform_values
            .iter()
            .filter(|(location, _)| self.uniform_names.get(location).map(String::as_str) == Some(name))
            .max_by_key(|(location, _)| **location)
            .map(|(_, value)| *value)
    }

    pub fn uniform_name(&self, location: UniformLocation) -> Option<&str> {
        self.uniform_names.get(&location).map(String::as_str)
    }

    fn next_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl GraphicsContext for RecordingContext {
    fn create_buffer(&mut self, target: BufferTarget, data: BufferData<'_>) -> BufferId {
        let buffer = BufferId(self.next_id());
        let recorded = match data {
            BufferData::F32(values) => RecordedData::F32(values.to_vec()),
            BufferData::U16(values) => RecordedData::U16(values.to_vec()),
        };
        self.calls.push(GlCall::CreateBuffer {
            buffer,
            target,
            len: data.len(),
        });
        self.buffers.insert(buffer, recorded);
        buffer
    }

    fn delete_buffer(&mut self, buffer: BufferId) {
        self.buffers.remove(&buffer);
        self.calls.push(GlCall::DeleteBuffer(buffer));
    }

    fn bind_buffer(&mut self, target: BufferTarget, buffer: Option<BufferId>) {
        self.calls.push(GlCall::BindBuffer { target, buffer });
    }

    fn create_texture(&mut self, image: &TextureImage, _sampling: TextureSampling) -> TextureId {
        let texture = TextureId(self.next_id());
        self.calls.push(GlCall::CreateTexture {
            texture,
            width: image.width,
            height: image.height,
        });
        self.textures.insert(texture, image.clone());
        texture
    }

    fn update_texture(&mut self, texture: TextureId, image: &TextureImage, _sampling: TextureSampling) {
        self.calls.push(GlCall::UpdateTexture {
            texture,
            width: image.width,
            height: image.height,
        });
        if let Some(existing) = self.textures.get_mut(&texture) {
            *existing = image.clone();
        }
    }

    fn delete_texture(&mut self, texture: TextureId) {
        self.textures.remove(&texture);
        self.calls.push(GlCall::DeleteTexture(texture));
    }

    fn bind_texture(&mut self, unit: u32, texture: Option<TextureId>) {
        self.calls.push(GlCall::BindTexture { unit, texture });
    }

    fn create_program(&mut self, _vertex_source: &str, _fragment_source: &str) -> Result<ProgramId> {
        match self.pending_failure.take() {
            Some(ProgramFailure::Compile(stage, log)) => {
                return Err(PlaygroundError::ShaderCompile { stage, log })
            }
            Some(ProgramFailure::Link(log)) => return Err(PlaygroundError::ProgramLink(log)),
            None => {}
        }

        let program = ProgramId(self.next_id());
        let mut uniforms = HashMap::new();
        for name in self.program_uniforms.clone() {
            let location = UniformLocation(self.next_id());
            self.uniform_names.insert(location, name.clone());
            uniforms.insert(name, location);
        }
        self.programs.insert(
            program,
            RecordedProgram {
                attributes: self.attribute_names.clone(),
                uniforms,
            },
        );
        self.calls.push(GlCall::CreateProgram(program));
        Ok(program)
    }

    fn attrib_location(&self, program: ProgramId, name: &str) -> Option<u32> {
        self.programs
            .get(&program)?
            .attributes
            .iter()
            .position(|attribute| attribute == name)
            .map(|index| index as u32)
    }

    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLocation> {
        self.programs.get(&program)?.uniforms.get(name).copied()
    }

    fn active_attributes(&self, program: ProgramId) -> Vec<(String, u32)> {
        self.programs
            .get(&program)
            .map(|p| {
                p.attributes
                    .iter()
                    .enumerate()
                    .map(|(index, name)| (name.clone(), index as u32))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn use_program(&mut self, program: ProgramId) {
        self.calls.push(GlCall::UseProgram(program));
    }

    fn vertex_attrib_pointer(&mut self, location: u32, layout: AttributeLayout) {
        self.calls.push(GlCall::VertexAttribPointer { location, layout });
    }

    fn enable_vertex_attrib_array(&mut self, location: u32) {
        self.calls.push(GlCall::EnableVertexAttribArray(location));
    }

    fn uniform_matrix4(&mut self, location: UniformLocation, matrix: &[f32; 16]) {
        self.uniform_values
            .insert(location, UniformValue::Matrix4(*matrix));
        self.calls.push(GlCall::UniformMatrix4 {
            location,
            matrix: *matrix,
        });
    }

    fn uniform1i(&mut self, location: UniformLocation, value: i32) {
        self.uniform_values.insert(location, UniformValue::Int(value));
        self.calls.push(GlCall::Uniform1i { location, value });
    }

    fn uniform1f(&mut self, location: UniformLocation, value: f32) {
        self.uniform_values
            .insert(location, UniformValue::Float(value));
        self.calls.push(GlCall::Uniform1f { location, value });
    }

    fn clear(&mut self, state: ClearState) {
        self.calls.push(GlCall::Clear(state));
    }

    fn draw_elements(&mut self, mode: DrawMode, count: u32, index_type: DataType, offset: u32) {
        self.calls.push(GlCall::DrawElements {
            mode,
            count,
            index_type,
            offset,
        });
    }

    fn draw_arrays(&mut self, mode: DrawMode, first: u32, count: u32) {
        self.calls.push(GlCall::DrawArrays { mode, first, count });
    }
}
