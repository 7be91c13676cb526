//! Per-mesh attribute layout overrides.

use crate::gfx::context::{AttributeLayout, DataType};

pub const POSITION_DEFAULTS: AttributeLayout = AttributeLayout::tightly_packed(3, DataType::Float);
pub const TEXTURE_DEFAULTS: AttributeLayout = AttributeLayout::tightly_packed(2, DataType::Float);
pub const NORMAL_DEFAULTS: AttributeLayout = AttributeLayout::tightly_packed(3, DataType::Float);

/// Optional overrides for one attribute channel. `None` keeps the renderer default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttributeSettings {
    pub num_components: Option<i32>,
    pub data_type: Option<DataType>,
    pub normalize: Option<bool>,
    pub stride: Option<i32>,
    pub offset: Option<i32>,
}

impl AttributeSettings {
    pub fn resolve(&self, defaults: AttributeLayout) -> AttributeLayout {
        AttributeLayout {
            components: self.num_components.unwrap_or(defaults.components),
            data_type: self.data_type.unwrap_or(defaults.data_type),
            normalized: self.normalize.unwrap_or(defaults.normalized),
            stride: self.stride.unwrap_or(defaults.stride),
            offset: self.offset.unwrap_or(defaults.offset),
        }
    }

    pub fn with_components(mut self, components: i32) -> Self {
        self.num_components = Some(components);
        self
    }

    pub fn with_data_type(mut self, data_type: DataType) -> Self {
        self.data_type = Some(data_type);
        self
    }

    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = Some(normalize);
        self
    }

    pub fn with_stride(mut self, stride: i32) -> Self {
        self.stride = Some(stride);
        self
    }

    pub fn with_offset(mut self, offset: i32) -> Self {
        self.offset = Some(offset);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderSettings {
    pub positions: AttributeSettings,
    pub textures: AttributeSettings,
    pub normals: AttributeSettings,
}

impl RenderSettings {
    pub fn position_layout(&self) -> AttributeLayout {
        self.positions.resolve(POSITION_DEFAULTS)
    }

    pub fn texture_layout(&self) -> AttributeLayout {
        self.textures.resolve(TEXTURE_DEFAULTS)
    }

    pub fn normal_layout(&self) -> AttributeLayout {
        self.normals.resolve(NORMAL_DEFAULTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = RenderSettings::default();
        let position = settings.position_layout();
        assert_eq!(
            (position.components, position.data_type, position.normalized, position.stride, position.offset),
            (3, DataType::Float, false, 12, 0)
        );
        assert_eq!(settings.texture_layout().components, 2);
        assert_eq!(settings.texture_layout().stride, 8);
    }

    #[test]
    fn test_overrides_replace_defaults() {
        let settings = RenderSettings {
            positions: AttributeSettings::default().with_components(4).with_stride(32).with_offset(16),
            ..Default::default()
        };
        let layout = settings.position_layout();
        assert_eq!(layout.components, 4);
        assert_eq!(layout.stride, 32);
        assert_eq!(layout.offset, 16);
        assert_eq!(layout.data_type, DataType::Float);
        assert_eq!(settings.normal_layout(), NORMAL_DEFAULTS);
    }
}
