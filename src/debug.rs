// src/debug.rs
//! Runtime inspection helpers.
//!
//! [`Inspector`] is a named registry sketches use to expose values for
//! debugging, such as the frame loop's stop flag or the surface size.

use std::any::{type_name, Any};
use std::collections::BTreeMap;

use crate::gfx::context::{GraphicsContext, ProgramId};

struct Entry {
    type_name: &'static str,
    value: Box<dyn Any>,
}

#[derive(Default)]
pub struct Inspector {
    entries: BTreeMap<String, Entry>,
}

impl Inspector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `value` under `name`, replacing any previous entry.
    pub fn globalize<T: Any>(&mut self, name: impl Into<String>, value: T) {
        let name = name.into();
        log::debug!("Inspector: registered {name} ({})", type_name::<T>());
        self.entries.insert(
            name,
            Entry {
                type_name: type_name::<T>(),
                value: Box::new(value),
            },
        );
    }

    /// The value under `name`, if present and of type `T`.
    pub fn get<T: Any>(&self, name: &str) -> Option<&T> {
        self.entries.get(name)?.value.downcast_ref()
    }

    pub fn get_mut<T: Any>(&mut self, name: &str) -> Option<&mut T> {
        self.entries.get_mut(name)?.value.downcast_mut()
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn log_registered(&self) {
        for (name, entry) in &self.entries {
            log::info!("Inspector: {name}: {}", entry.type_name);
        }
    }
}

/// Logs every active attribute of `program` with its location.
pub fn log_active_attributes(ctx: &dyn GraphicsContext, program: ProgramId) {
    let attributes = ctx.active_attributes(program);
    if attributes.is_empty() {
        log::info!("Program {program:?} has no active attributes");
    }
    for (name, location) in attributes {
        log::info!("Active attribute {name} at location {location}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::context::RecordingContext;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_globalize_and_get() {
        let mut inspector = Inspector::new();
        inspector.globalize("count", 3_u32);
        inspector.globalize("label", String::from("cube"));

        assert_eq!(inspector.get::<u32>("count"), Some(&3));
        assert_eq!(inspector.get::<String>("label").map(String::as_str), Some("cube"));
        assert_eq!(inspector.get::<i64>("count"), None);
        assert_eq!(inspector.get::<u32>("missing"), None);
        assert_eq!(inspector.names(), vec!["count", "label"]);
    }

    #[test]
    fn test_shared_values_stay_live() {
        let flag = Rc::new(Cell::new(false));
        let mut inspector = Inspector::new();
        inspector.globalize("stopDrawing", flag.clone());

        inspector.get::<Rc<Cell<bool>>>("stopDrawing").unwrap().set(true);
        assert!(flag.get());
    }

    #[test]
    fn test_replace_entry() {
        let mut inspector = Inspector::new();
        inspector.globalize("value", 1_i32);
        inspector.globalize("value", 2.5_f32);

        assert_eq!(inspector.get::<i32>("value"), None);
        assert_eq!(inspector.get::<f32>("value"), Some(&2.5));
        *inspector.get_mut::<f32>("value").unwrap() = 4.0;
        assert_eq!(inspector.get::<f32>("value"), Some(&4.0));
    }

    #[test]
    fn test_active_attributes_source() {
        let mut ctx = RecordingContext::new();
        let program = ctx.create_program("", "").unwrap();
        assert_eq!(ctx.active_attributes(program).len(), 4);
        log_active_attributes(&ctx, program);
    }
}
