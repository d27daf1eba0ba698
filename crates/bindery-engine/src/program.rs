//! Program reflection seam.
//!
//! Shader compilation and linking happen elsewhere. Resources only need to
//! turn names into locations against a specific linked program, which is what
//! [`ProgramInterface`] provides.

use std::collections::HashMap;

use crate::device::ProgramHandle;

/// Name resolution against one linked program.
pub trait ProgramInterface {
    /// The program these lookups are answered for.
    fn handle(&self) -> ProgramHandle;

    /// Location of the active vertex input `name`, if the program has one.
    fn attribute_location(&self, name: &str) -> Option<u32>;

    /// Index of the uniform block `name`, if the program declares it.
    fn uniform_block_index(&self, name: &str) -> Option<u32>;
}

/// Static description of a program's vertex inputs and uniform blocks.
///
/// ```
/// use bindery_engine::program::ProgramLayout;
///
/// let layout = ProgramLayout::new()
///     .attribute("a_position", 0)
///     .attribute("a_color", 1)
///     .uniform_block("Camera");
/// assert_eq!(layout.attributes.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramLayout {
    /// `(name, location)` pairs.
    pub attributes: Vec<(String, u32)>,
    /// Block names; a block's index is its position in this list.
    pub uniform_blocks: Vec<String>,
}

impl ProgramLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attribute(mut self, name: impl Into<String>, location: u32) -> Self {
        self.attributes.push((name.into(), location));
        self
    }

    pub fn uniform_block(mut self, name: impl Into<String>) -> Self {
        self.uniform_blocks.push(name.into());
        self
    }
}

/// A program backed by a [`ProgramLayout`] table.
///
/// Pairs with [`SoftDevice`](crate::device::soft::SoftDevice), which hands these
/// out from `create_program`, but any device can use it when reflection data is
/// known ahead of time.
#[derive(Debug, Clone)]
pub struct SoftProgram {
    handle: ProgramHandle,
    attributes: HashMap<String, u32>,
    uniform_blocks: Vec<String>,
}

impl SoftProgram {
    pub fn new(handle: ProgramHandle, layout: ProgramLayout) -> Self {
        Self {
            handle,
            attributes: layout.attributes.into_iter().collect(),
            uniform_blocks: layout.uniform_blocks,
        }
    }
}

impl ProgramInterface for SoftProgram {
    fn handle(&self) -> ProgramHandle {
        self.handle
    }

    fn attribute_location(&self, name: &str) -> Option<u32> {
        self.attributes.get(name).copied()
    }

    fn uniform_block_index(&self, name: &str) -> Option<u32> {
        self.uniform_blocks
            .iter()
            .position(|b| b == name)
            .and_then(|i| u32::try_from(i).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program() -> SoftProgram {
        let layout = ProgramLayout::new()
            .attribute("a_position", 0)
            .attribute("a_offset", 3)
            .uniform_block("Camera")
            .uniform_block("Lights");
        SoftProgram::new(ProgramHandle::from_raw(9).unwrap(), layout)
    }

    #[test]
    fn attributes_resolve_by_name() {
        let p = program();
        assert_eq!(p.attribute_location("a_offset"), Some(3));
        assert_eq!(p.attribute_location("a_missing"), None);
    }

    #[test]
    fn block_index_is_declaration_order() {
        let p = program();
        assert_eq!(p.uniform_block_index("Camera"), Some(0));
        assert_eq!(p.uniform_block_index("Lights"), Some(1));
        assert_eq!(p.uniform_block_index("Fog"), None);
    }
}
