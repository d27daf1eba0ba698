use std::collections::HashMap;

use crate::device::{GlApi, ProgramHandle, ScalarType};
use crate::error::{ResourceError, Result};
use crate::program::ProgramInterface;

/// Declaration of one vertex attribute inside a buffer's byte layout.
///
/// `new` applies the defaults: `Float` components, not normalized, tightly
/// packed (`stride = 0`), `offset = 0`, per-vertex (`divisor = 0`).
///
/// ```
/// use bindery_engine::buffer::AttributeDesc;
/// use bindery_engine::device::ScalarType;
///
/// let color = AttributeDesc::new("a_color", 4)
///     .ty(ScalarType::UnsignedByte)
///     .normalized(true)
///     .stride(12)
///     .offset(8);
/// assert_eq!(color.divisor, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDesc {
    pub name: String,
    /// Components per vertex, 1..=4.
    pub size: u8,
    pub ty: ScalarType,
    pub normalized: bool,
    /// Bytes between consecutive elements; 0 means tightly packed.
    pub stride: u32,
    /// Byte offset of the first element.
    pub offset: u32,
    /// Instances per advance; 0 advances per vertex.
    pub divisor: u32,
}

impl AttributeDesc {
    pub fn new(name: impl Into<String>, size: u8) -> Self {
        Self {
            name: name.into(),
            size,
            ty: ScalarType::Float,
            normalized: false,
            stride: 0,
            offset: 0,
            divisor: 0,
        }
    }

    pub fn ty(mut self, ty: ScalarType) -> Self {
        self.ty = ty;
        self
    }

    pub fn normalized(mut self, normalized: bool) -> Self {
        self.normalized = normalized;
        self
    }

    pub fn stride(mut self, stride: u32) -> Self {
        self.stride = stride;
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    pub fn divisor(mut self, divisor: u32) -> Self {
        self.divisor = divisor;
        self
    }
}

/// An attribute declaration resolved against a program.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AttributePointer {
    /// Input location in the program the table was resolved against.
    pub location: u32,
    pub size: u8,
    pub ty: ScalarType,
    pub normalized: bool,
    pub stride: u32,
    pub offset: u32,
    pub divisor: u32,
}

impl AttributePointer {
    /// Bytes between consecutive elements, with a zero stride expanded to the
    /// packed element size.
    pub fn element_stride(&self) -> usize {
        if self.stride == 0 {
            self.element_size()
        } else {
            self.stride as usize
        }
    }

    /// Bytes occupied by one element (all components).
    pub fn element_size(&self) -> usize {
        usize::from(self.size) * self.ty.size_bytes()
    }

    /// Enables the array at `location`, specifies its format and divisor.
    ///
    /// The pointer sources from whatever buffer is bound at `Array`.
    pub(crate) fn apply(&self, api: &dyn GlApi) {
        api.enable_vertex_attrib_array(self.location);
        api.vertex_attrib_pointer(
            self.location,
            self.size,
            self.ty,
            self.normalized,
            self.stride,
            self.offset,
        );
        api.vertex_attrib_divisor(self.location, self.divisor);
    }
}

/// Attribute pointers of one vertex buffer, in declaration order and by name.
///
/// Built once against a program and immutable afterwards; locations are never
/// re-resolved against another program.
#[derive(Debug, Clone)]
pub struct AttributeTable {
    program: ProgramHandle,
    pointers: Vec<AttributePointer>,
    by_name: HashMap<String, usize>,
}

impl AttributeTable {
    /// Resolves every declaration against `program`.
    ///
    /// Fails on the first name the program does not expose. Declaring a name
    /// twice is allowed: both pointers are kept in order, and name lookups see
    /// the last one.
    pub fn resolve(program: &dyn ProgramInterface, declared: &[AttributeDesc]) -> Result<Self> {
        let mut pointers = Vec::with_capacity(declared.len());
        let mut by_name = HashMap::with_capacity(declared.len());

        for desc in declared {
            if !(1..=4).contains(&desc.size) {
                return Err(ResourceError::InvalidComponentCount {
                    attribute: desc.name.clone(),
                    size: desc.size,
                });
            }

            let location = program.attribute_location(&desc.name).ok_or_else(|| {
                ResourceError::AttributeNotFound {
                    attribute: desc.name.clone(),
                    program: program.handle(),
                }
            })?;

            if by_name.insert(desc.name.clone(), pointers.len()).is_some() {
                log::warn!(
                    "attribute \"{}\" declared more than once; the last declaration wins",
                    desc.name
                );
            }
            pointers.push(AttributePointer {
                location,
                size: desc.size,
                ty: desc.ty,
                normalized: desc.normalized,
                stride: desc.stride,
                offset: desc.offset,
                divisor: desc.divisor,
            });
        }

        Ok(Self {
            program: program.handle(),
            pointers,
            by_name,
        })
    }

    /// Program the locations were resolved against.
    pub fn program(&self) -> ProgramHandle {
        self.program
    }

    pub fn pointers(&self) -> &[AttributePointer] {
        &self.pointers
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AttributePointer> {
        self.pointers.iter()
    }

    pub fn get(&self, name: &str) -> Option<&AttributePointer> {
        self.by_name.get(name).map(|&i| &self.pointers[i])
    }

    /// Like [`get`](Self::get), failing with [`ResourceError::UnknownAttribute`].
    pub fn find(&self, name: &str) -> Result<&AttributePointer> {
        self.get(name).ok_or_else(|| ResourceError::UnknownAttribute {
            attribute: name.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.pointers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pointers.is_empty()
    }
}

impl<'a> IntoIterator for &'a AttributeTable {
    type Item = &'a AttributePointer;
    type IntoIter = std::slice::Iter<'a, AttributePointer>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
