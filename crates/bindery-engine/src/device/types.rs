use std::fmt;
use std::num::NonZeroU32;

macro_rules! object_handle {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
        pub struct $name(NonZeroU32);

        impl $name {
            /// Wraps a raw object name. Zero is the null object and yields `None`.
            #[inline]
            pub fn from_raw(raw: u32) -> Option<Self> {
                NonZeroU32::new(raw).map(Self)
            }

            /// Returns the raw object name.
            #[inline]
            pub fn raw(self) -> u32 {
                self.0.get()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, " #{}"), self.0)
            }
        }
    };
}

object_handle!(
    /// Name of a GPU buffer allocation.
    BufferHandle,
    "buffer"
);
object_handle!(
    /// Name of a vertex array object.
    VertexArrayHandle,
    "vertex array"
);
object_handle!(
    /// Name of a transform feedback object.
    FeedbackHandle,
    "transform feedback"
);
object_handle!(
    /// Name of a linked shader program.
    ProgramHandle,
    "program"
);

// ── buffer targets ────────────────────────────────────────────────────────

/// Generic buffer binding points.
///
/// Each target is a single global slot: binding a buffer at a target replaces
/// whatever was bound there before.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BufferTarget {
    /// Vertex attribute data (`ARRAY_BUFFER`).
    Array,
    /// Vertex indices (`ELEMENT_ARRAY_BUFFER`).
    ///
    /// This slot belongs to the currently bound vertex array.
    ElementArray,
    /// Uniform block storage (`UNIFORM_BUFFER`).
    Uniform,
    /// Transform feedback output (`TRANSFORM_FEEDBACK_BUFFER`).
    TransformFeedback,
    /// Source of buffer-to-buffer copies.
    CopyRead,
    /// Destination of buffer-to-buffer copies.
    CopyWrite,
}

impl BufferTarget {
    pub const ALL: [BufferTarget; 6] = [
        BufferTarget::Array,
        BufferTarget::ElementArray,
        BufferTarget::Uniform,
        BufferTarget::TransformFeedback,
        BufferTarget::CopyRead,
        BufferTarget::CopyWrite,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            BufferTarget::Array => "ARRAY_BUFFER",
            BufferTarget::ElementArray => "ELEMENT_ARRAY_BUFFER",
            BufferTarget::Uniform => "UNIFORM_BUFFER",
            BufferTarget::TransformFeedback => "TRANSFORM_FEEDBACK_BUFFER",
            BufferTarget::CopyRead => "COPY_READ_BUFFER",
            BufferTarget::CopyWrite => "COPY_WRITE_BUFFER",
        }
    }
}

impl fmt::Display for BufferTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Buffer targets that also expose an array of indexed binding slots.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum IndexedTarget {
    Uniform,
    TransformFeedback,
}

impl IndexedTarget {
    /// The generic binding point that indexed binds also update.
    pub const fn buffer_target(self) -> BufferTarget {
        match self {
            IndexedTarget::Uniform => BufferTarget::Uniform,
            IndexedTarget::TransformFeedback => BufferTarget::TransformFeedback,
        }
    }
}

impl fmt::Display for IndexedTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.buffer_target().name())
    }
}

// ── usage hints ───────────────────────────────────────────────────────────

/// Data store usage hint passed with every full upload.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum BufferUsage {
    #[default]
    StaticDraw,
    DynamicDraw,
    StreamDraw,
    StaticRead,
    DynamicRead,
    StreamRead,
    StaticCopy,
    DynamicCopy,
    StreamCopy,
}

impl BufferUsage {
    pub const ALL: [BufferUsage; 9] = [
        BufferUsage::StaticDraw,
        BufferUsage::DynamicDraw,
        BufferUsage::StreamDraw,
        BufferUsage::StaticRead,
        BufferUsage::DynamicRead,
        BufferUsage::StreamRead,
        BufferUsage::StaticCopy,
        BufferUsage::DynamicCopy,
        BufferUsage::StreamCopy,
    ];
}

// ── scalar types ──────────────────────────────────────────────────────────

/// Component type of a vertex attribute or typed upload.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum ScalarType {
    Byte,
    UnsignedByte,
    Short,
    UnsignedShort,
    Int,
    UnsignedInt,
    HalfFloat,
    #[default]
    Float,
}

impl ScalarType {
    /// Size of one component in bytes.
    pub const fn size_bytes(self) -> usize {
        match self {
            ScalarType::Byte | ScalarType::UnsignedByte => 1,
            ScalarType::Short | ScalarType::UnsignedShort | ScalarType::HalfFloat => 2,
            ScalarType::Int | ScalarType::UnsignedInt | ScalarType::Float => 4,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ScalarType::Byte => "BYTE",
            ScalarType::UnsignedByte => "UNSIGNED_BYTE",
            ScalarType::Short => "SHORT",
            ScalarType::UnsignedShort => "UNSIGNED_SHORT",
            ScalarType::Int => "INT",
            ScalarType::UnsignedInt => "UNSIGNED_INT",
            ScalarType::HalfFloat => "HALF_FLOAT",
            ScalarType::Float => "FLOAT",
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── feedback primitives ───────────────────────────────────────────────────

/// Primitive topology captured by a transform feedback region.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum FeedbackPrimitive {
    #[default]
    Points,
    Lines,
    Triangles,
}
