//! Typed upload payloads.

use crate::device::ScalarType;

/// Borrowed view over a numeric array, tagged with its component type.
///
/// Every buffer upload takes one of these. The view never copies; the bytes
/// handed to the device are the slice's native-endian memory.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum TypedData<'a> {
    I8(&'a [i8]),
    U8(&'a [u8]),
    I16(&'a [i16]),
    U16(&'a [u16]),
    I32(&'a [i32]),
    U32(&'a [u32]),
    F32(&'a [f32]),
}

impl<'a> TypedData<'a> {
    /// Raw bytes of the view.
    pub fn as_bytes(&self) -> &'a [u8] {
        match *self {
            TypedData::I8(d) => bytemuck::cast_slice(d),
            TypedData::U8(d) => d,
            TypedData::I16(d) => bytemuck::cast_slice(d),
            TypedData::U16(d) => bytemuck::cast_slice(d),
            TypedData::I32(d) => bytemuck::cast_slice(d),
            TypedData::U32(d) => bytemuck::cast_slice(d),
            TypedData::F32(d) => bytemuck::cast_slice(d),
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        match self {
            TypedData::I8(d) => d.len(),
            TypedData::U8(d) => d.len(),
            TypedData::I16(d) => d.len(),
            TypedData::U16(d) => d.len(),
            TypedData::I32(d) => d.len(),
            TypedData::U32(d) => d.len(),
            TypedData::F32(d) => d.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn byte_len(&self) -> usize {
        self.len() * self.element_size()
    }

    #[inline]
    pub fn element_size(&self) -> usize {
        self.scalar_type().size_bytes()
    }

    pub fn scalar_type(&self) -> ScalarType {
        match self {
            TypedData::I8(_) => ScalarType::Byte,
            TypedData::U8(_) => ScalarType::UnsignedByte,
            TypedData::I16(_) => ScalarType::Short,
            TypedData::U16(_) => ScalarType::UnsignedShort,
            TypedData::I32(_) => ScalarType::Int,
            TypedData::U32(_) => ScalarType::UnsignedInt,
            TypedData::F32(_) => ScalarType::Float,
        }
    }
}

macro_rules! typed_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl<'a> From<&'a [$ty]> for TypedData<'a> {
                fn from(data: &'a [$ty]) -> Self {
                    TypedData::$variant(data)
                }
            }

            impl<'a, const N: usize> From<&'a [$ty; N]> for TypedData<'a> {
                fn from(data: &'a [$ty; N]) -> Self {
                    TypedData::$variant(data)
                }
            }

            impl<'a> From<&'a Vec<$ty>> for TypedData<'a> {
                fn from(data: &'a Vec<$ty>) -> Self {
                    TypedData::$variant(data)
                }
            }
        )*
    };
}

typed_from! {
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    f32 => F32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_length_scales_with_element_size() {
        let data = TypedData::from(&[1u16, 2, 3]);
        assert_eq!(data.len(), 3);
        assert_eq!(data.byte_len(), 6);
        assert_eq!(data.as_bytes().len(), 6);
        assert_eq!(data.scalar_type(), ScalarType::UnsignedShort);
    }

    #[test]
    fn float_bytes_are_native_endian() {
        let data = TypedData::from(&[1.5f32]);
        assert_eq!(data.as_bytes(), 1.5f32.to_ne_bytes());
    }

    #[test]
    fn empty_view() {
        let empty: &[i32] = &[];
        let data = TypedData::from(empty);
        assert!(data.is_empty());
        assert_eq!(data.byte_len(), 0);
    }
}
