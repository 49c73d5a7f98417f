use crate::handle::Handle;
use prelude_plus::*;

/// A dynamically typed argument or return value of an entry point. The set of
/// variants mirrors what WebGL-style APIs pass around: numbers for enums and
/// sizes, opaque objects, typed arrays and plain sequences, strings for
/// shader sources and names.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
  Undefined,
  Null,
  Bool(bool),
  Number(f64),
  Str(String),
  Object(Handle),
  Array(ArrayData),
  /// A DOM-style image source of which only the dimensions matter.
  Image(ImageSize),
  ActiveInfo(ActiveInfo),
  List(Vec<Value>),
}

impl Default for Value {
  fn default() -> Self { Self::Undefined }
}

impl Value {
  #[inline]
  pub fn is_undefined(&self) -> bool { matches!(self, Self::Undefined) }

  #[inline]
  pub fn is_nullish(&self) -> bool { matches!(self, Self::Undefined | Self::Null) }

  /// Numeric interpretation with the usual coercion of booleans.
  pub fn as_f64(&self) -> Option<f64> {
    match *self {
      Self::Number(n) => Some(n),
      Self::Bool(b) => Some(if b { 1.0 } else { 0.0 }),
      _ => None,
    }
  }

  pub fn as_u32(&self) -> Option<u32> {
    self.as_f64().filter(|n| n.is_finite() && *n >= 0.0).map(|n| n as u32)
  }

  pub fn as_i64(&self) -> Option<i64> {
    self.as_f64().filter(|n| n.is_finite()).map(|n| n as i64)
  }

  pub fn as_usize(&self) -> Option<usize> {
    self.as_f64().filter(|n| n.is_finite() && *n >= 0.0).map(|n| n as usize)
  }

  pub fn as_bool(&self) -> bool {
    match self {
      Self::Undefined | Self::Null => false,
      Self::Bool(b) => *b,
      Self::Number(n) => *n != 0.0 && !n.is_nan(),
      Self::Str(s) => !s.is_empty(),
      _ => true,
    }
  }

  pub fn as_handle(&self) -> Option<Handle> {
    match *self {
      Self::Object(handle) => Some(handle),
      _ => None,
    }
  }

  pub fn as_str(&self) -> Option<&str> {
    match self {
      Self::Str(s) => Some(s),
      _ => None,
    }
  }

  pub fn as_array(&self) -> Option<&ArrayData> {
    match self {
      Self::Array(array) => Some(array),
      _ => None,
    }
  }

  /// `true` for the values accepted at a position which must hold a number.
  pub fn is_numeric(&self) -> bool { matches!(self, Self::Number(_) | Self::Bool(_)) }

  pub fn is_nan(&self) -> bool { matches!(self, Self::Number(n) if n.is_nan()) }
}

macro_rules! impl_value_from_number {
  ($($ty:ty),+) => {
    $(impl From<$ty> for Value {
      #[inline(always)]
      fn from(n: $ty) -> Self { Self::Number(n as f64) }
    })+
  };
}

impl_value_from_number!(u8, i8, u16, i16, u32, i32, u64, i64, usize, isize, f32, f64);

impl From<bool> for Value {
  fn from(b: bool) -> Self { Self::Bool(b) }
}

impl From<Handle> for Value {
  fn from(handle: Handle) -> Self { Self::Object(handle) }
}

impl From<Option<Handle>> for Value {
  fn from(handle: Option<Handle>) -> Self {
    match handle {
      Some(handle) => Self::Object(handle),
      None => Self::Null,
    }
  }
}

impl From<&str> for Value {
  fn from(s: &str) -> Self { Self::Str(s.to_owned()) }
}

impl From<String> for Value {
  fn from(s: String) -> Self { Self::Str(s) }
}

impl From<ArrayData> for Value {
  fn from(array: ArrayData) -> Self { Self::Array(array) }
}

impl From<ImageSize> for Value {
  fn from(size: ImageSize) -> Self { Self::Image(size) }
}

impl From<()> for Value {
  fn from(_: ()) -> Self { Self::Undefined }
}

macro_rules! impl_typed_array {
  ($($variant:ident($ty:ty) => $js_name:literal),+ $(,)?) => {
    /// The contents of an array-like argument. Typed variants correspond to
    /// JS typed arrays, [`ArrayData::Values`] to a plain JS array which may
    /// hold anything including holes.
    #[derive(Debug, Clone, PartialEq)]
    pub enum ArrayData {
      $($variant(Vec<$ty>),)+
      Values(Vec<Value>),
    }

    impl ArrayData {
      pub fn len(&self) -> usize {
        match self {
          $(Self::$variant(v) => v.len(),)+
          Self::Values(v) => v.len(),
        }
      }

      /// Element `index` as a number, `None` for holes and non-numbers.
      pub fn get_f64(&self, index: usize) -> Option<f64> {
        match self {
          $(Self::$variant(v) => v.get(index).map(|&x| x as f64),)+
          Self::Values(v) => v.get(index).and_then(Value::as_f64),
        }
      }

      /// Size in bytes of a single element, `None` for plain arrays which have
      /// no binary representation.
      pub fn element_size(&self) -> Option<usize> {
        match self {
          $(Self::$variant(_) => Some(mem::size_of::<$ty>()),)+
          Self::Values(_) => None,
        }
      }

      pub fn type_name(&self) -> &'static str {
        match self {
          $(Self::$variant(_) => $js_name,)+
          Self::Values(_) => "Array",
        }
      }

      /// Native-endian bytes of `range` (in elements), clamped to the array.
      pub fn to_bytes(&self, range: Range<usize>) -> Vec<u8> {
        let end = range.end.min(self.len());
        let start = range.start.min(end);
        let mut bytes = Vec::new();
        match self {
          $(Self::$variant(v) => {
            for x in &v[start..end] {
              bytes.extend_from_slice(&x.to_ne_bytes());
            }
          })+
          Self::Values(_) => {}
        }
        bytes
      }
    }

    $(impl From<Vec<$ty>> for ArrayData {
      fn from(v: Vec<$ty>) -> Self { Self::$variant(v) }
    }

    impl From<Vec<$ty>> for Value {
      fn from(v: Vec<$ty>) -> Self { Self::Array(ArrayData::$variant(v)) }
    }

    impl From<&[$ty]> for Value {
      fn from(v: &[$ty]) -> Self { Self::Array(ArrayData::$variant(v.to_vec())) }
    })+
  };
}

impl_typed_array! {
  I8(i8) => "Int8Array",
  U8(u8) => "Uint8Array",
  I16(i16) => "Int16Array",
  U16(u16) => "Uint16Array",
  I32(i32) => "Int32Array",
  U32(u32) => "Uint32Array",
  F32(f32) => "Float32Array",
  F64(f64) => "Float64Array",
}

impl ArrayData {
  #[inline]
  pub fn is_empty(&self) -> bool { self.len() == 0 }

  pub fn is_float(&self) -> bool { matches!(self, Self::F32(_) | Self::F64(_)) }

  pub fn is_typed(&self) -> bool { !matches!(self, Self::Values(_)) }

  pub fn iter_f64(&self) -> impl Iterator<Item = Option<f64>> + '_ {
    (0..self.len()).map(move |i| self.get_f64(i))
  }

  /// The first element which is a hole or NaN, used by the default argument
  /// scan.
  pub fn find_invalid_element(&self) -> Option<(usize, &'static str)> {
    match self {
      Self::Values(values) => values.iter().enumerate().find_map(|(i, value)| match value {
        Value::Undefined => Some((i, "undefined")),
        value if value.is_nan() => Some((i, "NaN")),
        _ => None,
      }),
      Self::F32(v) => v.iter().position(|x| x.is_nan()).map(|i| (i, "NaN")),
      Self::F64(v) => v.iter().position(|x| x.is_nan()).map(|i| (i, "NaN")),
      _ => None,
    }
  }
}

impl From<Vec<Value>> for ArrayData {
  fn from(v: Vec<Value>) -> Self { Self::Values(v) }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ImageSize {
  pub width: u32,
  pub height: u32,
}

/// Reflection record returned by `getActiveUniform` and `getActiveAttrib`.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct ActiveInfo {
  pub name: String,
  pub size: u32,
  pub type_: u32,
}
