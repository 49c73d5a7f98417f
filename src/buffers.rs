use crate::handle::Handle;
use crate::value::Value;
use prelude_plus::*;

/// Byte sizes of buffers and the bindings of every buffer target except
/// `ELEMENT_ARRAY_BUFFER`, which belongs to the current vertex array.
#[derive(Debug, Default)]
pub struct Buffers {
  sizes: HashMap<Handle, u64>,
  bindings: HashMap<u32, Handle>,
}

impl Buffers {
  pub fn create(&mut self, buffer: Handle) { self.sizes.insert(buffer, 0); }

  pub fn delete(&mut self, buffer: Handle) {
    self.sizes.remove(&buffer);
    self.bindings.retain(|_, bound| *bound != buffer);
  }

  /// Returns the previous binding of `target`.
  pub fn bind(&mut self, target: u32, buffer: Option<Handle>) -> Option<Handle> {
    match buffer {
      Some(buffer) => self.bindings.insert(target, buffer),
      None => self.bindings.remove(&target),
    }
  }

  #[inline]
  pub fn bound(&self, target: u32) -> Option<Handle> { self.bindings.get(&target).copied() }

  pub fn set_size(&mut self, buffer: Handle, size: u64) { self.sizes.insert(buffer, size); }

  /// `None` for buffers which were never created through the linted context.
  pub fn size(&self, buffer: Handle) -> Option<u64> { self.sizes.get(&buffer).copied() }

  pub fn clear(&mut self) {
    self.sizes.clear();
    self.bindings.clear();
  }
}

/// The byte size of a `bufferData` payload: either a size or an array whose
/// elements, from `src_offset` and `length` if present, are uploaded.
pub fn payload_size(data: &Value, src_offset: usize, length: Option<usize>) -> Option<u64> {
  match data {
    Value::Number(_) => data.as_u32().map(u64::from),
    Value::Array(array) => {
      let element_size = array.element_size().unwrap_or(1);
      let available = array.len().saturating_sub(src_offset);
      let count = match length {
        Some(length) if length > 0 => length.min(available),
        _ => available,
      };
      Some((count * element_size) as u64)
    }
    _ => None,
  }
}
