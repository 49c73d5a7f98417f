//! Host-side copies of element array buffer contents.

use crate::handle::Handle;
use crate::vertex_arrays::type_size;
use prelude_plus::*;

#[derive(Debug, Default)]
pub struct IndexShadows {
  shadows: HashMap<Handle, Vec<u8>>,
}

impl IndexShadows {
  pub fn get(&self, buffer: Handle) -> Option<&[u8]> {
    self.shadows.get(&buffer).map(Vec::as_slice)
  }

  pub fn replace(&mut self, buffer: Handle, bytes: Vec<u8>) {
    trace!("shadowing {} bytes of {}", bytes.len(), buffer);
    self.shadows.insert(buffer, bytes);
  }

  pub fn zero_fill(&mut self, buffer: Handle, size: usize) { self.replace(buffer, vec![0; size]); }

  /// Overwrites part of a shadow. A write which doesn't fit into the current
  /// shadow leaves it untouched.
  pub fn write(&mut self, buffer: Handle, offset: usize, bytes: &[u8]) -> Result<(), String> {
    let shadow = match self.shadows.get_mut(&buffer) {
      Some(shadow) => shadow,
      None => return Ok(()),
    };
    let end = offset.checked_add(bytes.len()).filter(|&end| end <= shadow.len()).ok_or_else(|| {
      format!(
        "writing {} bytes at offset {} would go past the end of the {} byte element buffer",
        bytes.len(),
        offset,
        shadow.len()
      )
    })?;
    shadow[offset..end].copy_from_slice(bytes);
    Ok(())
  }

  /// `copyBufferSubData` into an element buffer: copies shadowed bytes or
  /// forgets the destination when the source isn't shadowed.
  pub fn copy(
    &mut self,
    src: Option<Handle>,
    dst: Handle,
    read_offset: usize,
    write_offset: usize,
    size: usize,
  ) {
    let bytes = src
      .and_then(|src| self.shadows.get(&src))
      .and_then(|shadow| shadow.get(read_offset..read_offset.checked_add(size)?))
      .map(<[u8]>::to_vec);
    match bytes {
      Some(bytes) => {
        if self.write(dst, write_offset, &bytes).is_err() {
          self.forget(dst);
        }
      }
      None => self.forget(dst),
    }
  }

  pub fn forget(&mut self, buffer: Handle) {
    if self.shadows.remove(&buffer).is_some() {
      debug!("no longer shadowing {}, index values will not be checked", buffer);
    }
  }

  pub fn clear(&mut self) { self.shadows.clear(); }
}

/// The largest of the `count` indices of `type_` starting at byte `offset`,
/// ignoring the primitive restart index when `skip_restart` is set. `None`
/// when there are no indices to read.
pub fn max_index(
  bytes: &[u8],
  type_: u32,
  count: usize,
  offset: usize,
  skip_restart: bool,
) -> Result<Option<u32>, String> {
  let index_size = type_size(type_) as usize;
  let end = count
    .checked_mul(index_size)
    .and_then(|len| len.checked_add(offset))
    .filter(|&end| end <= bytes.len())
    .ok_or_else(|| {
      format!(
        "reading {} indices of {} bytes from offset {} goes past the end of the {} byte \
         element buffer",
        count,
        index_size,
        offset,
        bytes.len()
      )
    })?;

  let restart = match index_size {
    1 => u32::from(u8::MAX),
    2 => u32::from(u16::MAX),
    _ => u32::MAX,
  };
  let max = bytes[offset..end]
    .chunks_exact(index_size)
    .map(|chunk| match chunk {
      &[a] => u32::from(a),
      &[a, b] => u32::from(u16::from_ne_bytes([a, b])),
      &[a, b, c, d] => u32::from_ne_bytes([a, b, c, d]),
      _ => 0,
    })
    .filter(|&index| !(skip_restart && index == restart))
    .max();
  Ok(max)
}
