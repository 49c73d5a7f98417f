//! Predicts vertex fetches past the end of attribute buffers.

use crate::buffers::Buffers;
use crate::entry_points::EntryPoint;
use crate::handle::Handle;
use crate::index_shadow::{self, IndexShadows};
use crate::programs::ProgramRecord;
use crate::tags::TagRegistry;
use crate::value::Value;
use crate::vertex_arrays::VertexArrayState;
use prelude_plus::*;

/// The vertices and instances a draw call touches.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DrawRequest {
  /// `None` when no vertex is fetched or the index values are unknown.
  pub last_vertex: Option<u64>,
  pub instance_count: u64,
}

impl DrawRequest {
  /// The last element of an attribute with `divisor` which gets fetched.
  pub fn last_element(&self, divisor: u32) -> Option<u64> {
    if divisor == 0 {
      self.last_vertex
    } else if self.instance_count == 0 {
      None
    } else {
      let divisor = u64::from(divisor);
      Some((self.instance_count + divisor - 1) / divisor - 1)
    }
  }
}

/// Works out the touched vertex range of a draw call, reading index values
/// from the shadow of the element buffer for indexed draws.
pub fn draw_request(
  entry: EntryPoint,
  args: &[Value],
  element_buffer: Option<Handle>,
  shadows: &IndexShadows,
  skip_restart: bool,
) -> Result<DrawRequest, String> {
  let arg = |i: usize| args.get(i).and_then(Value::as_u32).map_or(0, u64::from);
  let instances = |i: usize| if args.len() > i { arg(i) } else { 1 };

  if !entry.is_indexed_draw() {
    let (first, count) = (arg(1), arg(2));
    let last_vertex = if count > 0 { Some(first + count - 1) } else { None };
    return Ok(DrawRequest { last_vertex, instance_count: instances(3) });
  }

  let (count, type_, offset, instance_count) = match entry {
    EntryPoint::DrawRangeElements => (arg(3), arg(4), arg(5), 1),
    _ => (arg(1), arg(2), arg(3), instances(4)),
  };
  let element_buffer = element_buffer.ok_or_else(|| "no ELEMENT_ARRAY_BUFFER bound".to_owned())?;
  let last_vertex = match shadows.get(element_buffer) {
    Some(bytes) => {
      let (count, offset) = (count as usize, offset as usize);
      let max = index_shadow::max_index(bytes, type_ as u32, count, offset, skip_restart)?;
      max.map(u64::from)
    }
    None => {
      debug!("{} has no shadow, skipping the index range check", element_buffer);
      None
    }
  };
  Ok(DrawRequest { last_vertex, instance_count })
}

/// Compares the bytes every enabled attribute of `program` fetches against
/// the size of its buffer.
pub fn check_attribs(
  program: &ProgramRecord,
  state: &VertexArrayState,
  buffers: &Buffers,
  tags: &TagRegistry,
  request: &DrawRequest,
) -> Vec<String> {
  let mut problems = Vec::new();
  for attrib in program.attribs() {
    let pointer = match state.attrib(attrib.location) {
      Some(pointer) if pointer.enabled => pointer,
      _ => continue,
    };
    let buffer = match pointer.buffer {
      Some(buffer) => buffer,
      None => {
        problems.push(format!("attribute {} is enabled but has no buffer bound", attrib.name));
        continue;
      }
    };
    let last = match request.last_element(pointer.divisor) {
      Some(last) => last,
      None => continue,
    };

    let needed = last
      .checked_mul(pointer.effective_stride())
      .and_then(|end| end.checked_add(pointer.offset))
      .and_then(|end| end.checked_add(pointer.bytes_per_element()));
    let needed = match needed {
      Some(needed) => needed,
      None => {
        problems.push(format!(
          "attribute {} needs more bytes from {} than can be addressed",
          attrib.name,
          tags.describe(buffer)
        ));
        continue;
      }
    };
    let available = match buffers.size(buffer) {
      Some(available) => available,
      None => {
        debug!("the size of {} is unknown, skipping the range check of {}", buffer, attrib.name);
        continue;
      }
    };
    if needed > available {
      problems.push(format!(
        "attribute {} needs {} bytes from {} but it only has {} bytes",
        attrib.name,
        needed,
        tags.describe(buffer),
        available
      ));
    }
  }
  problems
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::Config;
  use crate::handle::{LiveHandles, ObjectKind};
  use crate::value::ActiveInfo;
  use crate::vertex_arrays::{AttribPointer, VertexArrays};

  fn texcoord_program() -> ProgramRecord {
    let texcoord = ActiveInfo { name: "texcoord".to_owned(), size: 1, type_: gl::FLOAT_VEC2 };
    ProgramRecord::from_reflection(&[], &[(texcoord, 0)], &Config::default())
  }

  fn check_with_buffer(size: Option<u64>, offset: u64, request: DrawRequest) -> Vec<String> {
    let buffer = Handle::new(ObjectKind::Buffer, 1);
    let mut live = LiveHandles::default();
    live.insert(buffer);
    let mut tags = TagRegistry::default();
    tags.tag(buffer, "uvs");
    let mut buffers = Buffers::default();
    if let Some(size) = size {
      buffers.create(buffer);
      buffers.set_size(buffer, size);
    }

    let mut arrays = VertexArrays::new(8);
    let pointer =
      AttribPointer { buffer: Some(buffer), size: 2, offset, ..AttribPointer::default() };
    arrays.set_pointer(0, pointer, &live);
    arrays.set_enabled(0, true);
    check_attribs(&texcoord_program(), arrays.current_state(), &buffers, &tags, &request)
  }

  #[test]
  fn reports_undersized_buffers() {
    let request = DrawRequest { last_vertex: Some(2), instance_count: 1 };
    assert_eq!(
      check_with_buffer(Some(16), 0, request),
      ["attribute texcoord needs 24 bytes from Buffer(\"uvs\") but it only has 16 bytes"]
    );
    assert!(check_with_buffer(Some(24), 0, request).is_empty());
  }

  #[test]
  fn buffers_of_unknown_size_are_skipped() {
    let request = DrawRequest { last_vertex: Some(2), instance_count: 1 };
    assert!(check_with_buffer(None, 0, request).is_empty());
    assert_eq!(check_with_buffer(Some(0), 0, request).len(), 1);
  }

  #[test]
  fn huge_offsets_do_not_wrap_around() {
    let request = DrawRequest { last_vertex: Some(2), instance_count: 1 };
    assert_eq!(
      check_with_buffer(Some(24), u64::MAX - 8, request),
      ["attribute texcoord needs more bytes from Buffer(\"uvs\") than can be addressed"]
    );
    assert_eq!(
      check_with_buffer(
        None,
        0,
        DrawRequest { last_vertex: Some(u64::MAX / 2), instance_count: 1 }
      ),
      ["attribute texcoord needs more bytes from Buffer(\"uvs\") than can be addressed"]
    );
  }

  #[test]
  fn divisors_count_instances() {
    let request = DrawRequest { last_vertex: Some(0), instance_count: 5 };
    assert_eq!(request.last_element(0), Some(0));
    assert_eq!(request.last_element(2), Some(2));
    assert_eq!(request.last_element(5), Some(0));
    assert_eq!(DrawRequest { last_vertex: None, instance_count: 0 }.last_element(1), None);
  }

  #[test]
  fn indexed_draws_read_the_shadow() {
    let element_buffer = Handle::new(ObjectKind::Buffer, 7);
    let mut shadows = IndexShadows::default();
    let indices = [0u16, 3, 1].iter().flat_map(|i| i.to_ne_bytes().to_vec()).collect();
    shadows.replace(element_buffer, indices);
    let args =
      [Value::from(gl::TRIANGLES), Value::from(3), Value::from(gl::UNSIGNED_SHORT), Value::from(0)];

    let request =
      draw_request(EntryPoint::DrawElements, &args, Some(element_buffer), &shadows, false);
    assert_eq!(request, Ok(DrawRequest { last_vertex: Some(3), instance_count: 1 }));
    assert!(draw_request(EntryPoint::DrawElements, &args, None, &shadows, false).is_err());
  }
}
