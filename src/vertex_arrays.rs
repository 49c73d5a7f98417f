//! Vertex array objects and the attribute state they capture.

use crate::entry_points::EntryPoint;
use crate::handle::{Handle, LiveHandles};
use prelude_plus::*;

/// Size in bytes of one component of an attribute or index type.
pub fn type_size(type_: u32) -> u32 {
  match type_ {
    gl::BYTE | gl::UNSIGNED_BYTE => 1,
    gl::SHORT | gl::UNSIGNED_SHORT | gl::HALF_FLOAT | crate::names::HALF_FLOAT_OES => 2,
    _ => 4,
  }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AttribPointer {
  pub enabled: bool,
  pub buffer: Option<Handle>,
  pub size: u32,
  pub type_: u32,
  pub normalized: bool,
  pub stride: u32,
  pub offset: u64,
  pub divisor: u32,
  pub integer: bool,
}

impl Default for AttribPointer {
  fn default() -> Self {
    Self {
      enabled: false,
      buffer: None,
      size: 4,
      type_: gl::FLOAT,
      normalized: false,
      stride: 0,
      offset: 0,
      divisor: 0,
      integer: false,
    }
  }
}

impl AttribPointer {
  pub fn bytes_per_element(&self) -> u64 {
    match self.type_ {
      gl::INT_2_10_10_10_REV | gl::UNSIGNED_INT_2_10_10_10_REV => 4,
      type_ => u64::from(self.size) * u64::from(type_size(type_)),
    }
  }

  /// The explicit stride or the tightly packed one for a stride of 0.
  pub fn effective_stride(&self) -> u64 {
    if self.stride == 0 {
      self.bytes_per_element()
    } else {
      u64::from(self.stride)
    }
  }

  /// Compares everything `vertexAttrib[I]Pointer` sets.
  fn same_pointer(&self, other: &Self, live: &LiveHandles) -> bool {
    live.same_binding(self.buffer, other.buffer)
      && (self.size, self.type_, self.normalized, self.stride, self.offset, self.integer)
        == (other.size, other.type_, other.normalized, other.stride, other.offset, other.integer)
  }
}

#[derive(Debug, Clone, Default)]
pub struct VertexArrayState {
  element_buffer: Option<Handle>,
  attribs: Vec<AttribPointer>,
}

impl VertexArrayState {
  fn new(attrib_count: usize) -> Self {
    Self { element_buffer: None, attribs: vec![AttribPointer::default(); attrib_count] }
  }

  #[inline(always)]
  pub fn element_buffer(&self) -> Option<Handle> { self.element_buffer }

  pub fn attrib(&self, index: u32) -> Option<&AttribPointer> { self.attribs.get(index as usize) }

  fn attrib_mut(&mut self, index: u32) -> &mut AttribPointer {
    let index = index as usize;
    if index >= self.attribs.len() {
      self.attribs.resize(index + 1, AttribPointer::default());
    }
    &mut self.attribs[index]
  }
}

/// Every method which applies a state-setting call returns whether that call
/// was redundant.
#[derive(Debug)]
pub struct VertexArrays {
  default: VertexArrayState,
  arrays: HashMap<Handle, VertexArrayState>,
  current: Option<Handle>,
  attrib_count: usize,
}

impl VertexArrays {
  pub fn new(attrib_count: u32) -> Self {
    let attrib_count = attrib_count as usize;
    Self {
      default: VertexArrayState::new(attrib_count),
      arrays: HashMap::new(),
      current: None,
      attrib_count,
    }
  }

  /// `None` when the default vertex array is bound.
  #[inline(always)]
  pub fn current(&self) -> Option<Handle> { self.current }

  pub fn current_state(&self) -> &VertexArrayState {
    self.current.and_then(|vao| self.arrays.get(&vao)).unwrap_or(&self.default)
  }

  fn current_state_mut(&mut self) -> &mut VertexArrayState {
    match self.current {
      Some(vao) => {
        let attrib_count = self.attrib_count;
        self.arrays.entry(vao).or_insert_with(|| VertexArrayState::new(attrib_count))
      }
      None => &mut self.default,
    }
  }

  pub fn create(&mut self, vao: Handle) {
    self.arrays.insert(vao, VertexArrayState::new(self.attrib_count));
  }

  pub fn bind(&mut self, vao: Option<Handle>, live: &LiveHandles) -> bool {
    let redundant = live.same_binding(self.current, vao);
    self.current = vao;
    redundant
  }

  pub fn delete(&mut self, vao: Handle) {
    self.arrays.remove(&vao);
    if self.current == Some(vao) {
      self.current = None;
    }
  }

  pub fn set_element_buffer(&mut self, buffer: Option<Handle>, live: &LiveHandles) -> bool {
    let state = self.current_state_mut();
    let redundant = live.same_binding(state.element_buffer, buffer);
    state.element_buffer = buffer;
    redundant
  }

  pub fn set_enabled(&mut self, index: u32, enabled: bool) -> bool {
    let attrib = self.current_state_mut().attrib_mut(index);
    mem::replace(&mut attrib.enabled, enabled) == enabled
  }

  /// Applies `vertexAttrib[I]Pointer`, only the pointer fields of `pointer`
  /// are used.
  pub fn set_pointer(&mut self, index: u32, pointer: AttribPointer, live: &LiveHandles) -> bool {
    let attrib = self.current_state_mut().attrib_mut(index);
    let redundant = attrib.same_pointer(&pointer, live);
    *attrib = AttribPointer { enabled: attrib.enabled, divisor: attrib.divisor, ..pointer };
    redundant
  }

  pub fn set_divisor(&mut self, index: u32, divisor: u32) -> bool {
    let attrib = self.current_state_mut().attrib_mut(index);
    mem::replace(&mut attrib.divisor, divisor) == divisor
  }

  /// Deleting a buffer only unbinds it from the current vertex array, the
  /// others keep referring to the dead handle.
  pub fn detach_buffer(&mut self, buffer: Handle) {
    let state = self.current_state_mut();
    if state.element_buffer == Some(buffer) {
      state.element_buffer = None;
    }
    for attrib in &mut state.attribs {
      if attrib.buffer == Some(buffer) {
        attrib.buffer = None;
      }
    }
  }

  pub fn clear(&mut self) {
    self.default = VertexArrayState::new(self.attrib_count);
    self.arrays.clear();
    self.current = None;
  }
}

/// Counters of calls which didn't change any state.
#[derive(Debug, Default)]
pub struct RedundantCalls {
  counts: BTreeMap<&'static str, u32>,
}

impl RedundantCalls {
  pub fn count(&mut self, entry: EntryPoint) {
    trace!("redundant {}", entry);
    *self.counts.entry(entry.name()).or_insert(0) += 1;
  }

  pub fn get(&self, entry: EntryPoint) -> u32 {
    self.counts.get(entry.name()).copied().unwrap_or(0)
  }

  pub fn take(&mut self) -> BTreeMap<&'static str, u32> { mem::take(&mut self.counts) }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::handle::ObjectKind;

  fn live_buffers(ids: &[u32]) -> (LiveHandles, Vec<Handle>) {
    let mut live = LiveHandles::default();
    let handles: Vec<Handle> = ids.iter().map(|&id| Handle::new(ObjectKind::Buffer, id)).collect();
    for &handle in &handles {
      live.insert(handle);
    }
    (live, handles)
  }

  fn vec2_pointer(buffer: Handle) -> AttribPointer {
    AttribPointer { buffer: Some(buffer), size: 2, ..AttribPointer::default() }
  }

  #[test]
  fn repeated_pointer_calls_are_redundant() {
    let (live, buffers) = live_buffers(&[1, 2]);
    let mut arrays = VertexArrays::new(8);
    assert!(!arrays.set_pointer(0, vec2_pointer(buffers[0]), &live));
    assert!(arrays.set_pointer(0, vec2_pointer(buffers[0]), &live));
    assert!(!arrays.set_pointer(0, vec2_pointer(buffers[1]), &live));

    assert!(!arrays.set_enabled(0, true));
    assert!(arrays.set_enabled(0, true));
    assert!(arrays.set_divisor(0, 0));
    assert!(!arrays.set_divisor(0, 1));
    assert_eq!(arrays.current_state().attrib(0).map(|a| (a.enabled, a.divisor)), Some((true, 1)));
  }

  #[test]
  fn deleted_buffers_are_never_redundant() {
    let (mut live, buffers) = live_buffers(&[1]);
    let mut arrays = VertexArrays::new(8);
    arrays.set_element_buffer(Some(buffers[0]), &live);
    live.remove(buffers[0]);
    assert!(!arrays.set_element_buffer(Some(buffers[0]), &live));
  }

  #[test]
  fn vertex_arrays_keep_separate_state() {
    let (live, buffers) = live_buffers(&[1]);
    let mut arrays = VertexArrays::new(8);
    let vao = Handle::new(ObjectKind::VertexArray, 1);
    arrays.create(vao);

    arrays.set_element_buffer(Some(buffers[0]), &live);
    assert!(!arrays.bind(Some(vao), &live));
    assert_eq!(arrays.current_state().element_buffer(), None);
    arrays.set_element_buffer(Some(buffers[0]), &live);

    arrays.delete(vao);
    assert_eq!(arrays.current(), None);
    assert_eq!(arrays.current_state().element_buffer(), Some(buffers[0]));

    arrays.detach_buffer(buffers[0]);
    assert_eq!(arrays.current_state().element_buffer(), None);
  }

  #[test]
  fn redundant_counters_reset_on_take() {
    let mut calls = RedundantCalls::default();
    calls.count(EntryPoint::BindBuffer);
    calls.count(EntryPoint::BindBuffer);
    assert_eq!(calls.get(EntryPoint::BindBuffer), 2);
    assert_eq!(calls.take().get("bindBuffer"), Some(&2));
    assert_eq!(calls.get(EntryPoint::BindBuffer), 0);
  }
}
