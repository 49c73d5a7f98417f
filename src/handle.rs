use prelude_plus::*;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum ObjectKind {
  Buffer,
  Framebuffer,
  Program,
  Query,
  Renderbuffer,
  Sampler,
  Shader,
  Sync,
  Texture,
  TransformFeedback,
  UniformLocation,
  VertexArray,
}

impl ObjectKind {
  pub const VARIANTS: &'static [Self] = &[
    Self::Buffer,
    Self::Framebuffer,
    Self::Program,
    Self::Query,
    Self::Renderbuffer,
    Self::Sampler,
    Self::Shader,
    Self::Sync,
    Self::Texture,
    Self::TransformFeedback,
    Self::UniformLocation,
    Self::VertexArray,
  ];

  pub const fn name(self) -> &'static str {
    match self {
      Self::Buffer => "Buffer",
      Self::Framebuffer => "Framebuffer",
      Self::Program => "Program",
      Self::Query => "Query",
      Self::Renderbuffer => "Renderbuffer",
      Self::Sampler => "Sampler",
      Self::Shader => "Shader",
      Self::Sync => "Sync",
      Self::Texture => "Texture",
      Self::TransformFeedback => "TransformFeedback",
      Self::UniformLocation => "UniformLocation",
      Self::VertexArray => "VertexArray",
    }
  }

  #[inline(always)]
  pub(crate) fn index(self) -> usize { self as usize }
}

impl fmt::Display for ObjectKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

/// An opaque resource reference handed out by the underlying context. Handles
/// are plain identities, holding one never keeps the resource alive.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Handle {
  kind: ObjectKind,
  id: u32,
}

impl Handle {
  #[inline(always)]
  pub const fn new(kind: ObjectKind, id: u32) -> Self { Self { kind, id } }
  #[inline(always)]
  pub fn kind(&self) -> ObjectKind { self.kind }
  #[inline(always)]
  pub fn id(&self) -> u32 { self.id }
}

impl fmt::Display for Handle {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}#{}", self.kind, self.id)
  }
}

/// Side table of the handles which were created and not yet deleted through
/// the instrumented context. Bindings elsewhere store bare [`Handle`]s and
/// consult this table to find out whether the referenced object still exists.
#[derive(Debug, Default)]
pub struct LiveHandles {
  live: HashSet<Handle>,
  deleted: HashSet<Handle>,
}

impl LiveHandles {
  pub fn insert(&mut self, handle: Handle) {
    self.deleted.remove(&handle);
    self.live.insert(handle);
  }

  pub fn remove(&mut self, handle: Handle) -> bool {
    self.deleted.insert(handle);
    self.live.remove(&handle)
  }

  #[inline]
  pub fn is_live(&self, handle: Handle) -> bool { self.live.contains(&handle) }

  /// Handles created before instrumentation started are neither live nor
  /// deleted.
  #[inline]
  pub fn was_deleted(&self, handle: Handle) -> bool { self.deleted.contains(&handle) }

  /// Compares two optional bindings the way redundancy checks need it: an
  /// empty binding equals an empty binding, and a deleted object is not equal
  /// to anything, not even to itself. Objects created before instrumentation
  /// started compare like live ones.
  pub fn same_binding(&self, a: Option<Handle>, b: Option<Handle>) -> bool {
    match (a, b) {
      (None, None) => true,
      (Some(a), Some(b)) => a == b && !self.was_deleted(a),
      _ => false,
    }
  }

  pub fn clear(&mut self) {
    self.live.clear();
    self.deleted.clear();
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn deleted_handles_never_compare_equal() {
    let mut live = LiveHandles::default();
    let a = Handle::new(ObjectKind::Buffer, 1);
    let b = Handle::new(ObjectKind::Buffer, 2);
    live.insert(a);
    live.insert(b);

    assert!(live.same_binding(Some(a), Some(a)));
    assert!(!live.same_binding(Some(a), Some(b)));
    assert!(live.same_binding(None, None));
    assert!(!live.same_binding(Some(a), None));

    live.remove(a);
    assert!(!live.same_binding(Some(a), Some(a)));
    assert!(live.was_deleted(a));
    assert!(!live.was_deleted(b));
  }

  #[test]
  fn unknown_handles_compare_like_live_ones() {
    let live = LiveHandles::default();
    let pre_existing = Handle::new(ObjectKind::Texture, 3);
    assert!(!live.is_live(pre_existing));
    assert!(live.same_binding(Some(pre_existing), Some(pre_existing)));
  }
}
