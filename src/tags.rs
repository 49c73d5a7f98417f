use crate::handle::{Handle, ObjectKind};
use prelude_plus::*;

const ZERO: AtomicU32 = AtomicU32::new(0);
static DEFAULT_TAG_SEQUENCES: [AtomicU32; ObjectKind::VARIANTS.len()] =
  [ZERO; ObjectKind::VARIANTS.len()];

/// Generates the next auto tag for `kind`. Sequences are shared by every
/// session in the process so that auto tags never repeat.
pub fn next_default_tag(kind: ObjectKind) -> String {
  let seq = DEFAULT_TAG_SEQUENCES[kind.index()].fetch_add(1, AtomicOrdering::Relaxed) + 1;
  format!("*UNTAGGED:{}{}*", kind, seq)
}

/// Human-readable names of handles, used only for diagnostics.
#[derive(Debug, Default)]
pub struct TagRegistry {
  tags: HashMap<Handle, String>,
}

impl TagRegistry {
  pub fn tag(&mut self, handle: Handle, name: impl Into<String>) {
    self.tags.insert(handle, name.into());
  }

  pub fn untag(&mut self, handle: Handle) -> Option<String> { self.tags.remove(&handle) }

  pub fn get(&self, handle: Handle) -> Option<&str> { self.tags.get(&handle).map(String::as_str) }

  /// Assigns an auto tag unless the handle already has one.
  pub fn make_default_tag(&mut self, handle: Handle) -> &str {
    self.tags.entry(handle).or_insert_with(|| next_default_tag(handle.kind()))
  }

  /// `Kind("tag")` for tagged handles, `Kind#id` otherwise.
  pub fn describe(&self, handle: Handle) -> String {
    match self.get(handle) {
      Some(tag) => format!("{}({:?})", handle.kind(), tag),
      None => handle.to_string(),
    }
  }

  pub fn describe_or(&self, handle: Option<Handle>, fallback: &str) -> String {
    handle.map_or_else(|| fallback.to_owned(), |handle| self.describe(handle))
  }

  pub fn clear(&mut self) { self.tags.clear(); }
}
