//! Composition and delivery of diagnostics.

use crate::descriptors::{self, ArgKind};
use crate::entry_points::EntryPoint;
use crate::names::EnumNames;
use crate::tags::TagRegistry;
use crate::value::{ArrayData, Value};
use prelude_plus::*;

/// How many elements of an array argument are shown.
pub const ARRAY_PREVIEW_LEN: usize = 10;
const STRING_PREVIEW_LEN: usize = 40;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum DiagnosticKind {
  /// Wrong arity, undefined or NaN arguments, wrong container kinds.
  ArgumentShape,
  /// Valid calls which won't do what was intended.
  SemanticUsage,
  /// Operations on deleted or mistyped objects.
  ResourceLifecycle,
  /// An error reported by the underlying context itself.
  Api,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct Diagnostic {
  pub entry: EntryPoint,
  pub kind: DiagnosticKind,
  /// The fully composed text, including the location prefix and the context
  /// lines.
  pub message: String,
  pub location: Option<&'static Location<'static>>,
}

pub trait DiagnosticSink: fmt::Debug {
  fn report(&mut self, diagnostic: &Diagnostic);
}

/// Forwards warnings to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
  fn report(&mut self, diagnostic: &Diagnostic) { warn!("{}", diagnostic.message); }
}

/// Collects warnings in memory, clones share the same storage.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
  diagnostics: Rc<RefCell<Vec<Diagnostic>>>,
}

impl MemorySink {
  pub fn take(&self) -> Vec<Diagnostic> { mem::take(&mut *self.diagnostics.borrow_mut()) }
  pub fn len(&self) -> usize { self.diagnostics.borrow().len() }
  pub fn is_empty(&self) -> bool { self.len() == 0 }
}

impl DiagnosticSink for MemorySink {
  fn report(&mut self, diagnostic: &Diagnostic) {
    self.diagnostics.borrow_mut().push(diagnostic.clone());
  }
}

/// Formats numbers the way a script would print them: integers without a
/// fractional part.
pub fn format_number(n: f64) -> String {
  if n.is_nan() {
    "NaN".to_owned()
  } else if n.is_infinite() {
    if n > 0.0 { "Infinity" } else { "-Infinity" }.to_owned()
  } else if n.fract() == 0.0 && n.abs() < 1e15 {
    format!("{}", n as i64)
  } else {
    format!("{}", n)
  }
}

#[derive(Debug, Copy, Clone)]
pub struct ArgFormatter<'a> {
  pub names: &'a EnumNames,
  pub tags: &'a TagRegistry,
}

impl<'a> ArgFormatter<'a> {
  pub fn format_args(&self, entry: EntryPoint, args: &[Value]) -> String {
    let overload = entry.overload(args.len());
    let mut out = String::new();
    for (i, arg) in args.iter().enumerate() {
      if i > 0 {
        out.push_str(", ");
      }
      let kind = overload.and_then(|overload| overload.get(i)).copied();
      out.push_str(&self.format_arg(kind, args, arg));
    }
    out
  }

  fn format_arg(&self, kind: Option<ArgKind>, args: &[Value], arg: &Value) -> String {
    let raw = match arg {
      Value::Number(n) if n.fract() == 0.0 && *n >= 0.0 && *n <= u32::MAX as f64 => Some(*n as u32),
      _ => None,
    };
    match (kind, raw) {
      (Some(ArgKind::Enum), Some(raw)) => self.names.enum_to_string(raw),
      (Some(ArgKind::Bitfield(bits)), Some(raw)) => self.names.bitfield_to_string(raw, bits),
      (Some(ArgKind::ParamEnum { pname }), Some(raw)) => {
        let takes_enum =
          args.get(pname).and_then(Value::as_u32).map_or(false, descriptors::param_takes_enum);
        if takes_enum {
          self.names.enum_to_string(raw)
        } else {
          self.format_value(arg)
        }
      }
      _ => self.format_value(arg),
    }
  }

  pub fn format_value(&self, value: &Value) -> String {
    match value {
      Value::Undefined => "undefined".to_owned(),
      Value::Null => "null".to_owned(),
      Value::Bool(b) => b.to_string(),
      Value::Number(n) => format_number(*n),
      Value::Str(s) => {
        if s.chars().count() > STRING_PREVIEW_LEN {
          let preview: String = s.chars().take(STRING_PREVIEW_LEN).collect();
          format!("{:?}...", preview)
        } else {
          format!("{:?}", s)
        }
      }
      Value::Object(handle) => self.tags.describe(*handle),
      Value::Array(data) => self.format_array(data),
      Value::Image(size) => format!("ImageSource({}x{})", size.width, size.height),
      Value::ActiveInfo(info) => format!(
        "ActiveInfo({:?}, size: {}, type: {})",
        info.name,
        info.size,
        self.names.enum_to_string(info.type_)
      ),
      Value::List(values) => {
        self.format_list(values.iter().map(|value| self.format_value(value)), values.len())
      }
    }
  }

  fn format_array(&self, data: &ArrayData) -> String {
    let elements = match data {
      ArrayData::Values(values) => {
        return self.format_list(values.iter().map(|value| self.format_value(value)), values.len())
      }
      _ => data.iter_f64().map(|n| n.map_or_else(|| "undefined".to_owned(), format_number)),
    };
    format!("{}({}){}", data.type_name(), data.len(), self.format_list(elements, data.len()))
  }

  fn format_list(&self, elements: impl Iterator<Item = String>, len: usize) -> String {
    let mut out = String::from("[");
    for (i, element) in elements.take(ARRAY_PREVIEW_LEN).enumerate() {
      if i > 0 {
        out.push_str(", ");
      }
      out.push_str(&element);
    }
    if len > ARRAY_PREVIEW_LEN {
      out.push_str(", ...");
    }
    out.push(']');
    out
  }
}

/// `"<file>:<line>: error in <entry>(<args>): <reason>"` followed by the
/// context lines.
pub fn compose_message(
  location: Option<&Location<'_>>,
  entry: EntryPoint,
  formatted_args: &str,
  reason: &str,
  context: &[String],
) -> String {
  let mut message = String::new();
  if let Some(location) = location {
    message.push_str(&format!("{}:{}: ", location.file(), location.line()));
  }
  message.push_str(&format!("error in {}({}): {}", entry, formatted_args, reason));
  for line in context {
    message.push('\n');
    message.push_str(line);
  }
  message
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::handle::{Handle, ObjectKind};
  use crate::names::ApiFlavor;

  #[test]
  fn formats_enums_handles_and_arrays() {
    let names = EnumNames::new(ApiFlavor::WebGl2);
    let mut tags = TagRegistry::default();
    let buffer = Handle::new(ObjectKind::Buffer, 3);
    tags.tag(buffer, "quad");
    let formatter = ArgFormatter { names: &names, tags: &tags };

    let args = [Value::from(gl::ARRAY_BUFFER), Value::from(buffer)];
    assert_eq!(
      formatter.format_args(EntryPoint::BindBuffer, &args),
      "ARRAY_BUFFER, Buffer(\"quad\")"
    );

    let data: Vec<f32> = (0..12).map(|i| i as f32 * 0.5).collect();
    let args = [Value::Null, Value::from(data)];
    assert_eq!(
      formatter.format_args(EntryPoint::Uniform1fv, &args),
      "null, Float32Array(12)[0, 0.5, 1, 1.5, 2, 2.5, 3, 3.5, 4, 4.5, ...]"
    );
  }

  #[test]
  fn param_enums_depend_on_the_pname() {
    let names = EnumNames::new(ApiFlavor::WebGl1);
    let tags = TagRegistry::default();
    let formatter = ArgFormatter { names: &names, tags: &tags };

    let filter =
      [Value::from(gl::TEXTURE_2D), Value::from(gl::TEXTURE_MIN_FILTER), Value::from(gl::LINEAR)];
    assert_eq!(
      formatter.format_args(EntryPoint::TexParameteri, &filter),
      "TEXTURE_2D, TEXTURE_MIN_FILTER, LINEAR"
    );

    let alignment = [Value::from(gl::UNPACK_ALIGNMENT), Value::from(4)];
    assert_eq!(formatter.format_args(EntryPoint::PixelStorei, &alignment), "UNPACK_ALIGNMENT, 4");
  }

  #[test]
  fn composes_location_and_context() {
    let message = compose_message(
      None,
      EntryPoint::DrawArrays,
      "TRIANGLES, 0, 3",
      "uniforms not set",
      &["with the default vertex array bound".to_owned()],
    );
    assert_eq!(
      message,
      "error in drawArrays(TRIANGLES, 0, 3): uniforms not set\nwith the default vertex array bound"
    );
  }
}
