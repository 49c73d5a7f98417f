//! An in-memory stand-in for a real context. It tracks just enough state to
//! compile and link simple shaders, hand out handles and raise the errors a
//! real implementation would raise for the mistakes the test-suite makes.

use crate::dispatch::Backend;
use crate::entry_points::EntryPoint;
use crate::handle::{Handle, ObjectKind};
use crate::names::BufferBits;
use crate::value::{ActiveInfo, Value};
use prelude_plus::*;

const MAX_TEXTURE_UNITS: u32 = 16;
const MAX_VERTEX_ATTRIBS: u32 = 16;

#[derive(Debug, Default)]
struct FakeShader {
  type_: u32,
  source: String,
  compiled: bool,
  log: String,
}

#[derive(Debug, Default)]
struct FakeProgram {
  shaders: Vec<Handle>,
  linked: bool,
  log: String,
  uniforms: Vec<ActiveInfo>,
  attribs: Vec<ActiveInfo>,
  /// uniform name → location, reset by every link
  locations: HashMap<String, Handle>,
}

#[derive(Debug)]
pub struct FakeGl {
  version: String,
  supported_extensions: Vec<String>,
  next_id: u32,
  deleted: HashSet<Handle>,
  error: u32,
  fail_next: Option<(EntryPoint, u32)>,
  call_counts: HashMap<EntryPoint, u32>,
  shaders: HashMap<Handle, FakeShader>,
  programs: HashMap<Handle, FakeProgram>,
  /// uniform location → program
  uniform_locations: HashMap<Handle, Handle>,
  current_program: Option<Handle>,
  texture_targets: HashMap<Handle, u32>,
}

impl FakeGl {
  pub fn new(version: &str) -> Self {
    Self {
      version: version.to_owned(),
      supported_extensions: Vec::new(),
      next_id: 0,
      deleted: HashSet::new(),
      error: gl::NO_ERROR,
      fail_next: None,
      call_counts: HashMap::new(),
      shaders: HashMap::new(),
      programs: HashMap::new(),
      uniform_locations: HashMap::new(),
      current_program: None,
      texture_targets: HashMap::new(),
    }
  }

  pub fn webgl1() -> Self { Self::new("WebGL 1.0 (fake)") }
  pub fn webgl2() -> Self { Self::new("WebGL 2.0 (fake)") }

  pub fn with_extensions(mut self, extensions: &[&str]) -> Self {
    self.supported_extensions.extend(extensions.iter().map(|&name| name.to_owned()));
    self
  }

  /// Makes the next call of `entry` do nothing but raise `error`.
  pub fn fail_next(&mut self, entry: EntryPoint, error: u32) {
    self.fail_next = Some((entry, error));
  }

  pub fn call_count(&self, entry: EntryPoint) -> u32 {
    self.call_counts.get(&entry).copied().unwrap_or(0)
  }

  fn set_error(&mut self, error: u32) {
    if self.error == gl::NO_ERROR {
      self.error = error;
    }
  }

  fn create(&mut self, kind: ObjectKind) -> Handle {
    self.next_id += 1;
    Handle::new(kind, self.next_id)
  }

  fn compile(&mut self, shader: Handle) {
    let shader = match self.shaders.get_mut(&shader) {
      Some(shader) => shader,
      None => return self.set_error(gl::INVALID_VALUE),
    };
    shader.log.clear();
    for (i, line) in shader.source.lines().enumerate() {
      if let Some(message) = line.trim().strip_prefix("#error") {
        shader.log.push_str(&format!("ERROR: 0:{}: '{}' : #error\n", i + 1, message.trim()));
      }
    }
    shader.compiled = shader.log.is_empty();
  }

  fn link(&mut self, program: Handle) {
    let shaders = match self.programs.get(&program) {
      Some(record) => record.shaders.clone(),
      None => return self.set_error(gl::INVALID_VALUE),
    };

    let mut log = String::new();
    let mut uniforms: Vec<ActiveInfo> = Vec::new();
    let mut attribs = Vec::new();
    for &stage in &[gl::VERTEX_SHADER, gl::FRAGMENT_SHADER] {
      let shader = shaders
        .iter()
        .filter_map(|handle| self.shaders.get(handle))
        .find(|shader| shader.type_ == stage);
      let shader = match shader {
        Some(shader) if shader.compiled => shader,
        Some(_) => {
          log.push_str("ERROR: one of the attached shaders is not compiled\n");
          continue;
        }
        None => {
          log.push_str("ERROR: missing shader stage\n");
          continue;
        }
      };
      for info in declarations(&shader.source, &["uniform"]) {
        if !uniforms.iter().any(|known| known.name == info.name) {
          uniforms.push(info);
        }
      }
      if stage == gl::VERTEX_SHADER {
        attribs.extend(declarations(&shader.source, &["attribute", "in"]));
      }
    }

    let stale: Vec<Handle> = self
      .uniform_locations
      .iter()
      .filter(|(_, owner)| **owner == program)
      .map(|(loc, _)| *loc)
      .collect();
    for location in stale {
      self.uniform_locations.remove(&location);
    }

    if let Some(record) = self.programs.get_mut(&program) {
      record.linked = log.is_empty();
      record.log = log;
      record.locations.clear();
      if record.linked {
        record.uniforms = uniforms;
        record.attribs = attribs;
      } else {
        record.uniforms.clear();
        record.attribs.clear();
      }
    }
  }

  fn uniform_location(&mut self, program: Handle, name: &str) -> Value {
    if !self.programs.get(&program).map_or(false, |record| record.linked) {
      self.set_error(gl::INVALID_OPERATION);
      return Value::Null;
    }
    let record = match self.programs.get(&program) {
      Some(record) => record,
      None => return Value::Null,
    };
    if !resolves_uniform(&record.uniforms, name) {
      return Value::Null;
    }
    if let Some(&location) = record.locations.get(name) {
      return Value::from(location);
    }
    let location = self.create(ObjectKind::UniformLocation);
    self.uniform_locations.insert(location, program);
    if let Some(record) = self.programs.get_mut(&program) {
      record.locations.insert(name.to_owned(), location);
    }
    Value::from(location)
  }

  fn program_parameter(&self, program: Handle, pname: u32) -> Value {
    let record = match self.programs.get(&program) {
      Some(record) => record,
      None => return Value::Null,
    };
    match pname {
      gl::LINK_STATUS => Value::from(record.linked),
      gl::ACTIVE_UNIFORMS => Value::from(record.uniforms.len()),
      gl::ACTIVE_ATTRIBUTES => Value::from(record.attribs.len()),
      gl::ATTACHED_SHADERS => Value::from(record.shaders.len()),
      _ => Value::Null,
    }
  }

  fn active_info(&self, entry: EntryPoint, program: Handle, index: usize) -> Value {
    let record = match self.programs.get(&program) {
      Some(record) => record,
      None => return Value::Null,
    };
    let infos =
      if entry == EntryPoint::GetActiveUniform { &record.uniforms } else { &record.attribs };
    infos.get(index).cloned().map_or(Value::Null, Value::ActiveInfo)
  }
}

impl Backend for FakeGl {
  fn invoke(&mut self, entry: EntryPoint, args: &[Value]) -> Value {
    use EntryPoint::*;

    *self.call_counts.entry(entry).or_insert(0) += 1;
    if let Some((failing, error)) = self.fail_next {
      if failing == entry {
        self.fail_next = None;
        self.set_error(error);
        return Value::Undefined;
      }
    }

    let arg = |index: usize| args.get(index).cloned().unwrap_or_default();
    let u32_arg = |index: usize| arg(index).as_u32().unwrap_or(0);
    let handle_arg = |index: usize| arg(index).as_handle();

    let is_delete = entry.name().starts_with("delete");
    let uses_deleted =
      args.iter().filter_map(Value::as_handle).any(|handle| self.deleted.contains(&handle));
    if !is_delete && uses_deleted {
      self.set_error(gl::INVALID_OPERATION);
      return Value::Undefined;
    }

    match entry {
      GetError => Value::from(mem::replace(&mut self.error, gl::NO_ERROR)),
      GetParameter => match u32_arg(0) {
        gl::VERSION => Value::from(self.version.as_str()),
        gl::MAX_COMBINED_TEXTURE_IMAGE_UNITS => Value::from(MAX_TEXTURE_UNITS),
        gl::MAX_VERTEX_ATTRIBS => Value::from(MAX_VERTEX_ATTRIBS),
        gl::CURRENT_PROGRAM => Value::from(self.current_program),
        _ => Value::Null,
      },
      GetExtension => match arg(0).as_str() {
        Some(name)
          if self.supported_extensions.iter().any(|ext| ext.eq_ignore_ascii_case(name)) =>
        {
          Value::from(name)
        }
        _ => Value::Null,
      },

      CreateBuffer => Value::from(self.create(ObjectKind::Buffer)),
      CreateFramebuffer => Value::from(self.create(ObjectKind::Framebuffer)),
      CreateQuery => Value::from(self.create(ObjectKind::Query)),
      CreateRenderbuffer => Value::from(self.create(ObjectKind::Renderbuffer)),
      CreateSampler => Value::from(self.create(ObjectKind::Sampler)),
      CreateTexture => Value::from(self.create(ObjectKind::Texture)),
      CreateTransformFeedback => Value::from(self.create(ObjectKind::TransformFeedback)),
      CreateVertexArray | CreateVertexArrayOes => Value::from(self.create(ObjectKind::VertexArray)),
      FenceSync => Value::from(self.create(ObjectKind::Sync)),
      CreateProgram => {
        let program = self.create(ObjectKind::Program);
        self.programs.insert(program, FakeProgram::default());
        Value::from(program)
      }
      CreateShader => {
        let shader = self.create(ObjectKind::Shader);
        self.shaders.insert(shader, FakeShader { type_: u32_arg(0), ..FakeShader::default() });
        Value::from(shader)
      }
      _ if is_delete => {
        if let Some(handle) = handle_arg(0) {
          self.deleted.insert(handle);
          self.texture_targets.remove(&handle);
          if self.current_program == Some(handle) {
            self.current_program = None;
          }
        }
        Value::Undefined
      }

      ShaderSource => {
        let shader = handle_arg(0).and_then(|h| self.shaders.get_mut(&h));
        if let (Some(shader), Some(source)) = (shader, arg(1).as_str()) {
          shader.source = source.to_owned();
        }
        Value::Undefined
      }
      CompileShader => {
        if let Some(shader) = handle_arg(0) {
          self.compile(shader);
        }
        Value::Undefined
      }
      GetShaderParameter => match (handle_arg(0).and_then(|h| self.shaders.get(&h)), u32_arg(1)) {
        (Some(shader), gl::COMPILE_STATUS) => Value::from(shader.compiled),
        (Some(shader), gl::SHADER_TYPE) => Value::from(shader.type_),
        _ => Value::Null,
      },
      GetShaderInfoLog => match handle_arg(0).and_then(|h| self.shaders.get(&h)) {
        Some(shader) => Value::from(shader.log.as_str()),
        None => Value::Null,
      },
      AttachShader => {
        if let (Some(program), Some(shader)) = (handle_arg(0), handle_arg(1)) {
          match self.programs.get_mut(&program) {
            Some(record) if !record.shaders.contains(&shader) => record.shaders.push(shader),
            _ => self.set_error(gl::INVALID_OPERATION),
          }
        }
        Value::Undefined
      }
      LinkProgram => {
        if let Some(program) = handle_arg(0) {
          self.link(program);
        }
        Value::Undefined
      }
      GetProgramParameter => match handle_arg(0) {
        Some(program) => self.program_parameter(program, u32_arg(1)),
        None => Value::Null,
      },
      GetProgramInfoLog => match handle_arg(0).and_then(|h| self.programs.get(&h)) {
        Some(record) => Value::from(record.log.as_str()),
        None => Value::Null,
      },
      GetAttachedShaders => match handle_arg(0).and_then(|h| self.programs.get(&h)) {
        Some(record) => Value::List(record.shaders.iter().copied().map(Value::from).collect()),
        None => Value::Null,
      },
      GetActiveUniform | GetActiveAttrib => match handle_arg(0) {
        Some(program) => self.active_info(entry, program, u32_arg(1) as usize),
        None => Value::Null,
      },
      GetUniformLocation => match (handle_arg(0), arg(1).as_str()) {
        (Some(program), Some(name)) => self.uniform_location(program, name),
        _ => Value::Null,
      },
      GetAttribLocation => {
        let location = handle_arg(0)
          .and_then(|h| self.programs.get(&h))
          .and_then(|record| {
            let name = arg(1);
            record.attribs.iter().position(|info| Some(info.name.as_str()) == name.as_str())
          })
          .map_or(-1, |location| location as i64);
        Value::from(location)
      }
      UseProgram => {
        let program = handle_arg(0);
        match program.map(|p| self.programs.get(&p).map_or(false, |record| record.linked)) {
          Some(false) => self.set_error(gl::INVALID_OPERATION),
          _ => self.current_program = program,
        }
        Value::Undefined
      }

      BindTexture => {
        if let Some(texture) = handle_arg(1) {
          let target = u32_arg(0);
          if *self.texture_targets.entry(texture).or_insert(target) != target {
            self.set_error(gl::INVALID_OPERATION);
          }
        }
        Value::Undefined
      }
      Clear => {
        if u32_arg(0) & !BufferBits::all().bits() != 0 {
          self.set_error(gl::INVALID_VALUE);
        }
        Value::Undefined
      }

      _ if crate::programs::UniformSetter::of(entry).is_some() => {
        if let Some(location) = handle_arg(0) {
          if self.uniform_locations.get(&location).copied() != self.current_program {
            self.set_error(gl::INVALID_OPERATION);
          }
        }
        Value::Undefined
      }
      _ if entry.is_draw() => {
        if self.current_program.is_none() {
          self.set_error(gl::INVALID_OPERATION);
        }
        Value::Undefined
      }
      _ => Value::Undefined,
    }
  }
}

/// Whether `name` refers to one of `uniforms`: the plain name, or an element
/// of an array uniform within its bounds.
fn resolves_uniform(uniforms: &[ActiveInfo], name: &str) -> bool {
  uniforms.iter().any(|info| {
    let base = info.name.trim_end_matches("[0]");
    if name == info.name || name == base {
      return true;
    }
    let element = name
      .strip_prefix(base)
      .and_then(|rest| rest.strip_prefix('['))
      .and_then(|rest| rest.strip_suffix(']'))
      .and_then(|index| index.parse::<u32>().ok());
    info.name.ends_with("[0]") && element.map_or(false, |element| element < info.size)
  })
}

/// Scans GLSL for declarations starting with one of `qualifiers`, e.g.
/// `uniform highp vec2 a, b[3];`.
fn declarations(source: &str, qualifiers: &[&str]) -> Vec<ActiveInfo> {
  let mut infos = Vec::new();
  let code: String = source
    .lines()
    .map(|line| line.split("//").next().unwrap_or(""))
    .filter(|line| !line.trim_start().starts_with('#'))
    .collect::<Vec<_>>()
    .join("\n");

  for statement in code.split(|c| c == ';' || c == '{' || c == '}') {
    let mut tokens = statement.split_whitespace().skip_while(|token| !qualifiers.contains(token));
    if tokens.next().is_none() {
      continue;
    }
    let mut tokens =
      tokens.skip_while(|token| matches!(*token, "lowp" | "mediump" | "highp" | "flat"));
    let type_ = match tokens.next().and_then(glsl_type) {
      Some(type_) => type_,
      None => continue,
    };
    let declarators: String = tokens.collect();
    for declarator in declarators.split(',').filter(|d| !d.is_empty()) {
      let (name, size) = match declarator.find('[') {
        Some(bracket) => {
          let size = declarator[bracket + 1..].trim_end_matches(']').parse().unwrap_or(1);
          (format!("{}[0]", &declarator[..bracket]), size)
        }
        None => (declarator.to_owned(), 1),
      };
      infos.push(ActiveInfo { name, size, type_ });
    }
  }
  infos
}

fn glsl_type(name: &str) -> Option<u32> {
  Some(match name {
    "float" => gl::FLOAT,
    "vec2" => gl::FLOAT_VEC2,
    "vec3" => gl::FLOAT_VEC3,
    "vec4" => gl::FLOAT_VEC4,
    "int" => gl::INT,
    "ivec2" => gl::INT_VEC2,
    "ivec3" => gl::INT_VEC3,
    "ivec4" => gl::INT_VEC4,
    "uint" => gl::UNSIGNED_INT,
    "uvec2" => gl::UNSIGNED_INT_VEC2,
    "uvec3" => gl::UNSIGNED_INT_VEC3,
    "uvec4" => gl::UNSIGNED_INT_VEC4,
    "bool" => gl::BOOL,
    "mat2" => gl::FLOAT_MAT2,
    "mat3" => gl::FLOAT_MAT3,
    "mat4" => gl::FLOAT_MAT4,
    "mat2x3" => gl::FLOAT_MAT2x3,
    "mat3x2" => gl::FLOAT_MAT3x2,
    "mat4x3" => gl::FLOAT_MAT4x3,
    "sampler2D" => gl::SAMPLER_2D,
    "samplerCube" => gl::SAMPLER_CUBE,
    "sampler3D" => gl::SAMPLER_3D,
    "sampler2DArray" => gl::SAMPLER_2D_ARRAY,
    "isampler2D" => gl::INT_SAMPLER_2D,
    "usampler2D" => gl::UNSIGNED_INT_SAMPLER_2D,
    _ => return None,
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn scans_uniform_and_attribute_declarations() {
    let source = "\
attribute vec2 position;
uniform highp mat4 u_mvp; // transform
uniform float weights[4], bias;
void main() {}
";
    let uniforms = declarations(source, &["uniform"]);
    let names: Vec<&str> = uniforms.iter().map(|info| info.name.as_str()).collect();
    assert_eq!(names, ["u_mvp", "weights[0]", "bias"]);
    assert_eq!(uniforms[1].size, 4);
    assert_eq!(uniforms[0].type_, gl::FLOAT_MAT4);

    let attribs = declarations(source, &["attribute", "in"]);
    let position = ActiveInfo { name: "position".to_owned(), size: 1, type_: gl::FLOAT_VEC2 };
    assert_eq!(attribs, [position]);
  }

  #[test]
  fn array_elements_resolve_within_bounds() {
    let uniforms = [ActiveInfo { name: "c[0]".to_owned(), size: 3, type_: gl::FLOAT }];
    assert!(resolves_uniform(&uniforms, "c"));
    assert!(resolves_uniform(&uniforms, "c[2]"));
    assert!(!resolves_uniform(&uniforms, "c[3]"));
    assert!(!resolves_uniform(&uniforms, "d"));
  }
}
