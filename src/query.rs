//! Queries the linter itself makes against the real context. They bypass
//! linting entirely.

use crate::dispatch::Backend;
use crate::entry_points::EntryPoint;
use crate::handle::Handle;
use crate::names::ApiFlavor;
use crate::value::{ActiveInfo, Value};
use prelude_plus::*;

const DEFAULT_TEXTURE_UNITS: u32 = 16;
const DEFAULT_VERTEX_ATTRIBS: u32 = 16;

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Capabilities {
  pub flavor: ApiFlavor,
  pub version: String,
  pub max_texture_units: u32,
  pub max_vertex_attribs: u32,
}

impl Capabilities {
  pub fn load(backend: &mut dyn Backend, flavor: ApiFlavor) -> Self {
    fn get_u32_1(backend: &mut dyn Backend, name: u32, default: u32) -> u32 {
      backend.invoke(EntryPoint::GetParameter, &[Value::from(name)]).as_u32().unwrap_or(default)
    }

    fn get_string(backend: &mut dyn Backend, name: u32) -> String {
      match backend.invoke(EntryPoint::GetParameter, &[Value::from(name)]) {
        Value::Str(s) => s,
        _ => String::new(),
      }
    }

    let version = get_string(backend, gl::VERSION);
    info!("context version:    {}", version);
    info!("context flavor:     {:?}", flavor);
    let max_texture_units =
      get_u32_1(backend, gl::MAX_COMBINED_TEXTURE_IMAGE_UNITS, DEFAULT_TEXTURE_UNITS);
    info!("max texture units:  {}", max_texture_units);
    let max_vertex_attribs = get_u32_1(backend, gl::MAX_VERTEX_ATTRIBS, DEFAULT_VERTEX_ATTRIBS);
    info!("max vertex attribs: {}", max_vertex_attribs);

    Self { flavor, version, max_texture_units, max_vertex_attribs }
  }
}

pub fn get_error(backend: &mut dyn Backend) -> u32 {
  backend.invoke(EntryPoint::GetError, &[]).as_u32().unwrap_or(gl::NO_ERROR)
}

pub fn shader_compiled(backend: &mut dyn Backend, shader: Handle) -> bool {
  backend
    .invoke(EntryPoint::GetShaderParameter, &[Value::from(shader), Value::from(gl::COMPILE_STATUS)])
    .as_bool()
}

pub fn program_linked(backend: &mut dyn Backend, program: Handle) -> bool {
  backend
    .invoke(EntryPoint::GetProgramParameter, &[Value::from(program), Value::from(gl::LINK_STATUS)])
    .as_bool()
}

pub fn info_log(backend: &mut dyn Backend, entry: EntryPoint, object: Handle) -> String {
  match backend.invoke(entry, &[Value::from(object)]) {
    Value::Str(log) => log,
    _ => String::new(),
  }
}

pub fn attached_shaders(backend: &mut dyn Backend, program: Handle) -> Vec<Handle> {
  match backend.invoke(EntryPoint::GetAttachedShaders, &[Value::from(program)]) {
    Value::List(shaders) => shaders.iter().filter_map(Value::as_handle).collect(),
    _ => Vec::new(),
  }
}

/// Active uniforms (with whether they have a location, block members don't)
/// and active attributes (with their locations) of a linked program.
pub fn program_reflection(
  backend: &mut dyn Backend,
  program: Handle,
) -> (Vec<(ActiveInfo, bool)>, Vec<(ActiveInfo, i64)>) {
  fn active_count(backend: &mut dyn Backend, program: Handle, pname: u32) -> u32 {
    backend
      .invoke(EntryPoint::GetProgramParameter, &[Value::from(program), Value::from(pname)])
      .as_u32()
      .unwrap_or(0)
  }

  fn active_info(
    backend: &mut dyn Backend,
    entry: EntryPoint,
    program: Handle,
    index: u32,
  ) -> Option<ActiveInfo> {
    match backend.invoke(entry, &[Value::from(program), Value::from(index)]) {
      Value::ActiveInfo(info) => Some(info),
      _ => None,
    }
  }

  let mut uniforms = Vec::new();
  for index in 0..active_count(backend, program, gl::ACTIVE_UNIFORMS) {
    if let Some(info) = active_info(backend, EntryPoint::GetActiveUniform, program, index) {
      let args = [Value::from(program), Value::from(info.name.as_str())];
      let location = backend.invoke(EntryPoint::GetUniformLocation, &args);
      uniforms.push((info, !location.is_nullish()));
    }
  }

  let mut attribs = Vec::new();
  for index in 0..active_count(backend, program, gl::ACTIVE_ATTRIBUTES) {
    if let Some(info) = active_info(backend, EntryPoint::GetActiveAttrib, program, index) {
      let args = [Value::from(program), Value::from(info.name.as_str())];
      let location = backend
        .invoke(EntryPoint::GetAttribLocation, &args)
        .as_i64()
        .unwrap_or(-1);
      attribs.push((info, location));
    }
  }

  (uniforms, attribs)
}
