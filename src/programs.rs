//! Uniform and attribute bookkeeping of linked programs.

use crate::config::Config;
use crate::entry_points::EntryPoint;
use crate::handle::Handle;
use crate::textures::TextureTarget;
use crate::value::{ActiveInfo, Value};
use prelude_plus::*;

pub fn is_builtin_name(name: &str) -> bool {
  name.starts_with("gl_") || name.starts_with("webgl_") || name.starts_with("_webgl_")
}

/// Number of scalar components of a uniform type and, for samplers, the
/// texture target they sample from.
pub fn uniform_type_info(type_: u32) -> (u32, Option<TextureTarget>) {
  use TextureTarget::*;
  match type_ {
    gl::FLOAT | gl::INT | gl::UNSIGNED_INT | gl::BOOL => (1, None),
    gl::FLOAT_VEC2 | gl::INT_VEC2 | gl::UNSIGNED_INT_VEC2 | gl::BOOL_VEC2 => (2, None),
    gl::FLOAT_VEC3 | gl::INT_VEC3 | gl::UNSIGNED_INT_VEC3 | gl::BOOL_VEC3 => (3, None),
    gl::FLOAT_VEC4 | gl::INT_VEC4 | gl::UNSIGNED_INT_VEC4 | gl::BOOL_VEC4 => (4, None),
    gl::FLOAT_MAT2 => (4, None),
    gl::FLOAT_MAT2x3 | gl::FLOAT_MAT3x2 => (6, None),
    gl::FLOAT_MAT2x4 | gl::FLOAT_MAT4x2 => (8, None),
    gl::FLOAT_MAT3 => (9, None),
    gl::FLOAT_MAT3x4 | gl::FLOAT_MAT4x3 => (12, None),
    gl::FLOAT_MAT4 => (16, None),
    gl::SAMPLER_2D | gl::SAMPLER_2D_SHADOW | gl::INT_SAMPLER_2D | gl::UNSIGNED_INT_SAMPLER_2D => {
      (1, Some(Texture2D))
    }
    gl::SAMPLER_CUBE
    | gl::SAMPLER_CUBE_SHADOW
    | gl::INT_SAMPLER_CUBE
    | gl::UNSIGNED_INT_SAMPLER_CUBE => (1, Some(CubeMap)),
    gl::SAMPLER_3D | gl::INT_SAMPLER_3D | gl::UNSIGNED_INT_SAMPLER_3D => (1, Some(Texture3D)),
    gl::SAMPLER_2D_ARRAY
    | gl::SAMPLER_2D_ARRAY_SHADOW
    | gl::INT_SAMPLER_2D_ARRAY
    | gl::UNSIGNED_INT_SAMPLER_2D_ARRAY => (1, Some(Texture2DArray)),
    _ => (1, None),
  }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SetterData {
  /// `uniform3f(location, x, y, z)`
  Scalars,
  /// `uniform3fv(location, data, srcOffset?, srcLength?)`
  Vector,
  /// `uniformMatrix3fv(location, transpose, data, srcOffset?, srcLength?)`
  Matrix,
}

/// Shape of a uniform setter entry point.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct UniformSetter {
  pub components: usize,
  pub data: SetterData,
}

impl UniformSetter {
  pub fn of(entry: EntryPoint) -> Option<Self> {
    use EntryPoint::*;
    use SetterData::*;
    let (components, data) = match entry {
      Uniform1f | Uniform1i | Uniform1ui => (1, Scalars),
      Uniform2f | Uniform2i | Uniform2ui => (2, Scalars),
      Uniform3f | Uniform3i | Uniform3ui => (3, Scalars),
      Uniform4f | Uniform4i | Uniform4ui => (4, Scalars),
      Uniform1fv | Uniform1iv | Uniform1uiv => (1, Vector),
      Uniform2fv | Uniform2iv | Uniform2uiv => (2, Vector),
      Uniform3fv | Uniform3iv | Uniform3uiv => (3, Vector),
      Uniform4fv | Uniform4iv | Uniform4uiv => (4, Vector),
      UniformMatrix2fv => (4, Matrix),
      UniformMatrix2x3fv | UniformMatrix3x2fv => (6, Matrix),
      UniformMatrix2x4fv | UniformMatrix4x2fv => (8, Matrix),
      UniformMatrix3fv => (9, Matrix),
      UniformMatrix3x4fv | UniformMatrix4x3fv => (12, Matrix),
      UniformMatrix4fv => (16, Matrix),
      _ => return None,
    };
    Some(Self { components, data })
  }

  /// The values a call writes, honoring `srcOffset` and `srcLength`.
  pub fn values(&self, args: &[Value]) -> Vec<f64> {
    let data_index = match self.data {
      SetterData::Scalars => {
        return args.iter().skip(1).map(|arg| arg.as_f64().unwrap_or(f64::NAN)).collect()
      }
      SetterData::Vector => 1,
      SetterData::Matrix => 2,
    };
    let data = match args.get(data_index).and_then(Value::as_array) {
      Some(data) => data,
      None => return Vec::new(),
    };
    let offset = args.get(data_index + 1).and_then(Value::as_usize).unwrap_or(0).min(data.len());
    let end = match args.get(data_index + 2).and_then(Value::as_usize) {
      Some(length) if length > 0 => (offset + length).min(data.len()),
      _ => data.len(),
    };
    (offset..end).map(|i| data.get_f64(i).unwrap_or(f64::NAN)).collect()
  }

  /// How many array elements of the uniform a call with `value_count`
  /// values covers.
  pub fn element_count(&self, value_count: usize) -> usize {
    match self.data {
      SetterData::Scalars => 1,
      _ => (value_count / self.components).max(1),
    }
  }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct UniformRecord {
  /// Name without the `[0]` suffix of arrays.
  pub name: String,
  pub size: u32,
  pub type_: u32,
  pub components: u32,
  pub is_array: bool,
  pub sampler_target: Option<TextureTarget>,
}

impl UniformRecord {
  #[inline(always)]
  pub fn is_sampler(&self) -> bool { self.sampler_target.is_some() }

  pub fn element_name(&self, element: u32) -> String {
    if self.is_array {
      format!("{}[{}]", self.name, element)
    } else {
      self.name.clone()
    }
  }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct AttribRecord {
  pub name: String,
  pub location: u32,
  pub type_: u32,
}

#[derive(Debug, Default)]
pub struct ProgramRecord {
  uniforms: Vec<UniformRecord>,
  /// alias (`foo`, `foo[0]`, `foo[1]`, ...) → (uniform, first element)
  aliases: HashMap<String, (usize, u32)>,
  unset: BTreeSet<(usize, u32)>,
  sampler_units: HashMap<usize, Vec<u32>>,
  attribs: Vec<AttribRecord>,
  locations: HashSet<Handle>,
}

impl ProgramRecord {
  /// Builds the record of a freshly linked program from the reflection data
  /// of its active uniforms (with whether they have a location) and
  /// attributes (with their locations).
  pub fn from_reflection(
    uniforms: &[(ActiveInfo, bool)],
    attribs: &[(ActiveInfo, i64)],
    config: &Config,
  ) -> Self {
    let mut record = Self::default();

    for (info, has_location) in uniforms {
      let is_array = info.name.ends_with("[0]");
      let name = info.name.trim_end_matches("[0]");
      if is_builtin_name(name) || !*has_location {
        continue;
      }

      let (components, sampler_target) = uniform_type_info(info.type_);
      let index = record.uniforms.len();
      let size = info.size.max(1);
      record.uniforms.push(UniformRecord {
        name: name.to_owned(),
        size,
        type_: info.type_,
        components,
        is_array,
        sampler_target,
      });

      record.aliases.insert(name.to_owned(), (index, 0));
      if is_array {
        for element in 0..size {
          record.aliases.insert(format!("{}[{}]", name, element), (index, element));
        }
      }

      if sampler_target.is_some() {
        record.sampler_units.insert(index, vec![0; size as usize]);
      }

      let tracked = if sampler_target.is_some() {
        config.fail_unset_sampler_uniforms
      } else {
        true
      };
      if tracked && !config.is_uniform_ignored(name) {
        record.unset.extend((0..size).map(|element| (index, element)));
      }
    }

    for (info, location) in attribs {
      if is_builtin_name(&info.name) || *location < 0 {
        continue;
      }
      record.attribs.push(AttribRecord {
        name: info.name.clone(),
        location: *location as u32,
        type_: info.type_,
      });
    }

    record
  }

  #[inline(always)]
  pub fn uniforms(&self) -> &[UniformRecord] { &self.uniforms }
  #[inline(always)]
  pub fn attribs(&self) -> &[AttribRecord] { &self.attribs }

  pub fn resolve(&self, alias: &str) -> Option<(&UniformRecord, u32)> {
    self.aliases.get(alias).map(|&(index, element)| (&self.uniforms[index], element))
  }

  /// Index of the uniform and the element an alias refers to.
  pub fn lookup(&self, alias: &str) -> Option<(usize, u32)> { self.aliases.get(alias).copied() }

  /// Texture units assigned to the elements of the sampler uniform at `index`.
  pub fn sampler_units(&self, index: usize) -> &[u32] {
    self.sampler_units.get(&index).map_or(&[], |units| units.as_slice())
  }

  /// Names of the uniform elements which were never written since link.
  pub fn unset_uniform_names(&self) -> Vec<String> {
    self.unset.iter().map(|&(index, element)| self.uniforms[index].element_name(element)).collect()
  }

  pub fn has_unset_uniforms(&self) -> bool { !self.unset.is_empty() }

  /// Marks `count` elements starting at the one named by `alias` as set and
  /// records sampler units. Returns `false` for unknown aliases.
  pub fn mark_set(&mut self, alias: &str, count: usize, values: &[f64]) -> bool {
    let (index, first) = match self.aliases.get(alias) {
      Some(&entry) => entry,
      None => return false,
    };
    let size = self.uniforms[index].size;
    let end = (first as usize + count).min(size as usize) as u32;
    for element in first..end {
      self.unset.remove(&(index, element));
    }

    if let Some(units) = self.sampler_units.get_mut(&index) {
      for (element, value) in (first..end).zip(values) {
        units[element as usize] =
          if value.is_finite() && *value >= 0.0 { *value as u32 } else { u32::MAX };
      }
    }
    true
  }
}

/// Per-program uniform state plus the shader sources needed to annotate
/// compile and link failures.
#[derive(Debug, Default)]
pub struct Programs {
  records: HashMap<Handle, ProgramRecord>,
  /// uniform location → (program, alias it was obtained for)
  locations: HashMap<Handle, (Handle, String)>,
  current: Option<Handle>,
  shader_sources: HashMap<Handle, String>,
}

impl Programs {
  #[inline(always)]
  pub fn current(&self) -> Option<Handle> { self.current }

  pub fn current_record(&self) -> Option<&ProgramRecord> {
    self.current.and_then(|program| self.records.get(&program))
  }

  pub fn record(&self, program: Handle) -> Option<&ProgramRecord> { self.records.get(&program) }

  pub fn use_program(&mut self, program: Option<Handle>) { self.current = program; }

  fn forget_locations(&mut self, program: Handle) {
    if let Some(record) = self.records.get(&program) {
      for location in &record.locations {
        self.locations.remove(location);
      }
    }
  }

  /// Replaces everything known about `program` after a successful link.
  pub fn link(&mut self, program: Handle, record: ProgramRecord) {
    self.forget_locations(program);
    debug!(
      "linked {}: {} uniforms, {} attributes",
      program,
      record.uniforms.len(),
      record.attribs.len()
    );
    self.records.insert(program, record);
  }

  /// Drops the state of a program which failed to link or was deleted.
  pub fn forget(&mut self, program: Handle) {
    self.forget_locations(program);
    self.records.remove(&program);
  }

  pub fn delete(&mut self, program: Handle) {
    self.forget(program);
    if self.current == Some(program) {
      self.current = None;
    }
  }

  pub fn add_location(&mut self, location: Handle, program: Handle, alias: &str) {
    if let Some(record) = self.records.get_mut(&program) {
      record.locations.insert(location);
      self.locations.insert(location, (program, alias.to_owned()));
    }
  }

  /// The program and alias a location was obtained for.
  pub fn location_info(&self, location: Handle) -> Option<(Handle, &str)> {
    self.locations.get(&location).map(|(program, alias)| (*program, alias.as_str()))
  }

  /// Applies a successful uniform setter call. Returns the program and the
  /// uniform element name the call started at.
  pub fn set_uniform(
    &mut self,
    location: Handle,
    setter: UniformSetter,
    values: &[f64],
  ) -> Option<(Handle, String)> {
    let (program, alias) = self.locations.get(&location)?.clone();
    let record = self.records.get_mut(&program)?;
    let count = setter.element_count(values.len());
    record.mark_set(&alias, count, values);
    Some((program, alias))
  }

  pub fn set_shader_source(&mut self, shader: Handle, source: &str) {
    self.shader_sources.insert(shader, source.to_owned());
  }

  pub fn shader_source(&self, shader: Handle) -> Option<&str> {
    self.shader_sources.get(&shader).map(String::as_str)
  }

  pub fn delete_shader(&mut self, shader: Handle) { self.shader_sources.remove(&shader); }
}

/// Indices of matrices in `values` which consist only of zeros.
pub fn zero_matrices(values: &[f64], components: usize) -> Vec<usize> {
  values
    .chunks(components)
    .enumerate()
    .filter(|(_, matrix)| matrix.len() == components && matrix.iter().all(|&v| v == 0.0))
    .map(|(i, _)| i)
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::handle::ObjectKind;

  fn info(name: &str, size: u32, type_: u32) -> ActiveInfo {
    ActiveInfo { name: name.to_owned(), size, type_ }
  }

  fn abc_record(config: &Config) -> ProgramRecord {
    ProgramRecord::from_reflection(
      &[
        (info("a", 1, gl::FLOAT), true),
        (info("b", 1, gl::FLOAT_VEC3), true),
        (info("c[0]", 4, gl::FLOAT_VEC4), true),
        (info("gl_DepthRange.near", 1, gl::FLOAT), true),
        (info("block_member", 1, gl::FLOAT), false),
      ],
      &[(info("position", 1, gl::FLOAT_VEC2), 0)],
      config,
    )
  }

  #[test]
  fn builtins_and_block_members_are_skipped() {
    let record = abc_record(&Config::default());
    let names: Vec<&str> = record.uniforms().iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, ["a", "b", "c"]);
    assert_eq!(record.unset_uniform_names(), ["a", "b", "c[0]", "c[1]", "c[2]", "c[3]"]);
  }

  #[test]
  fn array_aliases_share_one_unset_set() {
    let mut record = abc_record(&Config::default());
    record.mark_set("c[1]", 1, &[]);
    record.mark_set("c[2]", 1, &[]);
    assert_eq!(record.unset_uniform_names(), ["a", "b", "c[0]", "c[3]"]);

    record.mark_set("c", 4, &[]);
    record.mark_set("a", 1, &[]);
    record.mark_set("b", 1, &[]);
    assert!(!record.has_unset_uniforms());
  }

  #[test]
  fn ignored_uniforms_and_samplers_are_not_tracked() {
    let mut config = Config::default();
    config.ignore_uniforms.insert("a".to_owned());
    let record = ProgramRecord::from_reflection(
      &[(info("a", 1, gl::FLOAT), true), (info("tex", 1, gl::SAMPLER_2D), true)],
      &[],
      &config,
    );
    assert!(!record.has_unset_uniforms());
    let (tex, _) = record.lookup("tex").unwrap();
    assert_eq!(record.sampler_units(tex), [0]);

    config.fail_unset_sampler_uniforms = true;
    let uniforms = [(info("tex", 1, gl::SAMPLER_2D), true)];
    let record = ProgramRecord::from_reflection(&uniforms, &[], &config);
    assert_eq!(record.unset_uniform_names(), ["tex"]);
  }

  #[test]
  fn relink_forgets_locations() {
    let config = Config::default();
    let program = Handle::new(ObjectKind::Program, 1);
    let location = Handle::new(ObjectKind::UniformLocation, 1);
    let mut programs = Programs::default();
    programs.link(program, abc_record(&config));
    programs.add_location(location, program, "a");
    assert!(programs.location_info(location).is_some());

    programs.link(program, abc_record(&config));
    assert!(programs.location_info(location).is_none());
    assert_eq!(programs.record(program).unwrap().unset_uniform_names().len(), 6);
  }

  #[test]
  fn setter_values_honor_offset_and_length() {
    let setter = UniformSetter::of(EntryPoint::Uniform2fv).unwrap();
    let matrix = Value::from(vec![1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0]);
    let args = [Value::Null, matrix, Value::from(2), Value::from(2)];
    assert_eq!(setter.values(&args), [3.0, 4.0]);
    assert_eq!(setter.element_count(4), 2);
  }

  #[test]
  fn finds_zero_matrices() {
    let mut values = vec![0.0; 8];
    values[5] = 1.0;
    assert_eq!(zero_matrices(&values, 4), [0]);
  }
}
