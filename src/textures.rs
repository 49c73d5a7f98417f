//! Mip chains, sampling parameters and texture unit bindings, enough to tell
//! whether sampling a texture is going to work.

use crate::handle::Handle;
use crate::names::{self, EnumNames};
use prelude_plus::*;

gl_enum!({
  pub enum TextureTarget {
    Texture2D = TEXTURE_2D,
    CubeMap = TEXTURE_CUBE_MAP,
    Texture3D = TEXTURE_3D,
    Texture2DArray = TEXTURE_2D_ARRAY,
  }
});

pub const CUBE_FACES: [u32; 6] = [
  gl::TEXTURE_CUBE_MAP_POSITIVE_X,
  gl::TEXTURE_CUBE_MAP_NEGATIVE_X,
  gl::TEXTURE_CUBE_MAP_POSITIVE_Y,
  gl::TEXTURE_CUBE_MAP_NEGATIVE_Y,
  gl::TEXTURE_CUBE_MAP_POSITIVE_Z,
  gl::TEXTURE_CUBE_MAP_NEGATIVE_Z,
];

impl TextureTarget {
  /// Resolves the target of an image upload, e.g. `TEXTURE_CUBE_MAP_NEGATIVE_Y`,
  /// to the binding target and the face index.
  pub fn from_image_target(raw: u32) -> Option<(Self, usize)> {
    match CUBE_FACES.iter().position(|&face| face == raw) {
      Some(face) => Some((Self::CubeMap, face)),
      None => Self::from_raw(raw).map(|target| (target, 0)),
    }
  }

  #[inline]
  pub fn face_count(self) -> usize {
    match self {
      Self::CubeMap => 6,
      _ => 1,
    }
  }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct MipInfo {
  pub width: u32,
  pub height: u32,
  pub depth: u32,
  pub internal_format: u32,
  pub type_: u32,
}

impl MipInfo {
  /// The size of the next mip level.
  fn next_level(&self, target: TextureTarget) -> Self {
    Self {
      width: (self.width / 2).max(1),
      height: (self.height / 2).max(1),
      depth: match target {
        TextureTarget::Texture3D => (self.depth / 2).max(1),
        _ => self.depth,
      },
      ..*self
    }
  }

  fn describe_size(&self, target: TextureTarget) -> String {
    match target {
      TextureTarget::Texture3D | TextureTarget::Texture2DArray => {
        format!("{}x{}x{}", self.width, self.height, self.depth)
      }
      _ => format!("{}x{}", self.width, self.height),
    }
  }
}

/// The texel type implied by a sized internal format, used when the upload
/// itself doesn't name one (`texStorage*`, `compressedTexImage*`).
pub fn type_for_internal_format(internal_format: u32) -> u32 {
  match internal_format {
    gl::R32F | gl::RG32F | gl::RGB32F | gl::RGBA32F => gl::FLOAT,
    gl::R16F | gl::RG16F | gl::RGB16F | gl::RGBA16F => gl::HALF_FLOAT,
    _ => gl::UNSIGNED_BYTE,
  }
}

pub fn is_integer_format(internal_format: u32) -> bool {
  matches!(
    internal_format,
    gl::R8I
      | gl::R8UI
      | gl::R16I
      | gl::R16UI
      | gl::R32I
      | gl::R32UI
      | gl::RG8I
      | gl::RG8UI
      | gl::RG16I
      | gl::RG16UI
      | gl::RG32I
      | gl::RG32UI
      | gl::RGB8I
      | gl::RGB8UI
      | gl::RGB16I
      | gl::RGB16UI
      | gl::RGB32I
      | gl::RGB32UI
      | gl::RGBA8I
      | gl::RGBA8UI
      | gl::RGBA16I
      | gl::RGBA16UI
      | gl::RGBA32I
      | gl::RGBA32UI
      | gl::RGB10_A2UI
  )
}

fn is_mipmapping_filter(filter: u32) -> bool {
  matches!(
    filter,
    gl::NEAREST_MIPMAP_NEAREST
      | gl::LINEAR_MIPMAP_NEAREST
      | gl::NEAREST_MIPMAP_LINEAR
      | gl::LINEAR_MIPMAP_LINEAR
  )
}

fn is_linear_filter(filter: u32) -> bool {
  matches!(
    filter,
    gl::LINEAR | gl::LINEAR_MIPMAP_NEAREST | gl::NEAREST_MIPMAP_LINEAR | gl::LINEAR_MIPMAP_LINEAR
  )
}

#[inline(always)]
fn is_power_of_two(n: u32) -> bool { n.is_power_of_two() }

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TextureParams {
  pub min_filter: u32,
  pub mag_filter: u32,
  pub wrap_s: u32,
  pub wrap_t: u32,
}

impl Default for TextureParams {
  fn default() -> Self {
    Self {
      min_filter: gl::NEAREST_MIPMAP_LINEAR,
      mag_filter: gl::LINEAR,
      wrap_s: gl::REPEAT,
      wrap_t: gl::REPEAT,
    }
  }
}

impl TextureParams {
  /// Returns `false` for parameters which don't affect renderability.
  pub fn set(&mut self, pname: u32, value: u32) -> bool {
    let field = match pname {
      gl::TEXTURE_MIN_FILTER => &mut self.min_filter,
      gl::TEXTURE_MAG_FILTER => &mut self.mag_filter,
      gl::TEXTURE_WRAP_S => &mut self.wrap_s,
      gl::TEXTURE_WRAP_T => &mut self.wrap_t,
      _ => return false,
    };
    *field = value;
    true
  }
}

/// The context-wide facts renderability depends on.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RenderRules {
  /// WebGL1 can only repeat and mipmap power-of-two textures.
  pub power_of_two: bool,
  pub float_linear: bool,
  pub half_float_linear: bool,
}

#[derive(Debug, Default)]
pub struct TextureRecord {
  target: Option<TextureTarget>,
  mips: BTreeMap<u32, [Option<MipInfo>; 6]>,
  params: TextureParams,
  unrenderable_reason: Option<String>,
}

impl TextureRecord {
  #[inline(always)]
  pub fn target(&self) -> Option<TextureTarget> { self.target }
  #[inline(always)]
  pub fn params(&self) -> &TextureParams { &self.params }

  pub fn mip(&self, level: u32, face: usize) -> Option<&MipInfo> {
    self.mips.get(&level).and_then(|faces| faces.get(face)).and_then(Option::as_ref)
  }

  fn set_mip(&mut self, level: u32, face: usize, info: MipInfo) {
    self.mips.entry(level).or_insert([None; 6])[face] = Some(info);
  }

  /// Fills `level_count` levels (or the full chain with `None`) of every face
  /// starting from the given level 0 sizes.
  fn fill_chain(&mut self, target: TextureTarget, base: &[MipInfo], level_count: Option<u32>) {
    for (face, base) in base.iter().enumerate() {
      let mut info = *base;
      let mut level = 0;
      loop {
        self.set_mip(level, face, info);
        level += 1;
        let done = match level_count {
          Some(count) => level >= count,
          None => {
            info.width <= 1
              && info.height <= 1
              && (target != TextureTarget::Texture3D || info.depth <= 1)
          }
        };
        if done {
          break;
        }
        info = info.next_level(target);
      }
    }
  }

  /// `None` when the texture can be sampled with `params`, the reason why it
  /// can't otherwise.
  pub fn check_renderable(
    &self,
    params: &TextureParams,
    names: &EnumNames,
    rules: &RenderRules,
  ) -> Option<String> {
    let target = self.target.unwrap_or(TextureTarget::Texture2D);
    let face_count = target.face_count();
    let face_suffix = |face: usize| -> String {
      if target == TextureTarget::CubeMap {
        format!(" face {}", names.enum_to_string(CUBE_FACES[face]))
      } else {
        String::new()
      }
    };

    let mut base = Vec::with_capacity(face_count);
    for face in 0..face_count {
      match self.mip(0, face) {
        Some(info) => base.push(*info),
        None => return Some(format!("mip level 0{} does not exist", face_suffix(face))),
      }
    }
    let level0 = base[0];

    if is_mipmapping_filter(params.min_filter) {
      let filter = format!("TEXTURE_MIN_FILTER is {}", names.enum_to_string(params.min_filter));
      let largest = match target {
        TextureTarget::Texture3D => level0.width.max(level0.height).max(level0.depth),
        _ => level0.width.max(level0.height),
      };
      let max_level = 31 - largest.max(1).leading_zeros();
      for (face, base) in base.iter().enumerate() {
        let mut expected = *base;
        for level in 1..=max_level {
          expected = expected.next_level(target);
          let info = match self.mip(level, face) {
            Some(info) => info,
            None => {
              let face = face_suffix(face);
              return Some(format!("{} but mip level {}{} does not exist", filter, level, face));
            }
          };
          let size = (info.width, info.height, info.depth);
          if size != (expected.width, expected.height, expected.depth) {
            return Some(format!(
              "{} but mip level {}{} is {} instead of {}",
              filter,
              level,
              face_suffix(face),
              info.describe_size(target),
              expected.describe_size(target),
            ));
          }
          if info.internal_format != level0.internal_format {
            return Some(format!(
              "{} but mip level {}{} has internal format {} while mip level 0 has {}",
              filter,
              level,
              face_suffix(face),
              names.enum_to_string(info.internal_format),
              names.enum_to_string(level0.internal_format),
            ));
          }
        }
      }
    }

    if rules.power_of_two && !(is_power_of_two(level0.width) && is_power_of_two(level0.height)) {
      let mut problems = Vec::new();
      if is_mipmapping_filter(params.min_filter) {
        problems.push(format!("TEXTURE_MIN_FILTER is {}", names.enum_to_string(params.min_filter)));
      }
      if params.wrap_s != gl::CLAMP_TO_EDGE {
        problems.push(format!("TEXTURE_WRAP_S is {}", names.enum_to_string(params.wrap_s)));
      }
      if params.wrap_t != gl::CLAMP_TO_EDGE {
        problems.push(format!("TEXTURE_WRAP_T is {}", names.enum_to_string(params.wrap_t)));
      }
      if !problems.is_empty() {
        return Some(format!(
          "texture is {}x{} which is not a power of 2 but {}",
          level0.width,
          level0.height,
          problems.join(" and ")
        ));
      }
    }

    if target == TextureTarget::CubeMap && level0.width != level0.height {
      return Some(format!("cube map is {}x{} but must be square", level0.width, level0.height));
    }

    let linear = is_linear_filter(params.min_filter) || is_linear_filter(params.mag_filter);
    if linear {
      let is_float = level0.type_ == gl::FLOAT;
      let is_half_float_oes = level0.type_ == names::HALF_FLOAT_OES;
      if (is_float && !rules.float_linear) || (is_half_float_oes && !rules.half_float_linear) {
        return Some(format!(
          "texture type is {} but linear filtering of it requires the {} extension",
          names.enum_to_string(level0.type_),
          if is_float { "OES_texture_float_linear" } else { "OES_texture_half_float_linear" },
        ));
      }
      if is_integer_format(level0.internal_format) {
        return Some(format!(
          "texture has the integer format {} which can't be filtered linearly",
          names.enum_to_string(level0.internal_format)
        ));
      }
    }

    None
  }

  /// The reason computed after the last change of mips or parameters.
  #[inline(always)]
  pub fn unrenderable_reason(&self) -> Option<&str> { self.unrenderable_reason.as_deref() }

  fn refresh(&mut self, names: &EnumNames, rules: &RenderRules) {
    self.unrenderable_reason = self.check_renderable(&self.params, names, rules);
  }
}

#[derive(Debug, Default, Clone)]
pub struct TextureUnit {
  bindings: HashMap<TextureTarget, Handle>,
  sampler: Option<Handle>,
}

impl TextureUnit {
  pub fn bound(&self, target: TextureTarget) -> Option<Handle> {
    self.bindings.get(&target).copied()
  }
  #[inline(always)]
  pub fn sampler(&self) -> Option<Handle> { self.sampler }
}

#[derive(Debug)]
pub struct Textures {
  records: HashMap<Handle, TextureRecord>,
  samplers: HashMap<Handle, TextureParams>,
  units: Vec<TextureUnit>,
  active_unit: usize,
  rules: RenderRules,
}

impl Textures {
  pub fn new(unit_count: u32, rules: RenderRules) -> Self {
    Self {
      records: HashMap::new(),
      samplers: HashMap::new(),
      units: vec![TextureUnit::default(); unit_count as usize],
      active_unit: 0,
      rules,
    }
  }

  #[inline(always)]
  pub fn unit_count(&self) -> usize { self.units.len() }
  #[inline(always)]
  pub fn active_unit(&self) -> usize { self.active_unit }
  #[inline(always)]
  pub fn rules(&self) -> &RenderRules { &self.rules }

  pub fn unit(&self, unit: usize) -> Option<&TextureUnit> { self.units.get(unit) }

  pub fn record(&self, texture: Handle) -> Option<&TextureRecord> { self.records.get(&texture) }

  pub fn set_rules(&mut self, rules: RenderRules, names: &EnumNames) {
    self.rules = rules;
    for record in self.records.values_mut() {
      record.refresh(names, &rules);
    }
  }

  pub fn create(&mut self, texture: Handle, names: &EnumNames) {
    let mut record = TextureRecord::default();
    record.refresh(names, &self.rules);
    self.records.insert(texture, record);
  }

  pub fn delete(&mut self, texture: Handle) {
    self.records.remove(&texture);
    for unit in &mut self.units {
      unit.bindings.retain(|_, bound| *bound != texture);
    }
  }

  /// Selects the active unit from a `TEXTURE<i>` value, returns the
  /// previously active unit.
  pub fn set_active_unit(&mut self, texture_enum: u32) -> usize {
    let unit = texture_enum.wrapping_sub(gl::TEXTURE0) as usize;
    mem::replace(&mut self.active_unit, unit)
  }

  /// Binds `texture` on the active unit returning the previous binding. The
  /// first target a texture is bound to becomes its target.
  pub fn bind(
    &mut self,
    target: TextureTarget,
    texture: Option<Handle>,
    names: &EnumNames,
  ) -> Option<Handle> {
    if let Some(texture) = texture {
      let rules = self.rules;
      let record = self.records.entry(texture).or_insert_with(TextureRecord::default);
      if record.target.is_none() {
        record.target = Some(target);
        record.refresh(names, &rules);
      }
    }
    let unit = match self.units.get_mut(self.active_unit) {
      Some(unit) => unit,
      None => return None,
    };
    match texture {
      Some(texture) => unit.bindings.insert(target, texture),
      None => unit.bindings.remove(&target),
    }
  }

  pub fn bound_on_active_unit(&self, target: TextureTarget) -> Option<Handle> {
    self.units.get(self.active_unit).and_then(|unit| unit.bound(target))
  }

  fn bound_record_mut(&mut self, target: TextureTarget) -> Option<&mut TextureRecord> {
    let texture = self.bound_on_active_unit(target)?;
    self.records.get_mut(&texture)
  }

  /// Records a single image of a texture, `image_target` may name a cube face.
  pub fn set_image(&mut self, image_target: u32, level: u32, info: MipInfo, names: &EnumNames) {
    let rules = self.rules;
    if let Some((target, face)) = TextureTarget::from_image_target(image_target) {
      if let Some(record) = self.bound_record_mut(target) {
        record.set_mip(level, face, info);
        record.refresh(names, &rules);
      }
    }
  }

  /// `texStorage2D/3D`: allocates `levels` levels of every face at once.
  pub fn set_storage(&mut self, target: u32, levels: u32, base: MipInfo, names: &EnumNames) {
    let rules = self.rules;
    if let Some(target) = TextureTarget::from_raw(target) {
      if let Some(record) = self.bound_record_mut(target) {
        record.mips.clear();
        let faces = vec![base; target.face_count()];
        record.fill_chain(target, &faces, Some(levels.max(1)));
        record.refresh(names, &rules);
      }
    }
  }

  pub fn generate_mipmap(&mut self, target: u32, names: &EnumNames) {
    let rules = self.rules;
    if let Some(target) = TextureTarget::from_raw(target) {
      if let Some(record) = self.bound_record_mut(target) {
        let base: Option<Vec<MipInfo>> =
          (0..target.face_count()).map(|face| record.mip(0, face).copied()).collect();
        if let Some(base) = base {
          record.fill_chain(target, &base, None);
          record.refresh(names, &rules);
        }
      }
    }
  }

  pub fn set_parameter(&mut self, target: u32, pname: u32, value: u32, names: &EnumNames) {
    let rules = self.rules;
    if let Some(target) = TextureTarget::from_raw(target) {
      if let Some(record) = self.bound_record_mut(target) {
        if record.params.set(pname, value) {
          record.refresh(names, &rules);
        }
      }
    }
  }

  pub fn create_sampler(&mut self, sampler: Handle) {
    self.samplers.insert(sampler, TextureParams::default());
  }

  pub fn delete_sampler(&mut self, sampler: Handle) {
    self.samplers.remove(&sampler);
    for unit in &mut self.units {
      if unit.sampler == Some(sampler) {
        unit.sampler = None;
      }
    }
  }

  /// Returns the sampler previously bound to `unit`.
  pub fn bind_sampler(&mut self, unit: usize, sampler: Option<Handle>) -> Option<Handle> {
    match self.units.get_mut(unit) {
      Some(unit) => mem::replace(&mut unit.sampler, sampler),
      None => None,
    }
  }

  pub fn set_sampler_parameter(&mut self, sampler: Handle, pname: u32, value: u32) {
    self.samplers.entry(sampler).or_insert_with(TextureParams::default).set(pname, value);
  }

  /// Why `texture` can't be sampled through `unit`, taking the sampler
  /// object bound to that unit into account.
  pub fn unrenderable_reason(
    &self,
    texture: Handle,
    unit: usize,
    names: &EnumNames,
  ) -> Option<String> {
    let record = match self.records.get(&texture) {
      Some(record) => record,
      None => return None,
    };
    let sampler_params =
      self.units.get(unit).and_then(|unit| unit.sampler).and_then(|s| self.samplers.get(&s));
    match sampler_params {
      Some(params) => record.check_renderable(params, names, &self.rules),
      None => record.unrenderable_reason().map(ToOwned::to_owned),
    }
  }

  pub fn clear(&mut self) {
    self.records.clear();
    self.samplers.clear();
    for unit in &mut self.units {
      *unit = TextureUnit::default();
    }
    self.active_unit = 0;
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::handle::ObjectKind;
  use crate::names::ApiFlavor;

  const WEBGL1: RenderRules =
    RenderRules { power_of_two: true, float_linear: false, half_float_linear: false };

  fn rgba(width: u32, height: u32) -> MipInfo {
    MipInfo { width, height, depth: 1, internal_format: gl::RGBA, type_: gl::UNSIGNED_BYTE }
  }

  fn setup() -> (Textures, EnumNames, Handle) {
    let names = EnumNames::new(ApiFlavor::WebGl1);
    let mut textures = Textures::new(8, WEBGL1);
    let texture = Handle::new(ObjectKind::Texture, 1);
    textures.create(texture, &names);
    textures.bind(TextureTarget::Texture2D, Some(texture), &names);
    (textures, names, texture)
  }

  #[test]
  fn renderability_round_trip() {
    let (mut textures, names, texture) = setup();
    let reason = textures.unrenderable_reason(texture, 0, &names).unwrap();
    assert!(reason.contains("mip level 0"), "{}", reason);

    textures.set_image(gl::TEXTURE_2D, 0, rgba(16, 16), &names);
    textures.set_parameter(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::LINEAR, &names);
    assert_eq!(textures.unrenderable_reason(texture, 0, &names), None);

    let filter = gl::LINEAR_MIPMAP_LINEAR;
    textures.set_parameter(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, filter, &names);
    let reason = textures.unrenderable_reason(texture, 0, &names).unwrap();
    assert!(reason.contains("mip level 1 does not exist"), "{}", reason);

    textures.generate_mipmap(gl::TEXTURE_2D, &names);
    assert_eq!(textures.unrenderable_reason(texture, 0, &names), None);
    assert_eq!(textures.record(texture).unwrap().mip(4, 0), Some(&rgba(1, 1)));
  }

  #[test]
  fn mismatched_mip_sizes_are_named() {
    let (mut textures, names, texture) = setup();
    textures.set_image(gl::TEXTURE_2D, 0, rgba(4, 4), &names);
    textures.set_image(gl::TEXTURE_2D, 1, rgba(2, 2), &names);
    textures.set_image(gl::TEXTURE_2D, 2, rgba(2, 2), &names);
    let reason = textures.unrenderable_reason(texture, 0, &names).unwrap();
    assert!(reason.contains("mip level 2 is 2x2 instead of 1x1"), "{}", reason);
  }

  #[test]
  fn npot_textures_need_clamping_on_webgl1() {
    let (mut textures, names, texture) = setup();
    textures.set_image(gl::TEXTURE_2D, 0, rgba(3, 5), &names);
    textures.set_parameter(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::NEAREST, &names);
    let reason = textures.unrenderable_reason(texture, 0, &names).unwrap();
    assert!(reason.contains("not a power of 2"), "{}", reason);
    assert!(reason.contains("TEXTURE_WRAP_S is REPEAT"), "{}", reason);

    textures.set_parameter(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::CLAMP_TO_EDGE, &names);
    textures.set_parameter(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::CLAMP_TO_EDGE, &names);
    assert_eq!(textures.unrenderable_reason(texture, 0, &names), None);

    let webgl2 = RenderRules { power_of_two: false, ..WEBGL1 };
    textures.set_parameter(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::REPEAT, &names);
    textures.set_rules(webgl2, &names);
    assert_eq!(textures.unrenderable_reason(texture, 0, &names), None);
  }

  #[test]
  fn cube_maps_need_every_face_and_square_size() {
    let (mut textures, names, _) = setup();
    let cube = Handle::new(ObjectKind::Texture, 2);
    textures.create(cube, &names);
    textures.bind(TextureTarget::CubeMap, Some(cube), &names);
    textures.set_parameter(gl::TEXTURE_CUBE_MAP, gl::TEXTURE_MIN_FILTER, gl::LINEAR, &names);
    for &face in &CUBE_FACES[..5] {
      textures.set_image(face, 0, rgba(8, 8), &names);
    }
    let reason = textures.unrenderable_reason(cube, 0, &names).unwrap();
    assert!(reason.contains("TEXTURE_CUBE_MAP_NEGATIVE_Z"), "{}", reason);

    textures.set_image(CUBE_FACES[5], 0, rgba(8, 8), &names);
    assert_eq!(textures.unrenderable_reason(cube, 0, &names), None);
  }

  #[test]
  fn samplers_override_texture_parameters() {
    let (mut textures, names, texture) = setup();
    textures.set_image(gl::TEXTURE_2D, 0, rgba(16, 16), &names);
    textures.set_parameter(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::LINEAR, &names);

    let sampler = Handle::new(ObjectKind::Sampler, 1);
    textures.create_sampler(sampler);
    textures.bind_sampler(0, Some(sampler));
    assert!(textures.unrenderable_reason(texture, 0, &names).is_some());

    textures.set_sampler_parameter(sampler, gl::TEXTURE_MIN_FILTER, gl::NEAREST);
    assert_eq!(textures.unrenderable_reason(texture, 0, &names), None);
  }

  #[test]
  fn float_textures_need_the_linear_extension() {
    let (mut textures, names, texture) = setup();
    let info = MipInfo { type_: gl::FLOAT, ..rgba(4, 4) };
    textures.set_image(gl::TEXTURE_2D, 0, info, &names);
    textures.set_parameter(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::LINEAR, &names);
    let reason = textures.unrenderable_reason(texture, 0, &names).unwrap();
    assert!(reason.contains("OES_texture_float_linear"), "{}", reason);

    textures.set_rules(RenderRules { float_linear: true, ..WEBGL1 }, &names);
    assert_eq!(textures.unrenderable_reason(texture, 0, &names), None);
  }

  #[test]
  fn storage_of_2d_arrays_keeps_the_layer_count() {
    let names = EnumNames::new(ApiFlavor::WebGl2);
    let rules = RenderRules { power_of_two: false, float_linear: false, half_float_linear: false };
    let mut textures = Textures::new(4, rules);
    let texture = Handle::new(ObjectKind::Texture, 1);
    textures.create(texture, &names);
    textures.bind(TextureTarget::Texture2DArray, Some(texture), &names);
    let base = MipInfo { depth: 6, internal_format: gl::RGBA8, ..rgba(8, 8) };
    textures.set_storage(gl::TEXTURE_2D_ARRAY, 4, base, &names);

    let record = textures.record(texture).unwrap();
    assert_eq!(record.mip(3, 0).map(|mip| (mip.width, mip.depth)), Some((1, 6)));
    assert_eq!(textures.unrenderable_reason(texture, 0, &names), None);
  }
}
