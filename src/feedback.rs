use crate::framebuffers::Framebuffers;
use crate::names::EnumNames;
use crate::programs::ProgramRecord;
use crate::tags::TagRegistry;
use crate::textures::Textures;
use prelude_plus::*;

/// Finds textures which the current program samples while they are attached
/// to the bound draw framebuffer.
pub fn check(
  program: &ProgramRecord,
  textures: &Textures,
  framebuffers: &Framebuffers,
  names: &EnumNames,
  tags: &TagRegistry,
) -> Vec<String> {
  let framebuffer = match framebuffers.draw_binding() {
    Some(framebuffer) => framebuffer,
    None => return Vec::new(),
  };

  let mut problems = Vec::new();
  for (index, uniform) in program.uniforms().iter().enumerate() {
    let target = match uniform.sampler_target {
      Some(target) => target,
      None => continue,
    };
    for (element, &unit) in program.sampler_units(index).iter().enumerate() {
      let texture = match textures.unit(unit as usize).and_then(|unit| unit.bound(target)) {
        Some(texture) => texture,
        None => continue,
      };
      let points = framebuffers.points_of_texture(framebuffer, texture);
      if points.is_empty() {
        continue;
      }
      let points: Vec<String> = points.iter().map(|&point| names.enum_to_string(point)).collect();
      problems.push(format!(
        "{} is bound to texture unit {} used by uniform {} and is also attached to {} as {}",
        tags.describe(texture),
        unit,
        uniform.element_name(element as u32),
        tags.describe(framebuffer),
        points.join(", "),
      ));
    }
  }
  problems
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::Config;
  use crate::framebuffers::Attachment;
  use crate::handle::{Handle, ObjectKind};
  use crate::names::ApiFlavor;
  use crate::textures::{RenderRules, TextureTarget};
  use crate::value::ActiveInfo;

  #[test]
  fn names_texture_uniform_unit_and_attachment() {
    let names = EnumNames::new(ApiFlavor::WebGl2);
    let mut tags = TagRegistry::default();
    let texture = Handle::new(ObjectKind::Texture, 1);
    let framebuffer = Handle::new(ObjectKind::Framebuffer, 1);
    tags.tag(texture, "scene");
    tags.tag(framebuffer, "offscreen");

    let sampler = ActiveInfo { name: "tex".to_owned(), size: 1, type_: gl::SAMPLER_2D };
    let program = ProgramRecord::from_reflection(&[(sampler, true)], &[], &Config::default());

    let rules = RenderRules { power_of_two: false, float_linear: true, half_float_linear: true };
    let mut textures = Textures::new(8, rules);
    textures.create(texture, &names);
    textures.bind(TextureTarget::Texture2D, Some(texture), &names);

    let mut framebuffers = Framebuffers::default();
    assert!(check(&program, &textures, &framebuffers, &names, &tags).is_empty());

    framebuffers.bind(gl::FRAMEBUFFER, Some(framebuffer));
    framebuffers.attach(
      gl::FRAMEBUFFER,
      gl::COLOR_ATTACHMENT0,
      Some(Attachment::Texture { texture, level: 0, layer: 0 }),
    );
    assert_eq!(
      check(&program, &textures, &framebuffers, &names, &tags),
      ["Texture(\"scene\") is bound to texture unit 0 used by uniform tex and is also attached to \
        Framebuffer(\"offscreen\") as COLOR_ATTACHMENT0"]
    );
  }
}
