use super::*;
use crate::fake::FakeGl;
use crate::textures::{TextureTarget, CUBE_FACES};

const SAMPLER_FS: &str = "\
precision mediump float;
uniform sampler2D u_texture;
void main() {}
";

fn upload(h: &mut Harness, width: u32, height: u32, type_: u32) {
  let (format, image) = (gl::RGBA, None::<Handle>);
  lint_call!(h.ctx, TexImage2D(gl::TEXTURE_2D, 0, format, width, height, 0, format, type_, image))
    .unwrap();
}

fn set_min_filter(h: &mut Harness, filter: u32) {
  lint_call!(h.ctx, TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, filter)).unwrap();
}

#[track_caller]
fn draw_error(h: &mut Harness) -> String {
  lint_call!(h.ctx, DrawArrays(gl::TRIANGLES, 0, 3)).unwrap_err().to_string()
}

#[test]
fn renderability_round_trip() {
  let mut h = Harness::webgl1("{}");
  h.program(EMPTY_SHADER, SAMPLER_FS);
  let texture = h.create(EntryPoint::CreateTexture);
  h.ctx.tag_object(texture, "atlas");
  lint_call!(h.ctx, BindTexture(gl::TEXTURE_2D, texture)).unwrap();

  let message = draw_error(&mut h);
  assert!(message.contains(
    "Texture(\"atlas\") on texture unit 0 used by uniform u_texture is not renderable: \
     mip level 0 does not exist"
  ));

  upload(&mut h, 4, 4, gl::UNSIGNED_BYTE);
  set_min_filter(&mut h, gl::LINEAR);
  lint_call!(h.ctx, DrawArrays(gl::TRIANGLES, 0, 3)).unwrap();

  set_min_filter(&mut h, gl::LINEAR_MIPMAP_LINEAR);
  assert!(draw_error(&mut h)
    .contains("TEXTURE_MIN_FILTER is LINEAR_MIPMAP_LINEAR but mip level 1 does not exist"));

  lint_call!(h.ctx, GenerateMipmap(gl::TEXTURE_2D)).unwrap();
  lint_call!(h.ctx, DrawArrays(gl::TRIANGLES, 0, 3)).unwrap();
}

#[test]
fn samplers_need_a_bound_texture() {
  let mut h = Harness::webgl2("{}");
  h.program(EMPTY_SHADER, SAMPLER_FS);
  assert!(draw_error(&mut h)
    .contains("no texture is bound to TEXTURE_2D on texture unit 0 used by uniform u_texture"));
}

#[test]
fn npot_textures_depend_on_the_flavor() {
  let mut h = Harness::webgl1("{}");
  h.program(EMPTY_SHADER, SAMPLER_FS);
  let texture = h.create(EntryPoint::CreateTexture);
  lint_call!(h.ctx, BindTexture(gl::TEXTURE_2D, texture)).unwrap();
  upload(&mut h, 3, 5, gl::UNSIGNED_BYTE);
  set_min_filter(&mut h, gl::LINEAR);
  assert!(draw_error(&mut h).contains(
    "texture is 3x5 which is not a power of 2 but TEXTURE_WRAP_S is REPEAT and \
     TEXTURE_WRAP_T is REPEAT"
  ));

  let mut h = Harness::webgl2("{}");
  h.program(EMPTY_SHADER, SAMPLER_FS);
  let texture = h.create(EntryPoint::CreateTexture);
  lint_call!(h.ctx, BindTexture(gl::TEXTURE_2D, texture)).unwrap();
  upload(&mut h, 3, 5, gl::UNSIGNED_BYTE);
  set_min_filter(&mut h, gl::LINEAR);
  lint_call!(h.ctx, DrawArrays(gl::TRIANGLES, 0, 3)).unwrap();
}

#[test]
fn sampler_objects_override_texture_filtering() {
  let mut h = Harness::webgl2("{}");
  h.program(EMPTY_SHADER, SAMPLER_FS);
  let texture = h.create(EntryPoint::CreateTexture);
  lint_call!(h.ctx, BindTexture(gl::TEXTURE_2D, texture)).unwrap();
  upload(&mut h, 4, 4, gl::UNSIGNED_BYTE);
  assert!(draw_error(&mut h).contains("mip level 1 does not exist"));

  let sampler = h.create(EntryPoint::CreateSampler);
  lint_call!(h.ctx, SamplerParameteri(sampler, gl::TEXTURE_MIN_FILTER, gl::LINEAR)).unwrap();
  lint_call!(h.ctx, BindSampler(0, sampler)).unwrap();
  lint_call!(h.ctx, DrawArrays(gl::TRIANGLES, 0, 3)).unwrap();
}

#[test]
fn float_textures_need_the_linear_extension() {
  let backend =
    FakeGl::webgl1().with_extensions(&["OES_texture_float", "OES_texture_float_linear"]);
  let mut h = Harness::new(backend, "WebGLRenderingContext", "{}");
  h.program(EMPTY_SHADER, SAMPLER_FS);
  lint_call!(h.ctx, GetExtension("OES_texture_float")).unwrap();
  let texture = h.create(EntryPoint::CreateTexture);
  lint_call!(h.ctx, BindTexture(gl::TEXTURE_2D, texture)).unwrap();
  upload(&mut h, 4, 4, gl::FLOAT);
  set_min_filter(&mut h, gl::LINEAR);
  assert!(draw_error(&mut h).contains(
    "texture type is FLOAT but linear filtering of it requires the \
     OES_texture_float_linear extension"
  ));

  assert!(lint_call!(h.ctx, GetExtension("OES_texture_float_linear")).unwrap().as_str().is_some());
  assert!(h.ctx.session().borrow().textures().rules().float_linear);
  lint_call!(h.ctx, DrawArrays(gl::TRIANGLES, 0, 3)).unwrap();

  assert!(lint_call!(h.ctx, GetExtension("WEBGL_made_up")).unwrap().is_nullish());
  assert!(!h.ctx.session().borrow().names().is_extension_enabled("WEBGL_made_up"));
}

#[test]
fn rebinding_to_another_target_names_the_first_one() {
  let mut h = Harness::webgl2(WARN);
  let texture = h.create(EntryPoint::CreateTexture);
  h.ctx.tag_object(texture, "sky");
  lint_call!(h.ctx, BindTexture(gl::TEXTURE_2D, texture)).unwrap();
  lint_call!(h.ctx, BindTexture(gl::TEXTURE_CUBE_MAP, texture)).unwrap();

  let messages = h.messages();
  assert_eq!(messages.len(), 1);
  assert!(messages[0]
    .contains("error in bindTexture(TEXTURE_CUBE_MAP, Texture(\"sky\")): INVALID_OPERATION"));
  assert!(messages[0].contains("Texture(\"sky\") was first bound to TEXTURE_2D"));
}

#[test]
fn sampling_the_render_target_is_a_feedback_loop() {
  let mut h = Harness::webgl2(WARN);
  h.program(EMPTY_SHADER, SAMPLER_FS);
  let texture = h.create(EntryPoint::CreateTexture);
  h.ctx.tag_object(texture, "scene");
  lint_call!(h.ctx, BindTexture(gl::TEXTURE_2D, texture)).unwrap();
  upload(&mut h, 4, 4, gl::UNSIGNED_BYTE);
  set_min_filter(&mut h, gl::LINEAR);

  let framebuffer = h.create(EntryPoint::CreateFramebuffer);
  h.ctx.tag_object(framebuffer, "offscreen");
  lint_call!(h.ctx, BindFramebuffer(gl::FRAMEBUFFER, framebuffer)).unwrap();
  let attachment = gl::COLOR_ATTACHMENT0;
  lint_call!(h.ctx, FramebufferTexture2D(gl::FRAMEBUFFER, attachment, gl::TEXTURE_2D, texture, 0))
    .unwrap();
  lint_call!(h.ctx, DrawArrays(gl::TRIANGLES, 0, 3)).unwrap();

  let messages = h.messages();
  assert_eq!(messages.len(), 1);
  assert!(messages[0].contains(
    "Texture(\"scene\") is bound to texture unit 0 used by uniform u_texture and is also \
     attached to Framebuffer(\"offscreen\") as COLOR_ATTACHMENT0"
  ));

  lint_call!(h.ctx, BindFramebuffer(gl::FRAMEBUFFER, None::<Handle>)).unwrap();
  lint_call!(h.ctx, DrawArrays(gl::TRIANGLES, 0, 3)).unwrap();
  assert!(h.sink.is_empty());
}

#[test]
fn redundant_texture_state_is_counted() {
  let mut h = Harness::webgl2("{}");
  let texture = h.create(EntryPoint::CreateTexture);
  lint_call!(h.ctx, ActiveTexture(gl::TEXTURE1)).unwrap();
  lint_call!(h.ctx, ActiveTexture(gl::TEXTURE1)).unwrap();
  lint_call!(h.ctx, BindTexture(gl::TEXTURE_2D, texture)).unwrap();
  lint_call!(h.ctx, BindTexture(gl::TEXTURE_2D, texture)).unwrap();

  let counts = h.ctx.get_and_reset_redundant_call_info();
  assert_eq!(counts.get("activeTexture"), Some(&1));
  assert_eq!(counts.get("bindTexture"), Some(&1));
  assert!(h.ctx.get_and_reset_redundant_call_info().is_empty());
  let session = h.ctx.session().borrow();
  assert_eq!(session.textures().active_unit(), 1);
  let bound = session.textures().unit(1).and_then(|unit| unit.bound(TextureTarget::Texture2D));
  assert_eq!(bound, Some(texture));
}

#[test]
fn cube_maps_must_be_square() {
  const CUBE_FS: &str = "\
precision mediump float;
uniform samplerCube u_cube;
void main() {}
";
  let mut h = Harness::webgl2("{}");
  h.program(EMPTY_SHADER, CUBE_FS);
  let texture = h.create(EntryPoint::CreateTexture);
  lint_call!(h.ctx, BindTexture(gl::TEXTURE_CUBE_MAP, texture)).unwrap();
  for &face in &CUBE_FACES {
    let image = None::<Handle>;
    lint_call!(h.ctx, TexImage2D(face, 0, gl::RGBA, 4, 2, 0, gl::RGBA, gl::UNSIGNED_BYTE, image))
      .unwrap();
  }
  lint_call!(h.ctx, TexParameteri(gl::TEXTURE_CUBE_MAP, gl::TEXTURE_MIN_FILTER, gl::LINEAR))
    .unwrap();
  assert!(draw_error(&mut h).contains("cube map is 4x2 but must be square"));
}
