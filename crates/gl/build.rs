use gl_generator::{Api, Fallbacks, Profile, Registry, StructGenerator};
use std::env;
use std::fs::File;
use std::path::Path;

// Extensions which WebGL exposes under its own names, their enums are checked
// against the linter's extension name tables.
const WEBGL_EXTENSIONS: &[&str] = &[
  "GL_ANGLE_instanced_arrays",
  "GL_EXT_color_buffer_half_float",
  "GL_EXT_disjoint_timer_query",
  "GL_EXT_sRGB",
  "GL_EXT_texture_filter_anisotropic",
  "GL_OES_standard_derivatives",
  "GL_OES_texture_half_float",
  "GL_OES_vertex_array_object",
];

fn main() {
  let dest = env::var("OUT_DIR").unwrap();
  let mut file = File::create(&Path::new(&dest).join("bindings.rs")).unwrap();

  // WebGL2 is specified on top of ES 3.0.
  Registry::new(Api::Gles2, (3, 0), Profile::Core, Fallbacks::All, WEBGL_EXTENSIONS)
    .write_bindings(StructGenerator, &mut file)
    .unwrap();
}
