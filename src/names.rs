//! Numeric enum value ⇄ symbolic name registry used to stringify arguments
//! in diagnostics.

use prelude_plus::*;

macro_rules! gl_names {
  ($($name:ident),+ $(,)?) => {
    &[$((stringify!($name), ::gl::$name as u32)),+]
  };
}

// WebGL-only pixel store parameters and the like, these never made it into
// the GLES headers.
pub const UNPACK_FLIP_Y_WEBGL: u32 = 0x9240;
pub const UNPACK_PREMULTIPLY_ALPHA_WEBGL: u32 = 0x9241;
pub const CONTEXT_LOST_WEBGL: u32 = 0x9242;
pub const UNPACK_COLORSPACE_CONVERSION_WEBGL: u32 = 0x9243;
pub const BROWSER_DEFAULT_WEBGL: u32 = 0x9244;
pub const MAX_CLIENT_WAIT_TIMEOUT_WEBGL: u32 = 0x9247;
pub const HALF_FLOAT_OES: u32 = 0x8D61;

const WEBGL_NAMES: &[(&str, u32)] = &[
  ("UNPACK_FLIP_Y_WEBGL", UNPACK_FLIP_Y_WEBGL),
  ("UNPACK_PREMULTIPLY_ALPHA_WEBGL", UNPACK_PREMULTIPLY_ALPHA_WEBGL),
  ("CONTEXT_LOST_WEBGL", CONTEXT_LOST_WEBGL),
  ("UNPACK_COLORSPACE_CONVERSION_WEBGL", UNPACK_COLORSPACE_CONVERSION_WEBGL),
  ("BROWSER_DEFAULT_WEBGL", BROWSER_DEFAULT_WEBGL),
  ("DEPTH_STENCIL", ::gl::DEPTH_STENCIL as u32),
  ("DEPTH_STENCIL_ATTACHMENT", ::gl::DEPTH_STENCIL_ATTACHMENT as u32),
];

const WEBGL2_ONLY_NAMES: &[(&str, u32)] =
  &[("MAX_CLIENT_WAIT_TIMEOUT_WEBGL", MAX_CLIENT_WAIT_TIMEOUT_WEBGL)];

#[rustfmt::skip]
const ES2_NAMES: &[(&str, u32)] = gl_names![
  DEPTH_BUFFER_BIT, STENCIL_BUFFER_BIT, COLOR_BUFFER_BIT,
  POINTS, LINES, LINE_LOOP, LINE_STRIP, TRIANGLES, TRIANGLE_STRIP, TRIANGLE_FAN,
  ZERO, ONE, SRC_COLOR, ONE_MINUS_SRC_COLOR, SRC_ALPHA, ONE_MINUS_SRC_ALPHA, DST_ALPHA,
  ONE_MINUS_DST_ALPHA, DST_COLOR, ONE_MINUS_DST_COLOR, SRC_ALPHA_SATURATE,
  FUNC_ADD, BLEND_EQUATION_RGB, BLEND_EQUATION_ALPHA, FUNC_SUBTRACT, FUNC_REVERSE_SUBTRACT,
  BLEND_DST_RGB, BLEND_SRC_RGB, BLEND_DST_ALPHA, BLEND_SRC_ALPHA, CONSTANT_COLOR,
  ONE_MINUS_CONSTANT_COLOR, CONSTANT_ALPHA, ONE_MINUS_CONSTANT_ALPHA, BLEND_COLOR,
  ARRAY_BUFFER, ELEMENT_ARRAY_BUFFER, ARRAY_BUFFER_BINDING, ELEMENT_ARRAY_BUFFER_BINDING,
  STREAM_DRAW, STATIC_DRAW, DYNAMIC_DRAW, BUFFER_SIZE, BUFFER_USAGE, CURRENT_VERTEX_ATTRIB,
  FRONT, BACK, FRONT_AND_BACK, CULL_FACE, BLEND, DITHER, STENCIL_TEST, DEPTH_TEST,
  SCISSOR_TEST, POLYGON_OFFSET_FILL, SAMPLE_ALPHA_TO_COVERAGE, SAMPLE_COVERAGE,
  NO_ERROR, INVALID_ENUM, INVALID_VALUE, INVALID_OPERATION, OUT_OF_MEMORY,
  INVALID_FRAMEBUFFER_OPERATION, CW, CCW,
  LINE_WIDTH, ALIASED_POINT_SIZE_RANGE, ALIASED_LINE_WIDTH_RANGE, CULL_FACE_MODE, FRONT_FACE,
  DEPTH_RANGE, DEPTH_WRITEMASK, DEPTH_CLEAR_VALUE, DEPTH_FUNC, STENCIL_CLEAR_VALUE,
  STENCIL_FUNC, STENCIL_FAIL, STENCIL_PASS_DEPTH_FAIL, STENCIL_PASS_DEPTH_PASS, STENCIL_REF,
  STENCIL_VALUE_MASK, STENCIL_WRITEMASK, STENCIL_BACK_FUNC, STENCIL_BACK_FAIL,
  STENCIL_BACK_PASS_DEPTH_FAIL, STENCIL_BACK_PASS_DEPTH_PASS, STENCIL_BACK_REF,
  STENCIL_BACK_VALUE_MASK, STENCIL_BACK_WRITEMASK, VIEWPORT, SCISSOR_BOX, COLOR_CLEAR_VALUE,
  COLOR_WRITEMASK, UNPACK_ALIGNMENT, PACK_ALIGNMENT, MAX_TEXTURE_SIZE, MAX_VIEWPORT_DIMS,
  SUBPIXEL_BITS, RED_BITS, GREEN_BITS, BLUE_BITS, ALPHA_BITS, DEPTH_BITS, STENCIL_BITS,
  POLYGON_OFFSET_UNITS, POLYGON_OFFSET_FACTOR, TEXTURE_BINDING_2D, SAMPLE_BUFFERS, SAMPLES,
  SAMPLE_COVERAGE_VALUE, SAMPLE_COVERAGE_INVERT, COMPRESSED_TEXTURE_FORMATS,
  DONT_CARE, FASTEST, NICEST, GENERATE_MIPMAP_HINT,
  BYTE, UNSIGNED_BYTE, SHORT, UNSIGNED_SHORT, INT, UNSIGNED_INT, FLOAT,
  DEPTH_COMPONENT, ALPHA, RGB, RGBA, LUMINANCE, LUMINANCE_ALPHA,
  UNSIGNED_SHORT_4_4_4_4, UNSIGNED_SHORT_5_5_5_1, UNSIGNED_SHORT_5_6_5,
  FRAGMENT_SHADER, VERTEX_SHADER, MAX_VERTEX_ATTRIBS, MAX_VERTEX_UNIFORM_VECTORS,
  MAX_VARYING_VECTORS, MAX_COMBINED_TEXTURE_IMAGE_UNITS, MAX_VERTEX_TEXTURE_IMAGE_UNITS,
  MAX_TEXTURE_IMAGE_UNITS, MAX_FRAGMENT_UNIFORM_VECTORS, SHADER_TYPE, DELETE_STATUS,
  LINK_STATUS, VALIDATE_STATUS, ATTACHED_SHADERS, ACTIVE_UNIFORMS, ACTIVE_ATTRIBUTES,
  SHADING_LANGUAGE_VERSION, CURRENT_PROGRAM,
  NEVER, LESS, EQUAL, LEQUAL, GREATER, NOTEQUAL, GEQUAL, ALWAYS,
  KEEP, REPLACE, INCR, DECR, INVERT, INCR_WRAP, DECR_WRAP,
  VENDOR, RENDERER, VERSION,
  NEAREST, LINEAR, NEAREST_MIPMAP_NEAREST, LINEAR_MIPMAP_NEAREST, NEAREST_MIPMAP_LINEAR,
  LINEAR_MIPMAP_LINEAR, TEXTURE_MAG_FILTER, TEXTURE_MIN_FILTER, TEXTURE_WRAP_S,
  TEXTURE_WRAP_T, TEXTURE_2D, TEXTURE, TEXTURE_CUBE_MAP, TEXTURE_BINDING_CUBE_MAP,
  TEXTURE_CUBE_MAP_POSITIVE_X, TEXTURE_CUBE_MAP_NEGATIVE_X, TEXTURE_CUBE_MAP_POSITIVE_Y,
  TEXTURE_CUBE_MAP_NEGATIVE_Y, TEXTURE_CUBE_MAP_POSITIVE_Z, TEXTURE_CUBE_MAP_NEGATIVE_Z,
  MAX_CUBE_MAP_TEXTURE_SIZE,
  TEXTURE0, TEXTURE1, TEXTURE2, TEXTURE3, TEXTURE4, TEXTURE5, TEXTURE6, TEXTURE7,
  TEXTURE8, TEXTURE9, TEXTURE10, TEXTURE11, TEXTURE12, TEXTURE13, TEXTURE14, TEXTURE15,
  TEXTURE16, TEXTURE17, TEXTURE18, TEXTURE19, TEXTURE20, TEXTURE21, TEXTURE22, TEXTURE23,
  TEXTURE24, TEXTURE25, TEXTURE26, TEXTURE27, TEXTURE28, TEXTURE29, TEXTURE30, TEXTURE31,
  ACTIVE_TEXTURE, REPEAT, CLAMP_TO_EDGE, MIRRORED_REPEAT,
  FLOAT_VEC2, FLOAT_VEC3, FLOAT_VEC4, INT_VEC2, INT_VEC3, INT_VEC4, BOOL, BOOL_VEC2,
  BOOL_VEC3, BOOL_VEC4, FLOAT_MAT2, FLOAT_MAT3, FLOAT_MAT4, SAMPLER_2D, SAMPLER_CUBE,
  VERTEX_ATTRIB_ARRAY_ENABLED, VERTEX_ATTRIB_ARRAY_SIZE, VERTEX_ATTRIB_ARRAY_STRIDE,
  VERTEX_ATTRIB_ARRAY_TYPE, VERTEX_ATTRIB_ARRAY_NORMALIZED, VERTEX_ATTRIB_ARRAY_POINTER,
  VERTEX_ATTRIB_ARRAY_BUFFER_BINDING, IMPLEMENTATION_COLOR_READ_TYPE,
  IMPLEMENTATION_COLOR_READ_FORMAT, COMPILE_STATUS,
  LOW_FLOAT, MEDIUM_FLOAT, HIGH_FLOAT, LOW_INT, MEDIUM_INT, HIGH_INT,
  FRAMEBUFFER, RENDERBUFFER, RGBA4, RGB5_A1, RGB565, DEPTH_COMPONENT16, STENCIL_INDEX8,
  RENDERBUFFER_WIDTH, RENDERBUFFER_HEIGHT, RENDERBUFFER_INTERNAL_FORMAT,
  FRAMEBUFFER_ATTACHMENT_OBJECT_TYPE, FRAMEBUFFER_ATTACHMENT_OBJECT_NAME,
  FRAMEBUFFER_ATTACHMENT_TEXTURE_LEVEL, FRAMEBUFFER_ATTACHMENT_TEXTURE_CUBE_MAP_FACE,
  COLOR_ATTACHMENT0, DEPTH_ATTACHMENT, STENCIL_ATTACHMENT, NONE,
  FRAMEBUFFER_COMPLETE, FRAMEBUFFER_INCOMPLETE_ATTACHMENT,
  FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT, FRAMEBUFFER_INCOMPLETE_DIMENSIONS,
  FRAMEBUFFER_UNSUPPORTED, FRAMEBUFFER_BINDING, RENDERBUFFER_BINDING, MAX_RENDERBUFFER_SIZE,
];

#[rustfmt::skip]
const ES3_NAMES: &[(&str, u32)] = gl_names![
  READ_BUFFER, UNPACK_ROW_LENGTH, UNPACK_SKIP_ROWS, UNPACK_SKIP_PIXELS, PACK_ROW_LENGTH,
  PACK_SKIP_ROWS, PACK_SKIP_PIXELS, COLOR, DEPTH, STENCIL, RED, RGB8, RGBA8, RGB10_A2,
  TEXTURE_BINDING_3D, UNPACK_SKIP_IMAGES, UNPACK_IMAGE_HEIGHT, TEXTURE_3D, TEXTURE_WRAP_R,
  MAX_3D_TEXTURE_SIZE, UNSIGNED_INT_2_10_10_10_REV, MAX_ELEMENTS_VERTICES,
  MAX_ELEMENTS_INDICES, TEXTURE_MIN_LOD, TEXTURE_MAX_LOD, TEXTURE_BASE_LEVEL,
  TEXTURE_MAX_LEVEL, MIN, MAX, DEPTH_COMPONENT24, MAX_TEXTURE_LOD_BIAS,
  TEXTURE_COMPARE_MODE, TEXTURE_COMPARE_FUNC, CURRENT_QUERY, QUERY_RESULT,
  QUERY_RESULT_AVAILABLE, STREAM_READ, STREAM_COPY, STATIC_READ, STATIC_COPY, DYNAMIC_READ,
  DYNAMIC_COPY, MAX_DRAW_BUFFERS,
  DRAW_BUFFER0, DRAW_BUFFER1, DRAW_BUFFER2, DRAW_BUFFER3, DRAW_BUFFER4, DRAW_BUFFER5,
  DRAW_BUFFER6, DRAW_BUFFER7, DRAW_BUFFER8, DRAW_BUFFER9, DRAW_BUFFER10, DRAW_BUFFER11,
  DRAW_BUFFER12, DRAW_BUFFER13, DRAW_BUFFER14, DRAW_BUFFER15,
  MAX_FRAGMENT_UNIFORM_COMPONENTS, MAX_VERTEX_UNIFORM_COMPONENTS, SAMPLER_3D,
  SAMPLER_2D_SHADOW, FRAGMENT_SHADER_DERIVATIVE_HINT, PIXEL_PACK_BUFFER,
  PIXEL_UNPACK_BUFFER, PIXEL_PACK_BUFFER_BINDING, PIXEL_UNPACK_BUFFER_BINDING,
  FLOAT_MAT2x3, FLOAT_MAT2x4, FLOAT_MAT3x2, FLOAT_MAT3x4, FLOAT_MAT4x2, FLOAT_MAT4x3,
  SRGB, SRGB8, SRGB8_ALPHA8, COMPARE_REF_TO_TEXTURE, RGBA32F, RGB32F, RGBA16F, RGB16F,
  VERTEX_ATTRIB_ARRAY_INTEGER, MAX_ARRAY_TEXTURE_LAYERS, MIN_PROGRAM_TEXEL_OFFSET,
  MAX_PROGRAM_TEXEL_OFFSET, MAX_VARYING_COMPONENTS, TEXTURE_2D_ARRAY,
  TEXTURE_BINDING_2D_ARRAY, R11F_G11F_B10F, UNSIGNED_INT_10F_11F_11F_REV, RGB9_E5,
  UNSIGNED_INT_5_9_9_9_REV, TRANSFORM_FEEDBACK_BUFFER_MODE,
  MAX_TRANSFORM_FEEDBACK_SEPARATE_COMPONENTS, TRANSFORM_FEEDBACK_VARYINGS,
  TRANSFORM_FEEDBACK_BUFFER_START, TRANSFORM_FEEDBACK_BUFFER_SIZE,
  TRANSFORM_FEEDBACK_PRIMITIVES_WRITTEN, RASTERIZER_DISCARD,
  MAX_TRANSFORM_FEEDBACK_INTERLEAVED_COMPONENTS, MAX_TRANSFORM_FEEDBACK_SEPARATE_ATTRIBS,
  INTERLEAVED_ATTRIBS, SEPARATE_ATTRIBS, TRANSFORM_FEEDBACK_BUFFER,
  TRANSFORM_FEEDBACK_BUFFER_BINDING, RGBA32UI, RGB32UI, RGBA16UI, RGB16UI, RGBA8UI, RGB8UI,
  RGBA32I, RGB32I, RGBA16I, RGB16I, RGBA8I, RGB8I, RED_INTEGER, RGB_INTEGER, RGBA_INTEGER,
  SAMPLER_2D_ARRAY, SAMPLER_2D_ARRAY_SHADOW, SAMPLER_CUBE_SHADOW, UNSIGNED_INT_VEC2,
  UNSIGNED_INT_VEC3, UNSIGNED_INT_VEC4, INT_SAMPLER_2D, INT_SAMPLER_3D, INT_SAMPLER_CUBE,
  INT_SAMPLER_2D_ARRAY, UNSIGNED_INT_SAMPLER_2D, UNSIGNED_INT_SAMPLER_3D,
  UNSIGNED_INT_SAMPLER_CUBE, UNSIGNED_INT_SAMPLER_2D_ARRAY, DEPTH_COMPONENT32F,
  DEPTH32F_STENCIL8, FLOAT_32_UNSIGNED_INT_24_8_REV, FRAMEBUFFER_ATTACHMENT_COLOR_ENCODING,
  FRAMEBUFFER_ATTACHMENT_COMPONENT_TYPE, FRAMEBUFFER_DEFAULT, UNSIGNED_INT_24_8,
  DEPTH24_STENCIL8, UNSIGNED_NORMALIZED, READ_FRAMEBUFFER, DRAW_FRAMEBUFFER,
  READ_FRAMEBUFFER_BINDING, RENDERBUFFER_SAMPLES, FRAMEBUFFER_ATTACHMENT_TEXTURE_LAYER,
  MAX_COLOR_ATTACHMENTS,
  COLOR_ATTACHMENT1, COLOR_ATTACHMENT2, COLOR_ATTACHMENT3, COLOR_ATTACHMENT4,
  COLOR_ATTACHMENT5, COLOR_ATTACHMENT6, COLOR_ATTACHMENT7, COLOR_ATTACHMENT8,
  COLOR_ATTACHMENT9, COLOR_ATTACHMENT10, COLOR_ATTACHMENT11, COLOR_ATTACHMENT12,
  COLOR_ATTACHMENT13, COLOR_ATTACHMENT14, COLOR_ATTACHMENT15,
  FRAMEBUFFER_INCOMPLETE_MULTISAMPLE, MAX_SAMPLES, HALF_FLOAT, RG, RG_INTEGER, R8, RG8,
  R16F, R32F, RG16F, RG32F, R8I, R8UI, R16I, R16UI, R32I, R32UI, RG8I, RG8UI, RG16I,
  RG16UI, RG32I, RG32UI, VERTEX_ARRAY_BINDING, R8_SNORM, RG8_SNORM, RGB8_SNORM,
  RGBA8_SNORM, SIGNED_NORMALIZED, COPY_READ_BUFFER, COPY_WRITE_BUFFER,
  COPY_READ_BUFFER_BINDING, COPY_WRITE_BUFFER_BINDING, UNIFORM_BUFFER,
  UNIFORM_BUFFER_BINDING, UNIFORM_BUFFER_START, UNIFORM_BUFFER_SIZE,
  MAX_VERTEX_UNIFORM_BLOCKS, MAX_FRAGMENT_UNIFORM_BLOCKS, MAX_COMBINED_UNIFORM_BLOCKS,
  MAX_UNIFORM_BUFFER_BINDINGS, MAX_UNIFORM_BLOCK_SIZE,
  MAX_COMBINED_VERTEX_UNIFORM_COMPONENTS, MAX_COMBINED_FRAGMENT_UNIFORM_COMPONENTS,
  UNIFORM_BUFFER_OFFSET_ALIGNMENT, ACTIVE_UNIFORM_BLOCKS, UNIFORM_TYPE, UNIFORM_SIZE,
  UNIFORM_BLOCK_INDEX, UNIFORM_OFFSET, UNIFORM_ARRAY_STRIDE, UNIFORM_MATRIX_STRIDE,
  UNIFORM_IS_ROW_MAJOR, UNIFORM_BLOCK_BINDING, UNIFORM_BLOCK_DATA_SIZE,
  UNIFORM_BLOCK_ACTIVE_UNIFORMS, UNIFORM_BLOCK_ACTIVE_UNIFORM_INDICES,
  UNIFORM_BLOCK_REFERENCED_BY_VERTEX_SHADER, UNIFORM_BLOCK_REFERENCED_BY_FRAGMENT_SHADER,
  MAX_VERTEX_OUTPUT_COMPONENTS, MAX_FRAGMENT_INPUT_COMPONENTS, MAX_SERVER_WAIT_TIMEOUT,
  OBJECT_TYPE, SYNC_CONDITION, SYNC_STATUS, SYNC_FLAGS, SYNC_FENCE,
  SYNC_GPU_COMMANDS_COMPLETE, UNSIGNALED, SIGNALED, ALREADY_SIGNALED, TIMEOUT_EXPIRED,
  CONDITION_SATISFIED, WAIT_FAILED, SYNC_FLUSH_COMMANDS_BIT, VERTEX_ATTRIB_ARRAY_DIVISOR,
  ANY_SAMPLES_PASSED, ANY_SAMPLES_PASSED_CONSERVATIVE, SAMPLER_BINDING, RGB10_A2UI,
  INT_2_10_10_10_REV, TRANSFORM_FEEDBACK, TRANSFORM_FEEDBACK_PAUSED,
  TRANSFORM_FEEDBACK_ACTIVE, TRANSFORM_FEEDBACK_BINDING, TEXTURE_IMMUTABLE_FORMAT,
  MAX_ELEMENT_INDEX, TEXTURE_IMMUTABLE_LEVELS,
];

/// Enum names contributed by extensions once they get enabled through
/// `getExtension`.
const EXTENSION_NAMES: &[(&str, &[(&str, u32)])] = &[
  ("ANGLE_instanced_arrays", &[("VERTEX_ATTRIB_ARRAY_DIVISOR_ANGLE", 0x88FE)]),
  ("EXT_color_buffer_half_float", &[("RGBA16F_EXT", 0x881A), ("RGB16F_EXT", 0x881B)]),
  (
    "EXT_disjoint_timer_query",
    &[("TIME_ELAPSED_EXT", 0x88BF), ("TIMESTAMP_EXT", 0x8E28), ("GPU_DISJOINT_EXT", 0x8FBB)],
  ),
  ("EXT_sRGB", &[("SRGB_EXT", 0x8C40), ("SRGB_ALPHA_EXT", 0x8C42), ("SRGB8_ALPHA8_EXT", 0x8C43)]),
  (
    "EXT_texture_filter_anisotropic",
    &[("TEXTURE_MAX_ANISOTROPY_EXT", 0x84FE), ("MAX_TEXTURE_MAX_ANISOTROPY_EXT", 0x84FF)],
  ),
  ("OES_standard_derivatives", &[("FRAGMENT_SHADER_DERIVATIVE_HINT_OES", 0x8B8B)]),
  ("OES_texture_half_float", &[("HALF_FLOAT_OES", HALF_FLOAT_OES)]),
  ("OES_vertex_array_object", &[("VERTEX_ARRAY_BINDING_OES", 0x85B5)]),
  (
    "WEBGL_compressed_texture_s3tc",
    &[
      ("COMPRESSED_RGB_S3TC_DXT1_EXT", 0x83F0),
      ("COMPRESSED_RGBA_S3TC_DXT1_EXT", 0x83F1),
      ("COMPRESSED_RGBA_S3TC_DXT3_EXT", 0x83F2),
      ("COMPRESSED_RGBA_S3TC_DXT5_EXT", 0x83F3),
    ],
  ),
  ("WEBGL_depth_texture", &[("UNSIGNED_INT_24_8_WEBGL", 0x84FA)]),
  (
    "WEBGL_draw_buffers",
    &[
      ("COLOR_ATTACHMENT0_WEBGL", 0x8CE0),
      ("COLOR_ATTACHMENT1_WEBGL", 0x8CE1),
      ("COLOR_ATTACHMENT2_WEBGL", 0x8CE2),
      ("COLOR_ATTACHMENT3_WEBGL", 0x8CE3),
      ("DRAW_BUFFER0_WEBGL", 0x8825),
      ("DRAW_BUFFER1_WEBGL", 0x8826),
      ("DRAW_BUFFER2_WEBGL", 0x8827),
      ("DRAW_BUFFER3_WEBGL", 0x8828),
      ("MAX_COLOR_ATTACHMENTS_WEBGL", 0x8CDF),
      ("MAX_DRAW_BUFFERS_WEBGL", 0x8824),
    ],
  ),
];

bitflags! {
  /// The bits accepted by `clear` and `blitFramebuffer`.
  pub struct BufferBits: u32 {
    const COLOR = ::gl::COLOR_BUFFER_BIT as u32;
    const DEPTH = ::gl::DEPTH_BUFFER_BIT as u32;
    const STENCIL = ::gl::STENCIL_BUFFER_BIT as u32;
  }
}

pub const BUFFER_BIT_NAMES: &[&str] =
  &["COLOR_BUFFER_BIT", "DEPTH_BUFFER_BIT", "STENCIL_BUFFER_BIT"];
pub const SYNC_BIT_NAMES: &[&str] = &["SYNC_FLUSH_COMMANDS_BIT"];

/// Which enum set a context exposes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ApiFlavor {
  WebGl1,
  WebGl2,
}

impl ApiFlavor {
  /// Guesses the flavour from the class name of the instrumented context,
  /// e.g. `WebGLRenderingContext` or `WebGL2RenderingContext`.
  pub fn from_context_name(name: &str) -> Self {
    if name.contains('2') {
      Self::WebGl2
    } else {
      Self::WebGl1
    }
  }
}

#[derive(Debug, Default)]
pub struct EnumNames {
  by_value: HashMap<u32, Vec<&'static str>>,
  by_name: HashMap<&'static str, u32>,
  extensions: BTreeSet<String>,
}

impl EnumNames {
  pub fn new(flavor: ApiFlavor) -> Self {
    let mut names = Self::default();
    names.register_all(ES2_NAMES);
    names.register_all(WEBGL_NAMES);
    if flavor == ApiFlavor::WebGl2 {
      names.register_all(ES3_NAMES);
      names.register_all(WEBGL2_ONLY_NAMES);
    }
    names
  }

  fn register_all(&mut self, table: &[(&'static str, u32)]) {
    for &(name, value) in table {
      self.register(name, value);
    }
  }

  pub fn register(&mut self, name: &'static str, value: u32) {
    if self.by_name.insert(name, value).is_none() {
      self.by_value.entry(value).or_insert_with(Vec::new).push(name);
    }
  }

  /// Adds the names of an extension which was just enabled. Returns `false`
  /// for extensions which don't add any names or were already registered.
  pub fn add_extension(&mut self, extension: &str) -> bool {
    if !self.extensions.insert(extension.to_owned()) {
      return false;
    }
    match EXTENSION_NAMES.iter().find(|(name, _)| name.eq_ignore_ascii_case(extension)) {
      Some((_, table)) => {
        self.register_all(table);
        true
      }
      None => false,
    }
  }

  pub fn is_extension_enabled(&self, extension: &str) -> bool {
    self.extensions.iter().any(|name| name.eq_ignore_ascii_case(extension))
  }

  pub fn names_of(&self, value: u32) -> &[&'static str] {
    self.by_value.get(&value).map_or(&[], |names| names.as_slice())
  }

  pub fn value_of(&self, name: &str) -> Option<u32> { self.by_name.get(name).copied() }

  pub fn enum_to_string(&self, value: u32) -> String {
    let names = self.names_of(value);
    if names.is_empty() {
      format!("/*UNKNOWN ENUM*/ 0x{:x}", value)
    } else {
      names.join("/")
    }
  }

  pub fn bitfield_to_string(&self, value: u32, bit_names: &[&str]) -> String {
    let mut parts = Vec::new();
    let mut rest = value;
    for name in bit_names {
      if let Some(bit) = self.value_of(name) {
        if value & bit != 0 {
          parts.push((*name).to_owned());
          rest &= !bit;
        }
      }
    }
    if rest != 0 {
      parts.push(format!("0x{:x}", rest));
    }
    if parts.is_empty() {
      "0".to_owned()
    } else {
      parts.join(" | ")
    }
  }

  /// Name of an error code as returned by `getError`.
  pub fn error_to_string(&self, error: u32) -> String {
    match error {
      ::gl::INVALID_ENUM => "INVALID_ENUM".to_owned(),
      ::gl::INVALID_VALUE => "INVALID_VALUE".to_owned(),
      ::gl::INVALID_OPERATION => "INVALID_OPERATION".to_owned(),
      ::gl::INVALID_FRAMEBUFFER_OPERATION => "INVALID_FRAMEBUFFER_OPERATION".to_owned(),
      ::gl::OUT_OF_MEMORY => "OUT_OF_MEMORY".to_owned(),
      CONTEXT_LOST_WEBGL => "CONTEXT_LOST_WEBGL".to_owned(),
      _ => self.enum_to_string(error),
    }
  }
}
