//! The state of one linting session: configuration, capabilities and every
//! tracker, shared by a context and its extension sub-contexts.

use crate::buffers::{self, Buffers};
use crate::config::{Config, ConfigPatch};
use crate::descriptors;
use crate::dispatch::Backend;
use crate::entry_points::EntryPoint;
use crate::error::LintError;
use crate::feedback;
use crate::framebuffers::{Attachment, Framebuffers};
use crate::handle::{Handle, LiveHandles, ObjectKind};
use crate::index_shadow::IndexShadows;
use crate::names::{ApiFlavor, EnumNames};
use crate::overflow;
use crate::programs::{self, ProgramRecord, Programs, SetterData, UniformSetter};
use crate::query::{self, Capabilities};
use crate::report::{self, ArgFormatter, Diagnostic, DiagnosticKind, DiagnosticSink};
use crate::shader_log;
use crate::tags::TagRegistry;
use crate::textures::{self, MipInfo, RenderRules, TextureTarget, Textures};
use crate::value::Value;
use crate::vertex_arrays::{AttribPointer, RedundantCalls, VertexArrays};
use prelude_plus::*;

pub type SharedSession = Rc<RefCell<Session>>;

static UNDEFINED: Value = Value::Undefined;

/// One intercepted call.
#[derive(Debug, Copy, Clone)]
pub struct Call<'a> {
  pub entry: EntryPoint,
  pub args: &'a [Value],
  pub location: Option<&'static Location<'static>>,
}

impl<'a> Call<'a> {
  #[inline]
  pub fn arg(&self, index: usize) -> &'a Value { self.args.get(index).unwrap_or(&UNDEFINED) }
  #[inline]
  fn u32_arg(&self, index: usize) -> u32 { self.arg(index).as_u32().unwrap_or(0) }
  #[inline]
  fn usize_arg(&self, index: usize) -> Option<usize> {
    self.args.get(index).and_then(Value::as_usize)
  }
  #[inline]
  fn handle_arg(&self, index: usize) -> Option<Handle> { self.arg(index).as_handle() }
}

#[derive(Debug)]
pub struct Session {
  config: Config,
  capabilities: Capabilities,
  names: EnumNames,
  tags: TagRegistry,
  live: LiveHandles,
  programs: Programs,
  textures: Textures,
  vertex_arrays: VertexArrays,
  buffers: Buffers,
  shadows: IndexShadows,
  framebuffers: Framebuffers,
  redundant: RedundantCalls,
  pending_error: Option<u32>,
  draw_calls_left: u32,
  disabled: bool,
  sink: Box<dyn DiagnosticSink>,
}

impl Session {
  pub fn new(
    backend: &mut dyn Backend,
    context_name: &str,
    patch: &ConfigPatch,
    sink: Box<dyn DiagnosticSink>,
  ) -> Self {
    let flavor = ApiFlavor::from_context_name(context_name);
    let capabilities = Capabilities::load(backend, flavor);
    let mut config = Config::default();
    config.apply(patch);

    let mut session = Self {
      draw_calls_left: config.max_draw_calls,
      config,
      names: EnumNames::new(flavor),
      tags: TagRegistry::default(),
      live: LiveHandles::default(),
      programs: Programs::default(),
      textures: Textures::new(
        capabilities.max_texture_units,
        Self::render_rules_for(flavor, false, false),
      ),
      vertex_arrays: VertexArrays::new(capabilities.max_vertex_attribs),
      buffers: Buffers::default(),
      shadows: IndexShadows::default(),
      framebuffers: Framebuffers::default(),
      redundant: RedundantCalls::default(),
      pending_error: None,
      disabled: false,
      sink,
      capabilities,
    };
    if session.draw_calls_left == 0 {
      session.disable();
    }
    session
  }

  #[inline(always)]
  pub fn config(&self) -> &Config { &self.config }
  #[inline(always)]
  pub fn capabilities(&self) -> &Capabilities { &self.capabilities }
  #[inline(always)]
  pub fn names(&self) -> &EnumNames { &self.names }
  #[inline(always)]
  pub fn tags(&self) -> &TagRegistry { &self.tags }
  #[inline(always)]
  pub fn tags_mut(&mut self) -> &mut TagRegistry { &mut self.tags }
  #[inline(always)]
  pub fn programs(&self) -> &Programs { &self.programs }
  #[inline(always)]
  pub fn textures(&self) -> &Textures { &self.textures }
  #[inline(always)]
  pub fn vertex_arrays(&self) -> &VertexArrays { &self.vertex_arrays }
  #[inline(always)]
  pub fn buffers(&self) -> &Buffers { &self.buffers }
  #[inline(always)]
  pub fn shadows(&self) -> &IndexShadows { &self.shadows }
  #[inline(always)]
  pub fn framebuffers(&self) -> &Framebuffers { &self.framebuffers }
  #[inline(always)]
  pub fn is_disabled(&self) -> bool { self.disabled }
  #[inline(always)]
  pub fn draw_calls_left(&self) -> u32 { self.draw_calls_left }

  pub fn set_sink(&mut self, sink: Box<dyn DiagnosticSink>) { self.sink = sink; }

  pub fn set_configuration(&mut self, patch: &ConfigPatch) {
    self.config.apply(patch);
    if let Some(max_draw_calls) = patch.max_draw_calls {
      self.draw_calls_left = max_draw_calls;
      if max_draw_calls == 0 {
        self.disable();
      }
    }
  }

  pub fn take_redundant_calls(&mut self) -> BTreeMap<&'static str, u32> { self.redundant.take() }

  /// Hands out the error stored for the caller's next `getError`.
  pub fn take_pending_error(&mut self) -> Option<u32> { self.pending_error.take() }

  /// Switches the session into pass-through for good and forgets everything
  /// the trackers know.
  pub fn disable(&mut self) {
    if self.disabled {
      return;
    }
    info!("linting disabled");
    self.disabled = true;
    self.tags.clear();
    self.live.clear();
    self.programs = Programs::default();
    self.textures.clear();
    self.vertex_arrays.clear();
    self.buffers.clear();
    self.shadows.clear();
    self.framebuffers.clear();
  }

  fn render_rules_for(
    flavor: ApiFlavor,
    float_linear: bool,
    half_float_linear: bool,
  ) -> RenderRules {
    RenderRules {
      power_of_two: flavor == ApiFlavor::WebGl1,
      float_linear,
      half_float_linear: half_float_linear || flavor == ApiFlavor::WebGl2,
    }
  }

  /// Registers the names of an extension and the rules it relaxes.
  pub fn enable_extension(&mut self, extension: &str) {
    if self.names.add_extension(extension) {
      debug!("registered the names of {}", extension);
    }
    let rules = Self::render_rules_for(
      self.capabilities.flavor,
      self.names.is_extension_enabled("OES_texture_float_linear"),
      self.names.is_extension_enabled("OES_texture_half_float_linear"),
    );
    if rules != *self.textures.rules() {
      self.textures.set_rules(rules, &self.names);
    }
  }

  fn compose(
    &self,
    call: &Call<'_>,
    kind: DiagnosticKind,
    reason: &str,
    mut context: Vec<String>,
  ) -> Diagnostic {
    let formatter = ArgFormatter { names: &self.names, tags: &self.tags };
    let args = formatter.format_args(call.entry, call.args);
    context.extend(self.context_lines(call));
    let message = report::compose_message(call.location, call.entry, &args, reason, &context);
    Diagnostic { entry: call.entry, kind, message, location: call.location }
  }

  fn deliver(&mut self, diagnostic: Diagnostic) -> Result<(), LintError> {
    if self.config.throw_on_error {
      Err(diagnostic.into())
    } else {
      self.sink.report(&diagnostic);
      Ok(())
    }
  }

  /// Throws or warns according to the policy.
  pub fn report(
    &mut self,
    call: &Call<'_>,
    kind: DiagnosticKind,
    reason: &str,
    context: Vec<String>,
  ) -> Result<(), LintError> {
    let diagnostic = self.compose(call, kind, reason, context);
    self.deliver(diagnostic)
  }

  /// Warns regardless of the policy.
  fn warn(&mut self, call: &Call<'_>, kind: DiagnosticKind, reason: &str) {
    let diagnostic = self.compose(call, kind, reason, Vec::new());
    self.sink.report(&diagnostic);
  }

  fn context_lines(&self, call: &Call<'_>) -> Vec<String> {
    let mut lines = Vec::new();
    if UniformSetter::of(call.entry).is_some() {
      let location = call.handle_arg(0).and_then(|loc| self.programs.location_info(loc));
      if let Some((program, alias)) = location {
        lines.push(format!("trying to set uniform '{}' on {}", alias, self.tags.describe(program)));
      }
    }
    if call.entry.is_draw() {
      lines.push(match self.programs.current() {
        Some(program) => format!("with {} as the current program", self.tags.describe(program)),
        None => "with no shader program in use".to_owned(),
      });
    }
    if call.entry.touches_vertex_array() {
      lines.push(match self.vertex_arrays.current() {
        Some(vao) => format!("with {} bound", self.tags.describe(vao)),
        None => "with the default vertex array bound".to_owned(),
      });
    }
    lines
  }

  /// Lines explaining an error the real context reported.
  fn error_context(&self, call: &Call<'_>) -> Vec<String> {
    let mut lines = Vec::new();
    for handle in call.args.iter().filter_map(Value::as_handle) {
      if self.live.was_deleted(handle) {
        lines.push(format!("{} was deleted", handle));
      }
    }
    if call.entry == EntryPoint::BindTexture {
      let first_target = call
        .handle_arg(1)
        .and_then(|texture| self.textures.record(texture))
        .and_then(|record| record.target());
      if let Some(first_target) = first_target {
        if first_target.as_raw() != call.u32_arg(0) {
          lines.push(format!(
            "{} was first bound to {}",
            self.tags.describe_or(call.handle_arg(1), "the texture"),
            self.names.enum_to_string(first_target.as_raw())
          ));
        }
      }
    }
    lines
  }

  pub fn check_args(&mut self, call: &Call<'_>) -> Result<(), LintError> {
    match descriptors::validate_args(call.entry, call.args) {
      Ok(()) => Ok(()),
      Err(reason) => self.report(call, DiagnosticKind::ArgumentShape, &reason, Vec::new()),
    }
  }

  /// Checks the current program and the textures it samples before a draw
  /// call reaches the real context.
  pub fn pre_check_draw(&mut self, call: &Call<'_>) -> Result<(), LintError> {
    let program = match self.programs.current() {
      Some(program) => program,
      None => {
        let reason = "no shader program in use";
        return self.report(call, DiagnosticKind::SemanticUsage, reason, Vec::new());
      }
    };
    let record = match self.programs.record(program) {
      Some(record) => record,
      None => return Ok(()),
    };

    let mut problems = Vec::new();
    if self.config.fail_unset_uniforms && record.has_unset_uniforms() {
      problems.push(format!("uniforms not set: {}", record.unset_uniform_names().join(", ")));
    }
    if self.config.fail_unrenderable_textures {
      problems.extend(self.sampler_problems(record));
    }

    if problems.is_empty() {
      Ok(())
    } else {
      self.report(call, DiagnosticKind::SemanticUsage, &problems.join("\n"), Vec::new())
    }
  }

  fn sampler_problems(&self, record: &ProgramRecord) -> Vec<String> {
    let mut problems = Vec::new();
    for (index, uniform) in record.uniforms().iter().enumerate() {
      let target = match uniform.sampler_target {
        Some(target) => target,
        None => continue,
      };
      for (element, &unit) in record.sampler_units(index).iter().enumerate() {
        let name = uniform.element_name(element as u32);
        let unit_index = unit as usize;
        if unit_index >= self.textures.unit_count() {
          problems.push(format!(
            "uniform {} is set to texture unit {} but there are only {} texture units",
            name,
            unit,
            self.textures.unit_count()
          ));
          continue;
        }
        let texture = match self.textures.unit(unit_index).and_then(|unit| unit.bound(target)) {
          Some(texture) => texture,
          None => {
            problems.push(format!(
              "no texture is bound to {} on texture unit {} used by uniform {}",
              self.names.enum_to_string(target.as_raw()),
              unit,
              name
            ));
            continue;
          }
        };
        if let Some(reason) = self.textures.unrenderable_reason(texture, unit_index, &self.names) {
          problems.push(format!(
            "{} on texture unit {} used by uniform {} is not renderable: {}",
            self.tags.describe(texture),
            unit,
            name,
            reason
          ));
        }
      }
    }
    problems
  }

  /// Feedback loops and out-of-range fetches of a draw call.
  fn draw_findings(&self, call: &Call<'_>) -> Vec<String> {
    let record = match self.programs.current_record() {
      Some(record) => record,
      None => return Vec::new(),
    };
    let mut findings =
      feedback::check(record, &self.textures, &self.framebuffers, &self.names, &self.tags);
    let state = self.vertex_arrays.current_state();
    let skip_restart = self.capabilities.flavor == ApiFlavor::WebGl2;
    let element_buffer = state.element_buffer();
    let request =
      overflow::draw_request(call.entry, call.args, element_buffer, &self.shadows, skip_restart);
    match request {
      Ok(request) => {
        findings.extend(overflow::check_attribs(record, state, &self.buffers, &self.tags, &request))
      }
      Err(problem) => findings.push(problem),
    }
    findings
  }

  /// Stores `error` for the caller's next `getError` and reports it.
  pub fn report_api_error(&mut self, call: &Call<'_>, error: u32) -> Result<(), LintError> {
    self.pending_error.get_or_insert(error);
    let mut context = self.error_context(call);
    let kind = if context.iter().any(|line| line.ends_with(" was deleted")) {
      DiagnosticKind::ResourceLifecycle
    } else {
      DiagnosticKind::Api
    };
    if call.entry.is_draw() {
      context.extend(self.draw_findings(call));
    }
    let reason = self.names.error_to_string(error);
    self.report(call, kind, &reason, context)
  }

  /// Updates the trackers after a call which the real context accepted.
  pub fn post_check(
    &mut self,
    call: &Call<'_>,
    result: &Value,
    backend: &mut dyn Backend,
  ) -> Result<(), LintError> {
    use EntryPoint::*;
    match call.entry {
      CreateBuffer | CreateFramebuffer | CreateProgram | CreateQuery | CreateRenderbuffer
      | CreateSampler | CreateShader | CreateTexture | CreateTransformFeedback
      | CreateVertexArray | CreateVertexArrayOes | FenceSync => self.created(result),

      DeleteBuffer | DeleteFramebuffer | DeleteProgram | DeleteQuery | DeleteRenderbuffer
      | DeleteSampler | DeleteShader | DeleteSync | DeleteTexture | DeleteTransformFeedback
      | DeleteVertexArray | DeleteVertexArrayOes => self.deleted(call.handle_arg(0)),

      BindBuffer => {
        let (target, buffer) = (call.u32_arg(0), call.handle_arg(1));
        let redundant = if target == gl::ELEMENT_ARRAY_BUFFER {
          self.vertex_arrays.set_element_buffer(buffer, &self.live)
        } else {
          let previous = self.buffers.bind(target, buffer);
          self.live.same_binding(previous, buffer)
        };
        self.count_redundant(call.entry, redundant);
      }
      BindBufferBase | BindBufferRange => {
        self.buffers.bind(call.u32_arg(0), call.handle_arg(2));
      }
      BufferData => self.buffer_data(call),
      BufferSubData => return self.buffer_sub_data(call),
      CopyBufferSubData => {
        let src = self.bound_buffer(call.u32_arg(0));
        if let Some(dst) = self.bound_buffer(call.u32_arg(1)) {
          if self.shadows.get(dst).is_some() {
            let offsets = (call.usize_arg(2), call.usize_arg(3), call.usize_arg(4));
            if let (Some(read_offset), Some(write_offset), Some(size)) = offsets {
              self.shadows.copy(src, dst, read_offset, write_offset, size);
            }
          }
        }
      }

      BindVertexArray | BindVertexArrayOes => {
        let redundant = self.vertex_arrays.bind(call.handle_arg(0), &self.live);
        self.count_redundant(call.entry, redundant);
      }
      EnableVertexAttribArray | DisableVertexAttribArray => {
        let enabled = call.entry == EnableVertexAttribArray;
        let redundant = self.vertex_arrays.set_enabled(call.u32_arg(0), enabled);
        self.count_redundant(call.entry, redundant);
      }
      VertexAttribPointer | VertexAttribIPointer => {
        let integer = call.entry == VertexAttribIPointer;
        let (normalized, stride, offset) = if integer {
          (false, call.u32_arg(3), call.arg(4))
        } else {
          (call.arg(3).as_bool(), call.u32_arg(4), call.arg(5))
        };
        let pointer = AttribPointer {
          buffer: self.buffers.bound(gl::ARRAY_BUFFER),
          size: call.u32_arg(1),
          type_: call.u32_arg(2),
          normalized,
          stride,
          offset: offset.as_f64().map_or(0, |offset| offset as u64),
          integer,
          ..AttribPointer::default()
        };
        let redundant = self.vertex_arrays.set_pointer(call.u32_arg(0), pointer, &self.live);
        self.count_redundant(call.entry, redundant);
      }
      VertexAttribDivisor | VertexAttribDivisorAngle => {
        let redundant = self.vertex_arrays.set_divisor(call.u32_arg(0), call.u32_arg(1));
        self.count_redundant(call.entry, redundant);
      }

      UseProgram => {
        let program = call.handle_arg(0);
        let redundant = self.live.same_binding(self.programs.current(), program);
        self.programs.use_program(program);
        self.count_redundant(call.entry, redundant);
      }
      ShaderSource => {
        if let (Some(shader), Some(source)) = (call.handle_arg(0), call.arg(1).as_str()) {
          self.programs.set_shader_source(shader, source);
        }
      }
      CompileShader => return self.compiled(call, backend),
      LinkProgram => return self.linked(call, backend),
      GetUniformLocation => return self.got_uniform_location(call, result),
      entry if UniformSetter::of(entry).is_some() => return self.uniform_set(call),

      ActiveTexture => {
        let unit = call.u32_arg(0);
        let previous = self.textures.set_active_unit(unit);
        self.count_redundant(call.entry, previous == unit.wrapping_sub(gl::TEXTURE0) as usize);
      }
      BindTexture => {
        if let Some(target) = TextureTarget::from_raw(call.u32_arg(0)) {
          let texture = call.handle_arg(1);
          let previous = self.textures.bind(target, texture, &self.names);
          let redundant = self.live.same_binding(previous, texture);
          self.count_redundant(call.entry, redundant);
        }
      }
      TexImage2D | TexImage3D | CompressedTexImage2D | CompressedTexImage3D | CopyTexImage2D => {
        self.tex_image(call)
      }
      TexStorage2D | TexStorage3D => {
        let internal_format = call.u32_arg(2);
        let depth = if call.entry == TexStorage3D { call.u32_arg(5) } else { 1 };
        let base = MipInfo {
          width: call.u32_arg(3),
          height: call.u32_arg(4),
          depth,
          internal_format,
          type_: textures::type_for_internal_format(internal_format),
        };
        self.textures.set_storage(call.u32_arg(0), call.u32_arg(1), base, &self.names);
      }
      GenerateMipmap => self.textures.generate_mipmap(call.u32_arg(0), &self.names),
      TexParameteri | TexParameterf => {
        self.textures.set_parameter(call.u32_arg(0), call.u32_arg(1), call.u32_arg(2), &self.names)
      }
      BindSampler => {
        let sampler = call.handle_arg(1);
        let previous = self.textures.bind_sampler(call.u32_arg(0) as usize, sampler);
        let redundant = self.live.same_binding(previous, sampler);
        self.count_redundant(call.entry, redundant);
      }
      SamplerParameteri | SamplerParameterf => {
        if let Some(sampler) = call.handle_arg(0) {
          self.textures.set_sampler_parameter(sampler, call.u32_arg(1), call.u32_arg(2));
        }
      }

      BindFramebuffer => {
        let framebuffer = call.handle_arg(1);
        let previous = self.framebuffers.bind(call.u32_arg(0), framebuffer);
        let redundant = self.live.same_binding(previous, framebuffer);
        self.count_redundant(call.entry, redundant);
      }
      FramebufferTexture2D => {
        let layer =
          TextureTarget::from_image_target(call.u32_arg(2)).map_or(0, |(_, face)| face as u32);
        let attachment = call
          .handle_arg(3)
          .map(|texture| Attachment::Texture { texture, level: call.u32_arg(4), layer });
        self.framebuffers.attach(call.u32_arg(0), call.u32_arg(1), attachment);
      }
      FramebufferTextureLayer => {
        let (level, layer) = (call.u32_arg(3), call.u32_arg(4));
        let attachment =
          call.handle_arg(2).map(|texture| Attachment::Texture { texture, level, layer });
        self.framebuffers.attach(call.u32_arg(0), call.u32_arg(1), attachment);
      }
      FramebufferRenderbuffer => {
        let attachment = call.handle_arg(3).map(Attachment::Renderbuffer);
        self.framebuffers.attach(call.u32_arg(0), call.u32_arg(1), attachment);
      }

      GetExtension => {
        if let (false, Some(extension)) = (result.is_nullish(), call.arg(0).as_str()) {
          self.enable_extension(extension);
        }
      }

      entry if entry.is_draw() => return self.drawn(call),
      _ => {}
    }
    Ok(())
  }

  fn count_redundant(&mut self, entry: EntryPoint, redundant: bool) {
    if redundant {
      self.redundant.count(entry);
    }
  }

  fn created(&mut self, result: &Value) {
    let handle = match result.as_handle() {
      Some(handle) => handle,
      None => return,
    };
    self.live.insert(handle);
    if self.config.make_default_tags {
      self.tags.make_default_tag(handle);
    }
    match handle.kind() {
      ObjectKind::Buffer => self.buffers.create(handle),
      ObjectKind::Texture => self.textures.create(handle, &self.names),
      ObjectKind::VertexArray => self.vertex_arrays.create(handle),
      ObjectKind::Sampler => self.textures.create_sampler(handle),
      _ => {}
    }
  }

  fn deleted(&mut self, handle: Option<Handle>) {
    let handle = match handle {
      Some(handle) => handle,
      None => return,
    };
    self.live.remove(handle);
    self.tags.untag(handle);
    match handle.kind() {
      ObjectKind::Buffer => {
        self.buffers.delete(handle);
        self.vertex_arrays.detach_buffer(handle);
        self.shadows.forget(handle);
      }
      ObjectKind::Texture => {
        self.textures.delete(handle);
        self.framebuffers.detach_image(handle);
      }
      ObjectKind::Renderbuffer => self.framebuffers.detach_image(handle),
      ObjectKind::Framebuffer => self.framebuffers.delete(handle),
      ObjectKind::Program => self.programs.delete(handle),
      ObjectKind::Shader => self.programs.delete_shader(handle),
      ObjectKind::VertexArray => self.vertex_arrays.delete(handle),
      ObjectKind::Sampler => self.textures.delete_sampler(handle),
      _ => {}
    }
  }

  /// The buffer bound to `target`, `ELEMENT_ARRAY_BUFFER` lives in the
  /// current vertex array.
  fn bound_buffer(&self, target: u32) -> Option<Handle> {
    if target == gl::ELEMENT_ARRAY_BUFFER {
      self.vertex_arrays.current_state().element_buffer()
    } else {
      self.buffers.bound(target)
    }
  }

  fn buffer_data(&mut self, call: &Call<'_>) {
    let target = call.u32_arg(0);
    let buffer = match self.bound_buffer(target) {
      Some(buffer) => buffer,
      None => return,
    };
    let data = call.arg(1);
    let src_offset = call.usize_arg(3).unwrap_or(0);
    let length = call.usize_arg(4);
    if let Some(size) = buffers::payload_size(data, src_offset, length) {
      self.buffers.set_size(buffer, size);
    }

    if target == gl::ELEMENT_ARRAY_BUFFER {
      match data {
        Value::Array(array) => {
          let end = match length {
            Some(length) if length > 0 => src_offset + length,
            _ => array.len(),
          };
          self.shadows.replace(buffer, array.to_bytes(src_offset..end));
        }
        _ => {
          if let Some(size) = data.as_usize() {
            self.shadows.zero_fill(buffer, size);
          }
        }
      }
    }
  }

  fn buffer_sub_data(&mut self, call: &Call<'_>) -> Result<(), LintError> {
    if call.u32_arg(0) != gl::ELEMENT_ARRAY_BUFFER {
      return Ok(());
    }
    let bound = self.bound_buffer(gl::ELEMENT_ARRAY_BUFFER);
    let (buffer, array) = match (bound, call.arg(2).as_array()) {
      (Some(buffer), Some(array)) => (buffer, array),
      _ => return Ok(()),
    };
    let src_offset = call.usize_arg(3).unwrap_or(0);
    let end = match call.usize_arg(4) {
      Some(length) if length > 0 => src_offset + length,
      _ => array.len(),
    };
    let bytes = array.to_bytes(src_offset..end);
    match self.shadows.write(buffer, call.usize_arg(1).unwrap_or(0), &bytes) {
      Ok(()) => Ok(()),
      Err(problem) => self.report(call, DiagnosticKind::SemanticUsage, &problem, Vec::new()),
    }
  }

  fn tex_image(&mut self, call: &Call<'_>) {
    use EntryPoint::*;
    let arg = |index: usize| call.u32_arg(index);
    let internal_format = arg(2);
    let sized = |width: u32, height: u32, depth: u32, type_: u32| MipInfo {
      width,
      height,
      depth,
      internal_format,
      type_,
    };
    let info = match call.entry {
      TexImage2D if call.args.len() == 6 => match call.arg(5) {
        Value::Image(size) => sized(size.width, size.height, 1, arg(4)),
        _ => return,
      },
      TexImage2D => sized(arg(3), arg(4), 1, arg(7)),
      TexImage3D => sized(arg(3), arg(4), arg(5), arg(8)),
      CompressedTexImage2D => sized(arg(3), arg(4), 1, gl::UNSIGNED_BYTE),
      CompressedTexImage3D => sized(arg(3), arg(4), arg(5), gl::UNSIGNED_BYTE),
      CopyTexImage2D => {
        sized(arg(5), arg(6), 1, textures::type_for_internal_format(internal_format))
      }
      _ => return,
    };
    self.textures.set_image(arg(0), arg(1), info, &self.names);
  }

  fn annotated_shader(&self, shader: Handle, log: &str) -> String {
    match self.programs.shader_source(shader) {
      Some(source) => shader_log::annotate_source(source, log),
      None => log.to_owned(),
    }
  }

  fn compiled(&mut self, call: &Call<'_>, backend: &mut dyn Backend) -> Result<(), LintError> {
    let shader = match call.handle_arg(0) {
      Some(shader) => shader,
      None => return Ok(()),
    };
    if !self.config.fail_bad_shaders_and_programs || query::shader_compiled(backend, shader) {
      return Ok(());
    }
    let log = query::info_log(backend, EntryPoint::GetShaderInfoLog, shader);
    let annotated = self.annotated_shader(shader, &log).trim_end().to_owned();
    let reason = format!("{} failed to compile", self.tags.describe(shader));
    self.report(call, DiagnosticKind::SemanticUsage, &reason, vec![annotated])
  }

  fn linked(&mut self, call: &Call<'_>, backend: &mut dyn Backend) -> Result<(), LintError> {
    let program = match call.handle_arg(0) {
      Some(program) => program,
      None => return Ok(()),
    };
    if query::program_linked(backend, program) {
      let (uniforms, attribs) = query::program_reflection(backend, program);
      let record = ProgramRecord::from_reflection(&uniforms, &attribs, &self.config);
      self.programs.link(program, record);
      return Ok(());
    }

    self.programs.forget(program);
    if !self.config.fail_bad_shaders_and_programs {
      return Ok(());
    }
    let mut context = Vec::new();
    let log = query::info_log(backend, EntryPoint::GetProgramInfoLog, program);
    if !log.trim().is_empty() {
      context.push(log.trim_end().to_owned());
    }
    for shader in query::attached_shaders(backend, program) {
      let shader_log = query::info_log(backend, EntryPoint::GetShaderInfoLog, shader);
      context.push(format!(
        "{}:\n{}",
        self.tags.describe(shader),
        self.annotated_shader(shader, &shader_log).trim_end()
      ));
    }
    let reason = format!("{} failed to link", self.tags.describe(program));
    self.report(call, DiagnosticKind::SemanticUsage, &reason, context)
  }

  fn got_uniform_location(&mut self, call: &Call<'_>, result: &Value) -> Result<(), LintError> {
    let (program, name) = match (call.handle_arg(0), call.arg(1).as_str()) {
      (Some(program), Some(name)) => (program, name),
      _ => return Ok(()),
    };
    if let Some(location) = result.as_handle() {
      self.programs.add_location(location, program, name);
      return Ok(());
    }

    let base = name.split('[').next().unwrap_or(name);
    if programs::is_builtin_name(base)
      || self.config.is_uniform_ignored(name)
      || self.config.is_uniform_ignored(base)
    {
      return Ok(());
    }
    let reason = format!("uniform '{}' does not exist in {}", name, self.tags.describe(program));
    if self.config.fail_undefined_uniforms {
      self.report(call, DiagnosticKind::SemanticUsage, &reason, Vec::new())
    } else {
      if self.config.warn_undefined_uniforms {
        self.warn(call, DiagnosticKind::SemanticUsage, &reason);
      }
      Ok(())
    }
  }

  fn uniform_set(&mut self, call: &Call<'_>) -> Result<(), LintError> {
    let (location, setter) = match (call.handle_arg(0), UniformSetter::of(call.entry)) {
      (Some(location), Some(setter)) => (location, setter),
      _ => return Ok(()),
    };
    let values = setter.values(call.args);

    let mut problem = None;
    if setter.data == SetterData::Matrix && self.config.fail_zero_matrix_uniforms {
      if let Some((program, alias)) = self.programs.location_info(location) {
        let base = self
          .programs
          .record(program)
          .and_then(|record| record.resolve(alias))
          .map_or(alias, |(uniform, _)| uniform.name.as_str());
        let ignored = self.config.is_uniform_ignored(alias) || self.config.is_uniform_ignored(base);
        let zero = programs::zero_matrices(&values, setter.components);
        if !ignored && !zero.is_empty() {
          problem = Some(if values.len() == setter.components {
            "the matrix is all zeros".to_owned()
          } else {
            let indices: Vec<String> = zero.iter().map(usize::to_string).collect();
            format!("matrices {} of the data are all zeros", indices.join(", "))
          });
        }
      }
    }

    self.programs.set_uniform(location, setter, &values);
    match problem {
      Some(reason) => self.report(call, DiagnosticKind::SemanticUsage, &reason, Vec::new()),
      None => Ok(()),
    }
  }

  fn drawn(&mut self, call: &Call<'_>) -> Result<(), LintError> {
    let findings = self.draw_findings(call);
    let diagnostic = if findings.is_empty() {
      None
    } else {
      Some(self.compose(call, DiagnosticKind::SemanticUsage, &findings.join("\n"), Vec::new()))
    };

    self.draw_calls_left = self.draw_calls_left.saturating_sub(1);
    if self.draw_calls_left == 0 {
      info!("draw call budget exhausted");
      self.disable();
    }

    match diagnostic {
      Some(diagnostic) => self.deliver(diagnostic),
      None => Ok(()),
    }
  }
}
