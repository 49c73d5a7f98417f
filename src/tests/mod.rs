//! End-to-end tests driving a [`LintedContext`] over the in-memory fake.

mod arguments;
mod textures;
mod wrapping;

use crate::fake::FakeGl;
use crate::report::MemorySink;
use crate::{augment, lint_call, AugmentOptions, ConfigPatch, EntryPoint, Handle, LintedContext};
use prelude_plus::*;

pub const WARN: &str = r#"{"throwOnError": false}"#;

pub const EMPTY_SHADER: &str = "void main() {}\n";

pub struct Harness {
  pub ctx: LintedContext<FakeGl>,
  pub sink: MemorySink,
}

impl Harness {
  #[track_caller]
  pub fn new(backend: FakeGl, context_name: &str, config: &str) -> Self {
    Self::try_new(backend, context_name, config).unwrap()
  }

  pub fn try_new(backend: FakeGl, context_name: &str, config: &str) -> AnyResult<Self> {
    let _ = env_logger::builder().is_test(true).try_init();
    let sink = MemorySink::default();
    let options = AugmentOptions {
      config: ConfigPatch::from_json(config)
        .with_context(|| format!("bad test configuration {}", config))?,
      shared_session: None,
      sink: Some(Box::new(sink.clone())),
    };
    Ok(Self { ctx: augment(backend, context_name, options), sink })
  }

  pub fn webgl1(config: &str) -> Self {
    Self::new(FakeGl::webgl1(), "WebGLRenderingContext", config)
  }

  pub fn webgl2(config: &str) -> Self {
    Self::new(FakeGl::webgl2(), "WebGL2RenderingContext", config)
  }

  #[track_caller]
  pub fn create(&mut self, entry: EntryPoint) -> Handle {
    self.ctx.call(entry, &[]).unwrap().as_handle().unwrap()
  }

  /// Compiles, attaches and links both shaders, then uses the program.
  #[track_caller]
  pub fn program(&mut self, vertex: &str, fragment: &str) -> Handle {
    let program = self.create(EntryPoint::CreateProgram);
    for &(type_, source) in &[(gl::VERTEX_SHADER, vertex), (gl::FRAGMENT_SHADER, fragment)] {
      let shader = lint_call!(self.ctx, CreateShader(type_)).unwrap().as_handle().unwrap();
      lint_call!(self.ctx, ShaderSource(shader, source)).unwrap();
      lint_call!(self.ctx, CompileShader(shader)).unwrap();
      lint_call!(self.ctx, AttachShader(program, shader)).unwrap();
    }
    lint_call!(self.ctx, LinkProgram(program)).unwrap();
    lint_call!(self.ctx, UseProgram(program)).unwrap();
    program
  }

  #[track_caller]
  pub fn location(&mut self, program: Handle, name: &str) -> Handle {
    lint_call!(self.ctx, GetUniformLocation(program, name)).unwrap().as_handle().unwrap()
  }

  pub fn messages(&self) -> Vec<String> {
    self.sink.take().into_iter().map(|diagnostic| diagnostic.message).collect()
  }
}
