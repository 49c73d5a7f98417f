//! The decorating context which routes every call through the session.

use crate::config::ConfigPatch;
use crate::entry_points::EntryPoint;
use crate::error::LintError;
use crate::handle::Handle;
use crate::query;
use crate::report::{DiagnosticSink, LogSink};
use crate::session::{Call, Session, SharedSession};
use crate::value::Value;
use prelude_plus::*;

/// The real implementation of the API being linted.
pub trait Backend {
  fn invoke(&mut self, entry: EntryPoint, args: &[Value]) -> Value;
}

impl<B: Backend + ?Sized> Backend for &mut B {
  #[inline(always)]
  fn invoke(&mut self, entry: EntryPoint, args: &[Value]) -> Value { (**self).invoke(entry, args) }
}

impl<B: Backend + ?Sized> Backend for Box<B> {
  #[inline(always)]
  fn invoke(&mut self, entry: EntryPoint, args: &[Value]) -> Value { (**self).invoke(entry, args) }
}

impl<B: Backend + ?Sized> Backend for Rc<RefCell<B>> {
  #[inline(always)]
  fn invoke(&mut self, entry: EntryPoint, args: &[Value]) -> Value {
    RefCell::borrow_mut(&**self).invoke(entry, args)
  }
}

#[derive(Debug, Default)]
pub struct AugmentOptions {
  pub config: ConfigPatch,
  /// The session of the parent context when an extension sub-context is
  /// being augmented.
  pub shared_session: Option<SharedSession>,
  /// Receives warnings, [`LogSink`] by default. Ignored when joining a shared
  /// session.
  pub sink: Option<Box<dyn DiagnosticSink>>,
}

/// Wraps `backend` into a [`LintedContext`]. With a shared session
/// `context_name` is the name of the extension being augmented.
pub fn augment<B: Backend>(
  mut backend: B,
  context_name: &str,
  options: AugmentOptions,
) -> LintedContext<B> {
  let session = match options.shared_session {
    Some(session) => {
      {
        let mut shared = session.borrow_mut();
        shared.enable_extension(context_name);
        shared.set_configuration(&options.config);
      }
      session
    }
    None => {
      let sink = options.sink.unwrap_or_else(|| Box::new(LogSink));
      let session = Session::new(&mut backend, context_name, &options.config, sink);
      Rc::new(RefCell::new(session))
    }
  };
  LintedContext { backend, session }
}

#[derive(Debug)]
pub struct LintedContext<B: Backend> {
  backend: B,
  session: SharedSession,
}

impl<B: Backend> LintedContext<B> {
  /// Augmenting a context twice never wraps it twice, the configuration is
  /// merged into the existing session.
  pub fn augment(self, options: AugmentOptions) -> Self {
    self.set_configuration(&options.config);
    self
  }

  /// Joins an extension sub-context to this context's session.
  pub fn augment_extension<E: Backend>(
    &self,
    extension: E,
    extension_name: &str,
  ) -> LintedContext<E> {
    let options =
      AugmentOptions { shared_session: Some(Rc::clone(&self.session)), ..Default::default() };
    augment(extension, extension_name, options)
  }

  #[inline(always)]
  pub fn session(&self) -> &SharedSession { &self.session }
  #[inline(always)]
  pub fn backend(&self) -> &B { &self.backend }
  #[inline(always)]
  pub fn backend_mut(&mut self) -> &mut B { &mut self.backend }

  #[track_caller]
  pub fn call(&mut self, entry: EntryPoint, args: &[Value]) -> Result<Value, LintError> {
    let call = Call { entry, args, location: Some(Location::caller()) };
    let mut session = self.session.borrow_mut();

    if entry == EntryPoint::GetError {
      if let Some(error) = session.take_pending_error() {
        return Ok(Value::from(error));
      }
      return Ok(self.backend.invoke(entry, args));
    }
    if session.is_disabled() {
      return Ok(self.backend.invoke(entry, args));
    }

    if entry.is_draw() {
      session.pre_check_draw(&call)?;
    }
    session.check_args(&call)?;

    let result = self.backend.invoke(entry, args);
    let error = query::get_error(&mut self.backend);
    if error != gl::NO_ERROR {
      session.report_api_error(&call, error)?;
    } else {
      session.post_check(&call, &result, &mut self.backend)?;
    }
    Ok(result)
  }

  pub fn tag_object(&self, handle: Handle, tag: &str) {
    self.session.borrow_mut().tags_mut().tag(handle, tag);
  }

  pub fn untag_object(&self, handle: Handle) { self.session.borrow_mut().tags_mut().untag(handle); }

  pub fn get_tag_for_object(&self, handle: Handle) -> Option<String> {
    self.session.borrow().tags().get(handle).map(ToOwned::to_owned)
  }

  pub fn set_configuration(&self, patch: &ConfigPatch) {
    self.session.borrow_mut().set_configuration(patch);
  }

  pub fn set_configuration_json(&self, json: &str) -> Result<(), LintError> {
    let patch = ConfigPatch::from_json(json)?;
    self.set_configuration(&patch);
    Ok(())
  }

  /// Irreversibly turns the context into a plain pass-through.
  pub fn disable(&self) { self.session.borrow_mut().disable(); }

  pub fn get_and_reset_redundant_call_info(&self) -> BTreeMap<&'static str, u32> {
    self.session.borrow_mut().take_redundant_calls()
  }
}
