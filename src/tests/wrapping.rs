use super::*;
use crate::fake::FakeGl;
use crate::{Backend, DiagnosticKind, LintError, Value};

#[test]
fn augmenting_twice_keeps_one_session() {
  let h = Harness::webgl2(WARN);
  let session = Rc::clone(h.ctx.session());
  let mut ctx = h.ctx.augment(AugmentOptions::default());
  assert!(Rc::ptr_eq(&session, ctx.session()));

  lint_call!(ctx, BindBuffer(gl::ARRAY_BUFFER)).unwrap();
  let diagnostics = h.sink.take();
  assert_eq!(diagnostics.len(), 1);
  assert!(diagnostics[0]
    .message
    .contains("error in bindBuffer(34962): no overload takes 1 arguments"));
}

#[test]
fn real_errors_reach_get_error() {
  let mut h = Harness::webgl2(WARN);
  h.ctx.backend_mut().fail_next(EntryPoint::Enable, gl::INVALID_ENUM);
  lint_call!(h.ctx, Enable(gl::BLEND)).unwrap();

  let diagnostics = h.sink.take();
  assert_eq!(diagnostics.len(), 1);
  assert_eq!(diagnostics[0].kind, DiagnosticKind::Api);
  assert!(diagnostics[0].message.contains("error in enable(BLEND): INVALID_ENUM"));
  assert!(diagnostics[0].message.starts_with(file!()));

  assert_eq!(lint_call!(h.ctx, GetError()).unwrap(), Value::from(gl::INVALID_ENUM));
  assert_eq!(lint_call!(h.ctx, GetError()).unwrap(), Value::from(gl::NO_ERROR));
}

#[test]
fn throw_policy_aborts_before_the_real_call() {
  let mut h = Harness::webgl2("{}");
  let err = lint_call!(h.ctx, Viewport(0, 0, f64::NAN, 10)).unwrap_err();
  let diagnostic = err.as_diagnostic().unwrap();
  assert_eq!(diagnostic.kind, DiagnosticKind::ArgumentShape);
  assert!(diagnostic.message.contains("error in viewport(0, 0, NaN, 10): argument 2 is NaN"));
  assert_eq!(h.ctx.backend().call_count(EntryPoint::Viewport), 0);
  assert!(h.sink.is_empty());
}

#[test]
fn draw_budget_disables_instrumentation() {
  let mut h = Harness::webgl2(r#"{"maxDrawCalls": 2}"#);
  h.program(EMPTY_SHADER, EMPTY_SHADER);
  lint_call!(h.ctx, DrawArrays(gl::TRIANGLES, 0, 3)).unwrap();
  assert!(!h.ctx.session().borrow().is_disabled());
  lint_call!(h.ctx, DrawArrays(gl::TRIANGLES, 0, 3)).unwrap();
  assert!(h.ctx.session().borrow().is_disabled());

  let error_checks = h.ctx.backend().call_count(EntryPoint::GetError);
  lint_call!(h.ctx, DrawArrays(gl::TRIANGLES, 0, f64::NAN)).unwrap();
  assert_eq!(h.ctx.backend().call_count(EntryPoint::DrawArrays), 3);
  assert_eq!(h.ctx.backend().call_count(EntryPoint::GetError), error_checks);
  assert!(h.sink.is_empty());
}

#[test]
fn zero_budget_disables_right_away() {
  let mut h = Harness::webgl2(r#"{"maxDrawCalls": 0}"#);
  assert!(h.ctx.session().borrow().is_disabled());
  lint_call!(h.ctx, Viewport(0, 0, f64::NAN, 10)).unwrap();
}

#[test]
fn disabling_drops_the_trackers() {
  let mut h = Harness::webgl2("{}");
  let buffer = h.create(EntryPoint::CreateBuffer);
  h.ctx.tag_object(buffer, "positions");
  lint_call!(h.ctx, BindBuffer(gl::ARRAY_BUFFER, buffer)).unwrap();
  assert_eq!(h.ctx.session().borrow().buffers().bound(gl::ARRAY_BUFFER), Some(buffer));

  h.ctx.disable();
  assert_eq!(h.ctx.session().borrow().buffers().bound(gl::ARRAY_BUFFER), None);
  assert_eq!(h.ctx.get_tag_for_object(buffer), None);
  lint_call!(h.ctx, BindBuffer(gl::ARRAY_BUFFER)).unwrap();
  assert!(h.sink.is_empty());
}

#[test]
fn tags_follow_the_object_lifecycle() {
  let mut h = Harness::webgl2(WARN);
  let buffer = h.create(EntryPoint::CreateBuffer);
  assert!(h.ctx.get_tag_for_object(buffer).unwrap().starts_with("*UNTAGGED:Buffer"));

  h.ctx.tag_object(buffer, "positions");
  lint_call!(h.ctx, BindBuffer(gl::ARRAY_BUFFER, buffer, 1)).unwrap();
  assert!(h.messages()[0].contains("bindBuffer(34962, Buffer(\"positions\"), 1)"));

  lint_call!(h.ctx, DeleteBuffer(buffer)).unwrap();
  assert_eq!(h.ctx.get_tag_for_object(buffer), None);

  let texture = h.create(EntryPoint::CreateTexture);
  h.ctx.tag_object(texture, "atlas");
  h.ctx.untag_object(texture);
  assert_eq!(h.ctx.get_tag_for_object(texture), None);
}

#[test]
fn using_a_deleted_object_is_a_lifecycle_error() {
  let mut h = Harness::webgl2(WARN);
  let buffer = h.create(EntryPoint::CreateBuffer);
  lint_call!(h.ctx, DeleteBuffer(buffer)).unwrap();
  lint_call!(h.ctx, BindBuffer(gl::ARRAY_BUFFER, buffer)).unwrap();

  let diagnostics = h.sink.take();
  assert_eq!(diagnostics.len(), 1);
  assert_eq!(diagnostics[0].kind, DiagnosticKind::ResourceLifecycle);
  assert!(diagnostics[0].message.contains("INVALID_OPERATION"));
  assert!(diagnostics[0].message.contains(&format!("{} was deleted", buffer)));
}

#[test]
fn unknown_configuration_keys_are_rejected() {
  let h = Harness::webgl2("{}");
  let err = h.ctx.set_configuration_json(r#"{"failUnsetUniform": true}"#).unwrap_err();
  assert!(matches!(err, LintError::Config(_)));
  let typo = r#"{"maxDrawCals": 1}"#;
  let err = Harness::try_new(FakeGl::webgl2(), "WebGL2RenderingContext", typo).err().unwrap();
  assert!(format!("{:#}", err).contains("unknown field `maxDrawCals`"));

  h.ctx.set_configuration_json(r#"{"ignoreUniforms": ["u_time"]}"#).unwrap();
  h.ctx.set_configuration_json(r#"{"ignoreUniforms": ["u_frame"]}"#).unwrap();
  let session = h.ctx.session().borrow();
  assert!(session.config().is_uniform_ignored("u_time"));
  assert!(session.config().is_uniform_ignored("u_frame"));
}

#[test]
fn extension_contexts_share_the_session() {
  let fake = Rc::new(RefCell::new(FakeGl::webgl1()));
  let options =
    AugmentOptions { config: ConfigPatch::from_json(WARN).unwrap(), ..AugmentOptions::default() };
  let ctx = augment(Rc::clone(&fake), "WebGLRenderingContext", options);
  let mut ext = ctx.augment_extension(Rc::clone(&fake), "OES_vertex_array_object");
  assert!(Rc::ptr_eq(ctx.session(), ext.session()));
  assert!(ctx.session().borrow().names().is_extension_enabled("OES_vertex_array_object"));

  let vao = lint_call!(ext, CreateVertexArrayOes()).unwrap().as_handle().unwrap();
  lint_call!(ext, BindVertexArrayOes(vao)).unwrap();
  assert_eq!(ctx.session().borrow().vertex_arrays().current(), Some(vao));
}

#[test]
fn shared_backends_are_called_through_their_cell() {
  let fake = Rc::new(RefCell::new(FakeGl::webgl2()));
  let mut ctx = augment(Rc::clone(&fake), "WebGL2RenderingContext", AugmentOptions::default());
  lint_call!(ctx, Viewport(0, 0, 640, 480)).unwrap();
  assert_eq!(fake.borrow().call_count(EntryPoint::Viewport), 1);
}

#[test]
fn objects_from_before_augmenting_count_as_redundant_binds() {
  let mut backend = FakeGl::webgl2();
  let buffer = backend.invoke(EntryPoint::CreateBuffer, &[]).as_handle().unwrap();
  let mut h = Harness::new(backend, "WebGL2RenderingContext", "{}");
  lint_call!(h.ctx, BindBuffer(gl::ARRAY_BUFFER, buffer)).unwrap();
  lint_call!(h.ctx, BindBuffer(gl::ARRAY_BUFFER, buffer)).unwrap();
  assert_eq!(h.ctx.get_and_reset_redundant_call_info().get("bindBuffer"), Some(&1));
}
