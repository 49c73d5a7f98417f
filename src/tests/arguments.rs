use super::*;
use crate::{DiagnosticKind, Value};

#[test]
fn nan_is_reported_at_its_exact_position() {
  let mut h = Harness::webgl2("{}");
  for position in 0..4 {
    let mut args = vec![Value::from(0), Value::from(0), Value::from(640), Value::from(480)];
    args[position] = Value::from(f64::NAN);
    let err = h.ctx.call(EntryPoint::Viewport, &args).unwrap_err();
    let message = &err.as_diagnostic().unwrap().message;
    assert!(message.ends_with(&format!("argument {} is NaN", position)), "{}", message);
  }
}

#[test]
fn arities_without_an_overload_are_reported() {
  let mut h = Harness::webgl2("{}");
  for &arity in &[3, 5] {
    let args = vec![Value::from(1); arity];
    let err = h.ctx.call(EntryPoint::Viewport, &args).unwrap_err();
    assert!(err.to_string().ends_with(&format!("no overload takes {} arguments", arity)));
  }
  assert!(lint_call!(h.ctx, Viewport(0, 0, 640, 480)).is_ok());
}

#[test]
fn uniform_data_must_match_the_setter() {
  let mut h = Harness::webgl2("{}");
  let err = lint_call!(h.ctx, Uniform1iv(None::<Handle>, vec![1.0f32, 2.0])).unwrap_err();
  let diagnostic = err.as_diagnostic().unwrap();
  assert_eq!(diagnostic.kind, DiagnosticKind::ArgumentShape);
  assert!(diagnostic
    .message
    .ends_with("argument 1 is Float32Array but this function expects integer data"));

  assert!(lint_call!(h.ctx, Uniform1iv(None::<Handle>, vec![1i32, 2])).is_ok());
}

#[test]
fn buffer_sources_must_be_typed_arrays() {
  let mut h = Harness::webgl2("{}");
  let plain = Value::Array(vec![Value::from(1), Value::from(2)].into());
  let args = [Value::from(gl::ARRAY_BUFFER), plain, Value::from(gl::STATIC_DRAW), Value::from(0)];
  assert!(h.ctx.call(EntryPoint::BufferData, &args).is_err());
}

#[test]
fn the_warn_policy_lets_the_call_through() {
  let mut h = Harness::webgl2(WARN);
  lint_call!(h.ctx, Viewport(0, (), 640, 480)).unwrap();
  assert_eq!(h.ctx.backend().call_count(EntryPoint::Viewport), 1);
  let diagnostics = h.sink.take();
  assert_eq!(diagnostics.len(), 1);
  assert!(diagnostics[0]
    .message
    .contains("error in viewport(0, undefined, 640, 480): argument 1 is undefined"));
}
