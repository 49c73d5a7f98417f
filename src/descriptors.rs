//! Argument shape descriptors and the generic validation pass driven by them.

use crate::entry_points::EntryPoint;
use crate::names;
use crate::value::{ArrayData, Value};
use prelude_plus::*;

/// Custom validator for an array argument, receives the argument position.
pub type ArrayValidator = fn(usize, &ArrayData) -> Result<(), String>;

/// The argument kinds of one overload, indexed by position.
pub type Overload = &'static [ArgKind];

#[derive(Debug, Copy, Clone)]
pub enum ArgKind {
  Enum,
  /// A mask, rendered with the names of its set bits.
  Bitfield(&'static [&'static str]),
  /// A number which is rendered as an enum when the parameter name at
  /// position `pname` takes enum values, e.g. `texParameteri(_, TEXTURE_MIN_FILTER, LINEAR)`.
  ParamEnum { pname: usize },
  Number,
  /// Either a number or an object, only checked for NaN.
  MaybeNumber,
  Array(ArrayCheck),
  Other,
}

#[derive(Copy, Clone)]
pub enum ArrayCheck {
  /// Every element must be neither a hole nor NaN.
  Scan,
  Custom(ArrayValidator),
}

impl fmt::Debug for ArrayCheck {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Scan => f.write_str("Scan"),
      Self::Custom(validator) => write!(f, "Custom({:p})", *validator as *const ()),
    }
  }
}

pub mod shorthand {
  use super::*;

  pub const E: ArgKind = ArgKind::Enum;
  pub const N: ArgKind = ArgKind::Number;
  pub const M: ArgKind = ArgKind::MaybeNumber;
  pub const O: ArgKind = ArgKind::Other;
  pub const A: ArgKind = ArgKind::Array(ArrayCheck::Scan);
  pub const TA: ArgKind = ArgKind::Array(ArrayCheck::Custom(check_typed_array));
  pub const UF: ArgKind = ArgKind::Array(ArrayCheck::Custom(check_float_data));
  pub const UI: ArgKind = ArgKind::Array(ArrayCheck::Custom(check_integer_data));
  pub const P0: ArgKind = ArgKind::ParamEnum { pname: 0 };
  pub const P1: ArgKind = ArgKind::ParamEnum { pname: 1 };
  pub const BUFFER_BITS: ArgKind = ArgKind::Bitfield(names::BUFFER_BIT_NAMES);
  pub const SYNC_BITS: ArgKind = ArgKind::Bitfield(names::SYNC_BIT_NAMES);
}

fn scan_elements(ndx: usize, data: &ArrayData) -> Result<(), String> {
  match data.find_invalid_element() {
    Some((i, what)) => Err(format!("element {} of argument {} is {}", i, ndx, what)),
    None => Ok(()),
  }
}

/// Raw buffer contents, only typed arrays carry a binary representation.
pub fn check_typed_array(ndx: usize, data: &ArrayData) -> Result<(), String> {
  if data.is_typed() {
    Ok(())
  } else {
    Err(format!("argument {} must be a typed array, got a plain Array", ndx))
  }
}

pub fn check_float_data(ndx: usize, data: &ArrayData) -> Result<(), String> {
  if data.is_typed() && !data.is_float() {
    return Err(format!(
      "argument {} is {} but this function expects float data",
      ndx,
      data.type_name()
    ));
  }
  scan_elements(ndx, data)
}

pub fn check_integer_data(ndx: usize, data: &ArrayData) -> Result<(), String> {
  if data.is_float() {
    return Err(format!(
      "argument {} is {} but this function expects integer data",
      ndx,
      data.type_name()
    ));
  }
  scan_elements(ndx, data)
}

/// Parameter names whose values are enums rather than plain numbers.
pub fn param_takes_enum(pname: u32) -> bool {
  matches!(
    pname,
    gl::TEXTURE_MAG_FILTER
      | gl::TEXTURE_MIN_FILTER
      | gl::TEXTURE_WRAP_S
      | gl::TEXTURE_WRAP_T
      | gl::TEXTURE_WRAP_R
      | gl::TEXTURE_COMPARE_MODE
      | gl::TEXTURE_COMPARE_FUNC
      | names::UNPACK_COLORSPACE_CONVERSION_WEBGL
  )
}

fn check_number(ndx: usize, value: &Value) -> Result<(), String> {
  if value.is_nan() {
    Err(format!("argument {} is NaN", ndx))
  } else if !value.is_numeric() {
    Err(format!("argument {} is not a number", ndx))
  } else {
    Ok(())
  }
}

/// Checks the shape of an argument list, returning the first problem found.
pub fn validate_args(entry: EntryPoint, args: &[Value]) -> Result<(), String> {
  let overload = match entry.overload(args.len()) {
    Some(overload) => overload,
    None => return Err(format!("no overload takes {} arguments", args.len())),
  };

  for (ndx, (kind, value)) in overload.iter().zip(args).enumerate() {
    if value.is_undefined() {
      return Err(format!("argument {} is undefined", ndx));
    }
    match kind {
      ArgKind::Enum | ArgKind::Other => {}
      ArgKind::Number | ArgKind::Bitfield(_) | ArgKind::ParamEnum { .. } => {
        check_number(ndx, value)?
      }
      ArgKind::MaybeNumber => {
        if value.is_nan() {
          return Err(format!("argument {} is NaN", ndx));
        }
      }
      ArgKind::Array(check) => {
        let data = match value {
          Value::Array(data) => data,
          _ => return Err(format!("argument {} is not an array or typed array", ndx)),
        };
        match check {
          ArrayCheck::Scan => scan_elements(ndx, data)?,
          ArrayCheck::Custom(validator) => validator(ndx, data)?,
        }
      }
    }
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn nums(values: &[f64]) -> Vec<Value> { values.iter().map(|&n| Value::from(n)).collect() }

  #[test]
  fn nan_is_reported_at_its_position() {
    for position in 1..3 {
      let mut args = nums(&[gl::TRIANGLES as f64, 0.0, 3.0]);
      args[position] = Value::from(f64::NAN);
      assert_eq!(
        validate_args(EntryPoint::DrawArrays, &args),
        Err(format!("argument {} is NaN", position))
      );
    }
  }

  #[test]
  fn unknown_arity_is_reported() {
    let short = nums(&[gl::TRIANGLES as f64, 0.0]);
    let long = nums(&[gl::TRIANGLES as f64, 0.0, 3.0, 1.0]);
    assert_eq!(
      validate_args(EntryPoint::DrawArrays, &short),
      Err("no overload takes 2 arguments".to_owned())
    );
    let err = validate_args(EntryPoint::DrawArrays, &long).unwrap_err();
    assert!(err.contains("takes 4 arguments"));
  }

  #[test]
  fn undefined_is_never_accepted() {
    let args = vec![Value::from(gl::ARRAY_BUFFER), Value::Undefined];
    assert_eq!(
      validate_args(EntryPoint::BindBuffer, &args),
      Err("argument 1 is undefined".to_owned())
    );
  }

  #[test]
  fn maybe_number_accepts_objects() {
    let data = Value::from(vec![1.0f32, 2.0]);
    let args = vec![Value::from(gl::ARRAY_BUFFER), data, Value::from(gl::STATIC_DRAW)];
    assert_eq!(validate_args(EntryPoint::BufferData, &args), Ok(()));

    let args =
      vec![Value::from(gl::ARRAY_BUFFER), Value::from(f64::NAN), Value::from(gl::STATIC_DRAW)];
    assert_eq!(validate_args(EntryPoint::BufferData, &args), Err("argument 1 is NaN".to_owned()));
  }

  #[test]
  fn scans_plain_arrays_for_holes() {
    let location = Value::Null;
    let data = Value::Array(ArrayData::Values(vec![Value::from(1.0), Value::Undefined]));
    assert_eq!(
      validate_args(EntryPoint::Uniform2fv, &[location, data]),
      Err("element 1 of argument 1 is undefined".to_owned())
    );
  }

  #[test]
  fn uniform_data_kinds_are_checked() {
    let ints = Value::from(vec![1i32, 2]);
    let floats = Value::from(vec![1.0f32, 2.0]);
    assert!(validate_args(EntryPoint::Uniform2fv, &[Value::Null, ints.clone()])
      .unwrap_err()
      .contains("Int32Array"));
    assert!(validate_args(EntryPoint::Uniform2iv, &[Value::Null, floats]).is_err());
    assert_eq!(validate_args(EntryPoint::Uniform2iv, &[Value::Null, ints]), Ok(()));
  }
}
