//! GLES 3.0 enums plus the enums of the extensions WebGL exposes. The linter
//! only reads the constants, the generated function table is what a native
//! backend would call into.

pub use self::all::*;

pub mod all {
  #![allow(clippy::all)]
  include!(concat!(env!("OUT_DIR"), "/bindings.rs"));
}
