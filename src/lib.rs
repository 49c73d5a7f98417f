//! Call-level linter for WebGL-style graphics contexts.
//!
//! A [`LintedContext`] decorates a real [`Backend`] and checks every call
//! against the implicit contract of the API: argument shapes, unset uniforms,
//! unrenderable textures, out-of-range vertex and index fetches and feedback
//! loops between sampled textures and the current framebuffer. The state
//! needed for that is reconstructed purely from the intercepted calls.

#![deny(missing_debug_implementations)]
#![allow(clippy::new_without_default)]

macro_rules! gl_enum {
  // a wrapper for autoformatting purposes
  ({$($tt:tt)+}) => { gl_enum! { $($tt)+ } };

  (
    $(#[$enum_meta:meta])* $visibility:vis enum $enum_name:ident {
      $($(#[$variant_meta:meta])* $rust_variant:ident = $gl_variant:ident),+ $(,)?
    }
  ) => {
    #[repr(u32)]
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    $(#[$enum_meta])*
    $visibility enum $enum_name {
      $($(#[$variant_meta])* $rust_variant = ::gl::$gl_variant,)+
    }

    #[allow(dead_code)]
    impl $enum_name {
      $visibility const VARIANTS: &'static [Self] = &[$(Self::$rust_variant),+];

      $visibility const fn from_raw(raw: ::gl::types::GLenum) -> Option<Self> {
        Some(match raw {
          $(::gl::$gl_variant => Self::$rust_variant,)+
          _ => return None,
        })
      }

      #[inline(always)]
      $visibility const fn as_raw(&self) -> ::gl::types::GLenum {
        *self as ::gl::types::GLenum
      }
    }
  };
}

pub mod buffers;
pub mod config;
pub mod descriptors;
pub mod dispatch;
pub mod entry_points;
pub mod error;
#[cfg(any(test, feature = "fake"))]
pub mod fake;
pub mod feedback;
pub mod framebuffers;
pub mod handle;
pub mod index_shadow;
pub mod names;
pub mod overflow;
pub mod programs;
pub mod query;
pub mod report;
pub mod session;
pub mod shader_log;
pub mod tags;
pub mod textures;
pub mod value;
pub mod vertex_arrays;

#[cfg(test)]
mod tests;

pub use config::{Config, ConfigPatch};
pub use dispatch::{augment, AugmentOptions, Backend, LintedContext};
pub use entry_points::EntryPoint;
pub use error::LintError;
pub use handle::{Handle, ObjectKind};
pub use report::{Diagnostic, DiagnosticKind, DiagnosticSink, LogSink, MemorySink};
pub use session::{Session, SharedSession};
pub use value::{ActiveInfo, ArrayData, ImageSize, Value};

/// Invokes an entry point through a [`LintedContext`] converting every
/// argument with [`Value::from`].
///
/// ```ignore
/// lint_call!(ctx, DrawArrays(gl::TRIANGLES, 0, 3))?;
/// ```
#[macro_export]
macro_rules! lint_call {
  ($ctx:expr, $entry:ident($($arg:expr),* $(,)?)) => {
    $ctx.call($crate::EntryPoint::$entry, &[$($crate::Value::from($arg)),*])
  };
}
