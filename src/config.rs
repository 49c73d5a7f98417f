use prelude_plus::*;
use serde::{Deserialize, Serialize};

/// The effective configuration of a linting session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
  /// Successful draw calls left until instrumentation switches itself off,
  /// `0` disables it right away.
  pub max_draw_calls: u32,
  pub throw_on_error: bool,
  pub fail_bad_shaders_and_programs: bool,
  pub fail_unset_uniforms: bool,
  pub fail_unset_sampler_uniforms: bool,
  pub fail_zero_matrix_uniforms: bool,
  pub fail_unrenderable_textures: bool,
  pub fail_undefined_uniforms: bool,
  pub warn_undefined_uniforms: bool,
  pub ignore_uniforms: BTreeSet<String>,
  pub make_default_tags: bool,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      max_draw_calls: 1000,
      throw_on_error: true,
      fail_bad_shaders_and_programs: true,
      fail_unset_uniforms: true,
      fail_unset_sampler_uniforms: false,
      fail_zero_matrix_uniforms: true,
      fail_unrenderable_textures: true,
      fail_undefined_uniforms: false,
      warn_undefined_uniforms: true,
      ignore_uniforms: BTreeSet::new(),
      make_default_tags: true,
    }
  }
}

/// A partial configuration, every key present overrides the current value
/// except `ignoreUniforms` which extends the current list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct ConfigPatch {
  pub max_draw_calls: Option<u32>,
  pub throw_on_error: Option<bool>,
  pub fail_bad_shaders_and_programs: Option<bool>,
  pub fail_unset_uniforms: Option<bool>,
  pub fail_unset_sampler_uniforms: Option<bool>,
  pub fail_zero_matrix_uniforms: Option<bool>,
  pub fail_unrenderable_textures: Option<bool>,
  pub fail_undefined_uniforms: Option<bool>,
  pub warn_undefined_uniforms: Option<bool>,
  pub ignore_uniforms: Vec<String>,
  pub make_default_tags: Option<bool>,
}

impl ConfigPatch {
  pub fn from_json(json: &str) -> Result<Self, serde_json::Error> { serde_json::from_str(json) }
}

impl Config {
  pub fn apply(&mut self, patch: &ConfigPatch) {
    macro_rules! apply_fields {
      ($($field:ident),+ $(,)?) => {
        $(if let Some(value) = patch.$field {
          self.$field = value;
        })+
      };
    }

    apply_fields!(
      max_draw_calls,
      throw_on_error,
      fail_bad_shaders_and_programs,
      fail_unset_uniforms,
      fail_unset_sampler_uniforms,
      fail_zero_matrix_uniforms,
      fail_unrenderable_textures,
      fail_undefined_uniforms,
      warn_undefined_uniforms,
      make_default_tags,
    );
    self.ignore_uniforms.extend(patch.ignore_uniforms.iter().cloned());
  }

  #[inline]
  pub fn is_uniform_ignored(&self, name: &str) -> bool { self.ignore_uniforms.contains(name) }
}
