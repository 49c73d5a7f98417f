//! The closed list of entry points a linted context can be called through,
//! together with the argument descriptors of every arity overload.

use crate::descriptors::shorthand::*;
use crate::descriptors::Overload;
use prelude_plus::*;

macro_rules! entry_points {
  ($($variant:ident = $name:literal => [$([$($arg:expr),* $(,)?]),+ $(,)?]),+ $(,)?) => {
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
    pub enum EntryPoint {
      $($variant),+
    }

    impl EntryPoint {
      pub const VARIANTS: &'static [Self] = &[$(Self::$variant),+];

      /// The name under which the entry point is exposed by the context.
      pub const fn name(self) -> &'static str {
        match self {
          $(Self::$variant => $name),+
        }
      }

      pub fn from_name(name: &str) -> Option<Self> {
        match name {
          $($name => Some(Self::$variant),)+
          _ => None,
        }
      }

      /// Every argument list this entry point accepts, at most one per arity.
      pub fn overloads(self) -> &'static [Overload] {
        match self {
          $(Self::$variant => {
            const OVERLOADS: &[Overload] = &[$(&[$($arg),*]),+];
            OVERLOADS
          })+
        }
      }
    }
  };
}

impl fmt::Display for EntryPoint {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

impl EntryPoint {
  pub fn overload(self, arity: usize) -> Option<Overload> {
    self.overloads().iter().copied().find(|overload| overload.len() == arity)
  }

  pub fn is_draw(self) -> bool {
    matches!(
      self,
      Self::DrawArrays
        | Self::DrawElements
        | Self::DrawArraysInstanced
        | Self::DrawElementsInstanced
        | Self::DrawRangeElements
        | Self::DrawArraysInstancedAngle
        | Self::DrawElementsInstancedAngle
    )
  }

  pub fn is_indexed_draw(self) -> bool {
    matches!(
      self,
      Self::DrawElements
        | Self::DrawElementsInstanced
        | Self::DrawRangeElements
        | Self::DrawElementsInstancedAngle
    )
  }

  /// Calls which change vertex attribute state, diagnostics for them mention
  /// the bound vertex array.
  pub fn touches_vertex_array(self) -> bool {
    self.is_draw()
      || matches!(
        self,
        Self::EnableVertexAttribArray
          | Self::DisableVertexAttribArray
          | Self::VertexAttribPointer
          | Self::VertexAttribIPointer
          | Self::VertexAttribDivisor
          | Self::VertexAttribDivisorAngle
      )
  }
}

entry_points! {
  ActiveTexture = "activeTexture" => [[E]],
  AttachShader = "attachShader" => [[O, O]],
  BeginQuery = "beginQuery" => [[E, O]],
  BeginTransformFeedback = "beginTransformFeedback" => [[E]],
  BindAttribLocation = "bindAttribLocation" => [[O, N, O]],
  BindBuffer = "bindBuffer" => [[E, O]],
  BindBufferBase = "bindBufferBase" => [[E, N, O]],
  BindBufferRange = "bindBufferRange" => [[E, N, O, N, N]],
  BindFramebuffer = "bindFramebuffer" => [[E, O]],
  BindRenderbuffer = "bindRenderbuffer" => [[E, O]],
  BindSampler = "bindSampler" => [[N, O]],
  BindTexture = "bindTexture" => [[E, O]],
  BindTransformFeedback = "bindTransformFeedback" => [[E, O]],
  BindVertexArray = "bindVertexArray" => [[O]],
  BindVertexArrayOes = "bindVertexArrayOES" => [[O]],
  BlendColor = "blendColor" => [[N, N, N, N]],
  BlendEquation = "blendEquation" => [[E]],
  BlendEquationSeparate = "blendEquationSeparate" => [[E, E]],
  BlendFunc = "blendFunc" => [[E, E]],
  BlendFuncSeparate = "blendFuncSeparate" => [[E, E, E, E]],
  BlitFramebuffer = "blitFramebuffer" => [[N, N, N, N, N, N, N, N, BUFFER_BITS, E]],
  BufferData = "bufferData" => [[E, M, E], [E, TA, E, N], [E, TA, E, N, N]],
  BufferSubData = "bufferSubData" => [[E, N, TA], [E, N, TA, N], [E, N, TA, N, N]],
  CheckFramebufferStatus = "checkFramebufferStatus" => [[E]],
  Clear = "clear" => [[BUFFER_BITS]],
  ClearBufferfi = "clearBufferfi" => [[E, N, N, N]],
  ClearBufferfv = "clearBufferfv" => [[E, N, UF], [E, N, UF, N]],
  ClearBufferiv = "clearBufferiv" => [[E, N, UI], [E, N, UI, N]],
  ClearBufferuiv = "clearBufferuiv" => [[E, N, UI], [E, N, UI, N]],
  ClearColor = "clearColor" => [[N, N, N, N]],
  ClearDepth = "clearDepth" => [[N]],
  ClearStencil = "clearStencil" => [[N]],
  ClientWaitSync = "clientWaitSync" => [[O, SYNC_BITS, N]],
  ColorMask = "colorMask" => [[O, O, O, O]],
  CompileShader = "compileShader" => [[O]],
  CompressedTexImage2D = "compressedTexImage2D" => [
    [E, N, E, N, N, N, TA],
    [E, N, E, N, N, N, M, N],
    [E, N, E, N, N, N, TA, N, N],
  ],
  CompressedTexImage3D = "compressedTexImage3D" => [
    [E, N, E, N, N, N, N, TA],
    [E, N, E, N, N, N, N, M, N],
    [E, N, E, N, N, N, N, TA, N, N],
  ],
  CompressedTexSubImage2D = "compressedTexSubImage2D" => [
    [E, N, N, N, N, N, E, TA],
    [E, N, N, N, N, N, E, M, N],
    [E, N, N, N, N, N, E, TA, N, N],
  ],
  CompressedTexSubImage3D = "compressedTexSubImage3D" => [
    [E, N, N, N, N, N, N, N, E, TA],
    [E, N, N, N, N, N, N, N, E, M, N],
    [E, N, N, N, N, N, N, N, E, TA, N, N],
  ],
  CopyBufferSubData = "copyBufferSubData" => [[E, E, N, N, N]],
  CopyTexImage2D = "copyTexImage2D" => [[E, N, E, N, N, N, N, N]],
  CopyTexSubImage2D = "copyTexSubImage2D" => [[E, N, N, N, N, N, N, N]],
  CopyTexSubImage3D = "copyTexSubImage3D" => [[E, N, N, N, N, N, N, N, N]],
  CreateBuffer = "createBuffer" => [[]],
  CreateFramebuffer = "createFramebuffer" => [[]],
  CreateProgram = "createProgram" => [[]],
  CreateQuery = "createQuery" => [[]],
  CreateRenderbuffer = "createRenderbuffer" => [[]],
  CreateSampler = "createSampler" => [[]],
  CreateShader = "createShader" => [[E]],
  CreateTexture = "createTexture" => [[]],
  CreateTransformFeedback = "createTransformFeedback" => [[]],
  CreateVertexArray = "createVertexArray" => [[]],
  CreateVertexArrayOes = "createVertexArrayOES" => [[]],
  CullFace = "cullFace" => [[E]],
  DeleteBuffer = "deleteBuffer" => [[O]],
  DeleteFramebuffer = "deleteFramebuffer" => [[O]],
  DeleteProgram = "deleteProgram" => [[O]],
  DeleteQuery = "deleteQuery" => [[O]],
  DeleteRenderbuffer = "deleteRenderbuffer" => [[O]],
  DeleteSampler = "deleteSampler" => [[O]],
  DeleteShader = "deleteShader" => [[O]],
  DeleteSync = "deleteSync" => [[O]],
  DeleteTexture = "deleteTexture" => [[O]],
  DeleteTransformFeedback = "deleteTransformFeedback" => [[O]],
  DeleteVertexArray = "deleteVertexArray" => [[O]],
  DeleteVertexArrayOes = "deleteVertexArrayOES" => [[O]],
  DepthFunc = "depthFunc" => [[E]],
  DepthMask = "depthMask" => [[O]],
  DepthRange = "depthRange" => [[N, N]],
  DetachShader = "detachShader" => [[O, O]],
  Disable = "disable" => [[E]],
  DisableVertexAttribArray = "disableVertexAttribArray" => [[N]],
  DrawArrays = "drawArrays" => [[E, N, N]],
  DrawArraysInstanced = "drawArraysInstanced" => [[E, N, N, N]],
  DrawArraysInstancedAngle = "drawArraysInstancedANGLE" => [[E, N, N, N]],
  DrawBuffers = "drawBuffers" => [[A]],
  DrawBuffersWebgl = "drawBuffersWEBGL" => [[A]],
  DrawElements = "drawElements" => [[E, N, E, N]],
  DrawElementsInstanced = "drawElementsInstanced" => [[E, N, E, N, N]],
  DrawElementsInstancedAngle = "drawElementsInstancedANGLE" => [[E, N, E, N, N]],
  DrawRangeElements = "drawRangeElements" => [[E, N, N, N, E, N]],
  Enable = "enable" => [[E]],
  EnableVertexAttribArray = "enableVertexAttribArray" => [[N]],
  EndQuery = "endQuery" => [[E]],
  EndTransformFeedback = "endTransformFeedback" => [[]],
  FenceSync = "fenceSync" => [[E, N]],
  Finish = "finish" => [[]],
  Flush = "flush" => [[]],
  FramebufferRenderbuffer = "framebufferRenderbuffer" => [[E, E, E, O]],
  FramebufferTexture2D = "framebufferTexture2D" => [[E, E, E, O, N]],
  FramebufferTextureLayer = "framebufferTextureLayer" => [[E, E, O, N, N]],
  FrontFace = "frontFace" => [[E]],
  GenerateMipmap = "generateMipmap" => [[E]],
  GetActiveAttrib = "getActiveAttrib" => [[O, N]],
  GetActiveUniform = "getActiveUniform" => [[O, N]],
  GetActiveUniformBlockName = "getActiveUniformBlockName" => [[O, N]],
  GetActiveUniformBlockParameter = "getActiveUniformBlockParameter" => [[O, N, E]],
  GetActiveUniforms = "getActiveUniforms" => [[O, A, E]],
  GetAttachedShaders = "getAttachedShaders" => [[O]],
  GetAttribLocation = "getAttribLocation" => [[O, O]],
  GetBufferParameter = "getBufferParameter" => [[E, E]],
  GetBufferSubData = "getBufferSubData" => [[E, N, TA], [E, N, TA, N], [E, N, TA, N, N]],
  GetContextAttributes = "getContextAttributes" => [[]],
  GetError = "getError" => [[]],
  GetExtension = "getExtension" => [[O]],
  GetFragDataLocation = "getFragDataLocation" => [[O, O]],
  GetFramebufferAttachmentParameter = "getFramebufferAttachmentParameter" => [[E, E, E]],
  GetIndexedParameter = "getIndexedParameter" => [[E, N]],
  GetInternalformatParameter = "getInternalformatParameter" => [[E, E, E]],
  GetParameter = "getParameter" => [[E]],
  GetProgramInfoLog = "getProgramInfoLog" => [[O]],
  GetProgramParameter = "getProgramParameter" => [[O, E]],
  GetQuery = "getQuery" => [[E, E]],
  GetQueryParameter = "getQueryParameter" => [[O, E]],
  GetRenderbufferParameter = "getRenderbufferParameter" => [[E, E]],
  GetSamplerParameter = "getSamplerParameter" => [[O, E]],
  GetShaderInfoLog = "getShaderInfoLog" => [[O]],
  GetShaderParameter = "getShaderParameter" => [[O, E]],
  GetShaderPrecisionFormat = "getShaderPrecisionFormat" => [[E, E]],
  GetShaderSource = "getShaderSource" => [[O]],
  GetSupportedExtensions = "getSupportedExtensions" => [[]],
  GetSyncParameter = "getSyncParameter" => [[O, E]],
  GetTexParameter = "getTexParameter" => [[E, E]],
  GetTransformFeedbackVarying = "getTransformFeedbackVarying" => [[O, N]],
  GetUniform = "getUniform" => [[O, O]],
  GetUniformBlockIndex = "getUniformBlockIndex" => [[O, O]],
  GetUniformIndices = "getUniformIndices" => [[O, O]],
  GetUniformLocation = "getUniformLocation" => [[O, O]],
  GetVertexAttrib = "getVertexAttrib" => [[N, E]],
  GetVertexAttribOffset = "getVertexAttribOffset" => [[N, E]],
  Hint = "hint" => [[E, E]],
  InvalidateFramebuffer = "invalidateFramebuffer" => [[E, A]],
  InvalidateSubFramebuffer = "invalidateSubFramebuffer" => [[E, A, N, N, N, N]],
  IsBuffer = "isBuffer" => [[O]],
  IsContextLost = "isContextLost" => [[]],
  IsEnabled = "isEnabled" => [[E]],
  IsFramebuffer = "isFramebuffer" => [[O]],
  IsProgram = "isProgram" => [[O]],
  IsQuery = "isQuery" => [[O]],
  IsRenderbuffer = "isRenderbuffer" => [[O]],
  IsSampler = "isSampler" => [[O]],
  IsShader = "isShader" => [[O]],
  IsSync = "isSync" => [[O]],
  IsTexture = "isTexture" => [[O]],
  IsTransformFeedback = "isTransformFeedback" => [[O]],
  IsVertexArray = "isVertexArray" => [[O]],
  IsVertexArrayOes = "isVertexArrayOES" => [[O]],
  LineWidth = "lineWidth" => [[N]],
  LinkProgram = "linkProgram" => [[O]],
  PauseTransformFeedback = "pauseTransformFeedback" => [[]],
  PixelStorei = "pixelStorei" => [[E, P0]],
  PolygonOffset = "polygonOffset" => [[N, N]],
  ReadBuffer = "readBuffer" => [[E]],
  ReadPixels = "readPixels" => [[N, N, N, N, E, E, O], [N, N, N, N, E, E, TA, N]],
  RenderbufferStorage = "renderbufferStorage" => [[E, E, N, N]],
  RenderbufferStorageMultisample = "renderbufferStorageMultisample" => [[E, N, E, N, N]],
  ResumeTransformFeedback = "resumeTransformFeedback" => [[]],
  SampleCoverage = "sampleCoverage" => [[N, O]],
  SamplerParameterf = "samplerParameterf" => [[O, E, P1]],
  SamplerParameteri = "samplerParameteri" => [[O, E, P1]],
  Scissor = "scissor" => [[N, N, N, N]],
  ShaderSource = "shaderSource" => [[O, O]],
  StencilFunc = "stencilFunc" => [[E, N, N]],
  StencilFuncSeparate = "stencilFuncSeparate" => [[E, E, N, N]],
  StencilMask = "stencilMask" => [[N]],
  StencilMaskSeparate = "stencilMaskSeparate" => [[E, N]],
  StencilOp = "stencilOp" => [[E, E, E]],
  StencilOpSeparate = "stencilOpSeparate" => [[E, E, E, E]],
  TexImage2D = "texImage2D" => [
    [E, N, E, E, E, O],
    [E, N, E, N, N, N, E, E, O],
    [E, N, E, N, N, N, E, E, TA, N],
  ],
  TexImage3D = "texImage3D" => [
    [E, N, E, N, N, N, N, E, E, O],
    [E, N, E, N, N, N, N, E, E, TA, N],
  ],
  TexParameterf = "texParameterf" => [[E, E, P1]],
  TexParameteri = "texParameteri" => [[E, E, P1]],
  TexStorage2D = "texStorage2D" => [[E, N, E, N, N]],
  TexStorage3D = "texStorage3D" => [[E, N, E, N, N, N]],
  TexSubImage2D = "texSubImage2D" => [
    [E, N, N, N, E, E, O],
    [E, N, N, N, N, N, E, E, O],
    [E, N, N, N, N, N, E, E, TA, N],
  ],
  TexSubImage3D = "texSubImage3D" => [
    [E, N, N, N, N, N, N, N, E, E, O],
    [E, N, N, N, N, N, N, N, E, E, TA, N],
  ],
  TransformFeedbackVaryings = "transformFeedbackVaryings" => [[O, O, E]],
  Uniform1f = "uniform1f" => [[O, N]],
  Uniform1fv = "uniform1fv" => [[O, UF], [O, UF, N], [O, UF, N, N]],
  Uniform1i = "uniform1i" => [[O, N]],
  Uniform1iv = "uniform1iv" => [[O, UI], [O, UI, N], [O, UI, N, N]],
  Uniform1ui = "uniform1ui" => [[O, N]],
  Uniform1uiv = "uniform1uiv" => [[O, UI], [O, UI, N], [O, UI, N, N]],
  Uniform2f = "uniform2f" => [[O, N, N]],
  Uniform2fv = "uniform2fv" => [[O, UF], [O, UF, N], [O, UF, N, N]],
  Uniform2i = "uniform2i" => [[O, N, N]],
  Uniform2iv = "uniform2iv" => [[O, UI], [O, UI, N], [O, UI, N, N]],
  Uniform2ui = "uniform2ui" => [[O, N, N]],
  Uniform2uiv = "uniform2uiv" => [[O, UI], [O, UI, N], [O, UI, N, N]],
  Uniform3f = "uniform3f" => [[O, N, N, N]],
  Uniform3fv = "uniform3fv" => [[O, UF], [O, UF, N], [O, UF, N, N]],
  Uniform3i = "uniform3i" => [[O, N, N, N]],
  Uniform3iv = "uniform3iv" => [[O, UI], [O, UI, N], [O, UI, N, N]],
  Uniform3ui = "uniform3ui" => [[O, N, N, N]],
  Uniform3uiv = "uniform3uiv" => [[O, UI], [O, UI, N], [O, UI, N, N]],
  Uniform4f = "uniform4f" => [[O, N, N, N, N]],
  Uniform4fv = "uniform4fv" => [[O, UF], [O, UF, N], [O, UF, N, N]],
  Uniform4i = "uniform4i" => [[O, N, N, N, N]],
  Uniform4iv = "uniform4iv" => [[O, UI], [O, UI, N], [O, UI, N, N]],
  Uniform4ui = "uniform4ui" => [[O, N, N, N, N]],
  Uniform4uiv = "uniform4uiv" => [[O, UI], [O, UI, N], [O, UI, N, N]],
  UniformBlockBinding = "uniformBlockBinding" => [[O, N, N]],
  UniformMatrix2fv = "uniformMatrix2fv" => [[O, O, UF], [O, O, UF, N], [O, O, UF, N, N]],
  UniformMatrix2x3fv = "uniformMatrix2x3fv" => [[O, O, UF], [O, O, UF, N], [O, O, UF, N, N]],
  UniformMatrix2x4fv = "uniformMatrix2x4fv" => [[O, O, UF], [O, O, UF, N], [O, O, UF, N, N]],
  UniformMatrix3fv = "uniformMatrix3fv" => [[O, O, UF], [O, O, UF, N], [O, O, UF, N, N]],
  UniformMatrix3x2fv = "uniformMatrix3x2fv" => [[O, O, UF], [O, O, UF, N], [O, O, UF, N, N]],
  UniformMatrix3x4fv = "uniformMatrix3x4fv" => [[O, O, UF], [O, O, UF, N], [O, O, UF, N, N]],
  UniformMatrix4fv = "uniformMatrix4fv" => [[O, O, UF], [O, O, UF, N], [O, O, UF, N, N]],
  UniformMatrix4x2fv = "uniformMatrix4x2fv" => [[O, O, UF], [O, O, UF, N], [O, O, UF, N, N]],
  UniformMatrix4x3fv = "uniformMatrix4x3fv" => [[O, O, UF], [O, O, UF, N], [O, O, UF, N, N]],
  UseProgram = "useProgram" => [[O]],
  ValidateProgram = "validateProgram" => [[O]],
  VertexAttrib1f = "vertexAttrib1f" => [[N, N]],
  VertexAttrib1fv = "vertexAttrib1fv" => [[N, A]],
  VertexAttrib2f = "vertexAttrib2f" => [[N, N, N]],
  VertexAttrib2fv = "vertexAttrib2fv" => [[N, A]],
  VertexAttrib3f = "vertexAttrib3f" => [[N, N, N, N]],
  VertexAttrib3fv = "vertexAttrib3fv" => [[N, A]],
  VertexAttrib4f = "vertexAttrib4f" => [[N, N, N, N, N]],
  VertexAttrib4fv = "vertexAttrib4fv" => [[N, A]],
  VertexAttribDivisor = "vertexAttribDivisor" => [[N, N]],
  VertexAttribDivisorAngle = "vertexAttribDivisorANGLE" => [[N, N]],
  VertexAttribI4i = "vertexAttribI4i" => [[N, N, N, N, N]],
  VertexAttribI4iv = "vertexAttribI4iv" => [[N, A]],
  VertexAttribI4ui = "vertexAttribI4ui" => [[N, N, N, N, N]],
  VertexAttribI4uiv = "vertexAttribI4uiv" => [[N, A]],
  VertexAttribIPointer = "vertexAttribIPointer" => [[N, N, E, N, N]],
  VertexAttribPointer = "vertexAttribPointer" => [[N, N, E, O, N, N]],
  Viewport = "viewport" => [[N, N, N, N]],
  WaitSync = "waitSync" => [[O, N, N]],
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn names_round_trip_for_every_variant() {
    for &entry in EntryPoint::VARIANTS {
      assert_eq!(EntryPoint::from_name(entry.name()), Some(entry));
    }
    assert_eq!(
      EntryPoint::from_name("drawArraysInstancedANGLE"),
      Some(EntryPoint::DrawArraysInstancedAngle)
    );
    assert_eq!(EntryPoint::from_name("notAnEntryPoint"), None);
  }

  #[test]
  fn overloads_have_distinct_arities() {
    for &entry in EntryPoint::VARIANTS {
      let arities: BTreeSet<usize> = entry.overloads().iter().map(|o| o.len()).collect();
      assert_eq!(arities.len(), entry.overloads().len(), "{}", entry);
    }
  }

  #[test]
  fn looks_up_overloads_by_arity() {
    assert_eq!(EntryPoint::BufferData.overload(3).map(|o| o.len()), Some(3));
    assert!(EntryPoint::BufferData.overload(2).is_none());
    assert!(EntryPoint::CreateBuffer.overload(0).is_some());
  }
}
