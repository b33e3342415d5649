//! Shader Source Provider
//!
//! The pipeline requests raw WGSL text through the [`ShaderSources`]
//! trait, keyed by an identifier plus a [`ShaderStage`]. The attribute
//! and uniform names the pipeline binds against (`position` at location
//! 0, `color` at location 1, the `projection` and `model_view` matrices)
//! are fixed by contract with the provider.
//!
//! [`EmbeddedShaders`] is the default implementation, serving the WGSL
//! files embedded from `src/renderer/shaders/` at build time.

use std::borrow::Cow;
use std::fmt;

use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "src/renderer/shaders"]
struct ShaderAssets;

/// Identifier of the built-in scene shader pair.
pub const SCENE_SHADER_ID: &str = "scene";

/// The two programmable pipeline stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// File name suffix used by the embedded provider
    /// (`<id>.vert.wgsl` / `<id>.frag.wgsl`).
    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Vertex => "vert",
            Self::Fragment => "frag",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex => f.write_str("vertex"),
            Self::Fragment => f.write_str("fragment"),
        }
    }
}

/// Supplies raw shader source text by identifier and stage.
///
/// Returning `None` means the provider has no source under that key,
/// which the pipeline treats as a fatal initialization error.
pub trait ShaderSources {
    fn source(&self, id: &str, stage: ShaderStage) -> Option<Cow<'static, str>>;
}

/// Default provider backed by the WGSL files embedded in the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedShaders;

impl ShaderSources for EmbeddedShaders {
    fn source(&self, id: &str, stage: ShaderStage) -> Option<Cow<'static, str>> {
        let file = ShaderAssets::get(&format!("{id}.{}.wgsl", stage.suffix()))?;
        match file.data {
            Cow::Borrowed(bytes) => std::str::from_utf8(bytes).ok().map(Cow::Borrowed),
            Cow::Owned(bytes) => String::from_utf8(bytes).ok().map(Cow::Owned),
        }
    }
}
