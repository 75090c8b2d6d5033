//! Reflection tree as emitted by TypeDoc's JSON output.
//!
//! Only the fields the extractor reads are modelled; everything else in the
//! document is ignored.

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};

/// Root of the reflection document.
#[derive(Debug, Default, Deserialize)]
pub struct Project {
    #[serde(default, deserialize_with = "null_as_default")]
    pub children: Vec<ReflectionNode>,
}

/// A file section, module, or member.
#[derive(Debug, Default, Deserialize)]
pub struct ReflectionNode {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub kind: ReflectionKind,
    pub children: Option<Vec<ReflectionNode>>,
    pub comment: Option<Comment>,
    pub signatures: Option<Vec<Signature>>,
}

/// TypeDoc `ReflectionKind` bit values.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "u32")]
pub enum ReflectionKind {
    ExternalModule,
    Module,
    Variable,
    Function,
    Class,
    Interface,
    Constructor,
    Property,
    Method,
    Accessor,
    TypeAlias,
    Other(u32),
    #[default]
    Unknown,
}

impl From<u32> for ReflectionKind {
    fn from(value: u32) -> Self {
        match value {
            1 => ReflectionKind::ExternalModule,
            2 => ReflectionKind::Module,
            32 => ReflectionKind::Variable,
            64 => ReflectionKind::Function,
            128 => ReflectionKind::Class,
            256 => ReflectionKind::Interface,
            512 => ReflectionKind::Constructor,
            1024 => ReflectionKind::Property,
            2048 => ReflectionKind::Method,
            262_144 => ReflectionKind::Accessor,
            4_194_304 => ReflectionKind::TypeAlias,
            other => ReflectionKind::Other(other),
        }
    }
}

/// Structured doc comment.
#[derive(Debug, Default, Deserialize)]
pub struct Comment {
    #[serde(rename = "shortText")]
    pub short_text: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<CommentTag>,
}

/// A `@tag text` annotation inside a comment.
#[derive(Debug, Default, Deserialize)]
pub struct CommentTag {
    #[serde(default, deserialize_with = "null_as_default")]
    pub tag: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
}

/// Call signature of a function or method.
#[derive(Debug, Default, Deserialize)]
pub struct Signature {
    pub comment: Option<Comment>,
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse a reflection document.
pub fn parse_project(json: &str) -> Result<Project> {
    serde_json::from_str(json).context("failed to parse reflection JSON")
}
