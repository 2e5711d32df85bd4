//! Closed set of icon identifiers for skills and profile links.
//!
//! Stored icon keys are free text; anything unrecognized resolves to
//! `Icon::Generic` instead of failing the page.

use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    Github,
    Linkedin,
    Twitter,
    Email,
    Website,
    Youtube,
    Instagram,
    Rust,
    Typescript,
    Javascript,
    Python,
    React,
    Nodejs,
    Docker,
    Postgresql,
    Mongodb,
    Git,
    Aws,
    Go,
    Java,
    Html,
    Css,
    Generic,
}

impl Icon {
    /// Resolves a stored key. Case, surrounding whitespace, spaces, dots and
    /// dashes are ignored, and a few common spellings are accepted.
    pub fn from_key(key: &str) -> Self {
        let normalized: String = key
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '.' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "github" => Icon::Github,
            "linkedin" => Icon::Linkedin,
            "twitter" | "x" => Icon::Twitter,
            "email" | "mail" | "gmail" => Icon::Email,
            "website" | "web" | "globe" | "portfolio" => Icon::Website,
            "youtube" => Icon::Youtube,
            "instagram" => Icon::Instagram,
            "rust" => Icon::Rust,
            "typescript" | "ts" => Icon::Typescript,
            "javascript" | "js" => Icon::Javascript,
            "python" | "py" => Icon::Python,
            "react" | "reactjs" => Icon::React,
            "nodejs" | "node" => Icon::Nodejs,
            "docker" => Icon::Docker,
            "postgresql" | "postgres" => Icon::Postgresql,
            "mongodb" | "mongo" => Icon::Mongodb,
            "git" => Icon::Git,
            "aws" | "amazonwebservices" => Icon::Aws,
            "go" | "golang" => Icon::Go,
            "java" => Icon::Java,
            "html" | "html5" => Icon::Html,
            "css" | "css3" => Icon::Css,
            _ => {
                warn!("Unknown icon key {key:?}, using the generic icon");
                Icon::Generic
            }
        }
    }
}
