//! Output filename templates
//!
//! Templates are relative file names with two placeholders:
//! - `[name]`: logical name (entry key or module name)
//! - `[contenthash]`: truncated content hash of the emitted bytes

use std::fmt;

use crate::error::{Result, config as config_error};
use crate::path_utils;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Name,
    ContentHash,
}

/// A parsed filename template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl FilenameTemplate {
    /// Parse a template, rejecting unknown placeholders and paths that leave
    /// the output directory
    pub fn parse(template: &str) -> Result<Self> {
        if template.trim().is_empty() {
            return Err(config_error::invalid("filename template must not be empty"));
        }
        if template.ends_with('/') || template.ends_with('\\') {
            return Err(config_error::invalid(format!(
                "filename template '{template}' must name a file, not a directory"
            )));
        }
        if path_utils::escapes_base(template) {
            return Err(config_error::invalid(format!(
                "filename template '{template}' must stay inside the output directory"
            )));
        }
        let directory = template.rfind(['/', '\\']).map_or("", |sep| &template[..sep]);
        if directory.contains("[contenthash]") {
            return Err(config_error::invalid(format!(
                "filename template '{template}' may only use [contenthash] in the file name"
            )));
        }

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = template;

        while let Some(open) = rest.find('[') {
            literal.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let Some(close) = after.find(']') else {
                return Err(config_error::invalid(format!(
                    "filename template '{template}' has an unterminated placeholder"
                )));
            };

            let segment = match &after[..close] {
                "name" => Segment::Name,
                "contenthash" => Segment::ContentHash,
                other => {
                    return Err(config_error::invalid(format!(
                        "filename template '{template}' uses unknown placeholder '[{other}]' \
                         (supported: [name], [contenthash])"
                    )));
                }
            };

            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(segment);
            rest = &after[close + 1..];
        }
        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: template.to_string(),
            segments,
        })
    }

    /// Whether the template contains `[name]`
    pub fn uses_name(&self) -> bool {
        self.segments.contains(&Segment::Name)
    }

    /// Whether the template contains `[contenthash]`
    pub fn uses_hash(&self) -> bool {
        self.segments.contains(&Segment::ContentHash)
    }

    /// Render the template into a relative file name
    pub fn render(&self, name: &str, hash: &str) -> String {
        self.segments
            .iter()
            .map(|s| match s {
                Segment::Literal(text) => text.as_str(),
                Segment::Name => name,
                Segment::ContentHash => hash,
            })
            .collect()
    }

    /// The template text as written
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for FilenameTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_name_only() {
        let t = FilenameTemplate::parse("[name].js").unwrap();
        assert_eq!(t.render("index", "abc"), "index.js");
        assert!(t.uses_name());
        assert!(!t.uses_hash());
    }

    #[test]
    fn test_render_name_and_hash() {
        let t = FilenameTemplate::parse("[name].[contenthash].js").unwrap();
        assert_eq!(t.render("index", "0123abcd"), "index.0123abcd.js");
        assert!(t.uses_hash());
    }

    #[test]
    fn test_render_hash_prefix_and_subdir() {
        let t = FilenameTemplate::parse("wasm/[contenthash].module.wasm").unwrap();
        assert_eq!(t.render("app", "ff00"), "wasm/ff00.module.wasm");
        assert!(!t.uses_name());
    }

    #[test]
    fn test_literal_only() {
        let t = FilenameTemplate::parse("app.js").unwrap();
        assert_eq!(t.render("ignored", "ignored"), "app.js");
        assert_eq!(t.as_str(), "app.js");
    }

    #[test]
    fn test_unknown_placeholder_rejected() {
        let err = FilenameTemplate::parse("[name].[hash].js").unwrap_err();
        assert!(err.to_string().contains("[hash]"));
    }

    #[test]
    fn test_unterminated_placeholder_rejected() {
        assert!(FilenameTemplate::parse("[name.js").is_err());
    }

    #[test]
    fn test_escaping_template_rejected() {
        assert!(FilenameTemplate::parse("../[name].js").is_err());
        assert!(FilenameTemplate::parse("/abs/[name].js").is_err());
    }

    #[test]
    fn test_hash_in_directory_rejected() {
        assert!(FilenameTemplate::parse("[contenthash]/[name].js").is_err());
        assert!(FilenameTemplate::parse("[name]/[contenthash].js").is_ok());
    }

    #[test]
    fn test_empty_and_directory_templates_rejected() {
        assert!(FilenameTemplate::parse("").is_err());
        assert!(FilenameTemplate::parse("js/").is_err());
    }
}
