//! Rendering the assembled model into a Rust constants module.
//!
//! The renderer receives a finished [`VocabularyModel`] and a variant
//! selector; it inspects nothing beyond that. Output is a single Rust module
//! file in the register of hand-maintained vocabulary-constant crates: one
//! `pub const` per entity, namespace and prefix constants up front.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::model::{EntityRecord, VocabularyModel};

/// Rendering variants for the generated module.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputVariant {
    /// Documented constants: doc comments, `#[deprecated]` markers, and
    /// namespace/prefix constants.
    #[default]
    Modern,
    /// Bare string constants only.
    Strings,
}

impl std::str::FromStr for OutputVariant {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "modern" => Ok(OutputVariant::Modern),
            "strings" => Ok(OutputVariant::Strings),
            other => Err(format!("unknown output variant: {other}")),
        }
    }
}

/// Renders the model as a Rust source file.
#[must_use]
pub fn render(model: &VocabularyModel, variant: OutputVariant) -> String {
    let mut file = RustFile::new(&format!(
        "`{}` vocabulary constants.\n//!\n//! Generated by cargo-vocabgen {} from {}.",
        model.prefix,
        env!("CARGO_PKG_VERSION"),
        model.locator,
    ));

    let documented = variant == OutputVariant::Modern;

    if documented {
        if let Some(namespace) = &model.namespace {
            file.doc_comment(&format!(
                "Namespace IRI of the `{}` vocabulary.",
                model.prefix
            ));
            file.line(&format!("pub const NAMESPACE: &str = {namespace:?};"));
            file.blank();
        }
        file.doc_comment("Preferred prefix for the vocabulary namespace.");
        file.line(&format!("pub const PREFIX: &str = {:?};", model.prefix));
        file.blank();
    }

    for entity in &model.entities {
        if documented {
            file.doc_comment(&format!("`{}:{}` IRI.", model.prefix, entity.name));
            if entity.deprecated {
                file.line(&format!(
                    "#[deprecated(note = \"{}:{} is deprecated in the source vocabulary\")]",
                    model.prefix, entity.name
                ));
            }
        }
        file.line(&format!(
            "pub const {}: &str = {:?};",
            const_name(&entity.name),
            entity.iri
        ));
        file.blank();
    }

    file.finish()
}

/// Writes a rendered artifact, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`Error::Write`] when the file or its directories cannot be
/// created.
pub fn write_artifact(path: &Path, content: &str) -> Result<()> {
    let write_error = |source: std::io::Error| Error::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    fs::write(path, content).map_err(write_error)
}

/// Converts an entity name into a `SCREAMING_SNAKE_CASE` constant name.
pub(crate) fn const_name(name: &str) -> String {
    let mut result = String::with_capacity(name.len() + 4);
    let bytes = name.as_bytes();
    for (i, ch) in name.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                // No underscore between consecutive uppercase letters.
                let prev = bytes[i - 1] as char;
                if prev.is_lowercase() || prev.is_ascii_digit() {
                    result.push('_');
                }
            }
            result.push(ch);
        } else if ch.is_alphanumeric() || ch == '_' {
            result.extend(ch.to_uppercase());
        } else {
            result.push('_');
        }
    }
    result
}

/// Incrementally built Rust source file.
struct RustFile {
    buf: String,
}

impl RustFile {
    /// Starts a file with a `//!` header doc.
    fn new(header: &str) -> Self {
        let mut buf = String::new();
        let _ = writeln!(buf, "//! {header}");
        buf.push('\n');
        Self { buf }
    }

    fn doc_comment(&mut self, text: &str) {
        let _ = writeln!(self.buf, "/// {text}");
    }

    fn line(&mut self, line: &str) {
        let _ = writeln!(self.buf, "{line}");
    }

    fn blank(&mut self) {
        self.buf.push('\n');
    }

    /// Returns the finished source, with a single trailing newline.
    fn finish(mut self) -> String {
        while self.buf.ends_with("\n\n") {
            self.buf.pop();
        }
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EntityRole, VocabularyModel};

    fn model() -> VocabularyModel {
        VocabularyModel {
            prefix: "foaf".to_string(),
            namespace: Some("http://xmlns.com/foaf/0.1/".to_string()),
            locator: "http://xmlns.com/foaf/spec/index.ttl".to_string(),
            entities: vec![
                EntityRecord {
                    iri: "http://xmlns.com/foaf/0.1/Person".to_string(),
                    name: "Person".to_string(),
                    role: EntityRole::Class,
                    deprecated: false,
                },
                EntityRecord {
                    iri: "http://xmlns.com/foaf/0.1/givenName".to_string(),
                    name: "givenName".to_string(),
                    role: EntityRole::Property,
                    deprecated: true,
                },
            ],
        }
    }

    #[test]
    fn modern_output_is_documented() {
        let source = render(&model(), OutputVariant::Modern);
        assert!(source.contains("pub const NAMESPACE: &str = \"http://xmlns.com/foaf/0.1/\";"));
        assert!(source.contains("pub const PREFIX: &str = \"foaf\";"));
        assert!(source.contains("/// `foaf:Person` IRI."));
        assert!(source.contains("pub const PERSON: &str = \"http://xmlns.com/foaf/0.1/Person\";"));
        assert!(source.contains("#[deprecated"));
        assert!(source
            .contains("pub const GIVEN_NAME: &str = \"http://xmlns.com/foaf/0.1/givenName\";"));
    }

    #[test]
    fn strings_output_is_bare() {
        let source = render(&model(), OutputVariant::Strings);
        assert!(!source.contains("NAMESPACE"));
        assert!(!source.contains("///"));
        assert!(!source.contains("#[deprecated"));
        assert!(source.contains("pub const PERSON: &str"));
    }

    #[test]
    fn constant_names_are_screaming_snake() {
        assert_eq!(const_name("Person"), "PERSON");
        assert_eq!(const_name("givenName"), "GIVEN_NAME");
        assert_eq!(const_name("has_given"), "HAS_GIVEN");
        assert_eq!(const_name("mbox_sha1sum"), "MBOX_SHA1SUM");
        assert_eq!(const_name("dnaChecksum"), "DNA_CHECKSUM");
    }

    #[test]
    fn variant_parsing() {
        assert_eq!("modern".parse(), Ok(OutputVariant::Modern));
        assert_eq!("Strings".parse(), Ok(OutputVariant::Strings));
        assert!("legacy".parse::<OutputVariant>().is_err());
    }
}
