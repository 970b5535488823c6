//! Core vocabulary model types.
//!
//! These types carry a vocabulary through the pipeline: the caller-supplied
//! [`VocabularySource`], the per-statement [`Statement`] boundary type fed to
//! the classifier, and the [`EntityRecord`] sequence packaged into a
//! [`VocabularyModel`] for rendering.

/// A vocabulary reference as supplied by the caller.
///
/// `prefix` and `namespace` may be left unset; the classifier fills them in
/// from document evidence (`vann:` assertions or a matching namespace
/// declaration). The classifier never mutates this value; it returns a
/// [`ResolvedVocabulary`] copy instead.
#[derive(Debug, Clone)]
pub struct VocabularySource {
    /// Locator of the vocabulary document: an `http(s)` URL, a `file` URL,
    /// or a plain filesystem path.
    pub url: String,
    /// Short alias for the namespace (e.g. `"foaf"`).
    pub prefix: Option<String>,
    /// Common IRI stem of the vocabulary's resources.
    pub namespace: Option<String>,
}

impl VocabularySource {
    /// Creates a source with neither prefix nor namespace set.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            prefix: None,
            namespace: None,
        }
    }
}

/// Vocabulary metadata after classification: the locator plus whatever
/// prefix/namespace evidence was supplied or inferred. First write wins;
/// once set the fields are never overwritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVocabulary {
    /// Locator the document was fetched from.
    pub locator: String,
    /// Resolved prefix, if any evidence produced one.
    pub prefix: Option<String>,
    /// Resolved namespace, if any evidence produced one.
    pub namespace: Option<String>,
}

/// The object position of a statement: an IRI or a typed literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Object {
    /// An absolute IRI reference.
    Iri(String),
    /// A literal value with an optional datatype IRI.
    Literal {
        /// Lexical form of the literal.
        value: String,
        /// Datatype IRI, absent for plain literals.
        datatype: Option<String>,
    },
}

impl Object {
    /// Returns the IRI if the object is one.
    #[must_use]
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Object::Iri(iri) => Some(iri),
            Object::Literal { .. } => None,
        }
    }

    /// Returns the textual value of the object: the lexical form of a
    /// literal, or the IRI itself.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Object::Iri(iri) => iri,
            Object::Literal { value, .. } => value,
        }
    }

    /// Returns true for a boolean literal whose value is true.
    ///
    /// Accepts the two XSD boolean lexical forms `true` and `1`. An IRI
    /// object is never true.
    #[must_use]
    pub fn is_true(&self) -> bool {
        match self {
            Object::Literal { value, datatype } => {
                let boolean = datatype
                    .as_deref()
                    .is_none_or(|dt| dt == iris::XSD_BOOLEAN);
                boolean && (value == "true" || value == "1")
            }
            Object::Iri(_) => false,
        }
    }
}

/// A single subject–predicate–object statement from the stream producer.
///
/// Ephemeral: statements are inspected once by the classifier and never
/// stored beyond its bookkeeping sets.
#[derive(Debug, Clone)]
pub struct Statement {
    /// Absolute IRI of the subject.
    pub subject: String,
    /// Absolute IRI of the predicate.
    pub predicate: String,
    /// Object: IRI or literal.
    pub object: Object,
}

/// Whether an entity was asserted as a class or a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityRole {
    /// `owl:Class` or `rdfs:Class`.
    Class,
    /// `owl:ObjectProperty`, `owl:DatatypeProperty`, or `rdf:Property`.
    Property,
}

/// One resolved output entity: a name-safe constant candidate.
///
/// Immutable once emitted. Within one resolver output no two records share
/// a name under case-insensitive comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRecord {
    /// Absolute IRI of the entity.
    pub iri: String,
    /// Collision-free output name derived from the IRI's local name.
    pub name: String,
    /// Class or property.
    pub role: EntityRole,
    /// True when the vocabulary flags the entity `owl:deprecated`.
    pub deprecated: bool,
}

/// The assembled model handed to the renderer: vocabulary metadata plus the
/// resolved entity sequence. Performs no further transformation.
#[derive(Debug, Clone)]
pub struct VocabularyModel {
    /// Resolved prefix (always present by assembly time).
    pub prefix: String,
    /// Resolved namespace, when one was supplied or inferred.
    pub namespace: Option<String>,
    /// Locator the document came from.
    pub locator: String,
    /// Resolved entities in discovery order: classes first, then properties.
    pub entities: Vec<EntityRecord>,
}

impl VocabularyModel {
    /// Canonical artifact file name: the prefix upper-cased, as a Rust module
    /// file (`foaf` → `FOAF.rs`).
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.rs", self.prefix.to_uppercase())
    }
}

/// Extracts the local name from a full IRI (after the last `/` or `#`).
#[must_use]
pub fn local_name(iri: &str) -> &str {
    let after_slash = iri.rsplit('/').next().unwrap_or(iri);
    after_slash.rsplit('#').next().unwrap_or(after_slash)
}

/// Returns the namespace segment of an IRI: everything up to and including
/// the last `/` or `#`.
#[must_use]
pub fn namespace_of(iri: &str) -> &str {
    &iri[..iri.len() - local_name(iri).len()]
}

/// Well-known IRIs consulted by the statement classifier.
pub mod iris {
    /// `rdf:type`.
    pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    /// `rdf:Property`.
    pub const RDF_PROPERTY: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Property";
    /// `rdfs:Class`.
    pub const RDFS_CLASS: &str = "http://www.w3.org/2000/01/rdf-schema#Class";
    /// `owl:Class`.
    pub const OWL_CLASS: &str = "http://www.w3.org/2002/07/owl#Class";
    /// `owl:ObjectProperty`.
    pub const OWL_OBJECT_PROPERTY: &str = "http://www.w3.org/2002/07/owl#ObjectProperty";
    /// `owl:DatatypeProperty`.
    pub const OWL_DATATYPE_PROPERTY: &str = "http://www.w3.org/2002/07/owl#DatatypeProperty";
    /// `owl:deprecated`.
    pub const OWL_DEPRECATED: &str = "http://www.w3.org/2002/07/owl#deprecated";
    /// `vann:preferredNamespaceUri`.
    pub const VANN_PREFERRED_NAMESPACE_URI: &str =
        "http://purl.org/vocab/vann/preferredNamespaceUri";
    /// `vann:preferredNamespacePrefix`.
    pub const VANN_PREFERRED_NAMESPACE_PREFIX: &str =
        "http://purl.org/vocab/vann/preferredNamespacePrefix";
    /// `xsd:boolean`.
    pub const XSD_BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_name_extraction() {
        assert_eq!(local_name("http://xmlns.com/foaf/0.1/Person"), "Person");
        assert_eq!(
            local_name("http://www.w3.org/2001/XMLSchema#string"),
            "string"
        );
    }

    #[test]
    fn namespace_extraction() {
        assert_eq!(
            namespace_of("http://xmlns.com/foaf/0.1/Person"),
            "http://xmlns.com/foaf/0.1/"
        );
        assert_eq!(
            namespace_of("http://www.w3.org/2001/XMLSchema#string"),
            "http://www.w3.org/2001/XMLSchema#"
        );
    }

    #[test]
    fn boolean_literals() {
        let plain = Object::Literal {
            value: "true".to_string(),
            datatype: None,
        };
        let typed = Object::Literal {
            value: "1".to_string(),
            datatype: Some(iris::XSD_BOOLEAN.to_string()),
        };
        let falsy = Object::Literal {
            value: "false".to_string(),
            datatype: Some(iris::XSD_BOOLEAN.to_string()),
        };
        assert!(plain.is_true());
        assert!(typed.is_true());
        assert!(!falsy.is_true());
        assert!(!Object::Iri("http://example.org/true".to_string()).is_true());
    }

    #[test]
    fn artifact_file_name_uppercases_prefix() {
        let model = VocabularyModel {
            prefix: "foaf".to_string(),
            namespace: None,
            locator: "http://xmlns.com/foaf/0.1/".to_string(),
            entities: Vec::new(),
        };
        assert_eq!(model.file_name(), "FOAF.rs");
    }
}
