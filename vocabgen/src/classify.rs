//! Single-pass statement classification.
//!
//! [`Classification`] is an explicit fold: the stream producer calls
//! [`observe`](Classification::observe) once per statement, in stream order,
//! and [`finish`](Classification::finish) returns the accumulated entity
//! sets together with a resolved copy of the vocabulary metadata. The
//! caller's [`VocabularySource`] is read once at construction and never
//! mutated.
//!
//! Each statement is matched against a fixed decision table, top to bottom,
//! first match wins:
//!
//! 1. `vann:preferredNamespaceUri` while the namespace is unset → set it.
//! 2. `vann:preferredNamespacePrefix` while the prefix is unset → set it.
//! 3. Subject outside the resolved namespace → ignored.
//! 4. `rdf:type` with `owl:Class`/`rdfs:Class` → file subject as a class.
//! 5. `rdf:type` with `owl:ObjectProperty`/`owl:DatatypeProperty`/
//!    `rdf:Property` → file subject as a property.
//! 6. `owl:deprecated true` → file subject as deprecated.
//!
//! A subject is filed at most once across classes and properties: the class
//! row is evaluated first, so a subject asserted as both is deterministically
//! a class. Prefix and namespace are first-write-wins, whether the evidence
//! is a caller override, a `vann:` assertion, or a namespace declaration.

use crate::model::{iris, namespace_of, ResolvedVocabulary, Statement, VocabularySource};

/// Accumulator for one vocabulary's statement stream.
#[derive(Debug)]
pub struct Classification {
    locator: String,
    prefix: Option<String>,
    namespace: Option<String>,
    classes: Vec<String>,
    properties: Vec<String>,
    deprecated: Vec<String>,
}

/// Everything the classifier accumulated: ordered, deduplicated entity sets
/// plus the resolved vocabulary metadata.
#[derive(Debug)]
pub struct ClassificationOutcome {
    /// Resolved vocabulary metadata (locator, prefix, namespace).
    pub vocabulary: ResolvedVocabulary,
    /// Class subjects, in first-discovery order.
    pub classes: Vec<String>,
    /// Property subjects, in first-discovery order. Disjoint from `classes`.
    pub properties: Vec<String>,
    /// Subjects flagged `owl:deprecated true`, in first-discovery order.
    pub deprecated: Vec<String>,
}

impl Classification {
    /// Seeds the accumulator from a caller-supplied source. Caller-supplied
    /// prefix/namespace count as the first write.
    #[must_use]
    pub fn new(source: &VocabularySource) -> Self {
        Self {
            locator: source.url.clone(),
            prefix: source.prefix.clone(),
            namespace: source.namespace.clone(),
            classes: Vec::new(),
            properties: Vec::new(),
            deprecated: Vec::new(),
        }
    }

    /// Folds one statement into the accumulator.
    pub fn observe(&mut self, statement: &Statement) {
        let Statement {
            subject,
            predicate,
            object,
        } = statement;

        if predicate == iris::VANN_PREFERRED_NAMESPACE_URI && self.namespace.is_none() {
            self.namespace = Some(object.text().to_string());
            return;
        }
        if predicate == iris::VANN_PREFERRED_NAMESPACE_PREFIX && self.prefix.is_none() {
            self.prefix = Some(object.text().to_string());
            return;
        }
        if let Some(namespace) = &self.namespace {
            // Out-of-vocabulary noise: other namespaces' subjects are not
            // extraction candidates.
            if namespace_of(subject) != namespace {
                return;
            }
        }
        if predicate == iris::RDF_TYPE {
            match object.as_iri() {
                Some(iris::OWL_CLASS | iris::RDFS_CLASS) => {
                    if !self.filed(subject) {
                        self.classes.push(subject.clone());
                    }
                    return;
                }
                Some(
                    iris::OWL_OBJECT_PROPERTY | iris::OWL_DATATYPE_PROPERTY | iris::RDF_PROPERTY,
                ) => {
                    if !self.filed(subject) {
                        self.properties.push(subject.clone());
                    }
                    return;
                }
                _ => {}
            }
        }
        if predicate == iris::OWL_DEPRECATED
            && object.is_true()
            && !self.deprecated.contains(subject)
        {
            self.deprecated.push(subject.clone());
        }
    }

    /// Consumes a namespace declaration from the producer. A prefix bound to
    /// an IRI equal to the source locator seeds still-unset metadata.
    pub fn observe_namespace(&mut self, prefix: &str, iri: &str) {
        if iri != self.locator {
            return;
        }
        if self.prefix.is_none() {
            self.prefix = Some(prefix.to_string());
        }
        if self.namespace.is_none() {
            self.namespace = Some(iri.to_string());
        }
    }

    /// Finishes the fold, yielding the accumulated sets and resolved
    /// metadata.
    #[must_use]
    pub fn finish(self) -> ClassificationOutcome {
        tracing::debug!(
            locator = %self.locator,
            classes = self.classes.len(),
            properties = self.properties.len(),
            deprecated = self.deprecated.len(),
            "classification finished"
        );
        ClassificationOutcome {
            vocabulary: ResolvedVocabulary {
                locator: self.locator,
                prefix: self.prefix,
                namespace: self.namespace,
            },
            classes: self.classes,
            properties: self.properties,
            deprecated: self.deprecated,
        }
    }

    /// True when the subject is already filed as a class or a property.
    /// First classification wins, document-wide.
    fn filed(&self, subject: &str) -> bool {
        self.classes.iter().any(|c| c == subject) || self.properties.iter().any(|p| p == subject)
    }
}
