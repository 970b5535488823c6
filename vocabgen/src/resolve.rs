//! Identifier resolution: from classified IRIs to collision-free names.
//!
//! Classes are named by their IRI local name and emitted first, in discovery
//! order. Properties follow, also in discovery order, renamed to
//! `has_<local>` when a class already claims the local name
//! case-insensitively; a property whose candidate name still collides with
//! any emitted name is handled by [`admit_candidate`].

use crate::classify::ClassificationOutcome;
use crate::model::{local_name, EntityRecord, EntityRole};

/// Resolves the classifier's outcome into the final entity sequence.
///
/// With `include_deprecated` unset, deprecated identifiers are removed from
/// both sets before naming; with it set they are kept and marked. The result
/// is deterministic for a given outcome and flag: running it twice yields an
/// identical sequence.
#[must_use]
pub fn resolve(outcome: &ClassificationOutcome, include_deprecated: bool) -> Vec<EntityRecord> {
    let is_deprecated = |iri: &str| outcome.deprecated.iter().any(|d| d == iri);
    let visible = |iri: &&String| include_deprecated || !is_deprecated(iri);

    let classes: Vec<&str> = outcome
        .classes
        .iter()
        .filter(visible)
        .map(String::as_str)
        .collect();
    let properties: Vec<&str> = outcome
        .properties
        .iter()
        .filter(visible)
        .map(String::as_str)
        .collect();

    let mut records = Vec::with_capacity(classes.len() + properties.len());

    for iri in &classes {
        // Classes are deduplicated by IRI only: two classes whose local
        // names are case-insensitively equal both survive here and collide
        // downstream. Known limitation, left as-is.
        records.push(EntityRecord {
            iri: (*iri).to_string(),
            name: local_name(iri).to_string(),
            role: EntityRole::Class,
            deprecated: is_deprecated(iri),
        });
    }

    for iri in &properties {
        let local = local_name(iri);
        let shadows_class = classes
            .iter()
            .any(|c| eq_ignore_case(local_name(c), local));
        let candidate = if shadows_class {
            format!("has_{local}")
        } else {
            local.to_string()
        };
        if let Some(name) = admit_candidate(candidate, &records) {
            records.push(EntityRecord {
                iri: (*iri).to_string(),
                name,
                role: EntityRole::Property,
                deprecated: is_deprecated(iri),
            });
        }
    }

    records
}

/// Name-clash policy for properties.
///
/// A candidate that matches an already-emitted name case-insensitively is
/// silently dropped; real-world vocabularies carry case-variant synonyms
/// (foaf `givenName` / `givenname`) that would otherwise produce duplicate
/// constants. Alternative strategies (error out, rename with a suffix) slot
/// in here without touching classification.
fn admit_candidate(candidate: String, emitted: &[EntityRecord]) -> Option<String> {
    if emitted.iter().any(|r| eq_ignore_case(&r.name, &candidate)) {
        None
    } else {
        Some(candidate)
    }
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
