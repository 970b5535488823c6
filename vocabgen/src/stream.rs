//! Statement-stream production over the workspace RDF stack.
//!
//! This is the only module that touches sophia. Parsed triples/quads are
//! mapped onto the crate's own [`Statement`] boundary type and folded
//! straight into a [`Classification`]; nothing is materialized into a graph.
//! Malformed documents surface as [`Error::Parse`], distinct from the
//! fetcher's I/O errors.
//!
//! Sophia's parsers expose no namespace-declaration callback, so Turtle and
//! TriG input gets a structural line scan for `@prefix`/`PREFIX`
//! declarations before parsing; matches are replayed into the classifier.

use sophia_api::parser::{QuadParser, TripleParser};
use sophia_api::quad::Quad;
use sophia_api::source::{QuadSource, TripleSource};
use sophia_api::term::{Term, TermKind};
use sophia_api::triple::Triple;
use sophia_turtle::parser::nq::NQuadsParser;
use sophia_turtle::parser::nt::NTriplesParser;
use sophia_turtle::parser::trig::TriGParser;
use sophia_turtle::parser::turtle::TurtleParser;

use crate::classify::Classification;
use crate::error::{Error, Result};
use crate::fetch::Format;
use crate::model::{Object, Statement};

/// Parses one document and folds every statement into the accumulator.
///
/// # Errors
///
/// Returns [`Error::Parse`] when the producer rejects the document.
pub fn feed_document(
    locator: &str,
    format: Format,
    content: &str,
    accumulator: &mut Classification,
) -> Result<()> {
    if matches!(format, Format::Turtle | Format::TriG) {
        scan_prefix_declarations(content, accumulator);
    }

    let parse_error = |message: String| Error::Parse {
        locator: locator.to_string(),
        message,
    };

    match format {
        Format::Turtle => TurtleParser { base: None }
            .parse_str(content)
            .for_each_triple(|t| feed_triple(&t, accumulator))
            .map_err(|e| parse_error(e.to_string())),
        Format::NTriples => NTriplesParser {}
            .parse_str(content)
            .for_each_triple(|t| feed_triple(&t, accumulator))
            .map_err(|e| parse_error(e.to_string())),
        Format::TriG => TriGParser { base: None }
            .parse_str(content)
            .for_each_quad(|q| feed_quad(&q, accumulator))
            .map_err(|e| parse_error(e.to_string())),
        Format::NQuads => NQuadsParser {}
            .parse_str(content)
            .for_each_quad(|q| feed_quad(&q, accumulator))
            .map_err(|e| parse_error(e.to_string())),
    }
}

fn feed_triple<T: Triple>(triple: &T, accumulator: &mut Classification) {
    if let Some(statement) = to_statement(triple.s(), triple.p(), triple.o()) {
        accumulator.observe(&statement);
    }
}

fn feed_quad<Q: Quad>(quad: &Q, accumulator: &mut Classification) {
    if let Some(statement) = to_statement(quad.s(), quad.p(), quad.o()) {
        accumulator.observe(&statement);
    }
}

/// Maps one parsed triple onto the boundary type. Blank-node subjects and
/// non-IRI predicates yield `None` and are skipped.
fn to_statement<S: Term, P: Term, O: Term>(s: S, p: P, o: O) -> Option<Statement> {
    let subject = s.iri()?.as_str().to_string();
    let predicate = p.iri()?.as_str().to_string();
    let object = match o.kind() {
        TermKind::Iri => Object::Iri(o.iri()?.as_str().to_string()),
        TermKind::Literal => Object::Literal {
            value: o.lexical_form()?.to_string(),
            datatype: o.datatype().map(|dt| dt.as_str().to_string()),
        },
        _ => return None,
    };
    Some(Statement {
        subject,
        predicate,
        object,
    })
}

/// Replays `@prefix` / `PREFIX` declarations into the classifier.
///
/// Handles the two Turtle spellings, one declaration per line:
/// `@prefix ex: <http://example.org/> .` and
/// `PREFIX ex: <http://example.org/>`.
fn scan_prefix_declarations(content: &str, accumulator: &mut Classification) {
    for line in content.lines() {
        let trimmed = line.trim_start();
        let rest = if let Some(rest) = trimmed.strip_prefix("@prefix") {
            rest
        } else if let Some(rest) = trimmed.strip_prefix("PREFIX") {
            rest
        } else {
            continue;
        };
        let Some((prefix, rest)) = rest.trim_start().split_once(':') else {
            continue;
        };
        let rest = rest.trim_start();
        let Some(rest) = rest.strip_prefix('<') else {
            continue;
        };
        let Some((iri, _)) = rest.split_once('>') else {
            continue;
        };
        accumulator.observe_namespace(prefix.trim(), iri);
    }
}
