//! End-to-end pipeline tests over fixture documents on disk.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use vocabgen::{
    fetch_vocabulary, run, FetchOptions, Format, OutputVariant, RunOptions, VocabularySource,
};

const FIXTURE: &str = r#"
@prefix vann: <http://purl.org/vocab/vann/> .
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix ex: <http://example.org/ns/> .

<http://example.org/ns/>
    vann:preferredNamespacePrefix "ex" ;
    vann:preferredNamespaceUri "http://example.org/ns/" .

ex:Person a owl:Class .
ex:Given a owl:Class .
ex:Old a owl:Class ;
    owl:deprecated true .

ex:name a owl:DatatypeProperty .
ex:given a owl:ObjectProperty .
ex:GIVEN a owl:ObjectProperty .

# Already classified as a class; this assertion must be ignored.
ex:Person a owl:ObjectProperty .

# Out-of-vocabulary noise.
<http://other.org/Thing> a owl:Class .
"#;

fn write_fixture(dir: &std::path::Path) -> PathBuf {
    let path = dir.join("example.ttl");
    fs::write(&path, FIXTURE).unwrap();
    path
}

fn options(root: &std::path::Path, use_cache: bool) -> RunOptions {
    RunOptions {
        output_dir: root.join("out"),
        module_path: None,
        variant: OutputVariant::Modern,
        overwrite: false,
        include_deprecated: false,
        fetch: FetchOptions {
            use_cache,
            cache_dir: root.join("cache"),
            timeout: Duration::from_secs(5),
            fallback_format: Some(Format::Turtle),
        },
    }
}

#[test]
fn generates_a_constants_module_from_a_turtle_document() {
    let tmp = tempfile::tempdir().unwrap();
    let fixture = write_fixture(tmp.path());
    let sources = vec![VocabularySource::new(fixture.display().to_string())];

    let report = run(&sources, &options(tmp.path(), false)).unwrap();
    assert_eq!(report.generated.len(), 1);
    assert!(report.skipped.is_empty());
    assert!(report.failed.is_empty());

    let target = tmp.path().join("out").join("EX.rs");
    let generated = fs::read_to_string(&target).unwrap();

    // Classes first, then surviving properties.
    assert!(generated.contains("pub const PERSON: &str = \"http://example.org/ns/Person\";"));
    assert!(generated.contains("pub const GIVEN: &str = \"http://example.org/ns/Given\";"));
    assert!(generated.contains("pub const NAME: &str = \"http://example.org/ns/name\";"));
    // The property shadowing class `Given` is renamed.
    assert!(generated.contains("pub const HAS_GIVEN: &str = \"http://example.org/ns/given\";"));
    // The case-variant second spelling is dropped.
    assert!(!generated.contains("http://example.org/ns/GIVEN"));
    // Deprecated entities are invisible by default.
    assert!(!generated.contains("http://example.org/ns/Old"));
    // Foreign subjects never make it into the module.
    assert!(!generated.contains("other.org"));
    // Vocabulary metadata is rendered.
    assert!(generated.contains("pub const NAMESPACE: &str = \"http://example.org/ns/\";"));
    assert!(generated.contains("pub const PREFIX: &str = \"ex\";"));
}

#[test]
fn include_deprecated_marks_instead_of_dropping() {
    let tmp = tempfile::tempdir().unwrap();
    let fixture = write_fixture(tmp.path());
    let sources = vec![VocabularySource::new(fixture.display().to_string())];

    let mut options = options(tmp.path(), false);
    options.include_deprecated = true;
    run(&sources, &options).unwrap();

    let generated = fs::read_to_string(tmp.path().join("out").join("EX.rs")).unwrap();
    assert!(generated.contains("pub const OLD: &str = \"http://example.org/ns/Old\";"));
    assert!(generated.contains("#[deprecated(note = \"ex:Old is deprecated"));
}

#[test]
fn existing_targets_are_skipped_unless_overwrite_is_set() {
    let tmp = tempfile::tempdir().unwrap();
    let fixture = write_fixture(tmp.path());
    let sources = vec![VocabularySource::new(fixture.display().to_string())];
    let options = options(tmp.path(), false);

    let first = run(&sources, &options).unwrap();
    assert_eq!(first.generated.len(), 1);

    let second = run(&sources, &options).unwrap();
    assert!(second.generated.is_empty());
    assert_eq!(second.skipped.len(), 1);

    let mut forced = options.clone();
    forced.overwrite = true;
    let third = run(&sources, &forced).unwrap();
    assert_eq!(third.generated.len(), 1);
}

#[test]
fn cache_hit_serves_identical_bytes_without_the_source() {
    let tmp = tempfile::tempdir().unwrap();
    let fixture = write_fixture(tmp.path());
    let locator = fixture.display().to_string();
    let fetch_options = FetchOptions {
        use_cache: true,
        cache_dir: tmp.path().join("cache"),
        timeout: Duration::from_secs(5),
        fallback_format: Some(Format::Turtle),
    };

    let mut first = fetch_vocabulary(&locator, &fetch_options).unwrap();
    let mut first_bytes = Vec::new();
    std::io::Read::read_to_end(&mut first.reader, &mut first_bytes).unwrap();
    assert_eq!(first.format, Format::Turtle);

    // The cache entry is now the source of truth: the original can go away.
    fs::remove_file(&fixture).unwrap();

    let mut second = fetch_vocabulary(&locator, &fetch_options).unwrap();
    let mut second_bytes = Vec::new();
    std::io::Read::read_to_end(&mut second.reader, &mut second_bytes).unwrap();

    assert_eq!(first_bytes, second_bytes);
    assert_eq!(second_bytes, FIXTURE.as_bytes());
}

#[test]
fn extensionless_locators_gain_the_resolved_extension_in_the_cache() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("terms");
    fs::write(&path, FIXTURE).unwrap();
    let fetch_options = FetchOptions {
        use_cache: true,
        cache_dir: tmp.path().join("cache"),
        timeout: Duration::from_secs(5),
        fallback_format: Some(Format::Turtle),
    };

    let fetched = fetch_vocabulary(&path.display().to_string(), &fetch_options).unwrap();
    assert_eq!(fetched.format, Format::Turtle);
    assert!(tmp
        .path()
        .join("cache")
        .join("vocabularies")
        .join("terms.ttl")
        .exists());
}

#[test]
fn missing_documents_are_fetch_errors() {
    let tmp = tempfile::tempdir().unwrap();
    let sources = vec![VocabularySource::new(
        tmp.path().join("absent.ttl").display().to_string(),
    )];
    let error = run(&sources, &options(tmp.path(), false)).unwrap_err();
    assert!(matches!(error, vocabgen::Error::Fetch { .. }));
}
