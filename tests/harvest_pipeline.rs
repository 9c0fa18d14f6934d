use std::fs;
use std::path::Path;

use ead_collocations::app::build_sources;
use ead_collocations::{
    ArchiveError, CorpusStore, DocumentSource, HarvestConfig, InMemorySource, SourceRoot, harvest,
};

fn finding_aid(date: &str, scope: &str, arrangement: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<ead xmlns="urn:isbn:1-931666-22-9">
  <eadheader><eadid>fixture</eadid></eadheader>
  <archdesc level="collection">
    <did><unittitle>Papers</unittitle><date normal="{date}">{date}</date></did>
    <scopecontent><head>Scope and Content</head><p>{scope}</p></scopecontent>
    <processinfo><p>Processed   by
    archival staff.</p></processinfo>
    <arrangement><p>{arrangement}</p></arrangement>
  </archdesc>
</ead>"#
    )
}

fn write_repo(root: &Path) {
    fs::create_dir_all(root.join("fales")).unwrap();
    fs::create_dir_all(root.join("tamwag")).unwrap();
    fs::write(
        root.join("fales/mss_001.xml"),
        finding_aid(
            "1932/1940",
            "Quaker ledgers include diaries and photographs.",
            "Quaker ledgers arranged chronologically",
        ),
    )
    .unwrap();
    fs::write(
        root.join("fales/mss_002.xml"),
        finding_aid(
            "1901",
            "Quaker ledgers document the literary salon.",
            "Arranged chronologically",
        ),
    )
    .unwrap();
    fs::write(
        root.join("tamwag/aia_003.xml"),
        finding_aid(
            "undated",
            "Tobacco warehouse ledgers and quaker ledgers.",
            "Tobacco warehouse ledgers arranged chronologically",
        ),
    )
    .unwrap();
    // not a finding aid
    fs::write(root.join("tamwag/index.xml"), "<html><body>listing</body></html>").unwrap();
    // not UTF-8
    fs::write(root.join("tamwag/latin1.xml"), b"<ead id=\"x\">caf\xe9</ead>").unwrap();
}

#[test]
fn harvest_reports_phrases_statistics_and_years() {
    let temp = tempfile::tempdir().unwrap();
    let repo = temp.path().join("NYU");
    write_repo(&repo);

    let corpus_dir = temp.path().join("txtFiles");
    let years_path = temp.path().join("dates.txt");
    let config = HarvestConfig::default()
        .with_source(SourceRoot::new(&repo))
        .with_corpus_dir(&corpus_dir)
        .with_years_path(Some(years_path.clone()));
    let sources = build_sources(&config);
    let report = harvest(&config, &sources).unwrap();

    assert_eq!(report.summary.processed, 3);
    assert_eq!(report.summary.skipped, 2);
    assert_eq!(
        CorpusStore::new(&corpus_dir).unit_ids().unwrap(),
        vec![0, 1, 2]
    );
    assert_eq!(
        CorpusStore::new(&corpus_dir).read_unit(1).unwrap().text,
        "quaker ledgers document the literary salon. processed by archival staff. arranged chronologically"
    );

    // the third document's date is unparsable and contributes no year
    assert_eq!(fs::read_to_string(&years_path).unwrap(), "1932\n1901");

    let bigrams = &report.rankings[0];
    assert_eq!(bigrams.order, 2);
    let phrases: Vec<String> = bigrams.phrases.iter().map(|found| found.phrase()).collect();
    assert!(phrases.contains(&"quaker ledger".to_string()), "{phrases:?}");
    assert!(phrases.contains(&"tobacco warehouse".to_string()), "{phrases:?}");
    for found in &bigrams.phrases {
        assert!(found.frequency >= 2);
    }

    let processinfo = report
        .averages
        .iter()
        .find(|average| average.tag == "processinfo")
        .unwrap();
    // "processed by archival staff." = 28 characters, 4 words
    assert_eq!((processinfo.avg_chars, processinfo.avg_words), (28, 4));

    let rendered = report.render();
    assert!(rendered.starts_with("Most common 2-word phrases:\n"));
    assert!(rendered.contains("Most common 3-word phrases:\n"));
    assert!(rendered.contains("Most common 4-word phrases:\n"));
    assert!(rendered.contains(
        "3 valid EAD XML files. Excluded words: draw, drawing, york, rockefeller, president, \
         correspondent, united, urban, policy, international"
    ));
    assert!(rendered.ends_with(
        "Average length of <p> in processinfo tag: 28 characters, 4 words\n\
         Average length of <p> in arrangement tag: 38 characters, 4 words"
    ));
}

#[test]
fn rerun_replaces_stale_units() {
    let temp = tempfile::tempdir().unwrap();
    let corpus_dir = temp.path().join("units");
    let store = CorpusStore::new(&corpus_dir);
    store.prepare().unwrap();
    for id in 0..5 {
        store.write(id, "stale stale stale").unwrap();
    }

    let source = InMemorySource::new("memory").with_document(
        "one.xml",
        finding_aid("1999", "Fresh text", "Fresh text"),
    );
    let sources: Vec<Box<dyn DocumentSource>> = vec![Box::new(source)];
    let config = HarvestConfig::default()
        .with_corpus_dir(&corpus_dir)
        .with_years_path(None);
    let report = harvest(&config, &sources).unwrap();

    assert_eq!(report.summary.processed, 1);
    assert_eq!(store.unit_ids().unwrap(), vec![0]);
    assert!(
        report
            .rankings
            .iter()
            .all(|ranking| ranking.phrases.iter().all(|found| !found.words.contains(&"stale".into())))
    );
}

#[test]
fn missing_source_root_fails_the_run() {
    let temp = tempfile::tempdir().unwrap();
    let config = HarvestConfig::default()
        .with_source(SourceRoot::new(temp.path().join("not-synced")))
        .with_corpus_dir(temp.path().join("units"))
        .with_years_path(None);
    let err = harvest(&config, &build_sources(&config)).unwrap_err();
    assert!(matches!(err, ArchiveError::Configuration(_)));
}

#[test]
fn invalid_config_is_rejected_before_touching_disk() {
    let temp = tempfile::tempdir().unwrap();
    let corpus_dir = temp.path().join("units");
    let config = HarvestConfig::default()
        .with_corpus_dir(&corpus_dir)
        .with_top_k(0);
    let err = harvest(&config, &[]).unwrap_err();
    assert!(matches!(err, ArchiveError::Configuration(_)));
    assert!(!corpus_dir.exists());
}
