//! Integration tests for synonym maps and the normalizer component.

use std::fs;

use nerdict::component::{Component, EntitySynonymMapper, SynonymConfig};
use nerdict::dictionary::ColumnNames;
use nerdict::prelude::*;
use nerdict::synonym::{DEFAULT_REPLACEMENT_COLUMN, DEFAULT_TERM_COLUMN};
use tempfile::TempDir;

#[test]
fn test_nyc_is_normalized() {
    let synonyms = SynonymMap::build([("NYC", "New York City")]);
    let mut entities = vec![Entity::new(10, 13, "nyc", "city")];

    let replaced = synonyms.apply(&mut entities, "ner_synonyms_dict");

    assert_eq!(replaced, 1);
    assert_eq!(entities[0].value, "New York City");
    assert_eq!((entities[0].start, entities[0].end), (10, 13));
    assert_eq!(entities[0].label, "city");
}

#[test]
fn test_unmatched_values_are_untouched() {
    let synonyms = SynonymMap::build([("NYC", "New York City")]);
    let mut entities = vec![
        Entity::new(0, 5, "Paris", "city"),
        Entity::new(6, 9, "NYX", "city"),
    ];
    let before = entities.clone();

    assert_eq!(synonyms.apply(&mut entities, "ner_synonyms_dict"), 0);
    assert_eq!(entities, before);
}

#[test]
fn test_conflicting_files_last_write_wins() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("01.csv"),
        "gen_name,name\nNY,New York\nSH,Shanghai\n",
    )
    .unwrap();
    fs::write(
        temp_dir.path().join("02.csv"),
        "gen_name,name\nny,New York City\nsh,Shanghai\n",
    )
    .unwrap();

    let columns = ColumnNames::new(DEFAULT_TERM_COLUMN, DEFAULT_REPLACEMENT_COLUMN);
    let synonyms = SynonymMap::load(Some(temp_dir.path()), &columns)?.unwrap();

    assert_eq!(synonyms.get("NY"), Some("New York City"));
    assert_eq!(synonyms.get("sh"), Some("Shanghai"));
    assert_eq!(synonyms.conflicts().len(), 1);
    assert_eq!(synonyms.conflicts()[0].key, "ny");
    assert_eq!(synonyms.conflicts()[0].previous, "New York");

    Ok(())
}

#[test]
fn test_mappers_do_not_share_state() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let first = temp_dir.path().join("first.csv");
    let second = temp_dir.path().join("second.csv");
    fs::write(&first, "gen_name,name\nnyc,New York City\n").unwrap();
    fs::write(&second, "gen_name,name\nsf,San Francisco\n").unwrap();

    let config = |path: &std::path::Path| SynonymConfig {
        synonym_dicts: Some(path.to_string_lossy().to_string()),
        ..Default::default()
    };
    let a = EntitySynonymMapper::from_config(config(&first))?;
    let b = EntitySynonymMapper::from_config(config(&second))?;

    assert_eq!(a.dictionary_size(), Some(1));
    assert_eq!(b.dictionary_size(), Some(1));
    assert!(a.synonyms().unwrap().get("sf").is_none());
    assert!(b.synonyms().unwrap().get("nyc").is_none());

    Ok(())
}

#[test]
fn test_missing_replacement_column_is_malformed() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("synonyms.csv");
    fs::write(&path, "gen_name,canonical\nnyc,New York City\n").unwrap();

    let result = EntitySynonymMapper::from_config(SynonymConfig {
        synonym_dicts: Some(path.to_string_lossy().to_string()),
        ..Default::default()
    });
    assert!(matches!(result, Err(NerdictError::MalformedRow { .. })));
}
