//! Integration tests for persisting pipelines and rebuilding them from metadata.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use nerdict::component::{Component, NerDictConfig, NerDictExtractor};
use nerdict::pipeline::ModelMetadata;
use nerdict::prelude::*;
use tempfile::TempDir;

fn write_dictionaries(dir: &Path) {
    fs::create_dir_all(dir.join("ner")).unwrap();
    fs::write(dir.join("ner").join("cities.csv"), "NYC,city\nNY,city\nParis,city\n").unwrap();
    fs::write(dir.join("ner").join("teams.csv"), "NYC,team\n").unwrap();
    fs::write(dir.join("synonyms.csv"), "gen_name,name\nNYC,New York City\n").unwrap();
}

fn pipeline_config(dir: &Path) -> PipelineConfig {
    PipelineConfig::from_json(&format!(
        r#"{{
            "language": "en",
            "pipeline": [
                {{"name": "tokenizer_whitespace"}},
                {{"name": "ner_dict", "ner_dicts": {:?}}},
                {{"name": "ner_synonyms_dict", "synonym_dicts": {:?}}}
            ]
        }}"#,
        dir.join("ner").to_string_lossy(),
        dir.join("synonyms.csv").to_string_lossy()
    ))
    .unwrap()
}

#[test]
fn test_persist_and_load_pipeline() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    write_dictionaries(temp_dir.path());
    let registry = ComponentRegistry::default();

    let pipeline = Pipeline::from_config(&pipeline_config(temp_dir.path()), &registry)?;
    let model_dir = temp_dir.path().join("model");
    let path = pipeline.persist(&model_dir)?;
    assert_eq!(path, ModelMetadata::path_in(&model_dir));

    let loaded = Pipeline::load(&model_dir, &registry)?;
    assert_eq!(loaded.language(), Some("en"));

    let names = |p: &Pipeline| p.components().iter().map(|c| c.name()).collect::<Vec<_>>();
    assert_eq!(names(&loaded), names(&pipeline));

    let original = pipeline.parse("I live in NYC")?;
    let reloaded = loaded.parse("I live in NYC")?;
    assert_eq!(original.entities, reloaded.entities);
    assert_eq!(reloaded.entities.len(), 2);
    assert!(reloaded.entities.iter().all(|e| e.value == "New York City"));

    Ok(())
}

#[test]
fn test_metadata_holds_paths_not_entries() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    write_dictionaries(temp_dir.path());
    let pipeline = Pipeline::from_config(
        &pipeline_config(temp_dir.path()),
        &ComponentRegistry::default(),
    )?;

    let metadata = pipeline.metadata()?;
    assert_eq!(metadata.version, nerdict::VERSION);
    assert_eq!(metadata.pipeline.len(), 3);

    let ner = &metadata.pipeline[1];
    let ner_dir = temp_dir.path().join("ner").to_string_lossy().to_string();
    assert_eq!(ner["name"], "ner_dict");
    assert_eq!(ner["ner_dicts"].as_str(), Some(ner_dir.as_str()));

    let serialized = serde_json::to_string(&metadata)?;
    assert!(!serialized.contains("Paris"));

    Ok(())
}

#[test]
fn test_reconstructed_dictionary_is_identical() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    write_dictionaries(temp_dir.path());

    let extractor = NerDictExtractor::from_config(NerDictConfig {
        ner_dicts: Some(temp_dir.path().join("ner").to_string_lossy().to_string()),
        ..Default::default()
    })?;

    let metadata = extractor.persist()?;
    let config: NerDictConfig = serde_json::from_value(serde_json::Value::Object(metadata))?;
    let rebuilt = NerDictExtractor::from_config(config)?;

    let entries = |e: &NerDictExtractor| -> HashSet<DictionaryEntry> {
        e.dictionary().unwrap().iter().cloned().collect()
    };
    assert_eq!(entries(&extractor), entries(&rebuilt));
    assert_eq!(entries(&rebuilt).len(), 4);

    Ok(())
}

#[test]
fn test_load_fails_when_dictionary_is_removed() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    write_dictionaries(temp_dir.path());
    let registry = ComponentRegistry::default();

    let pipeline = Pipeline::from_config(&pipeline_config(temp_dir.path()), &registry)?;
    let model_dir = temp_dir.path().join("model");
    pipeline.persist(&model_dir)?;

    fs::remove_dir_all(temp_dir.path().join("ner")).unwrap();

    let result = Pipeline::load(&model_dir, &registry);
    assert!(matches!(result, Err(NerdictError::PathUnreadable { .. })));

    Ok(())
}

#[test]
fn test_load_without_metadata() {
    let temp_dir = TempDir::new().unwrap();
    let result = Pipeline::load(temp_dir.path(), &ComponentRegistry::default());
    assert!(matches!(result, Err(NerdictError::Config(_))));
}
