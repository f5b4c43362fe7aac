//! Command implementations for the nerdict CLI.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result, bail};
use log::{debug, info};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::component::ComponentRegistry;
use crate::pipeline::{Pipeline, PipelineConfig};

/// Execute a CLI command.
pub fn execute_command(args: NerdictArgs) -> Result<()> {
    match &args.command {
        Command::Parse(parse_args) => parse_texts(parse_args, &args),
        Command::Persist(persist_args) => persist_pipeline(persist_args, &args),
        Command::Inspect(inspect_args) => inspect_pipeline(inspect_args, &args),
    }
}

/// Build the pipeline named by a `--config` or `--model` option.
pub fn build_pipeline(source: &PipelineSource) -> Result<Pipeline> {
    let registry = ComponentRegistry::default();
    match (&source.config, &source.model) {
        (Some(config), _) => load_config_pipeline(config, &registry),
        (None, Some(model)) => Pipeline::load(model, &registry)
            .with_context(|| format!("failed to load pipeline from {}", model.display())),
        (None, None) => bail!("either --config or --model is required"),
    }
}

fn load_config_pipeline(path: &Path, registry: &ComponentRegistry) -> Result<Pipeline> {
    info!("Building pipeline from {}", path.display());
    let config = PipelineConfig::from_file(path)?;
    debug!("Configured components: {:?}", config.component_names());
    Pipeline::from_config(&config, registry)
        .with_context(|| format!("failed to build pipeline from {}", path.display()))
}

/// Parse a single text or every line of an input file.
fn parse_texts(args: &ParseArgs, cli_args: &NerdictArgs) -> Result<()> {
    let pipeline = build_pipeline(&args.source)?;

    let texts: Vec<String> = match (&args.text, &args.input) {
        (Some(text), _) => vec![text.clone()],
        (None, Some(input)) => read_lines(input)?,
        (None, None) => bail!("nothing to parse: pass a TEXT argument or --input"),
    };

    for text in &texts {
        let message = pipeline
            .parse(text)
            .with_context(|| format!("failed to parse {text:?}"))?;
        let result = ParseResult::from_message(message, args.tokens);
        output_result("Parsed message", &result, cli_args)?;
    }

    Ok(())
}

fn read_lines(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    let mut texts = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line.with_context(|| format!("cannot read {}", path.display()))?;
        if !line.trim().is_empty() {
            texts.push(line);
        }
    }
    Ok(texts)
}

/// Build a pipeline from configuration and write its metadata.
fn persist_pipeline(args: &PersistArgs, cli_args: &NerdictArgs) -> Result<()> {
    let registry = ComponentRegistry::default();
    let pipeline = load_config_pipeline(&args.config, &registry)?;

    let path = pipeline
        .persist(&args.output)
        .with_context(|| format!("failed to persist pipeline to {}", args.output.display()))?;

    let result = PersistResult {
        path: path.to_string_lossy().to_string(),
        components: pipeline
            .components()
            .iter()
            .map(|c| c.name().to_string())
            .collect(),
    };
    output_result("Pipeline persisted successfully", &result, cli_args)?;
    Ok(())
}

/// Print the components of a pipeline.
fn inspect_pipeline(args: &InspectArgs, cli_args: &NerdictArgs) -> Result<()> {
    let pipeline = build_pipeline(&args.source)?;

    let summary = PipelineSummary {
        language: pipeline.language().map(str::to_string),
        components: pipeline
            .components()
            .iter()
            .map(|c| ComponentSummary {
                name: c.name().to_string(),
                provides: c.provides().iter().map(|s| s.to_string()).collect(),
                requires: c.requires().iter().map(|s| s.to_string()).collect(),
                dictionary_size: c.dictionary_size(),
            })
            .collect(),
    };
    output_result("Pipeline", &summary, cli_args)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;
    use std::path::PathBuf;

    use tempfile::TempDir;

    use crate::pipeline::ModelMetadata;

    fn write_config(dir: &TempDir) -> PathBuf {
        let ner = dir.path().join("ner.csv");
        fs::write(&ner, "NYC,city\n").unwrap();
        let config = dir.path().join("pipeline.json");
        fs::write(
            &config,
            format!(
                r#"{{"pipeline": [{{"name": "tokenizer_whitespace"}}, {{"name": "ner_dict", "ner_dicts": {:?}}}]}}"#,
                ner.to_string_lossy()
            ),
        )
        .unwrap();
        config
    }

    #[test]
    fn test_build_pipeline_from_config() {
        let dir = TempDir::new().unwrap();
        let source = PipelineSource {
            config: Some(write_config(&dir)),
            model: None,
        };

        let pipeline = build_pipeline(&source).unwrap();
        assert_eq!(pipeline.components().len(), 2);
    }

    #[test]
    fn test_persist_then_load_model() {
        let dir = TempDir::new().unwrap();
        let model = dir.path().join("model");
        let args = NerdictArgs {
            verbose: 0,
            quiet: true,
            output_format: OutputFormat::Json,
            pretty: false,
            command: Command::Persist(PersistArgs {
                config: write_config(&dir),
                output: model.clone(),
            }),
        };

        execute_command(args).unwrap();
        assert!(ModelMetadata::path_in(&model).exists());

        let source = PipelineSource {
            config: None,
            model: Some(model),
        };
        let message = build_pipeline(&source).unwrap().parse("I live in NYC").unwrap();
        assert_eq!(message.entities.len(), 1);
    }

    #[test]
    fn test_missing_config_file() {
        let source = PipelineSource {
            config: Some(PathBuf::from("/nonexistent/pipeline.json")),
            model: None,
        };
        assert!(build_pipeline(&source).is_err());
    }
}
