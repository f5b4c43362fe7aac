//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::analysis::token::Token;
use crate::cli::args::{NerdictArgs, OutputFormat};
use crate::error::Result;
use crate::message::{Entity, Message};

/// Result of parsing one text.
#[derive(Debug, Serialize, Deserialize)]
pub struct ParseResult {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<Vec<Token>>,
    pub entities: Vec<Entity>,
}

impl ParseResult {
    /// Build the printable result of a processed message.
    pub fn from_message(message: Message, include_tokens: bool) -> Self {
        ParseResult {
            text: message.text,
            tokens: message.tokens.filter(|_| include_tokens),
            entities: message.entities,
        }
    }
}

/// Result of persisting a pipeline.
#[derive(Debug, Serialize, Deserialize)]
pub struct PersistResult {
    pub path: String,
    pub components: Vec<String>,
}

/// One component of an inspected pipeline.
#[derive(Debug, Serialize, Deserialize)]
pub struct ComponentSummary {
    pub name: String,
    pub provides: Vec<String>,
    pub requires: Vec<String>,
    pub dictionary_size: Option<usize>,
}

/// Result of inspecting a pipeline.
#[derive(Debug, Serialize, Deserialize)]
pub struct PipelineSummary {
    pub language: Option<String>,
    pub components: Vec<ComponentSummary>,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &NerdictArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

fn output_human<T: Serialize>(message: &str, result: &T, args: &NerdictArgs) -> Result<()> {
    if args.verbosity() > 1 {
        println!("{message}");
        println!();
    }

    let value = serde_json::to_value(result)?;
    match result {
        _ if std::any::type_name::<T>().contains("ParseResult") => {
            output_parse_result_human(&value)
        }
        _ if std::any::type_name::<T>().contains("PipelineSummary") => {
            output_pipeline_summary_human(&value)
        }
        _ => output_generic_human(&value),
    }
}

fn output_parse_result_human(value: &Value) -> Result<()> {
    let Some(obj) = value.as_object() else {
        return output_generic_human(value);
    };

    if let Some(text) = obj.get("text").and_then(|t| t.as_str()) {
        println!("Text: {text}");
    }

    if let Some(tokens) = obj.get("tokens").and_then(|t| t.as_array()) {
        let rendered: Vec<String> = tokens
            .iter()
            .map(|t| {
                format!(
                    "{}[{}..{}]",
                    t["text"].as_str().unwrap_or_default(),
                    t["start"],
                    t["end"]
                )
            })
            .collect();
        println!("Tokens: {}", rendered.join(" "));
    }

    match obj.get("entities").and_then(|e| e.as_array()) {
        Some(entities) if !entities.is_empty() => {
            println!("Entities:");
            for entity in entities {
                let mut line = format!(
                    "  {:>4}..{:<4} {:<16} {}",
                    entity["start"],
                    entity["end"],
                    entity["entity"].as_str().unwrap_or_default(),
                    format_value(&entity["value"])
                );
                if let Some(extractor) = entity.get("extractor").and_then(|e| e.as_str()) {
                    line.push_str(&format!("  ({extractor})"));
                }
                println!("{line}");
            }
        }
        _ => println!("Entities: none"),
    }
    println!();

    Ok(())
}

fn output_pipeline_summary_human(value: &Value) -> Result<()> {
    if let Some(language) = value.get("language").and_then(|l| l.as_str()) {
        println!("Language: {language}");
    }

    println!("Components:");
    for (i, component) in value["components"].as_array().into_iter().flatten().enumerate() {
        let size = match component["dictionary_size"].as_u64() {
            Some(size) => format!("{size} entries"),
            None => "-".to_string(),
        };
        println!(
            "  {}. {:<24} {}",
            i + 1,
            component["name"].as_str().unwrap_or_default(),
            size
        );
    }

    Ok(())
}

fn output_generic_human(value: &Value) -> Result<()> {
    match value {
        Value::Object(obj) => {
            for (key, val) in obj {
                println!("{key}: {}", format_value(val));
            }
        }
        _ => println!("{}", format_value(value)),
    }
    Ok(())
}

fn output_json<T: Serialize>(result: &T, args: &NerdictArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Format a JSON value for human output.
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(arr) => arr.iter().map(format_value).collect::<Vec<_>>().join(", "),
        Value::Null => "-".to_string(),
        _ => value.to_string(),
    }
}
