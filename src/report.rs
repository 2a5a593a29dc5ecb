//! Output formatting for scan results.
//!
//! Supports three output formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for programmatic consumption
//! - SARIF: Static Analysis Results Interchange Format for IDE/CI integration

use colored::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::scan::{Annotation, ScanResult};
use crate::select::ChancePercent;

// =============================================================================
// JSON Format
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub chance_percent: u8,
    pub files_scanned: usize,
    pub annotation_count: usize,
    pub files: Vec<JsonFile>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonFile {
    pub file: String,
    pub annotations: Vec<Annotation>,
}

/// Build the JSON report. Files without annotations are left out.
pub fn json_report(result: &ScanResult, chance: ChancePercent) -> JsonReport {
    JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        chance_percent: chance.get(),
        files_scanned: result.scanned,
        annotation_count: result.total(),
        files: result
            .files
            .iter()
            .filter(|f| !f.annotations.is_empty())
            .map(|f| JsonFile {
                file: f.file.clone(),
                annotations: f.annotations.clone(),
            })
            .collect(),
        skipped: result.skipped.clone(),
    }
}

/// Write results in JSON format.
pub fn write_json(result: &ScanResult, chance: ChancePercent) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&json_report(result, chance))?;
    println!("{}", json);
    Ok(())
}

// =============================================================================
// SARIF Format
// =============================================================================

const SARIF_VERSION: &str = "2.1.0";
const SARIF_SCHEMA: &str = "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json";
const TOOL_NAME: &str = "syntax-zaz";
const RULE_ID: &str = "zaz";

#[derive(Debug, Serialize, Deserialize)]
pub struct SarifReport {
    pub version: String,
    #[serde(rename = "$schema")]
    pub schema: String,
    pub runs: Vec<SarifRun>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SarifRun {
    pub tool: SarifTool,
    /// Columns are counted in characters, not UTF-16 code units.
    #[serde(rename = "columnKind")]
    pub column_kind: String,
    pub results: Vec<SarifResult>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SarifTool {
    pub driver: SarifDriver,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SarifDriver {
    pub name: String,
    pub version: String,
    pub rules: Vec<SarifRule>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SarifRule {
    pub id: String,
    pub name: String,
    #[serde(rename = "shortDescription")]
    pub short_description: SarifMessage,
    #[serde(rename = "defaultConfiguration")]
    pub default_config: SarifRuleConfig,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SarifRuleConfig {
    pub level: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SarifResult {
    #[serde(rename = "ruleId")]
    pub rule_id: String,
    pub level: String,
    pub message: SarifMessage,
    pub locations: Vec<SarifLocation>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SarifMessage {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SarifLocation {
    #[serde(rename = "physicalLocation")]
    pub physical_location: SarifPhysicalLocation,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SarifPhysicalLocation {
    #[serde(rename = "artifactLocation")]
    pub artifact_location: SarifArtifact,
    pub region: SarifRegion,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SarifArtifact {
    pub uri: String,
}

/// SARIF regions are 1-based; annotations are 0-based.
#[derive(Debug, Serialize, Deserialize)]
pub struct SarifRegion {
    #[serde(rename = "startLine")]
    pub start_line: usize,
    #[serde(rename = "startColumn")]
    pub start_column: usize,
    #[serde(rename = "endColumn")]
    pub end_column: usize,
}

/// Build a SARIF report with paths relative to `base_path` where possible.
pub fn sarif_report(base_path: &Path, result: &ScanResult) -> SarifReport {
    let results = result
        .files
        .iter()
        .flat_map(|f| {
            let uri = make_relative_path(&f.file, base_path);
            f.annotations.iter().map(move |a| SarifResult {
                rule_id: RULE_ID.to_string(),
                level: "note".to_string(),
                message: SarifMessage {
                    text: a.message.clone(),
                },
                locations: vec![SarifLocation {
                    physical_location: SarifPhysicalLocation {
                        artifact_location: SarifArtifact { uri: uri.clone() },
                        region: SarifRegion {
                            start_line: a.line + 1,
                            start_column: a.start_column + 1,
                            end_column: a.end_column + 1,
                        },
                    },
                }],
            })
        })
        .collect();

    SarifReport {
        version: SARIF_VERSION.to_string(),
        schema: SARIF_SCHEMA.to_string(),
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: TOOL_NAME.to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    rules: vec![SarifRule {
                        id: RULE_ID.to_string(),
                        name: "Zaz".to_string(),
                        short_description: SarifMessage {
                            text: "A line of code that deserves a second look".to_string(),
                        },
                        default_config: SarifRuleConfig {
                            level: "note".to_string(),
                        },
                    }],
                },
            },
            column_kind: "unicodeCodePoints".to_string(),
            results,
        }],
    }
}

/// Write results in SARIF format.
pub fn write_sarif(base_path: &Path, result: &ScanResult) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&sarif_report(base_path, result))?;
    println!("{}", json);
    Ok(())
}

fn make_relative_path(file: &str, base: &Path) -> String {
    let path = Path::new(file);
    let relative = path.strip_prefix(base).unwrap_or(path);
    if relative.as_os_str().is_empty() {
        // base was the file itself
        return path
            .file_name()
            .map(|n| n.to_string_lossy().replace('\\', "/"))
            .unwrap_or_else(|| file.to_string());
    }
    relative.to_string_lossy().replace('\\', "/")
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Write results in pretty (human-readable) format.
pub fn write_pretty(path: &str, result: &ScanResult, chance: ChancePercent) {
    println!();
    print!("  ");
    print!("{}", "syntax-zaz".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    print!("  {}", "Scanning: ".dimmed());
    println!("{}", path);
    print!("  {}", "Chance:   ".dimmed());
    println!("{}", chance);
    println!();

    for file in result.files.iter().filter(|f| !f.annotations.is_empty()) {
        write_annotations(&file.file, &file.annotations);
        println!();
    }

    for skipped in &result.skipped {
        println!("  {} {}", "SKIP".yellow(), skipped.dimmed());
    }

    let total = result.total();
    let plural = if total != 1 { "s" } else { "" };
    println!(
        "  {}",
        format!(
            "{} annotation{} in {} file{} scanned",
            total,
            plural,
            result.scanned,
            if result.scanned != 1 { "s" } else { "" }
        )
        .dimmed()
    );
    println!();
}

/// Print one file's annotations. Lines and columns are shown 1-based.
pub fn write_annotations(file: &str, annotations: &[Annotation]) {
    println!("  {} ({}):", file.blue().bold(), annotations.len());
    for a in annotations {
        print!(
            "    {}",
            format!(
                "{:>5}:{}-{}",
                a.line + 1,
                a.start_column + 1,
                a.end_column + 1
            )
            .dimmed()
        );
        println!("  {}", a.message);
    }
}
