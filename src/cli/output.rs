//! Output formatting for multiple formats
//!
//! Stack results are rendered as JSON, YAML, or human-readable text grouped by category in
//! display order.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::detection::types::ScanMode;
use crate::pipeline::ScanReport;
use crate::present::StackTarget;
use crate::profile::{ProfileReport, ProfileStatus};
use crate::session::RepositoryOutcome;
use crate::stack::{categorize, group_by_category, Category, CategoryGroup, SignatureRegistry};

const RULE: &str = "\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}";

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format (human-friendly, version-control friendly)
    Yaml,
    /// Human-readable formatted text
    Human,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StackStatus {
    Found,
    Empty,
    RateLimited,
}

/// Serializable result of any command that detects a stack
#[derive(Debug, Clone, Serialize)]
pub struct StackOutput {
    pub target: StackTarget,
    pub status: StackStatus,
    pub partial: bool,
    pub from_cache: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<ScanMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_count: Option<usize>,
    /// Uncached repositories of an account left unscanned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<usize>,
    pub technologies: Vec<String>,
    pub categories: Vec<CategoryGroup>,
}

impl StackOutput {
    fn new(target: StackTarget, technologies: Vec<String>) -> Self {
        let status = if technologies.is_empty() {
            StackStatus::Empty
        } else {
            StackStatus::Found
        };
        Self {
            target,
            status,
            partial: false,
            from_cache: false,
            mode: None,
            repo_count: None,
            remaining: None,
            categories: group_by_category(&technologies),
            technologies,
        }
    }

    pub fn from_scan(report: &ScanReport) -> Self {
        let mut output = Self::new(
            StackTarget::Repository(report.repo.clone()),
            report.technologies.clone(),
        );
        output.partial = report.partial;
        output.mode = Some(report.mode);
        output
    }

    pub fn from_repository(outcome: &RepositoryOutcome) -> Self {
        let mut output = Self::new(
            StackTarget::repository(&outcome.repo),
            outcome.technologies.clone(),
        );
        output.partial = outcome.partial;
        output.from_cache = outcome.from_cache;
        output
    }

    pub fn from_profile(report: &ProfileReport) -> Self {
        let mut output = Self::new(
            StackTarget::account(&report.account),
            report.technologies.clone(),
        );
        output.status = match report.status {
            ProfileStatus::Found => StackStatus::Found,
            ProfileStatus::Empty => StackStatus::Empty,
            ProfileStatus::RateLimited => StackStatus::RateLimited,
        };
        output.partial = report.is_partial();
        output.from_cache = report.from_cache;
        output.repo_count = Some(report.repo_count);
        output.remaining = Some(report.remaining);
        output
    }
}

#[derive(Debug, Clone, Serialize)]
struct SignatureEntry {
    name: &'static str,
    kind: String,
    category: Category,
    files: &'static [&'static str],
    extensions: &'static [&'static str],
    dependencies: &'static [&'static str],
}

/// Output formatter for stack results
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self, output: &StackOutput) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(output).context("Failed to serialize stack to JSON")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(output).context("Failed to serialize stack to YAML")
            }
            OutputFormat::Human => Ok(self.format_human(output)),
        }
    }

    pub fn format_signatures(&self, registry: &SignatureRegistry) -> Result<String> {
        let entries: Vec<SignatureEntry> = registry
            .all()
            .iter()
            .map(|sig| SignatureEntry {
                name: sig.name,
                kind: sig.kind.to_string(),
                category: categorize(sig.name),
                files: sig.files,
                extensions: sig.extensions,
                dependencies: sig.dependencies,
            })
            .collect();

        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&entries)
                .context("Failed to serialize signatures to JSON"),
            OutputFormat::Yaml => {
                serde_yaml::to_string(&entries).context("Failed to serialize signatures to YAML")
            }
            OutputFormat::Human => Ok(self.format_signatures_human(&entries)),
        }
    }

    fn format_human(&self, output: &StackOutput) -> String {
        let mut text = String::new();

        match output.status {
            StackStatus::RateLimited => {
                text.push_str(&format!("\u{26A0} Rate limit exhausted for {}\n", output.target));
                text.push_str(&format!("{}\n\n", RULE));
                text.push_str("The account could not be examined. Set GITSTACK_GITHUB_TOKEN to raise the quota.\n");
                return text;
            }
            StackStatus::Empty => {
                text.push_str(&format!("No technologies detected for {}\n", output.target));
                if let Some(count) = output.repo_count {
                    text.push_str(&format!("Repositories examined: {}\n", count));
                }
                return text;
            }
            StackStatus::Found => {}
        }

        text.push_str(&format!("\u{2713} Stack of {}\n", output.target));
        text.push_str(&format!("{}\n\n", RULE));

        for group in &output.categories {
            text.push_str(&format!("{}:\n", group.category));
            for (i, name) in group.technologies.iter().enumerate() {
                let connector = if i + 1 == group.technologies.len() {
                    "\u{2514}\u{2500}"
                } else {
                    "\u{251C}\u{2500}"
                };
                text.push_str(&format!("{} {}\n", connector, name));
            }
            text.push('\n');
        }

        text.push_str(&format!("{} technologies", output.technologies.len()));
        if let Some(count) = output.repo_count {
            text.push_str(&format!(" across {} repositories", count));
        }
        if output.from_cache {
            text.push_str(" (cached)");
        }
        text.push('\n');

        if output.partial {
            match output.remaining {
                Some(remaining) => text.push_str(&format!(
                    "\u{26A0} Partial: {} repositories not scanned yet (run with --more)\n",
                    remaining
                )),
                None => text.push_str(
                    "\u{26A0} Partial: file tree unavailable, detected from visible files only\n",
                ),
            }
        }

        text
    }

    fn format_signatures_human(&self, entries: &[SignatureEntry]) -> String {
        let mut text = String::new();
        text.push_str(&format!("{} known technologies\n", entries.len()));
        text.push_str(&format!("{}\n", RULE));
        for entry in entries {
            text.push_str(&format!(
                "{:<28} {:<15} {}\n",
                entry.name, entry.kind, entry.category
            ));
        }
        text
    }
}
