//! Duplicate-name correction
//!
//! Rows are identified by position only, so two products sharing a name cannot
//! be told apart downstream. A [`LabelRule`] names one offending label and how
//! its first two occurrences get disambiguated.

use regex::RegexBuilder;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dataset::Dataset;
use crate::error::Result;

/// Suffix appended to the second occurrence of a label
pub const DEFAULT_MARKER: &str = "-2";

/// How the first two exact matches of a label are renamed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum DisambiguationStrategy {
    /// First match becomes `cleaned`, second becomes `cleaned` + marker
    RenameBoth { cleaned: String },
    /// First match is left alone, second becomes `label` + marker
    RenameSecond,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelRule {
    pub label: String,
    #[serde(flatten)]
    pub strategy: DisambiguationStrategy,
}

impl LabelRule {
    pub fn rename_both(label: impl Into<String>, cleaned: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            strategy: DisambiguationStrategy::RenameBoth {
                cleaned: cleaned.into(),
            },
        }
    }

    pub fn rename_second(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            strategy: DisambiguationStrategy::RenameSecond,
        }
    }

    /// Text that every row touched by this rule still contains afterwards
    pub fn stem(&self) -> &str {
        match &self.strategy {
            DisambiguationStrategy::RenameBoth { cleaned } => cleaned,
            DisambiguationStrategy::RenameSecond => &self.label,
        }
    }

    fn plan(&self, first: usize, second: usize, marker: &str) -> Vec<Rename> {
        match &self.strategy {
            DisambiguationStrategy::RenameBoth { cleaned } => vec![
                Rename {
                    row: first,
                    from: self.label.clone(),
                    to: cleaned.clone(),
                },
                Rename {
                    row: second,
                    from: self.label.clone(),
                    to: format!("{}{}", cleaned, marker),
                },
            ],
            DisambiguationStrategy::RenameSecond => vec![Rename {
                row: second,
                from: self.label.clone(),
                to: format!("{}{}", self.label, marker),
            }],
        }
    }

    /// The two product-list fixes this tool was written for
    pub fn defaults() -> Vec<LabelRule> {
        vec![
            LabelRule::rename_both("Filé De Pescada Marpex 800g]", "Filé De Pescada Marpex 800g"),
            LabelRule::rename_second("Sardinha Pescador"),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rename {
    pub row: usize,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleOutcome {
    pub label: String,
    pub matches: usize,
    pub renames: Vec<Rename>,
}

impl RuleOutcome {
    pub fn skipped(&self) -> bool {
        self.renames.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorrectionReport {
    pub outcomes: Vec<RuleOutcome>,
}

impl CorrectionReport {
    pub fn changed(&self) -> bool {
        self.outcomes.iter().any(|o| !o.skipped())
    }

    pub fn renames(&self) -> impl Iterator<Item = &Rename> {
        self.outcomes.iter().flat_map(|o| o.renames.iter())
    }
}

pub struct DuplicateNameCorrector {
    rules: Vec<LabelRule>,
    marker: String,
}

impl DuplicateNameCorrector {
    pub fn new(rules: Vec<LabelRule>, marker: impl Into<String>) -> Self {
        Self {
            rules,
            marker: marker.into(),
        }
    }

    /// Rename duplicates in place. Rules with fewer than two exact matches
    /// are skipped; a third or later match is never touched.
    pub fn correct(&self, dataset: &mut Dataset, column: &str) -> Result<CorrectionReport> {
        let col = dataset.column_index(column)?;
        let mut report = CorrectionReport::default();

        for rule in &self.rules {
            let matches = dataset.find_exact(col, &rule.label);

            let renames = match matches.as_slice() {
                [first, second, ..] => rule.plan(*first, *second, &self.marker),
                _ => {
                    debug!(
                        "Skipping '{}': {} exact match(es), need at least 2",
                        rule.label,
                        matches.len()
                    );
                    Vec::new()
                }
            };

            for rename in &renames {
                dataset.set_text(rename.row, col, &rename.to)?;
                debug!("Row {}: '{}' -> '{}'", rename.row, rename.from, rename.to);
            }

            report.outcomes.push(RuleOutcome {
                label: rule.label.clone(),
                matches: matches.len(),
                renames,
            });
        }

        Ok(report)
    }

    /// Rows whose name contains any rule stem, ignoring case
    pub fn affected_rows(&self, dataset: &Dataset, column: &str) -> Result<Vec<usize>> {
        let col = dataset.column_index(column)?;

        if self.rules.is_empty() {
            return Ok(Vec::new());
        }

        let alternation = self
            .rules
            .iter()
            .map(|rule| regex::escape(rule.stem()))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = RegexBuilder::new(&alternation)
            .case_insensitive(true)
            .build()?;

        Ok(dataset
            .records
            .iter()
            .enumerate()
            .filter(|(_, record)| record.text(col).is_some_and(|name| pattern.is_match(name)))
            .map(|(idx, _)| idx)
            .collect())
    }
}

impl Default for DuplicateNameCorrector {
    fn default() -> Self {
        Self::new(LabelRule::defaults(), DEFAULT_MARKER)
    }
}
