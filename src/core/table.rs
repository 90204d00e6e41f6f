use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::score::{RawScore, ScorePolicy, ValidatedScore};
use crate::core::subtests::{GroupColumn, SubtestDefinition, TableVariant};
use crate::error::ScoreResult;

static ABSENT_SCORE: RawScore = RawScore::Absent;

/// Raw scores keyed by subtest internal name.
///
/// Names that are missing behave as absent input.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NamedScores(IndexMap<String, RawScore>);

impl NamedScores {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, raw: impl Into<RawScore>) -> Self {
        self.insert(name, raw);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, raw: impl Into<RawScore>) {
        self.0.insert(name.into(), raw.into());
    }

    #[must_use]
    pub fn get(&self, name: &str) -> &RawScore {
        self.0.get(name).unwrap_or(&ABSENT_SCORE)
    }

    /// Score for `definition`, looked up under its canonical name and then
    /// under each legacy name.
    #[must_use]
    pub fn for_subtest(&self, definition: &SubtestDefinition) -> &RawScore {
        definition
            .accepted_names()
            .find_map(|name| self.0.get(name))
            .unwrap_or(&ABSENT_SCORE)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<RawScore>> FromIterator<(K, V)> for NamedScores {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, raw)| (name.into(), raw.into()))
                .collect(),
        )
    }
}

/// One subtest row of a materialized table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRow {
    pub label: String,
    pub score: ValidatedScore,
    pub group: Option<String>,
}

/// Validated, labeled subtest scores in x-axis order.
///
/// Tables are only produced by the builders below, so every row holds a score
/// that passed validation. Nothing mutates a table after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultTable {
    variant: Option<TableVariant>,
    group_column: Option<GroupColumn>,
    policy: ScorePolicy,
    rows: Vec<ResultRow>,
}

impl ResultTable {
    /// Builds a table with no group column from arbitrary labeled scores.
    ///
    /// Charts of such tables fall back to a single bar color and the
    /// "Individual Scores" grouping label.
    pub fn ungrouped<L, R, I>(policy: ScorePolicy, entries: I) -> ScoreResult<Self>
    where
        L: Into<String>,
        R: Into<RawScore>,
        I: IntoIterator<Item = (L, R)>,
    {
        let mut rows = Vec::new();
        for (label, raw) in entries {
            let score = policy.validate(&raw.into())?;
            rows.push(ResultRow {
                label: label.into(),
                score,
                group: None,
            });
        }
        Ok(Self {
            variant: None,
            group_column: None,
            policy,
            rows,
        })
    }

    #[must_use]
    pub fn variant(&self) -> Option<TableVariant> {
        self.variant
    }

    #[must_use]
    pub fn group_column(&self) -> Option<GroupColumn> {
        self.group_column
    }

    /// Bounds every score in this table was validated against.
    #[must_use]
    pub fn policy(&self) -> ScorePolicy {
        self.policy
    }

    #[must_use]
    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct group labels in order of first appearance.
    #[must_use]
    pub fn distinct_groups(&self) -> Vec<&str> {
        let mut groups: Vec<&str> = Vec::new();
        for group in self.rows.iter().filter_map(|row| row.group.as_deref()) {
            if !groups.contains(&group) {
                groups.push(group);
            }
        }
        groups
    }

    /// Export file name for charts of this table.
    #[must_use]
    pub fn export_file_name(&self) -> String {
        self.variant
            .map_or_else(|| "Scores_QI.png".to_owned(), TableVariant::export_file_name)
    }
}

/// Validates every subtest of `variant` in layout order and materializes a table.
///
/// Stops at the first invalid field and returns its error unchanged; no
/// partial table is produced and later fields are not inspected.
pub fn build_table(
    variant: TableVariant,
    scores: &NamedScores,
    policy: ScorePolicy,
) -> ScoreResult<ResultTable> {
    for name in scores.names() {
        if !variant.accepts_field(name) {
            warn!(
                variant = variant.short_name(),
                field = name,
                "ignoring score for unknown subtest"
            );
        }
    }

    let subtests = variant.subtests();
    let mut rows = Vec::with_capacity(subtests.len());
    for definition in subtests {
        let score = policy
            .validate(scores.for_subtest(definition))
            .inspect_err(|err| {
                debug!(
                    variant = variant.short_name(),
                    field = definition.internal_name,
                    error = %err,
                    "score validation failed"
                );
            })?;
        rows.push(ResultRow {
            label: definition.display_label.to_owned(),
            score,
            group: Some(definition.group_label.to_owned()),
        });
    }

    debug!(
        variant = variant.short_name(),
        row_count = rows.len(),
        "built result table"
    );
    Ok(ResultTable {
        variant: Some(variant),
        group_column: Some(variant.group_column()),
        policy,
        rows,
    })
}

/// Builds the 13-subtest "QI Verbal" / "QI Executivo" table with the default policy.
pub fn build_qi_table(scores: &NamedScores) -> ScoreResult<ResultTable> {
    build_table(TableVariant::Qi, scores, ScorePolicy::default())
}

/// Builds the 11-subtest ICV/IOP/IMO/IVP table with the default policy.
pub fn build_index_table(scores: &NamedScores) -> ScoreResult<ResultTable> {
    build_table(TableVariant::Index, scores, ScorePolicy::default())
}
