use serde::{Deserialize, Serialize};

use crate::core::{GroupColumn, NamedScores, ResultTable, ScorePolicy, TableVariant, build_table};
use crate::error::{ChartError, ChartResult, ScoreResult};

use super::ChartConfig;

pub const SCORE_PROFILE_REQUEST_JSON_SCHEMA_V1: u32 = 1;
pub const RESULT_TABLE_JSON_SCHEMA_V1: u32 = 1;

/// Everything a caller submits for one chart: layout, raw scores and display config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreProfileRequest {
    pub variant: TableVariant,
    #[serde(default)]
    pub scores: NamedScores,
    #[serde(default)]
    pub chart: ChartConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreProfileRequestJsonContractV1 {
    pub schema_version: u32,
    pub request: ScoreProfileRequest,
}

/// Versioned table export for tabular display.
///
/// `group_column_name` is the header of the group column ("QI" or "Índice").
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultTableJsonContractV1<'a> {
    pub schema_version: u32,
    pub group_column_name: Option<&'static str>,
    pub table: &'a ResultTable,
}

impl ScoreProfileRequest {
    #[must_use]
    pub fn new(variant: TableVariant) -> Self {
        Self {
            variant,
            scores: NamedScores::new(),
            chart: ChartConfig::default(),
        }
    }

    /// Builds the table for this request with the default score policy.
    pub fn build_table(&self) -> ScoreResult<ResultTable> {
        build_table(self.variant, &self.scores, ScorePolicy::default())
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ScoreProfileRequestJsonContractV1 {
            schema_version: SCORE_PROFILE_REQUEST_JSON_SCHEMA_V1,
            request: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize request contract v1: {e}"))
        })
    }

    /// Parses either a bare request or a versioned v1 contract payload.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(request) = serde_json::from_str::<ScoreProfileRequest>(input) {
            return Ok(request);
        }
        let payload: ScoreProfileRequestJsonContractV1 =
            serde_json::from_str(input).map_err(|e| {
                ChartError::InvalidData(format!("failed to parse request json payload: {e}"))
            })?;
        if payload.schema_version != SCORE_PROFILE_REQUEST_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported request schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.request)
    }
}

impl ResultTable {
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize table json: {e}")))
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ResultTableJsonContractV1 {
            schema_version: RESULT_TABLE_JSON_SCHEMA_V1,
            group_column_name: self.group_column().map(GroupColumn::column_name),
            table: self,
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize table contract v1: {e}"))
        })
    }
}
