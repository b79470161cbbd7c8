use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

use super::PlotSpec;

pub const PLOT_SPEC_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotSpecJsonContractV1 {
    pub schema_version: u32,
    pub spec: PlotSpec,
}

impl PlotSpec {
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidSpec(format!("failed to serialize plot spec: {e}")))
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = PlotSpecJsonContractV1 {
            schema_version: PLOT_SPEC_JSON_SCHEMA_V1,
            spec: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidSpec(format!("failed to serialize plot spec contract v1: {e}"))
        })
    }

    /// Accepts either a bare spec or a versioned contract envelope.
    ///
    /// Input without a top-level `schema_version` key is parsed as a bare
    /// spec, and its parse error is the one reported.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        let value: serde_json::Value = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidSpec(format!("failed to parse plot spec json payload: {e}"))
        })?;

        if value.get("schema_version").is_none() {
            return serde_json::from_value(value).map_err(|e| {
                ChartError::InvalidSpec(format!("failed to parse plot spec json: {e}"))
            });
        }

        let payload: PlotSpecJsonContractV1 = serde_json::from_value(value).map_err(|e| {
            ChartError::InvalidSpec(format!("failed to parse plot spec contract v1: {e}"))
        })?;
        if payload.schema_version != PLOT_SPEC_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidSpec(format!(
                "unsupported plot spec schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.spec)
    }
}
