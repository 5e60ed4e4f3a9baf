use serde::Serialize;
use serde_json::Value;

use crate::API_VERSION;
use crate::contracts::types::{DemoData, ToolData, TrendsData};
use crate::error::{ClientError, ClientResult};

/// A command's result body, tied to the command name its envelope reports.
pub trait CommandPayload: Serialize {
    const COMMAND: &'static str;
}

impl CommandPayload for TrendsData {
    const COMMAND: &'static str = "trends";
}

impl CommandPayload for ToolData {
    const COMMAND: &'static str = "tool spend-trends";
}

impl CommandPayload for DemoData {
    const COMMAND: &'static str = "demo";
}

#[derive(Debug, Clone, Serialize)]
pub struct SuccessEnvelope {
    pub ok: bool,
    pub command: String,
    pub version: String,
    pub data: Value,
}

impl SuccessEnvelope {
    pub fn from_payload<P>(payload: &P) -> ClientResult<Self>
    where
        P: CommandPayload,
    {
        let data = serde_json::to_value(payload)
            .map_err(|err| ClientError::internal_serialization(&err.to_string()))?;
        Ok(Self {
            ok: true,
            command: P::COMMAND.to_string(),
            version: API_VERSION.to_string(),
            data,
        })
    }
}

/// Failure body as rendered by `--json`. Row issues and schema details ride
/// along in `data` when the error carries them.
#[derive(Debug, Clone, Serialize)]
pub struct FailureEnvelope {
    pub ok: bool,
    pub error: FailureDetail,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailureDetail {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
}

impl From<&ClientError> for FailureEnvelope {
    fn from(error: &ClientError) -> Self {
        Self {
            ok: false,
            error: FailureDetail {
                code: error.code.clone(),
                message: error.message.clone(),
                recovery_steps: error.recovery_steps.clone(),
            },
            data: error.data.clone(),
        }
    }
}
