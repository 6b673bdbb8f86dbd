//! Hub message shapes.
//!
//! An invocation names a hub method and its positional arguments:
//!
//! ```json
//! {"invocationId": "7", "target": "generateCodes", "arguments": [5, 6]}
//! ```
//!
//! Every invocation is answered with exactly one completion carrying either
//! a `result` or an `error`, echoing the `invocationId` when one was given:
//!
//! ```json
//! {"invocationId": "7", "result": true}
//! ```

use crate::error::HubError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Invocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invocation_id: Option<String>,
    pub target: String,
    #[serde(default)]
    pub arguments: Vec<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Completion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invocation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Completion {
    pub fn result(invocation_id: Option<String>, result: Value) -> Self {
        Self {
            invocation_id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(invocation_id: Option<String>, error: &HubError) -> Self {
        Self {
            invocation_id,
            result: None,
            error: Some(error.to_string()),
        }
    }
}

/// A decoded hub method call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HubCall {
    GenerateCodes { count: u16, length: u8 },
    UseCode { code: String },
    CheckIfCodeExists { code: String },
    GetTotalCodes,
}

impl HubCall {
    pub const GENERATE_CODES: &'static str = "generateCodes";
    pub const USE_CODE: &'static str = "useCode";
    pub const CHECK_IF_CODE_EXISTS: &'static str = "checkIfCodeExists";
    pub const GET_TOTAL_CODES: &'static str = "getTotalCodes";

    pub fn target(&self) -> &'static str {
        match self {
            HubCall::GenerateCodes { .. } => Self::GENERATE_CODES,
            HubCall::UseCode { .. } => Self::USE_CODE,
            HubCall::CheckIfCodeExists { .. } => Self::CHECK_IF_CODE_EXISTS,
            HubCall::GetTotalCodes => Self::GET_TOTAL_CODES,
        }
    }
}

/// Positional argument reader for one target.
struct Arguments {
    target: &'static str,
    values: std::vec::IntoIter<Value>,
}

impl Arguments {
    fn new(target: &'static str, values: Vec<Value>, expected: usize) -> Result<Self, HubError> {
        if values.len() != expected {
            return Err(HubError::ArgumentCount {
                target,
                expected,
                actual: values.len(),
            });
        }

        Ok(Self {
            target,
            values: values.into_iter(),
        })
    }

    fn next<T: DeserializeOwned>(&mut self, name: &'static str) -> Result<T, HubError> {
        let value = self.values.next().unwrap_or(Value::Null);
        serde_json::from_value(value).map_err(|e| HubError::InvalidArgument {
            target: self.target,
            name,
            reason: e.to_string(),
        })
    }
}

impl TryFrom<Invocation> for HubCall {
    type Error = HubError;

    fn try_from(invocation: Invocation) -> Result<Self, Self::Error> {
        let Invocation {
            target,
            arguments: values,
            ..
        } = invocation;

        let call = if target.eq_ignore_ascii_case(Self::GENERATE_CODES) {
            let mut args = Arguments::new(Self::GENERATE_CODES, values, 2)?;
            HubCall::GenerateCodes {
                count: args.next("count")?,
                length: args.next("length")?,
            }
        } else if target.eq_ignore_ascii_case(Self::USE_CODE) {
            let mut args = Arguments::new(Self::USE_CODE, values, 1)?;
            HubCall::UseCode {
                code: args.next("code")?,
            }
        } else if target.eq_ignore_ascii_case(Self::CHECK_IF_CODE_EXISTS) {
            let mut args = Arguments::new(Self::CHECK_IF_CODE_EXISTS, values, 1)?;
            HubCall::CheckIfCodeExists {
                code: args.next("code")?,
            }
        } else if target.eq_ignore_ascii_case(Self::GET_TOTAL_CODES) {
            Arguments::new(Self::GET_TOTAL_CODES, values, 0)?;
            HubCall::GetTotalCodes
        } else {
            return Err(HubError::UnknownTarget(target));
        };

        Ok(call)
    }
}
