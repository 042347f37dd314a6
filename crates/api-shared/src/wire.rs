//! JSON request and response bodies.
//!
//! These are the REST boundary types. They translate from core types and never flow back into
//! the core: confirmation requests carry a name that is resolved again server-side.

use chrono::{DateTime, Utc};
use namaste_core::{ConfirmationReceipt, DiagnosisEntry, Resolution};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginReq {
    pub abha_token: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LoginRes {
    pub authenticated: bool,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ListDiagnosesRes {
    /// Every known diagnosis name, in vocabulary order.
    pub names: Vec<String>,
    /// Names suitable for one-click examples.
    pub samples: Vec<String>,
}

/// Query string of `GET /suggestions`.
#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SuggestionsQuery {
    /// Partial diagnosis name.
    #[serde(default)]
    pub q: String,
    /// Maximum number of suggestions; defaults to the server setting.
    pub max: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SuggestionsRes {
    pub query: String,
    pub suggestions: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ResolveReq {
    pub diagnosis_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DiagnosisRes {
    pub name: String,
    pub namaste_code: String,
    pub icd11_tm2_code: String,
    pub icd11_biomed_code: String,
}

impl From<&DiagnosisEntry> for DiagnosisRes {
    fn from(entry: &DiagnosisEntry) -> Self {
        Self {
            name: entry.name.clone(),
            namaste_code: entry.namaste_code.clone(),
            icd11_tm2_code: entry.icd11_tm2_code.clone(),
            icd11_biomed_code: entry.icd11_biomed_code.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ResolveRes {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<DiagnosisRes>,
}

impl From<&Resolution> for ResolveRes {
    fn from(resolution: &Resolution) -> Self {
        Self {
            found: resolution.is_found(),
            diagnosis: resolution.entry().map(DiagnosisRes::from),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ConfirmReq {
    pub diagnosis_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ConfirmRes {
    pub confirmed: bool,
    pub confirmation_id: Uuid,
    pub confirmed_at: DateTime<Utc>,
    pub diagnosis: DiagnosisRes,
}

impl From<&ConfirmationReceipt> for ConfirmRes {
    fn from(receipt: &ConfirmationReceipt) -> Self {
        Self {
            confirmed: true,
            confirmation_id: receipt.id,
            confirmed_at: receipt.confirmed_at,
            diagnosis: DiagnosisRes::from(&receipt.entry),
        }
    }
}
