use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

/// One scored candidate as returned by the scoring service.
///
/// Every field is required; extra fields the service attaches (`skills`,
/// `experience_score`, `id`, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateResult {
    pub name: String,
    pub university: String,
    pub uni_tier_score: f64,    // 0 – 10
    pub python_score: f64,      // 0 – 10
    pub python_experience_years: f64,
    pub final_rank_score: f64,  // 0.0 – 10.0
    pub evidence_quote: String,
}

/// Candidates in rank order as the service returned them. Index 0 is rank 1.
pub type RankingList = Vec<CandidateResult>;

/// Body of `POST /api/analyze`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub resume_text: String,
    pub job_description: String,
    pub use_ai: bool,
}

/// Body of `POST /api/ranking`. Candidate inputs are forwarded untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingRequest {
    pub candidates: Vec<Value>,
}

/// Response wrapper shared by both endpoints. Only `success` drives branching;
/// an envelope without it counts as a failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiEnvelope {
    /// Decodes the `data` payload into a typed value.
    /// A missing payload decodes as JSON `null`, which fails for struct and list targets.
    pub fn decode_data<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(self.data.clone().unwrap_or(Value::Null))
    }
}

#[cfg(test)]
impl ApiEnvelope {
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failed(error: Option<&str>) -> Self {
        Self {
            success: false,
            data: None,
            error: error.map(str::to_string),
        }
    }
}
