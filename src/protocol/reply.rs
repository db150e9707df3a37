use serde::Serialize;

use crate::encoding::Record;

/// Reply to a query, one JSON object per line on the response stream
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Reply {
    /// The most recent record loaded for the code
    Success { data: Record },
    /// Nothing loaded under the queried code
    NotFound { uf: String },
}

impl Reply {
    pub fn not_found(code: impl Into<String>) -> Self {
        Reply::NotFound { uf: code.into() }
    }

    /// Encode the reply as a compact JSON line, newline included
    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        let mut buf = serde_json::to_vec(self)?;
        buf.push(b'\n');
        Ok(buf)
    }
}
