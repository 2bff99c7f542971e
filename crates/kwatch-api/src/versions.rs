use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub const API_VERSION_V1BETA1: &str = "v1beta1";
pub const API_VERSION_V1BETA2: &str = "v1beta2";
pub const API_VERSION_V1: &str = "v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiVersion {
    V1Beta1,
    V1Beta2,
    V1,
}

impl ApiVersion {
    pub const ALL: [ApiVersion; 3] = [ApiVersion::V1Beta1, ApiVersion::V1Beta2, ApiVersion::V1];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::V1Beta1 => API_VERSION_V1BETA1,
            Self::V1Beta2 => API_VERSION_V1BETA2,
            Self::V1 => API_VERSION_V1,
        }
    }
}

impl Display for ApiVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown api version `{0}` (expected one of v1beta1, v1beta2, v1)")]
pub struct ParseApiVersionError(pub String);

impl FromStr for ApiVersion {
    type Err = ParseApiVersionError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input {
            API_VERSION_V1BETA1 => Ok(Self::V1Beta1),
            API_VERSION_V1BETA2 => Ok(Self::V1Beta2),
            API_VERSION_V1 => Ok(Self::V1),
            _ => Err(ParseApiVersionError(input.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "versions_test.rs"]
mod tests;
