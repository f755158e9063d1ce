use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct CalcRequest {
    pub expression: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct CalcResponse {
    pub result: f64,
}

/// A previously evaluated expression and its result
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct Calculation {
    pub expression: String,
    pub result: f64,
}

impl Calculation {
    pub fn new<S: Into<String>>(expression: S, result: f64) -> Calculation {
        Calculation {
            expression: expression.into(),
            result,
        }
    }
}
