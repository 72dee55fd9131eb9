use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::params::{ParamKey, ParameterSet};

pub fn coerce(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

pub fn normalize_parameters(params: &mut ParameterSet) {
    for key in ParamKey::ALL {
        params.set(key, coerce(params.get(key)));
    }
}

pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(to_f64(&value).map(coerce).unwrap_or(0.0))
}

pub fn to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let sanitized = s
                .trim()
                .replace(',', "")
                .replace('%', "")
                .replace('$', "")
                .replace('_', "");
            sanitized.parse::<f64>().ok()
        }
        _ => None,
    }
}
