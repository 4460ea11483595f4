use serde_json::{Map, Value};

use super::errors::{PredictionError, PredictionResult};
use super::types::OracleVerdict;

/// Extracts the JSON prediction embedded in free oracle text
///
/// The object is taken to span from the first `{` to the last `}`, which
/// tolerates prose or markdown fences around it. Missing or `null` fields
/// read as `0.0`; numbers and numeric strings coerce to `f64`. The oracle's
/// `actualWaitTime` is never stored, so an unusable value there reads as
/// `0.0` instead of failing the verdict.
///
/// # Example
/// ```
/// use smartqueue_api::forecast::parser::parse;
///
/// let verdict = parse(r#"Sure! {"predictedWaitTime": 5, "accuracy": 0.9} Thanks."#).unwrap();
/// assert_eq!(verdict.predicted_wait_time, 5.0);
/// assert_eq!(verdict.accuracy, 0.9);
/// ```
pub fn parse(raw: &str) -> PredictionResult<OracleVerdict> {
    let (start, end) = match (raw.find('{'), raw.rfind('}')) {
        (Some(start), Some(end)) if start < end => (start, end),
        _ => return Err(PredictionError::malformed("no JSON object found", raw)),
    };

    let value: Value = serde_json::from_str(&raw[start..=end])
        .map_err(|e| PredictionError::malformed(format!("invalid JSON: {}", e), raw))?;

    let Value::Object(fields) = value else {
        return Err(PredictionError::malformed("JSON payload is not an object", raw));
    };

    Ok(OracleVerdict {
        predicted_wait_time: number_field(&fields, "predictedWaitTime", raw)?,
        accuracy: number_field(&fields, "accuracy", raw)?,
        reported_actual_wait_time: number_field(&fields, "actualWaitTime", raw).unwrap_or_else(
            |e| {
                tracing::debug!(error = %e, "Ignoring unusable actualWaitTime from oracle");
                0.0
            },
        ),
    })
}

fn number_field(fields: &Map<String, Value>, name: &str, raw: &str) -> PredictionResult<f64> {
    let non_numeric = || PredictionError::malformed(format!("field {} is not numeric", name), raw);

    match fields.get(name) {
        None | Some(Value::Null) => Ok(0.0),
        Some(Value::Number(n)) => n.as_f64().ok_or_else(non_numeric),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .ok_or_else(non_numeric),
        Some(_) => Err(non_numeric()),
    }
}
