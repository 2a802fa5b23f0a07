//! Request payload → model feature vector.
//!
//! The frontend posts a loosely-typed form (`{"fever": 1, "age": "42", ...}`)
//! using its own key names. [`assemble`] maps it onto the exact column schema
//! the classifier was fit on, filling documented defaults for missing keys.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{EngineError, EngineResult};

/// Column order the classifier was trained with.
///
/// Model artifacts declaring anything else are rejected at load time.
pub const FEATURE_COLUMNS: [&str; 8] = [
    "fever",
    "cough",
    "fatigue",
    "difficulty_breathing",
    "age",
    "gender",
    "blood_pressure",
    "cholesterol_level",
];

/// Number of model input columns
pub const FEATURE_COUNT: usize = FEATURE_COLUMNS.len();

/// Model label echoed back when the request does not name one
pub const DEFAULT_MODEL_CHOICE: &str = "rf";

const DEFAULT_SYMPTOM: i64 = 0;
const DEFAULT_AGE: i64 = 30;
const DEFAULT_GENDER: i64 = 0;
const DEFAULT_BLOOD_PRESSURE: i64 = 1;
const DEFAULT_CHOLESTEROL: i64 = 1;

/// Patient gender as the training data labelled it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    /// Form code 1 is male; every other code is female.
    pub fn from_code(code: i64) -> Self {
        if code == 1 {
            Self::Male
        } else {
            Self::Female
        }
    }

    /// Categorical label used by the training pipeline.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Female => "female",
            Self::Male => "male",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Female => write!(f, "F"),
            Self::Male => write!(f, "M"),
        }
    }
}

/// One patient row, field order matching [`FEATURE_COLUMNS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub fever: i64,
    pub cough: i64,
    pub fatigue: i64,
    pub difficulty_breathing: i64,
    pub age: i64,
    pub gender: Gender,
    pub blood_pressure: i64,
    pub cholesterol_level: i64,
}

impl FeatureVector {
    /// Sum of the four symptom flags.
    pub fn symptom_count(&self) -> i64 {
        self.fever
            .saturating_add(self.cough)
            .saturating_add(self.fatigue)
            .saturating_add(self.difficulty_breathing)
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self {
            fever: DEFAULT_SYMPTOM,
            cough: DEFAULT_SYMPTOM,
            fatigue: DEFAULT_SYMPTOM,
            difficulty_breathing: DEFAULT_SYMPTOM,
            age: DEFAULT_AGE,
            gender: Gender::from_code(DEFAULT_GENDER),
            blood_pressure: DEFAULT_BLOOD_PRESSURE,
            cholesterol_level: DEFAULT_CHOLESTEROL,
        }
    }
}

/// Build a [`FeatureVector`] from a raw request payload.
///
/// Request keys: `fever`, `cough`, `fatigue`, `breathing`, `age`, `gender`,
/// `bloodPressure`, `cholesterol`. Missing keys take their defaults; present
/// keys must coerce to an integer.
///
/// # Errors
///
/// [`EngineError::InvalidPayload`] if `payload` is not an object and
/// [`EngineError::Coercion`] for a value that cannot be read as an integer.
pub fn assemble(payload: &Value) -> EngineResult<FeatureVector> {
    let fields = as_object(payload)?;

    Ok(FeatureVector {
        fever: read_int(fields, "fever", DEFAULT_SYMPTOM)?,
        cough: read_int(fields, "cough", DEFAULT_SYMPTOM)?,
        fatigue: read_int(fields, "fatigue", DEFAULT_SYMPTOM)?,
        difficulty_breathing: read_int(fields, "breathing", DEFAULT_SYMPTOM)?,
        age: read_int(fields, "age", DEFAULT_AGE)?,
        gender: Gender::from_code(read_int(fields, "gender", DEFAULT_GENDER)?),
        blood_pressure: read_int(fields, "bloodPressure", DEFAULT_BLOOD_PRESSURE)?,
        cholesterol_level: read_int(fields, "cholesterol", DEFAULT_CHOLESTEROL)?,
    })
}

/// The `model` field of the payload, echoed back as `model_used`.
///
/// Strings are returned verbatim, other JSON values as their JSON text.
pub fn model_choice(payload: &Value) -> String {
    match payload.get("model") {
        None => DEFAULT_MODEL_CHOICE.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn as_object(payload: &Value) -> EngineResult<&Map<String, Value>> {
    payload
        .as_object()
        .ok_or_else(|| EngineError::InvalidPayload(json_type(payload).to_string()))
}

fn read_int(fields: &Map<String, Value>, field: &'static str, default: i64) -> EngineResult<i64> {
    match fields.get(field) {
        None => Ok(default),
        Some(value) => coerce_int(field, value),
    }
}

/// Integer coercion with the same leniency the frontend relies on.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn coerce_int(field: &'static str, value: &Value) -> EngineResult<i64> {
    let invalid = || EngineError::Coercion {
        field,
        value: value.to_string(),
    };

    match value {
        Value::Bool(b) => Ok(i64::from(*b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i)
            } else if let Some(u) = n.as_u64() {
                Ok(i64::try_from(u).unwrap_or(i64::MAX))
            } else {
                match n.as_f64() {
                    // `as` saturates after truncating toward zero
                    Some(f) if f.is_finite() => Ok(f.trunc() as i64),
                    _ => Err(invalid()),
                }
            }
        }
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| invalid()),
        Value::Null | Value::Array(_) | Value::Object(_) => Err(invalid()),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
