use std::fmt;
use std::num::IntErrorKind;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult, ScoreResult, ValidationError};

pub const MIN_SCORE: i64 = 0;
pub const MAX_SCORE: i64 = 18;
pub const DEFAULT_SCORE: i64 = 8;

/// Largest magnitude a `ScorePolicy` bound may take.
///
/// Keeps the score axis (one tick, grid line and label per integer) bounded.
pub const POLICY_SCORE_LIMIT: i64 = 1_000;

/// User input for one subtest before validation.
///
/// Deserializes from JSON `null`, integers, floats and strings, which are the
/// shapes a form layer hands over. Integers are held wide so values beyond
/// `i64` still report a range error instead of changing kind.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum RawScore {
    #[default]
    Absent,
    Int(i128),
    Float(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for RawScore {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(RawScoreVisitor)
    }
}

struct RawScoreVisitor;

impl<'de> Visitor<'de> for RawScoreVisitor {
    type Value = RawScore;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("null, a number or a string")
    }

    fn visit_unit<E: de::Error>(self) -> Result<RawScore, E> {
        Ok(RawScore::Absent)
    }

    fn visit_none<E: de::Error>(self) -> Result<RawScore, E> {
        Ok(RawScore::Absent)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<RawScore, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<RawScore, E> {
        Ok(RawScore::Int(i128::from(value)))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<RawScore, E> {
        Ok(RawScore::Int(i128::from(value)))
    }

    fn visit_i128<E: de::Error>(self, value: i128) -> Result<RawScore, E> {
        Ok(RawScore::Int(value))
    }

    fn visit_u128<E: de::Error>(self, value: u128) -> Result<RawScore, E> {
        Ok(RawScore::Int(i128::try_from(value).unwrap_or(i128::MAX)))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<RawScore, E> {
        Ok(RawScore::Float(value))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<RawScore, E> {
        Ok(RawScore::Text(value.to_owned()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<RawScore, E> {
        Ok(RawScore::Text(value))
    }
}

impl From<i64> for RawScore {
    fn from(value: i64) -> Self {
        Self::Int(i128::from(value))
    }
}

impl From<i32> for RawScore {
    fn from(value: i32) -> Self {
        Self::Int(i128::from(value))
    }
}

impl From<f64> for RawScore {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for RawScore {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for RawScore {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<RawScore>> From<Option<T>> for RawScore {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

/// Accepted score bounds plus the value substituted for absent input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ScorePolicyFields")]
pub struct ScorePolicy {
    min: i64,
    max: i64,
    default: i64,
}

#[derive(Deserialize)]
struct ScorePolicyFields {
    min: i64,
    max: i64,
    default: i64,
}

impl TryFrom<ScorePolicyFields> for ScorePolicy {
    type Error = ChartError;

    fn try_from(fields: ScorePolicyFields) -> ChartResult<Self> {
        Self::new(fields.min, fields.max, fields.default)
    }
}

impl Default for ScorePolicy {
    fn default() -> Self {
        Self {
            min: MIN_SCORE,
            max: MAX_SCORE,
            default: DEFAULT_SCORE,
        }
    }
}

impl ScorePolicy {
    pub fn new(min: i64, max: i64, default: i64) -> ChartResult<Self> {
        if min < -POLICY_SCORE_LIMIT || max > POLICY_SCORE_LIMIT {
            return Err(ChartError::InvalidConfig(format!(
                "score bounds must lie in [-{POLICY_SCORE_LIMIT}, {POLICY_SCORE_LIMIT}]"
            )));
        }
        if min > max {
            return Err(ChartError::InvalidConfig(format!(
                "score minimum {min} must not exceed maximum {max}"
            )));
        }
        if !(min..=max).contains(&default) {
            return Err(ChartError::InvalidConfig(format!(
                "default score {default} must lie in [{min}, {max}]"
            )));
        }
        Ok(Self { min, max, default })
    }

    #[must_use]
    pub fn min(self) -> i64 {
        self.min
    }

    #[must_use]
    pub fn max(self) -> i64 {
        self.max
    }

    #[must_use]
    pub fn default_score(self) -> i64 {
        self.default
    }

    #[must_use]
    pub fn contains(self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    fn out_of_range(self) -> ValidationError {
        ValidationError::OutOfRange {
            min: self.min,
            max: self.max,
        }
    }

    /// Validates one raw input against this policy.
    ///
    /// - absent input yields the default score
    /// - floats are always rejected, even when integral
    /// - strings holding a decimal point are accepted only when the fraction
    ///   is zero, so `"8.0"` validates to 8 while `"8.5"` does not
    pub fn validate(self, raw: &RawScore) -> ScoreResult<ValidatedScore> {
        let value = match raw {
            RawScore::Absent => self.default,
            RawScore::Int(value) => i64::try_from(*value).map_err(|_| self.out_of_range())?,
            RawScore::Float(_) => return Err(ValidationError::NotInteger),
            RawScore::Text(text) => self.parse_text(text)?,
        };

        if !self.contains(value) {
            return Err(self.out_of_range());
        }
        Ok(ValidatedScore(value))
    }

    /// Accepts optionally signed decimal digits, plus a fraction made only of
    /// zeros (`"8.0"`, `"8.00"`). Exponents and bare `"8."` / `".0"` forms are
    /// not integers.
    fn parse_text(self, text: &str) -> ScoreResult<i64> {
        let trimmed = text.trim();
        let whole = match trimmed.split_once('.') {
            Some((whole, fraction)) => {
                let digits = whole.strip_prefix(['+', '-']).unwrap_or(whole);
                if !is_ascii_digits(digits) || !is_ascii_digits(fraction) {
                    return Err(ValidationError::NotInteger);
                }
                if fraction.bytes().any(|byte| byte != b'0') {
                    return Err(ValidationError::NotInteger);
                }
                whole
            }
            None => trimmed,
        };

        whole.parse::<i64>().map_err(|err| match err.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => self.out_of_range(),
            _ => ValidationError::NotInteger,
        })
    }
}

fn is_ascii_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|byte| byte.is_ascii_digit())
}

/// Validates one raw input against the default 0..=18 policy.
pub fn validate(raw: &RawScore) -> ScoreResult<ValidatedScore> {
    ScorePolicy::default().validate(raw)
}

/// Integer score that passed validation against a `ScorePolicy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidatedScore(i64);

impl ValidatedScore {
    #[must_use]
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ValidatedScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ValidatedScore> for i64 {
    fn from(score: ValidatedScore) -> Self {
        score.0
    }
}
