//! Ridership response types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::ComplexId;

use super::error::RidershipError;

/// Raw row as returned by the dataset. The API sends most numbers as
/// strings, and any column may be missing.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RidershipRowDto {
    #[serde(default)]
    pub year: Option<Value>,
    #[serde(default)]
    pub month: Option<Value>,
    #[serde(default)]
    pub day_of_week: Option<Value>,
    #[serde(default)]
    pub hour_of_day: Option<Value>,
    #[serde(default)]
    pub origin_station_complex_id: Option<Value>,
    #[serde(default)]
    pub origin_station_complex_name: Option<Value>,
    #[serde(default)]
    pub destination_station_complex_id: Option<Value>,
    #[serde(default)]
    pub destination_station_complex_name: Option<Value>,
    #[serde(default)]
    pub estimated_average_ridership: Option<Value>,
}

/// Average ridership between two complexes in one hour.
///
/// Values that are missing or do not parse are `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RidershipRow {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day_of_week: Option<String>,
    pub hour_of_day: Option<u32>,
    pub origin: Option<ComplexId>,
    pub origin_name: Option<String>,
    pub destination: Option<ComplexId>,
    pub destination_name: Option<String>,
    pub estimated_average_ridership: Option<f64>,
}

impl From<RidershipRowDto> for RidershipRow {
    fn from(dto: RidershipRowDto) -> Self {
        Self {
            year: number(&dto.year),
            month: number(&dto.month),
            day_of_week: text(&dto.day_of_week),
            hour_of_day: number(&dto.hour_of_day),
            origin: complex(&dto.origin_station_complex_id),
            origin_name: text(&dto.origin_station_complex_name),
            destination: complex(&dto.destination_station_complex_id),
            destination_name: text(&dto.destination_station_complex_name),
            estimated_average_ridership: number(&dto.estimated_average_ridership),
        }
    }
}

/// Parse a JSON array of rows.
pub fn parse_rows(body: &str) -> Result<Vec<RidershipRow>, RidershipError> {
    let rows: Vec<RidershipRowDto> =
        serde_json::from_str(body).map_err(|e| RidershipError::Json {
            message: e.to_string(),
        })?;

    Ok(rows.into_iter().map(RidershipRow::from).collect())
}

fn text(value: &Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

fn number<T: std::str::FromStr>(value: &Option<Value>) -> Option<T> {
    text(value)?.parse().ok()
}

fn complex(value: &Option<Value>) -> Option<ComplexId> {
    text(value).and_then(|s| ComplexId::new(&s).ok())
}
