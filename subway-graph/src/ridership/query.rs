//! Ridership query construction.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::domain::ComplexId;

use super::error::RidershipError;

/// Columns requested from the dataset, in response order.
pub const QUERY_COLUMNS: [&str; 9] = [
    "year",
    "month",
    "day_of_week",
    "hour_of_day",
    "origin_station_complex_id",
    "origin_station_complex_name",
    "destination_station_complex_id",
    "destination_station_complex_name",
    "estimated_average_ridership",
];

/// Day category used by the dataset's `day_of_week` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayType {
    Weekday,
    Saturday,
    Sunday,
}

impl DayType {
    pub fn as_str(self) -> &'static str {
        match self {
            DayType::Weekday => "Weekday",
            DayType::Saturday => "Saturday",
            DayType::Sunday => "Sunday",
        }
    }

    /// Category of a calendar date.
    pub fn from_date(date: NaiveDate) -> Self {
        match date.weekday() {
            Weekday::Sat => DayType::Saturday,
            Weekday::Sun => DayType::Sunday,
            _ => DayType::Weekday,
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown day type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown day type {0:?}: expected Weekday, Saturday or Sunday")]
pub struct InvalidDayType(pub String);

impl FromStr for DayType {
    type Err = InvalidDayType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekday" => Ok(DayType::Weekday),
            "saturday" => Ok(DayType::Saturday),
            "sunday" => Ok(DayType::Sunday),
            _ => Err(InvalidDayType(s.to_string())),
        }
    }
}

/// Filters for one ridership request. Unset filters are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RidershipQuery {
    pub year: Option<i32>,
    /// 1-12
    pub month: Option<u32>,
    pub day_type: Option<DayType>,
    /// 0-23
    pub hour: Option<u32>,
    pub origin: Option<ComplexId>,
    pub destination: Option<ComplexId>,
}

impl RidershipQuery {
    /// An unfiltered query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter on the year, month and day type of `date`.
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            year: Some(date.year()),
            month: Some(date.month()),
            day_type: Some(DayType::from_date(date)),
            ..Self::default()
        }
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_month(mut self, month: u32) -> Self {
        self.month = Some(month);
        self
    }

    pub fn with_day_type(mut self, day_type: DayType) -> Self {
        self.day_type = Some(day_type);
        self
    }

    pub fn with_hour(mut self, hour: u32) -> Self {
        self.hour = Some(hour);
        self
    }

    pub fn with_origin(mut self, origin: ComplexId) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn with_destination(mut self, destination: ComplexId) -> Self {
        self.destination = Some(destination);
        self
    }

    /// Check filter ranges before sending.
    pub fn validate(&self) -> Result<(), RidershipError> {
        if let Some(month) = self.month
            && !(1..=12).contains(&month)
        {
            return Err(RidershipError::InvalidQuery(format!(
                "month {month} outside 1-12"
            )));
        }
        if let Some(hour) = self.hour
            && hour > 23
        {
            return Err(RidershipError::InvalidQuery(format!(
                "hour {hour} outside 0-23"
            )));
        }
        Ok(())
    }

    /// SoQL `$where` expression, or `None` if no filter is set.
    pub fn where_clause(&self) -> Option<String> {
        let mut parts = Vec::new();

        if let Some(year) = self.year {
            parts.push(format!("year = {year}"));
        }
        if let Some(month) = self.month {
            parts.push(format!("month = {month}"));
        }
        if let Some(day_type) = self.day_type {
            parts.push(format!("day_of_week = '{day_type}'"));
        }
        if let Some(hour) = self.hour {
            parts.push(format!("hour_of_day = {hour}"));
        }
        if let Some(origin) = &self.origin {
            parts.push(format!("origin_station_complex_id = {}", complex_literal(origin)));
        }
        if let Some(destination) = &self.destination {
            parts.push(format!(
                "destination_station_complex_id = {}",
                complex_literal(destination)
            ));
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" AND "))
        }
    }

    /// Request parameters: app token (if any), column selection and filter.
    pub fn to_params(&self, app_token: Option<&str>) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(3);

        if let Some(token) = app_token {
            params.push(("$$app_token", token.to_string()));
        }
        params.push(("$select", QUERY_COLUMNS.join(",")));
        if let Some(clause) = self.where_clause() {
            params.push(("$where", clause));
        }

        params
    }
}

/// Numeric IDs are compared as numbers; anything else as a quoted string.
fn complex_literal(id: &ComplexId) -> String {
    if id.is_numeric() {
        id.to_string()
    } else {
        format!("'{}'", id.as_str().replace('\'', "''"))
    }
}
