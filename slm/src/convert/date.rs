// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Joe Pearson
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use sitelog::Value;

use super::{try_prefixes, Converted, Outcome};
use crate::error::ConvertError;

/// Template texts standing in for a date.
pub const DATE_PLACEHOLDERS: &[&str] = &["CCYY-MM-DD", "DD-MMM-YYYY"];

/// Zone designators seen in the wild, all meaning UTC.
const UTC_DESIGNATORS: [&str; 5] = ["UTUT", "UTC", "GMT", "UT", "Z"];

const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M%z",
];

const NAIVE_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H",
];

const DATE_FORMATS: [&str; 6] = ["%Y-%m-%d", "%d-%b-%Y", "%Y/%m/%d", "%Y %m %d", "%d %b %Y", "%Y%m%d"];

/// Which side of an effective date range to read.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Bound {
    Start,
    End,
}

impl Bound {
    fn index(&self) -> usize {
        match self {
            Self::Start => 0,
            Self::End => 1,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
        }
    }
}

fn is_placeholder(value: &str) -> bool {
    let upper = value.to_uppercase();
    DATE_PLACEHOLDERS.iter().any(|p| upper.contains(p))
}

fn split_zone(value: &str) -> (&str, Option<FixedOffset>) {
    for designator in UTC_DESIGNATORS {
        let Some(split) = value.len().checked_sub(designator.len()) else {
            continue;
        };
        let matched = value
            .get(split..)
            .is_some_and(|suffix| suffix.eq_ignore_ascii_case(designator));
        if matched {
            return (value[..split].trim_end(), FixedOffset::east_opt(0));
        }
    }
    (value, None)
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

/// Reads a date and time in any of the notations found in site logs. Times
/// without zone are taken as UTC.
fn parse_datetime(value: &str) -> Option<DateTime<FixedOffset>> {
    let (text, zone) = split_zone(value.trim());
    if zone.is_none() {
        let aware = DateTime::parse_from_rfc3339(text).ok().or_else(|| {
            OFFSET_FORMATS
                .iter()
                .find_map(|format| DateTime::parse_from_str(text, format).ok())
        });
        if aware.is_some() {
            return aware;
        }
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| parse_date(text).and_then(|date| date.and_hms_opt(0, 0, 0)))?;
    naive
        .and_local_timezone(zone.or_else(|| FixedOffset::east_opt(0))?)
        .single()
}

fn date_only(value: &str) -> Converted {
    let value = value.trim();
    if value.is_empty() {
        return Ok(Outcome::Bound(Value::Null));
    }
    if is_placeholder(value) {
        return Ok(Outcome::ignored(format!("{value} is a placeholder.")));
    }

    parse_date(value)
        .or_else(|| parse_datetime(value).map(|dt| dt.date_naive()))
        .map(|date| Outcome::Bound(Value::Date(date)))
        .ok_or_else(|| ConvertError::Date(value.to_string()))
}

fn datetime_only(value: &str) -> Converted {
    let value = value.trim();
    if value.is_empty() {
        return Ok(Outcome::Bound(Value::Null));
    }
    if is_placeholder(value) {
        return Ok(Outcome::ignored(format!("{value} is a placeholder.")));
    }

    parse_datetime(value)
        .map(|dt| Outcome::Bound(Value::DateTime(dt)))
        .ok_or_else(|| ConvertError::DateTime(value.to_string()))
}

/// Reads a date, tolerating trailing words.
///
/// ```
/// use slm::convert::{to_date, Outcome};
/// use sitelog::Value;
///
/// let date = chrono::NaiveDate::from_ymd_opt(2019, 5, 1).unwrap();
/// assert_eq!(to_date("2019-05-01"), Ok(Outcome::Bound(Value::Date(date))));
/// assert_eq!(to_date("01-May-2019"), Ok(Outcome::Bound(Value::Date(date))));
/// assert_eq!(to_date("2019-05-01T12:00Z"), Ok(Outcome::Bound(Value::Date(date))));
/// ```
pub fn to_date(value: &str) -> Converted {
    try_prefixes(value, date_only)
}

/// Reads a date and time, tolerating trailing words.
pub fn to_datetime(value: &str) -> Converted {
    try_prefixes(value, datetime_only)
}

/// Reads one side of a date range like `2004-06-18/2010-01-01`.
///
/// Ignored dates are narrowed down to their columns within the value.
pub fn effective_date(value: &str, bound: Bound) -> Converted {
    if value.trim().is_empty() {
        return Ok(Outcome::Bound(Value::Null));
    }

    let separator = if value.contains('/') { "/" } else { " - " };
    let Some(part) = value.split(separator).nth(bound.index()) else {
        return Ok(Outcome::Bound(Value::Null));
    };
    if part.trim().is_empty() {
        return Ok(Outcome::Bound(Value::Null));
    }

    match to_date(part.trim()) {
        Ok(Outcome::Ignored { message, .. }) => {
            let columns = value.find(part).map(|start| (start, start + part.len()));
            Ok(Outcome::Ignored { message, columns })
        }
        Ok(outcome) => Ok(outcome),
        Err(_) if DATE_PLACEHOLDERS.contains(&part.trim().to_uppercase().as_str()) => {
            Ok(Outcome::Bound(Value::Null))
        }
        Err(_) => Err(ConvertError::EffectiveDate {
            value: value.to_string(),
            label: bound.label(),
        }),
    }
}
