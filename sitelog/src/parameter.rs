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

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::value::Value;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Characters that are dropped when names are compared.
pub const SPECIAL_CHARACTERS: &str = "().,-_[]{}<>+%";

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\([^()]+\)$").expect("static regex must compile"));

/// Normalizes a name for comparison.
///
/// Special characters and whitespace are removed and the remainder is
/// upper-cased, so `"Date Prepared"` and `"date-prepared"` compare equal.
///
/// ```
/// assert_eq!(sitelog::normalize("Marker->ARP Up Ecc. (m)"), "MARKERARPUPECCM");
/// ```
pub fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !SPECIAL_CHARACTERS.contains(*c) && !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// A named value of a section.
///
/// The value may span several lines, in which case every line contributes one
/// entry to [`values`](Parameter::values).
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Parameter {
    line: usize,
    line_end: usize,
    name: String,
    values: Vec<String>,
    bound: BTreeMap<String, Value>,
}

impl Parameter {
    pub fn new<N, V>(line: usize, name: N, value: V) -> Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        Self {
            line,
            line_end: line,
            name: name.into(),
            values: vec![value.into()],
            bound: BTreeMap::new(),
        }
    }

    /// Appends a continuation line to the value.
    pub fn append<V: Into<String>>(&mut self, line: usize, value: V) {
        self.values.push(value.into());
        self.line_end = self.line_end.max(line);
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn line_end(&self) -> usize {
        self.line_end
    }

    /// The lines the parameter spans, inclusive.
    pub fn lines(&self) -> std::ops::RangeInclusive<usize> {
        self.line..=self.line_end
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn normalized_name(&self) -> String {
        normalize(&self.name)
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// The value with continuation lines joined by newlines.
    pub fn value(&self) -> String {
        self.values.join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.values.iter().all(|v| v.trim().is_empty())
    }

    /// Returns `true` if the value is a parenthesized placeholder like
    /// `(multiple lines)` left over from the blank template.
    pub fn is_placeholder(&self) -> bool {
        PLACEHOLDER.is_match(&self.values.concat())
    }

    /// The values this parameter was converted into, keyed by field.
    pub fn bound(&self) -> &BTreeMap<String, Value> {
        &self.bound
    }

    pub(crate) fn bind(&mut self, field: &str, value: Value) {
        self.bound.insert(field.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_names() {
        assert_eq!(normalize("Date Prepared"), "DATEPREPARED");
        assert_eq!(normalize("  Elevation (m,ellips.)"), "ELEVATIONMELLIPS");
        assert_eq!(normalize("E-mail"), "EMAIL");
        assert_eq!(normalize("Primary Contact::Contact Name"), "PRIMARYCONTACT::CONTACTNAME");
    }

    #[test]
    fn multi_line_values() {
        let mut param = Parameter::new(4, "Additional Information", "first");
        param.append(5, "second");

        assert_eq!(param.value(), "first\nsecond");
        assert_eq!(param.lines(), 4..=5);
        assert!(!param.is_empty());
        assert!(!param.is_placeholder());
    }

    #[test]
    fn detects_placeholders() {
        assert!(Parameter::new(0, "Date Prepared", "(CCYY-MM-DD)").is_placeholder());
        assert!(Parameter::new(0, "Notes", "(multiple lines)").is_placeholder());
        assert!(!Parameter::new(0, "Notes", "(a) and (b)").is_placeholder());
        assert!(Parameter::new(0, "Notes", "  ").is_empty());
    }
}
