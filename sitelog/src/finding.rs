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

//! Line addressed diagnostics.
//!
//! Every problem found while parsing or binding a site log is reported as a
//! [`Finding`] attached to a single (0-based) line of the input. Only one
//! finding is kept per line, which keeps the trail usable to highlight a
//! document line by line.

use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

use crate::section::SectionId;

#[cfg(feature = "serde")]
use serde::Serialize;

/// The severity of a [`Finding`].
///
/// Levels are ordered by their [priority](Level::priority), so an `Error`
/// compares greater than a `Warn`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Level {
    /// Placeholder or null content that was skipped on purpose.
    Ignored,
    /// Content that was understood but looks suspicious.
    Warn,
    /// Content that could not be understood. Makes the log invalid.
    Error,
}

impl Level {
    pub fn priority(&self) -> u8 {
        match self {
            Self::Ignored => 0,
            Self::Warn => 4,
            Self::Error => 5,
        }
    }

    /// The single letter code used when rendering findings.
    pub fn code(&self) -> char {
        match self {
            Self::Ignored => 'I',
            Self::Warn => 'W',
            Self::Error => 'E',
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A diagnostic attached to a line of the input.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Finding {
    pub line: usize,
    pub level: Level,
    pub message: String,
    /// Half-open character range within the line the finding refers to.
    pub columns: Option<(usize, usize)>,
    /// The section that was being visited when the finding was raised.
    pub section: Option<SectionId>,
}

impl Finding {
    pub fn new<S: Into<String>>(line: usize, level: Level, message: S) -> Self {
        Self {
            line,
            level,
            message: message.into(),
            columns: None,
            section: None,
        }
    }

    pub fn error<S: Into<String>>(line: usize, message: S) -> Self {
        Self::new(line, Level::Error, message)
    }

    pub fn warn<S: Into<String>>(line: usize, message: S) -> Self {
        Self::new(line, Level::Warn, message)
    }

    pub fn ignored<S: Into<String>>(line: usize, message: S) -> Self {
        Self::new(line, Level::Ignored, message)
    }

    pub fn with_columns(mut self, columns: Option<(usize, usize)>) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_section(mut self, section: Option<SectionId>) -> Self {
        self.section = section;
        self
    }

    pub fn priority(&self) -> u8 {
        self.level.priority()
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:>4}) [{}]: {}", self.line, self.level, self.message)
    }
}

////////////////////////////////////////////////////////////////////////////////
// Findings                                                                   //
////////////////////////////////////////////////////////////////////////////////

/// The findings of a parse run, keyed and ordered by line.
#[derive(Clone, Default, Debug)]
pub struct Findings {
    map: BTreeMap<usize, Finding>,
}

impl Findings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the finding, replacing any finding at the same line.
    pub fn add(&mut self, finding: Finding) {
        self.map.insert(finding.line, finding);
    }

    /// Adds the finding unless the line already holds a finding of higher
    /// priority. Returns `true` if the finding was stored.
    pub fn escalate(&mut self, finding: Finding) -> bool {
        match self.map.get(&finding.line) {
            Some(existing) if existing.priority() > finding.priority() => false,
            _ => {
                self.map.insert(finding.line, finding);
                true
            }
        }
    }

    pub fn remove(&mut self, line: usize) -> Option<Finding> {
        self.map.remove(&line)
    }

    /// Discards every finding at or after `line`.
    pub fn truncate_from(&mut self, line: usize) {
        self.map.split_off(&line);
    }

    pub fn get(&self, line: usize) -> Option<&Finding> {
        self.map.get(&line)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// All findings in ascending line order.
    pub fn iter(&self) -> btree_map::Values<'_, usize, Finding> {
        self.map.values()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.at_level(Level::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.at_level(Level::Warn)
    }

    pub fn ignored(&self) -> impl Iterator<Item = &Finding> {
        self.at_level(Level::Ignored)
    }

    /// Returns `true` if no finding is an error.
    pub fn is_valid(&self) -> bool {
        self.errors().next().is_none()
    }

    fn at_level(&self, level: Level) -> impl Iterator<Item = &Finding> {
        self.map.values().filter(move |f| f.level == level)
    }
}

impl<'a> IntoIterator for &'a Findings {
    type Item = &'a Finding;
    type IntoIter = btree_map::Values<'a, usize, Finding>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_finding_replaces_earlier_on_add() {
        let mut findings = Findings::new();
        findings.add(Finding::error(3, "broken"));
        findings.add(Finding::warn(3, "odd"));

        assert_eq!(findings.len(), 1);
        assert_eq!(findings.get(3).map(|f| f.level), Some(Level::Warn));
    }

    #[test]
    fn escalate_never_downgrades() {
        let mut findings = Findings::new();
        findings.add(Finding::error(3, "broken"));

        assert!(!findings.escalate(Finding::warn(3, "odd")));
        assert_eq!(findings.get(3).map(|f| f.level), Some(Level::Error));

        assert!(findings.escalate(Finding::error(4, "also broken")));
        assert!(findings.escalate(Finding::error(4, "replaced")));
        assert_eq!(findings.get(4).unwrap().message, "replaced");
    }

    #[test]
    fn views_are_sorted_by_line() {
        let mut findings = Findings::new();
        findings.add(Finding::warn(10, "b"));
        findings.add(Finding::ignored(2, "a"));
        findings.add(Finding::warn(5, "c"));
        findings.add(Finding::error(7, "d"));

        let lines: Vec<usize> = findings.warnings().map(|f| f.line).collect();
        assert_eq!(lines, vec![5, 10]);
        assert_eq!(findings.ignored().count(), 1);
        assert!(!findings.is_valid());

        findings.remove(7);
        assert!(findings.is_valid());
    }

    #[test]
    fn truncate_drops_tail() {
        let mut findings = Findings::new();
        for line in 0..10 {
            findings.add(Finding::warn(line, "x"));
        }
        findings.truncate_from(6);

        assert_eq!(findings.len(), 6);
        assert!(findings.get(6).is_none());
        assert!(findings.get(5).is_some());
    }

    #[test]
    fn renders_level_code() {
        let finding = Finding::warn(12, "Unrecognized line");
        assert_eq!(finding.to_string(), "(  12) [W]: Unrecognized line");
        assert_eq!(finding.level.code(), 'W');
        assert!(Level::Error > Level::Warn && Level::Warn > Level::Ignored);
    }
}
