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
use std::fmt::Write;

use log::debug;

use crate::finding::{Finding, Findings, Level};
use crate::section::{Section, SectionId};

#[cfg(feature = "serde")]
use serde::Serialize;

/// The outcome of parsing one site log.
///
/// Parsing never fails. Whatever could be recognized is kept in the sections
/// and every problem is reported as a finding. Binding later adds typed values
/// to the sections and more findings.
#[derive(Clone, Default, Debug)]
pub struct ParsedLog {
    lines: Vec<String>,
    sections: BTreeMap<SectionId, Section>,
    findings: Findings,
    site_name: Option<String>,
    name_matched: Option<bool>,
    graphic: Option<String>,
}

/// A serializable summary of a parse run for highlighting the input.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Context {
    pub site: Option<String>,
    pub findings: BTreeMap<usize, (Level, String, Option<(usize, usize)>)>,
}

impl ParsedLog {
    /// Creates an empty log over the given input lines.
    pub fn new(lines: Vec<String>) -> Self {
        Self {
            lines,
            ..Default::default()
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line(&self, line: usize) -> Option<&str> {
        self.lines.get(line).map(String::as_str)
    }

    pub fn sections(&self) -> &BTreeMap<SectionId, Section> {
        &self.sections
    }

    pub fn section(&self, id: &SectionId) -> Option<&Section> {
        self.sections.get(id)
    }

    pub fn findings(&self) -> &Findings {
        &self.findings
    }

    pub fn findings_mut(&mut self) -> &mut Findings {
        &mut self.findings
    }

    /// Splits the log for binding: the input lines, the sections to bind and
    /// the findings to report to.
    pub fn split_mut(&mut self) -> (&[String], &mut BTreeMap<SectionId, Section>, &mut Findings) {
        (&self.lines, &mut self.sections, &mut self.findings)
    }

    pub fn site_name(&self) -> Option<&str> {
        self.site_name.as_deref()
    }

    pub fn set_site_name<S: Into<String>>(&mut self, name: Option<S>) {
        self.site_name = name.map(Into::into);
    }

    /// Whether the name declared in the log matched the expected one. `None`
    /// if either was unknown.
    pub fn name_matched(&self) -> Option<bool> {
        self.name_matched
    }

    pub fn set_name_matched(&mut self, matched: Option<bool>) {
        self.name_matched = matched;
    }

    /// The free text antenna graphic at the end of the log.
    pub fn graphic(&self) -> Option<&str> {
        self.graphic.as_deref()
    }

    pub(crate) fn set_lines(&mut self, lines: Vec<String>) {
        self.lines = lines;
    }

    pub(crate) fn set_graphic(&mut self, graphic: Option<String>) {
        self.graphic = graphic;
    }

    pub fn is_valid(&self) -> bool {
        self.findings.is_valid()
    }

    /// Stores the section unless one with the same identity exists.
    ///
    /// A duplicate is dropped and every line it covers is marked as an error.
    /// Returns `true` if the section was stored.
    pub fn add_section(&mut self, section: Section) -> bool {
        let id = section.id();
        if self.sections.contains_key(&id) {
            debug!("dropping duplicate section {id} at line {}", section.line());
            for line in section.line()..=section.line_end() {
                self.findings.add(
                    Finding::error(line, format!("Duplicate section {id}")).with_section(Some(id)),
                );
            }
            return false;
        }

        self.sections.insert(id, section);
        true
    }

    pub fn context(&self) -> Context {
        Context {
            site: self.site_name.clone(),
            findings: self
                .findings
                .iter()
                .map(|f| (f.line, (f.level, f.message.clone(), f.columns)))
                .collect(),
        }
    }

    /// Renders every finding next to the line it refers to.
    pub fn report(&self) -> String {
        let mut report = String::new();
        for finding in &self.findings {
            let line = self.line(finding.line).unwrap_or_default().trim_end();
            let _ = writeln!(report, "{finding}\n       {line}");
        }
        report
    }
}
