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

//! Parser of the legacy ASCII site log.
//!
//! The parser only recovers the structure of a log: numbered sections holding
//! `name : value` parameters. It never interprets values. Lines it cannot
//! place are reported as findings, so a human can review them.

use std::sync::LazyLock;

use log::{debug, trace};
use regex::{Captures, Regex};

use crate::finding::{Finding, Findings};
use crate::parameter::{normalize, Parameter};
use crate::parsed::ParsedLog;
use crate::section::{Index, Section, SectionId};

/// Boilerplate of the blank template that may appear outside of parameters.
pub const IGNORED_LINES: [&str; 7] = [
    "If Update:",
    "Approximate Position",
    "Approximate Position (ITRF)",
    "Differential Components from GNSS Marker to the tied monument (ITRS)",
    "Hardcopy on File",
    "Antenna Graphics with Dimensions",
    "(insert text graphic from file antenna.gra)",
];

/// Lines that group the indented parameters below them.
pub const SUB_HEADINGS: [&str; 2] = ["Primary Contact", "Secondary Contact"];

/// Free text parameters after which a section accepts no further lines.
pub const SECTION_BREAKERS: [&str; 2] = ["Additional Information", "Notes"];

/// Parameters of section 1 that declare the station identifier.
const SITE_ID_PARAMETERS: [&str; 3] = ["Nine Character ID", "Four Character ID", "4 char ID"];

struct Patterns {
    section: Regex,
    parameter: Regex,
    continuation: Regex,
}

impl Patterns {
    fn new() -> Self {
        Self {
            section: Regex::new(
                r"^([0-9]+)[.](?:([0-9xX]+)[.]?)?(?:([0-9xX]+)[.]?)?\s*([\w\s().,-]+)?",
            )
            .expect("static regex must compile"),
            parameter: Regex::new(r"^\s*([\w\s/().,_<>+%-]+)\s*:\s*(.*)$")
                .expect("static regex must compile"),
            continuation: Regex::new(r"^\s+:\s+(.*)").expect("static regex must compile"),
        }
    }
}

static PATTERNS: LazyLock<Patterns> = LazyLock::new(Patterns::new);

/// Parser of legacy site logs.
///
/// The defaults understand logs following the IGS template. Use the builder
/// methods to adjust the boilerplate the parser should know about.
///
/// ```
/// use sitelog::SiteLogParser;
///
/// let text = "\
/// AAAA00USA Site Information Form (site log)
///
/// 0.   Form
///
///      Prepared by (full name)  : Jane Doe
///      Date Prepared            : 2022-09-09
/// ";
///
/// let log = SiteLogParser::new().site_name("AAAA00USA").parse(text);
/// assert_eq!(log.name_matched(), Some(true));
/// assert!(log.is_valid());
///
/// let form = log.sections().values().next().unwrap();
/// assert_eq!(form.parameter("Date Prepared").unwrap().value(), "2022-09-09");
/// ```
#[derive(Clone, Debug)]
pub struct SiteLogParser {
    site_name: Option<String>,
    ignored_lines: Vec<String>,
    sub_headings: Vec<String>,
    section_breakers: Vec<String>,
}

impl Default for SiteLogParser {
    fn default() -> Self {
        Self {
            site_name: None,
            ignored_lines: IGNORED_LINES.iter().map(|l| normalize(l)).collect(),
            sub_headings: SUB_HEADINGS.iter().map(|l| normalize(l)).collect(),
            section_breakers: SECTION_BREAKERS.iter().map(|l| normalize(l)).collect(),
        }
    }
}

impl SiteLogParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the 4 or 9 character identifier the log is expected to describe.
    pub fn site_name<S: AsRef<str>>(mut self, name: S) -> Self {
        self.site_name = Some(name.as_ref().trim().to_uppercase());
        self
    }

    pub fn ignored_lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.ignored_lines = lines.into_iter().map(|l| normalize(l.as_ref())).collect();
        self
    }

    pub fn sub_headings<I, S>(mut self, headings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.sub_headings = headings.into_iter().map(|h| normalize(h.as_ref())).collect();
        self
    }

    pub fn section_breakers<I, S>(mut self, breakers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.section_breakers = breakers.into_iter().map(|b| normalize(b.as_ref())).collect();
        self
    }

    /// Parses the site log. This never fails, all problems are reported as
    /// findings of the returned log.
    pub fn parse(&self, text: &str) -> ParsedLog {
        let lines: Vec<String> = text
            .split('\n')
            .map(|line| line.trim_end_matches('\r').to_string())
            .collect();

        let mut visitor = Visitor::new(self, &lines);
        let mut idx = 0;
        while idx < lines.len() {
            idx = visitor.visit_line(idx);
        }

        let mut log = visitor.finish();
        log.set_lines(lines);
        log
    }
}

////////////////////////////////////////////////////////////////////////////////
// Visitor                                                                    //
////////////////////////////////////////////////////////////////////////////////

#[derive(Default)]
struct SubHeading {
    name: String,
    active: bool,
}

struct Visitor<'a> {
    config: &'a SiteLogParser,
    lines: &'a [String],
    log: ParsedLog,
    site_name: Option<String>,
    name_matched: Option<bool>,
    graphic_start: usize,
    sub_heading: SubHeading,
    last_indent: Option<usize>,
}

impl<'a> Visitor<'a> {
    fn new(config: &'a SiteLogParser, lines: &'a [String]) -> Self {
        Self {
            config,
            lines,
            log: ParsedLog::default(),
            site_name: None,
            name_matched: None,
            graphic_start: 0,
            sub_heading: SubHeading::default(),
            last_indent: None,
        }
    }

    fn findings(&mut self) -> &mut Findings {
        self.log.findings_mut()
    }

    fn is_ignored(&self, line: &str) -> bool {
        self.config.ignored_lines.contains(&normalize(line))
    }

    /// Visits a line outside of any section and returns the index of the
    /// next line to visit.
    fn visit_line(&mut self, idx: usize) -> usize {
        let lines = self.lines;
        let line = lines[idx].trim();
        if line.is_empty() {
            return idx + 1;
        }

        if let Some(caps) = PATTERNS.section.captures(line) {
            if let Some((id, remainder)) = section_id(&caps, line) {
                return self.visit_section(idx, id, &caps, remainder);
            }
        }

        if !self.log.sections().is_empty() && !self.is_ignored(line) {
            self.findings().add(Finding::warn(idx, "Unrecognized line"));
        } else {
            self.graphic_start = idx + 1;
            self.scan_site_name(idx, line);
        }

        idx + 1
    }

    fn visit_section(&mut self, idx: usize, id: SectionId, caps: &Captures, remainder: &str) -> usize {
        let header = caps.get(4).map_or("", |m| m.as_str().trim());
        let mut section = Section::new(idx, id, header);
        trace!("section {id} at line {idx}");

        // the header line may already hold the first parameter
        let mut next = idx + self.visit_section_line(idx, &format!("{remainder} "), &mut section, true);

        while next < self.lines.len() && !PATTERNS.section.is_match(self.lines[next].trim()) {
            if self
                .config
                .section_breakers
                .iter()
                .any(|breaker| section.contains_parameter(breaker))
            {
                break;
            }

            let lines = self.lines;
            next += self.visit_section_line(next, &lines[next], &mut section, false);
        }

        let lines = section.line()..=section.line_end();
        let example = section.is_example();
        self.log.add_section(section);

        if example {
            for line in lines {
                self.findings()
                    .add(Finding::ignored(line, "Placeholder text").with_section(Some(id)));
            }
        }

        self.sub_heading = SubHeading::default();
        self.last_indent = None;
        next
    }

    /// Visits a line of a section and returns how many lines were consumed.
    fn visit_section_line(
        &mut self,
        idx: usize,
        line: &str,
        section: &mut Section,
        header_line: bool,
    ) -> usize {
        if line.trim().is_empty() {
            return 1;
        }

        if !header_line {
            self.track_indent(line);
        }

        let Some(caps) = PATTERNS.parameter.captures(line) else {
            if !header_line {
                let normalized = normalize(line);
                if self.config.ignored_lines.contains(&normalized) {
                    trace!("ignoring boilerplate at line {idx}");
                } else if self.config.sub_headings.contains(&normalized) {
                    self.sub_heading.name = normalized;
                } else {
                    self.findings()
                        .add(Finding::warn(idx, "Unrecognized line").with_section(Some(section.id())));
                }
            }
            return 1;
        };

        let name = caps.get(1).map_or("", |m| m.as_str().trim());
        let value = caps.get(2).map_or("", |m| m.as_str().trim());
        let name = match &self.sub_heading {
            SubHeading { name: heading, active: true } if !heading.is_empty() => {
                format!("{heading}::{name}")
            }
            _ => name.to_string(),
        };

        let mut parameter = Parameter::new(idx, name, value);
        if parameter.is_placeholder() {
            self.findings()
                .add(Finding::ignored(idx, "Placeholder text").with_section(Some(section.id())));
        }
        self.graphic_start = idx + 1;

        let lines = self.lines;
        let mut consumed = 1;
        while let Some(next) = lines.get(idx + consumed) {
            if !next.trim().is_empty() {
                let Some(caps) = PATTERNS.continuation.captures(next) else {
                    break;
                };
                let value = caps.get(1).map_or("", |m| m.as_str().trim());
                parameter.append(idx + consumed, value);
                self.graphic_start = idx + consumed + 1;
            }
            consumed += 1;
        }

        if let Err(duplicate) = section.add_parameter(parameter) {
            let message = format!("Duplicate parameter: {}", duplicate.name());
            self.findings()
                .add(Finding::error(duplicate.line(), message).with_section(Some(section.id())));
        }

        consumed
    }

    fn track_indent(&mut self, line: &str) {
        let indent: usize = line
            .chars()
            .map_while(|c| match c {
                ' ' => Some(1),
                '\t' => Some(4),
                _ => None,
            })
            .sum();

        if let Some(last) = self.last_indent {
            if indent > last {
                self.sub_heading.active = true;
            } else if indent < last {
                self.sub_heading = SubHeading::default();
            } else if !self.sub_heading.active {
                self.sub_heading.name.clear();
            }
        }

        self.last_indent = Some(indent);
    }

    /// Looks for the station identifier in the header before the first
    /// section.
    fn scan_site_name(&mut self, idx: usize, line: &str) {
        if self.name_matched.is_some() {
            return;
        }

        let Some(token) = line.split_whitespace().next() else {
            return;
        };
        let upper = line.to_uppercase();

        if let Some(expected) = &self.config.site_name {
            let four: String = expected.chars().take(4).collect();
            if upper.contains(expected.as_str()) || upper.contains(&format!("{four} ")) {
                self.name_matched = Some(true);
                let declared = token.to_uppercase();
                self.site_name = Some(if declared.contains(expected.as_str()) {
                    declared
                } else {
                    expected.clone()
                });
                debug!("site name matched in header at line {idx}");
                return;
            }
        }

        let lower = line.to_lowercase();
        if lower.contains("site") && lower.contains("info") && (4..=9).contains(&token.chars().count()) {
            if self.config.site_name.is_some() {
                self.name_matched = Some(false);
                self.findings()
                    .add(Finding::error(idx, format!("Incorrect site name: {token}")));
            }
            self.site_name = Some(token.to_uppercase());
        }
    }

    /// Checks the identifier declared in section 1 when the header did not
    /// name the station.
    fn check_declared_site_id(&mut self) {
        let Some(expected) = self.config.site_name.clone() else {
            return;
        };

        let declared = self
            .log
            .section(&SectionId::new(1, None, None))
            .and_then(|section| {
                SITE_ID_PARAMETERS
                    .iter()
                    .filter_map(|name| section.parameter(name))
                    .find(|param| !param.is_empty() && !param.is_placeholder())
            })
            .map(|param| param.value().trim().to_uppercase());

        if let Some(declared) = declared {
            let matched = declared == expected
                || matches!(
                    (station_code(&declared), station_code(&expected)),
                    (Some(a), Some(b)) if a == b
                );
            debug!("declared site id {declared} matches {expected}: {matched}");
            self.name_matched = Some(matched);
            self.site_name = Some(declared);
        }
    }

    fn finish(mut self) -> ParsedLog {
        // everything after the last recognized content is the antenna graphic
        let graphic_start = self.graphic_start;
        self.findings().truncate_from(graphic_start);
        let graphic = self.lines.get(self.graphic_start..).and_then(|tail| {
            let begin = tail.iter().position(|l| !l.trim().is_empty())?;
            let end = tail.iter().rposition(|l| !l.trim().is_empty())?;
            Some(tail[begin..=end].join("\n"))
        });

        if self.name_matched.is_none() {
            self.check_declared_site_id();
        }

        if self.name_matched == Some(false) {
            if let Some(expected) = &self.config.site_name {
                let message = format!("Expected site name: {expected}");
                self.log.findings_mut().add(Finding::error(0, message));
            }
        }

        let mut log = self.log;
        log.set_graphic(graphic);
        log.set_site_name(self.site_name.or_else(|| self.config.site_name.clone()));
        log.set_name_matched(self.name_matched);
        log
    }
}

/// The four character station code leading a site name, e.g. `AAAA` of
/// `AAAA00USA`.
fn station_code(name: &str) -> Option<&str> {
    match name.char_indices().nth(4) {
        Some((end, _)) => Some(&name[..end]),
        None => (name.chars().count() == 4).then_some(name),
    }
}

/// Reads the section identity from a header match and returns it with the
/// rest of the line following the numeric index.
fn section_id<'l>(caps: &Captures, line: &'l str) -> Option<(SectionId, &'l str)> {
    let section = caps.get(1)?.as_str().parse().ok()?;
    let subsection = caps.get(2).map(|m| m.as_str().parse::<Index>()).transpose().ok()?;
    let order = caps.get(3).map(|m| m.as_str().parse::<Index>()).transpose().ok()?;

    let end = (1..=3).filter_map(|i| caps.get(i)).map(|m| m.end()).max()?;
    let rest = &line[end..];
    let rest = rest.strip_prefix('.').unwrap_or(rest);

    Some((SectionId::new(section, subsection, order), rest))
}
