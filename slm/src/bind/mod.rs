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

//! Binding of parsed sections into typed fields.
//!
//! A binder walks the sections of a [`ParsedLog`], looks every parameter up in
//! the translation [`Table`] of the section's heading and converts its value
//! into one or more fields. Every problem along the way becomes a finding.

mod legacy;
mod xml;

use std::collections::{BTreeMap, BTreeSet, HashMap};

use log::{debug, trace, warn};
use sitelog::{
    normalize, Finding, Findings, HeadingIndex, Level, ParsedLog, Section, SectionId, Value,
};

use crate::catalog::Catalog;
use crate::convert::{Check, Convert, Outcome};
use crate::error::ConvertError;

pub use legacy::{legacy_tables, LegacyBinder};
pub use xml::{geodesyml_schema, GeodesyMlBinder, XmlSchema};

const IGNORED_MESSAGE: &str = "Parameter is ignored";
const PLACEHOLDER_MESSAGE: &str = "Placeholder text";

/// One field a parameter is converted into.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Target {
    field: &'static str,
    convert: Convert,
    check: Option<Check>,
}

impl Target {
    pub const fn new(field: &'static str, convert: Convert) -> Self {
        Self {
            field,
            convert,
            check: None,
        }
    }

    /// Adds a check that runs on the converted value.
    pub const fn check(mut self, check: Check) -> Self {
        self.check = Some(check);
        self
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn convert(&self) -> &Convert {
        &self.convert
    }
}

/// Combines the values of several fields into one composite field.
pub type Combine = fn(&[Option<&Value>]) -> Result<Value, ConvertError>;

#[derive(Clone, Debug)]
pub struct Collation {
    pub sources: &'static [&'static str],
    pub target: &'static str,
    pub combine: Combine,
}

/// The translation table of one heading.
///
/// Several parameter names may translate into the same field to allow for the
/// variations found in the wild. The canonical name of a field is the last
/// one listed and is used when a field is reported missing.
#[derive(Clone, Debug, Default)]
pub struct Table {
    translations: Vec<(&'static str, Vec<Target>)>,
    index: HashMap<String, usize>,
    collations: Vec<Collation>,
    optional: BTreeSet<&'static str>,
    repeating: bool,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translates the parameter `name` into a single field.
    pub fn entry(self, name: &'static str, field: &'static str, convert: Convert) -> Self {
        self.translate(name, [Target::new(field, convert)])
    }

    /// Translates the parameter `name` into every target.
    pub fn translate<I>(mut self, name: &'static str, targets: I) -> Self
    where
        I: IntoIterator<Item = Target>,
    {
        self.index.insert(normalize(name), self.translations.len());
        self.translations.push((name, targets.into_iter().collect()));
        self
    }

    /// Adds a block of translations shared by several tables.
    pub fn with(self, block: fn(Table) -> Table) -> Self {
        block(self)
    }

    pub fn collate(mut self, sources: &'static [&'static str], target: &'static str, combine: Combine) -> Self {
        self.collations.push(Collation {
            sources,
            target,
            combine,
        });
        self
    }

    /// Marks a field that is not reported when missing.
    pub fn optional(mut self, field: &'static str) -> Self {
        self.optional.insert(field);
        self
    }

    /// Marks the heading as one with repeated entries, like receivers.
    pub fn repeating(mut self) -> Self {
        self.repeating = true;
        self
    }

    pub fn is_repeating(&self) -> bool {
        self.repeating
    }

    /// The parameter names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.translations.iter().map(|(name, _)| *name)
    }

    /// Looks up the targets of a normalized parameter name. Names scoped by a
    /// sub-heading fall back to the unscoped name.
    pub fn translation(&self, normalized: &str) -> Option<&[Target]> {
        let idx = self.index.get(normalized).or_else(|| {
            let (_, name) = normalized.rsplit_once("::")?;
            self.index.get(name.trim())
        })?;
        Some(&self.translations[*idx].1)
    }

    pub fn collations(&self) -> &[Collation] {
        &self.collations
    }

    /// The fields a complete section binds, in declaration order.
    pub fn expected(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        for target in self.translations.iter().flat_map(|(_, targets)| targets) {
            if !target.field.is_empty()
                && !self.optional.contains(target.field)
                && !fields.contains(&target.field)
            {
                fields.push(target.field);
            }
        }
        fields
    }

    /// The canonical parameter name of a field.
    pub fn display_name(&self, field: &str) -> Option<&'static str> {
        self.translations
            .iter()
            .rev()
            .find(|(_, targets)| targets.iter().any(|t| t.field == field))
            .map(|(name, _)| *name)
    }
}

/// The translation tables of a site log format by heading.
#[derive(Clone, Debug, Default)]
pub struct Tables(BTreeMap<HeadingIndex, Table>);

impl Tables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(mut self, heading: HeadingIndex, table: Table) -> Self {
        self.0.insert(heading, table);
        self
    }

    pub fn get(&self, heading: HeadingIndex) -> Option<&Table> {
        self.0.get(&heading)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&HeadingIndex, &Table)> {
        self.0.iter()
    }
}

////////////////////////////////////////////////////////////////////////////////
// Binding                                                                    //
////////////////////////////////////////////////////////////////////////////////

fn depth(id: SectionId) -> usize {
    1 + usize::from(id.subsection.is_some()) + usize::from(id.order.is_some())
}

fn heading_depth(heading: HeadingIndex) -> usize {
    match heading {
        HeadingIndex::Section(_) => 1,
        HeadingIndex::Subsection(..) => 2,
    }
}

/// Binds every section of the log with the table of its heading.
///
/// Example sections are skipped, as are the bare headers of repeating
/// headings. Sections without table are reported unless they are empty
/// grouping headers like `8. Meteorological Instrumentation`.
pub fn bind_log(log: &mut ParsedLog, tables: &Tables, catalog: &dyn Catalog) {
    let (lines, sections, findings) = log.split_mut();
    for section in sections.values_mut() {
        if section.is_example() {
            continue;
        }

        let heading = section.heading_index();
        let table = tables.get(heading);
        let is_header = table.is_some_and(Table::is_repeating) && depth(section.id()) == heading_depth(heading);
        if is_header && !section.contains_values() {
            trace!("skipping header of section {}", section.id());
            continue;
        }

        match table {
            Some(table) => bind_section(section, table, lines, findings, catalog),
            None if section.line_end() > section.line() => {
                findings.escalate(
                    Finding::warn(section.line(), format!("Unexpected section {}", section.id()))
                        .with_section(Some(section.id())),
                );
            }
            None => {}
        }
    }
}

/// Binds the parameters of one section.
pub fn bind_section(
    section: &mut Section,
    table: &Table,
    lines: &[String],
    findings: &mut Findings,
    catalog: &dyn Catalog,
) {
    let id = Some(section.id());
    let mut errored = BTreeSet::new();
    let mut ignored = BTreeSet::new();

    let parameters: Vec<_> = section.parameters().cloned().collect();
    for parameter in &parameters {
        let Some(targets) = table.translation(&parameter.normalized_name()) else {
            findings.escalate(
                Finding::warn(parameter.line(), format!("Unrecognized parameter: {}", parameter.name()))
                    .with_section(id),
            );
            continue;
        };

        let value = parameter.value();
        for target in targets {
            let converted = if parameter.is_placeholder() {
                match target.convert.apply("", catalog) {
                    Ok(ignored @ Outcome::Ignored { .. }) => Ok(ignored),
                    _ => Ok(Outcome::ignored(PLACEHOLDER_MESSAGE)),
                }
            } else {
                target.convert.apply(&value, catalog)
            };

            match converted {
                Ok(Outcome::Ignored { message, columns }) => {
                    // columns are relative to the value, findings to the line
                    let columns = columns.and_then(|(start, end)| {
                        let first = parameter.values().first()?;
                        let offset = lines.get(parameter.line())?.find(first.as_str())?;
                        Some((start + offset, end + offset))
                    });
                    findings.escalate(
                        Finding::ignored(
                            parameter.line(),
                            message.unwrap_or_else(|| IGNORED_MESSAGE.to_string()),
                        )
                        .with_columns(columns)
                        .with_section(id),
                    );
                    ignored.insert(target.field);
                    if !target.field.is_empty() {
                        section.bind(target.field, parameter.name(), Value::Null);
                    }
                }
                Ok(Outcome::Warned(message, converted)) => {
                    findings.escalate(Finding::warn(parameter.line(), message).with_section(id));
                    section.bind(target.field, parameter.name(), converted);
                }
                Ok(Outcome::Bound(converted)) => {
                    let warning = target.check.and_then(|check| check.inspect(&converted, catalog));
                    section.bind(target.field, parameter.name(), converted);
                    if let Some(warning) = warning {
                        findings.escalate(Finding::warn(parameter.line(), warning).with_section(id));
                    }
                }
                Err(e) => {
                    debug!("unable to bind {} of section {}: {e}", target.field, section.id());
                    errored.insert(target.field);
                    for line in parameter.lines() {
                        findings.escalate(Finding::error(line, e.to_string()).with_section(id));
                    }
                }
            }
        }
    }

    let missing: Vec<&str> = table
        .expected()
        .into_iter()
        .filter(|field| {
            section.get(field).is_none() && !errored.contains(field) && !ignored.contains(field)
        })
        .collect();
    // an ignored placeholder on the header line yields to the warning
    let header = findings.get(section.line()).map_or(0, Finding::priority);
    if !missing.is_empty() && header < Level::Warn.priority() {
        let mut names = Vec::new();
        for name in missing.iter().filter_map(|field| table.display_name(field)) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        findings.add(
            Finding::warn(section.line(), format!("Missing parameters:\n{}", names.join("\n")))
                .with_section(id),
        );
    }

    if section.binding().is_empty() {
        return;
    }
    for collation in table.collations() {
        if !collation.sources.iter().any(|source| section.get(source).is_some()) {
            continue;
        }

        let combined = {
            let values: Vec<Option<&Value>> = collation
                .sources
                .iter()
                .map(|source| section.get(source))
                .collect();
            (collation.combine)(&values)
        };
        match combined {
            Ok(value) => section.collate(collation.sources, collation.target, value),
            Err(e) => warn!(
                "unable to collate {} of section {}: {e}",
                collation.target,
                section.id()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MemoryCatalog;
    use crate::convert::{to_point, METERS};
    use sitelog::{Index, Parameter, Point};

    fn table() -> Table {
        Table::new()
            .entry("X", "x", Convert::float(METERS))
            .entry("Y", "y", Convert::float(METERS))
            .entry("Z coordinate", "z", Convert::float(METERS))
            .entry("Z", "z", Convert::float(METERS))
            .entry("Notes", "notes", Convert::Str)
            .entry("Legacy", "", Convert::Ignore(None))
            .entry("Height", "height", Convert::float(METERS))
            .optional("height")
            .collate(&["x", "y", "z"], "xyz", to_point)
    }

    fn section(params: &[(&str, &str)]) -> (Section, Vec<String>) {
        let mut section = Section::new(0, SectionId::new(2, None, None), "2. Location");
        let mut lines = vec!["2. Location".to_string()];
        for (idx, (name, value)) in params.iter().enumerate() {
            lines.push(format!("     {name:<20}: {value}"));
            section
                .add_parameter(Parameter::new(idx + 1, *name, *value))
                .unwrap();
        }
        (section, lines)
    }

    #[test]
    fn binds_and_collates() {
        let (mut section, lines) = section(&[("X", "1 m"), ("Y", "2"), ("Z", "3"), ("Notes", "a")]);
        let mut findings = Findings::new();
        bind_section(&mut section, &table(), &lines, &mut findings, &MemoryCatalog::new());

        assert!(findings.is_empty());
        assert_eq!(section.get("xyz"), Some(&Value::Point(Point::new(1.0, 2.0, 3.0))));
        assert_eq!(section.params_for("xyz").len(), 3);
        assert!(section.params_for("x").is_empty());
    }

    #[test]
    fn consolidates_missing_fields() {
        let (mut section, lines) = section(&[("X", "1"), ("Bogus", "2")]);
        let mut findings = Findings::new();
        bind_section(&mut section, &table(), &lines, &mut findings, &MemoryCatalog::new());

        let missing = findings.get(0).unwrap();
        assert_eq!(missing.level, Level::Warn);
        assert_eq!(missing.message, "Missing parameters:\nY\nZ\nNotes");
        assert_eq!(findings.get(2).unwrap().message, "Unrecognized parameter: Bogus");
        assert_eq!(section.get("xyz"), Some(&Value::Null));
    }

    #[test]
    fn errors_cover_every_line() {
        let mut section = Section::new(0, SectionId::new(2, None, None), "2. Location");
        let mut x = Parameter::new(1, "X", "abc");
        x.append(2, "def");
        section.add_parameter(x).unwrap();
        let lines = vec![String::new(); 3];

        let mut findings = Findings::new();
        bind_section(&mut section, &table(), &lines, &mut findings, &MemoryCatalog::new());

        let errors: Vec<usize> = findings.errors().map(|f| f.line).collect();
        assert_eq!(errors, vec![1, 2]);
        assert!(section.get("x").is_none());
        assert!(findings.get(0).unwrap().message.starts_with("Missing parameters:\nY"));
    }

    #[test]
    fn placeholders_bind_null() {
        let (mut section, lines) = section(&[("Notes", "(multiple lines)"), ("Legacy", "old")]);
        let mut findings = Findings::new();
        findings.add(Finding::error(1, "Parser error"));
        bind_section(&mut section, &table(), &lines, &mut findings, &MemoryCatalog::new());

        assert_eq!(section.get("notes"), Some(&Value::Null));
        assert_eq!(findings.get(1).unwrap().message, "Parser error");
        assert_eq!(findings.get(2).unwrap().message, IGNORED_MESSAGE);
        assert!(section.get("").is_none());
    }

    #[test]
    fn missing_fields_replace_ignored_header_findings() {
        let mut section = Section::new(0, SectionId::new(2, Some(Index::Number(1)), None), "2.1");
        section
            .add_parameter(Parameter::new(0, "Legacy", "old"))
            .unwrap();
        let lines = vec!["2.1  Legacy : old".to_string()];

        let mut findings = Findings::new();
        bind_section(&mut section, &table(), &lines, &mut findings, &MemoryCatalog::new());
        let missing = findings.get(0).unwrap();
        assert_eq!(missing.level, Level::Warn);
        assert_eq!(missing.message, "Missing parameters:\nX\nY\nZ\nNotes");

        let mut findings = Findings::new();
        findings.add(Finding::error(0, "Parser error"));
        bind_section(&mut section, &table(), &lines, &mut findings, &MemoryCatalog::new());
        assert_eq!(findings.get(0).unwrap().message, "Parser error");
    }

    #[test]
    fn skips_examples_and_empty_headers() {
        let tables = Tables::new().insert(HeadingIndex::Section(3), Table::new().entry("Type", "kind", Convert::Str).repeating());
        let mut log = ParsedLog::new(vec![String::new(); 8]);

        log.add_section(Section::new(0, SectionId::new(3, None, None), "3. Receiver"));
        let mut example = Section::new(1, SectionId::new(3, Some(Index::Example), None), "3.x");
        example.add_parameter(Parameter::new(2, "Type", "(A20)")).unwrap();
        log.add_section(example);
        let mut unknown = Section::new(4, SectionId::new(14, None, None), "14. Other");
        unknown.add_parameter(Parameter::new(5, "Type", "A")).unwrap();
        log.add_section(unknown);

        bind_log(&mut log, &tables, &MemoryCatalog::new());

        assert_eq!(log.findings().len(), 1);
        assert_eq!(log.findings().get(4).unwrap().message, "Unexpected section 14");
    }
}
