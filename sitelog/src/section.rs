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

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use crate::parameter::{normalize, Parameter};
use crate::value::Value;

#[cfg(feature = "serde")]
use serde::Serialize;

/// A subsection or order component of a section index.
///
/// Blank templates number their instructional sections with an `x`, e.g.
/// `3.x Receiver Type`. Those are kept as [`Index::Example`].
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Index {
    Number(u32),
    Example,
}

impl Index {
    pub fn number(&self) -> Option<u32> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Example => None,
        }
    }
}

impl FromStr for Index {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("x") {
            Ok(Self::Example)
        } else {
            s.parse().map(Self::Number)
        }
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Example => write!(f, "x"),
        }
    }
}

/// The storage identity of a section: `(section, subsection, order)`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SectionId {
    pub section: u32,
    pub subsection: Option<Index>,
    pub order: Option<Index>,
}

impl SectionId {
    pub fn new(section: u32, subsection: Option<Index>, order: Option<Index>) -> Self {
        Self {
            section,
            subsection,
            order,
        }
    }

    pub fn is_example(&self) -> bool {
        self.subsection == Some(Index::Example) || self.order == Some(Index::Example)
    }

    /// The key of the translation table that applies to this section.
    ///
    /// Sections with an order are entries of a repeating subsection, e.g.
    /// `8.1.2` is the second humidity sensor of heading `8.1`. All other
    /// sections are looked up by their section number alone.
    pub fn heading_index(&self) -> HeadingIndex {
        match (self.order, self.subsection) {
            (Some(_), Some(Index::Number(sub))) => HeadingIndex::Subsection(self.section, sub),
            _ => HeadingIndex::Section(self.section),
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.section)?;
        if let Some(sub) = self.subsection {
            write!(f, ".{sub}")?;
            if let Some(order) = self.order {
                write!(f, ".{order}")?;
            }
        }
        Ok(())
    }
}

/// The key of a translation table.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum HeadingIndex {
    Section(u32),
    Subsection(u32, u32),
}

impl fmt::Display for HeadingIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Section(s) => write!(f, "{s}"),
            Self::Subsection(s, sub) => write!(f, "{s}.{sub}"),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Section                                                                    //
////////////////////////////////////////////////////////////////////////////////

/// A numbered block of parameters.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Section {
    id: SectionId,
    line: usize,
    line_end: usize,
    header: String,
    parameters: Vec<Parameter>,
    #[cfg_attr(feature = "serde", serde(skip))]
    index: HashMap<String, usize>,
    binding: BTreeMap<String, Value>,
    #[cfg_attr(feature = "serde", serde(skip))]
    param_binding: BTreeMap<String, Vec<String>>,
}

impl Section {
    pub fn new<S: Into<String>>(line: usize, id: SectionId, header: S) -> Self {
        Self {
            id,
            line,
            line_end: line,
            header: header.into(),
            parameters: Vec::new(),
            index: HashMap::new(),
            binding: BTreeMap::new(),
            param_binding: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> SectionId {
        self.id
    }

    pub fn line(&self) -> usize {
        self.line
    }

    /// The last line covered by a parameter of this section.
    pub fn line_end(&self) -> usize {
        self.line_end
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn is_example(&self) -> bool {
        self.id.is_example()
    }

    pub fn heading_index(&self) -> HeadingIndex {
        self.id.heading_index()
    }

    /// Adds the parameter unless one with the same normalized name exists, in
    /// which case the rejected parameter is handed back.
    pub fn add_parameter(&mut self, parameter: Parameter) -> Result<(), Parameter> {
        let key = parameter.normalized_name();
        if self.index.contains_key(&key) {
            return Err(parameter);
        }

        self.line_end = self.line_end.max(parameter.line_end());
        self.index.insert(key, self.parameters.len());
        self.parameters.push(parameter);
        Ok(())
    }

    /// The parameters in the order they appear in the input.
    pub fn parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters.iter()
    }

    /// Returns the parameter whose name normalizes to the same as `name`.
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.index
            .get(&normalize(name))
            .map(|&idx| &self.parameters[idx])
    }

    pub fn contains_parameter(&self, name: &str) -> bool {
        self.index.contains_key(&normalize(name))
    }

    /// Returns `true` if any parameter holds a value other than a template
    /// placeholder.
    pub fn contains_values(&self) -> bool {
        self.parameters
            .iter()
            .any(|p| !(p.is_empty() || p.is_placeholder()))
    }

    /// The bound fields of this section.
    pub fn binding(&self) -> &BTreeMap<String, Value> {
        &self.binding
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.binding.get(field)
    }

    /// Binds `value` to `field` and records the parameter it came from.
    pub fn bind(&mut self, field: &str, parameter: &str, value: Value) {
        let key = normalize(parameter);
        if let Some(&idx) = self.index.get(&key) {
            self.parameters[idx].bind(field, value.clone());
            let sources = self.param_binding.entry(field.to_string()).or_default();
            if !sources.contains(&key) {
                sources.push(key);
            }
        }
        self.binding.insert(field.to_string(), value);
    }

    /// Binds a composite field, moving the parameter references of the
    /// `sources` onto `target`.
    pub fn collate(&mut self, sources: &[&str], target: &str, value: Value) {
        let mut refs = Vec::new();
        for source in sources {
            for key in self.param_binding.remove(*source).unwrap_or_default() {
                if !refs.contains(&key) {
                    refs.push(key);
                }
            }
        }
        self.param_binding.insert(target.to_string(), refs);
        self.binding.insert(target.to_string(), value);
    }

    /// The parameters a field was bound from.
    pub fn params_for(&self, field: &str) -> Vec<&Parameter> {
        self.param_binding
            .get(field)
            .into_iter()
            .flatten()
            .filter_map(|key| self.index.get(key))
            .map(|&idx| &self.parameters[idx])
            .collect()
    }
}
