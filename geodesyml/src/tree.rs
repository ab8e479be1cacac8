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

//! A small element tree over the events of the XML reader.
//!
//! The tree keeps what the binder needs to address a value: the resolved
//! namespace of every element and the line it starts on.

use std::collections::BTreeMap;

use log::trace;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{Error, ParseError};

const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Prefixes to namespaces used to resolve qualified names of path queries.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct Namespaces(BTreeMap<String, String>);

impl Namespaces {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a mapping and returns the map.
    pub fn with<P: Into<String>, U: Into<String>>(mut self, prefix: P, uri: U) -> Self {
        self.insert(prefix, uri);
        self
    }

    pub fn insert<P: Into<String>, U: Into<String>>(&mut self, prefix: P, uri: U) {
        self.0.insert(prefix.into(), uri.into());
    }

    pub fn get(&self, prefix: &str) -> Option<&str> {
        self.0.get(prefix).map(String::as_str)
    }

    pub fn contains(&self, prefix: &str) -> bool {
        self.0.contains_key(prefix)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(p, u)| (p.as_str(), u.as_str()))
    }
}

/// An attribute of an element.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Attribute {
    pub prefix: Option<String>,
    pub name: String,
    pub namespace: Option<String>,
    pub value: String,
}

/// An element of a parsed document.
#[derive(Clone, PartialEq, Debug)]
pub struct Element {
    prefix: Option<String>,
    name: String,
    namespace: Option<String>,
    declarations: Vec<(Option<String>, String)>,
    attributes: Vec<Attribute>,
    text: String,
    children: Vec<Element>,
    line: usize,
}

impl Element {
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// The local name without prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The name as written in the document, e.g. `geo:siteLog`.
    pub fn qualified_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}:{}", self.name),
            None => self.name.clone(),
        }
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// The `xmlns` declarations of this element. The default namespace has
    /// no prefix.
    pub fn declarations(&self) -> &[(Option<String>, String)] {
        &self.declarations
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Returns the value of the first attribute with the local name `name`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Returns the value of the attribute `name` in the namespace `namespace`.
    pub fn attribute_ns(&self, namespace: &str, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name && attr.namespace.as_deref() == Some(namespace))
            .map(|attr| attr.value.as_str())
    }

    /// The text content of the element, trimmed.
    pub fn text(&self) -> &str {
        self.text.trim()
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// The 0-based line the element starts on.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Returns `true` if the element matches one step of a path.
    ///
    /// A step is a qualified name like `geo:siteLog`, a local name matching
    /// any namespace, or `*`. A prefix unknown to `namespaces` never matches.
    pub fn matches(&self, step: &str, namespaces: &Namespaces) -> bool {
        if step == "*" {
            return true;
        }

        match step.split_once(':') {
            Some((prefix, name)) => {
                name == self.name
                    && namespaces
                        .get(prefix)
                        .is_some_and(|uri| self.namespace.as_deref() == Some(uri))
            }
            None => step == self.name,
        }
    }

    /// Selects the descendants reached by the relative `path`, in document
    /// order.
    ///
    /// ```
    /// use geodesyml::{Document, Namespaces};
    ///
    /// let doc = Document::parse(r#"<a xmlns="urn:a"><b><c>1</c><c>2</c></b></a>"#).unwrap();
    /// let ns = Namespaces::new().with("x", "urn:a");
    ///
    /// let texts: Vec<&str> = doc.root().select("x:b/x:c", &ns).iter().map(|e| e.text()).collect();
    /// assert_eq!(texts, ["1", "2"]);
    /// ```
    pub fn select<'e>(&'e self, path: &str, namespaces: &Namespaces) -> Vec<&'e Element> {
        let mut current = vec![self];
        for step in path.split('/').filter(|step| !step.is_empty()) {
            current = current
                .into_iter()
                .flat_map(|element| element.children.iter())
                .filter(|child| child.matches(step, namespaces))
                .collect();
        }
        current
    }

    pub fn first<'e>(&'e self, path: &str, namespaces: &Namespaces) -> Option<&'e Element> {
        self.select(path, namespaces).into_iter().next()
    }
}

////////////////////////////////////////////////////////////////////////////////
// Document                                                                   //
////////////////////////////////////////////////////////////////////////////////

/// A parsed XML document.
#[derive(Clone, PartialEq, Debug)]
pub struct Document {
    root: Element,
}

impl Document {
    /// Reads `text` into an element tree.
    ///
    /// The error reports the line the reader stopped at.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let line_starts: Vec<usize> = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        let line_of = |offset: usize| line_starts.partition_point(|&start| start <= offset) - 1;

        let mut reader = Reader::from_str(text);
        reader.config_mut().trim_text(true);

        let mut builder = Builder::default();
        loop {
            let event = reader.read_event().map_err(|e| ParseError {
                line: line_of(reader.error_position() as usize),
                error: e.into(),
            })?;
            let end = reader.buffer_position() as usize;
            let located = |error: Error| ParseError {
                line: line_of(end),
                error,
            };

            match event {
                Event::Start(e) => {
                    let line = line_of(end.saturating_sub(e.len() + 2));
                    builder.open(&e, line).map_err(located)?;
                }
                Event::Empty(e) => {
                    let line = line_of(end.saturating_sub(e.len() + 3));
                    builder.open(&e, line).map_err(located)?;
                    builder.close().map_err(located)?;
                }
                Event::End(_) => builder.close().map_err(located)?,
                Event::Text(t) => {
                    let text = t.unescape().map_err(|e| located(e.into()))?;
                    builder.text(&text);
                }
                Event::CData(c) => builder.text(&String::from_utf8_lossy(&c)),
                Event::Eof => break,
                _ => (),
            }
        }

        builder.finish().map_err(|error| ParseError {
            line: line_starts.len() - 1,
            error,
        })
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Selects elements by an absolute path whose first step is the root,
    /// e.g. `/geo:GeodesyML/geo:siteLog`.
    pub fn select<'e>(&'e self, path: &str, namespaces: &Namespaces) -> Vec<&'e Element> {
        let path = path.trim_start_matches('/');
        let (first, rest) = path.split_once('/').unwrap_or((path, ""));
        if !self.root.matches(first, namespaces) {
            return Vec::new();
        }
        self.root.select(rest, namespaces)
    }
}

#[derive(Default)]
struct Builder {
    stack: Vec<Element>,
    root: Option<Element>,
}

impl Builder {
    fn resolve(&self, declarations: &[(Option<String>, String)], prefix: Option<&str>) -> Option<String> {
        if prefix == Some("xml") {
            return Some(XML_NAMESPACE.to_string());
        }

        declarations
            .iter()
            .chain(self.stack.iter().rev().flat_map(|e| e.declarations.iter()))
            .find(|(p, _)| p.as_deref() == prefix)
            .map(|(_, uri)| uri.clone())
            .filter(|uri| !uri.is_empty())
    }

    fn open(&mut self, start: &BytesStart, line: usize) -> Result<(), Error> {
        if self.root.is_some() && self.stack.is_empty() {
            return Err(Error::Xml("unexpected element after the root element".to_string()));
        }

        let qname = start.name();
        let (prefix, name) = split_name(std::str::from_utf8(qname.as_ref())?);

        let mut declarations = Vec::new();
        let mut raw = Vec::new();
        for attr in start.attributes() {
            let attr = attr?;
            let key = std::str::from_utf8(attr.key.as_ref())?;
            let value = attr.unescape_value()?.into_owned();
            match split_name(key) {
                (None, "xmlns") => declarations.push((None, value)),
                (Some("xmlns"), declared) => declarations.push((Some(declared.to_string()), value)),
                (prefix, name) => raw.push((prefix.map(str::to_string), name.to_string(), value)),
            }
        }

        let namespace = self.resolve(&declarations, prefix);
        let attributes = raw
            .into_iter()
            .map(|(prefix, name, value)| Attribute {
                // unprefixed attributes are in no namespace
                namespace: prefix
                    .as_deref()
                    .and_then(|p| self.resolve(&declarations, Some(p))),
                prefix,
                name,
                value,
            })
            .collect();

        trace!("<{}> at line {line}", start_name(prefix, name));
        self.stack.push(Element {
            prefix: prefix.map(str::to_string),
            name: name.to_string(),
            namespace,
            declarations,
            attributes,
            text: String::new(),
            children: Vec::new(),
            line,
        });
        Ok(())
    }

    fn text(&mut self, text: &str) {
        if let Some(element) = self.stack.last_mut() {
            element.text.push_str(text);
        }
    }

    fn close(&mut self) -> Result<(), Error> {
        let element = self
            .stack
            .pop()
            .ok_or_else(|| Error::Xml("unexpected closing tag".to_string()))?;

        match self.stack.last_mut() {
            Some(parent) => parent.children.push(element),
            None => self.root = Some(element),
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Document, Error> {
        if let Some(open) = self.stack.pop() {
            return Err(Error::Unclosed(open.qualified_name()));
        }
        self.root.map(|root| Document { root }).ok_or(Error::Empty)
    }
}

fn split_name(name: &str) -> (Option<&str>, &str) {
    match name.split_once(':') {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, name),
    }
}

fn start_name(prefix: Option<&str>, name: &str) -> String {
    prefix.map_or_else(|| name.to_string(), |p| format!("{p}:{name}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<geo:GeodesyML xmlns:geo="urn:xml-gov-au:icsm:egeodesy:0.5"
    xmlns:gml="http://www.opengis.net/gml/3.2" gml:id="doc">
  <geo:siteLog gml:id="AAA200USA">
    <geo:formInformation>
      <geo:preparedBy>Jane &amp; John</geo:preparedBy>
      <geo:reportType/>
    </geo:formInformation>
  </geo:siteLog>
</geo:GeodesyML>
"#;

    fn namespaces() -> Namespaces {
        Namespaces::new()
            .with("geo", "urn:xml-gov-au:icsm:egeodesy:0.5")
            .with("gml", "http://www.opengis.net/gml/3.2")
    }

    #[test]
    fn resolves_names_and_lines() {
        let doc = Document::parse(XML).unwrap();
        let root = doc.root();

        assert_eq!(root.name(), "GeodesyML");
        assert_eq!(root.qualified_name(), "geo:GeodesyML");
        assert_eq!(root.namespace(), Some("urn:xml-gov-au:icsm:egeodesy:0.5"));
        assert_eq!(root.line(), 1);
        assert_eq!(root.declarations().len(), 2);

        let site = root.first("geo:siteLog", &namespaces()).unwrap();
        assert_eq!(site.line(), 3);
        assert_eq!(
            site.attribute_ns("http://www.opengis.net/gml/3.2", "id"),
            Some("AAA200USA")
        );
    }

    #[test]
    fn selects_absolute_paths() {
        let doc = Document::parse(XML).unwrap();
        let ns = namespaces();

        let prepared = doc.select("/geo:GeodesyML/geo:siteLog/geo:formInformation/geo:preparedBy", &ns);
        assert_eq!(prepared.len(), 1);
        assert_eq!(prepared[0].text(), "Jane & John");
        assert_eq!(prepared[0].line(), 5);

        let report = doc.select("/geo:GeodesyML/geo:siteLog/geo:formInformation/geo:reportType", &ns);
        assert_eq!(report[0].text(), "");
        assert_eq!(report[0].line(), 6);

        assert!(doc.select("/gml:GeodesyML", &ns).is_empty());
        assert!(doc.select("/geo:GeodesyML/unknown:siteLog", &ns).is_empty());
        assert_eq!(doc.select("/GeodesyML/siteLog", &Namespaces::new()).len(), 1);
    }

    #[test]
    fn reports_unclosed_elements() {
        let err = Document::parse("<a>\n  <b>\n</a>").unwrap_err();
        assert!(matches!(err.error, Error::Xml(_)));

        let err = Document::parse("<a>\n  <b></b>\n").unwrap_err();
        assert!(matches!(err.error, Error::Unclosed(_) | Error::Xml(_)));
        assert!(err.line >= 1);
    }

    #[test]
    fn rejects_empty_documents() {
        let err = Document::parse("<?xml version=\"1.0\"?>\n").unwrap_err();
        assert!(matches!(err.error, Error::Empty));
    }
}
