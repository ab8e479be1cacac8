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

use log::{debug, warn};
use sitelog::{Finding, ParsedLog};

use crate::tree::{Document, Element, Namespaces};
use crate::validator::SharedValidator;
use crate::version::GeodesyMlVersion;

/// Prefixes resolved from the declarations of a document for path queries.
const QUERY_PREFIXES: [&str; 3] = ["gml", "gmd", "gco"];

/// Parser of GeodesyML documents.
///
/// ```
/// use geodesyml::{GeodesyMlParser, GeodesyMlVersion};
///
/// let xml = r#"<geo:GeodesyML xmlns:geo="urn:xml-gov-au:icsm:egeodesy:0.4"
///     xmlns:gml="http://www.opengis.net/gml/3.2">
///   <geo:siteLog gml:id="AAAA00USA"/>
/// </geo:GeodesyML>"#;
///
/// let parsed = GeodesyMlParser::new().site_name("aaaa00usa").parse(xml);
/// assert_eq!(parsed.version(), Some(GeodesyMlVersion::V0_4));
/// assert_eq!(parsed.log().name_matched(), Some(true));
/// assert!(parsed.log().is_valid());
/// ```
#[derive(Clone, Default, Debug)]
pub struct GeodesyMlParser {
    site_name: Option<String>,
    validator: Option<SharedValidator>,
}

impl GeodesyMlParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the identifier the document is expected to describe.
    pub fn site_name<S: AsRef<str>>(mut self, name: S) -> Self {
        self.site_name = Some(name.as_ref().trim().to_string());
        self
    }

    /// Sets the validator every parsed document is checked with.
    pub fn validator(mut self, validator: SharedValidator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Parses the document. This never fails, all problems are reported as
    /// findings of the returned log.
    pub fn parse(&self, text: &str) -> GeodesyMl {
        let lines = text
            .split('\n')
            .map(|line| line.trim_end_matches('\r').to_string())
            .collect();
        let mut parsed = GeodesyMl {
            log: ParsedLog::new(lines),
            document: None,
            version: None,
            namespaces: Namespaces::new(),
        };

        let document = match Document::parse(text) {
            Ok(document) => document,
            Err(e) => {
                debug!("unable to read GeodesyML document: {e}");
                parsed
                    .log
                    .findings_mut()
                    .add(Finding::error(e.line, e.error.to_string()));
                return parsed;
            }
        };

        let root = document.root();
        let version = match root.namespace() {
            Some(xmlns) => GeodesyMlVersion::from_xmlns(xmlns),
            None => Some(GeodesyMlVersion::latest()),
        };

        match version {
            Some(version) => {
                parsed.namespaces.insert("geo", version.xmlns());
                if let Some(validator) = &self.validator {
                    for violation in validator.validate(version, text) {
                        let line = violation.line.saturating_sub(1);
                        parsed.log.findings_mut().add(Finding::error(line, violation.message));
                    }
                }
            }
            None => {
                let xmlns = root.namespace().unwrap_or_default();
                warn!("unsupported GeodesyML namespace {xmlns}");
                parsed.namespaces.insert("geo", xmlns);
                parsed
                    .log
                    .findings_mut()
                    .add(Finding::error(root.line(), format!("Unsupported schema: {xmlns}")));
            }
        }

        for prefix in QUERY_PREFIXES {
            if let Some(uri) = query_namespace(root, prefix) {
                parsed.namespaces.insert(prefix, uri);
            }
        }

        self.check_site_name(&mut parsed, root);
        parsed.version = version;
        parsed.document = Some(document);
        parsed
    }

    fn check_site_name(&self, parsed: &mut GeodesyMl, root: &Element) {
        let gml = parsed.namespaces.get("gml").map(str::to_string);
        let declared = (root.name() == "GeodesyML")
            .then(|| root.children().iter().find(|child| child.name() == "siteLog"))
            .flatten()
            .and_then(|site| match &gml {
                Some(gml) => site.attribute_ns(gml, "id"),
                None => site.attribute("id"),
            })
            .map(str::to_string);

        if let (Some(expected), Some(declared)) = (&self.site_name, &declared) {
            let matched = expected.eq_ignore_ascii_case(declared);
            parsed.log.set_name_matched(Some(matched));
            if !matched {
                let message = format!("Expected site name: {expected}");
                parsed.log.findings_mut().add(Finding::error(0, message));
            }
        }

        parsed
            .log
            .set_site_name(declared.or_else(|| self.site_name.clone()));
    }
}

/// Finds the namespace bound to `prefix` in the root declarations, or a
/// well-known namespace the document declares under another prefix.
fn query_namespace(root: &Element, prefix: &str) -> Option<String> {
    let declarations = root.declarations();
    declarations
        .iter()
        .find(|(p, _)| p.as_deref() == Some(prefix))
        .or_else(|| {
            declarations.iter().find(|(_, uri)| match prefix {
                "gml" => uri.contains("opengis") && uri.contains("gml"),
                _ => uri.contains("isotc211") && uri.ends_with(prefix),
            })
        })
        .map(|(_, uri)| uri.clone())
}

/// A parsed GeodesyML document.
#[derive(Clone, Debug)]
pub struct GeodesyMl {
    log: ParsedLog,
    document: Option<Document>,
    version: Option<GeodesyMlVersion>,
    namespaces: Namespaces,
}

impl GeodesyMl {
    /// The sections, findings and lines of the document.
    pub fn log(&self) -> &ParsedLog {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut ParsedLog {
        &mut self.log
    }

    pub fn into_log(self) -> ParsedLog {
        self.log
    }

    /// The element tree, unless the document could not be read.
    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// The schema version, unless it was not supported.
    pub fn version(&self) -> Option<GeodesyMlVersion> {
        self.version
    }

    /// The prefixes to use in path queries of the document.
    pub fn namespaces(&self) -> &Namespaces {
        &self.namespaces
    }

    /// Splits the document for binding: the element tree and its namespaces
    /// to read from and the log to write to.
    pub fn split_mut(&mut self) -> (Option<&Document>, &Namespaces, &mut ParsedLog) {
        (self.document.as_ref(), &self.namespaces, &mut self.log)
    }
}
