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

use std::fmt;

use geodesyml::{GeodesyMlParser, GeodesyMlVersion, SharedValidator};
use log::debug;
use sitelog::{decode, Encoding, ParsedLog, SiteLogParser};

use crate::bind::{GeodesyMlBinder, LegacyBinder};
use crate::catalog::Catalog;

#[cfg(feature = "serde")]
use serde::Serialize;

/// The formats a site log may come in.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum SiteLogFormat {
    /// The plain text format of the IGS.
    Legacy,
    GeodesyMl,
}

impl SiteLogFormat {
    /// Guesses the format from the first non-blank character.
    pub fn detect(text: &str) -> Self {
        if text.trim_start_matches('\u{feff}').trim_start().starts_with('<') {
            Self::GeodesyMl
        } else {
            Self::Legacy
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Legacy => "log",
            Self::GeodesyMl => "xml",
        }
    }

    pub fn mimetype(&self) -> &'static str {
        match self {
            Self::Legacy => "text/plain",
            Self::GeodesyMl => "application/xml",
        }
    }
}

impl fmt::Display for SiteLogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Legacy => "Legacy (ASCII)",
            Self::GeodesyMl => "GeodesyML",
        })
    }
}

/// Options of an import.
#[derive(Clone, Default, Debug)]
pub struct ImportOptions {
    site_name: Option<String>,
    format: Option<SiteLogFormat>,
    validator: Option<SharedValidator>,
}

impl ImportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// The station the log is expected to describe.
    pub fn site_name<S: Into<String>>(mut self, name: S) -> Self {
        self.site_name = Some(name.into());
        self
    }

    /// Skips format detection.
    pub fn format(mut self, format: SiteLogFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Validates GeodesyML documents against their schema.
    pub fn validator(mut self, validator: SharedValidator) -> Self {
        self.validator = Some(validator);
        self
    }
}

/// A parsed and bound site log.
#[derive(Clone, Debug)]
pub struct Import {
    pub format: SiteLogFormat,
    pub encoding: Encoding,
    /// The schema version of GeodesyML documents.
    pub version: Option<GeodesyMlVersion>,
    pub log: ParsedLog,
}

impl Import {
    /// Returns `true` if nothing in the log is an error.
    pub fn is_valid(&self) -> bool {
        self.log.is_valid()
    }
}

/// Decodes, parses and binds a site log in one go.
///
/// ```
/// use slm::{import, ImportOptions, MemoryCatalog, SiteLogFormat};
///
/// let bytes = b"0.   Form\n     Prepared by (full name)  : Jane Doe\n";
/// let import = import(bytes, &ImportOptions::new(), &MemoryCatalog::new());
///
/// assert_eq!(import.format, SiteLogFormat::Legacy);
/// assert!(import.is_valid());
/// ```
pub fn import(bytes: &[u8], options: &ImportOptions, catalog: &dyn Catalog) -> Import {
    let (text, encoding) = decode(bytes);
    let format = options
        .format
        .unwrap_or_else(|| SiteLogFormat::detect(&text));
    debug!("importing {} byte {format} site log", bytes.len());

    match format {
        SiteLogFormat::Legacy => {
            let mut parser = SiteLogParser::new();
            if let Some(name) = &options.site_name {
                parser = parser.site_name(name);
            }

            let mut log = parser.parse(&text);
            LegacyBinder::new(catalog).bind(&mut log);
            Import {
                format,
                encoding,
                version: None,
                log,
            }
        }
        SiteLogFormat::GeodesyMl => {
            let mut parser = GeodesyMlParser::new();
            if let Some(name) = &options.site_name {
                parser = parser.site_name(name);
            }
            if let Some(validator) = &options.validator {
                parser = parser.validator(validator.clone());
            }

            let mut parsed = parser.parse(&text);
            GeodesyMlBinder::new(catalog).bind(&mut parsed);
            Import {
                format,
                encoding,
                version: parsed.version(),
                log: parsed.into_log(),
            }
        }
    }
}
