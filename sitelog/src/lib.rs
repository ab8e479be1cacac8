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

//! GNSS site log parser.
//!
//! Site logs describe the equipment, location and contacts of a GNSS
//! monitoring station. The format is plain text with numbered [sections] of
//! `name : value` [parameters] and was written by hand for decades, so the
//! parser is tolerant: it recovers whatever structure it can and reports
//! everything else as line addressed [findings].
//!
//! ```
//! use sitelog::{decode, Level, SiteLogParser};
//!
//! let bytes = concat!(
//!     "1.   Site Identification of the GNSS Monument\n",
//!     "     Site Name                : Alpha\n",
//!     "     Something odd\n",
//!     "     Four Character ID        : AAAA\n",
//! );
//!
//! let (text, _) = decode(bytes.as_bytes());
//! let log = SiteLogParser::new().parse(&text);
//!
//! for finding in log.findings() {
//!     assert_eq!(finding.level, Level::Warn);
//!     println!("{finding}");
//! }
//! ```
//!
//! The parser never interprets values. Converting them into typed values is
//! left to a binder, which writes into the sections of the [`ParsedLog`].
//!
//! [sections]: Section
//! [parameters]: Parameter
//! [findings]: Finding

mod decode;
mod finding;
mod parameter;
mod parsed;
mod parser;
mod section;
mod value;

pub use decode::{decode, Encoding};
pub use finding::{Finding, Findings, Level};
pub use parameter::{normalize, Parameter, SPECIAL_CHARACTERS};
pub use parsed::{Context, ParsedLog};
pub use parser::{SiteLogParser, IGNORED_LINES, SECTION_BREAKERS, SUB_HEADINGS};
pub use section::{HeadingIndex, Index, Section, SectionId};
pub use value::{Choice, Point, Value};
