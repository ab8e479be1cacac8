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

//! GeodesyML site log reader.
//!
//! GeodesyML is the XML form of a GNSS site log. Documents are read into a
//! small element tree that keeps the source line of every element, so that
//! any problem can be reported as a line addressed [`Finding`] of the
//! [`ParsedLog`], just like problems of the legacy text format.
//!
//! Validation against the schema is not done by this crate. A
//! [`SchemaValidator`] can be plugged into the [`GeodesyMlParser`], and its
//! violations become findings.
//!
//! [`Finding`]: sitelog::Finding
//! [`ParsedLog`]: sitelog::ParsedLog

mod error;
mod parser;
mod tree;
mod validator;
mod version;

pub use error::{Error, ParseError};
pub use parser::{GeodesyMl, GeodesyMlParser};
pub use tree::{Attribute, Document, Element, Namespaces};
pub use validator::{SchemaValidator, SharedValidator, Violation};
pub use version::GeodesyMlVersion;
