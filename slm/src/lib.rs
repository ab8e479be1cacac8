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

//! Site log binding.
//!
//! Turns the sections of a parsed GNSS site log into typed fields. Both the
//! legacy text format and GeodesyML are bound through the same translation
//! tables, converters and reference catalog, so problems are reported the
//! same way for either format: as line addressed findings of the
//! [`ParsedLog`](sitelog::ParsedLog).
//!
//! ```
//! use sitelog::{Index, SectionId, Value};
//! use slm::{import, CatalogKind, ImportOptions, MemoryCatalog};
//!
//! let catalog = MemoryCatalog::new().with(CatalogKind::Receiver, "TRIMBLE NETR9");
//! let text = concat!(
//!     "3.   GNSS Receiver Information\n",
//!     "3.1  Receiver Type            : TRIMBLE NETR9\n",
//!     "     Satellite System         : GPS+GLONASS\n",
//! );
//!
//! let import = import(text.as_bytes(), &ImportOptions::new(), &catalog);
//! let receiver = import.log.section(&SectionId::new(3, Some(Index::Number(1)), None)).unwrap();
//!
//! assert_eq!(receiver.get("receiver_type"), Some(&Value::from("TRIMBLE NETR9")));
//! assert_eq!(
//!     receiver.get("satellite_system"),
//!     Some(&Value::Keys(vec!["GPS".into(), "GLO".into()]))
//! );
//! ```

pub mod bind;
pub mod convert;

mod catalog;
mod choices;
mod error;
mod import;

pub use bind::{GeodesyMlBinder, LegacyBinder};
pub use catalog::{Catalog, CatalogKind, MemoryCatalog, SATELLITE_SYSTEMS};
pub use choices::{
    AntennaReferencePoint, Aspiration, ChoiceKind, Choices, CollocationStatus, FractureSpacing,
    FrequencyStandardType, TectonicPlate,
};
pub use error::ConvertError;
pub use import::{import, Import, ImportOptions, SiteLogFormat};
