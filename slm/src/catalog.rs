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
use std::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

/// The kinds of reference data converters look values up in.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum CatalogKind {
    Antenna,
    Radome,
    Receiver,
    SatelliteSystem,
    Country,
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Antenna => "antenna",
            Self::Radome => "radome",
            Self::Receiver => "receiver",
            Self::SatelliteSystem => "satellite system",
            Self::Country => "country",
        })
    }
}

/// Read-only reference data of equipment models, constellations and
/// countries.
///
/// The data is owned by the caller, typically loaded from a database. The
/// converters only read from it.
pub trait Catalog {
    /// Returns the key of the entry that matches `value` case-insensitively
    /// by key or name.
    fn lookup(&self, kind: CatalogKind, value: &str) -> Option<String>;

    /// The keys of all entries of a kind, used to tell which values would
    /// have been valid.
    fn entries(&self, kind: CatalogKind) -> Vec<String>;
}

/// The satellite systems known by default.
pub const SATELLITE_SYSTEMS: [&str; 8] = ["GPS", "GLO", "GAL", "BDS", "QZSS", "IRNSS", "SBAS", "WAAS"];

/// A catalog held in memory.
///
/// ```
/// use slm::{Catalog, CatalogKind, MemoryCatalog};
///
/// let catalog = MemoryCatalog::new()
///     .with(CatalogKind::Receiver, "TRIMBLE NETR9")
///     .with_entry(CatalogKind::Country, "US", "United States of America");
///
/// assert_eq!(
///     catalog.lookup(CatalogKind::Receiver, "trimble netr9").as_deref(),
///     Some("TRIMBLE NETR9")
/// );
/// assert_eq!(
///     catalog.lookup(CatalogKind::Country, "united states of america").as_deref(),
///     Some("US")
/// );
/// assert_eq!(catalog.lookup(CatalogKind::SatelliteSystem, "gal").as_deref(), Some("GAL"));
/// ```
#[derive(Clone, Debug)]
pub struct MemoryCatalog {
    entries: BTreeMap<CatalogKind, Vec<(String, String)>>,
}

impl Default for MemoryCatalog {
    fn default() -> Self {
        SATELLITE_SYSTEMS
            .iter()
            .fold(Self::empty(), |catalog, sat| catalog.with(CatalogKind::SatelliteSystem, *sat))
    }
}

impl MemoryCatalog {
    /// Creates a catalog that knows the default satellite systems.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog without any entries.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Adds an entry whose name is its key.
    pub fn with<K: Into<String>>(self, kind: CatalogKind, key: K) -> Self {
        let key = key.into();
        self.with_entry(kind, key.clone(), key)
    }

    pub fn with_entry<K: Into<String>, N: Into<String>>(mut self, kind: CatalogKind, key: K, name: N) -> Self {
        self.insert(kind, key, name);
        self
    }

    pub fn insert<K: Into<String>, N: Into<String>>(&mut self, kind: CatalogKind, key: K, name: N) {
        self.entries
            .entry(kind)
            .or_default()
            .push((key.into(), name.into()));
    }
}

impl Catalog for MemoryCatalog {
    fn lookup(&self, kind: CatalogKind, value: &str) -> Option<String> {
        let value = value.trim();
        self.entries
            .get(&kind)?
            .iter()
            .find(|(key, name)| key.eq_ignore_ascii_case(value) || name.eq_ignore_ascii_case(value))
            .map(|(key, _)| key.clone())
    }

    fn entries(&self, kind: CatalogKind) -> Vec<String> {
        self.entries
            .get(&kind)
            .map(|entries| entries.iter().map(|(key, _)| key.clone()).collect())
            .unwrap_or_default()
    }
}
