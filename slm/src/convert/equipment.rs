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

use log::debug;
use sitelog::Value;

use super::{Converted, Outcome};
use crate::catalog::{Catalog, CatalogKind};
use crate::error::ConvertError;

/// Antenna codes are at most this long, anything longer carries the radome.
const ANTENNA_CODE_LEN: usize = 16;

/// Spelled out constellation names and their codes.
const SATELLITE_ALIASES: [(&str, &str); 3] = [("GLONASS", "GLO"), ("BEIDOU", "BDS"), ("GALILEO", "GAL")];

fn lookup(kind: CatalogKind, value: &str, catalog: &dyn Catalog) -> Converted {
    let value = value.trim();
    if value.is_empty() {
        return Ok(Outcome::Bound(Value::Null));
    }

    match catalog.lookup(kind, value) {
        Some(key) => Ok(Outcome::Bound(Value::Str(key))),
        None => {
            debug!("{kind} {value} is not in the catalog");
            Err(ConvertError::Equipment {
                kind,
                value: value.to_string(),
                known: catalog.entries(kind),
            })
        }
    }
}

/// Looks up an antenna model. A radome code appended to the model, as in
/// `TRM59800.00     SCIS`, is dropped.
pub fn to_antenna(value: &str, catalog: &dyn Catalog) -> Converted {
    let antenna = value.trim();
    let parts: Vec<&str> = antenna.split_whitespace().collect();
    let antenna = match parts.last() {
        Some(last) if parts.len() > 1 && antenna.len() > ANTENNA_CODE_LEN => {
            antenna[..antenna.len() - last.len()].trim()
        }
        _ => antenna,
    };
    lookup(CatalogKind::Antenna, antenna, catalog)
}

pub fn to_radome(value: &str, catalog: &dyn Catalog) -> Converted {
    lookup(CatalogKind::Radome, value, catalog)
}

pub fn to_receiver(value: &str, catalog: &dyn Catalog) -> Converted {
    lookup(CatalogKind::Receiver, value, catalog)
}

/// Looks up a country by code or name, dropping words from the end until one
/// matches. Unknown countries are kept as text.
pub fn to_country(value: &str, catalog: &dyn Catalog) -> Converted {
    let value = value.trim();
    if value.is_empty() {
        return Ok(Outcome::Bound(Value::Null));
    }

    let parts: Vec<&str> = value.split_whitespace().collect();
    let code = (1..=parts.len())
        .rev()
        .find_map(|idx| catalog.lookup(CatalogKind::Country, &parts[..idx].join(" ")));
    Ok(Outcome::Bound(Value::Str(code.unwrap_or_else(|| value.to_string()))))
}

/// Reads a list of satellite systems like `GPS+GLO+GAL`.
///
/// The systems may also be given one per line.
pub fn to_satellites(value: &str, catalog: &dyn Catalog) -> Converted {
    let mut keys = Vec::new();
    let mut unknown = Vec::new();
    for system in value
        .split(['+', '\n'])
        .map(str::trim)
        .filter(|system| !system.is_empty())
    {
        let system = SATELLITE_ALIASES
            .iter()
            .find(|(alias, _)| alias.eq_ignore_ascii_case(system))
            .map_or(system, |(_, code)| *code);
        match catalog.lookup(CatalogKind::SatelliteSystem, system) {
            Some(key) => keys.push(key),
            None => unknown.push(system.to_string()),
        }
    }

    if !unknown.is_empty() {
        return Err(ConvertError::Satellites {
            unknown,
            known: catalog.entries(CatalogKind::SatelliteSystem),
        });
    }
    Ok(Outcome::Bound(Value::Keys(keys)))
}

/// Returns a warning if no satellite system is listed.
pub fn no_satellites(value: &Value, catalog: &dyn Catalog) -> Option<String> {
    let empty = match value {
        Value::Null => true,
        Value::Keys(keys) => keys.is_empty(),
        _ => false,
    };
    empty.then(|| {
        format!(
            "Expected constellation list delineated by '+' (e.g. GPS+GLO). Must be one of \n{}",
            catalog.entries(CatalogKind::SatelliteSystem).join("  \n")
        )
    })
}
