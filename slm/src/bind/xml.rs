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

use std::sync::LazyLock;

use geodesyml::{Element, GeodesyMl, GeodesyMlVersion, Namespaces};
use log::debug;
use sitelog::{HeadingIndex, Index, Parameter, Section, SectionId};

use super::{bind_log, Table, Tables, Target};
use crate::catalog::Catalog;
use crate::choices::ChoiceKind;
use crate::convert::{Check, Convert, METERS};

const SITE_LOG: &str = "/geo:GeodesyML/geo:siteLog";

/// Where the sections of a GeodesyML version live in the document and how
/// their elements translate into fields.
///
/// Sections are found by absolute paths. The parameters of a section are the
/// child elements named by its table, with repeated elements joined into one
/// multi-line value.
#[derive(Clone, Debug, Default)]
pub struct XmlSchema {
    paths: Vec<(u32, String)>,
    tables: Tables,
}

impl XmlSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a section found at `path`. Repeating tables number their
    /// sections in document order starting at 1.
    pub fn section<P: Into<String>>(mut self, section: u32, path: P, table: Table) -> Self {
        self.paths.push((section, path.into()));
        self.tables = self.tables.insert(HeadingIndex::Section(section), table);
        self
    }

    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    fn read(&self, document: &geodesyml::Document, namespaces: &Namespaces) -> Vec<Section> {
        let mut sections = Vec::new();
        for (number, path) in &self.paths {
            let Some(table) = self.tables.get(HeadingIndex::Section(*number)) else {
                continue;
            };

            for (order, element) in document.select(path, namespaces).into_iter().enumerate() {
                let index = table
                    .is_repeating()
                    .then(|| Index::Number(order as u32 + 1));
                let id = SectionId::new(*number, index, None);
                sections.push(read_section(id, element, table, namespaces));
            }
        }
        sections
    }
}

fn read_section(id: SectionId, element: &Element, table: &Table, namespaces: &Namespaces) -> Section {
    let mut section = Section::new(element.line(), id, element.qualified_name());
    for name in table.names() {
        let children = element.select(name, namespaces);
        let Some((first, rest)) = children.split_first() else {
            continue;
        };

        let mut parameter = Parameter::new(first.line(), name, first.text());
        for child in rest {
            parameter.append(child.line(), child.text());
        }
        if let Err(parameter) = section.add_parameter(parameter) {
            debug!("{} is listed twice for section {id}", parameter.name());
        }
    }
    section
}

fn form() -> Table {
    Table::new()
        .entry("geo:preparedBy", "prepared_by", Convert::Str)
        .entry("geo:datePrepared", "date_prepared", Convert::Date)
        .entry("geo:reportType", "report_type", Convert::Str)
}

fn site_identification() -> Table {
    Table::new()
        .entry("geo:siteName", "site_name", Convert::Str)
        .entry("geo:monumentInscription", "monument_inscription", Convert::Str)
        .entry("geo:iersDOMESNumber", "iers_domes_number", Convert::Str)
        .entry("geo:cdpNumber", "cdp_number", Convert::Str)
        .entry("geo:monumentDescription", "monument_description", Convert::Str)
        .entry("geo:heightOfTheMonument", "monument_height", Convert::float(METERS))
        .entry("geo:monumentFoundation", "monument_foundation", Convert::Str)
        .entry("geo:foundationDepth", "foundation_depth", Convert::float(METERS))
        .entry("geo:markerDescription", "marker_description", Convert::Str)
        .entry("geo:dateInstalled", "date_installed", Convert::DateTime)
        .entry("geo:geologicCharacteristic", "geologic_characteristic", Convert::Str)
        .entry("geo:bedrockType", "bedrock_type", Convert::Str)
        .entry("geo:bedrockCondition", "bedrock_condition", Convert::Str)
        .entry(
            "geo:fractureSpacing",
            "fracture_spacing",
            Convert::Choice(ChoiceKind::FractureSpacing, &[]),
        )
        .entry("geo:faultZonesNearby", "fault_zones", Convert::Str)
        .entry("geo:distance-Activity", "distance", Convert::Str)
        .entry("geo:notes", "additional_information", Convert::Str)
        .optional("additional_information")
}

fn receiver() -> Table {
    Table::new()
        .entry("geo:igsModelCode", "receiver_type", Convert::Receiver)
        .translate(
            "geo:satelliteSystem",
            [Target::new("satellite_system", Convert::Satellites).check(Check::Satellites)],
        )
        .entry("geo:manufacturerSerialNumber", "serial_number", Convert::Str)
        .entry("geo:firmwareVersion", "firmware", Convert::Str)
        .entry(
            "geo:elevationCutoffSetting",
            "elevation_cutoff",
            Convert::float(&["deg", "degrees"]),
        )
        .entry("geo:dateInstalled", "installed", Convert::DateTime)
        .entry("geo:dateRemoved", "removed", Convert::DateTime)
        .translate(
            "geo:temperatureStabilization",
            [
                Target::new("temp_stabilized", Convert::TemperatureStabilized),
                Target::new("temp_nominal", Convert::TemperatureNominal),
                Target::new("temp_deviation", Convert::TemperatureDeviation),
            ],
        )
        .entry("geo:notes", "additional_info", Convert::Str)
        .optional("removed")
        .optional("temp_stabilized")
        .optional("temp_nominal")
        .optional("temp_deviation")
        .optional("additional_info")
        .repeating()
}

fn schema_v0_4() -> XmlSchema {
    XmlSchema::new()
        .section(0, format!("{SITE_LOG}/geo:formInformation"), form())
        .section(1, format!("{SITE_LOG}/geo:siteIdentification"), site_identification())
        .section(3, format!("{SITE_LOG}/geo:gnssReceiver/geo:GnssReceiver"), receiver())
}

fn schema_v0_5() -> XmlSchema {
    XmlSchema::new()
        .section(
            0,
            format!("{SITE_LOG}/geo:formInformation/geo:FormInformation"),
            form(),
        )
        .section(
            1,
            format!("{SITE_LOG}/geo:siteIdentification/geo:SiteIdentification"),
            site_identification(),
        )
        .section(3, format!("{SITE_LOG}/geo:gnssReceiver/geo:GnssReceiver"), receiver())
}

static SCHEMA_V0_4: LazyLock<XmlSchema> = LazyLock::new(schema_v0_4);
static SCHEMA_V0_5: LazyLock<XmlSchema> = LazyLock::new(schema_v0_5);

/// The stock schema of a GeodesyML version.
pub fn geodesyml_schema(version: GeodesyMlVersion) -> &'static XmlSchema {
    match version {
        GeodesyMlVersion::V0_4 => &*SCHEMA_V0_4,
        GeodesyMlVersion::V0_5 => &*SCHEMA_V0_5,
    }
}

/// Binds GeodesyML documents.
///
/// The binder first turns the elements named by the schema into sections of
/// the document's log and then binds them like any other site log. Documents
/// that could not be read or have an unsupported version are left alone.
pub struct GeodesyMlBinder<'c> {
    catalog: &'c dyn Catalog,
    schema: Option<&'c XmlSchema>,
}

impl<'c> GeodesyMlBinder<'c> {
    pub fn new(catalog: &'c dyn Catalog) -> Self {
        Self {
            catalog,
            schema: None,
        }
    }

    /// Replaces the stock schema of the document's version.
    pub fn schema(mut self, schema: &'c XmlSchema) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn bind(&self, parsed: &mut GeodesyMl) {
        let Some(version) = parsed.version() else {
            return;
        };
        let schema = self.schema.unwrap_or_else(|| geodesyml_schema(version));

        let (document, namespaces, log) = parsed.split_mut();
        let Some(document) = document else {
            return;
        };

        for section in schema.read(document, namespaces) {
            log.add_section(section);
        }
        bind_log(log, &schema.tables, self.catalog);
    }
}
