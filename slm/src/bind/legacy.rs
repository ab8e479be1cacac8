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

use sitelog::{HeadingIndex, ParsedLog};

use super::{bind_log, Table, Tables, Target};
use crate::catalog::Catalog;
use crate::choices::ChoiceKind;
use crate::convert::{to_point, Check, Convert, Numeric, Take, ACCURACY_PREFIXES, METERS};

const METERS_FLOAT: Convert = Convert::float(METERS);
const METERS_ACCURACY: Convert = Convert::Float(Numeric::new(METERS).prefixes(ACCURACY_PREFIXES));
const DEGREES_FLOAT: Convert = Convert::float(&["deg", "degrees"]);
const MILLIMETERS_ACCURACY: Convert = Convert::Float(
    Numeric::new(&["mm"])
        .prefixes(ACCURACY_PREFIXES)
        .take(Take::Second),
);
const HUMIDITY_ACCURACY: Convert = Convert::Float(
    Numeric::new(&["%", "rel h", "% rel h"])
        .prefixes(ACCURACY_PREFIXES)
        .take(Take::Second),
);
const TEMPERATURE_ACCURACY: Convert = Convert::Float(
    Numeric::new(&["deg C", "C"])
        .prefixes(ACCURACY_PREFIXES)
        .take(Take::Second),
);
const MEGAHERTZ: Convert = Convert::float(&["MHz"]);
const FLOAT: Convert = Convert::float(&[]);

static LEGACY_TABLES: LazyLock<Tables> = LazyLock::new(legacy_tables);

/// Binds sections of the legacy text format.
///
/// ```
/// use sitelog::{SectionId, SiteLogParser, Value};
/// use slm::{LegacyBinder, MemoryCatalog};
///
/// let text = "1.   Site Identification of the GNSS Monument\n     Height of the Monument   : 1.5 m\n";
/// let mut log = SiteLogParser::new().parse(text);
/// LegacyBinder::new(&MemoryCatalog::new()).bind(&mut log);
///
/// let section = log.section(&SectionId::new(1, None, None)).unwrap();
/// assert_eq!(section.get("monument_height"), Some(&Value::Float(1.5)));
/// ```
pub struct LegacyBinder<'c> {
    catalog: &'c dyn Catalog,
    tables: &'c Tables,
}

impl<'c> LegacyBinder<'c> {
    pub fn new(catalog: &'c dyn Catalog) -> Self {
        Self {
            catalog,
            tables: &LEGACY_TABLES,
        }
    }

    /// Replaces the stock IGS translation tables.
    pub fn tables(mut self, tables: &'c Tables) -> Self {
        self.tables = tables;
        self
    }

    pub fn bind(&self, log: &mut ParsedLog) {
        bind_log(log, self.tables, self.catalog);
    }
}

fn effective_dates(table: Table) -> Table {
    table.translate(
        "Effective Dates",
        [
            Target::new("effective_start", Convert::EffectiveStart),
            Target::new("effective_end", Convert::EffectiveEnd),
        ],
    )
}

fn meteorological(table: Table) -> Table {
    table
        .entry("Manufacturer", "manufacturer", Convert::Str)
        .entry("Serial Number", "serial_number", Convert::Str)
        .entry("Height Diff to Ant", "height_diff", METERS_ACCURACY)
        .entry("Calibration date", "calibration", Convert::Date)
        .with(effective_dates)
        .entry("Notes", "notes", Convert::Str)
}

fn ongoing_conditions(table: Table) -> Table {
    table
        .with(effective_dates)
        .entry("Additional Information", "additional_information", Convert::Str)
}

fn agency(table: Table) -> Table {
    table
        .entry("Agency", "agency", Convert::Str)
        .entry("Preferred Abbreviation", "preferred_abbreviation", Convert::Str)
        .entry("Mailing Address", "mailing_address", Convert::Str)
        .entry("Primary Contact::Contact Name", "primary_name", Convert::Str)
        .entry("Primary Contact::Telephone (primary)", "primary_phone1", Convert::Str)
        .entry("Primary Contact::Telephone (secondary)", "primary_phone2", Convert::Str)
        .entry("Primary Contact::Fax", "primary_fax", Convert::Str)
        .entry("Primary Contact::E-mail", "primary_email", Convert::Str)
        .entry("Secondary Contact::Contact Name", "secondary_name", Convert::Str)
        .entry("Secondary Contact::Telephone (primary)", "secondary_phone1", Convert::Str)
        .entry("Secondary Contact::Telephone (secondary)", "secondary_phone2", Convert::Str)
        .entry("Secondary Contact::Fax", "secondary_fax", Convert::Str)
        .entry("Secondary Contact::E-mail", "secondary_email", Convert::Str)
        .entry("Additional Information", "additional_information", Convert::Str)
}

fn form() -> Table {
    Table::new()
        .entry("Prepared By", "prepared_by", Convert::Str)
        .entry("Prepared by (full name)", "prepared_by", Convert::Str)
        .entry("Date", "date_prepared", Convert::Date)
        .entry("Date Prepared", "date_prepared", Convert::Date)
        .entry("Report Type", "report_type", Convert::Str)
        .entry("If Update", "", Convert::Ignore(None))
        .entry("Previous Site Log", "previous_log", Convert::Ignore(None))
        .entry("Modified/Added Sections", "modified_section", Convert::Str)
}

fn site_identification() -> Table {
    Table::new()
        .entry("Site Name", "site_name", Convert::Str)
        .entry("4 char ID", "nine_character_id", Convert::Ignore(None))
        .entry("Four Character ID", "nine_character_id", Convert::Ignore(None))
        .entry("Nine Character ID", "nine_character_id", Convert::Ignore(None))
        .entry("Monument Inscription", "monument_inscription", Convert::Str)
        .entry("IERS DOMES Number", "iers_domes_number", Convert::Str)
        .entry("CDP Number", "cdp_number", Convert::Str)
        .entry("Date", "date_installed", Convert::DateTime)
        .entry("Date Installed", "date_installed", Convert::DateTime)
        .entry("Monument Description", "monument_description", Convert::Str)
        .entry("Height of the Monument (m)", "monument_height", METERS_FLOAT)
        .entry("Height of the Monument", "monument_height", METERS_FLOAT)
        .entry("Monument Foundation", "monument_foundation", Convert::Str)
        .entry("Foundation Depth (m)", "foundation_depth", METERS_FLOAT)
        .entry("Foundation Depth", "foundation_depth", METERS_FLOAT)
        .entry("Marker Description", "marker_description", Convert::Str)
        .entry("Geologic Characteristic", "geologic_characteristic", Convert::Str)
        .entry("Bedrock Type", "bedrock_type", Convert::Str)
        .entry("Bedrock Condition", "bedrock_condition", Convert::Str)
        .entry(
            "Fracture Spacing",
            "fracture_spacing",
            Convert::Choice(ChoiceKind::FractureSpacing, &[]),
        )
        .entry("Fault Zones Nearby", "fault_zones", Convert::Str)
        .entry("Distance/activity", "distance", Convert::Str)
        .entry("Additional Information", "additional_information", Convert::Str)
}

fn site_location() -> Table {
    Table::new()
        .entry("City", "city", Convert::Str)
        .entry("City or Town", "city", Convert::Str)
        .entry("State or Province", "state", Convert::Str)
        .entry("Country", "country", Convert::Country)
        .entry("Country or Region", "country", Convert::Country)
        .entry(
            "Tectonic Plate",
            "tectonic",
            Convert::Choice(ChoiceKind::TectonicPlate, &[]),
        )
        .entry("Approximate Position", "", Convert::Ignore(None))
        .entry("X coordinate", "x", FLOAT)
        .entry("Y coordinate", "y", FLOAT)
        .entry("Z coordinate", "z", FLOAT)
        .entry("Latitude", "latitude", Convert::DecimalDegrees)
        .entry("Longitude", "longitude", Convert::DecimalDegrees)
        .entry("Elevation", "elevation", FLOAT)
        .entry("Latitude (deg)", "latitude", Convert::DecimalDegrees)
        .entry("Longitude (deg)", "longitude", Convert::DecimalDegrees)
        .entry("Elevation (m)", "elevation", FLOAT)
        .entry("X coordinate (m)", "x", FLOAT)
        .entry("Y coordinate (m)", "y", FLOAT)
        .entry("Z coordinate (m)", "z", FLOAT)
        .entry("Latitude (N is +)", "latitude", Convert::DecimalDegrees)
        .entry("Longitude (E is +)", "longitude", Convert::DecimalDegrees)
        .entry("Elevation (m,ellips.)", "elevation", FLOAT)
        .entry("Additional Information", "additional_information", Convert::Str)
        .collate(&["x", "y", "z"], "xyz", to_point)
        .collate(&["latitude", "longitude", "elevation"], "llh", to_point)
}

pub(super) fn receiver() -> Table {
    Table::new()
        .entry("Type", "receiver_type", Convert::Receiver)
        .entry("Receiver Type", "receiver_type", Convert::Receiver)
        .translate(
            "Satellite System",
            [Target::new("satellite_system", Convert::Satellites).check(Check::Satellites)],
        )
        .entry("Serial Number", "serial_number", Convert::Str)
        .entry("Firmware Version", "firmware", Convert::Str)
        .entry("Elevation Cutoff Setting", "elevation_cutoff", DEGREES_FLOAT)
        .entry("Date", "installed", Convert::DateTime)
        .entry("Date Installed", "installed", Convert::DateTime)
        .entry("Date Removed", "removed", Convert::DateTime)
        .translate(
            "Temperature Stabiliz.",
            [
                Target::new("temp_stabilized", Convert::TemperatureStabilized),
                Target::new("temp_nominal", Convert::TemperatureNominal),
                Target::new("temp_deviation", Convert::TemperatureDeviation),
            ],
        )
        .entry("Additional Information", "additional_info", Convert::Str)
        .repeating()
}

fn antenna() -> Table {
    Table::new()
        .entry("Type", "antenna_type", Convert::Antenna)
        .entry("Antenna Type", "antenna_type", Convert::Antenna)
        .entry("Serial Number", "serial_number", Convert::Str)
        .entry(
            "Antenna Reference Point",
            "reference_point",
            Convert::Choice(ChoiceKind::AntennaReferencePoint, &["ARP", "n/a"]),
        )
        .entry("Marker->ARP Up Ecc.", "marker_up", METERS_FLOAT)
        .entry("Marker->ARP North Ecc", "marker_north", METERS_FLOAT)
        .entry("Marker->ARP East Ecc", "marker_east", METERS_FLOAT)
        .entry("Marker->ARP Up Ecc. (m)", "marker_up", METERS_FLOAT)
        .entry("Marker->ARP North Ecc(m)", "marker_north", METERS_FLOAT)
        .entry("Marker->ARP East Ecc(m)", "marker_east", METERS_FLOAT)
        // superseded by the marker offsets, still common in older logs
        .entry("Antenna Height", "antenna_height", METERS_FLOAT)
        .entry("Antenna Height (m)", "antenna_height", METERS_FLOAT)
        .entry("Alignment from True N", "alignment", Convert::Alignment)
        .entry("Degree Offset from North", "alignment", Convert::Alignment)
        .entry("Antenna Radome Type", "radome_type", Convert::Radome)
        .entry("Radome Serial Number", "radome_serial_number", Convert::Str)
        .entry("Antenna Cable Type", "cable_type", Convert::Str)
        .entry("Antenna Cable Length", "cable_length", METERS_ACCURACY)
        .entry("Date Installed", "installed", Convert::DateTime)
        .entry("Date", "installed", Convert::DateTime)
        .entry("Date Removed", "removed", Convert::DateTime)
        .entry("Additional Information", "additional_information", Convert::Str)
        .collate(&["marker_up", "marker_north", "marker_east"], "marker_une", to_point)
        .optional("antenna_height")
        .repeating()
}

fn surveyed_ties() -> Table {
    Table::new()
        .entry("Monument Name", "name", Convert::Str)
        .entry("Site Ref CDP Number", "cdp_number", Convert::Str)
        .entry("Site Ref Domes Number", "domes_number", Convert::Str)
        .entry("Tied Marker Name", "name", Convert::Str)
        .entry("Tied Marker Usage", "usage", Convert::Str)
        .entry("Tied Marker CDP Number", "cdp_number", Convert::Str)
        .entry("Tied Marker DOMES Number", "domes_number", Convert::Str)
        .entry("dx", "dx", Convert::float(&["m"]))
        .entry("dy", "dy", Convert::float(&["m"]))
        .entry("dz", "dz", Convert::float(&["m"]))
        .entry("dx (m)", "dx", Convert::float(&["m"]))
        .entry("dy (m)", "dy", Convert::float(&["m"]))
        .entry("dz (m)", "dz", Convert::float(&["m"]))
        .entry("Accuracy", "accuracy", MILLIMETERS_ACCURACY)
        .entry("Accuracy (mm)", "accuracy", MILLIMETERS_ACCURACY)
        .entry("Survey method", "survey_method", Convert::Str)
        .entry("Date", "measured", Convert::DateTime)
        .entry("Date Measured", "measured", Convert::DateTime)
        .entry("Additional Information", "additional_information", Convert::Str)
        .collate(&["dx", "dy", "dz"], "diff_xyz", to_point)
        .repeating()
}

fn frequency_standard() -> Table {
    Table::new()
        .entry(
            "Standard Type",
            "standard_type",
            Convert::Choice(ChoiceKind::FrequencyStandardType, &[]),
        )
        .entry("Input Frequency", "input_frequency", MEGAHERTZ)
        .entry("Frequency", "input_frequency", MEGAHERTZ)
        .with(effective_dates)
        .entry("Notes", "notes", Convert::Str)
        .repeating()
}

fn collocation() -> Table {
    Table::new()
        .entry("Instrumentation Type", "instrument_type", Convert::Str)
        .entry(
            "Status",
            "status",
            Convert::Choice(ChoiceKind::CollocationStatus, &[]),
        )
        .with(effective_dates)
        .entry("Notes", "notes", Convert::Str)
        .repeating()
}

fn humidity() -> Table {
    Table::new()
        .entry("Accuracy", "accuracy", HUMIDITY_ACCURACY)
        .entry("Humidity Sensor Model", "model", Convert::Str)
        .entry("Data Sampling Interval", "sampling_interval", Convert::Seconds)
        .entry("Accuracy (% rel h)", "accuracy", HUMIDITY_ACCURACY)
        .entry("Aspiration", "aspiration", Convert::Choice(ChoiceKind::Aspiration, &[]))
        .with(meteorological)
        .repeating()
}

fn pressure() -> Table {
    Table::new()
        .entry("Pressure Sensor Model", "model", Convert::Str)
        .entry("Data Sampling Interval", "sampling_interval", Convert::Seconds)
        .entry("Accuracy", "accuracy", Convert::Pressure)
        .with(meteorological)
        .repeating()
}

fn temperature() -> Table {
    Table::new()
        .entry("Temp. Sensor Model", "model", Convert::Str)
        .entry("Data Sampling Interval", "sampling_interval", Convert::Seconds)
        .entry("Accuracy", "accuracy", TEMPERATURE_ACCURACY)
        .entry("Aspiration", "aspiration", Convert::Choice(ChoiceKind::Aspiration, &[]))
        .with(meteorological)
        .repeating()
}

fn water_vapor() -> Table {
    Table::new()
        .entry("Water Vapor Radiometer", "model", Convert::Str)
        .entry("Distance to Antenna", "distance_to_antenna", METERS_FLOAT)
        .with(meteorological)
        .repeating()
}

fn other_instrumentation() -> Table {
    Table::new()
        .entry("Other Instrumentation", "instrumentation", Convert::Str)
        .repeating()
}

fn radio_interferences() -> Table {
    Table::new()
        .with(ongoing_conditions)
        .entry("Radio Interferences", "interferences", Convert::Str)
        .entry("Observed Degradations", "degradations", Convert::Str)
        .repeating()
}

fn multipath_sources() -> Table {
    Table::new()
        .with(ongoing_conditions)
        .entry("Multipath Sources", "sources", Convert::Str)
        .repeating()
}

fn signal_obstructions() -> Table {
    Table::new()
        .with(ongoing_conditions)
        .entry("Signal Obstructions", "obstructions", Convert::Str)
        .repeating()
}

fn local_episodic_effects() -> Table {
    Table::new()
        .translate(
            "Date",
            [
                Target::new("effective_start", Convert::EffectiveStart),
                Target::new("effective_end", Convert::EffectiveEnd),
            ],
        )
        .entry("Event", "event", Convert::Str)
        .repeating()
}

fn more_information() -> Table {
    Table::new()
        .entry("Primary Data Center", "primary", Convert::Str)
        .entry("Secondary Data Center", "secondary", Convert::Str)
        .entry("URL for More Information", "more_info", Convert::Concat)
        .entry("Site Map", "sitemap", Convert::Str)
        .entry("Site Diagram", "site_diagram", Convert::Str)
        .entry("Horizon Mask", "horizon_mask", Convert::Str)
        .entry("Monument Description", "monument_description", Convert::Str)
        .entry("Site Pictures", "site_picture", Convert::Str)
        .entry("Additional Information", "additional_information", Convert::Str)
}

/// The translation tables of the IGS site log format.
pub fn legacy_tables() -> Tables {
    use HeadingIndex::{Section, Subsection};

    Tables::new()
        .insert(Section(0), form())
        .insert(Section(1), site_identification())
        .insert(Section(2), site_location())
        .insert(Section(3), receiver())
        .insert(Section(4), antenna())
        .insert(Section(5), surveyed_ties())
        .insert(Section(6), frequency_standard())
        .insert(Section(7), collocation())
        .insert(Subsection(8, 1), humidity())
        .insert(Subsection(8, 2), pressure())
        .insert(Subsection(8, 3), temperature())
        .insert(Subsection(8, 4), water_vapor())
        .insert(Subsection(8, 5), other_instrumentation())
        .insert(Subsection(9, 1), radio_interferences())
        .insert(Subsection(9, 2), multipath_sources())
        .insert(Subsection(9, 3), signal_obstructions())
        .insert(Section(10), local_episodic_effects())
        .insert(Section(11), Table::new().with(agency))
        .insert(Section(12), Table::new().with(agency))
        .insert(Section(13), more_information())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_names_are_listed_last() {
        let tables = legacy_tables();
        let form = tables.get(HeadingIndex::Section(0)).unwrap();
        assert_eq!(form.display_name("prepared_by"), Some("Prepared by (full name)"));
        assert_eq!(
            form.expected(),
            ["prepared_by", "date_prepared", "report_type", "previous_log", "modified_section"]
        );

        let antenna = tables.get(HeadingIndex::Section(4)).unwrap();
        assert!(!antenna.expected().contains(&"antenna_height"));
        assert_eq!(antenna.display_name("marker_up"), Some("Marker->ARP Up Ecc. (m)"));
    }

    #[test]
    fn scoped_names_fall_back() {
        let tables = legacy_tables();
        let agency = tables.get(HeadingIndex::Section(11)).unwrap();
        let scoped = agency.translation("PRIMARYCONTACT::CONTACTNAME").unwrap();
        assert_eq!(scoped[0].field(), "primary_name");

        let unscoped = agency.translation("OTHERCONTACT::AGENCY").unwrap();
        assert_eq!(unscoped[0].field(), "agency");
        assert!(agency.translation("OTHERCONTACT::NAME").is_none());
    }

    #[test]
    fn repeating_headings() {
        let tables = legacy_tables();
        let repeating: Vec<String> = tables
            .iter()
            .filter(|(_, table)| table.is_repeating())
            .map(|(heading, _)| heading.to_string())
            .collect();
        assert_eq!(
            repeating,
            ["3", "4", "5", "6", "7", "10", "8.1", "8.2", "8.3", "8.4", "8.5", "9.1", "9.2", "9.3"]
        );
    }
}
