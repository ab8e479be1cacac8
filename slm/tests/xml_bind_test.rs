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

use chrono::{DateTime, NaiveDate};
use geodesyml::{GeodesyMlParser, GeodesyMlVersion};
use sitelog::{Index, Level, SectionId, Value};
use slm::bind::{GeodesyMlBinder, XmlSchema};
use slm::convert::Convert;
use slm::bind::Table;
use slm::{CatalogKind, MemoryCatalog};

const SITE_LOG_V0_5: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<geo:GeodesyML xmlns:geo="urn:xml-gov-au:icsm:egeodesy:0.5"
    xmlns:gml="http://www.opengis.net/gml/3.2"
    gml:id="GeodesyML">
  <geo:siteLog gml:id="AAA200USA">
    <geo:formInformation>
      <geo:FormInformation gml:id="form">
        <geo:preparedBy>Jane Doe</geo:preparedBy>
        <geo:datePrepared>2022-09-09</geo:datePrepared>
        <geo:reportType>UPDATE</geo:reportType>
      </geo:FormInformation>
    </geo:formInformation>
    <geo:siteIdentification>
      <geo:SiteIdentification gml:id="site">
        <geo:siteName>Alpha Station</geo:siteName>
        <geo:fourCharacterID>AAA2</geo:fourCharacterID>
        <geo:monumentInscription>NONE</geo:monumentInscription>
        <geo:iersDOMESNumber>49999M001</geo:iersDOMESNumber>
        <geo:cdpNumber>NONE</geo:cdpNumber>
        <geo:monumentDescription>DEEP-DRILLED BRACED</geo:monumentDescription>
        <geo:heightOfTheMonument>1.5</geo:heightOfTheMonument>
        <geo:monumentFoundation>STEEL RODS</geo:monumentFoundation>
        <geo:foundationDepth>10.7</geo:foundationDepth>
        <geo:markerDescription>TOP CENTER OF DOME</geo:markerDescription>
        <geo:dateInstalled>2004-06-18T00:00:00Z</geo:dateInstalled>
        <geo:geologicCharacteristic>BEDROCK</geo:geologicCharacteristic>
        <geo:bedrockType>METAMORPHIC</geo:bedrockType>
        <geo:bedrockCondition>FRESH</geo:bedrockCondition>
        <geo:fractureSpacing>11-50 cm</geo:fractureSpacing>
        <geo:faultZonesNearby>NO</geo:faultZonesNearby>
        <geo:distance-Activity></geo:distance-Activity>
      </geo:SiteIdentification>
    </geo:siteIdentification>
    <geo:gnssReceiver>
      <geo:GnssReceiver gml:id="receiver-1">
        <geo:igsModelCode>TRIMBLE NETR9</geo:igsModelCode>
        <geo:manufacturerSerialNumber>5035K69749</geo:manufacturerSerialNumber>
        <geo:satelliteSystem>GPS</geo:satelliteSystem>
        <geo:satelliteSystem>GLO</geo:satelliteSystem>
        <geo:firmwareVersion>4.85</geo:firmwareVersion>
        <geo:elevationCutoffSetting>0</geo:elevationCutoffSetting>
        <geo:dateInstalled>2014-09-25T00:00:00Z</geo:dateInstalled>
        <geo:dateRemoved>2019-05-01T12:00:00Z</geo:dateRemoved>
      </geo:GnssReceiver>
    </geo:gnssReceiver>
    <geo:gnssReceiver>
      <geo:GnssReceiver gml:id="receiver-2">
        <geo:igsModelCode>TRIMBLE ALLOY</geo:igsModelCode>
        <geo:manufacturerSerialNumber>6048R40013</geo:manufacturerSerialNumber>
        <geo:satelliteSystem>GPS</geo:satelliteSystem>
        <geo:satelliteSystem>GLONASS</geo:satelliteSystem>
        <geo:satelliteSystem>GAL</geo:satelliteSystem>
        <geo:firmwareVersion>6.19</geo:firmwareVersion>
        <geo:elevationCutoffSetting>0</geo:elevationCutoffSetting>
        <geo:dateInstalled>2019-05-01T12:00:00Z</geo:dateInstalled>
        <geo:temperatureStabilization>20 +/- 2</geo:temperatureStabilization>
      </geo:GnssReceiver>
    </geo:gnssReceiver>
  </geo:siteLog>
</geo:GeodesyML>
"#;

const SITE_LOG_V0_4: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<geo:GeodesyML xmlns:geo="urn:xml-gov-au:icsm:egeodesy:0.4"
    xmlns:gml="http://www.opengis.net/gml/3.2"
    gml:id="GeodesyML">
  <geo:siteLog gml:id="AAA200USA">
    <geo:formInformation>
      <geo:preparedBy>Jane Doe</geo:preparedBy>
      <geo:datePrepared>09-Sep-2022</geo:datePrepared>
      <geo:reportType>NEW</geo:reportType>
    </geo:formInformation>
  </geo:siteLog>
</geo:GeodesyML>
"#;

fn catalog() -> MemoryCatalog {
    MemoryCatalog::new()
        .with(CatalogKind::Receiver, "TRIMBLE NETR9")
        .with(CatalogKind::Receiver, "TRIMBLE ALLOY")
}

fn receiver(order: u32) -> SectionId {
    SectionId::new(3, Some(Index::Number(order)), None)
}

#[test]
fn binds_current_schema() {
    let catalog = catalog();
    let mut parsed = GeodesyMlParser::new().site_name("AAA200USA").parse(SITE_LOG_V0_5);
    assert_eq!(parsed.version(), Some(GeodesyMlVersion::V0_5));
    GeodesyMlBinder::new(&catalog).bind(&mut parsed);

    let log = parsed.log();
    assert!(log.is_valid(), "{}", log.report());
    assert_eq!(log.findings().warnings().count(), 0, "{}", log.report());

    let form = log.section(&SectionId::new(0, None, None)).unwrap();
    assert_eq!(form.get("prepared_by"), Some(&Value::from("Jane Doe")));
    assert_eq!(
        form.get("date_prepared"),
        Some(&Value::Date(NaiveDate::from_ymd_opt(2022, 9, 9).unwrap()))
    );
    assert_eq!(form.parameter("geo:preparedBy").unwrap().line(), 7);

    let site = log.section(&SectionId::new(1, None, None)).unwrap();
    assert_eq!(site.get("site_name"), Some(&Value::from("Alpha Station")));
    assert_eq!(site.get("monument_height"), Some(&Value::Float(1.5)));
    assert!(site.parameter("geo:fourCharacterID").is_none());
}

#[test]
fn binds_repeated_receivers_in_document_order() {
    let catalog = catalog();
    let mut parsed = GeodesyMlParser::new().parse(SITE_LOG_V0_5);
    GeodesyMlBinder::new(&catalog).bind(&mut parsed);
    let log = parsed.log();

    let first = log.section(&receiver(1)).unwrap();
    assert_eq!(first.get("receiver_type"), Some(&Value::from("TRIMBLE NETR9")));
    assert_eq!(
        first.get("satellite_system"),
        Some(&Value::Keys(vec!["GPS".into(), "GLO".into()]))
    );
    assert_eq!(
        first.get("removed"),
        Some(&Value::DateTime(
            DateTime::parse_from_rfc3339("2019-05-01T12:00:00Z").unwrap()
        ))
    );
    assert_eq!(first.parameter("geo:satelliteSystem").unwrap().lines(), 37..=38);

    let second = log.section(&receiver(2)).unwrap();
    assert_eq!(second.get("receiver_type"), Some(&Value::from("TRIMBLE ALLOY")));
    assert_eq!(
        second.get("satellite_system"),
        Some(&Value::Keys(vec!["GPS".into(), "GLO".into(), "GAL".into()]))
    );
    assert_eq!(second.get("temp_nominal"), Some(&Value::Float(20.0)));
    assert_eq!(second.get("removed"), None);
}

#[test]
fn conversion_errors_point_at_elements() {
    let xml = SITE_LOG_V0_5.replace("<geo:satelliteSystem>GAL<", "<geo:satelliteSystem>XYZ<");
    let catalog = catalog();
    let mut parsed = GeodesyMlParser::new().parse(&xml);
    GeodesyMlBinder::new(&catalog).bind(&mut parsed);
    let log = parsed.log();

    assert!(!log.is_valid());
    let lines: Vec<usize> = log.findings().errors().map(|f| f.line).collect();
    assert_eq!(lines, vec![49, 50, 51]);
    assert!(log.findings().get(49).unwrap().message.contains("XYZ"));
}

#[test]
fn binds_previous_schema() {
    let catalog = catalog();
    let mut parsed = GeodesyMlParser::new().parse(SITE_LOG_V0_4);
    assert_eq!(parsed.version(), Some(GeodesyMlVersion::V0_4));
    GeodesyMlBinder::new(&catalog).bind(&mut parsed);

    let log = parsed.log();
    assert!(log.is_valid(), "{}", log.report());
    let form = log.section(&SectionId::new(0, None, None)).unwrap();
    assert_eq!(
        form.get("date_prepared"),
        Some(&Value::Date(NaiveDate::from_ymd_opt(2022, 9, 9).unwrap()))
    );
    assert_eq!(form.get("report_type"), Some(&Value::from("NEW")));
}

#[test]
fn custom_schema_reports_missing_elements() {
    let schema = XmlSchema::new().section(
        0,
        "/geo:GeodesyML/geo:siteLog/geo:formInformation",
        Table::new()
            .entry("geo:preparedBy", "prepared_by", Convert::Str)
            .entry("geo:approvedBy", "approved_by", Convert::Str),
    );
    let catalog = catalog();
    let mut parsed = GeodesyMlParser::new().parse(SITE_LOG_V0_4);
    GeodesyMlBinder::new(&catalog).schema(&schema).bind(&mut parsed);

    let log = parsed.log();
    let warning = log.findings().get(5).unwrap();
    assert_eq!(warning.level, Level::Warn);
    assert_eq!(warning.message, "Missing parameters:\ngeo:approvedBy");
    assert!(log.section(&SectionId::new(1, None, None)).is_none());
}

#[test]
fn unreadable_documents_are_left_alone() {
    let catalog = catalog();
    let mut parsed = GeodesyMlParser::new().parse("<geo:GeodesyML");
    GeodesyMlBinder::new(&catalog).bind(&mut parsed);

    assert!(parsed.log().sections().is_empty());
    assert!(!parsed.log().is_valid());
}
