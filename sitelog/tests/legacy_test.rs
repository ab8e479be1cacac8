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

use sitelog::{decode, Encoding, Index, Level, SectionId, SiteLogParser};

const SITE_LOG: &[u8] = include_bytes!("data/AAA200USA_20220909.log");

fn id(section: u32, subsection: Option<u32>, order: Option<u32>) -> SectionId {
    SectionId::new(
        section,
        subsection.map(Index::Number),
        order.map(Index::Number),
    )
}

#[test]
fn parses_complete_site_log() {
    let (text, encoding) = decode(SITE_LOG);
    assert_eq!(encoding, Encoding::Utf8);

    let log = SiteLogParser::new().site_name("AAA200USA").parse(&text);

    assert_eq!(log.name_matched(), Some(true));
    assert_eq!(log.site_name(), Some("AAA200USA"));
    assert!(log.is_valid());
    assert_eq!(log.findings().warnings().count(), 0);

    let ids: Vec<String> = log.sections().keys().map(|id| id.to_string()).collect();
    assert_eq!(
        ids,
        vec![
            "0", "1", "2", "3", "3.1", "3.2", "3.x", "4", "4.1", "4.x", "5", "5.1", "6", "6.1",
            "7", "7.1", "8", "8.1.1", "8.2.1", "8.3.1", "9", "9.1.1", "9.2.1", "9.3.1", "10",
            "10.1", "11", "12", "13",
        ]
    );
}

#[test]
fn reads_parameter_values() {
    let (text, _) = decode(SITE_LOG);
    let log = SiteLogParser::new().parse(&text);

    let receiver = log.section(&id(3, Some(2), None)).unwrap();
    assert_eq!(receiver.parameter("Receiver Type").unwrap().value(), "TRIMBLE ALLOY");
    assert_eq!(receiver.parameter("Receiver Type").unwrap().line(), 63);

    let antenna = log.section(&id(4, Some(1), None)).unwrap();
    assert_eq!(
        antenna.parameter("Marker->ARP Up Ecc. (m)").unwrap().value(),
        "0.0083"
    );
    assert!(antenna.parameter("Radome Serial Number").unwrap().is_empty());

    let humidity = log.section(&id(8, Some(1), Some(1))).unwrap();
    assert_eq!(humidity.parameter("Data Sampling Interval").unwrap().value(), "300 sec");
}

#[test]
fn multi_line_values_and_contacts() {
    let (text, _) = decode(SITE_LOG);
    let log = SiteLogParser::new().parse(&text);
    let agency = log.section(&id(11, None, None)).unwrap();

    let address = agency.parameter("Mailing Address").unwrap();
    assert_eq!(address.value(), "1 Main St\nBoulder, CO 80301");
    assert_eq!(address.lines(), 202..=203);

    assert_eq!(
        agency.parameter("Primary Contact::Contact Name").unwrap().value(),
        "Jane Doe"
    );
    assert_eq!(
        agency.parameter("Secondary Contact::E-mail").unwrap().value(),
        "john@example.com"
    );
    assert!(agency.parameter("Additional Information").is_some());

    let more = log.section(&id(13, None, None)).unwrap();
    assert_eq!(
        more.parameter("URL for More Information").unwrap().values(),
        ["https://example.com/", "stations/AAA200USA"]
    );
}

#[test]
fn placeholders_and_examples_are_ignored() {
    let (text, _) = decode(SITE_LOG);
    let log = SiteLogParser::new().parse(&text);

    let example = log
        .section(&SectionId::new(4, Some(Index::Example), None))
        .unwrap();
    assert_eq!(example.line(), 100);
    assert_eq!(example.line_end(), 113);
    for line in example.line()..=example.line_end() {
        let finding = log.findings().get(line).unwrap();
        assert_eq!(finding.level, Level::Ignored);
        assert_eq!(finding.message, "Placeholder text");
    }

    // Previous Site Log : (ssss_ccyymmdd.log)
    assert_eq!(log.findings().get(11).map(|f| f.level), Some(Level::Ignored));
}

#[test]
fn isolates_antenna_graphic() {
    let (text, _) = decode(SITE_LOG);
    let log = SiteLogParser::new().parse(&text);
    let graphic = log.graphic().unwrap();

    assert!(graphic.trim_start().starts_with("+---------+"));
    assert!(graphic.ends_with("+-------------------------+"));
    assert_eq!(graphic.lines().count(), 5);
    assert!(log.findings().iter().all(|f| f.line < 252));
}

#[test]
fn reports_wrong_site_name() {
    let (text, _) = decode(SITE_LOG);
    let log = SiteLogParser::new().site_name("BBB200USA").parse(&text);

    assert_eq!(log.name_matched(), Some(false));
    assert_eq!(log.site_name(), Some("AAA200USA"));
    assert!(!log.is_valid());

    let messages: Vec<&str> = log.findings().errors().map(|f| f.message.as_str()).collect();
    assert_eq!(messages, vec!["Expected site name: BBB200USA"]);
}

fn identified_as(declared: &str) -> String {
    format!(
        "1.   Site Identification of the GNSS Monument\n\n\
         \x20    Site Name                : Alpha\n\
         \x20    {declared}\n"
    )
}

#[test]
fn matches_declared_station_code() {
    let text = identified_as("Four Character ID        : AAAA");
    let log = SiteLogParser::new().site_name("AAAA00USA").parse(&text);

    assert_eq!(log.name_matched(), Some(true));
    assert_eq!(log.site_name(), Some("AAAA"));
    assert!(log.is_valid());
}

#[test]
fn matches_declared_nine_character_id() {
    let text = identified_as("Nine Character ID        : AAAA00USA");
    let log = SiteLogParser::new().site_name("aaaa").parse(&text);

    assert_eq!(log.name_matched(), Some(true));
    assert_eq!(log.site_name(), Some("AAAA00USA"));
    assert!(log.is_valid());
}

#[test]
fn reports_wrong_declared_station_code() {
    let text = identified_as("Four Character ID        : AAAA");

    let log = SiteLogParser::new().site_name("BBBB00USA").parse(&text);
    assert_eq!(log.name_matched(), Some(false));
    let messages: Vec<&str> = log.findings().errors().map(|f| f.message.as_str()).collect();
    assert_eq!(messages, vec!["Expected site name: BBBB00USA"]);

    let log = SiteLogParser::new().site_name("AAA").parse(&text);
    assert_eq!(log.name_matched(), Some(false));
}

#[test]
fn decodes_latin1_site_log() {
    let mut bytes = SITE_LOG.to_vec();
    let at = bytes
        .windows(7)
        .position(|w| w == b"Boulder")
        .unwrap();
    bytes[at + 1] = 0xf6;

    let (text, encoding) = decode(&bytes);
    assert_eq!(encoding, Encoding::Latin1);

    let log = SiteLogParser::new().parse(&text);
    let location = log.section(&id(2, None, None)).unwrap();
    assert_eq!(location.parameter("City or Town").unwrap().value(), "Böulder");
}
