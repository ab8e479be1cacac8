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

use geodesyml::{GeodesyMlParser, GeodesyMlVersion, SharedValidator, Violation};
use sitelog::Level;

const SITE_LOG: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<geo:GeodesyML xmlns:geo="urn:xml-gov-au:icsm:egeodesy:0.5"
    xmlns:gml="http://www.opengis.net/gml/3.2"
    xmlns:iso19139="http://www.isotc211.org/2005/gmd"
    xmlns:gco="http://www.isotc211.org/2005/gco"
    gml:id="GeodesyML">
  <geo:siteLog gml:id="AAA200USA">
    <geo:formInformation>
      <geo:FormInformation gml:id="form">
        <geo:preparedBy>Jane Doe</geo:preparedBy>
        <geo:datePrepared>2022-09-09</geo:datePrepared>
        <geo:reportType>UPDATE</geo:reportType>
      </geo:FormInformation>
    </geo:formInformation>
  </geo:siteLog>
</geo:GeodesyML>
"#;

#[test]
fn reads_version_and_namespaces() {
    let parsed = GeodesyMlParser::new().parse(SITE_LOG);

    assert_eq!(parsed.version(), Some(GeodesyMlVersion::V0_5));
    assert!(parsed.log().is_valid());
    assert_eq!(parsed.log().site_name(), Some("AAA200USA"));
    assert_eq!(parsed.log().name_matched(), None);

    let ns = parsed.namespaces();
    assert_eq!(ns.get("geo"), Some("urn:xml-gov-au:icsm:egeodesy:0.5"));
    assert_eq!(ns.get("gml"), Some("http://www.opengis.net/gml/3.2"));
    assert_eq!(ns.get("gmd"), Some("http://www.isotc211.org/2005/gmd"));
    assert_eq!(ns.get("gco"), Some("http://www.isotc211.org/2005/gco"));

    let doc = parsed.document().unwrap();
    let prepared = doc.select(
        "/geo:GeodesyML/geo:siteLog/geo:formInformation/geo:FormInformation/geo:preparedBy",
        ns,
    );
    assert_eq!(prepared[0].text(), "Jane Doe");
    assert_eq!(prepared[0].line(), 9);
}

#[test]
fn site_name_is_compared_case_insensitively() {
    let parsed = GeodesyMlParser::new().site_name("aaa200usa").parse(SITE_LOG);
    assert_eq!(parsed.log().name_matched(), Some(true));
    assert!(parsed.log().findings().get(0).is_none());

    let parsed = GeodesyMlParser::new().site_name("BBB200USA").parse(SITE_LOG);
    assert_eq!(parsed.log().name_matched(), Some(false));

    let error = parsed.log().findings().get(0).unwrap();
    assert_eq!(error.level, Level::Error);
    assert_eq!(error.message, "Expected site name: BBB200USA");
}

#[test]
fn unsupported_schema_is_an_error() {
    let xml = SITE_LOG.replace("egeodesy:0.5", "egeodesy:0.9");
    let parsed = GeodesyMlParser::new().parse(&xml);

    assert_eq!(parsed.version(), None);
    assert!(parsed.document().is_some());

    let error = parsed.log().findings().get(1).unwrap();
    assert_eq!(error.level, Level::Error);
    assert_eq!(error.message, "Unsupported schema: urn:xml-gov-au:icsm:egeodesy:0.9");
}

#[test]
fn malformed_document_yields_one_error() {
    let xml = SITE_LOG.replace("</geo:reportType>", "</geo:report>");
    let parsed = GeodesyMlParser::new().site_name("AAA200USA").parse(&xml);

    assert!(parsed.document().is_none());
    assert_eq!(parsed.log().findings().len(), 1);
    assert_eq!(parsed.log().findings().errors().count(), 1);
    assert!(parsed.log().sections().is_empty());
}

#[test]
fn violations_become_errors() {
    let validator = SharedValidator::new(|version: GeodesyMlVersion, _: &str| {
        assert_eq!(version, GeodesyMlVersion::V0_5);
        vec![Violation::new(11, "Element 'geo:datePrepared': invalid date.")]
    });

    let parsed = GeodesyMlParser::new().validator(validator).parse(SITE_LOG);
    let error = parsed.log().findings().get(10).unwrap();

    assert_eq!(error.level, Level::Error);
    assert_eq!(error.message, "Element 'geo:datePrepared': invalid date.");
    assert!(!parsed.log().is_valid());
}
