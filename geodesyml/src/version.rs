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

use std::fmt;

/// A supported version of the GeodesyML schema.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum GeodesyMlVersion {
    V0_4,
    V0_5,
}

impl GeodesyMlVersion {
    pub const ALL: [GeodesyMlVersion; 2] = [Self::V0_4, Self::V0_5];

    pub fn label(&self) -> &'static str {
        match self {
            Self::V0_4 => "GeodesyML/0.4",
            Self::V0_5 => "GeodesyML/0.5",
        }
    }

    pub fn version(&self) -> &'static str {
        match self {
            Self::V0_4 => "0.4",
            Self::V0_5 => "0.5",
        }
    }

    /// The namespace of the `geo` prefix in documents of this version.
    pub fn xmlns(&self) -> &'static str {
        match self {
            Self::V0_4 => "urn:xml-gov-au:icsm:egeodesy:0.4",
            Self::V0_5 => "urn:xml-gov-au:icsm:egeodesy:0.5",
        }
    }

    /// Returns the version whose namespace equals `xmlns`, ignoring case.
    pub fn from_xmlns(xmlns: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|version| version.xmlns().eq_ignore_ascii_case(xmlns.trim()))
    }

    pub fn latest() -> Self {
        Self::V0_5
    }
}

impl fmt::Display for GeodesyMlVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_namespaces() {
        assert_eq!(
            GeodesyMlVersion::from_xmlns("urn:xml-gov-au:icsm:egeodesy:0.4"),
            Some(GeodesyMlVersion::V0_4)
        );
        assert_eq!(
            GeodesyMlVersion::from_xmlns("URN:XML-GOV-AU:ICSM:EGEODESY:0.5"),
            Some(GeodesyMlVersion::V0_5)
        );
        assert_eq!(GeodesyMlVersion::from_xmlns("urn:example:0.6"), None);
        assert_eq!(GeodesyMlVersion::latest().to_string(), "GeodesyML/0.5");
    }
}
