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

//! The fixed enumerations site log values are matched against.

use sitelog::Choice;

/// A fixed enumeration whose members have a stored value, a symbolic name
/// and a human readable label.
pub trait Choices: Copy + Sized + 'static {
    /// The name of the enumeration.
    const KIND: &'static str;
    /// Every member in declaration order.
    const ALL: &'static [Self];

    fn value(&self) -> &'static str;
    fn name(&self) -> &'static str;
    fn label(&self) -> &'static str;

    /// Returns `true` if `candidate` is the exact value, or the name or
    /// label compared case-insensitively.
    fn matches(&self, candidate: &str) -> bool {
        candidate == self.value()
            || candidate.eq_ignore_ascii_case(self.name())
            || candidate.eq_ignore_ascii_case(self.label())
    }

    fn find(candidate: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|member| member.matches(candidate))
    }

    fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(Self::label).collect()
    }

    fn choice(&self) -> Choice {
        Choice {
            kind: Self::KIND,
            value: self.value(),
            name: self.name(),
            label: self.label(),
        }
    }
}

macro_rules! choices {
    (
        $(#[$meta:meta])*
        $vis:vis enum $ty:ident {
            $($variant:ident = ($value:literal, $name:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
        $vis enum $ty {
            $($variant),+
        }

        impl Choices for $ty {
            const KIND: &'static str = stringify!($ty);
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn value(&self) -> &'static str {
                match self {
                    $(Self::$variant => $value),+
                }
            }

            fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name),+
                }
            }

            fn label(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }

        impl From<$ty> for Choice {
            fn from(value: $ty) -> Self {
                value.choice()
            }
        }
    };
}

choices! {
    /// Spacing of fractures in the bedrock below a monument.
    pub enum FractureSpacing {
        Zero = ("0", "ZERO", "0 cm"),
        LessThan10Cm = ("1", "LESS_THAN_10_CM", "1-10 cm"),
        From11To50Cm = ("11", "MORE_THAN_11_LESS_THAN_50_CM", "11-50 cm"),
        From51To200Cm = ("51", "MORE_THAN_51_LESS_THAN_200_CM", "51-200 cm"),
        Over200Cm = ("200", "OVER_200_CM", "over 200 cm"),
    }
}

choices! {
    pub enum TectonicPlate {
        African = ("AF", "AFRICAN", "African"),
        Antarctic = ("AN", "ANTARCTIC", "Antarctic"),
        Arabian = ("AR", "ARABIAN", "Arabian"),
        Australian = ("AU", "AUSTRALIAN", "Australian"),
        Caribbean = ("CA", "CARIBBEAN", "Caribbean"),
        Cocos = ("CO", "COCOS", "Cocos"),
        Eurasian = ("EU", "EURASIAN", "Eurasian"),
        Indian = ("IN", "INDIAN", "Indian"),
        JuanDeFuca = ("JU", "JUAN_DE_FUCA", "Juan de Fuca"),
        Nazca = ("NZ", "NAZCA", "Nazca"),
        NorthAmerican = ("NA", "NORTH_AMERICAN", "North American"),
        Pacific = ("PA", "PACIFIC", "Pacific"),
        Philippine = ("PH", "PHILIPPINE", "Philippine"),
        Scotia = ("SC", "SCOTIA", "Scotia"),
        SouthAmerican = ("SA", "SOUTH_AMERICAN", "South American"),
        Nubia = ("NU", "NUBIA", "Nubia"),
        Somalia = ("SO", "SOMALIA", "Somalia"),
        Mariana = ("MA", "MARIANA", "Mariana"),
    }
}

choices! {
    /// The physical point on an antenna its offsets are measured to.
    pub enum AntennaReferencePoint {
        Bam = ("1", "BAM", "BAM (Bottom of Antenna Mount)"),
        Bcr = ("2", "BCR", "BCR (Bottom of Chokering)"),
        Bdg = ("3", "BDG", "BDG (Bottom of Dome Ground Plane)"),
        Bgp = ("4", "BGP", "BGP (Bottom of Ground Plane)"),
        Bpa = ("5", "BPA", "BPA (Bottom of Preamplifier)"),
        Tcr = ("6", "TCR", "TCR (Top of Chokering)"),
        Tdg = ("7", "TDG", "TDG (Top of Dome Ground Plane)"),
        Tgp = ("8", "TGP", "TGP (Top of Ground Plane)"),
        Top = ("9", "TOP", "TOP (Top of Pole)"),
        Tpa = ("10", "TPA", "TPA (Top of Preamplifier)"),
    }
}

choices! {
    /// Aspiration of a meteorological sensor.
    pub enum Aspiration {
        Unaspirated = ("U", "UNASPIRATED", "UNASPIRATED"),
        Natural = ("N", "NATURAL", "NATURAL"),
        Fan = ("F", "FAN", "FAN"),
    }
}

choices! {
    /// Status of an instrument collocated with the station.
    pub enum CollocationStatus {
        Permanent = ("P", "PERMANENT", "PERMANENT"),
        Mobile = ("M", "MOBILE", "MOBILE"),
    }
}

choices! {
    pub enum FrequencyStandardType {
        Internal = ("I", "INTERNAL", "INTERNAL"),
        HydrogenMaser = ("H", "EXTERNAL_H_MASER", "EXTERNAL H-MASER"),
        Cesium = ("C", "EXTERNAL_CESIUM", "EXTERNAL CESIUM"),
        Rubidium = ("R", "EXTERNAL_RUBIDIUM", "EXTERNAL RUBIDIUM"),
        Quartz = ("Q", "EXTERNAL_QUARTZ", "EXTERNAL QUARTZ"),
    }
}

/// The enumeration a converter matches against.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum ChoiceKind {
    FractureSpacing,
    TectonicPlate,
    AntennaReferencePoint,
    Aspiration,
    CollocationStatus,
    FrequencyStandardType,
}

impl ChoiceKind {
    pub fn find(&self, candidate: &str) -> Option<Choice> {
        match self {
            Self::FractureSpacing => FractureSpacing::find(candidate).map(Choice::from),
            Self::TectonicPlate => TectonicPlate::find(candidate).map(Choice::from),
            Self::AntennaReferencePoint => AntennaReferencePoint::find(candidate).map(Choice::from),
            Self::Aspiration => Aspiration::find(candidate).map(Choice::from),
            Self::CollocationStatus => CollocationStatus::find(candidate).map(Choice::from),
            Self::FrequencyStandardType => FrequencyStandardType::find(candidate).map(Choice::from),
        }
    }

    pub fn labels(&self) -> Vec<&'static str> {
        match self {
            Self::FractureSpacing => FractureSpacing::labels(),
            Self::TectonicPlate => TectonicPlate::labels(),
            Self::AntennaReferencePoint => AntennaReferencePoint::labels(),
            Self::Aspiration => Aspiration::labels(),
            Self::CollocationStatus => CollocationStatus::labels(),
            Self::FrequencyStandardType => FrequencyStandardType::labels(),
        }
    }
}
