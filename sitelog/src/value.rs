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

use chrono::{DateTime, FixedOffset, NaiveDate};

#[cfg(feature = "serde")]
use serde::Serialize;

/// A typed value bound to a field of a section.
#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Date(NaiveDate),
    DateTime(DateTime<FixedOffset>),
    Choice(Choice),
    Point(Point),
    /// Keys into a reference catalog, e.g. satellite systems.
    Keys(Vec<String>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            Self::Choice(c) => Some(c.value),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Str(v) => write!(f, "{v}"),
            Self::Date(v) => write!(f, "{}", v.format("%Y-%m-%d")),
            Self::DateTime(v) => write!(f, "{}", v.format("%Y-%m-%dT%H:%M%:z")),
            Self::Choice(v) => write!(f, "{}", v.label),
            Self::Point(v) => write!(f, "({}, {}, {})", v.x, v.y, v.z),
            Self::Keys(v) => write!(f, "{}", v.join("+")),
        }
    }
}

macro_rules! from_impl {
    ($t:ty, $variant:ident) => {
        impl From<$t> for Value {
            fn from(value: $t) -> Self {
                Self::$variant(value.into())
            }
        }

        impl From<Option<$t>> for Value {
            fn from(value: Option<$t>) -> Self {
                value.map_or(Self::Null, Value::from)
            }
        }
    };
}

from_impl!(bool, Bool);
from_impl!(i64, Int);
from_impl!(f64, Float);
from_impl!(String, Str);
from_impl!(&str, Str);
from_impl!(NaiveDate, Date);
from_impl!(DateTime<FixedOffset>, DateTime);
from_impl!(Choice, Choice);
from_impl!(Point, Point);

/// A member of a fixed enumeration.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Choice {
    /// The name of the enumeration.
    pub kind: &'static str,
    /// The stored value.
    pub value: &'static str,
    /// The symbolic name, e.g. `BPA`.
    pub name: &'static str,
    /// The human readable label.
    pub label: &'static str,
}

/// A three-dimensional point, either cartesian (x, y, z) or geodetic
/// (latitude, longitude, height).
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}
