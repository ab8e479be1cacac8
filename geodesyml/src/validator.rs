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
use std::sync::{Arc, Mutex, PoisonError};

use crate::version::GeodesyMlVersion;

/// A violation of the schema reported by a validator.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Violation {
    /// The 1-based line of the violation.
    pub line: usize,
    pub message: String,
}

impl Violation {
    pub fn new<S: Into<String>>(line: usize, message: S) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// Validates a document against the schema of a GeodesyML version.
///
/// Implementations wrap an external schema engine. They are not required to
/// be reentrant, the parser only reaches them through a [`SharedValidator`].
pub trait SchemaValidator {
    fn validate(&mut self, version: GeodesyMlVersion, document: &str) -> Vec<Violation>;
}

impl<F> SchemaValidator for F
where
    F: FnMut(GeodesyMlVersion, &str) -> Vec<Violation>,
{
    fn validate(&mut self, version: GeodesyMlVersion, document: &str) -> Vec<Violation> {
        self(version, document)
    }
}

/// A schema validator shared between parsers.
///
/// Calls are serialized by a mutex, so one validator can serve parsers on
/// many threads.
#[derive(Clone)]
pub struct SharedValidator(Arc<Mutex<Box<dyn SchemaValidator + Send>>>);

impl SharedValidator {
    pub fn new<V: SchemaValidator + Send + 'static>(validator: V) -> Self {
        Self(Arc::new(Mutex::new(Box::new(validator))))
    }

    pub fn validate(&self, version: GeodesyMlVersion, document: &str) -> Vec<Violation> {
        let mut validator = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        validator.validate(version, document)
    }
}

impl fmt::Debug for SharedValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedValidator").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn serializes_calls() {
        let mut calls = 0;
        let validator = SharedValidator::new(move |_: GeodesyMlVersion, _: &str| {
            calls += 1;
            vec![Violation::new(calls, "checked")]
        });

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let validator = validator.clone();
                thread::spawn(move || validator.validate(GeodesyMlVersion::V0_5, "<a/>"))
            })
            .collect();

        let mut lines: Vec<usize> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .map(|v| v.line)
            .collect();
        lines.sort();
        assert_eq!(lines, vec![1, 2, 3, 4]);
    }
}
