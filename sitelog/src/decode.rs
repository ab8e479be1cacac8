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

use std::borrow::Cow;

use log::debug;

/// The text encoding a site log was decoded with.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Encoding {
    Utf8,
    Ascii,
    Latin1,
}

impl Encoding {
    /// Encodings in the order they are tried.
    const FALLBACK: [Encoding; 3] = [Self::Utf8, Self::Ascii, Self::Latin1];

    fn decode(self, bytes: &[u8]) -> Option<Cow<'_, str>> {
        match self {
            Self::Utf8 => std::str::from_utf8(bytes).ok().map(Cow::Borrowed),
            Self::Ascii => bytes
                .is_ascii()
                .then(|| String::from_utf8_lossy(bytes)),
            // every byte maps to the code point of the same value
            Self::Latin1 => Some(Cow::Owned(latin1(bytes))),
        }
    }
}

/// Decodes raw site log bytes.
///
/// Files in the wild come in all kinds of encodings. UTF-8 is tried first,
/// then ASCII and finally Latin-1, which accepts any input. Decoding therefore
/// never fails.
///
/// ```
/// use sitelog::{decode, Encoding};
///
/// let (text, encoding) = decode(b"Site Name : M\xfcnchen");
/// assert_eq!(text, "Site Name : München");
/// assert_eq!(encoding, Encoding::Latin1);
/// ```
pub fn decode(bytes: &[u8]) -> (Cow<'_, str>, Encoding) {
    let (text, encoding) = Encoding::FALLBACK
        .into_iter()
        .find_map(|encoding| encoding.decode(bytes).map(|text| (text, encoding)))
        .unwrap_or_else(|| (Cow::Owned(latin1(bytes)), Encoding::Latin1));

    debug!("decoded {} bytes as {encoding:?}", bytes.len());
    (text, encoding)
}

fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}
