// Dweve XMLDict - XML to Dictionary Conversion
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Structural parse events and the tokenizer seam.

use crate::error::{XmlError, XmlErrorKind};
use thiserror::Error;

/// One structural event from the underlying XML tokenizer.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlEvent {
    /// An opening tag, with attributes in document order.
    /// Self-closing elements are reported as a start immediately followed
    /// by the matching end.
    ElementStart {
        /// Qualified element name, kept verbatim.
        name: String,
        /// Attribute name/value pairs; names are unique within one element.
        attributes: Vec<(String, String)>,
    },
    /// A closing tag.
    ElementEnd {
        /// Qualified element name.
        name: String,
    },
    /// Unescaped character data inside the current element.
    Text(String),
    /// Raw CDATA payload; the tree builder decodes it.
    CData(Vec<u8>),
    /// End of the document, after the root element has closed.
    DocumentEnd,
}

/// A tokenizer failure, before the tree builder attributes it to a path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// Malformed XML syntax.
    #[error("XML parse error at position {position}: {message}")]
    Parse {
        /// Byte offset in the input where the error was detected.
        position: usize,
        /// Description of the failure.
        message: String,
    },
    /// Bytes that could not be decoded as UTF-8.
    #[error("encoding error at position {position}: {message}")]
    Encoding {
        /// Byte offset in the input where the error was detected.
        position: usize,
        /// Description of the failure.
        message: String,
    },
}

impl SourceError {
    /// Attach the element path current at the time of failure.
    pub fn into_xml_error(self, path: Vec<String>) -> XmlError {
        let (kind, message) = match self {
            Self::Parse { .. } => (XmlErrorKind::Parse, self.to_string()),
            Self::Encoding { .. } => (XmlErrorKind::Encoding, self.to_string()),
        };
        XmlError::new(kind, message, path)
    }
}

/// A pull-based source of structural XML events.
///
/// The tree builder drives any conformant tokenizer through this trait, one
/// event at a time, in document order: `ElementStart`/`ElementEnd` pairs
/// properly nested around a single root, `Text`/`CData` for content directly
/// inside the current element, and `DocumentEnd` once the root has closed.
/// Aborting a parse is cooperative: the driver stops pulling, so a source
/// never observes activity after an abort.
pub trait EventSource {
    /// The next structural event, or the failure that ends the parse.
    /// No further calls are made after an `Err`.
    fn next_event(&mut self) -> Result<XmlEvent, SourceError>;
}
