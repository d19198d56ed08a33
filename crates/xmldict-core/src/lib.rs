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

//! Core conversion from XML to normalized dictionary trees.
//!
//! This crate turns XML documents into nested [`Node`] values: element
//! children under their names, attributes under `@name` keys, text under
//! `#text`, and CDATA under `#cdata`. Elements with a single text value
//! collapse to scalars, repeated same-name children become ordered lists,
//! and empty elements become [`Node::Null`]. Mixed content (text
//! interleaved with element children) is rejected as semi-structured.
//!
//! Parsing is driven through the [`EventSource`] seam; [`XmlReader`] is
//! the quick-xml backed production source. [`parse_with`] additionally
//! hands every completed subtree to an observer, which is what the
//! streaming layer builds on.
//!
//! ```
//! use xmldict_core::parse_str;
//!
//! let doc = parse_str("<greeting lang=\"en\">hello</greeting>").unwrap();
//! let map = doc.as_map().unwrap();
//! let greeting = map["greeting"].as_map().unwrap();
//! assert_eq!(greeting["@lang"].as_text(), Some("en"));
//! assert_eq!(greeting["#text"].as_text(), Some("hello"));
//! ```

mod builder;
mod error;
mod event;
mod navigate;
mod node;
mod reader;

pub use builder::{parse, parse_reader, parse_str, parse_with, Subtree};
pub use error::{NodeError, XmlError, XmlErrorKind, XmlResult};
pub use event::{EventSource, SourceError, XmlEvent};
pub use navigate::XmlNode;
pub use node::{attribute_key, Node, CDATA_KEY, TEXT_KEY};
pub use reader::XmlReader;
