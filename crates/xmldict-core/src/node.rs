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

//! Normalized node values produced by the tree builder.

use std::collections::BTreeMap;

/// Map key holding an element's merged text content.
pub const TEXT_KEY: &str = "#text";

/// Map key holding an element's CDATA payload.
pub const CDATA_KEY: &str = "#cdata";

/// Map key for an attribute name.
pub fn attribute_key(name: &str) -> String {
    format!("@{name}")
}

/// A normalized XML value.
///
/// Produced exactly once per element, when the element closes. Entry keys of
/// a [`Node::Map`] are child element names, `@attribute` names, [`TEXT_KEY`],
/// or [`CDATA_KEY`]; keys are unique.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// The canonical empty value: an element with no attributes, no
    /// children, and no text. Serializes to JSON `null`.
    Null,
    /// Scalar text: element content, an attribute value, or CDATA.
    Text(String),
    /// Element entries.
    Map(BTreeMap<String, Node>),
    /// Repeated same-name children in document order. Lists only ever
    /// appear as `Map` values, never nested directly.
    List(Vec<Node>),
}

impl Node {
    /// Returns true for the canonical empty value.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get the value as text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the value as a map of entries.
    pub fn as_map(&self) -> Option<&BTreeMap<String, Node>> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Try to get the value as an ordered list.
    pub fn as_list(&self) -> Option<&[Node]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Text(s) => serializer.serialize_str(s),
            Self::Map(entries) => serializer.collect_map(entries),
            Self::List(items) => serializer.collect_seq(items),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_key() {
        assert_eq!(attribute_key("id"), "@id");
        assert_eq!(attribute_key(""), "@");
    }

    #[test]
    fn test_is_null() {
        assert!(Node::Null.is_null());
        assert!(!Node::Text(String::new()).is_null());
    }

    #[test]
    fn test_as_text() {
        assert_eq!(Node::Text("hi".to_string()).as_text(), Some("hi"));
        assert_eq!(Node::Null.as_text(), None);
        assert_eq!(Node::List(vec![]).as_text(), None);
    }

    #[test]
    fn test_as_map() {
        let mut entries = BTreeMap::new();
        entries.insert("a".to_string(), Node::Null);
        let node = Node::Map(entries.clone());
        assert_eq!(node.as_map(), Some(&entries));
        assert_eq!(Node::Null.as_map(), None);
    }

    #[test]
    fn test_as_list() {
        let items = vec![Node::Text("1".to_string()), Node::Text("2".to_string())];
        let node = Node::List(items.clone());
        assert_eq!(node.as_list(), Some(items.as_slice()));
        assert_eq!(Node::Text("x".to_string()).as_list(), None);
    }

    #[test]
    fn test_equality() {
        assert_eq!(Node::Null, Node::Null);
        assert_ne!(Node::Null, Node::Text(String::new()));
        assert_eq!(
            Node::Text("a".to_string()),
            Node::Text("a".to_string())
        );
    }
}
