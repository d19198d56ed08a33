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

//! Normalized tree to JSON conversion.

use serde_json::{Map, Value as JsonValue};
use xmldict_core::Node;

/// Convert a normalized tree to a `serde_json::Value`.
///
/// Null becomes JSON null, text a string, maps objects, and lists arrays.
/// Map keys keep their `@`/`#` prefixes.
pub fn to_json_value(node: &Node) -> JsonValue {
    match node {
        Node::Null => JsonValue::Null,
        Node::Text(text) => JsonValue::String(text.clone()),
        Node::Map(entries) => {
            let mut map = Map::with_capacity(entries.len());
            for (key, child) in entries {
                map.insert(key.clone(), to_json_value(child));
            }
            JsonValue::Object(map)
        }
        Node::List(nodes) => JsonValue::Array(nodes.iter().map(to_json_value).collect()),
    }
}

/// Pretty-print a normalized tree as indented JSON. Forward slashes are
/// emitted unescaped.
pub fn to_json_pretty(node: &Node) -> serde_json::Result<String> {
    serde_json::to_string_pretty(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use xmldict_core::parse_str;

    #[test]
    fn test_empty_element_maps_to_null() {
        let doc = parse_str("<xml/>").unwrap();
        assert_eq!(to_json_value(&doc), json!({ "xml": null }));
    }

    #[test]
    fn test_full_shape() {
        let doc = parse_str(r#"<a k="v"><b>1</b><b>2</b><c>x</c></a>"#).unwrap();
        assert_eq!(
            to_json_value(&doc),
            json!({ "a": { "@k": "v", "b": ["1", "2"], "c": "x" } })
        );
    }

    #[test]
    fn test_cdata_key_survives() {
        let doc = parse_str("<a><![CDATA[1 < 2]]></a>").unwrap();
        assert_eq!(to_json_value(&doc), json!({ "a": { "#cdata": "1 < 2" } }));
    }

    #[test]
    fn test_pretty_agrees_with_value() {
        let doc = parse_str(r#"<a k="v"><b/><b>2</b></a>"#).unwrap();
        let pretty = to_json_pretty(&doc).unwrap();
        let reparsed: JsonValue = serde_json::from_str(&pretty).unwrap();
        assert_eq!(reparsed, to_json_value(&doc));
    }

    #[test]
    fn test_pretty_is_indented() {
        let doc = parse_str("<a><b>1</b></a>").unwrap();
        let pretty = to_json_pretty(&doc).unwrap();
        assert!(pretty.contains("\n  \"a\""));
    }

    #[test]
    fn test_slashes_not_escaped() {
        let doc = parse_str("<url>https://example.com/path</url>").unwrap();
        let pretty = to_json_pretty(&doc).unwrap();
        assert!(pretty.contains("https://example.com/path"));
    }
}
