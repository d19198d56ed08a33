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

//! Read-only navigation over normalized trees.
//!
//! [`XmlNode`] is a validated borrowed view: only text and map nodes can
//! be navigated. Queries are pure and report failures as [`NodeError`],
//! separate from parse errors.

use crate::error::NodeError;
use crate::node::{attribute_key, Node, TEXT_KEY};
use std::collections::BTreeMap;

/// Borrowed view of a navigable node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum XmlNode<'a> {
    /// A scalar text value.
    Text(&'a str),
    /// An element with attributes and/or children.
    Map(&'a BTreeMap<String, Node>),
}

impl<'a> XmlNode<'a> {
    /// Validate a normalized node for navigation. `Null` and `List`
    /// nodes cannot be navigated directly; lists are reached through
    /// [`children`](Self::children) on their parent.
    pub fn new(node: &'a Node) -> Result<Self, NodeError> {
        match node {
            Node::Text(value) => Ok(XmlNode::Text(value)),
            Node::Map(entries) => Ok(XmlNode::Map(entries)),
            Node::Null => Err(NodeError::UnsupportedType("null".to_string())),
            Node::List(_) => Err(NodeError::UnsupportedType("list".to_string())),
        }
    }

    /// The text content of this node. A map without a `#text` entry
    /// reads as the empty string.
    pub fn text(&self) -> Result<&'a str, NodeError> {
        match self {
            XmlNode::Text(value) => Ok(value),
            XmlNode::Map(entries) => match entries.get(TEXT_KEY) {
                None => Ok(""),
                Some(Node::Text(value)) => Ok(value),
                Some(_) => Err(NodeError::UnsupportedType(
                    "non-text value under #text".to_string(),
                )),
            },
        }
    }

    /// Attribute lookup by bare name (without the `@` prefix).
    pub fn attribute(&self, name: &str) -> Result<Option<&'a str>, NodeError> {
        match self {
            XmlNode::Text(_) => Ok(None),
            XmlNode::Map(entries) => match entries.get(&attribute_key(name)) {
                None => Ok(None),
                Some(Node::Text(value)) => Ok(Some(value)),
                Some(_) => Err(NodeError::UnsupportedType(format!(
                    "non-text value under @{name}"
                ))),
            },
        }
    }

    /// All children stored under `name`, in document order. Absent names
    /// yield an empty vector; each entry is validated individually.
    pub fn children(&self, name: &str) -> Result<Vec<XmlNode<'a>>, NodeError> {
        let entries = match self {
            XmlNode::Text(_) => return Ok(Vec::new()),
            XmlNode::Map(entries) => entries,
        };
        match entries.get(name) {
            None => Ok(Vec::new()),
            Some(Node::List(nodes)) => nodes.iter().map(XmlNode::new).collect(),
            Some(node) => Ok(vec![XmlNode::new(node)?]),
        }
    }

    /// Exactly-one child lookup.
    pub fn child(&self, name: &str) -> Result<XmlNode<'a>, NodeError> {
        let mut children = self.children(name)?;
        match children.len() {
            0 => Err(NodeError::MissingChild(name.to_string())),
            1 => Ok(children.remove(0)),
            _ => Err(NodeError::MultipleChildren(name.to_string())),
        }
    }
}
