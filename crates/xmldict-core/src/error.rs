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

//! Error types for XML conversion and node navigation.

use std::fmt;
use thiserror::Error;

/// The kind of fatal error that ends a parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XmlErrorKind {
    /// Malformed XML syntax reported by the underlying tokenizer.
    Parse,
    /// Text or CDATA content mixed with element children, or more than one
    /// CDATA block in a single element.
    SemiStructured,
    /// Bytes that could not be decoded as UTF-8 text.
    Encoding,
}

impl fmt::Display for XmlErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse => write!(f, "ParseError"),
            Self::SemiStructured => write!(f, "SemiStructuredXmlError"),
            Self::Encoding => write!(f, "EncodingError"),
        }
    }
}

/// A fatal conversion error, attributed to the element being processed
/// when it occurred.
///
/// Equality compares kind and path only; the message is advisory. A parse
/// yields either a fully normalized tree or exactly one `XmlError`, never
/// both.
#[derive(Debug, Clone, Error)]
#[error("{kind} at /{}: {message}", .path.join("/"))]
pub struct XmlError {
    /// The kind of error.
    pub kind: XmlErrorKind,
    /// Human-readable description.
    pub message: String,
    /// Element names from the document root to the failing element.
    /// Empty for failures outside any element.
    pub path: Vec<String>,
}

impl XmlError {
    /// Create a new error.
    pub fn new(kind: XmlErrorKind, message: impl Into<String>, path: Vec<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            path,
        }
    }

    /// Malformed XML reported by the tokenizer.
    pub fn parse(message: impl Into<String>, path: Vec<String>) -> Self {
        Self::new(XmlErrorKind::Parse, message, path)
    }

    /// Semi-structured content rejected by the normalizer.
    pub fn semi_structured(message: impl Into<String>, path: Vec<String>) -> Self {
        Self::new(XmlErrorKind::SemiStructured, message, path)
    }

    /// Undecodable bytes in text or CDATA content.
    pub fn encoding(message: impl Into<String>, path: Vec<String>) -> Self {
        Self::new(XmlErrorKind::Encoding, message, path)
    }

    /// Coarse identity comparison on kind alone, ignoring the path.
    pub fn same_kind(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl PartialEq for XmlError {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.path == other.path
    }
}

impl Eq for XmlError {}

/// Result alias for conversion operations.
pub type XmlResult<T> = Result<T, XmlError>;

/// Navigation-time errors, local to the failing query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeError {
    /// No child stored under the requested name.
    #[error("missing child: {0}")]
    MissingChild(String),
    /// More than one child stored under the requested name.
    #[error("multiple children: {0}")]
    MultipleChildren(String),
    /// The stored value cannot be viewed as text or a map.
    #[error("unsupported node type: {0}")]
    UnsupportedType(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = XmlError::semi_structured(
            "text content mixed with element children",
            vec!["a".to_string(), "b".to_string()],
        );
        assert_eq!(
            err.to_string(),
            "SemiStructuredXmlError at /a/b: text content mixed with element children"
        );
    }

    #[test]
    fn test_display_empty_path() {
        let err = XmlError::parse("no root element", Vec::new());
        assert_eq!(err.to_string(), "ParseError at /: no root element");
    }

    #[test]
    fn test_equality_ignores_message() {
        let a = XmlError::parse("one message", vec!["a".to_string()]);
        let b = XmlError::parse("another message", vec!["a".to_string()]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_equality_compares_path() {
        let a = XmlError::parse("m", vec!["a".to_string()]);
        let b = XmlError::parse("m", vec!["b".to_string()]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_equality_compares_kind() {
        let a = XmlError::parse("m", vec!["a".to_string()]);
        let b = XmlError::encoding("m", vec!["a".to_string()]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_same_kind() {
        let a = XmlError::semi_structured("m", vec!["a".to_string()]);
        let b = XmlError::semi_structured("n", vec!["x".to_string(), "y".to_string()]);
        assert!(a.same_kind(&b));
        assert!(!a.same_kind(&XmlError::parse("m", Vec::new())));
    }

    #[test]
    fn test_node_error_display() {
        assert_eq!(
            NodeError::MissingChild("user".to_string()).to_string(),
            "missing child: user"
        );
        assert_eq!(
            NodeError::MultipleChildren("item".to_string()).to_string(),
            "multiple children: item"
        );
        assert_eq!(
            NodeError::UnsupportedType("list".to_string()).to_string(),
            "unsupported node type: list"
        );
    }

    #[test]
    fn test_error_trait() {
        let err = XmlError::parse("test", Vec::new());
        let _: &dyn std::error::Error = &err;
        let err = NodeError::MissingChild("x".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
