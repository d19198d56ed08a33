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

//! Tree builder and normalizer.
//!
//! Events from an [`EventSource`] accumulate into a stack of raw frames,
//! one per open element. Closing an element consumes its frame and
//! normalizes it into a [`Node`], which is appended into the parent
//! frame. Normalization is where mixed content and doubled CDATA are
//! rejected, with the error attributed to the element being closed.

use crate::error::{XmlError, XmlResult};
use crate::event::{EventSource, XmlEvent};
use crate::node::{attribute_key, Node, CDATA_KEY, TEXT_KEY};
use crate::reader::XmlReader;
use std::collections::BTreeMap;
use std::io::BufRead;
use std::ops::ControlFlow;

/// Accumulates values appended under one key, in document order.
///
/// The first value stays scalar; a second arrival promotes the entry to a
/// list. `Empty` only exists as the insertion default and is never left
/// stored in a frame.
#[derive(Debug, Clone, Default)]
enum Bucket {
    #[default]
    Empty,
    One(Node),
    Many(Vec<Node>),
}

impl Bucket {
    fn push(&mut self, node: Node) {
        *self = match std::mem::take(self) {
            Bucket::Empty => Bucket::One(node),
            Bucket::One(first) => Bucket::Many(vec![first, node]),
            Bucket::Many(mut nodes) => {
                nodes.push(node);
                Bucket::Many(nodes)
            }
        };
    }

    fn last(&self) -> Option<&Node> {
        match self {
            Bucket::Empty => None,
            Bucket::One(node) => Some(node),
            Bucket::Many(nodes) => nodes.last(),
        }
    }

    fn into_vec(self) -> Vec<Node> {
        match self {
            Bucket::Empty => Vec::new(),
            Bucket::One(node) => vec![node],
            Bucket::Many(nodes) => nodes,
        }
    }

    fn into_node(self) -> Node {
        match self {
            Bucket::Empty => Node::Null,
            Bucket::One(node) => node,
            Bucket::Many(mut nodes) => {
                if nodes.len() == 1 {
                    // Safe: length checked above.
                    nodes.pop().expect("bucket holds one node")
                } else {
                    Node::List(nodes)
                }
            }
        }
    }
}

/// Raw, un-normalized state of one open element.
#[derive(Debug)]
struct Frame {
    name: String,
    entries: BTreeMap<String, Bucket>,
}

impl Frame {
    /// Synthetic frame below the root element. Its single entry ends up
    /// being the root element itself.
    fn document() -> Self {
        Frame {
            name: String::new(),
            entries: BTreeMap::new(),
        }
    }

    /// Frame for an opening element, pre-populated with its attributes.
    /// The frame carries its own element name; it is never recovered by
    /// searching the parent.
    fn element(name: String, attributes: Vec<(String, String)>) -> Self {
        let mut entries = BTreeMap::new();
        for (key, value) in attributes {
            entries.insert(attribute_key(&key), Bucket::One(Node::Text(value)));
        }
        Frame { name, entries }
    }

    fn append(&mut self, key: String, node: Node) {
        self.entries.entry(key).or_default().push(node);
    }
}

/// Normalize a raw frame into its final node. Consumes the frame, so an
/// element can only ever be normalized once.
///
/// `path` names the element being closed and is attached to any error.
fn normalize(frame: Frame, path: &[String]) -> XmlResult<Node> {
    let mut entries = frame.entries;

    let mut text = None;
    if let Some(bucket) = entries.remove(TEXT_KEY) {
        let mut merged = String::new();
        for node in bucket.into_vec() {
            if let Node::Text(fragment) = node {
                if fragment.trim().is_empty() {
                    continue;
                }
                merged.push_str(&fragment);
            }
        }
        if !merged.is_empty() {
            text = Some(merged);
        }
    }

    let mut cdata = None;
    if let Some(bucket) = entries.remove(CDATA_KEY) {
        let mut blocks = bucket.into_vec();
        if blocks.len() > 1 {
            return Err(XmlError::semi_structured(
                "multiple CDATA blocks in one element",
                path.to_vec(),
            ));
        }
        if let Some(Node::Text(block)) = blocks.pop() {
            cdata = Some(block);
        }
    }

    let has_element_children = entries.keys().any(|key| !key.starts_with('@'));
    if (text.is_some() || cdata.is_some()) && has_element_children {
        return Err(XmlError::semi_structured(
            "character data mixed with element children",
            path.to_vec(),
        ));
    }

    let mut map: BTreeMap<String, Node> = entries
        .into_iter()
        .map(|(key, bucket)| (key, bucket.into_node()))
        .collect();
    if let Some(block) = cdata {
        map.insert(CDATA_KEY.to_string(), Node::Text(block));
    }
    if let Some(merged) = text {
        map.insert(TEXT_KEY.to_string(), Node::Text(merged));
    }

    if map.is_empty() {
        return Ok(Node::Null);
    }
    if map.len() == 1 {
        if let Some(Node::Text(only)) = map.remove(TEXT_KEY) {
            return Ok(Node::Text(only));
        }
    }
    Ok(Node::Map(map))
}

/// Stack-driven builder, one instance per parse. Single-threaded and
/// single-use; [`finish`](TreeBuilder::finish) consumes it.
#[derive(Debug)]
struct TreeBuilder {
    stack: Vec<Frame>,
    path: Vec<String>,
}

impl TreeBuilder {
    fn new() -> Self {
        TreeBuilder {
            stack: vec![Frame::document()],
            path: Vec::new(),
        }
    }

    /// Element-name path from the root down to the innermost open element.
    fn path(&self) -> Vec<String> {
        self.path.clone()
    }

    fn start_element(&mut self, name: String, attributes: Vec<(String, String)>) {
        self.path.push(name.clone());
        self.stack.push(Frame::element(name, attributes));
    }

    fn text(&mut self, fragment: String) {
        if let Some(frame) = self.stack.last_mut() {
            frame.append(TEXT_KEY.to_string(), Node::Text(fragment));
        }
    }

    fn cdata(&mut self, bytes: Vec<u8>) -> XmlResult<()> {
        let block = String::from_utf8(bytes)
            .map_err(|err| XmlError::encoding(err.to_string(), self.path.clone()))?;
        if let Some(frame) = self.stack.last_mut() {
            frame.append(CDATA_KEY.to_string(), Node::Text(block));
        }
        Ok(())
    }

    /// Close the innermost element: normalize its frame and append the
    /// result into the parent. Returns a view of the completed subtree.
    fn end_element(&mut self, name: &str) -> XmlResult<Subtree<'_>> {
        if self.stack.len() < 2 {
            return Err(XmlError::parse(
                format!("closing tag </{name}> without matching element"),
                self.path.clone(),
            ));
        }
        // Safe: length checked above.
        let frame = self.stack.pop().expect("open element frame");
        if frame.name != name {
            return Err(XmlError::parse(
                format!("closing tag </{name}> does not match <{}>", frame.name),
                self.path.clone(),
            ));
        }
        let node = normalize(frame, &self.path)?;
        let path = self.path.clone();
        self.path.pop();
        // Safe: the synthetic document frame is always below us.
        let parent = self.stack.last_mut().expect("parent frame");
        parent.append(name.to_string(), node);
        Ok(Subtree {
            path,
            builder: self,
        })
    }

    /// Finish the document: the remaining frame must be the synthetic
    /// document frame holding exactly the root element.
    fn finish(mut self) -> XmlResult<Node> {
        if self.stack.len() != 1 {
            return Err(XmlError::parse(
                "document ended with unclosed elements",
                self.path,
            ));
        }
        // Safe: length checked above.
        let document = self.stack.pop().expect("document frame");
        match normalize(document, &[])? {
            node @ Node::Map(_) => Ok(node),
            _ => Err(XmlError::parse("document carries no root element", Vec::new())),
        }
    }

    /// Best-effort snapshot of the whole document, open elements included.
    /// Open frames render leniently: no mixed-content or CDATA checks.
    fn snapshot(&self) -> Node {
        let mut inner: Option<(String, Node)> = None;
        for frame in self.stack.iter().rev() {
            let mut map = render_lenient(frame);
            if let Some((name, node)) = inner.take() {
                append_rendered(&mut map, name, node);
            }
            inner = Some((frame.name.clone(), Node::Map(map)));
        }
        match inner {
            Some((_, node)) => node,
            None => Node::Null,
        }
    }
}

/// Render one raw frame without normalization errors: whitespace-only
/// text fragments drop, everything else keeps its bucket shape.
fn render_lenient(frame: &Frame) -> BTreeMap<String, Node> {
    let mut map = BTreeMap::new();
    for (key, bucket) in &frame.entries {
        if key == TEXT_KEY {
            let mut merged = String::new();
            for node in bucket.clone().into_vec() {
                if let Node::Text(fragment) = node {
                    if fragment.trim().is_empty() {
                        continue;
                    }
                    merged.push_str(&fragment);
                }
            }
            if !merged.is_empty() {
                map.insert(key.clone(), Node::Text(merged));
            }
            continue;
        }
        map.insert(key.clone(), bucket.clone().into_node());
    }
    map
}

/// Append an in-progress child into a rendered parent map, promoting to a
/// list next to already-completed same-name siblings.
fn append_rendered(map: &mut BTreeMap<String, Node>, name: String, node: Node) {
    match map.remove(&name) {
        None => {
            map.insert(name, node);
        }
        Some(Node::List(mut siblings)) => {
            siblings.push(node);
            map.insert(name, Node::List(siblings));
        }
        Some(existing) => {
            map.insert(name, Node::List(vec![existing, node]));
        }
    }
}

/// A completed element handed to the [`parse_with`] observer.
#[derive(Debug)]
pub struct Subtree<'a> {
    path: Vec<String>,
    builder: &'a TreeBuilder,
}

impl Subtree<'_> {
    /// Element-name path from the root to this element, inclusive.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// The normalized node for this element.
    pub fn node(&self) -> &Node {
        // Safe: the subtree is handed out right after its node was
        // appended into the enclosing frame.
        let name = self.path.last().expect("closed element name");
        let parent = self.builder.stack.last().expect("enclosing frame");
        parent
            .entries
            .get(name)
            .and_then(Bucket::last)
            .expect("just-closed node")
    }

    /// Lenient snapshot of the whole document as built so far.
    pub fn document(&self) -> Node {
        self.builder.snapshot()
    }
}

/// Parse a whole document from any event source.
pub fn parse<S: EventSource>(source: S) -> XmlResult<Node> {
    let root = parse_with(source, |_| ControlFlow::Continue(()))?;
    // Safe: the observer never breaks.
    Ok(root.expect("uncancelled parse yields a document"))
}

/// Parse an in-memory document.
pub fn parse_str(xml: &str) -> XmlResult<Node> {
    parse(XmlReader::from_str(xml))
}

/// Parse from a buffered reader.
pub fn parse_reader<R: BufRead>(reader: R) -> XmlResult<Node> {
    parse(XmlReader::from_reader(reader))
}

/// Parse a document, handing every completed element to `observer` in
/// post-order. The observer may return [`ControlFlow::Break`] to abort:
/// no further events are pulled from the source and `Ok(None)` is
/// returned. A completed parse returns `Ok(Some(document))`.
pub fn parse_with<S, F>(mut source: S, mut observer: F) -> XmlResult<Option<Node>>
where
    S: EventSource,
    F: FnMut(Subtree<'_>) -> ControlFlow<()>,
{
    let mut builder = TreeBuilder::new();
    loop {
        let event = source
            .next_event()
            .map_err(|err| err.into_xml_error(builder.path()))?;
        match event {
            XmlEvent::ElementStart { name, attributes } => {
                builder.start_element(name, attributes);
            }
            XmlEvent::Text(fragment) => builder.text(fragment),
            XmlEvent::CData(bytes) => builder.cdata(bytes)?,
            XmlEvent::ElementEnd { name } => {
                let subtree = builder.end_element(&name)?;
                if observer(subtree).is_break() {
                    return Ok(None);
                }
            }
            XmlEvent::DocumentEnd => return builder.finish().map(Some),
        }
    }
}
