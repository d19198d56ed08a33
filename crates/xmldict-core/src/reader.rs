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

//! quick-xml backed event source.

use crate::event::{EventSource, SourceError, XmlEvent};
use quick_xml::escape::unescape;
use quick_xml::events::BytesStart;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::BufRead;

/// Production [`EventSource`] over a [`quick_xml::Reader`].
///
/// Skips declarations, comments, processing instructions, and DOCTYPE;
/// reports self-closing elements as a start/end pair. Enforces the parts of
/// the event-source contract that quick-xml leaves to the caller: exactly
/// one root element, balanced tags at end of input, and no character data
/// outside the root.
pub struct XmlReader<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    /// Queued end event for a self-closing element.
    pending: Option<XmlEvent>,
    depth: usize,
    root_closed: bool,
}

impl<'a> XmlReader<&'a [u8]> {
    /// Event source over an in-memory document.
    pub fn from_str(xml: &'a str) -> Self {
        Self::from_reader(xml.as_bytes())
    }
}

impl<R: BufRead> XmlReader<R> {
    /// Event source over any buffered reader.
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader: Reader::from_reader(reader),
            buf: Vec::with_capacity(8192),
            pending: None,
            depth: 0,
            root_closed: false,
        }
    }
}

impl<R: BufRead> EventSource for XmlReader<R> {
    fn next_event(&mut self) -> Result<XmlEvent, SourceError> {
        if let Some(event) = self.pending.take() {
            return Ok(event);
        }

        loop {
            self.buf.clear();
            let result = self.reader.read_event_into(&mut self.buf);
            let position = self.reader.buffer_position();

            match result {
                Ok(Event::Start(e)) => {
                    if self.root_closed {
                        return Err(parse_err(position, "content after the root element"));
                    }
                    let event = start_event(&e, position)?;
                    self.depth += 1;
                    return Ok(event);
                }
                Ok(Event::Empty(e)) => {
                    if self.root_closed {
                        return Err(parse_err(position, "content after the root element"));
                    }
                    let event = start_event(&e, position)?;
                    let name = decode_name(e.name().as_ref(), position)?.to_string();
                    if self.depth == 0 {
                        self.root_closed = true;
                    }
                    self.pending = Some(XmlEvent::ElementEnd { name });
                    return Ok(event);
                }
                Ok(Event::End(e)) => {
                    if self.depth == 0 {
                        return Err(parse_err(position, "closing tag without matching element"));
                    }
                    let name = decode_name(e.name().as_ref(), position)?.to_string();
                    self.depth -= 1;
                    if self.depth == 0 {
                        self.root_closed = true;
                    }
                    return Ok(XmlEvent::ElementEnd { name });
                }
                Ok(Event::Text(e)) => {
                    let raw = std::str::from_utf8(&e)
                        .map_err(|err| encoding_err(position, err.to_string()))?;
                    if self.depth == 0 {
                        if raw.trim().is_empty() {
                            continue;
                        }
                        return Err(parse_err(position, "character data outside the root element"));
                    }
                    let text = unescape(raw)
                        .map_err(|err| parse_err(position, err.to_string()))?
                        .into_owned();
                    return Ok(XmlEvent::Text(text));
                }
                Ok(Event::CData(e)) => {
                    if self.depth == 0 {
                        return Err(parse_err(position, "CDATA outside the root element"));
                    }
                    return Ok(XmlEvent::CData(e.into_inner().into_owned()));
                }
                Ok(Event::Decl(_)) | Ok(Event::Comment(_)) | Ok(Event::PI(_))
                | Ok(Event::DocType(_)) => continue,
                Ok(Event::Eof) => {
                    if self.depth > 0 {
                        return Err(parse_err(position, "unexpected end of document"));
                    }
                    if !self.root_closed {
                        return Err(parse_err(position, "no root element"));
                    }
                    return Ok(XmlEvent::DocumentEnd);
                }
                Err(err) => return Err(parse_err(position, err.to_string())),
            }
        }
    }
}

fn parse_err(position: usize, message: impl Into<String>) -> SourceError {
    SourceError::Parse {
        position,
        message: message.into(),
    }
}

fn encoding_err(position: usize, message: impl Into<String>) -> SourceError {
    SourceError::Encoding {
        position,
        message: message.into(),
    }
}

/// Decode an element or attribute name, kept verbatim (no namespace split).
fn decode_name(bytes: &[u8], position: usize) -> Result<&str, SourceError> {
    std::str::from_utf8(bytes).map_err(|err| encoding_err(position, err.to_string()))
}

fn start_event(e: &BytesStart<'_>, position: usize) -> Result<XmlEvent, SourceError> {
    let name = decode_name(e.name().as_ref(), position)?.to_string();

    let mut attributes = Vec::new();
    for attr in e.attributes() {
        // Attribute checks include duplicate-name detection.
        let attr = attr.map_err(|err| parse_err(position, err.to_string()))?;
        let key = decode_name(attr.key.as_ref(), position)?.to_string();
        let raw = std::str::from_utf8(&attr.value)
            .map_err(|err| encoding_err(position, err.to_string()))?;
        let value = unescape(raw)
            .map_err(|err| parse_err(position, err.to_string()))?
            .into_owned();
        attributes.push((key, value));
    }

    Ok(XmlEvent::ElementStart { name, attributes })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect_events(xml: &str) -> Result<Vec<XmlEvent>, SourceError> {
        let mut source = XmlReader::from_str(xml);
        let mut events = Vec::new();
        loop {
            match source.next_event()? {
                XmlEvent::DocumentEnd => {
                    events.push(XmlEvent::DocumentEnd);
                    return Ok(events);
                }
                event => events.push(event),
            }
        }
    }

    #[test]
    fn test_start_end_pair() {
        let events = collect_events("<a></a>").unwrap();
        assert_eq!(
            events,
            vec![
                XmlEvent::ElementStart {
                    name: "a".to_string(),
                    attributes: Vec::new(),
                },
                XmlEvent::ElementEnd {
                    name: "a".to_string(),
                },
                XmlEvent::DocumentEnd,
            ]
        );
    }

    #[test]
    fn test_self_closing_reported_as_pair() {
        let events = collect_events("<a/>").unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(
            events[1],
            XmlEvent::ElementEnd {
                name: "a".to_string()
            }
        );
    }

    #[test]
    fn test_attributes_in_document_order() {
        let events = collect_events(r#"<a z="1" b="2"/>"#).unwrap();
        match &events[0] {
            XmlEvent::ElementStart { attributes, .. } => {
                assert_eq!(
                    attributes,
                    &vec![
                        ("z".to_string(), "1".to_string()),
                        ("b".to_string(), "2".to_string()),
                    ]
                );
            }
            other => panic!("expected element start, got {:?}", other),
        }
    }

    #[test]
    fn test_attribute_values_unescaped() {
        let events = collect_events(r#"<a k="&lt;v&gt;"/>"#).unwrap();
        match &events[0] {
            XmlEvent::ElementStart { attributes, .. } => {
                assert_eq!(attributes[0].1, "<v>");
            }
            other => panic!("expected element start, got {:?}", other),
        }
    }

    #[test]
    fn test_text_unescaped() {
        let events = collect_events("<a>&amp;cetera</a>").unwrap();
        assert_eq!(events[1], XmlEvent::Text("&cetera".to_string()));
    }

    #[test]
    fn test_cdata_bytes_passed_through() {
        let events = collect_events("<a><![CDATA[1 < 2]]></a>").unwrap();
        assert_eq!(events[1], XmlEvent::CData(b"1 < 2".to_vec()));
    }

    #[test]
    fn test_prolog_and_comments_skipped() {
        let events =
            collect_events("<?xml version=\"1.0\"?><!-- note --><a/>").unwrap();
        assert!(matches!(events[0], XmlEvent::ElementStart { .. }));
    }

    #[test]
    fn test_duplicate_attribute_rejected() {
        let err = collect_events(r#"<a k="1" k="2"/>"#).unwrap_err();
        assert!(matches!(err, SourceError::Parse { .. }));
    }

    #[test]
    fn test_mismatched_close_rejected() {
        let err = collect_events("<a><b></a>").unwrap_err();
        assert!(matches!(err, SourceError::Parse { .. }));
    }

    #[test]
    fn test_unclosed_root_rejected() {
        let err = collect_events("<a>").unwrap_err();
        assert!(matches!(err, SourceError::Parse { .. }));
    }

    #[test]
    fn test_empty_input_rejected() {
        let err = collect_events("").unwrap_err();
        assert!(matches!(err, SourceError::Parse { .. }));
    }

    #[test]
    fn test_bare_text_rejected() {
        let err = collect_events("xml").unwrap_err();
        assert!(matches!(err, SourceError::Parse { .. }));
    }

    #[test]
    fn test_second_root_rejected() {
        let err = collect_events("<a/><b/>").unwrap_err();
        assert!(matches!(err, SourceError::Parse { .. }));
    }

    #[test]
    fn test_trailing_whitespace_allowed() {
        let events = collect_events("<a/>\n  ").unwrap();
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn test_invalid_utf8_text_is_encoding_error() {
        let mut source = XmlReader::from_reader(&b"<a>\xff\xfe</a>"[..]);
        let err = loop {
            match source.next_event() {
                Ok(XmlEvent::DocumentEnd) => panic!("expected an error"),
                Ok(_) => continue,
                Err(err) => break err,
            }
        };
        assert!(matches!(err, SourceError::Encoding { .. }));
    }
}
