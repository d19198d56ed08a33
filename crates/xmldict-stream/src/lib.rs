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

//! Streaming XML conversion.
//!
//! Parsing runs on a background worker thread and results arrive over a
//! channel, so callers never block on the parse itself.
//!
//! Two modes:
//!
//! - Whole-document: [`parse_in_background`] delivers one terminal
//!   `Result<Node, XmlError>`.
//! - Incremental: [`XmlStream`] delivers one [`StreamEvent::Subtree`] per
//!   completed element, in post-order, then a terminal
//!   [`StreamEvent::Finished`] or the error.
//!
//! [`XmlStream::cancel`] stops the worker between events; after
//! cancellation no further events are delivered and partial state is
//! dropped silently. Dropping the stream cancels the same way.
//!
//! ```
//! use xmldict_stream::{StreamEvent, XmlStream};
//!
//! let stream = XmlStream::spawn("<a><b>1</b></a>".to_string());
//! for event in stream {
//!     match event {
//!         Ok(StreamEvent::Subtree { path, .. }) => println!("{}", path.join("/")),
//!         Ok(StreamEvent::Finished(document)) => println!("{document:?}"),
//!         Err(e) => eprintln!("Error: {e}"),
//!     }
//! }
//! ```

mod adapter;
mod event;

pub use adapter::{parse_in_background, XmlStream};
pub use event::StreamEvent;
