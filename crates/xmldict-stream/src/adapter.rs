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

//! Background-thread drive loop and its stream handle.

use crate::event::StreamEvent;
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use xmldict_core::{parse_str, parse_with, Node, XmlReader, XmlResult};

/// Parse a whole document on a worker thread. The receiver yields exactly
/// one terminal result; dropping it early just discards the outcome.
pub fn parse_in_background(xml: String) -> Receiver<XmlResult<Node>> {
    let (events, receiver) = channel();
    thread::spawn(move || {
        let _ = events.send(parse_str(&xml));
    });
    receiver
}

/// Handle to an incremental background parse.
///
/// Exactly one drive loop runs per stream. Events arrive in post-order,
/// one per completed element, followed by a terminal
/// [`StreamEvent::Finished`] or the error.
pub struct XmlStream {
    events: Receiver<XmlResult<StreamEvent>>,
    cancelled: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl XmlStream {
    /// Start converting `xml` on a worker thread.
    pub fn spawn(xml: String) -> Self {
        let (events, receiver) = channel();
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);
        let worker = thread::spawn(move || drive(&xml, &events, &flag));
        XmlStream {
            events: receiver,
            cancelled,
            worker: Some(worker),
        }
    }

    /// Request cancellation. The worker observes the flag between events,
    /// stops pulling from the tokenizer, and exits; no further events are
    /// delivered on this handle.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Receive the next event, blocking until the worker produces one.
    /// Returns `None` once the stream is finished or cancelled.
    pub fn next_event(&self) -> Option<XmlResult<StreamEvent>> {
        if self.cancelled.load(Ordering::SeqCst) {
            return None;
        }
        self.events.recv().ok()
    }
}

impl Iterator for XmlStream {
    type Item = XmlResult<StreamEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_event()
    }
}

impl Drop for XmlStream {
    fn drop(&mut self) {
        self.cancel();
        if let Some(worker) = self.worker.take() {
            // The channel is unbounded, so the worker never blocks on send
            // and always reaches the flag check.
            let _ = worker.join();
        }
    }
}

fn drive(xml: &str, events: &Sender<XmlResult<StreamEvent>>, cancelled: &AtomicBool) {
    let outcome = parse_with(XmlReader::from_str(xml), |subtree| {
        if cancelled.load(Ordering::SeqCst) {
            return ControlFlow::Break(());
        }
        let event = StreamEvent::Subtree {
            path: subtree.path().to_vec(),
            node: subtree.node().clone(),
            document: subtree.document(),
        };
        // A closed receiver means the consumer is gone; stop pulling.
        if events.send(Ok(event)).is_err() {
            return ControlFlow::Break(());
        }
        ControlFlow::Continue(())
    });
    match outcome {
        Ok(Some(document)) => {
            let _ = events.send(Ok(StreamEvent::Finished(document)));
        }
        // Cancelled: partial state is dropped silently.
        Ok(None) => {}
        Err(err) => {
            let _ = events.send(Err(err));
        }
    }
}
