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

//! Events delivered by the streaming adapter.

use xmldict_core::Node;

/// One delivery from an [`XmlStream`](crate::XmlStream).
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// An element finished and normalized.
    Subtree {
        /// Element names from the root to this element, inclusive.
        path: Vec<String>,
        /// The normalized subtree.
        node: Node,
        /// Best-effort snapshot of the whole document so far; elements
        /// that are still open render without normalization checks.
        document: Node,
    },
    /// The document completed. Always the last event of a successful
    /// stream.
    Finished(Node),
}
