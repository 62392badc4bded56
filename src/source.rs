// Copyright (c) 2020-2023  Brendan Molloy <brendan@bbqsrc.net>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! An immutable, in-memory wrapper over Gherkin text.

/// Opaque wrapper over input text, split into 1-based lines up front.
///
/// `Source` never touches a filesystem or other I/O; it is constructed
/// from a string the caller already has in memory. `uri` is carried purely
/// for display in error messages and is not interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    uri: Option<String>,
    lines: Vec<String>,
}

impl Source {
    /// Builds a `Source` from in-memory text.
    ///
    /// Both `\n` and `\r\n` are recognized as line terminators. A single
    /// trailing terminator does not produce an extra empty final line.
    pub fn from_string(text: impl Into<String>, uri: Option<String>) -> Self {
        let text = text.into();
        let mut lines: Vec<String> = text.split('\n').map(strip_cr).collect();
        if lines.last().map(String::is_empty).unwrap_or(false) {
            lines.pop();
        }
        Source { uri, lines }
    }

    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    /// Number of lines in the source; a trailing newline does not count as
    /// an additional empty line.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the 1-based line's content, without its terminator.
    pub fn line(&self, n: usize) -> Option<&str> {
        n.checked_sub(1).and_then(|i| self.lines.get(i)).map(String::as_str)
    }
}

fn strip_cr(s: &str) -> String {
    s.strip_suffix('\r').unwrap_or(s).to_string()
}
