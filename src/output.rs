//! Output sinks the reporters write into.
//!
//! Reporters hand raw strings (escape sequences included) to a sink and place
//! their own newlines. A sink must not buffer or transform what it receives.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

pub trait OutputSink {
    fn print(&mut self, text: &str);
}

/// Any `FnMut(&str)` can act as a sink.
impl<F> OutputSink for F
where
    F: FnMut(&str),
{
    fn print(&mut self, text: &str) {
        self(text)
    }
}

/// Writes to stdout and flushes, so dots appear as specs finish.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn print(&mut self, text: &str) {
        let mut stdout = std::io::stdout().lock();
        let _ = stdout.write_all(text.as_bytes());
        let _ = stdout.flush();
    }
}

/// Appends everything printed to an in-memory report.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    pub buffer: String,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }
}

impl OutputSink for OutputBuffer {
    fn print(&mut self, text: &str) {
        self.buffer.push_str(text);
    }
}

/// A cloneable handle onto one [`OutputBuffer`]. Give one clone to the
/// reporter and keep another to read what it wrote.
#[derive(Debug, Default, Clone)]
pub struct SharedBuffer(pub Rc<RefCell<OutputBuffer>>);

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        self.0.borrow().as_str().to_owned()
    }
}

impl OutputSink for SharedBuffer {
    fn print(&mut self, text: &str) {
        self.0.borrow_mut().print(text);
    }
}
