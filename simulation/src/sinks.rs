//! Trace sinks that write to an output stream
//!
//! [`TraceSink::record`] cannot fail, so both sinks keep the first I/O error
//! they hit, stop writing, and hand the error back from `finish()`.

use std::io::{self, Write};

use tracing::warn;

use diffusion_core::{TraceRecord, TraceSink};

use crate::render::{render_hop, render_outcome, render_table};

/// Human-readable trace: one line per hop followed by the node's table
#[derive(Debug)]
pub struct ConsoleSink<W: Write> {
    out: W,
    show_tables: bool,
    error: Option<io::Error>,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            show_tables: true,
            error: None,
        }
    }

    /// Print hop lines only
    pub fn without_tables(mut self) -> Self {
        self.show_tables = false;
        self
    }

    /// Flush and return the writer, or the first write error
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn write_record(&mut self, record: &TraceRecord) -> io::Result<()> {
        match record {
            TraceRecord::Hop(hop) => {
                writeln!(self.out, "{}", render_hop(hop))?;
                if self.show_tables {
                    writeln!(self.out, "{}", render_table(hop.node, &hop.table))?;
                }
            }
            TraceRecord::Outcome { outcome, .. } => {
                writeln!(self.out, "{}", render_outcome(outcome))?;
            }
        }
        Ok(())
    }
}

impl<W: Write> TraceSink for ConsoleSink<W> {
    fn record(&mut self, record: &TraceRecord) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.write_record(record) {
            warn!(error = %err, "Console trace output failed");
            self.error = Some(err);
        }
    }
}

/// Machine-readable trace: one JSON object per line
#[derive(Debug)]
pub struct JsonlSink<W: Write> {
    out: W,
    written: usize,
    error: Option<io::Error>,
}

impl<W: Write> JsonlSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            written: 0,
            error: None,
        }
    }

    /// Records written so far
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush and return the writer, or the first write error
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn write_record(&mut self, record: &TraceRecord) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, record)?;
        self.out.write_all(b"\n")
    }
}

impl<W: Write> TraceSink for JsonlSink<W> {
    fn record(&mut self, record: &TraceRecord) {
        if self.error.is_some() {
            return;
        }
        match self.write_record(record) {
            Ok(()) => self.written += 1,
            Err(err) => {
                warn!(error = %err, "JSONL trace output failed");
                self.error = Some(err);
            }
        }
    }
}
