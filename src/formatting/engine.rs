//! Line-buffered output with indentation

use std::io::{self, Write};

use tracing::trace;

use crate::formatting::wrap::{display_width, wrap, Chunk, Line, NL};
use crate::formatting::{Hints, Options};

/// Collects chunks until a newline completes a logical line, then hands
/// the line to the wrapper and writes the result to the sink.
pub struct LineEngine<'o> {
    sink: &'o mut dyn Write,
    options: Options,
    line: Line,
    column: usize,
    indented: bool,
    space_align: bool,
    tab_indent: bool,
    linebreaks: bool,
}

impl<'o> LineEngine<'o> {
    pub fn new(sink: &'o mut dyn Write, options: Options) -> LineEngine<'o> {
        LineEngine {
            sink,
            options,
            line: Line::default(),
            column: 0,
            indented: false,
            space_align: false,
            tab_indent: true,
            linebreaks: true,
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Append text. Every newline in it completes a line, which gets
    /// wrapped and written out immediately.
    pub fn write(&mut self, text: &str, hints: Hints) -> io::Result<()> {
        for piece in text.split_inclusive(NL) {
            self.line
                .chunks
                .push(Chunk::new(piece, hints));

            if piece.ends_with(NL) {
                self.flush()?;
            } else {
                self.column += display_width(piece, self.options.tab_width);
            }
        }
        Ok(())
    }

    /// Indent the current line, unless that already happened. Returns
    /// whether anything was done.
    pub fn write_indent(&mut self, level: usize, hints: Hints) -> io::Result<bool> {
        if self.indented {
            return Ok(false);
        }
        self.indented = true;
        self.line.indent = level;

        let mut text = String::new();
        if self.tab_indent {
            text.push_str(&"\t".repeat(level));
        }
        if self.space_align {
            text.push_str(&" ".repeat(self.options.continuation));
        }
        if !text.is_empty() {
            self.write(&text, hints)?;
        }
        Ok(true)
    }

    /// Display column the next character would land in.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Nothing but whitespace on the current line so far.
    pub fn is_blank(&self) -> bool {
        self.line
            .chunks
            .iter()
            .all(Chunk::is_blank)
    }

    /// Throw away the current, unfinished line. Only meant for lines that
    /// hold nothing but indentation.
    pub fn discard(&mut self) {
        if !self
            .line
            .chunks
            .is_empty()
        {
            trace!("discarding {} pending chunks", self.line.chunks.len());
        }
        self.line = Line::default();
        self.column = 0;
        self.indented = false;
    }

    /// Lines started from now on get extra space indentation, as after a
    /// comment that interrupted an expression.
    pub fn set_space_align(&mut self, enable: bool) {
        self.space_align = enable;
    }

    pub fn set_tab_indent(&mut self, enable: bool) {
        self.tab_indent = enable;
    }

    pub fn set_linebreaks(&mut self, enable: bool) {
        self.linebreaks = enable;
    }

    /// Write out whatever remains and flush the sink.
    pub fn finish(&mut self) -> io::Result<()> {
        if !self
            .line
            .chunks
            .is_empty()
        {
            self.flush()?;
        }
        self.sink
            .flush()
    }

    fn flush(&mut self) -> io::Result<()> {
        self.line.wrapping = self.linebreaks;
        let text = wrap(&self.line, &self.options);
        self.sink
            .write_all(text.as_bytes())?;

        self.line = Line::default();
        self.column = 0;
        self.indented = false;
        Ok(())
    }
}
