//! Incremental printing of assistant messages.

use std::io::{self, Write};

use ai360_core::text::format_message;

/// Writes streamed text a line at a time so `**bold**` markers, which never
/// span lines, can be rendered once the whole line is known.
pub struct MessagePrinter<W: Write> {
    out: W,
    pending: String,
    bold: bool,
}

impl<W: Write> MessagePrinter<W> {
    /// `bold` renders emphasized spans with ANSI bold; otherwise the markers
    /// are simply dropped.
    pub const fn new(out: W, bold: bool) -> Self {
        Self {
            out,
            pending: String::new(),
            bold,
        }
    }

    /// Add a fragment, printing every line it completes.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn push(&mut self, fragment: &str) -> io::Result<()> {
        self.pending.push_str(fragment);
        while let Some(end) = self.pending.find('\n') {
            let line: String = self.pending.drain(..=end).collect();
            self.write_line(&line)?;
        }
        self.out.flush()
    }

    /// Print whatever is left and end the message with a newline.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        let rest = std::mem::take(&mut self.pending);
        if !rest.is_empty() {
            self.write_line(&rest)?;
            writeln!(self.out)?;
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        for span in format_message(line) {
            if span.bold && self.bold {
                write!(self.out, "\u{1b}[1m{}\u{1b}[0m", span.text)?;
            } else {
                self.out.write_all(span.text.as_bytes())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn printed(fragments: &[&str], bold: bool) -> String {
        let mut printer = MessagePrinter::new(Vec::new(), bold);
        for fragment in fragments {
            printer.push(fragment).unwrap();
        }
        String::from_utf8(printer.finish().unwrap()).unwrap()
    }

    #[test]
    fn markers_split_across_fragments_are_still_bold() {
        let out = printed(&["**Hydr", "ation** matters\n", "* drink water"], true);
        assert_eq!(
            out,
            "\u{1b}[1mHydration\u{1b}[0m matters\n drink water\n"
        );
    }

    #[test]
    fn plain_mode_drops_markers() {
        let out = printed(&["**Note:** rest *well*"], false);
        assert_eq!(out, "Note: rest well\n");
    }

    #[test]
    fn lines_are_written_as_soon_as_complete() {
        let mut printer = MessagePrinter::new(Vec::new(), false);
        printer.push("first line\nsecond").unwrap();
        assert_eq!(printer.out, b"first line\n");
        let out = printer.finish().unwrap();
        assert_eq!(out, b"first line\nsecond\n");
    }

    #[test]
    fn empty_message_prints_nothing() {
        assert_eq!(printed(&[], false), "");
    }
}
