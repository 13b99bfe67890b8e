//! Report renderers implementing [`ReportSink`].

use crate::diff::DiffReport;
use crate::monitor::ReportSink;
use anyhow::{Context, Result};
use colored::{ColoredString, Colorize};
use std::io::{self, Write};

/// Human-readable report, one path per line under a marker header.
///
/// ```text
/// [+] Added files:
///   + /data/new.txt
/// [!] Modified files:
///   * /data/changed.txt
/// ```
pub struct ConsoleSink<W: Write> {
    out: W,
}

impl ConsoleSink<io::Stdout> {
    /// Render to the process's stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleSink<W> {
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Give back the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn section(
        &mut self,
        header: ColoredString,
        marker: ColoredString,
        paths: &[String],
    ) -> io::Result<()> {
        if paths.is_empty() {
            return Ok(());
        }
        writeln!(self.out, "{header}")?;
        for path in paths {
            writeln!(self.out, "  {marker} {path}")?;
        }
        Ok(())
    }

    fn render(&mut self, report: &DiffReport) -> io::Result<()> {
        if report.is_clean() {
            writeln!(self.out, "{}", "[+] No changes detected.".green())?;
        } else {
            self.section("[+] Added files:".green().bold(), "+".green(), &report.added)?;
            self.section("[-] Deleted files:".red().bold(), "-".red(), &report.deleted)?;
            self.section(
                "[!] Modified files:".yellow().bold(),
                "*".yellow(),
                &report.modified,
            )?;
        }
        self.out.flush()
    }
}

impl<W: Write> ReportSink for ConsoleSink<W> {
    fn emit(&mut self, report: &DiffReport) -> Result<()> {
        self.render(report).context("Failed to write report")
    }
}

/// Machine-readable report: a pretty-printed JSON object with the three lists.
pub struct JsonSink<W: Write> {
    out: W,
}

impl JsonSink<io::Stdout> {
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> JsonSink<W> {
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for JsonSink<W> {
    fn emit(&mut self, report: &DiffReport) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.out, report)
            .context("Failed to serialize report")?;
        writeln!(self.out).context("Failed to write report")?;
        self.out.flush().context("Failed to write report")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> DiffReport {
        DiffReport {
            added: vec!["/r/new.txt".to_string()],
            deleted: vec!["/r/old.txt".to_string(), "/r/older.txt".to_string()],
            modified: vec![],
        }
    }

    fn render(report: &DiffReport) -> Result<String> {
        colored::control::set_override(false);
        let mut sink = ConsoleSink::new(Vec::new());
        sink.emit(report)?;
        Ok(String::from_utf8(sink.into_inner())?)
    }

    #[test]
    fn test_console_clean_report() -> Result<()> {
        let text = render(&DiffReport::default())?;
        assert_eq!(text, "[+] No changes detected.\n");
        Ok(())
    }

    #[test]
    fn test_console_lists_sections_with_changes_only() -> Result<()> {
        let text = render(&report())?;
        assert_eq!(
            text,
            "[+] Added files:\n  + /r/new.txt\n[-] Deleted files:\n  - /r/old.txt\n  - /r/older.txt\n"
        );
        assert!(!text.contains("Modified"));
        Ok(())
    }

    #[test]
    fn test_json_sink_output() -> Result<()> {
        let mut sink = JsonSink::new(Vec::new());
        sink.emit(&report())?;
        let bytes = sink.into_inner();

        assert!(bytes.ends_with(b"\n"));
        let parsed: DiffReport = serde_json::from_slice(&bytes)?;
        assert_eq!(parsed, report());
        Ok(())
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_surfaces() {
        let mut sink = ConsoleSink::new(BrokenPipe);
        assert!(sink.emit(&report()).is_err());
    }
}
