use std::io::{self, Write};
use std::path::PathBuf;

use catalog_core::ScrapeResult;
use scrape_logging::{scrape_error, scrape_info};
use serde::Serialize;

use crate::{AtomicFileWriter, PersistError};

/// Renders records as a JSON array with four-space indentation.
/// Non-ASCII text is written as-is, not `\u` escaped.
pub fn render_json(result: &ScrapeResult) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    result.serialize(&mut ser)?;
    // serde_json only ever emits valid UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Run-end export of the collected records to a JSON file, optionally
/// echoed to the console.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    writer: AtomicFileWriter,
    echo: bool,
}

impl JsonFileSink {
    pub fn new(output_file: impl Into<PathBuf>, echo: bool) -> Self {
        Self {
            writer: AtomicFileWriter::new(output_file),
            echo,
        }
    }

    /// Writes the export and, when echo is on, prints it to stdout.
    pub fn write(&self, result: &ScrapeResult) -> Result<PathBuf, PersistError> {
        let stdout = io::stdout();
        let mut console = stdout.lock();
        self.write_with_console(result, &mut console)
    }

    pub fn write_with_console(
        &self,
        result: &ScrapeResult,
        console: &mut dyn Write,
    ) -> Result<PathBuf, PersistError> {
        let content = render_json(result)?;
        let path = self.writer.write(&content).inspect_err(|err| {
            scrape_error!(
                "Failed to write results to {}: {}",
                self.writer.target().display(),
                err
            );
        })?;
        scrape_info!(
            "Data scraped and saved to {} ({} records)",
            path.display(),
            result.len()
        );

        if self.echo {
            writeln!(console, "{content}")?;
            console.flush()?;
        }
        Ok(path)
    }
}
