use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

/// Destination for generated documents: a file, or stdout.
///
/// Documents are separated by one blank line.
pub struct Output {
    writer: Box<dyn Write>,
    documents: usize,
}

impl Output {
    pub fn open(path: Option<&Path>) -> Result<Self> {
        let writer: Box<dyn Write> = match path {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path.display()))?;
                Box::new(BufWriter::new(file))
            }
            None => Box::new(BufWriter::new(io::stdout().lock())),
        };
        Ok(Self {
            writer,
            documents: 0,
        })
    }

    pub fn write_document(&mut self, text: &str) -> Result<()> {
        if self.documents > 0 {
            self.writer.write_all(b"\n")?;
        }
        self.writer
            .write_all(text.as_bytes())
            .context("Failed to write output")?;
        self.documents += 1;
        Ok(())
    }

    pub fn finish(mut self) -> Result<()> {
        self.writer.flush().context("Failed to flush output")
    }
}
