//! Output formatting for API results

use crate::error::CliError;
use geoguessr_models::{TreeValue, TreeWriter};
use serde::Serialize;
use std::io::Write;

/// Prints results as a field tree, or as pretty JSON
pub struct OutputFormatter {
    json: bool,
}

impl OutputFormatter {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    /// Format and print one result under the label `name`
    pub fn print<T>(&self, name: &str, value: &T) -> Result<(), CliError>
    where
        T: Serialize + TreeValue + ?Sized,
    {
        let rendered = self.render(name, value)?;
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{rendered}")?;
        Ok(())
    }

    fn render<T>(&self, name: &str, value: &T) -> Result<String, CliError>
    where
        T: Serialize + TreeValue + ?Sized,
    {
        if self.json {
            return Ok(serde_json::to_string_pretty(value)?);
        }
        let mut out = TreeWriter::new();
        value.write_value(name, &mut out);
        Ok(out.finish().trim_end().to_string())
    }
}
