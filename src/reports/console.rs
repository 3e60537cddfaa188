use crate::Result;
use crate::resolve::FeatureRow;
use core::fmt::Write;
use owo_colors::OwoColorize;

const GAP: &str = "  ";

/// Render feature rows as an aligned console table with a summary line.
pub fn generate<W: Write>(rows: &[FeatureRow], use_colors: bool, writer: &mut W) -> Result<()> {
    if rows.is_empty() {
        writeln!(writer, "No attribute usages found.")?;
        return Ok(());
    }

    let layout = Layout::new(rows);
    layout.write_header(writer, use_colors)?;

    let mut resolved = 0_usize;
    for row in rows {
        if !row.value_id.is_empty() {
            resolved += 1;
        }
        layout.write_row(writer, row, use_colors)?;
    }

    writeln!(writer)?;
    let unresolved = rows.len() - resolved;
    let tail = format!("{unresolved} unresolved");
    if use_colors && unresolved > 0 {
        writeln!(writer, "{} attribute(s), {resolved} resolved, {}", rows.len(), tail.yellow())?;
    } else {
        writeln!(writer, "{} attribute(s), {resolved} resolved, {tail}", rows.len())?;
    }

    Ok(())
}

struct Layout {
    name_width: usize,
    value_width: usize,
    owner_width: usize,
}

impl Layout {
    fn new(rows: &[FeatureRow]) -> Self {
        Self {
            name_width: column_width("Name", rows.iter().map(|row| row.name.len())),
            value_width: column_width("Value", rows.iter().map(|row| row.value.len())),
            owner_width: column_width("Owner", rows.iter().map(|row| row.owner.len())),
        }
    }

    fn write_header<W: Write>(&self, writer: &mut W, use_colors: bool) -> Result<()> {
        let line = format!(
            "{:<name_width$}{gap}{:<value_width$}{gap}{:<owner_width$}{gap}{}",
            "Name",
            "Value",
            "Owner",
            "Id",
            name_width = self.name_width,
            value_width = self.value_width,
            owner_width = self.owner_width,
            gap = GAP,
        );

        if use_colors {
            writeln!(writer, "{}", line.bold())?;
        } else {
            writeln!(writer, "{line}")?;
        }

        Ok(())
    }

    fn write_row<W: Write>(&self, writer: &mut W, row: &FeatureRow, use_colors: bool) -> Result<()> {
        // Pad before styling; ANSI escapes must not count against the width.
        let value = if row.value_id.is_empty() { "-" } else { row.value.as_str() };
        let value = format!("{value:<value_width$}", value_width = self.value_width);

        write!(writer, "{:<name_width$}{gap}", row.name, name_width = self.name_width, gap = GAP)?;

        if use_colors && row.value_id.is_empty() {
            write!(writer, "{}", value.dimmed())?;
        } else if use_colors {
            write!(writer, "{}", value.green())?;
        } else {
            write!(writer, "{value}")?;
        }

        writeln!(
            writer,
            "{gap}{:<owner_width$}{gap}{}",
            row.owner,
            row.id,
            owner_width = self.owner_width,
            gap = GAP,
        )?;

        Ok(())
    }
}

fn column_width(header: &str, widths: impl Iterator<Item = usize>) -> usize {
    widths.chain(core::iter::once(header.len())).max().unwrap_or(header.len())
}
