use crate::domain::{ProcessResult, QtensorError};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const VALUES_PER_ROW: usize = 5;
pub const FRACTIONAL_DIGITS: usize = 16;

pub fn format_gp_value(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    format!("{value:.precision$}", precision = FRACTIONAL_DIGITS)
}

/// Mesh-size header, then rows of up to five tab-separated values.
pub fn render_gp_table(mesh_size: i64, values: &[f64]) -> String {
    let mut rendered = format!("{mesh_size}\n");
    for row in values.chunks(VALUES_PER_ROW) {
        let cells: Vec<String> = row.iter().copied().map(format_gp_value).collect();
        rendered.push_str(&cells.join("\t"));
        rendered.push('\n');
    }
    rendered
}

pub fn write_text_artifact(path: &Path, content: &str) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(content.as_bytes())?;
    writer.flush()
}

pub fn write_gp_table(path: &Path, mesh_size: i64, values: &[f64]) -> ProcessResult<()> {
    write_text_artifact(path, &render_gp_table(mesh_size, values)).map_err(|source| {
        QtensorError::output_write(format!(
            "failed to write '{}': {}",
            path.display(),
            source
        ))
    })
}
