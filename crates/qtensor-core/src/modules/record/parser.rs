use super::InputRecord;
use crate::domain::{ParserResult, QtensorError};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

pub fn read_input_record(path: &Path) -> ParserResult<InputRecord> {
    let source = fs::read_to_string(path).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            QtensorError::input_not_found(format!(
                "input file '{}' does not exist",
                path.display()
            ))
        } else {
            QtensorError::input_read(format!(
                "failed to read input file '{}': {}",
                path.display(),
                source
            ))
        }
    })?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    parse_input_record(&file_name, &source)
}

pub fn parse_input_record(file_name: &str, source: &str) -> ParserResult<InputRecord> {
    let mut lines = source.lines();
    let Some(header) = lines.next() else {
        return Err(QtensorError::empty_input(format!("{} is empty", file_name)));
    };

    let (mesh_size, mesh_size_defaulted) = match header.trim().parse::<i64>() {
        Ok(mesh_size) => (mesh_size, false),
        Err(_) => {
            tracing::warn!(
                file = file_name,
                header = header.trim(),
                "invalid mesh size header, using default 0"
            );
            (0, true)
        }
    };

    let mut values = Vec::new();
    for (offset, line) in lines.enumerate() {
        for token in line.split_whitespace() {
            let value = token.parse::<f64>().map_err(|_| {
                QtensorError::malformed_number(format!(
                    "{} line {}: '{}' is not a valid number",
                    file_name,
                    offset + 2,
                    token
                ))
            })?;
            values.push(value);
        }
    }

    Ok(InputRecord {
        mesh_size,
        values,
        mesh_size_defaulted,
    })
}
