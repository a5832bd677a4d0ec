use super::traits::{DiscoveredInputs, InputDiscovery};
use crate::domain::{Component, INPUT_EXTENSION, ProcessResult, QtensorError};
use globset::Glob;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const CANDIDATE_GLOB: &str = "q*.gp";

/// Lists `q*.gp` files directly inside one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryScan {
    dir: PathBuf,
}

impl DirectoryScan {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl InputDiscovery for DirectoryScan {
    fn discover(&self) -> ProcessResult<DiscoveredInputs> {
        if !self.dir.is_dir() {
            return Err(QtensorError::directory_not_found(format!(
                "directory '{}' not found",
                self.dir.display()
            )));
        }

        let matcher = Glob::new(CANDIDATE_GLOB)
            .map_err(|source| {
                QtensorError::internal(format!(
                    "invalid candidate glob '{}': {}",
                    CANDIDATE_GLOB, source
                ))
            })?
            .compile_matcher();

        let entries = fs::read_dir(&self.dir).map_err(|source| {
            QtensorError::directory_not_found(format!(
                "failed to list directory '{}': {}",
                self.dir.display(),
                source
            ))
        })?;

        let mut candidates = Vec::new();
        for entry in entries.flatten() {
            if !entry.file_type().is_ok_and(|file_type| file_type.is_file()) {
                continue;
            }
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if matcher.is_match(&name) {
                candidates.push(name);
            }
        }
        candidates.sort();

        Ok(DiscoveredInputs {
            working_dir: self.dir.clone(),
            candidates,
        })
    }
}

/// The six component files that together describe one snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampGroup {
    pub token: String,
    pub files: [PathBuf; 6],
}

impl TimestampGroup {
    pub fn path(&self, component: Component) -> &Path {
        &self.files[component.index() - 1]
    }
}

/// Token of a strict `q<1-6>_<token>.gp` name.
pub fn timestamp_token(file_name: &str) -> Option<&str> {
    let rest = file_name
        .strip_suffix(INPUT_EXTENSION)?
        .strip_prefix('q')?;
    let digit = rest.chars().next()?;
    if !('1'..='6').contains(&digit) {
        return None;
    }
    let token = rest[digit.len_utf8()..].strip_prefix('_')?;
    (!token.is_empty() && !token.contains(INPUT_EXTENSION)).then_some(token)
}

/// Distinct tokens in ascending byte order.
pub fn timestamp_tokens(candidates: &[String]) -> Vec<String> {
    candidates
        .iter()
        .filter_map(|name| timestamp_token(name))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

pub fn expected_file_names(token: &str) -> Vec<String> {
    Component::ALL
        .iter()
        .map(|component| component.file_name(token))
        .collect()
}

/// Checks that the candidates ending in `_<token>.gp` are exactly
/// `q1_<token>.gp`..`q6_<token>.gp`.
pub fn group_for_token(
    working_dir: &Path,
    token: &str,
    candidates: &[String],
) -> ProcessResult<TimestampGroup> {
    let expected = expected_file_names(token);
    let suffix = format!("_{}{}", token, INPUT_EXTENSION);
    let mut actual: Vec<&str> = candidates
        .iter()
        .map(String::as_str)
        .filter(|name| name.ends_with(&suffix))
        .collect();
    actual.sort_unstable();

    if actual != expected {
        return Err(QtensorError::incomplete_group(format!(
            "missing or unexpected files for timestamp {}; expected {:?}, found {:?}",
            token, expected, actual
        )));
    }

    Ok(TimestampGroup {
        token: token.to_string(),
        files: Component::ALL.map(|component| working_dir.join(component.file_name(token))),
    })
}
