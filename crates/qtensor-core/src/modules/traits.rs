use crate::domain::ProcessResult;
use std::path::PathBuf;

/// Working directory plus the candidate file names found in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredInputs {
    pub working_dir: PathBuf,
    pub candidates: Vec<String>,
}

pub trait InputDiscovery {
    fn discover(&self) -> ProcessResult<DiscoveredInputs>;
}

impl<T> InputDiscovery for &T
where
    T: InputDiscovery + ?Sized,
{
    fn discover(&self) -> ProcessResult<DiscoveredInputs> {
        (**self).discover()
    }
}

#[cfg(test)]
mod tests {
    use super::{DiscoveredInputs, InputDiscovery};
    use crate::domain::{ProcessErrorKind, ProcessResult, QtensorError};
    use std::path::PathBuf;

    struct MissingDirectory;

    impl InputDiscovery for MissingDirectory {
        fn discover(&self) -> ProcessResult<DiscoveredInputs> {
            Err(QtensorError::directory_not_found("directory 'run-missing' not found"))
        }
    }

    struct FixedListing(Vec<String>);

    impl InputDiscovery for FixedListing {
        fn discover(&self) -> ProcessResult<DiscoveredInputs> {
            Ok(DiscoveredInputs {
                working_dir: PathBuf::from("run"),
                candidates: self.0.clone(),
            })
        }
    }

    #[test]
    fn discovery_uses_shared_error_types() {
        let error = MissingDirectory
            .discover()
            .expect_err("discovery should fail");
        assert_eq!(error.kind(), ProcessErrorKind::DirectoryNotFound);
        assert!(error.kind().is_run_fatal());
        assert_eq!(error.exit_code(), 3);
    }

    #[test]
    fn discovery_is_usable_through_references() {
        fn discover_with<D: InputDiscovery>(discovery: D) -> ProcessResult<DiscoveredInputs> {
            discovery.discover()
        }

        let listing = FixedListing(vec!["q1_0001.gp".to_string()]);
        let discovered = discover_with(&listing).expect("listing should succeed");
        assert_eq!(discovered.candidates, vec!["q1_0001.gp".to_string()]);
        assert_eq!(discovered.working_dir, PathBuf::from("run"));
    }
}
