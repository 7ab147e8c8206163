use std::fmt;
use std::path::PathBuf;

/// A file the batch could not convert.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchFailure {
    /// Input file that failed.
    pub input: PathBuf,
    /// Full error chain, already formatted.
    pub error: String,
}

/// Bilan agrégé d'un traitement par lots.
///
/// Failures never abort the batch; they are collected here and the caller
/// decides the exit status.
///
/// # Example
/// ```
/// use bl_core::report::BatchReport;
/// use std::path::PathBuf;
/// let mut report = BatchReport::default();
/// report.processed.push(PathBuf::from("out/A.png"));
/// assert!(report.is_success());
/// assert_eq!(report.summary(), "1 converti(s), 0 ignoré(s), 0 échec(s)");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Output files written, in processing order.
    pub processed: Vec<PathBuf>,
    /// Inputs filtered out before conversion.
    pub skipped: Vec<PathBuf>,
    /// Inputs whose conversion failed.
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    /// Records a failed input.
    pub fn fail(&mut self, input: PathBuf, error: &anyhow::Error) {
        log::warn!("{}: {error:#}", input.display());
        self.failures.push(BatchFailure {
            input,
            error: format!("{error:#}"),
        });
    }

    /// `true` when no input failed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// One-line human summary.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} converti(s), {} ignoré(s), {} échec(s)",
            self.processed.len(),
            self.skipped.len(),
            self.failures.len()
        )
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.summary())?;
        for failure in &self.failures {
            writeln!(f, "  {}: {}", failure.input.display(), failure.error)?;
        }
        Ok(())
    }
}
