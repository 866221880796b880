//! Harmonization settings.

/// The default label written into the assembly column of lifted rows.
pub const DEFAULT_TARGET_ASSEMBLY: &str = "GRCh38";

/// The default number of consecutive unrecognized rows that aborts a file.
pub const DEFAULT_BREAKER_THRESHOLD: usize = 25;

/// The default name of the per-file defect log.
pub const DEFAULT_SIDECAR_NAME: &str = "lift.log";

/// The default header name of the chromosome column.
pub const DEFAULT_CHROMOSOME_HEADER: &str = "chromosome";

/// The default header name of the start position column.
pub const DEFAULT_START_HEADER: &str = "seq_start_position";

/// The default header name of the end position column.
pub const DEFAULT_END_HEADER: &str = "seq_end_position";

/// The default header name of the assembly column.
pub const DEFAULT_ASSEMBLY_HEADER: &str = "genome_assembly";

/// Header names used to resolve columns.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Headers {
    /// The chromosome column.
    pub chromosome: String,

    /// The start position column.
    pub start: String,

    /// The end position column (copy-number data only).
    pub end: String,

    /// The assembly column.
    pub assembly: String,
}

impl Default for Headers {
    fn default() -> Self {
        Self {
            chromosome: DEFAULT_CHROMOSOME_HEADER.to_string(),
            start: DEFAULT_START_HEADER.to_string(),
            end: DEFAULT_END_HEADER.to_string(),
            assembly: DEFAULT_ASSEMBLY_HEADER.to_string(),
        }
    }
}

/// Settings for a [`Harmonizer`](crate::Harmonizer).
///
/// # Examples
///
/// ```
/// use omiclift::Config;
///
/// let config = Config::default()
///     .with_breaker_threshold(10)
///     .with_numeric_sex_chromosomes(true);
///
/// assert_eq!(config.breaker_threshold(), 10);
/// assert_eq!(config.target_assembly(), "GRCh38");
/// assert!(config.numeric_sex_chromosomes());
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// The label written into the assembly column of lifted rows.
    target_assembly: String,

    /// Consecutive unrecognized rows tolerated before a file is abandoned.
    breaker_threshold: usize,

    /// The file name of the defect log placed beside each source file.
    sidecar_name: String,

    /// Whether `23`/`24` are read as `X`/`Y`.
    numeric_sex_chromosomes: bool,

    /// The header names to resolve.
    headers: Headers,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_assembly: DEFAULT_TARGET_ASSEMBLY.to_string(),
            breaker_threshold: DEFAULT_BREAKER_THRESHOLD,
            sidecar_name: DEFAULT_SIDECAR_NAME.to_string(),
            numeric_sex_chromosomes: false,
            headers: Headers::default(),
        }
    }
}

impl Config {
    /// Sets the target assembly label.
    pub fn with_target_assembly(mut self, label: impl Into<String>) -> Self {
        self.target_assembly = label.into();
        self
    }

    /// Sets the circuit breaker threshold. A threshold of zero is treated as
    /// one.
    pub fn with_breaker_threshold(mut self, threshold: usize) -> Self {
        self.breaker_threshold = threshold.max(1);
        self
    }

    /// Sets the sidecar file name.
    pub fn with_sidecar_name(mut self, name: impl Into<String>) -> Self {
        self.sidecar_name = name.into();
        self
    }

    /// Enables or disables numeric sex-chromosome codes.
    pub fn with_numeric_sex_chromosomes(mut self, enabled: bool) -> Self {
        self.numeric_sex_chromosomes = enabled;
        self
    }

    /// Sets the header names.
    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    /// Gets the target assembly label.
    pub fn target_assembly(&self) -> &str {
        &self.target_assembly
    }

    /// Gets the circuit breaker threshold.
    pub fn breaker_threshold(&self) -> usize {
        self.breaker_threshold
    }

    /// Gets the sidecar file name.
    pub fn sidecar_name(&self) -> &str {
        &self.sidecar_name
    }

    /// Whether numeric sex-chromosome codes are translated.
    pub fn numeric_sex_chromosomes(&self) -> bool {
        self.numeric_sex_chromosomes
    }

    /// Gets the header names.
    pub fn headers(&self) -> &Headers {
        &self.headers
    }
}
