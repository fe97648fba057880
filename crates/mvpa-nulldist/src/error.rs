use mvpa_stats::FitError;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum DatasetError {
    #[display("dataset has no samples")]
    Empty,
    #[display("dataset has {samples} samples but {actual} {attribute}")]
    AttributeLength {
        attribute: &'static str,
        samples: usize,
        actual: usize,
    },
    #[display("sample #{row} has {actual} features, expected {expected}")]
    RaggedSamples {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[display("samples have no features")]
    NoFeatures,
    #[display("{dataset} dataset has {actual} features, expected {expected}")]
    FeatureCountMismatch {
        dataset: &'static str,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MeasureError {
    #[display("measure needs at least {required} classes, found {found}")]
    TooFewClasses { required: usize, found: usize },
    #[display("{samples} samples in {classes} classes leave no within-class degrees of freedom")]
    TooFewSamples { samples: usize, classes: usize },
    #[display("trained on {expected} features, got samples with {actual}")]
    FeatureMismatch { expected: usize, actual: usize },
}

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum NullDistError {
    #[display("invalid dataset: {_0}")]
    #[from]
    Dataset(DatasetError),
    #[display("measure failed: {_0}")]
    #[from]
    Measure(MeasureError),
    #[display("failed to fit null distribution: {_0}")]
    #[from]
    Fit(FitError),
    #[display("distribution has to be fit first")]
    NotFitted,
    #[display("distribution was fit for {expected} elements, queried with {actual}")]
    ElementCountMismatch { expected: usize, actual: usize },
    #[display("permutation #{permutation} measured {actual} elements, expected {expected}")]
    InconsistentMeasurement {
        permutation: usize,
        expected: usize,
        actual: usize,
    },
    #[display("measure returned no values")]
    EmptyMeasurement,
    #[display("invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}
