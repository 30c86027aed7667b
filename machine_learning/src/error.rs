use std::{
    error::Error,
    fmt::{self, Display},
};

/// The result type used in the entire machine learning module.
pub type Result<T> = std::result::Result<T, MlErr>;

/// The machine learning module's error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MlErr {
    EmptyDataset,
    SizeMismatch {
        a: &'static str,
        b: &'static str,
        got: usize,
        expected: usize,
    },
    TooFewClasses {
        got: usize,
    },
    EmptyVocabulary,
}

impl Display for MlErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MlErr::EmptyDataset => write!(f, "Cannot fit on an empty dataset"),
            MlErr::SizeMismatch {
                a,
                b,
                got,
                expected,
            } => write!(
                f,
                "There's a size mismatch between {a} and {b}, got {got} and expected {expected}"
            ),
            MlErr::TooFewClasses { got } => write!(
                f,
                "The classifier needs samples of at least 2 classes in the data, but the data contains only {got} class(es)"
            ),
            MlErr::EmptyVocabulary => write!(
                f,
                "Empty vocabulary, the documents only contain stop words or tokens shorter than 2 characters"
            ),
        }
    }
}

impl Error for MlErr {}
