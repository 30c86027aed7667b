use serde::{Deserialize, Serialize};

use crate::{
    MlErr, Result,
    arch::{Classifier, LinearSvc, LinearSvcParams},
    dataset::Dataset,
    text::TfidfVectorizer,
};

/// A text classification pipeline: TF-IDF features followed by a linear SVC.
///
/// Once fitted it is immutable, so a single instance can serve concurrent predictions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextClassifier {
    vectorizer: TfidfVectorizer,
    classifier: LinearSvc,
}

impl TextClassifier {
    /// Fits a new `TextClassifier`.
    ///
    /// # Arguments
    /// * `texts` - The training documents.
    /// * `labels` - The category of each document, in the same order.
    /// * `params` - The classifier's hyperparameters.
    ///
    /// # Returns
    /// The fitted pipeline, or an error if the data is empty, the lengths differ, there are
    /// fewer than two categories or no document has a usable token.
    pub fn fit<T, L>(texts: &[T], labels: &[L], params: &LinearSvcParams) -> Result<Self>
    where
        T: AsRef<str>,
        L: AsRef<str>,
    {
        if texts.len() != labels.len() {
            return Err(MlErr::SizeMismatch {
                a: "texts",
                b: "labels",
                got: labels.len(),
                expected: texts.len(),
            });
        }

        let mut vectorizer = TfidfVectorizer::new();
        let x = vectorizer.fit_transform(texts)?;
        let dataset = Dataset::new(x, labels, vectorizer.n_features())?;
        let classifier = LinearSvc::fit(&dataset, params)?;

        Ok(Self {
            vectorizer,
            classifier,
        })
    }

    /// Predicts the category of each text.
    pub fn predict<T: AsRef<str>>(&self, texts: &[T]) -> Vec<String> {
        self.vectorizer
            .transform(texts)
            .iter()
            .map(|x| self.classifier.predict(x).to_string())
            .collect()
    }

    /// Predicts the category of a single text.
    pub fn predict_one(&self, text: &str) -> String {
        let x = self.vectorizer.transform_one(text);
        self.classifier.predict(&x).to_string()
    }

    /// The categories this pipeline was trained on, in ascending order.
    pub fn classes(&self) -> &[String] {
        self.classifier.classes()
    }

    /// The size of the learned vocabulary.
    pub fn n_features(&self) -> usize {
        self.vectorizer.n_features()
    }
}
