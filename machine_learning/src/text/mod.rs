mod tfidf;
mod tokenizer;

pub use tfidf::TfidfVectorizer;
pub use tokenizer::tokenize;
