//! Tests that feature extraction never sees the held-out partition.

use graymail::analysis::{Analyzer, EnglishAnalyzer};
use graymail::dataset::{Label, Record, preprocess};
use graymail::model_selection::{KFold, train_test_split};
use graymail::vectorize::TfIdfVectorizer;

fn record(id: usize, text: &str, label: Label) -> Record {
    Record {
        id: id.to_string(),
        text: text.to_string(),
        label: Some(label),
    }
}

#[test]
fn test_vocabulary_excludes_test_only_terms() {
    // "zebra" and "quasar" appear in exactly one document each. With a
    // seed that sends those rows to the test partition, the fitted
    // vocabulary must not contain their stems.
    let texts = [
        "free money prize claim",
        "win free cash offer",
        "meeting agenda monday",
        "project deadline report",
        "zebra quasar unusual words",
    ];

    for seed in 0..50u64 {
        let split = train_test_split(texts.len(), 0.2, seed).unwrap();
        if !split.test_indices.contains(&4) {
            continue;
        }

        let train_texts: Vec<String> = split
            .train_indices
            .iter()
            .map(|&i| texts[i].to_string())
            .collect();

        let mut vectorizer = TfIdfVectorizer::new();
        vectorizer.fit(&train_texts).unwrap();

        // Transforming the held-out row yields an all-zero vector for
        // its unseen terms instead of growing the vocabulary.
        let before = vectorizer.vocabulary_size();
        let matrix = vectorizer
            .transform(&[texts[4].to_string()])
            .unwrap();
        assert_eq!(vectorizer.vocabulary_size(), before);
        assert!(matrix.row(0).is_empty());
        return;
    }

    panic!("no seed in 0..50 held out the last row");
}

#[test]
fn test_split_and_folds_are_disjoint() {
    let split = train_test_split(100, 0.2, 42).unwrap();
    assert_eq!(split.test_indices.len(), 20);

    for test_index in &split.test_indices {
        assert!(!split.train_indices.contains(test_index));
    }

    // Folding the training partition never touches test indices because
    // folds are positions into the training set, not raw row ids.
    let folds = KFold::new(5).with_random_state(42);
    for (train, validation) in folds.split(split.train_indices.len()).unwrap() {
        assert_eq!(train.len() + validation.len(), 80);
        for v in &validation {
            assert!(!train.contains(v));
        }
    }
}

#[test]
fn test_preprocessing_keeps_row_order() {
    let analyzer = EnglishAnalyzer::new().unwrap();
    let records = vec![
        record(1, "Win a FREE prize", Label::Spam),
        record(2, "Meeting on Monday", Label::Ham),
        record(3, "Claim your cash reward", Label::Spam),
    ];

    let processed = preprocess(records, &analyzer).unwrap();
    assert_eq!(processed.len(), 3);
    assert_eq!(processed[0].record.id, "1");
    assert_eq!(processed[1].record.id, "2");
    assert_eq!(processed[2].record.id, "3");
    assert_eq!(processed[0].normalized_text, "win free prize");
}

#[test]
fn test_normalization_matches_vectorizer_term_shape() {
    let analyzer = EnglishAnalyzer::new().unwrap();
    let normalized = analyzer
        .normalize("FREE prizes are waiting, claim them NOW!!!")
        .unwrap();

    // Every surviving term becomes one vocabulary entry.
    let mut vectorizer = TfIdfVectorizer::new();
    vectorizer.fit(&[normalized.clone()]).unwrap();
    assert_eq!(
        vectorizer.vocabulary_size(),
        normalized.split_whitespace().count()
    );
}
