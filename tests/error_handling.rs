use keyscan::{
    CanonicalError, CanonicalizeConfig, MatchConfig, MatchError, MatchRequest, Pipeline,
    PipelineConfig, PipelineError,
};

fn request(keywords: &[&str], max_distance: usize) -> MatchRequest {
    MatchRequest {
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        max_distance,
    }
}

#[test]
fn invalid_canonical_version_is_rejected() {
    let cfg = PipelineConfig {
        canonical: CanonicalizeConfig {
            version: 0,
            ..Default::default()
        },
        ..PipelineConfig::default()
    };
    let err = Pipeline::new(&cfg).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Canonical(CanonicalError::InvalidConfig(_))
    ));
}

#[test]
fn invalid_matcher_config_is_rejected() {
    let cfg = PipelineConfig {
        matcher: MatchConfig {
            version: "  ".into(),
            ..MatchConfig::default()
        },
        ..PipelineConfig::default()
    };
    assert!(matches!(
        Pipeline::new(&cfg),
        Err(PipelineError::Match(MatchError::InvalidConfig(_)))
    ));
}

#[test]
fn oversized_request_fails_fast() {
    let cfg = PipelineConfig {
        matcher: MatchConfig {
            max_comparisons: Some(10),
            ..MatchConfig::default()
        },
        ..PipelineConfig::default()
    };
    let pipeline = Pipeline::new(&cfg).unwrap();
    let text = "one two three four five six";
    let err = pipeline
        .analyze(text, &request(&["a", "b"], 1))
        .expect_err("12 comparisons exceed the cap");
    assert_eq!(
        err,
        PipelineError::Match(MatchError::TooLarge {
            comparisons: 12,
            limit: 10
        })
    );
}

#[test]
fn deadline_failure_returns_no_partial_result() {
    let cfg = PipelineConfig {
        matcher: MatchConfig {
            deadline_ms: Some(0),
            ..MatchConfig::default()
        },
        ..PipelineConfig::default()
    };
    let pipeline = Pipeline::new(&cfg).unwrap();
    let err = pipeline
        .analyze("plenty of words to compare here", &request(&["words"], 1))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "keyword matching failed: match deadline of 0ms exceeded"
    );
}

#[test]
fn empty_text_is_not_an_error() {
    let pipeline = Pipeline::new(&PipelineConfig::default()).unwrap();
    let analysis = pipeline.analyze("", &request(&["anything"], 3)).unwrap();
    assert!(analysis.keywords.is_empty());
    assert_eq!(analysis.clean_text, "");
}
