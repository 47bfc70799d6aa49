// src/services/resolution_service_tests.rs
//
// UNIT TESTS: Resolution Service Orchestration
//
// INVARIANTS TESTED:
// - First valid candidate wins and nothing after it is fetched
// - Search runs only after every generated pattern failed
// - Search results already tried are not fetched again
// - A failed fetch costs one candidate, not the resolution
// - Exhaustion is a None outcome, never a panic or an error

#[cfg(test)]
mod orchestration_tests {
    use std::sync::{Arc, Mutex};

    use crate::config::WikipediaConfig;
    use crate::domain::{
        AttemptOutcome, AttemptPhase, CrossReferenceFacts, FetchedArticle, MediaKind, MediaTitle,
    };
    use crate::error::AppError;
    use crate::integrations::wikipedia::client::MockArticleSource;
    use crate::services::resolution_service::ResolutionService;

    fn article(title: &str, extract: &str) -> FetchedArticle {
        FetchedArticle::new(
            title.to_string(),
            extract.to_string(),
            None,
            format!("https://en.wikipedia.org/wiki/{}", title.replace(' ', "_")),
        )
    }

    fn heat_article() -> FetchedArticle {
        article(
            "Heat",
            "Heat is a 1995 American crime film written and directed by Michael Mann.",
        )
    }

    fn heat() -> MediaTitle {
        MediaTitle::new("Heat", "1995", MediaKind::Movie).unwrap()
    }

    fn mann() -> CrossReferenceFacts {
        CrossReferenceFacts::new(Some("Michael Mann".to_string()), Vec::new())
    }

    /// Records every title passed to fetch_article, in order
    fn recording_source(
        calls: Arc<Mutex<Vec<String>>>,
        respond: impl Fn(&str) -> Option<FetchedArticle> + Send + 'static,
    ) -> MockArticleSource {
        let mut source = MockArticleSource::new();
        source.expect_fetch_article().returning(move |title| {
            calls.lock().unwrap().push(title.to_string());
            Ok(respond(title))
        });
        source
    }

    #[tokio::test]
    async fn test_first_valid_candidate_short_circuits() {
        let mut source = MockArticleSource::new();
        source
            .expect_fetch_article()
            .withf(|title| title == "Heat (1995 film)")
            .times(1)
            .returning(|_| Ok(Some(heat_article())));
        source.expect_search().times(0);

        let service = ResolutionService::new(Arc::new(source));
        let report = service.resolve(&heat(), &mann()).await;

        let matched = report.outcome.expect("Heat should resolve");
        assert_eq!(matched.url, "https://en.wikipedia.org/wiki/Heat");
        assert!((matched.confidence.score() - 0.85).abs() < 1e-9);
        assert_eq!(report.attempts.len(), 1);
        assert_eq!(report.attempts[0].phase, AttemptPhase::Direct);
    }

    #[tokio::test]
    async fn test_all_candidates_rejected_returns_none() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut source = recording_source(calls.clone(), |title| {
            Some(article(title, "Kill Bill is an album by the band Tarantula."))
        });
        source
            .expect_search()
            .withf(|query| query == "Kill Bill: Vol. 1 2003 film")
            .times(1)
            .returning(|_| {
                vec![
                    "kill bill: vol. 1".to_string(),
                    "Kill Bill (soundtrack)".to_string(),
                    "Kill Bill: The Whole Bloody Affair".to_string(),
                ]
            });

        let service = ResolutionService::new(Arc::new(source));
        let media = MediaTitle::new("Kill Bill: Vol. 1", "2003", MediaKind::Movie).unwrap();
        let mut expected = service.candidate_patterns(&media.title, &media.year, media.kind);
        assert!(expected.contains(&"Kill Bill: Vol. 1".to_string()));
        expected.push("Kill Bill (soundtrack)".to_string());
        expected.push("Kill Bill: The Whole Bloody Affair".to_string());

        let report = service.resolve(&media, &CrossReferenceFacts::default()).await;

        assert!(report.outcome.is_none());
        assert_eq!(*calls.lock().unwrap(), expected);
        assert_eq!(report.attempts.len(), expected.len());
        assert!(report
            .attempts
            .iter()
            .all(|a| matches!(a.outcome, AttemptOutcome::ObviouslyWrong { .. })));

        let searched: Vec<&str> = report
            .attempts
            .iter()
            .filter(|a| a.phase == AttemptPhase::Search)
            .map(|a| a.candidate.as_str())
            .collect();
        assert_eq!(
            searched,
            vec!["Kill Bill (soundtrack)", "Kill Bill: The Whole Bloody Affair"]
        );
    }

    #[tokio::test]
    async fn test_fetch_error_skips_only_that_candidate() {
        let mut source = MockArticleSource::new();
        source.expect_fetch_article().returning(|title| match title {
            "Heat (1995 film)" => Err(AppError::Other("connection reset".to_string())),
            "Heat" => Ok(Some(heat_article())),
            _ => Ok(None),
        });
        source.expect_search().times(0);

        let service = ResolutionService::new(Arc::new(source));
        let report = service.resolve(&heat(), &mann()).await;

        assert!(report.is_resolved());
        assert_eq!(report.attempts.len(), 2);
        assert!(matches!(
            report.attempts[0].outcome,
            AttemptOutcome::FetchFailed { .. }
        ));
        assert!(matches!(
            report.attempts[1].outcome,
            AttemptOutcome::Accepted { .. }
        ));
    }

    #[tokio::test]
    async fn test_search_skips_already_attempted_titles() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut source = recording_source(calls.clone(), |title| match title {
            "Heat (1995 American film)" => Some(heat_article()),
            _ => None,
        });
        source
            .expect_search()
            .withf(|query| query == "Heat 1995 film")
            .times(1)
            .returning(|_| vec!["HEAT".to_string(), "Heat (1995 American film)".to_string()]);

        let service = ResolutionService::new(Arc::new(source));
        let report = service.resolve(&heat(), &mann()).await;

        assert!(report.is_resolved());
        let calls = calls.lock().unwrap();
        assert_eq!(calls.iter().filter(|c| c.eq_ignore_ascii_case("heat")).count(), 1);
        assert_eq!(calls.last().map(String::as_str), Some("Heat (1995 American film)"));

        let last = report.attempts.last().unwrap();
        assert_eq!(last.phase, AttemptPhase::Search);
        assert_eq!(last.candidate, "Heat (1995 American film)");
    }

    #[tokio::test]
    async fn test_tv_year_specific_form_is_tried_first() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let source = recording_source(calls.clone(), |title| match title {
            "Dallas (1978 TV series)" => Some(article(
                "Dallas (1978 TV series)",
                "Dallas is an American prime time television series that aired on CBS from 1978 to 1991.",
            )),
            "Dallas" => Some(article("Dallas", "Dallas is a city in the U.S. state of Texas.")),
            _ => None,
        });

        let service = ResolutionService::new(Arc::new(source));
        let media = MediaTitle::new("Dallas", "1978", MediaKind::Tv).unwrap();
        let report = service.resolve(&media, &CrossReferenceFacts::default()).await;

        let matched = report.outcome.expect("Dallas should resolve");
        assert!(matched.url.ends_with("Dallas_(1978_TV_series)"));
        assert!((matched.confidence.score() - 0.78).abs() < 1e-9);
        assert_eq!(*calls.lock().unwrap(), vec!["Dallas (1978 TV series)".to_string()]);
    }

    #[tokio::test]
    async fn test_low_confidence_reasons_are_reported() {
        let mut source = MockArticleSource::new();
        source
            .expect_fetch_article()
            .returning(|title| Ok(Some(article(title, "Heat is a 1972 film by Paul Morrissey."))));
        source.expect_search().returning(|_| Vec::new());

        let service = ResolutionService::new(Arc::new(source));
        let report = service.resolve(&heat(), &mann()).await;

        assert!(report.outcome.is_none());
        assert_eq!(report.rejections().count(), report.attempts.len());
        match &report.attempts[1].outcome {
            AttemptOutcome::LowConfidence {
                confidence,
                reasons,
                ..
            } => {
                assert!((confidence.score() - 0.55).abs() < 1e-9);
                assert_eq!(reasons.len(), 5);
                assert!(reasons.iter().any(|r| r.starts_with("Year:")));
            }
            other => panic!("expected low confidence, got {}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_for_title_returns_bare_outcome() {
        let mut source = MockArticleSource::new();
        source
            .expect_fetch_article()
            .returning(|_| Ok(Some(heat_article())));

        let service = ResolutionService::new(Arc::new(source));
        let matched = service
            .fetch_for_title("  Heat ", "1995", MediaKind::Movie, &mann())
            .await;

        assert!(matched.is_some());
    }

    #[tokio::test]
    async fn test_custom_minimum_from_config() {
        let mut source = MockArticleSource::new();
        source
            .expect_fetch_article()
            .times(1)
            .returning(|title| Ok(Some(article(title, "Heat is a 1972 film by Paul Morrissey."))));
        source.expect_search().times(0);

        let config = WikipediaConfig {
            min_confidence: 0.5,
            ..WikipediaConfig::default()
        };
        let service = ResolutionService::from_config(Arc::new(source), &config);
        let report = service.resolve(&heat(), &mann()).await;

        assert!(report.is_resolved());
    }

    #[tokio::test]
    async fn test_extended_patterns_from_config() {
        let source = MockArticleSource::new();
        let config = WikipediaConfig {
            extended_patterns: true,
            ..WikipediaConfig::default()
        };
        let extended = ResolutionService::from_config(Arc::new(source), &config);
        let plain = ResolutionService::new(Arc::new(MockArticleSource::new()));

        let wide = extended.candidate_patterns("Bluey", "2018", MediaKind::Tv);
        let narrow = plain.candidate_patterns("Bluey", "2018", MediaKind::Tv);

        assert!(wide.len() > narrow.len());
        assert!(wide.contains(&"Bluey (Australian TV series)".to_string()));
        assert!(!narrow.contains(&"Bluey (Australian TV series)".to_string()));
    }

    #[tokio::test]
    async fn test_resolve_many_keeps_input_order() {
        let mut source = MockArticleSource::new();
        source.expect_fetch_article().returning(|title| {
            if title.starts_with("Heat") {
                Ok(Some(heat_article()))
            } else {
                Ok(None)
            }
        });
        source.expect_search().returning(|_| Vec::new());

        let service = ResolutionService::new(Arc::new(source));
        let items = vec![
            (heat(), mann()),
            (
                MediaTitle::new("Nonexistent Picture", "2001", MediaKind::Movie).unwrap(),
                CrossReferenceFacts::default(),
            ),
        ];

        let results = service.resolve_many(&items).await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0.title, "Heat");
        assert!(results[0].1.is_some());
        assert_eq!(results[1].0.title, "Nonexistent Picture");
        assert!(results[1].1.is_none());
    }
}
