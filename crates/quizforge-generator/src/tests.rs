//! Integration tests for the Pipeline

#[cfg(test)]
mod tests {
    use crate::{demo_questions, GenerationClient, GenerationError, Pipeline};
    use quizforge_content::SourceFile;
    use quizforge_domain::{ProfileData, QuestionType, QuizSettings};
    use quizforge_llm::MockProvider;
    use std::time::Duration;

    const MCQ_REPLY: &str = r#"[
        {"text": "Which city is the capital of France?", "options": ["Lyon", "Paris", "Nice", "Lille"], "answer": "Paris"}
    ]"#;
    const TF_REPLY: &str = r#"[{"text": "Paris is in France.", "answer": "true"}]"#;
    const FIB_REPLY: &str = r#"[{"text": "Paris is the capital of _______.", "answer": "France"}]"#;
    const SA_REPLY: &str = r#"[{"text": "Describe Paris.", "answer": "Capital of France"}]"#;

    fn text_file() -> SourceFile {
        SourceFile::new(
            "notes.txt",
            "text/plain",
            b"Paris is the capital of France.".to_vec(),
        )
    }

    fn scripted_provider() -> MockProvider {
        let mut provider = MockProvider::new("not json");
        provider.add_response("Generate multiple choice questions", MCQ_REPLY);
        provider.add_response("Generate true/false questions", TF_REPLY);
        provider.add_response("Generate fill in the blanks questions", FIB_REPLY);
        provider.add_response("Generate short answer questions", SA_REPLY);
        provider
    }

    #[tokio::test]
    async fn test_offline_serves_demo_without_reading() {
        let pipeline = Pipeline::offline();
        let settings = QuizSettings::with_types([QuestionType::Mcq]);

        let batch = pipeline
            .process(&text_file(), None, &[QuestionType::Mcq], &settings)
            .await
            .unwrap();

        let mcq = batch.get(QuestionType::Mcq).unwrap();
        assert_eq!(mcq.len(), 3);
        assert_eq!(mcq[0].text(), "What is the capital of France?");
        assert_eq!(mcq[0].answer(), Some("Paris"));
        assert_eq!(batch.len(), 4);
    }

    #[tokio::test]
    async fn test_offline_ignores_broken_document() {
        let pipeline = Pipeline::offline();
        let settings = QuizSettings::default();
        let broken = SourceFile::new("broken.pdf", "application/pdf", b"garbage".to_vec());

        let result = pipeline
            .process(&broken, None, &[QuestionType::Mcq], &settings)
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_key_set_equals_requested_types() {
        let provider = scripted_provider();
        let pipeline = Pipeline::online(GenerationClient::new(provider.clone()));

        let requested = [
            vec![QuestionType::Mcq],
            vec![QuestionType::TrueFalse, QuestionType::ShortAnswer],
            QuestionType::ALL.to_vec(),
        ];

        for types in requested {
            let settings = QuizSettings::with_types(types.clone());
            let batch = pipeline
                .process(&text_file(), None, &types, &settings)
                .await
                .unwrap();

            let mut expected = types.clone();
            expected.sort();
            assert_eq!(batch.types(), expected);
        }
    }

    #[tokio::test]
    async fn test_live_results_are_used() {
        let pipeline = Pipeline::online(GenerationClient::new(scripted_provider()));
        let types = [QuestionType::Mcq, QuestionType::FillInBlanks];
        let settings = QuizSettings::with_types(types);

        let batch = pipeline
            .process(&text_file(), None, &types, &settings)
            .await
            .unwrap();

        let mcq = batch.get(QuestionType::Mcq).unwrap();
        assert_eq!(mcq.len(), 1);
        assert_eq!(mcq[0].text(), "Which city is the capital of France?");
        assert_eq!(
            batch.get(QuestionType::FillInBlanks).unwrap()[0].answer(),
            Some("France")
        );
    }

    #[tokio::test]
    async fn test_failed_type_gets_demo_content() {
        let mut provider = MockProvider::new("not json");
        provider.add_response("Generate multiple choice questions", MCQ_REPLY);
        provider.add_error("Generate true/false questions");
        let pipeline = Pipeline::online(GenerationClient::new(provider));

        let types = [QuestionType::Mcq, QuestionType::TrueFalse];
        let settings = QuizSettings::with_types(types);
        let batch = pipeline
            .process(&text_file(), None, &types, &settings)
            .await
            .unwrap();

        assert_eq!(
            batch.get(QuestionType::Mcq).unwrap()[0].text(),
            "Which city is the capital of France?"
        );
        let tf = batch.get(QuestionType::TrueFalse).unwrap();
        assert_eq!(tf.len(), 2);
        assert_eq!(tf, demo_questions(QuestionType::TrueFalse).as_slice());
    }

    #[tokio::test]
    async fn test_malformed_reply_gets_demo_content() {
        // Default reply "not json" covers short answer
        let mut provider = MockProvider::new("not json");
        provider.add_response("Generate fill in the blanks questions", r#"{"oops": 1}"#);
        let pipeline = Pipeline::online(GenerationClient::new(provider));

        let types = [QuestionType::ShortAnswer, QuestionType::FillInBlanks];
        let settings = QuizSettings::with_types(types);
        let batch = pipeline
            .process(&text_file(), None, &types, &settings)
            .await
            .unwrap();

        assert_eq!(
            batch.get(QuestionType::ShortAnswer).unwrap(),
            demo_questions(QuestionType::ShortAnswer).as_slice()
        );
        assert_eq!(
            batch.get(QuestionType::FillInBlanks).unwrap(),
            demo_questions(QuestionType::FillInBlanks).as_slice()
        );
    }

    #[tokio::test]
    async fn test_generations_run_concurrently() {
        let provider = scripted_provider().with_delay(Duration::from_millis(100));
        let pipeline = Pipeline::online(GenerationClient::new(provider.clone()));

        let types = QuestionType::ALL;
        let settings = QuizSettings::with_types(types);
        pipeline
            .process(&text_file(), None, &types, &settings)
            .await
            .unwrap();

        assert_eq!(provider.call_count(), 4);
        assert_eq!(provider.max_in_flight(), 4);
    }

    #[tokio::test]
    async fn test_timeout_substitutes_demo_content() {
        let provider = scripted_provider().with_delay(Duration::from_millis(500));
        let pipeline = Pipeline::online(GenerationClient::new(provider))
            .with_generation_timeout(Duration::from_millis(20));

        let types = [QuestionType::TrueFalse];
        let settings = QuizSettings::with_types(types);
        let batch = pipeline
            .process(&text_file(), None, &types, &settings)
            .await
            .unwrap();

        assert_eq!(
            batch.get(QuestionType::TrueFalse).unwrap(),
            demo_questions(QuestionType::TrueFalse).as_slice()
        );
    }

    #[tokio::test]
    async fn test_extraction_failure_is_total() {
        let provider = scripted_provider();
        let pipeline = Pipeline::online(GenerationClient::new(provider.clone()));
        let broken = SourceFile::new("broken.pdf", "application/pdf", b"garbage".to_vec());
        let settings = QuizSettings::default();

        let result = pipeline
            .process(&broken, None, &[QuestionType::Mcq], &settings)
            .await;

        assert!(matches!(result, Err(GenerationError::Extraction(_))));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_types_generate_once() {
        let provider = scripted_provider();
        let pipeline = Pipeline::online(GenerationClient::new(provider.clone()));
        let types = [QuestionType::Mcq, QuestionType::Mcq];
        let settings = QuizSettings::with_types(types);

        let batch = pipeline
            .process(&text_file(), None, &types, &settings)
            .await
            .unwrap();

        assert_eq!(batch.len(), 1);
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_profile_reaches_prompt() {
        let mut provider = MockProvider::new("[]");
        provider.add_response("- Profession: Botanist", TF_REPLY);
        let pipeline = Pipeline::online(GenerationClient::new(provider));

        let profile = ProfileData {
            profession: Some("Botanist".to_string()),
            ..ProfileData::default()
        };
        let types = [QuestionType::TrueFalse];
        let settings = QuizSettings::with_types(types);
        let batch = pipeline
            .process(&text_file(), Some(&profile), &types, &settings)
            .await
            .unwrap();

        assert_eq!(batch.get(QuestionType::TrueFalse).unwrap().len(), 1);
    }
}
