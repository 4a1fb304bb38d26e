use assessment_pdf::{
    distribution, render, render_json, CognitiveLevel, CorrectAnswer, Difficulty,
    DocumentVariant, ExamMetadata, Language, Question, QuestionType, RenderError, RenderOptions,
    Renderer, Variant,
};
use proptest::prelude::*;

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("assessment_pdf=debug")
        .with_test_writer()
        .try_init();
}

fn metadata() -> ExamMetadata {
    ExamMetadata {
        institute: Some("Greenfield Public School".into()),
        exam_title: Some("Half Yearly Examination".into()),
        exam_date: Some("2024-09-20".into()),
        teacher_name: Some("R. Sharma".into()),
        ..ExamMetadata::new("Science", "9", "CBSE")
    }
}

fn mcq(n: usize, section: &str) -> Question {
    Question {
        id: format!("q{n}"),
        text: format!("Multiple choice question number {n}"),
        kind: QuestionType::MultipleChoice,
        options: vec![
            format!("first option {n}"),
            format!("second option {n}"),
            format!("third option {n}"),
            format!("fourth option {n}"),
        ],
        answer: Some(CorrectAnswer::Index(n % 4)),
        solution: Some(format!("Worked solution {n}")),
        marks: Some(1 + (n as u32 % 3)),
        section: Some(section.to_string()),
        ..Question::default()
    }
}

fn seven_questions() -> Vec<Question> {
    ["A", "A", "A", "B", "B", "B", "B"]
        .iter()
        .enumerate()
        .map(|(i, section)| mcq(i + 1, section))
        .collect()
}

#[test]
fn teacher_paper_for_seven_questions() {
    init_logging();
    let questions = seven_questions();
    let options = RenderOptions {
        include_cognitive_level: Some(true),
        ..RenderOptions::default()
    };
    let document = Renderer::new(options)
        .assemble(&questions, &metadata(), Variant::Teacher.into())
        .unwrap();

    // cover, instructions, at least one question page, summary
    assert!(document.page_count() >= 4);
    let total = document.page_count();
    for (i, page) in document.pages().enumerate() {
        assert!(page.contains_text(&format!("Page {} of {total}", i + 1)));
    }

    let text = document.text();
    let section_a = text.find("SECTION A").unwrap();
    let section_b = text.find("SECTION B").unwrap();
    assert!(section_a < section_b);
    let numbers = |from: usize, to: usize| -> Vec<String> {
        text[from..to]
            .lines()
            .filter(|l| l.starts_with('Q') && l.contains("marks)"))
            .map(|l| l.split('.').next().unwrap_or_default().to_string())
            .collect()
    };
    let summary = text.find("Answer Key Summary").unwrap();
    assert_eq!(numbers(section_a, section_b), vec!["Q1", "Q2", "Q3"]);
    assert_eq!(numbers(section_b, summary), vec!["Q1", "Q2", "Q3", "Q4"]);

    let summary_page = document.page(total - 1).unwrap().text();
    let answers: Vec<&str> = summary_page
        .lines()
        .filter(|l| l.starts_with('Q'))
        .collect();
    assert_eq!(answers.len(), 7);
    assert_eq!(answers[0], "Q1. B. second option 1");
    assert_eq!(answers[3], "Q1. A. first option 4");
    assert!(summary_page.find("Section A:").unwrap() < summary_page.find("Section B:").unwrap());
}

#[test]
fn student_paper_hides_solutions_and_answers() {
    let questions = seven_questions();
    let options = RenderOptions {
        include_cognitive_level: Some(true),
        show_difficulty_badges: Some(false),
        ..RenderOptions::default()
    };
    let document = Renderer::new(options)
        .assemble(&questions, &metadata(), Variant::Student.into())
        .unwrap();
    let text = document.text();
    for question in &questions {
        assert!(text.contains(&question.text));
        assert!(!text.contains(question.solution.as_deref().unwrap()));
    }
    assert!(!text.contains("Solution:"));
    assert!(!text.contains("Answer:"));
    assert!(!text.contains("Cognitive:"));
    assert!(!text.contains("Answer Key Summary"));
}

#[test]
fn teacher_paper_shows_every_solution() {
    let questions = seven_questions();
    let document = Renderer::default()
        .assemble(&questions, &metadata(), Variant::Teacher.into())
        .unwrap();
    let text = document.text();
    for question in &questions {
        assert!(text.contains(question.solution.as_deref().unwrap()));
        let answer = format!("Answer: {}", question.answer_text().unwrap());
        assert!(text.contains(&answer), "missing {answer}");
    }
}

#[test]
fn cover_total_marks_counts_missing_marks_as_one() {
    let mut questions = seven_questions();
    questions[2].marks = None;
    questions[5].marks = Some(0);
    let expected: u32 = questions.iter().map(|q| q.marks.unwrap_or(1)).sum();
    for variant in ["student", "teacher", "answer-key", "cognitive-report"] {
        let variant: DocumentVariant = variant.parse().unwrap();
        let document = Renderer::default()
            .assemble(&questions, &metadata(), variant)
            .unwrap();
        let cover = document.page(0).unwrap();
        assert!(cover.contains_text(&format!("Total Marks: {expected} | Time: 3 hours")));
    }
}

#[test]
fn empty_input_still_renders_a_document() {
    for variant in [
        "student",
        "teacher",
        "answer-key",
        "cognitive-report",
        "bilingual",
        "compact",
    ] {
        let bytes = render(&[], &metadata(), variant, &RenderOptions::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(bytes.len() > 200);
    }
}

#[test]
fn empty_teacher_paper_keeps_its_fixed_pages() {
    let document = Renderer::default()
        .assemble(&[], &metadata(), Variant::Teacher.into())
        .unwrap();
    // cover, instructions, (empty) question page and summary
    assert_eq!(document.page_count(), 4);
    assert!(document.page(0).unwrap().contains_text("Total Marks: 0"));
}

#[test]
fn over_wide_word_is_kept_whole() {
    let word = "Pneumonoultramicroscopicsilicovolcanoconiosis".repeat(3);
    let question = Question {
        text: word.clone(),
        ..Question::default()
    };
    let document = Renderer::default()
        .assemble(&[question], &metadata(), Variant::Student.into())
        .unwrap();
    let lines: Vec<String> = document
        .pages()
        .flat_map(|p| p.spans().map(|s| s.text.clone()))
        .filter(|t| t.contains("Pneumono"))
        .collect();
    assert_eq!(lines, vec![word]);
}

#[test]
fn unknown_variant_is_a_configuration_error() {
    let err = render(&[], &metadata(), "principal", &RenderOptions::default()).unwrap_err();
    assert!(matches!(err, RenderError::UnknownVariant(_)));
    assert!(err.is_configuration());

    let err = render(&[], &metadata(), "answer-key+bilingual", &RenderOptions::default())
        .unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn hindi_without_fonts_uses_english_labels() {
    init_logging();
    let bytes = render_json(
        "[]",
        r#"{"subject": "Hindi", "classNum": "6", "board": "UP"}"#,
        "student",
        r#"{"language": "hindi"}"#,
    )
    .unwrap();
    assert!(bytes.starts_with(b"%PDF-"));

    let options = RenderOptions {
        language: Some(Language::Hindi),
        ..RenderOptions::default()
    };
    let document = Renderer::new(options)
        .assemble(&seven_questions(), &metadata(), Variant::Student.into())
        .unwrap();
    let total = document.page_count();
    assert!(document.page(0).unwrap().contains_text(&format!("Page 1 of {total}")));
    assert!(document.text().contains("SECTION A"));
}

#[test]
fn malformed_question_fields_do_not_abort_the_paper() {
    init_logging();
    let questions = r#"[
        {"text": "Explain inertia.", "type": "short", "options": null},
        {"text": "Pick the unit of force.", "type": "mcq", "options": ["newton", "joule"], "answer": -1},
        {"text": null, "type": "mcq", "options": "newton", "answer": {"index": 0}, "marks": "two"}
    ]"#;
    let meta = r#"{"subject": "Physics", "classNum": "9", "board": "CBSE"}"#;
    for variant in ["student", "teacher", "answer-key", "cognitive-report"] {
        let bytes = render_json(questions, meta, variant, "{}").unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    let questions: Vec<Question> = serde_json::from_str(questions).unwrap();
    let document = Renderer::default()
        .assemble(&questions, &metadata(), Variant::Teacher.into())
        .unwrap();
    assert!(document.page(0).unwrap().contains_text("Total Marks: 3 | Time: 3 hours"));
    let text = document.text();
    assert!(text.contains("Options not provided"));
    assert!(text.contains(
        "Section A:\nQ1. No answer provided\nQ2. No answer provided\nQ3. No answer provided"
    ));
}

#[test]
fn section_labels_are_sanitized_on_every_page() {
    let questions = vec![mcq(1, "A→B")];
    let teacher = Renderer::default()
        .assemble(&questions, &metadata(), Variant::Teacher.into())
        .unwrap()
        .text();
    assert!(teacher.contains("SECTION A->B"));
    assert!(teacher.contains("Section A->B:"));
    assert!(!teacher.contains('→'));

    let key = Renderer::default()
        .assemble(&questions, &metadata(), Variant::AnswerKey.into())
        .unwrap()
        .text();
    assert!(key.contains("Section A->B:"));
    assert!(!key.contains('→'));
}

#[test]
fn renders_from_question_bank_json() {
    let questions = r#"[
        {"id": "1", "stem": "Speed of light?", "type": "MCQ", "options": ["3e8 m/s", "3e5 m/s"], "correctAnswer": 0, "marks": 2, "cognitive": "recall"},
        {"id": "2", "text": "Explain refraction → bending of light.", "section": "B", "explanation": "Light changes speed."}
    ]"#;
    let metadata = r#"{"subject": "Physics", "classNum": "10", "board": "CBSE", "timeLimit": "90 minutes"}"#;
    let bytes = render_json(questions, metadata, "teacher", r#"{"showTopicTags": false}"#).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));

    let err = render_json("{", metadata, "teacher", "{}").unwrap_err();
    assert!(matches!(err, RenderError::InvalidInput(_)));
    assert!(!err.is_configuration());

    let err = render_json(questions, metadata, "teacher", r#"{"fontSize": 12}"#).unwrap_err();
    assert!(matches!(err, RenderError::InvalidOptions(_)));
}

#[test]
fn output_is_deterministic_without_a_creation_date() {
    let questions = seven_questions();
    let options = RenderOptions {
        watermark_text: Some("DRAFT".into()),
        ..RenderOptions::default()
    };
    let first = render(&questions, &metadata(), "teacher+compact", &options).unwrap();
    let second = render(&questions, &metadata(), "teacher+compact", &options).unwrap();
    assert_eq!(first, second);
}

#[test]
fn report_percentages_cover_every_question() {
    let questions: Vec<Question> = seven_questions()
        .into_iter()
        .zip([
            CognitiveLevel::Recall,
            CognitiveLevel::Apply,
            CognitiveLevel::Apply,
            CognitiveLevel::Analyze,
            CognitiveLevel::Understand,
            CognitiveLevel::Recall,
            CognitiveLevel::Apply,
        ])
        .map(|(q, cognitive)| Question { cognitive, ..q })
        .collect();
    let document = Renderer::default()
        .assemble(&questions, &metadata(), Variant::CognitiveReport.into())
        .unwrap();
    let text = document.text();
    assert!(text.contains("RECALL: 2 questions (28.6%)"));
    assert!(text.contains("APPLY: 3 questions (42.9%)"));
    assert!(text.contains("ANALYZE: 1 questions (14.3%)"));
    assert!(text.contains("MEDIUM: 7 questions (100.0%)"));
    assert!(!text.contains("SECTION A"));
}

fn any_question() -> impl Strategy<Value = Question> {
    (
        "[A-C]",
        0u32..6,
        prop_oneof![
            Just("recall"),
            Just("understand"),
            Just("apply"),
            Just("analyze"),
            Just("bogus")
        ],
        prop_oneof![Just("easy"), Just("medium"), Just("hard")],
        proptest::option::of("zs[a-z]{6}"),
        proptest::option::of("za[a-z]{6}"),
    )
        .prop_map(
            |(section, marks, cognitive, difficulty, solution, answer)| Question {
                text: "Describe the experiment.".into(),
                marks: Some(marks),
                section: Some(section),
                cognitive: CognitiveLevel::from(Some(cognitive.to_string())),
                difficulty: Difficulty::from(Some(difficulty.to_string())),
                solution,
                answer: answer.map(CorrectAnswer::Text),
                ..Question::default()
            },
        )
}

/// `(section, "Q{n}")` pairs in reading order. `heading` recognises a line
/// that starts a new section and returns its label.
fn question_labels(text: &str, heading: impl Fn(&str) -> Option<String>) -> Vec<(String, String)> {
    let mut section = String::new();
    let mut labels = Vec::new();
    for line in text.lines() {
        if let Some(label) = heading(line) {
            section = label;
        } else if line.starts_with('Q') && line[1..].starts_with(|c: char| c.is_ascii_digit()) {
            let number = line.split('.').next().unwrap_or_default();
            labels.push((section.clone(), number.to_string()));
        }
    }
    labels
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn numbering_is_identical_across_variants(questions in proptest::collection::vec(any_question(), 0..25)) {
        let headings = |variant: Variant| -> Vec<String> {
            let document = Renderer::default()
                .assemble(&questions, &metadata(), variant.into())
                .unwrap();
            let text = document.text();
            let body = &text[..text.find("Answer Key Summary").unwrap_or(text.len())];
            let headings: Vec<String> = body
                .lines()
                .filter(|l| l.starts_with("SECTION ") || l.starts_with('Q'))
                .map(|l| l.split(" (").next().unwrap_or_default().to_string())
                .collect();
            headings
        };
        prop_assert_eq!(headings(Variant::Student), headings(Variant::Teacher));
    }

    #[test]
    fn student_papers_never_show_solutions_or_answers(questions in proptest::collection::vec(any_question(), 0..25)) {
        let text = Renderer::default()
            .assemble(&questions, &metadata(), Variant::Student.into())
            .unwrap()
            .text();
        for question in &questions {
            if let Some(solution) = &question.solution {
                prop_assert!(!text.contains(solution.as_str()));
            }
            if let Some(answer) = question.answer_text() {
                prop_assert!(!text.contains(&answer));
            }
        }
    }

    #[test]
    fn teacher_papers_show_every_solution(questions in proptest::collection::vec(any_question(), 0..25)) {
        let text = Renderer::default()
            .assemble(&questions, &metadata(), Variant::Teacher.into())
            .unwrap()
            .text();
        for question in &questions {
            if let Some(solution) = question.solution_text() {
                prop_assert!(text.contains(&solution));
            }
            if let Some(answer) = question.answer_text() {
                let line = format!("Answer: {answer}");
                prop_assert!(text.contains(&line));
            }
        }
    }

    #[test]
    fn summary_numbering_matches_question_pages(questions in proptest::collection::vec(any_question(), 0..25)) {
        let text = Renderer::default()
            .assemble(&questions, &metadata(), Variant::Teacher.into())
            .unwrap()
            .text();
        let summary = text.find("Answer Key Summary").unwrap();
        let body_start = text.find("SECTION ").unwrap_or(summary).min(summary);
        let body = question_labels(&text[body_start..summary], |l| {
            l.strip_prefix("SECTION ").map(str::to_string)
        });
        let listed = question_labels(&text[summary..], |l| {
            l.strip_prefix("Section ")
                .and_then(|l| l.strip_suffix(':'))
                .map(str::to_string)
        });
        prop_assert_eq!(body.len(), questions.len());
        prop_assert_eq!(body, listed);
    }

    #[test]
    fn percentages_total_one_hundred(questions in proptest::collection::vec(any_question(), 0..40)) {
        let cognitive = distribution::<CognitiveLevel>(&questions);
        let difficulty = distribution::<Difficulty>(&questions);
        let sum = |d: Vec<f32>| d.into_iter().sum::<f32>();
        let c = sum(cognitive.iter().map(|s| s.percent).collect());
        let d = sum(difficulty.iter().map(|s| s.percent).collect());
        if questions.is_empty() {
            prop_assert_eq!(c, 0.0);
            prop_assert_eq!(d, 0.0);
        } else {
            prop_assert!((c - 100.0).abs() < 0.01);
            prop_assert!((d - 100.0).abs() < 0.01);
        }
    }
}
