//! Interactive quiz flow, one stage at a time.

use crate::error::{CliError, Result};
use crate::output::Formatter;
use quizforge_content::SourceFile;
use quizforge_domain::{ProfileData, Question, QuestionKind, QuestionType, QuizSettings, Stage};
use quizforge_session::{Event, GenerationStatus, QuizSession};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::Write;
use tracing::debug;

/// Source of user input lines.
///
/// `Ok(None)` means the user left (Ctrl-C or end of input).
pub trait Prompter {
    /// Show `prompt` and read one line.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// Terminal input backed by rustyline.
pub struct EditorPrompter {
    editor: DefaultEditor,
}

impl EditorPrompter {
    /// Create a line editor on the current terminal.
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new()
            .map_err(|e| CliError::Editor(format!("Failed to initialize editor: {}", e)))?;
        Ok(Self { editor })
    }
}

impl Prompter for EditorPrompter {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.editor.add_history_entry(line.as_str()).ok();
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(CliError::Editor(err.to_string())),
        }
    }
}

/// Choices made before the session starts.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Settings submitted at the quiz settings stage
    pub settings: QuizSettings,

    /// Submit an empty profile instead of asking
    pub skip_profile: bool,
}

enum Next {
    Retry,
    NewTest,
    Quit,
}

/// Drive a session from upload to results for `file`.
///
/// Returns `Ok(())` when the user quits. A run whose generation fails
/// returns the session to upload and reports [`CliError::GenerationFailed`].
pub async fn run<P: Prompter, W: Write>(
    session: &mut QuizSession,
    file: SourceFile,
    options: &RunOptions,
    prompter: &mut P,
    out: &mut W,
    formatter: &Formatter,
) -> Result<()> {
    loop {
        writeln!(out, "{}", formatter.stage_header(Stage::Upload))?;
        session.handle(Event::FileSelected(file.clone())).await?;
        writeln!(
            out,
            "{}",
            formatter.success(&format!("Loaded {} ({} bytes)", file.name(), file.size()))
        )?;

        writeln!(out, "\n{}", formatter.stage_header(Stage::Profile))?;
        let profile = if options.skip_profile {
            ProfileData::default()
        } else {
            match read_profile(prompter)? {
                Some(profile) => profile,
                None => return quit(out, formatter),
            }
        };
        session.handle(Event::ProfileSubmitted(profile)).await?;

        writeln!(out, "\n{}", formatter.stage_header(Stage::QuizSettings))?;
        writeln!(out, "{}", describe_settings(&options.settings))?;
        if session.pipeline().is_offline() {
            writeln!(
                out,
                "{}",
                formatter.warning("No API key configured, using demonstration questions")
            )?;
        }
        if session.begin_generation(options.settings.clone())?.is_loading() {
            writeln!(out, "{}", formatter.info("Generating questions..."))?;
        }

        let state = session.finish_generation().await?;
        if let GenerationStatus::Failed(message) = state.status().clone() {
            writeln!(out, "{}", formatter.error(&message))?;
            session.handle(Event::ReturnToUpload).await?;
            return Err(CliError::GenerationFailed(message));
        }

        loop {
            writeln!(out, "\n{}", formatter.stage_header(Stage::Questions))?;
            if !choose_type(session, prompter, out, formatter).await? {
                return quit(out, formatter);
            }
            if !answer_questions(session, prompter, out, formatter).await? {
                return quit(out, formatter);
            }

            let state = session.handle(Event::QuizSubmitted).await?;
            writeln!(out, "\n{}", formatter.stage_header(Stage::Results))?;
            writeln!(out, "{}", formatter.review_table(state.answered()))?;
            if let Some(report) = state.report() {
                writeln!(out, "{}", formatter.score_summary(&report))?;
            }

            match read_next(prompter, out, formatter)? {
                Next::Retry => {
                    session.handle(Event::RetryRequested).await?;
                }
                Next::NewTest => {
                    session.handle(Event::NewTestRequested).await?;
                    break;
                }
                Next::Quit => return quit(out, formatter),
            }
        }
    }
}

fn quit<W: Write>(out: &mut W, formatter: &Formatter) -> Result<()> {
    writeln!(out, "{}", formatter.info("Goodbye!"))?;
    Ok(())
}

/// Ask for each profile field; blank answers stay unset.
fn read_profile<P: Prompter>(prompter: &mut P) -> Result<Option<ProfileData>> {
    let mut fields: [Option<String>; 4] = Default::default();
    let labels = ["Name", "Profession", "Education Level", "Subject Area"];

    for (field, label) in fields.iter_mut().zip(labels) {
        let Some(line) = prompter.read_line(&format!("{} (optional): ", label))? else {
            return Ok(None);
        };
        let line = line.trim();
        *field = (!line.is_empty()).then(|| line.to_string());
    }

    let [name, profession, education_level, subject] = fields;
    Ok(Some(ProfileData {
        name,
        profession,
        education_level,
        subject,
    }))
}

fn describe_settings(settings: &QuizSettings) -> String {
    let types: Vec<&str> = settings
        .requested_types()
        .iter()
        .map(QuestionType::label)
        .collect();
    let mut out = format!(
        "{} question(s) per type, {} difficulty: {}",
        settings.number_of_questions,
        settings.difficulty_level,
        types.join(", ")
    );
    if let Some(custom) = settings.custom_instructions() {
        out.push_str(&format!("\nInstructions: {}", custom));
    }
    out
}

/// Offer the other generated types; `false` when the user left.
async fn choose_type<P: Prompter, W: Write>(
    session: &mut QuizSession,
    prompter: &mut P,
    out: &mut W,
    formatter: &Formatter,
) -> Result<bool> {
    let available = session.state().available_types();
    if available.len() < 2 {
        return Ok(true);
    }
    let active = session.state().active_type();

    writeln!(out, "Question types:")?;
    for (idx, question_type) in available.iter().enumerate() {
        let marker = if Some(*question_type) == active { "*" } else { " " };
        writeln!(out, " {} {}. {}", marker, idx + 1, question_type.label())?;
    }

    loop {
        let prompt = format!("Type [1-{}, enter to keep current]: ", available.len());
        let Some(line) = prompter.read_line(&prompt)? else {
            return Ok(false);
        };
        let line = line.trim();
        if line.is_empty() {
            return Ok(true);
        }

        match pick(line, available.len()).map(|idx| available[idx]) {
            Some(question_type) => {
                if Some(question_type) != active {
                    session.handle(Event::TypeSwitched(question_type)).await?;
                }
                return Ok(true);
            }
            None => writeln!(out, "{}", formatter.warning("Enter one of the listed numbers"))?,
        }
    }
}

/// Walk the active questions; `false` when the user left.
async fn answer_questions<P: Prompter, W: Write>(
    session: &mut QuizSession,
    prompter: &mut P,
    out: &mut W,
    formatter: &Formatter,
) -> Result<bool> {
    let questions = session.state().questions().to_vec();
    if let Some(active) = session.state().active_type() {
        writeln!(out, "{}", formatter.info(active.label()))?;
    }

    for (idx, question) in questions.iter().enumerate() {
        writeln!(out, "\n{}", formatter.question(idx + 1, questions.len(), question))?;
        let Some(line) = prompter.read_line(answer_prompt(question))? else {
            return Ok(false);
        };

        let Some(answer) = interpret_answer(question, &line) else {
            debug!(question = question.id(), "Question skipped");
            continue;
        };
        session
            .handle(Event::AnswerChanged {
                question_id: question.id().to_string(),
                answer,
            })
            .await?;
    }

    Ok(true)
}

fn read_next<P: Prompter, W: Write>(
    prompter: &mut P,
    out: &mut W,
    formatter: &Formatter,
) -> Result<Next> {
    loop {
        let Some(line) = prompter.read_line("[r]etry, [n]ew test or [q]uit: ")? else {
            return Ok(Next::Quit);
        };
        match line.trim().to_lowercase().as_str() {
            "r" | "retry" => return Ok(Next::Retry),
            "n" | "new" => return Ok(Next::NewTest),
            "q" | "quit" | "exit" => return Ok(Next::Quit),
            _ => writeln!(out, "{}", formatter.warning("Please answer r, n or q"))?,
        }
    }
}

fn answer_prompt(question: &Question) -> &'static str {
    match question.kind() {
        QuestionKind::MultipleChoice { .. } => "Answer (number or text, enter to skip): ",
        QuestionKind::TrueFalse => "Answer [t/f, enter to skip]: ",
        QuestionKind::FillInBlanks | QuestionKind::ShortAnswer => "Answer (enter to skip): ",
    }
}

/// Zero-based index for a 1-based choice in `1..=len`.
fn pick(input: &str, len: usize) -> Option<usize> {
    input
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=len).contains(n))
        .map(|n| n - 1)
}

/// Turn a typed line into the stored answer; `None` skips the question.
///
/// Option numbers map to the option text and t/f to `true`/`false`.
fn interpret_answer(question: &Question, input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let answer = match question.kind() {
        QuestionKind::MultipleChoice { options } => pick(input, options.len())
            .map(|idx| options[idx].clone())
            .unwrap_or_else(|| input.to_string()),
        QuestionKind::TrueFalse => match input.to_lowercase().as_str() {
            "t" | "true" => "true".to_string(),
            "f" | "false" => "false".to_string(),
            _ => input.to_string(),
        },
        QuestionKind::FillInBlanks | QuestionKind::ShortAnswer => input.to_string(),
    };
    Some(answer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizforge_domain::Difficulty;
    use quizforge_generator::{GenerationClient, Pipeline};
    use quizforge_llm::MockProvider;
    use std::collections::VecDeque;

    struct ScriptedPrompter {
        lines: VecDeque<String>,
        prompts: Vec<String>,
    }

    impl ScriptedPrompter {
        fn new(lines: &[&str]) -> Self {
            Self {
                lines: lines.iter().map(|l| l.to_string()).collect(),
                prompts: Vec::new(),
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
            self.prompts.push(prompt.to_string());
            Ok(self.lines.pop_front())
        }
    }

    fn text_file() -> SourceFile {
        SourceFile::new("notes.txt", "text/plain", b"Paris is the capital of France.".to_vec())
    }

    fn options(types: &[QuestionType]) -> RunOptions {
        RunOptions {
            settings: QuizSettings::with_types(types.iter().copied()),
            skip_profile: true,
        }
    }

    async fn drive(
        session: &mut QuizSession,
        options: &RunOptions,
        script: &[&str],
    ) -> (Result<()>, String, ScriptedPrompter) {
        let mut prompter = ScriptedPrompter::new(script);
        let mut out = Vec::new();
        let formatter = Formatter::new(false);
        let result = run(session, text_file(), options, &mut prompter, &mut out, &formatter).await;
        (result, String::from_utf8(out).unwrap(), prompter)
    }

    fn mcq(options: &[&str], answer: &str) -> Question {
        Question::new(
            "1",
            QuestionType::Mcq,
            "Pick",
            Some(options.iter().map(|o| o.to_string()).collect()),
            Some(answer.to_string()),
        )
        .unwrap()
    }

    #[test]
    fn test_interpret_mcq_answer() {
        let question = mcq(&["London", "Paris"], "Paris");
        assert_eq!(interpret_answer(&question, "2").as_deref(), Some("Paris"));
        assert_eq!(interpret_answer(&question, " Paris ").as_deref(), Some("Paris"));
        assert_eq!(interpret_answer(&question, "3").as_deref(), Some("3"));
        assert_eq!(interpret_answer(&question, "   "), None);
    }

    #[test]
    fn test_interpret_true_false_answer() {
        let question =
            Question::new("1", QuestionType::TrueFalse, "S", None, Some("true".into())).unwrap();
        assert_eq!(interpret_answer(&question, "T").as_deref(), Some("true"));
        assert_eq!(interpret_answer(&question, "false").as_deref(), Some("false"));
        assert_eq!(interpret_answer(&question, "maybe").as_deref(), Some("maybe"));
    }

    #[test]
    fn test_describe_settings() {
        let mut settings = QuizSettings::with_types([QuestionType::Mcq, QuestionType::TrueFalse]);
        settings.difficulty_level = Difficulty::Hard;
        settings.custom_prompt = Some("Focus on dates".to_string());

        assert_eq!(
            describe_settings(&settings),
            "5 question(s) per type, hard difficulty: Multiple Choice, True or False\nInstructions: Focus on dates"
        );
    }

    #[tokio::test]
    async fn test_offline_quiz_scored() {
        let mut session = QuizSession::new(Pipeline::offline());
        let (result, output, _) =
            drive(&mut session, &options(&[QuestionType::Mcq]), &["3", "2", "", "q"]).await;

        assert!(result.is_ok());
        assert!(output.contains("Generating questions..."));
        assert!(output.contains("What is the capital of France?"));
        assert!(output.contains("Score: 2/3 (67%) Good job!"));
        assert!(output.contains("Goodbye!"));
        assert_eq!(session.state().stage(), Stage::Results);
    }

    #[tokio::test]
    async fn test_profile_prompts() {
        let mut session = QuizSession::new(Pipeline::offline());
        let mut run_options = options(&[QuestionType::TrueFalse]);
        run_options.skip_profile = false;

        let (result, _, prompter) = drive(
            &mut session,
            &run_options,
            &["Ada", "", "PhD", "Mathematics", "f", "t", "q"],
        )
        .await;

        assert!(result.is_ok());
        assert_eq!(prompter.prompts[0], "Name (optional): ");
        assert_eq!(prompter.prompts[3], "Subject Area (optional): ");
        let profile = session.state().profile().unwrap();
        assert_eq!(profile.name.as_deref(), Some("Ada"));
        assert!(profile.profession.is_none());
        assert_eq!(profile.subject.as_deref(), Some("Mathematics"));
        assert_eq!(session.state().score(), 2);
    }

    #[tokio::test]
    async fn test_switch_type_then_retry() {
        let mut session = QuizSession::new(Pipeline::offline());
        let run_options = options(&[QuestionType::Mcq, QuestionType::TrueFalse]);

        let (result, output, _) = drive(
            &mut session,
            &run_options,
            // switch to true/false, answer, retry keeping the type, answer, quit
            &["2", "f", "t", "r", "", "t", "t", "q"],
        )
        .await;

        assert!(result.is_ok());
        assert!(output.contains("The Great Wall of China is visible from space."));
        assert!(output.contains("Score: 2/2 (100%) Excellent work!"));
        assert!(output.contains("Score: 1/2 (50%) Keep practicing!"));
        assert_eq!(session.state().active_type(), Some(QuestionType::TrueFalse));
        assert_eq!(session.state().score(), 1);
    }

    #[tokio::test]
    async fn test_new_test_starts_over() {
        let mut session = QuizSession::new(Pipeline::offline());
        let (result, output, _) = drive(
            &mut session,
            &options(&[QuestionType::FillInBlanks]),
            &["photosynthesis", "", "n", "", "", "q"],
        )
        .await;

        assert!(result.is_ok());
        assert_eq!(output.matches("Loaded notes.txt").count(), 2);
        assert!(output.contains("Score: 1/2 (50%)"));
        assert!(output.contains("Score: 0/2 (0%) More study needed!"));
    }

    #[tokio::test]
    async fn test_end_of_input_quits() {
        let mut session = QuizSession::new(Pipeline::offline());
        let (result, output, _) =
            drive(&mut session, &options(&[QuestionType::ShortAnswer]), &["gravity"]).await;

        assert!(result.is_ok());
        assert!(output.ends_with("Goodbye!\n"));
        assert_eq!(session.state().stage(), Stage::Questions);
    }

    #[tokio::test]
    async fn test_generation_failure_returns_to_upload() {
        let pipeline = Pipeline::online(GenerationClient::new(MockProvider::new("[]")));
        let mut session = QuizSession::new(pipeline);
        let mut prompter = ScriptedPrompter::new(&[]);
        let mut out = Vec::new();
        let broken = SourceFile::new("broken.pdf", "application/pdf", b"not a pdf".to_vec());

        let result = run(
            &mut session,
            broken,
            &options(&[QuestionType::Mcq]),
            &mut prompter,
            &mut out,
            &Formatter::new(false),
        )
        .await;

        assert!(matches!(result, Err(CliError::GenerationFailed(_))));
        assert_eq!(session.state().stage(), Stage::Upload);
    }
}
