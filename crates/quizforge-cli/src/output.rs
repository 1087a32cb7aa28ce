//! Output formatting for the CLI.

use colored::*;
use quizforge_domain::{Question, ScoreReport, Stage};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(color_enabled: bool) -> Self {
        Self { color_enabled }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Stage heading with a progress bar.
    pub fn stage_header(&self, stage: Stage) -> String {
        const WIDTH: usize = 20;
        let percent = stage.progress_percent();
        let filled = (percent / 100.0 * WIDTH as f64).round() as usize;
        let bar = format!("{}{}", "█".repeat(filled), "░".repeat(WIDTH - filled));

        let steps: Vec<String> = Stage::ALL
            .iter()
            .map(|s| {
                if *s == stage {
                    self.colorize(s.label(), "cyan")
                } else {
                    s.label().to_string()
                }
            })
            .collect();

        format!("{} {:>3.0}%\n{}", bar, percent, steps.join(" › "))
    }

    /// A question as shown while answering; options are numbered from 1.
    pub fn question(&self, position: usize, total: usize, question: &Question) -> String {
        let mut out = format!(
            "{} {}",
            self.colorize(&format!("[{}/{}]", position, total), "magenta"),
            question.text()
        );
        if let Some(options) = question.options() {
            for (idx, option) in options.iter().enumerate() {
                out.push_str(&format!("\n  {}. {}", idx + 1, option));
            }
        }
        out
    }

    /// Review table of answered questions.
    pub fn review_table(&self, questions: &[Question]) -> String {
        if questions.is_empty() {
            return self.colorize("No questions answered.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["#", "Question", "Your answer", "Correct answer", "Result"]);

        for (idx, question) in questions.iter().enumerate() {
            let mark = if question.is_correct() { "✓" } else { "✗" };
            builder.push_record([
                (idx + 1).to_string(),
                question.text().to_string(),
                question.user_answer().unwrap_or("-").to_string(),
                question.answer().unwrap_or("-").to_string(),
                mark.to_string(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Score line with feedback colored by band.
    pub fn score_summary(&self, report: &ScoreReport) -> String {
        let color = match report.percentage {
            80.. => "green",
            60..=79 => "cyan",
            40..=59 => "yellow",
            _ => "red",
        };
        format!(
            "Score: {}/{} ({}%) {}",
            report.score,
            report.total,
            report.percentage,
            self.colorize(report.feedback, color)
        )
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}
