//! classmark - course rendering and result export

use std::fs;
use std::io::{self, Read, Write};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use classmark::course::CourseData;
use classmark::markdown::{RenderConfig, render_with};
use classmark::quiz::{self, QuizAnswers, QuizDetail};
use classmark::results::{
    self, AiEvaluationResult, Evaluation, PerformanceBand, ResultFilter, ResultStats, Scored,
};
use classmark::util::decode_text;

#[derive(Parser)]
#[command(name = "classmark")]
#[command(version, about = "Course rendering and result export for the classroom front end", long_about = None)]
#[command(after_help = "EXAMPLES:
    classmark render topic.md -o topic.html       Render course markdown
    classmark course course.json --topic loops    Render one course topic
    classmark results evals.json --title Essay    Export evaluations to CSV
    classmark quiz quiz.json answers.json         Score a quiz")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Render course markdown to HTML
    Render {
        /// Markdown file (reads stdin when absent or `-`)
        #[arg(value_name = "INPUT")]
        input: Option<String>,

        /// Output file (stdout when absent)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<String>,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Show a generated course, or render one of its topics
    Course {
        /// Course JSON from the course-generation service
        #[arg(value_name = "COURSE")]
        input: String,

        /// Topic id to render (lists the table of contents when absent)
        #[arg(short, long)]
        topic: Option<String>,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Export evaluation results to CSV or summarize them
    Results {
        /// JSON array of result rows
        #[arg(value_name = "RESULTS")]
        input: String,

        /// Rows are AI grader results rather than evaluations
        #[arg(long)]
        ai: bool,

        /// Assignment title, used for the default output file name
        #[arg(long)]
        title: Option<String>,

        /// Output file (defaults to a name derived from --title, else stdout)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<String>,

        /// Keep students whose name contains this text
        #[arg(long, default_value = "")]
        search: String,

        /// Keep only this grade
        #[arg(long)]
        grade: Option<String>,

        /// Keep only this evaluation type
        #[arg(long = "type")]
        evaluation_type: Option<String>,

        /// Write statistics over all rows instead of CSV (filters are ignored)
        #[arg(long)]
        stats: bool,
    },

    /// Score quiz answers against the answer key
    Quiz {
        /// Quiz JSON (`quiz` and `questions`)
        #[arg(value_name = "QUIZ")]
        quiz: String,

        /// Answers JSON object (question id -> option)
        #[arg(value_name = "ANSWERS")]
        answers: String,
    },
}

#[derive(clap::Args)]
struct RenderArgs {
    /// Prefix for subtopic anchor ids
    #[arg(long, default_value = "subtopic")]
    anchor_prefix: String,

    /// Glyph written before list items (empty for none)
    #[arg(long, default_value = "•")]
    bullet: String,

    /// Join paragraph lines with newlines instead of <br>
    #[arg(long)]
    no_line_breaks: bool,
}

impl RenderArgs {
    fn config(&self) -> RenderConfig {
        RenderConfig::new()
            .with_anchor_prefix(&self.anchor_prefix)
            .with_bullet(&self.bullet)
            .with_line_breaks(!self.no_line_breaks)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let result = match cli.command {
        Command::Render {
            input,
            output,
            render,
        } => render_markdown(input.as_deref(), output.as_deref(), &render.config()),
        Command::Course {
            input,
            topic,
            render,
        } => show_course(&input, topic.as_deref(), &render.config()),
        Command::Results {
            input,
            ai,
            title,
            output,
            search,
            grade,
            evaluation_type,
            stats,
        } => {
            let filter = ResultFilter {
                search,
                grade,
                evaluation_type,
            };
            export_results(&input, ai, title.as_deref(), output.as_deref(), &filter, stats)
        }
        Command::Quiz { quiz, answers } => score_quiz(&quiz, &answers),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// Read a file (or stdin for `None`/`-`) and decode it to text.
fn read_text(path: Option<&str>) -> Result<String, String> {
    let bytes = match path {
        None | Some("-") => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .map_err(|e| format!("stdin: {e}"))?;
            buf
        }
        Some(path) => fs::read(path).map_err(|e| format!("{path}: {e}"))?,
    };
    Ok(decode_text(&bytes, None).into_owned())
}

fn write_text(path: Option<&str>, text: &str) -> Result<(), String> {
    match path {
        None | Some("-") => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{text}").map_err(|e| e.to_string())
        }
        Some(path) => {
            fs::write(path, text).map_err(|e| format!("{path}: {e}"))?;
            log::info!("wrote {path}");
            Ok(())
        }
    }
}

fn render_markdown(
    input: Option<&str>,
    output: Option<&str>,
    config: &RenderConfig,
) -> Result<(), String> {
    let document = read_text(input)?;
    let rendered = render_with(&document, config);
    write_text(output, &rendered.html)
}

fn show_course(path: &str, topic: Option<&str>, config: &RenderConfig) -> Result<(), String> {
    let json = read_text(Some(path))?;
    let course = CourseData::from_json(&json).map_err(|e| e.to_string())?;

    if let Some(topic) = topic {
        let rendered = course
            .render_topic(topic, config)
            .map_err(|e| e.to_string())?;
        return write_text(None, &rendered.html);
    }

    println!("Topics: {}", course.toc.len());
    for item in &course.toc {
        println!("{}. {} [{}]", item.number, item.title, item.id);
        for headline in course.headlines_for(&item.id, config) {
            println!("    {} #{}", headline.title, headline.id);
        }
    }
    Ok(())
}

fn export_results(
    path: &str,
    ai: bool,
    title: Option<&str>,
    output: Option<&str>,
    filter: &ResultFilter,
    stats: bool,
) -> Result<(), String> {
    let json = read_text(Some(path))?;

    if ai {
        let records: Vec<AiEvaluationResult> =
            serde_json::from_str(&json).map_err(|e| e.to_string())?;
        if stats {
            return write_text(output, &stats_report(&records));
        }
        let kept = filter.apply(&records);
        let csv = results::export_ai_results_csv(kept).map_err(|e| e.to_string())?;
        let default_name = title.map(results::ai_results_file_name);
        write_text(output.or(default_name.as_deref()), &csv)
    } else {
        let records: Vec<Evaluation> = serde_json::from_str(&json).map_err(|e| e.to_string())?;
        if stats {
            return write_text(output, &stats_report(&records));
        }
        let kept = filter.apply(&records);
        let csv = results::export_evaluations_csv(kept).map_err(|e| e.to_string())?;
        let default_name = title.map(results::evaluations_file_name);
        write_text(output.or(default_name.as_deref()), &csv)
    }
}

/// Summarize every row, as the results dialogs do regardless of the filters.
fn stats_report<T: Scored>(records: &[T]) -> String {
    let stats = ResultStats::compute(records);

    let mut lines = vec![format!("Results: {}", stats.total)];
    if stats.total > 0 {
        lines.push(format!(
            "Average: {:.2}% ({})",
            stats.average,
            PerformanceBand::from_percentage(stats.average).label()
        ));
        lines.push(format!("Highest: {}%", stats.highest));
        lines.push(format!("Lowest: {}%", stats.lowest));
        for (grade, count) in &stats.grade_distribution {
            lines.push(format!("  {grade}: {count}"));
        }
    }
    lines.join("\n")
}

fn score_quiz(quiz_path: &str, answers_path: &str) -> Result<(), String> {
    let detail = QuizDetail::from_json(&read_text(Some(quiz_path))?).map_err(|e| e.to_string())?;
    let answers: QuizAnswers =
        serde_json::from_str(&read_text(Some(answers_path))?).map_err(|e| e.to_string())?;

    quiz::ensure_complete(&detail.questions, &answers).map_err(|e| e.to_string())?;
    let results = quiz::score(&detail.questions, &answers);

    println!("Quiz: {}", detail.quiz.title);
    println!(
        "Score: {}/{} ({:.0}%)",
        results.score, results.total_questions, results.percentage
    );
    Ok(())
}
