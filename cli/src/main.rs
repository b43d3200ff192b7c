//! scriptmark CLI - capture, compose and submit regions of scanned exam scripts

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use colored::Colorize;
use image::Rgba;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;

use scriptmark::client::{ClientOptions, HttpBackend, QuestionRecord};
use scriptmark::compose::{Captioner, FontCaptioner, PageSource, RenderedPages};
use scriptmark::model::{ContentKind, PartLabel, Point, Rect, QuestionId};
use scriptmark::{
    capture_mode_for, load_part_tree, save_part_tree, sort_part_labels, stitch_vertical,
    CaptionOptions, CaptureOptions, CaptureSession, Composer, DocumentRole, DocumentStage,
    PartTree, QuestionPayload, RenderScale, Shape, StageMachine, Submitter, UserRole,
};

type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "scriptmark")]
#[command(version)]
#[command(about = "Capture, compose and submit regions of scanned exam scripts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Edit the part labels of a question
    Parts {
        #[command(subcommand)]
        action: PartsAction,
    },

    /// Crop a selection out of a rendered page
    Crop {
        /// Rendered page image
        #[arg(value_name = "PAGE")]
        page: PathBuf,

        /// Rectangle in display pixels: x,y,width,height
        #[arg(long, conflicts_with = "outline")]
        rect: Option<String>,

        /// Freehand outline in display pixels: "x,y x,y x,y ..."
        #[arg(long)]
        outline: Option<String>,

        /// Width the page was displayed at (defaults to the rendered width)
        #[arg(long)]
        display_width: Option<f32>,

        /// Output PNG
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Stack images vertically, optionally under a caption
    Stitch {
        /// Images in top-to-bottom order
        #[arg(value_name = "IMAGES", required = true)]
        inputs: Vec<PathBuf>,

        /// Caption drawn above the images
        #[arg(long)]
        caption: Option<String>,

        /// TrueType/OpenType font for the caption
        #[arg(long, env = "SCRIPTMARK_FONT")]
        font: Option<PathBuf>,

        /// Output PNG
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Show the document and capture modes of an exam stage
    Stage {
        #[arg(allow_hyphen_values = true)]
        stage: i64,
    },

    /// Replay a capture script against rendered pages
    Capture {
        /// JSON capture script
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,

        /// Rendered page images, in page order
        #[arg(long = "page", value_name = "IMAGE", required = true)]
        pages: Vec<PathBuf>,

        /// TrueType/OpenType font for captions
        #[arg(long, env = "SCRIPTMARK_FONT")]
        font: Option<PathBuf>,

        /// Output file for the finalized payloads (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Save part label and marks changes to this server
        #[arg(long, value_name = "URL")]
        server: Option<String>,

        /// Bearer token
        #[arg(long, env = "SCRIPTMARK_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },

    /// Submit finalized payloads to the exam server
    Submit {
        /// JSON file of finalized payloads, as written by `capture`
        #[arg(value_name = "PAYLOADS")]
        payloads: PathBuf,

        /// Exam id
        #[arg(long)]
        exam: i64,

        /// Document the payloads belong to (e.g. answer_script)
        #[arg(long)]
        document: String,

        /// Server base URL
        #[arg(long, env = "SCRIPTMARK_SERVER", default_value = "http://localhost:8000")]
        server: String,

        /// Bearer token
        #[arg(long, env = "SCRIPTMARK_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
enum PartsAction {
    /// Add the next top-level part
    Add {
        /// JSON label file (created if missing)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Question number
        #[arg(short, long)]
        question: u32,
    },

    /// Add the next sub-part under PARENT
    Sub {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[arg(short, long)]
        question: u32,

        /// Parent label, e.g. 2.1
        parent: String,
    },

    /// Remove a part with its sub-parts and renumber the rest
    Remove {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[arg(short, long)]
        question: u32,

        /// Label to remove
        label: String,
    },

    /// Sort dotted labels
    Sort {
        #[arg(required = true)]
        labels: Vec<String>,
    },

    /// Check a label file against the numbering rules
    Check {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[arg(short, long)]
        question: u32,
    },
}

/// A recorded capture session.
#[derive(Debug, Deserialize)]
struct CaptureScript {
    exam_id: i64,
    user: UserRole,
    document: DocumentRole,
    /// Width the pages were displayed at; selections are in these pixels
    #[serde(default)]
    display_width: Option<f32>,
    #[serde(default)]
    options: CaptureOptions,
    questions: Vec<QuestionRecord>,
    steps: Vec<Step>,
}

/// One user action.
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum Step {
    /// Pointer down at the first point, moved through the rest, released
    Select { page: usize, points: Vec<Point> },
    Kind { seq: u32, kind: ContentKind },
    Part { seq: u32, label: Option<PartLabel> },
    Delete { seq: u32 },
    Move { seq: u32, to: u32 },
    AddPart,
    AddSubpart { parent: PartLabel },
    RemovePart { label: PartLabel },
    MaxMarks { question_id: QuestionId, marks: u32 },
    SelectQuestion { question_id: QuestionId },
    Redo { question_id: QuestionId },
    Finish,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parts { action } => cmd_parts(action),
        Commands::Crop {
            page,
            rect,
            outline,
            display_width,
            output,
        } => cmd_crop(
            &page,
            rect.as_deref(),
            outline.as_deref(),
            display_width,
            &output,
        ),
        Commands::Stitch {
            inputs,
            caption,
            font,
            output,
        } => cmd_stitch(&inputs, caption.as_deref(), font.as_deref(), &output),
        Commands::Stage { stage } => cmd_stage(stage),
        Commands::Capture {
            script,
            pages,
            font,
            output,
            server,
            token,
        } => cmd_capture(
            &script,
            &pages,
            font.as_deref(),
            output.as_deref(),
            server.map(|s| client_options(s, token)),
        ),
        Commands::Submit {
            payloads,
            exam,
            document,
            server,
            token,
        } => cmd_submit(&payloads, exam, &document, client_options(server, token)),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn client_options(server: String, token: Option<String>) -> ClientOptions {
    let options = ClientOptions::new(server);
    match token {
        Some(token) => options.with_token(token),
        None => options,
    }
}

fn open_tree(file: &Path, question: u32) -> CliResult<PartTree> {
    if file.exists() {
        Ok(load_part_tree(file, question)?)
    } else {
        Ok(PartTree::new(question))
    }
}

fn print_tree(tree: &PartTree) {
    for label in tree.iter() {
        let indent = "  ".repeat(label.depth().saturating_sub(2));
        println!("{}{}", indent, label);
    }
}

fn cmd_parts(action: PartsAction) -> CliResult {
    match action {
        PartsAction::Add { file, question } => {
            let mut tree = open_tree(&file, question)?;
            let label = tree.add_top_level()?;
            save_part_tree(&file, &tree)?;
            println!("{} {}", "Added".green(), label);
        }
        PartsAction::Sub {
            file,
            question,
            parent,
        } => {
            let mut tree = open_tree(&file, question)?;
            let label = tree.add_subpart(&parent.parse::<PartLabel>()?)?;
            save_part_tree(&file, &tree)?;
            println!("{} {}", "Added".green(), label);
        }
        PartsAction::Remove {
            file,
            question,
            label,
        } => {
            let mut tree = open_tree(&file, question)?;
            let renumbering = tree.remove(&label.parse::<PartLabel>()?)?;
            save_part_tree(&file, &tree)?;
            println!(
                "{} {} ({} labels)",
                "Removed".green(),
                label,
                renumbering.removed.len()
            );
            for (old, new) in &renumbering.moved {
                println!("  {} {} -> {}", "├─".dimmed(), old, new);
            }
        }
        PartsAction::Sort { labels } => {
            for label in sort_part_labels(&labels)? {
                println!("{}", label);
            }
        }
        PartsAction::Check { file, question } => {
            let tree = load_part_tree(&file, question)?;
            println!(
                "{} question {} has {} parts",
                "OK".green().bold(),
                question,
                tree.len()
            );
            print_tree(&tree);
        }
    }
    Ok(())
}

fn parse_numbers(text: &str) -> CliResult<Vec<f32>> {
    let mut numbers = Vec::new();
    for value in text.split(',') {
        let value = value.trim();
        numbers.push(
            value
                .parse::<f32>()
                .map_err(|e| format!("invalid number '{}': {}", value, e))?,
        );
    }
    Ok(numbers)
}

fn parse_rect(text: &str) -> CliResult<Rect> {
    match parse_numbers(text)?.as_slice() {
        [x, y, w, h] => Ok(Rect::new(*x, *y, *w, *h)),
        _ => Err(format!("expected x,y,width,height, got '{}'", text).into()),
    }
}

fn parse_outline(text: &str) -> CliResult<Vec<Point>> {
    let mut points = Vec::new();
    for pair in text.split_whitespace() {
        match parse_numbers(pair)?.as_slice() {
            [x, y] => points.push(Point::new(*x, *y)),
            _ => return Err(format!("expected x,y, got '{}'", pair).into()),
        }
    }
    Ok(points)
}

fn scale_for(display_width: Option<f32>, surface_width: u32) -> CliResult<RenderScale> {
    Ok(match display_width {
        Some(width) => RenderScale::fit(width, surface_width)?,
        None => RenderScale::IDENTITY,
    })
}

fn cmd_crop(
    page: &Path,
    rect: Option<&str>,
    outline: Option<&str>,
    display_width: Option<f32>,
    output: &Path,
) -> CliResult {
    let shape = match (rect, outline) {
        (Some(r), _) => Shape::Rect(parse_rect(r)?),
        (None, Some(o)) => Shape::Freeform {
            points: parse_outline(o)?,
        },
        (None, None) => return Err("either --rect or --outline is required".into()),
    };

    let surface = image::open(page)?.to_rgba8();
    let scale = scale_for(display_width, surface.width())?;
    let cropped = scriptmark::crop(&surface, &shape, scale)?;
    cropped.save(output)?;

    println!(
        "{} {}x{} -> {}",
        "Cropped".green(),
        cropped.width(),
        cropped.height(),
        output.display()
    );
    Ok(())
}

fn captioner(font: Option<&Path>) -> CliResult<FontCaptioner> {
    let options = CaptionOptions::default();
    Ok(match font {
        Some(path) => FontCaptioner::from_file(path, options)?,
        None => FontCaptioner::discover(options)?,
    })
}

fn cmd_stitch(
    inputs: &[PathBuf],
    caption: Option<&str>,
    font: Option<&Path>,
    output: &Path,
) -> CliResult {
    let mut layers = Vec::with_capacity(inputs.len() + 1);
    if let Some(text) = caption {
        layers.push(captioner(font)?.caption(text)?);
    }
    for input in inputs {
        layers.push(image::open(input)?.to_rgba8());
    }

    let stitched = stitch_vertical(&layers, Rgba([255, 255, 255, 255]))?;
    stitched.save(output)?;
    println!(
        "{} {} images -> {} ({}x{})",
        "Stitched".green(),
        layers.len(),
        output.display(),
        stitched.width(),
        stitched.height()
    );
    Ok(())
}

fn cmd_stage(value: i64) -> CliResult {
    let stage = DocumentStage(value);
    let role = stage.role()?;

    println!("{}", "Exam Stage".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Stage".bold(), stage);
    println!("{}: {}", "Document".bold(), role);
    for user in [UserRole::Instructor, UserRole::Student] {
        let mode = match capture_mode_for(user, role) {
            Ok(mode) => format!("{:?}", mode).to_lowercase(),
            Err(_) => "not allowed".dimmed().to_string(),
        };
        println!("{}: {}", format!("{:?}", user).bold(), mode);
    }
    if stage.is_grading() {
        println!("{}", "Writing this stage starts grading".yellow());
    }
    Ok(())
}

async fn apply_step(
    session: &mut CaptureSession,
    step: Step,
    pages: &RenderedPages,
    display_width: Option<f32>,
    composer: &Composer,
) -> scriptmark::Result<()> {
    match step {
        Step::Select { page, points } => {
            let (first, rest) = points
                .split_first()
                .ok_or_else(|| scriptmark::Error::validation("a selection needs points"))?;
            session.begin_selection(page, *first)?;
            for p in rest {
                session.update_selection(*p);
            }
            let scale = match display_width {
                Some(width) => RenderScale::fit(width, pages.page(page)?.width())?,
                None => RenderScale::IDENTITY,
            };
            session.end_selection(pages, scale)?;
        }
        Step::Kind { seq, kind } => session.set_kind(seq, kind)?,
        Step::Part { seq, label } => session.set_part(seq, label)?,
        Step::Delete { seq } => {
            session.delete_region(seq)?;
        }
        Step::Move { seq, to } => session.move_region(seq, to)?,
        Step::AddPart => {
            session.add_top_level_part()?;
        }
        Step::AddSubpart { parent } => {
            session.add_subpart(&parent)?;
        }
        Step::RemovePart { label } => {
            session.remove_part(&label)?;
        }
        Step::MaxMarks { question_id, marks } => session.set_max_marks(question_id, marks)?,
        Step::SelectQuestion { question_id } => session.select_question(question_id)?,
        Step::Redo { question_id } => session.redo_question(question_id)?,
        Step::Finish => {
            session.finish_question(composer).await?;
        }
    }
    Ok(())
}

fn cmd_capture(
    script: &Path,
    pages: &[PathBuf],
    font: Option<&Path>,
    output: Option<&Path>,
    save_to: Option<ClientOptions>,
) -> CliResult {
    let script: CaptureScript = serde_json::from_str(&fs::read_to_string(script)?)?;
    let pages = RenderedPages::open(pages)?;
    let composer = Composer::new(Arc::new(captioner(font)?));

    let mode = capture_mode_for(script.user, script.document)?;
    let questions = script
        .questions
        .into_iter()
        .map(QuestionRecord::into_question)
        .collect::<scriptmark::Result<Vec<_>>>()?;
    let mut session = CaptureSession::new(
        script.exam_id,
        script.document,
        mode,
        questions,
        script.options,
    )?;

    let pb = ProgressBar::new(script.steps.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let steps = script.steps;
    let display_width = script.display_width;
    let backend = save_to.map(HttpBackend::new).transpose()?;
    let rt = tokio::runtime::Runtime::new()?;
    let (payloads, saved) = rt.block_on(async {
        for (i, step) in steps.into_iter().enumerate() {
            log::debug!("step {}: {:?}", i + 1, step);
            pb.set_message(format!("{:?}", step).chars().take(40).collect::<String>());
            match apply_step(&mut session, step, &pages, display_width, &composer).await {
                Ok(()) => {}
                // rejected actions leave the session unchanged, as in the editor
                Err(scriptmark::Error::Validation(msg)) => {
                    pb.suspend(|| {
                        eprintln!("{} step {}: {}", "Skipped".yellow(), i + 1, msg)
                    });
                }
                Err(e) => return Err(e),
            }
            pb.inc(1);
        }
        let payloads = Submitter::finalize(session.responses(), &composer).await?;
        let saved = match &backend {
            Some(backend) => session.persist_updates(backend).await?,
            None => 0,
        };
        Ok::<_, scriptmark::Error>((payloads, saved))
    })?;
    pb.finish_with_message("Done!");

    for kind in ContentKind::ALL {
        let count: usize = session.responses().iter().map(|r| r.count(kind)).sum();
        log::info!("{} {} composites", count, kind);
    }

    let json = serde_json::to_string_pretty(&payloads)?;
    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    if saved > 0 {
        println!("{} part labels of {} questions", "Saved".green(), saved);
    }
    let updates = session.pending_updates()?;
    if !updates.is_empty() {
        println!(
            "{} {} questions have unsaved part/mark changes (pass --server to save them)",
            "Note:".yellow(),
            updates.len()
        );
    }
    Ok(())
}

fn cmd_submit(payloads: &Path, exam: i64, document: &str, options: ClientOptions) -> CliResult {
    let document: DocumentRole = document.parse()?;
    let payloads: Vec<QuestionPayload> = serde_json::from_str(&fs::read_to_string(payloads)?)?;
    log::info!("submitting {} payloads for the {} of exam {}", payloads.len(), document, exam);

    let backend = Arc::new(HttpBackend::new(options)?);

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let rt = tokio::runtime::Runtime::new()?;
    let report = rt.block_on(async {
        pb.set_message("Reading exam stage...");
        let mut stage = StageMachine::load(backend.clone(), exam).await?;
        pb.set_message(format!("Submitting {} questions...", payloads.len()));
        let mut submitter = Submitter::new(backend, exam, document);
        submitter.submit_finalized(&mut stage, &payloads).await
    });
    pb.finish_and_clear();

    let report = match report {
        Ok(report) => report,
        Err(scriptmark::Error::Submission { failed }) => {
            return Err(format!("questions {:?} were not stored; nothing else was sent", failed).into())
        }
        Err(e) => return Err(e.into()),
    };

    println!(
        "{} {} questions for the {}",
        "Submitted".green().bold(),
        report.submitted.len(),
        document
    );
    if report.extracted {
        println!("  {} extraction requested", "├─".dimmed());
    }
    println!("  {} stage {}", "└─".dimmed(), report.stage);

    if let Some(grading) = report.grading {
        println!();
        println!("{}", "Grades".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        for result in &grading.results {
            let grade = match result.grade {
                Some(g) => g.to_string(),
                None => "-".dimmed().to_string(),
            };
            println!("{} {}: {}", "Question".bold(), result.question_number, grade);
            if !result.reasoning.is_empty() {
                println!("  {}", result.reasoning.dimmed());
            }
        }
        println!("{}: {}", "Total".bold(), grading.total());
    }
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "scriptmark".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Region capture and composition for scanned exam scripts");
    println!();
    println!("License: MIT");
}
