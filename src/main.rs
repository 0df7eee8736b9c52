// src/main.rs

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;
use serde::Deserialize;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use pte_admin::api::{Backend, HttpBackend, Upload};
use pte_admin::config::{Config, parse_base_url};
use pte_admin::confirm::{AssumeYes, Confirm, StdinConfirm};
use pte_admin::error::AdminError;
use pte_admin::manager::CollectionManager;
use pte_admin::mock_test::MockTestDraft;
use pte_admin::models::Entity;
use pte_admin::models::question::{AnswerOption, Difficulty, Media, QuestionKind, Skill};
use pte_admin::picker::CrossReferencePicker;
use pte_admin::reorder;
use pte_admin::resources::{
    BannerResource, MockTestResource, QuestionResource, Resource, SectionDraft, SectionResource,
    VoucherOrderResource,
};
use pte_admin::view::Render;

#[derive(Parser, Debug)]
#[command(name = "pte-admin", about = "Admin console for the PTE practice platform")]
struct Cli {
    /// Overrides PTE_ADMIN_API_URL.
    #[arg(long, env = "PTE_ADMIN_API_URL")]
    api_url: Option<String>,

    /// Overrides PTE_ADMIN_TOKEN.
    #[arg(long, env = "PTE_ADMIN_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lists the question types and their resource names.
    Kinds,
    /// Questions of one type (resource name, bucket key or short code, e.g. `SST`).
    Question {
        kind: QuestionKind,
        #[command(subcommand)]
        action: QuestionAction,
    },
    Banner {
        #[command(subcommand)]
        action: BannerAction,
    },
    /// Sectional tests of one skill.
    Section {
        skill: Skill,
        #[command(subcommand)]
        action: SetAction,
    },
    MockTest {
        #[command(subcommand)]
        action: SetAction,
    },
    Voucher {
        #[command(subcommand)]
        action: ReadAction,
    },
    /// Shows how paragraphs would be shuffled and keyed.
    Reorder {
        #[arg(required = true, num_args = 2..)]
        paragraphs: Vec<String>,
    },
}

#[derive(Args, Debug)]
struct ListArgs {
    /// Case-insensitive title filter.
    #[arg(long, short)]
    query: Option<String>,
}

#[derive(Args, Debug)]
struct DeleteArgs {
    id: String,
    /// Skip the confirmation prompt.
    #[arg(long, short)]
    yes: bool,
}

#[derive(Subcommand, Debug)]
enum ReadAction {
    List(ListArgs),
    View { id: String },
}

#[derive(Args, Debug)]
struct QuestionInput {
    /// JSON file with the form fields.
    #[arg(long)]
    file: Option<PathBuf>,
    #[arg(long)]
    image: Option<PathBuf>,
    #[arg(long)]
    audio: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum QuestionAction {
    List(ListArgs),
    View { id: String },
    Delete(DeleteArgs),
    Create(QuestionInput),
    Update {
        id: String,
        #[command(flatten)]
        input: QuestionInput,
    },
}

#[derive(Subcommand, Debug)]
enum BannerAction {
    List(ListArgs),
    View { id: String },
    Delete(DeleteArgs),
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        image: PathBuf,
    },
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        image: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct SetInput {
    #[arg(long)]
    title: Option<String>,
    /// `KIND=ID`, repeatable.
    #[arg(long, value_parser = parse_pick)]
    select: Vec<(QuestionKind, String)>,
    /// `KIND=ID`, repeatable.
    #[arg(long, value_parser = parse_pick)]
    deselect: Vec<(QuestionKind, String)>,
}

#[derive(Subcommand, Debug)]
enum SetAction {
    List(ListArgs),
    View { id: String },
    Delete(DeleteArgs),
    /// Prints the questions still available per bucket.
    Unused,
    Create(SetInput),
    Update {
        id: String,
        #[command(flatten)]
        input: SetInput,
    },
}

fn parse_pick(raw: &str) -> Result<(QuestionKind, String), String> {
    let (kind, id) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KIND=ID, got '{}'", raw))?;
    let id = id.trim();
    if id.is_empty() {
        return Err(format!("missing question id in '{}'", raw));
    }
    Ok((kind.parse()?, id.to_string()))
}

/// Question form fields as read from `--file`; absent fields keep their value.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionFile {
    title: Option<String>,
    difficulty: Option<Difficulty>,
    is_predictive: Option<bool>,
    text: Option<String>,
    transcript: Option<String>,
    prompt: Option<String>,
    answer: Option<String>,
    answers: Option<Vec<String>>,
    options: Option<Vec<AnswerOption>>,
    paragraphs: Option<Vec<String>>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    let cli = Cli::parse();

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "pte-admin.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let console_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    match run(cli, &mut config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, config: &mut Config) -> Result<(), AdminError> {
    if let Some(url) = &cli.api_url {
        config.api_url = parse_base_url(url)?;
    }
    if cli.token.is_some() {
        config.api_token = cli.token.clone();
    }

    let backend: Arc<dyn Backend> = Arc::new(HttpBackend::new(config)?);
    tracing::debug!("Using API at {}", config.api_url);

    match cli.command {
        Command::Kinds => {
            for kind in QuestionKind::ALL {
                println!("{:<6} {:<24} {}", kind.short_code(), kind.resource(), kind.label());
            }
            Ok(())
        }
        Command::Question { kind, action } => {
            run_question(CollectionManager::new(QuestionResource(kind), backend), action).await
        }
        Command::Banner { action } => {
            run_banner(CollectionManager::new(BannerResource, backend), action).await
        }
        Command::Section { skill, action } => {
            run_set(
                CollectionManager::new(SectionResource(skill), backend),
                action,
                |draft: &mut SectionDraft| &mut draft.title,
                |draft: &mut SectionDraft| &mut draft.picker,
            )
            .await
        }
        Command::MockTest { action } => {
            run_set(
                CollectionManager::new(MockTestResource, backend),
                action,
                |draft: &mut MockTestDraft| &mut draft.title,
                |draft: &mut MockTestDraft| &mut draft.picker,
            )
            .await
        }
        Command::Voucher { action } => {
            let mut manager = CollectionManager::new(VoucherOrderResource, backend);
            match action {
                ReadAction::List(args) => list(&mut manager, args).await,
                ReadAction::View { id } => view(&mut manager, &id).await,
            }
        }
        Command::Reorder { paragraphs } => {
            let key = reorder::build(&paragraphs)?;
            for p in &key.sentences {
                println!("{}) {}", p.id, p.text);
            }
            println!("Correct order: {}", key.correct_order.join(" "));
            Ok(())
        }
    }
}

async fn list<R: Resource>(manager: &mut CollectionManager<R>, args: ListArgs) -> Result<(), AdminError> {
    manager.fetch_list().await?;
    if let Some(query) = &args.query {
        manager.set_query(query);
    }
    for item in manager.visible() {
        println!("{}\t{}", item.id().unwrap_or("-"), item.title());
    }
    Ok(())
}

async fn view<R: Resource>(manager: &mut CollectionManager<R>, id: &str) -> Result<(), AdminError>
where
    R::Item: Render,
{
    // the list is loaded first so view can reuse it where the screen does
    if !manager.resource().view_fetches_detail() {
        let _ = manager.fetch_list().await;
    }
    let item = manager.view(id).await?;
    for line in item.render() {
        println!("{}", line);
    }
    manager.close();
    Ok(())
}

async fn delete<R: Resource>(manager: &mut CollectionManager<R>, args: DeleteArgs) -> Result<(), AdminError> {
    manager.fetch_list().await?;
    let confirm: &dyn Confirm = if args.yes { &AssumeYes } else { &StdinConfirm };
    if manager.remove(&args.id, confirm).await? {
        println!("Deleted {}", args.id);
    } else {
        println!("Cancelled");
    }
    Ok(())
}

async fn read_question_file(path: &PathBuf) -> Result<QuestionFile, AdminError> {
    let raw = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&raw)?)
}

async fn run_question(
    mut manager: CollectionManager<QuestionResource>,
    action: QuestionAction,
) -> Result<(), AdminError> {
    let (editing, input) = match action {
        QuestionAction::List(args) => return list(&mut manager, args).await,
        QuestionAction::View { id } => return view(&mut manager, &id).await,
        QuestionAction::Delete(args) => return delete(&mut manager, args).await,
        QuestionAction::Create(input) => (None, input),
        QuestionAction::Update { id, input } => (Some(id), input),
    };

    let fields = match &input.file {
        Some(path) => read_question_file(path).await?,
        None => QuestionFile::default(),
    };
    let image = match &input.image {
        Some(path) => Some(Upload::from_path(Media::Image.field(), path).await?),
        None => None,
    };
    let audio = match &input.audio {
        Some(path) => Some(Upload::from_path(Media::Audio.field(), path).await?),
        None => None,
    };

    let draft = match &editing {
        Some(id) => manager.open_edit(id).await?,
        None => manager.open_create().await?,
    };

    if let Some(title) = fields.title {
        draft.title = title;
    }
    if let Some(difficulty) = fields.difficulty {
        draft.difficulty = difficulty;
    }
    if let Some(is_predictive) = fields.is_predictive {
        draft.is_predictive = is_predictive;
    }
    if let Some(text) = fields.text {
        draft.text = text;
    }
    if let Some(transcript) = fields.transcript {
        draft.transcript = transcript;
    }
    if let Some(prompt) = fields.prompt {
        draft.prompt = prompt;
    }
    if let Some(answer) = fields.answer {
        draft.answer = answer;
    }
    if let Some(answers) = fields.answers {
        draft.answers = answers;
    }
    if let Some(options) = fields.options {
        draft.options = options;
    }
    if let Some(paragraphs) = fields.paragraphs {
        draft.paragraphs = paragraphs;
    }
    if let Some(upload) = image {
        draft.attach(upload);
    }
    if let Some(upload) = audio {
        draft.attach(upload);
    }

    manager.save().await?;
    println!("Saved; {} questions listed", manager.items().len());
    Ok(())
}

async fn run_banner(
    mut manager: CollectionManager<BannerResource>,
    action: BannerAction,
) -> Result<(), AdminError> {
    match action {
        BannerAction::List(args) => list(&mut manager, args).await,
        BannerAction::View { id } => view(&mut manager, &id).await,
        BannerAction::Delete(args) => delete(&mut manager, args).await,
        BannerAction::Create { title, image } => {
            let upload = Upload::from_path(Media::Image.field(), &image).await?;
            let draft = manager.open_create().await?;
            draft.title = title;
            draft.image = Some(upload);
            manager.save().await?;
            println!("Saved; {} banners listed", manager.items().len());
            Ok(())
        }
        BannerAction::Update { id, title, image } => {
            let upload = match &image {
                Some(path) => Some(Upload::from_path(Media::Image.field(), path).await?),
                None => None,
            };
            let draft = manager.open_edit(&id).await?;
            if let Some(title) = title {
                draft.title = title;
            }
            if upload.is_some() {
                draft.image = upload;
            }
            manager.save().await?;
            println!("Saved; {} banners listed", manager.items().len());
            Ok(())
        }
    }
}

/// Section and mock test screens: both are a title plus a picker.
async fn run_set<R, T, P>(
    mut manager: CollectionManager<R>,
    action: SetAction,
    title_of: T,
    picker_of: P,
) -> Result<(), AdminError>
where
    R: Resource,
    R::Item: Render,
    T: Fn(&mut R::Draft) -> &mut String,
    P: Fn(&mut R::Draft) -> &mut CrossReferencePicker,
{
    let (editing, input) = match action {
        SetAction::List(args) => return list(&mut manager, args).await,
        SetAction::View { id } => return view(&mut manager, &id).await,
        SetAction::Delete(args) => return delete(&mut manager, args).await,
        SetAction::Unused => {
            let draft = manager.open_create().await?;
            let picker = picker_of(draft);
            for bucket in picker.buckets() {
                println!("{} ({}):", bucket.label(), picker.available(*bucket).len());
                for r in picker.available(*bucket) {
                    println!("  {}\t{}", r.id().unwrap_or("-"), r.label());
                }
            }
            manager.close();
            return Ok(());
        }
        SetAction::Create(input) => (None, input),
        SetAction::Update { id, input } => (Some(id), input),
    };

    let draft = match &editing {
        Some(id) => manager.open_edit(id).await?,
        None => manager.open_create().await?,
    };
    if let Some(title) = input.title {
        *title_of(draft) = title;
    }
    let picker = picker_of(draft);
    for (kind, id) in &input.deselect {
        picker.deselect(*kind, id)?;
    }
    for (kind, id) in &input.select {
        picker.select(*kind, id)?;
    }

    manager.save().await?;
    println!("Saved; {} {} listed", manager.items().len(), manager.resource().label());
    Ok(())
}
