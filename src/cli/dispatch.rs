//! CLI command dispatch
//!
//! Runs the non-interactive commands against the same modules the TUI
//! uses. The TUI itself is started by `main`.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::cli::{Args, Command, Error, GenerateArgs, KeyAction, Result};
use crate::cli::{EXIT_FAILURE, EXIT_VALIDATION};
use crate::config::{AppConfig, AppPaths};
use crate::credentials::{CredentialError, CredentialState, Credentials, FileStore, StoreBackend};
use crate::diagram::{strip_fences, DiagramRenderer, MermaidCli, DIAGRAM_SOURCE_FILE};
use crate::export::{copy_markdown, export_png, Osc52Clipboard};
use crate::llm::{build_generation_request, CompletionClient};
use crate::transcribe::to_markdown;
use crate::ui::handlers::{MISSING_DESCRIPTION_MESSAGE, MISSING_KEY_MESSAGE};

/// Raw description HTML written by `generate`
pub const DESCRIPTION_HTML_FILE: &str = "description.html";
/// Transcribed description written by `generate --markdown`
pub const DESCRIPTION_MD_FILE: &str = "description.md";

/// Resolved home and loaded configuration
#[derive(Debug, Clone)]
pub struct Context {
    pub paths: AppPaths,
    pub config: AppConfig,
}

impl Context {
    pub fn credentials(&self) -> Credentials<StoreBackend> {
        Credentials::new(StoreBackend::File(FileStore::new(self.paths.store_file())))
    }

    pub fn renderer(&self) -> MermaidCli {
        MermaidCli::new(&self.config.render.mmdc)
    }

    pub fn client(&self) -> CompletionClient {
        CompletionClient::new(&self.config.llm.base_url)
    }

    fn output_dir(&self, explicit: Option<PathBuf>) -> PathBuf {
        explicit.unwrap_or_else(|| self.config.export.output_dir.clone())
    }
}

/// Resolve the home directory and load its configuration
pub fn load_context(args: &Args) -> Result<Context> {
    let paths = AppPaths::new(crate::cli::resolve_home(args.home.clone()));
    let config_path = args.config.clone().unwrap_or_else(|| paths.config_file());
    let config = AppConfig::load(&config_path)?.with_env_overrides();
    Ok(Context { paths, config })
}

/// Map an error to its exit code
pub fn exit_code(error: &Error) -> i32 {
    match error {
        Error::Validation(_) | Error::Credential(CredentialError::Empty) => EXIT_VALIDATION,
        _ => EXIT_FAILURE,
    }
}

/// Run one non-interactive command
pub async fn run_command(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Tui => Err(Error::Validation(
            "the TUI is started by the binary, not dispatch".to_string(),
        )),
        Command::Generate(args) => run_generate(args, ctx).await,
        Command::Markdown { html_file, copy } => run_markdown(&html_file, copy),
        Command::ExportPng { workspace, output } => {
            run_export_png(&workspace, &ctx.output_dir(output), ctx).await
        }
        Command::Key { action } => run_key(action, ctx),
    }
}

async fn run_generate(args: GenerateArgs, ctx: &Context) -> Result<()> {
    let credential = ctx
        .credentials()
        .value()?
        .ok_or_else(|| Error::Validation(MISSING_KEY_MESSAGE.to_string()))?;

    let description = match args.file {
        Some(ref path) => read_file(path).await?,
        None => args.description.join(" "),
    };
    if description.is_empty() {
        return Err(Error::Validation(MISSING_DESCRIPTION_MESSAGE.to_string()));
    }

    let out_dir = ctx.output_dir(args.output);
    tokio::fs::create_dir_all(&out_dir)
        .await
        .map_err(|source| io_error(&out_dir, source))?;

    let request = build_generation_request(&description, &ctx.config.model_settings());
    let result = ctx.client().submit(&request, &credential).await?;

    write_file(&out_dir.join(DESCRIPTION_HTML_FILE), &result.description_html).await?;

    if args.png {
        let renderer = ctx.renderer();
        let rendered = renderer.render(&result.diagram_source, &out_dir).await?;
        println!("{}", rendered.source_path.display());
        println!("{}", rendered.svg_path.display());
        if let Some(png) = export_png(&renderer, &out_dir, &out_dir).await? {
            println!("{}", png.display());
        }
    } else {
        let source_path = out_dir.join(DIAGRAM_SOURCE_FILE);
        write_file(&source_path, &strip_fences(&result.diagram_source)).await?;
        println!("{}", source_path.display());
    }
    println!("{}", out_dir.join(DESCRIPTION_HTML_FILE).display());

    if args.markdown {
        let md_path = out_dir.join(DESCRIPTION_MD_FILE);
        write_file(&md_path, &to_markdown(&result.description_html)?).await?;
        println!("{}", md_path.display());
    }

    info!(out_dir = %out_dir.display(), "generate finished");
    Ok(())
}

fn run_markdown(html_file: &Path, copy: bool) -> Result<()> {
    let html = std::fs::read_to_string(html_file).map_err(|source| io_error(html_file, source))?;
    // The OSC 52 escape already goes to stdout; the text itself is not repeated
    if copy {
        let markdown = copy_markdown(&Osc52Clipboard, &html)?;
        eprintln!("Copied {} bytes of Markdown", markdown.len());
    } else {
        print!("{}", to_markdown(&html)?);
    }
    Ok(())
}

async fn run_export_png(workspace: &Path, out_dir: &Path, ctx: &Context) -> Result<()> {
    match export_png(&ctx.renderer(), workspace, out_dir).await? {
        Some(png) => println!("{}", png.display()),
        None => eprintln!("Nothing rendered in {}", workspace.display()),
    }
    Ok(())
}

fn run_key(action: KeyAction, ctx: &Context) -> Result<()> {
    let credentials = ctx.credentials();
    match action {
        KeyAction::Set { value } => {
            credentials.save(&value)?;
            println!("API key saved");
        }
        KeyAction::Clear => {
            credentials.clear()?;
            println!("API key removed");
        }
        KeyAction::Status => match credentials.state()? {
            CredentialState::Present => println!("present"),
            CredentialState::Absent => println!("absent"),
        },
    }
    Ok(())
}

fn io_error(path: &Path, source: std::io::Error) -> Error {
    Error::Io {
        path: path.display().to_string(),
        source,
    }
}

async fn read_file(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| io_error(path, source))
}

async fn write_file(path: &Path, contents: &str) -> Result<()> {
    tokio::fs::write(path, contents)
        .await
        .map_err(|source| io_error(path, source))
}
