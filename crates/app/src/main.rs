use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use premise_core::model::{AgeCategory, Category, ProblemRequest};
use services::{AppServices, Clock, ProblemService, ProviderConfig, SessionController, Trigger};
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidCategory { raw: String },
    InvalidAgeCategory { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::InvalidCategory { raw } => write!(f, "invalid --category value: {raw}"),
            ArgsError::InvalidAgeCategory { raw } => write!(f, "invalid --age value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn clock(&self) -> Clock {
        self.services.clock()
    }

    fn problems(&self) -> Arc<ProblemService> {
        self.services.problems()
    }

    fn new_session(&self) -> SessionController {
        self.services.new_session()
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui");
    eprintln!(
        "  cargo run -p app -- generate [--premise <text>] [--category <name>] [--age <name>] [--json]"
    );
    eprintln!();
    eprintln!("Defaults for generate:");
    eprintln!("  --premise \"Taylor Swift\"");
    eprintln!("  --category Algebra      (Algebra, Geometry, Logarithms, Sequences)");
    eprintln!("  --age Elementary        (Elementary, \"Middle School\", \"High School\", College)");
    eprintln!();
    eprintln!("Environment (also read from .env):");
    eprintln!("  OPENROUTER_API_KEY");
    eprintln!("  MATH_PREMISE_BASE_URL, MATH_PREMISE_MODEL, MATH_PREMISE_MAX_TOKENS,");
    eprintln!("  MATH_PREMISE_TEMPERATURE, MATH_PREMISE_TIMEOUT_SECS,");
    eprintln!("  MATH_PREMISE_MAX_REQUESTS, MATH_PREMISE_COOLDOWN_SECS,");
    eprintln!("  MATH_PREMISE_REQUIRE_NEW_INPUTS, RUST_LOG");
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Help,
    Ui,
    Generate(GenerateArgs),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct GenerateArgs {
    request: ProblemRequest,
    json: bool,
}

impl GenerateArgs {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut request = ProblemRequest::default();
        let mut json = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--premise" => {
                    request.premise = require_value(args, "--premise")?;
                }
                "--category" => {
                    let value = require_value(args, "--category")?;
                    request.category = value
                        .parse::<Category>()
                        .map_err(|_| ArgsError::InvalidCategory { raw: value.clone() })?;
                }
                "--age" => {
                    let value = require_value(args, "--age")?;
                    request.age_category = value
                        .parse::<AgeCategory>()
                        .map_err(|_| ArgsError::InvalidAgeCategory { raw: value.clone() })?;
                }
                "--json" => json = true,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { request, json })
    }
}

fn parse_command(argv: Vec<String>) -> Result<Command, ArgsError> {
    let mut iter = argv.into_iter();
    match iter.next().as_deref() {
        None | Some("ui") => match iter.next() {
            None => Ok(Command::Ui),
            Some(arg) if arg == "--help" || arg == "-h" => Ok(Command::Help),
            Some(arg) => Err(ArgsError::UnknownArg(arg)),
        },
        Some("--help" | "-h") => Ok(Command::Help),
        Some("generate") => {
            let mut rest = iter.peekable();
            if rest
                .peek()
                .is_some_and(|arg| arg == "--help" || arg == "-h")
            {
                return Ok(Command::Help);
            }
            GenerateArgs::parse(&mut rest).map(Command::Generate)
        }
        Some(other) => Err(ArgsError::UnknownCommand(other.to_string())),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn launch_ui(services: AppServices) {
    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
    let context = build_app_context(&app);

    // Some dev setups default to an always-on-top window.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Math Problem Generator")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
}

async fn generate_once(
    services: &AppServices,
    args: GenerateArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = services.new_session();
    let problems = services.problems();
    let trigger = session
        .run_generation(&problems, args.request, services.clock().now())
        .await;
    if !matches!(trigger, Trigger::Fetch(_)) {
        return Err(format!("generation was not started: {trigger:?}").into());
    }

    let state = session.state();
    if let Some(error) = state.error_message() {
        return Err(error.to_string().into());
    }
    let problem = state.problem_text().unwrap_or_default();

    if args.json {
        let output = serde_json::json!({
            "problem": problem,
            "solution": state.solution_text(),
            "notice": state.notice(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if let Some(notice) = state.notice() {
        eprintln!("{notice}");
    }
    println!("Problem:\n{problem}");
    if let Some(solution) = state.solution_text() {
        println!();
        println!("Solution:\n{solution}");
    }
    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let command = parse_command(argv).inspect_err(|err| {
        eprintln!("{err}");
        print_usage();
    })?;

    if command == Command::Help {
        print_usage();
        return Ok(());
    }

    // A missing .env is fine; the process environment still applies.
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ProviderConfig::from_env()?;
    tracing::debug!(?config, "configuration loaded");
    let services = AppServices::from_config(&config, Clock::system())?;

    match command {
        Command::Help => Ok(()),
        Command::Ui => {
            launch_ui(services);
            Ok(())
        }
        Command::Generate(args) => {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            runtime.block_on(generate_once(&services, args))
        }
    }
}

fn main() {
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
