use clap::{Parser, Subcommand};
use anyhow::Result;
use tracing::info;

mod app;
mod handler;
mod logging;
mod tui;
mod ui;

use app::App;
use folio::demo::{DEMO_ANSWER, DEMO_QUESTION};
use folio::responder::classify;
use folio::{CannedResponder, Config, DelayRange};
use tui::{EventHandler, Tui};

#[derive(Parser)]
#[command(name = "folio")]
#[command(version, about = "Portfolio hero terminal with a scripted demo and canned chat")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive terminal (default)
    Chat {
        /// Accent colour, e.g. "cyan" or "#ff8800"
        #[arg(long)]
        accent: Option<String>,
        /// Skip the demo and start with the input focused
        #[arg(long)]
        no_demo: bool,
    },
    /// Ask a single question and print the reply
    Ask {
        /// Your question
        question: String,
        /// Reply immediately instead of simulating thinking time
        #[arg(long)]
        instant: bool,
    },
    /// Print the demo script
    Demo,
    /// Show the effective configuration and where it is read from
    Config {
        /// Write the effective configuration to the config file
        #[arg(long)]
        init: bool,
    },
    /// Show name, title and links
    About,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging is best effort
    let _log_guard = logging::init().ok();

    let config = Config::load_or_default();

    match cli.command.unwrap_or(Commands::Chat { accent: None, no_demo: false }) {
        Commands::Chat { accent, no_demo } => run_chat(&config, accent.as_deref(), no_demo).await?,
        Commands::Ask { question, instant } => ask(&config, &question, instant).await,
        Commands::Demo => print_demo(),
        Commands::Config { init } => print_config(&config, init)?,
        Commands::About => print_about(&config),
    }

    Ok(())
}

async fn run_chat(config: &Config, accent: Option<&str>, no_demo: bool) -> Result<()> {
    info!(no_demo, "starting terminal");
    let mut app = App::new(config, accent, no_demo);

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = EventHandler::new(config.tick_interval());

    let result = run_loop(&mut terminal, &mut app, &mut events).await;

    tui::restore()?;
    info!(messages = app.widget.transcript().len(), "terminal closed");
    result
}

async fn run_loop(terminal: &mut Tui, app: &mut App, events: &mut EventHandler) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        match events.next().await {
            Some(event) => handler::handle_event(app, event).await?,
            None => break,
        }
    }
    Ok(())
}

async fn ask(config: &Config, question: &str, instant: bool) {
    let responder = if instant {
        CannedResponder::new(DelayRange::instant())
    } else {
        config.responder()
    };

    info!(category = classify(question).as_str(), "one-shot question");
    let reply = responder.resolve(question).await;
    println!("{}", reply);
}

fn print_demo() {
    println!("> {}\n", DEMO_QUESTION);
    println!("{}", DEMO_ANSWER);
}

fn print_config(config: &Config, init: bool) -> Result<()> {
    if init {
        config.save()?;
        info!("config written");
    }
    match Config::get_config_path() {
        Ok(path) if path.exists() => println!("# {}", path.display()),
        Ok(path) => println!("# {} (not found, showing defaults)", path.display()),
        Err(_) => println!("# no config directory, showing defaults"),
    }
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}

fn print_about(config: &Config) {
    let profile = &config.profile;
    println!("[{}] {} ({})", profile.logo, profile.name, profile.full_name);
    println!("{}", profile.title);
    println!();
    println!("  github    {}", config.links.github);
    println!("  linkedin  {}", config.links.linkedin);
    println!("  email     {}", config.links.email);
}
