mod app;
mod config;
mod domain;
mod input;
mod logging;
mod report;
mod storage;
mod ui;

use anyhow::Result;
use app::AppState;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use config::{load_config, save_config, PlannerConfig, PlannerPaths};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{week_key, WeekKey};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use storage::{ensure_dir, get_planner_dir, init_local_planner, HttpTaskApi, LocalStore, StorageAdapter, SyncWorker};

/// How long the UI loop waits for a key before polling sync events again
const POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Parser)]
#[command(name = "weekgrid")]
#[command(about = "A terminal weekly planner: seven day columns of task cards synced to a tasks API", long_about = None)]
struct Cli {
    /// Base URL of the tasks API. Overrides config.json.
    #[arg(long, global = true)]
    api: Option<String>,
    /// Keep tasks in the local file only, never contact the server
    #[arg(long, global = true)]
    offline: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .weekgrid directory in the current directory
    Init,
    /// Print the tasks of a week
    Show {
        /// Any date inside the week (YYYY-MM-DD format). Defaults to today.
        #[arg(short, long)]
        date: Option<String>,
        /// Write the week as markdown to this file instead of printing it
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Remove every task of a week, on the server and in the local file
    Clear {
        /// Any date inside the week (YYYY-MM-DD format). Defaults to today.
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Delete the local fallback file
    ResetLocal,
}

/// Resolved planner directory plus its settings
struct Planner {
    paths: PlannerPaths,
    config: PlannerConfig,
}

impl Planner {
    fn open(api: Option<String>, offline: bool) -> Result<Self> {
        let dir = ensure_dir(get_planner_dir()?)?;
        let paths = PlannerPaths::new(dir);
        let config = load_config(paths.config_file())?.with_overrides(api, offline);
        Ok(Self { paths, config })
    }

    fn local_store(&self) -> LocalStore {
        LocalStore::new(self.paths.local_store_file())
    }

    fn adapter(&self) -> StorageAdapter<HttpTaskApi> {
        if self.config.offline {
            StorageAdapter::offline(self.local_store())
        } else {
            StorageAdapter::new(
                HttpTaskApi::new(&self.config.api_base, self.config.timeout()),
                self.local_store(),
            )
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            let planner_dir = init_local_planner()?;
            let paths = PlannerPaths::new(&planner_dir);
            if !paths.config_file().exists() {
                save_config(paths.config_file(), &PlannerConfig::default())?;
            }
            println!("Initialized weekgrid directory: {}", planner_dir.display());
            println!();
            println!("Edit {} to point at your tasks API.", paths.config_file().display());
            println!("Run 'weekgrid' to plan your week.");
            Ok(())
        }
        Some(Commands::Show { date, output }) => {
            logging::init_stderr_logging()?;
            let planner = Planner::open(cli.api, cli.offline)?;
            let key = target_week(date)?;
            let week = planner.adapter().load(&key);

            match output {
                Some(path) => {
                    let path = report::write_week_report(key, &week, PathBuf::from(path))?;
                    println!("Week written to {}", path.display());
                }
                None => print!("{}", report::render_week_report(key, &week)),
            }
            Ok(())
        }
        Some(Commands::Clear { date }) => {
            logging::init_stderr_logging()?;
            let planner = Planner::open(cli.api, cli.offline)?;
            let key = target_week(date)?;

            planner.adapter().clear(&key);

            let local = planner.local_store();
            let mut store = local.load_or_empty();
            store.week_mut(key).clear();
            local.save(&store)?;

            println!("Cleared week {}", key);
            Ok(())
        }
        Some(Commands::ResetLocal) => {
            let planner = Planner::open(cli.api, cli.offline)?;
            let local = planner.local_store();
            if local.reset()? {
                println!("Removed {}", local.path().display());
            } else {
                println!("No local file at {}", local.path().display());
            }
            Ok(())
        }
        None => run_tui(cli.api, cli.offline),
    }
}

/// Week containing the given date, or the current week
fn target_week(date: Option<String>) -> Result<WeekKey> {
    let date = match date {
        Some(date_str) => NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
            .map_err(|e| anyhow::anyhow!("Invalid date format. Use YYYY-MM-DD: {}", e))?,
        None => Local::now().date_naive(),
    };
    Ok(week_key(date))
}

fn run_tui(api: Option<String>, offline: bool) -> Result<()> {
    let planner = Planner::open(api, offline)?;
    logging::init_file_logging(planner.paths.log_file())?;
    tracing::info!(
        dir = %planner.paths.dir.display(),
        api = %planner.config.api_base,
        offline = planner.config.offline,
        "starting weekgrid"
    );

    // The local mirror seeds the grid until the first load completes
    let store = planner.local_store().load_or_empty();
    tracing::debug!(weeks = store.len(), "local mirror loaded");
    let mut app = AppState::new(store, Local::now().date_naive(), planner.config.offline);
    let worker = SyncWorker::spawn(planner.adapter());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app, &worker);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Let queued saves finish before exiting
    for request in app.take_requests() {
        worker.send(request);
    }
    worker.shutdown();

    if let Err(err) = result {
        tracing::error!(error = %err, "weekgrid stopped with an error");
        eprintln!("Error: {}", err);
    }
    tracing::info!("weekgrid stopped");

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    worker: &SyncWorker,
) -> Result<()> {
    loop {
        for request in app.take_requests() {
            worker.send(request);
        }
        for sync_event in worker.poll_events() {
            app.apply_event(sync_event);
        }

        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key) {
                    return Ok(());
                }
            }
        }
    }
}
