//! agri CLI binary: ask the farm assistant and view dashboard data from the terminal.
//!
//! Subcommands: `ask`, `listen`, `weather`, `pests`, `calendar`, `subsidies`, `prices`,
//! `diagnose`, `profile`. `-i` starts an interactive session.

mod logging;
mod repl;

use std::path::{Path, PathBuf};

use agri::dashboard::ANALYZING_STATUS;
use agri::{
    price_history, seed_market_prices, seed_pest_alerts, seed_subsidies, Assistant,
    MockDiagnoser, PestDiagnoser, ProfileField, Query,
};
use agri_cli::{
    open_assistant, render_calendar, render_diagnosis, render_history, render_notice,
    render_pests, render_prices, render_profile, render_subsidies, render_turn, render_weather,
    SessionOptions,
};
use clap::{Parser, Subcommand};
use config::Settings;
use repl::run_repl_loop;

#[derive(Parser, Debug)]
#[command(name = "agri")]
#[command(about = "AgriAssistant: farm assistant for weather, pests, subsidies and prices")]
struct Args {
    #[command(subcommand)]
    cmd: Option<Command>,

    /// Profile database (default: AGRI_PROFILE_DB or <data dir>/agri/profile.db)
    #[arg(long, value_name = "PATH", global = true)]
    profile_db: Option<PathBuf>,

    /// Speech locale: ml-IN (default) or en-IN
    #[arg(long, value_name = "TAG", global = true)]
    locale: Option<String>,

    /// Echo spoken replies on stderr
    #[arg(long, global = true)]
    speak: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// With --json, pretty-print (multi-line)
    #[arg(long, global = true)]
    pretty: bool,

    /// Interactive session: one query per line until EOF or `quit`
    #[arg(short, long)]
    interactive: bool,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Ask a question (e.g. "weather", "pest", "subsidy")
    Ask {
        #[arg(required = true, trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// Listen for one spoken query (reads the transcript from stdin)
    Listen,
    /// Fetch weather for the profile location
    Weather,
    /// List nearby pest alerts
    Pests,
    /// Show the crop calendar for the profile crops
    Calendar,
    /// List subsidies and schemes
    Subsidies,
    /// Show market prices, or the price history of one crop
    Prices(PricesArgs),
    /// Diagnose pests from a leaf image
    Diagnose {
        #[arg(value_name = "IMAGE")]
        image: PathBuf,
    },
    /// Show or edit the farm profile
    Profile(ProfileArgs),
}

#[derive(clap::Args, Debug, Clone)]
struct PricesArgs {
    /// Crop name (exact, e.g. Rice)
    #[arg(long, value_name = "CROP")]
    history: Option<String>,
}

#[derive(clap::Args, Debug, Clone)]
struct ProfileArgs {
    #[command(subcommand)]
    sub: Option<ProfileCommand>,
}

#[derive(Subcommand, Debug, Clone)]
enum ProfileCommand {
    /// Print the profile (default)
    Show,
    /// Set one field: name, location, land_size, soil_type, irrigation, crops (comma separated)
    Set { field: String, value: String },
    /// Write the current profile to the store
    Save,
    /// Clear the stored profile and restore defaults
    Reset,
}

/// Where and how results are printed.
pub struct Output {
    pub json: bool,
    pub pretty: bool,
}

impl Output {
    pub fn write_json(&self, value: &serde_json::Value) -> Result<(), Box<dyn std::error::Error>> {
        let s = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        println!("{}", s);
        std::io::Write::flush(&mut std::io::stdout())?;
        Ok(())
    }

    /// Prints `value` as JSON or `text` as is.
    fn emit<T: serde::Serialize>(
        &self,
        value: &T,
        text: impl FnOnce() -> String,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if self.json {
            self.write_json(&serde_json::to_value(value)?)
        } else {
            println!("{}", text());
            Ok(())
        }
    }
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("agri: {}", msg);
    std::process::exit(1);
}

async fn assistant(settings: &Settings, args: &Args) -> Assistant {
    let opts = SessionOptions {
        profile_db: args.profile_db.clone(),
        locale: args.locale.clone(),
        speak: args.speak,
    };
    match open_assistant(settings, &opts).await {
        Ok(a) => a,
        Err(e) => fail(e),
    }
}

async fn ask(
    assistant: &mut Assistant,
    text: String,
    out: &Output,
) -> Result<(), Box<dyn std::error::Error>> {
    let turn = assistant.handle_query(Query::typed(text)).await;
    out.emit(&turn, || render_turn(&turn))?;
    for notice in &turn.notices {
        eprintln!("{}", render_notice(notice));
    }
    Ok(())
}

async fn run_profile(
    assistant: &mut Assistant,
    sub: ProfileCommand,
    out: &Output,
) -> Result<(), Box<dyn std::error::Error>> {
    match sub {
        ProfileCommand::Show => {}
        ProfileCommand::Set { field, value } => {
            let field: ProfileField = field.parse().unwrap_or_else(|e| fail(e));
            if let Err(e) = assistant.update_profile(field, &value).await {
                fail(e);
            }
        }
        ProfileCommand::Save => {
            let notice = assistant.save_profile().await.unwrap_or_else(|e| fail(e));
            eprintln!("{}", render_notice(&notice));
        }
        ProfileCommand::Reset => {
            if let Err(e) = assistant.reset_profile().await {
                fail(e);
            }
        }
    }
    let profile = assistant.profile();
    out.emit(profile, || render_profile(profile))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    config::load_and_apply("agri", None::<&Path>).ok();
    let settings = Settings::from_env().unwrap_or_else(|e| fail(e));
    let _log_guard = logging::init(settings.log_dir.as_deref())?;

    let args = Args::parse();
    let out = Output {
        json: args.json,
        pretty: args.pretty,
    };

    if args.interactive {
        let mut a = assistant(&settings, &args).await;
        if let Some(Command::Ask { text }) = &args.cmd {
            ask(&mut a, text.join(" "), &out).await?;
        }
        return run_repl_loop(&mut a, &out).await;
    }

    let Some(cmd) = args.cmd.clone() else {
        fail("provide a command (see --help) or use -i/--interactive");
    };

    match cmd {
        Command::Ask { text } => {
            let mut a = assistant(&settings, &args).await;
            ask(&mut a, text.join(" "), &out).await?;
        }
        Command::Listen => {
            let mut a = assistant(&settings, &args).await;
            match a.listen().await {
                Ok(Some(turn)) => {
                    out.emit(&turn, || render_turn(&turn))?;
                    for notice in &turn.notices {
                        eprintln!("{}", render_notice(notice));
                    }
                }
                Ok(None) => eprintln!("(no speech)"),
                Err(notice) => fail(render_notice(&notice)),
            }
        }
        Command::Weather => {
            let mut a = assistant(&settings, &args).await;
            match a.fetch_weather().await {
                Ok(report) => out.emit(&report, || render_weather(&report))?,
                Err(notice) => fail(render_notice(&notice)),
            }
        }
        Command::Pests => {
            let alerts = seed_pest_alerts();
            out.emit(&alerts, || render_pests(&alerts))?;
        }
        Command::Calendar => {
            let a = assistant(&settings, &args).await;
            let plans = a.crop_calendar();
            out.emit(&plans, || render_calendar(&plans))?;
        }
        Command::Subsidies => {
            let subsidies = seed_subsidies();
            out.emit(&subsidies, || render_subsidies(&subsidies))?;
        }
        Command::Prices(pa) => {
            let prices = seed_market_prices();
            match pa.history {
                Some(crop) => {
                    let history = price_history(&prices, &crop);
                    out.emit(&history, || render_history(&crop, &history))?;
                }
                None => out.emit(&prices, || render_prices(&prices))?,
            }
        }
        Command::Diagnose { image } => {
            if !out.json {
                eprintln!("{}", ANALYZING_STATUS);
            }
            let diagnoser = MockDiagnoser::new(settings.diagnosis_delay);
            match diagnoser.diagnose(&image).await {
                Ok(d) => out.emit(&d, || render_diagnosis(&d))?,
                Err(e) => fail(e),
            }
        }
        Command::Profile(pa) => {
            let mut a = assistant(&settings, &args).await;
            run_profile(&mut a, pa.sub.unwrap_or(ProfileCommand::Show), &out).await?;
        }
    }
    Ok(())
}
