use clap::{Args, Parser, Subcommand};
use fitplan_core::api::{self, ApiError, ApiResult};
use fitplan_core::*;
use serde_json::{Map, Value};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "fitplan")]
#[command(about = "Personalized home workout plan generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Read configuration from this file instead of the default path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a weekly plan from questionnaire answers
    Generate(GenerateArgs),

    /// Manage saved workouts
    Saved {
        #[command(subcommand)]
        action: SavedCommand,
    },
}

#[derive(Args)]
struct GenerateArgs {
    /// Read preferences from a JSON file ('-' for stdin)
    #[arg(long, conflicts_with_all = ["goal", "experience", "days", "minutes", "cardio", "focus"])]
    input: Option<PathBuf>,

    /// fat_loss, muscle_gain, strength, endurance or mobility
    #[arg(long)]
    goal: Option<String>,

    /// beginner, intermediate or advanced
    #[arg(long)]
    experience: Option<String>,

    /// Training days per week (3-7)
    #[arg(long, allow_negative_numbers = true)]
    days: Option<f64>,

    /// Minutes per session (15-60)
    #[arg(long, allow_negative_numbers = true)]
    minutes: Option<f64>,

    /// none, low_impact, hiit_ok or running_ok
    #[arg(long)]
    cardio: Option<String>,

    /// full_body, upper, lower, core, glutes or posture
    #[arg(long)]
    focus: Option<String>,

    /// Allow exercises that use chairs, tables or towels
    #[arg(long)]
    household: bool,

    /// Free-text limitations (recorded, not applied)
    #[arg(long)]
    constraints: Option<String>,

    #[arg(long)]
    pushups_max: Option<f64>,

    #[arg(long)]
    squats_max: Option<f64>,

    #[arg(long)]
    plank_seconds: Option<f64>,

    /// Seed exercise selection for a reproducible plan
    #[arg(long)]
    seed: Option<u64>,

    /// Print the plan as JSON
    #[arg(long)]
    json: bool,

    /// Save the generated plan for --user
    #[arg(long, requires = "user")]
    save: bool,

    /// Owner of saved workouts
    #[arg(long)]
    user: Option<String>,
}

#[derive(Subcommand)]
enum SavedCommand {
    /// List saved workouts, newest first
    List {
        #[arg(long)]
        user: String,

        #[arg(long)]
        json: bool,
    },

    /// Print one saved workout
    Show {
        #[arg(long)]
        user: String,

        #[arg(long)]
        id: Uuid,

        #[arg(long)]
        json: bool,
    },

    /// Save a plan from a JSON file
    Add {
        #[arg(long)]
        user: String,

        /// Plan JSON as printed by `generate --json`
        #[arg(long)]
        file: PathBuf,
    },

    /// Delete a saved workout
    Delete {
        #[arg(long)]
        user: String,

        #[arg(long)]
        id: Uuid,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        fitplan_core::logging::init_with_level("debug");
    } else {
        fitplan_core::logging::init();
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let body = serde_json::to_string(&err.body).unwrap_or_else(|_| err.to_string());
            eprintln!("{}", body);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> ApiResult<()> {
    let config = match cli.config.as_deref() {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .map_err(|e| ApiError::from_error(e, "Failed to load configuration"))?;

    // Determine data directory
    let data_dir = cli
        .data_dir
        .unwrap_or_else(|| config.data.data_dir.clone());
    tracing::debug!("Using data directory {:?}", data_dir);

    match cli.command {
        Commands::Generate(args) => cmd_generate(args, &config, &data_dir),
        Commands::Saved { action } => cmd_saved(action, &data_dir),
    }
}

fn cmd_generate(args: GenerateArgs, config: &Config, data_dir: &Path) -> ApiResult<()> {
    let catalog = get_default_catalog();
    let errors = catalog.validate();
    if !errors.is_empty() {
        return Err(ApiError::from_error(
            Error::CatalogValidation(errors.join("; ")),
            "Failed to generate plan",
        ));
    }

    let body = match &args.input {
        Some(path) => api::parse_body(&read_input(path)?)?,
        None => preferences_from_flags(&args),
    };

    let mut generation = config.generation.clone();
    if args.seed.is_some() {
        generation.seed = args.seed;
    }
    let mut selector = api::selector_for(&generation);

    let plan = api::generate(&body, catalog, &generation, &mut selector)?;

    if args.json {
        println!("{}", to_pretty_json(&plan)?);
    } else {
        display_plan(&plan);
    }

    if args.save {
        let owner = args.user.as_deref().unwrap_or_default();
        let mut store = JsonFileStore::new(data_dir);
        let saved = api::save_plan(&mut store, owner, plan)?;
        // Keep stdout parseable in JSON mode
        if args.json {
            eprintln!("✓ Saved workout {}", saved.id);
        } else {
            println!("✓ Saved workout {}", saved.id);
        }
    }

    Ok(())
}

fn cmd_saved(action: SavedCommand, data_dir: &Path) -> ApiResult<()> {
    let mut store = JsonFileStore::new(data_dir);

    match action {
        SavedCommand::List { user, json } => {
            let saved = api::list_saved(&store, &user)?;
            if json {
                println!("{}", to_pretty_json(&saved)?);
                return Ok(());
            }

            if saved.is_empty() {
                println!("No saved workouts yet.");
            }
            for workout in &saved {
                println!(
                    "  {}  {}  (saved {})",
                    workout.id,
                    workout.name,
                    workout.created_at.format("%b %-d, %Y")
                );
            }
            println!("{} / {} workouts saved", saved.len(), MAX_SAVED_PER_USER);
        }

        SavedCommand::Show { user, id, json } => {
            let saved = api::show_saved(&store, &user, id)?;
            if json {
                println!("{}", to_pretty_json(&saved.plan)?);
            } else {
                display_plan(&saved.plan);
            }
        }

        SavedCommand::Add { user, file } => {
            let body = api::parse_body(&read_input(&file)?)?;
            let saved = api::save_plan_json(&mut store, &user, &body)?;
            println!("✓ Saved workout {}", saved.id);
        }

        SavedCommand::Delete { user, id } => {
            api::delete_saved(&mut store, &user, id)?;
            println!("✓ Workout deleted");
        }
    }

    Ok(())
}

fn read_input(path: &Path) -> ApiResult<String> {
    let result = if path == Path::new("-") {
        let mut contents = String::new();
        std::io::stdin()
            .read_to_string(&mut contents)
            .map(|_| contents)
    } else {
        std::fs::read_to_string(path)
    };

    result.map_err(|e| ApiError::from_error(Error::Io(e), "Failed to read input"))
}

fn to_pretty_json<T: serde::Serialize>(value: &T) -> ApiResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::from_error(Error::Json(e), "Failed to render output"))
}

/// Build the same JSON body a client would post from the CLI flags
///
/// Flags that were not given are left out so validation reports them.
fn preferences_from_flags(args: &GenerateArgs) -> Value {
    let mut body = Map::new();
    let mut put = |key: &str, value: Option<Value>| {
        if let Some(v) = value {
            body.insert(key.to_string(), v);
        }
    };

    put("goal", args.goal.clone().map(Value::from));
    put("experience", args.experience.clone().map(Value::from));
    put("days_per_week", args.days.map(Value::from));
    put("minutes_per_session", args.minutes.map(Value::from));
    put("cardio_preference", args.cardio.clone().map(Value::from));
    put("constraints", args.constraints.clone().map(Value::from));
    put("focus", args.focus.clone().map(Value::from));
    put("household_items_allowed", Some(Value::from(args.household)));

    let mut baselines = Map::new();
    for (key, value) in [
        ("pushups_max", args.pushups_max),
        ("squats_max", args.squats_max),
        ("plank_seconds", args.plank_seconds),
    ] {
        if let Some(v) = value {
            baselines.insert(key.to_string(), Value::from(v));
        }
    }
    if !baselines.is_empty() {
        put("baselines", Some(Value::Object(baselines)));
    }

    Value::Object(body)
}

fn display_plan(plan: &WorkoutPlan) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  {}", plan.plan_name);
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  Goal: {}", plan.overview.goal);
    println!("  Structure: {}", plan.overview.weekly_structure);
    println!("  Guidance: {}", plan.overview.intensity_guidance);

    for day in &plan.days {
        println!();
        if day.is_rest_day {
            println!("{} · {}", day.day, day.focus);
            continue;
        }

        println!("{} · {} ({} min)", day.day, day.focus, day.duration_minutes);
        for drill in &day.warmup {
            println!("  Warmup: {} ({}s)", drill.name, drill.time_seconds);
        }
        for block in &day.workout {
            println!("  {} [{:?}]", block.block_name, block.format);
            for rx in &block.exercises {
                println!(
                    "    → {}: {} x {}, rest {}s, tempo {}, RPE {:.1}",
                    rx.name, rx.sets, rx.reps, rx.rest_seconds, rx.tempo, rx.rpe
                );
                println!(
                    "      Easier: {} · Harder: {}",
                    rx.substitutions.easier, rx.substitutions.harder
                );
            }
        }
        for drill in &day.cooldown {
            println!("  Cooldown: {} ({}s)", drill.name, drill.time_seconds);
        }
        if let DayStatus::Partial { skipped_patterns } = &day.status {
            let skipped: Vec<_> = skipped_patterns.iter().map(|p| p.to_string()).collect();
            println!("  ⚠ No eligible exercise for: {}", skipped.join(", "));
        }
    }

    println!();
    println!("Next week:");
    for tip in &plan.next_week_progression {
        println!("  • {}", tip);
    }
    println!();
}
