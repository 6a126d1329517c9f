use anyhow::{bail, Context, Result};
use food_lookup::cli::{parse_args, BuildArgs, Commands, DatasetArgs};
use food_lookup::config::AppConfig;
use food_lookup::dataset::{build_records_from_path, write_artifact, ColumnLayout};
use food_lookup::search::FoodLookup;
use serde::Serialize;
use tokio::fs;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

async fn run_build(config: &AppConfig, args: &BuildArgs) -> Result<()> {
    let source_path = config.source_path.clone();
    let output = tokio::task::spawn_blocking(move || {
        build_records_from_path(&source_path, &ColumnLayout::standard())
    })
    .await?
    .with_context(|| format!("Failed to build dataset from {:?}", config.source_path))?;

    if args.strict && !output.report.duplicate_codes.is_empty() {
        bail!(
            "duplicated food codes in source table: {}",
            output.report.duplicate_codes.join(", ")
        );
    }

    write_artifact(&output.records, &config.dataset_path)?;
    info!(
        source = %config.source_path.display(),
        output = %config.dataset_path.display(),
        records = output.records.len(),
        "build finished"
    );
    Ok(())
}

async fn load_lookup(config: &AppConfig) -> Result<FoodLookup> {
    let json = fs::read_to_string(&config.dataset_path)
        .await
        .with_context(|| format!("Failed to read dataset '{}'; run `build` first", config.dataset_path.display()))?;
    FoodLookup::from_json_str(&json)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn config_for(base: &AppConfig, args: &DatasetArgs) -> AppConfig {
    base.clone().with_overrides(None, args.dataset.clone())
}

async fn run() -> Result<()> {
    let cli = parse_args();
    let base = AppConfig::from_env();

    match cli.command {
        Commands::Build(args) => {
            let config = base.with_overrides(args.source.clone(), args.output.clone());
            run_build(&config, &args).await
        }
        Commands::Search(args) => {
            let lookup = load_lookup(&config_for(&base, &args.dataset)).await?;
            print_json(&lookup.search_by_name(&args.query))
        }
        Commands::Category(args) => {
            let lookup = load_lookup(&config_for(&base, &args.dataset)).await?;
            print_json(&lookup.search_by_category(&args.category))
        }
        Commands::Get(args) => {
            let lookup = load_lookup(&config_for(&base, &args.dataset)).await?;
            match lookup.get_food_by_code(&args.code) {
                Some(food) => print_json(food),
                None => {
                    info!(code = %args.code, "no food with this code");
                    print_json(&Option::<()>::None)
                }
            }
        }
        Commands::Categories(args) => {
            let lookup = load_lookup(&config_for(&base, &args)).await?;
            print_json(&lookup.categories())
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    init_tracing();

    if let Err(err) = run().await {
        error!(error = %err, "command failed");
        for cause in err.chain().skip(1) {
            error!(cause = %cause, "caused by");
        }
        std::process::exit(1);
    }
}
