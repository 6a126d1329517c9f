use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Build and query a normalized food composition dataset", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Normalize the source table into the JSON dataset
    Build(BuildArgs),
    /// Search foods by name or phonetic reading
    Search(SearchArgs),
    /// List foods in a category
    Category(CategoryArgs),
    /// Look up one food by its code
    Get(GetArgs),
    /// List the categories present in the dataset
    Categories(DatasetArgs),
}

#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    /// Path to the delimited source table
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// Where to write the JSON dataset
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Fail when the output would contain duplicated food codes
    #[arg(long, default_value_t = false)]
    pub strict: bool,
}

#[derive(Args, Debug, Clone)]
pub struct DatasetArgs {
    /// Path to the JSON dataset produced by `build`
    #[arg(short, long)]
    pub dataset: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    pub query: String,

    #[command(flatten)]
    pub dataset: DatasetArgs,
}

#[derive(Args, Debug, Clone)]
pub struct CategoryArgs {
    pub category: String,

    #[command(flatten)]
    pub dataset: DatasetArgs,
}

#[derive(Args, Debug, Clone)]
pub struct GetArgs {
    pub code: String,

    #[command(flatten)]
    pub dataset: DatasetArgs,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
