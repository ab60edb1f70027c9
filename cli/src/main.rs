use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use coursematch_core::{Column, Recommender, DEFAULT_TOP_N};
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "coursematch")]
#[command(about = "Inspect a course catalog and query it offline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show how the CSV columns were resolved and how large the index is
    Inspect {
        /// Catalog CSV path
        #[arg(long)]
        data: String,
    },
    /// Print recommendations for a query as JSON
    Query {
        /// Catalog CSV path
        #[arg(long)]
        data: String,
        /// Free-text query
        #[arg(long)]
        q: String,
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        top_n: usize,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect { data } => {
            let reco = load(&data)?;
            print!("{}", inspect_report(&reco));
            Ok(())
        }
        Commands::Query { data, q, top_n } => {
            let reco = load(&data)?;
            let results = reco.recommend(&q, top_n);
            println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "query": q, "results": results }))?);
            Ok(())
        }
    }
}

fn load(data: &str) -> Result<Recommender> {
    let reco = Recommender::from_path(Path::new(data)).with_context(|| format!("loading catalog {data}"))?;
    tracing::info!(path = data, rows = reco.records().len(), "catalog loaded");
    Ok(reco)
}

fn inspect_report(reco: &Recommender) -> String {
    let describe = |c: &Option<Column>| match c {
        Some(c) => format!("{} (column {})", c.name, c.index),
        None => "-".to_string(),
    };
    let mapping = reco.mapping();
    let index = reco.index();
    let mut out = String::new();
    out.push_str(&format!("columns:     {}\n", reco.headers().join(", ")));
    out.push_str(&format!("title:       {}\n", match &mapping.title {
        Some(_) => describe(&mapping.title),
        None => format!("{} (fallback: first column)", reco.headers()[0]),
    }));
    out.push_str(&format!("url:         {}\n", describe(&mapping.url)));
    out.push_str(&format!("rating:      {}\n", describe(&mapping.rating)));
    out.push_str(&format!("description: {}\n", describe(&mapping.description)));
    out.push_str(&format!("records:     {}\n", reco.records().len()));
    out.push_str(&format!("vocabulary:  {}\n", index.vocabulary_len()));
    out.push_str(&format!("nonzeros:    {}\n", index.nnz()));
    out
}
