

use std::env;

use roundup::core::config::SourceKind;
use roundup::{RecommendationService, RoundupConfig};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("roundup=warn".parse()?))
        .init();

    let args: Vec<String> = env::args().collect();

    let mut user: Option<String> = None;
    let mut compare: Option<String> = None;
    let mut snapshot: Option<String> = None;
    let mut limit: Option<usize> = None;
    let mut groups = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--user" | "-u" => {
                if i + 1 < args.len() {
                    user = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--compare" | "-c" => {
                if i + 1 < args.len() {
                    compare = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--snapshot" | "-s" => {
                if i + 1 < args.len() {
                    snapshot = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--limit" | "-n" => {
                if i + 1 < args.len() {
                    limit = Some(args[i + 1].parse()?);
                    i += 1;
                }
            }
            "--groups" | "-g" => groups = true,
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_help();
                std::process::exit(2);
            }
        }
        i += 1;
    }

    let Some(user) = user else {
        eprintln!("Missing --user");
        print_help();
        std::process::exit(2);
    };

    let config = match snapshot {
        Some(path) => RoundupConfig {
            source: SourceKind::Snapshot,
            snapshot_path: Some(path),
            ..RoundupConfig::from_env()
        },
        None => RoundupConfig::load()?,
    };
    let service = RecommendationService::from_config(config)?;

    let json = if let Some(other) = compare {
        serde_json::to_string_pretty(&service.compare_users(&user, &other).await?)?
    } else if groups {
        serde_json::to_string_pretty(&service.recommend_groups(&user, limit).await?)?
    } else {
        serde_json::to_string_pretty(&service.recommend_friends(&user, limit).await?)?
    };

    println!("{}", json);
    Ok(())
}

fn print_help() {
    println!("RoundUp recommendations");
    println!();
    println!("USAGE:");
    println!("    roundup-recommend --user <ID> [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -u, --user <ID>        User to recommend for (required)");
    println!("    -g, --groups           Recommend groups instead of friends");
    println!("    -c, --compare <ID>     Explain the score between --user and <ID>");
    println!("    -n, --limit <N>        Max results (default from config, 10)");
    println!("    -s, --snapshot <PATH>  Read profiles from a JSON snapshot");
    println!("    -h, --help             Print help");
}
