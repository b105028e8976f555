use clap::Parser;
use log::info;
use promode_query::Target;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Servers to query, as host:port
    #[arg(required = true)]
    servers: Vec<String>,

    /// Per-server timeout in seconds (fractional allowed)
    #[arg(short, long, default_value = "1.0")]
    timeout: f64,

    /// Query servers one after another instead of concurrently
    #[arg(long)]
    sequential: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();
    let timeout = Duration::from_secs_f64(args.timeout);
    let targets = parse_targets(&args.servers)?;

    info!("Querying {} server(s), timeout {:?}", targets.len(), timeout);

    let outcomes = if args.sequential {
        let targets = targets.clone();
        tokio::task::spawn_blocking(move || promode_query::query_many(&targets, timeout)).await?
    } else {
        promode_query::tokio::query_many(&targets, timeout).await
    };

    for (target, outcome) in targets.iter().zip(outcomes) {
        println!("--- {}:{}", target.address, target.port);
        match outcome {
            Ok(info) => println!("{}", serde_json::to_string_pretty(&info)?),
            Err(e) => println!("{}", e),
        }
    }

    Ok(())
}

fn parse_targets(servers: &[String]) -> Result<Vec<Target>, Box<dyn std::error::Error>> {
    servers
        .iter()
        .map(|server| {
            let (address, port) = server
                .rsplit_once(':')
                .ok_or_else(|| format!("expected host:port, got {:?}", server))?;
            let port = port
                .parse::<u32>()
                .map_err(|_| format!("invalid port in {:?}", server))?;
            Ok(Target::new(address, port))
        })
        .collect()
}
