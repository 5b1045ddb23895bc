use std::net::Ipv4Addr;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use rawdns::dns::resolver::{resolve_ipv4_async, transporter};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "resolve")]
#[command(version)]
#[command(about = "Resolve a hostname to an IPv4 address by talking DNS over UDP directly")]
struct Cli {
    /// Hostname to resolve
    hostname: String,

    /// Name server to ask (ip:port) [default: 1.1.1.1:53]
    #[arg(short = 's', long, value_name = "ADDR")]
    server: Option<String>,

    /// Seconds to wait for the answer
    #[arg(short = 't', long, value_name = "SECS", default_value_t = 3)]
    timeout: u64,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Serialize)]
struct Resolution<'a> {
    hostname: &'a str,
    address: Ipv4Addr,
}

/// Logs go to stderr so stdout only carries the answer.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .try_init()
        .ok();
}

fn render(hostname: &str, address: Ipv4Addr, json: bool) -> anyhow::Result<String> {
    if json {
        Ok(serde_json::to_string(&Resolution { hostname, address })?)
    } else {
        Ok(format!("{} IP: {}", hostname, address))
    }
}

/// Applies the command line to the resolver settings. Without `--server`
/// the transporter default is kept.
fn configure(cli: &Cli) -> anyhow::Result<()> {
    if let Some(server) = &cli.server {
        transporter::set_server(server)?;
    }
    transporter::set_timeout(Duration::from_secs(cli.timeout))?;
    debug!(
        server = %transporter::get_server(),
        timeout = ?transporter::get_timeout(),
        "resolver configured"
    );
    Ok(())
}

async fn run(cli: &Cli) -> anyhow::Result<String> {
    configure(cli)?;

    let address = resolve_ipv4_async(&cli.hostname).await?;
    render(&cli.hostname, address, cli.json)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match run(&cli).await {
        Ok(line) => {
            println!("{}", line);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
