use anyhow::Context;
use clap::{Parser, Subcommand};
use em410_rdl::adapters::ttn;
use em410_rdl::logging::{log_debug, log_error, log_warn};
use em410_rdl::util::{encode_hex, format_hex_compact, parse_hex_lenient};
use em410_rdl::{init_logger, log_info};

#[derive(Parser)]
#[command(name = "em410-rdl")]
#[command(about = "Payload codec for the Milesight EM410-RDL radar distance sensor")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a hex uplink payload into JSON
    Decode {
        hex: String,
        #[arg(short, long, default_value = "85")]
        port: u8,
    },
    /// Encode a JSON command request into a hex downlink payload
    Encode {
        json: String,
        #[arg(short, long, default_value = "85")]
        port: u8,
    },
}

fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Decode { hex, port } => {
            let bytes = parse_hex_lenient(&hex).with_context(|| format!("invalid hex payload: {hex}"))?;
            log_debug(&format!("Uplink on port {port}: {}", format_hex_compact(&bytes)));

            let report = ttn::decoder(&bytes, port)?;
            if report.is_empty() {
                log_warn("Payload carried no known channels");
            }
            log_info(&format!("Decoded {} bytes on port {port}", bytes.len()));
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Encode { json, port } => {
            let request: serde_json::Value =
                serde_json::from_str(&json).context("request is not valid JSON")?;
            let bytes = ttn::encoder(&request, port)?;
            if bytes.is_empty() {
                log_warn("Request produced no commands");
            }
            log_info(&format!("Encoded {} bytes for port {port}", bytes.len()));
            println!("{}", encode_hex(&bytes));
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_logger();

    let cli = Cli::parse();

    run(cli.command).map_err(|err| {
        log_error(&format!("{err:#}"));
        err
    })
}
