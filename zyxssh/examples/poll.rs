//! Poll an access point once and print the snapshot as JSON.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example poll -- --host 192.168.1.2 --user admin --password secret
//! ```
//!
//! Add `--override on|off` to change the guest SSID schedule override after
//! polling, or `--command "<cli>"` to run a single command instead.

use std::env;
use std::time::Duration;

use zyxssh::AccessPointBuilder;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set RUST_LOG=debug to see every executor state change
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let Some(password) = args.password else {
        eprintln!("Error: --password is required");
        std::process::exit(1);
    };

    let ap = AccessPointBuilder::new(&args.host)
        .port(args.port)
        .username(&args.user)
        .password(password)
        .timeout(Duration::from_secs(args.timeout))
        .build()?;

    if !ap.test_connection().await {
        eprintln!("Could not connect to {}:{}", args.host, args.port);
        std::process::exit(2);
    }

    if let Some(command) = &args.command {
        let result = ap.execute(command).await;
        if result.succeeded {
            println!("{}", result.raw_output.unwrap_or_default());
        } else {
            eprintln!("Command failed: {:?}", result.failure_message);
        }
        return Ok(());
    }

    let snapshot = ap.get_snapshot().await;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    if let Some(enabled) = args.schedule_override {
        let applied = ap.set_schedule_override(enabled).await;
        println!(
            "Schedule override {}: {}",
            if enabled { "on" } else { "off" },
            if applied { "applied" } else { "failed" }
        );
    }

    Ok(())
}

/// Simple argument parser (avoiding external dependencies)
struct Args {
    host: String,
    port: u16,
    user: String,
    password: Option<String>,
    timeout: u64,
    command: Option<String>,
    schedule_override: Option<bool>,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = env::args().collect();
        let mut host = "192.168.1.2".to_string();
        let mut port = 22u16;
        let mut user = "admin".to_string();
        let mut password = env::var("ZYXEL_PASSWORD").ok();
        let mut timeout = 10u64;
        let mut command = None;
        let mut schedule_override = None;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--host" | "-h" => {
                    i += 1;
                    if i < args.len() {
                        host = args[i].clone();
                    }
                }
                "--port" | "-p" => {
                    i += 1;
                    if i < args.len() {
                        port = args[i].parse().unwrap_or(22);
                    }
                }
                "--user" | "-u" => {
                    i += 1;
                    if i < args.len() {
                        user = args[i].clone();
                    }
                }
                "--password" | "-P" => {
                    i += 1;
                    if i < args.len() {
                        password = Some(args[i].clone());
                    }
                }
                "--timeout" | "-t" => {
                    i += 1;
                    if i < args.len() {
                        timeout = args[i].parse().unwrap_or(10);
                    }
                }
                "--command" | "-c" => {
                    i += 1;
                    if i < args.len() {
                        command = Some(args[i].clone());
                    }
                }
                "--override" => {
                    i += 1;
                    if i < args.len() {
                        schedule_override = match args[i].as_str() {
                            "on" => Some(true),
                            "off" => Some(false),
                            other => {
                                eprintln!("Expected on|off, got: {}", other);
                                None
                            }
                        };
                    }
                }
                "--help" => {
                    Self::print_help();
                    std::process::exit(0);
                }
                _ => {
                    eprintln!("Unknown argument: {}", args[i]);
                }
            }
            i += 1;
        }

        Self {
            host,
            port,
            user,
            password,
            timeout,
            command,
            schedule_override,
        }
    }

    fn print_help() {
        println!(
            r#"zyxssh poll example

USAGE:
    cargo run --example poll -- [OPTIONS]

OPTIONS:
    -h, --host <HOST>        Access point address [default: 192.168.1.2]
    -p, --port <PORT>        SSH port [default: 22]
    -u, --user <USER>        Username [default: admin]
    -P, --password <PASS>    Password [default: $ZYXEL_PASSWORD]
    -t, --timeout <SECS>     Connection timeout [default: 10]
    -c, --command <CLI>      Run one command and print its output
    --override <on|off>      Set the guest SSID schedule override after polling
    --help                   Print this help message
"#
        );
    }
}
