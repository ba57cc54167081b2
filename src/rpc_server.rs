//! Linkboard RPC server: JSON-RPC over stdin/stdout for embedding in other tools.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"section.create", "params":{"name":"Work"}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":{"code":"...","message":"..."}}

use std::io::{self, BufRead, Write};
use std::time::Instant;

use clap::Parser;
use serde_json::{json, Value};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use linkboard::app::App;
use linkboard::rpc_handler::handle_method;
use linkboard::services::settings_engine::{SettingsEngine, SettingsEngineTrait};

#[derive(Parser, Debug)]
#[command(author, version, about = "Linkboard JSON-RPC over stdin/stdout", long_about = None)]
struct Args {
    /// Path to the JSON configuration file
    #[arg(short, long, env = "LINKBOARD_CONFIG")]
    config: Option<String>,
}

/// Simple rate limiter: max requests per second.
struct RateLimiter {
    window_start: Instant,
    request_count: u32,
    max_per_second: u32,
}

impl RateLimiter {
    fn new(max_per_second: u32) -> Self {
        Self { window_start: Instant::now(), request_count: 0, max_per_second }
    }

    /// Returns true if the request is allowed, false if rate-limited.
    fn check(&mut self) -> bool {
        if self.window_start.elapsed().as_secs() >= 1 {
            self.window_start = Instant::now();
            self.request_count = 0;
        }
        self.request_count += 1;
        self.request_count <= self.max_per_second
    }
}

fn respond(out: &mut impl Write, response: Value) -> io::Result<()> {
    writeln!(out, "{}", response)?;
    out.flush()
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();

    // stdout carries the protocol, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let mut settings_engine = SettingsEngine::new(args.config);
    let settings = settings_engine.load()?;
    let app = App::new(settings)?;
    info!(database = %app.settings.database_path, "rpc server ready");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    respond(&mut out, json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")}))?;

    let mut rate_limiter = RateLimiter::new(200);

    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                error!(error = %e, "stdin closed");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "unparseable request");
                respond(&mut out, json!({"id": null, "error": {"code": "parse_error", "message": e.to_string()}}))?;
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);

        if !rate_limiter.check() {
            respond(&mut out, json!({"id": id, "error": {"code": "rate_limited", "message": "rate limit exceeded"}}))?;
            continue;
        }

        let method = req.get("method").and_then(Value::as_str).unwrap_or("");
        let params = req.get("params").cloned().unwrap_or_else(|| json!({}));

        let response = match handle_method(&app.board, method, &params) {
            Ok(val) => json!({"id": id, "result": val}),
            Err(err) => json!({"id": id, "error": err}),
        };
        respond(&mut out, response)?;
    }

    Ok(())
}
