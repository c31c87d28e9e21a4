mod cli;
mod command;
mod config;
mod fetch;
mod render;
mod session;
mod store;
mod transcript;

use anyhow::Result;
use clap::Parser;
use std::cell::RefCell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "roster", about = "An interactive user roster console")]
pub struct Args {
    #[arg(short, long, help = "One-shot command mode (e.g., 'list')")]
    pub command: Option<String>,

    #[arg(long, env = "ROSTER_URL", help = "User list endpoint (overrides config)")]
    pub url: Option<String>,

    #[arg(
        long,
        env = "ROSTER_DEPARTMENT",
        help = "Default department for fetched and new users"
    )]
    pub department: Option<String>,

    #[arg(long, help = "Skip the startup fetch and begin with an empty roster")]
    pub no_fetch: bool,

    #[arg(long, help = "Session transcripts directory")]
    pub transcripts_dir: Option<PathBuf>,

    #[arg(long, help = "Config file path")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Echo state changes to stderr")]
    pub trace: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // Load configuration, then let CLI flags and env vars win. A missing
    // config file just means defaults; a malformed one aborts here rather
    // than silently running against the wrong endpoint.
    let mut cfg = if let Some(config_path) = &args.config {
        config::Config::load_from(config_path)?
    } else {
        config::Config::load()?
    };

    if let Some(url) = &args.url {
        cfg.source_url = url.clone();
    }
    if let Some(dept) = &args.department {
        cfg.default_department = dept.clone();
    }
    if let Some(dir) = &args.transcripts_dir {
        cfg.transcripts_dir = Some(dir.clone());
    }

    let transcripts_dir = cfg
        .transcripts_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(".roster").join("sessions"));
    std::fs::create_dir_all(&transcripts_dir)?;

    let session_id = uuid::Uuid::new_v4().to_string();
    let transcript_path = transcripts_dir.join(format!("{}.jsonl", session_id));
    let transcript = transcript::Transcript::new(&transcript_path, &session_id)?;

    let tracing = args.trace;
    let session = session::Session::new(&cfg.default_department);

    let ctx = cli::Context {
        args,
        config: cfg,
        session: RefCell::new(session),
        transcript: RefCell::new(transcript),
        agent: ureq::Agent::new(),
        tracing,
    };

    if ctx.tracing {
        eprintln!("[trace] transcript: {:?}", ctx.transcript.borrow().path);
    }

    // The one startup fetch: best-effort, never retried. A failure is
    // logged and the console opens on an empty roster.
    if !ctx.args.no_fetch {
        cli::fetch_and_seed(&ctx);
    }

    if let Some(command) = ctx.args.command.clone() {
        cli::run_once(&ctx, &command)
    } else {
        cli::run_repl(ctx)
    }
}
