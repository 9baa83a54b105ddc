//! `quicknotes` — local notes with JSON backup.
//!
//! # Usage
//!
//! ```
//! quicknotes login --account alice@example.com
//! quicknotes add --title Groceries --content "Milk, eggs"
//! quicknotes list --search gro
//! quicknotes export backup.json
//! ```

mod app;
mod settings;
mod ui;

use std::{io, path::PathBuf};

use anyhow::{Context, Result, bail};
use app::App;
use clap::{Parser, Subcommand};
use quicknotes_core::note::NoteId;
use quicknotes_session::{AccountFile, IdentityProvider};
use settings::CliConfig;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "quicknotes", version, about = "Local notes with JSON backup")]
struct Cli {
  /// Path to a TOML config file (store_path, account_path, log_level).
  #[arg(long, value_name = "FILE", default_value = "quicknotes.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Record an account as signed in.
  Login {
    #[arg(long)]
    account: String,
  },
  /// Sign the current account out.
  Logout,
  /// Print the signed-in account.
  Whoami,
  /// List notes, most recently updated first.
  List {
    /// Only show notes whose title or content contains this text.
    #[arg(short, long)]
    search: Option<String>,
  },
  /// Print one note in full.
  Show { id: NoteId },
  /// Create a note and print its id.
  Add {
    #[arg(short, long, default_value = "")]
    title:   String,
    #[arg(long, default_value = "")]
    content: String,
  },
  /// Change the title and/or content of a note.
  Edit {
    id:      NoteId,
    #[arg(short, long)]
    title:   Option<String>,
    #[arg(long)]
    content: Option<String>,
  },
  /// Delete one note.
  Delete { id: NoteId },
  /// Delete every note.
  Clear {
    #[arg(long)]
    yes: bool,
  },
  /// Save all notes to a JSON file.
  Export {
    /// Defaults to `quicknotes-<millis>.json` in the working directory.
    file: Option<PathBuf>,
  },
  /// Restore notes from a JSON file, replacing notes with the same id.
  Import { file: PathBuf },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  let cfg = CliConfig::load(&cli.config)?;

  let level: LevelFilter = cfg
    .log_level
    .parse()
    .with_context(|| format!("invalid log_level {:?}", cfg.log_level))?;
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy(),
    )
    .init();

  let identity = AccountFile::new(&cfg.account_path);

  // Account commands never touch the store.
  match &cli.command {
    Command::Login { account } => {
      let account = identity.sign_in(account)?;
      println!("Signed in as {}", account.name);
      return Ok(());
    }
    Command::Logout => {
      identity.sign_out()?;
      println!("Signed out");
      return Ok(());
    }
    Command::Whoami => {
      match identity.current()? {
        Some(account) => println!("{}", account.name),
        None => println!("Not signed in"),
      }
      return Ok(());
    }
    _ => {}
  }

  if !identity.is_authenticated() {
    bail!("not signed in; run `quicknotes login --account <name>` first");
  }

  let app = App::open(&cfg.store_path).await?;
  let mut out = io::stdout().lock();

  match cli.command {
    Command::List { search } => app.list(search.as_deref(), &mut out)?,
    Command::Show { id } => app.show(id, &mut out).await?,
    Command::Add { title, content } => app.add(&title, &content, &mut out).await?,
    Command::Edit { id, title, content } => app.edit(id, title, content).await?,
    Command::Delete { id } => app.delete(id).await?,
    Command::Clear { yes } => app.clear(yes, &mut out).await?,
    Command::Export { file } => app.export(file, &mut out).await?,
    Command::Import { file } => app.import(&file, &mut out).await?,
    Command::Login { .. } | Command::Logout | Command::Whoami => {}
  }

  Ok(())
}
