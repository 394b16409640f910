//! Command-line front end for the contact list.
//!
//! Every mutation goes through the same screen transitions the mobile UI
//! uses, so validation and persistence behave identically.

mod cli;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use contacts_core::db::open_db;
use contacts_core::{default_log_level, init_logging, PhoneCategory, SqliteKeyValueStore};
use std::path::PathBuf;

const CONTACTS_DB_PATH_ENV: &str = "CONTACTS_DB_PATH";
const DEFAULT_DB_FILE_NAME: &str = "contacts.sqlite3";

#[derive(Parser)]
#[command(name = "contacts", version, about = "Manage the local contact list")]
struct Cli {
    /// SQLite file holding the contact list.
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long, global = true)]
    log_dir: Option<String>,
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print all contacts.
    List,
    /// Add a contact; at least one of name, number or email is required.
    Add(AddArgs),
    /// Edit a contact by id or unique id prefix; omitted fields keep their value.
    Edit {
        id: String,
        #[command(flatten)]
        fields: EditArgs,
    },
    /// Delete a contact by id or unique id prefix.
    Delete { id: String },
    /// Print the phone categories.
    Categories,
}

#[derive(Args, Debug, Clone, Default)]
pub struct AddArgs {
    #[arg(long, default_value = "")]
    pub name: String,
    #[arg(long, default_value_t = PhoneCategory::Cell)]
    pub category: PhoneCategory,
    #[arg(long, default_value = "")]
    pub number: String,
    #[arg(long, default_value = "")]
    pub email: String,
}

#[derive(Args, Debug, Clone, Default)]
pub struct EditArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub category: Option<PhoneCategory>,
    #[arg(long)]
    pub number: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).map_err(|err| anyhow!(err))?;
    }

    if let Command::Categories = cli.command {
        return cli::print_categories(&mut std::io::stdout());
    }

    let db_path = resolve_db_path(cli.db);
    let conn = open_db(&db_path).with_context(|| format!("open {}", db_path.display()))?;
    let kv = SqliteKeyValueStore::new(&conn);
    let mut out = std::io::stdout();

    let name = cli.command.name();
    let result = match cli.command {
        Command::List => cli::list_contacts(kv, &mut out),
        Command::Add(args) => cli::add_contact(kv, args, &mut out),
        Command::Edit { id, fields } => cli::edit_contact(kv, &id, fields, &mut out),
        Command::Delete { id } => cli::delete_contact(kv, &id, &mut out),
        Command::Categories => Ok(()),
    };
    cli::log_outcome(name, result)
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Add(_) => "add",
            Self::Edit { .. } => "edit",
            Self::Delete { .. } => "delete",
            Self::Categories => "categories",
        }
    }
}

fn resolve_db_path(flag: Option<PathBuf>) -> PathBuf {
    if let Some(path) = flag {
        return path;
    }
    match std::env::var(CONTACTS_DB_PATH_ENV) {
        Ok(raw) if !raw.trim().is_empty() => PathBuf::from(raw.trim()),
        _ => PathBuf::from(DEFAULT_DB_FILE_NAME),
    }
}
