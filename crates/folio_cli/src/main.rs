//! `folio` admin command line.
//!
//! # Responsibility
//! - Expose content seeding, listing, reordering and snapshot tooling.
//! - Resolve settings from `FOLIO_*` environment variables, overridable by flags.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use folio_core::db::open_db;
use folio_core::{
    export_snapshot, import_snapshot, init_logging, seed_defaults, CharacterService, CmsConfig,
    Collection, CollectionService, ExperienceService, OrderedRepository, Orderable,
    ProjectService, RecordId, SkillService, Snapshot, SqliteCharacterRepository,
    SqliteExperienceRepository, SqliteProjectRepository, SqliteSkillRepository,
};
use log::info;
use rusqlite::Connection;
use std::path::PathBuf;

/// Portfolio content admin tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// SQLite database file (overrides FOLIO_DB_PATH)
    #[arg(long)]
    db: Option<PathBuf>,
    /// Log level: trace|debug|info|warn|error (overrides FOLIO_LOG_LEVEL)
    #[arg(long)]
    log_level: Option<String>,
    /// Absolute directory for rolling log files (overrides FOLIO_LOG_DIR)
    #[arg(long)]
    log_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Insert the stock portfolio content into empty collections
    Seed,
    /// Print one collection, or all of them, in display order
    List { collection: Option<Collection> },
    /// Assign order = position to the given ids
    Reorder {
        collection: Collection,
        #[arg(required = true)]
        ids: Vec<RecordId>,
    },
    /// Move the record shown at FROM to position TO
    Move {
        collection: Collection,
        from: usize,
        to: usize,
    },
    /// Delete one record (no-op when absent)
    Delete { collection: Collection, id: RecordId },
    /// Drop one image URL from a project
    RemoveImage { project: RecordId, url: String },
    /// Write all content as JSON
    Export {
        /// Output file; stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Replace all content with a JSON export
    Import { file: PathBuf },
    /// List 3D characters, newest first
    Characters,
    /// Make one character the active avatar
    Activate { id: RecordId },
}

enum OrderedAction {
    List,
    Reorder(Vec<RecordId>),
    Move { from: usize, to: usize },
    Delete(RecordId),
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = resolve_config(&args)?;

    if let Some(log_dir) = config.log_dir.as_deref() {
        init_logging(&config.log_level, log_dir).context("failed to initialize logging")?;
    }

    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open database `{}`", config.db_path.display()))?;
    info!(
        "event=cli_command module=cli status=start db_path={}",
        config.db_path.display()
    );

    run(&conn, args.command)
}

fn resolve_config(args: &Args) -> Result<CmsConfig> {
    let mut config = CmsConfig::from_env()?;
    if let Some(db) = args.db.clone() {
        config.db_path = db;
    }
    if let Some(level) = args.log_level.clone() {
        config.log_level = level;
    }
    if let Some(log_dir) = args.log_dir.clone() {
        config.log_dir = Some(log_dir);
    }
    Ok(config)
}

fn run(conn: &Connection, command: Command) -> Result<()> {
    match command {
        Command::Seed => {
            let summary = seed_defaults(conn)?;
            println!(
                "seeded experiences={} skills={} projects={}",
                summary.experiences, summary.skills, summary.projects
            );
        }
        Command::List { collection } => {
            let selected = collection.map_or(Collection::ALL.to_vec(), |one| vec![one]);
            for collection in selected {
                run_ordered(conn, collection, OrderedAction::List)?;
            }
        }
        Command::Reorder { collection, ids } => {
            run_ordered(conn, collection, OrderedAction::Reorder(ids))?
        }
        Command::Move {
            collection,
            from,
            to,
        } => run_ordered(conn, collection, OrderedAction::Move { from, to })?,
        Command::Delete { collection, id } => {
            run_ordered(conn, collection, OrderedAction::Delete(id))?
        }
        Command::RemoveImage { project, url } => {
            let service = ProjectService::new(SqliteProjectRepository::try_new(conn)?);
            let updated = service.remove_project_image(project, &url)?;
            println!("{} image(s) left on {}", updated.images.len(), updated.id);
        }
        Command::Export { out } => {
            let json = export_snapshot(conn)?.to_json()?;
            match out {
                Some(path) => std::fs::write(&path, json)
                    .with_context(|| format!("failed to write `{}`", path.display()))?,
                None => println!("{json}"),
            }
        }
        Command::Import { file } => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read `{}`", file.display()))?;
            let snapshot = Snapshot::from_json(&raw)?;
            import_snapshot(conn, &snapshot)?;
            println!(
                "imported experiences={} skills={} projects={}",
                snapshot.experiences.len(),
                snapshot.skills.len(),
                snapshot.projects.len()
            );
        }
        Command::Characters => {
            let service = CharacterService::new(SqliteCharacterRepository::try_new(conn)?);
            for character in service.list()? {
                let marker = if character.active { "*" } else { " " };
                println!(
                    "{marker} {}  {}  {}",
                    character.id, character.name, character.model_url
                );
            }
        }
        Command::Activate { id } => {
            let service = CharacterService::new(SqliteCharacterRepository::try_new(conn)?);
            let character = service.activate(id)?;
            println!("active character: {} ({})", character.name, character.id);
        }
    }
    Ok(())
}

fn run_ordered(conn: &Connection, collection: Collection, action: OrderedAction) -> Result<()> {
    match collection {
        Collection::Experiences => apply(
            ExperienceService::new(SqliteExperienceRepository::try_new(conn)?),
            action,
        ),
        Collection::Skills => apply(
            SkillService::new(SqliteSkillRepository::try_new(conn)?),
            action,
        ),
        Collection::Projects => apply(
            ProjectService::new(SqliteProjectRepository::try_new(conn)?),
            action,
        ),
    }
}

fn apply<R: OrderedRepository>(service: CollectionService<R>, action: OrderedAction) -> Result<()> {
    match action {
        OrderedAction::List => {}
        OrderedAction::Reorder(ids) => service.reorder_sequence(&ids)?,
        OrderedAction::Move { from, to } => {
            service.move_record(from, to)?;
        }
        OrderedAction::Delete(id) => service.delete(id)?,
    }
    print_records(service.collection(), &service.list()?);
    Ok(())
}

fn print_records<T: Orderable>(collection: Collection, records: &[T]) {
    println!("{collection} ({})", records.len());
    for record in records {
        println!("{:>5}  {}  {}", record.order(), record.id(), record.label());
    }
}
