use std::io::{self, BufReader};

use anyhow::{bail, Context, Result};
use clap::Parser;

use mymaps::cli::cli::{Args, Command};
use mymaps::cli::editor::{run_editor, EditorExit};
use mymaps::config::sample_data::sample_collections;
use mymaps::controller::collection_list::CollectionListController;
use mymaps::editing::session::MapEditingSession;
use mymaps::storage::collection_store::FileCollectionStore;
use mymaps::surface::terminal::{PromptForm, TerminalSurface};
use mymaps::utils::csv_export::export_places_csv;
use mymaps::utils::logging;

fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_logging(args.enable_timing(), args.debug_logging());

    let result = run(&args);
    logging::print_timing_report();
    result
}

fn run(args: &Args) -> Result<()> {
    let config = args.app_config();
    let store = FileCollectionStore::from_config(&config);

    // Recovery has to work on a store that cannot be loaded
    if let Command::Recover = args.command() {
        return recover(&store);
    }

    let mut controller = CollectionListController::new(store, config);
    if let Err(e) = controller.initialize() {
        if e.is_corrupt() {
            bail!("{}\nYour data has not been changed. Run `mymaps recover` to move it aside and start over.", e);
        }
        return Err(e).context("Failed to load saved maps");
    }

    match args.command() {
        Command::List => {
            if controller.collections().is_empty() {
                println!("No maps yet. Create one with `mymaps create <title>`.");
            }
            for (index, collection) in controller.collections().iter().enumerate() {
                println!(
                    "{:>3}  {}  ({} places){}",
                    index,
                    collection.title(),
                    collection.place_count(),
                    collection.description().map(|d| format!("\n     {}", d)).unwrap_or_default()
                );
            }
        }
        Command::Create { title, description } => {
            let draft = match controller.validate_new_collection(title, description) {
                Ok(draft) => draft,
                Err(e) => bail!("{}", e),
            };

            println!("Editing \"{}\". Long press with `press <lat> <lon>`, remove with `tap <marker>`, then `save`.", draft.title);
            let mut session = MapEditingSession::start(TerminalSurface::new(io::stdout()), controller.config());
            let mut form = PromptForm::new(BufReader::new(io::stdin()), io::stdout());

            match run_editor(&mut controller, &mut session, &draft, &mut form, &mut io::stdout()) {
                Ok(EditorExit::Saved(index)) => println!("Saved map {} \"{}\"", index, draft.title),
                Ok(EditorExit::Abandoned) if controller.has_unsaved_changes() => {
                    bail!("\"{}\" could not be saved and has been discarded", draft.title)
                }
                Ok(EditorExit::Abandoned) => println!("Map discarded"),
                Err(e) => return Err(e).context("Failed to save the new map"),
            }
        }
        Command::View { index } => {
            let mut surface = TerminalSurface::new(io::stdout());
            let collection = controller.view_collection(*index, &mut surface)?;
            println!("{} ({} places)", collection.title(), collection.place_count());
            if let Some(description) = collection.description() {
                println!("{}", description);
            }
        }
        Command::Delete { index } => {
            let removed = controller.delete_collection(*index)?;
            println!("Deleted \"{}\"", removed.title());
        }
        Command::Export { index, path } => {
            let collection = controller.get(*index)?;
            export_places_csv(collection, path)
                .with_context(|| format!("Failed to export to {}", path.display()))?;
            println!("Exported {} places to {}", collection.place_count(), path.display());
        }
        Command::Sample => {
            let added = controller.extend_collections(sample_collections())?;
            println!("Added {} sample maps", added);
        }
        Command::Recover => recover(controller.store())?,
    }

    Ok(())
}

fn recover(store: &FileCollectionStore) -> Result<()> {
    match store.quarantine()? {
        Some(backup) => println!("Moved {} to {}", store.path().display(), backup.display()),
        None => println!("Nothing to recover at {}", store.path().display()),
    }
    Ok(())
}
