#![deny(warnings)]

use std::path::PathBuf;
use std::sync::mpsc;

use anyhow::{anyhow, bail, Result};
use arboard::Clipboard;
use clap::{Parser, Subcommand};
use uuid::Uuid;

use spellbook_core::clipboard::{flattened_copy, prompt_from_text};
use spellbook_core::logger::{session_rid, Logger};
use spellbook_core::node::{sorted_for_display, Folder, Forest, Node};
use spellbook_core::store::{Store, StoreEvent};
use spellbook_core::tree;

#[derive(Parser)]
#[command(
    name = "spellbook",
    about = "A folder tree of reusable prompts, one command away from the clipboard"
)]
struct Cli {
    /// Store file to use instead of the per-user default
    #[arg(long, value_name = "FILE")]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the tree (folders first, alphabetical within each group)
    List,
    /// Import a prompt from the clipboard; its first line becomes the name
    Add {
        /// Folder (name or id) to file the prompt under
        #[arg(long, value_name = "FOLDER")]
        into: Option<String>,
    },
    /// Create an empty folder
    AddFolder {
        name: String,
        /// Folder (name or id) to nest the new folder under
        #[arg(long, value_name = "FOLDER")]
        into: Option<String>,
    },
    /// Copy a prompt's content — or every prompt under a folder — to the clipboard
    Copy { target: String },
    /// Delete a prompt or folder (folders go with their whole subtree)
    Delete { target: String },
    /// Overwrite a prompt's content with the current clipboard text
    Replace { target: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let logger = Logger::new(session_rid());
    let store = match cli.store {
        Some(path) => Store::new(path, logger),
        None => Store::at_default_path(logger)?,
    };

    let mut forest = load_forest(&store)?;

    match cli.command {
        Command::List => {
            if forest.is_empty() {
                println!("(empty — try `spellbook add` with something on the clipboard)");
            } else {
                print_level(&forest, 0);
            }
        }
        Command::Add { into } => {
            let prompt = prompt_from_text(&read_clipboard());
            let name = prompt.name.clone();
            match into {
                Some(target) => {
                    let folder_id = resolve_folder_id(&forest, &target)?;
                    tree::append_child(&mut forest, folder_id, Node::Prompt(prompt));
                }
                None => forest.push(Node::Prompt(prompt)),
            }
            persist(&store, &forest)?;
            println!("📄 Imported '{name}' from the clipboard");
        }
        Command::AddFolder { name, into } => {
            let folder = Folder::new(name.clone());
            match into {
                Some(target) => {
                    let folder_id = resolve_folder_id(&forest, &target)?;
                    tree::append_child(&mut forest, folder_id, Node::Folder(folder));
                }
                None => forest.push(Node::Folder(folder)),
            }
            persist(&store, &forest)?;
            println!("📁 Created folder '{name}'");
        }
        Command::Copy { target } => match resolve(&forest, &target)? {
            Node::Prompt(prompt) => {
                write_clipboard(&prompt.content)?;
                println!("✅ Copied '{}'", prompt.name);
            }
            Node::Folder(folder) => match flattened_copy(folder) {
                Some(text) => {
                    write_clipboard(&text)?;
                    println!("✅ Copied every prompt under '{}'", folder.name);
                }
                None => println!("📁 '{}' has no prompts to copy", folder.name),
            },
        },
        Command::Delete { target } => {
            let node = resolve(&forest, &target)?;
            let (id, name) = (node.id(), node.name().to_string());
            if tree::delete(&mut forest, id) {
                persist(&store, &forest)?;
                println!("🗑 Deleted '{name}'");
            }
        }
        Command::Replace { target } => {
            let node = resolve(&forest, &target)?;
            let (id, name) = (node.id(), node.name().to_string());
            let text = read_clipboard();
            if tree::replace_content(&mut forest, id, &text) {
                persist(&store, &forest)?;
                println!("✏️ Replaced the content of '{name}'");
            } else {
                println!("📁 '{name}' is a folder; nothing replaced");
            }
        }
    }

    Ok(())
}

/// Loads via the background path and drains the completion, the way an
/// event loop would. Missing or unreadable store: already logged by the
/// store, fall back to an empty forest rather than abort.
fn load_forest(store: &Store) -> Result<Forest> {
    let (tx, rx) = mpsc::channel();
    store.load_in_background(tx);
    match rx.recv()? {
        StoreEvent::Loaded(Ok(forest)) => Ok(forest),
        _ => Ok(Forest::new()),
    }
}

/// Fires a background save and waits for its completion event. A failed
/// save is logged by the store; the in-memory forest stays authoritative.
fn persist(store: &Store, forest: &Forest) -> Result<()> {
    let (tx, rx) = mpsc::channel();
    let worker = store.save_in_background(forest.clone(), tx);
    let _ = rx.recv()?;
    worker.join().map_err(|_| anyhow!("save worker panicked"))?;
    Ok(())
}

/// Targets are a full UUID or a name (first match in tree walk order).
fn resolve<'a>(forest: &'a Forest, target: &str) -> Result<&'a Node> {
    if let Ok(id) = Uuid::parse_str(target) {
        if let Some(node) = tree::find(forest, id) {
            return Ok(node);
        }
    }
    tree::find_by_name(forest, target)
        .ok_or_else(|| anyhow!("no prompt or folder matches '{target}'"))
}

fn resolve_folder_id(forest: &Forest, target: &str) -> Result<Uuid> {
    let node = resolve(forest, target)?;
    if !node.is_folder() {
        bail!("'{target}' is a prompt, not a folder");
    }
    Ok(node.id())
}

fn read_clipboard() -> String {
    // An empty or non-text clipboard imports as an empty string; the
    // core's import shaping supplies the placeholder name.
    Clipboard::new()
        .and_then(|mut clipboard| clipboard.get_text())
        .unwrap_or_default()
}

fn write_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().map_err(|e| anyhow!("clipboard unavailable: {e}"))?;
    clipboard
        .set_text(text.to_string())
        .map_err(|e| anyhow!("clipboard write failed: {e}"))?;
    Ok(())
}

fn print_level(nodes: &[Node], depth: usize) {
    let indent = "  ".repeat(depth);
    for node in sorted_for_display(nodes) {
        match node {
            Node::Folder(folder) => {
                println!("{indent}📁 {}", folder.name);
                print_level(&folder.children, depth + 1);
            }
            Node::Prompt(prompt) => println!("{indent}📄 {}", prompt.name),
        }
    }
}
