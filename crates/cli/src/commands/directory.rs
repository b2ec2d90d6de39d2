//! `logsheet directory` — Saved working directory management.

use logsheet_config::DirectoryStore;
use std::path::Path;

pub fn show() -> Result<(), Box<dyn std::error::Error>> {
    let store = DirectoryStore::open_default();
    match store.load()? {
        Some(saved) => {
            println!("{}", saved.directory);
            if let Some(at) = saved.saved_at {
                println!("   saved {}", at.format("%Y-%m-%d %H:%M:%S UTC"));
            }
            if !Path::new(&saved.directory).is_dir() {
                println!("   ⚠️  Directory no longer exists");
            }
        }
        None => println!("No saved directory — use `logsheet directory set <DIR>`"),
    }
    Ok(())
}

pub fn set(directory: &str) -> Result<(), Box<dyn std::error::Error>> {
    let directory = directory.trim();
    if !Path::new(directory).is_dir() {
        return Err(format!("Not a directory: {directory}").into());
    }

    let store = DirectoryStore::open_default();
    store.save(directory)?;
    println!("✅ Saved working directory: {directory}");
    Ok(())
}

pub fn clear() -> Result<(), Box<dyn std::error::Error>> {
    let store = DirectoryStore::open_default();
    if store.clear()? {
        println!("✅ Saved directory cleared");
    } else {
        println!("  No saved directory");
    }
    Ok(())
}
