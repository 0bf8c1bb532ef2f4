use wg_core::SaveStore;
use wg_store::StoreConfig;

pub fn run(config: &StoreConfig, story: &str) -> Result<(), String> {
    let mut saves = config.saves();
    saves.clear(story).map_err(|e| e.to_string())?;
    println!("  Cleared save for '{story}'.");
    Ok(())
}
