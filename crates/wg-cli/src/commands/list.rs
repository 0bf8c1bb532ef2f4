use comfy_table::{ContentArrangement, Table};
use wg_store::StoreConfig;

pub fn run(config: &StoreConfig, all: bool) -> Result<(), String> {
    let catalog = config.catalog().map_err(|e| e.to_string())?;

    let stories: Vec<_> = if all {
        catalog.stories.iter().collect()
    } else {
        catalog.published().collect()
    };

    if stories.is_empty() {
        println!("  No stories found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Title", "Author", "Description"]);

    for story in &stories {
        let desc = if story.description.chars().count() > 60 {
            let cut: String = story.description.chars().take(57).collect();
            format!("{cut}...")
        } else if story.description.is_empty() {
            "-".to_string()
        } else {
            story.description.clone()
        };

        let title = if story.work_in_progress {
            format!("{} (draft)", story.title)
        } else {
            story.title.clone()
        };

        table.add_row(vec![&story.id, &title, &story.author, &desc]);
    }

    println!("{table}");
    println!();
    println!("  {} stories", stories.len());

    Ok(())
}
