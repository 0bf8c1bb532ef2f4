use colored::Colorize;
use wg_core::ValidationReport;
use wg_store::StoreConfig;

pub fn run(config: &StoreConfig, story: Option<&str>) -> Result<(), String> {
    let ids: Vec<String> = match story {
        Some(id) => vec![id.to_string()],
        None => config
            .catalog()
            .map_err(|e| e.to_string())?
            .stories
            .into_iter()
            .map(|info| info.id)
            .collect(),
    };

    if ids.is_empty() {
        println!("  No stories found.");
        return Ok(());
    }

    let mut failed = 0;
    for id in &ids {
        let document = match super::load_story(config, id) {
            Ok(document) => document,
            Err(e) => {
                println!("  {} {e}", "error:".red().bold());
                failed += 1;
                continue;
            }
        };

        let report = document.validate();
        print_report(id, &report);
        if report.has_errors() {
            failed += 1;
        } else {
            println!(
                "  All checks passed for '{id}' ({} nodes).",
                document.node_count()
            );
        }
    }

    if failed > 0 {
        Err(format!("{failed} of {} stories failed checks", ids.len()))
    } else {
        Ok(())
    }
}

fn print_report(id: &str, report: &ValidationReport) {
    for issue in report.errors() {
        println!("  {} {id}: {issue}", "error:".red().bold());
    }
    for issue in report.warnings() {
        println!("  {} {id}: {issue}", "warning:".yellow());
    }
}
