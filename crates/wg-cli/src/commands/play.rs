use std::io::{self, BufRead, Write};

use colored::Colorize;
use rand::rngs::StdRng;
use tracing::debug;
use wg_core::{NodeKind, SaveStore, StoryEngine};
use wg_store::StoreConfig;

use crate::config::PlayConfig;

pub fn run(config: &StoreConfig, story: &str, play: &PlayConfig) -> Result<(), String> {
    let document = super::load_story(config, story)?;
    debug!(story, seed = ?play.seed, new_game = play.new_game, "starting play session");
    let mut engine =
        StoryEngine::open(story, document, config.saves()).map_err(|e| e.to_string())?;
    if play.new_game {
        engine.restart();
    }

    let title = config
        .catalog()
        .ok()
        .and_then(|catalog| catalog.find(story).map(|info| info.title.clone()))
        .unwrap_or_else(|| story.to_string());

    println!("  {} {title}", "Playing".bold());
    if engine.resumed() {
        println!("  Continuing your saved game.");
    }
    println!("  Type a number to choose, 'r' to roll, 'b' to go back, 'i' for inventory,");
    println!("  'restart' to start over, 'q' to quit.");

    let stdin = io::stdin();
    let stdout = io::stdout();
    session(&mut engine, &mut play.rng(), stdin.lock(), stdout.lock()).map_err(|e| e.to_string())
}

/// Drive the engine from line commands until quit or end of input.
fn session<S: SaveStore>(
    engine: &mut StoryEngine<S>,
    rng: &mut StdRng,
    mut reader: impl BufRead,
    mut out: impl Write,
) -> io::Result<()> {
    render(engine, &mut out)?;
    let mut line = String::new();

    loop {
        write!(out, "> ")?;
        out.flush()?;

        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break; // EOF
        }

        let input = line.trim();
        let on_roll = engine.current_node().roll_spec().is_some();

        match input {
            "q" | "quit" => break,
            "b" | "back" => {
                if engine.go_back() {
                    render(engine, &mut out)?;
                } else {
                    writeln!(out, "{}\n", "Nothing to go back to.".yellow())?;
                }
            }
            "i" | "inventory" => {
                let inventory = &engine.state().inventory;
                if inventory.is_empty() {
                    writeln!(out, "  You carry nothing.\n")?;
                } else {
                    writeln!(out, "  You carry: {}\n", inventory.join(", "))?;
                }
            }
            "restart" => {
                engine.restart();
                render(engine, &mut out)?;
            }
            "r" | "roll" | "" if on_roll => match engine.roll_with(rng) {
                Ok((draw, outcome)) => {
                    writeln!(out, "\n  You rolled {}: {}", draw.to_string().bold(), outcome.text)?;
                    render(engine, &mut out)?;
                }
                Err(e) => writeln!(out, "{}\n", e.to_string().yellow())?,
            },
            "" => {}
            _ => match input.parse::<usize>().ok().and_then(|n| n.checked_sub(1)) {
                Some(index) => match engine.choose_option(index).map(|_| ()) {
                    Ok(()) => render(engine, &mut out)?,
                    Err(e) => writeln!(out, "{}\n", e.to_string().yellow())?,
                },
                None => writeln!(out, "{}\n", format!("Unknown command: {input}").yellow())?,
            },
        }
    }

    Ok(())
}

fn render<S: SaveStore>(engine: &StoryEngine<S>, out: &mut impl Write) -> io::Result<()> {
    let node = engine.current_node();
    writeln!(out)?;
    writeln!(out, "{}", node.text)?;
    writeln!(out)?;

    match &node.kind {
        NodeKind::Choice(choices) => {
            for (i, choice) in choices.iter().enumerate() {
                let note = match &choice.item {
                    Some(item) if engine.can_take_choice(i) => format!(" (uses {item})"),
                    Some(item) => format!(" (needs {item})").dimmed().to_string(),
                    None => String::new(),
                };
                writeln!(out, "  {}. {}{note}", i + 1, choice.text)?;
            }
        }
        NodeKind::Roll(roll) => writeln!(out, "  [r] {}", roll.text)?,
        NodeKind::End { bad } => {
            let banner = if *bad { "THE END (bad ending)" } else { "THE END" };
            writeln!(out, "  {}", banner.bold())?;
        }
    }

    if let Some(progress) = engine.progress().filter(|progress| progress.revealed) {
        let marks: String = progress
            .milestones
            .iter()
            .map(|(_, done)| if *done { '*' } else { '.' })
            .collect();
        writeln!(
            out,
            "\n  {}: {}/{} [{marks}]",
            progress.label,
            progress.collected(),
            progress.total()
        )?;
    }

    writeln!(out)
}
