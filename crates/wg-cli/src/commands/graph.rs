use wg_core::graph::{Edge, EdgeKind};
use wg_core::{NodeId, StoryDocument, StoryGraph};
use wg_store::StoreConfig;

pub fn run(config: &StoreConfig, story: &str) -> Result<(), String> {
    let document = super::load_story(config, story)?;
    let graph = StoryGraph::build(&document);

    println!(
        "  Story graph for '{story}': {} nodes, {} edges, depth {}",
        document.node_count(),
        graph.edges().len(),
        graph.max_depth()
    );
    let capabilities: Vec<_> = document.capabilities.iter_enabled().collect();
    if !capabilities.is_empty() {
        println!("  capabilities: {}", capabilities.join(", "));
    }

    for (depth, ids) in graph.layers() {
        println!();
        println!("  depth {depth}");
        for id in &ids {
            render_node(&document, &graph, id);
        }
    }

    if !graph.unreachable().is_empty() {
        println!();
        println!("  unreachable");
        for id in graph.unreachable() {
            render_node(&document, &graph, id);
        }
    }

    if !graph.missing().is_empty() {
        println!();
        println!("  {} missing targets", graph.missing().len());
    }

    Ok(())
}

fn render_node(document: &StoryDocument, graph: &StoryGraph, id: &NodeId) {
    let Some(node) = document.node(id.as_str()) else {
        println!("    [{id}] (missing)");
        return;
    };

    let mut markers = Vec::new();
    if *id == document.start_node {
        markers.push("start".to_string());
    }
    if node.is_bad_ending() {
        markers.push("bad end".to_string());
    } else if node.is_end() {
        markers.push("end".to_string());
    }
    if let Some(item) = &node.collect_item {
        markers.push(format!("grants {item}"));
    }

    if markers.is_empty() {
        println!("    [{id}]");
    } else {
        println!("    [{id}] ({})", markers.join(", "));
    }

    for edge in graph.edges_from(id.as_str()) {
        println!("      {}", edge_line(document, edge));
    }
}

fn edge_line(document: &StoryDocument, edge: &Edge) -> String {
    let arrow = match edge.kind {
        EdgeKind::Choice => "-->",
        EdgeKind::Outcome => "~~>",
    };
    let needs = edge
        .item
        .as_ref()
        .map(|item| format!(" (needs {item})"))
        .unwrap_or_default();
    let missing = if document.contains(edge.target.as_str()) {
        ""
    } else {
        " (missing)"
    };
    format!("{arrow} \"{}\"{needs} --> [{}]{missing}", edge.label, edge.target)
}
