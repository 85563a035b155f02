// Colored terminal output for the nearest-relative table.

use colored::Colorize;

use crate::relatedness::RelatednessGraph;

/// Display every community with its nearest relative, sorted by name.
pub fn display_nearest_relatives(graph: &RelatednessGraph, member_counts: &[(String, usize)]) {
    if graph.node_count() == 0 {
        println!("No communities analyzed.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Nearest Relatives ({} communities) ===", graph.node_count()).bold()
    );
    println!();

    println!(
        "  {:<24} {:>8}  {:<24} {:>7}",
        "Community".dimmed(),
        "Members".dimmed(),
        "Nearest relative".dimmed(),
        "Weight".dimmed(),
    );
    println!("  {}", "-".repeat(68).dimmed());

    let mut names: Vec<&str> = graph.nodes().collect();
    names.sort_unstable();

    for name in names {
        let members = member_counts
            .iter()
            .find(|(community, _)| community == name)
            .map_or(0, |(_, count)| *count);

        match graph.nearest_relative(name) {
            Some(edge) => println!(
                "  {:<24} {:>8}  {:<24} {}",
                format!("r/{name}"),
                members,
                format!("r/{}", edge.target).cyan(),
                colorize_weight(edge.weight),
            ),
            None => println!(
                "  {:<24} {:>8}  {:<24} {:>7}",
                format!("r/{name}"),
                members,
                "none".dimmed(),
                "-".dimmed(),
            ),
        }
    }

    println!();
    println!(
        "  {} edges across {} communities",
        graph.edge_count().to_string().bold(),
        graph.node_count()
    );
}

fn colorize_weight(weight: f64) -> colored::ColoredString {
    let text = format!("{weight:>7.3}");
    if weight >= 0.5 {
        text.green().bold()
    } else if weight >= 0.2 {
        text.yellow()
    } else {
        text.normal()
    }
}
