// Graphviz export and rendering.
//
// The graph is written as DOT and handed to a Graphviz layout engine. `fdp`
// (spring model) is the default so the picture is a force-directed layout.
// Graphviz is optional: without it the DOT file is still written.

use std::ffi::OsStr;
use std::io::ErrorKind;
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};
use petgraph::dot::{Config, Dot};
use tracing::{info, warn};

use crate::relatedness::RelatednessGraph;

/// Default Graphviz layout engine.
pub const DEFAULT_ENGINE: &str = "fdp";

/// Render the graph as DOT text.
///
/// Nodes carry their community name as a bold label; edges are plain arrows
/// with the weight kept as a tooltip.
pub fn to_dot(graph: &RelatednessGraph) -> String {
    let dot = Dot::with_attr_getters(
        graph.graph(),
        &[Config::EdgeNoLabel, Config::NodeNoLabel],
        &|_, edge| format!("tooltip=\"{:.4}\"", edge.weight()),
        &|_, (_, name)| {
            format!(
                "label=\"{}\", fontname=\"Helvetica-Bold\", fontsize=18, shape=plaintext",
                escape_label(name)
            )
        },
    );
    format!("{:?}", dot)
}

/// Write the DOT form of the graph to `path`.
pub fn write_dot(graph: &RelatednessGraph, path: &Path) -> Result<()> {
    std::fs::write(path, to_dot(graph))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), "Wrote DOT graph");
    Ok(())
}

/// Lay out `dot_path` with `engine` and write the picture to `image_path`.
///
/// The output format follows the image extension (png when there is none).
/// Returns `Ok(false)` when the engine isn't installed.
pub fn render_image(dot_path: &Path, image_path: &Path, engine: &str) -> Result<bool> {
    let format = image_path
        .extension()
        .and_then(OsStr::to_str)
        .unwrap_or("png");

    let status = match Command::new(engine)
        .arg(format!("-T{format}"))
        .arg("-Goverlap=false")
        .arg(dot_path)
        .arg("-o")
        .arg(image_path)
        .status()
    {
        Ok(status) => status,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(
                engine = engine,
                "Graphviz engine not found, skipping image (DOT file kept)"
            );
            return Ok(false);
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to run Graphviz `{engine}`"));
        }
    };

    if !status.success() {
        anyhow::bail!("Graphviz `{engine}` exited with {status}");
    }

    info!(path = %image_path.display(), engine = engine, "Rendered graph image");
    Ok(true)
}

fn escape_label(name: &str) -> String {
    name.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relatedness::nearest::reduce_to_nearest;
    use crate::relatedness::RelatednessMatrix;
    use std::collections::BTreeMap;

    fn sample_graph() -> RelatednessGraph {
        let mut matrix = RelatednessMatrix::new();
        matrix.insert(
            "gaming".to_string(),
            BTreeMap::from([("pcgaming".to_string(), 0.25)]),
        );
        reduce_to_nearest(&matrix, ["gaming", "pcgaming", "aww"])
    }

    #[test]
    fn test_dot_lists_every_node_and_edge() {
        let dot = to_dot(&sample_graph());
        assert!(dot.starts_with("digraph"), "got: {dot}");
        assert!(dot.contains("label=\"gaming\""));
        assert!(dot.contains("label=\"pcgaming\""));
        assert!(dot.contains("label=\"aww\""));
        assert!(dot.contains("0 -> 1"), "got: {dot}");
        assert!(dot.contains("tooltip=\"0.2500\""));
        assert_eq!(dot.matches("->").count(), 1);
    }

    #[test]
    fn test_escape_label() {
        assert_eq!(escape_label("plain"), "plain");
        assert_eq!(escape_label("a\"b"), "a\\\"b");
    }

    #[test]
    fn test_missing_engine_is_not_an_error() {
        let dir = std::env::temp_dir();
        let stem = format!("relgraph_missing_engine_{}", std::process::id());
        let dot_path = dir.join(format!("{stem}.dot"));
        let image_path = dir.join(format!("{stem}.png"));
        write_dot(&sample_graph(), &dot_path).unwrap();

        let rendered =
            render_image(&dot_path, &image_path, "relgraph-no-such-graphviz-engine").unwrap();
        assert!(!rendered);

        let _ = std::fs::remove_file(&dot_path);
    }
}
