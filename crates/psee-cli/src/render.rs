//! Graphviz DOT rendering.

use std::fs;
use std::path::Path;

use petgraph::dot::Dot;
use psee_causal::CausalGraph;
use psee_core::errors::PseeResult;
use tracing::{info, warn};

/// DOT source for `graph`, headed by a `title` comment. `None` for the
/// absent sentinel.
pub fn render_dot(graph: Option<&CausalGraph>, title: &str) -> Option<String> {
    let graph = graph?;
    Some(format!("// {title}\n{}", Dot::new(&graph.graph)))
}

/// Write the DOT rendering to `path`, creating parent directories.
/// Returns whether a file was written.
pub fn write_dot(graph: Option<&CausalGraph>, title: &str, path: &Path) -> PseeResult<bool> {
    let Some(dot) = render_dot(graph, title) else {
        warn!("no graph to render");
        return Ok(false);
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, dot)?;
    info!(path = %path.display(), "graph saved");
    Ok(true)
}
