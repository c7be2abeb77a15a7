use super::layout::ColumnLayout;
use crate::graph::{EdgeRecord, Graph, NodeRecord};

/// Names accepted by [`template`].
pub const TEMPLATE_NAMES: &[&str] = &["scraping", "email"];

/// A prebuilt starter workflow, or `None` for an unknown name.
pub fn template(name: &str) -> Option<Graph> {
    let chain: &[(&str, &str, &str)] = match name {
        "scraping" => &[
            ("Scrape Properties", "scraper", ""),
            ("Filter Results", "filter", "Success"),
            ("Send to Google Sheets", "sheets", "Has Results"),
        ],
        "email" => &[
            ("Monitor Inbox", "trigger", ""),
            ("Generate Response", "ai", "New Email"),
            ("Send Email", "email", "Response Ready"),
        ],
        _ => return None,
    };
    Some(chain_graph(chain))
}

/// Builds a linear chain; each entry's condition labels the edge from its predecessor.
fn chain_graph(chain: &[(&str, &str, &str)]) -> Graph {
    let layout = ColumnLayout::default();
    let mut graph = Graph::new();

    for (index, (label, node_type, condition)) in chain.iter().enumerate() {
        let id = (index + 1).to_string();
        let mut node = NodeRecord::new(id.as_str(), *label, *node_type).at(layout.position(index));
        if index > 0 {
            let parent = index.to_string();
            let conditions = vec![condition.to_string()];
            graph
                .edges
                .push(EdgeRecord::between(parent.as_str(), id.as_str(), conditions.clone()));
            node = node.with_parent(parent, conditions);
        }
        graph.nodes.push(node);
    }

    graph
}
