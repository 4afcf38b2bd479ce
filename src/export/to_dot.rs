use crate::graph::Diagram;

/// Render the diagram as a Graphviz digraph, left to right, one box
/// per node labeled `<label>\n(<type>)`.
///
/// Ids and labels are quoted verbatim; embedded quotes are not escaped.
/// Known limitation, kept for output compatibility.
pub fn render(diagram: &Diagram) -> String {
    let mut lines = vec![
        "digraph G {".to_string(),
        "rankdir=LR;".to_string(),
        "node [shape=box, fontsize=10];".to_string(),
    ];
    for node in diagram.nodes.values() {
        lines.push(format!(
            "\"{}\" [label=\"{}\\n({})\"];",
            node.id, node.label, node.type_guess
        ));
    }
    for edge in &diagram.edges {
        let label = if edge.label.is_empty() {
            String::new()
        } else {
            format!(" [label=\"{}\"]", edge.label)
        };
        lines.push(format!("\"{}\" -> \"{}\"{};", edge.source, edge.target, label));
    }
    lines.push("}".to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{ComponentType, DiagramMeta, Edge, Node};
    use indexmap::IndexMap;

    fn sample() -> Diagram {
        let mut nodes = IndexMap::new();
        nodes.insert(
            "n1".to_string(),
            Node {
                id: "n1".to_string(),
                label: "Temp Sensor".to_string(),
                raw_value: "Temp Sensor".to_string(),
                style: String::new(),
                type_guess: ComponentType::Sensor,
            },
        );
        Diagram {
            nodes,
            edges: vec![
                Edge {
                    id: "e1".to_string(),
                    source: "n1".to_string(),
                    target: "n2".to_string(),
                    label: "measures".to_string(),
                    style: String::new(),
                },
                Edge {
                    id: "e2".to_string(),
                    source: "n1".to_string(),
                    target: String::new(),
                    label: String::new(),
                    style: String::new(),
                },
            ],
            meta: DiagramMeta {
                diagram_hash: "0".repeat(64),
                node_count: 1,
                edge_count: 2,
            },
        }
    }

    #[test]
    fn renders_expected_digraph() {
        let dot = render(&sample());
        let expected = "digraph G {\n\
            rankdir=LR;\n\
            node [shape=box, fontsize=10];\n\
            \"n1\" [label=\"Temp Sensor\\n(Sensor)\"];\n\
            \"n1\" -> \"n2\" [label=\"measures\"];\n\
            \"n1\" -> \"\";\n\
            }";
        assert_eq!(dot, expected);
    }

    #[test]
    fn empty_diagram_is_just_the_frame() {
        let mut diagram = sample();
        diagram.nodes.clear();
        diagram.edges.clear();
        assert_eq!(
            render(&diagram),
            "digraph G {\nrankdir=LR;\nnode [shape=box, fontsize=10];\n}"
        );
    }
}
