use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Component category guessed from a node's label and style.
///
/// Closed set; `Function` is the fallback for anything the heuristics
/// cannot place. Serialized names match the original table vocabulary
/// ("AND Gate", "LDO/Regulator", ...) for output compatibility.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComponentType {
    #[serde(rename = "AND Gate")]
    AndGate,
    #[serde(rename = "OR Gate")]
    OrGate,
    Watchdog,
    Sensor,
    #[serde(rename = "MCU")]
    Mcu,
    #[serde(rename = "ADC")]
    Adc,
    #[serde(rename = "LDO/Regulator")]
    LdoRegulator,
    Comparator,
    OpAmp,
    #[serde(rename = "MOSFET")]
    Mosfet,
    Connector,
    Interface,
    Power,
    Function,
}

impl ComponentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::AndGate => "AND Gate",
            ComponentType::OrGate => "OR Gate",
            ComponentType::Watchdog => "Watchdog",
            ComponentType::Sensor => "Sensor",
            ComponentType::Mcu => "MCU",
            ComponentType::Adc => "ADC",
            ComponentType::LdoRegulator => "LDO/Regulator",
            ComponentType::Comparator => "Comparator",
            ComponentType::OpAmp => "OpAmp",
            ComponentType::Mosfet => "MOSFET",
            ComponentType::Connector => "Connector",
            ComponentType::Interface => "Interface",
            ComponentType::Power => "Power",
            ComponentType::Function => "Function",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Node {
    pub id: String,
    /// Display text with HTML-like tags stripped; never empty
    /// (falls back to `Node_<id>`).
    pub label: String,
    pub raw_value: String,
    pub style: String,
    pub type_guess: ComponentType,
}

/// Connection between two cells. `source`/`target` are weak references:
/// they may be empty or point at ids that no node carries. Dangling
/// endpoints are rendered as empty strings, never treated as an error.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub label: String,
    pub style: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct DiagramMeta {
    /// Hex SHA-256 of the exact uploaded byte sequence. The only link
    /// between a review comment and the diagram state that produced it.
    pub diagram_hash: String,
    pub node_count: usize,
    pub edge_count: usize,
}

/// Parsed diagram: classified nodes in source order, edges, and meta.
#[derive(Serialize, Clone, Debug)]
pub struct Diagram {
    pub nodes: IndexMap<String, Node>,
    pub edges: Vec<Edge>,
    pub meta: DiagramMeta,
}

impl Diagram {
    /// Out-degree per node id, counting edges whose source matches a
    /// known node. Edges from unknown ids do not contribute.
    pub fn out_degrees(&self) -> HashMap<&str, usize> {
        let mut degrees: HashMap<&str, usize> =
            self.nodes.keys().map(|id| (id.as_str(), 0)).collect();
        for edge in &self.edges {
            if let Some(count) = degrees.get_mut(edge.source.as_str()) {
                *count += 1;
            }
        }
        degrees
    }

    pub fn has_watchdog(&self) -> bool {
        self.nodes
            .values()
            .any(|n| n.type_guess == ComponentType::Watchdog)
    }

    pub fn stats(&self) -> String {
        format!("Nodes: {}, Edges: {}", self.nodes.len(), self.edges.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, type_guess: ComponentType) -> Node {
        Node {
            id: id.to_string(),
            label: id.to_string(),
            raw_value: id.to_string(),
            style: String::new(),
            type_guess,
        }
    }

    fn edge(id: &str, source: &str, target: &str) -> Edge {
        Edge {
            id: id.to_string(),
            source: source.to_string(),
            target: target.to_string(),
            label: String::new(),
            style: String::new(),
        }
    }

    fn test_diagram() -> Diagram {
        let mut nodes = IndexMap::new();
        nodes.insert("n1".to_string(), node("n1", ComponentType::Mcu));
        nodes.insert("n2".to_string(), node("n2", ComponentType::Sensor));
        Diagram {
            nodes,
            edges: vec![
                edge("e1", "n1", "n2"),
                edge("e2", "n1", "missing"),
                edge("e3", "ghost", "n1"),
            ],
            meta: DiagramMeta {
                diagram_hash: "0".repeat(64),
                node_count: 2,
                edge_count: 3,
            },
        }
    }

    #[test]
    fn test_out_degrees() {
        let diagram = test_diagram();
        let degrees = diagram.out_degrees();
        assert_eq!(degrees["n1"], 2);
        assert_eq!(degrees["n2"], 0);
        // edges from unknown sources are not counted anywhere
        assert!(!degrees.contains_key("ghost"));
    }

    #[test]
    fn test_has_watchdog() {
        let mut diagram = test_diagram();
        assert!(!diagram.has_watchdog());
        diagram
            .nodes
            .insert("wd".to_string(), node("wd", ComponentType::Watchdog));
        assert!(diagram.has_watchdog());
    }

    #[test]
    fn test_component_type_names() {
        assert_eq!(ComponentType::AndGate.to_string(), "AND Gate");
        assert_eq!(ComponentType::LdoRegulator.as_str(), "LDO/Regulator");
        let json = serde_json::to_string(&ComponentType::Mcu).unwrap();
        assert_eq!(json, "\"MCU\"");
        let back: ComponentType = serde_json::from_str("\"OR Gate\"").unwrap();
        assert_eq!(back, ComponentType::OrGate);
    }

    #[test]
    fn test_stats() {
        assert_eq!(test_diagram().stats(), "Nodes: 2, Edges: 3");
    }
}
