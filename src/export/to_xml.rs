use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;

use crate::errors::ExportError;
use crate::graph::Diagram;

/// Render the diagram into the normalized minimal XML schema:
/// a `normalizedDiagram` root with a `nodes` list and an `edges` list.
/// Edge `label` attributes are emitted only when non-empty; attribute
/// values are XML-escaped.
pub fn render(diagram: &Diagram) -> Result<String, ExportError> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Start(BytesStart::new("normalizedDiagram")))?;

    writer.write_event(Event::Start(BytesStart::new("nodes")))?;
    for node in diagram.nodes.values() {
        let mut el = BytesStart::new("node");
        el.push_attribute(("id", node.id.as_str()));
        el.push_attribute(("label", node.label.as_str()));
        el.push_attribute(("type", node.type_guess.as_str()));
        writer.write_event(Event::Empty(el))?;
    }
    writer.write_event(Event::End(BytesEnd::new("nodes")))?;

    writer.write_event(Event::Start(BytesStart::new("edges")))?;
    for edge in &diagram.edges {
        let mut el = BytesStart::new("edge");
        el.push_attribute(("id", edge.id.as_str()));
        el.push_attribute(("source", edge.source.as_str()));
        el.push_attribute(("target", edge.target.as_str()));
        if !edge.label.is_empty() {
            el.push_attribute(("label", edge.label.as_str()));
        }
        writer.write_event(Event::Empty(el))?;
    }
    writer.write_event(Event::End(BytesEnd::new("edges")))?;

    writer.write_event(Event::End(BytesEnd::new("normalizedDiagram")))?;
    String::from_utf8(writer.into_inner()).map_err(|e| ExportError::Encoding(e.to_string()))
}
