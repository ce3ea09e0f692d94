//! Markup text <-> generic tree, with `xmltodict` conventions.
//!
//! Reading: attributes become `@name` keys, repeated child elements collapse into an array,
//! text-only elements become strings, empty elements become null, and text that shares an
//! element with attributes or children goes under [`TEXT_KEY`]. Whitespace-only text is dropped.
//!
//! Writing is the inverse; arrays expand back into repeated elements and empty arrays write
//! nothing.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::foundation::error::{JcutError, JcutResult};
use crate::tree::{ATTR_PREFIX, Node, NodeMap, TEXT_KEY};

/// Options for [`unparse`].
#[derive(Clone, Debug)]
pub struct WriteOptions {
    /// `<!DOCTYPE ...>` body written after the XML declaration.
    pub doctype: Option<String>,
    /// Spaces per nesting level.
    pub indent: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            doctype: None,
            indent: 2,
        }
    }
}

impl WriteOptions {
    /// Options for writing an interchange document (`<!DOCTYPE xmeml>`).
    pub fn xmeml() -> Self {
        Self {
            doctype: Some("xmeml".to_string()),
            ..Self::default()
        }
    }
}

struct OpenElement {
    name: String,
    map: NodeMap,
    text: String,
}

impl OpenElement {
    fn new(name: String) -> Self {
        Self {
            name,
            map: NodeMap::new(),
            text: String::new(),
        }
    }

    fn finish(mut self) -> (String, Node) {
        let node = if self.map.is_empty() {
            if self.text.is_empty() {
                Node::Null
            } else {
                Node::String(self.text)
            }
        } else {
            if !self.text.is_empty() {
                self.map.insert(TEXT_KEY.to_string(), Node::String(self.text));
            }
            Node::Object(self.map)
        };
        (self.name, node)
    }
}

fn attach(parent: &mut NodeMap, name: String, node: Node) {
    match parent.get_mut(&name) {
        Some(Node::Array(items)) => items.push(node),
        Some(existing) => {
            let first = existing.take();
            *existing = Node::Array(vec![first, node]);
        }
        None => {
            parent.insert(name, node);
        }
    }
}

fn open_element(e: &BytesStart<'_>) -> JcutResult<OpenElement> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut el = OpenElement::new(name);
    for attr in e.attributes() {
        let attr = attr.map_err(|err| JcutError::markup(format!("<{}>: {err}", el.name)))?;
        let key = format!(
            "{ATTR_PREFIX}{}",
            String::from_utf8_lossy(attr.key.as_ref())
        );
        let value = attr
            .unescape_value()
            .map_err(|err| JcutError::markup(format!("<{}>: {err}", el.name)))?
            .into_owned();
        el.map.insert(key, Node::String(value));
    }
    Ok(el)
}

/// Parse markup text into a generic tree rooted at a single-key mapping.
pub fn parse(source: &str) -> JcutResult<Node> {
    let mut reader = Reader::from_str(source);
    reader.config_mut().trim_text(true);

    let mut stack = vec![OpenElement::new(String::new())];
    loop {
        let event = reader.read_event().map_err(|err| {
            JcutError::markup(format!("at byte {}: {err}", reader.buffer_position()))
        })?;
        match event {
            Event::Start(e) => stack.push(open_element(&e)?),
            Event::Empty(e) => {
                let (name, node) = open_element(&e)?.finish();
                if let Some(parent) = stack.last_mut() {
                    attach(&mut parent.map, name, node);
                }
            }
            Event::End(_) => {
                if stack.len() < 2 {
                    return Err(JcutError::markup("unbalanced closing tag"));
                }
                if let Some(el) = stack.pop() {
                    let (name, node) = el.finish();
                    if let Some(parent) = stack.last_mut() {
                        attach(&mut parent.map, name, node);
                    }
                }
            }
            Event::Text(e) => {
                let text = e
                    .unescape()
                    .map_err(|err| JcutError::markup(err.to_string()))?;
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&text);
                }
            }
            Event::CData(e) => {
                let raw = e.into_inner();
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&String::from_utf8_lossy(&raw));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if stack.len() != 1 {
        return Err(JcutError::markup("unexpected end of document"));
    }
    let root = stack.remove(0).map;
    if root.len() != 1 {
        return Err(JcutError::markup(format!(
            "document must have exactly one root element, found {}",
            root.len()
        )));
    }
    Ok(Node::Object(root))
}

/// Serialize a generic tree rooted at a single-key mapping into markup text.
pub fn unparse(tree: &Node, opts: &WriteOptions) -> JcutResult<String> {
    let root = match tree {
        Node::Object(map) if map.len() == 1 => map,
        _ => {
            return Err(JcutError::markup(
                "tree must be a mapping with exactly one root element",
            ));
        }
    };

    let mut writer = Writer::new_with_indent(Vec::new(), b' ', opts.indent);
    emit(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;
    if let Some(doctype) = &opts.doctype {
        emit(&mut writer, Event::DocType(BytesText::from_escaped(doctype.as_str())))?;
    }
    for (name, node) in root {
        if node.is_array() {
            return Err(JcutError::markup("root element cannot repeat"));
        }
        write_element(&mut writer, name, node)?;
    }

    let mut out = String::from_utf8(writer.into_inner())
        .map_err(|err| JcutError::markup(err.to_string()))?;
    out.push('\n');
    Ok(out)
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> JcutResult<()> {
    writer
        .write_event(event)
        .map_err(|err| JcutError::markup(err.to_string()))
}

fn scalar_text(node: &Node) -> String {
    match node {
        Node::String(s) => s.clone(),
        Node::Null => String::new(),
        other => other.to_string(),
    }
}

fn write_element(writer: &mut Writer<Vec<u8>>, name: &str, node: &Node) -> JcutResult<()> {
    match node {
        Node::Array(items) => {
            for item in items {
                write_element(writer, name, item)?;
            }
        }
        Node::Null => emit(writer, Event::Empty(BytesStart::new(name)))?,
        Node::Object(map) => {
            let mut start = BytesStart::new(name);
            let mut text = None;
            let mut children = Vec::new();
            for (key, value) in map {
                if let Some(attr) = key.strip_prefix(ATTR_PREFIX) {
                    let value = scalar_text(value);
                    start.push_attribute((attr, value.as_str()));
                } else if key == TEXT_KEY {
                    text = Some(scalar_text(value));
                } else {
                    children.push((key.as_str(), value));
                }
            }

            let has_content =
                text.as_deref().is_some_and(|t| !t.is_empty()) || !children.is_empty();
            if !has_content {
                return emit(writer, Event::Empty(start));
            }

            emit(writer, Event::Start(start))?;
            if let Some(t) = text {
                emit(writer, Event::Text(BytesText::new(&t)))?;
            }
            for (key, value) in children {
                write_element(writer, key, value)?;
            }
            emit(writer, Event::End(BytesEnd::new(name)))?;
        }
        leaf => {
            let text = scalar_text(leaf);
            emit(writer, Event::Start(BytesStart::new(name)))?;
            emit(writer, Event::Text(BytesText::new(&text)))?;
            emit(writer, Event::End(BytesEnd::new(name)))?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/tree/markup.rs"]
mod tests;
