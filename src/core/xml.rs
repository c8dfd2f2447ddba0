// src/core/xml.rs
//! Typed markup tree for catalog documents.
//!
//! The raw document is read once with `quick-xml` into an owned [`Node`]
//! tree. Element names the catalog format cares about are tagged with a
//! [`NodeKind`] at parse time, so extraction code matches on kinds instead
//! of string selectors. Everything else is kept as [`NodeKind::Other`] and
//! still walked, since containers (`<costs>`, `<profiles>`, ...) sit between
//! the nodes that matter.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::core::sanitize::normalize_ws;
use crate::error::ParseError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// `selectionEntry`: a unit, model or piece of wargear.
    Entry,
    /// `entryLink`: reference to a shared entry.
    EntryLink,
    /// `selectionEntryGroup`: a set of alternative options.
    OptionGroup,
    /// `categoryLink`
    CategoryRef,
    Cost,
    Constraint,
    Modifier,
    Profile,
    Characteristic,
    Rule,
    /// `infoLink`: reference to a shared rule or profile.
    InfoLink,
    Other,
}

impl NodeKind {
    fn from_tag(tag: &str) -> Self {
        match tag {
            "selectionEntry" => NodeKind::Entry,
            "entryLink" => NodeKind::EntryLink,
            "selectionEntryGroup" => NodeKind::OptionGroup,
            "categoryLink" => NodeKind::CategoryRef,
            "cost" => NodeKind::Cost,
            "constraint" => NodeKind::Constraint,
            "modifier" => NodeKind::Modifier,
            "profile" => NodeKind::Profile,
            "characteristic" => NodeKind::Characteristic,
            "rule" => NodeKind::Rule,
            "infoLink" => NodeKind::InfoLink,
            _ => NodeKind::Other,
        }
    }

    /// Kinds that own their own costs, constraints and category links.
    pub fn is_entry_like(self) -> bool {
        matches!(self, NodeKind::Entry | NodeKind::EntryLink | NodeKind::OptionGroup)
    }
}

/// Visitor verdict for [`Node::walk`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visit {
    Descend,
    Skip,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub tag: String,
    attrs: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<Node>,
}

impl Node {
    fn new(tag: String, attrs: Vec<(String, String)>) -> Self {
        Self { kind: NodeKind::from_tag(&tag), tag, attrs, text: s!(), children: Vec::new() }
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Trimmed `name` attribute; empty counts as absent.
    pub fn name(&self) -> Option<&str> {
        self.attr("name").map(str::trim).filter(|n| !n.is_empty())
    }

    /// Whitespace-normalized element text.
    pub fn text(&self) -> String {
        normalize_ws(&self.text)
    }

    /// Depth-first, document-order walk over the descendants of `self`
    /// (not `self`). `Visit::Skip` keeps the walk out of a node's subtree.
    pub fn walk<'a, F>(&'a self, f: &mut F)
    where
        F: FnMut(&'a Node) -> Visit,
    {
        for child in &self.children {
            if f(child) == Visit::Descend {
                child.walk(f);
            }
        }
    }

    /// All descendants of one kind, document order.
    pub fn descendants(&self, kind: NodeKind) -> Vec<&Node> {
        let mut out = Vec::new();
        self.collect(kind, &mut out, false);
        out
    }

    /// Descendants of one kind that belong to `self` rather than to a nested
    /// entry, link or option group.
    pub fn scoped(&self, kind: NodeKind) -> Vec<&Node> {
        let mut out = Vec::new();
        self.collect(kind, &mut out, true);
        out
    }

    fn collect<'a>(&'a self, kind: NodeKind, out: &mut Vec<&'a Node>, scoped: bool) {
        for child in &self.children {
            if child.kind == kind {
                out.push(child);
            }
            if scoped && child.kind.is_entry_like() {
                continue;
            }
            child.collect(kind, out, scoped);
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub root: Node,
}

/// Parse document text into a tree. Fails on anything that is not a single
/// well-formed element tree.
pub fn parse_document(text: &str) -> Result<Document, ParseError> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Node> = Vec::new();
    let mut root: Option<Node> = None;

    loop {
        let position = reader.buffer_position() as u64;
        match reader.read_event() {
            Ok(Event::Start(e)) => stack.push(open_node(&e, position)?),
            Ok(Event::Empty(e)) => {
                let node = open_node(&e, position)?;
                attach(&mut stack, &mut root, node, position)?;
            }
            Ok(Event::End(_)) => {
                let node = stack
                    .pop()
                    .ok_or_else(|| ParseError::new(position, "closing tag without an open element"))?;
                attach(&mut stack, &mut root, node, position)?;
            }
            Ok(Event::Text(t)) => {
                if let Some(top) = stack.last_mut() {
                    let txt = t.unescape().map_err(|e| ParseError::new(position, e.to_string()))?;
                    top.text.push_str(&txt);
                }
            }
            Ok(Event::CData(c)) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {} // declaration, comments, PIs, doctype
            Err(e) => return Err(ParseError::new(reader.buffer_position() as u64, e.to_string())),
        }
    }

    if let Some(open) = stack.last() {
        return Err(ParseError::new(
            reader.buffer_position() as u64,
            format!("unclosed element <{}>", open.tag),
        ));
    }
    root.map(|root| Document { root })
        .ok_or_else(|| ParseError::new(0, "document has no root element"))
}

fn open_node(e: &BytesStart<'_>, position: u64) -> Result<Node, ParseError> {
    let tag = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
    let mut attrs = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| ParseError::new(position, err.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|err| ParseError::new(position, err.to_string()))?
            .into_owned();
        attrs.push((key, value));
    }
    Ok(Node::new(tag, attrs))
}

fn attach(
    stack: &mut [Node],
    root: &mut Option<Node>,
    node: Node,
    position: u64,
) -> Result<(), ParseError> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(node);
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(node);
            Ok(())
        }
        None => Err(ParseError::new(position, format!("second root element <{}>", node.tag))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
        <catalogue name="Test" xmlns="http://www.battlescribe.net/schema/catalogueSchema">
          <selectionEntry type="unit" name="Squad &amp; Co">
            <costs><cost name="pts" value="80"/></costs>
            <selectionEntries>
              <selectionEntry type="model" name="Trooper">
                <costs><cost name="pts" value="5"/></costs>
              </selectionEntry>
            </selectionEntries>
            <profiles>
              <profile name="Squad" typeName="Unit">
                <characteristics><characteristic name="M">6&quot;</characteristic></characteristics>
              </profile>
            </profiles>
          </selectionEntry>
        </catalogue>"#;

    #[test]
    fn parses_kinds_attrs_and_text() {
        let doc = parse_document(DOC).unwrap();
        assert_eq!(doc.root.tag, "catalogue");
        let entries = doc.root.descendants(NodeKind::Entry);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name(), Some("Squad & Co"));
        assert_eq!(entries[0].attr("type"), Some("unit"));

        let chars = doc.root.descendants(NodeKind::Characteristic);
        assert_eq!(chars[0].text(), "6\"");
    }

    #[test]
    fn scoped_stops_at_nested_entries() {
        let doc = parse_document(DOC).unwrap();
        let squad = doc.root.descendants(NodeKind::Entry)[0];
        assert_eq!(squad.scoped(NodeKind::Cost).len(), 1);
        assert_eq!(squad.descendants(NodeKind::Cost).len(), 2);
    }

    #[test]
    fn walk_skip_prunes_subtrees() {
        let doc = parse_document(DOC).unwrap();
        let mut seen = Vec::new();
        doc.root.walk(&mut |n: &Node| {
            if n.kind == NodeKind::Entry {
                seen.push(n.name().unwrap_or_default().to_string());
                return Visit::Skip;
            }
            Visit::Descend
        });
        assert_eq!(seen, vec!["Squad & Co"]);
    }

    #[test]
    fn malformed_documents_fail() {
        assert!(parse_document("<catalogue><selectionEntry></catalogue>").is_err());
        assert!(parse_document("<catalogue>").is_err());
        assert!(parse_document("").is_err());
        assert!(parse_document("not markup at all").is_err());
        assert!(parse_document("<a/><b/>").is_err());
    }

    #[test]
    fn blank_name_counts_as_missing() {
        let doc = parse_document(r#"<c><selectionEntry name="  "/></c>"#).unwrap();
        assert_eq!(doc.root.children[0].name(), None);
    }
}
