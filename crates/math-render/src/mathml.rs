//! A minimal MathML markup tree. The MathML render surface produces these
//! values; the `Display` impl emits compact markup with the necessary
//! escaping. Anything beyond that (pretty printing, wire formats) is out of
//! scope.

use std::fmt;

/// Whether a rendered `<math>` element is laid out as a block of its own or
/// inline with the surrounding text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathDisplay {
    Block,
    Inline,
}

/// A MathML element: name, attributes and child nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MathMlElement {
    name: &'static str,
    attributes: Vec<(&'static str, String)>,
    children: Vec<MathMlNode>,
}

/// A node of MathML markup: an element or character data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MathMlNode {
    Element(MathMlElement),
    Text(String),
}

impl MathMlElement {
    pub fn new(name: &'static str) -> MathMlElement {
        MathMlElement {
            name,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> MathMlElement {
        self.attributes.push((name, value.into()));
        self
    }

    pub fn child(mut self, node: impl Into<MathMlNode>) -> MathMlElement {
        self.children.push(node.into());
        self
    }

    pub fn text(self, text: impl Into<String>) -> MathMlElement {
        self.child(MathMlNode::Text(text.into()))
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn children(&self) -> &[MathMlNode] {
        &self.children
    }
}

impl From<MathMlElement> for MathMlNode {
    fn from(element: MathMlElement) -> MathMlNode {
        MathMlNode::Element(element)
    }
}

/// Joins nodes the way `<mrow>` grouping requires: zero nodes become an
/// empty row, a single node stays bare, several nodes get wrapped.
pub(crate) fn join(mut nodes: Vec<MathMlNode>) -> MathMlNode {
    match nodes.len() {
        0 => MathMlElement::new("mrow").into(),
        1 => nodes.remove(0),
        _ => MathMlNode::Element(MathMlElement {
            name: "mrow",
            attributes: Vec::new(),
            children: nodes,
        }),
    }
}

/// An empty placeholder node for absent operands (e.g. a missing bound).
pub(crate) fn empty() -> MathMlNode {
    MathMlElement::new("mrow").into()
}

/// Wraps a rendered node in a root `<math>` element with the display
/// attributes for the requested layout.
pub(crate) fn math_root(inner: MathMlNode, display: MathDisplay) -> MathMlNode {
    let block = display == MathDisplay::Block;
    MathMlElement::new("math")
        .attr("displaystyle", if block { "true" } else { "false" })
        .attr("display", if block { "block" } else { "inline" })
        .child(inner)
        .into()
}

fn escape(f: &mut fmt::Formatter<'_>, text: &str, quote: bool) -> fmt::Result {
    for c in text.chars() {
        match c {
            '&' => f.write_str("&amp;")?,
            '<' => f.write_str("&lt;")?,
            '>' => f.write_str("&gt;")?,
            '"' if quote => f.write_str("&quot;")?,
            c => write!(f, "{c}")?,
        }
    }
    Ok(())
}

impl fmt::Display for MathMlNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MathMlNode::Text(text) => escape(f, text, false),
            MathMlNode::Element(element) => fmt::Display::fmt(element, f),
        }
    }
}

impl fmt::Display for MathMlElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.name)?;
        for (name, value) in &self.attributes {
            write!(f, " {name}=\"")?;
            escape(f, value, true)?;
            f.write_str("\"")?;
        }
        if self.children.is_empty() {
            return f.write_str("/>");
        }
        f.write_str(">")?;
        for child in &self.children {
            fmt::Display::fmt(child, f)?;
        }
        write!(f, "</{}>", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_nested_elements() {
        let frac: MathMlNode = MathMlElement::new("mfrac")
            .child(MathMlElement::new("mn").text("1"))
            .child(MathMlElement::new("mn").text("2"))
            .into();
        assert_eq!(frac.to_string(), "<mfrac><mn>1</mn><mn>2</mn></mfrac>");
    }

    #[test]
    fn childless_elements_self_close() {
        let space: MathMlNode = MathMlElement::new("mspace").into();
        assert_eq!(space.to_string(), "<mspace/>");
    }

    #[test]
    fn escapes_text_and_attributes() {
        let node: MathMlNode = MathMlElement::new("mo")
            .attr("form", "a\"b")
            .text("a<b & c")
            .into();
        assert_eq!(
            node.to_string(),
            "<mo form=\"a&quot;b\">a&lt;b &amp; c</mo>"
        );
    }

    #[test]
    fn join_wraps_only_multiple_nodes() {
        let one = join(vec![MathMlElement::new("mi").text("x").into()]);
        assert_eq!(one.to_string(), "<mi>x</mi>");
        let two = join(vec![
            MathMlElement::new("mi").text("x").into(),
            MathMlElement::new("mo").text("+").into(),
        ]);
        assert_eq!(two.to_string(), "<mrow><mi>x</mi><mo>+</mo></mrow>");
    }

    #[test]
    fn math_root_carries_display_attributes() {
        let root = math_root(MathMlElement::new("mn").text("1").into(), MathDisplay::Inline);
        assert_eq!(
            root.to_string(),
            "<math displaystyle=\"false\" display=\"inline\"><mn>1</mn></math>"
        );
    }
}
