use std::fmt::{self, Display, Formatter};

use html_escape::{encode_double_quoted_attribute, encode_text};

/// Markup tree. Text and attribute values are escaped when written, so user
/// supplied values can be passed in as they are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
    children: Vec<Node>,
    void: bool,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
            void: false,
        }
    }

    /// Element without children or closing tag, e.g. `<input/>`.
    pub fn void(tag: &'static str) -> Self {
        Self {
            void: true,
            ..Self::new(tag)
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn flag(self, name: &'static str, set: bool) -> Self {
        if set {
            self.attr(name, name)
        } else {
            self
        }
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<N: Into<Node>>(mut self, children: impl IntoIterator<Item = N>) -> Self {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Node::Element(element) => Display::fmt(element, f),
            Node::Text(text) => f.write_str(&encode_text(text)),
        }
    }
}

impl Display for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        for (name, value) in &self.attrs {
            write!(f, " {}=\"{}\"", name, encode_double_quoted_attribute(value))?;
        }
        if self.void {
            return f.write_str("/>");
        }
        f.write_str(">")?;
        for child in &self.children {
            Display::fmt(child, f)?;
        }
        write!(f, "</{}>", self.tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_escaped() {
        let p = Element::new("p").text("<script>alert('x')</script> & more");
        assert_eq!(
            p.to_string(),
            "<p>&lt;script&gt;alert('x')&lt;/script&gt; &amp; more</p>"
        );
    }

    #[test]
    fn attribute_values_are_escaped() {
        let input = Element::void("input").attr("value", "a\" onclick=\"evil()");
        assert_eq!(
            input.to_string(),
            "<input value=\"a&quot; onclick=&quot;evil()\"/>"
        );
    }

    #[test]
    fn nesting_and_flags() {
        let select = Element::new("select").child(
            Element::new("option")
                .attr("value", "SMALL")
                .flag("selected", true)
                .flag("disabled", false)
                .text("Small"),
        );
        assert_eq!(
            select.to_string(),
            "<select><option value=\"SMALL\" selected=\"selected\">Small</option></select>"
        );
    }
}
