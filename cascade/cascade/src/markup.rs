//! Small HTML builder for the markup that ends up inside a `<select>`.
//!
//! Attributes keep insertion order so rendered option lists are stable and
//! can be compared byte for byte.

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
    text_content: Option<String>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    /// Sets an attribute, replacing an existing one with the same key in place.
    pub fn attr(mut self, key: &str, value: &str) -> Self {
        match self.attributes.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self
                .attributes
                .push((key.to_string(), value.to_string())),
        }
        self
    }

    pub fn attr_if(self, condition: bool, key: &str, value: &str) -> Self {
        if condition {
            self.attr(key, value)
        } else {
            self
        }
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text_content = Some(text.to_string());
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(self, children: impl IntoIterator<Item = Element>) -> Self {
        children.into_iter().fold(self, Element::child)
    }

    pub fn render(&self) -> String {
        let mut html = format!("<{}", self.tag);
        for (key, value) in &self.attributes {
            html.push_str(&format!(" {}=\"{}\"", key, html_escape(value)));
        }
        html.push('>');
        html.push_str(&self.render_inner());
        html.push_str(&format!("</{}>", self.tag));
        html
    }

    /// Renders text and children without the element's own tag.
    pub fn render_inner(&self) -> String {
        let mut html = String::new();
        if let Some(text) = &self.text_content {
            html.push_str(&html_escape(text));
        }
        for child in &self.children {
            html.push_str(&child.render());
        }
        html
    }
}

pub fn select() -> Element {
    Element::new("select")
}

pub fn option() -> Element {
    Element::new("option")
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
