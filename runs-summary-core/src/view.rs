//! Minimal owned element tree
//!
//! Stands in for the page the summary is mounted into. Elements carry a tag,
//! optional id and class, ordered inline styles and attributes, optional text,
//! and children. Serialization is deterministic: styles and attributes are
//! written in insertion order.

/// One element in the view tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub class: Option<String>,
    styles: Vec<(String, String)>,
    attrs: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Element {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.class = Some(class.to_string());
        self
    }

    /// Set an inline style, replacing an existing value for the same property
    pub fn style(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_style(name, value);
        self
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name.to_string(), value)),
        }
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn set_style(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.styles.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value,
            None => self.styles.push((name.to_string(), value)),
        }
    }

    pub fn get_style(&self, name: &str) -> Option<&str> {
        self.styles
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class
            .as_deref()
            .is_some_and(|c| c.split_whitespace().any(|part| part == class))
    }

    /// Append a child and return a handle to it
    pub fn append(&mut self, child: Element) -> &mut Element {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Insert a child before the direct child with id `anchor_id`, or append
    /// it when no such child exists. Returns a handle to the inserted child.
    pub fn insert_before(&mut self, child: Element, anchor_id: &str) -> &mut Element {
        let index = self
            .children
            .iter()
            .position(|c| c.id.as_deref() == Some(anchor_id))
            .unwrap_or(self.children.len());
        self.children.insert(index, child);
        &mut self.children[index]
    }

    /// Remove every child and any text content
    pub fn clear(&mut self) {
        self.children.clear();
        self.text = None;
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.text.is_none()
    }

    /// Depth-first search for an element with the given id (self included)
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_by_id(id))
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_by_id_mut(id))
    }

    /// All descendants (self excluded) carrying `class`, in document order
    pub fn find_all_by_class(&self, class: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        for child in &self.children {
            if child.has_class(class) {
                found.push(child);
            }
            found.extend(child.find_all_by_class(class));
        }
        found
    }

    /// Concatenated text of this element and its descendants
    pub fn text_content(&self) -> String {
        let mut out = self.text.clone().unwrap_or_default();
        for child in &self.children {
            out.push_str(&child.text_content());
        }
        out
    }

    /// Serialize as HTML
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out, 0);
        out
    }

    fn write_html(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        out.push_str(&indent);
        out.push('<');
        out.push_str(&self.tag);
        if let Some(id) = &self.id {
            out.push_str(&format!(" id=\"{}\"", html_escape(id)));
        }
        if let Some(class) = &self.class {
            out.push_str(&format!(" class=\"{}\"", html_escape(class)));
        }
        for (name, value) in &self.attrs {
            out.push_str(&format!(" {}=\"{}\"", name, html_escape(value)));
        }
        if !self.styles.is_empty() {
            let css: Vec<String> = self
                .styles
                .iter()
                .map(|(n, v)| format!("{}: {}", n, v))
                .collect();
            out.push_str(&format!(" style=\"{}\"", html_escape(&css.join("; "))));
        }
        out.push('>');

        if let Some(text) = &self.text {
            out.push_str(&html_escape(text));
        }
        if self.children.is_empty() {
            out.push_str(&format!("</{}>\n", self.tag));
            return;
        }
        out.push('\n');
        for child in &self.children {
            child.write_html(out, depth + 1);
        }
        out.push_str(&indent);
        out.push_str(&format!("</{}>\n", self.tag));
    }
}

/// The page the summary lives in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub body: Element,
}

impl Default for Document {
    fn default() -> Self {
        Document {
            body: Element::new("body"),
        }
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn element_by_id(&self, id: &str) -> Option<&Element> {
        self.body.find_by_id(id)
    }

    pub fn element_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.body.find_by_id_mut(id)
    }

    pub fn to_html(&self) -> String {
        self.body.to_html()
    }
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
