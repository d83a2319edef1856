use std::fmt;

use crate::domain::PostId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Main,
    Article,
    Section,
    H2,
    H3,
    P,
    Button,
}

impl Tag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Main => "main",
            Tag::Article => "article",
            Tag::Section => "section",
            Tag::H2 => "h2",
            Tag::H3 => "h3",
            Tag::P => "p",
            Tag::Button => "button",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detached element, not yet part of any document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: Tag,
    pub text: String,
    pub classes: Vec<String>,
    pub post_id: Option<PostId>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            text: String::new(),
            classes: Vec::new(),
            post_id: None,
            children: Vec::new(),
        }
    }

    /// Element carrying only text.
    pub fn text(tag: Tag, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::new(tag)
        }
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !class.is_empty() && !self.has_class(&class) {
            self.classes.push(class);
        }
        self
    }

    pub fn post_id(mut self, post_id: PostId) -> Self {
        self.post_id = Some(post_id);
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn append(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Move every element of `fragment` under this one.
    pub fn append_fragment(&mut self, fragment: Fragment) {
        self.children.extend(fragment.elements);
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Own text followed by the text of all descendants, space separated.
    pub fn text_content(&self) -> String {
        let mut parts = Vec::new();
        self.collect_text(&mut parts);
        parts.join(" ")
    }

    fn collect_text<'a>(&'a self, parts: &mut Vec<&'a str>) {
        if !self.text.is_empty() {
            parts.push(&self.text);
        }
        for child in &self.children {
            child.collect_text(parts);
        }
    }

    /// Depth-first search for descendants (self included) with `tag`.
    pub fn find_all(&self, tag: Tag) -> Vec<&Element> {
        let mut found = Vec::new();
        let mut stack = vec![self];
        while let Some(element) = stack.pop() {
            if element.tag == tag {
                found.push(element);
            }
            stack.extend(element.children.iter().rev());
        }
        found
    }
}

/// An ordered batch of detached elements, mounted together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    elements: Vec<Element>,
}

impl Fragment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, element: Element) {
        self.elements.push(element);
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn into_elements(self) -> Vec<Element> {
        self.elements
    }
}

impl From<Element> for Fragment {
    fn from(element: Element) -> Self {
        Self {
            elements: vec![element],
        }
    }
}

impl FromIterator<Element> for Fragment {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().collect(),
        }
    }
}
