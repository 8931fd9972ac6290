//! Element metadata and extensions
//!
//! `Element` is the `id` + `extension` envelope carried by every primitive and
//! complex value. `Extension` is itself an element: a URL plus either one typed
//! value or a list of nested extensions.

use crate::error::{Error, Result};
use crate::resource::Choice;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub id: Option<String>,
    pub extension: Vec<Extension>,
}

impl Element {
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            extension: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.extension.is_empty()
    }

    /// Extensions with the given URL, in document order.
    pub fn extensions_by_url<'a>(&'a self, url: &'a str) -> impl Iterator<Item = &'a Extension> {
        self.extension.iter().filter(move |ext| ext.url == url)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Extension {
    pub element: Element,
    pub url: String,
    pub value: Option<Choice>,
}

impl Extension {
    /// A simple extension carrying one value.
    pub fn new(url: impl Into<String>, value: Choice) -> Self {
        Self {
            element: Element::default(),
            url: url.into(),
            value: Some(value),
        }
    }

    /// A complex extension built from nested extensions.
    pub fn complex(url: impl Into<String>, children: Vec<Extension>) -> Result<Self> {
        let url = url.into();
        if children.is_empty() {
            return Err(Error::EmptyExtension(url));
        }
        Ok(Self {
            element: Element {
                id: None,
                extension: children,
            },
            url,
            value: None,
        })
    }

    /// Assembles an extension from decoded parts, rejecting one that carries
    /// neither a value nor children.
    pub fn from_parts(element: Element, url: String, value: Option<Choice>) -> Result<Self> {
        if value.is_none() && element.extension.is_empty() {
            return Err(Error::EmptyExtension(url));
        }
        Ok(Self {
            element,
            url,
            value,
        })
    }

    pub fn children(&self) -> &[Extension] {
        &self.element.extension
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::Primitive;
    use crate::resource::Value;

    #[test]
    fn test_extension_needs_value_or_children() {
        let err = Extension::from_parts(Element::default(), "http://x".into(), None).unwrap_err();
        assert_eq!(err, Error::EmptyExtension("http://x".into()));
        assert!(Extension::complex("http://x", Vec::new()).is_err());
    }

    #[test]
    fn test_nested_extensions() {
        let leaf = Extension::new(
            "code",
            Choice::new("String", Value::String(Primitive::new("abc".to_string()))),
        );
        let parent = Extension::complex("http://example.org/ext", vec![leaf]).unwrap();
        assert_eq!(parent.children().len(), 1);
        assert!(parent.value.is_none());

        let mut element = Element::with_id("e1");
        element.extension.push(parent);
        assert_eq!(element.extensions_by_url("http://example.org/ext").count(), 1);
        assert_eq!(element.extensions_by_url("other").count(), 0);
    }
}
