//! Multipart form representation
//!
//! Transport-neutral ordered (name, value) pairs. The HTTP client turns
//! this into a real multipart body; tests inspect it directly.

use crate::domain::FileBlob;

/// Value of one form part
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartValue {
    Text(String),
    File(FileBlob),
}

/// One named form part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPart {
    pub name: String,
    pub value: PartValue,
}

/// Ordered multipart form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    parts: Vec<FormPart>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.parts.push(FormPart {
            name: name.into(),
            value: PartValue::Text(value.into()),
        });
    }

    /// Text part, omitted entirely when absent
    pub fn opt_text(&mut self, name: impl Into<String>, value: Option<impl Into<String>>) {
        if let Some(value) = value {
            self.text(name, value);
        }
    }

    /// File part, omitted entirely when absent
    pub fn opt_file(&mut self, name: impl Into<String>, blob: Option<&FileBlob>) {
        if let Some(blob) = blob {
            self.parts.push(FormPart {
                name: name.into(),
                value: PartValue::File(blob.clone()),
            });
        }
    }

    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    pub fn into_parts(self) -> Vec<FormPart> {
        self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.parts.iter().map(|part| part.name.as_str()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.parts.iter().any(|part| part.name == name)
    }

    /// First text value named `name`
    pub fn get_text(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|part| match &part.value {
            PartValue::Text(value) if part.name == name => Some(value.as_str()),
            _ => None,
        })
    }

    /// First file named `name`
    pub fn get_file(&self, name: &str) -> Option<&FileBlob> {
        self.parts.iter().find_map(|part| match &part.value {
            PartValue::File(blob) if part.name == name => Some(blob),
            _ => None,
        })
    }
}
