//! Declarative extraction jobs
//!
//! An [`ExtractionJob`] names a container selector and the fields to pull
//! out of each container. Running a job yields one [`Record`] per container.

mod css_extractor;
mod engine;
mod record;

pub use css_extractor::*;
pub use engine::*;
pub use record::*;

/// How a field reads its matched element(s)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Text of the first match; null when nothing matches
    SingleText,
    /// Text of every match; an empty list when nothing matches
    AllText,
    /// Named attribute of the first match; null when unmatched or absent
    Attribute(String),
}

/// Post-process applied to each extracted string
pub type Normalize = fn(String) -> String;

/// How to extract one named value from a container
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub name: String,
    /// CSS selector, evaluated against the container's descendants
    pub selector: String,
    pub mode: Mode,
    pub normalize: Option<Normalize>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, selector: impl Into<String>, mode: Mode) -> Self {
        Self {
            name: name.into(),
            selector: selector.into(),
            mode,
            normalize: None,
        }
    }

    pub fn text(name: impl Into<String>, selector: impl Into<String>) -> Self {
        Self::new(name, selector, Mode::SingleText)
    }

    pub fn all_text(name: impl Into<String>, selector: impl Into<String>) -> Self {
        Self::new(name, selector, Mode::AllText)
    }

    pub fn attr(
        name: impl Into<String>,
        selector: impl Into<String>,
        attr_name: impl Into<String>,
    ) -> Self {
        Self::new(name, selector, Mode::Attribute(attr_name.into()))
    }

    pub fn with_normalize(mut self, normalize: Normalize) -> Self {
        self.normalize = Some(normalize);
        self
    }
}

/// Field computed from an earlier text field of the same record.
///
/// `derive` only sees text values; a null or list source gives null.
#[derive(Debug, Clone)]
pub struct DerivedField {
    pub name: String,
    pub source: String,
    pub derive: fn(&str) -> Option<String>,
}

impl DerivedField {
    pub fn new(
        name: impl Into<String>,
        source: impl Into<String>,
        derive: fn(&str) -> Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            derive,
        }
    }
}

/// Container selector plus the fields read from each container
#[derive(Debug, Clone)]
pub struct ExtractionJob {
    pub container_selector: String,
    pub fields: Vec<FieldDescriptor>,
    /// Evaluated in order, after every selector field
    pub derived: Vec<DerivedField>,
}

impl ExtractionJob {
    pub fn new(container_selector: impl Into<String>) -> Self {
        Self {
            container_selector: container_selector.into(),
            fields: vec![],
            derived: vec![],
        }
    }

    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn derive(mut self, derived: DerivedField) -> Self {
        self.derived.push(derived);
        self
    }

    /// Every key a record of this job carries, in order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .map(|f| f.name.as_str())
            .chain(self.derived.iter().map(|d| d.name.as_str()))
    }
}
