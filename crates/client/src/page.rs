//! In-memory page model the controller renders into.
//!
//! A [`Page`] holds elements keyed by id. [`PageElements`] names the five
//! elements the controller needs; they are handed to the controller
//! explicitly rather than looked up from ambient global state.

use std::collections::HashMap;

use crate::error::ClientError;

/// One element of the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub visible: bool,
    pub inner_html: String,
    /// Value of input elements.
    pub value: String,
}

impl Element {
    pub fn visible() -> Self {
        Self {
            visible: true,
            ..Self::default()
        }
    }

    pub fn hidden() -> Self {
        Self::default()
    }
}

/// Ids of the elements the controller drives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageElements {
    pub form: String,
    pub spinner: String,
    pub output: String,
    pub download_section: String,
    /// Hidden input carrying the summary to the download form.
    pub result_field: String,
}

impl Default for PageElements {
    fn default() -> Self {
        Self {
            form: "summarize-form".to_string(),
            spinner: "loading-spinner".to_string(),
            output: "summary-box".to_string(),
            download_section: "download-section".to_string(),
            result_field: "summary-input".to_string(),
        }
    }
}

impl PageElements {
    fn ids(&self) -> [&str; 5] {
        [
            self.form.as_str(),
            self.spinner.as_str(),
            self.output.as_str(),
            self.download_section.as_str(),
            self.result_field.as_str(),
        ]
    }
}

/// Flat document of elements plus an error banner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    elements: HashMap<String, Element>,
    /// Message shown to the user when a submission fails.
    pub error: Option<String>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// A page containing the given elements in their initial state: the
    /// spinner and download section hidden, everything else visible.
    pub fn with_elements(elements: &PageElements) -> Self {
        let mut page = Self::new();
        page.insert(&elements.form, Element::visible());
        page.insert(&elements.spinner, Element::hidden());
        page.insert(&elements.output, Element::visible());
        page.insert(&elements.download_section, Element::hidden());
        page.insert(&elements.result_field, Element::hidden());
        page
    }

    pub fn insert(&mut self, id: impl Into<String>, element: Element) {
        self.elements.insert(id.into(), element);
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    /// Fail with [`ClientError::MissingElement`] naming the first absent id.
    pub fn require(&self, elements: &PageElements) -> Result<(), ClientError> {
        match elements.ids().into_iter().find(|id| !self.elements.contains_key(*id)) {
            Some(missing) => Err(ClientError::MissingElement(missing.to_string())),
            None => Ok(()),
        }
    }

    pub fn show(&mut self, id: &str) {
        if let Some(el) = self.elements.get_mut(id) {
            el.visible = true;
        }
    }

    pub fn hide(&mut self, id: &str) {
        if let Some(el) = self.elements.get_mut(id) {
            el.visible = false;
        }
    }

    pub fn set_inner_html(&mut self, id: &str, html: impl Into<String>) {
        if let Some(el) = self.elements.get_mut(id) {
            el.inner_html = html.into();
        }
    }

    pub fn set_value(&mut self, id: &str, value: impl Into<String>) {
        if let Some(el) = self.elements.get_mut(id) {
            el.value = value.into();
        }
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.element(id).is_some_and(|el| el.visible)
    }
}
