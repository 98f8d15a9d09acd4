//! Form field values captured at submission time.

/// File chosen in a form's file input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Ordered key/value snapshot of a form, plus at most one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    fields: Vec<(String, String)>,
    file: Option<(String, FilePart)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text field. Repeated names are kept in order.
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Attach a file under the given field name, replacing any prior file.
    pub fn file(
        mut self,
        name: impl Into<String>,
        filename: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        self.file = Some((
            name.into(),
            FilePart {
                filename: filename.into(),
                bytes,
            },
        ));
        self
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// First value of a text field.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn file_part(&self) -> Option<(&str, &FilePart)> {
        self.file.as_ref().map(|(name, part)| (name.as_str(), part))
    }

    /// Encode as a `multipart/form-data` request body.
    pub fn to_multipart(&self) -> reqwest::multipart::Form {
        let mut form = reqwest::multipart::Form::new();
        for (name, value) in &self.fields {
            form = form.text(name.clone(), value.clone());
        }
        if let Some((name, part)) = &self.file {
            let file = reqwest::multipart::Part::bytes(part.bytes.clone())
                .file_name(part.filename.clone());
            form = form.part(name.clone(), file);
        }
        form
    }
}
