use super::schema::{ElementConfig, ElementType, FormSchema};
use super::FormError;

/// One input as seen by the drawing code. Holds a copy of the descriptor
/// state; the schema stays the only source of truth.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedField {
    pub id: String,
    pub element: ElementConfig,
    pub value: String,
    pub invalid: bool,
    pub touched: bool,
    pub should_validate: bool,
}

/// A pending edit produced by a rendered field's change handler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldChange {
    pub id: String,
    pub value: String,
}

impl FieldChange {
    pub fn apply(&self, schema: &FormSchema) -> Result<FormSchema, FormError> {
        schema.update_field(&self.id, self.value.clone())
    }
}

impl RenderedField {
    pub fn element_type(&self) -> ElementType {
        self.element.element_type()
    }

    /// Change handler bound to this field's id.
    pub fn changed(&self, raw: impl Into<String>) -> FieldChange {
        FieldChange {
            id: self.id.clone(),
            value: raw.into(),
        }
    }

    /// Invalid styling only shows once the user has touched a validated field.
    pub fn show_invalid(&self) -> bool {
        self.invalid && self.should_validate && self.touched
    }

    pub fn label(&self) -> &str {
        match &self.element {
            ElementConfig::Input { placeholder, .. } => placeholder,
            ElementConfig::Select { .. } => &self.id,
        }
    }

    /// Select fields show the option label instead of the raw value.
    pub fn display_value(&self) -> &str {
        match &self.element {
            ElementConfig::Select { options } => options
                .iter()
                .find(|o| o.value == self.value)
                .map(|o| o.display_value.as_str())
                .unwrap_or(self.value.as_str()),
            ElementConfig::Input { .. } => &self.value,
        }
    }
}

pub fn render(schema: &FormSchema) -> Vec<RenderedField> {
    schema
        .iter()
        .map(|(id, d)| RenderedField {
            id: id.to_string(),
            element: d.element.clone(),
            value: d.value.clone(),
            invalid: !d.valid,
            touched: d.touched,
            should_validate: d.validation.is_some(),
        })
        .collect()
}
