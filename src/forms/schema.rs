use super::rules::{validate, RuleSet};
use super::FormError;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementType {
    Input,
    Select,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputType {
    Text,
    Email,
    Password,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub display_value: String,
}

/// Per-kind configuration of a form element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ElementConfig {
    Input {
        input_type: InputType,
        placeholder: String,
    },
    Select {
        options: Vec<SelectOption>,
    },
}

impl ElementConfig {
    pub fn element_type(&self) -> ElementType {
        match self {
            ElementConfig::Input { .. } => ElementType::Input,
            ElementConfig::Select { .. } => ElementType::Select,
        }
    }
}

/// The unit of form-field state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub element: ElementConfig,
    pub value: String,
    pub validation: Option<RuleSet>,
    pub valid: bool,
    pub touched: bool,
}

impl FieldDescriptor {
    pub fn input(input_type: InputType, placeholder: impl Into<String>) -> Self {
        Self {
            element: ElementConfig::Input {
                input_type,
                placeholder: placeholder.into(),
            },
            value: String::new(),
            validation: None,
            valid: true,
            touched: false,
        }
    }

    /// A select field; the first option is the initial value.
    pub fn select(options: &[(&str, &str)]) -> Self {
        let options: Vec<SelectOption> = options
            .iter()
            .map(|(value, display)| SelectOption {
                value: value.to_string(),
                display_value: display.to_string(),
            })
            .collect();
        let value = options.first().map(|o| o.value.clone()).unwrap_or_default();
        Self {
            element: ElementConfig::Select { options },
            value,
            validation: None,
            valid: true,
            touched: false,
        }
    }

    pub fn rules(mut self, rules: RuleSet) -> Self {
        self.validation = Some(rules);
        self.valid = validate(&self.value, self.validation.as_ref());
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self.valid = validate(&self.value, self.validation.as_ref());
        self
    }

    fn with_input(&self, raw: String) -> Self {
        let valid = validate(&raw, self.validation.as_ref());
        Self {
            element: self.element.clone(),
            value: raw,
            validation: self.validation.clone(),
            valid,
            touched: true,
        }
    }
}

/// Ordered mapping from field id to descriptor.
///
/// The key set is fixed once the schema is built; updates produce a new schema
/// that shares every untouched descriptor with the previous one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormSchema {
    fields: Vec<(String, Arc<FieldDescriptor>)>,
}

impl FormSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field. Re-declaring an id replaces it in place.
    pub fn field(mut self, id: impl Into<String>, descriptor: FieldDescriptor) -> Self {
        let id = id.into();
        let descriptor = Arc::new(descriptor);
        match self.fields.iter_mut().find(|(k, _)| *k == id) {
            Some(slot) => slot.1 = descriptor,
            None => self.fields.push((id, descriptor)),
        }
        self
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&FieldDescriptor> {
        self.descriptor(id).map(Arc::as_ref)
    }

    pub fn descriptor(&self, id: &str) -> Option<&Arc<FieldDescriptor>> {
        self.fields.iter().find(|(k, _)| k == id).map(|(_, d)| d)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldDescriptor)> {
        self.fields.iter().map(|(k, d)| (k.as_str(), d.as_ref()))
    }

    pub fn id_at(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(|(k, _)| k.as_str())
    }

    /// Return a new schema where `field_id` holds `raw`, revalidated and touched.
    pub fn update_field(&self, field_id: &str, raw: impl Into<String>) -> Result<Self, FormError> {
        let idx = self
            .fields
            .iter()
            .position(|(k, _)| k == field_id)
            .ok_or_else(|| FormError::UnknownField(field_id.to_string()))?;
        let mut fields = self.fields.clone();
        fields[idx].1 = Arc::new(fields[idx].1.with_input(raw.into()));
        Ok(Self { fields })
    }

    /// AND over every descriptor's `valid` flag; an empty schema is valid.
    pub fn is_form_valid(&self) -> bool {
        self.fields.iter().all(|(_, d)| d.valid)
    }
}
