use super::schema::FormSchema;
use indexmap::IndexMap;

/// Submitted values keyed by field id, in schema order.
pub type Payload = IndexMap<String, String>;

/// Flatten the schema into `field id -> raw value`.
pub fn build_payload(schema: &FormSchema) -> Payload {
    schema
        .iter()
        .map(|(id, d)| (id.to_string(), d.value.clone()))
        .collect()
}

/// Lifecycle of one mounted form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormPhase {
    #[default]
    Pristine,
    Editing,
    Submitting,
    Succeeded,
    Failed,
}

impl FormPhase {
    /// Whether keystrokes reach the schema. A failed submission keeps the form editable.
    pub fn accepts_input(self) -> bool {
        matches!(self, Self::Pristine | Self::Editing | Self::Failed)
    }

    pub fn can_submit(self) -> bool {
        self.accepts_input()
    }

    pub fn edit(self) -> Self {
        if self.accepts_input() {
            Self::Editing
        } else {
            self
        }
    }

    pub fn begin_submit(self) -> Option<Self> {
        self.can_submit().then_some(Self::Submitting)
    }

    pub fn finish(self, ok: bool) -> Self {
        match (self, ok) {
            (Self::Submitting, true) => Self::Succeeded,
            (Self::Submitting, false) => Self::Failed,
            (other, _) => other,
        }
    }
}
