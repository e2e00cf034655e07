use super::render::{render, FieldChange, RenderedField};
use super::schema::{ElementConfig, FormSchema};
use super::submit::{build_payload, FormPhase, Payload};
use super::FormError;

/// Keystroke-level edits a screen forwards to its form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormInput {
    Char(char),
    Backspace,
    Next,
    Prev,
    /// Move a select field by this many options (wraps).
    Cycle(i32),
}

/// A mounted form: schema snapshot, lifecycle phase and cursor.
#[derive(Clone, Debug, Default)]
pub struct FormController {
    schema: FormSchema,
    phase: FormPhase,
    pub selected: usize,
    pub message: Option<String>,
}

impl FormController {
    pub fn new(schema: FormSchema) -> Self {
        Self {
            schema,
            ..Default::default()
        }
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn is_valid(&self) -> bool {
        self.schema.is_form_valid()
    }

    pub fn fields(&self) -> Vec<RenderedField> {
        render(&self.schema)
    }

    pub fn value(&self, id: &str) -> Option<&str> {
        self.schema.get(id).map(|d| d.value.as_str())
    }

    /// Apply a change coming from a rendered field. Ignored while the form is
    /// not accepting input.
    pub fn apply(&mut self, change: FieldChange) -> Result<(), FormError> {
        if !self.phase.accepts_input() {
            return Ok(());
        }
        self.schema = change.apply(&self.schema)?;
        self.phase = self.phase.edit();
        Ok(())
    }

    pub fn input(&mut self, input: FormInput) -> Result<(), FormError> {
        if !self.phase.accepts_input() {
            return Ok(());
        }
        match input {
            FormInput::Next => {
                if !self.schema.is_empty() {
                    self.selected = (self.selected + 1) % self.schema.len();
                }
                Ok(())
            }
            FormInput::Prev => {
                if !self.schema.is_empty() {
                    let n = self.schema.len();
                    self.selected = (self.selected + n - 1) % n;
                }
                Ok(())
            }
            FormInput::Char(c) => match self.current() {
                Some(f) if matches!(f.element, ElementConfig::Input { .. }) => {
                    let mut v = f.value.clone();
                    v.push(c);
                    self.apply(f.changed(v))
                }
                _ => Ok(()),
            },
            FormInput::Backspace => match self.current() {
                Some(f) if matches!(f.element, ElementConfig::Input { .. }) => {
                    let mut v = f.value.clone();
                    if v.pop().is_none() {
                        return Ok(());
                    }
                    self.apply(f.changed(v))
                }
                _ => Ok(()),
            },
            FormInput::Cycle(dir) => {
                let Some(f) = self.current() else {
                    return Ok(());
                };
                let ElementConfig::Select { options } = &f.element else {
                    return Ok(());
                };
                if options.is_empty() {
                    return Ok(());
                }
                let n = options.len() as i32;
                let cur = options.iter().position(|o| o.value == f.value).unwrap_or(0) as i32;
                let next = (cur + dir).rem_euclid(n) as usize;
                let value = options[next].value.clone();
                self.apply(f.changed(value))
            }
        }
    }

    /// Validate and move into `Submitting`, returning the flattened values.
    pub fn try_submit(&mut self) -> Result<Payload, FormError> {
        if !self.phase.can_submit() {
            return Err(FormError::NotSubmittable(self.phase));
        }
        if !self.is_valid() {
            self.message = Some("Please fix the highlighted fields".into());
            return Err(FormError::Invalid);
        }
        self.phase = self.phase.begin_submit().unwrap_or(self.phase);
        self.message = None;
        Ok(build_payload(&self.schema))
    }

    pub fn finish(&mut self, ok: bool) {
        self.phase = self.phase.finish(ok);
    }

    fn current(&self) -> Option<RenderedField> {
        let id = self.schema.id_at(self.selected)?;
        self.fields().into_iter().find(|f| f.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::{FieldDescriptor, InputType, RuleSet};

    fn form() -> FormController {
        FormController::new(
            FormSchema::new()
                .field(
                    "zipCode",
                    FieldDescriptor::input(InputType::Text, "ZIP Code")
                        .rules(RuleSet::new().required().min_length(5).max_length(5)),
                )
                .field(
                    "deliveryMethod",
                    FieldDescriptor::select(&[("fastest", "Fastest"), ("cheapest", "Cheapest")]),
                ),
        )
    }

    #[test]
    fn typing_revalidates_each_keystroke() {
        let mut f = form();
        for c in "1234".chars() {
            f.input(FormInput::Char(c)).unwrap();
            assert!(!f.is_valid());
        }
        f.input(FormInput::Char('5')).unwrap();
        assert_eq!(f.value("zipCode"), Some("12345"));
        assert!(f.is_valid());
        assert_eq!(f.phase(), FormPhase::Editing);
        f.input(FormInput::Backspace).unwrap();
        assert_eq!(f.value("zipCode"), Some("1234"));
        assert!(!f.is_valid());
    }

    #[test]
    fn backspace_on_empty_does_not_touch() {
        let mut f = form();
        f.input(FormInput::Backspace).unwrap();
        assert!(!f.schema().get("zipCode").unwrap().touched);
        assert_eq!(f.phase(), FormPhase::Pristine);
    }

    #[test]
    fn selection_wraps_and_cycle_only_hits_selects() {
        let mut f = form();
        f.input(FormInput::Prev).unwrap();
        assert_eq!(f.selected, 1);
        f.input(FormInput::Char('x')).unwrap();
        assert_eq!(f.value("deliveryMethod"), Some("fastest"));
        f.input(FormInput::Cycle(1)).unwrap();
        assert_eq!(f.value("deliveryMethod"), Some("cheapest"));
        f.input(FormInput::Cycle(1)).unwrap();
        assert_eq!(f.value("deliveryMethod"), Some("fastest"));
        f.input(FormInput::Cycle(-1)).unwrap();
        assert_eq!(f.value("deliveryMethod"), Some("cheapest"));
        f.input(FormInput::Next).unwrap();
        assert_eq!(f.selected, 0);
        f.input(FormInput::Cycle(1)).unwrap();
        assert_eq!(f.value("zipCode"), Some(""));
    }

    #[test]
    fn submit_is_blocked_until_valid() {
        let mut f = form();
        assert_eq!(f.try_submit().unwrap_err(), FormError::Invalid);
        assert!(f.message.is_some());
        for c in "12345".chars() {
            f.input(FormInput::Char(c)).unwrap();
        }
        let payload = f.try_submit().unwrap();
        assert_eq!(payload["zipCode"], "12345");
        assert_eq!(payload["deliveryMethod"], "fastest");
        assert_eq!(f.phase(), FormPhase::Submitting);
        assert!(f.message.is_none());
    }

    #[test]
    fn input_is_ignored_while_submitting() {
        let mut f = form();
        for c in "12345".chars() {
            f.input(FormInput::Char(c)).unwrap();
        }
        f.try_submit().unwrap();
        f.input(FormInput::Char('9')).unwrap();
        assert_eq!(f.value("zipCode"), Some("12345"));
        assert_eq!(
            f.try_submit().unwrap_err(),
            FormError::NotSubmittable(FormPhase::Submitting)
        );
    }

    #[test]
    fn failed_submission_keeps_values_and_allows_edits() {
        let mut f = form();
        for c in "12345".chars() {
            f.input(FormInput::Char(c)).unwrap();
        }
        f.try_submit().unwrap();
        f.finish(false);
        assert_eq!(f.phase(), FormPhase::Failed);
        assert_eq!(f.value("zipCode"), Some("12345"));
        f.input(FormInput::Backspace).unwrap();
        assert_eq!(f.phase(), FormPhase::Editing);
    }
}
