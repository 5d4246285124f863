use crate::error::PopulateError;
use crate::markup::{self, Element};
use crate::record::OptionRecord;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

pub const PLACEHOLDER_LABEL: &str = "---------";

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            selected: false,
        }
    }

    /// The "no selection" entry at the top of every repopulated list.
    pub fn placeholder() -> Self {
        Self::new("", PLACEHOLDER_LABEL).selected(true)
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn is_placeholder(&self) -> bool {
        self.value.is_empty()
    }

    pub fn to_element(&self) -> Element {
        markup::option()
            .attr("value", &self.value)
            .attr_if(self.selected, "selected", "selected")
            .text(&self.label)
    }
}

impl From<&OptionRecord> for SelectOption {
    fn from(record: &OptionRecord) -> Self {
        Self::new(record.id.as_str(), record.name.as_str())
    }
}

/// Placeholder followed by one option per record, in response order.
pub fn build_options(records: &[OptionRecord]) -> Vec<SelectOption> {
    std::iter::once(SelectOption::placeholder())
        .chain(records.iter().map(SelectOption::from))
        .collect()
}

/// Marks the option whose value equals `prior` as the only selected one.
///
/// Returns the matched value, or `None` when `prior` is blank or absent from
/// the list. Without a match the flags are left untouched.
pub fn reselect(options: &mut [SelectOption], prior: Option<&str>) -> Option<String> {
    let prior = prior.filter(|value| !value.is_empty())?;
    let index = options.iter().position(|option| option.value == prior)?;
    select_only(options, index);
    Some(prior.to_string())
}

fn select_only(options: &mut [SelectOption], index: usize) {
    for (i, option) in options.iter_mut().enumerate() {
        option.selected = i == index;
    }
}

pub fn render_options(options: &[SelectOption]) -> String {
    options.iter().map(|option| option.to_element().render()).collect()
}

// ---------------------------------------------------------------------------
// DOM access
// ---------------------------------------------------------------------------

/// Access to the page's single-selection controls, addressed by element id.
pub trait Dom: Send + Sync {
    fn selected_value(&self, control_id: &str) -> Result<Option<String>, PopulateError>;

    /// Swaps the control's entire content for `options`.
    fn replace_options(
        &self,
        control_id: &str,
        options: Vec<SelectOption>,
    ) -> Result<(), PopulateError>;
}

/// In-process model of a `<select>` element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectElement {
    id: String,
    options: Vec<SelectOption>,
}

impl SelectElement {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            options: Vec::new(),
        }
    }

    pub fn with_options(mut self, options: Vec<SelectOption>) -> Self {
        self.options = options;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Current value following single-select rules: the last option flagged
    /// selected wins, otherwise the first option is the implicit choice.
    pub fn value(&self) -> Option<&str> {
        self.options
            .iter()
            .rev()
            .find(|option| option.selected)
            .or_else(|| self.options.first())
            .map(|option| option.value.as_str())
    }

    /// Selects the option carrying `value`. Returns false if there is none.
    pub fn set_value(&mut self, value: &str) -> bool {
        let Some(index) = self.options.iter().position(|option| option.value == value) else {
            return false;
        };
        select_only(&mut self.options, index);
        true
    }

    pub fn replace_options(&mut self, options: Vec<SelectOption>) {
        self.options = options;
    }

    pub fn selected_options(&self) -> Vec<&SelectOption> {
        self.options.iter().filter(|option| option.selected).collect()
    }

    pub fn inner_html(&self) -> String {
        render_options(&self.options)
    }

    pub fn render(&self) -> String {
        markup::select()
            .attr("id", &self.id)
            .attr("name", self.id.strip_prefix("id_").unwrap_or(self.id.as_str()))
            .children(self.options.iter().map(SelectOption::to_element))
            .render()
    }
}

/// Registry of select controls keyed by element id.
#[derive(Debug, Default)]
pub struct MemoryDom {
    controls: Mutex<HashMap<String, SelectElement>>,
}

impl MemoryDom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_control(self, control: SelectElement) -> Self {
        self.insert(control);
        self
    }

    pub fn insert(&self, control: SelectElement) -> Option<SelectElement> {
        self.lock().insert(control.id.clone(), control)
    }

    /// Snapshot of a control's current state.
    pub fn control(&self, control_id: &str) -> Option<SelectElement> {
        self.lock().get(control_id).cloned()
    }

    pub fn set_value(&self, control_id: &str, value: &str) -> Result<bool, PopulateError> {
        let mut controls = self.lock();
        let control = controls
            .get_mut(control_id)
            .ok_or_else(|| PopulateError::ControlNotFound(control_id.to_string()))?;
        Ok(control.set_value(value))
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, SelectElement>> {
        self.controls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Dom for MemoryDom {
    fn selected_value(&self, control_id: &str) -> Result<Option<String>, PopulateError> {
        self.lock()
            .get(control_id)
            .map(|control| control.value().map(str::to_string))
            .ok_or_else(|| PopulateError::ControlNotFound(control_id.to_string()))
    }

    fn replace_options(
        &self,
        control_id: &str,
        options: Vec<SelectOption>,
    ) -> Result<(), PopulateError> {
        let mut controls = self.lock();
        let control = controls
            .get_mut(control_id)
            .ok_or_else(|| PopulateError::ControlNotFound(control_id.to_string()))?;
        control.replace_options(options);
        Ok(())
    }
}
