//! Small building blocks the pages are made of: selects, field error slots,
//! toasts and delete confirmation.

use std::collections::{BTreeMap, HashSet};

use anyhow::Result;
use tracing::warn;

use crate::{
    config::Config,
    traits::{Confirm, OptionSource},
};

pub const PLACEHOLDER_TEXT: &str = "- select -";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value:    String,
    pub text:     String,
    pub disabled: bool,
    pub selected: bool,
}

/// Option list of a `<select>`, single or multiple choice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Select {
    options:  Vec<SelectOption>,
    multiple: bool,
}

impl Select {
    pub fn single() -> Self {
        Self::default()
    }

    pub fn multiple() -> Self {
        Self {
            multiple: true,
            ..Self::default()
        }
    }

    pub fn is_multiple(&self) -> bool {
        self.multiple
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Replaces all options. The optional placeholder has an empty value, is
    /// disabled and starts out selected.
    pub fn fill_options_with<T>(
        &mut self,
        items: &[T],
        value: impl Fn(&T) -> String,
        text: impl Fn(&T) -> String,
        add_placeholder: bool,
    ) {
        self.options.clear();
        if add_placeholder {
            self.options.push(SelectOption {
                value:    String::new(),
                text:     PLACEHOLDER_TEXT.to_string(),
                disabled: true,
                selected: true,
            });
        }
        self.options.extend(items.iter().map(|item| SelectOption {
            value:    value(item),
            text:     text(item),
            disabled: false,
            selected: false,
        }));
    }

    pub fn fill_options<T: OptionSource>(&mut self, items: &[T], add_placeholder: bool) {
        self.fill_options_with(
            items,
            T::option_value,
            T::option_text,
            add_placeholder,
        );
    }

    /// Whether a selectable option carries this value.
    pub fn has_value(&self, value: &str) -> bool {
        self.options
            .iter()
            .any(|option| !option.disabled && option.value == value)
    }

    /// Selects the option with this value and deselects the rest. An unknown
    /// value leaves nothing selected.
    pub fn set_value(&mut self, value: &str) {
        for option in &mut self.options {
            option.selected = option.value == value;
        }
    }

    /// Marks exactly the options whose value is in `values` as selected.
    pub fn select_values(&mut self, values: &HashSet<String>) {
        for option in &mut self.options {
            option.selected = values.contains(&option.value);
        }
    }

    /// Value of the first selected option, or `""`.
    pub fn value(&self) -> &str {
        self.options
            .iter()
            .find(|option| option.selected)
            .map(|option| option.value.as_str())
            .unwrap_or_default()
    }

    /// Values of all selected options, leaving out the placeholder.
    pub fn selected_values(&self) -> Vec<&str> {
        self.options
            .iter()
            .filter(|option| option.selected && !option.disabled)
            .map(|option| option.value.as_str())
            .collect()
    }

    /// Texts of all selected options, leaving out the placeholder.
    pub fn selected_texts(&self) -> Vec<&str> {
        self.options
            .iter()
            .filter(|option| option.selected && !option.disabled)
            .map(|option| option.text.as_str())
            .collect()
    }
}

/// Error elements of a form, keyed by element id. An element is visible iff
/// its text is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorSlots(BTreeMap<String, String>);

impl ErrorSlots {
    pub fn new(ids: &[&str]) -> Self {
        Self(
            ids.iter()
                .map(|id| (id.to_string(), String::new()))
                .collect(),
        )
    }

    /// Setting a slot the form doesn't have does nothing.
    pub fn set_field_error(&mut self, id: &str, text: &str) {
        if let Some(slot) = self.0.get_mut(id) {
            *slot = text.to_string();
        }
    }

    pub fn clear_field_errors(&mut self, ids: &[&str]) {
        for id in ids {
            self.set_field_error(id, "");
        }
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.text(id).is_some()
    }

    pub fn text(&self, id: &str) -> Option<&str> {
        self.0
            .get(id)
            .map(String::as_str)
            .filter(|text| !text.is_empty())
    }

    pub fn visible(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .filter(|(_, text)| !text.is_empty())
            .map(|(id, text)| (id.as_str(), text.as_str()))
    }
}

/// Tells the user that the current action failed.
pub fn show_toast(config: &Config, message: &str) {
    warn!(toast = message, "action failed");
    eprintln!("{}", config.output_error.format_str(message));
}

/// Confirmation through an interactive yes/no prompt that defaults to no.
#[derive(Debug, Default, Clone, Copy)]
pub struct InquireConfirm;

impl Confirm for InquireConfirm {
    fn confirm(&mut self, target: &str) -> Result<bool> {
        Ok(inquire::Confirm::new("Are you sure you want to delete this?")
            .with_help_message(target)
            .with_default(false)
            .prompt()?)
    }
}

/// Confirms everything, for `--yes`.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _target: &str) -> Result<bool> {
        Ok(true)
    }
}
