use anyhow::Result;

/// Something that can be listed as an option of a select.
pub trait OptionSource {
    fn option_value(&self) -> String;
    fn option_text(&self) -> String;
}

/// Asks the user before a destructive action is carried out.
///
/// `target` is the path of the confirmation page, e.g. `/books/3/delete`.
pub trait Confirm {
    fn confirm(&mut self, target: &str) -> Result<bool>;
}
