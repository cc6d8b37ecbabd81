use std::borrow::Cow;

use reedline::{
    Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus, PromptViMode,
};

/// Prompt showing which catalog service the session talks to.
pub struct ShelfPrompt {
    service: String,
}

impl ShelfPrompt {
    pub fn new(base_url: &str) -> Self {
        let service = base_url
            .trim_start_matches("http://")
            .trim_start_matches("https://")
            .to_string();
        Self { service }
    }
}

impl Prompt for ShelfPrompt {
    fn render_prompt_left(&self) -> Cow<str> {
        Cow::Borrowed("shelf")
    }

    fn render_prompt_right(&self) -> Cow<str> {
        Cow::Borrowed(&self.service)
    }

    fn render_prompt_indicator(&self, prompt_mode: PromptEditMode) -> Cow<str> {
        match prompt_mode {
            PromptEditMode::Vi(PromptViMode::Normal) => " : ".into(),
            PromptEditMode::Custom(mode) => format!(" ({mode}) ").into(),
            _ => " > ".into(),
        }
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<str> {
        Cow::Borrowed("... ")
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<str> {
        match history_search.status {
            PromptHistorySearchStatus::Passing => {
                format!("(search: {}) ", history_search.term).into()
            }
            PromptHistorySearchStatus::Failing => {
                format!("(no match: {}) ", history_search.term).into()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn right_prompt_shows_host_without_scheme() {
        let prompt = ShelfPrompt::new("https://catalog.example.org:8443");
        assert_eq!(prompt.render_prompt_right(), "catalog.example.org:8443");
    }
}
