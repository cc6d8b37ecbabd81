use std::path::Path;

use anyhow::Result;
use reedline::{
    default_emacs_keybindings, ColumnarMenu, DefaultCompleter, DefaultHinter, Emacs,
    ExampleHighlighter, FileBackedHistory, KeyCode, KeyModifiers, Keybindings, Reedline,
    ReedlineEvent, ReedlineMenu, Signal,
};
use tracing::debug;

use crate::prompt::ShelfPrompt;

const HISTORY_SIZE: usize = 1000;
const COMPLETION_MENU: &str = "completion_menu";

pub struct Repl {
    reedline: Reedline,
    prompt:   ShelfPrompt,
}

/// Emacs bindings, with tab opening and cycling the completion menu.
fn keybindings() -> Keybindings {
    let mut keybindings = default_emacs_keybindings();
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Tab,
        ReedlineEvent::UntilFound(vec![
            ReedlineEvent::Menu(COMPLETION_MENU.to_string()),
            ReedlineEvent::MenuNext,
        ]),
    );
    keybindings
}

impl Repl {
    /// `commands` are full command paths like `books delete`, used for
    /// completion and highlighting.
    pub fn new(commands: Vec<String>, history_file: &Path, prompt: ShelfPrompt) -> Result<Self> {
        if let Some(parent) = history_file.parent() {
            std::fs::create_dir_all(parent)?;
        }
        debug!(history = %history_file.display(), "starting repl");
        let history = FileBackedHistory::with_file(HISTORY_SIZE, history_file.to_path_buf())?;

        let reedline = Reedline::create()
            .with_history(Box::new(history))
            .with_hinter(Box::new(DefaultHinter::default()))
            .with_highlighter(Box::new(ExampleHighlighter::new(commands.clone())))
            .with_completer(Box::new(DefaultCompleter::new_with_wordlen(commands, 1)))
            .with_menu(ReedlineMenu::EngineCompleter(Box::new(
                ColumnarMenu::default().with_name(COMPLETION_MENU),
            )))
            .with_edit_mode(Box::new(Emacs::new(keybindings())));

        Ok(Repl { reedline, prompt })
    }

    pub fn read_line(&mut self) -> Result<Signal> {
        Ok(self.reedline.read_line(&self.prompt)?)
    }
}
