//! Keyboard handling.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::{App, Focus};

/// Longest accepted draft (`YYYY-MM-DDTHH:MM:SS`).
const MAX_DRAFT_LEN: usize = 19;

impl App {
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::BackTab => self.focus = self.focus.next(),
            _ => match self.focus {
                Focus::Button => self.handle_button_key(key.code),
                Focus::Datetime => self.handle_datetime_key(key.code),
            },
        }
    }

    fn handle_button_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char(' ') | KeyCode::Enter => {
                self.session.toggle_button();
            }
            _ => {}
        }
    }

    fn handle_datetime_key(&mut self, code: KeyCode) {
        if !self.datetime_enabled() {
            if code == KeyCode::Char('q') {
                self.should_quit = true;
            }
            return;
        }

        match code {
            KeyCode::Enter => self.commit_datetime(),
            KeyCode::Delete => self.clear_datetime(),
            KeyCode::Backspace => {
                self.datetime_draft.pop();
                self.input_error = None;
            }
            KeyCode::Char(c) if is_datetime_char(c) => {
                if self.datetime_draft.len() < MAX_DRAFT_LEN {
                    self.datetime_draft.push(c);
                    self.input_error = None;
                }
            }
            _ => {}
        }
    }
}

fn is_datetime_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '-' | ':' | 'T' | 't')
}
