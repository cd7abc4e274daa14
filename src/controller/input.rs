//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::{ManualField, Page};
use super::AppController;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // Quit works everywhere
        if ctrl && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
            self.model.set_should_quit(true).await;
            return Ok(());
        }

        // Esc dismisses a visible notification before anything else
        if key.code == KeyCode::Esc && self.model.dismiss_notification().await {
            return Ok(());
        }

        // Handle help popup
        if self.model.is_help_popup_open().await {
            if matches!(key.code, KeyCode::Esc | KeyCode::F(1)) {
                self.model.toggle_help_popup().await;
            }
            return Ok(());
        }

        // Preview overlay captures all input while visible
        if self.model.is_preview_visible().await {
            match key.code {
                KeyCode::Esc => self.close_preview().await,
                KeyCode::Char('s') if ctrl => {
                    let controller = self.clone();
                    tokio::spawn(async move { controller.send_preview().await });
                }
                KeyCode::Enter => self.edit_preview_push('\n').await,
                KeyCode::Backspace => self.edit_preview_backspace().await,
                KeyCode::Char(c) if !ctrl => self.edit_preview_push(c).await,
                _ => {}
            }
            return Ok(());
        }

        match key.code {
            KeyCode::F(1) => {
                self.model.toggle_help_popup().await;
                return Ok(());
            }
            KeyCode::Tab => {
                self.model.cycle_page_forward().await;
                return Ok(());
            }
            KeyCode::BackTab => {
                self.model.cycle_page_backward().await;
                return Ok(());
            }
            _ => {}
        }

        match self.model.active_page().await {
            Page::Search => self.handle_search_key(key).await,
            Page::TabById => self.handle_tab_id_key(key).await,
            Page::Manual => self.handle_manual_key(key, ctrl).await,
        }
        Ok(())
    }

    async fn handle_search_key(&self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.model.search.lock().await.move_up(),
            KeyCode::Down => self.model.search.lock().await.move_down(),
            KeyCode::Enter => {
                let selected = self.model.search.lock().await.selected_result().cloned();
                if let Some(result) = selected {
                    let controller = self.clone();
                    tokio::spawn(async move { controller.select_search_result(result).await });
                }
            }
            KeyCode::Esc => self.on_query_change(String::new()).await,
            KeyCode::Backspace => {
                let mut query = self.model.search_query().await;
                query.pop();
                self.on_query_change(query).await;
            }
            KeyCode::Char(c) => {
                let mut query = self.model.search_query().await;
                query.push(c);
                self.on_query_change(query).await;
            }
            _ => {}
        }
    }

    async fn handle_tab_id_key(&self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                let controller = self.clone();
                tokio::spawn(async move { controller.fetch_by_id().await });
            }
            KeyCode::Esc => self.model.ui_state.lock().await.tab_id_input.clear(),
            KeyCode::Backspace => {
                self.model.ui_state.lock().await.tab_id_input.pop();
            }
            KeyCode::Char(c) => self.model.ui_state.lock().await.tab_id_input.push(c),
            _ => {}
        }
    }

    async fn handle_manual_key(&self, key: KeyEvent, ctrl: bool) {
        let mut ui = self.model.ui_state.lock().await;
        match key.code {
            KeyCode::Char('s') if ctrl => {
                drop(ui);
                let controller = self.clone();
                tokio::spawn(async move { controller.submit_manual().await });
            }
            KeyCode::Up => ui.manual_focus = ui.manual_focus.prev(),
            KeyCode::Down => ui.manual_focus = ui.manual_focus.next(),
            // Content is multi-line; Enter in the single-line fields moves on
            KeyCode::Enter if ui.manual_focus == ManualField::Content => ui.manual_content.push('\n'),
            KeyCode::Enter => ui.manual_focus = ui.manual_focus.next(),
            KeyCode::Backspace => {
                ui.manual_field_mut().pop();
            }
            KeyCode::Char(c) if !ctrl => ui.manual_field_mut().push(c),
            _ => {}
        }
    }
}
