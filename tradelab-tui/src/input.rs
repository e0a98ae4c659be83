//! Keyboard dispatch — overlays first, then global keys, then panel keys.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppState, Overlay, Panel, PromptKind};

/// Coarse/fine steps for the profit-target adjustment keys.
const TARGET_STEP: f64 = 10.0;
const TARGET_STEP_FINE: f64 = 1.0;

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match app.overlay {
        Overlay::Welcome => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::Prompt(kind) => {
            handle_prompt(app, kind, key);
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::None => {}
    }

    // 2. Global keys.
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('1') => {
            app.active_panel = Panel::Chart;
            return;
        }
        KeyCode::Char('2') => {
            app.active_panel = Panel::Table;
            return;
        }
        KeyCode::Char('3') | KeyCode::Char('?') => {
            app.active_panel = Panel::Help;
            return;
        }
        KeyCode::Tab => {
            app.active_panel = app.active_panel.next();
            return;
        }
        KeyCode::BackTab => {
            app.active_panel = app.active_panel.prev();
            return;
        }
        KeyCode::Char('o') => {
            open_prompt(app, PromptKind::LoadCsv);
            return;
        }
        KeyCode::Char('e') => {
            // Refuse before opening a save prompt with nothing to save.
            if app.has_data() {
                open_prompt(app, PromptKind::ExportChart);
            } else {
                app.push_error("No chart to export — load data first".into(), String::new());
            }
            return;
        }
        KeyCode::Char('x') => {
            if app.has_data() {
                open_prompt(app, PromptKind::ExportData);
            } else {
                app.push_error("No data to export — load data first".into(), String::new());
            }
            return;
        }
        KeyCode::Char('t') => {
            app.toggle_theme();
            return;
        }
        KeyCode::Char('f') => {
            app.cycle_filter();
            return;
        }
        KeyCode::Char('E') => {
            app.error_scroll = 0;
            app.overlay = Overlay::ErrorHistory;
            return;
        }
        KeyCode::Left => {
            app.adjust_target(-target_step(key.modifiers));
            return;
        }
        KeyCode::Right => {
            app.adjust_target(target_step(key.modifiers));
            return;
        }
        _ => {}
    }

    // 3. Panel keys. Chart and Table share the row cursor: the table
    // selection is what the scatter tooltip points at.
    match app.active_panel {
        Panel::Chart | Panel::Table => handle_rows_key(app, key),
        Panel::Help => {}
    }
}

fn target_step(modifiers: KeyModifiers) -> f64 {
    if modifiers.contains(KeyModifiers::SHIFT) {
        TARGET_STEP_FINE
    } else {
        TARGET_STEP
    }
}

fn open_prompt(app: &mut AppState, kind: PromptKind) {
    app.prompt_input.clear();
    app.overlay = Overlay::Prompt(kind);
}

fn handle_prompt(app: &mut AppState, kind: PromptKind, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.prompt_input.clear();
            app.overlay = Overlay::None;
        }
        KeyCode::Enter => {
            let path = app.prompt_input.trim().to_string();
            app.prompt_input.clear();
            app.overlay = Overlay::None;
            if path.is_empty() {
                return;
            }
            match kind {
                PromptKind::LoadCsv => app.load_csv(&path),
                PromptKind::ExportChart => app.export_chart_to(&path),
                PromptKind::ExportData => app.export_data_to(&path),
            }
        }
        KeyCode::Backspace => {
            app.prompt_input.pop();
        }
        KeyCode::Char(c) => {
            app.prompt_input.push(c);
        }
        _ => {}
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('E') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_rows_key(app: &mut AppState, key: KeyEvent) {
    let row_count = app.view.as_ref().map_or(0, |v| v.rows.len());
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.move_cursor(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_cursor(-1),
        KeyCode::PageDown => app.move_cursor(10),
        KeyCode::PageUp => app.move_cursor(-10),
        KeyCode::Char('g') | KeyCode::Home => app.table_cursor = 0,
        KeyCode::Char('G') | KeyCode::End => {
            app.table_cursor = row_count.saturating_sub(1);
        }
        _ => {}
    }
}
