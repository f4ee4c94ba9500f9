#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use rust_decimal_macros::dec;

use super::*;
use crate::config::EngineConfig;
use crate::models::Transaction;

fn new_app() -> App {
    let txns = (1..=6)
        .map(|d| {
            Transaction::new(
                NaiveDate::from_ymd_opt(2024, 1, d).unwrap(),
                "Corner Store",
                dec!(-10),
            )
        })
        .collect();
    let config = EngineConfig::builder().build().unwrap();
    App::new("test.csv", Analysis::run(txns, &config).unwrap())
}

fn shop_app(count: u32) -> App {
    let txns = (0..count)
        .map(|i| {
            Transaction::new(
                NaiveDate::from_ymd_opt(2024, 1, 1 + i % 28).unwrap(),
                format!("Shop{i:03}"),
                dec!(-10),
            )
        })
        .collect();
    let config = EngineConfig::builder().build().unwrap();
    App::new("test.csv", Analysis::run(txns, &config).unwrap())
}

fn screen_text(terminal: &Terminal<TestBackend>) -> String {
    terminal
        .backend()
        .buffer()
        .content
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

fn selected_description(app: &App) -> String {
    app.analysis.debits()[app.cursor().index].description.clone()
}

fn press(app: &mut App, code: KeyCode) {
    handle_key(KeyEvent::new(code, KeyModifiers::NONE), app);
}

fn ctrl(app: &mut App, c: char) {
    handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL), app);
}

#[test]
fn test_number_keys_jump_to_tabs() {
    let mut app = new_app();
    press(&mut app, KeyCode::Char('3'));
    assert_eq!(app.screen, Screen::Budgets);
    press(&mut app, KeyCode::Char('4'));
    assert_eq!(app.screen, Screen::Forecast);
    press(&mut app, KeyCode::Char('1'));
    assert_eq!(app.screen, Screen::Expenses);
}

#[test]
fn test_tab_and_backtab_cycle() {
    let mut app = new_app();
    press(&mut app, KeyCode::Tab);
    assert_eq!(app.screen, Screen::Payments);
    press(&mut app, KeyCode::BackTab);
    press(&mut app, KeyCode::BackTab);
    assert_eq!(app.screen, Screen::Forecast);
}

#[test]
fn test_vim_keys_scroll() {
    let mut app = new_app();
    press(&mut app, KeyCode::Char('j'));
    press(&mut app, KeyCode::Down);
    assert_eq!(app.cursor().index, 2);
    press(&mut app, KeyCode::Char('k'));
    assert_eq!(app.cursor().index, 1);
    press(&mut app, KeyCode::Char('G'));
    assert_eq!(app.cursor().index, 5);
    press(&mut app, KeyCode::Char('g'));
    assert_eq!(app.cursor().index, 0);
}

#[test]
fn test_half_page_scroll() {
    let mut app = new_app();
    app.visible_rows = 4;
    ctrl(&mut app, 'd');
    assert_eq!(app.cursor().index, 2);
    ctrl(&mut app, 'u');
    assert_eq!(app.cursor().index, 0);
}

#[test]
fn test_help_toggle() {
    let mut app = new_app();
    press(&mut app, KeyCode::Char('?'));
    assert!(app.show_help);
}

#[test]
fn test_quit_keys() {
    let mut app = new_app();
    press(&mut app, KeyCode::Char('q'));
    assert!(!app.running);

    let mut app = new_app();
    ctrl(&mut app, 'c');
    assert!(!app.running);

    let mut app = new_app();
    ctrl(&mut app, 'q');
    assert!(!app.running);
}

// ── Paging against the drawn table ───────────────────────────

#[test]
fn test_cursor_stays_on_drawn_rows() {
    let mut app = shop_app(40);
    let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();

    for _ in 0..25 {
        terminal.draw(|f| draw_frame(f, &mut app)).unwrap();
        press(&mut app, KeyCode::Char('j'));
    }
    terminal.draw(|f| draw_frame(f, &mut app)).unwrap();

    assert_eq!(app.cursor().index, 25);
    assert!(app.cursor().scroll > 0);
    assert!(screen_text(&terminal).contains(&selected_description(&app)));
}

#[test]
fn test_goto_bottom_shows_last_row() {
    let mut app = shop_app(40);
    let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();

    terminal.draw(|f| draw_frame(f, &mut app)).unwrap();
    press(&mut app, KeyCode::Char('G'));
    terminal.draw(|f| draw_frame(f, &mut app)).unwrap();

    assert_eq!(app.cursor().index, 39);
    assert!(screen_text(&terminal).contains("Shop039"));
}

#[test]
fn test_page_size_follows_current_table() {
    let mut app = shop_app(3);
    let area = ratatui::layout::Rect::new(0, 0, 100, 40);
    let expenses = crate::ui::render::table_page_size(area, &app);
    app.switch_screen(Screen::Budgets);
    let budgets = crate::ui::render::table_page_size(area, &app);

    // 38 content rows, minus the 12-row chart and 4-row legend, minus
    // borders and header.
    assert_eq!(budgets, 19);
    assert!(expenses < 40 - 6);
}

#[test]
fn test_budget_title_shows_configured_window() {
    let txns = vec![Transaction::new(
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
        "Corner Store",
        dec!(-10),
    )];
    let config = EngineConfig::builder()
        .budget_window_months(6)
        .build()
        .unwrap();
    let mut app = App::new("test.csv", Analysis::run(txns, &config).unwrap());
    app.switch_screen(Screen::Budgets);
    let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();

    terminal.draw(|f| draw_frame(f, &mut app)).unwrap();

    assert!(screen_text(&terminal).contains("(window 6 mo)"));
}
