use origami_invaders::menu::{Menu, MenuEvent, Screen, GAME_OVER_OPTIONS, MAIN_OPTIONS};
use origami_invaders::settings::{DEFAULT_MODE_INDEX, DISPLAY_MODES};

fn menu() -> Menu {
    Menu::new(DEFAULT_MODE_INDEX)
}

// ── navigation wraps modulo the option count ─────────────────────────────────

#[test]
fn selecting_up_from_the_top_wraps_to_the_bottom() {
    let mut m = menu();
    assert_eq!(m.selected, 0);
    m.select_prev();
    assert_eq!(m.selected, MAIN_OPTIONS.len() - 1);
}

#[test]
fn selecting_down_from_the_bottom_wraps_to_the_top() {
    let mut m = menu();
    for _ in 0..MAIN_OPTIONS.len() {
        m.select_next();
    }
    assert_eq!(m.selected, 0);
}

#[test]
fn game_over_navigation_wraps_over_its_own_count() {
    let mut m = menu();
    m.game_over();
    m.select_prev();
    assert_eq!(m.selected, GAME_OVER_OPTIONS.len() - 1);
    m.select_next();
    assert_eq!(m.selected, 0);
}

#[test]
fn options_navigation_includes_the_back_entry() {
    let mut m = menu();
    m.select_next(); // → Options entry
    assert_eq!(m.confirm(), MenuEvent::OpenOptions);
    assert_eq!(m.selected, DEFAULT_MODE_INDEX);
    m.selected = 0;
    m.select_prev();
    assert_eq!(m.selected, DISPLAY_MODES.len()); // wrapped onto Back
}

// ── transitions ───────────────────────────────────────────────────────────────

#[test]
fn confirming_play_starts_the_round() {
    let mut m = menu();
    assert_eq!(m.confirm(), MenuEvent::StartGame);
    assert_eq!(m.screen, Screen::Playing);
    assert!(m.is_playing());
}

#[test]
fn confirming_quit_from_the_main_menu() {
    let mut m = menu();
    m.select_next();
    m.select_next();
    assert_eq!(m.confirm(), MenuEvent::Quit);
}

#[test]
fn opening_options_preselects_the_active_mode() {
    let mut m = menu();
    m.select_next();
    m.confirm();
    assert_eq!(m.screen, Screen::Options);
    assert_eq!(m.selected, DEFAULT_MODE_INDEX);
}

#[test]
fn applying_a_mode_updates_the_active_index() {
    let mut m = menu();
    m.select_next();
    m.confirm(); // options open
    m.selected = 2;
    assert_eq!(m.confirm(), MenuEvent::ApplyMode(2));
    assert_eq!(m.mode_index, 2);
    assert_eq!(m.screen, Screen::Options); // stays for further tweaks
}

#[test]
fn back_entry_returns_to_the_main_menu() {
    let mut m = menu();
    m.select_next();
    m.confirm();
    m.selected = DISPLAY_MODES.len();
    assert_eq!(m.confirm(), MenuEvent::CloseOptions);
    assert_eq!(m.screen, Screen::Menu);
}

#[test]
fn escape_leaves_the_options_screen() {
    let mut m = menu();
    m.select_next();
    m.confirm();
    m.back();
    assert_eq!(m.screen, Screen::Menu);
    assert_eq!(m.selected, 0);
}

#[test]
fn game_over_restart_goes_straight_back_to_playing() {
    let mut m = menu();
    m.confirm(); // playing
    m.game_over();
    assert_eq!(m.screen, Screen::GameOver);
    assert_eq!(m.confirm(), MenuEvent::StartGame); // Restart is first
    assert_eq!(m.screen, Screen::Playing);
}

#[test]
fn game_over_can_return_to_the_main_menu() {
    let mut m = menu();
    m.confirm();
    m.game_over();
    m.select_next();
    assert_eq!(m.confirm(), MenuEvent::BackToMenu);
    assert_eq!(m.screen, Screen::Menu);
}

// ── paused substate ───────────────────────────────────────────────────────────

#[test]
fn pausing_freezes_play_without_leaving_the_screen() {
    let mut m = menu();
    m.confirm();
    assert!(m.is_playing());
    m.toggle_pause();
    assert_eq!(m.screen, Screen::Playing);
    assert!(!m.is_playing());
    m.toggle_pause();
    assert!(m.is_playing());
}

#[test]
fn pause_is_ignored_outside_of_play() {
    let mut m = menu();
    m.toggle_pause();
    assert!(!m.paused);
}

#[test]
fn game_over_clears_a_pending_pause() {
    let mut m = menu();
    m.confirm();
    m.toggle_pause();
    m.game_over();
    assert!(!m.paused);
}

// ── labels ────────────────────────────────────────────────────────────────────

#[test]
fn option_labels_match_the_wrap_counts() {
    let mut m = menu();
    assert_eq!(m.option_labels().len(), MAIN_OPTIONS.len());
    m.select_next();
    m.confirm();
    assert_eq!(m.option_labels().len(), DISPLAY_MODES.len() + 1);
}

#[test]
fn options_labels_flag_the_current_mode() {
    let mut m = menu();
    m.select_next();
    m.confirm();
    let labels = m.option_labels();
    assert!(labels[DEFAULT_MODE_INDEX].contains("current"));
    assert_eq!(labels.last().map(String::as_str), Some("Back"));
}
