use super::*;
use crate::compose::geometry::{AWAY_PANEL, HOME_PANEL};

fn shot(x: f64, y: f64) -> ShotEvent {
    ShotEvent {
        team_id: 1,
        x,
        y,
        is_goal: false,
        is_on_target: None,
        expected_goals: None,
        player_name: None,
    }
}

#[test]
fn size_is_clamped_and_monotonic() {
    let mut prev = 0.0;
    for i in 0..=120 {
        let xg = f64::from(i) / 100.0;
        let size = marker_size(Some(xg));
        assert!((MARKER_SIZE_MIN..=MARKER_SIZE_MAX).contains(&size), "{xg} -> {size}");
        assert!(size >= prev, "not monotonic at {xg}");
        prev = size;
    }
    assert_eq!(marker_size(Some(0.0)), 30.0);
    assert_eq!(marker_size(Some(0.25)), 100.0);
    assert_eq!(marker_size(Some(0.9)), 180.0);
    assert_eq!(marker_size(Some(-1.0)), 30.0);
}

#[test]
fn unknown_xg_uses_lower_bound() {
    assert_eq!(marker_size(None), 30.0);
    assert_eq!(marker_size(Some(f64::NAN)), 30.0);
}

#[test]
fn radius_grows_with_size() {
    assert!(marker_radius_px(MARKER_SIZE_MAX) > marker_radius_px(MARKER_SIZE_MIN));
    assert!(marker_radius_px(MARKER_SIZE_MIN) > 0.0);
}

#[test]
fn goal_wins_regardless_of_on_target() {
    for on_target in [Some(true), Some(false), None] {
        let s = ShotEvent {
            is_goal: true,
            is_on_target: on_target,
            ..shot(50.0, 50.0)
        };
        assert_eq!(ShotOutcome::of(&s), ShotOutcome::Goal);
    }
}

#[test]
fn on_target_then_off_target() {
    let on = ShotEvent {
        is_on_target: Some(true),
        ..shot(50.0, 50.0)
    };
    let off = ShotEvent {
        is_on_target: Some(false),
        ..shot(50.0, 50.0)
    };
    assert_eq!(ShotOutcome::of(&on), ShotOutcome::OnTarget);
    assert_eq!(ShotOutcome::of(&off), ShotOutcome::OffTarget);
    assert_eq!(ShotOutcome::of(&shot(50.0, 50.0)), ShotOutcome::OffTarget);
}

#[test]
fn colours_come_from_the_palette() {
    let palette = Palette {
        goal: Rgba8::rgb(1, 2, 3),
        ..Palette::default()
    };
    let s = ShotEvent {
        is_goal: true,
        ..shot(90.0, 50.0)
    };
    let placed = place_shots([&s], PanelSide::Home, &palette);
    assert_eq!(placed[0].color, Rgba8::rgb(1, 2, 3));
}

#[test]
fn away_panel_mirrors_x_and_keeps_y() {
    let palette = Palette::default();
    let s = shot(80.0, 25.0);
    let home = place_shots([&s], PanelSide::Home, &palette);
    let away = place_shots([&s], PanelSide::Away, &palette);

    let home_rel_x = (home[0].center.x - HOME_PANEL.x0) / HOME_PANEL.width();
    let away_rel_x = (away[0].center.x - AWAY_PANEL.x0) / AWAY_PANEL.width();
    assert!((home_rel_x - 0.8).abs() < 1e-9);
    assert!((away_rel_x - 0.2).abs() < 1e-9);

    let home_rel_y = (home[0].center.y - HOME_PANEL.y0) / HOME_PANEL.height();
    let away_rel_y = (away[0].center.y - AWAY_PANEL.y0) / AWAY_PANEL.height();
    assert!((home_rel_y - 0.25).abs() < 1e-9);
    assert!((away_rel_y - 0.25).abs() < 1e-9);
}
