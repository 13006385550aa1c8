//! End-to-end tests for the host-driven step runner.

use core::time::Duration;

use navfx_core::event::HostEvent;
use navfx_core::geometry::{Point, Viewport};
use navfx_menu::{MenuState, MountConfig};
use navfx_web::step_program::MenuStepProgram;
use navfx_web::{StylePatch, WebHostError};
use pretty_assertions::assert_eq;

const FRAME: Duration = Duration::from_millis(16);

fn mounted() -> MenuStepProgram {
    let mut prog = MenuStepProgram::new(MountConfig::default(), 1280.0, 800.0).unwrap();
    prog.mount().unwrap();
    prog
}

fn run_frames(prog: &mut MenuStepProgram, frames: u32) {
    for _ in 0..frames {
        prog.advance_time(FRAME);
        prog.step();
    }
}

fn find<'a>(patches: &'a [StylePatch], selector: &str, property: &str) -> Option<&'a StylePatch> {
    patches
        .iter()
        .rev()
        .find(|p| p.selector == selector && p.property == property)
}

#[test]
fn mount_emits_resting_patches() {
    let mut prog = mounted();
    let outputs = prog.take_outputs();
    assert_eq!(outputs.button_label, "Menu");
    assert_eq!(outputs.overlay_label, "Close");
    assert_eq!(
        find(&outputs.patches, ".menu", "clip-path").map(|p| p.css.as_str()),
        Some("polygon(0% 100%, 100% 100%, 100% 100%, 0% 100%)")
    );
    assert_eq!(
        find(&outputs.patches, "#img-2", "top").map(|p| p.css.as_str()),
        Some("150%")
    );
    assert_eq!(
        find(&outputs.patches, "#img-1", "transform").map(|p| p.css.as_str()),
        Some("translate(-50%, -50%) scale(0.81)")
    );
    assert!(prog.take_outputs().patches.is_empty());
}

#[test]
fn open_and_close_through_steps() {
    let mut prog = mounted();
    prog.take_outputs();
    assert!(prog.toggle().unwrap());
    run_frames(&mut prog, 120);
    assert_eq!(prog.state(), MenuState::Open);
    let outputs = prog.take_outputs();
    assert_eq!(outputs.button_label, "Close");
    assert_eq!(
        find(&outputs.patches, ".menu", "clip-path").map(|p| p.css.as_str()),
        Some("polygon(0% 100%, 100% 100%, 100% 0%, 0% 0%)")
    );
    assert_eq!(
        find(&outputs.patches, ".hero", "top").map(|p| p.css.as_str()),
        Some("50%")
    );

    assert!(prog.request_close().unwrap());
    run_frames(&mut prog, 90);
    assert_eq!(prog.state(), MenuState::Closed);
    let outputs = prog.take_outputs();
    assert_eq!(outputs.button_label, "Menu");
    assert_eq!(
        find(&outputs.patches, ".hero", "opacity").map(|p| p.css.as_str()),
        Some("1")
    );
}

#[test]
fn step_reports_completions_and_frames() {
    let mut prog = mounted();
    prog.request_open().unwrap();
    prog.advance_time(Duration::from_secs(2));
    let result = prog.step();
    assert_eq!(result.completions, 2);
    assert_eq!(result.frame_idx, 1);
    assert_eq!(result.state, MenuState::Open);
    assert!(result.mounted);
}

#[test]
fn pointer_events_reach_the_menu() {
    let mut prog = mounted();
    prog.take_outputs();
    prog.push_event(HostEvent::PointerMove(Point::new(960.0, 200.0)));
    prog.advance_time(Duration::from_secs(2));
    let result = prog.step();
    assert_eq!(result.events_processed, 1);
    let outputs = prog.take_outputs();
    assert_eq!(
        find(&outputs.patches, ".menu-img", "transform").map(|p| p.css.as_str()),
        Some("rotate3d(-10, 10, 0, 15deg)")
    );
}

#[test]
fn unmount_drops_later_events() {
    let mut prog = mounted();
    assert_eq!(prog.listener_count(), 2);
    prog.unmount().unwrap();
    assert_eq!(prog.listener_count(), 0);

    prog.push_event(HostEvent::PointerMove(Point::new(1.0, 1.0)));
    prog.push_event(HostEvent::Resize(Viewport::new(600.0, 800.0)));
    let result = prog.step();
    assert!(!result.mounted);
    assert_eq!(result.events_processed, 0);
    assert_eq!(result.events_dropped, 2);

    assert!(matches!(prog.toggle(), Err(WebHostError::NotMounted)));
    assert!(matches!(prog.unmount(), Err(WebHostError::NotMounted)));
}

#[test]
fn remount_mid_open_still_settles() {
    let mut prog = mounted();
    prog.toggle().unwrap();
    run_frames(&mut prog, 6);
    prog.unmount().unwrap();
    prog.mount().unwrap();
    assert_eq!(prog.state(), MenuState::Opening);

    run_frames(&mut prog, 120);
    assert_eq!(prog.state(), MenuState::Open);
    assert!(prog.request_close().unwrap());
}

#[test]
fn double_mount_rejected() {
    let mut prog = mounted();
    assert!(matches!(prog.mount(), Err(WebHostError::AlreadyMounted)));
    assert_eq!(prog.listener_count(), 2);
}

#[test]
fn invalid_props_rejected() {
    let err = MenuStepProgram::from_json(r#"{"breakpoint":0}"#, 800.0, 600.0).unwrap_err();
    assert!(matches!(err, WebHostError::Config(_)));
    assert!(MenuStepProgram::from_json("not json", 800.0, 600.0).is_err());
}
