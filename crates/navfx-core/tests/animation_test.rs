//! Integration tests for easing, staggering and the tweener.

use std::time::Duration;

use navfx_core::animation::stagger::{Stagger, StaggerMode, stagger_offsets};
use navfx_core::animation::*;
use navfx_core::provider::{AnimationProvider, AnimationStep, CompletionTag, Target};
use navfx_core::scene::Scene;
use navfx_core::style::{Length, Property, PropertyMap, Transform, Value};
use navfx_core::tweener::Tweener;
use proptest::prelude::*;

const MS_10: Duration = Duration::from_millis(10);

fn curves() -> [(&'static str, EasingFn); 7] {
    [
        ("linear", linear),
        ("ease_in", ease_in),
        ("ease_out", ease_out),
        ("ease_in_out", ease_in_out),
        ("ease_out_cubic", ease_out_cubic),
        ("power3_out", POWER3_OUT),
        ("power4_in_out", POWER4_IN_OUT),
    ]
}

#[test]
fn every_curve_hits_both_endpoints() {
    for (name, f) in curves() {
        assert!(f(0.0).abs() < 1e-6, "{name}(0) = {}", f(0.0));
        assert!((f(1.0) - 1.0).abs() < 1e-6, "{name}(1) = {}", f(1.0));
    }
}

#[test]
fn staggered_layers_arrive_in_order() {
    let mut scene = Scene::new();
    let ids: Vec<_> = (0..3).map(|_| scene.insert(["#img"])).collect();
    for &id in &ids {
        scene.write(id, Property::Top, Value::Length(Length::percent(150.0)));
    }
    let mut tw = Tweener::new(scene);
    tw.animate(
        AnimationStep::to(
            Target::selector("#img"),
            PropertyMap::new().with(Property::Top, Value::Length(Length::percent(50.0))),
        )
        .duration(Duration::from_millis(1250))
        .delay(Duration::from_millis(250))
        .stagger(Stagger::linear(Duration::from_millis(100)))
        .easing(POWER4_IN_OUT)
        .on_complete(CompletionTag(1)),
    );

    let mut elapsed = Duration::ZERO;
    let mut done = None;
    while done.is_none() {
        if !tw.tick(MS_10).is_empty() {
            done = Some(elapsed + MS_10);
        }
        elapsed += MS_10;
        // Earlier layers are never behind later ones.
        let tops: Vec<f32> = ids
            .iter()
            .map(|&id| match tw.scene().computed(id, Property::Top) {
                Some(Value::Length(l)) => l.percent,
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert!(tops[0] <= tops[1] && tops[1] <= tops[2], "{tops:?}");
    }
    assert_eq!(done, Some(Duration::from_millis(1700)));
}

#[test]
fn transform_tween_renders_css_midway() {
    let mut scene = Scene::new();
    let id = scene.insert([".menu-img"]);
    let mut tw = Tweener::new(scene);
    tw.animate(
        AnimationStep::to(
            Target::Element(id),
            PropertyMap::new().with(
                Property::Transform,
                Value::Transform(Transform::rotate3d(4.0, -2.0, 0.0, 15.0)),
            ),
        )
        .duration(Duration::from_secs(2))
        .easing(linear),
    );
    tw.tick(Duration::from_secs(2));
    let css = tw
        .scene()
        .computed(id, Property::Transform)
        .map(|v| Property::Transform.css_value(&v));
    assert_eq!(css.as_deref(), Some("rotate3d(4, -2, 0, 15deg)"));
}

proptest! {
    #[test]
    fn curves_stay_in_unit_range(t in -1.0f32..2.0) {
        for (name, f) in curves() {
            let v = f(t);
            prop_assert!((0.0..=1.0).contains(&v), "{name}({t}) = {v}");
        }
    }

    #[test]
    fn curves_are_monotonic(a in 0.0f32..=1.0, b in 0.0f32..=1.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        for (name, f) in curves() {
            prop_assert!(f(lo) <= f(hi) + 1e-6, "{name} not monotonic at {lo}..{hi}");
        }
    }

    #[test]
    fn stagger_offsets_non_decreasing(count in 0usize..32, each_ms in 0u64..500) {
        let each = Duration::from_millis(each_ms);
        for mode in [StaggerMode::Linear, StaggerMode::Eased(POWER3_OUT)] {
            let offsets = stagger_offsets(count, each, mode);
            prop_assert_eq!(offsets.len(), count);
            for w in offsets.windows(2) {
                prop_assert!(w[0] <= w[1]);
            }
        }
    }

    #[test]
    fn completion_reported_once(duration_ms in 1u64..2000, delay_ms in 0u64..1000, frame_ms in 1u64..100) {
        let mut tw = Tweener::new(Scene::new());
        tw.animate(
            AnimationStep::timer(Duration::from_millis(duration_ms))
                .delay(Duration::from_millis(delay_ms))
                .on_complete(CompletionTag(9)),
        );
        let frame = Duration::from_millis(frame_ms);
        let mut reported = 0;
        for _ in 0..(3000 / frame_ms + 2) {
            reported += tw.tick(frame).len();
        }
        prop_assert_eq!(reported, 1);
        prop_assert_eq!(tw.pending_tweens(), 0);
    }
}
