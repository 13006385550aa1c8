//! Property tests for parallax ordering, tilt bounds and request rejection.

use navfx_core::event::ListenerRegistry;
use navfx_core::geometry::{Point, Viewport};
use navfx_core::provider::RecordingProvider;
use navfx_menu::layers::LayerSet;
use navfx_menu::transform::{TILT_GAIN, Tilt};
use navfx_menu::{MenuController, MenuState, MountConfig};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Op {
    Open,
    Close,
    Toggle,
    FireNext,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Open),
        Just(Op::Close),
        Just(Op::Toggle),
        Just(Op::FireNext),
    ]
}

proptest! {
    #[test]
    fn parallax_grows_with_layer_index(dx in -4000.0f32..4000.0, dy in -4000.0f32..4000.0) {
        let layers = LayerSet::standard();
        let magnitudes: Vec<f32> = layers
            .iter()
            .map(|l| {
                let p = l.parallax(Point::new(dx, dy));
                p.x.hypot(p.y)
            })
            .collect();
        for pair in magnitudes.windows(2) {
            prop_assert!(pair[0] <= pair[1], "{magnitudes:?}");
        }
    }

    #[test]
    fn tilt_bounded_inside_viewport(
        w in 1.0f32..4000.0,
        h in 1.0f32..4000.0,
        fx in 0.0f32..=1.0,
        fy in 0.0f32..=1.0,
    ) {
        let viewport = Viewport::new(w, h);
        let pointer = Point::new(w * fx, h * fy);
        let tilt = Tilt::from_offset(pointer.offset_from(viewport.center()), viewport.center());
        prop_assert!(tilt.x.abs() <= TILT_GAIN + 1e-3);
        prop_assert!(tilt.y.abs() <= TILT_GAIN + 1e-3);
    }

    #[test]
    fn at_most_one_timeline_in_flight(ops in prop::collection::vec(op(), 1..40)) {
        let registry = ListenerRegistry::new();
        let mut menu = MenuController::new(
            MountConfig::default(),
            RecordingProvider::new(),
            Viewport::new(1280.0, 800.0),
        );
        menu.mount(&registry);
        let mut fired = 0;
        let mut opens = 0;
        let mut closes = 0;

        for op in ops {
            let before = menu.state();
            let accepted = match op {
                Op::Open => menu.request_open(),
                Op::Close => menu.request_close(),
                Op::Toggle => menu.toggle(),
                Op::FireNext => {
                    let tags = menu.provider().completion_tags();
                    if let Some(&tag) = tags.get(fired) {
                        fired += 1;
                        menu.on_completion(tag);
                    }
                    false
                }
            };
            if accepted {
                match before {
                    MenuState::Closed => opens += 1,
                    MenuState::Open => closes += 1,
                    other => prop_assert!(false, "request accepted while {other:?}"),
                }
            } else if !matches!(op, Op::FireNext) {
                prop_assert_eq!(menu.state(), before);
            }
            prop_assert_eq!(menu.provider().animations().count(), opens * 7 + closes * 4);
        }
    }
}
