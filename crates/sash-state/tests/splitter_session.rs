//! End-to-end drag session over a live hub, from press to persisted
//! size, plus teardown behavior.

use std::rc::Rc;

use web_time::{Duration, Instant};

use sash_core::{Axis, Event, EventHub, PointerEvent};
use sash_state::{
    MemoryStorage, Splitter, SplitterConfig, StorageBackend, Stored, read_value,
};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn shared(store: &MemoryStorage) -> Rc<dyn StorageBackend> {
    Rc::new(store.clone())
}

#[test]
fn full_drag_session_persists_final_size() {
    let hub = EventHub::new();
    let store = MemoryStorage::new();
    let t0 = Instant::now();

    let splitter = Splitter::new(
        &hub,
        shared(&store),
        SplitterConfig {
            min: 50.0,
            max: 500.0,
            initial: 200.0,
            ..SplitterConfig::new(Axis::X, "sidebar-width")
        },
    );
    assert_eq!(splitter.size(), 200.0);

    // Press on the handle at x=300.
    splitter.pointer_down(&PointerEvent::down(300.0, 40.0));
    assert!(splitter.is_dragging());

    // Drag to x=340: size follows to 240.
    hub.dispatch(&Event::Pointer(PointerEvent::moved(340.0, 40.0)), t0 + ms(20));
    assert_eq!(splitter.size(), 240.0);

    // Overshoot far past max: rejected, size retained.
    hub.dispatch(&Event::Pointer(PointerEvent::moved(1000.0, 40.0)), t0 + ms(40));
    assert_eq!(splitter.size(), 240.0);

    // Release: drag ends, size persisted, listeners gone.
    hub.dispatch(&Event::Pointer(PointerEvent::up(1000.0, 40.0)), t0 + ms(50));
    assert!(!splitter.is_dragging());
    assert_eq!(splitter.size(), 240.0);
    assert_eq!(
        read_value::<f64>(&store, "sidebar-width"),
        Stored::Present(240.0)
    );
    assert_eq!(hub.pointer_move_listeners(), 0);
    assert_eq!(hub.pointer_up_listeners(), 0);

    // A fresh controller over the same store resumes at 240.
    let revived = Splitter::new(
        &hub,
        shared(&store),
        SplitterConfig {
            min: 50.0,
            max: 500.0,
            initial: 200.0,
            ..SplitterConfig::new(Axis::X, "sidebar-width")
        },
    );
    assert_eq!(revived.size(), 240.0);
}

#[test]
fn rapid_moves_coalesce_and_final_position_lands_on_release() {
    let hub = EventHub::new();
    let store = MemoryStorage::new();
    let t0 = Instant::now();

    let splitter = Splitter::new(
        &hub,
        shared(&store),
        SplitterConfig {
            min: 50.0,
            max: 500.0,
            initial: 200.0,
            ..SplitterConfig::new(Axis::X, "sidebar-width")
        },
    );

    splitter.pointer_down(&PointerEvent::down(300.0, 40.0));

    // A burst of sub-interval moves: only the first applies directly.
    hub.dispatch(&Event::Pointer(PointerEvent::moved(305.0, 40.0)), t0);
    hub.dispatch(&Event::Pointer(PointerEvent::moved(312.0, 40.0)), t0 + ms(2));
    hub.dispatch(&Event::Pointer(PointerEvent::moved(319.0, 40.0)), t0 + ms(4));
    hub.dispatch(&Event::Pointer(PointerEvent::moved(326.0, 40.0)), t0 + ms(6));
    assert_eq!(splitter.size(), 205.0);

    // Release inside the closed window: the held position still lands.
    hub.dispatch(&Event::Pointer(PointerEvent::up(326.0, 40.0)), t0 + ms(7));
    assert_eq!(splitter.size(), 226.0);
    assert_eq!(
        read_value::<f64>(&store, "sidebar-width"),
        Stored::Present(226.0)
    );
}

#[test]
fn two_splitters_share_a_hub_without_interference() {
    let hub = EventHub::new();
    let store = MemoryStorage::new();
    let t0 = Instant::now();

    let left = Splitter::new(
        &hub,
        shared(&store),
        SplitterConfig {
            initial: 200.0,
            ..SplitterConfig::new(Axis::X, "left-width")
        },
    );
    let bottom = Splitter::new(
        &hub,
        shared(&store),
        SplitterConfig {
            initial: 100.0,
            ..SplitterConfig::new(Axis::Y, "bottom-height")
        },
    );

    // Only the left splitter's handle was pressed.
    left.pointer_down(&PointerEvent::down(300.0, 400.0));
    hub.dispatch(&Event::Pointer(PointerEvent::moved(340.0, 350.0)), t0 + ms(20));
    hub.dispatch(&Event::Pointer(PointerEvent::up(340.0, 350.0)), t0 + ms(30));

    assert_eq!(left.size(), 240.0);
    assert_eq!(bottom.size(), 100.0, "idle splitter ignores the drag");
    assert_eq!(read_value::<f64>(&store, "bottom-height"), Stored::Absent);
}

#[test]
fn dropping_splitter_mid_drag_stops_the_session_cleanly() {
    let hub = EventHub::new();
    let store = MemoryStorage::new();
    let t0 = Instant::now();

    let splitter = Splitter::new(
        &hub,
        shared(&store),
        SplitterConfig {
            initial: 200.0,
            ..SplitterConfig::new(Axis::X, "width")
        },
    );

    splitter.pointer_down(&PointerEvent::down(300.0, 40.0));
    hub.dispatch(&Event::Pointer(PointerEvent::moved(340.0, 40.0)), t0 + ms(20));
    drop(splitter);

    // Further events find no listeners and change nothing.
    hub.dispatch(&Event::Pointer(PointerEvent::moved(400.0, 40.0)), t0 + ms(40));
    hub.dispatch(&Event::Pointer(PointerEvent::up(400.0, 40.0)), t0 + ms(50));
    assert_eq!(hub.pointer_move_listeners(), 0);
    assert_eq!(hub.pointer_up_listeners(), 0);
    assert_eq!(read_value::<f64>(&store, "width"), Stored::Present(240.0));
}
