//! Trace a straight track through a telescope detector, printing every
//! navigation step.
//!
//! Run with: `cargo run --example telescope_trace`

use kirana_geom::{DetectorBuilder, Point3, Scalar, Vec3};
use kirana_nav::{FreeTrack, Navigator, TrustLevel};

fn main() {
    let layer_xs: Vec<Scalar> = (1..=5).map(|i| 10.0 * i as Scalar).collect();
    let detector = DetectorBuilder::telescope(&layer_xs, 50.0).expect("valid telescope");

    let mut navigator = Navigator::new(&detector);
    let mut state = navigator.state();
    let mut track = FreeTrack::new(Point3::new(9.5, 0.0, 0.0), Vec3::X);

    println!(
        "tracing through {} layers ({} portals)",
        detector.n_sensitives(),
        detector.n_portals()
    );

    for step in 0..100 {
        navigator.status(&mut state, &track);
        if state.is_terminal() {
            break;
        }
        if let Some(surface) = state.current {
            println!(
                "step {step:2}: x = {:6.2}  reached surface {surface} ({})",
                track.position.x,
                state.status.name()
            );
        }
        navigator.target(&mut state, &track);
        if state.is_terminal() {
            break;
        }
        println!(
            "step {step:2}: x = {:6.2}  {} -> next candidate in {:.2}",
            track.position.x,
            state.status.name(),
            state.distance_to_next
        );
        track.advance(state.distance_to_next);
        state.downgrade_trust(TrustLevel::High);
    }

    println!("finished: {}", state.status.name());
}
