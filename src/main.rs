//! Spin Wheel entry point
//!
//! On the web this only installs the panic hook and logger; the UI drives
//! the wheel through the exported bridge. Natively it runs a short demo.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    // Already set if the module is instantiated twice
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Spin Wheel core loaded");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Spin Wheel (native) starting...");

    if let Err(e) = run_demo() {
        log::error!("Demo failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn run_demo() -> spin_wheel_core::Result<()> {
    use spin_wheel_core::platform::{now, runtime_rng};
    use spin_wheel_core::wheel::format_probability;
    use spin_wheel_core::{WheelState, persistence};

    let mut state = WheelState::new();
    let mut rng = runtime_rng();
    let total = state.total_weight();

    println!("\n{}", state.current_wheel_name);
    for segment in &state.segments {
        println!(
            "  {:<16} {:>6}",
            segment.label,
            format_probability(segment.weight, total)
        );
    }

    let mut rotation = 0.0;
    for _ in 0..3 {
        let plan = state.begin_spin(rotation, &mut rng)?;
        let result = state.complete_spin(now(), &mut rng)?;
        println!(
            "Spun {:.0}° in {:.1}s -> {}",
            plan.travel(),
            plan.duration_secs,
            result.segment.label
        );
        rotation = plan.target_rotation;
    }

    let snapshot = persistence::encode(&state)?;
    log::info!("Snapshot is {} bytes", snapshot.len());
    Ok(())
}
