//! Arche - Stepper Homing Firmware
//!
//! Main firmware binary for RP2040-based multi-axis stepper machines.
//! Brings up the step/dir port and limit inputs, runs the homing
//! sequence once at boot, then parks.
//!
//! Named after the Greek "arche" (ἀρχή) meaning "origin" - every run
//! of this firmware ends with the machine knowing where its origin is.
//!
//! Pin assignments below match the BTT SKR Pico v1.0.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::AnyPin;
use embassy_rp::Peri;
use embassy_time::Timer;
use {defmt_rtt as _, panic_probe as _};

use arche_core::axis::Axis;
use arche_core::config::{HomingSettings, PortLayout};
use arche_core::homing::HomingCycle;
use arche_core::position::MachinePosition;
use arche_core::traits::MotionSync;

use arche_hal_rp2040::{EnableLine, HomingGpio};

/// This firmware carries no motion queue; the machine is idle by
/// construction whenever homing starts.
struct IdlePlanner;

impl MotionSync for IdlePlanner {
    fn wait_idle(&mut self) {}
}

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Arche firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let layout = PortLayout::default();
    let settings = HomingSettings::default();

    // Output word, bit order per PortLayout::default():
    // bits 0-3 step X/Y/Z/C, bits 4-7 dir X/Y/Z/C.
    let output_pins: [Peri<AnyPin>; 8] = [
        p.PIN_11.into(), // X step
        p.PIN_6.into(),  // Y step
        p.PIN_19.into(), // Z step
        p.PIN_14.into(), // C step
        p.PIN_10.into(), // X dir
        p.PIN_5.into(),  // Y dir
        p.PIN_28.into(), // Z dir
        p.PIN_13.into(), // C dir
    ];

    // Limit word, bits 0-3: X/Y/Z/C endstops.
    let limit_pins: [Peri<AnyPin>; 4] = [
        p.PIN_4.into(),
        p.PIN_3.into(),
        p.PIN_25.into(),
        p.PIN_16.into(),
    ];

    let mut port = HomingGpio::new(output_pins, limit_pins, settings.limit_pullup);

    // TMC2209 drivers on the SKR Pico share one active-low enable.
    let mut drive = EnableLine::new(p.PIN_12.into(), true);
    let mut planner = IdlePlanner;
    let mut position = MachinePosition::new();

    info!("Homing axes {}", settings.homed_axes);

    let cycle = HomingCycle::new(&settings, &layout);
    cycle.run_sequence(&mut port, &mut planner, &mut drive, &mut position);

    info!("Homing complete, machine zero committed");
    for axis in Axis::ALL {
        debug!("{} at {=f32} mm", axis, position.get(axis));
    }

    loop {
        Timer::after_secs(60).await;
    }
}
