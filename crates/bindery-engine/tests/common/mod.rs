#![allow(dead_code)]

use bindery_engine::device::DeviceContext;
use bindery_engine::device::soft::SoftDevice;
use bindery_engine::program::{ProgramLayout, SoftProgram};

pub const TRIANGLE: [f32; 6] = [-0.5, -0.5, 0.5, -0.5, 0.0, 0.5];

pub fn setup() -> (SoftDevice, DeviceContext) {
    let device = SoftDevice::new();
    let ctx = DeviceContext::new(device.clone());
    (device, ctx)
}

/// Program with `a_position` at 0, `a_color` at 1, `a_offset` at 4 and the
/// uniform blocks `Camera` (index 0) and `Lights` (index 1).
pub fn program(device: &SoftDevice) -> SoftProgram {
    device
        .create_program(
            ProgramLayout::new()
                .attribute("a_position", 0)
                .attribute("a_color", 1)
                .attribute("a_offset", 4)
                .uniform_block("Camera")
                .uniform_block("Lights"),
        )
        .expect("program allocation")
}
