//! A CHIP-8 interpreter core.
//!
//! The host loads a ROM into an [`Emulator`], feeds it key states, calls
//! [`Emulator::run_frame`] once per rendered frame and reads back the
//! framebuffer and sound flag.

mod cpu;
mod display;
mod emulator;
mod error;
mod instruction;
mod keypad;
mod memory;
mod timer;

pub use display::{Framebuffer, FRAME_BUFFER_PIXEL_HEIGHT, FRAME_BUFFER_PIXEL_WIDTH};
pub use emulator::Emulator;
pub use error::{Error, Result};
pub use instruction::{Instruction, Register};
pub use keypad::{Keypad, KEY_COUNT};
pub use memory::{Memory, MAX_ROM_SIZE, MEMORY_SIZE, PROGRAM_BASE_ADDRESS};
pub use timer::{Timer, Timers};

/// Source of random bytes for CXNN.
pub type RandomNumberProvider = dyn FnMut() -> u8;

/// Key state as seen by the CPU.
pub trait Input {
    fn is_key_down(&self, key: u8) -> bool;
    /// Lowest numbered key currently held down.
    fn first_key_down(&self) -> Option<u8>;
}
