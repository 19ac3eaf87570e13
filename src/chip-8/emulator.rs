use log::debug;

use crate::cpu::CPU;
use crate::display::Framebuffer;
use crate::error::Result;
use crate::instruction::{Instruction, Register};
use crate::keypad::Keypad;
use crate::memory::Memory;
use crate::RandomNumberProvider;

/// The interpreter driver, the only type a host needs to talk to.
///
/// Execution only happens inside [`Emulator::step`] and
/// [`Emulator::run_frame`]. Pacing frames at 60hz and choosing the number of
/// instructions per frame is up to the host.
pub struct Emulator {
    cpu: CPU,
    keypad: Keypad,
    // Memory as it was right after the last ROM load, restored by `reset`.
    rom_image: Memory,
    is_initial_state: bool,
}

impl Emulator {
    /// An emulator with no program loaded, using `rand` for CXNN.
    pub fn new() -> Self {
        Self::with_random_number_provider(Box::new(rand::random::<u8>))
    }

    pub fn with_random_number_provider(random_number_provider: Box<RandomNumberProvider>) -> Self {
        let rom_image = Memory::default();

        Self {
            cpu: CPU::new(rom_image.clone(), random_number_provider),
            keypad: Keypad::default(),
            rom_image,
            is_initial_state: true,
        }
    }

    pub fn is_initial_state(&self) -> bool {
        self.is_initial_state
    }

    /// Load `rom` at 0x200 and reset every register, timer, key and pixel.
    ///
    /// A ROM larger than the program space is rejected and leaves the
    /// emulator untouched.
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<()> {
        let memory = Memory::with_rom(rom)?;
        debug!("Loaded {} byte ROM", rom.len());

        self.rom_image = memory;
        self.reset();

        Ok(())
    }

    /// Return to the state right after the most recent [`Emulator::load_rom`].
    pub fn reset(&mut self) {
        debug!("Resetting");

        self.cpu.reset(self.rom_image.clone());
        self.keypad.release_all();
        self.is_initial_state = true;
    }

    /// Execute exactly one instruction.
    pub fn step(&mut self) -> Result<Instruction> {
        self.is_initial_state = false;

        self.cpu.cycle(&self.keypad)
    }

    /// Execute `instructions_per_frame` instructions, then tick the timers once.
    ///
    /// The first failing instruction ends the frame early, without the
    /// timer tick.
    pub fn run_frame(&mut self, instructions_per_frame: usize) -> Result<()> {
        for _ in 0..instructions_per_frame {
            self.step()?;
        }
        self.cpu.tick_timers();

        Ok(())
    }

    /// Advance past the current instruction without executing it. Lets a
    /// host skip over an unknown opcode instead of halting.
    pub fn skip_instruction(&mut self) {
        self.cpu.skip();
    }

    pub fn tick_timers(&mut self) {
        self.cpu.tick_timers();
    }

    pub fn set_key(&mut self, key: u8, pressed: bool) -> Result<()> {
        self.keypad.set_key(key, pressed)
    }

    pub fn framebuffer_snapshot(&self) -> Framebuffer {
        self.cpu.display().clone()
    }

    /// Whether the screen changed since the last [`Emulator::clear_dirty`].
    pub fn is_dirty(&self) -> bool {
        self.cpu.display().is_dirty()
    }

    pub fn clear_dirty(&mut self) {
        self.cpu.display_mut().clear_dirty();
    }

    pub fn sound_flag(&self) -> bool {
        self.cpu.timers().is_sound_on()
    }

    pub fn pc(&self) -> u16 {
        self.cpu.pc()
    }

    pub fn index(&self) -> u16 {
        self.cpu.index()
    }

    pub fn register(&self, register: Register) -> u8 {
        self.cpu.register(register)
    }

    pub fn stack_depth(&self) -> usize {
        self.cpu.stack_depth()
    }

    pub fn delay_timer(&self) -> u8 {
        self.cpu.timers().delay.current_value()
    }

    pub fn sound_timer(&self) -> u8 {
        self.cpu.timers().sound.current_value()
    }

    pub fn read_memory(&self, address: u16) -> Result<u8> {
        self.cpu.memory().read(address)
    }

    pub fn write_memory(&mut self, address: u16, value: u8) -> Result<()> {
        self.cpu.memory_mut().write(address, value)
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}
