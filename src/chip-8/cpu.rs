use std::ops::{Index, IndexMut};

use log::trace;

use super::display::Framebuffer;
use super::error::{Error, Result};
use super::instruction::{Instruction, Register};
use super::memory::{Memory, MEMORY_SIZE, PROGRAM_BASE_ADDRESS};
use super::timer::Timers;
use super::{Input, RandomNumberProvider};

const FLAG_REGISTER: Register = 0xF;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Registers([u8; 16]);

impl Registers {
    fn as_slice_through(&self, idx: Register) -> &[u8] {
        &self.0[0..=(idx as usize & 0xF)]
    }

    fn copy_from_slice(&mut self, slice: &[u8]) {
        let len = slice.len().min(16);
        self.0[0..len].copy_from_slice(&slice[0..len])
    }
}

impl Index<Register> for Registers {
    type Output = u8;

    fn index(&self, register: Register) -> &Self::Output {
        &self.0[register as usize & 0xF]
    }
}

impl IndexMut<Register> for Registers {
    fn index_mut(&mut self, register: Register) -> &mut Self::Output {
        &mut self.0[register as usize & 0xF]
    }
}

pub const STACK_SIZE: usize = 16;

/// Register file, call stack and the hardware the CPU drives.
///
/// Every failed instruction leaves the machine exactly as it was before the
/// instruction, with `pc` still pointing at the faulting opcode.
pub struct CPU {
    // Registers
    v: Registers,
    i: u16,

    // Program Counter
    pc: u16,

    // Stack
    stack: [u16; STACK_SIZE],
    sp: u8,

    memory: Memory,
    display: Framebuffer,
    timers: Timers,
    random_number_provider: Box<RandomNumberProvider>,
}

impl CPU {
    pub fn new(memory: Memory, random_number_provider: Box<RandomNumberProvider>) -> Self {
        Self {
            v: Registers::default(),
            i: 0,
            pc: PROGRAM_BASE_ADDRESS,

            sp: 0,
            stack: [0; STACK_SIZE],

            memory,
            display: Framebuffer::default(),
            timers: Timers::default(),
            random_number_provider,
        }
    }

    /// Return to the power on state with `memory` loaded, the random source is kept.
    pub fn reset(&mut self, memory: Memory) {
        self.v = Registers::default();
        self.i = 0;
        self.pc = PROGRAM_BASE_ADDRESS;
        self.sp = 0;
        self.stack = [0; STACK_SIZE];
        self.memory = memory;
        self.display = Framebuffer::default();
        self.timers = Timers::default();
    }

    /// Fetch, decode and execute the opcode at `pc`.
    pub fn cycle(&mut self, input: &dyn Input) -> Result<Instruction> {
        let opcode = self.memory.read_opcode(self.pc)?;
        let instruction = Instruction::decode(opcode).ok_or(Error::UnknownOpcode {
            opcode,
            address: self.pc,
        })?;
        trace!("{:04x}: {:04x} {}", self.pc, opcode, instruction);

        self.pc = self.execute(instruction, self.pc, input)?;

        Ok(instruction)
    }

    /// Advance past the instruction at `pc` without executing it.
    pub fn skip(&mut self) {
        self.pc = self.pc.wrapping_add(2);
    }

    pub fn tick_timers(&mut self) {
        self.timers.tick();
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    pub fn index(&self) -> u16 {
        self.i
    }

    pub fn register(&self, register: Register) -> u8 {
        self.v[register]
    }

    pub fn stack_depth(&self) -> usize {
        self.sp as usize
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    pub fn display(&self) -> &Framebuffer {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut Framebuffer {
        &mut self.display
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    /// Apply `instruction` fetched from `current_pc` and return the next pc.
    fn execute(
        &mut self,
        instruction: Instruction,
        current_pc: u16,
        input: &dyn Input,
    ) -> Result<u16> {
        let next = current_pc.wrapping_add(2);
        let skip = current_pc.wrapping_add(4);

        let next_pc = match instruction {
            Instruction::Sys { .. } => next,
            Instruction::Cls => {
                self.display.cls();

                next
            }
            Instruction::Ret => self.stack_pop(current_pc)?,
            Instruction::Jump { nnn } => nnn,
            Instruction::Call { nnn } => {
                self.stack_push(next, current_pc)?;

                nnn
            }

            Instruction::SkipIfEqualImmediate { x, nn } => {
                if self.v[x] == nn {
                    skip
                } else {
                    next
                }
            }
            Instruction::SkipIfNotEqualImmediate { x, nn } => {
                if self.v[x] != nn {
                    skip
                } else {
                    next
                }
            }
            Instruction::SkipIfEqual { x, y } => {
                if self.v[x] == self.v[y] {
                    skip
                } else {
                    next
                }
            }
            Instruction::SkipIfNotEqual { x, y } => {
                if self.v[x] != self.v[y] {
                    skip
                } else {
                    next
                }
            }

            Instruction::SetImmediate { x, nn } => {
                self.v[x] = nn;

                next
            }
            Instruction::AddImmediate { x, nn } => {
                self.v[x] = self.v[x].wrapping_add(nn);

                next
            }

            Instruction::Set { x, y } => {
                self.v[x] = self.v[y];

                next
            }
            Instruction::Or { x, y } => {
                self.v[x] = self.v[x] | self.v[y];

                next
            }
            Instruction::And { x, y } => {
                self.v[x] = self.v[x] & self.v[y];

                next
            }
            Instruction::Xor { x, y } => {
                self.v[x] = self.v[x] ^ self.v[y];

                next
            }
            Instruction::Add { x, y } => {
                let (result, carry) = self.v[x].overflowing_add(self.v[y]);
                self.set_with_flag(x, result, carry);

                next
            }
            Instruction::Sub { x, y } => {
                let (result, borrow) = self.v[x].overflowing_sub(self.v[y]);
                self.set_with_flag(x, result, !borrow);

                next
            }
            Instruction::SubReversed { x, y } => {
                let (result, borrow) = self.v[y].overflowing_sub(self.v[x]);
                self.set_with_flag(x, result, !borrow);

                next
            }
            Instruction::ShiftRight { x, .. } => {
                let value = self.v[x];
                self.set_with_flag(x, value >> 1, value & 0x1 == 0x1);

                next
            }
            Instruction::ShiftLeft { x, .. } => {
                let value = self.v[x];
                self.set_with_flag(x, value << 1, value & 0x80 == 0x80);

                next
            }

            Instruction::SetIndex { nnn } => {
                self.i = nnn;

                next
            }
            Instruction::JumpWithOffset { nnn } => {
                let address = nnn + u16::from(self.v[0]);
                if address as usize >= MEMORY_SIZE {
                    return Err(Error::OutOfBounds {
                        address: address as usize,
                    });
                }

                address
            }
            Instruction::Random { x, nn } => {
                let random: u8 = (self.random_number_provider)();
                self.v[x] = random & nn;

                next
            }

            Instruction::Draw { x, y, n } => {
                let sprite = self.memory.as_slice(self.i, u16::from(n))?;
                let collided = self.display.draw_sprite(self.v[x], self.v[y], sprite);
                self.v[FLAG_REGISTER] = u8::from(collided);

                next
            }

            Instruction::SkipIfKeyDown { x } => {
                if input.is_key_down(self.v[x]) {
                    skip
                } else {
                    next
                }
            }
            Instruction::SkipIfKeyUp { x } => {
                if input.is_key_down(self.v[x]) {
                    next
                } else {
                    skip
                }
            }

            Instruction::ReadDelayTimer { x } => {
                self.v[x] = self.timers.delay.current_value();

                next
            }
            // No key down means the same opcode runs again on the next cycle.
            Instruction::WaitForKey { x } => match input.first_key_down() {
                Some(key) => {
                    self.v[x] = key;

                    next
                }
                None => current_pc,
            },
            Instruction::SetDelayTimer { x } => {
                self.timers.delay.set_value(self.v[x]);

                next
            }
            Instruction::SetSoundTimer { x } => {
                self.timers.sound.set_value(self.v[x]);

                next
            }

            Instruction::AddToIndex { x } => {
                self.i = self.i.wrapping_add(u16::from(self.v[x]));

                next
            }
            Instruction::FontCharacter { x } => {
                self.i = self.memory.font_address_for_character(self.v[x]);

                next
            }
            Instruction::StoreBcd { x } => {
                let value = self.v[x];
                self.memory
                    .copy_from_slice(self.i, &[value / 100, (value / 10) % 10, value % 10])?;

                next
            }
            Instruction::StoreRegisters { x } => {
                self.memory
                    .copy_from_slice(self.i, self.v.as_slice_through(x))?;

                next
            }
            Instruction::LoadRegisters { x } => {
                let values = self.memory.as_slice(self.i, u16::from(x) + 1)?;
                self.v.copy_from_slice(values);

                next
            }
        };

        Ok(next_pc)
    }

    /// Store `value` in VX, then the flag in VF so the flag wins when X is F.
    fn set_with_flag(&mut self, x: Register, value: u8, flag: bool) {
        self.v[x] = value;
        self.v[FLAG_REGISTER] = u8::from(flag);
    }

    fn stack_push(&mut self, value: u16, current_pc: u16) -> Result<()> {
        if self.sp as usize >= STACK_SIZE {
            return Err(Error::StackOverflow {
                address: current_pc,
            });
        }
        self.stack[self.sp as usize] = value;
        self.sp += 1;

        Ok(())
    }

    fn stack_pop(&mut self, current_pc: u16) -> Result<u16> {
        if self.sp == 0 {
            return Err(Error::StackUnderflow {
                address: current_pc,
            });
        }
        self.sp -= 1;

        Ok(self.stack[self.sp as usize])
    }
}
