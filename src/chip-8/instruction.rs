use std::fmt;

/// A general purpose register index, `0x0` through `0xF`.
pub type Register = u8;

/// A decoded CHIP-8 instruction.
///
/// Operand names follow the usual opcode notation: `x`/`y` are register
/// indices, `nn` an 8 bit immediate, `nnn` a 12 bit address and `n` a 4 bit
/// immediate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// 0NNN: Call machine code routine at NNN, ignored.
    Sys { nnn: u16 },
    /// 00E0: Clear screen
    Cls,
    /// 00EE: Return from subroutine
    Ret,
    /// 1NNN: Jump to address NNN
    Jump { nnn: u16 },
    /// 2NNN: Call NNN
    Call { nnn: u16 },
    /// 3XNN: Skip next instruction if VX is equal to NN.
    SkipIfEqualImmediate { x: Register, nn: u8 },
    /// 4XNN: Skip next instruction if VX is not equal to NN.
    SkipIfNotEqualImmediate { x: Register, nn: u8 },
    /// 5XY0: Skip next instruction if VX is equal to VY.
    SkipIfEqual { x: Register, y: Register },
    /// 6XNN: Set VX to NN.
    SetImmediate { x: Register, nn: u8 },
    /// 7XNN: Add NN to VX, carry flag is not changed.
    AddImmediate { x: Register, nn: u8 },
    /// 8XY0: Set VX to the value of VY.
    Set { x: Register, y: Register },
    /// 8XY1
    Or { x: Register, y: Register },
    /// 8XY2
    And { x: Register, y: Register },
    /// 8XY3
    Xor { x: Register, y: Register },
    /// 8XY4: Add VY to VX. VF is set to 1 if there is a carry, 0 if not.
    Add { x: Register, y: Register },
    /// 8XY5: Subtract VY from VX. VF is set to 0 if there is a borrow, 1 if not.
    Sub { x: Register, y: Register },
    /// 8XY6: Shift VX right by 1, VF holds the bit shifted out.
    ShiftRight { x: Register, y: Register },
    /// 8XY7: Set VX to VY - VX. VF is set to 0 if there is a borrow, 1 if not.
    SubReversed { x: Register, y: Register },
    /// 8XYE: Shift VX left by 1, VF holds the bit shifted out.
    ShiftLeft { x: Register, y: Register },
    /// 9XY0: Skip the next instruction if VX is not equal VY
    SkipIfNotEqual { x: Register, y: Register },
    /// ANNN: Set `I` to address NNN
    SetIndex { nnn: u16 },
    /// BNNN: Jump to the address NNN + V0
    JumpWithOffset { nnn: u16 },
    /// CXNN: Set the VX to the result of rand() & NN.
    Random { x: Register, nn: u8 },
    /// DXYN: Draw a sprite at VX, VY of width 8 and height N.
    Draw { x: Register, y: Register, n: u8 },
    /// EX9E: Skip the next instruction if the key stored in VX is pressed
    SkipIfKeyDown { x: Register },
    /// EXA1: Skip the next instruction if the key stored in VX isn't pressed
    SkipIfKeyUp { x: Register },
    /// FX07: Set VX to the value of the delay timer
    ReadDelayTimer { x: Register },
    /// FX0A: Wait for a key press and store it in VX.
    WaitForKey { x: Register },
    /// FX15: Set the delay timer to VX
    SetDelayTimer { x: Register },
    /// FX18: Set the sound timer to VX
    SetSoundTimer { x: Register },
    /// FX1E: Add VX to I
    AddToIndex { x: Register },
    /// FX29: Set I to the location of the font sprite for the character in VX.
    FontCharacter { x: Register },
    /// FX33: Store BCD representation of VX in memory locations I, I+1, and I+2.
    StoreBcd { x: Register },
    /// FX55: Store registers V0 through VX in memory starting at I.
    StoreRegisters { x: Register },
    /// FX65: Read into registers V0 through VX starting at I.
    LoadRegisters { x: Register },
}

impl Instruction {
    /// Decode `opcode`, returning `None` for opcodes outside the instruction set.
    pub fn decode(opcode: u16) -> Option<Self> {
        let x = ((opcode & 0x0F00) >> 8) as u8;
        let y = ((opcode & 0x00F0) >> 4) as u8;
        let n = (opcode & 0x000F) as u8;
        let nn = (opcode & 0x00FF) as u8;
        let nnn = opcode & 0x0FFF;

        let instruction = match opcode & 0xF000 {
            0x0000 => match opcode {
                0x00E0 => Self::Cls,
                0x00EE => Self::Ret,
                _ => Self::Sys { nnn },
            },
            0x1000 => Self::Jump { nnn },
            0x2000 => Self::Call { nnn },
            0x3000 => Self::SkipIfEqualImmediate { x, nn },
            0x4000 => Self::SkipIfNotEqualImmediate { x, nn },
            0x5000 if n == 0 => Self::SkipIfEqual { x, y },
            0x6000 => Self::SetImmediate { x, nn },
            0x7000 => Self::AddImmediate { x, nn },
            0x8000 => match n {
                0x0 => Self::Set { x, y },
                0x1 => Self::Or { x, y },
                0x2 => Self::And { x, y },
                0x3 => Self::Xor { x, y },
                0x4 => Self::Add { x, y },
                0x5 => Self::Sub { x, y },
                0x6 => Self::ShiftRight { x, y },
                0x7 => Self::SubReversed { x, y },
                0xE => Self::ShiftLeft { x, y },
                _ => return None,
            },
            0x9000 if n == 0 => Self::SkipIfNotEqual { x, y },
            0xA000 => Self::SetIndex { nnn },
            0xB000 => Self::JumpWithOffset { nnn },
            0xC000 => Self::Random { x, nn },
            0xD000 => Self::Draw { x, y, n },
            0xE000 => match nn {
                0x9E => Self::SkipIfKeyDown { x },
                0xA1 => Self::SkipIfKeyUp { x },
                _ => return None,
            },
            0xF000 => match nn {
                0x07 => Self::ReadDelayTimer { x },
                0x0A => Self::WaitForKey { x },
                0x15 => Self::SetDelayTimer { x },
                0x18 => Self::SetSoundTimer { x },
                0x1E => Self::AddToIndex { x },
                0x29 => Self::FontCharacter { x },
                0x33 => Self::StoreBcd { x },
                0x55 => Self::StoreRegisters { x },
                0x65 => Self::LoadRegisters { x },
                _ => return None,
            },
            _ => return None,
        };

        Some(instruction)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;

        match *self {
            Sys { nnn } => write!(f, "SYS {:#05X}", nnn),
            Cls => write!(f, "CLS"),
            Ret => write!(f, "RET"),
            Jump { nnn } => write!(f, "JP {:#05X}", nnn),
            Call { nnn } => write!(f, "CALL {:#05X}", nnn),
            SkipIfEqualImmediate { x, nn } => write!(f, "SE V{:X}, {:#04X}", x, nn),
            SkipIfNotEqualImmediate { x, nn } => write!(f, "SNE V{:X}, {:#04X}", x, nn),
            SkipIfEqual { x, y } => write!(f, "SE V{:X}, V{:X}", x, y),
            SetImmediate { x, nn } => write!(f, "LD V{:X}, {:#04X}", x, nn),
            AddImmediate { x, nn } => write!(f, "ADD V{:X}, {:#04X}", x, nn),
            Set { x, y } => write!(f, "LD V{:X}, V{:X}", x, y),
            Or { x, y } => write!(f, "OR V{:X}, V{:X}", x, y),
            And { x, y } => write!(f, "AND V{:X}, V{:X}", x, y),
            Xor { x, y } => write!(f, "XOR V{:X}, V{:X}", x, y),
            Add { x, y } => write!(f, "ADD V{:X}, V{:X}", x, y),
            Sub { x, y } => write!(f, "SUB V{:X}, V{:X}", x, y),
            ShiftRight { x, y } => write!(f, "SHR V{:X}, V{:X}", x, y),
            SubReversed { x, y } => write!(f, "SUBN V{:X}, V{:X}", x, y),
            ShiftLeft { x, y } => write!(f, "SHL V{:X}, V{:X}", x, y),
            SkipIfNotEqual { x, y } => write!(f, "SNE V{:X}, V{:X}", x, y),
            SetIndex { nnn } => write!(f, "LD I, {:#05X}", nnn),
            JumpWithOffset { nnn } => write!(f, "JP V0, {:#05X}", nnn),
            Random { x, nn } => write!(f, "RND V{:X}, {:#04X}", x, nn),
            Draw { x, y, n } => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            SkipIfKeyDown { x } => write!(f, "SKP V{:X}", x),
            SkipIfKeyUp { x } => write!(f, "SKNP V{:X}", x),
            ReadDelayTimer { x } => write!(f, "LD V{:X}, DT", x),
            WaitForKey { x } => write!(f, "LD V{:X}, K", x),
            SetDelayTimer { x } => write!(f, "LD DT, V{:X}", x),
            SetSoundTimer { x } => write!(f, "LD ST, V{:X}", x),
            AddToIndex { x } => write!(f, "ADD I, V{:X}", x),
            FontCharacter { x } => write!(f, "LD F, V{:X}", x),
            StoreBcd { x } => write!(f, "LD B, V{:X}", x),
            StoreRegisters { x } => write!(f, "LD [I], V{:X}", x),
            LoadRegisters { x } => write!(f, "LD V{:X}, [I]", x),
        }
    }
}
