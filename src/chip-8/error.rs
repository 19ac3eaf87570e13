/// Faults raised by the interpreter.
///
/// Every fault is a deterministic consequence of the program and machine
/// state, retrying the same call will produce the same error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("ROM is too large ({size} bytes), max size is {max_size} bytes")]
    RomTooLarge { size: usize, max_size: usize },

    #[error("Memory access out of bounds at address {address:#06X}")]
    OutOfBounds { address: usize },

    #[error("Unknown opcode {opcode:#06X} at address {address:#06X}")]
    UnknownOpcode { opcode: u16, address: u16 },

    #[error("Stack overflow: call at {address:#06X} exceeds the maximum call depth")]
    StackOverflow { address: u16 },

    #[error("Stack underflow: return at {address:#06X} with an empty call stack")]
    StackUnderflow { address: u16 },

    #[error("Invalid key {key:#04X}, keys range from 0x0 to 0xF")]
    InvalidKey { key: u8 },
}

pub type Result<T> = std::result::Result<T, Error>;
