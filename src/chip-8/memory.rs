use crate::error::{Error, Result};

pub const MEMORY_SIZE: usize = 4096;
pub const PROGRAM_BASE_ADDRESS: u16 = 0x200;
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_BASE_ADDRESS as usize;

const FONTSET_BASE_ADDRESS: u16 = 0x50;
const FONT_CHARACTER_HEIGHT: u16 = 5;
const FONTSET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// Main memory holding 4KiB of data.
/// The first 0x200 locations are reserved for private
/// use, namely the built in font.
///
/// All accesses are bounds checked and report [`Error::OutOfBounds`]
/// instead of panicking, a failed access never modifies memory.
#[derive(Clone)]
pub struct Memory {
    memory: [u8; MEMORY_SIZE],
}

impl Memory {
    /// Construct a new instance of `Memory`.
    ///
    /// The reserved memory regions will be intiailized appropriately
    /// and a ROM can be loaded at 0x200 to start execution.
    ///
    pub fn new() -> Self {
        let mut memory = [0; MEMORY_SIZE];
        memory[(FONTSET_BASE_ADDRESS as usize)..(FONTSET_BASE_ADDRESS as usize + FONTSET.len())]
            .copy_from_slice(&FONTSET);

        Self { memory }
    }

    /// Construct memory with `rom` placed at [`PROGRAM_BASE_ADDRESS`].
    ///
    /// Fails with [`Error::RomTooLarge`] if the ROM doesn't fit in the
    /// space above the reserved region.
    pub fn with_rom(rom: &[u8]) -> Result<Self> {
        if rom.len() > MAX_ROM_SIZE {
            return Err(Error::RomTooLarge {
                size: rom.len(),
                max_size: MAX_ROM_SIZE,
            });
        }

        let mut memory = Self::new();
        memory.copy_from_slice(PROGRAM_BASE_ADDRESS, rom)?;

        Ok(memory)
    }

    pub fn font_address_for_character(&self, character: u8) -> u16 {
        FONTSET_BASE_ADDRESS + ((character & 0xF) as u16 * FONT_CHARACTER_HEIGHT)
    }

    pub fn read(&self, address: u16) -> Result<u8> {
        self.memory
            .get(address as usize)
            .copied()
            .ok_or(Error::OutOfBounds {
                address: address as usize,
            })
    }

    pub fn write(&mut self, address: u16, value: u8) -> Result<()> {
        let cell = self
            .memory
            .get_mut(address as usize)
            .ok_or(Error::OutOfBounds {
                address: address as usize,
            })?;
        *cell = value;

        Ok(())
    }

    /// Read the big-endian opcode stored at `address` and `address + 1`.
    pub fn read_opcode(&self, address: u16) -> Result<u16> {
        let high = self.read(address)?;
        let low = self.read(address.wrapping_add(1)).map_err(|_| Error::OutOfBounds {
            address: address as usize + 1,
        })?;

        Ok(u16::from(high) << 8 | u16::from(low))
    }

    pub fn copy_from_slice(&mut self, base_address: u16, slice: &[u8]) -> Result<()> {
        let range = Self::checked_range(base_address, slice.len())?;
        self.memory[range].copy_from_slice(slice);

        Ok(())
    }

    pub fn as_slice(&self, base_address: u16, length: u16) -> Result<&[u8]> {
        let range = Self::checked_range(base_address, length as usize)?;

        Ok(&self.memory[range])
    }

    fn checked_range(base_address: u16, length: usize) -> Result<std::ops::Range<usize>> {
        let start = base_address as usize;
        let end = start + length;
        if end > MEMORY_SIZE {
            return Err(Error::OutOfBounds {
                address: start.max(MEMORY_SIZE),
            });
        }

        Ok(start..end)
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{Memory, FONTSET_BASE_ADDRESS, MAX_ROM_SIZE, MEMORY_SIZE};
    use crate::error::Error;

    #[test]
    fn test_default() {
        let memory = Memory::default();

        assert_eq!(memory.read(FONTSET_BASE_ADDRESS), Ok(0xF0));
        assert_eq!(memory.read(FONTSET_BASE_ADDRESS + 79), Ok(0x80));
        assert_eq!(memory.read(0x200), Ok(0x00));
    }

    #[test]
    fn test_font_address_for_character() {
        let memory = Memory::default();

        assert_eq!(
            memory.font_address_for_character(5),
            FONTSET_BASE_ADDRESS + 25
        );
        assert_eq!(
            memory.font_address_for_character(0x1F),
            FONTSET_BASE_ADDRESS + 75
        );
    }

    #[test]
    fn test_copy_from_slice() {
        let mut memory = Memory::default();

        let rom = [0x00, 0xE0, 0x12, 0x00];
        memory.copy_from_slice(0x200, &rom).unwrap();

        assert_eq!(&memory.memory[0x200..0x204], &rom);
    }

    #[test]
    fn test_copy_from_slice_out_of_bounds_leaves_memory_untouched() {
        let mut memory = Memory::default();

        let result = memory.copy_from_slice(0xFFE, &[1, 2, 3]);

        assert_eq!(result, Err(Error::OutOfBounds { address: 0x1000 }));
        assert_eq!(memory.read(0xFFE), Ok(0));
        assert_eq!(memory.read(0xFFF), Ok(0));
    }

    #[test]
    fn test_as_slice() {
        let memory = Memory::default();

        let expected = [0x90, 0x90, 0xF0, 0x10, 0x10];

        assert_eq!(memory.as_slice(FONTSET_BASE_ADDRESS + 20, 5), Ok(&expected[..]));
        assert!(memory.as_slice(0xFFC, 5).is_err());
    }

    #[test]
    fn test_read_write_bounds() {
        let mut memory = Memory::default();

        assert_eq!(memory.write(0xFFF, 0xAB), Ok(()));
        assert_eq!(memory.read(0xFFF), Ok(0xAB));
        assert_eq!(
            memory.read(MEMORY_SIZE as u16),
            Err(Error::OutOfBounds {
                address: MEMORY_SIZE
            })
        );
        assert_eq!(
            memory.write(0x1234, 1),
            Err(Error::OutOfBounds { address: 0x1234 })
        );
    }

    #[test]
    fn test_read_opcode() {
        let memory = Memory::with_rom(&[0xA2, 0x2A]).unwrap();

        assert_eq!(memory.read_opcode(0x200), Ok(0xA22A));
        assert_eq!(
            memory.read_opcode(0xFFF),
            Err(Error::OutOfBounds { address: 0x1000 })
        );
    }

    #[test]
    fn test_with_rom_size_limit() {
        let rom = vec![0xFF; MAX_ROM_SIZE];
        let memory = Memory::with_rom(&rom).unwrap();
        assert_eq!(memory.read(0xFFF), Ok(0xFF));
        assert_eq!(memory.read(FONTSET_BASE_ADDRESS), Ok(0xF0));

        let rom = vec![0xFF; MAX_ROM_SIZE + 1];
        assert!(matches!(
            Memory::with_rom(&rom),
            Err(Error::RomTooLarge {
                size: 3585,
                max_size: 3584
            })
        ));
    }
}
