use crate::error::{Error, Result};
use crate::Input;

pub const KEY_COUNT: usize = 16;

/// Latched state of the 16 key hex keypad.
///
/// Written by the host between execution batches, read by the CPU.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Keypad {
    keys: [bool; KEY_COUNT],
}

impl Keypad {
    pub fn set_key(&mut self, key: u8, pressed: bool) -> Result<()> {
        let state = self
            .keys
            .get_mut(key as usize)
            .ok_or(Error::InvalidKey { key })?;
        *state = pressed;

        Ok(())
    }

    pub fn release_all(&mut self) {
        self.keys = [false; KEY_COUNT];
    }
}

impl Input for Keypad {
    fn is_key_down(&self, key: u8) -> bool {
        self.keys.get(key as usize).copied().unwrap_or(false)
    }

    fn first_key_down(&self) -> Option<u8> {
        self.keys
            .iter()
            .position(|&pressed| pressed)
            .map(|key| key as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::Keypad;
    use crate::error::Error;
    use crate::Input;

    #[test]
    fn test_set_key() {
        let mut keypad = Keypad::default();

        keypad.set_key(0xA, true).unwrap();
        assert!(keypad.is_key_down(0xA));
        assert!(!keypad.is_key_down(0xB));

        keypad.set_key(0xA, false).unwrap();
        assert!(!keypad.is_key_down(0xA));
    }

    #[test]
    fn test_set_invalid_key() {
        let mut keypad = Keypad::default();

        assert_eq!(keypad.set_key(0x10, true), Err(Error::InvalidKey { key: 0x10 }));
        assert_eq!(keypad, Keypad::default());
    }

    #[test]
    fn test_first_key_down() {
        let mut keypad = Keypad::default();
        assert_eq!(keypad.first_key_down(), None);

        keypad.set_key(0xF, true).unwrap();
        keypad.set_key(0x3, true).unwrap();
        assert_eq!(keypad.first_key_down(), Some(0x3));

        keypad.release_all();
        assert_eq!(keypad.first_key_down(), None);
    }

    #[test]
    fn test_out_of_range_key_is_never_down() {
        let keypad = Keypad::default();

        assert!(!keypad.is_key_down(0xFF));
    }
}
