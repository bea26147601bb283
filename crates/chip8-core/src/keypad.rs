//! Keypad model for the 16-key hex input device.

/// Number of keys on the hex keypad.
pub const KEY_COUNT: usize = 16;

/// 16 boolean key states, hex-keyed `0x0..=0xF`.
///
/// The host sets and clears keys between step calls; the core only reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Keypad {
    keys: [bool; KEY_COUNT],
}

impl Keypad {
    /// Marks a key as held down. Only the low 4 bits of `key` participate.
    pub const fn press(&mut self, key: u8) {
        self.keys[(key & 0x0F) as usize] = true;
    }

    /// Marks a key as released. Only the low 4 bits of `key` participate.
    pub const fn release(&mut self, key: u8) {
        self.keys[(key & 0x0F) as usize] = false;
    }

    /// Returns `true` when the key is currently held down.
    #[must_use]
    pub const fn is_pressed(&self, key: u8) -> bool {
        self.keys[(key & 0x0F) as usize]
    }

    /// Scans keys `0x0..=0xF` in ascending order and returns the first one
    /// held down, or `None` when the keypad is idle.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn first_pressed(&self) -> Option<u8> {
        self.keys
            .iter()
            .position(|pressed| *pressed)
            .map(|key| key as u8)
    }
}
