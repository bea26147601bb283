//! Machine state model primitives.

/// Architectural register file types and storage model.
pub mod registers;

pub use registers::{Register, Registers, REGISTER_COUNT, STACK_DEPTH};

use crate::display::FrameBuffer;
use crate::error::LoadError;
use crate::keypad::Keypad;
use crate::memory::{new_memory, MEMORY_BYTES, PROGRAM_START};

/// Maximum program image size accepted by the loader.
pub const MAX_PROGRAM_BYTES: usize = MEMORY_BYTES - PROGRAM_START as usize;

/// Complete mutable machine state: the substrate every instruction reads
/// and writes.
///
/// One `Machine` is constructed per emulated program run, pre-loaded with
/// the built-in glyph sprites, and mutated by every step. The core assumes
/// exclusive, sequential access within a step; hosts that render or feed
/// keys concurrently must synchronize around step calls.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Machine {
    /// Register file, index pointer, program counter, stack, and timers.
    pub regs: Registers,
    /// Flat 4 KiB memory image with glyph sprites at the base.
    pub memory: Box<[u8]>,
    /// 64x32 monochrome frame buffer, read by renderers between steps.
    pub frame_buffer: FrameBuffer,
    /// 16-key hex keypad, written by the host between steps.
    pub keypad: Keypad,
    /// Most recently fetched instruction word; scratch for one step only.
    pub current_instruction: u16,
}

impl Default for Machine {
    fn default() -> Self {
        Self {
            regs: Registers::default(),
            memory: new_memory(),
            frame_buffer: FrameBuffer::default(),
            keypad: Keypad::default(),
            current_instruction: 0,
        }
    }
}

impl Machine {
    /// Creates a machine with glyphs preloaded and the program counter at
    /// the program base.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies a raw binary image verbatim into memory at the program base.
    ///
    /// Loading never resets registers, timers, or the stack; loading into a
    /// running machine just overwrites memory.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::ImageTooLarge`] when the image exceeds the
    /// [`MAX_PROGRAM_BYTES`] the program region can hold; nothing is copied
    /// in that case.
    pub fn load_program(&mut self, image: &[u8]) -> Result<(), LoadError> {
        if image.len() > MAX_PROGRAM_BYTES {
            return Err(LoadError::ImageTooLarge {
                len: image.len(),
                capacity: MAX_PROGRAM_BYTES,
            });
        }

        let start = PROGRAM_START as usize;
        self.memory[start..start + image.len()].copy_from_slice(image);
        Ok(())
    }

    /// Restores the machine to its freshly constructed state: zeroed
    /// registers and program memory, glyphs re-seeded, display cleared,
    /// all keys released.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::{Machine, MAX_PROGRAM_BYTES};
    use crate::error::LoadError;
    use crate::memory::{GLYPH_SPRITES, PROGRAM_START};

    #[test]
    fn new_machine_has_glyphs_and_zeroed_program_memory() {
        let machine = Machine::new();
        assert_eq!(machine.regs.pc(), PROGRAM_START);
        assert_eq!(&machine.memory[..GLYPH_SPRITES.len()], &GLYPH_SPRITES);
        assert!(machine.memory[GLYPH_SPRITES.len()..]
            .iter()
            .all(|byte| *byte == 0));
    }

    #[test]
    fn load_round_trips_bytes_at_the_program_base() {
        let mut machine = Machine::new();
        let image = [0xDE, 0xAD, 0xBE, 0xEF];

        machine.load_program(&image).expect("image fits");

        let start = PROGRAM_START as usize;
        assert_eq!(&machine.memory[start..start + image.len()], &image);
        assert!(machine.memory[start + image.len()..]
            .iter()
            .all(|byte| *byte == 0));
    }

    #[test]
    fn load_accepts_exactly_the_program_region_capacity() {
        let mut machine = Machine::new();
        let image = vec![0xAA; MAX_PROGRAM_BYTES];
        machine.load_program(&image).expect("image fits exactly");
        assert_eq!(*machine.memory.last().expect("memory is non-empty"), 0xAA);
    }

    #[test]
    fn oversized_image_is_rejected_without_copying() {
        let mut machine = Machine::new();
        let image = vec![0xAA; MAX_PROGRAM_BYTES + 1];

        let err = machine.load_program(&image).expect_err("image too large");
        assert!(matches!(
            err,
            LoadError::ImageTooLarge { len, capacity }
                if len == MAX_PROGRAM_BYTES + 1 && capacity == MAX_PROGRAM_BYTES
        ));
        assert!(machine.memory[PROGRAM_START as usize..]
            .iter()
            .all(|byte| *byte == 0));
    }

    #[test]
    fn reload_overwrites_memory_but_keeps_register_state() {
        let mut machine = Machine::new();
        machine.regs.set_v(crate::Register::V3, 0x42);
        machine.regs.set_delay_timer(9);

        machine.load_program(&[0x11, 0x22]).expect("image fits");

        assert_eq!(machine.regs.v(crate::Register::V3), 0x42);
        assert_eq!(machine.regs.delay_timer(), 9);
    }

    #[test]
    fn reset_restores_the_constructed_state() {
        let mut machine = Machine::new();
        machine.load_program(&[0x11, 0x22]).expect("image fits");
        machine.regs.set_pc(0x300);
        machine.keypad.press(0x7);

        machine.reset();

        assert_eq!(machine, Machine::new());
    }
}
