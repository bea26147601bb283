//! Host-facing front end for embedding the interpreter.
//!
//! [`Chip8`] bundles a [`Machine`] with a randomness source so hosts drive
//! one object: load a program, step it at their chosen cadence, feed key
//! events between steps, and read the frame buffer and sound timer back
//! out for rendering and audio.

use std::fs;
use std::path::Path;

use crate::error::LoadError;
use crate::execute;
use crate::rng::RandomSource;
use crate::state::Machine;

/// An interpreter instance owning its machine state and random source.
pub struct Chip8 {
    machine: Machine,
    rng: Box<dyn RandomSource>,
}

impl std::fmt::Debug for Chip8 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chip8")
            .field("machine", &self.machine)
            .finish_non_exhaustive()
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}

impl Chip8 {
    /// Creates an interpreter seeded from the thread-local generator.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(Box::new(rand::thread_rng()))
    }

    /// Creates an interpreter with a caller-supplied random source, for
    /// deterministic or replayable runs.
    #[must_use]
    pub fn with_rng(rng: Box<dyn RandomSource>) -> Self {
        Self {
            machine: Machine::new(),
            rng,
        }
    }

    /// Loads a program image into memory at the program base.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::ImageTooLarge`] when the image does not fit in
    /// the program region.
    pub fn load_program(&mut self, image: &[u8]) -> Result<(), LoadError> {
        self.machine.load_program(image)
    }

    /// Reads a program image from disk and loads it.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Io`] when the file cannot be read and
    /// [`LoadError::ImageTooLarge`] when its contents do not fit.
    pub fn load_rom<P: AsRef<Path>>(&mut self, path: P) -> Result<(), LoadError> {
        let image = fs::read(path)?;
        self.machine.load_program(&image)
    }

    /// Runs one fetch/decode/execute cycle and ticks both timers.
    pub fn step(&mut self) {
        execute::step(&mut self.machine, self.rng.as_mut());
    }

    /// Marks a keypad key as held down.
    pub const fn press_key(&mut self, key: u8) {
        self.machine.keypad.press(key);
    }

    /// Marks a keypad key as released.
    pub const fn release_key(&mut self, key: u8) {
        self.machine.keypad.release(key);
    }

    /// Linear frame buffer cells for rendering, row-major 64x32.
    #[must_use]
    pub fn frame_buffer(&self) -> &[u32] {
        self.machine.frame_buffer.cells()
    }

    /// True while the sound timer is nonzero and the buzzer should play.
    #[must_use]
    pub const fn sound_active(&self) -> bool {
        self.machine.regs.sound_timer() > 0
    }

    /// Read access to the full machine state, for debuggers and tests.
    #[must_use]
    pub const fn machine(&self) -> &Machine {
        &self.machine
    }

    /// Mutable access to the full machine state.
    pub const fn machine_mut(&mut self) -> &mut Machine {
        &mut self.machine
    }

    /// Restores the freshly constructed machine state, keeping the
    /// configured random source.
    pub fn reset(&mut self) {
        self.machine.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::Chip8;
    use crate::memory::PROGRAM_START;
    use crate::state::Register;
    use rand::rngs::mock::StepRng;

    #[test]
    fn keys_fed_through_the_front_end_reach_the_machine() {
        let mut chip8 = Chip8::with_rng(Box::new(StepRng::new(0, 0)));
        chip8.press_key(0x5);
        assert!(chip8.machine().keypad.is_pressed(0x5));
        chip8.release_key(0x5);
        assert!(!chip8.machine().keypad.is_pressed(0x5));
    }

    #[test]
    fn stepping_a_loaded_program_mutates_the_machine() {
        let mut chip8 = Chip8::with_rng(Box::new(StepRng::new(0, 0)));
        chip8.load_program(&[0x6A, 0x42]).expect("image fits");
        chip8.step();
        assert_eq!(chip8.machine().regs.v(Register::VA), 0x42);
        assert_eq!(chip8.machine().regs.pc(), PROGRAM_START + 2);
    }

    #[test]
    fn sound_is_active_while_the_sound_timer_runs() {
        let mut chip8 = Chip8::with_rng(Box::new(StepRng::new(0, 0)));
        chip8.load_program(&[0x60, 0x03, 0xF0, 0x18]).expect("image fits");
        chip8.step();
        assert!(!chip8.sound_active());
        chip8.step();
        assert!(chip8.sound_active());
    }

    #[test]
    fn missing_rom_files_surface_an_io_error() {
        let mut chip8 = Chip8::with_rng(Box::new(StepRng::new(0, 0)));
        let err = chip8
            .load_rom("/nonexistent/path/pong.ch8")
            .expect_err("file does not exist");
        assert!(matches!(err, crate::LoadError::Io(_)));
    }
}
