//! Core interpreter crate for the CHIP-8 virtual machine.

/// Memory model primitives and fixed region map.
pub mod memory;
pub use memory::{
    decode_memory_region, glyph_address, new_memory, wrap_address, MemoryRegion, ADDRESS_MASK,
    GLYPH_COUNT, GLYPH_END, GLYPH_HEIGHT, GLYPH_SPRITES, GLYPH_START, MEMORY_BYTES, PROGRAM_END,
    PROGRAM_START, RESERVED_END, RESERVED_START,
};

/// Monochrome frame buffer model.
pub mod display;
pub use display::{FrameBuffer, DISPLAY_CELLS, DISPLAY_HEIGHT, DISPLAY_WIDTH, PIXEL_ON};

/// Hexadecimal keypad model.
pub mod keypad;
pub use keypad::{Keypad, KEY_COUNT};

/// Architectural machine state model primitives.
pub mod state;
pub use state::{Machine, Register, Registers, MAX_PROGRAM_BYTES, REGISTER_COUNT, STACK_DEPTH};

/// Instruction word layout and total decoding.
pub mod encoding;
pub use encoding::{address, decode, field_x, field_y, low_byte, low_nibble, Opcode};

/// Instruction execution pipeline.
pub mod execute;
pub use execute::step;

/// Randomness seam for the random-AND instruction.
pub mod rng;
pub use rng::RandomSource;

/// Program loading errors.
pub mod error;
pub use error::LoadError;

/// Host-facing interpreter front end.
pub mod api;
pub use api::Chip8;

/// Instruction disassembly for debugger views.
pub mod disasm;
pub use disasm::{disassemble_one, disassemble_window, DisassemblyRow};

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
