//! Memory model primitives: fixed region map, built-in glyph data, and the
//! uniform out-of-range wrap policy.

/// Size in bytes of the flat addressable memory (4 KiB).
pub const MEMORY_BYTES: usize = 4096;

/// Mask reducing any 16-bit address to the addressable 12-bit range.
pub const ADDRESS_MASK: u16 = 0x0FFF;

/// Inclusive start address of the built-in glyph sprite region.
pub const GLYPH_START: u16 = 0x000;
/// Inclusive end address of the built-in glyph sprite region.
pub const GLYPH_END: u16 = 0x04F;
/// Inclusive start address of the interpreter-reserved region.
pub const RESERVED_START: u16 = 0x050;
/// Inclusive end address of the interpreter-reserved region.
pub const RESERVED_END: u16 = 0x1FF;
/// Inclusive start address of the program region; execution begins here.
pub const PROGRAM_START: u16 = 0x200;
/// Inclusive end address of the program region.
pub const PROGRAM_END: u16 = 0x0FFF;

/// Bytes per built-in glyph sprite (one row per byte, MSB-first pixels).
pub const GLYPH_HEIGHT: u16 = 5;

/// Number of built-in glyph sprites, one per hex digit.
pub const GLYPH_COUNT: usize = 16;

/// Built-in 5-byte glyph sprites for the hex digits `0x0..=0xF`.
pub const GLYPH_SPRITES: [u8; GLYPH_COUNT * GLYPH_HEIGHT as usize] = [
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

/// Region classification for addressable memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemoryRegion {
    /// Built-in glyph sprites (`0x000..=0x04F`).
    Glyph,
    /// Interpreter-reserved, unused by loaded programs (`0x050..=0x1FF`).
    Reserved,
    /// Program load and execution region (`0x200..=0xFFF`).
    Program,
}

impl MemoryRegion {
    /// Returns the inclusive bounds for this region.
    #[must_use]
    pub const fn bounds(self) -> (u16, u16) {
        match self {
            Self::Glyph => (GLYPH_START, GLYPH_END),
            Self::Reserved => (RESERVED_START, RESERVED_END),
            Self::Program => (PROGRAM_START, PROGRAM_END),
        }
    }

    /// Returns `true` when `addr` belongs to this region.
    #[must_use]
    pub const fn contains(self, addr: u16) -> bool {
        let (start, end) = self.bounds();
        addr >= start && addr <= end
    }
}

const _: () = assert_region_layout();

const fn assert_region_layout() {
    assert!(
        GLYPH_END - GLYPH_START + 1 == GLYPH_COUNT as u16 * GLYPH_HEIGHT,
        "glyph region must hold exactly 16 five-byte sprites"
    );
    assert!(
        GLYPH_END + 1 == RESERVED_START && RESERVED_END + 1 == PROGRAM_START,
        "fixed regions must be contiguous"
    );
    assert!(
        GLYPH_START == 0x000 && PROGRAM_END as usize == MEMORY_BYTES - 1,
        "fixed regions must cover the full address space"
    );
}

/// Decodes an address into its fixed memory region.
///
/// Addresses above the 12-bit range are wrapped first, per the uniform
/// out-of-range policy.
#[must_use]
pub const fn decode_memory_region(addr: u16) -> MemoryRegion {
    match addr & ADDRESS_MASK {
        GLYPH_START..=GLYPH_END => MemoryRegion::Glyph,
        RESERVED_START..=RESERVED_END => MemoryRegion::Reserved,
        _ => MemoryRegion::Program,
    }
}

/// Reduces an arbitrary 16-bit address to a valid backing-store index.
///
/// This is the single out-of-range policy for the core: fetch, sprite reads,
/// decimal stores, and register block transfers all wrap modulo the 4 KiB
/// memory size.
#[must_use]
pub const fn wrap_address(addr: u16) -> usize {
    (addr & ADDRESS_MASK) as usize
}

/// Returns the memory address of the 5-byte glyph sprite for a hex digit.
///
/// Only the low 4 bits of `digit` participate, so the result always lands
/// inside the glyph region.
#[must_use]
pub const fn glyph_address(digit: u8) -> u16 {
    GLYPH_START + GLYPH_HEIGHT * (digit & 0x0F) as u16
}

/// Allocates the canonical 4 KiB backing store with glyph sprites preloaded
/// and all other bytes zeroed.
#[must_use]
pub fn new_memory() -> Box<[u8]> {
    let mut memory = vec![0; MEMORY_BYTES].into_boxed_slice();
    memory[GLYPH_START as usize..=GLYPH_END as usize].copy_from_slice(&GLYPH_SPRITES);
    memory
}

#[cfg(test)]
mod tests {
    use super::{
        decode_memory_region, glyph_address, new_memory, wrap_address, MemoryRegion, GLYPH_END,
        GLYPH_SPRITES, GLYPH_START, MEMORY_BYTES, PROGRAM_START,
    };

    #[test]
    fn canonical_backing_store_preloads_glyphs_and_zeroes_the_rest() {
        let memory = new_memory();
        assert_eq!(memory.len(), MEMORY_BYTES);
        assert_eq!(&memory[..GLYPH_SPRITES.len()], &GLYPH_SPRITES);
        assert!(memory[GLYPH_SPRITES.len()..].iter().all(|byte| *byte == 0));
    }

    #[test]
    fn region_decode_is_correct_at_boundaries() {
        assert_eq!(decode_memory_region(GLYPH_START), MemoryRegion::Glyph);
        assert_eq!(decode_memory_region(GLYPH_END), MemoryRegion::Glyph);
        assert_eq!(decode_memory_region(0x050), MemoryRegion::Reserved);
        assert_eq!(decode_memory_region(0x1FF), MemoryRegion::Reserved);
        assert_eq!(decode_memory_region(PROGRAM_START), MemoryRegion::Program);
        assert_eq!(decode_memory_region(0x0FFF), MemoryRegion::Program);
    }

    #[test]
    fn contains_matches_decoder_for_all_addresses() {
        for addr in 0_u16..0x1000 {
            let region = decode_memory_region(addr);
            assert!(region.contains(addr));
        }
    }

    #[test]
    fn wrap_policy_masks_to_twelve_bits() {
        assert_eq!(wrap_address(0x0000), 0x0000);
        assert_eq!(wrap_address(0x0FFF), 0x0FFF);
        assert_eq!(wrap_address(0x1000), 0x0000);
        assert_eq!(wrap_address(0xFFFF), 0x0FFF);
    }

    #[test]
    fn glyph_addresses_step_by_sprite_height() {
        assert_eq!(glyph_address(0x0), 0x000);
        assert_eq!(glyph_address(0x1), 0x005);
        assert_eq!(glyph_address(0xF), 0x04B);
        // High operand bits do not escape the glyph region.
        assert_eq!(glyph_address(0xFF), glyph_address(0x0F));
    }
}
