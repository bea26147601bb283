//! Instruction word layout and decoding.
//!
//! Every instruction is one big-endian 16-bit word. The high nibble selects
//! an opcode group; groups 0x0, 0x8, 0xE discriminate further on the low
//! nibble and group 0xF on the low byte. Operand fields are carved out of
//! fixed bit positions, so decoding never fails: words that match no defined
//! instruction decode to [`Opcode::Noop`].

/// A decoded instruction, identified without its operand fields.
///
/// Operands are re-extracted from the raw word at execution time with the
/// field accessors in this module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Opcode {
    ClearScreen,
    Return,
    Jump,
    Call,
    SkipIfEqualByte,
    SkipIfNotEqualByte,
    SkipIfEqualRegister,
    LoadByte,
    AddByte,
    Move,
    Or,
    And,
    Xor,
    AddRegisters,
    SubRegisters,
    ShiftRight,
    SubReversed,
    ShiftLeft,
    SkipIfNotEqualRegister,
    SetIndex,
    JumpOffset,
    RandomAnd,
    Draw,
    SkipIfKeyPressed,
    SkipIfKeyNotPressed,
    ReadDelayTimer,
    WaitForKey,
    SetDelayTimer,
    SetSoundTimer,
    AddToIndex,
    IndexToGlyph,
    StoreDecimal,
    StoreRegisters,
    LoadRegisters,
    /// Any word that matches no defined instruction.
    Noop,
}

/// Decodes an instruction word. Total: undefined words map to
/// [`Opcode::Noop`] rather than failing.
#[must_use]
pub const fn decode(word: u16) -> Opcode {
    match (word >> 12) & 0xF {
        0x0 => match word & 0x000F {
            0x0 => Opcode::ClearScreen,
            0xE => Opcode::Return,
            _ => Opcode::Noop,
        },
        0x1 => Opcode::Jump,
        0x2 => Opcode::Call,
        0x3 => Opcode::SkipIfEqualByte,
        0x4 => Opcode::SkipIfNotEqualByte,
        0x5 => Opcode::SkipIfEqualRegister,
        0x6 => Opcode::LoadByte,
        0x7 => Opcode::AddByte,
        0x8 => match word & 0x000F {
            0x0 => Opcode::Move,
            0x1 => Opcode::Or,
            0x2 => Opcode::And,
            0x3 => Opcode::Xor,
            0x4 => Opcode::AddRegisters,
            0x5 => Opcode::SubRegisters,
            0x6 => Opcode::ShiftRight,
            0x7 => Opcode::SubReversed,
            0xE => Opcode::ShiftLeft,
            _ => Opcode::Noop,
        },
        0x9 => Opcode::SkipIfNotEqualRegister,
        0xA => Opcode::SetIndex,
        0xB => Opcode::JumpOffset,
        0xC => Opcode::RandomAnd,
        0xD => Opcode::Draw,
        0xE => match word & 0x000F {
            0xE => Opcode::SkipIfKeyPressed,
            0x1 => Opcode::SkipIfKeyNotPressed,
            _ => Opcode::Noop,
        },
        0xF => match word & 0x00FF {
            0x07 => Opcode::ReadDelayTimer,
            0x0A => Opcode::WaitForKey,
            0x15 => Opcode::SetDelayTimer,
            0x18 => Opcode::SetSoundTimer,
            0x1E => Opcode::AddToIndex,
            0x29 => Opcode::IndexToGlyph,
            0x33 => Opcode::StoreDecimal,
            0x55 => Opcode::StoreRegisters,
            0x65 => Opcode::LoadRegisters,
            _ => Opcode::Noop,
        },
        _ => Opcode::Noop,
    }
}

/// First register operand, bits 8..=11.
#[must_use]
pub const fn field_x(word: u16) -> u8 {
    ((word >> 8) & 0x0F) as u8
}

/// Second register operand, bits 4..=7.
#[must_use]
pub const fn field_y(word: u16) -> u8 {
    ((word >> 4) & 0x0F) as u8
}

/// Immediate byte operand, bits 0..=7.
#[must_use]
pub const fn low_byte(word: u16) -> u8 {
    (word & 0x00FF) as u8
}

/// Immediate address operand, bits 0..=11.
#[must_use]
pub const fn address(word: u16) -> u16 {
    word & 0x0FFF
}

/// Immediate nibble operand, bits 0..=3.
#[must_use]
pub const fn low_nibble(word: u16) -> u8 {
    (word & 0x000F) as u8
}
