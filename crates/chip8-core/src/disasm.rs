//! Instruction disassembly.
//!
//! Converts raw instruction words into conventional mnemonics for debugger
//! views and trace output. Undefined words render as `.word 0xXXXX` so a
//! window over arbitrary memory always produces a row per word.

use crate::encoding::{self, Opcode};
use crate::memory::wrap_address;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single disassembled instruction row.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisassemblyRow {
    /// Address the word was fetched from.
    pub addr: u16,
    /// The raw instruction word.
    pub word: u16,
    /// Mnemonic, e.g. `LD` or `DRW`.
    pub mnemonic: String,
    /// Formatted operands, e.g. `VA, 0x3F`. Empty for operand-less forms.
    pub operands: String,
}

impl std::fmt::Display for DisassemblyRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.operands.is_empty() {
            write!(f, "{:03X}: {}", self.addr, self.mnemonic)
        } else {
            write!(f, "{:03X}: {} {}", self.addr, self.mnemonic, self.operands)
        }
    }
}

/// Disassembles the word at `addr`, reading both bytes through the address
/// mask the interpreter fetches with.
#[must_use]
pub fn disassemble_one(addr: u16, memory: &[u8]) -> DisassemblyRow {
    let word = u16::from_be_bytes([
        memory[wrap_address(addr)],
        memory[wrap_address(addr.wrapping_add(1))],
    ]);
    let (mnemonic, operands) = render(word);
    DisassemblyRow {
        addr,
        word,
        mnemonic,
        operands,
    }
}

/// Disassembles `count` consecutive words starting at `start`.
#[must_use]
pub fn disassemble_window(start: u16, count: usize, memory: &[u8]) -> Vec<DisassemblyRow> {
    let mut rows = Vec::with_capacity(count);
    let mut addr = start;
    for _ in 0..count {
        rows.push(disassemble_one(addr, memory));
        addr = addr.wrapping_add(2);
    }
    rows
}

fn render(word: u16) -> (String, String) {
    let x = encoding::field_x(word);
    let y = encoding::field_y(word);
    let byte = encoding::low_byte(word);
    let nibble = encoding::low_nibble(word);
    let addr = encoding::address(word);

    let (mnemonic, operands) = match encoding::decode(word) {
        Opcode::ClearScreen => ("CLS", String::new()),
        Opcode::Return => ("RET", String::new()),
        Opcode::Jump => ("JP", format!("0x{addr:03X}")),
        Opcode::Call => ("CALL", format!("0x{addr:03X}")),
        Opcode::SkipIfEqualByte => ("SE", format!("V{x:X}, 0x{byte:02X}")),
        Opcode::SkipIfNotEqualByte => ("SNE", format!("V{x:X}, 0x{byte:02X}")),
        Opcode::SkipIfEqualRegister => ("SE", format!("V{x:X}, V{y:X}")),
        Opcode::LoadByte => ("LD", format!("V{x:X}, 0x{byte:02X}")),
        Opcode::AddByte => ("ADD", format!("V{x:X}, 0x{byte:02X}")),
        Opcode::Move => ("LD", format!("V{x:X}, V{y:X}")),
        Opcode::Or => ("OR", format!("V{x:X}, V{y:X}")),
        Opcode::And => ("AND", format!("V{x:X}, V{y:X}")),
        Opcode::Xor => ("XOR", format!("V{x:X}, V{y:X}")),
        Opcode::AddRegisters => ("ADD", format!("V{x:X}, V{y:X}")),
        Opcode::SubRegisters => ("SUB", format!("V{x:X}, V{y:X}")),
        Opcode::ShiftRight => ("SHR", format!("V{x:X}")),
        Opcode::SubReversed => ("SUBN", format!("V{x:X}, V{y:X}")),
        Opcode::ShiftLeft => ("SHL", format!("V{x:X}")),
        Opcode::SkipIfNotEqualRegister => ("SNE", format!("V{x:X}, V{y:X}")),
        Opcode::SetIndex => ("LD", format!("I, 0x{addr:03X}")),
        Opcode::JumpOffset => ("JP", format!("V0, 0x{addr:03X}")),
        Opcode::RandomAnd => ("RND", format!("V{x:X}, 0x{byte:02X}")),
        Opcode::Draw => ("DRW", format!("V{x:X}, V{y:X}, {nibble}")),
        Opcode::SkipIfKeyPressed => ("SKP", format!("V{x:X}")),
        Opcode::SkipIfKeyNotPressed => ("SKNP", format!("V{x:X}")),
        Opcode::ReadDelayTimer => ("LD", format!("V{x:X}, DT")),
        Opcode::WaitForKey => ("LD", format!("V{x:X}, K")),
        Opcode::SetDelayTimer => ("LD", format!("DT, V{x:X}")),
        Opcode::SetSoundTimer => ("LD", format!("ST, V{x:X}")),
        Opcode::AddToIndex => ("ADD", format!("I, V{x:X}")),
        Opcode::IndexToGlyph => ("LD", format!("F, V{x:X}")),
        Opcode::StoreDecimal => ("LD", format!("B, V{x:X}")),
        Opcode::StoreRegisters => ("LD", format!("[I], V{x:X}")),
        Opcode::LoadRegisters => ("LD", format!("V{x:X}, [I]")),
        Opcode::Noop => (".word", format!("0x{word:04X}")),
    };
    (mnemonic.to_owned(), operands)
}

#[cfg(test)]
mod tests {
    use super::{disassemble_one, disassemble_window};
    use crate::memory::new_memory;

    fn memory_with(addr: usize, words: &[u16]) -> Box<[u8]> {
        let mut memory = new_memory();
        for (i, word) in words.iter().enumerate() {
            let [high, low] = word.to_be_bytes();
            memory[addr + 2 * i] = high;
            memory[addr + 2 * i + 1] = low;
        }
        memory
    }

    #[test]
    fn rows_render_conventional_mnemonics() {
        let memory = memory_with(
            0x200,
            &[0x00E0, 0x6A3F, 0xD125, 0xF533, 0xA2B0, 0x8AB4, 0x8AB9],
        );
        let rows = disassemble_window(0x200, 7, &memory);
        let rendered: Vec<String> = rows.iter().map(ToString::to_string).collect();
        assert_eq!(rendered[0], "200: CLS");
        assert_eq!(rendered[1], "202: LD VA, 0x3F");
        assert_eq!(rendered[2], "204: DRW V1, V2, 5");
        assert_eq!(rendered[3], "206: LD B, V5");
        assert_eq!(rendered[4], "208: LD I, 0x2B0");
        assert_eq!(rendered[5], "20A: ADD VA, VB");
        assert_eq!(rendered[6], "20C: .word 0x8AB9");
    }

    #[test]
    fn fetch_wraps_at_the_top_of_memory() {
        let mut memory = new_memory();
        memory[0xFFF] = 0x00;
        memory[0x000] = 0xE0;
        // The glyph table occupies 0x000, so plant the low byte there
        // explicitly for this case.
        let row = disassemble_one(0xFFF, &memory);
        assert_eq!(row.word, 0x00E0);
        assert_eq!(row.mnemonic, "CLS");
    }
}
