/// Number of general-purpose registers (`V0..=VF`).
pub const REGISTER_COUNT: usize = 16;

/// Number of return addresses the call stack can hold.
pub const STACK_DEPTH: usize = 16;

/// General-purpose register identifier.
///
/// `VF` doubles as the flag output for arithmetic, shift, and draw
/// operations; handlers write it after consuming their operand values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Register {
    V0 = 0x0,
    V1 = 0x1,
    V2 = 0x2,
    V3 = 0x3,
    V4 = 0x4,
    V5 = 0x5,
    V6 = 0x6,
    V7 = 0x7,
    V8 = 0x8,
    V9 = 0x9,
    VA = 0xA,
    VB = 0xB,
    VC = 0xC,
    VD = 0xD,
    VE = 0xE,
    VF = 0xF,
}

impl Register {
    /// Ordered list of all general-purpose registers.
    pub const ALL: [Self; REGISTER_COUNT] = [
        Self::V0,
        Self::V1,
        Self::V2,
        Self::V3,
        Self::V4,
        Self::V5,
        Self::V6,
        Self::V7,
        Self::V8,
        Self::V9,
        Self::VA,
        Self::VB,
        Self::VC,
        Self::VD,
        Self::VE,
        Self::VF,
    ];

    /// Returns the array index for this register (`0..=15`).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Decodes a 4-bit register field into a register.
    ///
    /// Register fields come from instruction-word nibbles, so every value is
    /// a valid register; only the low 4 bits of `bits` participate.
    #[must_use]
    pub const fn from_u4(bits: u8) -> Self {
        Self::ALL[(bits & 0x0F) as usize]
    }
}

/// Architectural register state: general registers, index pointer, program
/// counter, call stack, and the two countdown timers.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Registers {
    v: [u8; REGISTER_COUNT],
    index: u16,
    pc: u16,
    stack: [u16; STACK_DEPTH],
    sp: u8,
    delay_timer: u8,
    sound_timer: u8,
}

impl Default for Registers {
    fn default() -> Self {
        Self {
            v: [0; REGISTER_COUNT],
            index: 0,
            pc: crate::memory::PROGRAM_START,
            stack: [0; STACK_DEPTH],
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
        }
    }
}

impl Registers {
    /// Reads a general-purpose register.
    #[must_use]
    pub const fn v(&self, reg: Register) -> u8 {
        self.v[reg.index()]
    }

    /// Writes a general-purpose register.
    pub const fn set_v(&mut self, reg: Register, value: u8) {
        self.v[reg.index()] = value;
    }

    /// Writes the flag register `VF` as 1 or 0.
    pub const fn set_flag(&mut self, raised: bool) {
        self.v[Register::VF.index()] = if raised { 1 } else { 0 };
    }

    /// Reads the index register.
    #[must_use]
    pub const fn index(&self) -> u16 {
        self.index
    }

    /// Writes the index register.
    pub const fn set_index(&mut self, value: u16) {
        self.index = value;
    }

    /// Reads the program counter.
    #[must_use]
    pub const fn pc(&self) -> u16 {
        self.pc
    }

    /// Writes the program counter.
    pub const fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    /// Advances the program counter past the next instruction word, as skip
    /// instructions do.
    pub const fn skip_next(&mut self) {
        self.pc = self.pc.wrapping_add(2);
    }

    /// Steps the program counter back one instruction word, forcing the
    /// current instruction to re-execute on the next step.
    pub const fn repeat_current(&mut self) {
        self.pc = self.pc.wrapping_sub(2);
    }

    /// Number of return addresses currently on the call stack.
    #[must_use]
    pub const fn stack_depth(&self) -> u8 {
        self.sp
    }

    /// Pushes a return address.
    ///
    /// The stack pointer wraps modulo [`STACK_DEPTH`]: pushing past 16
    /// entries deterministically overwrites the oldest frame instead of
    /// failing.
    pub const fn push(&mut self, address: u16) {
        self.stack[(self.sp as usize) % STACK_DEPTH] = address;
        self.sp = self.sp.wrapping_add(1);
    }

    /// Pops the most recent return address.
    ///
    /// Popping an empty stack wraps the stack pointer to the top slot, the
    /// same modulo policy as [`Registers::push`].
    pub const fn pop(&mut self) -> u16 {
        self.sp = self.sp.wrapping_sub(1);
        self.stack[(self.sp as usize) % STACK_DEPTH]
    }

    /// Reads the delay timer.
    #[must_use]
    pub const fn delay_timer(&self) -> u8 {
        self.delay_timer
    }

    /// Writes the delay timer.
    pub const fn set_delay_timer(&mut self, value: u8) {
        self.delay_timer = value;
    }

    /// Reads the sound timer.
    #[must_use]
    pub const fn sound_timer(&self) -> u8 {
        self.sound_timer
    }

    /// Writes the sound timer.
    pub const fn set_sound_timer(&mut self, value: u8) {
        self.sound_timer = value;
    }

    /// End-of-step timer tick: decrements each timer by exactly 1 when
    /// nonzero. Only the step loop calls this, after the handler returns.
    pub const fn tick_timers(&mut self) {
        if self.delay_timer > 0 {
            self.delay_timer -= 1;
        }
        if self.sound_timer > 0 {
            self.sound_timer -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Register, Registers, REGISTER_COUNT, STACK_DEPTH};
    use crate::memory::PROGRAM_START;

    #[test]
    fn register_count_and_decode_match_architecture() {
        assert_eq!(REGISTER_COUNT, 16);

        for bits in 0_u8..=15 {
            assert_eq!(Register::from_u4(bits).index(), usize::from(bits));
        }

        // Only the low nibble participates.
        assert_eq!(Register::from_u4(0x1A), Register::VA);
    }

    #[test]
    fn register_file_tracks_each_register_independently() {
        let mut regs = Registers::default();

        for (offset, reg) in (0_u8..).zip(Register::ALL.iter().copied()) {
            regs.set_v(reg, 0x40 + offset);
        }

        for (offset, reg) in (0_u8..).zip(Register::ALL.iter().copied()) {
            assert_eq!(regs.v(reg), 0x40 + offset);
        }
    }

    #[test]
    fn program_counter_starts_at_program_base() {
        assert_eq!(Registers::default().pc(), PROGRAM_START);
    }

    #[test]
    fn flag_register_is_vf() {
        let mut regs = Registers::default();
        regs.set_flag(true);
        assert_eq!(regs.v(Register::VF), 1);
        regs.set_flag(false);
        assert_eq!(regs.v(Register::VF), 0);
    }

    #[test]
    fn stack_round_trips_in_lifo_order_to_full_depth() {
        let mut regs = Registers::default();

        for frame in 0..STACK_DEPTH as u16 {
            regs.push(0x200 + frame * 2);
        }
        assert_eq!(regs.stack_depth(), 16);

        for frame in (0..STACK_DEPTH as u16).rev() {
            assert_eq!(regs.pop(), 0x200 + frame * 2);
        }
        assert_eq!(regs.stack_depth(), 0);
    }

    #[test]
    fn stack_pointer_wraps_instead_of_failing() {
        let mut regs = Registers::default();

        for frame in 0..=STACK_DEPTH as u16 {
            regs.push(frame);
        }
        // The 17th push wrapped around to slot 0.
        assert_eq!(regs.stack_depth(), 17);

        // Popping an empty stack is equally deterministic.
        let mut empty = Registers::default();
        let _ = empty.pop();
        assert_eq!(empty.stack_depth(), u8::MAX);
    }

    #[test]
    fn timers_tick_down_independently_and_stop_at_zero() {
        let mut regs = Registers::default();
        regs.set_delay_timer(2);
        regs.set_sound_timer(1);

        regs.tick_timers();
        assert_eq!(regs.delay_timer(), 1);
        assert_eq!(regs.sound_timer(), 0);

        regs.tick_timers();
        regs.tick_timers();
        assert_eq!(regs.delay_timer(), 0);
        assert_eq!(regs.sound_timer(), 0);
    }
}
