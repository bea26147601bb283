//! Instruction execution.
//!
//! [`step`] runs one fetch/decode/execute cycle. The program counter is
//! advanced past the fetched word before the handler runs, so control-flow
//! handlers overwrite a PC that already points at the next instruction and
//! [`WaitForKey`](crate::Opcode::WaitForKey) can stall by stepping it back.
//!
//! Flag-producing arithmetic writes VF last, after the result lands in the
//! destination register. When VF is itself an operand or the destination,
//! the flag value wins.

use crate::display::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use crate::encoding::{self, Opcode};
use crate::memory::{glyph_address, wrap_address};
use crate::rng::RandomSource;
use crate::state::{Machine, Register};

/// Runs one machine cycle: fetch the word at PC, advance PC by two,
/// execute, then tick both timers once.
///
/// Total over all inputs. Undefined instruction words execute as a no-op,
/// and every address computation wraps into the 4 KiB space, so stepping
/// arbitrary memory never panics.
pub fn step(machine: &mut Machine, rng: &mut dyn RandomSource) {
    let pc = machine.regs.pc();
    let high = machine.memory[wrap_address(pc)];
    let low = machine.memory[wrap_address(pc.wrapping_add(1))];
    machine.current_instruction = u16::from_be_bytes([high, low]);
    machine.regs.set_pc(pc.wrapping_add(2));

    match encoding::decode(machine.current_instruction) {
        Opcode::ClearScreen => machine.frame_buffer.clear(),
        Opcode::Return => {
            let target = machine.regs.pop();
            machine.regs.set_pc(target);
        }
        Opcode::Jump => exec_jump(machine),
        Opcode::Call => exec_call(machine),
        Opcode::SkipIfEqualByte => exec_skip_eq_byte(machine),
        Opcode::SkipIfNotEqualByte => exec_skip_ne_byte(machine),
        Opcode::SkipIfEqualRegister => exec_skip_eq_register(machine),
        Opcode::LoadByte => exec_load_byte(machine),
        Opcode::AddByte => exec_add_byte(machine),
        Opcode::Move => exec_move(machine),
        Opcode::Or => exec_or(machine),
        Opcode::And => exec_and(machine),
        Opcode::Xor => exec_xor(machine),
        Opcode::AddRegisters => exec_add_registers(machine),
        Opcode::SubRegisters => exec_sub_registers(machine),
        Opcode::ShiftRight => exec_shift_right(machine),
        Opcode::SubReversed => exec_sub_reversed(machine),
        Opcode::ShiftLeft => exec_shift_left(machine),
        Opcode::SkipIfNotEqualRegister => exec_skip_ne_register(machine),
        Opcode::SetIndex => exec_set_index(machine),
        Opcode::JumpOffset => exec_jump_offset(machine),
        Opcode::RandomAnd => exec_random_and(machine, rng),
        Opcode::Draw => exec_draw(machine),
        Opcode::SkipIfKeyPressed => exec_skip_key_pressed(machine),
        Opcode::SkipIfKeyNotPressed => exec_skip_key_not_pressed(machine),
        Opcode::ReadDelayTimer => exec_read_delay_timer(machine),
        Opcode::WaitForKey => exec_wait_for_key(machine),
        Opcode::SetDelayTimer => exec_set_delay_timer(machine),
        Opcode::SetSoundTimer => exec_set_sound_timer(machine),
        Opcode::AddToIndex => exec_add_to_index(machine),
        Opcode::IndexToGlyph => exec_index_to_glyph(machine),
        Opcode::StoreDecimal => exec_store_decimal(machine),
        Opcode::StoreRegisters => exec_store_registers(machine),
        Opcode::LoadRegisters => exec_load_registers(machine),
        Opcode::Noop => {}
    }

    machine.regs.tick_timers();
}

const fn operand_x(machine: &Machine) -> Register {
    Register::from_u4(encoding::field_x(machine.current_instruction))
}

const fn operand_y(machine: &Machine) -> Register {
    Register::from_u4(encoding::field_y(machine.current_instruction))
}

fn exec_jump(machine: &mut Machine) {
    machine
        .regs
        .set_pc(encoding::address(machine.current_instruction));
}

fn exec_call(machine: &mut Machine) {
    let return_address = machine.regs.pc();
    machine.regs.push(return_address);
    machine
        .regs
        .set_pc(encoding::address(machine.current_instruction));
}

fn exec_skip_eq_byte(machine: &mut Machine) {
    let vx = machine.regs.v(operand_x(machine));
    if vx == encoding::low_byte(machine.current_instruction) {
        machine.regs.skip_next();
    }
}

fn exec_skip_ne_byte(machine: &mut Machine) {
    let vx = machine.regs.v(operand_x(machine));
    if vx != encoding::low_byte(machine.current_instruction) {
        machine.regs.skip_next();
    }
}

fn exec_skip_eq_register(machine: &mut Machine) {
    if machine.regs.v(operand_x(machine)) == machine.regs.v(operand_y(machine)) {
        machine.regs.skip_next();
    }
}

fn exec_skip_ne_register(machine: &mut Machine) {
    if machine.regs.v(operand_x(machine)) != machine.regs.v(operand_y(machine)) {
        machine.regs.skip_next();
    }
}

fn exec_load_byte(machine: &mut Machine) {
    let byte = encoding::low_byte(machine.current_instruction);
    machine.regs.set_v(operand_x(machine), byte);
}

fn exec_add_byte(machine: &mut Machine) {
    // Immediate add never touches the flag register.
    let x = operand_x(machine);
    let byte = encoding::low_byte(machine.current_instruction);
    let sum = machine.regs.v(x).wrapping_add(byte);
    machine.regs.set_v(x, sum);
}

fn exec_move(machine: &mut Machine) {
    let vy = machine.regs.v(operand_y(machine));
    machine.regs.set_v(operand_x(machine), vy);
}

fn exec_or(machine: &mut Machine) {
    let x = operand_x(machine);
    let value = machine.regs.v(x) | machine.regs.v(operand_y(machine));
    machine.regs.set_v(x, value);
}

fn exec_and(machine: &mut Machine) {
    let x = operand_x(machine);
    let value = machine.regs.v(x) & machine.regs.v(operand_y(machine));
    machine.regs.set_v(x, value);
}

fn exec_xor(machine: &mut Machine) {
    let x = operand_x(machine);
    let value = machine.regs.v(x) ^ machine.regs.v(operand_y(machine));
    machine.regs.set_v(x, value);
}

fn exec_add_registers(machine: &mut Machine) {
    let x = operand_x(machine);
    let sum =
        u16::from(machine.regs.v(x)) + u16::from(machine.regs.v(operand_y(machine)));
    #[allow(clippy::cast_possible_truncation)]
    machine.regs.set_v(x, sum as u8);
    machine.regs.set_flag(sum > 0xFF);
}

fn exec_sub_registers(machine: &mut Machine) {
    let x = operand_x(machine);
    let vx = machine.regs.v(x);
    let vy = machine.regs.v(operand_y(machine));
    machine.regs.set_v(x, vx.wrapping_sub(vy));
    machine.regs.set_flag(vx > vy);
}

fn exec_sub_reversed(machine: &mut Machine) {
    let x = operand_x(machine);
    let vx = machine.regs.v(x);
    let vy = machine.regs.v(operand_y(machine));
    machine.regs.set_v(x, vy.wrapping_sub(vx));
    machine.regs.set_flag(vy > vx);
}

fn exec_shift_right(machine: &mut Machine) {
    let x = operand_x(machine);
    let vx = machine.regs.v(x);
    machine.regs.set_v(x, vx >> 1);
    machine.regs.set_flag(vx & 0x01 != 0);
}

fn exec_shift_left(machine: &mut Machine) {
    let x = operand_x(machine);
    let vx = machine.regs.v(x);
    machine.regs.set_v(x, vx << 1);
    machine.regs.set_flag(vx & 0x80 != 0);
}

fn exec_set_index(machine: &mut Machine) {
    machine
        .regs
        .set_index(encoding::address(machine.current_instruction));
}

fn exec_jump_offset(machine: &mut Machine) {
    let base = encoding::address(machine.current_instruction);
    let offset = u16::from(machine.regs.v(Register::V0));
    machine.regs.set_pc(base.wrapping_add(offset));
}

fn exec_random_and(machine: &mut Machine, rng: &mut dyn RandomSource) {
    let mask = encoding::low_byte(machine.current_instruction);
    machine
        .regs
        .set_v(operand_x(machine), rng.next_byte() & mask);
}

fn exec_draw(machine: &mut Machine) {
    let word = machine.current_instruction;
    let x = usize::from(machine.regs.v(operand_x(machine))) % DISPLAY_WIDTH;
    let y = usize::from(machine.regs.v(operand_y(machine))) % DISPLAY_HEIGHT;
    let height = usize::from(encoding::low_nibble(word));
    let index = machine.regs.index();

    let mut collided = false;
    for row in 0..height {
        #[allow(clippy::cast_possible_truncation)]
        let sprite_byte = machine.memory[wrap_address(index.wrapping_add(row as u16))];
        for col in 0..8 {
            if sprite_byte & (0x80 >> col) != 0 {
                let linear = (y + row) * DISPLAY_WIDTH + x + col;
                collided |= machine.frame_buffer.xor_pixel(linear);
            }
        }
    }
    machine.regs.set_flag(collided);
}

fn exec_skip_key_pressed(machine: &mut Machine) {
    let key = machine.regs.v(operand_x(machine));
    if machine.keypad.is_pressed(key) {
        machine.regs.skip_next();
    }
}

fn exec_skip_key_not_pressed(machine: &mut Machine) {
    let key = machine.regs.v(operand_x(machine));
    if !machine.keypad.is_pressed(key) {
        machine.regs.skip_next();
    }
}

fn exec_read_delay_timer(machine: &mut Machine) {
    let value = machine.regs.delay_timer();
    machine.regs.set_v(operand_x(machine), value);
}

fn exec_wait_for_key(machine: &mut Machine) {
    match machine.keypad.first_pressed() {
        Some(key) => machine.regs.set_v(operand_x(machine), key),
        // Stall: re-execute this instruction on the next step.
        None => machine.regs.repeat_current(),
    }
}

fn exec_set_delay_timer(machine: &mut Machine) {
    let value = machine.regs.v(operand_x(machine));
    machine.regs.set_delay_timer(value);
}

fn exec_set_sound_timer(machine: &mut Machine) {
    let value = machine.regs.v(operand_x(machine));
    machine.regs.set_sound_timer(value);
}

fn exec_add_to_index(machine: &mut Machine) {
    let vx = u16::from(machine.regs.v(operand_x(machine)));
    let sum = machine.regs.index().wrapping_add(vx);
    machine.regs.set_index(sum);
}

fn exec_index_to_glyph(machine: &mut Machine) {
    let digit = machine.regs.v(operand_x(machine));
    machine.regs.set_index(glyph_address(digit));
}

fn exec_store_decimal(machine: &mut Machine) {
    let value = machine.regs.v(operand_x(machine));
    let index = machine.regs.index();
    machine.memory[wrap_address(index)] = value / 100;
    machine.memory[wrap_address(index.wrapping_add(1))] = (value / 10) % 10;
    machine.memory[wrap_address(index.wrapping_add(2))] = value % 10;
}

fn exec_store_registers(machine: &mut Machine) {
    let last = encoding::field_x(machine.current_instruction);
    let index = machine.regs.index();
    for offset in 0..=last {
        machine.memory[wrap_address(index.wrapping_add(u16::from(offset)))] =
            machine.regs.v(Register::from_u4(offset));
    }
}

fn exec_load_registers(machine: &mut Machine) {
    let last = encoding::field_x(machine.current_instruction);
    let index = machine.regs.index();
    for offset in 0..=last {
        let byte = machine.memory[wrap_address(index.wrapping_add(u16::from(offset)))];
        machine.regs.set_v(Register::from_u4(offset), byte);
    }
}
