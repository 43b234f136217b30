#![no_main]
use libfuzzer_sys::fuzz_target;

use relasm::{
    Assembler, CaptureSink, Displacement, Immediate, Operand, Register, Scale, ValueSize,
};

fn register(byte: u8) -> Register {
    use Register::*;
    [Eax, Ecx, Edx, Ebx, Esp, Ebp, Esi, Edi][(byte & 7) as usize]
}

fn scale(byte: u8) -> Scale {
    [Scale::Times1, Scale::Times2, Scale::Times4, Scale::Times8][(byte & 3) as usize]
}

fn displacement(bytes: &[u8]) -> Displacement<u32> {
    let value = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    let size = if bytes[4] & 1 == 0 {
        ValueSize::Byte
    } else {
        ValueSize::Dword
    };
    if bytes[5] & 1 == 0 {
        Displacement::new(value, size)
    } else {
        Displacement::with_reference(value, size, u32::from(bytes[5]))
    }
}

fn operand(chunk: &[u8]) -> Option<Operand<u32>> {
    let base = register(chunk[2]);
    let index = register(chunk[3]);
    let disp = displacement(&chunk[4..10]);
    match chunk[1] & 3 {
        0 => Some(Operand::with_base(base)),
        1 => Some(Operand::with_base_disp(base, disp)),
        2 => Operand::with_disp(disp).ok(),
        _ => Operand::with_base_index_disp(base, index, scale(chunk[1] >> 2), disp).ok(),
    }
}

fuzz_target!(|data: &[u8]| {
    // Drive the whole operand/mov surface from raw bytes — constructors may
    // reject shapes (Err), but the public API must never panic.
    let mut asm = Assembler::new(0x1000, CaptureSink::<u32>::new());

    for chunk in data.chunks_exact(10) {
        let reg = register(chunk[0]);
        match chunk[0] >> 3 & 3 {
            0 => asm.mov_reg_reg(reg, register(chunk[2])),
            1 => {
                let value = u32::from_le_bytes([chunk[4], chunk[5], chunk[6], chunk[7]]);
                asm.mov_reg_imm(reg, &Immediate::new(value, ValueSize::Dword));
            }
            2 => {
                if let Some(mem) = operand(chunk) {
                    asm.mov_reg_mem(reg, &mem);
                }
            }
            _ => {
                if let Some(mem) = operand(chunk) {
                    asm.mov_mem_reg(&mem, reg);
                }
            }
        }
    }

    // Sink-observed lengths must always stay within the ISA bounds.
    let sink = asm.into_sink();
    for instr in sink.instructions() {
        assert!(instr.bytes.len() <= 15);
        assert!(instr.references.len() <= 2);
    }
});
