//! The assembler façade: the MOV family, the sink contract, and a bundled
//! recording sink.

use alloc::vec::Vec;

use crate::encoder::{encode_reg_mem, InstructionBuffer, Reference, MOD_REG};
use crate::ir::{Immediate, Operand, Register};

/// Receives each finished instruction.
///
/// The assembler makes one `append_instruction` call per emitted
/// instruction, in emission order. The byte and reference slices are
/// borrowed for the duration of the call only; a sink that needs them
/// longer must copy.
pub trait InstructionSink {
    /// The opaque reference token carried through from operand values.
    type Ref: Copy;

    /// Store `bytes` at the notional address `location`.
    ///
    /// Each entry of `refs` marks where a referenced displacement or
    /// immediate field begins, relative to the start of the instruction,
    /// for later patching.
    fn append_instruction(&mut self, location: u32, bytes: &[u8], refs: &[Reference<Self::Ref>]);
}

/// Emits x86-32 MOV instructions into a sink, tracking the emission
/// address.
///
/// The assembler is strictly synchronous: each `mov_*` call builds one
/// instruction, hands it to the sink, and advances [`location`] by its byte
/// count. Operand invariants are enforced when operands are constructed,
/// so emission itself cannot fail.
///
/// [`location`]: Self::location
///
/// # Examples
///
/// ```
/// use relasm::{Assembler, CaptureSink, Operand, Register};
///
/// let mut asm = Assembler::new(0x1000, CaptureSink::<u32>::new());
/// asm.mov_reg_reg(Register::Ecx, Register::Eax);
/// asm.mov_reg_mem(Register::Edx, &Operand::with_base(Register::Esp));
/// assert_eq!(asm.location(), 0x1005);
///
/// let sink = asm.into_sink();
/// assert_eq!(sink.bytes(), vec![0x8B, 0xC8, 0x8B, 0x14, 0x24]);
/// ```
#[derive(Debug)]
pub struct Assembler<S: InstructionSink> {
    /// Address the next instruction's first byte will occupy.
    location: u32,
    sink: S,
}

impl<S: InstructionSink> Assembler<S> {
    /// Create an assembler emitting at `location` into `sink`.
    pub fn new(location: u32, sink: S) -> Self {
        Self { location, sink }
    }

    /// The address at which the next instruction will be emitted.
    #[must_use]
    pub fn location(&self) -> u32 {
        self.location
    }

    /// Borrow the sink.
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consume the assembler and return the sink.
    #[must_use]
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// `MOV dst, src` between registers. Emits `8B /r`, 2 bytes.
    pub fn mov_reg_reg(&mut self, dst: Register, src: Register) {
        let mut instr = InstructionBuffer::new();

        instr.emit_opcode(0x8B);
        instr.emit_modrm(MOD_REG, dst.code(), src.code());

        self.output(&instr);
    }

    /// `MOV dst, [mem]` — load a register from memory.
    ///
    /// Emits `8B /r` with the full ModR/M encoding, except for the short
    /// `A1 moffs32` form when `dst` is EAX and the operand is
    /// displacement-only.
    pub fn mov_reg_mem(&mut self, dst: Register, src: &Operand<S::Ref>) {
        let mut instr = InstructionBuffer::new();

        match src.displacement_only() {
            Some(disp) if dst == Register::Eax => {
                instr.emit_opcode(0xA1);
                instr.emit_disp32(disp);
            }
            _ => {
                instr.emit_opcode(0x8B);
                encode_reg_mem(dst, src, &mut instr);
            }
        }

        self.output(&instr);
    }

    /// `MOV [mem], src` — store a register to memory.
    ///
    /// Emits `89 /r`, or the short `A3 moffs32` form when `src` is EAX and
    /// the operand is displacement-only.
    pub fn mov_mem_reg(&mut self, dst: &Operand<S::Ref>, src: Register) {
        let mut instr = InstructionBuffer::new();

        match dst.displacement_only() {
            Some(disp) if src == Register::Eax => {
                instr.emit_opcode(0xA3);
                instr.emit_disp32(disp);
            }
            _ => {
                instr.emit_opcode(0x89);
                encode_reg_mem(src, dst, &mut instr);
            }
        }

        self.output(&instr);
    }

    /// `MOV dst, imm` — load an immediate into a register. Emits
    /// `B8+rd imm32`, 5 bytes.
    ///
    /// The immediate field is always 32 bits wide; a `Byte`-tagged value is
    /// emitted zero-extended, as this form has no 8-bit encoding.
    pub fn mov_reg_imm(&mut self, dst: Register, imm: &Immediate<S::Ref>) {
        let mut instr = InstructionBuffer::new();

        instr.emit_opcode(0xB8 | dst.code());
        instr.emit_imm32(imm);

        self.output(&instr);
    }

    /// Hand one finished instruction to the sink and advance the location.
    fn output(&mut self, instr: &InstructionBuffer<S::Ref>) {
        let [first, second] = *instr.references();
        match (first, second) {
            (None, _) => self
                .sink
                .append_instruction(self.location, instr.bytes(), &[]),
            (Some(a), None) => self
                .sink
                .append_instruction(self.location, instr.bytes(), &[a]),
            (Some(a), Some(b)) => {
                self.sink
                    .append_instruction(self.location, instr.bytes(), &[a, b]);
            }
        }
        self.location = self.location.wrapping_add(instr.len() as u32);
    }
}

// ─── CaptureSink ────────────────────────────────────────────────────────

/// One recorded [`InstructionSink::append_instruction`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedInstruction<R> {
    /// The address the instruction was emitted at.
    pub location: u32,
    /// The instruction bytes.
    pub bytes: Vec<u8>,
    /// The reference entries, in emission order.
    pub references: Vec<Reference<R>>,
}

/// An [`InstructionSink`] that records every appended instruction.
///
/// Suitable for tests and for callers that patch references after
/// emission.
#[derive(Debug, Clone)]
pub struct CaptureSink<R> {
    instructions: Vec<CapturedInstruction<R>>,
}

impl<R> CaptureSink<R> {
    /// An empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            instructions: Vec::new(),
        }
    }

    /// The recorded instructions, in emission order.
    #[must_use]
    pub fn instructions(&self) -> &[CapturedInstruction<R>] {
        &self.instructions
    }

    /// All recorded bytes, concatenated in emission order.
    #[must_use]
    pub fn bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for instr in &self.instructions {
            out.extend_from_slice(&instr.bytes);
        }
        out
    }
}

impl<R> Default for CaptureSink<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Copy> InstructionSink for CaptureSink<R> {
    type Ref = R;

    fn append_instruction(&mut self, location: u32, bytes: &[u8], refs: &[Reference<R>]) {
        self.instructions.push(CapturedInstruction {
            location,
            bytes: bytes.to_vec(),
            references: refs.to_vec(),
        });
    }
}
