//! # relasm — 32-bit x86 instruction assembler with reference tracking
//!
//! `relasm` assembles x86-32 MOV instructions from structured operand
//! descriptions and delivers the encoded bytes to a caller-supplied sink,
//! together with the byte offsets at which external symbolic references
//! appear — so a downstream linker or relocator can patch them.
//!
//! ## Quick Start
//!
//! ```rust
//! use relasm::{Assembler, CaptureSink, Displacement, Operand, Register, ValueSize};
//!
//! let mut asm = Assembler::new(0x1000, CaptureSink::<u32>::new());
//!
//! // MOV ECX, EAX
//! asm.mov_reg_reg(Register::Ecx, Register::Eax);
//! // MOV EAX, [0xDEADBEEF], where the displacement references symbol #7
//! let src = Operand::with_disp(Displacement::with_reference(
//!     0xDEADBEEF,
//!     ValueSize::Dword,
//!     7u32,
//! ))?;
//! asm.mov_reg_mem(Register::Eax, &src);
//!
//! let sink = asm.into_sink();
//! assert_eq!(sink.bytes(), vec![0x8B, 0xC8, 0xA1, 0xEF, 0xBE, 0xAD, 0xDE]);
//! // The referenced displacement starts one byte into the second instruction.
//! assert_eq!(sink.instructions()[1].references[0].offset, 1);
//! # Ok::<(), relasm::AsmError>(())
//! ```
//!
//! ## Features
//!
//! - **Byte-exact encodings** — the ModR/M + SIB special cases (ESP bases,
//!   EBP bases, displacement-only operands, the EAX short forms) are
//!   handled per the ISA encoding rules.
//! - **Reference tracking** — displacements and immediates may carry an
//!   opaque token; the sink learns where each referenced field begins.
//! - **`no_std` + `alloc`** — the encoding core allocates nothing.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
// An instruction encoder intentionally narrows integer widths (u32→u8 for
// displacement bytes) and is written against dense hex literals (0xDEADBEEF,
// 0xB8).  These lints are expected and acceptable in this context.
#![allow(clippy::cast_possible_truncation, clippy::unreadable_literal)]

extern crate alloc;

/// Assembler façade, sink contract, and the bundled recording sink.
pub mod assembler;
/// Instruction buffering and ModR/M + SIB operand encoding.
pub mod encoder;
/// Error types.
pub mod error;
/// Operand model: registers, scales, values, memory operands.
pub mod ir;

// Re-exports
pub use assembler::{Assembler, CaptureSink, CapturedInstruction, InstructionSink};
pub use encoder::Reference;
pub use error::AsmError;
pub use ir::{Displacement, Immediate, Operand, Register, Scale, Value, ValueSize};
