//! Error types for operand construction.

#[allow(unused_imports)]
use alloc::format;
use core::fmt;

use crate::ir::ValueSize;

/// An invalid operand combination, detected at construction time.
///
/// These are programmer errors. The offending value is never constructed,
/// so no malformed bytes can reach a sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AsmError {
    /// ESP was passed as the index register of a memory operand.
    EspIndex,

    /// A displacement-only operand was given a displacement narrower than
    /// 32 bits.
    DispOnlyWidth {
        /// The rejected width.
        size: ValueSize,
    },
}

impl fmt::Display for AsmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AsmError::EspIndex => {
                write!(f, "ESP cannot be used as an index register")
            }
            AsmError::DispOnlyWidth { size } => {
                write!(
                    f,
                    "a displacement-only operand requires a 32-bit displacement (got {})",
                    size
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for AsmError {}
