#![allow(
    clippy::cast_possible_truncation, // word counts and literals are packed into u32 words
    clippy::cast_possible_wrap, // signed literals are stored as raw two's-complement words
    clippy::cast_sign_loss, // same as above
    clippy::missing_errors_doc, // only late-constant patching and decoding can fail
    clippy::too_many_arguments // emitters mirror the operand list of the instruction they encode
)]

pub mod code_buffer;
pub mod error;
pub mod layout;
pub mod module;

/// Test harness module for writing unit and integration tests.
///
/// This module is only available when running tests or when the
/// `test-harness` feature is enabled.
#[cfg(any(test, feature = "test-harness"))]
pub mod test_harness;

pub use code_buffer::{CodeBuffer, Instruction};
pub use error::{Error, Result};
pub use layout::{Header, check_layout, validate_layout};
pub use module::{
    FunctionState, ImageOperands, MemoryOperands, PhiLabel, Section, SpirvModule,
    SwitchCaseLabel, spv_version,
};
