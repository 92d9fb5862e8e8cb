//! Test harness for spv-module unit and integration tests
//!
//! Helpers for decoding compiled modules and asserting on the instructions
//! they contain.
//!
//! # Example
//!
//! ```rust
//! use spv_module::test_harness::*;
//! use spv_module::{SpirvModule, spv_version};
//!
//! let mut module = SpirvModule::new(spv_version(1, 3));
//! let f32_type = module.def_float_type(32);
//! module.const_f32(1.0);
//!
//! let code = module.compile();
//! assert_valid_layout(&code);
//!
//! let instructions = module_instructions(&code);
//! assert_eq!(count_opcode(&instructions, spirv::Op::Constant), 1);
//! assert_eq!(filter_by_opcode(&instructions, spirv::Op::TypeFloat)[0].arg(1), f32_type);
//! ```

#![allow(
    clippy::must_use_candidate,
    clippy::manual_assert,
    clippy::missing_panics_doc,
    clippy::uninlined_format_args
)]

use spirv::{Op, Word};

use crate::Result;
use crate::code_buffer::{CodeBuffer, Instruction};
use crate::layout::{HEADER_WORDS, check_layout, is_type_declaration};
use crate::module::{Section, SpirvModule};

/// Decode a little-endian SPIR-V binary
pub fn decode(bytes: &[u8]) -> Result<CodeBuffer> {
    CodeBuffer::from_bytes(bytes)
}

/// Instructions of a compiled module, header skipped
pub fn module_instructions(code: &CodeBuffer) -> Vec<Instruction<'_>> {
    code.iter_at(HEADER_WORDS).collect()
}

/// Instructions currently held by one section of a module
pub fn section_instructions(module: &SpirvModule, section: Section) -> Vec<Instruction<'_>> {
    module.section(section).iter().collect()
}

/// Opcodes of one section, in emission order
pub fn section_ops(module: &SpirvModule, section: Section) -> Vec<Op> {
    module
        .section(section)
        .iter()
        .filter_map(|i| i.op())
        .collect()
}

/// Count instructions with a specific opcode
pub fn count_opcode(instructions: &[Instruction<'_>], op: Op) -> usize {
    instructions.iter().filter(|i| i.op() == Some(op)).count()
}

/// Check if an instruction sequence contains a specific opcode
pub fn has_opcode(instructions: &[Instruction<'_>], op: Op) -> bool {
    instructions.iter().any(|i| i.op() == Some(op))
}

/// Filter instructions by opcode
pub fn filter_by_opcode<'a>(instructions: &[Instruction<'a>], op: Op) -> Vec<Instruction<'a>> {
    instructions
        .iter()
        .filter(|i| i.op() == Some(op))
        .copied()
        .collect()
}

/// Find the instruction declaring `result_id` in a types/constants section,
/// where the result sits at operand 1 for types and operand 2 for constants
pub fn find_declaration<'a>(
    instructions: &[Instruction<'a>],
    result_id: Word,
) -> Option<Instruction<'a>> {
    instructions.iter().copied().find(|i| {
        let index = if i.op().is_some_and(is_type_declaration) {
            1
        } else {
            2
        };
        i.length() > index && i.arg(index) == result_id
    })
}

/// Assert that a compiled module decodes and respects section order
///
/// Panics with the offending instruction listing on failure
pub fn assert_valid_layout(code: &CodeBuffer) {
    if let Err(e) = check_layout(code) {
        panic!(
            "Module layout check failed: {}\n\nInstructions:\n{}",
            e,
            format_instructions(&module_instructions(code))
        );
    }
}

/// Assert that a section holds exactly the given opcodes
pub fn assert_section_ops(module: &SpirvModule, section: Section, expected: &[Op]) {
    let actual = section_ops(module, section);
    if actual != expected {
        panic!(
            "Section {:?} mismatch.\nExpected: {:?}\nActual:   {:?}\n\nInstructions:\n{}",
            section,
            expected,
            actual,
            format_instructions(&section_instructions(module, section))
        );
    }
}

/// Format instructions for display
fn format_instructions(instructions: &[Instruction<'_>]) -> String {
    instructions
        .iter()
        .map(|i| format!("  {:?}", i))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::spv_version;

    #[test]
    fn test_find_declaration_types_and_constants() {
        let mut module = SpirvModule::new(spv_version(1, 3));
        let u32_type = module.def_int_type(32, false);
        let seven = module.const_u32(7);

        let decls = section_instructions(&module, Section::TypesConstants);
        let ty = find_declaration(&decls, u32_type).expect("type");
        assert_eq!(ty.op(), Some(Op::TypeInt));
        let c = find_declaration(&decls, seven).expect("constant");
        assert_eq!(c.op(), Some(Op::Constant));
        assert_eq!(c.arg(3), 7);
    }

    #[test]
    #[should_panic(expected = "Section Capabilities mismatch")]
    fn test_assert_section_ops_panics() {
        let module = SpirvModule::new(spv_version(1, 3));
        assert_section_ops(&module, Section::Capabilities, &[Op::Capability]);
    }

    #[test]
    fn test_decode_compiled_bytes() {
        let mut module = SpirvModule::new(spv_version(1, 3));
        module.enable_capability(spirv::Capability::Shader);
        let bytes = module.encode();
        let code = decode(&bytes).expect("decode");
        assert_valid_layout(&code);
        let instructions = module_instructions(&code);
        assert!(has_opcode(&instructions, Op::Capability));
        assert_eq!(count_opcode(&instructions, Op::ExtInstImport), 1);
    }
}
