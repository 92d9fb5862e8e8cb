// Logical-layout checker for finished modules.
//
// Decodes the header, walks every instruction and assigns it to a layout
// section. Sections must never go backwards. Global variables may interleave
// with type and constant declarations, so those two share one rank.

use spirv::{Op, Word};

use crate::code_buffer::{CodeBuffer, Instruction};
use crate::module::Section;
use crate::{Error, Result};

/// Number of words in the module header.
pub const HEADER_WORDS: usize = 5;

/// Decoded module header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub version: u32,
    pub generator: u32,
    pub bound: Word,
    pub schema: u32,
}

impl Header {
    pub fn parse(words: &[Word]) -> Result<Self> {
        if words.len() < HEADER_WORDS {
            return Err(Error::Truncated);
        }
        if words[0] != spirv::MAGIC_NUMBER {
            return Err(Error::BadMagic(words[0]));
        }

        Ok(Self {
            version: words[1],
            generator: words[2],
            bound: words[3],
            schema: words[4],
        })
    }

    /// `(major, minor)` decoded from the version word.
    #[must_use]
    pub fn version_pair(&self) -> (u32, u32) {
        ((self.version >> 16) & 0xFF, (self.version >> 8) & 0xFF)
    }
}

/// Where one instruction of a module was placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub offset: usize,
    pub opcode: u32,
    pub section: Section,
}

/// Section an opcode belongs to, or `None` for opcodes whose section depends
/// on whether a function has started (`OpVariable`, `OpUndef`) and for debug
/// line markers, which may appear anywhere.
#[must_use]
pub fn section_of(op: Op) -> Option<Section> {
    let section = match op {
        Op::Capability => Section::Capabilities,
        Op::Extension => Section::Extensions,
        Op::ExtInstImport => Section::ExtInstImports,
        Op::MemoryModel => Section::MemoryModel,
        Op::EntryPoint => Section::EntryPoints,
        Op::ExecutionMode | Op::ExecutionModeId => Section::ExecutionModes,
        Op::String
        | Op::SourceExtension
        | Op::Source
        | Op::SourceContinued
        | Op::Name
        | Op::MemberName
        | Op::ModuleProcessed => Section::Debug,
        Op::Decorate
        | Op::MemberDecorate
        | Op::DecorationGroup
        | Op::GroupDecorate
        | Op::GroupMemberDecorate
        | Op::DecorateId => Section::Annotations,
        op if is_type_declaration(op) => Section::TypesConstants,
        Op::ConstantTrue
        | Op::ConstantFalse
        | Op::Constant
        | Op::ConstantComposite
        | Op::ConstantSampler
        | Op::ConstantNull
        | Op::SpecConstantTrue
        | Op::SpecConstantFalse
        | Op::SpecConstant
        | Op::SpecConstantComposite
        | Op::SpecConstantOp => Section::TypesConstants,
        Op::Variable | Op::Undef | Op::Line | Op::NoLine => return None,
        _ => Section::Functions,
    };
    Some(section)
}

/// Whether `op` declares a type. Type declarations carry their result ID in
/// the first operand, every other value-producing instruction in the second.
#[must_use]
pub fn is_type_declaration(op: Op) -> bool {
    matches!(
        op,
        Op::TypeVoid
            | Op::TypeBool
            | Op::TypeInt
            | Op::TypeFloat
            | Op::TypeVector
            | Op::TypeMatrix
            | Op::TypeImage
            | Op::TypeSampler
            | Op::TypeSampledImage
            | Op::TypeArray
            | Op::TypeRuntimeArray
            | Op::TypeStruct
            | Op::TypeOpaque
            | Op::TypePointer
            | Op::TypeFunction
            | Op::TypeEvent
            | Op::TypeDeviceEvent
            | Op::TypeReserveId
            | Op::TypeQueue
            | Op::TypePipe
            | Op::TypeForwardPointer
    )
}

/// Ordering rank; globals share a rank with type declarations.
fn rank(section: Section) -> usize {
    match section {
        Section::Variables => Section::TypesConstants.index(),
        other => other.index(),
    }
}

fn place(ins: &Instruction<'_>, in_function: bool) -> Option<Section> {
    let Some(op) = ins.op() else {
        return Some(Section::Functions);
    };

    match op {
        Op::Line | Op::NoLine => None,
        Op::Variable | Op::Undef if in_function => Some(Section::Functions),
        Op::Variable => Some(Section::Variables),
        Op::Undef => Some(Section::TypesConstants),
        _ => section_of(op),
    }
}

/// Decode a module and assign every instruction to its section.
///
/// Fails on a bad header, an instruction whose word count is zero or runs
/// past the end, or an instruction that appears after a later section has
/// already started.
pub fn check_layout(code: &CodeBuffer) -> Result<(Header, Vec<Placement>)> {
    let words = code.words();
    let header = Header::parse(words)?;

    let mut placements = Vec::new();
    let mut current = Section::Capabilities;
    let mut in_function = false;
    let mut offset = HEADER_WORDS;

    while offset < words.len() {
        let length = (words[offset] >> 16) as usize;
        if length == 0 || offset + length > words.len() {
            return Err(Error::MalformedInstruction { offset });
        }

        let Some(ins) = code.iter_at(offset).next() else {
            return Err(Error::MalformedInstruction { offset });
        };
        if ins.op() == Some(Op::Function) {
            in_function = true;
        }

        if let Some(section) = place(&ins, in_function) {
            if rank(section) < rank(current) {
                return Err(Error::SectionOrder {
                    offset,
                    opcode: ins.opcode(),
                    found: section,
                    after: current,
                });
            }
            current = section;
            placements.push(Placement {
                offset,
                opcode: ins.opcode(),
                section,
            });
        }

        offset += length;
    }

    tracing::trace!("layout ok: {} instructions", placements.len());
    Ok((header, placements))
}

/// Like [`check_layout`] but only reports success or the first violation.
pub fn validate_layout(code: &CodeBuffer) -> Result<()> {
    check_layout(code).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::{SpirvModule, spv_version};

    fn ins(op: Op, operands: &[Word]) -> Vec<Word> {
        let mut words = vec![((1 + operands.len() as u32) << 16) | op as u32];
        words.extend_from_slice(operands);
        words
    }

    fn module_words(body: &[Vec<Word>]) -> CodeBuffer {
        let mut words = vec![spirv::MAGIC_NUMBER, spv_version(1, 3), 0, 100, 0];
        for ins in body {
            words.extend_from_slice(ins);
        }
        CodeBuffer::from_words(words)
    }

    #[test]
    fn test_header_errors() {
        assert!(matches!(
            check_layout(&CodeBuffer::from_words(vec![spirv::MAGIC_NUMBER, 0])),
            Err(Error::Truncated)
        ));
        assert!(matches!(
            check_layout(&CodeBuffer::from_words(vec![0xDEAD_BEEF, 0, 0, 1, 0])),
            Err(Error::BadMagic(0xDEAD_BEEF))
        ));
    }

    #[test]
    fn test_version_pair() {
        let header =
            Header::parse(&[spirv::MAGIC_NUMBER, spv_version(1, 5), 0, 1, 0]).expect("header");
        assert_eq!(header.version_pair(), (1, 5));
    }

    #[test]
    fn test_empty_module_is_valid() {
        let module = SpirvModule::new(spv_version(1, 3));
        let (header, placements) = check_layout(&module.compile()).expect("layout");
        assert_eq!(header.bound, 2);
        assert_eq!(placements.len(), 1);
        assert_eq!(placements[0].section, Section::ExtInstImports);
    }

    #[test]
    fn test_out_of_order_capability() {
        let code = module_words(&[
            ins(Op::MemoryModel, &[0, 1]),
            ins(Op::Capability, &[1]),
        ]);
        assert!(matches!(
            validate_layout(&code),
            Err(Error::SectionOrder {
                offset: 8,
                found: Section::Capabilities,
                after: Section::MemoryModel,
                ..
            })
        ));
    }

    #[test]
    fn test_variables_interleave_with_types_but_not_after_functions() {
        let code = module_words(&[
            ins(Op::TypeFloat, &[1, 32]),
            ins(Op::Variable, &[2, 3, 6]),
            ins(Op::TypeInt, &[4, 32, 0]),
            ins(Op::Function, &[5, 6, 0, 7]),
            ins(Op::Variable, &[2, 8, 7]),
            ins(Op::Undef, &[1, 9]),
            ins(Op::FunctionEnd, &[]),
        ]);
        let (_, placements) = check_layout(&code).expect("layout");
        let sections: Vec<Section> = placements.iter().map(|p| p.section).collect();
        assert_eq!(
            sections,
            vec![
                Section::TypesConstants,
                Section::Variables,
                Section::TypesConstants,
                Section::Functions,
                Section::Functions,
                Section::Functions,
                Section::Functions,
            ]
        );

        let code = module_words(&[
            ins(Op::Function, &[5, 6, 0, 7]),
            ins(Op::FunctionEnd, &[]),
            ins(Op::TypeInt, &[4, 32, 0]),
        ]);
        assert!(matches!(
            validate_layout(&code),
            Err(Error::SectionOrder { found: Section::TypesConstants, .. })
        ));
    }

    #[test]
    fn test_malformed_instruction() {
        let mut code = module_words(&[ins(Op::Capability, &[1])]);
        let mut words = code.words().to_vec();
        words.push((7 << 16) | Op::Capability as u32);
        code = CodeBuffer::from_words(words);
        assert!(matches!(
            validate_layout(&code),
            Err(Error::MalformedInstruction { offset: 7 })
        ));
    }
}
