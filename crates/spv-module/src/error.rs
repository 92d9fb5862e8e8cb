use spirv::Word;

use crate::module::Section;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("ID {0} was not declared as a late constant")]
    NotLateConstant(Word),

    #[error("late constant {id} holds {expected} literal words, got {actual}")]
    LateConstantArity {
        id: Word,
        expected: usize,
        actual: usize,
    },

    #[error("binary length {0} is not a multiple of the word size")]
    Misaligned(usize),

    #[error("binary is shorter than the module header")]
    Truncated,

    #[error("bad magic number {0:#010x}")]
    BadMagic(u32),

    #[error("malformed instruction at word offset {offset}")]
    MalformedInstruction { offset: usize },

    #[error("opcode {opcode} at word offset {offset} belongs to {found:?} but follows {after:?}")]
    SectionOrder {
        offset: usize,
        opcode: u32,
        found: Section,
        after: Section,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
