// SPIR-V module builder.
//
// The module keeps one word buffer per logical-layout section and stitches them
// together in `compile`. Emitters append to whichever section their opcode
// belongs to, so callers may interleave type, global and function-body
// emission freely.

mod annotations;
mod constants;
mod entry;
mod ext;
mod function;
mod image;
mod operands;
mod ops;
mod types;

use std::collections::HashMap;

use spirv::{Op, Word};

use crate::code_buffer::CodeBuffer;

pub use function::FunctionState;
pub use operands::{ImageOperands, MemoryOperands, PhiLabel, SwitchCaseLabel};

/// Encode a SPIR-V version number as it appears in the module header.
#[must_use]
pub const fn spv_version(major: u32, minor: u32) -> u32 {
    (major << 16) | (minor << 8)
}

/// Logical-layout sections, in the order they appear in a compiled module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Section {
    Capabilities,
    Extensions,
    ExtInstImports,
    MemoryModel,
    EntryPoints,
    ExecutionModes,
    Debug,
    Annotations,
    TypesConstants,
    Variables,
    Functions,
}

impl Section {
    pub const COUNT: usize = 11;

    pub const ALL: [Section; Self::COUNT] = [
        Self::Capabilities,
        Self::Extensions,
        Self::ExtInstImports,
        Self::MemoryModel,
        Self::EntryPoints,
        Self::ExecutionModes,
        Self::Debug,
        Self::Annotations,
        Self::TypesConstants,
        Self::Variables,
        Self::Functions,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Interning key: opcode plus every operand word except the result ID.
type DeclKey = (u32, Vec<Word>);

/// Incrementally built SPIR-V module.
///
/// One instance per translation unit. All state (ID counter, dedup index,
/// late constants, interface variables) lives here, so independent modules
/// can be built on independent threads.
#[derive(Debug, Clone)]
pub struct SpirvModule {
    version: u32,
    generator: u32,
    id: Word,
    glsl450: Word,
    state: FunctionState,
    sections: [CodeBuffer; Section::COUNT],
    decls: HashMap<DeclKey, Word>,
    /// Late constant ID → word offset of its declaration in the types section.
    late_consts: HashMap<Word, usize>,
    interface_vars: Vec<Word>,
}

impl SpirvModule {
    /// Create an empty module targeting `version` (see [`spv_version`]).
    ///
    /// The GLSL.std.450 extended instruction set is imported immediately and
    /// takes the first result ID.
    #[must_use]
    pub fn new(version: u32) -> Self {
        let mut module = Self {
            version,
            generator: 0,
            id: 1,
            glsl450: 0,
            state: FunctionState::default(),
            sections: Default::default(),
            decls: HashMap::new(),
            late_consts: HashMap::new(),
            interface_vars: Vec::new(),
        };
        module.import_glsl450();
        module
    }

    /// Set the generator magic written into the header.
    #[must_use]
    pub fn with_generator(mut self, generator: u32) -> Self {
        self.generator = generator;
        self
    }

    #[must_use]
    pub fn version(&self) -> u32 {
        self.version
    }

    /// One past the highest ID allocated so far.
    #[must_use]
    pub fn bound(&self) -> Word {
        self.id
    }

    /// ID of the imported GLSL.std.450 instruction set.
    #[must_use]
    pub fn glsl450_set(&self) -> Word {
        self.glsl450
    }

    /// Interface variables recorded so far, in creation order.
    #[must_use]
    pub fn interface_vars(&self) -> &[Word] {
        &self.interface_vars
    }

    #[must_use]
    pub fn section(&self, section: Section) -> &CodeBuffer {
        &self.sections[section.index()]
    }

    pub fn allocate_id(&mut self) -> Word {
        let id = self.id;
        self.id += 1;
        id
    }

    /// Assemble the header and all sections into one code buffer.
    #[must_use]
    pub fn compile(&self) -> CodeBuffer {
        let mut result = CodeBuffer::new();
        result.put_header(self.version, self.generator, self.id);

        for section in Section::ALL {
            result.append(self.section(section));
        }

        tracing::trace!(
            "assembled module: {} words, bound {}",
            result.dwords(),
            self.id
        );
        result
    }

    /// Assemble the module and serialize it as little-endian bytes.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        self.compile().to_bytes()
    }

    fn code_mut(&mut self, section: Section) -> &mut CodeBuffer {
        &mut self.sections[section.index()]
    }

    fn import_glsl450(&mut self) {
        const NAME: &str = "GLSL.std.450";

        self.glsl450 = self.allocate_id();
        let id = self.glsl450;
        let code = self.code_mut(Section::ExtInstImports);
        code.put_ins(Op::ExtInstImport, 2 + CodeBuffer::str_len(NAME));
        code.put_word(id);
        code.put_str(NAME);
    }

    /// Append `op fixed... trailing...` to a section.
    ///
    /// Every fixed-shape and list-shaped instruction in the builder goes
    /// through here; the word count is derived from the slices.
    fn put_op(&mut self, section: Section, op: Op, fixed: &[Word], trailing: &[Word]) {
        let code = self.code_mut(section);
        code.put_ins(op, 1 + (fixed.len() + trailing.len()) as u32);
        for &word in fixed.iter().chain(trailing) {
            code.put_word(word);
        }
    }

    /// Emit a value-producing instruction into the function-body section:
    /// `op result_type result_id operands... trailing...`.
    fn emit_value(
        &mut self,
        op: Op,
        result_type: Word,
        operands: &[Word],
        trailing: &[Word],
    ) -> Word {
        let result_id = self.allocate_id();
        let code = self.code_mut(Section::Functions);
        code.put_ins(op, 3 + (operands.len() + trailing.len()) as u32);
        code.put_word(result_type);
        code.put_word(result_id);
        for &word in operands.iter().chain(trailing) {
            code.put_word(word);
        }
        result_id
    }

    /// Emit an instruction without a result into the function-body section.
    fn emit_void(&mut self, op: Op, operands: &[Word]) {
        self.put_op(Section::Functions, op, operands, &[]);
    }
}
