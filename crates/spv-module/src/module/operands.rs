// Optional trailing operands controlled by a leading bitmask word.
//
// Each set bit contributes its operand words in ascending bit order. When no
// bit is set the mask word itself is omitted. Each operand struct lists its
// flags in one `fields` table, and both `word_count` and `put` walk that table,
// so the instruction header always agrees with the words actually written.

use spirv::Word;

use crate::code_buffer::CodeBuffer;

/// Incoming block for an `OpPhi`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhiLabel {
    pub var_id: Word,
    pub label_id: Word,
}

/// One `literal → label` target of an `OpSwitch`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwitchCaseLabel {
    pub literal: Word,
    pub label_id: Word,
}

/// Memory access qualifiers for `OpLoad` / `OpStore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryOperands {
    pub flags: spirv::MemoryAccess,
    pub alignment: Word,
    pub make_available: Word,
    pub make_visible: Word,
}

impl Default for MemoryOperands {
    fn default() -> Self {
        Self {
            flags: spirv::MemoryAccess::empty(),
            alignment: 0,
            make_available: 0,
            make_visible: 0,
        }
    }
}

impl MemoryOperands {
    /// Flags that carry an operand, lowest bit first.
    fn fields(&self) -> [(spirv::MemoryAccess, Word); 3] {
        use spirv::MemoryAccess as Flag;

        [
            (Flag::ALIGNED, self.alignment),
            (Flag::MAKE_POINTER_AVAILABLE, self.make_available),
            (Flag::MAKE_POINTER_VISIBLE, self.make_visible),
        ]
    }

    fn operand_words(&self) -> impl Iterator<Item = Word> {
        let flags = self.flags;
        self.fields()
            .into_iter()
            .filter(move |(flag, _)| flags.contains(*flag))
            .map(|(_, word)| word)
    }

    /// Words appended after the fixed operands, mask word included.
    #[must_use]
    pub fn word_count(&self) -> u32 {
        if self.flags.is_empty() {
            return 0;
        }
        1 + self.operand_words().count() as u32
    }

    pub(crate) fn put(&self, code: &mut CodeBuffer) {
        if self.flags.is_empty() {
            return;
        }
        code.put_word(self.flags.bits());
        for word in self.operand_words() {
            code.put_word(word);
        }
    }
}

/// Image operands for sampling, fetch, gather, read and write instructions.
///
/// `sparse` does not contribute words; it selects the `OpImageSparse*`
/// variant of the instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageOperands {
    pub flags: spirv::ImageOperands,
    pub lod_bias: Word,
    pub lod: Word,
    pub grad_x: Word,
    pub grad_y: Word,
    pub const_offset: Word,
    pub offset: Word,
    pub const_offsets: Word,
    pub sample_id: Word,
    pub min_lod: Word,
    pub make_available: Word,
    pub make_visible: Word,
    pub sparse: bool,
}

impl Default for ImageOperands {
    fn default() -> Self {
        Self {
            flags: spirv::ImageOperands::empty(),
            lod_bias: 0,
            lod: 0,
            grad_x: 0,
            grad_y: 0,
            const_offset: 0,
            offset: 0,
            const_offsets: 0,
            sample_id: 0,
            min_lod: 0,
            make_available: 0,
            make_visible: 0,
            sparse: false,
        }
    }
}

impl ImageOperands {
    /// Flags that carry operands, lowest bit first. Only the first `width`
    /// words of each entry are emitted.
    fn fields(&self) -> [(spirv::ImageOperands, usize, [Word; 2]); 10] {
        use spirv::ImageOperands as Flag;

        [
            (Flag::BIAS, 1, [self.lod_bias, 0]),
            (Flag::LOD, 1, [self.lod, 0]),
            (Flag::GRAD, 2, [self.grad_x, self.grad_y]),
            (Flag::CONST_OFFSET, 1, [self.const_offset, 0]),
            (Flag::OFFSET, 1, [self.offset, 0]),
            (Flag::CONST_OFFSETS, 1, [self.const_offsets, 0]),
            (Flag::SAMPLE, 1, [self.sample_id, 0]),
            (Flag::MIN_LOD, 1, [self.min_lod, 0]),
            (Flag::MAKE_TEXEL_AVAILABLE, 1, [self.make_available, 0]),
            (Flag::MAKE_TEXEL_VISIBLE, 1, [self.make_visible, 0]),
        ]
    }

    fn operand_words(&self) -> impl Iterator<Item = Word> {
        let flags = self.flags;
        self.fields()
            .into_iter()
            .filter(move |(flag, ..)| flags.contains(*flag))
            .flat_map(|(_, width, words)| words.into_iter().take(width))
    }

    /// Words appended after the fixed operands, mask word included.
    #[must_use]
    pub fn word_count(&self) -> u32 {
        if self.flags.is_empty() {
            return 0;
        }
        1 + self.operand_words().count() as u32
    }

    pub(crate) fn put(&self, code: &mut CodeBuffer) {
        if self.flags.is_empty() {
            return;
        }
        code.put_word(self.flags.bits());
        for word in self.operand_words() {
            code.put_word(word);
        }
    }
}
