// Word-level storage for SPIR-V instruction streams.
//
// Every module section is one `CodeBuffer`. Instructions are stored back to back
// as `[(word_count << 16) | opcode, operands...]`, so positions are plain word
// offsets and in-place patches are O(1) index writes.

use spirv::{Op, Word};

use crate::{Error, Result};

/// Largest word count an instruction header can encode.
pub const MAX_WORD_COUNT: u32 = 0xFFFF;

/// Growable 32-bit word buffer with an insertion cursor.
///
/// Words are written at the cursor, which normally sits at the end of the
/// buffer. `begin_insertion` moves it back to a saved position so that
/// declarations can be spliced in front of code emitted earlier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeBuffer {
    code: Vec<Word>,
    ptr: usize,
}

impl CodeBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_words(code: Vec<Word>) -> Self {
        let ptr = code.len();
        Self { code, ptr }
    }

    /// Decode a little-endian byte stream into words.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if !bytes.len().is_multiple_of(4) {
            return Err(Error::Misaligned(bytes.len()));
        }

        let code = bytes
            .chunks_exact(4)
            .map(|chunk| Word::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();
        Ok(Self::from_words(code))
    }

    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.code
    }

    #[must_use]
    pub fn dwords(&self) -> usize {
        self.code.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.code.iter().flat_map(|w| w.to_le_bytes()).collect()
    }

    /// Iterate over the instructions stored in this buffer.
    #[must_use]
    pub fn iter(&self) -> Instructions<'_> {
        self.iter_at(0)
    }

    /// Iterate over instructions starting at a word offset, e.g. past a header.
    #[must_use]
    pub fn iter_at(&self, offset: usize) -> Instructions<'_> {
        Instructions {
            code: &self.code,
            offset,
        }
    }

    pub fn put_word(&mut self, word: Word) {
        if self.ptr == self.code.len() {
            self.code.push(word);
        } else {
            self.code.insert(self.ptr, word);
        }
        self.ptr += 1;
    }

    /// Write an instruction header. `word_count` includes the header word and
    /// must fit in the upper 16 bits.
    pub fn put_ins(&mut self, op: Op, word_count: u32) {
        debug_assert!(
            word_count <= MAX_WORD_COUNT,
            "instruction {op:?} has {word_count} words, limit is {MAX_WORD_COUNT}"
        );
        self.put_word((word_count << 16) | op as u32);
    }

    pub fn put_i32(&mut self, value: i32) {
        self.put_word(value as Word);
    }

    pub fn put_i64(&mut self, value: i64) {
        let bits = value as u64;
        self.put_word(bits as Word);
        self.put_word((bits >> 32) as Word);
    }

    pub fn put_f32(&mut self, value: f32) {
        self.put_word(value.to_bits());
    }

    pub fn put_f64(&mut self, value: f64) {
        let bits = value.to_bits();
        self.put_word(bits as Word);
        self.put_word((bits >> 32) as Word);
    }

    /// Write a NUL-terminated string, zero padded to a word boundary.
    pub fn put_str(&mut self, s: &str) {
        let bytes = s.as_bytes();
        for i in 0..Self::str_len(s) as usize {
            let mut word: Word = 0;
            for j in 0..4 {
                if let Some(&byte) = bytes.get(4 * i + j) {
                    word |= Word::from(byte) << (8 * j);
                }
            }
            self.put_word(word);
        }
    }

    /// Number of words `put_str` writes for `s`, terminator included.
    #[must_use]
    pub fn str_len(s: &str) -> u32 {
        (s.len() as u32 + 4) / 4
    }

    pub fn put_header(&mut self, version: u32, generator: u32, bound: Word) {
        self.put_word(spirv::MAGIC_NUMBER);
        self.put_word(version);
        self.put_word(generator);
        self.put_word(bound);
        self.put_word(0);
    }

    /// Append all words of another buffer at the cursor.
    pub fn append(&mut self, other: &CodeBuffer) {
        let at = self.ptr;
        self.code.splice(at..at, other.code.iter().copied());
        self.ptr += other.code.len();
    }

    /// Overwrite operand `index` of the instruction starting at `offset`.
    ///
    /// Index 0 is the header word.
    pub fn set_arg(&mut self, offset: usize, index: usize, word: Word) {
        self.code[offset + index] = word;
    }

    #[must_use]
    pub fn insertion_ptr(&self) -> usize {
        self.ptr
    }

    pub fn begin_insertion(&mut self, ptr: usize) {
        self.ptr = ptr.min(self.code.len());
    }

    pub fn end_insertion(&mut self) {
        self.ptr = self.code.len();
    }
}

impl<'a> IntoIterator for &'a CodeBuffer {
    type Item = Instruction<'a>;
    type IntoIter = Instructions<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Read-only view of one instruction inside a `CodeBuffer`.
#[derive(Clone, Copy)]
pub struct Instruction<'a> {
    code: &'a [Word],
    offset: usize,
}

impl std::fmt::Debug for Instruction<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.op() {
            Some(op) => write!(f, "@{} {:?} {:?}", self.offset, op, self.operands()),
            None => write!(
                f,
                "@{} op{} {:?}",
                self.offset,
                self.opcode(),
                self.operands()
            ),
        }
    }
}

impl<'a> Instruction<'a> {
    #[must_use]
    pub fn opcode(&self) -> u32 {
        self.code[self.offset] & 0xFFFF
    }

    #[must_use]
    pub fn op(&self) -> Option<Op> {
        Op::from_u32(self.opcode())
    }

    /// Word count including the header word.
    #[must_use]
    pub fn length(&self) -> usize {
        (self.code[self.offset] >> 16) as usize
    }

    #[must_use]
    pub fn arg(&self, index: usize) -> Word {
        self.code[self.offset + index]
    }

    /// Word offset of the header within the owning buffer.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Operand words, header excluded.
    #[must_use]
    pub fn operands(&self) -> &'a [Word] {
        &self.code[self.offset + 1..self.offset + self.length()]
    }
}

/// Iterator over instruction boundaries. Stops at the first header whose word
/// count is zero or runs past the end of the buffer.
pub struct Instructions<'a> {
    code: &'a [Word],
    offset: usize,
}

impl<'a> Iterator for Instructions<'a> {
    type Item = Instruction<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let header = *self.code.get(self.offset)?;
        let length = (header >> 16) as usize;
        if length == 0 || self.offset + length > self.code.len() {
            self.offset = self.code.len();
            return None;
        }

        let ins = Instruction {
            code: self.code,
            offset: self.offset,
        };
        self.offset += length;
        Some(ins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_ins_header_layout() {
        let mut buf = CodeBuffer::new();
        buf.put_ins(Op::TypeInt, 4);
        assert_eq!(buf.words(), &[(4 << 16) | Op::TypeInt as u32]);
    }

    #[test]
    fn test_put_ins_accepts_largest_word_count() {
        let mut buf = CodeBuffer::new();
        buf.put_ins(Op::CompositeConstruct, MAX_WORD_COUNT);
        assert_eq!(buf.words()[0] >> 16, 0xFFFF);
        assert_eq!(buf.words()[0] & 0xFFFF, Op::CompositeConstruct as u32);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "65536 words, limit is 65535")]
    fn test_put_ins_rejects_oversized_word_count() {
        let mut buf = CodeBuffer::new();
        buf.put_ins(Op::AccessChain, MAX_WORD_COUNT + 1);
    }

    #[test]
    fn test_str_len_includes_terminator() {
        assert_eq!(CodeBuffer::str_len(""), 1);
        assert_eq!(CodeBuffer::str_len("abc"), 1);
        assert_eq!(CodeBuffer::str_len("main"), 2);
        assert_eq!(CodeBuffer::str_len("GLSL.std.450"), 4);
    }

    #[test]
    fn test_put_str_packs_little_endian() {
        let mut buf = CodeBuffer::new();
        buf.put_str("main");
        assert_eq!(buf.words(), &[0x6e69_616d, 0]);

        let mut buf = CodeBuffer::new();
        buf.put_str("ab");
        assert_eq!(buf.words(), &[0x0000_6261]);
    }

    #[test]
    fn test_put_wide_values_low_word_first() {
        let mut buf = CodeBuffer::new();
        buf.put_i64(-2);
        buf.put_f64(1.0);
        assert_eq!(buf.words(), &[0xFFFF_FFFE, 0xFFFF_FFFF, 0, 0x3FF0_0000]);
    }

    #[test]
    fn test_iteration_and_patch() {
        let mut buf = CodeBuffer::new();
        buf.put_ins(Op::Capability, 2);
        buf.put_word(1);
        buf.put_ins(Op::Constant, 4);
        buf.put_word(7);
        buf.put_word(8);
        buf.put_word(0);

        let offsets: Vec<usize> = buf.iter().map(|ins| ins.offset()).collect();
        assert_eq!(offsets, vec![0, 2]);

        let constant = buf.iter().nth(1).expect("second instruction");
        assert_eq!(constant.op(), Some(Op::Constant));
        assert_eq!(constant.length(), 4);
        assert_eq!(constant.arg(2), 8);

        buf.set_arg(2, 3, 42);
        let constant = buf.iter().nth(1).expect("second instruction");
        assert_eq!(constant.operands(), &[7, 8, 42]);
    }

    #[test]
    fn test_iteration_stops_on_malformed_header() {
        let buf = CodeBuffer::from_words(vec![(2 << 16) | 17, 1, (9 << 16) | 17, 1]);
        assert_eq!(buf.iter().count(), 1);

        let buf = CodeBuffer::from_words(vec![0, 1, 2]);
        assert_eq!(buf.iter().count(), 0);
    }

    #[test]
    fn test_insertion_splices_before_existing_code() {
        let mut buf = CodeBuffer::new();
        buf.put_word(1);
        let mark = buf.insertion_ptr();
        buf.put_word(4);

        buf.begin_insertion(mark);
        buf.put_word(2);
        buf.put_word(3);
        buf.end_insertion();
        buf.put_word(5);

        assert_eq!(buf.words(), &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_append_respects_cursor() {
        let mut head = CodeBuffer::from_words(vec![1, 4]);
        head.begin_insertion(1);
        head.append(&CodeBuffer::from_words(vec![2, 3]));
        assert_eq!(head.insertion_ptr(), 3);
        head.end_insertion();
        assert_eq!(head.words(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_bytes_roundtrip_and_misalignment() {
        let buf = CodeBuffer::from_words(vec![spirv::MAGIC_NUMBER, 0x0001_0300]);
        let bytes = buf.to_bytes();
        assert_eq!(&bytes[..4], &[0x03, 0x02, 0x23, 0x07]);
        assert_eq!(CodeBuffer::from_bytes(&bytes).expect("decode"), buf);

        assert!(matches!(
            CodeBuffer::from_bytes(&bytes[..7]),
            Err(Error::Misaligned(7))
        ));
    }
}
