// Debug names and decorations. Neither is deduplicated: every call appends
// exactly the instructions it names.

use spirv::{Decoration, Op, Word};

use super::{Section, SpirvModule};
use crate::code_buffer::CodeBuffer;

impl SpirvModule {
    /// Declare an `OpString` and return its ID.
    pub fn add_debug_string(&mut self, string: &str) -> Word {
        let result_id = self.allocate_id();
        let code = self.code_mut(Section::Debug);
        code.put_ins(Op::String, 2 + CodeBuffer::str_len(string));
        code.put_word(result_id);
        code.put_str(string);
        result_id
    }

    /// Emit `OpSource`. `file` is an `OpString` ID or 0.
    pub fn set_debug_source(
        &mut self,
        language: spirv::SourceLanguage,
        version: u32,
        file: Word,
        source: Option<&str>,
    ) {
        let code = self.code_mut(Section::Debug);
        let source_len = source.map_or(0, CodeBuffer::str_len);
        code.put_ins(Op::Source, 4 + source_len);
        code.put_word(language as u32);
        code.put_word(version);
        code.put_word(file);
        if let Some(source) = source {
            code.put_str(source);
        }
    }

    pub fn set_debug_name(&mut self, id: Word, name: &str) {
        let code = self.code_mut(Section::Debug);
        code.put_ins(Op::Name, 2 + CodeBuffer::str_len(name));
        code.put_word(id);
        code.put_str(name);
    }

    pub fn set_debug_member_name(&mut self, struct_id: Word, member: u32, name: &str) {
        let code = self.code_mut(Section::Debug);
        code.put_ins(Op::MemberName, 3 + CodeBuffer::str_len(name));
        code.put_word(struct_id);
        code.put_word(member);
        code.put_str(name);
    }

    pub fn decorate(&mut self, object: Word, decoration: Decoration) {
        self.put_op(
            Section::Annotations,
            Op::Decorate,
            &[object, decoration as u32],
            &[],
        );
    }

    fn decorate_literal(&mut self, object: Word, decoration: Decoration, value: u32) {
        self.put_op(
            Section::Annotations,
            Op::Decorate,
            &[object, decoration as u32, value],
            &[],
        );
    }

    pub fn decorate_array_stride(&mut self, object: Word, stride: u32) {
        self.decorate_literal(object, Decoration::ArrayStride, stride);
    }

    pub fn decorate_binding(&mut self, object: Word, binding: u32) {
        self.decorate_literal(object, Decoration::Binding, binding);
    }

    pub fn decorate_block(&mut self, object: Word) {
        self.decorate(object, Decoration::Block);
    }

    pub fn decorate_built_in(&mut self, object: Word, built_in: spirv::BuiltIn) {
        self.decorate_literal(object, Decoration::BuiltIn, built_in as u32);
    }

    pub fn decorate_component(&mut self, object: Word, component: u32) {
        self.decorate_literal(object, Decoration::Component, component);
    }

    pub fn decorate_descriptor_set(&mut self, object: Word, set: u32) {
        self.decorate_literal(object, Decoration::DescriptorSet, set);
    }

    pub fn decorate_index(&mut self, object: Word, index: u32) {
        self.decorate_literal(object, Decoration::Index, index);
    }

    pub fn decorate_location(&mut self, object: Word, location: u32) {
        self.decorate_literal(object, Decoration::Location, location);
    }

    pub fn decorate_spec_id(&mut self, object: Word, spec_id: u32) {
        self.decorate_literal(object, Decoration::SpecId, spec_id);
    }

    /// Transform feedback placement. Always emits `Stream`, `XfbBuffer`,
    /// `XfbStride` and `Offset`, in that order.
    pub fn decorate_xfb(
        &mut self,
        object: Word,
        stream: u32,
        buffer: u32,
        offset: u32,
        stride: u32,
    ) {
        self.decorate_literal(object, Decoration::Stream, stream);
        self.decorate_literal(object, Decoration::XfbBuffer, buffer);
        self.decorate_literal(object, Decoration::XfbStride, stride);
        self.decorate_literal(object, Decoration::Offset, offset);
    }

    pub fn member_decorate(&mut self, struct_id: Word, member: u32, decoration: Decoration) {
        self.put_op(
            Section::Annotations,
            Op::MemberDecorate,
            &[struct_id, member, decoration as u32],
            &[],
        );
    }

    fn member_decorate_literal(
        &mut self,
        struct_id: Word,
        member: u32,
        decoration: Decoration,
        value: u32,
    ) {
        self.put_op(
            Section::Annotations,
            Op::MemberDecorate,
            &[struct_id, member, decoration as u32, value],
            &[],
        );
    }

    pub fn member_decorate_built_in(
        &mut self,
        struct_id: Word,
        member: u32,
        built_in: spirv::BuiltIn,
    ) {
        self.member_decorate_literal(struct_id, member, Decoration::BuiltIn, built_in as u32);
    }

    pub fn member_decorate_matrix_stride(&mut self, struct_id: Word, member: u32, stride: u32) {
        self.member_decorate_literal(struct_id, member, Decoration::MatrixStride, stride);
    }

    pub fn member_decorate_offset(&mut self, struct_id: Word, member: u32, offset: u32) {
        self.member_decorate_literal(struct_id, member, Decoration::Offset, offset);
    }
}
