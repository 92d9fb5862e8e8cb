// Image access, query and sampling instructions.
//
// Read, fetch, gather and sample variants switch to their `OpImageSparse*`
// opcode when `ImageOperands::sparse` is set. Sparse variants return a
// residency code and texel struct; the result type is the caller's concern.

use spirv::{Op, Word};

use super::{ImageOperands, Section, SpirvModule};

impl SpirvModule {
    /// `op result_type result fixed... image_operands...`
    fn emit_image_value(
        &mut self,
        op: Op,
        result_type: Word,
        fixed: &[Word],
        operands: &ImageOperands,
    ) -> Word {
        let result_id = self.allocate_id();
        let code = self.code_mut(Section::Functions);
        code.put_ins(op, 3 + fixed.len() as u32 + operands.word_count());
        code.put_word(result_type);
        code.put_word(result_id);
        for &word in fixed {
            code.put_word(word);
        }
        operands.put(code);
        result_id
    }

    fn sparse_or(operands: &ImageOperands, sparse: Op, dense: Op) -> Op {
        if operands.sparse { sparse } else { dense }
    }

    pub fn op_image(&mut self, result_type: Word, sampled_image: Word) -> Word {
        self.emit_value(Op::Image, result_type, &[sampled_image], &[])
    }

    pub fn op_image_read(
        &mut self,
        result_type: Word,
        image: Word,
        coordinates: Word,
        operands: &ImageOperands,
    ) -> Word {
        let op = Self::sparse_or(operands, Op::ImageSparseRead, Op::ImageRead);
        self.emit_image_value(op, result_type, &[image, coordinates], operands)
    }

    pub fn op_image_write(
        &mut self,
        image: Word,
        coordinates: Word,
        texel: Word,
        operands: &ImageOperands,
    ) {
        let code = self.code_mut(Section::Functions);
        code.put_ins(Op::ImageWrite, 4 + operands.word_count());
        code.put_word(image);
        code.put_word(coordinates);
        code.put_word(texel);
        operands.put(code);
    }

    pub fn op_image_sparse_texels_resident(
        &mut self,
        result_type: Word,
        resident_code: Word,
    ) -> Word {
        self.emit_value(
            Op::ImageSparseTexelsResident,
            result_type,
            &[resident_code],
            &[],
        )
    }

    pub fn op_sampled_image(&mut self, result_type: Word, image: Word, sampler: Word) -> Word {
        self.emit_value(Op::SampledImage, result_type, &[image, sampler], &[])
    }

    pub fn op_image_texel_pointer(
        &mut self,
        result_type: Word,
        image: Word,
        coordinates: Word,
        sample: Word,
    ) -> Word {
        self.emit_value(
            Op::ImageTexelPointer,
            result_type,
            &[image, coordinates, sample],
            &[],
        )
    }

    pub fn op_image_query_size_lod(&mut self, result_type: Word, image: Word, lod: Word) -> Word {
        self.emit_value(Op::ImageQuerySizeLod, result_type, &[image, lod], &[])
    }

    pub fn op_image_query_size(&mut self, result_type: Word, image: Word) -> Word {
        self.emit_value(Op::ImageQuerySize, result_type, &[image], &[])
    }

    pub fn op_image_query_levels(&mut self, result_type: Word, image: Word) -> Word {
        self.emit_value(Op::ImageQueryLevels, result_type, &[image], &[])
    }

    pub fn op_image_query_lod(
        &mut self,
        result_type: Word,
        sampled_image: Word,
        coordinates: Word,
    ) -> Word {
        self.emit_value(
            Op::ImageQueryLod,
            result_type,
            &[sampled_image, coordinates],
            &[],
        )
    }

    pub fn op_image_query_samples(&mut self, result_type: Word, image: Word) -> Word {
        self.emit_value(Op::ImageQuerySamples, result_type, &[image], &[])
    }

    pub fn op_image_fetch(
        &mut self,
        result_type: Word,
        image: Word,
        coordinates: Word,
        operands: &ImageOperands,
    ) -> Word {
        let op = Self::sparse_or(operands, Op::ImageSparseFetch, Op::ImageFetch);
        self.emit_image_value(op, result_type, &[image, coordinates], operands)
    }

    pub fn op_image_gather(
        &mut self,
        result_type: Word,
        sampled_image: Word,
        coordinates: Word,
        component: Word,
        operands: &ImageOperands,
    ) -> Word {
        let op = Self::sparse_or(operands, Op::ImageSparseGather, Op::ImageGather);
        self.emit_image_value(
            op,
            result_type,
            &[sampled_image, coordinates, component],
            operands,
        )
    }

    pub fn op_image_dref_gather(
        &mut self,
        result_type: Word,
        sampled_image: Word,
        coordinates: Word,
        reference: Word,
        operands: &ImageOperands,
    ) -> Word {
        let op = Self::sparse_or(operands, Op::ImageSparseDrefGather, Op::ImageDrefGather);
        self.emit_image_value(
            op,
            result_type,
            &[sampled_image, coordinates, reference],
            operands,
        )
    }

    pub fn op_image_sample_implicit_lod(
        &mut self,
        result_type: Word,
        sampled_image: Word,
        coordinates: Word,
        operands: &ImageOperands,
    ) -> Word {
        let op = Self::sparse_or(
            operands,
            Op::ImageSparseSampleImplicitLod,
            Op::ImageSampleImplicitLod,
        );
        self.emit_image_value(op, result_type, &[sampled_image, coordinates], operands)
    }

    pub fn op_image_sample_explicit_lod(
        &mut self,
        result_type: Word,
        sampled_image: Word,
        coordinates: Word,
        operands: &ImageOperands,
    ) -> Word {
        let op = Self::sparse_or(
            operands,
            Op::ImageSparseSampleExplicitLod,
            Op::ImageSampleExplicitLod,
        );
        self.emit_image_value(op, result_type, &[sampled_image, coordinates], operands)
    }

    pub fn op_image_sample_proj_implicit_lod(
        &mut self,
        result_type: Word,
        sampled_image: Word,
        coordinates: Word,
        operands: &ImageOperands,
    ) -> Word {
        let op = Self::sparse_or(
            operands,
            Op::ImageSparseSampleProjImplicitLod,
            Op::ImageSampleProjImplicitLod,
        );
        self.emit_image_value(op, result_type, &[sampled_image, coordinates], operands)
    }

    pub fn op_image_sample_proj_explicit_lod(
        &mut self,
        result_type: Word,
        sampled_image: Word,
        coordinates: Word,
        operands: &ImageOperands,
    ) -> Word {
        let op = Self::sparse_or(
            operands,
            Op::ImageSparseSampleProjExplicitLod,
            Op::ImageSampleProjExplicitLod,
        );
        self.emit_image_value(op, result_type, &[sampled_image, coordinates], operands)
    }

    pub fn op_image_sample_dref_implicit_lod(
        &mut self,
        result_type: Word,
        sampled_image: Word,
        coordinates: Word,
        reference: Word,
        operands: &ImageOperands,
    ) -> Word {
        let op = Self::sparse_or(
            operands,
            Op::ImageSparseSampleDrefImplicitLod,
            Op::ImageSampleDrefImplicitLod,
        );
        self.emit_image_value(
            op,
            result_type,
            &[sampled_image, coordinates, reference],
            operands,
        )
    }

    pub fn op_image_sample_dref_explicit_lod(
        &mut self,
        result_type: Word,
        sampled_image: Word,
        coordinates: Word,
        reference: Word,
        operands: &ImageOperands,
    ) -> Word {
        let op = Self::sparse_or(
            operands,
            Op::ImageSparseSampleDrefExplicitLod,
            Op::ImageSampleDrefExplicitLod,
        );
        self.emit_image_value(
            op,
            result_type,
            &[sampled_image, coordinates, reference],
            operands,
        )
    }

    pub fn op_image_sample_proj_dref_implicit_lod(
        &mut self,
        result_type: Word,
        sampled_image: Word,
        coordinates: Word,
        reference: Word,
        operands: &ImageOperands,
    ) -> Word {
        let op = Self::sparse_or(
            operands,
            Op::ImageSparseSampleProjDrefImplicitLod,
            Op::ImageSampleProjDrefImplicitLod,
        );
        self.emit_image_value(
            op,
            result_type,
            &[sampled_image, coordinates, reference],
            operands,
        )
    }

    pub fn op_image_sample_proj_dref_explicit_lod(
        &mut self,
        result_type: Word,
        sampled_image: Word,
        coordinates: Word,
        reference: Word,
        operands: &ImageOperands,
    ) -> Word {
        let op = Self::sparse_or(
            operands,
            Op::ImageSparseSampleProjDrefExplicitLod,
            Op::ImageSampleProjDrefExplicitLod,
        );
        self.emit_image_value(
            op,
            result_type,
            &[sampled_image, coordinates, reference],
            operands,
        )
    }
}
