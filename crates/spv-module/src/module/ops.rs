// Core value instructions: memory, atomics, bit manipulation, conversions,
// composites, arithmetic, comparisons and subgroup operations.
//
// All of these land in the function-body section and return the fresh result
// ID, except the store variants.

use spirv::{Op, Word};

use super::{MemoryOperands, Section, SpirvModule};

impl SpirvModule {
    fn unary(&mut self, op: Op, result_type: Word, operand: Word) -> Word {
        self.emit_value(op, result_type, &[operand], &[])
    }

    fn binary(&mut self, op: Op, result_type: Word, a: Word, b: Word) -> Word {
        self.emit_value(op, result_type, &[a, b], &[])
    }

    pub fn op_access_chain(&mut self, result_type: Word, base: Word, indices: &[Word]) -> Word {
        self.emit_value(Op::AccessChain, result_type, &[base], indices)
    }

    pub fn op_array_length(&mut self, result_type: Word, structure: Word, member: u32) -> Word {
        self.binary(Op::ArrayLength, result_type, structure, member)
    }

    pub fn op_any(&mut self, result_type: Word, vector: Word) -> Word {
        self.unary(Op::Any, result_type, vector)
    }

    pub fn op_all(&mut self, result_type: Word, vector: Word) -> Word {
        self.unary(Op::All, result_type, vector)
    }

    pub fn op_atomic_load(
        &mut self,
        result_type: Word,
        pointer: Word,
        scope: Word,
        semantics: Word,
    ) -> Word {
        self.emit_value(
            Op::AtomicLoad,
            result_type,
            &[pointer, scope, semantics],
            &[],
        )
    }

    pub fn op_atomic_store(&mut self, pointer: Word, scope: Word, semantics: Word, value: Word) {
        self.emit_void(Op::AtomicStore, &[pointer, scope, semantics, value]);
    }

    fn atomic_rmw(
        &mut self,
        op: Op,
        result_type: Word,
        pointer: Word,
        scope: Word,
        semantics: Word,
        value: Word,
    ) -> Word {
        self.emit_value(op, result_type, &[pointer, scope, semantics, value], &[])
    }

    pub fn op_atomic_exchange(
        &mut self,
        result_type: Word,
        pointer: Word,
        scope: Word,
        semantics: Word,
        value: Word,
    ) -> Word {
        self.atomic_rmw(
            Op::AtomicExchange,
            result_type,
            pointer,
            scope,
            semantics,
            value,
        )
    }

    pub fn op_atomic_compare_exchange(
        &mut self,
        result_type: Word,
        pointer: Word,
        scope: Word,
        equal: Word,
        unequal: Word,
        value: Word,
        comparator: Word,
    ) -> Word {
        self.emit_value(
            Op::AtomicCompareExchange,
            result_type,
            &[pointer, scope, equal, unequal, value, comparator],
            &[],
        )
    }

    pub fn op_atomic_i_increment(
        &mut self,
        result_type: Word,
        pointer: Word,
        scope: Word,
        semantics: Word,
    ) -> Word {
        self.emit_value(
            Op::AtomicIIncrement,
            result_type,
            &[pointer, scope, semantics],
            &[],
        )
    }

    pub fn op_atomic_i_decrement(
        &mut self,
        result_type: Word,
        pointer: Word,
        scope: Word,
        semantics: Word,
    ) -> Word {
        self.emit_value(
            Op::AtomicIDecrement,
            result_type,
            &[pointer, scope, semantics],
            &[],
        )
    }

    pub fn op_atomic_i_add(
        &mut self,
        result_type: Word,
        pointer: Word,
        scope: Word,
        semantics: Word,
        value: Word,
    ) -> Word {
        self.atomic_rmw(
            Op::AtomicIAdd,
            result_type,
            pointer,
            scope,
            semantics,
            value,
        )
    }

    pub fn op_atomic_i_sub(
        &mut self,
        result_type: Word,
        pointer: Word,
        scope: Word,
        semantics: Word,
        value: Word,
    ) -> Word {
        self.atomic_rmw(
            Op::AtomicISub,
            result_type,
            pointer,
            scope,
            semantics,
            value,
        )
    }

    pub fn op_atomic_s_min(
        &mut self,
        result_type: Word,
        pointer: Word,
        scope: Word,
        semantics: Word,
        value: Word,
    ) -> Word {
        self.atomic_rmw(
            Op::AtomicSMin,
            result_type,
            pointer,
            scope,
            semantics,
            value,
        )
    }

    pub fn op_atomic_s_max(
        &mut self,
        result_type: Word,
        pointer: Word,
        scope: Word,
        semantics: Word,
        value: Word,
    ) -> Word {
        self.atomic_rmw(
            Op::AtomicSMax,
            result_type,
            pointer,
            scope,
            semantics,
            value,
        )
    }

    pub fn op_atomic_u_min(
        &mut self,
        result_type: Word,
        pointer: Word,
        scope: Word,
        semantics: Word,
        value: Word,
    ) -> Word {
        self.atomic_rmw(
            Op::AtomicUMin,
            result_type,
            pointer,
            scope,
            semantics,
            value,
        )
    }

    pub fn op_atomic_u_max(
        &mut self,
        result_type: Word,
        pointer: Word,
        scope: Word,
        semantics: Word,
        value: Word,
    ) -> Word {
        self.atomic_rmw(
            Op::AtomicUMax,
            result_type,
            pointer,
            scope,
            semantics,
            value,
        )
    }

    pub fn op_atomic_and(
        &mut self,
        result_type: Word,
        pointer: Word,
        scope: Word,
        semantics: Word,
        value: Word,
    ) -> Word {
        self.atomic_rmw(Op::AtomicAnd, result_type, pointer, scope, semantics, value)
    }

    pub fn op_atomic_or(
        &mut self,
        result_type: Word,
        pointer: Word,
        scope: Word,
        semantics: Word,
        value: Word,
    ) -> Word {
        self.atomic_rmw(Op::AtomicOr, result_type, pointer, scope, semantics, value)
    }

    pub fn op_atomic_xor(
        &mut self,
        result_type: Word,
        pointer: Word,
        scope: Word,
        semantics: Word,
        value: Word,
    ) -> Word {
        self.atomic_rmw(Op::AtomicXor, result_type, pointer, scope, semantics, value)
    }

    // Bit manipulation.

    pub fn op_bitcast(&mut self, result_type: Word, operand: Word) -> Word {
        self.unary(Op::Bitcast, result_type, operand)
    }

    pub fn op_bit_count(&mut self, result_type: Word, operand: Word) -> Word {
        self.unary(Op::BitCount, result_type, operand)
    }

    pub fn op_bit_reverse(&mut self, result_type: Word, operand: Word) -> Word {
        self.unary(Op::BitReverse, result_type, operand)
    }

    pub fn op_bit_field_insert(
        &mut self,
        result_type: Word,
        base: Word,
        insert: Word,
        offset: Word,
        count: Word,
    ) -> Word {
        self.emit_value(
            Op::BitFieldInsert,
            result_type,
            &[base, insert, offset, count],
            &[],
        )
    }

    pub fn op_bit_field_s_extract(
        &mut self,
        result_type: Word,
        base: Word,
        offset: Word,
        count: Word,
    ) -> Word {
        self.emit_value(
            Op::BitFieldSExtract,
            result_type,
            &[base, offset, count],
            &[],
        )
    }

    pub fn op_bit_field_u_extract(
        &mut self,
        result_type: Word,
        base: Word,
        offset: Word,
        count: Word,
    ) -> Word {
        self.emit_value(
            Op::BitFieldUExtract,
            result_type,
            &[base, offset, count],
            &[],
        )
    }

    pub fn op_bitwise_and(&mut self, result_type: Word, a: Word, b: Word) -> Word {
        self.binary(Op::BitwiseAnd, result_type, a, b)
    }

    pub fn op_bitwise_or(&mut self, result_type: Word, a: Word, b: Word) -> Word {
        self.binary(Op::BitwiseOr, result_type, a, b)
    }

    pub fn op_bitwise_xor(&mut self, result_type: Word, a: Word, b: Word) -> Word {
        self.binary(Op::BitwiseXor, result_type, a, b)
    }

    pub fn op_not(&mut self, result_type: Word, operand: Word) -> Word {
        self.unary(Op::Not, result_type, operand)
    }

    pub fn op_shift_left_logical(&mut self, result_type: Word, base: Word, shift: Word) -> Word {
        self.binary(Op::ShiftLeftLogical, result_type, base, shift)
    }

    pub fn op_shift_right_arithmetic(
        &mut self,
        result_type: Word,
        base: Word,
        shift: Word,
    ) -> Word {
        self.binary(Op::ShiftRightArithmetic, result_type, base, shift)
    }

    pub fn op_shift_right_logical(&mut self, result_type: Word, base: Word, shift: Word) -> Word {
        self.binary(Op::ShiftRightLogical, result_type, base, shift)
    }

    // Conversions.

    pub fn op_convert_f_to_s(&mut self, result_type: Word, operand: Word) -> Word {
        self.unary(Op::ConvertFToS, result_type, operand)
    }

    pub fn op_convert_f_to_u(&mut self, result_type: Word, operand: Word) -> Word {
        self.unary(Op::ConvertFToU, result_type, operand)
    }

    pub fn op_convert_s_to_f(&mut self, result_type: Word, operand: Word) -> Word {
        self.unary(Op::ConvertSToF, result_type, operand)
    }

    pub fn op_convert_u_to_f(&mut self, result_type: Word, operand: Word) -> Word {
        self.unary(Op::ConvertUToF, result_type, operand)
    }

    pub fn op_f_convert(&mut self, result_type: Word, operand: Word) -> Word {
        self.unary(Op::FConvert, result_type, operand)
    }

    // Composites.

    pub fn op_composite_construct(&mut self, result_type: Word, constituents: &[Word]) -> Word {
        self.emit_value(Op::CompositeConstruct, result_type, &[], constituents)
    }

    /// `indices` are literal member indices.
    pub fn op_composite_extract(
        &mut self,
        result_type: Word,
        composite: Word,
        indices: &[u32],
    ) -> Word {
        self.emit_value(Op::CompositeExtract, result_type, &[composite], indices)
    }

    pub fn op_composite_insert(
        &mut self,
        result_type: Word,
        object: Word,
        composite: Word,
        indices: &[u32],
    ) -> Word {
        self.emit_value(
            Op::CompositeInsert,
            result_type,
            &[object, composite],
            indices,
        )
    }

    pub fn op_vector_extract_dynamic(
        &mut self,
        result_type: Word,
        vector: Word,
        index: Word,
    ) -> Word {
        self.binary(Op::VectorExtractDynamic, result_type, vector, index)
    }

    pub fn op_vector_shuffle(
        &mut self,
        result_type: Word,
        left: Word,
        right: Word,
        components: &[u32],
    ) -> Word {
        self.emit_value(Op::VectorShuffle, result_type, &[left, right], components)
    }

    // Derivatives.

    pub fn op_dpdx(&mut self, result_type: Word, operand: Word) -> Word {
        self.unary(Op::DPdx, result_type, operand)
    }

    pub fn op_dpdy(&mut self, result_type: Word, operand: Word) -> Word {
        self.unary(Op::DPdy, result_type, operand)
    }

    pub fn op_dpdx_coarse(&mut self, result_type: Word, operand: Word) -> Word {
        self.unary(Op::DPdxCoarse, result_type, operand)
    }

    pub fn op_dpdy_coarse(&mut self, result_type: Word, operand: Word) -> Word {
        self.unary(Op::DPdyCoarse, result_type, operand)
    }

    pub fn op_dpdx_fine(&mut self, result_type: Word, operand: Word) -> Word {
        self.unary(Op::DPdxFine, result_type, operand)
    }

    pub fn op_dpdy_fine(&mut self, result_type: Word, operand: Word) -> Word {
        self.unary(Op::DPdyFine, result_type, operand)
    }

    // Arithmetic.

    pub fn op_s_negate(&mut self, result_type: Word, operand: Word) -> Word {
        self.unary(Op::SNegate, result_type, operand)
    }

    pub fn op_f_negate(&mut self, result_type: Word, operand: Word) -> Word {
        self.unary(Op::FNegate, result_type, operand)
    }

    pub fn op_i_add(&mut self, result_type: Word, a: Word, b: Word) -> Word {
        self.binary(Op::IAdd, result_type, a, b)
    }

    pub fn op_i_sub(&mut self, result_type: Word, a: Word, b: Word) -> Word {
        self.binary(Op::ISub, result_type, a, b)
    }

    pub fn op_f_add(&mut self, result_type: Word, a: Word, b: Word) -> Word {
        self.binary(Op::FAdd, result_type, a, b)
    }

    pub fn op_f_sub(&mut self, result_type: Word, a: Word, b: Word) -> Word {
        self.binary(Op::FSub, result_type, a, b)
    }

    pub fn op_s_div(&mut self, result_type: Word, a: Word, b: Word) -> Word {
        self.binary(Op::SDiv, result_type, a, b)
    }

    pub fn op_u_div(&mut self, result_type: Word, a: Word, b: Word) -> Word {
        self.binary(Op::UDiv, result_type, a, b)
    }

    pub fn op_s_rem(&mut self, result_type: Word, a: Word, b: Word) -> Word {
        self.binary(Op::SRem, result_type, a, b)
    }

    pub fn op_u_mod(&mut self, result_type: Word, a: Word, b: Word) -> Word {
        self.binary(Op::UMod, result_type, a, b)
    }

    pub fn op_f_div(&mut self, result_type: Word, a: Word, b: Word) -> Word {
        self.binary(Op::FDiv, result_type, a, b)
    }

    pub fn op_i_mul(&mut self, result_type: Word, a: Word, b: Word) -> Word {
        self.binary(Op::IMul, result_type, a, b)
    }

    pub fn op_f_mul(&mut self, result_type: Word, a: Word, b: Word) -> Word {
        self.binary(Op::FMul, result_type, a, b)
    }

    pub fn op_vector_times_scalar(
        &mut self,
        result_type: Word,
        vector: Word,
        scalar: Word,
    ) -> Word {
        self.binary(Op::VectorTimesScalar, result_type, vector, scalar)
    }

    pub fn op_matrix_times_matrix(&mut self, result_type: Word, a: Word, b: Word) -> Word {
        self.binary(Op::MatrixTimesMatrix, result_type, a, b)
    }

    pub fn op_matrix_times_vector(
        &mut self,
        result_type: Word,
        matrix: Word,
        vector: Word,
    ) -> Word {
        self.binary(Op::MatrixTimesVector, result_type, matrix, vector)
    }

    pub fn op_vector_times_matrix(
        &mut self,
        result_type: Word,
        vector: Word,
        matrix: Word,
    ) -> Word {
        self.binary(Op::VectorTimesMatrix, result_type, vector, matrix)
    }

    pub fn op_transpose(&mut self, result_type: Word, matrix: Word) -> Word {
        self.unary(Op::Transpose, result_type, matrix)
    }

    pub fn op_dot(&mut self, result_type: Word, a: Word, b: Word) -> Word {
        self.binary(Op::Dot, result_type, a, b)
    }

    // Comparisons.

    pub fn op_i_equal(&mut self, result_type: Word, a: Word, b: Word) -> Word {
        self.binary(Op::IEqual, result_type, a, b)
    }

    pub fn op_i_not_equal(&mut self, result_type: Word, a: Word, b: Word) -> Word {
        self.binary(Op::INotEqual, result_type, a, b)
    }

    pub fn op_s_less_than(&mut self, result_type: Word, a: Word, b: Word) -> Word {
        self.binary(Op::SLessThan, result_type, a, b)
    }

    pub fn op_s_less_than_equal(&mut self, result_type: Word, a: Word, b: Word) -> Word {
        self.binary(Op::SLessThanEqual, result_type, a, b)
    }

    pub fn op_s_greater_than(&mut self, result_type: Word, a: Word, b: Word) -> Word {
        self.binary(Op::SGreaterThan, result_type, a, b)
    }

    pub fn op_s_greater_than_equal(&mut self, result_type: Word, a: Word, b: Word) -> Word {
        self.binary(Op::SGreaterThanEqual, result_type, a, b)
    }

    pub fn op_u_less_than(&mut self, result_type: Word, a: Word, b: Word) -> Word {
        self.binary(Op::ULessThan, result_type, a, b)
    }

    pub fn op_u_less_than_equal(&mut self, result_type: Word, a: Word, b: Word) -> Word {
        self.binary(Op::ULessThanEqual, result_type, a, b)
    }

    pub fn op_u_greater_than(&mut self, result_type: Word, a: Word, b: Word) -> Word {
        self.binary(Op::UGreaterThan, result_type, a, b)
    }

    pub fn op_u_greater_than_equal(&mut self, result_type: Word, a: Word, b: Word) -> Word {
        self.binary(Op::UGreaterThanEqual, result_type, a, b)
    }

    pub fn op_f_ord_equal(&mut self, result_type: Word, a: Word, b: Word) -> Word {
        self.binary(Op::FOrdEqual, result_type, a, b)
    }

    pub fn op_f_ord_not_equal(&mut self, result_type: Word, a: Word, b: Word) -> Word {
        self.binary(Op::FOrdNotEqual, result_type, a, b)
    }

    pub fn op_f_ord_less_than(&mut self, result_type: Word, a: Word, b: Word) -> Word {
        self.binary(Op::FOrdLessThan, result_type, a, b)
    }

    pub fn op_f_ord_less_than_equal(&mut self, result_type: Word, a: Word, b: Word) -> Word {
        self.binary(Op::FOrdLessThanEqual, result_type, a, b)
    }

    pub fn op_f_ord_greater_than(&mut self, result_type: Word, a: Word, b: Word) -> Word {
        self.binary(Op::FOrdGreaterThan, result_type, a, b)
    }

    pub fn op_f_ord_greater_than_equal(&mut self, result_type: Word, a: Word, b: Word) -> Word {
        self.binary(Op::FOrdGreaterThanEqual, result_type, a, b)
    }

    pub fn op_logical_equal(&mut self, result_type: Word, a: Word, b: Word) -> Word {
        self.binary(Op::LogicalEqual, result_type, a, b)
    }

    pub fn op_logical_not_equal(&mut self, result_type: Word, a: Word, b: Word) -> Word {
        self.binary(Op::LogicalNotEqual, result_type, a, b)
    }

    pub fn op_logical_and(&mut self, result_type: Word, a: Word, b: Word) -> Word {
        self.binary(Op::LogicalAnd, result_type, a, b)
    }

    pub fn op_logical_or(&mut self, result_type: Word, a: Word, b: Word) -> Word {
        self.binary(Op::LogicalOr, result_type, a, b)
    }

    pub fn op_logical_not(&mut self, result_type: Word, operand: Word) -> Word {
        self.unary(Op::LogicalNot, result_type, operand)
    }

    pub fn op_select(&mut self, result_type: Word, condition: Word, a: Word, b: Word) -> Word {
        self.emit_value(Op::Select, result_type, &[condition, a, b], &[])
    }

    pub fn op_is_nan(&mut self, result_type: Word, operand: Word) -> Word {
        self.unary(Op::IsNan, result_type, operand)
    }

    pub fn op_is_inf(&mut self, result_type: Word, operand: Word) -> Word {
        self.unary(Op::IsInf, result_type, operand)
    }

    // Memory.

    pub fn op_load(&mut self, result_type: Word, pointer: Word) -> Word {
        self.op_load_with(result_type, pointer, &MemoryOperands::default())
    }

    pub fn op_load_with(
        &mut self,
        result_type: Word,
        pointer: Word,
        operands: &MemoryOperands,
    ) -> Word {
        let result_id = self.allocate_id();
        let code = self.code_mut(Section::Functions);
        code.put_ins(Op::Load, 4 + operands.word_count());
        code.put_word(result_type);
        code.put_word(result_id);
        code.put_word(pointer);
        operands.put(code);
        result_id
    }

    pub fn op_store(&mut self, pointer: Word, value: Word) {
        self.op_store_with(pointer, value, &MemoryOperands::default());
    }

    pub fn op_store_with(&mut self, pointer: Word, value: Word, operands: &MemoryOperands) {
        let code = self.code_mut(Section::Functions);
        code.put_ins(Op::Store, 3 + operands.word_count());
        code.put_word(pointer);
        code.put_word(value);
        operands.put(code);
    }

    // Subgroup operations. `execution` is the ID of a scope constant.

    pub fn op_group_non_uniform_ballot(
        &mut self,
        result_type: Word,
        execution: Word,
        predicate: Word,
    ) -> Word {
        self.binary(Op::GroupNonUniformBallot, result_type, execution, predicate)
    }

    pub fn op_group_non_uniform_ballot_bit_count(
        &mut self,
        result_type: Word,
        execution: Word,
        operation: spirv::GroupOperation,
        ballot: Word,
    ) -> Word {
        self.emit_value(
            Op::GroupNonUniformBallotBitCount,
            result_type,
            &[execution, operation as u32, ballot],
            &[],
        )
    }

    pub fn op_group_non_uniform_elect(&mut self, result_type: Word, execution: Word) -> Word {
        self.unary(Op::GroupNonUniformElect, result_type, execution)
    }

    pub fn op_group_non_uniform_broadcast_first(
        &mut self,
        result_type: Word,
        execution: Word,
        value: Word,
    ) -> Word {
        self.binary(
            Op::GroupNonUniformBroadcastFirst,
            result_type,
            execution,
            value,
        )
    }
}
