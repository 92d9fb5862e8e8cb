// GLSL.std.450 extended instructions.

use spirv::{GLOp, Op, Word};

use super::SpirvModule;

impl SpirvModule {
    /// Emit `OpExtInst result_type result glsl450 selector operands...`.
    pub fn op_ext_inst(&mut self, result_type: Word, selector: GLOp, operands: &[Word]) -> Word {
        let set = self.glsl450;
        self.emit_value(Op::ExtInst, result_type, &[set, selector as u32], operands)
    }

    pub fn op_find_i_lsb(&mut self, result_type: Word, operand: Word) -> Word {
        self.op_ext_inst(result_type, GLOp::FindILsb, &[operand])
    }

    pub fn op_find_u_msb(&mut self, result_type: Word, operand: Word) -> Word {
        self.op_ext_inst(result_type, GLOp::FindUMsb, &[operand])
    }

    pub fn op_find_s_msb(&mut self, result_type: Word, operand: Word) -> Word {
        self.op_ext_inst(result_type, GLOp::FindSMsb, &[operand])
    }

    pub fn op_s_abs(&mut self, result_type: Word, operand: Word) -> Word {
        self.op_ext_inst(result_type, GLOp::SAbs, &[operand])
    }

    pub fn op_f_abs(&mut self, result_type: Word, operand: Word) -> Word {
        self.op_ext_inst(result_type, GLOp::FAbs, &[operand])
    }

    pub fn op_f_sign(&mut self, result_type: Word, operand: Word) -> Word {
        self.op_ext_inst(result_type, GLOp::FSign, &[operand])
    }

    pub fn op_f_mix(&mut self, result_type: Word, x: Word, y: Word, a: Word) -> Word {
        self.op_ext_inst(result_type, GLOp::FMix, &[x, y, a])
    }

    pub fn op_cross(&mut self, result_type: Word, x: Word, y: Word) -> Word {
        self.op_ext_inst(result_type, GLOp::Cross, &[x, y])
    }

    pub fn op_inverse(&mut self, result_type: Word, matrix: Word) -> Word {
        self.op_ext_inst(result_type, GLOp::MatrixInverse, &[matrix])
    }

    pub fn op_f_fma(&mut self, result_type: Word, a: Word, b: Word, c: Word) -> Word {
        self.op_ext_inst(result_type, GLOp::Fma, &[a, b, c])
    }

    pub fn op_f_max(&mut self, result_type: Word, a: Word, b: Word) -> Word {
        self.op_ext_inst(result_type, GLOp::FMax, &[a, b])
    }

    pub fn op_f_min(&mut self, result_type: Word, a: Word, b: Word) -> Word {
        self.op_ext_inst(result_type, GLOp::FMin, &[a, b])
    }

    /// NaN-aware maximum: a NaN operand yields the other one.
    pub fn op_n_max(&mut self, result_type: Word, a: Word, b: Word) -> Word {
        self.op_ext_inst(result_type, GLOp::NMax, &[a, b])
    }

    pub fn op_n_min(&mut self, result_type: Word, a: Word, b: Word) -> Word {
        self.op_ext_inst(result_type, GLOp::NMin, &[a, b])
    }

    pub fn op_s_max(&mut self, result_type: Word, a: Word, b: Word) -> Word {
        self.op_ext_inst(result_type, GLOp::SMax, &[a, b])
    }

    pub fn op_s_min(&mut self, result_type: Word, a: Word, b: Word) -> Word {
        self.op_ext_inst(result_type, GLOp::SMin, &[a, b])
    }

    pub fn op_u_max(&mut self, result_type: Word, a: Word, b: Word) -> Word {
        self.op_ext_inst(result_type, GLOp::UMax, &[a, b])
    }

    pub fn op_u_min(&mut self, result_type: Word, a: Word, b: Word) -> Word {
        self.op_ext_inst(result_type, GLOp::UMin, &[a, b])
    }

    pub fn op_f_clamp(&mut self, result_type: Word, x: Word, min: Word, max: Word) -> Word {
        self.op_ext_inst(result_type, GLOp::FClamp, &[x, min, max])
    }

    pub fn op_n_clamp(&mut self, result_type: Word, x: Word, min: Word, max: Word) -> Word {
        self.op_ext_inst(result_type, GLOp::NClamp, &[x, min, max])
    }

    pub fn op_sin(&mut self, result_type: Word, operand: Word) -> Word {
        self.op_ext_inst(result_type, GLOp::Sin, &[operand])
    }

    pub fn op_cos(&mut self, result_type: Word, operand: Word) -> Word {
        self.op_ext_inst(result_type, GLOp::Cos, &[operand])
    }

    pub fn op_sqrt(&mut self, result_type: Word, operand: Word) -> Word {
        self.op_ext_inst(result_type, GLOp::Sqrt, &[operand])
    }

    pub fn op_inverse_sqrt(&mut self, result_type: Word, operand: Word) -> Word {
        self.op_ext_inst(result_type, GLOp::InverseSqrt, &[operand])
    }

    pub fn op_normalize(&mut self, result_type: Word, operand: Word) -> Word {
        self.op_ext_inst(result_type, GLOp::Normalize, &[operand])
    }

    pub fn op_reflect(&mut self, result_type: Word, incident: Word, normal: Word) -> Word {
        self.op_ext_inst(result_type, GLOp::Reflect, &[incident, normal])
    }

    pub fn op_length(&mut self, result_type: Word, operand: Word) -> Word {
        self.op_ext_inst(result_type, GLOp::Length, &[operand])
    }

    pub fn op_exp2(&mut self, result_type: Word, operand: Word) -> Word {
        self.op_ext_inst(result_type, GLOp::Exp2, &[operand])
    }

    pub fn op_exp(&mut self, result_type: Word, operand: Word) -> Word {
        self.op_ext_inst(result_type, GLOp::Exp, &[operand])
    }

    pub fn op_log2(&mut self, result_type: Word, operand: Word) -> Word {
        self.op_ext_inst(result_type, GLOp::Log2, &[operand])
    }

    pub fn op_pow(&mut self, result_type: Word, base: Word, exponent: Word) -> Word {
        self.op_ext_inst(result_type, GLOp::Pow, &[base, exponent])
    }

    pub fn op_fract(&mut self, result_type: Word, operand: Word) -> Word {
        self.op_ext_inst(result_type, GLOp::Fract, &[operand])
    }

    pub fn op_ceil(&mut self, result_type: Word, operand: Word) -> Word {
        self.op_ext_inst(result_type, GLOp::Ceil, &[operand])
    }

    pub fn op_floor(&mut self, result_type: Word, operand: Word) -> Word {
        self.op_ext_inst(result_type, GLOp::Floor, &[operand])
    }

    pub fn op_round(&mut self, result_type: Word, operand: Word) -> Word {
        self.op_ext_inst(result_type, GLOp::Round, &[operand])
    }

    pub fn op_round_even(&mut self, result_type: Word, operand: Word) -> Word {
        self.op_ext_inst(result_type, GLOp::RoundEven, &[operand])
    }

    pub fn op_trunc(&mut self, result_type: Word, operand: Word) -> Word {
        self.op_ext_inst(result_type, GLOp::Trunc, &[operand])
    }

    pub fn op_pack_half_2x16(&mut self, result_type: Word, operand: Word) -> Word {
        self.op_ext_inst(result_type, GLOp::PackHalf2x16, &[operand])
    }

    pub fn op_unpack_half_2x16(&mut self, result_type: Word, operand: Word) -> Word {
        self.op_ext_inst(result_type, GLOp::UnpackHalf2x16, &[operand])
    }

    pub fn op_interpolate_at_centroid(&mut self, result_type: Word, interpolant: Word) -> Word {
        self.op_ext_inst(result_type, GLOp::InterpolateAtCentroid, &[interpolant])
    }

    pub fn op_interpolate_at_sample(
        &mut self,
        result_type: Word,
        interpolant: Word,
        sample: Word,
    ) -> Word {
        self.op_ext_inst(
            result_type,
            GLOp::InterpolateAtSample,
            &[interpolant, sample],
        )
    }

    pub fn op_interpolate_at_offset(
        &mut self,
        result_type: Word,
        interpolant: Word,
        offset: Word,
    ) -> Word {
        self.op_ext_inst(
            result_type,
            GLOp::InterpolateAtOffset,
            &[interpolant, offset],
        )
    }
}
