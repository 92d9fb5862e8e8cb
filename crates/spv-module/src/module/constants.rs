// Constant declarations.
//
// Constants share the types section and the interning index with types, keyed
// on the result type as well. Late constants bypass the index entirely: their
// literal words change after declaration, so matching against them would hand
// out an ID whose value the caller cannot know yet.

use spirv::{Op, Word};

use super::{Section, SpirvModule};
use crate::{Error, Result};

impl SpirvModule {
    /// Declare a constant, reusing an existing declaration with identical
    /// opcode, type and operand words.
    pub fn def_const(&mut self, op: Op, type_id: Word, args: &[Word]) -> Word {
        let mut key_args = Vec::with_capacity(1 + args.len());
        key_args.push(type_id);
        key_args.extend_from_slice(args);
        let key = (op as u32, key_args);

        if let Some(&id) = self.decls.get(&key) {
            return id;
        }

        let result_id = self.allocate_id();
        self.put_op(Section::TypesConstants, op, &[type_id, result_id], args);
        self.decls.insert(key, result_id);
        result_id
    }

    pub fn const_bool(&mut self, value: bool) -> Word {
        let type_id = self.def_bool_type();
        let op = if value {
            Op::ConstantTrue
        } else {
            Op::ConstantFalse
        };
        self.def_const(op, type_id, &[])
    }

    pub fn const_i32(&mut self, value: i32) -> Word {
        let type_id = self.def_int_type(32, true);
        self.def_const(Op::Constant, type_id, &[value as Word])
    }

    pub fn const_i64(&mut self, value: i64) -> Word {
        let type_id = self.def_int_type(64, true);
        let bits = value as u64;
        self.def_const(Op::Constant, type_id, &[bits as Word, (bits >> 32) as Word])
    }

    pub fn const_u32(&mut self, value: u32) -> Word {
        let type_id = self.def_int_type(32, false);
        self.def_const(Op::Constant, type_id, &[value])
    }

    pub fn const_u64(&mut self, value: u64) -> Word {
        let type_id = self.def_int_type(64, false);
        self.def_const(
            Op::Constant,
            type_id,
            &[value as Word, (value >> 32) as Word],
        )
    }

    pub fn const_f32(&mut self, value: f32) -> Word {
        let type_id = self.def_float_type(32);
        self.def_const(Op::Constant, type_id, &[value.to_bits()])
    }

    pub fn const_f64(&mut self, value: f64) -> Word {
        let type_id = self.def_float_type(64);
        let bits = value.to_bits();
        self.def_const(Op::Constant, type_id, &[bits as Word, (bits >> 32) as Word])
    }

    pub fn const_vec4_i32(&mut self, x: i32, y: i32, z: i32, w: i32) -> Word {
        let args = [
            self.const_i32(x),
            self.const_i32(y),
            self.const_i32(z),
            self.const_i32(w),
        ];
        let scalar = self.def_int_type(32, true);
        let vector = self.def_vector_type(scalar, 4);
        self.const_composite(vector, &args)
    }

    #[allow(clippy::fn_params_excessive_bools)] // one flag per vector lane
    pub fn const_vec4_b32(&mut self, x: bool, y: bool, z: bool, w: bool) -> Word {
        let args = [
            self.const_bool(x),
            self.const_bool(y),
            self.const_bool(z),
            self.const_bool(w),
        ];
        let scalar = self.def_bool_type();
        let vector = self.def_vector_type(scalar, 4);
        self.const_composite(vector, &args)
    }

    pub fn const_vec4_u32(&mut self, x: u32, y: u32, z: u32, w: u32) -> Word {
        let args = [
            self.const_u32(x),
            self.const_u32(y),
            self.const_u32(z),
            self.const_u32(w),
        ];
        let scalar = self.def_int_type(32, false);
        let vector = self.def_vector_type(scalar, 4);
        self.const_composite(vector, &args)
    }

    pub fn const_vec2_f32(&mut self, x: f32, y: f32) -> Word {
        let args = [self.const_f32(x), self.const_f32(y)];
        let scalar = self.def_float_type(32);
        let vector = self.def_vector_type(scalar, 2);
        self.const_composite(vector, &args)
    }

    pub fn const_vec3_f32(&mut self, x: f32, y: f32, z: f32) -> Word {
        let args = [self.const_f32(x), self.const_f32(y), self.const_f32(z)];
        let scalar = self.def_float_type(32);
        let vector = self.def_vector_type(scalar, 3);
        self.const_composite(vector, &args)
    }

    pub fn const_vec4_f32(&mut self, x: f32, y: f32, z: f32, w: f32) -> Word {
        let args = [
            self.const_f32(x),
            self.const_f32(y),
            self.const_f32(z),
            self.const_f32(w),
        ];
        let scalar = self.def_float_type(32);
        let vector = self.def_vector_type(scalar, 4);
        self.const_composite(vector, &args)
    }

    /// `count` copies of a float constant as a vector, or the scalar itself
    /// when `count` is 1.
    pub fn const_f_replicant(&mut self, value: f32, count: u32) -> Word {
        let scalar_value = self.const_f32(value);
        let scalar_type = self.def_float_type(32);
        self.replicate(scalar_value, scalar_type, count)
    }

    pub fn const_b_replicant(&mut self, value: bool, count: u32) -> Word {
        let scalar_value = self.const_bool(value);
        let scalar_type = self.def_bool_type();
        self.replicate(scalar_value, scalar_type, count)
    }

    pub fn const_i_replicant(&mut self, value: i32, count: u32) -> Word {
        let scalar_value = self.const_i32(value);
        let scalar_type = self.def_int_type(32, true);
        self.replicate(scalar_value, scalar_type, count)
    }

    pub fn const_u_replicant(&mut self, value: u32, count: u32) -> Word {
        let scalar_value = self.const_u32(value);
        let scalar_type = self.def_int_type(32, false);
        self.replicate(scalar_value, scalar_type, count)
    }

    fn replicate(&mut self, scalar_value: Word, scalar_type: Word, count: u32) -> Word {
        if count <= 1 {
            return scalar_value;
        }

        let vector = self.def_vector_type(scalar_type, count);
        let args = vec![scalar_value; count as usize];
        self.const_composite(vector, &args)
    }

    pub fn const_composite(&mut self, type_id: Word, constituents: &[Word]) -> Word {
        self.def_const(Op::ConstantComposite, type_id, constituents)
    }

    pub fn const_undef(&mut self, type_id: Word) -> Word {
        self.def_const(Op::Undef, type_id, &[])
    }

    /// Declare a 32-bit constant whose value is filled in later with
    /// [`set_late_const`](Self::set_late_const).
    pub fn late_const32(&mut self, type_id: Word) -> Word {
        let result_id = self.allocate_id();
        let offset = self.section(Section::TypesConstants).dwords();
        self.put_op(
            Section::TypesConstants,
            Op::Constant,
            &[type_id, result_id],
            &[0],
        );
        self.late_consts.insert(result_id, offset);
        result_id
    }

    /// Overwrite the literal words of a late constant in place.
    ///
    /// Only as many words as the declaration holds are consumed; the rest of
    /// `words` is ignored.
    pub fn set_late_const(&mut self, id: Word, words: &[Word]) -> Result<()> {
        let offset = *self
            .late_consts
            .get(&id)
            .ok_or(Error::NotLateConstant(id))?;

        let code = self.code_mut(Section::TypesConstants);
        let length = code.iter_at(offset).next().map_or(0, |ins| ins.length());
        let expected = length.saturating_sub(3);
        if words.len() < expected {
            return Err(Error::LateConstantArity {
                id,
                expected,
                actual: words.len(),
            });
        }

        let current = &code.words()[offset + 3..offset + 3 + expected];
        if current.iter().any(|&w| w != 0) {
            tracing::warn!("overwriting non-zero literal of late constant {id}");
        }

        for (i, &word) in words.iter().take(expected).enumerate() {
            code.set_arg(offset, 3 + i, word);
        }
        Ok(())
    }

    pub fn spec_const_bool(&mut self, value: bool) -> Word {
        let type_id = self.def_bool_type();
        let result_id = self.allocate_id();
        let op = if value {
            Op::SpecConstantTrue
        } else {
            Op::SpecConstantFalse
        };
        self.put_op(Section::TypesConstants, op, &[type_id, result_id], &[]);
        result_id
    }

    pub fn spec_const32(&mut self, type_id: Word, value: u32) -> Word {
        let result_id = self.allocate_id();
        self.put_op(
            Section::TypesConstants,
            Op::SpecConstant,
            &[type_id, result_id],
            &[value],
        );
        result_id
    }
}
