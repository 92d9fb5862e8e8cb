use spirv::{Op, Word};

use super::{Section, SpirvModule};

impl SpirvModule {
    /// Declare a type, reusing an existing declaration with identical
    /// opcode and arguments.
    pub fn def_type(&mut self, op: Op, args: &[Word]) -> Word {
        let key = (op as u32, args.to_vec());
        if let Some(&id) = self.decls.get(&key) {
            return id;
        }

        let result_id = self.allocate_id();
        self.put_op(Section::TypesConstants, op, &[result_id], args);
        self.decls.insert(key, result_id);
        result_id
    }

    /// Declare a type that is never shared with a later unique declaration.
    ///
    /// Interned lookups issued afterwards still resolve to the first
    /// declaration carrying the same structure.
    fn def_type_unique(&mut self, op: Op, args: &[Word]) -> Word {
        let result_id = self.allocate_id();
        self.put_op(Section::TypesConstants, op, &[result_id], args);
        self.decls
            .entry((op as u32, args.to_vec()))
            .or_insert(result_id);
        result_id
    }

    pub fn def_void_type(&mut self) -> Word {
        self.def_type(Op::TypeVoid, &[])
    }

    pub fn def_bool_type(&mut self) -> Word {
        self.def_type(Op::TypeBool, &[])
    }

    pub fn def_int_type(&mut self, width: u32, signed: bool) -> Word {
        self.def_type(Op::TypeInt, &[width, u32::from(signed)])
    }

    pub fn def_float_type(&mut self, width: u32) -> Word {
        self.def_type(Op::TypeFloat, &[width])
    }

    pub fn def_vector_type(&mut self, element_type: Word, element_count: u32) -> Word {
        self.def_type(Op::TypeVector, &[element_type, element_count])
    }

    pub fn def_matrix_type(&mut self, column_type: Word, column_count: u32) -> Word {
        self.def_type(Op::TypeMatrix, &[column_type, column_count])
    }

    /// `length` is the ID of a constant, not a literal.
    pub fn def_array_type(&mut self, element_type: Word, length: Word) -> Word {
        self.def_type(Op::TypeArray, &[element_type, length])
    }

    pub fn def_array_type_unique(&mut self, element_type: Word, length: Word) -> Word {
        self.def_type_unique(Op::TypeArray, &[element_type, length])
    }

    pub fn def_runtime_array_type(&mut self, element_type: Word) -> Word {
        self.def_type(Op::TypeRuntimeArray, &[element_type])
    }

    pub fn def_runtime_array_type_unique(&mut self, element_type: Word) -> Word {
        self.def_type_unique(Op::TypeRuntimeArray, &[element_type])
    }

    pub fn def_function_type(&mut self, return_type: Word, arg_types: &[Word]) -> Word {
        let mut args = Vec::with_capacity(1 + arg_types.len());
        args.push(return_type);
        args.extend_from_slice(arg_types);
        self.def_type(Op::TypeFunction, &args)
    }

    pub fn def_struct_type(&mut self, member_types: &[Word]) -> Word {
        self.def_type(Op::TypeStruct, member_types)
    }

    /// Struct declarations that carry their own decorations (blocks, I/O
    /// structs) need a distinct ID even when the members match.
    pub fn def_struct_type_unique(&mut self, member_types: &[Word]) -> Word {
        self.def_type_unique(Op::TypeStruct, member_types)
    }

    pub fn def_pointer_type(
        &mut self,
        variable_type: Word,
        storage_class: spirv::StorageClass,
    ) -> Word {
        self.def_type(Op::TypePointer, &[storage_class as u32, variable_type])
    }

    pub fn def_sampler_type(&mut self) -> Word {
        self.def_type(Op::TypeSampler, &[])
    }

    pub fn def_image_type(
        &mut self,
        sampled_type: Word,
        dim: spirv::Dim,
        depth: u32,
        arrayed: bool,
        multisample: bool,
        sampled: u32,
        format: spirv::ImageFormat,
    ) -> Word {
        self.def_type(
            Op::TypeImage,
            &[
                sampled_type,
                dim as u32,
                depth,
                u32::from(arrayed),
                u32::from(multisample),
                sampled,
                format as u32,
            ],
        )
    }

    pub fn def_sampled_image_type(&mut self, image_type: Word) -> Word {
        self.def_type(Op::TypeSampledImage, &[image_type])
    }
}
