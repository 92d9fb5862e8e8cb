use spirv::{Op, StorageClass, Word};

use super::{Section, SpirvModule, spv_version};
use crate::code_buffer::CodeBuffer;

impl SpirvModule {
    #[must_use]
    pub fn has_capability(&self, capability: spirv::Capability) -> bool {
        self.section(Section::Capabilities)
            .iter()
            .any(|ins| ins.op() == Some(Op::Capability) && ins.arg(1) == capability as u32)
    }

    /// Declare a capability unless it is already declared.
    pub fn enable_capability(&mut self, capability: spirv::Capability) {
        if !self.has_capability(capability) {
            self.put_op(
                Section::Capabilities,
                Op::Capability,
                &[capability as u32],
                &[],
            );
        }
    }

    pub fn enable_extension(&mut self, name: &str) {
        let code = self.code_mut(Section::Extensions);
        code.put_ins(Op::Extension, 1 + CodeBuffer::str_len(name));
        code.put_str(name);
    }

    /// Emit `OpEntryPoint`, listing every interface variable recorded so far.
    pub fn add_entry_point(&mut self, id: Word, model: spirv::ExecutionModel, name: &str) {
        let interface = std::mem::take(&mut self.interface_vars);
        let code = self.code_mut(Section::EntryPoints);
        code.put_ins(
            Op::EntryPoint,
            3 + CodeBuffer::str_len(name) + interface.len() as u32,
        );
        code.put_word(model as u32);
        code.put_word(id);
        code.put_str(name);
        for &var in &interface {
            code.put_word(var);
        }
        self.interface_vars = interface;
    }

    pub fn set_memory_model(
        &mut self,
        addressing: spirv::AddressingModel,
        memory: spirv::MemoryModel,
    ) {
        self.put_op(
            Section::MemoryModel,
            Op::MemoryModel,
            &[addressing as u32, memory as u32],
            &[],
        );
    }

    pub fn set_execution_mode(&mut self, entry_point: Word, mode: spirv::ExecutionMode) {
        self.set_execution_mode_with_args(entry_point, mode, &[]);
    }

    pub fn set_execution_mode_with_args(
        &mut self,
        entry_point: Word,
        mode: spirv::ExecutionMode,
        args: &[Word],
    ) {
        self.put_op(
            Section::ExecutionModes,
            Op::ExecutionMode,
            &[entry_point, mode as u32],
            args,
        );
    }

    pub fn set_invocations(&mut self, entry_point: Word, invocations: u32) {
        self.set_execution_mode_with_args(
            entry_point,
            spirv::ExecutionMode::Invocations,
            &[invocations],
        );
    }

    pub fn set_local_size(&mut self, entry_point: Word, x: u32, y: u32, z: u32) {
        self.set_execution_mode_with_args(entry_point, spirv::ExecutionMode::LocalSize, &[x, y, z]);
    }

    pub fn set_output_vertices(&mut self, entry_point: Word, vertex_count: u32) {
        self.set_execution_mode_with_args(
            entry_point,
            spirv::ExecutionMode::OutputVertices,
            &[vertex_count],
        );
    }

    /// Whether a module-scope variable of this storage class must be listed
    /// on the entry point. SPIR-V 1.4 widened the set from Input/Output to
    /// every global.
    #[must_use]
    pub fn is_interface_var(&self, storage_class: StorageClass) -> bool {
        if self.version < spv_version(1, 4) {
            matches!(storage_class, StorageClass::Input | StorageClass::Output)
        } else {
            storage_class != StorageClass::Function
        }
    }

    pub fn new_var(&mut self, pointer_type: Word, storage_class: StorageClass) -> Word {
        self.declare_var(pointer_type, storage_class, &[])
    }

    pub fn new_var_init(
        &mut self,
        pointer_type: Word,
        storage_class: StorageClass,
        initial_value: Word,
    ) -> Word {
        self.declare_var(pointer_type, storage_class, &[initial_value])
    }

    fn declare_var(
        &mut self,
        pointer_type: Word,
        storage_class: StorageClass,
        init: &[Word],
    ) -> Word {
        let result_id = self.allocate_id();
        if self.is_interface_var(storage_class) {
            self.interface_vars.push(result_id);
        }

        let section = if storage_class == StorageClass::Function {
            Section::Functions
        } else {
            Section::Variables
        };
        self.put_op(
            section,
            Op::Variable,
            &[pointer_type, result_id, storage_class as u32],
            init,
        );
        result_id
    }
}
