// Function bodies and structured control flow.
//
// The builder tracks which block is open only so callers can ask for it; it
// never rejects an instruction because of the current state.

use spirv::{Op, Word};

use super::{PhiLabel, Section, SpirvModule, SwitchCaseLabel};

/// Position of the emitter relative to function and block boundaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FunctionState {
    #[default]
    OutsideFunction,
    InFunction { block: Option<Word> },
}

impl FunctionState {
    #[must_use]
    pub fn block(self) -> Option<Word> {
        match self {
            Self::OutsideFunction => None,
            Self::InFunction { block } => block,
        }
    }
}

impl SpirvModule {
    #[must_use]
    pub fn function_state(&self) -> FunctionState {
        self.state
    }

    /// Label of the open block, or 0 between a terminator and the next label.
    #[must_use]
    pub fn block_id(&self) -> Word {
        self.state.block().unwrap_or(0)
    }

    /// Current write position in the function-body section.
    #[must_use]
    pub fn insertion_ptr(&self) -> usize {
        self.section(Section::Functions).insertion_ptr()
    }

    /// Redirect function-body emission to a position saved earlier with
    /// [`insertion_ptr`](Self::insertion_ptr).
    pub fn begin_insertion(&mut self, ptr: usize) {
        self.code_mut(Section::Functions).begin_insertion(ptr);
    }

    pub fn end_insertion(&mut self) {
        self.code_mut(Section::Functions).end_insertion();
    }

    pub fn function_begin(
        &mut self,
        return_type: Word,
        function_id: Word,
        function_type: Word,
        control: spirv::FunctionControl,
    ) {
        if self.state != FunctionState::OutsideFunction {
            tracing::debug!("function {function_id} begins inside another function");
        }

        self.put_op(
            Section::Functions,
            Op::Function,
            &[return_type, function_id, control.bits(), function_type],
            &[],
        );
        self.state = FunctionState::InFunction { block: None };
    }

    pub fn function_parameter(&mut self, parameter_type: Word) -> Word {
        let id = self.allocate_id();
        self.put_op(
            Section::Functions,
            Op::FunctionParameter,
            &[parameter_type, id],
            &[],
        );
        id
    }

    pub fn function_end(&mut self) {
        if let Some(block) = self.state.block() {
            tracing::debug!("function ends with block {block} still open");
        }

        self.emit_void(Op::FunctionEnd, &[]);
        self.state = FunctionState::OutsideFunction;
    }

    pub fn op_label(&mut self, label_id: Word) {
        match self.state {
            FunctionState::OutsideFunction => {
                tracing::debug!("label {label_id} emitted outside a function");
            }
            FunctionState::InFunction { block: Some(open) } => {
                tracing::debug!("label {label_id} opened while block {open} is unterminated");
            }
            FunctionState::InFunction { block: None } => {}
        }

        self.emit_void(Op::Label, &[label_id]);
        self.state = FunctionState::InFunction {
            block: Some(label_id),
        };
    }

    fn close_block(&mut self) {
        if self.state.block().is_none() {
            tracing::debug!("terminator emitted with no open block");
        }
        if let FunctionState::InFunction { block } = &mut self.state {
            *block = None;
        }
    }

    pub fn op_loop_merge(
        &mut self,
        merge_block: Word,
        continue_target: Word,
        control: spirv::LoopControl,
    ) {
        self.emit_void(
            Op::LoopMerge,
            &[merge_block, continue_target, control.bits()],
        );
    }

    pub fn op_selection_merge(&mut self, merge_block: Word, control: spirv::SelectionControl) {
        self.emit_void(Op::SelectionMerge, &[merge_block, control.bits()]);
    }

    pub fn op_branch(&mut self, label: Word) {
        self.emit_void(Op::Branch, &[label]);
        self.close_block();
    }

    pub fn op_branch_conditional(&mut self, condition: Word, true_label: Word, false_label: Word) {
        self.emit_void(Op::BranchConditional, &[condition, true_label, false_label]);
        self.close_block();
    }

    pub fn op_switch(&mut self, selector: Word, default: Word, cases: &[SwitchCaseLabel]) {
        let targets: Vec<Word> = cases
            .iter()
            .flat_map(|case| [case.literal, case.label_id])
            .collect();
        self.put_op(
            Section::Functions,
            Op::Switch,
            &[selector, default],
            &targets,
        );
        self.close_block();
    }

    pub fn op_phi(&mut self, result_type: Word, sources: &[PhiLabel]) -> Word {
        let pairs: Vec<Word> = sources
            .iter()
            .flat_map(|source| [source.var_id, source.label_id])
            .collect();
        self.emit_value(Op::Phi, result_type, &[], &pairs)
    }

    pub fn op_return(&mut self) {
        self.emit_void(Op::Return, &[]);
        self.close_block();
    }

    pub fn op_function_call(
        &mut self,
        result_type: Word,
        function_id: Word,
        args: &[Word],
    ) -> Word {
        self.emit_value(Op::FunctionCall, result_type, &[function_id], args)
    }

    pub fn op_control_barrier(&mut self, execution: Word, memory: Word, semantics: Word) {
        self.emit_void(Op::ControlBarrier, &[execution, memory, semantics]);
    }

    pub fn op_memory_barrier(&mut self, memory: Word, semantics: Word) {
        self.emit_void(Op::MemoryBarrier, &[memory, semantics]);
    }

    pub fn op_demote_to_helper_invocation(&mut self) {
        self.emit_void(Op::DemoteToHelperInvocation, &[]);
    }

    /// Stream 0 uses the plain `OpEmitVertex`.
    pub fn op_emit_vertex(&mut self, stream: Word) {
        if stream == 0 {
            self.emit_void(Op::EmitVertex, &[]);
        } else {
            self.emit_void(Op::EmitStreamVertex, &[stream]);
        }
    }

    pub fn op_end_primitive(&mut self, stream: Word) {
        if stream == 0 {
            self.emit_void(Op::EndPrimitive, &[]);
        } else {
            self.emit_void(Op::EndStreamPrimitive, &[stream]);
        }
    }

    pub fn op_begin_invocation_interlock(&mut self) {
        self.emit_void(Op::BeginInvocationInterlockEXT, &[]);
    }

    pub fn op_end_invocation_interlock(&mut self) {
        self.emit_void(Op::EndInvocationInterlockEXT, &[]);
    }
}
