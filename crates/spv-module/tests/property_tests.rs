//! Exhaustive operand-mask tests and property-based layout tests.

use proptest::prelude::*;
use spirv::{Op, StorageClass, Word};
use spv_module::test_harness::*;
use spv_module::{ImageOperands, MemoryOperands, Section, SpirvModule, spv_version};

// ── Optional operands ──

/// Image operand flags carrying words, lowest bit first, with the values the
/// tests assign to their fields.
const IMAGE_FIELDS: [(spirv::ImageOperands, &[Word]); 10] = [
    (spirv::ImageOperands::BIAS, &[101]),
    (spirv::ImageOperands::LOD, &[102]),
    (spirv::ImageOperands::GRAD, &[103, 104]),
    (spirv::ImageOperands::CONST_OFFSET, &[105]),
    (spirv::ImageOperands::OFFSET, &[106]),
    (spirv::ImageOperands::CONST_OFFSETS, &[107]),
    (spirv::ImageOperands::SAMPLE, &[108]),
    (spirv::ImageOperands::MIN_LOD, &[109]),
    (spirv::ImageOperands::MAKE_TEXEL_AVAILABLE, &[110]),
    (spirv::ImageOperands::MAKE_TEXEL_VISIBLE, &[111]),
];

const MEMORY_FIELDS: [(spirv::MemoryAccess, Word); 3] = [
    (spirv::MemoryAccess::ALIGNED, 201),
    (spirv::MemoryAccess::MAKE_POINTER_AVAILABLE, 202),
    (spirv::MemoryAccess::MAKE_POINTER_VISIBLE, 203),
];

fn image_operands(flags: spirv::ImageOperands) -> ImageOperands {
    ImageOperands {
        flags,
        lod_bias: 101,
        lod: 102,
        grad_x: 103,
        grad_y: 104,
        const_offset: 105,
        offset: 106,
        const_offsets: 107,
        sample_id: 108,
        min_lod: 109,
        make_available: 110,
        make_visible: 111,
        sparse: false,
    }
}

fn memory_operands(flags: spirv::MemoryAccess) -> MemoryOperands {
    MemoryOperands {
        flags,
        alignment: 201,
        make_available: 202,
        make_visible: 203,
    }
}

fn expected_image_words(flags: spirv::ImageOperands) -> Vec<Word> {
    if flags.is_empty() {
        return Vec::new();
    }
    let mut words = vec![flags.bits()];
    for (flag, values) in IMAGE_FIELDS {
        if flags.contains(flag) {
            words.extend_from_slice(values);
        }
    }
    words
}

fn expected_memory_words(flags: spirv::MemoryAccess) -> Vec<Word> {
    if flags.is_empty() {
        return Vec::new();
    }
    let mut words = vec![flags.bits()];
    for (flag, value) in MEMORY_FIELDS {
        if flags.contains(flag) {
            words.push(value);
        }
    }
    words
}

#[test]
fn test_image_operands_follow_mask() {
    for bits in 0u32..1024 {
        let flags = spirv::ImageOperands::from_bits_truncate(bits);
        let operands = image_operands(flags);

        let mut m = SpirvModule::new(spv_version(1, 5));
        m.op_image_sample_implicit_lod(1, 2, 3, &operands);

        let body = section_instructions(&m, Section::Functions);
        assert_eq!(body.len(), 1);
        let ins = body[0];
        assert_eq!(ins.op(), Some(Op::ImageSampleImplicitLod));

        let expected = expected_image_words(flags);
        assert_eq!(ins.length(), 5 + expected.len(), "mask {bits:#x}");
        assert_eq!(operands.word_count() as usize, expected.len());
        assert_eq!(&ins.operands()[4..], expected.as_slice(), "mask {bits:#x}");
    }
}

#[test]
fn test_memory_operands_follow_mask() {
    for bits in 0u32..64 {
        let flags = spirv::MemoryAccess::from_bits_truncate(bits);
        let operands = memory_operands(flags);

        let mut m = SpirvModule::new(spv_version(1, 5));
        m.op_load_with(1, 2, &operands);
        m.op_store_with(2, 3, &operands);

        let body = section_instructions(&m, Section::Functions);
        assert_eq!(body.len(), 2);
        let expected = expected_memory_words(flags);

        assert_eq!(body[0].op(), Some(Op::Load));
        assert_eq!(body[0].length(), 4 + expected.len(), "mask {bits:#x}");
        assert_eq!(&body[0].operands()[3..], expected.as_slice());

        assert_eq!(body[1].op(), Some(Op::Store));
        assert_eq!(body[1].length(), 3 + expected.len(), "mask {bits:#x}");
        assert_eq!(&body[1].operands()[2..], expected.as_slice());
    }
}

#[test]
fn test_sparse_flag_only_changes_opcode() {
    for bits in 0u32..1024 {
        let flags = spirv::ImageOperands::from_bits_truncate(bits);
        let dense = image_operands(flags);
        let sparse = ImageOperands {
            sparse: true,
            ..dense
        };

        let mut m = SpirvModule::new(spv_version(1, 5));
        m.op_image_fetch(1, 2, 3, &dense);
        m.op_image_fetch(1, 2, 3, &sparse);

        let body = section_instructions(&m, Section::Functions);
        assert_eq!(body[0].op(), Some(Op::ImageFetch));
        assert_eq!(body[1].op(), Some(Op::ImageSparseFetch));
        assert_eq!(body[0].length(), body[1].length());
        // Result IDs differ, every other operand matches.
        assert_eq!(&body[0].operands()[2..], &body[1].operands()[2..]);
    }
}

// ── Layout ──

/// One emitter call in a randomly interleaved build.
#[derive(Debug, Clone)]
enum Action {
    IntType(bool),
    Vector(u32),
    U32Const(u32),
    F32Const(u16),
    LateConst(u32),
    GlobalVar(usize),
    LocalVar,
    DebugName,
    Decorate(u32),
    Capability(usize),
    Extension,
    Block,
}

const GLOBAL_CLASSES: [StorageClass; 4] = [
    StorageClass::Input,
    StorageClass::Output,
    StorageClass::Private,
    StorageClass::Workgroup,
];

const CAPABILITIES: [spirv::Capability; 3] = [
    spirv::Capability::Shader,
    spirv::Capability::Float64,
    spirv::Capability::Int64,
];

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        any::<bool>().prop_map(Action::IntType),
        (2u32..=4).prop_map(Action::Vector),
        (0u32..16).prop_map(Action::U32Const),
        (0u16..16).prop_map(Action::F32Const),
        any::<u32>().prop_map(Action::LateConst),
        (0..GLOBAL_CLASSES.len()).prop_map(Action::GlobalVar),
        Just(Action::LocalVar),
        Just(Action::DebugName),
        (0u32..8).prop_map(Action::Decorate),
        (0..CAPABILITIES.len()).prop_map(Action::Capability),
        Just(Action::Extension),
        Just(Action::Block),
    ]
}

/// Build a module by applying `actions` inside a single function.
fn build(version: u32, actions: &[Action]) -> SpirvModule {
    let mut m = SpirvModule::new(version);
    m.set_memory_model(spirv::AddressingModel::Logical, spirv::MemoryModel::GLSL450);

    let void = m.def_void_type();
    let fn_type = m.def_function_type(void, &[]);
    let main = m.allocate_id();
    m.function_begin(void, main, fn_type, spirv::FunctionControl::NONE);
    let entry = m.allocate_id();
    m.op_label(entry);

    let mut last_id = main;
    let mut late = Vec::new();
    for action in actions {
        match *action {
            Action::IntType(signed) => last_id = m.def_int_type(32, signed),
            Action::Vector(count) => {
                let f32_type = m.def_float_type(32);
                last_id = m.def_vector_type(f32_type, count);
            }
            Action::U32Const(value) => last_id = m.const_u32(value),
            Action::F32Const(value) => last_id = m.const_f32(f32::from(value)),
            Action::LateConst(value) => {
                let u32_type = m.def_int_type(32, false);
                let id = m.late_const32(u32_type);
                late.push((id, value));
                last_id = id;
            }
            Action::GlobalVar(class) => {
                let storage_class = GLOBAL_CLASSES[class];
                let u32_type = m.def_int_type(32, false);
                let ptr = m.def_pointer_type(u32_type, storage_class);
                last_id = m.new_var(ptr, storage_class);
            }
            Action::LocalVar => {
                let u32_type = m.def_int_type(32, false);
                let ptr = m.def_pointer_type(u32_type, StorageClass::Function);
                last_id = m.new_var(ptr, StorageClass::Function);
            }
            Action::DebugName => m.set_debug_name(last_id, "value"),
            Action::Decorate(location) => m.decorate_location(last_id, location),
            Action::Capability(index) => m.enable_capability(CAPABILITIES[index]),
            Action::Extension => m.enable_extension("SPV_KHR_storage_buffer_storage_class"),
            Action::Block => {
                let next = m.allocate_id();
                m.op_branch(next);
                m.op_label(next);
            }
        }
    }

    for (id, value) in late {
        m.set_late_const(id, &[value]).expect("registered");
    }

    m.op_return();
    m.function_end();
    m.add_entry_point(main, spirv::ExecutionModel::Vertex, "main");
    m
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn test_interleaved_emission_keeps_layout(
        actions in prop::collection::vec(action_strategy(), 0..64),
        post_1_4 in any::<bool>(),
    ) {
        let version = if post_1_4 { spv_version(1, 4) } else { spv_version(1, 3) };
        let m = build(version, &actions);
        let code = m.compile();

        let result = spv_module::check_layout(&code);
        prop_assert!(result.is_ok(), "layout check failed: {:?}", result.err());

        let instructions = module_instructions(&code);
        let globals = actions.iter().filter(|a| matches!(a, Action::GlobalVar(_))).count();
        let locals = actions.iter().filter(|a| matches!(a, Action::LocalVar)).count();
        prop_assert_eq!(count_opcode(&instructions, Op::Variable), globals + locals);
        prop_assert_eq!(count_opcode(&instructions, Op::Function), 1);
    }

    #[test]
    fn test_interleaved_emission_is_deterministic(
        actions in prop::collection::vec(action_strategy(), 0..64),
    ) {
        let a = build(spv_version(1, 3), &actions).encode();
        let b = build(spv_version(1, 3), &actions).encode();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn test_interning_is_idempotent(values in prop::collection::vec(0u32..32, 1..32)) {
        let mut m = SpirvModule::new(spv_version(1, 3));
        let first: Vec<Word> = values.iter().map(|&v| m.const_u32(v)).collect();
        let words = m.section(Section::TypesConstants).dwords();

        let second: Vec<Word> = values.iter().map(|&v| m.const_u32(v)).collect();
        prop_assert_eq!(first, second);
        prop_assert_eq!(m.section(Section::TypesConstants).dwords(), words);
    }
}
