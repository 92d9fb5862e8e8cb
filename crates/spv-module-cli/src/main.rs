use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::PathBuf;

use spirv::{
    AddressingModel, BuiltIn, Capability, ExecutionMode, ExecutionModel, FunctionControl,
    MemoryModel, MemorySemantics, StorageClass,
};
use spv_module::{CodeBuffer, SpirvModule, check_layout, spv_version};

#[derive(Parser)]
#[command(name = "spv-module")]
#[command(about = "Incremental SPIR-V module builder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a passthrough shader and write it as a SPIR-V binary
    Demo {
        #[arg(short, long, value_enum, help = "Shader stage to build")]
        stage: Stage,

        #[arg(short, long, help = "Output SPIR-V file")]
        output: PathBuf,

        #[arg(
            long,
            default_value = "1.3",
            value_parser = parse_version,
            help = "Target SPIR-V version as MAJOR.MINOR"
        )]
        spirv_version: u32,
    },

    /// Decode a SPIR-V binary, check its section layout and list it
    Dump {
        #[arg(help = "Input SPIR-V file")]
        input: PathBuf,

        #[arg(long, help = "Print JSON instead of text")]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Stage {
    Vertex,
    Fragment,
    Compute,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Demo {
            stage,
            output,
            spirv_version,
        } => {
            let module = build_demo(stage, spirv_version);
            let encoded = module.encode();
            fs::write(&output, &encoded)
                .with_context(|| format!("Failed to write output to {}", output.display()))?;
            println!(
                "Built {} -> {} ({} bytes, bound {})",
                stage_name(stage),
                output.display(),
                encoded.len(),
                module.bound()
            );
        }
        Commands::Dump { input, json } => {
            let bytes =
                fs::read(&input).with_context(|| format!("Failed to read {}", input.display()))?;
            let code = CodeBuffer::from_bytes(&bytes)
                .with_context(|| format!("{} is not a SPIR-V binary", input.display()))?;
            if json {
                let value = dump_json(&code)?;
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                print!("{}", dump_text(&code)?);
            }
        }
    }

    Ok(())
}

fn parse_version(s: &str) -> Result<u32, String> {
    let (major, minor) = s
        .split_once('.')
        .ok_or_else(|| format!("expected MAJOR.MINOR, got '{s}'"))?;
    let major: u32 = major
        .parse()
        .map_err(|e| format!("invalid major version '{major}': {e}"))?;
    let minor: u32 = minor
        .parse()
        .map_err(|e| format!("invalid minor version '{minor}': {e}"))?;
    if major != 1 || minor > 6 {
        return Err(format!("unsupported SPIR-V version {major}.{minor}"));
    }
    Ok(spv_version(major, minor))
}

fn stage_name(stage: Stage) -> &'static str {
    match stage {
        Stage::Vertex => "vertex shader",
        Stage::Fragment => "fragment shader",
        Stage::Compute => "compute shader",
    }
}

/// Build a shader that copies its input to its output unchanged.
fn build_demo(stage: Stage, version: u32) -> SpirvModule {
    let mut m = SpirvModule::new(version);
    m.enable_capability(Capability::Shader);
    m.set_memory_model(AddressingModel::Logical, MemoryModel::GLSL450);

    let void = m.def_void_type();
    let fn_type = m.def_function_type(void, &[]);
    let f32_type = m.def_float_type(32);
    let vec4 = m.def_vector_type(f32_type, 4);

    let main = m.allocate_id();
    m.set_debug_name(main, "main");

    let copy = match stage {
        Stage::Vertex => {
            let in_ptr = m.def_pointer_type(vec4, StorageClass::Input);
            let out_ptr = m.def_pointer_type(vec4, StorageClass::Output);
            let position = m.new_var(in_ptr, StorageClass::Input);
            let gl_position = m.new_var(out_ptr, StorageClass::Output);
            m.set_debug_name(position, "position");
            m.decorate_location(position, 0);
            m.decorate_built_in(gl_position, BuiltIn::Position);
            Some((position, gl_position))
        }
        Stage::Fragment => {
            let in_ptr = m.def_pointer_type(vec4, StorageClass::Input);
            let out_ptr = m.def_pointer_type(vec4, StorageClass::Output);
            let color_in = m.new_var(in_ptr, StorageClass::Input);
            let color_out = m.new_var(out_ptr, StorageClass::Output);
            m.set_debug_name(color_in, "color_in");
            m.set_debug_name(color_out, "color_out");
            m.decorate_location(color_in, 0);
            m.decorate_location(color_out, 0);
            Some((color_in, color_out))
        }
        Stage::Compute => None,
    };

    let label = m.allocate_id();
    m.function_begin(void, main, fn_type, FunctionControl::NONE);
    m.op_label(label);
    match copy {
        Some((from, to)) => {
            let value = m.op_load(vec4, from);
            m.op_store(to, value);
        }
        None => {
            let workgroup = m.const_u32(spirv::Scope::Workgroup as u32);
            let flags = MemorySemantics::ACQUIRE_RELEASE | MemorySemantics::WORKGROUP_MEMORY;
            let semantics = m.const_u32(flags.bits());
            m.op_control_barrier(workgroup, workgroup, semantics);
        }
    }
    m.op_return();
    m.function_end();

    match stage {
        Stage::Vertex => m.add_entry_point(main, ExecutionModel::Vertex, "main"),
        Stage::Fragment => {
            m.add_entry_point(main, ExecutionModel::Fragment, "main");
            m.set_execution_mode(main, ExecutionMode::OriginUpperLeft);
        }
        Stage::Compute => {
            m.add_entry_point(main, ExecutionModel::GLCompute, "main");
            m.set_local_size(main, 64, 1, 1);
        }
    }

    tracing::debug!(
        "demo module: {} interface variables",
        m.interface_vars().len()
    );
    m
}

fn op_name(opcode: u32) -> String {
    spirv::Op::from_u32(opcode).map_or_else(|| format!("Op<{opcode}>"), |op| format!("Op{op:?}"))
}

fn dump_text(code: &CodeBuffer) -> Result<String> {
    use std::fmt::Write;

    let (header, placements) = check_layout(code).context("Layout check failed")?;
    let (major, minor) = header.version_pair();

    let mut out = String::new();
    writeln!(
        out,
        "; SPIR-V {major}.{minor}, generator {:#010x}, bound {}",
        header.generator, header.bound
    )?;

    let mut current = None;
    for placement in &placements {
        if current != Some(placement.section) {
            writeln!(out, "; {:?}", placement.section)?;
            current = Some(placement.section);
        }
        let operands = code
            .iter_at(placement.offset)
            .next()
            .map(|ins| ins.operands())
            .unwrap_or_default();
        writeln!(
            out,
            "{:>6}  {} {:?}",
            placement.offset,
            op_name(placement.opcode),
            operands
        )?;
    }

    Ok(out)
}

fn dump_json(code: &CodeBuffer) -> Result<serde_json::Value> {
    let (header, placements) = check_layout(code).context("Layout check failed")?;
    let (major, minor) = header.version_pair();

    let instructions: Vec<serde_json::Value> = placements
        .iter()
        .map(|placement| {
            let operands = code
                .iter_at(placement.offset)
                .next()
                .map(|ins| ins.operands().to_vec())
                .unwrap_or_default();
            serde_json::json!({
                "offset": placement.offset,
                "opcode": placement.opcode,
                "name": op_name(placement.opcode),
                "section": format!("{:?}", placement.section),
                "operands": operands,
            })
        })
        .collect();

    Ok(serde_json::json!({
        "version": format!("{major}.{minor}"),
        "generator": header.generator,
        "bound": header.bound,
        "schema": header.schema,
        "instructions": instructions,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_version() {
        assert_eq!(parse_version("1.3"), Ok(spv_version(1, 3)));
        assert_eq!(parse_version("1.6"), Ok(spv_version(1, 6)));
        assert!(parse_version("2.0").is_err());
        assert!(parse_version("1").is_err());
        assert!(parse_version("1.x").is_err());
    }

    #[test]
    fn test_demo_modules_have_valid_layout() {
        for stage in [Stage::Vertex, Stage::Fragment, Stage::Compute] {
            for version in [spv_version(1, 0), spv_version(1, 4)] {
                let module = build_demo(stage, version);
                let code = module.compile();
                check_layout(&code).expect("demo layout");
            }
        }
    }

    #[test]
    fn test_dump_lists_every_section_once() {
        let module = build_demo(Stage::Fragment, spv_version(1, 3));
        let code = CodeBuffer::from_bytes(&module.encode()).expect("decode");
        let text = dump_text(&code).expect("dump");
        assert!(text.starts_with("; SPIR-V 1.3"));
        assert_eq!(text.matches("; TypesConstants").count(), 1);
        assert!(text.contains("OpEntryPoint"));
        assert!(text.contains("OpExecutionMode"));
    }

    #[test]
    fn test_dump_json_shape() {
        let module = build_demo(Stage::Compute, spv_version(1, 3));
        let value = dump_json(&module.compile()).expect("dump");
        assert_eq!(value["version"], "1.3");
        assert_eq!(value["bound"], module.bound());
        let instructions = value["instructions"].as_array().expect("array");
        assert!(
            instructions
                .iter()
                .any(|ins| ins["name"] == "OpControlBarrier")
        );
        assert_eq!(instructions[0]["name"], "OpCapability");
    }
}
