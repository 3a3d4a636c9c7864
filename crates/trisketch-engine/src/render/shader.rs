//! Shader stage compilation and program linking.
//!
//! WGSL is parsed and validated on the CPU with naga before any GPU object
//! exists, so failures come back as a status plus a readable log instead of a
//! device validation panic. The caller decides whether a failed program is
//! fatal.

use std::collections::HashMap;
use std::fmt;

use naga::valid::{Capabilities, ValidationFlags, Validator};
use thiserror::Error;

/// Vertex stage: passes the 3-component position through with `w = 1.0`.
pub const VERTEX_SHADER_SOURCE: &str = include_str!("shaders/triangle_vs.wgsl");

/// Fragment stage: emits a fixed opaque orange.
pub const FRAGMENT_SHADER_SOURCE: &str = include_str!("shaders/triangle_fs.wgsl");

/// Maximum size of a diagnostic log, in bytes.
pub const INFO_LOG_CAPACITY: usize = 512;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn to_naga(self) -> naga::ShaderStage {
        match self {
            ShaderStage::Vertex => naga::ShaderStage::Vertex,
            ShaderStage::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Non-fatal shader failure carrying a bounded diagnostic log.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ShaderError {
    #[error("{stage} shader compilation failed:\n{log}")]
    Compile { stage: ShaderStage, log: String },

    #[error("shader program link failed:\n{log}")]
    Link { log: String },
}

impl ShaderError {
    fn compile(stage: ShaderStage, log: impl Into<String>) -> Self {
        ShaderError::Compile {
            stage,
            log: bounded_log(log.into()),
        }
    }

    fn link(log: impl Into<String>) -> Self {
        ShaderError::Link {
            log: bounded_log(log.into()),
        }
    }

    /// Diagnostic text, at most `INFO_LOG_CAPACITY` bytes and never empty.
    pub fn log(&self) -> &str {
        match self {
            ShaderError::Compile { log, .. } | ShaderError::Link { log } => log,
        }
    }
}

fn bounded_log(mut log: String) -> String {
    if log.trim().is_empty() {
        return "no diagnostic available".to_string();
    }
    if log.len() > INFO_LOG_CAPACITY {
        let mut cut = INFO_LOG_CAPACITY;
        while !log.is_char_boundary(cut) {
            cut -= 1;
        }
        log.truncate(cut);
    }
    log
}

/// A single validated shader stage.
///
/// Only useful as input to [`link`]; it is consumed there.
#[derive(Debug)]
pub struct CompiledStage {
    stage: ShaderStage,
    entry_point: String,
    source: String,
    module: naga::Module,
}

impl CompiledStage {
    pub fn entry_point(&self) -> &str {
        &self.entry_point
    }

    fn entry(&self) -> Option<&naga::EntryPoint> {
        self.module
            .entry_points
            .iter()
            .find(|ep| ep.name == self.entry_point)
    }
}

/// Compiles one WGSL stage.
///
/// Fails if the source does not parse, does not validate, or has no entry
/// point for `stage`.
pub fn compile(stage: ShaderStage, source: &str) -> Result<CompiledStage, ShaderError> {
    let module = naga::front::wgsl::parse_str(source)
        .map_err(|e| ShaderError::compile(stage, e.emit_to_string(source)))?;

    Validator::new(ValidationFlags::all(), Capabilities::empty())
        .validate(&module)
        .map_err(|e| ShaderError::compile(stage, e.emit_to_string(source)))?;

    let entry_point = module
        .entry_points
        .iter()
        .find(|ep| ep.stage == stage.to_naga())
        .map(|ep| ep.name.clone())
        .ok_or_else(|| ShaderError::compile(stage, format!("no @{stage} entry point found")))?;

    log::debug!("compiled {stage} stage (entry point `{entry_point}`)");

    Ok(CompiledStage {
        stage,
        entry_point,
        source: source.to_owned(),
        module,
    })
}

/// Vertex + fragment stages that passed interface checks.
#[derive(Debug, Clone)]
pub struct LinkedProgram {
    vertex_source: String,
    vertex_entry: String,
    fragment_source: String,
    fragment_entry: String,
    attribute_locations: Vec<u32>,
}

impl LinkedProgram {
    pub fn vertex_source(&self) -> &str {
        &self.vertex_source
    }

    pub fn vertex_entry(&self) -> &str {
        &self.vertex_entry
    }

    pub fn fragment_source(&self) -> &str {
        &self.fragment_source
    }

    pub fn fragment_entry(&self) -> &str {
        &self.fragment_entry
    }

    /// Vertex input locations the program reads, ascending.
    pub fn attribute_locations(&self) -> &[u32] {
        &self.attribute_locations
    }

    /// Checks that a vertex buffer layout feeds every attribute the program reads.
    pub fn check_vertex_layout(&self, layout: &wgpu::VertexBufferLayout<'_>) -> Result<(), ShaderError> {
        for loc in &self.attribute_locations {
            if !layout.attributes.iter().any(|a| a.shader_location == *loc) {
                return Err(ShaderError::link(format!(
                    "vertex attribute at location {loc} is not provided by the buffer layout"
                )));
            }
        }
        Ok(())
    }
}

/// Links a vertex and a fragment stage into one program.
///
/// Every fragment input location must be written by the vertex stage with
/// the same type, and the vertex stage must write the clip position.
pub fn link(vertex: CompiledStage, fragment: CompiledStage) -> Result<LinkedProgram, ShaderError> {
    if vertex.stage != ShaderStage::Vertex {
        return Err(ShaderError::link(format!(
            "expected a vertex stage, got a {} stage",
            vertex.stage
        )));
    }
    if fragment.stage != ShaderStage::Fragment {
        return Err(ShaderError::link(format!(
            "expected a fragment stage, got a {} stage",
            fragment.stage
        )));
    }

    let (Some(vs), Some(fs)) = (vertex.entry(), fragment.entry()) else {
        return Err(ShaderError::link("entry point missing after compilation"));
    };

    let mut outputs = Vec::new();
    if let Some(result) = &vs.function.result {
        collect_bindings(&vertex.module, result.ty, result.binding.as_ref(), &mut outputs);
    }

    let writes_position = outputs.iter().any(|(b, _)| {
        matches!(b, naga::Binding::BuiltIn(naga::BuiltIn::Position { .. }))
    });
    if !writes_position {
        return Err(ShaderError::link(format!(
            "vertex entry point `{}` does not write @builtin(position)",
            vertex.entry_point
        )));
    }

    let varyings: HashMap<u32, &naga::TypeInner> = outputs
        .iter()
        .filter_map(|(b, ty)| location_of(b).map(|loc| (loc, *ty)))
        .collect();

    let mut inputs = Vec::new();
    for arg in &fs.function.arguments {
        collect_bindings(&fragment.module, arg.ty, arg.binding.as_ref(), &mut inputs);
    }

    for (binding, ty) in &inputs {
        let Some(loc) = location_of(binding) else { continue };
        match varyings.get(&loc) {
            None => {
                return Err(ShaderError::link(format!(
                    "fragment input at location {loc} is not written by the vertex stage"
                )));
            }
            Some(out_ty) if *out_ty != *ty => {
                return Err(ShaderError::link(format!(
                    "type mismatch at location {loc}: vertex writes {out_ty:?}, fragment reads {ty:?}"
                )));
            }
            Some(_) => {}
        }
    }

    let mut attributes = Vec::new();
    for arg in &vs.function.arguments {
        collect_bindings(&vertex.module, arg.ty, arg.binding.as_ref(), &mut attributes);
    }
    let mut attribute_locations: Vec<u32> = attributes
        .iter()
        .filter_map(|(b, _)| location_of(b))
        .collect();
    attribute_locations.sort_unstable();

    log::debug!(
        "linked program `{}` + `{}` (attributes at {:?})",
        vertex.entry_point,
        fragment.entry_point,
        attribute_locations
    );

    // The naga modules are dropped here; only sources and entry names survive.
    Ok(LinkedProgram {
        vertex_source: vertex.source,
        vertex_entry: vertex.entry_point,
        fragment_source: fragment.source,
        fragment_entry: fragment.entry_point,
        attribute_locations,
    })
}

/// Compiles and links the embedded triangle shaders.
///
/// Each step checks its own stage's status.
pub fn build_triangle_program() -> Result<LinkedProgram, ShaderError> {
    let vertex = compile(ShaderStage::Vertex, VERTEX_SHADER_SOURCE)?;
    let fragment = compile(ShaderStage::Fragment, FRAGMENT_SHADER_SOURCE)?;
    link(vertex, fragment)
}

fn location_of(binding: &naga::Binding) -> Option<u32> {
    if let naga::Binding::Location { location, .. } = binding {
        Some(*location)
    } else {
        None
    }
}

/// Flattens an entry point argument/result into its bound members.
fn collect_bindings<'m>(
    module: &'m naga::Module,
    ty: naga::Handle<naga::Type>,
    binding: Option<&'m naga::Binding>,
    out: &mut Vec<(&'m naga::Binding, &'m naga::TypeInner)>,
) {
    let inner = &module.types[ty].inner;
    match binding {
        Some(b) => out.push((b, inner)),
        None => {
            if let naga::TypeInner::Struct { members, .. } = inner {
                for m in members {
                    if let Some(b) = &m.binding {
                        out.push((b, &module.types[m.ty].inner));
                    }
                }
            }
        }
    }
}
