//! WebAssembly interface reader
//!
//! Describes a binary module by its imports, its exports and the signature
//! of every exported function. Decoding is left to `wasmparser` with every
//! proposal enabled; sections that do not contribute to the interface are
//! skipped without being decoded.

use std::fmt;

use serde::{Serialize, Serializer};
use wasmparser::{
    CompositeInnerType, Encoding, ExternalKind, Parser, Payload, TypeRef, WasmFeatures,
};

use crate::error::{Result, compile as compile_error};

/// Value type of a parameter or result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValType {
    I32,
    I64,
    F32,
    F64,
    V128,
    /// Any reference type, kept in its text-format spelling (`externref`,
    /// `anyref`, `(ref null 3)`, ...)
    Ref(String),
}

impl From<wasmparser::ValType> for ValType {
    fn from(ty: wasmparser::ValType) -> Self {
        match ty {
            wasmparser::ValType::I32 => ValType::I32,
            wasmparser::ValType::I64 => ValType::I64,
            wasmparser::ValType::F32 => ValType::F32,
            wasmparser::ValType::F64 => ValType::F64,
            wasmparser::ValType::V128 => ValType::V128,
            wasmparser::ValType::Ref(reference) => ValType::Ref(reference.to_string()),
        }
    }
}

impl fmt::Display for ValType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValType::I32 => write!(f, "i32"),
            ValType::I64 => write!(f, "i64"),
            ValType::F32 => write!(f, "f32"),
            ValType::F64 => write!(f, "f64"),
            ValType::V128 => write!(f, "v128"),
            ValType::Ref(name) => f.write_str(name),
        }
    }
}

impl Serialize for ValType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Function signature, serialized in its display form
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FuncType {
    pub params: Vec<ValType>,
    pub results: Vec<ValType>,
}

impl From<&wasmparser::FuncType> for FuncType {
    fn from(ty: &wasmparser::FuncType) -> Self {
        Self {
            params: ty.params().iter().copied().map(ValType::from).collect(),
            results: ty.results().iter().copied().map(ValType::from).collect(),
        }
    }
}

impl fmt::Display for FuncType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", join(&self.params))?;
        match self.results.as_slice() {
            [] => Ok(()),
            [single] => write!(f, " -> {single}"),
            many => write!(f, " -> ({})", join(many)),
        }
    }
}

impl Serialize for FuncType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn join(types: &[ValType]) -> String {
    types
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Kind of an imported or exported item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExternKind {
    Function,
    Table,
    Memory,
    Global,
    Tag,
}

impl From<ExternalKind> for ExternKind {
    fn from(kind: ExternalKind) -> Self {
        match kind {
            ExternalKind::Func => Self::Function,
            ExternalKind::Table => Self::Table,
            ExternalKind::Memory => Self::Memory,
            ExternalKind::Global => Self::Global,
            ExternalKind::Tag => Self::Tag,
        }
    }
}

impl fmt::Display for ExternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExternKind::Function => "function",
            ExternKind::Table => "table",
            ExternKind::Memory => "memory",
            ExternKind::Global => "global",
            ExternKind::Tag => "tag",
        };
        f.write_str(name)
    }
}

/// An exported item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Export {
    pub name: String,
    pub kind: ExternKind,
    /// Present for functions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<FuncType>,
}

/// An imported item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Import {
    pub module: String,
    pub name: String,
    pub kind: ExternKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<FuncType>,
}

/// Interface descriptor of a binary module
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ModuleInterface {
    pub imports: Vec<Import>,
    pub exports: Vec<Export>,
}

impl ModuleInterface {
    /// Parse the interface of a binary module
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let mut parser = Parser::new(0);
        parser.set_features(WasmFeatures::all());

        // Type index space; `None` for struct and array types
        let mut types: Vec<Option<FuncType>> = Vec::new();
        let mut imports: Vec<(Import, Option<u32>)> = Vec::new();
        // Function index space: imported functions first, then defined ones
        let mut function_types: Vec<u32> = Vec::new();
        let mut raw_exports: Vec<(String, ExternKind, u32)> = Vec::new();

        for payload in parser.parse_all(bytes) {
            match payload.map_err(|e| compile_error::malformed_module(&e))? {
                Payload::Version {
                    encoding: Encoding::Component,
                    range,
                    ..
                } => {
                    return Err(compile_error::invalid_module(
                        range.start,
                        "components are not supported, expected a core module",
                    ));
                }
                Payload::TypeSection(reader) => {
                    for group in reader {
                        let group = group.map_err(|e| compile_error::malformed_module(&e))?;
                        types.extend(group.types().map(|sub| {
                            match &sub.composite_type.inner {
                                CompositeInnerType::Func(func) => Some(FuncType::from(func)),
                                _ => None,
                            }
                        }));
                    }
                }
                Payload::ImportSection(reader) => {
                    for import in reader {
                        let import = import.map_err(|e| compile_error::malformed_module(&e))?;
                        let (kind, type_index) = match import.ty {
                            TypeRef::Func(index) => {
                                function_types.push(index);
                                (ExternKind::Function, Some(index))
                            }
                            TypeRef::Table(_) => (ExternKind::Table, None),
                            TypeRef::Memory(_) => (ExternKind::Memory, None),
                            TypeRef::Global(_) => (ExternKind::Global, None),
                            TypeRef::Tag(_) => (ExternKind::Tag, None),
                        };
                        imports.push((
                            Import {
                                module: import.module.to_string(),
                                name: import.name.to_string(),
                                kind,
                                signature: None,
                            },
                            type_index,
                        ));
                    }
                }
                Payload::FunctionSection(reader) => {
                    for index in reader {
                        function_types.push(index.map_err(|e| compile_error::malformed_module(&e))?);
                    }
                }
                Payload::ExportSection(reader) => {
                    for export in reader {
                        let export = export.map_err(|e| compile_error::malformed_module(&e))?;
                        raw_exports.push((export.name.to_string(), export.kind.into(), export.index));
                    }
                }
                _ => {}
            }
        }

        let lookup = |index: u32| -> Result<FuncType> {
            match types.get(index as usize) {
                Some(Some(func)) => Ok(func.clone()),
                Some(None) => Err(compile_error::invalid_module(
                    0,
                    format!("type {index} is not a function type"),
                )),
                None => Err(compile_error::invalid_module(
                    0,
                    format!("type index {index} out of range"),
                )),
            }
        };

        let imports = imports
            .into_iter()
            .map(|(mut import, ty)| {
                if let Some(index) = ty {
                    import.signature = Some(lookup(index)?);
                }
                Ok(import)
            })
            .collect::<Result<Vec<_>>>()?;

        let exports = raw_exports
            .into_iter()
            .map(|(name, kind, index)| {
                let signature = if kind == ExternKind::Function {
                    let ty = function_types.get(index as usize).ok_or_else(|| {
                        compile_error::invalid_module(
                            0,
                            format!("export '{name}' refers to unknown function {index}"),
                        )
                    })?;
                    Some(lookup(*ty)?)
                } else {
                    None
                };
                Ok(Export {
                    name,
                    kind,
                    signature,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { imports, exports })
    }

    /// Exported functions only
    pub fn functions(&self) -> impl Iterator<Item = &Export> {
        self.exports
            .iter()
            .filter(|e| e.kind == ExternKind::Function)
    }
}
