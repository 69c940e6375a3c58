//! Template parameters for each artifact kind.

use claygen_core::join_path;
use claygen_ir::{GoPackage, ProtoFile};
use serde::{Serialize, Serializer};
use tracing::warn;

use super::{ImportRegistry, ImportSet, RootPathResolver};
use crate::{Error, Result};

/// Packages imported by every artifact.
pub const COMMON_IMPORTS: &[&str] = &[
    "context",
    "github.com/pkg/errors",
    "github.com/utrack/clay/transport",
];

/// Additional packages imported by the HTTP wiring file.
pub const DESC_IMPORTS: &[&str] = &[
    "fmt",
    "io/ioutil",
    "strings",
    "bytes",
    "net/http",
    "github.com/utrack/clay/transport/httpruntime",
    "github.com/utrack/clay/transport/swagger",
    "github.com/utrack/clay/transport",
    "github.com/grpc-ecosystem/grpc-gateway/runtime",
    "google.golang.org/grpc",
    "github.com/go-chi/chi",
    "github.com/go-openapi/spec",
];

/// Additional packages imported by the implementation stub.
pub const IMPL_IMPORTS: &[&str] = &["context"];

/// Parameters handed to the template renderer.
#[derive(Debug, Clone, Serialize)]
pub struct RenderParams<'a> {
    /// The file being generated for.
    pub file: &'a ProtoFile,
    /// Imports in first-seen order, unique by path.
    pub imports: Vec<GoPackage>,
    /// Swagger document, pretty-printed with 4-space indentation.
    #[serde(
        serialize_with = "serialize_buffer",
        skip_serializing_if = "Option::is_none"
    )]
    pub swagger_buffer: Option<Vec<u8>>,
    /// Qualifier for wiring types referenced from the stub (e.g. "desc.").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc_prefix: Option<String>,
}

impl<'a> RenderParams<'a> {
    pub fn new(file: &'a ProtoFile, imports: Vec<GoPackage>) -> Self {
        Self {
            file,
            imports,
            swagger_buffer: None,
            desc_prefix: None,
        }
    }
}

fn serialize_buffer<S: Serializer>(
    buffer: &Option<Vec<u8>>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match buffer {
        Some(bytes) => serializer.serialize_str(&String::from_utf8_lossy(bytes)),
        None => serializer.serialize_none(),
    }
}

/// Serialize `doc` as JSON indented with four spaces.
pub(crate) fn indent_json<T: Serialize + ?Sized>(
    doc: &T,
) -> std::result::Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    doc.serialize(&mut serializer)?;
    Ok(buf)
}

/// Builds [`RenderParams`] for both artifact kinds.
///
/// Common imports are bound once, when the assembler is created; every later
/// binding goes through the same [`ImportRegistry`], so a package keeps one
/// local name across all files of a session.
#[derive(Debug, Clone)]
pub struct ParamAssembler {
    common: Vec<GoPackage>,
    resolver: RootPathResolver,
    desc_path: String,
    impl_path: String,
}

impl ParamAssembler {
    pub fn new(
        registry: &mut ImportRegistry,
        resolver: RootPathResolver,
        desc_path: impl Into<String>,
        impl_path: impl Into<String>,
    ) -> Self {
        let common = COMMON_IMPORTS.iter().map(|p| registry.bind(p)).collect();
        Self {
            common,
            resolver,
            desc_path: desc_path.into(),
            impl_path: impl_path.into(),
        }
    }

    /// Whether wiring and stubs are generated into different packages.
    pub fn split_packages(&self) -> bool {
        self.desc_path != self.impl_path
    }

    /// Parameters for the HTTP wiring file.
    pub fn desc_params<'f, T: Serialize + ?Sized>(
        &self,
        registry: &mut ImportRegistry,
        file: &'f ProtoFile,
        swagger: Option<&T>,
    ) -> Result<RenderParams<'f>> {
        let mut imports = self.seed(registry, DESC_IMPORTS);
        discover_request_packages(registry, file, &mut imports);

        let mut params = RenderParams::new(file, imports.into_vec());
        if let Some(doc) = swagger {
            let buffer = indent_json(doc).map_err(|source| Error::Swagger {
                file: file.name.clone(),
                source,
            })?;
            params.swagger_buffer = Some(buffer);
        }
        Ok(params)
    }

    /// Parameters for the implementation stub.
    pub fn impl_params<'f>(
        &self,
        registry: &mut ImportRegistry,
        file: &'f ProtoFile,
    ) -> RenderParams<'f> {
        let mut imports = self.seed(registry, IMPL_IMPORTS);
        let mut desc_prefix = None;

        if self.split_packages() {
            match self.resolver.import_path_for(&file.go_pkg.path) {
                Some(root) => {
                    let pkg = registry.bind(&join_path([root.as_str(), self.desc_path.as_str()]));
                    desc_prefix = Some(format!("{}.", pkg.local_name()));
                    imports.insert(pkg);
                }
                None => warn!(
                    file = %file.name,
                    "cannot resolve the wiring package import path, stub will not reference it"
                ),
            }
        }

        discover_request_packages(registry, file, &mut imports);

        let mut params = RenderParams::new(file, imports.into_vec());
        params.desc_prefix = desc_prefix;
        params
    }

    fn seed(&self, registry: &mut ImportRegistry, extra: &[&str]) -> ImportSet {
        let mut imports = ImportSet::new();
        imports.extend(self.common.iter().cloned());
        imports.extend(extra.iter().map(|p| registry.bind(p)));
        imports
    }
}

/// Add the packages of HTTP-bound request types that live outside the file's own package.
fn discover_request_packages(
    registry: &mut ImportRegistry,
    file: &ProtoFile,
    imports: &mut ImportSet,
) {
    for (_, method) in file.http_methods() {
        let pkg = &method.request_type.go_pkg;
        if pkg.path == file.go_pkg.path || imports.contains(&pkg.path) {
            continue;
        }
        imports.insert(registry.bind_as(&pkg.path, &pkg.name));
    }
}
