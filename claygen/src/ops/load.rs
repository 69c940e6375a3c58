//! Loading generator inputs: descriptor sets and swagger documents.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use claygen_codegen::ImportRegistry;
use claygen_ir::{DescriptorSet, MessageRef, ProtoFile};
use eyre::{Context, Result};
use tracing::debug;

/// Read a descriptor set and bind every file's Go package in `registry`.
pub fn descriptors(path: &Path, registry: &mut ImportRegistry) -> Result<Vec<ProtoFile>> {
    let set = DescriptorSet::from_file(path)
        .wrap_err_with(|| format!("Failed to load descriptor set {}", path.display()))?;
    debug!(path = %path.display(), files = set.len(), "loaded descriptor set");

    let mut files = set.files;
    bind_packages(&mut files, registry);
    Ok(files)
}

/// Reserve local names for the packages of all input files, then attach the
/// resulting aliases to the files and to every message reference.
pub fn bind_packages(files: &mut [ProtoFile], registry: &mut ImportRegistry) {
    for file in files.iter_mut() {
        let bound = registry.bind_as(&file.go_pkg.path, &file.go_pkg.name);
        file.go_pkg.alias = bound.alias;
    }

    let messages = files
        .iter_mut()
        .flat_map(|f| f.services.iter_mut())
        .flat_map(|s| s.methods.iter_mut())
        .flat_map(|m| [&mut m.request_type, &mut m.response_type]);
    for message in messages {
        apply_alias(message, registry);
    }
}

fn apply_alias(message: &mut MessageRef, registry: &ImportRegistry) {
    let pkg = &mut message.go_pkg;
    if let Some(alias) = registry.lookup(&pkg.path) {
        if alias != pkg.name {
            pkg.alias = Some(alias.to_string());
        }
    }
}

/// Read the configured swagger documents, keyed by proto file name.
pub fn swagger_documents(
    entries: &BTreeMap<String, PathBuf>,
    resolve: impl Fn(&Path) -> PathBuf,
) -> Result<BTreeMap<String, serde_json::Value>> {
    entries
        .iter()
        .map(|(file, path)| {
            let path = resolve(path);
            let content = fs::read_to_string(&path)
                .wrap_err_with(|| format!("Failed to read swagger document {}", path.display()))?;
            let doc = serde_json::from_str(&content)
                .wrap_err_with(|| format!("Invalid swagger document {}", path.display()))?;
            Ok((file.clone(), doc))
        })
        .collect()
}
