use std::{collections::BTreeMap, fs, path::PathBuf};

use claygen_codegen::{
    ArtifactKind, Error, Generation, Generator, GeneratorOptions, ImportRegistry, Passthrough,
    RootPathResolver, Session, ToolDirProbe, ToolLocation,
    testing::{EchoRenderer, FailingFormatter, FailingRenderer, StaticProbe},
};
use claygen_ir::{GoPackage, HttpMethod, HttpRule, MessageRef, Method, ProtoFile, Service};
use serde_json::json;
use tempfile::TempDir;

fn api() -> GoPackage {
    GoPackage::new("github.com/acme/api", "api")
}

fn rpc(name: &str, request_pkg: GoPackage) -> Method {
    Method::new(
        name,
        MessageRef::new(format!("{name}Request"), request_pkg),
        MessageRef::new(format!("{name}Response"), api()),
    )
    .with_http(HttpRule::new(HttpMethod::Get, format!("/v1/{}", name.to_lowercase())))
}

fn svc() -> ProtoFile {
    ProtoFile::new("svc.proto", api()).service(Service::new("Users").method(rpc("Get", api())))
}

fn session(probe: StaticProbe) -> Session {
    Session::new(
        ImportRegistry::new(),
        RootPathResolver::new(ToolLocation::default(), Vec::new()),
        probe,
    )
}

fn options(emit_impl: bool) -> GeneratorOptions {
    GeneratorOptions {
        emit_impl,
        ..GeneratorOptions::default()
    }
}

fn run(options: GeneratorOptions, probe: StaticProbe, files: &[ProtoFile]) -> Generation {
    let mut generator = Generator::new(options, session(probe), EchoRenderer::new(), Passthrough);
    generator.generate(files).unwrap()
}

fn names(generation: &Generation) -> Vec<&str> {
    generation
        .artifacts
        .iter()
        .map(|a| a.file.name.as_str())
        .collect()
}

#[test]
fn test_wiring_only() {
    let generation = run(options(false), StaticProbe::default(), &[svc()]);

    assert_eq!(names(&generation), ["svc.pb.goclay.go"]);
    assert_eq!(generation.artifacts[0].kind, ArtifactKind::Desc);
    assert!(generation.skipped.is_empty());
    assert!(generation.preserved.is_empty());

    let files = generation.into_files();
    assert!(files[0].content.starts_with("// desc: svc.proto\npackage api\n"));
}

#[test]
fn test_wiring_and_stub() {
    let generation = run(options(true), StaticProbe::default(), &[svc()]);

    assert_eq!(names(&generation), ["svc.pb.goclay.go", "svc.pb.impl.go"]);
    assert_eq!(generation.artifacts[1].kind, ArtifactKind::Impl);
    insta::assert_snapshot!(generation.artifacts[1].file.content, @r#"
    // impl: svc.proto
    package api

    import "context"
    import "github.com/pkg/errors"
    import "github.com/utrack/clay/transport"
    "#);
}

#[test]
fn test_existing_stub_is_preserved() {
    let generation = run(options(true), StaticProbe::with(["svc.pb.impl.go"]), &[svc()]);

    assert_eq!(names(&generation), ["svc.pb.goclay.go"]);
    assert_eq!(generation.preserved, ["svc.pb.impl.go"]);
}

#[test]
fn test_force_overwrites_existing_stub() {
    let options = GeneratorOptions {
        force: true,
        ..options(true)
    };
    let generation = run(options, StaticProbe::with(["svc.pb.impl.go"]), &[svc()]);

    assert_eq!(names(&generation), ["svc.pb.goclay.go", "svc.pb.impl.go"]);
    assert!(generation.preserved.is_empty());
}

#[test]
fn test_file_without_services_is_skipped() {
    let empty = ProtoFile::new("types.proto", api());
    let generation = run(options(true), StaticProbe::default(), &[empty, svc()]);

    assert_eq!(generation.skipped, ["types.proto"]);
    assert_eq!(names(&generation), ["svc.pb.goclay.go", "svc.pb.impl.go"]);
}

#[test]
fn test_colliding_package_names_get_suffixed() {
    let file = ProtoFile::new("svc.proto", api()).service(
        Service::new("Users")
            .method(rpc("Get", GoPackage::new("a/pkg", "pkg")))
            .method(rpc("List", GoPackage::new("b/pkg", "pkg"))),
    );
    let renderer = EchoRenderer::new();
    let mut generator = Generator::new(
        options(false),
        session(StaticProbe::default()),
        &renderer,
        Passthrough,
    );
    generator.generate(&[file]).unwrap();

    let calls = renderer.calls();
    let imports = &calls[0].imports;
    assert!(imports.contains(&r#""a/pkg""#.to_string()));
    assert!(imports.contains(&r#"pkg_0 "b/pkg""#.to_string()));
    assert_eq!(generator.registry().lookup("b/pkg"), Some("pkg_0"));
}

#[test]
fn test_aliases_are_stable_across_files() {
    let first = ProtoFile::new("a.proto", api())
        .service(Service::new("A").method(rpc("Get", GoPackage::new("x/errors", "errors"))));
    let second = ProtoFile::new("b.proto", api())
        .service(Service::new("B").method(rpc("Get", GoPackage::new("x/errors", "errors"))));

    let renderer = EchoRenderer::new();
    let mut generator = Generator::new(
        options(false),
        session(StaticProbe::default()),
        &renderer,
        Passthrough,
    );
    generator.generate(&[first, second]).unwrap();

    let calls = renderer.calls();
    for call in &calls {
        assert!(call.imports.contains(&r#"errors_0 "x/errors""#.to_string()));
    }
}

#[test]
fn test_swagger_is_embedded_for_configured_file() {
    let mut swagger = BTreeMap::new();
    swagger.insert("svc.proto".to_string(), json!({ "swagger": "2.0" }));
    let options = GeneratorOptions {
        swagger,
        ..options(false)
    };

    let renderer = EchoRenderer::new();
    let other = ProtoFile::new("other.proto", api())
        .service(Service::new("Other").method(rpc("Get", api())));
    let mut generator = Generator::new(
        options,
        session(StaticProbe::default()),
        &renderer,
        Passthrough,
    );
    generator.generate(&[svc(), other]).unwrap();

    let calls = renderer.calls();
    assert_eq!(
        calls[0].swagger.as_deref(),
        Some("{\n    \"swagger\": \"2.0\"\n}")
    );
    assert_eq!(calls[1].swagger, None);
}

#[test]
fn test_render_failure_aborts_batch() {
    let mut generator = Generator::new(
        options(true),
        session(StaticProbe::default()),
        FailingRenderer::new(ArtifactKind::Impl),
        Passthrough,
    );

    let err = generator.generate(&[svc()]).unwrap_err();
    assert!(matches!(
        err,
        Error::Render {
            kind: ArtifactKind::Impl,
            ..
        }
    ));
    assert_eq!(err.file(), "svc.proto");
}

#[test]
fn test_format_failure_aborts_batch() {
    let broken = ProtoFile::new("broken.proto", api())
        .service(Service::new("Broken").method(rpc("Get", api())));
    let mut generator = Generator::new(
        options(false),
        session(StaticProbe::default()),
        EchoRenderer::new(),
        FailingFormatter::new("broken.proto"),
    );

    let err = generator.generate(&[svc(), broken]).unwrap_err();
    assert!(matches!(
        err,
        Error::Format {
            kind: ArtifactKind::Desc,
            ..
        }
    ));
    assert_eq!(err.file(), "broken.proto");
}

#[test]
fn test_split_packages_reference_wiring_package() {
    let root = TempDir::new().unwrap();
    let tool = root.path().join("src/github.com/acme");
    fs::create_dir_all(&tool).unwrap();

    let session = Session::new(
        ImportRegistry::new(),
        RootPathResolver::new(ToolLocation::resolved(&tool), vec![root.path().to_path_buf()]),
        StaticProbe::default(),
    );
    let options = GeneratorOptions {
        desc_path: "desc".to_string(),
        impl_path: "impl".to_string(),
        ..options(true)
    };
    let renderer = EchoRenderer::new();
    let mut generator = Generator::new(options, session, &renderer, Passthrough);
    generator.generate(&[svc()]).unwrap();

    let calls = renderer.calls();
    assert_eq!(calls[1].kind, ArtifactKind::Impl);
    assert_eq!(calls[1].desc_prefix.as_deref(), Some("desc."));
    assert!(
        calls[1]
            .imports
            .contains(&r#""github.com/acme/api/desc""#.to_string())
    );
}

// Existing stubs are looked up next to the tool, not in the output directory.
#[test]
fn test_stub_check_is_relative_to_tool_dir() {
    let tool_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    fs::write(out_dir.path().join("svc.pb.impl.go"), "package api\n").unwrap();

    let tool = ToolLocation::resolved(tool_dir.path());
    let probe = ToolDirProbe::new(&tool);
    let session = Session::new(
        ImportRegistry::new(),
        RootPathResolver::new(tool, Vec::<PathBuf>::new()),
        probe,
    );
    let mut generator = Generator::new(options(true), session, EchoRenderer::new(), Passthrough);
    let generation = generator.generate(&[svc()]).unwrap();
    assert_eq!(names(&generation), ["svc.pb.goclay.go", "svc.pb.impl.go"]);

    fs::write(tool_dir.path().join("svc.pb.impl.go"), "package api\n").unwrap();
    let generation = generator.generate(&[svc()]).unwrap();
    assert_eq!(names(&generation), ["svc.pb.goclay.go"]);
    assert_eq!(generation.preserved, ["svc.pb.impl.go"]);
}
