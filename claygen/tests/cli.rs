use std::{
    fs,
    path::Path,
    process::{Command, Output},
};

use tempfile::TempDir;

const SET: &str = r#"{
  "files": [
    {
      "name": "api/svc.proto",
      "go_pkg": { "path": "github.com/acme/api", "name": "api" },
      "services": [
        {
          "name": "Users",
          "methods": [
            {
              "name": "GetUser",
              "request_type": {
                "name": "GetUserRequest",
                "go_pkg": { "path": "github.com/acme/types", "name": "types" }
              },
              "response_type": {
                "name": "User",
                "go_pkg": { "path": "github.com/acme/api", "name": "api" }
              },
              "http_rule": { "method": "GET", "path": "/v1/users/{id}" }
            }
          ]
        }
      ]
    },
    {
      "name": "api/types.proto",
      "go_pkg": { "path": "github.com/acme/types", "name": "types" }
    }
  ]
}"#;

const DESC_TEMPLATE: &str =
    "package {{ file.go_pkg.name }}\n{% for pkg in imports %}{{ pkg.path }}\n{% endfor %}";

const CONFIG: &str = r#"
[generate]
impl = true

[templates]
desc = "templates/desc.tmpl"
impl = "templates/impl.tmpl"
"#;

fn project(config: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("templates")).unwrap();
    fs::write(root.join("templates/desc.tmpl"), DESC_TEMPLATE).unwrap();
    fs::write(
        root.join("templates/impl.tmpl"),
        "package {{ file.go_pkg.name }}\n\n// TODO: implement\n",
    )
    .unwrap();
    fs::write(root.join("set.json"), SET).unwrap();
    fs::write(root.join("claygen.toml"), config).unwrap();
    temp
}

fn claygen(root: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_claygen"))
        .current_dir(root)
        .args(args)
        .output()
        .unwrap()
}

fn generate(root: &Path, extra: &[&str]) -> Output {
    let mut args = vec!["generate", "-d", "set.json", "-o", "out"];
    args.extend_from_slice(extra);
    claygen(root, &args)
}

#[test]
fn test_generate_writes_wiring_and_stub() {
    let temp = project(CONFIG);
    let output = generate(temp.path(), &[]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let out = temp.path().join("out");
    let wiring = fs::read_to_string(out.join("api/svc.pb.goclay.go")).unwrap();
    insta::assert_snapshot!(wiring, @r"
    package api
    context
    github.com/pkg/errors
    github.com/utrack/clay/transport
    fmt
    io/ioutil
    strings
    bytes
    net/http
    github.com/utrack/clay/transport/httpruntime
    github.com/utrack/clay/transport/swagger
    github.com/grpc-ecosystem/grpc-gateway/runtime
    google.golang.org/grpc
    github.com/go-chi/chi
    github.com/go-openapi/spec
    github.com/acme/types
    ");
    assert!(out.join("api/svc.pb.impl.go").exists());
    assert!(!out.join("api/types.pb.goclay.go").exists());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("+ api/svc.pb.goclay.go"));
    assert!(stdout.contains("- api/types.proto"));
}

#[test]
fn test_existing_stub_is_not_overwritten() {
    let temp = project(CONFIG);
    let stub = temp.path().join("out/api/svc.pb.impl.go");
    fs::create_dir_all(stub.parent().unwrap()).unwrap();
    fs::write(&stub, "package api\n\n// hand-written\n").unwrap();

    let output = generate(temp.path(), &[]);
    assert!(output.status.success());
    assert_eq!(
        fs::read_to_string(&stub).unwrap(),
        "package api\n\n// hand-written\n"
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("= api/svc.pb.impl.go"));

    let output = generate(temp.path(), &["--param", "force=true"]);
    assert!(output.status.success());
    assert_eq!(
        fs::read_to_string(&stub).unwrap(),
        "package api\n\n// TODO: implement\n"
    );
}

#[test]
fn test_dry_run_writes_nothing() {
    let temp = project(CONFIG);
    let output = generate(temp.path(), &["--dry-run"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("── api/svc.pb.goclay.go ──"));
    assert!(stdout.contains("2 files would be generated"));
    assert!(!temp.path().join("out").exists());
}

#[test]
fn test_param_overrides_config() {
    let temp = project(CONFIG);
    let output = generate(temp.path(), &["--param", "impl=false"]);
    assert!(output.status.success());

    let out = temp.path().join("out/api");
    assert!(out.join("svc.pb.goclay.go").exists());
    assert!(!out.join("svc.pb.impl.go").exists());
}

#[test]
fn test_invalid_param_fails() {
    let temp = project(CONFIG);
    let output = generate(temp.path(), &["--param", "paths=source_relative"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid generator parameter"));
}

#[test]
fn test_render_failure_writes_nothing() {
    let temp = project(CONFIG);
    fs::write(
        temp.path().join("templates/impl.tmpl"),
        "{{ file.name | no_such_filter }}",
    )
    .unwrap();

    let output = generate(temp.path(), &[]);
    assert!(!output.status.success());
    assert!(!temp.path().join("out").exists());
}

#[test]
fn test_check() {
    let temp = project(CONFIG);
    let output = claygen(temp.path(), &["check"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("claygen.toml is valid"));

    let temp = project("[generate]\nimpl = true\n");
    let output = claygen(temp.path(), &["check"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_output_outside_output_dir_is_rejected() {
    let temp = project(CONFIG);
    let set = SET.replace("api/svc.proto", "../escape.proto");
    fs::write(temp.path().join("set.json"), set).unwrap();

    let output = generate(temp.path(), &[]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("outside the output directory"));
    assert!(!temp.path().join("escape.pb.goclay.go").exists());
}
