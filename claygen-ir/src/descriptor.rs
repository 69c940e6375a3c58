//! Parsed `.proto` file descriptors.
//!
//! These mirror the subset of protobuf descriptor data the generator needs:
//! services, their RPC methods, the Go package each message lives in and the
//! `google.api.http` binding attached to a method.

use serde::{Deserialize, Serialize};

use crate::GoPackage;

/// A `.proto` file selected for generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtoFile {
    /// File name as passed to protoc (e.g. `api/svc.proto`).
    pub name: String,
    /// Protobuf package (e.g. `acme.users.v1`).
    #[serde(default)]
    pub package: String,
    /// Go package the file's generated code belongs to.
    pub go_pkg: GoPackage,
    /// Services declared in the file.
    #[serde(default)]
    pub services: Vec<Service>,
}

impl ProtoFile {
    /// Create a file with no services.
    pub fn new(name: impl Into<String>, go_pkg: GoPackage) -> Self {
        Self {
            name: name.into(),
            package: String::new(),
            go_pkg,
            services: Vec::new(),
        }
    }

    /// Add a service.
    pub fn service(mut self, service: Service) -> Self {
        self.services.push(service);
        self
    }

    /// Returns true if the file declares at least one service.
    pub fn has_services(&self) -> bool {
        !self.services.is_empty()
    }

    /// Iterate over methods carrying an HTTP binding, in declaration order.
    pub fn http_methods(&self) -> impl Iterator<Item = (&Service, &Method)> {
        self.services.iter().flat_map(|svc| {
            svc.methods
                .iter()
                .filter(|m| m.http_rule.is_some())
                .map(move |m| (svc, m))
        })
    }
}

/// A gRPC service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    /// Service name.
    pub name: String,
    /// RPC methods in declaration order.
    #[serde(default)]
    pub methods: Vec<Method>,
}

impl Service {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
        }
    }

    /// Add a method.
    pub fn method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }
}

/// An RPC method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Method {
    /// Method name.
    pub name: String,
    /// Request message.
    pub request_type: MessageRef,
    /// Response message.
    pub response_type: MessageRef,
    /// HTTP binding from the `google.api.http` option.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_rule: Option<HttpRule>,
    #[serde(default)]
    pub client_streaming: bool,
    #[serde(default)]
    pub server_streaming: bool,
}

impl Method {
    pub fn new(name: impl Into<String>, request_type: MessageRef, response_type: MessageRef) -> Self {
        Self {
            name: name.into(),
            request_type,
            response_type,
            http_rule: None,
            client_streaming: false,
            server_streaming: false,
        }
    }

    /// Attach an HTTP binding.
    pub fn with_http(mut self, rule: HttpRule) -> Self {
        self.http_rule = Some(rule);
        self
    }
}

/// Reference to a message type and the Go package it is generated into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRef {
    /// Message name (e.g. `GetUserRequest`).
    pub name: String,
    /// Go package of the file declaring the message.
    pub go_pkg: GoPackage,
}

impl MessageRef {
    pub fn new(name: impl Into<String>, go_pkg: GoPackage) -> Self {
        Self {
            name: name.into(),
            go_pkg,
        }
    }
}

/// HTTP verb of a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Patch,
}

impl HttpMethod {
    /// Get the uppercase string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }
}

/// A `google.api.http` binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpRule {
    pub method: HttpMethod,
    /// URL pattern (e.g. `/v1/users/{id}`).
    pub path: String,
    /// Request field mapped to the body, `*` for the whole message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_bindings: Vec<HttpRule>,
}

impl HttpRule {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            additional_bindings: Vec::new(),
        }
    }

    /// Set the body mapping.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}
