//! Output file naming.
//!
//! Names are pure functions of the input file name: the extension is replaced
//! by a fixed suffix per artifact kind.

use claygen_core::{clean_path, strip_extension};

/// Suffix of generated HTTP wiring files.
pub const DESC_SUFFIX: &str = ".pb.goclay.go";

/// Suffix of generated implementation stubs.
pub const IMPL_SUFFIX: &str = ".pb.impl.go";

/// Wiring file name for an input file (e.g. "svc.proto" -> "svc.pb.goclay.go").
pub fn desc_output_name(file_name: &str) -> String {
    format!("{}{}", strip_extension(file_name), DESC_SUFFIX)
}

/// Implementation stub name for an input file (e.g. "svc.proto" -> "svc.pb.impl.go").
pub fn impl_output_name(file_name: &str) -> String {
    clean_path(&format!("{}{}", strip_extension(file_name), IMPL_SUFFIX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desc_output_name() {
        assert_eq!(desc_output_name("svc.proto"), "svc.pb.goclay.go");
        assert_eq!(desc_output_name("api/v1/svc.proto"), "api/v1/svc.pb.goclay.go");
        assert_eq!(desc_output_name("svc"), "svc.pb.goclay.go");
    }

    #[test]
    fn test_impl_output_name_is_cleaned() {
        assert_eq!(impl_output_name("svc.proto"), "svc.pb.impl.go");
        assert_eq!(impl_output_name("./api//svc.proto"), "api/svc.pb.impl.go");
    }

    #[test]
    fn test_names_ignore_dots_in_directories() {
        assert_eq!(desc_output_name("api.v1/svc"), "api.v1/svc.pb.goclay.go");
    }
}
