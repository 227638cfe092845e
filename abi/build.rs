use std::env;

use tonic_build::Builder;

fn main() {
    // no system protoc is assumed; use the vendored binary and its well-known types
    let protoc = protoc_bin_vendored::protoc_bin_path().unwrap();
    let include = protoc_bin_vendored::include_path().unwrap();
    env::set_var("PROTOC", protoc);

    tonic_build::configure()
        .with_builder(&["booking.CreateBookingRequest"])
        .with_builder_into(
            "booking.CreateBookingRequest",
            &["user_id", "resource_id", "resource_capacity"],
        )
        .with_builder_option("booking.CreateBookingRequest", &["start_at", "end_at"])
        .compile(
            &["protos/booking.proto"],
            &["protos", include.to_str().unwrap()],
        )
        .unwrap();

    println!("cargo:rerun-if-changed=protos/booking.proto");
}

trait BuilderExt {
    fn with_builder(self, paths: &[&str]) -> Self;
    fn with_builder_into(self, path: &str, fields: &[&str]) -> Self;
    fn with_builder_option(self, path: &str, fields: &[&str]) -> Self;
}

impl BuilderExt for Builder {
    fn with_builder(self, paths: &[&str]) -> Self {
        paths.iter().fold(self, |acc, path| {
            acc.type_attribute(path, "#[derive(derive_builder::Builder)]")
        })
    }

    fn with_builder_into(self, path: &str, fields: &[&str]) -> Self {
        fields.iter().fold(self, |acc, field| {
            acc.field_attribute(
                format!("{}.{}", path, field),
                "#[builder(setter(into), default)]",
            )
        })
    }

    fn with_builder_option(self, path: &str, fields: &[&str]) -> Self {
        fields.iter().fold(self, |acc, field| {
            acc.field_attribute(
                format!("{}.{}", path, field),
                "#[builder(setter(into, strip_option))]",
            )
        })
    }
}
