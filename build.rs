fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Use a vendored protoc binary so the build does not depend on a
    // system-installed protobuf compiler.
    let protoc = protoc_bin_vendored::protoc_bin_path()?;
    std::env::set_var("PROTOC", protoc);

    let out_dir = std::path::PathBuf::from(std::env::var("OUT_DIR")?);

    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .file_descriptor_set_path(out_dir.join("luminous_descriptor.bin"))
        .compile_protos(&["proto/luminous.proto"], &["proto"])?;
    Ok(())
}
