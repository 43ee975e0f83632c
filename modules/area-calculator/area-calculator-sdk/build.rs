use std::env;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    // area-calculator-sdk -> area-calculator -> modules -> root
    let workspace_root = manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .and_then(|p| p.parent())
        .ok_or("Could not find workspace root")?;

    let proto_dir = workspace_root.join("proto");
    let proto_file = proto_dir.join("area_calculator/v1/area_calculator.proto");

    if !proto_file.exists() {
        return Err(format!(
            "Proto file not found: {} (workspace root: {})",
            proto_file.display(),
            workspace_root.display()
        )
        .into());
    }

    println!("cargo:rerun-if-changed={}", proto_file.display());

    // Use the vendored compiler so the build does not depend on a system protoc.
    let mut config = prost_build::Config::new();
    config.protoc_executable(protoc_bin_vendored::protoc_bin_path()?);

    tonic_prost_build::configure()
        .build_client(true)
        .build_server(true)
        .compile_with_config(config, &[proto_file], &[proto_dir])?;

    Ok(())
}
