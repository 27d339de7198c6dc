use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if env::var_os("PROTOC").is_none() {
        env::set_var("PROTOC", protoc_bin_vendored::protoc_bin_path()?);
    }

    tonic_build::configure()
        .build_client(false)
        .compile_protos(&["protos/rideshare.proto"], &["protos"])?;

    println!("cargo:rerun-if-changed=protos/rideshare.proto");
    Ok(())
}
