fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Protobuf codegen is only needed when the gRPC server is compiled in
    if std::env::var_os("CARGO_FEATURE_SERVER").is_some() {
        tonic_build::compile_protos("proto/or_dashboard.proto")?;
    }
    Ok(())
}
