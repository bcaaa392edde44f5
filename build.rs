//! Retrieves information about the version of the engine from Git and the build
//! environment. It is then embedded into the binary and reported by the
//! `version` command of the text protocol.

fn main() -> shadow_rs::SdResult<()> {
    shadow_rs::new()
}
