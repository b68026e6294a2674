//! Annotab CLI (for testing purposes only)
//! The main interface is through WASM bindings.

fn main() {
    println!("Annotab CSV Annotation Core");
    println!("===========================");
    println!();
    println!("This is a library crate. To use it:");
    println!();
    println!("  1. Build WASM: wasm-pack build --target web");
    println!("  2. Serve the web front end alongside the generated pkg/");
    println!();
    println!("For testing the core library:");
    println!("  cargo test");
}
