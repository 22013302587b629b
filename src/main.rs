use miette::Result;

/// Main entry point for the dependency-mapper CLI tool
fn main() -> Result<()> {
    miette::set_panic_hook();

    dependency_mapper::run()
}
