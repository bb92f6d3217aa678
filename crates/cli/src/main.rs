use anyhow::Result;

fn main() -> Result<()> {
    resonance_cli::main_entry()
}
