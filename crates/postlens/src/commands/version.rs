pub fn run() -> anyhow::Result<()> {
    println!("postlens {}", env!("CARGO_PKG_VERSION"));
    println!("Feature and salience analysis for post archives");
    Ok(())
}
