use crate::config::AnalysisConfig;
use anyhow::Result;

pub fn run(config: &AnalysisConfig) -> Result<()> {
    let path = config.save()?;
    println!("Configuration written to {}", path.display());
    Ok(())
}
