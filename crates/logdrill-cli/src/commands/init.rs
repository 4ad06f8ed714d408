//! The `logdrill init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    let path = std::path::Path::new("logdrill.toml");
    if path.exists() {
        println!("logdrill.toml already exists, skipping.");
        return Ok(());
    }

    std::fs::write(path, SAMPLE_CONFIG)?;
    println!("Created logdrill.toml");

    println!("\nNext steps:");
    println!("  1. Edit logdrill.toml to pick a range and mode");
    println!("  2. Run: logdrill table --min 1 --max 10");
    println!("  3. Run: logdrill drill");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# logdrill configuration

# Table rows to drill: 1 is 1.01, 100 is 2.00
range_min = 1
range_max = 100

# normal   = table order, give the logarithm
# shuffled = random order, give the logarithm
# reverse  = random order, give the argument for a logarithm
mode = "shuffled"

# Pause before missed rows come back, in milliseconds
retry_delay_ms = 1500
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_config_parses() {
        let config = logdrill_core::config::parse_config(SAMPLE_CONFIG).unwrap();
        assert_eq!(config, logdrill_core::config::LogdrillConfig::default());
    }
}
