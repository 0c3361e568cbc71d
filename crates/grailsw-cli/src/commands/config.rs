use grailsw_core::AgentConfig;

const SAMPLE_CONFIG: &str = r#"# grailsw-runner agent configuration
# JDK installations available on this machine, keyed by label.
# A task selecting label "jdk17" runs with JAVA_HOME=/usr/lib/jvm/java-17.

jdks:
  jdk8: /usr/lib/jvm/java-8
  jdk17: /usr/lib/jvm/java-17
"#;

pub fn run(path: bool, init: bool) -> anyhow::Result<()> {
    if path {
        println!("{}", AgentConfig::default_path().display());
        return Ok(());
    }

    if init {
        let config_path = AgentConfig::default_path();
        if config_path.exists() {
            println!("Config already exists at: {}", config_path.display());
            println!("Remove it first if you want to reinitialize.");
            return Ok(());
        }

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&config_path, SAMPLE_CONFIG)?;
        println!("Sample config written to: {}", config_path.display());
        return Ok(());
    }

    // Default: show current config path and status
    let config_path = AgentConfig::default_path();
    println!("Config path: {}", config_path.display());
    if config_path.exists() {
        let config = AgentConfig::load_from(&config_path)?;
        println!("JDKs:        {}", config.jdks.len());
        let mut labels: Vec<_> = config.jdks.iter().collect();
        labels.sort();
        for (label, jdk_path) in labels {
            println!("  - {} ({})", label, jdk_path);
        }
    } else {
        println!("Status:      not found");
        println!("Run `grailsw-runner config --init` to create one.");
    }

    Ok(())
}
