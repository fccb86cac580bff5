use crate::core::{
    config::{ToolbarConfig, EXECUTABLE_ENV},
    error::Result,
    print_section_header, print_success,
};
use colored::*;
use std::path::PathBuf;

pub fn execute_config(executable: Option<PathBuf>) -> Result<()> {
    let mut config = ToolbarConfig::load_or_create()?;

    if let Some(executable) = executable {
        config.set_executable(&executable)?;
        print_success(&format!("Executable set to {}", executable.display()));
    }

    print_section_header("Configuration");
    print_setting("file", &ToolbarConfig::config_file()?.display().to_string());
    print_setting("executable", &config.effective_executable().display().to_string());
    print_setting("enabled", &config.enabled.to_string());
    print_setting("packages", &config.layout.packages_dir);
    print_setting("assets", &config.layout.assets_dir);
    if config.effective_executable() != config.executable {
        println!(
            "\n{}",
            format!("executable overridden by {EXECUTABLE_ENV}").bright_black()
        );
    }
    println!();

    Ok(())
}

fn print_setting(name: &str, value: &str) {
    println!("{}{}", format!("{name:<12}").bright_black(), value.white());
}
