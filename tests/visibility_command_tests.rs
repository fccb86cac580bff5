use assert_cmd::prelude::*;
use predicates::prelude::*;

mod common;
use common::{assertions, project::*};

#[cfg(test)]
mod visibility_command_tests {
    use super::*;

    fn config_json(project: &TestProject) -> anyhow::Result<serde_json::Value> {
        let content = std::fs::read_to_string(project.config_file())?;
        Ok(serde_json::from_str(&content)?)
    }

    #[test]
    fn test_toolbar_starts_disabled() -> anyhow::Result<()> {
        let project = TestProject::new()?;

        project
            .command()?
            .arg("config")
            .assert()
            .success()
            .stdout(predicate::str::is_match(r"enabled\s+false")?);

        Ok(())
    }

    #[test]
    fn test_enable_renders_toolbar_and_persists() -> anyhow::Result<()> {
        let project = TestProject::new()?;

        project
            .command()?
            .arg("enable")
            .assert()
            .success()
            .stdout(predicate::str::contains("Toolbar enabled"))
            .stdout(predicate::str::contains(
                "(search) log  (upload) commit  (sync) fetch  push",
            ));

        assert_eq!(config_json(&project)?["enabled"], true);
        Ok(())
    }

    #[test]
    fn test_toggle_flips_the_flag() -> anyhow::Result<()> {
        let project = TestProject::new()?;

        project
            .command()?
            .arg("toggle")
            .assert()
            .success()
            .stdout(predicate::str::contains("Toolbar enabled"));

        project
            .command()?
            .arg("toggle")
            .assert()
            .success()
            .stdout(predicate::str::contains("Toolbar disabled"))
            .stdout(predicate::str::contains("(search)").not());

        assert_eq!(config_json(&project)?["enabled"], false);
        Ok(())
    }

    #[test]
    fn test_disable_after_enable() -> anyhow::Result<()> {
        let project = TestProject::new()?;
        project.command()?.arg("enable").assert().success();

        project
            .command()?
            .arg("disable")
            .assert()
            .success()
            .stdout(predicate::str::contains("Toolbar disabled"));

        assert_eq!(config_json(&project)?["enabled"], false);
        Ok(())
    }

    #[test]
    fn test_config_sets_executable() -> anyhow::Result<()> {
        let project = TestProject::new()?;

        project
            .command()?
            .args(["config", "--executable", "/opt/tgit/TortoiseGitProc"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "Executable set to /opt/tgit/TortoiseGitProc",
            ));

        assert_eq!(
            config_json(&project)?["executable"],
            "/opt/tgit/TortoiseGitProc"
        );
        Ok(())
    }

    #[test]
    fn test_executable_override_is_not_persisted() -> anyhow::Result<()> {
        let project = TestProject::new()?;

        project
            .command_with_executable(std::path::Path::new("/usr/local/bin/tgit"))?
            .arg("enable")
            .assert()
            .success();

        project
            .command_with_executable(std::path::Path::new("/usr/local/bin/tgit"))?
            .arg("config")
            .assert()
            .success()
            .stdout(predicate::str::contains("/usr/local/bin/tgit"))
            .stdout(predicate::str::contains("overridden by REPO_TOOLBAR_EXECUTABLE"));

        assert_ne!(config_json(&project)?["executable"], "/usr/local/bin/tgit");
        Ok(())
    }

    #[test]
    fn test_unreadable_config_fails() -> anyhow::Result<()> {
        let project = TestProject::new()?;
        let config_file = project.config_file();
        std::fs::create_dir_all(config_file.parent().expect("config file has a parent"))?;
        std::fs::write(&config_file, "{ broken")?;

        project
            .command()?
            .arg("enable")
            .assert()
            .failure()
            .stdout(assertions::has_error("Failed to parse config file"));

        Ok(())
    }
}
