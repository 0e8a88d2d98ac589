use std::path::{Path, PathBuf};

use anyhow::Context;
use pf_config::ForgeConfig;

use crate::cli::GlobalFlags;

const DATA_DIR_NAME: &str = ".promptforge";

/// Load `.env`, then layered config, then apply the `--data-dir` override.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<ForgeConfig> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let root = project_root(flags.data_dir.as_deref(), &cwd);

    load_project_dotenv(&root)?;

    let mut config = ForgeConfig::from_figment(ForgeConfig::figment_for(&root))
        .context("failed to load promptforge configuration")?;
    if let Some(data_dir) = &flags.data_dir {
        config.storage.data_dir.clone_from(data_dir);
    }
    Ok(config)
}

/// The directory whose `.env` and `.promptforge/config.toml` apply. An
/// explicit `.promptforge` data dir points at its parent; anything else
/// falls back to the working directory.
fn project_root(data_dir: Option<&str>, cwd: &Path) -> PathBuf {
    if let Some(dir) = data_dir {
        let path = PathBuf::from(dir);
        if path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name == DATA_DIR_NAME)
            && let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            return parent.to_path_buf();
        }
    }
    cwd.to_path_buf()
}

fn load_project_dotenv(root: &Path) -> anyhow::Result<()> {
    let env_path = root.join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
        return Ok(());
    }

    dotenvy::dotenv().ok();
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::project_root;

    #[test]
    fn data_dir_named_promptforge_resolves_to_parent() {
        let root = project_root(Some("/work/app/.promptforge"), Path::new("/elsewhere"));
        assert_eq!(root, PathBuf::from("/work/app"));
    }

    #[test]
    fn other_data_dirs_fall_back_to_cwd() {
        let root = project_root(Some("/tmp/forge-data"), Path::new("/work"));
        assert_eq!(root, PathBuf::from("/work"));
    }

    #[test]
    fn relative_promptforge_dir_uses_cwd() {
        let root = project_root(Some(".promptforge"), Path::new("/work"));
        assert_eq!(root, PathBuf::from("/work"));
    }

    #[test]
    fn missing_data_dir_uses_cwd() {
        assert_eq!(project_root(None, Path::new("/work")), PathBuf::from("/work"));
    }
}
