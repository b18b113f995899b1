use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "filter-import.yaml";

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub seaflow_sfl: Option<PathBuf>,
    pub seaflow_filter: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
    /// Default log filter when RUST_LOG is unset (e.g. "info").
    pub log: Option<String>,
}

/// Load `path`, or `./filter-import.yaml` when no path is given and it exists.
pub fn load_config(path: Option<&Path>) -> Result<Option<Config>> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let p = Path::new(DEFAULT_CONFIG_FILE);
            if p.exists() { p.to_path_buf() } else { return Ok(None); }
        }
    };
    let s = fs::read_to_string(&path).with_context(|| format!("reading config {}", path.display()))?;
    let cfg = parse_config(&s).with_context(|| format!("parsing config {}", path.display()))?;
    Ok(Some(cfg))
}

pub fn parse_config(s: &str) -> Result<Config> {
    Ok(serde_yaml::from_str(s)?)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub seaflow_sfl: PathBuf,
    pub seaflow_filter: PathBuf,
    pub out_dir: PathBuf,
}

/// Merge command-line paths over config paths. Both source trees must be
/// existing directories.
pub fn resolve_paths(
    seaflow_sfl: Option<PathBuf>,
    seaflow_filter: Option<PathBuf>,
    out_dir: Option<PathBuf>,
    cfg: Option<&Config>,
) -> Result<Paths> {
    let cfg = cfg.cloned().unwrap_or_default();
    let seaflow_sfl = pick("--seaflow-sfl", "seaflow_sfl", seaflow_sfl, cfg.seaflow_sfl)?;
    let seaflow_filter = pick("--seaflow-filter", "seaflow_filter", seaflow_filter, cfg.seaflow_filter)?;
    let out_dir = pick("--out-dir", "out_dir", out_dir, cfg.out_dir)?;
    require_dir("--seaflow-sfl", &seaflow_sfl)?;
    require_dir("--seaflow-filter", &seaflow_filter)?;
    Ok(Paths { seaflow_sfl, seaflow_filter, out_dir })
}

fn pick(flag: &str, key: &str, cli: Option<PathBuf>, cfg: Option<PathBuf>) -> Result<PathBuf> {
    cli.or(cfg)
        .ok_or_else(|| anyhow!("{} is required (or set {} in the config file)", flag, key))
}

fn require_dir(flag: &str, path: &Path) -> Result<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(anyhow!("{}: directory '{}' does not exist", flag, path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn parses_all_keys() {
        let cfg = parse_config("seaflow_sfl: /src/sfl\nseaflow_filter: /src/filter\nout_dir: out\nlog: debug\n").unwrap();
        assert_eq!(cfg.seaflow_sfl, Some(PathBuf::from("/src/sfl")));
        assert_eq!(cfg.out_dir, Some(PathBuf::from("out")));
        assert_eq!(cfg.log.as_deref(), Some("debug"));
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(parse_config("seaflow_sf: /typo\n").is_err());
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let tmp = tempdir().unwrap();
        assert!(load_config(Some(tmp.path().join("none.yaml").as_path())).is_err());
    }

    #[test]
    fn command_line_wins_over_config() {
        let tmp = tempdir().unwrap();
        let a = tmp.path().join("a");
        let b = tmp.path().join("b");
        fs::create_dir(&a).unwrap();
        fs::create_dir(&b).unwrap();
        let cfg = Config { seaflow_sfl: Some(b.clone()), seaflow_filter: Some(b.clone()), out_dir: Some(b.join("out")), log: None };

        let paths = resolve_paths(Some(a.clone()), None, None, Some(&cfg)).unwrap();
        assert_eq!(paths.seaflow_sfl, a);
        assert_eq!(paths.seaflow_filter, b);
        assert_eq!(paths.out_dir, b.join("out"));
    }

    #[test]
    fn missing_path_names_the_flag() {
        let err = resolve_paths(None, None, None, None).unwrap_err();
        assert!(err.to_string().contains("--seaflow-sfl"));
    }

    #[test]
    fn source_trees_must_exist() {
        let tmp = tempdir().unwrap();
        let err = resolve_paths(
            Some(tmp.path().join("missing")),
            Some(tmp.path().to_path_buf()),
            Some(tmp.path().join("out")),
            None,
        )
        .unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }
}
