//! Package manager detection.
//!
//! Detection is done once by the caller and the result passed around
//! explicitly; nothing here caches.

use std::fmt;
use std::path::Path;

/// Package manager used to run the engine and to word hints like `yarn build`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PackageManager {
    #[default]
    Npm,
    Yarn,
    Pnpm,
    Bun,
}

impl PackageManager {
    /// Detect the package manager for a project.
    ///
    /// Walks up from `dir`; in each directory the `packageManager` field of
    /// `package.json` wins, then lockfiles (`pnpm-lock.yaml`, `yarn.lock`,
    /// `bun.lockb`/`bun.lock`, `package-lock.json`). The nearest directory
    /// with a hit decides. Falls back to npm.
    pub fn detect(dir: &Path) -> Self {
        for candidate in dir.ancestors() {
            if let Some(pm) = Self::detect_in(candidate) {
                tracing::debug!(
                    package_manager = pm.name(),
                    dir = %candidate.display(),
                    "detected package manager"
                );
                return pm;
            }
        }
        tracing::debug!("no lockfile found, defaulting to npm");
        Self::Npm
    }

    fn detect_in(dir: &Path) -> Option<Self> {
        if let Ok(content) = std::fs::read_to_string(dir.join("package.json")) {
            if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(&content) {
                if let Some(pm) = parsed.get("packageManager").and_then(|v| v.as_str()) {
                    if let Some(found) = Self::from_package_manager_field(pm) {
                        return Some(found);
                    }
                }
            }
        }

        if dir.join("pnpm-lock.yaml").exists() {
            return Some(Self::Pnpm);
        }
        if dir.join("yarn.lock").exists() {
            return Some(Self::Yarn);
        }
        if dir.join("bun.lockb").exists() || dir.join("bun.lock").exists() {
            return Some(Self::Bun);
        }
        if dir.join("package-lock.json").exists() {
            return Some(Self::Npm);
        }

        None
    }

    /// Parse a Corepack `packageManager` value such as `yarn@4.1.0`.
    fn from_package_manager_field(value: &str) -> Option<Self> {
        let name = value.split('@').next().unwrap_or(value);
        match name {
            "npm" => Some(Self::Npm),
            "yarn" => Some(Self::Yarn),
            "pnpm" => Some(Self::Pnpm),
            "bun" => Some(Self::Bun),
            _ => None,
        }
    }

    /// Command that runs the project-local webpack binary.
    pub fn webpack_command(&self) -> Vec<&'static str> {
        match self {
            Self::Npm => vec!["npx", "--no-install", "webpack"],
            Self::Yarn => vec!["yarn", "webpack"],
            Self::Pnpm => vec!["pnpm", "exec", "webpack"],
            Self::Bun => vec!["bunx", "webpack"],
        }
    }

    /// How a user runs a package.json script with this manager.
    pub fn run_script(&self, script: &str) -> String {
        match self {
            Self::Npm => format!("npm run {script}"),
            Self::Yarn => format!("yarn {script}"),
            Self::Pnpm => format!("pnpm {script}"),
            Self::Bun => format!("bun run {script}"),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm",
            Self::Bun => "bun",
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn webpack_commands() {
        assert_eq!(
            PackageManager::Npm.webpack_command(),
            vec!["npx", "--no-install", "webpack"]
        );
        assert_eq!(PackageManager::Yarn.webpack_command(), vec!["yarn", "webpack"]);
        assert_eq!(
            PackageManager::Pnpm.webpack_command(),
            vec!["pnpm", "exec", "webpack"]
        );
        assert_eq!(PackageManager::Bun.webpack_command(), vec!["bunx", "webpack"]);
    }

    #[test]
    fn run_script_wording() {
        assert_eq!(PackageManager::Yarn.run_script("build"), "yarn build");
        assert_eq!(PackageManager::Npm.run_script("build"), "npm run build");
    }

    #[test]
    fn detects_lockfiles() {
        for (lockfile, expected) in [
            ("pnpm-lock.yaml", PackageManager::Pnpm),
            ("yarn.lock", PackageManager::Yarn),
            ("bun.lockb", PackageManager::Bun),
            ("package-lock.json", PackageManager::Npm),
        ] {
            let dir = TempDir::new().unwrap();
            fs::write(dir.path().join(lockfile), "").unwrap();
            assert_eq!(PackageManager::detect(dir.path()), expected, "{lockfile}");
        }
    }

    #[test]
    fn package_manager_field_wins_over_lockfiles() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("yarn.lock"), "").unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{ "packageManager": "pnpm@9.0.0" }"#,
        )
        .unwrap();
        assert_eq!(PackageManager::detect(dir.path()), PackageManager::Pnpm);
    }

    #[test]
    fn walks_up_to_nearest_lockfile() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("yarn.lock"), "").unwrap();
        let nested = dir.path().join("wp-content/plugins/demo");
        fs::create_dir_all(&nested).unwrap();
        assert_eq!(PackageManager::detect(&nested), PackageManager::Yarn);

        fs::write(nested.join("package-lock.json"), "{}").unwrap();
        assert_eq!(PackageManager::detect(&nested), PackageManager::Npm);
    }

    #[test]
    fn unknown_field_falls_through() {
        assert_eq!(PackageManager::from_package_manager_field("deno@2"), None);
        assert_eq!(
            PackageManager::from_package_manager_field("yarn@4.1.0"),
            Some(PackageManager::Yarn)
        );
    }
}
