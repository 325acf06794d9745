//! Configuration composer.
//!
//! Turns a [`ProjectConfig`], a [`ServerConfig`] and the working directory
//! into an [`EngineConfiguration`]: one compilation per file group, with
//! output locations and public paths derived the way WordPress serves them.

mod rules;
mod types;

pub use types::*;

use std::path::{Component, Path};

use crate::error::{ConfigError, Result};
use crate::project::{FileConfig, ProjectConfig};
use crate::server::ServerConfig;

/// Compose an engine configuration.
///
/// `cwd` must be absolute; relative paths in the project config are resolved
/// against it. `is_dev` selects development mode (dev-server public paths,
/// unhashed filenames, injected styles) over production mode.
///
/// # Example
///
/// ```
/// use wpackio_config::{compose, FileConfig, Mode, ProjectConfig, ServerConfig};
/// use std::path::Path;
///
/// let project = ProjectConfig::new("Demo", "demo")
///     .with_file(FileConfig::new("app").with_entry("main", "src/main.js"));
/// let config = compose(&project, &ServerConfig::default(), Path::new("/srv/demo"), false).unwrap();
///
/// assert_eq!(config.mode, Mode::Production);
/// assert_eq!(
///     config.compilations[0].output.public_path,
///     "/wp-content/plugins/demo/dist/app/"
/// );
/// ```
pub fn compose(
    project: &ProjectConfig,
    server: &ServerConfig,
    cwd: &Path,
    is_dev: bool,
) -> Result<EngineConfiguration> {
    if !cwd.is_absolute() {
        return Err(ConfigError::RelativeContext(cwd.to_path_buf()));
    }

    if project.files.is_empty() {
        return Err(ConfigError::missing(
            "files",
            "Add at least one file group with an entry",
        ));
    }

    let mode = Mode::from_dev_flag(is_dev);
    let compilations = project
        .files
        .iter()
        .map(|file| compose_file(project, server, cwd, file, mode))
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(
        %mode,
        compilations = compilations.len(),
        context = %cwd.display(),
        "composed engine configuration"
    );

    Ok(EngineConfiguration {
        mode,
        context: cwd.to_path_buf(),
        compilations,
    })
}

fn compose_file(
    project: &ProjectConfig,
    server: &ServerConfig,
    cwd: &Path,
    file: &FileConfig,
    mode: Mode,
) -> Result<CompilationConfig> {
    if file.entry.is_empty() {
        return Err(ConfigError::missing(
            format!("files.{}.entry", file.name),
            format!("File group '{}' needs at least one entry", file.name),
        ));
    }

    let entry = file
        .entry
        .iter()
        .map(|(name, path)| (name.clone(), request_path(path)))
        .collect();

    let (filename, chunk_filename, devtool) = match mode {
        Mode::Development => ("[name].js", "[name].js", "cheap-module-source-map"),
        Mode::Production => (
            "[name]-[contenthash:8].js",
            "[name]-[contenthash:8].js",
            "source-map",
        ),
    };

    let split_chunks = project.split_chunks_for(file);
    let alias = project
        .alias
        .iter()
        .map(|(name, path)| {
            let resolved = if path.is_absolute() {
                path.clone()
            } else {
                cwd.join(path)
            };
            (name.clone(), resolved)
        })
        .collect();

    Ok(CompilationConfig {
        name: file.name.clone(),
        mode,
        context: cwd.to_path_buf(),
        entry,
        output: OutputConfig {
            path: cwd.join(&project.output_path).join(&file.name),
            public_path: public_path(project, server, &file.name, mode),
            filename: filename.to_string(),
            chunk_filename: chunk_filename.to_string(),
            unique_name: format!("wpackio{}{}", project.slug, file.name),
        },
        devtool: devtool.to_string(),
        externals: project.externals.clone(),
        resolve: ResolveConfig {
            extensions: [".js", ".jsx", ".mjs", ".ts", ".tsx", ".json"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            alias,
        },
        module: ModuleConfig {
            rules: rules::module_rules(project, file, mode),
        },
        optimization: OptimizationConfig {
            minimize: !mode.is_dev(),
            split_chunks: split_chunks.then(|| SplitChunksConfig {
                chunks: "all".to_string(),
            }),
            runtime_chunk: split_chunks.then(|| "single".to_string()),
        },
        wpackio: ShimOptions {
            extract_css: !mode.is_dev(),
            banner: project.banner.clone(),
            error_overlay: mode.is_dev() && project.error_overlay,
        },
    })
}

/// URL prefix under which a file group's assets are served.
///
/// - development: `http://{host}:{port}/wp-content/{plugins|themes}/{slug}/{outputPath}/{name}/`
/// - production: `{distPublicPath}/{name}/` when set, otherwise the
///   root-relative `/wp-content/...` path.
pub fn public_path(project: &ProjectConfig, server: &ServerConfig, name: &str, mode: Mode) -> String {
    let content_path = format!(
        "/wp-content/{}/{}/{}/{}/",
        project.kind.content_dir(),
        project.slug,
        url_segments(&project.output_path),
        name
    );

    match mode {
        Mode::Development => format!(
            "http://{}:{}{}",
            server.host_or_default(),
            server.port,
            content_path
        ),
        Mode::Production => match server.dist_public_path.as_deref() {
            Some(base) => format!("{}/{}/", base.trim_end_matches('/'), name),
            None => content_path,
        },
    }
}

/// Forward-slash form of a relative path, `.` components dropped.
fn url_segments(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Module request for an entry; relative paths get a `./` prefix.
fn request_path(path: &Path) -> String {
    if path.is_absolute() {
        return path.to_string_lossy().into_owned();
    }
    let segments = url_segments(path);
    format!("./{segments}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::ProjectKind;
    use std::path::PathBuf;

    fn project() -> ProjectConfig {
        ProjectConfig::new("Demo", "demo")
            .with_file(FileConfig::new("app").with_entry("main", "src/app/main.js"))
            .with_file(FileConfig::new("admin").with_entry("settings", "./src/admin/index.js"))
    }

    #[test]
    fn relative_context_is_rejected() {
        let result = compose(&project(), &ServerConfig::default(), Path::new("rel"), false);
        assert!(matches!(result, Err(ConfigError::RelativeContext(_))));
    }

    #[test]
    fn empty_files_are_rejected() {
        let project = ProjectConfig::new("Demo", "demo");
        let result = compose(&project, &ServerConfig::default(), Path::new("/srv/demo"), false);
        assert!(result.is_err());
    }

    #[test]
    fn one_compilation_per_file_group() {
        let config =
            compose(&project(), &ServerConfig::default(), Path::new("/srv/demo"), false).unwrap();
        let names: Vec<_> = config.names().collect();
        assert_eq!(names, vec!["app", "admin"]);
        assert_eq!(
            config.compilations[1].output.path,
            PathBuf::from("/srv/demo/dist/admin")
        );
        assert_eq!(config.compilations[0].entry["main"], "./src/app/main.js");
        assert_eq!(config.compilations[1].entry["settings"], "./src/admin/index.js");
    }

    #[test]
    fn production_settings() {
        let config =
            compose(&project(), &ServerConfig::default(), Path::new("/srv/demo"), false).unwrap();
        let app = &config.compilations[0];
        assert_eq!(app.mode, Mode::Production);
        assert_eq!(app.devtool, "source-map");
        assert_eq!(app.output.filename, "[name]-[contenthash:8].js");
        assert!(app.optimization.minimize);
        assert_eq!(app.optimization.runtime_chunk.as_deref(), Some("single"));
        assert!(app.wpackio.extract_css);
        assert!(!app.wpackio.error_overlay);
    }

    #[test]
    fn development_settings() {
        let config =
            compose(&project(), &ServerConfig::default(), Path::new("/srv/demo"), true).unwrap();
        let app = &config.compilations[0];
        assert_eq!(app.mode, Mode::Development);
        assert_eq!(app.output.filename, "[name].js");
        assert!(!app.optimization.minimize);
        assert!(app.wpackio.error_overlay);
        assert_eq!(
            app.output.public_path,
            "http://localhost:3000/wp-content/plugins/demo/dist/app/"
        );
    }

    #[test]
    fn public_path_variants() {
        let mut project = project();
        project.kind = ProjectKind::Theme;
        project.output_path = PathBuf::from("./assets/build");

        let mut server = ServerConfig::default();
        assert_eq!(
            public_path(&project, &server, "app", Mode::Production),
            "/wp-content/themes/demo/assets/build/app/"
        );

        server.dist_public_path = Some("https://cdn.example.com/demo/".into());
        assert_eq!(
            public_path(&project, &server, "app", Mode::Production),
            "https://cdn.example.com/demo/app/"
        );

        server.host = Some("wp.test".into());
        server.port = 4000;
        assert_eq!(
            public_path(&project, &server, "app", Mode::Development),
            "http://wp.test:4000/wp-content/themes/demo/assets/build/app/"
        );
    }

    #[test]
    fn split_chunks_can_be_disabled_per_group() {
        let mut project = project();
        project.files[1].optimize_split_chunks = Some(false);
        let config =
            compose(&project, &ServerConfig::default(), Path::new("/srv/demo"), false).unwrap();
        assert!(config.compilations[0].optimization.split_chunks.is_some());
        assert!(config.compilations[1].optimization.split_chunks.is_none());
        assert!(config.compilations[1].optimization.runtime_chunk.is_none());
    }

    #[test]
    fn aliases_resolve_against_cwd() {
        let mut project = project();
        project.alias.insert("@".into(), PathBuf::from("src"));
        let config =
            compose(&project, &ServerConfig::default(), Path::new("/srv/demo"), false).unwrap();
        assert_eq!(
            config.compilations[0].resolve.alias["@"],
            PathBuf::from("/srv/demo/src")
        );
    }

    #[test]
    fn serializes_engine_field_names() {
        let config =
            compose(&project(), &ServerConfig::default(), Path::new("/srv/demo"), false).unwrap();
        let value = serde_json::to_value(&config.compilations).unwrap();
        let app = &value[0];
        assert_eq!(app["mode"], "production");
        assert!(app["output"].get("publicPath").is_some());
        assert!(app["module"]["rules"][0].get("use").is_some());
        assert!(app["optimization"].get("splitChunks").is_some());
    }
}
