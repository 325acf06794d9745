//! End-to-end orchestration against a scripted engine.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use wpackio_bundler::{
    AssetStats, Build, BuildError, BuildOutcome, BuildStatus, CompilationStats, CompletionCallback,
    Compiler, Engine, EngineError,
};
use wpackio_config::{EngineConfiguration, FileConfig, Mode, ProjectConfig, ServerConfig};

#[derive(Clone)]
enum Script {
    Stats(CompilationStats),
    Fatal(&'static str),
    Silent,
}

/// Engine that answers every run with the same scripted result, from a
/// separate thread like a real out-of-process engine would.
struct ScriptedEngine {
    script: Script,
    submissions: AtomicUsize,
    last_mode: Mutex<Option<Mode>>,
}

impl ScriptedEngine {
    fn new(script: Script) -> Arc<Self> {
        Arc::new(Self {
            script,
            submissions: AtomicUsize::new(0),
            last_mode: Mutex::new(None),
        })
    }

    fn submissions(&self) -> usize {
        self.submissions.load(Ordering::SeqCst)
    }
}

impl Engine for ScriptedEngine {
    fn submit(&self, config: EngineConfiguration) -> Result<Box<dyn Compiler>, EngineError> {
        self.submissions.fetch_add(1, Ordering::SeqCst);
        *self.last_mode.lock().unwrap() = Some(config.mode);
        Ok(Box::new(ScriptedCompiler(self.script.clone())))
    }
}

struct ScriptedCompiler(Script);

impl Compiler for ScriptedCompiler {
    fn run(self: Box<Self>, done: CompletionCallback) {
        std::thread::spawn(move || match self.0 {
            Script::Stats(stats) => done(Ok(stats)),
            Script::Fatal(message) => done(Err(EngineError::fatal(message))),
            Script::Silent => drop(done),
        });
    }
}

fn project() -> ProjectConfig {
    ProjectConfig::new("Demo", "demo")
        .with_file(FileConfig::new("app").with_entry("main", "src/app/index.js"))
}

fn build_with(engine: Arc<ScriptedEngine>) -> Build {
    Build::new(
        project(),
        ServerConfig::default(),
        PathBuf::from("/srv/wp-content/plugins/demo"),
        engine,
    )
}

fn clean_stats() -> CompilationStats {
    CompilationStats::default()
        .with_asset(AssetStats::new("main.js", 2048).with_chunk_name("main"))
        .with_entrypoint("main", &["main.js"])
}

#[tokio::test]
async fn scenario_a_clean_build_is_success_with_summary() {
    let engine = ScriptedEngine::new(Script::Stats(clean_stats()));
    let outcome = build_with(engine.clone()).build().await.unwrap();

    assert_eq!(outcome.status(), BuildStatus::Success);
    let log = outcome.log();
    assert!(log.contains("main.js"));
    assert!(log.contains("Entrypoint main = main.js"));
    assert!(!log.contains("Hash:"));
    assert_eq!(engine.submissions(), 1);
}

#[tokio::test]
async fn builds_are_always_production() {
    let engine = ScriptedEngine::new(Script::Stats(clean_stats()));
    build_with(engine.clone()).build().await.unwrap();
    assert_eq!(*engine.last_mode.lock().unwrap(), Some(Mode::Production));
}

#[tokio::test]
async fn scenario_b_warnings_only_is_warn() {
    let stats = clean_stats().with_warning("Unused variable x");
    let outcome = build_with(ScriptedEngine::new(Script::Stats(stats)))
        .build()
        .await
        .unwrap();

    assert_eq!(
        outcome,
        BuildOutcome::Warn {
            log: "Unused variable x".into()
        }
    );
}

#[tokio::test]
async fn scenario_c_errors_fail_and_ignore_warnings() {
    let stats = clean_stats()
        .with_error("Module not found: './foo'")
        .with_warning("Unused variable x");
    let outcome = build_with(ScriptedEngine::new(Script::Stats(stats)))
        .build()
        .await
        .unwrap();

    assert_eq!(
        outcome,
        BuildOutcome::Failed {
            errors: vec!["Module not found: './foo'".into()]
        }
    );

    match outcome.into_result() {
        Err(BuildError::Compilation { errors }) => {
            assert_eq!(errors.join("\n"), "Module not found: './foo'");
        }
        other => panic!("expected compilation error, got {other:?}"),
    }
}

#[tokio::test]
async fn scenario_d_engine_failure_is_a_distinct_error() {
    let engine = ScriptedEngine::new(Script::Fatal("configuration is unusable"));
    let err = build_with(engine).build().await.unwrap_err();

    match err {
        BuildError::Engine(EngineError::Fatal { message }) => {
            assert_eq!(message, "configuration is unusable");
        }
        other => panic!("expected engine error, got {other:?}"),
    }
}

#[tokio::test]
async fn dropped_callback_is_an_engine_error() {
    let err = build_with(ScriptedEngine::new(Script::Silent))
        .build()
        .await
        .unwrap_err();
    assert!(matches!(err, BuildError::Engine(EngineError::CallbackDropped)));
}

#[tokio::test]
async fn invalid_config_never_reaches_the_engine() {
    let engine = ScriptedEngine::new(Script::Stats(clean_stats()));
    let build = Build::new(
        ProjectConfig::new("Demo", "demo"),
        ServerConfig::default(),
        PathBuf::from("/srv/wp-content/plugins/demo"),
        engine.clone(),
    );

    let err = build.build().await.unwrap_err();
    assert!(matches!(err, BuildError::Config(_)));
    assert_eq!(engine.submissions(), 0);
}

#[tokio::test]
async fn repeated_builds_are_identical() {
    let stats = clean_stats().with_warning("a").with_warning("b");
    let engine = ScriptedEngine::new(Script::Stats(stats));
    let build = build_with(engine.clone());

    let first = build.build().await.unwrap();
    let second = build.build().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(engine.submissions(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_builds_run_independently() {
    let engine = ScriptedEngine::new(Script::Stats(clean_stats()));
    let build = Arc::new(build_with(engine.clone()));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let build = Arc::clone(&build);
            tokio::spawn(async move { build.build().await.unwrap() })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().status(), BuildStatus::Success);
    }
    assert_eq!(engine.submissions(), 4);
}

#[tokio::test]
async fn multi_compiler_children_are_classified() {
    let mut app = clean_stats().with_warning("app warning");
    app.name = Some("app".into());
    let mut admin = clean_stats().with_error("admin error");
    admin.name = Some("admin".into());
    let stats = CompilationStats::default().with_child(app).with_child(admin);

    let outcome = build_with(ScriptedEngine::new(Script::Stats(stats)))
        .build()
        .await
        .unwrap();
    assert_eq!(
        outcome,
        BuildOutcome::Failed {
            errors: vec!["admin error".into()]
        }
    );
}
