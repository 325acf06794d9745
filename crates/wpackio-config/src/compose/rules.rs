//! Module rules for a file group.

use serde_json::json;

use super::types::{LoaderConfig, Mode, RuleConfig};
use crate::project::{FileConfig, ProjectConfig};

const NODE_MODULES: &str = r"[\\/]node_modules[\\/]";

pub(crate) fn module_rules(project: &ProjectConfig, file: &FileConfig, mode: Mode) -> Vec<RuleConfig> {
    let mut rules = vec![javascript_rule(project, mode)];

    if file.has_typescript() {
        rules.push(typescript_rule(project, mode));
    }

    rules.push(style_rule(r"\.css$", mode, None));

    if project.has_sass {
        rules.push(style_rule(
            r"\.s(a|c)ss$",
            mode,
            Some(LoaderConfig::new("sass-loader").with_options(json!({ "sourceMap": true }))),
        ));
    }

    rules.push(RuleConfig {
        test: r"\.(png|jpe?g|gif|svg|webp|woff2?|ttf|eot|otf)$".to_string(),
        exclude: None,
        use_: Vec::new(),
        kind: Some("asset/resource".to_string()),
    });

    rules
}

fn babel_presets(project: &ProjectConfig, typescript: bool) -> Vec<&'static str> {
    let mut presets = vec!["@wpackio/base"];
    if project.has_react {
        presets.push("@babel/preset-react");
    }
    if project.has_flow {
        presets.push("@babel/preset-flow");
    }
    if typescript {
        presets.push("@babel/preset-typescript");
    }
    presets
}

fn babel_loader(project: &ProjectConfig, mode: Mode, typescript: bool) -> LoaderConfig {
    LoaderConfig::new("babel-loader").with_options(json!({
        "cacheDirectory": true,
        "presets": babel_presets(project, typescript),
        "envName": mode.to_string(),
    }))
}

fn javascript_rule(project: &ProjectConfig, mode: Mode) -> RuleConfig {
    RuleConfig {
        test: r"\.m?jsx?$".to_string(),
        exclude: Some(NODE_MODULES.to_string()),
        use_: vec![babel_loader(project, mode, false)],
        kind: None,
    }
}

fn typescript_rule(project: &ProjectConfig, mode: Mode) -> RuleConfig {
    RuleConfig {
        test: r"\.tsx?$".to_string(),
        exclude: Some(NODE_MODULES.to_string()),
        use_: vec![babel_loader(project, mode, true)],
        kind: None,
    }
}

fn style_rule(test: &str, mode: Mode, preprocessor: Option<LoaderConfig>) -> RuleConfig {
    let first = if mode.is_dev() {
        LoaderConfig::new("style-loader")
    } else {
        LoaderConfig::new("mini-css-extract-plugin")
    };

    let import_loaders = if preprocessor.is_some() { 2 } else { 1 };
    let mut use_ = vec![
        first,
        LoaderConfig::new("css-loader").with_options(json!({
            "importLoaders": import_loaders,
            "sourceMap": true,
        })),
        LoaderConfig::new("postcss-loader").with_options(json!({ "sourceMap": true })),
    ];
    use_.extend(preprocessor);

    RuleConfig {
        test: test.to_string(),
        exclude: None,
        use_,
        kind: None,
    }
}
