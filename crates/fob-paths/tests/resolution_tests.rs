//! End-to-end alias resolution through the engine
//!
//! Every test lays out a real project in a temp directory and resolves
//! through the built-in module resolver, so extension probing and index
//! files take part exactly as they would in a host.

mod helpers;

use fob_paths::{EngineOptions, PathsConfig, Resolution, ResolveOutcome};
use helpers::{Project, engine, scenario_config};
use std::sync::Arc;

#[tokio::test]
async fn wildcard_alias_resolves_with_extension_probing() {
    let project = Project::new();
    let app = project.file("src/App.tsx", "export default {}");
    let engine = engine(&project, scenario_config(), EngineOptions::default());

    let outcome = engine
        .resolve("~/App", Some(&project.importer("src/main.ts")))
        .await
        .unwrap();

    assert_eq!(outcome, ResolveOutcome::Resolved(app));
    assert!(engine.fallback().calls().is_empty());
}

#[tokio::test]
async fn exact_alias_resolves_without_capture() {
    let project = Project::new();
    let utils = project.file("lib/utils.ts", "export const x = 1");
    let engine = engine(&project, scenario_config(), EngineOptions::default());

    let outcome = engine
        .resolve("utils", Some(&project.importer("src/main.ts")))
        .await
        .unwrap();

    assert_eq!(outcome, ResolveOutcome::Resolved(utils));
}

#[tokio::test]
async fn missing_target_delegates_original_specifier() {
    let project = Project::new();
    project.file("src/App.tsx", "");
    let engine = engine(&project, scenario_config(), EngineOptions::default());
    let importer = project.importer("src/main.ts");

    let outcome = engine.resolve("~/missing", Some(&importer)).await.unwrap();

    assert_eq!(
        outcome,
        ResolveOutcome::Delegated(Some("fallback:~/missing".to_string()))
    );
    assert_eq!(
        engine.fallback().calls(),
        vec![("~/missing".to_string(), importer)]
    );
}

#[tokio::test]
async fn package_rooted_target_delegates_candidate_path() {
    let project = Project::new();
    let config = scenario_config().with_alias("~/vendor/*", ["./node_modules/*"]);
    let engine = engine(&project, config, EngineOptions::default());

    let outcome = engine
        .resolve("~/vendor/lodash", Some(&project.importer("src/main.ts")))
        .await
        .unwrap();

    let candidate = project.path("node_modules/lodash");
    let expected = candidate.to_string_lossy().into_owned();
    assert_eq!(
        outcome,
        ResolveOutcome::Delegated(Some(format!("fallback:{}", expected)))
    );
    assert_eq!(engine.fallback().specifiers(), vec![expected]);
}

#[tokio::test]
async fn package_rooted_candidate_is_delegated_even_when_installed() {
    let project = Project::new();
    project.file("node_modules/lodash/index.js", "module.exports = {}");
    let config = PathsConfig::default().with_alias("lodash-es", ["./node_modules/lodash"]);
    let engine = engine(&project, config, EngineOptions::default());

    let plan = engine
        .plan("lodash-es", Some(&project.importer("main.ts")))
        .await;

    assert_eq!(
        plan,
        Some(Resolution::DelegateToFallback(
            project.path("node_modules/lodash").to_string_lossy().into_owned()
        ))
    );
}

#[tokio::test]
async fn declaration_targets_are_dropped_before_resolution() {
    let project = Project::new();
    project.file("types/App.d.ts", "export {}");
    let app = project.file("src/App.tsx", "");
    let config = PathsConfig::default().with_alias("~/*", ["./types/*", "./src/*"]);
    let engine = engine(&project, config, EngineOptions::default());

    assert_eq!(engine.matchers().len(), 1);
    assert_eq!(engine.matchers()[0].targets(), ["./src/*"]);
    assert_eq!(engine.diagnostics().len(), 1);

    let outcome = engine
        .resolve("~/App", Some(&project.importer("src/main.ts")))
        .await
        .unwrap();
    assert_eq!(outcome, ResolveOutcome::Resolved(app));
}

#[tokio::test]
async fn first_resolving_target_wins() {
    let project = Project::new();
    let second = project.file("b/thing.ts", "");
    project.file("c/thing.ts", "");
    let config = PathsConfig::default().with_alias("@/*", ["./a/*", "./b/*", "./c/*"]);
    let engine = engine(&project, config, EngineOptions::default());

    let outcome = engine
        .resolve("@/thing", Some(&project.importer("main.ts")))
        .await
        .unwrap();
    assert_eq!(outcome, ResolveOutcome::Resolved(second));
}

#[tokio::test]
async fn non_module_assets_resolve_by_plain_file_check() {
    let project = Project::new();
    let css = project.file("src/styles/app.css", "body {}");
    let engine = engine(&project, scenario_config(), EngineOptions::default());

    let outcome = engine
        .resolve("~/styles/app.css", Some(&project.importer("src/main.ts")))
        .await
        .unwrap();
    assert_eq!(outcome, ResolveOutcome::Resolved(css));
}

#[tokio::test]
async fn longer_prefix_beats_earlier_declaration() {
    let project = Project::new();
    project.file("src/components/Button.tsx", "");
    let button = project.file("ui/Button.tsx", "");
    let config = PathsConfig::default()
        .with_alias("@/*", ["./src/*"])
        .with_alias("@/components/*", ["./ui/*"]);
    let engine = engine(&project, config, EngineOptions::default());

    let outcome = engine
        .resolve("@/components/Button", Some(&project.importer("main.ts")))
        .await
        .unwrap();
    assert_eq!(outcome, ResolveOutcome::Resolved(button));
}

#[tokio::test]
async fn directory_target_resolves_index() {
    let project = Project::new();
    let index = project.file("src/components/index.ts", "");
    let engine = engine(&project, scenario_config(), EngineOptions::default());

    let outcome = engine
        .resolve("~/components", Some(&project.importer("src/main.ts")))
        .await
        .unwrap();
    assert_eq!(outcome, ResolveOutcome::Resolved(index));
}

#[tokio::test]
async fn declined_requests_never_reach_the_fallback() {
    let project = Project::new();
    let engine = engine(&project, scenario_config(), EngineOptions::default());

    assert_eq!(engine.resolve("~/App", None).await.unwrap(), ResolveOutcome::Declined);
    assert_eq!(
        engine
            .resolve("\0commonjsHelpers.js", Some(&project.importer("main.ts")))
            .await
            .unwrap(),
        ResolveOutcome::Declined
    );
    assert!(engine.fallback().calls().is_empty());
}

#[tokio::test]
async fn custom_virtual_prefix() {
    let project = Project::new();
    let options = EngineOptions::default().with_virtual_prefix("virtual:");
    let engine = engine(&project, scenario_config(), options);
    let importer = project.importer("main.ts");

    assert_eq!(
        engine.resolve("virtual:entry", Some(&importer)).await.unwrap(),
        ResolveOutcome::Declined
    );
    // The default NUL prefix is no longer special.
    assert!(matches!(
        engine.resolve("\0entry", Some(&importer)).await.unwrap(),
        ResolveOutcome::Delegated(_)
    ));
}

#[tokio::test]
async fn repeated_resolution_is_idempotent() {
    let project = Project::new();
    project.file("src/App.tsx", "");
    let engine = engine(&project, scenario_config(), EngineOptions::default());
    let importer = project.importer("src/main.ts");

    for specifier in ["~/App", "utils", "~/missing", "react"] {
        let first = engine.resolve(specifier, Some(&importer)).await.unwrap();
        let second = engine.resolve(specifier, Some(&importer)).await.unwrap();
        assert_eq!(first, second, "{}", specifier);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_resolves_share_one_engine() {
    let project = Project::new();
    let app = project.file("src/App.tsx", "");
    let utils = project.file("lib/utils.ts", "");
    let engine = Arc::new(engine(&project, scenario_config(), EngineOptions::default()));
    let importer = project.importer("src/main.ts");

    let mut handles = Vec::new();
    for i in 0..32 {
        let engine = Arc::clone(&engine);
        let importer = importer.clone();
        handles.push(tokio::spawn(async move {
            let specifier = match i % 3 {
                0 => "~/App",
                1 => "utils",
                _ => "react",
            };
            (i, engine.resolve(specifier, Some(&importer)).await.unwrap())
        }));
    }

    for handle in handles {
        let (i, outcome) = handle.await.unwrap();
        let expected = match i % 3 {
            0 => ResolveOutcome::Resolved(app.clone()),
            1 => ResolveOutcome::Resolved(utils.clone()),
            _ => ResolveOutcome::Delegated(Some("fallback:react".to_string())),
        };
        assert_eq!(outcome, expected);
    }

    assert_eq!(engine.fallback().calls().len(), 10);
}
