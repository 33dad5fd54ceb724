//! Engines built from tsconfig.json with the built-in fallback resolver

mod helpers;

use fob_paths::{
    CatchAllPolicy, ConfigError, DEFAULT_TSCONFIG, EngineOptions, NodeModuleResolver,
    NodeModulesFallback, ResolutionEngine, ResolveOutcome, find_tsconfig,
};
use helpers::{Project, test_runtime};
use std::sync::Arc;

async fn engine_from(
    project: &Project,
    options: EngineOptions,
) -> Result<ResolutionEngine<NodeModulesFallback>, ConfigError> {
    let runtime = test_runtime();
    let modules = Arc::new(NodeModuleResolver::new());

    ResolutionEngine::from_project(
        &project.path(DEFAULT_TSCONFIG),
        options,
        modules.clone(),
        runtime.clone(),
        NodeModulesFallback::new(runtime, modules),
    )
    .await
}

fn monorepo() -> Project {
    let project = Project::new();
    project.file(
        "tsconfig.base.json",
        r#"{
            "compilerOptions": {
                "baseUrl": ".",
                "paths": {
                    "@app/*": ["./packages/app/src/*"],
                    "@vendor/*": ["./node_modules/*"],
                    "@types/*": ["./types/*"],
                },
            },
        }"#,
    );
    project.file(
        "tsconfig.json",
        r#"{
            // app-level config
            "extends": "./tsconfig.base.json",
        }"#,
    );
    project.file("packages/app/src/routes/home.tsx", "export default {}");
    project.file("packages/app/src/main.ts", "");
    project.file("node_modules/lodash/package.json", r#"{ "main": "lodash.js" }"#);
    project.file("node_modules/lodash/lodash.js", "");
    project
}

#[tokio::test]
async fn aliases_come_from_extended_config() {
    let project = monorepo();
    let engine = engine_from(&project, EngineOptions::default()).await.unwrap();

    assert_eq!(engine.base_directory(), project.root());
    let patterns: Vec<_> = engine.matchers().iter().map(|m| m.raw()).collect();
    assert_eq!(patterns, vec!["@app/*", "@vendor/*"]);

    let outcome = engine
        .resolve(
            "@app/routes/home",
            Some(&project.importer("packages/app/src/main.ts")),
        )
        .await
        .unwrap();
    assert_eq!(
        outcome,
        ResolveOutcome::Resolved(project.path("packages/app/src/routes/home.tsx"))
    );
}

#[tokio::test]
async fn vendor_alias_finishes_in_node_modules() {
    let project = monorepo();
    let engine = engine_from(&project, EngineOptions::default()).await.unwrap();

    let outcome = engine
        .resolve(
            "@vendor/lodash",
            Some(&project.importer("packages/app/src/main.ts")),
        )
        .await
        .unwrap();
    assert_eq!(
        outcome,
        ResolveOutcome::Delegated(Some(project.path("node_modules/lodash/lodash.js")))
    );
}

#[tokio::test]
async fn bare_specifier_falls_through_to_node_modules() {
    let project = monorepo();
    let engine = engine_from(&project, EngineOptions::default()).await.unwrap();
    let importer = project.importer("packages/app/src/main.ts");

    assert_eq!(
        engine.resolve("lodash", Some(&importer)).await.unwrap(),
        ResolveOutcome::Delegated(Some(project.path("node_modules/lodash/lodash.js")))
    );
    assert_eq!(
        engine.resolve("left-pad", Some(&importer)).await.unwrap(),
        ResolveOutcome::Delegated(None)
    );
}

#[tokio::test]
async fn package_exports_pick_the_entry_point() {
    let project = monorepo();
    project.file(
        "node_modules/pkg/package.json",
        r#"{
            "name": "pkg",
            "main": "./dist/cjs.js",
            "exports": {
                ".": { "import": "./dist/esm.js", "require": "./dist/cjs.js" },
                "./utils": { "import": "./dist/utils.mjs" }
            }
        }"#,
    );
    project.file("node_modules/pkg/dist/esm.js", "");
    project.file("node_modules/pkg/dist/cjs.js", "");
    project.file("node_modules/pkg/dist/utils.mjs", "");

    let engine = engine_from(&project, EngineOptions::default()).await.unwrap();
    let importer = project.importer("packages/app/src/main.ts");
    let esm = ResolveOutcome::Delegated(Some(project.path("node_modules/pkg/dist/esm.js")));

    assert_eq!(engine.resolve("pkg", Some(&importer)).await.unwrap(), esm);
    assert_eq!(engine.resolve("@vendor/pkg", Some(&importer)).await.unwrap(), esm);
    assert_eq!(
        engine.resolve("@vendor/pkg/utils", Some(&importer)).await.unwrap(),
        ResolveOutcome::Delegated(Some(project.path("node_modules/pkg/dist/utils.mjs")))
    );
}

#[tokio::test]
async fn catch_all_policy_applies_to_loaded_config() {
    let project = Project::new();
    project.file(
        "tsconfig.json",
        r#"{ "compilerOptions": { "paths": { "*": ["./src/*"], "~/*": ["./src/*"] } } }"#,
    );
    let project_src = project.file("src/feature.ts", "");

    let accepting = engine_from(&project, EngineOptions::default()).await.unwrap();
    assert_eq!(accepting.matchers().len(), 2);
    assert_eq!(
        accepting
            .resolve("feature", Some(&project.importer("main.ts")))
            .await
            .unwrap(),
        ResolveOutcome::Resolved(project_src)
    );

    let rejecting = engine_from(
        &project,
        EngineOptions::default().with_catch_all(CatchAllPolicy::Reject),
    )
    .await
    .unwrap();
    let patterns: Vec<_> = rejecting.matchers().iter().map(|m| m.raw()).collect();
    assert_eq!(patterns, vec!["~/*"]);
}

#[tokio::test]
async fn find_tsconfig_from_nested_source_dir() {
    let project = monorepo();
    let runtime = test_runtime();

    let found = find_tsconfig(
        runtime.as_ref(),
        &project.path("packages/app/src/routes"),
        DEFAULT_TSCONFIG,
    )
    .await
    .unwrap();
    assert_eq!(found, project.path("tsconfig.json"));
}

#[tokio::test]
async fn missing_project_is_reported() {
    let project = Project::new();
    let err = engine_from(&project, EngineOptions::default())
        .await
        .err()
        .unwrap();
    assert!(matches!(err, ConfigError::NotFound { .. }));
}
