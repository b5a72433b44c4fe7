use anyhow::Context;
use serde::Deserialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Crates that must stay free of runtime-specific dependencies.
const FORBIDDEN_DEPENDENCIES: &[(&str, &[&str])] = &[
    (
        "extkit-common",
        &["tokio", "tokio-util", "futures-util", "async-trait", "url"],
    ),
    (
        "extkit-http",
        &["tokio", "tokio-util", "futures-util", "async-trait"],
    ),
];

#[derive(Debug, Deserialize)]
struct Metadata {
    packages: Vec<Package>,
}

#[derive(Debug, Deserialize)]
struct Package {
    name: String,
    dependencies: Vec<Dependency>,
}

#[derive(Debug, Deserialize)]
struct Dependency {
    name: String,
    #[serde(default)]
    kind: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "xtask=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("arch-check") => arch_check(),
        Some(cmd) => anyhow::bail!("Unknown xtask command: {cmd}"),
        None => anyhow::bail!("Usage: cargo xtask <command>\n\nCommands:\n  arch-check"),
    }
}

fn arch_check() -> anyhow::Result<()> {
    tracing::info!("Running cargo metadata");
    let output = std::process::Command::new("cargo")
        .args(["metadata", "--format-version", "1", "--no-deps"])
        .output()
        .context("running cargo metadata")?;

    if !output.status.success() {
        anyhow::bail!("cargo metadata failed")
    }

    let metadata: Metadata =
        serde_json::from_slice(&output.stdout).context("parsing cargo metadata")?;
    let violations = find_violations(&metadata);
    if !violations.is_empty() {
        for violation in &violations {
            tracing::error!("{violation}");
        }
        anyhow::bail!("arch-check failed with {} violation(s)", violations.len());
    }

    tracing::info!(packages = metadata.packages.len(), "arch-check passed");
    Ok(())
}

/// Normal (non-dev, non-build) dependencies that break a crate's rules.
fn find_violations(metadata: &Metadata) -> Vec<String> {
    let mut violations = Vec::new();
    for package in &metadata.packages {
        let Some((_, forbidden)) = FORBIDDEN_DEPENDENCIES
            .iter()
            .find(|(name, _)| *name == package.name)
        else {
            continue;
        };
        for dependency in &package.dependencies {
            if dependency.kind.is_none() && forbidden.contains(&dependency.name.as_str()) {
                violations.push(format!(
                    "{} must not depend on {}",
                    package.name, dependency.name
                ));
            }
        }
    }
    violations
}
