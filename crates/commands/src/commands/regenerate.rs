//! Regenerate command: refresh the module files from the protocol description

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::Value;

use obsgen_runtime::config::{DEFAULT_MANIFEST_PATH, DEFAULT_PROTOCOL_URL, DEFAULT_SCRIPT_PATH};
use obsgen_runtime::deps::{FileSystem, HttpClient, MessageStyle, UserInterface};

use crate::manifest::{self, DescriptionStyle};
use crate::protocol::ProtocolDocument;
use crate::splice;

/// Where the protocol description comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolSource {
    /// Download it
    Url(String),
    /// Read a local copy
    File(PathBuf),
}

impl std::fmt::Display for ProtocolSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{url}"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Regenerate command arguments (matches CLI parser)
#[derive(Debug, Clone)]
pub struct RegenerateArgs {
    /// Protocol description location
    pub source: ProtocolSource,
    /// Module script holding the generated region
    pub script_path: PathBuf,
    /// Module manifest whose commands are replaced
    pub manifest_path: PathBuf,
    /// Tooltip rendering for field parameters
    pub description_style: DescriptionStyle,
    /// Double backslashes in the embedded protocol copy
    pub escape_backslashes: bool,
    /// Compute everything but write nothing
    pub dry_run: bool,
}

impl Default for RegenerateArgs {
    fn default() -> Self {
        Self {
            source: ProtocolSource::Url(DEFAULT_PROTOCOL_URL.to_string()),
            script_path: PathBuf::from(DEFAULT_SCRIPT_PATH),
            manifest_path: PathBuf::from(DEFAULT_MANIFEST_PATH),
            description_style: DescriptionStyle::default(),
            escape_backslashes: true,
            dry_run: false,
        }
    }
}

/// Dependencies for the regenerate command
pub struct RegenerateDependencies {
    /// User interface for output
    pub ui: Arc<dyn UserInterface>,
    /// HTTP client for downloading the protocol
    pub http_client: Arc<dyn HttpClient>,
    /// File system for the module files
    pub file_system: Arc<dyn FileSystem>,
}

/// What a run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegenerateReport {
    /// Total entries in the new `commands` section
    pub commands: usize,
    /// Entries generated from protocol requests
    pub generated: usize,
    /// Whether the script content differs from before
    pub script_changed: bool,
    /// Whether the manifest content differs from before
    pub manifest_changed: bool,
}

/// Execute the regenerate command with injected dependencies
pub async fn execute_with_deps(
    args: RegenerateArgs,
    deps: Arc<RegenerateDependencies>,
) -> Result<RegenerateReport> {
    deps.ui.print_styled(
        &format!("→ Loading protocol from {}", args.source),
        MessageStyle::Cyan,
    );
    let document = load_protocol(&args.source, &deps).await?;
    tracing::info!(requests = document.requests().len(), "Loaded protocol description");

    // Both outputs are computed before anything is written.
    let script = read_file(&deps, &args.script_path)?;
    let payload = splice::embed_payload(document.raw(), args.escape_backslashes)
        .context("Failed to serialize protocol description")?;
    let new_script = splice::splice(&script, &payload)
        .with_context(|| format!("Failed to update {}", args.script_path.display()))?;

    let commands = manifest::build_commands(&document, args.description_style)?;
    let fixed = manifest::fixed_commands()?.len();
    let manifest_text = read_file(&deps, &args.manifest_path)?;
    let mut manifest_value: Value = serde_json::from_str(&manifest_text)
        .with_context(|| format!("Failed to parse {}", args.manifest_path.display()))?;
    manifest::apply_commands(&mut manifest_value, &commands)
        .with_context(|| format!("Failed to update {}", args.manifest_path.display()))?;
    let new_manifest = manifest::render_manifest(&manifest_value)?;

    let report = RegenerateReport {
        commands: commands.len(),
        generated: commands.len().saturating_sub(fixed),
        script_changed: new_script != script,
        manifest_changed: new_manifest != manifest_text,
    };
    tracing::info!(
        commands = report.commands,
        generated = report.generated,
        script_changed = report.script_changed,
        manifest_changed = report.manifest_changed,
        "Computed module files"
    );

    if args.dry_run {
        print_dry_run(&deps, &args, &report);
        return Ok(report);
    }

    deps.ui.print(&format!(
        "→ Writing {} and {}",
        args.script_path.display(),
        args.manifest_path.display()
    ));
    deps.file_system.write_string(&args.script_path, &new_script)?;
    deps.file_system.write_string(&args.manifest_path, &new_manifest)?;

    deps.ui
        .print_styled("Files updated successfully.", MessageStyle::Success);
    Ok(report)
}

async fn load_protocol(
    source: &ProtocolSource,
    deps: &Arc<RegenerateDependencies>,
) -> Result<ProtocolDocument> {
    let text = match source {
        ProtocolSource::Url(url) => deps
            .http_client
            .get(url)
            .await
            .with_context(|| format!("Failed to download protocol description from {url}"))?,
        ProtocolSource::File(path) => read_file(deps, path)?,
    };
    ProtocolDocument::parse(&text)
        .with_context(|| format!("Failed to load protocol description from {source}"))
}

// The file system already names the path in its errors.
fn read_file(deps: &RegenerateDependencies, path: &Path) -> Result<String> {
    deps.file_system.read_to_string(path)
}

fn print_dry_run(deps: &RegenerateDependencies, args: &RegenerateArgs, report: &RegenerateReport) {
    let status = |changed: bool| if changed { "would change" } else { "unchanged" };
    deps.ui
        .print_styled("Dry run: no files written", MessageStyle::Warning);
    deps.ui.print(&format!(
        "  {}: {}",
        args.script_path.display(),
        status(report.script_changed)
    ));
    deps.ui.print(&format!(
        "  {}: {} ({} commands, {} generated)",
        args.manifest_path.display(),
        status(report.manifest_changed),
        report.commands,
        report.generated
    ));
}

/// Execute the regenerate command with default dependencies
pub async fn execute(args: RegenerateArgs) -> Result<()> {
    use obsgen_runtime::deps::{RealFileSystem, RealHttpClient};
    use obsgen_runtime::ui::RealUserInterface;

    let deps = Arc::new(RegenerateDependencies {
        ui: Arc::new(RealUserInterface),
        http_client: Arc::new(RealHttpClient::new()?),
        file_system: Arc::new(RealFileSystem),
    });

    execute_with_deps(args, deps).await.map(|_| ())
}

#[cfg(test)]
#[path = "regenerate_tests.rs"]
mod tests;
