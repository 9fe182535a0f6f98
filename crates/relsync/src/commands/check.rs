use std::path::Path;

use relsync_operations::operations::{CheckOperation, CheckOutput};
use relsync_operations::providers::{CargoPinVersionSource, FileSystemWorkspaceIndex};
use relsync_operations::{ConfigOverrides, resolve_config};

use crate::error::Result;

pub(crate) fn run(root: &Path, overrides: ConfigOverrides) -> Result<()> {
    let config = resolve_config(root, overrides)?;
    let operation = CheckOperation::new(
        CargoPinVersionSource::from_config(&config),
        FileSystemWorkspaceIndex::new(),
    );

    let output = operation.execute(root)?;
    print_check(&output);
    Ok(())
}

fn print_check(output: &CheckOutput) {
    println!("upstream: {}", output.pinned);
    println!("workspace: {} ({})", output.current, output.current.dist_tag());
    println!("packages: {}", output.workspace.packages.len());

    if output.drift.is_empty() {
        println!("All manifests agree with the root version.");
        return;
    }

    println!();
    println!("Members out of step with the root (fixed by the next release):");
    for drift in &output.drift {
        println!(
            "  {} {}",
            drift.package,
            drift.version.as_deref().unwrap_or("<no version>")
        );
    }
}
