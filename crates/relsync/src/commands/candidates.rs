use std::path::Path;

use relsync_operations::operations::CandidatesOperation;
use relsync_operations::providers::{CargoPinVersionSource, FileSystemWorkspaceIndex};
use relsync_operations::{ConfigOverrides, resolve_config};

use crate::error::Result;
use crate::interaction::choice_label;

pub(crate) fn run(root: &Path, overrides: ConfigOverrides) -> Result<()> {
    let config = resolve_config(root, overrides)?;
    let operation = CandidatesOperation::new(
        CargoPinVersionSource::from_config(&config),
        FileSystemWorkspaceIndex::new(),
    );

    let output = operation.execute(root)?;

    println!("current: {}", output.check.current);
    for candidate in &output.candidates {
        println!("  {}", choice_label(candidate));
    }
    Ok(())
}
