use std::path::Path;

use clap::Args;
use relsync_core::ReleaseClass;
use relsync_operations::operations::{
    AbortReason, ReleaseInput, ReleaseOperation, ReleaseOutcome, ReleaseOutput, ReleasePlan,
};
use relsync_operations::providers::{
    CargoPinVersionSource, FileSystemManifestStore, FileSystemWorkspaceIndex, Git2Provider,
};
use relsync_operations::traits::{ChoicePrompter, ConfirmPrompter};
use relsync_operations::{ConfigOverrides, ResolvedConfig, resolve_config};

use crate::error::Result;
use crate::interaction::{NonInteractivePrompter, PromptMode, TerminalPrompter};

#[derive(Args, Debug)]
pub(crate) struct ReleaseArgs {
    /// Release class to apply instead of prompting
    #[arg(long, value_enum)]
    class: Option<ReleaseClass>,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,

    /// Show what would change without writing anything
    #[arg(long)]
    dry_run: bool,

    /// Do not commit or tag after writing the manifests
    #[arg(long)]
    no_git: bool,
}

pub(crate) fn run(root: &Path, overrides: ConfigOverrides, args: ReleaseArgs) -> Result<()> {
    let config = resolve_config(
        root,
        ConfigOverrides {
            no_git: overrides.no_git || args.no_git,
            ..overrides
        },
    )?;
    let input = ReleaseInput {
        class: args.class,
        assume_yes: args.yes,
        dry_run: args.dry_run,
        git: config.git,
    };

    let outcome = match PromptMode::detect() {
        PromptMode::Terminal => execute(&config, &input, TerminalPrompter, TerminalPrompter)?,
        PromptMode::Disabled(reason) => {
            tracing::debug!(%reason, "prompts disabled");
            execute(&config, &input, NonInteractivePrompter, NonInteractivePrompter)?
        }
    };

    match outcome {
        ReleaseOutcome::Aborted(AbortReason::NoSelection) => {
            println!("No version selected; nothing was changed.");
        }
        ReleaseOutcome::Aborted(AbortReason::Declined) => {
            println!("Release declined; nothing was changed.");
        }
        ReleaseOutcome::DryRun(plan) => {
            print_plan(&plan, input.git);
            println!();
            println!("Dry run: no files were written.");
        }
        ReleaseOutcome::Released(output) => print_released(&output),
    }
    Ok(())
}

fn execute<C, K>(
    config: &ResolvedConfig,
    input: &ReleaseInput,
    chooser: C,
    confirmer: K,
) -> Result<ReleaseOutcome>
where
    C: ChoicePrompter,
    K: ConfirmPrompter,
{
    let operation = ReleaseOperation::new(
        CargoPinVersionSource::from_config(config),
        FileSystemWorkspaceIndex::new(),
        FileSystemManifestStore::new(),
        Git2Provider::new(),
        chooser,
        confirmer,
    );
    Ok(operation.execute(&config.root, input)?)
}

fn print_plan(plan: &ReleasePlan, git: bool) {
    println!("upstream: {}", plan.pinned);
    println!("current: {}", plan.current);
    println!("release: {} ({})", plan.candidate.version, plan.candidate.tag);
    if git {
        println!("tag: {}", plan.tag_name);
    }

    println!();
    if plan.manifests.is_empty() {
        println!("No manifest changes.");
    } else {
        println!("Manifests to update:");
        for path in &plan.manifests {
            println!("  {}", path.display());
        }
    }
}

fn print_released(output: &ReleaseOutput) {
    println!(
        "Released {} ({})",
        output.plan.candidate.version, output.plan.candidate.tag
    );
    for line in output.audit.summary().lines() {
        println!("  {line}");
    }

    if let Some(git) = &output.git {
        println!("  committed {}", short_sha(&git.commit.sha));
        println!("  tagged {}", git.tag.name);
    }
}

fn short_sha(sha: &str) -> &str {
    sha.get(..7).unwrap_or(sha)
}
