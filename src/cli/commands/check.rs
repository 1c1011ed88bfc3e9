use crate::hierarchy::TypeModel;
use anyhow::Result;
use colored::*;
use std::path::Path;

/// Validate a model file and print its summary. Any structural problem
/// (unknown reference, cycle, shape mismatch) surfaces as the error.
pub fn handle_check_command(model_path: &Path) -> Result<()> {
    let model = TypeModel::load(model_path)?;
    println!(
        "{} {}: {}",
        "✓".green(),
        model_path.display(),
        model.summary()
    );
    Ok(())
}
