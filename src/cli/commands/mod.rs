//! Command handlers for the metainherit CLI
//!
//! Each handler loads what it needs, runs the library call and renders the
//! result. Rendering is kept in pure `render_*` functions so it can be
//! tested without capturing stdout.

pub mod check;
pub mod interfaces;
pub mod resolve;

pub use check::handle_check_command;
pub use interfaces::{handle_interfaces_command, InterfacesConfig};
pub use resolve::{handle_resolve_command, ResolveConfig};

use crate::hierarchy::{MethodRef, MethodSignature, TargetElement, TypeModel, TypeName};
use anyhow::Result;

/// Build the element named on the command line: a method when `method` is
/// given, the type itself otherwise.
pub(crate) fn target_element(
    type_name: &TypeName,
    method: Option<&str>,
    params: &[String],
) -> TargetElement {
    match method {
        Some(name) => TargetElement::Method(MethodRef::new(
            type_name.clone(),
            MethodSignature::new(name, params.iter().cloned()),
        )),
        None => TargetElement::Type(type_name.clone()),
    }
}

pub(crate) fn ensure_declared(model: &TypeModel, ty: &TypeName) -> Result<()> {
    if !model.contains(ty) {
        anyhow::bail!("Type '{}' is not declared in the model", ty);
    }
    Ok(())
}
