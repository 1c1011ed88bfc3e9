use super::{ensure_declared, target_element};
use crate::cli::OutputFormat;
use crate::collector::InterfaceMetaDataCollector;
use crate::hierarchy::{TargetElement, TypeModel, TypeName};
use crate::metadata::{Annotation, AnnotationFlavor};
use anyhow::Result;
use colored::*;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for `metainherit interfaces`
#[derive(Debug, Clone)]
pub struct InterfacesConfig {
    pub model: PathBuf,
    pub type_name: String,
    pub method: Option<String>,
    pub params: Vec<String>,
    pub kind: Option<String>,
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Serialize)]
pub struct InterfacesReport {
    pub target: TargetElement,
    pub interfaces: Vec<TypeName>,
    pub metadata: Vec<Annotation>,
}

pub fn handle_interfaces_command(config: InterfacesConfig) -> Result<()> {
    let model = Arc::new(TypeModel::load(&config.model)?);
    let ty = TypeName::from(config.type_name.as_str());
    ensure_declared(&model, &ty)?;

    let collector = InterfaceMetaDataCollector::builder(AnnotationFlavor)
        .hierarchy(model.clone())
        .delegate(model)
        .build()?;

    let mut interfaces = Vec::new();
    collector.collect_all_interfaces(&ty, &mut interfaces);

    let element = target_element(&ty, config.method.as_deref(), &config.params);
    let metadata = match (&element, config.kind.as_deref()) {
        (TargetElement::Method(method), Some(kind)) => {
            collector.resolve_for_method_of_kind(method, kind)
        }
        (TargetElement::Method(method), None) => collector.resolve_for_method(method),
        (TargetElement::Type(ty), Some(kind)) => collector.resolve_for_type_of_kind(ty, kind),
        (TargetElement::Type(ty), None) => collector.resolve_for_type(ty),
    };

    let report = InterfacesReport {
        target: element,
        interfaces,
        metadata,
    };

    match config.format {
        OutputFormat::Text => print!("{}", render_text(&report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

pub fn render_text(report: &InterfacesReport) -> String {
    let mut out = format!("{}\n", report.target.to_string().bold());
    let interfaces = if report.interfaces.is_empty() {
        "none".to_string()
    } else {
        report
            .interfaces
            .iter()
            .map(TypeName::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };
    out.push_str(&format!("  {} {}\n", "interfaces:".dimmed(), interfaces));
    if report.metadata.is_empty() {
        out.push_str(&format!("  {}\n", "(no metadata)".yellow()));
    }
    for annotation in &report.metadata {
        out.push_str(&format!("  {}\n", annotation.to_string().green()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_text_lists_interfaces() {
        colored::control::set_override(false);
        let report = InterfacesReport {
            target: TargetElement::Type("C".into()),
            interfaces: vec!["X".into(), "Y".into()],
            metadata: vec![Annotation::new("K1")],
        };

        let text = render_text(&report);

        assert_eq!(text, "type C\n  interfaces: X, Y\n  @K1\n");
    }

    #[test]
    fn test_render_text_without_interfaces() {
        colored::control::set_override(false);
        let report = InterfacesReport {
            target: TargetElement::Type("C".into()),
            interfaces: vec![],
            metadata: vec![],
        };

        let text = render_text(&report);

        assert!(text.contains("interfaces: none"));
        assert!(text.contains("(no metadata)"));
    }
}
